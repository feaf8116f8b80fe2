//! Caller identity and user-id addressing.
//!
//! Every service operation takes an explicit [`Caller`] value instead of
//! reading ambient per-request state; the transport layer is responsible for
//! resolving whatever token scheme it uses into one of these.

use crate::{Error, Result};

/// The authenticated caller of an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
  /// The caller's organization id.
  pub org_id:   String,
  /// The caller's login name within the organization.
  pub username: String,
}

impl Caller {
  pub fn new(org_id: impl Into<String>, username: impl Into<String>) -> Self {
    Self { org_id: org_id.into(), username: username.into() }
  }

  /// Organization-qualified id for `username`, e.g. `acme:tanaka`.
  pub fn qualified_id(&self, username: &str) -> String {
    format!("{}:{username}", self.org_id)
  }

  /// Permission check: the target of a write must be the caller itself.
  pub fn check_same_viewer(&self, target: &str) -> Result<()> {
    if target == self.username {
      Ok(())
    } else {
      Err(Error::AccessDenied)
    }
  }
}

// ─── User id ─────────────────────────────────────────────────────────────────

/// A user addressed by a request: either the caller (`@me`) or a literal
/// login name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserId {
  Me,
  Id(String),
}

impl UserId {
  /// Parse a path or query value. `@me` addresses the caller; any other
  /// `@`-prefixed alias is rejected.
  pub fn parse(raw: &str) -> Result<Self> {
    match raw {
      "@me" => Ok(Self::Me),
      other if other.starts_with('@') => Err(Error::Validation(format!(
        "Parameter userId invalid: {other}"
      ))),
      "" => Err(Error::Validation("Parameter userId required.".to_string())),
      other => Ok(Self::Id(other.to_string())),
    }
  }

  /// The login name this id resolves to for `caller`.
  pub fn resolve<'a>(&'a self, caller: &'a Caller) -> &'a str {
    match self {
      Self::Me => &caller.username,
      Self::Id(name) => name,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parse_me_and_literal() {
    assert_eq!(UserId::parse("@me").unwrap(), UserId::Me);
    assert_eq!(UserId::parse("tanaka").unwrap(), UserId::Id("tanaka".into()));
  }

  #[test]
  fn parse_rejects_unknown_alias_and_empty() {
    assert!(matches!(UserId::parse("@owner"), Err(Error::Validation(_))));
    assert!(matches!(UserId::parse(""), Err(Error::Validation(_))));
  }

  #[test]
  fn resolve_me_is_caller() {
    let caller = Caller::new("acme", "suzuki");
    assert_eq!(UserId::Me.resolve(&caller), "suzuki");
    assert_eq!(UserId::Id("tanaka".into()).resolve(&caller), "tanaka");
  }

  #[test]
  fn same_viewer_check() {
    let caller = Caller::new("acme", "suzuki");
    assert!(caller.check_same_viewer("suzuki").is_ok());
    assert!(matches!(
      caller.check_same_viewer("tanaka"),
      Err(Error::AccessDenied)
    ));
  }
}
