//! Group-scope selectors.
//!
//! A people query targets a subset of the directory named by a path
//! selector: `@all`, `@friends`, `@deleted`, `@self`, or a literal group id.

use crate::{Error, Result};

/// Which subset of the directory a people query targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupScope {
  /// Every user the caller may see.
  All,
  /// Defined as equivalent to [`GroupScope::All`].
  Friends,
  /// Users belonging to the named group.
  Group(String),
  /// Soft-deleted users. Resolution is unimplemented and always empty.
  Deleted,
  /// The caller's own record.
  Myself,
}

impl GroupScope {
  /// Parse a path selector. Anything not starting with `@` is a group id;
  /// an unrecognised `@` alias is a disallowed scope.
  pub fn parse(selector: &str) -> Result<Self> {
    match selector {
      "@all" => Ok(Self::All),
      "@friends" => Ok(Self::Friends),
      "@deleted" => Ok(Self::Deleted),
      "@self" => Ok(Self::Myself),
      other if other.starts_with('@') => Err(Error::AccessDenied),
      "" => Err(Error::AccessDenied),
      group => Ok(Self::Group(group.to_string())),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parse_known_selectors() {
    assert_eq!(GroupScope::parse("@all").unwrap(), GroupScope::All);
    assert_eq!(GroupScope::parse("@friends").unwrap(), GroupScope::Friends);
    assert_eq!(GroupScope::parse("@deleted").unwrap(), GroupScope::Deleted);
    assert_eq!(GroupScope::parse("@self").unwrap(), GroupScope::Myself);
  }

  #[test]
  fn parse_group_id() {
    assert_eq!(
      GroupScope::parse("sales").unwrap(),
      GroupScope::Group("sales".into())
    );
  }

  #[test]
  fn unknown_alias_is_access_denied() {
    assert!(matches!(GroupScope::parse("@everyone"), Err(Error::AccessDenied)));
    assert!(matches!(GroupScope::parse(""), Err(Error::AccessDenied)));
  }
}
