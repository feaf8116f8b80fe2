//! The mobile-notification preference codec.
//!
//! A preference is persisted as a fixed two-character string: position 0 is
//! the mobile-notification flag (`A` = all, `F` = filtered), position 1 the
//! while-browsing flag (`0` = off, `1` = on).
//!
//! Write validation is deliberately looser than it looks: a value passes if
//! *either* flag is drawn from its alphabet, so `X1` is accepted while `X9`
//! is rejected. This matches the deployed behaviour and is kept until
//! product intent says otherwise.

use serde::Serialize;

use crate::{Error, Result};

/// Configuration-store key prefix; the per-user key is
/// `{MOBILE_NOTIFICATION_PREFIX}{loginName}`.
pub const MOBILE_NOTIFICATION_PREFIX: &str = "saas.mobile.notification.";

// ─── Flags ───────────────────────────────────────────────────────────────────

/// Mobile-notification delivery mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MobileFlag {
  /// Notify for everything.
  All,
  /// Notify for a filtered subset only.
  Filtered,
}

impl MobileFlag {
  pub fn as_char(self) -> char {
    match self {
      Self::All => 'A',
      Self::Filtered => 'F',
    }
  }

  pub fn from_char(c: char) -> Option<Self> {
    match c {
      'A' => Some(Self::All),
      'F' => Some(Self::Filtered),
      _ => None,
    }
  }
}

/// Whether to keep notifying while the user is actively browsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowseFlag {
  Off,
  On,
}

impl BrowseFlag {
  pub fn as_char(self) -> char {
    match self {
      Self::Off => '0',
      Self::On => '1',
    }
  }

  pub fn from_char(c: char) -> Option<Self> {
    match c {
      '0' => Some(Self::Off),
      '1' => Some(Self::On),
      _ => None,
    }
  }
}

// ─── Setting ─────────────────────────────────────────────────────────────────

/// A decoded preference value.
///
/// The flags are kept as raw characters because reads are positional and
/// unvalidated: a value admitted by the permissive write check (e.g. `X1`)
/// must survive a decode round trip. Use [`NotificationSetting::mobile_flag`]
/// and [`NotificationSetting::browse_flag`] for the typed view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationSetting {
  pub mobile: char,
  pub browse: char,
}

impl NotificationSetting {
  /// Decode a persisted value: character 0 is the mobile flag, character 1
  /// the browse flag. A shorter value is data corruption.
  pub fn decode(raw: &str) -> Result<Self> {
    let mut chars = raw.chars();
    let (Some(mobile), Some(browse)) = (chars.next(), chars.next()) else {
      return Err(Error::Internal(format!(
        "corrupt mobile notification value: {raw:?}"
      )));
    };
    Ok(Self { mobile, browse })
  }

  /// Encode a valid flag pair as its fixed-width persisted form.
  pub fn encode(mobile: MobileFlag, browse: BrowseFlag) -> String {
    let mut out = String::with_capacity(2);
    out.push(mobile.as_char());
    out.push(browse.as_char());
    out
  }

  pub fn mobile_flag(&self) -> Option<MobileFlag> {
    MobileFlag::from_char(self.mobile)
  }

  pub fn browse_flag(&self) -> Option<BrowseFlag> {
    BrowseFlag::from_char(self.browse)
  }
}

/// A notification setting as returned by the API: the decoded flags plus
/// the organization-qualified id of the user they belong to.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationEntry {
  pub user_id:             String,
  pub mobile_notification: String,
  pub while_browse:        String,
}

impl NotificationEntry {
  pub fn new(user_id: String, setting: NotificationSetting) -> Self {
    Self {
      user_id,
      mobile_notification: setting.mobile.to_string(),
      while_browse:        setting.browse.to_string(),
    }
  }
}

/// Validate a caller-supplied preference string before it is written.
///
/// Requires exactly two characters, then applies the permissive OR check:
/// the value passes when the mobile flag *or* the browse flag is valid.
pub fn validate(raw: &str) -> Result<()> {
  let invalid =
    || Error::Validation("Parameter mobileNotification invalid.".to_string());

  let mut chars = raw.chars();
  let (Some(mobile), Some(browse), None) =
    (chars.next(), chars.next(), chars.next())
  else {
    return Err(invalid());
  };

  if MobileFlag::from_char(mobile).is_some()
    || BrowseFlag::from_char(browse).is_some()
  {
    Ok(())
  } else {
    Err(invalid())
  }
}
