//! Row structs and value encoding between SQLite and the core types.

use chrono::{DateTime, Utc};
use orgdir_core::person::UserRecord;

use crate::{Error, Result};

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339()
}

pub fn parse_dt(raw: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(raw)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(format!("{raw:?}: {e}")))
}

/// A `users` row as SQLite hands it back, before timestamp parsing.
pub struct RawUserRow {
  pub login_name:          String,
  pub first_name:          String,
  pub last_name:           String,
  pub first_name_phonetic: Option<String>,
  pub last_name_phonetic:  Option<String>,
  pub has_photo:           String,
  pub photo_modified:      Option<String>,
}

impl RawUserRow {
  pub fn into_record(self) -> Result<UserRecord> {
    Ok(UserRecord {
      login_name:          self.login_name,
      first_name:          self.first_name,
      last_name:           self.last_name,
      first_name_phonetic: self.first_name_phonetic,
      last_name_phonetic:  self.last_name_phonetic,
      has_photo:           Some(self.has_photo),
      photo_modified:      self
        .photo_modified
        .as_deref()
        .map(parse_dt)
        .transpose()?,
    })
  }
}
