//! Person — the public projection of a raw organizational user record.
//!
//! A [`Person`] is assembled fresh from a [`UserRecord`] on every query and
//! owned solely by the response path; nothing here is cached.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::identity::Caller;

// ─── Raw record ──────────────────────────────────────────────────────────────

/// A user entity exactly as the organizational user store returns it,
/// pre-assembly.
#[derive(Debug, Clone, Default)]
pub struct UserRecord {
  pub login_name:           String,
  pub first_name:           String,
  pub last_name:            String,
  pub first_name_phonetic:  Option<String>,
  pub last_name_phonetic:   Option<String>,
  /// Raw photo attribute; `"T"` and `"N"` both mean a photo is present.
  pub has_photo:            Option<String>,
  pub photo_modified:       Option<DateTime<Utc>>,
}

// ─── Public projection ───────────────────────────────────────────────────────

/// A structured name (family/given).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredName {
  pub family_name: Option<String>,
  pub given_name:  Option<String>,
}

/// The assembled person representation returned by the API.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
  /// Organization-qualified user id, `{orgId}:{loginName}`.
  pub id:             String,
  /// Derived display name, `{lastName} {firstName}`.
  pub display_name:   String,
  pub name:           StructuredName,
  /// Secondary phonetic reading of the name.
  pub name_phonetic:  StructuredName,
  pub has_photo:      bool,
  pub photo_modified: Option<DateTime<Utc>>,
}

impl Person {
  /// Assemble the full projection of `record` as seen by `caller`.
  pub fn assemble(record: &UserRecord, caller: &Caller) -> Self {
    Self {
      id:             caller.qualified_id(&record.login_name),
      display_name:   format!("{} {}", record.last_name, record.first_name),
      name:           StructuredName {
        family_name: Some(record.last_name.clone()),
        given_name:  Some(record.first_name.clone()),
      },
      name_phonetic:  StructuredName {
        family_name: record.last_name_phonetic.clone(),
        given_name:  record.first_name_phonetic.clone(),
      },
      has_photo:      matches!(
        record.has_photo.as_deref(),
        Some("T") | Some("N")
      ),
      photo_modified: record.photo_modified,
    }
  }
}

// ─── Field projection ────────────────────────────────────────────────────────

/// Narrows an assembled [`Person`] to the caller-requested fields.
///
/// The directory currently always returns the full projection; this seam
/// exists so real field filtering is a drop-in replacement rather than a
/// rewrite.
pub trait FieldProjector: Send + Sync {
  fn project(&self, person: Person, fields: &[String]) -> Person;
}

/// Pass-through projector: the requested-fields parameter is accepted and
/// ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct FullProjection;

impl FieldProjector for FullProjection {
  fn project(&self, person: Person, _fields: &[String]) -> Person {
    person
  }
}
