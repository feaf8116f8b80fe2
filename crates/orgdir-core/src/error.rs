//! Error types for `orgdir-core`.
//!
//! The four conditions below are the complete failure vocabulary of the
//! directory service. Anything a backend raises that is not one of these is
//! normalised to [`Error::Internal`] at the service boundary so internal
//! error shapes never leak across the API.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A malformed or missing required parameter.
  #[error("validation error: {0}")]
  Validation(String),

  /// A disallowed scope selector or a failed permission check.
  #[error("access denied")]
  AccessDenied,

  /// The requested entity does not exist.
  #[error("not found: {0}")]
  NotFound(String),

  /// Any unexpected failure (store faults, image-utility faults, corrupt
  /// persisted data). Carries a message, never the source error itself.
  #[error("internal error: {0}")]
  Internal(String),
}

impl Error {
  /// Wrap an arbitrary backend failure as [`Error::Internal`].
  pub fn internal(source: impl std::fmt::Display) -> Self {
    Self::Internal(source.to_string())
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
