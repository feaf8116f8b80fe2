//! Caller extraction.
//!
//! The transport in front of this service resolves its token scheme into
//! two headers: `x-org-id` (the caller's organization) and `x-viewer` (the
//! caller's login name). The extractor turns those into the explicit
//! [`Caller`] value every service operation takes; a request without a
//! resolved identity is refused.

use axum::{extract::FromRequestParts, http::request::Parts};

use orgdir_core::{Error, identity::Caller};

use crate::error::ApiError;

pub const ORG_ID_HEADER: &str = "x-org-id";
pub const VIEWER_HEADER: &str = "x-viewer";

/// Extractor wrapper for [`Caller`].
pub struct CallerIdentity(pub Caller);

impl<S> FromRequestParts<S> for CallerIdentity
where
  S: Send + Sync,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    _state: &S,
  ) -> Result<Self, Self::Rejection> {
    let header = |name: &str| {
      parts
        .headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
    };

    match (header(ORG_ID_HEADER), header(VIEWER_HEADER)) {
      (Some(org_id), Some(viewer)) => {
        Ok(Self(Caller::new(org_id, viewer)))
      }
      _ => Err(ApiError(Error::AccessDenied)),
    }
  }
}
