//! Trait seams for the external collaborators the directory consumes.
//!
//! The traits are implemented by storage backends (e.g.
//! `orgdir-store-sqlite`). Higher layers (`orgdir-service`, `orgdir-api`)
//! depend on these abstractions, not on any concrete backend.
//!
//! All methods return `Send` futures so the traits can be used in
//! multi-threaded async runtimes (e.g. tokio with `axum`).

use std::future::Future;

use crate::{person::UserRecord, query::SearchOptions};

// ─── User store ──────────────────────────────────────────────────────────────

/// Abstraction over the organizational user store.
pub trait UserStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Paged/filtered/sorted lookup across every visible user.
  fn find<'a>(
    &'a self,
    options: &'a SearchOptions,
  ) -> impl Future<Output = Result<Vec<UserRecord>, Self::Error>> + Send + 'a;

  /// Matching count for the same query, unaffected by paging.
  fn count<'a>(
    &'a self,
    options: &'a SearchOptions,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + 'a;

  /// Paged/filtered/sorted lookup restricted to members of `group`.
  fn find_by_group<'a>(
    &'a self,
    group: &'a str,
    options: &'a SearchOptions,
  ) -> impl Future<Output = Result<Vec<UserRecord>, Self::Error>> + Send + 'a;

  /// Group-scoped matching count, unaffected by paging.
  fn count_by_group<'a>(
    &'a self,
    group: &'a str,
    options: &'a SearchOptions,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + 'a;

  /// Retrieve a single user by login name. Returns `None` if not found.
  fn find_by_username<'a>(
    &'a self,
    username: &'a str,
  ) -> impl Future<Output = Result<Option<UserRecord>, Self::Error>> + Send + 'a;

  /// Retrieve the stored profile photo. Returns `None` if absent.
  fn get_photo<'a>(
    &'a self,
    username: &'a str,
  ) -> impl Future<Output = Result<Option<Vec<u8>>, Self::Error>> + Send + 'a;

  /// Store (or, with `None`, clear) both profile photo renditions and
  /// update the raw photo attribute accordingly.
  fn set_photo<'a>(
    &'a self,
    username: &'a str,
    large: Option<Vec<u8>>,
    small: Option<Vec<u8>>,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;
}

// ─── Configuration store ─────────────────────────────────────────────────────

/// A generic key/value configuration store.
///
/// `get` is strict: absence is surfaced as `None`, never substituted with a
/// default. Default-substitution policy belongs to the caller.
pub trait ConfigStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  fn get<'a>(
    &'a self,
    key: &'a str,
  ) -> impl Future<Output = Result<Option<String>, Self::Error>> + Send + 'a;

  fn put<'a>(
    &'a self,
    key: &'a str,
    value: &'a str,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;
}

// ─── Image shrink utility ────────────────────────────────────────────────────

/// External image-resizing collaborator used by icon upload.
pub trait ImageShrinker: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Produce a rendition of `raw` bounded by `width` x `height`.
  fn shrink(
    &self,
    raw: &[u8],
    width: u32,
    height: u32,
  ) -> Result<Vec<u8>, Self::Error>;
}

/// Shrinker that returns the input unchanged. Image processing is out of
/// scope for this service; deployments wire in a real implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughShrinker;

impl ImageShrinker for PassthroughShrinker {
  type Error = std::convert::Infallible;

  fn shrink(
    &self,
    raw: &[u8],
    _width: u32,
    _height: u32,
  ) -> Result<Vec<u8>, Self::Error> {
    Ok(raw.to_vec())
  }
}
