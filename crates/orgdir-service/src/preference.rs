//! Per-user preference access over the generic configuration store.
//!
//! The adapter namespaces keys with [`MOBILE_NOTIFICATION_PREFIX`] and keeps
//! `get` strict: absence comes back as `None` so the caller can raise
//! NotFound. The "default to `A1`" policy is a separate wrapper, not baked
//! into the read.

use orgdir_core::{
  Error, Result, preference::MOBILE_NOTIFICATION_PREFIX, store::ConfigStore,
};

/// Value substituted by [`PreferenceStore::get_or_default`] for users who
/// never wrote a preference: notify for everything, including while
/// browsing.
pub const DEFAULT_MOBILE_NOTIFICATION: &str = "A1";

/// Namespaced preference accessor for a [`ConfigStore`].
pub struct PreferenceStore<'a, C> {
  config: &'a C,
}

impl<'a, C: ConfigStore> PreferenceStore<'a, C> {
  pub fn new(config: &'a C) -> Self {
    Self { config }
  }

  fn key(username: &str) -> String {
    format!("{MOBILE_NOTIFICATION_PREFIX}{username}")
  }

  /// Strict read: `None` means the user never wrote a preference.
  pub async fn get(&self, username: &str) -> Result<Option<String>> {
    self
      .config
      .get(&Self::key(username))
      .await
      .map_err(Error::internal)
  }

  /// Read with the default-substitution policy applied.
  pub async fn get_or_default(&self, username: &str) -> Result<String> {
    Ok(
      self
        .get(username)
        .await?
        .unwrap_or_else(|| DEFAULT_MOBILE_NOTIFICATION.to_string()),
    )
  }

  /// Overwrite the stored preference. There is no delete operation.
  pub async fn put(&self, username: &str, value: &str) -> Result<()> {
    self
      .config
      .put(&Self::key(username), value)
      .await
      .map_err(Error::internal)
  }
}
