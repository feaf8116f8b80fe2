//! The directory service — scope resolution, person assembly, icon storage
//! and the mobile-notification preference operations.
//!
//! [`DirectoryService`] is generic over the backing [`UserStore`] and
//! [`ConfigStore`] plus the external [`ImageShrinker`]; transport and
//! authentication concerns live in `orgdir-api`. Every operation takes an
//! explicit [`Caller`] value.

pub mod preference;


use std::sync::Arc;

use orgdir_core::{
  Error, Result,
  collection::Collection,
  identity::{Caller, UserId},
  person::{FieldProjector, FullProjection, Person, UserRecord},
  preference::{NotificationEntry, NotificationSetting, validate},
  query::{CollectionOptions, SearchOptions},
  scope::GroupScope,
  store::{ConfigStore, ImageShrinker, UserStore},
};

use preference::PreferenceStore;

// Bounding boxes for the two stored icon renditions.
const LARGE_THUMBNAIL_WIDTH: u32 = 200;
const LARGE_THUMBNAIL_HEIGHT: u32 = 200;
const SMALL_THUMBNAIL_WIDTH: u32 = 100;
const SMALL_THUMBNAIL_HEIGHT: u32 = 100;

// ─── Service ─────────────────────────────────────────────────────────────────

/// Stateless per-request facade over the user and configuration stores.
pub struct DirectoryService<U, C, I> {
  users:     Arc<U>,
  config:    Arc<C>,
  shrinker:  Arc<I>,
  projector: Arc<dyn FieldProjector>,
}

impl<U, C, I> Clone for DirectoryService<U, C, I> {
  fn clone(&self) -> Self {
    Self {
      users:     Arc::clone(&self.users),
      config:    Arc::clone(&self.config),
      shrinker:  Arc::clone(&self.shrinker),
      projector: Arc::clone(&self.projector),
    }
  }
}

impl<U, C, I> DirectoryService<U, C, I>
where
  U: UserStore,
  C: ConfigStore,
  I: ImageShrinker,
{
  pub fn new(users: Arc<U>, config: Arc<C>, shrinker: Arc<I>) -> Self {
    Self { users, config, shrinker, projector: Arc::new(FullProjection) }
  }

  /// Replace the default pass-through field projector.
  pub fn with_projector(mut self, projector: Arc<dyn FieldProjector>) -> Self {
    self.projector = projector;
    self
  }

  // ── Scope resolution ──────────────────────────────────────────────────────

  /// Resolve `scope` against the user store: the matching records for the
  /// requested page plus the total matching count.
  pub async fn resolve_scope(
    &self,
    scope: &GroupScope,
    options: &SearchOptions,
  ) -> Result<(Vec<UserRecord>, usize)> {
    match scope {
      // @all and @friends resolve identically.
      GroupScope::All | GroupScope::Friends => {
        let records =
          self.users.find(options).await.map_err(Error::internal)?;
        let total =
          self.users.count(options).await.map_err(Error::internal)?;
        Ok((records, total))
      }
      GroupScope::Group(group) => {
        let records = self
          .users
          .find_by_group(group, options)
          .await
          .map_err(Error::internal)?;
        let total = self
          .users
          .count_by_group(group, options)
          .await
          .map_err(Error::internal)?;
        Ok((records, total))
      }
      // Resolution of soft-deleted users is not implemented; this is not a
      // true empty state.
      GroupScope::Deleted => Ok((Vec::new(), 0)),
      // Empty records with a fixed total of 1. Known quirk, kept as-is.
      GroupScope::Myself => Ok((Vec::new(), 1)),
    }
  }

  // ── People ────────────────────────────────────────────────────────────────

  /// Resolve a person collection for `scope`, normalising the raw options
  /// first so downstream code never sees a missing operation or sort order.
  pub async fn get_people(
    &self,
    caller: &Caller,
    scope: &GroupScope,
    raw: &CollectionOptions,
    fields: &[String],
  ) -> Result<Collection<Person>> {
    tracing::debug!(?scope, first = raw.first, max = raw.max, "get_people");

    let options = SearchOptions::from_collection(raw);
    let (records, total) = self.resolve_scope(scope, &options).await?;

    let entry = records
      .iter()
      .map(|record| {
        self.projector.project(Person::assemble(record, caller), fields)
      })
      .collect();

    Ok(Collection::new(entry, options.first, total, options.max))
  }

  /// Retrieve a single person by id.
  pub async fn get_person(
    &self,
    caller: &Caller,
    id: &UserId,
    fields: &[String],
  ) -> Result<Person> {
    let username = id.resolve(caller);
    let record = self
      .users
      .find_by_username(username)
      .await
      .map_err(Error::internal)?
      .ok_or_else(|| Error::NotFound(format!("person {username}")))?;

    Ok(self.projector.project(Person::assemble(&record, caller), fields))
  }

  // ── Icon ──────────────────────────────────────────────────────────────────

  pub async fn get_icon(&self, caller: &Caller, id: &UserId) -> Result<Vec<u8>> {
    let username = id.resolve(caller);
    self
      .users
      .get_photo(username)
      .await
      .map_err(Error::internal)?
      .ok_or_else(|| Error::NotFound(format!("icon for {username}")))
  }

  /// Shrink the uploaded image to both stored renditions, then persist.
  /// The two steps are not transactional: a store failure after a
  /// successful shrink simply propagates.
  pub async fn put_icon(
    &self,
    caller: &Caller,
    id: &UserId,
    raw: &[u8],
  ) -> Result<()> {
    let username = id.resolve(caller);
    caller.check_same_viewer(username)?;

    let large = self
      .shrinker
      .shrink(raw, LARGE_THUMBNAIL_WIDTH, LARGE_THUMBNAIL_HEIGHT)
      .map_err(Error::internal)?;
    let small = self
      .shrinker
      .shrink(raw, SMALL_THUMBNAIL_WIDTH, SMALL_THUMBNAIL_HEIGHT)
      .map_err(Error::internal)?;

    self
      .users
      .set_photo(username, Some(large), Some(small))
      .await
      .map_err(Error::internal)
  }

  pub async fn delete_icon(&self, caller: &Caller, id: &UserId) -> Result<()> {
    let username = id.resolve(caller);
    caller.check_same_viewer(username)?;

    self
      .users
      .set_photo(username, None, None)
      .await
      .map_err(Error::internal)
  }

  // ── Mobile notification preference ────────────────────────────────────────

  /// Read the caller's stored preference. A never-written key is NotFound;
  /// the decoded value is returned without re-validation.
  pub async fn get_mobile_notification(
    &self,
    caller: &Caller,
    id: &UserId,
  ) -> Result<Collection<NotificationEntry>> {
    let username = id.resolve(caller);
    caller.check_same_viewer(username)?;

    let prefs = PreferenceStore::new(&*self.config);
    let raw = prefs.get(username).await?.ok_or_else(|| {
      Error::NotFound(format!("mobile notification setting for {username}"))
    })?;
    let setting = NotificationSetting::decode(&raw)?;

    Ok(Collection::of(vec![NotificationEntry::new(
      caller.qualified_id(username),
      setting,
    )]))
  }

  /// Validate and store a preference value, echoing the stored flags.
  /// Concurrent writers are last-write-wins.
  pub async fn put_mobile_notification(
    &self,
    caller: &Caller,
    id: &UserId,
    value: &str,
  ) -> Result<Collection<NotificationEntry>> {
    let username = id.resolve(caller);
    caller.check_same_viewer(username)?;

    validate(value)?;

    tracing::debug!(user = username, "put_mobile_notification");

    let prefs = PreferenceStore::new(&*self.config);
    prefs.put(username, value).await?;
    let setting = NotificationSetting::decode(value)?;

    Ok(Collection::of(vec![NotificationEntry::new(
      caller.qualified_id(username),
      setting,
    )]))
  }
}
