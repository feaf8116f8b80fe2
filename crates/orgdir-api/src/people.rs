//! Handlers for `/people` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/people/{guid}/{selector}` | Selector: `@all`, `@friends`, `@deleted`, `@self`, or a group id |
//! | `GET`  | `/people/{guid}` | 404 if not found |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
};
use serde::Deserialize;

use orgdir_core::{
  collection::Collection,
  identity::UserId,
  person::Person,
  query::{CollectionOptions, FilterOperation, SortOrder},
  scope::GroupScope,
  store::{ConfigStore, ImageShrinker, UserStore},
};
use orgdir_service::DirectoryService;

use crate::{error::ApiError, identity::CallerIdentity};

/// Page size applied when the caller does not send `count`.
const DEFAULT_COUNT: usize = 20;

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PeopleParams {
  pub start_index:  usize,
  pub count:        usize,
  pub filter_by:    Option<String>,
  pub filter_op:    Option<FilterOperation>,
  pub filter_value: Option<String>,
  pub sort_by:      Option<String>,
  pub sort_order:   Option<SortOrder>,
  /// Comma-separated field names; accepted and currently inert.
  pub fields:       Option<String>,
}

impl Default for PeopleParams {
  fn default() -> Self {
    Self {
      start_index:  0,
      count:        DEFAULT_COUNT,
      filter_by:    None,
      filter_op:    None,
      filter_value: None,
      sort_by:      None,
      sort_order:   None,
      fields:       None,
    }
  }
}

fn split_fields(raw: &Option<String>) -> Vec<String> {
  raw
    .as_deref()
    .map(|s| {
      s.split(',')
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(str::to_owned)
        .collect()
    })
    .unwrap_or_default()
}

/// `GET /people/{guid}/{selector}`
pub async fn list<U, C, I>(
  State(service): State<Arc<DirectoryService<U, C, I>>>,
  CallerIdentity(caller): CallerIdentity,
  Path((guid, selector)): Path<(String, String)>,
  Query(params): Query<PeopleParams>,
) -> Result<Json<Collection<Person>>, ApiError>
where
  U: UserStore + 'static,
  C: ConfigStore + 'static,
  I: ImageShrinker + 'static,
{
  // The path anchor must be well-formed; the viewer is the authenticated
  // caller.
  UserId::parse(&guid)?;
  let scope = GroupScope::parse(&selector)?;

  let raw = CollectionOptions {
    first:            params.start_index,
    max:              params.count,
    filter:           params.filter_by.clone(),
    filter_operation: params.filter_op,
    filter_value:     params.filter_value.clone(),
    sort_by:          params.sort_by.clone(),
    sort_order:       params.sort_order,
  };
  let fields = split_fields(&params.fields);

  let collection =
    service.get_people(&caller, &scope, &raw, &fields).await?;
  Ok(Json(collection))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Default)]
pub struct PersonParams {
  pub fields: Option<String>,
}

/// `GET /people/{guid}`
pub async fn get_one<U, C, I>(
  State(service): State<Arc<DirectoryService<U, C, I>>>,
  CallerIdentity(caller): CallerIdentity,
  Path(guid): Path<String>,
  Query(params): Query<PersonParams>,
) -> Result<Json<Person>, ApiError>
where
  U: UserStore + 'static,
  C: ConfigStore + 'static,
  I: ImageShrinker + 'static,
{
  let id = UserId::parse(&guid)?;
  let fields = split_fields(&params.fields);

  let person = service.get_person(&caller, &id, &fields).await?;
  Ok(Json(person))
}
