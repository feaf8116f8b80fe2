//! Handlers for `/notification/mobile`.
//!
//! Both endpoints address the target user via the `userId` query parameter,
//! which is required and must not be supplied more than once.

use std::sync::Arc;

use axum::{
  Form, Json,
  extract::{Query, State},
};
use serde::Deserialize;

use orgdir_core::{
  Error,
  collection::Collection,
  identity::UserId,
  preference::NotificationEntry,
  store::{ConfigStore, ImageShrinker, UserStore},
};
use orgdir_service::DirectoryService;

use crate::{error::ApiError, identity::CallerIdentity};

// ─── Preconditions ────────────────────────────────────────────────────────────

/// Extract exactly one `userId` from the raw query pairs.
fn single_user_id(params: &[(String, String)]) -> Result<UserId, ApiError> {
  let mut ids = params.iter().filter(|(k, _)| k == "userId").map(|(_, v)| v);

  let first = ids.next().ok_or_else(|| {
    ApiError(Error::Validation("Parameter userId required.".to_string()))
  })?;
  if ids.next().is_some() {
    return Err(ApiError(Error::Validation(
      "Parameter userId must not be multiple.".to_string(),
    )));
  }

  Ok(UserId::parse(first)?)
}

// ─── Handlers ─────────────────────────────────────────────────────────────────

/// `GET /notification/mobile?userId=…`
pub async fn get_mobile<U, C, I>(
  State(service): State<Arc<DirectoryService<U, C, I>>>,
  CallerIdentity(caller): CallerIdentity,
  Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<Collection<NotificationEntry>>, ApiError>
where
  U: UserStore + 'static,
  C: ConfigStore + 'static,
  I: ImageShrinker + 'static,
{
  let id = single_user_id(&params)?;
  let collection = service.get_mobile_notification(&caller, &id).await?;
  Ok(Json(collection))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PutNotificationForm {
  pub mobile_notification: String,
}

/// `PUT /notification/mobile?userId=…` — form field `mobileNotification`.
pub async fn put_mobile<U, C, I>(
  State(service): State<Arc<DirectoryService<U, C, I>>>,
  CallerIdentity(caller): CallerIdentity,
  Query(params): Query<Vec<(String, String)>>,
  Form(form): Form<PutNotificationForm>,
) -> Result<Json<Collection<NotificationEntry>>, ApiError>
where
  U: UserStore + 'static,
  C: ConfigStore + 'static,
  I: ImageShrinker + 'static,
{
  let id = single_user_id(&params)?;
  let collection = service
    .put_mobile_notification(&caller, &id, &form.mobile_notification)
    .await?;
  Ok(Json(collection))
}
