//! Handlers for `/people/{guid}/icon`.

use std::sync::Arc;

use axum::{
  extract::{Path, State},
  http::{StatusCode, header},
  response::{IntoResponse, Response},
};
use bytes::Bytes;

use orgdir_core::{
  identity::UserId,
  store::{ConfigStore, ImageShrinker, UserStore},
};
use orgdir_service::DirectoryService;

use crate::{error::ApiError, identity::CallerIdentity};

/// `GET /people/{guid}/icon`
pub async fn get_icon<U, C, I>(
  State(service): State<Arc<DirectoryService<U, C, I>>>,
  CallerIdentity(caller): CallerIdentity,
  Path(guid): Path<String>,
) -> Result<Response, ApiError>
where
  U: UserStore + 'static,
  C: ConfigStore + 'static,
  I: ImageShrinker + 'static,
{
  let id = UserId::parse(&guid)?;
  let bytes = service.get_icon(&caller, &id).await?;
  Ok(([(header::CONTENT_TYPE, "image/jpeg")], bytes).into_response())
}

/// `PUT /people/{guid}/icon` — body is the raw image.
pub async fn put_icon<U, C, I>(
  State(service): State<Arc<DirectoryService<U, C, I>>>,
  CallerIdentity(caller): CallerIdentity,
  Path(guid): Path<String>,
  body: Bytes,
) -> Result<StatusCode, ApiError>
where
  U: UserStore + 'static,
  C: ConfigStore + 'static,
  I: ImageShrinker + 'static,
{
  let id = UserId::parse(&guid)?;
  service.put_icon(&caller, &id, &body).await?;
  Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /people/{guid}/icon`
pub async fn delete_icon<U, C, I>(
  State(service): State<Arc<DirectoryService<U, C, I>>>,
  CallerIdentity(caller): CallerIdentity,
  Path(guid): Path<String>,
) -> Result<StatusCode, ApiError>
where
  U: UserStore + 'static,
  C: ConfigStore + 'static,
  I: ImageShrinker + 'static,
{
  let id = UserId::parse(&guid)?;
  service.delete_icon(&caller, &id).await?;
  Ok(StatusCode::NO_CONTENT)
}
