//! JSON REST API for the orgdir directory service.
//!
//! Exposes an axum [`Router`] backed by a [`DirectoryService`] over any
//! [`UserStore`]/[`ConfigStore`]/[`ImageShrinker`]. Token resolution and
//! TLS are the fronting transport's responsibility; requests arrive with
//! the caller identity already resolved into headers (see
//! [`identity::CallerIdentity`]).

pub mod error;
pub mod icon;
pub mod identity;
pub mod notification;
pub mod people;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  routing::get,
};
use serde::Deserialize;

use orgdir_core::store::{ConfigStore, ImageShrinker, UserStore};
use orgdir_service::DirectoryService;

pub use error::ApiError;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml`.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `service`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<U, C, I>(
  service: Arc<DirectoryService<U, C, I>>,
) -> Router<()>
where
  U: UserStore + 'static,
  C: ConfigStore + 'static,
  I: ImageShrinker + 'static,
{
  Router::new()
    // People. The static `icon` segment takes precedence over the selector
    // route, so `icon` is reserved and unusable as a group id.
    .route("/people/{guid}", get(people::get_one::<U, C, I>))
    .route(
      "/people/{guid}/icon",
      get(icon::get_icon::<U, C, I>)
        .put(icon::put_icon::<U, C, I>)
        .delete(icon::delete_icon::<U, C, I>),
    )
    .route("/people/{guid}/{selector}", get(people::list::<U, C, I>))
    // Mobile notification preference
    .route(
      "/notification/mobile",
      get(notification::get_mobile::<U, C, I>)
        .put(notification::put_mobile::<U, C, I>),
    )
    .with_state(service)
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use orgdir_core::{
    person::UserRecord,
    query::SearchOptions,
    store::{ConfigStore, PassthroughShrinker, UserStore},
  };
  use orgdir_store_sqlite::SqliteStore;
  use tower::ServiceExt as _;

  async fn make_router() -> Router {
    let store = SqliteStore::open_in_memory().await.unwrap();

    for (login, first, last) in [
      ("tanaka", "Taro", "Tanaka"),
      ("suzuki", "Hanako", "Suzuki"),
      ("tanaka2", "Jiro", "Tanaka"),
      ("sato", "Ken", "Sato"),
    ] {
      store
        .insert_user(&UserRecord {
          login_name: login.into(),
          first_name: first.into(),
          last_name:  last.into(),
          ..Default::default()
        })
        .await
        .unwrap();
    }
    store.add_group_member("sales", "tanaka").await.unwrap();
    store.add_group_member("sales", "sato").await.unwrap();

    let service = DirectoryService::new(
      Arc::new(store.clone()),
      Arc::new(store),
      Arc::new(PassthroughShrinker),
    );
    api_router(Arc::new(service))
  }

  /// Fire one request as `suzuki@acme`.
  async fn oneshot(
    router: Router,
    method: &str,
    uri: &str,
    content_type: Option<&str>,
    body: &[u8],
  ) -> axum::response::Response {
    let mut builder = Request::builder()
      .method(method)
      .uri(uri)
      .header("x-org-id", "acme")
      .header("x-viewer", "suzuki");
    if let Some(ct) = content_type {
      builder = builder.header(header::CONTENT_TYPE, ct);
    }
    let req = builder.body(Body::from(body.to_vec())).unwrap();
    router.oneshot(req).await.unwrap()
  }

  async fn json_body(resp: axum::response::Response) -> serde_json::Value {
    let bytes =
      axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
  }

  /// Store whose every method fails, for the response-sanitisation test.
  #[derive(Clone)]
  struct BrokenStore;

  fn broken() -> std::io::Error {
    std::io::Error::other("connection reset")
  }

  impl UserStore for BrokenStore {
    type Error = std::io::Error;

    async fn find(
      &self,
      _options: &SearchOptions,
    ) -> Result<Vec<UserRecord>, std::io::Error> {
      Err(broken())
    }

    async fn count(
      &self,
      _options: &SearchOptions,
    ) -> Result<usize, std::io::Error> {
      Err(broken())
    }

    async fn find_by_group(
      &self,
      _group: &str,
      _options: &SearchOptions,
    ) -> Result<Vec<UserRecord>, std::io::Error> {
      Err(broken())
    }

    async fn count_by_group(
      &self,
      _group: &str,
      _options: &SearchOptions,
    ) -> Result<usize, std::io::Error> {
      Err(broken())
    }

    async fn find_by_username(
      &self,
      _username: &str,
    ) -> Result<Option<UserRecord>, std::io::Error> {
      Err(broken())
    }

    async fn get_photo(
      &self,
      _username: &str,
    ) -> Result<Option<Vec<u8>>, std::io::Error> {
      Err(broken())
    }

    async fn set_photo(
      &self,
      _username: &str,
      _large: Option<Vec<u8>>,
      _small: Option<Vec<u8>>,
    ) -> Result<(), std::io::Error> {
      Err(broken())
    }
  }

  impl ConfigStore for BrokenStore {
    type Error = std::io::Error;

    async fn get(
      &self,
      _key: &str,
    ) -> Result<Option<String>, std::io::Error> {
      Err(broken())
    }

    async fn put(
      &self,
      _key: &str,
      _value: &str,
    ) -> Result<(), std::io::Error> {
      Err(broken())
    }
  }

  fn broken_router() -> Router {
    let service = DirectoryService::new(
      Arc::new(BrokenStore),
      Arc::new(BrokenStore),
      Arc::new(PassthroughShrinker),
    );
    api_router(Arc::new(service))
  }

  // ── People ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn list_all_returns_full_directory() {
    let router = make_router().await;
    let resp = oneshot(router, "GET", "/people/@me/@all", None, b"").await;
    assert_eq!(resp.status(), StatusCode::OK);

    let json = json_body(resp).await;
    assert_eq!(json["totalResults"], 4);
    assert_eq!(json["startIndex"], 0);
    assert_eq!(json["itemsPerPage"], 20);
    assert_eq!(json["entry"].as_array().unwrap().len(), 4);
  }

  #[tokio::test]
  async fn list_with_filter_sort_and_paging() {
    let router = make_router().await;
    let resp = oneshot(
      router,
      "GET",
      "/people/@me/@all?filterBy=lastName&filterValue=Tanaka\
       &sortBy=loginName&startIndex=0&count=10",
      None,
      b"",
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let json = json_body(resp).await;
    assert_eq!(json["totalResults"], 2);
    let entry = json["entry"].as_array().unwrap();
    assert_eq!(entry.len(), 2);
    assert_eq!(entry[0]["id"], "acme:tanaka");
    assert_eq!(entry[1]["id"], "acme:tanaka2");
    assert_eq!(entry[0]["name"]["familyName"], "Tanaka");
  }

  #[tokio::test]
  async fn list_page_shorter_than_total() {
    let router = make_router().await;
    let resp =
      oneshot(router, "GET", "/people/@me/@all?count=2", None, b"").await;

    let json = json_body(resp).await;
    assert_eq!(json["totalResults"], 4);
    assert_eq!(json["itemsPerPage"], 2);
    assert_eq!(json["entry"].as_array().unwrap().len(), 2);
  }

  #[tokio::test]
  async fn list_group_scope() {
    let router = make_router().await;
    let resp = oneshot(router, "GET", "/people/@me/sales", None, b"").await;

    let json = json_body(resp).await;
    assert_eq!(json["totalResults"], 2);
  }

  #[tokio::test]
  async fn list_deleted_scope_is_empty() {
    let router = make_router().await;
    let resp = oneshot(router, "GET", "/people/@me/@deleted", None, b"").await;

    let json = json_body(resp).await;
    assert_eq!(json["totalResults"], 0);
    assert!(json["entry"].as_array().unwrap().is_empty());
  }

  #[tokio::test]
  async fn list_self_scope_totals_one_with_empty_entries() {
    // Known quirk: @self reports one result but resolves no records.
    let router = make_router().await;
    let resp = oneshot(router, "GET", "/people/@me/@self", None, b"").await;
    assert_eq!(resp.status(), StatusCode::OK);

    let json = json_body(resp).await;
    assert_eq!(json["totalResults"], 1);
    assert!(json["entry"].as_array().unwrap().is_empty());
  }

  #[tokio::test]
  async fn list_unknown_selector_is_forbidden() {
    let router = make_router().await;
    let resp = oneshot(router, "GET", "/people/@me/@everyone", None, b"").await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
  }

  #[tokio::test]
  async fn missing_identity_headers_are_refused() {
    let router = make_router().await;
    let req = Request::builder()
      .method("GET")
      .uri("/people/@me/@all")
      .body(Body::empty())
      .unwrap();
    let resp = router.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
  }

  #[tokio::test]
  async fn get_person_by_login_name() {
    let router = make_router().await;
    let resp = oneshot(router, "GET", "/people/tanaka", None, b"").await;
    assert_eq!(resp.status(), StatusCode::OK);

    let json = json_body(resp).await;
    assert_eq!(json["id"], "acme:tanaka");
    assert_eq!(json["displayName"], "Tanaka Taro");
    assert_eq!(json["hasPhoto"], false);
  }

  #[tokio::test]
  async fn get_person_me_resolves_caller() {
    let router = make_router().await;
    let resp = oneshot(router, "GET", "/people/@me", None, b"").await;

    let json = json_body(resp).await;
    assert_eq!(json["id"], "acme:suzuki");
  }

  #[tokio::test]
  async fn get_person_missing_returns_404() {
    let router = make_router().await;
    let resp = oneshot(router, "GET", "/people/ghost", None, b"").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  // ── Icon ────────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn icon_lifecycle() {
    let router = make_router().await;

    let resp =
      oneshot(router.clone(), "GET", "/people/@me/icon", None, b"").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = oneshot(
      router.clone(),
      "PUT",
      "/people/@me/icon",
      Some("image/jpeg"),
      b"jpeg bytes",
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp =
      oneshot(router.clone(), "GET", "/people/@me/icon", None, b"").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let ct = resp
      .headers()
      .get(header::CONTENT_TYPE)
      .unwrap()
      .to_str()
      .unwrap();
    assert!(ct.contains("image/jpeg"), "Content-Type: {ct}");

    let resp =
      oneshot(router.clone(), "DELETE", "/people/@me/icon", None, b"").await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = oneshot(router, "GET", "/people/@me/icon", None, b"").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn put_icon_for_other_user_is_forbidden() {
    let router = make_router().await;
    let resp = oneshot(
      router,
      "PUT",
      "/people/tanaka/icon",
      Some("image/jpeg"),
      b"x",
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
  }

  // ── Error responses ─────────────────────────────────────────────────────────

  #[tokio::test]
  async fn store_failure_maps_to_sanitized_500() {
    let router = broken_router();

    let resp =
      oneshot(router.clone(), "GET", "/people/@me/@all", None, b"").await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    // The store's own message must never reach the response body.
    let json = json_body(resp).await;
    assert_eq!(json["error"], "internal error");

    let resp = oneshot(
      router,
      "GET",
      "/notification/mobile?userId=@me",
      None,
      b"",
    )
    .await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = json_body(resp).await;
    assert_eq!(json["error"], "internal error");
  }

  // ── Mobile notification preference ──────────────────────────────────────────

  const FORM: &str = "application/x-www-form-urlencoded";

  #[tokio::test]
  async fn notification_get_before_any_write_is_404() {
    let router = make_router().await;
    let resp = oneshot(
      router,
      "GET",
      "/notification/mobile?userId=@me",
      None,
      b"",
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn notification_put_then_get() {
    let router = make_router().await;

    let resp = oneshot(
      router.clone(),
      "PUT",
      "/notification/mobile?userId=@me",
      Some(FORM),
      b"mobileNotification=F0",
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = oneshot(
      router,
      "GET",
      "/notification/mobile?userId=@me",
      None,
      b"",
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let json = json_body(resp).await;
    let entry = &json["entry"][0];
    assert_eq!(entry["userId"], "acme:suzuki");
    assert_eq!(entry["mobileNotification"], "F");
    assert_eq!(entry["whileBrowse"], "0");
  }

  #[tokio::test]
  async fn notification_put_invalid_value_is_400() {
    let router = make_router().await;
    let resp = oneshot(
      router,
      "PUT",
      "/notification/mobile?userId=@me",
      Some(FORM),
      b"mobileNotification=X9",
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let json = json_body(resp).await;
    assert_eq!(json["error"], "Parameter mobileNotification invalid.");
  }

  #[tokio::test]
  async fn notification_requires_single_user_id() {
    let router = make_router().await;

    let resp =
      oneshot(router.clone(), "GET", "/notification/mobile", None, b"").await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = oneshot(
      router,
      "GET",
      "/notification/mobile?userId=@me&userId=tanaka",
      None,
      b"",
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn notification_for_other_user_is_forbidden() {
    let router = make_router().await;
    let resp = oneshot(
      router,
      "GET",
      "/notification/mobile?userId=tanaka",
      None,
      b"",
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
  }
}
