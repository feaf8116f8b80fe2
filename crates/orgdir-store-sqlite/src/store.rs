//! [`SqliteStore`] — the SQLite implementation of [`UserStore`] and
//! [`ConfigStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;

use orgdir_core::{
  person::UserRecord,
  query::{FilterOperation, SearchOptions, SortOrder},
  store::{ConfigStore, UserStore},
};

use crate::{
  Error, Result,
  encode::{RawUserRow, encode_dt},
  schema::SCHEMA,
};

const USER_COLUMNS: &str = "u.login_name, u.first_name, u.last_name, \
   u.first_name_phonetic, u.last_name_phonetic, u.has_photo, u.photo_modified";

// ─── Query assembly ──────────────────────────────────────────────────────────

/// Map an API field name onto its column. Unknown fields are ignored by the
/// queries below rather than rejected; the caller-supplied name passes
/// through the canonical descriptor verbatim.
fn user_column(field: &str) -> Option<&'static str> {
  match field {
    "loginName" => Some("login_name"),
    "firstName" => Some("first_name"),
    "lastName" => Some("last_name"),
    "firstNamePhonetic" => Some("first_name_phonetic"),
    "lastNamePhonetic" => Some("last_name_phonetic"),
    _ => None,
  }
}

/// Condition fragment plus its bound value, if the options carry a usable
/// filter.
fn filter_clause(options: &SearchOptions) -> Option<(String, String)> {
  let filter = options.filter.as_ref()?;
  let column = user_column(&filter.field)?;
  Some(match filter.operation {
    FilterOperation::Equals => {
      (format!("u.{column} = ?"), filter.value.clone())
    }
    FilterOperation::Contains => {
      (format!("u.{column} LIKE ?"), format!("%{}%", filter.value))
    }
    FilterOperation::StartsWith => {
      (format!("u.{column} LIKE ?"), format!("{}%", filter.value))
    }
  })
}

fn order_clause(options: &SearchOptions) -> String {
  let Some(sort) = &options.sort else {
    return String::new();
  };
  let Some(column) = user_column(&sort.field) else {
    return String::new();
  };
  let direction = match sort.order {
    SortOrder::Ascending => "ASC",
    SortOrder::Descending => "DESC",
  };
  format!(" ORDER BY u.{column} {direction}")
}

/// `(join, where, params)` shared by the find and count queries.
fn scope_fragments(
  group: Option<&str>,
  options: &SearchOptions,
) -> (String, String, Vec<String>) {
  let mut conds: Vec<String> = Vec::new();
  let mut params: Vec<String> = Vec::new();

  let join = if let Some(group) = group {
    conds.push("m.group_name = ?".to_string());
    params.push(group.to_string());
    " JOIN group_members m ON m.login_name = u.login_name".to_string()
  } else {
    String::new()
  };

  if let Some((cond, value)) = filter_clause(options) {
    conds.push(cond);
    params.push(value);
  }

  let where_clause = if conds.is_empty() {
    String::new()
  } else {
    format!(" WHERE {}", conds.join(" AND "))
  };

  (join, where_clause, params)
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// User and configuration storage backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Provisioning ──────────────────────────────────────────────────────────
  // User provisioning has no REST surface; these exist for embedders and
  // tests.

  pub async fn insert_user(&self, record: &UserRecord) -> Result<()> {
    let login_name = record.login_name.clone();
    let first_name = record.first_name.clone();
    let last_name = record.last_name.clone();
    let first_phonetic = record.first_name_phonetic.clone();
    let last_phonetic = record.last_name_phonetic.clone();
    let has_photo =
      record.has_photo.clone().unwrap_or_else(|| "F".to_string());
    let photo_modified = record.photo_modified.map(encode_dt);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO users (
             login_name, first_name, last_name,
             first_name_phonetic, last_name_phonetic,
             has_photo, photo_modified
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
          rusqlite::params![
            login_name,
            first_name,
            last_name,
            first_phonetic,
            last_phonetic,
            has_photo,
            photo_modified,
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  pub async fn add_group_member(&self, group: &str, login_name: &str) -> Result<()> {
    let group = group.to_string();
    let login_name = login_name.to_string();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT OR IGNORE INTO group_members (group_name, login_name)
           VALUES (?1, ?2)",
          rusqlite::params![group, login_name],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Shared query paths ────────────────────────────────────────────────────

  async fn query_users(
    &self,
    group: Option<&str>,
    options: &SearchOptions,
  ) -> Result<Vec<UserRecord>> {
    let (join, where_clause, params) = scope_fragments(group, options);
    let sql = format!(
      "SELECT {USER_COLUMNS} FROM users u{join}{where_clause}{order} \
       LIMIT {max} OFFSET {first}",
      order = order_clause(options),
      max = options.max,
      first = options.first,
    );

    let rows: Vec<RawUserRow> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(params), |row| {
            Ok(RawUserRow {
              login_name:          row.get(0)?,
              first_name:          row.get(1)?,
              last_name:           row.get(2)?,
              first_name_phonetic: row.get(3)?,
              last_name_phonetic:  row.get(4)?,
              has_photo:           row.get(5)?,
              photo_modified:      row.get(6)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    rows.into_iter().map(RawUserRow::into_record).collect()
  }

  async fn count_users(
    &self,
    group: Option<&str>,
    options: &SearchOptions,
  ) -> Result<usize> {
    let (join, where_clause, params) = scope_fragments(group, options);
    let sql =
      format!("SELECT COUNT(*) FROM users u{join}{where_clause}");

    let count: i64 = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(
          &sql,
          rusqlite::params_from_iter(params),
          |row| row.get(0),
        )?)
      })
      .await?;

    Ok(count as usize)
  }
}

// ─── UserStore impl ──────────────────────────────────────────────────────────

impl UserStore for SqliteStore {
  type Error = Error;

  async fn find(&self, options: &SearchOptions) -> Result<Vec<UserRecord>> {
    self.query_users(None, options).await
  }

  async fn count(&self, options: &SearchOptions) -> Result<usize> {
    self.count_users(None, options).await
  }

  async fn find_by_group(
    &self,
    group: &str,
    options: &SearchOptions,
  ) -> Result<Vec<UserRecord>> {
    self.query_users(Some(group), options).await
  }

  async fn count_by_group(
    &self,
    group: &str,
    options: &SearchOptions,
  ) -> Result<usize> {
    self.count_users(Some(group), options).await
  }

  async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>> {
    let username = username.to_string();

    let raw: Option<RawUserRow> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {USER_COLUMNS} FROM users u WHERE u.login_name = ?1"
              ),
              rusqlite::params![username],
              |row| {
                Ok(RawUserRow {
                  login_name:          row.get(0)?,
                  first_name:          row.get(1)?,
                  last_name:           row.get(2)?,
                  first_name_phonetic: row.get(3)?,
                  last_name_phonetic:  row.get(4)?,
                  has_photo:           row.get(5)?,
                  photo_modified:      row.get(6)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawUserRow::into_record).transpose()
  }

  async fn get_photo(&self, username: &str) -> Result<Option<Vec<u8>>> {
    let username = username.to_string();

    let photo: Option<Option<Vec<u8>>> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT photo FROM users WHERE login_name = ?1",
              rusqlite::params![username],
              |row| row.get(0),
            )
            .optional()?,
        )
      })
      .await?;

    Ok(photo.flatten())
  }

  async fn set_photo(
    &self,
    username: &str,
    large: Option<Vec<u8>>,
    small: Option<Vec<u8>>,
  ) -> Result<()> {
    let username = username.to_string();
    let has_photo = if large.is_some() { "T" } else { "F" };
    let photo_modified = large.is_some().then(|| encode_dt(Utc::now()));

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE users
           SET photo = ?2, photo_small = ?3, has_photo = ?4,
               photo_modified = ?5
           WHERE login_name = ?1",
          rusqlite::params![username, large, small, has_photo, photo_modified],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── ConfigStore impl ────────────────────────────────────────────────────────

impl ConfigStore for SqliteStore {
  type Error = Error;

  async fn get(&self, key: &str) -> Result<Option<String>> {
    let key = key.to_string();

    let value: Option<String> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT value FROM config WHERE name = ?1",
              rusqlite::params![key],
              |row| row.get(0),
            )
            .optional()?,
        )
      })
      .await?;

    Ok(value)
  }

  async fn put(&self, key: &str, value: &str) -> Result<()> {
    let key = key.to_string();
    let value = value.to_string();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO config (name, value) VALUES (?1, ?2)
           ON CONFLICT(name) DO UPDATE SET value = excluded.value",
          rusqlite::params![key, value],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}
