//! SQL schema for the orgdir SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! the `user_version` pragma.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS users (
    login_name           TEXT PRIMARY KEY,
    first_name           TEXT NOT NULL,
    last_name            TEXT NOT NULL,
    first_name_phonetic  TEXT,
    last_name_phonetic   TEXT,
    has_photo            TEXT NOT NULL DEFAULT 'F',  -- raw attribute; 'T'/'N' mean present
    photo_modified       TEXT,                       -- ISO 8601 UTC
    photo                BLOB,                       -- large rendition
    photo_small          BLOB                        -- small rendition
);

CREATE TABLE IF NOT EXISTS group_members (
    group_name  TEXT NOT NULL,
    login_name  TEXT NOT NULL REFERENCES users(login_name),
    UNIQUE (group_name, login_name)
);

-- Generic key/value configuration entries.
CREATE TABLE IF NOT EXISTS config (
    name   TEXT PRIMARY KEY,
    value  TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS group_members_group_idx ON group_members(group_name);

PRAGMA user_version = 1;
";
