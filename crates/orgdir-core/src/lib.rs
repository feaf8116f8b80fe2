//! Core types and trait definitions for the orgdir directory service.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod collection;
pub mod error;
pub mod identity;
pub mod person;
pub mod preference;
pub mod query;
pub mod scope;
pub mod store;

pub use error::{Error, Result};
