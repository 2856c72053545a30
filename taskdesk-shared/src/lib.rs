//! # TaskDesk Shared Library
//!
//! Domain types, stores and authentication primitives used by the TaskDesk
//! API server.
//!
//! ## Module Organization
//!
//! - `auth`: password hashing, access tokens, credential checks
//! - `db`: connection pool and migrations
//! - `models`: users and tasks with their SQL
//! - `store`: repository traits with PostgreSQL and in-memory implementations

pub mod auth;
pub mod db;
pub mod models;
pub mod store;

/// Current version of the TaskDesk shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
