//! # TaskDesk API Server Library
//!
//! HTTP surface for TaskDesk: registration, login and per-user task CRUD.
//!
//! ## Modules
//!
//! - `app`: Application state, router builder and auth layer
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `routes`: API route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod routes;
