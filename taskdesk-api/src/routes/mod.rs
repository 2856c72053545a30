/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `index`: API description
/// - `auth`: Registration and login
/// - `tasks`: Task CRUD for the authenticated user

pub mod auth;
pub mod index;
pub mod tasks;
