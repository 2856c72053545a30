/// Database models for TaskDesk
///
/// This module contains the database models and their SQL operations.
///
/// # Models
///
/// - `user`: Registered accounts and their password hashes
/// - `task`: Personal tasks, each owned by one user
///
/// Callers outside the store layer should go through the traits in
/// [`crate::store`] rather than the SQL functions here.

pub mod task;
pub mod user;
