/// Database layer for TaskDesk
///
/// # Modules
///
/// - `pool`: PostgreSQL connection pool management with health checks
/// - `migrations`: Embedded schema migrations
///
/// Models and their SQL are in the `models` module at crate root level.

pub mod migrations;
pub mod pool;
