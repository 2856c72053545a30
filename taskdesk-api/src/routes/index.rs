/// API description endpoint
///
/// # Endpoint
///
/// ```text
/// GET /
/// ```
///
/// # Response
///
/// ```json
/// {
///   "message": "Task Management API",
///   "version": "0.1.0",
///   "endpoints": {
///     "register": "/api/register [POST]",
///     "login": "/api/login [POST]",
///     "tasks": "/api/tasks [GET, POST]",
///     "task_detail": "/api/tasks/{id} [GET, PUT, DELETE]"
///   }
/// }
/// ```

use axum::Json;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// API description response
#[derive(Debug, Serialize, Deserialize)]
pub struct IndexResponse {
    /// Service name
    pub message: String,

    /// Application version
    pub version: String,

    /// Endpoint name to "path [METHODS]"
    pub endpoints: BTreeMap<String, String>,
}

pub async fn index() -> Json<IndexResponse> {
    let endpoints = [
        ("register", "/api/register [POST]"),
        ("login", "/api/login [POST]"),
        ("tasks", "/api/tasks [GET, POST]"),
        ("task_detail", "/api/tasks/{id} [GET, PUT, DELETE]"),
    ]
    .into_iter()
    .map(|(name, route)| (name.to_string(), route.to_string()))
    .collect();

    Json(IndexResponse {
        message: "Task Management API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        endpoints,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_index_lists_endpoints() {
        let Json(body) = index().await;

        assert_eq!(body.message, "Task Management API");
        assert!(!body.version.is_empty());
        assert_eq!(body.endpoints.len(), 4);
        assert_eq!(body.endpoints["login"], "/api/login [POST]");
    }
}
