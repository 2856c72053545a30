/// Integration tests for the task endpoints

mod common;

use axum::http::StatusCode;
use common::TestContext;
use serde_json::{json, Value};

fn timestamp(task: &Value, field: &str) -> chrono::DateTime<chrono::Utc> {
    task[field].as_str().unwrap().parse().unwrap()
}

#[tokio::test]
async fn test_create_with_defaults() {
    let ctx = TestContext::new();
    let token = ctx.signup("alice").await;

    let (status, body) = ctx
        .send("POST", "/api/tasks", Some(&token), Some(json!({ "title": "Write report" })))
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Task created successfully");
    assert_eq!(body["task"]["title"], "Write report");
    assert_eq!(body["task"]["description"], "");
    assert_eq!(body["task"]["status"], "pending");
    assert!(body["task"]["id"].is_i64());
    assert_eq!(
        timestamp(&body["task"], "created_at"),
        timestamp(&body["task"], "updated_at")
    );
}

#[tokio::test]
async fn test_create_then_get() {
    let ctx = TestContext::new();
    let token = ctx.signup("alice").await;

    let created = ctx
        .create_task(
            &token,
            json!({ "title": "Ship it", "description": "v1.0", "status": "in_progress" }),
        )
        .await;

    let (status, fetched) = ctx
        .send("GET", &format!("/api/tasks/{}", created["id"]), Some(&token), None)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
    assert_eq!(fetched["title"], "Ship it");
    assert_eq!(fetched["description"], "v1.0");
    assert_eq!(fetched["status"], "in_progress");
    assert!(fetched.get("user_id").is_none());
}

#[tokio::test]
async fn test_create_validation() {
    let ctx = TestContext::new();
    let token = ctx.signup("alice").await;

    let (status, body) = ctx
        .send("POST", "/api/tasks", Some(&token), Some(json!({ "title": "" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");

    let (status, body) = ctx
        .send("POST", "/api/tasks", Some(&token), Some(json!({ "description": "no title" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");

    let (status, _) = ctx
        .send("POST", "/api/tasks", Some(&token), Some(json!({ "title": 42 })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_own_tasks() {
    let ctx = TestContext::new();
    let token = ctx.signup("alice").await;

    let (status, body) = ctx.send("GET", "/api/tasks", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "tasks": [], "count": 0 }));

    for title in ["first", "second", "third"] {
        ctx.create_task(&token, json!({ "title": title })).await;
    }

    let (status, body) = ctx.send("GET", "/api/tasks", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 3);

    let titles: Vec<&str> = body["tasks"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, ["first", "second", "third"]);
}

#[tokio::test]
async fn test_partial_update() {
    let ctx = TestContext::new();
    let token = ctx.signup("alice").await;

    let created = ctx
        .create_task(&token, json!({ "title": "Draft", "description": "outline" }))
        .await;
    let uri = format!("/api/tasks/{}", created["id"]);

    let (status, body) = ctx
        .send("PUT", &uri, Some(&token), Some(json!({ "status": "done" })))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Task updated successfully");
    let updated = &body["task"];
    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["title"], "Draft");
    assert_eq!(updated["description"], "outline");
    assert_eq!(updated["status"], "done");
    assert_eq!(updated["created_at"], created["created_at"]);
    assert!(timestamp(updated, "updated_at") > timestamp(&created, "updated_at"));

    // Persisted
    let (_, fetched) = ctx.send("GET", &uri, Some(&token), None).await;
    assert_eq!(&fetched, updated);
}

#[tokio::test]
async fn test_empty_update_still_advances_timestamp() {
    let ctx = TestContext::new();
    let token = ctx.signup("alice").await;

    let created = ctx.create_task(&token, json!({ "title": "Same" })).await;
    let uri = format!("/api/tasks/{}", created["id"]);

    let (status, first) = ctx.send("PUT", &uri, Some(&token), Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    let (status, second) = ctx
        .send("PUT", &uri, Some(&token), Some(json!({ "title": "Same", "description": null })))
        .await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(second["task"]["title"], "Same");
    assert_eq!(second["task"]["description"], "");
    assert!(timestamp(&first["task"], "updated_at") > timestamp(&created, "updated_at"));
    assert!(timestamp(&second["task"], "updated_at") > timestamp(&first["task"], "updated_at"));
}

#[tokio::test]
async fn test_delete_then_get() {
    let ctx = TestContext::new();
    let token = ctx.signup("alice").await;

    let created = ctx.create_task(&token, json!({ "title": "Temporary" })).await;
    let uri = format!("/api/tasks/{}", created["id"]);

    let (status, body) = ctx.send("DELETE", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Task deleted successfully" }));

    let (status, body) = ctx.send("GET", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Task not found");

    let (status, _) = ctx.send("DELETE", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_other_users_tasks_are_invisible() {
    let ctx = TestContext::new();
    let alice = ctx.signup("alice").await;
    let bob = ctx.signup("bob").await;

    let bobs = ctx.create_task(&bob, json!({ "title": "Bob's secret" })).await;
    let uri = format!("/api/tasks/{}", bobs["id"]);

    let (_, missing) = ctx.send("GET", "/api/tasks/999999", Some(&alice), None).await;

    let (status, body) = ctx.send("GET", &uri, Some(&alice), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, missing);

    let (status, body) = ctx
        .send("PUT", &uri, Some(&alice), Some(json!({ "title": "pwned" })))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, missing);

    let (status, body) = ctx.send("DELETE", &uri, Some(&alice), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, missing);

    let (_, list) = ctx.send("GET", "/api/tasks", Some(&alice), None).await;
    assert_eq!(list["count"], 0);

    // Bob's task is untouched
    let (status, fetched) = ctx.send("GET", &uri, Some(&bob), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, bobs);
}

#[tokio::test]
async fn test_non_numeric_id_is_not_found() {
    let ctx = TestContext::new();
    let token = ctx.signup("alice").await;

    let (status, body) = ctx.send("GET", "/api/tasks/abc", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Task not found");
}

#[tokio::test]
async fn test_update_malformed_body() {
    let ctx = TestContext::new();
    let token = ctx.signup("alice").await;

    let created = ctx.create_task(&token, json!({ "title": "Draft" })).await;
    let uri = format!("/api/tasks/{}", created["id"]);

    let (status, _) = ctx
        .send("PUT", &uri, Some(&token), Some(json!({ "status": 5 })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = ctx
        .send("PUT", &uri, Some(&token), Some(json!({ "title": "" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");

    // Unchanged
    let (_, fetched) = ctx.send("GET", &uri, Some(&token), None).await;
    assert_eq!(fetched, created);
}
