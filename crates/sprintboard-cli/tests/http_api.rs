//! HTTP transport against a mocked task API.

use std::time::Duration;

use sprintboard_cli::http::HttpApi;
use sprintboard_core::{ApiError, TaskApi};
use sprintboard_shared::{TaskCreate, TaskPatch, TaskPriority, TaskStatus, TasksQuery};
use uuid::Uuid;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_for(server: &MockServer) -> HttpApi {
    HttpApi::new(&format!("{}/api/", server.uri()), Duration::from_secs(5)).expect("client")
}

fn task_json(id: Uuid, title: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "title": title,
        "description": null,
        "status": "todo",
        "priority": "high",
        "project_id": null,
        "sprint_id": null,
        "assigned_to": null,
        "due_date": null,
        "story_points": null,
        "created_date": "2024-03-01T10:00:00",
        "updated_date": "2024-03-01T10:00:00"
    })
}

#[tokio::test]
async fn list_tasks_decodes_response() {
    let server = MockServer::start().await;
    let id = Uuid::new_v4();
    Mock::given(method("GET"))
        .and(path("/api/tasks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vec![task_json(id, "Write spec")]))
        .expect(1)
        .mount(&server)
        .await;

    let tasks = api_for(&server)
        .list_tasks(&TasksQuery::default())
        .await
        .expect("list tasks");
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].id, id);
    assert_eq!(tasks[0].priority, TaskPriority::High);
}

#[tokio::test]
async fn list_tasks_sends_filters() {
    let server = MockServer::start().await;
    let project_id = Uuid::new_v4();
    Mock::given(method("GET"))
        .and(path("/api/tasks"))
        .and(query_param("project_id", project_id.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let tasks = api_for(&server)
        .list_tasks(&TasksQuery {
            project_id: Some(project_id),
            sprint_id: None,
        })
        .await
        .expect("list tasks");
    assert!(tasks.is_empty());
}

#[tokio::test]
async fn create_task_posts_only_filled_fields() {
    let server = MockServer::start().await;
    let id = Uuid::new_v4();
    Mock::given(method("POST"))
        .and(path("/api/tasks"))
        .and(body_json(serde_json::json!({
            "title": "Write spec",
            "status": "todo",
            "priority": "high",
            "story_points": 8
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(task_json(id, "Write spec")))
        .expect(1)
        .mount(&server)
        .await;

    let created = api_for(&server)
        .create_task(&TaskCreate {
            title: "Write spec".to_string(),
            priority: TaskPriority::High,
            story_points: Some(8),
            ..TaskCreate::default()
        })
        .await
        .expect("create task");
    assert_eq!(created.id, id);
}

#[tokio::test]
async fn update_task_puts_partial_body() {
    let server = MockServer::start().await;
    let id = Uuid::new_v4();
    Mock::given(method("PUT"))
        .and(path(format!("/api/tasks/{id}")))
        .and(body_json(serde_json::json!({ "status": "done" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(task_json(id, "Done")))
        .expect(1)
        .mount(&server)
        .await;

    api_for(&server)
        .update_task(id, &TaskPatch::status(TaskStatus::Done))
        .await
        .expect("update task");
}

#[tokio::test]
async fn delete_accepts_message_body() {
    let server = MockServer::start().await;
    let id = Uuid::new_v4();
    Mock::given(method("DELETE"))
        .and(path(format!("/api/projects/{id}")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "message": "Project deleted successfully" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    api_for(&server).delete_project(id).await.expect("delete project");
}

#[tokio::test]
async fn non_success_status_is_an_error() {
    let server = MockServer::start().await;
    let id = Uuid::new_v4();
    Mock::given(method("GET"))
        .and(path(format!("/api/tasks/{id}")))
        .respond_with(ResponseTemplate::new(404).set_body_string("Task not found"))
        .mount(&server)
        .await;

    let err = api_for(&server).get_task(id).await.expect_err("missing task");
    assert!(err.is_not_found());
    match err {
        ApiError::Status { method, body, .. } => {
            assert_eq!(method, "GET");
            assert!(body.contains("not found"));
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/projects"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = api_for(&server).list_projects().await.expect_err("bad body");
    assert!(matches!(err, ApiError::Decode { .. }));
}
