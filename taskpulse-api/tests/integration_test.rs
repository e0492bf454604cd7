/// Integration tests for the TaskPulse API
///
/// These tests verify the system end-to-end against live Postgres and Redis:
/// - Registration, login, and the duplicate/validation error mapping
/// - Task lifecycle (create → pending list → complete, soft delete)
/// - The task-created event flow (API → queue → listener → notification)
/// - The overdue scheduler scan
///
/// All tests are `#[ignore]`d because they need running infrastructure:
///
/// ```bash
/// DATABASE_URL=... REDIS_URL=... cargo test -p taskpulse-api -- --ignored
/// ```

mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{drain_queue, json_request, request, wait_for, TestContext};
use serde_json::json;
use taskpulse_shared::models::task::{CreateTask, Task, TaskStatus};
use taskpulse_worker::listener::TaskCreatedListener;
use taskpulse_worker::scheduler::OverdueScheduler;
use uuid::Uuid;

#[tokio::test]
#[ignore] // Requires running Postgres and Redis
async fn test_health_check() {
    let ctx = TestContext::new().await.unwrap();

    let (status, body) = ctx.send(request("GET", "/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "connected");
    assert_eq!(body["redis"], "connected");

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore] // Requires running Postgres and Redis
async fn test_register_login_and_duplicates() {
    let ctx = TestContext::new().await.unwrap();
    let suffix = Uuid::new_v4();
    let username = format!("alice-{}", suffix);
    let email = format!("alice-{}@example.com", suffix);

    // Register
    let (status, body) = ctx
        .send(json_request(
            "POST",
            "/api/users/register",
            json!({ "username": username, "password": "password123", "email": email }),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], username.as_str());
    assert_eq!(body["email"], email.as_str());
    let user_id = body["id"].as_str().unwrap().to_string();

    // Login succeeds with the exact password
    let (status, body) = ctx
        .send(request(
            "GET",
            &format!("/api/users/login?username={}&password=password123", username),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], user_id.as_str());

    // Wrong password is indistinguishable from an unknown user: 404
    let (status, _) = ctx
        .send(request(
            "GET",
            &format!("/api/users/login?username={}&password=Password123", username),
        ))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Duplicate username is a conflict, and nothing new is persisted
    let (status, body) = ctx
        .send(json_request(
            "POST",
            "/api/users/register",
            json!({
                "username": username,
                "password": "password456",
                "email": format!("other-{}@example.com", suffix),
            }),
        ))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "conflict");

    // Duplicate email as well
    let (status, _) = ctx
        .send(json_request(
            "POST",
            "/api/users/register",
            json!({
                "username": format!("other-{}", suffix),
                "password": "password456",
                "email": email,
            }),
        ))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Username lookup resolves to the same account
    let found = ctx.users.get_by_username(&username).await.unwrap();
    assert_eq!(found.id.to_string(), user_id);

    let parsed = Uuid::parse_str(&user_id).unwrap();
    ctx.users.delete(parsed).await.unwrap();
    ctx.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore] // Requires running Postgres and Redis
async fn test_register_validation_errors() {
    let ctx = TestContext::new().await.unwrap();

    let (status, body) = ctx
        .send(json_request(
            "POST",
            "/api/users/register",
            json!({ "username": "al", "password": "short", "email": "not-an-email" }),
        ))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");

    let details = body["details"].as_array().unwrap();
    assert_eq!(details.len(), 3);

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore] // Requires running Postgres and Redis
async fn test_create_task_with_past_target_date_rejected() {
    let ctx = TestContext::new().await.unwrap();

    let (status, body) = ctx
        .send(json_request(
            "POST",
            "/api/tasks",
            json!({
                "title": "Late task",
                "description": "Already past due",
                "target_date": (Utc::now() - Duration::days(1)).to_rfc3339(),
                "user_id": ctx.user.id,
            }),
        ))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");

    // Nothing was persisted and no event reached the listener's queue
    let tasks = ctx.tasks.list(ctx.user.id).await.unwrap();
    assert!(tasks.is_empty());

    let entries = drain_queue(&ctx.queue_consumer()).await;
    assert!(entries.iter().all(|(_, m)| m.user_id != ctx.user.id));

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore] // Requires running Postgres and Redis
async fn test_task_created_event_creates_notification() {
    let ctx = TestContext::new().await.unwrap();

    // Start the listener before creating the task; it tails the stream
    let listener = TaskCreatedListener::new(ctx.queue_consumer(), ctx.notifications.clone());
    let shutdown_token = listener.shutdown_token();
    let listener_handle = tokio::spawn(async move { listener.run().await });
    tokio::time::sleep(std::time::Duration::from_millis(200)).await;

    let (status, body) = ctx
        .send(json_request(
            "POST",
            "/api/tasks",
            json!({
                "title": "Write report",
                "description": "Quarterly numbers",
                "target_date": (Utc::now() + Duration::days(1)).to_rfc3339(),
                "user_id": ctx.user.id,
            }),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_completed"], false);
    assert_eq!(body["is_deleted"], false);
    assert_eq!(body["status"], "todo");

    // Exactly one event for this task reached the queue
    let task_id = Uuid::parse_str(body["id"].as_str().unwrap()).unwrap();
    let entries = drain_queue(&ctx.queue_consumer()).await;
    let matching = entries.iter().filter(|(_, m)| m.task_id == task_id).count();
    assert_eq!(matching, 1);

    // The listener turns it into an unread notification
    wait_for(
        || async {
            let unread = ctx.notifications.list_unread(ctx.user.id).await.unwrap();
            unread
                .iter()
                .any(|n| n.message == "New task created: Write report")
        },
        10,
    )
    .await
    .unwrap();

    shutdown_token.cancel();
    let _ = listener_handle.await;
    ctx.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore] // Requires running Postgres and Redis
async fn test_pending_task_lifecycle() {
    let ctx = TestContext::new().await.unwrap();

    let (status, body) = ctx
        .send(json_request(
            "POST",
            "/api/tasks",
            json!({
                "title": "Prepare slides",
                "description": "For the review meeting",
                "target_date": (Utc::now() + Duration::days(2)).to_rfc3339(),
                "user_id": ctx.user.id,
            }),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    let task_id = body["id"].as_str().unwrap().to_string();

    // Pending list contains exactly the new task
    let (status, body) = ctx
        .send(request(
            "GET",
            &format!("/api/tasks/user/{}/pending", ctx.user.id),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    let pending = body.as_array().unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0]["id"], task_id.as_str());

    // Complete it
    let (status, body) = ctx
        .send(request("PUT", &format!("/api/tasks/{}/complete", task_id)))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_completed"], true);

    // Pending list is empty again
    let (status, body) = ctx
        .send(request(
            "GET",
            &format!("/api/tasks/user/{}/pending", ctx.user.id),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 0);

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore] // Requires running Postgres and Redis
async fn test_delete_task_is_soft() {
    let ctx = TestContext::new().await.unwrap();

    let task = ctx
        .tasks
        .create(CreateTask {
            title: "Disposable".to_string(),
            description: "Will be soft-deleted".to_string(),
            target_date: Utc::now() + Duration::days(1),
            user_id: ctx.user.id,
        })
        .await
        .unwrap();

    let (status, _) = ctx
        .send(request("DELETE", &format!("/api/tasks/{}", task.id)))
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    // Invisible through the API
    let (status, _) = ctx
        .send(request("GET", &format!("/api/tasks/{}", task.id)))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // But the record is still in the store, flagged deleted
    let stored = Task::find_by_id(&ctx.db, task.id).await.unwrap().unwrap();
    assert!(stored.is_deleted);

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore] // Requires running Postgres and Redis
async fn test_mark_as_read_is_idempotent() {
    let ctx = TestContext::new().await.unwrap();

    let notification = ctx
        .notifications
        .create_from_message("Ping", ctx.user.id)
        .await
        .unwrap();
    assert!(!notification.is_read);

    for _ in 0..2 {
        let (status, body) = ctx
            .send(request(
                "PUT",
                &format!("/api/notifications/{}/read", notification.id),
            ))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["is_read"], true);
    }

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore] // Requires running Postgres and Redis
async fn test_overdue_scheduler_marks_and_notifies() {
    let ctx = TestContext::new().await.unwrap();

    // Insert a task whose target date is already in the past directly through
    // the store, simulating a record that predates the scan
    let task = Task::create(
        &ctx.db,
        CreateTask {
            title: "Overdue task".to_string(),
            description: "Past its target date".to_string(),
            target_date: Utc::now() - Duration::hours(1),
            user_id: ctx.user.id,
        },
    )
    .await
    .unwrap();

    let scheduler = OverdueScheduler::new(ctx.tasks.clone(), ctx.notifications.clone());

    let overdue = scheduler.find_overdue_tasks().await.unwrap();
    assert!(overdue.iter().any(|t| t.id == task.id));

    scheduler.check_overdue_tasks().await;

    // The spawned processing marks the task overdue and notifies the owner
    wait_for(
        || async {
            let stored = Task::find_by_id(&ctx.db, task.id).await.unwrap().unwrap();
            stored.status == TaskStatus::Overdue
        },
        10,
    )
    .await
    .unwrap();

    wait_for(
        || async {
            let unread = ctx.notifications.list_unread(ctx.user.id).await.unwrap();
            unread
                .iter()
                .any(|n| n.message == "Task 'Overdue task' is overdue!")
        },
        10,
    )
    .await
    .unwrap();

    // A second scan no longer sees the task: it left the todo set
    let overdue = scheduler.find_overdue_tasks().await.unwrap();
    assert!(overdue.iter().all(|t| t.id != task.id));

    ctx.cleanup().await.unwrap();
}
