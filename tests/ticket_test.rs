//! Integration tests for support tickets.

mod helpers;

use http::StatusCode;
use serde_json::{Value, json};

use leavedesk_entity::identity::Role;

use helpers::{TestApp, TestResponse};

async fn raise(app: &TestApp, token: &str, category: &str, subject: &str) -> TestResponse {
    app.request(
        "POST",
        "/api/tickets",
        Some(json!({
            "category": category,
            "subject": subject,
            "description": "Something needs attention soon.",
        })),
        Some(token),
    )
    .await
}

fn ids(body: &Value) -> Vec<String> {
    body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_create_ticket_defaults() {
    let app = TestApp::new();
    let employee = app
        .token_for(Role::Employee, "Eve", "eve@example.com")
        .await;

    let response = raise(&app, &employee, "payroll_issue", "Missing bonus").await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.message(), "Support ticket raised successfully");
    assert_eq!(response.body["data"]["priority"], "medium");
    assert_eq!(response.body["data"]["status"], "open");
    assert_eq!(response.body["data"]["employee_email"], "eve@example.com");
    assert!(response.body["data"]["admin_reply"].is_null());
}

#[tokio::test]
async fn test_create_ticket_validation() {
    let app = TestApp::new();
    let employee = app
        .token_for(Role::Employee, "Eve", "eve@example.com")
        .await;

    let response = app
        .request(
            "POST",
            "/api/tickets",
            Some(json!({
                "category": "billing",
                "priority": "urgent",
                "subject": "Hi",
                "description": "   too short   ",
            })),
            Some(&employee),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    let fields: Vec<&str> = response.body["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["category", "description", "priority", "subject"]);
}

#[tokio::test]
async fn test_create_ticket_missing_fields_reported() {
    let app = TestApp::new();
    let employee = app
        .token_for(Role::Employee, "Eve", "eve@example.com")
        .await;

    let response = app
        .request(
            "POST",
            "/api/tickets",
            Some(json!({ "subject": "hi" })),
            Some(&employee),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    let fields: Vec<&str> = response.body["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["category", "description", "subject"]);
}

#[tokio::test]
async fn test_only_employees_raise_tickets() {
    let app = TestApp::new();
    let manager = app
        .token_for(Role::Manager, "Mia", "mia@example.com")
        .await;

    let response = raise(&app, &manager, "other", "Question").await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_list_mine_and_admin_filters() {
    let app = TestApp::new();
    let eve = app
        .token_for(Role::Employee, "Eve", "eve@example.com")
        .await;
    let sam = app
        .token_for(Role::Employee, "Sam", "sam@example.com")
        .await;
    let admin = app
        .token_for(Role::Admin, "Root", "root@example.com")
        .await;

    let payroll = raise(&app, &eve, "payroll_issue", "Missing bonus").await;
    let tech = raise(&app, &sam, "technical_support", "Laptop broken").await;
    let payroll_id = payroll.body["data"]["id"].as_str().unwrap().to_string();
    let tech_id = tech.body["data"]["id"].as_str().unwrap().to_string();

    let mine = app.request("GET", "/api/tickets/my", None, Some(&eve)).await;
    assert_eq!(ids(&mine.body), vec![payroll_id.clone()]);

    let all = app.request("GET", "/api/tickets", None, Some(&admin)).await;
    assert_eq!(ids(&all.body), vec![tech_id.clone(), payroll_id.clone()]);

    let filtered = app
        .request(
            "GET",
            "/api/tickets?category=payroll_issue&status=open",
            None,
            Some(&admin),
        )
        .await;
    assert_eq!(ids(&filtered.body), vec![payroll_id]);

    let bad = app
        .request("GET", "/api/tickets?status=waiting", None, Some(&admin))
        .await;
    assert_eq!(bad.status, StatusCode::BAD_REQUEST);

    let employee_all = app.request("GET", "/api/tickets", None, Some(&eve)).await;
    assert_eq!(employee_all.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_reply_overwrites_unconditionally() {
    let app = TestApp::new();
    let employee = app
        .token_for(Role::Employee, "Eve", "eve@example.com")
        .await;
    let admin = app
        .token_for(Role::Admin, "Root", "root@example.com")
        .await;

    let ticket = raise(&app, &employee, "leave_issue", "Balance wrong").await;
    let id = ticket.body["data"]["id"].as_str().unwrap().to_string();
    let path = format!("/api/tickets/{id}/reply");

    let closed = app
        .request(
            "PATCH",
            &path,
            Some(json!({ "status": "closed", "admin_reply": "Fixed the balance." })),
            Some(&admin),
        )
        .await;
    assert_eq!(closed.status, StatusCode::OK);
    assert_eq!(closed.message(), "Ticket updated successfully");
    assert_eq!(closed.body["data"]["status"], "closed");
    assert_eq!(closed.body["data"]["replied_by_admin_name"], "Root");

    let reopened = app
        .request(
            "PATCH",
            &path,
            Some(json!({ "status": "in_progress", "admin_reply": "Looking again." })),
            Some(&admin),
        )
        .await;
    assert_eq!(reopened.status, StatusCode::OK);
    assert_eq!(reopened.body["data"]["status"], "in_progress");
    assert_eq!(reopened.body["data"]["admin_reply"], "Looking again.");
}

#[tokio::test]
async fn test_reply_missing_ticket_and_wrong_role() {
    let app = TestApp::new();
    let employee = app
        .token_for(Role::Employee, "Eve", "eve@example.com")
        .await;
    let admin = app
        .token_for(Role::Admin, "Root", "root@example.com")
        .await;
    let body = json!({ "status": "resolved", "admin_reply": "Done" });
    let path = format!("/api/tickets/{}/reply", uuid::Uuid::now_v7());

    let missing = app
        .request("PATCH", &path, Some(body.clone()), Some(&admin))
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.message(), "Ticket not found");

    let forbidden = app
        .request("PATCH", &path, Some(body), Some(&employee))
        .await;
    assert_eq!(forbidden.status, StatusCode::FORBIDDEN);
}
