//! Integration tests for admin user management and analytics.

mod helpers;

use http::StatusCode;
use serde_json::json;

use leavedesk_entity::identity::Role;

use helpers::TestApp;

#[tokio::test]
async fn test_list_users_across_roles() {
    let app = TestApp::new();
    let admin = app
        .token_for(Role::Admin, "Root", "root@example.com")
        .await;
    app.create_identity(Role::Manager, "Mia", "mia@example.com")
        .await;
    app.create_identity(Role::Employee, "Eve", "eve@example.com")
        .await;

    let response = app.request("GET", "/api/users", None, Some(&admin)).await;
    assert_eq!(response.status, StatusCode::OK);
    let users = response.body["data"].as_array().unwrap();
    assert_eq!(users.len(), 3);
    assert!(users.iter().all(|u| u.get("password_hash").is_none()));
}

#[tokio::test]
async fn test_create_user_requires_role_and_unique_email() {
    let app = TestApp::new();
    let admin = app
        .token_for(Role::Admin, "Root", "root@example.com")
        .await;

    let created = app
        .request(
            "POST",
            "/api/users",
            Some(json!({
                "name": "Max",
                "email": "max@example.com",
                "password": "secret1",
                "role": "manager",
            })),
            Some(&admin),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.message(), "User created");
    assert_eq!(created.body["data"]["role"], "manager");

    let duplicate = app
        .request(
            "POST",
            "/api/users",
            Some(json!({
                "name": "Max Two",
                "email": "MAX@example.com",
                "password": "secret1",
                "role": "employee",
            })),
            Some(&admin),
        )
        .await;
    assert_eq!(duplicate.status, StatusCode::BAD_REQUEST);
    assert_eq!(duplicate.message(), "Email already in use");

    let no_role = app
        .request(
            "POST",
            "/api/users",
            Some(json!({
                "name": "Nora",
                "email": "nora@example.com",
                "password": "secret1",
            })),
            Some(&admin),
        )
        .await;
    assert_eq!(no_role.status, StatusCode::BAD_REQUEST);

    let max_token = app.login("max@example.com", "secret1").await;
    assert!(!max_token.is_empty());
}

#[tokio::test]
async fn test_user_routes_are_admin_only() {
    let app = TestApp::new();
    let manager = app
        .token_for(Role::Manager, "Mia", "mia@example.com")
        .await;

    for (method, path) in [
        ("GET", "/api/users"),
        ("GET", "/api/users/analytics"),
        ("POST", "/api/users"),
    ] {
        let response = app
            .request(method, path, Some(json!({})), Some(&manager))
            .await;
        assert_eq!(response.status, StatusCode::FORBIDDEN, "{method} {path}");
    }
}

#[tokio::test]
async fn test_delete_user() {
    let app = TestApp::new();
    let admin_identity = app
        .create_identity(Role::Admin, "Root", "root@example.com")
        .await;
    let admin = app.login("root@example.com", helpers::PASSWORD).await;
    let employee = app
        .create_identity(Role::Employee, "Eve", "eve@example.com")
        .await;
    let employee_token = app.login("eve@example.com", helpers::PASSWORD).await;

    let own = app
        .request(
            "DELETE",
            &format!("/api/users/{}", admin_identity.id),
            None,
            Some(&admin),
        )
        .await;
    assert_eq!(own.status, StatusCode::BAD_REQUEST);
    assert_eq!(own.message(), "Admin cannot delete self");

    let path = format!("/api/users/{}", employee.id);
    let deleted = app.request("DELETE", &path, None, Some(&admin)).await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.message(), "User deleted");

    let again = app.request("DELETE", &path, None, Some(&admin)).await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
    assert_eq!(again.message(), "User not found");

    let stale_token = app
        .request("GET", "/api/auth/me", None, Some(&employee_token))
        .await;
    assert_eq!(stale_token.status, StatusCode::UNAUTHORIZED);
    assert_eq!(stale_token.message(), "Invalid token user");
}

#[tokio::test]
async fn test_user_analytics() {
    let app = TestApp::new();
    let admin = app
        .token_for(Role::Admin, "Root", "root@example.com")
        .await;
    app.create_identity(Role::Manager, "Mia", "mia@example.com")
        .await;
    let employee = app
        .token_for(Role::Employee, "Eve", "eve@example.com")
        .await;
    app.submit_leave(&employee, "2024-01-01", "2024-01-03")
        .await;

    let response = app
        .request("GET", "/api/users/analytics", None, Some(&admin))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let data = &response.body["data"];
    assert_eq!(
        data["totals"],
        json!({ "total_users": 3, "admins": 1, "managers": 1, "employees": 1 })
    );
    assert_eq!(
        data["leaves"],
        json!({ "total": 1, "pending": 1, "approved": 0, "rejected": 0 })
    );

    let monthly = data["monthly_users"].as_array().unwrap();
    assert_eq!(monthly.len(), 6);
    assert_eq!(monthly[5]["total"], 3);
}
