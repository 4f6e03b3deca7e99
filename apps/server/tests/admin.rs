mod common;

use axum::http::{Method, StatusCode};
use chrono::{Duration, Utc};
use common::{TestApp, ADMIN_EMAIL};
use serde_json::json;

#[tokio::test]
async fn admin_routes_require_the_admin_role() {
    let app = TestApp::spawn().await;
    let (_, token) = app.signed_up("ana@example.com").await;

    let (status, _) = app
        .request(Method::GET, "/api/v1/admin/users", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let admin = app.admin_token().await;
    let (status, users) = app
        .request(Method::GET, "/api/v1/admin/users?skip=0&limit=10", Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let emails: Vec<&str> = users
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|u| u["email"].as_str())
        .collect();
    assert_eq!(emails, vec![ADMIN_EMAIL, "ana@example.com"]);

    let (_, page) = app
        .request(Method::GET, "/api/v1/admin/users?skip=1&limit=10", Some(&admin), None)
        .await;
    assert_eq!(page.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn admin_creates_and_updates_users() {
    let app = TestApp::spawn().await;
    let admin = app.admin_token().await;

    let (status, created) = app
        .request(
            Method::POST,
            "/api/v1/admin/users",
            Some(&admin),
            Some(json!({
                "firstName": "Second",
                "lastName": "Admin",
                "email": "ops@example.com",
                "password": "ops-password",
                "role": "admin",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{created}");
    assert_eq!(created["role"], "admin");
    let id = created["id"].as_str().unwrap().to_string();

    let (status, updated) = app
        .request(
            Method::PUT,
            &format!("/api/v1/admin/users/{id}"),
            Some(&admin),
            Some(json!({ "firstName": "Renamed", "role": "user" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["firstName"], "Renamed");
    assert_eq!(updated["role"], "user");

    let (status, _) = app
        .request(Method::GET, "/api/v1/admin/users/missing", Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deactivation_cascades_and_reactivation_restores() {
    let app = TestApp::spawn().await;
    let admin = app.admin_token().await;
    let (ana_id, ana) = app.signed_up("ana@example.com").await;

    app.request(
        Method::POST,
        "/api/v1/user/balance",
        Some(&ana),
        Some(json!({ "amount": 100 })),
    )
    .await;
    app.request(
        Method::POST,
        "/api/v1/user/fixed_incomes",
        Some(&ana),
        Some(json!({ "name": "Salary", "amount": 10, "cadenceDays": 1 })),
    )
    .await;

    let (status, body) = app
        .request(
            Method::DELETE,
            &format!("/api/v1/admin/users/{ana_id}"),
            Some(&admin),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "OK");

    // Existing tokens stop working and logging in is refused.
    let (status, _) = app
        .request(Method::GET, "/api/v1/user/balance", Some(&ana), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = app
        .request(
            Method::POST,
            "/api/v1/auth/login",
            None,
            Some(json!({ "email": "ana@example.com", "password": "password123" })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let later = Utc::now().naive_utc() + Duration::days(2);
    let report = app.state.accrual_engine.run_cycle(later).await;
    assert_eq!(report.evaluated, 0);

    let (status, user) = app
        .request(
            Method::PUT,
            &format!("/api/v1/admin/users/{ana_id}/reactivate"),
            Some(&admin),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(user["status"], "active");

    let report = app.state.accrual_engine.run_cycle(later).await;
    assert_eq!(report.applied, 1);
    let (status, balance) = app
        .request(Method::GET, "/api/v1/user/balance", Some(&ana), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(balance["amount"].as_f64(), Some(110.0));

    let (status, report) = app
        .request(Method::GET, "/api/v1/admin/accrual/last-report", Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["applied"], 1);
}

#[tokio::test]
async fn admin_cannot_deactivate_themselves() {
    let app = TestApp::spawn().await;
    let admin = app.admin_token().await;
    let (_, users) = app
        .request(Method::GET, "/api/v1/admin/users", Some(&admin), None)
        .await;
    let admin_id = users[0]["id"].as_str().unwrap();

    let (status, _) = app
        .request(
            Method::DELETE,
            &format!("/api/v1/admin/users/{admin_id}"),
            Some(&admin),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
