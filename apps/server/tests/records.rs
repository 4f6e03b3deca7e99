mod common;

use axum::http::{Method, StatusCode};
use common::TestApp;
use serde_json::json;

#[tokio::test]
async fn goal_records_round_trip_through_the_api() {
    let app = TestApp::spawn().await;
    let (_, token) = app.signed_up("ana@example.com").await;

    let (status, created) = app
        .request(
            Method::POST,
            "/api/v1/user/goals",
            Some(&token),
            Some(json!({
                "name": "New bike",
                "amount": 800,
                "details": { "kind": "goal", "savedAmount": 120 },
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{created}");
    assert_eq!(created["details"]["kind"], "goal");
    assert_eq!(created["details"]["savedAmount"].as_f64(), Some(120.0));
    let id = created["id"].as_str().unwrap().to_string();

    let (status, updated) = app
        .request(
            Method::PUT,
            &format!("/api/v1/user/goals/{id}"),
            Some(&token),
            Some(json!({ "details": { "kind": "goal", "savedAmount": 300 } })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["details"]["savedAmount"].as_f64(), Some(300.0));
    assert_eq!(updated["name"], "New bike");

    let (_, listed) = app
        .request(Method::GET, "/api/v1/user/goals", Some(&token), None)
        .await;
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let (status, _) = app
        .request(
            Method::DELETE,
            &format!("/api/v1/user/goals/{id}"),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, listed) = app
        .request(Method::GET, "/api/v1/user/goals", Some(&token), None)
        .await;
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn details_must_match_the_collection() {
    let app = TestApp::spawn().await;
    let (_, token) = app.signed_up("ana@example.com").await;

    let (status, _) = app
        .request(
            Method::POST,
            "/api/v1/user/savings",
            Some(&token),
            Some(json!({
                "name": "Bike",
                "amount": 800,
                "details": { "kind": "goal", "savedAmount": 0 },
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .request(Method::GET, "/api/v1/user/lottery_tickets", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn records_of_other_users_are_invisible() {
    let app = TestApp::spawn().await;
    let (_, ana) = app.signed_up("ana@example.com").await;
    let (_, bob) = app.signed_up("bob@example.com").await;

    let (_, created) = app
        .request(
            Method::POST,
            "/api/v1/user/savings",
            Some(&ana),
            Some(json!({ "name": "Rainy day", "amount": 50, "details": { "kind": "saving" } })),
        )
        .await;
    let id = created["id"].as_str().unwrap();

    let (status, _) = app
        .request(
            Method::DELETE,
            &format!("/api/v1/user/savings/{id}"),
            Some(&bob),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, listed) = app
        .request(Method::GET, "/api/v1/user/savings", Some(&bob), None)
        .await;
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn trend_analysis_needs_enough_samples() {
    let app = TestApp::spawn().await;
    let (_, token) = app.signed_up("ana@example.com").await;

    for day in 1..=9 {
        let (status, _) = app
            .request(
                Method::POST,
                "/api/v1/user/variable_expenses",
                Some(&token),
                Some(json!({
                    "name": format!("Groceries {day}"),
                    "amount": 50,
                    "details": { "kind": "variable_expense", "paidDate": format!("2024-03-{day:02}") },
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, _) = app
        .request(Method::GET, "/api/v1/analysis/variable_expenses", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    app.request(
        Method::POST,
        "/api/v1/user/variable_expenses",
        Some(&token),
        Some(json!({
            "name": "Groceries 10",
            "amount": 50,
            "details": { "kind": "variable_expense", "paidDate": "2024-03-10" },
        })),
    )
    .await;

    let (status, body) = app
        .request(Method::GET, "/api/v1/analysis/variable_expenses", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["table"], "variable_expenses");
    assert_eq!(body["sampleSize"], 10);
    assert_eq!(body["trendEquation"], "y = 0.00x + 50.00");

    let (status, _) = app
        .request(Method::GET, "/api/v1/analysis/users", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
