use sqlx::{postgres::PgRow, Row};

use crate::helpers::{london_subscriber_body, TestApp};

#[tokio::test]
async fn unsubscribe_deactivates_an_existing_subscriber() {
    let test_app = TestApp::spawn_app().await;

    test_app
        .post_subscribe(london_subscriber_body("frank@test.com"))
        .await;

    let response = test_app
        .post_unsubscribe(serde_json::json!({ "email": "frank@test.com" }))
        .await;

    assert_eq!(200, response.status().as_u16());

    // The row is kept, only deactivated
    let (is_active,): (bool,) = sqlx::query("SELECT is_active FROM subscribers WHERE email = $1")
        .bind("frank@test.com")
        .map(|row: PgRow| (row.get("is_active"),))
        .fetch_one(&test_app.db_pool)
        .await
        .expect("Query to fetch subscriber failed.");

    assert!(!is_active);
}

#[tokio::test]
async fn unsubscribe_returns_404_for_an_unknown_email() {
    let test_app = TestApp::spawn_app().await;

    let response = test_app
        .post_unsubscribe(serde_json::json!({ "email": "nobody@test.com" }))
        .await;

    assert_eq!(404, response.status().as_u16());
}

#[tokio::test]
async fn unsubscribe_returns_404_when_already_unsubscribed() {
    let test_app = TestApp::spawn_app().await;

    test_app
        .post_subscribe(london_subscriber_body("frank@test.com"))
        .await;
    test_app
        .post_unsubscribe(serde_json::json!({ "email": "frank@test.com" }))
        .await;

    let response = test_app
        .post_unsubscribe(serde_json::json!({ "email": "frank@test.com" }))
        .await;

    assert_eq!(404, response.status().as_u16());
}
