use chrono::NaiveDate;
use sqlx::{postgres::PgRow, Row};

use crate::helpers::{london_subscriber_body, TestApp};

#[tokio::test]
async fn subscribe_returns_201_when_body_is_valid() {
    let test_app = TestApp::spawn_app().await;

    let response = test_app
        .post_subscribe(london_subscriber_body("frank@test.com"))
        .await;

    assert_eq!(201, response.status().as_u16());
}

#[tokio::test]
async fn subscribe_persists_the_new_subscriber() {
    let test_app = TestApp::spawn_app().await;

    test_app
        .post_subscribe(london_subscriber_body("test@test.com"))
        .await;

    let row = sqlx::query(
        "SELECT email, latitude, longitude, location_name, is_active, last_sent_date \
         FROM subscribers;",
    )
    .map(|row: PgRow| {
        (
            row.get::<String, _>("email"),
            row.get::<f64, _>("latitude"),
            row.get::<f64, _>("longitude"),
            row.get::<Option<String>, _>("location_name"),
            row.get::<bool, _>("is_active"),
            row.get::<Option<NaiveDate>, _>("last_sent_date"),
        )
    })
    .fetch_one(&test_app.db_pool)
    .await
    .expect("Query to fetch subscribers failed.");

    assert_eq!(row.0, "test@test.com");
    assert_eq!(row.1, 51.5);
    assert_eq!(row.2, -0.12);
    assert_eq!(row.3.as_deref(), Some("London, UK"));
    assert!(row.4);
    // nothing sent yet
    assert_eq!(row.5, None);
}

#[tokio::test]
async fn subscribe_returns_400_when_body_is_invalid() {
    let test_app = TestApp::spawn_app().await;

    // This is a common practice and it is called table-driven tests. In this case, it simulates different kind of possible request bodies
    // where API should return 400.
    let test_cases: Vec<(serde_json::Value, &str)> = vec![
        (serde_json::json!({}), "missing body parameters"),
        (
            serde_json::json!({ "email": "frank@test.com" }),
            "missing coordinates",
        ),
        (
            serde_json::json!({ "latitude": 51.5, "longitude": -0.12 }),
            "missing email parameter",
        ),
        (
            serde_json::json!({ "email": "not-an-email", "latitude": 51.5, "longitude": -0.12 }),
            "invalid email",
        ),
        (
            serde_json::json!({ "email": "frank@test.com", "latitude": 91.0, "longitude": -0.12 }),
            "latitude out of range",
        ),
        (
            serde_json::json!({ "email": "frank@test.com", "latitude": 51.5, "longitude": 200.0 }),
            "longitude out of range",
        ),
    ];

    for (body, error_message) in test_cases {
        let response = test_app.post_subscribe(body).await;

        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not fail with 400 Bad Request when the payload was {}.",
            error_message
        );
    }
}

#[tokio::test]
async fn subscribe_returns_409_when_email_is_already_taken() {
    let test_app = TestApp::spawn_app().await;

    let first = test_app
        .post_subscribe(london_subscriber_body("frank@test.com"))
        .await;
    let second = test_app
        .post_subscribe(london_subscriber_body("frank@test.com"))
        .await;

    assert_eq!(201, first.status().as_u16());
    assert_eq!(409, second.status().as_u16());
}
