use crate::helpers::{london_subscriber_body, TestApp};

#[tokio::test]
async fn subscriber_list_is_empty_at_the_start() {
    let test_app = TestApp::spawn_app().await;

    let response = test_app.get_subscribers().await;

    assert_eq!(200, response.status().as_u16());

    let body: serde_json::Value = response.json().await.expect("Response was not JSON.");
    assert_eq!(body["total"], 0);
    assert_eq!(body["subscribers"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn subscriber_list_contains_active_subscribers_only() {
    let test_app = TestApp::spawn_app().await;

    test_app
        .post_subscribe(london_subscriber_body("active@test.com"))
        .await;
    test_app
        .post_subscribe(london_subscriber_body("gone@test.com"))
        .await;
    test_app
        .post_unsubscribe(serde_json::json!({ "email": "gone@test.com" }))
        .await;

    let body: serde_json::Value = test_app
        .get_subscribers()
        .await
        .json()
        .await
        .expect("Response was not JSON.");

    assert_eq!(body["total"], 1);
    assert_eq!(body["subscribers"][0]["email"], "active@test.com");
    assert_eq!(body["subscribers"][0]["latitude"], 51.5);
}

#[tokio::test]
async fn subscriber_count_reflects_unsubscribes() {
    let test_app = TestApp::spawn_app().await;

    test_app
        .post_subscribe(london_subscriber_body("one@test.com"))
        .await;
    test_app
        .post_subscribe(london_subscriber_body("two@test.com"))
        .await;
    test_app
        .post_unsubscribe(serde_json::json!({ "email": "one@test.com" }))
        .await;

    let body: serde_json::Value = test_app
        .get_subscriber_count()
        .await
        .json()
        .await
        .expect("Response was not JSON.");

    assert_eq!(body["count"], 1);
}
