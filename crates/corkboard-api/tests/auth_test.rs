mod helpers;

use helpers::setup_test_app;

#[tokio::test]
async fn test_create_post_without_token_is_unauthorized() {
    let app = setup_test_app();

    let response = app
        .server
        .post("/api/posts")
        .json(&serde_json::json!({ "title": "t", "body": "b" }))
        .await;

    assert_eq!(response.status_code(), 401);
    let json: serde_json::Value = response.json();
    assert_eq!(json["error"], "Missing access token.");
}

#[tokio::test]
async fn test_create_post_with_bad_token_is_unauthorized() {
    let app = setup_test_app();

    let response = app
        .server
        .post("/api/posts")
        .add_header("Authorization", "Bearer not-the-test-token")
        .json(&serde_json::json!({ "title": "t", "body": "b" }))
        .await;

    assert_eq!(response.status_code(), 401);
    let json: serde_json::Value = response.json();
    assert_eq!(json["error"], "Invalid or expired access token.");
}

#[tokio::test]
async fn test_non_bearer_scheme_is_unauthorized() {
    let app = setup_test_app();

    let response = app
        .server
        .post("/api/users/sync")
        .add_header("Authorization", "Basic dXNlcjpwYXNz")
        .await;

    assert_eq!(response.status_code(), 401);
    let json: serde_json::Value = response.json();
    assert_eq!(json["error"], "Missing access token.");
}

#[tokio::test]
async fn test_delete_post_without_token_is_unauthorized() {
    let app = setup_test_app();

    let response = app.server.delete("/api/posts/1").await;
    assert_eq!(response.status_code(), 401);
}

#[tokio::test]
async fn test_public_routes_need_no_token() {
    let app = setup_test_app();

    // Listing images is public, like the bucket it reads from.
    let response = app.server.get("/api/images").await;
    assert_eq!(response.status_code(), 200);
}
