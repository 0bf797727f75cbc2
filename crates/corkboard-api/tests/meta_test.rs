mod helpers;

use helpers::setup_test_app;

#[tokio::test]
async fn test_health_check() {
    let app = setup_test_app();

    let response = app.server.get("/api/health").await;
    assert_eq!(response.status_code(), 200);

    let json: serde_json::Value = response.json();
    assert_eq!(json["data"]["ok"], true);
}

#[tokio::test]
async fn test_openapi_spec_is_served() {
    let app = setup_test_app();

    let response = app.server.get("/api/openapi.json").await;
    assert_eq!(response.status_code(), 200);

    let json: serde_json::Value = response.json();
    assert_eq!(json["info"]["title"], "Corkboard API");

    let paths = json["paths"].as_object().unwrap();
    assert!(paths.contains_key("/api/posts"));
    assert!(paths.contains_key("/api/posts/{id}"));
    assert!(paths.contains_key("/api/images/upload"));
    assert!(paths.contains_key("/api/users/sync"));
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = setup_test_app();

    let response = app.server.get("/api/nope").await;
    assert_eq!(response.status_code(), 404);
}
