use analysis_frontend::config::ApiSettings;
use analysis_frontend::services::api_client::ApiClient;
use analysis_frontend::startup::build_router;
use analysis_frontend::AppState;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    routing::{get, post},
    Json, Router,
};
use http_body_util::BodyExt;
use serde_json::json;
use std::sync::Arc;
use tower::util::ServiceExt;

/// Build the frontend against an API base URL (reachable or not).
fn frontend(base_url: &str) -> Router {
    let api = ApiClient::new(&ApiSettings {
        base_url: base_url.to_string(),
        timeout_secs: 5,
    })
    .expect("client builds");
    build_router(AppState::new(Arc::new(api)))
}

/// Spawn a stub analysis API granting `permissions`, returning its base URL.
async fn spawn_stub_api(permissions: Vec<&'static str>) -> String {
    let user = move || {
        json!({
            "id": 7,
            "username": "mei",
            "is_active": true,
            "is_superuser": false,
            "roles": ["analyst"],
            "permissions": permissions,
            "accessible_stores": null
        })
    };

    let me_user = user();
    let login_user = user();

    let stub = Router::new()
        .route(
            "/auth/login",
            post(move || {
                let user = login_user.clone();
                async move {
                    Json(json!({
                        "code": 200,
                        "message": "ok",
                        "data": {
                            "access_token": "tok-abc",
                            "token_type": "bearer",
                            "expires_in": 3600,
                            "user_info": user
                        }
                    }))
                }
            }),
        )
        .route(
            "/auth/me",
            get(move || {
                let user = me_user.clone();
                async move { Json(json!({"code": 200, "message": "ok", "data": user})) }
            }),
        )
        .route(
            "/stores/all",
            get(|| async {
                Json(json!({
                    "code": 200,
                    "message": "ok",
                    "data": [{
                        "id": 1,
                        "name": "Riverside",
                        "code": "S001",
                        "is_active": true,
                        "created_at": "2026-01-01T00:00:00"
                    }]
                }))
            }),
        )
        .route(
            "/orders",
            get(|| async {
                Json(json!({
                    "code": 200,
                    "message": "ok",
                    "data": {"items": [], "total": 0, "page": 1, "page_size": 10}
                }))
            }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub");
    let addr = listener.local_addr().expect("stub addr");
    tokio::spawn(async move {
        axum::serve(listener, stub).await.expect("stub serves");
    });
    format!("http://{addr}")
}

/// Stub whose `/auth/me` always answers 401 (token revoked server-side).
async fn spawn_expired_api() -> String {
    let stub = Router::new()
        .route(
            "/auth/login",
            post(|| async {
                Json(json!({
                    "code": 200,
                    "message": "ok",
                    "data": {
                        "access_token": "tok-stale",
                        "token_type": "bearer",
                        "expires_in": 3600,
                        "user_info": {
                            "id": 7,
                            "username": "mei",
                            "is_active": true,
                            "is_superuser": false,
                            "roles": [],
                            "permissions": [],
                            "accessible_stores": null
                        }
                    }
                }))
            }),
        )
        .route(
            "/auth/me",
            get(|| async {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({"detail": "token expired"})),
                )
            }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub");
    let addr = listener.local_addr().expect("stub addr");
    tokio::spawn(async move {
        axum::serve(listener, stub).await.expect("stub serves");
    });
    format!("http://{addr}")
}

async fn login_and_get_cookie(app: &Router) -> String {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/login")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("username=mei&password=secret"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER, "login succeeds");
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("session cookie set")
        .to_str()
        .unwrap();
    cookie.split(';').next().unwrap().to_string()
}

fn location(response: &axum::http::Response<Body>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .expect("redirect location")
        .to_str()
        .unwrap()
}

#[tokio::test]
async fn unauthenticated_navigation_redirects_to_login_with_return_path() {
    let app = frontend("http://127.0.0.1:9");

    let response = app
        .oneshot(Request::builder().uri("/orders").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login?redirect=/orders");
}

#[tokio::test]
async fn allow_listed_paths_need_no_session() {
    let app = frontend("http://127.0.0.1:9");

    for path in ["/login", "/health", "/403", "/404"] {
        let response = app
            .clone()
            .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK, "path {path}");
    }
}

#[tokio::test]
async fn login_page_renders_a_sign_in_form() {
    let app = frontend("http://127.0.0.1:9");

    let response = app
        .oneshot(Request::builder().uri("/login").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let html = String::from_utf8(body.to_vec()).unwrap();
    assert!(html.contains("name=\"username\""));
    assert!(html.contains("name=\"password\""));
}

#[tokio::test]
async fn signed_in_user_is_bounced_from_the_login_page() {
    let base_url = spawn_stub_api(vec!["dashboard:view", "order:view"]).await;
    let app = frontend(&base_url);
    let cookie = login_and_get_cookie(&app).await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/login")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/dashboard");
}

#[tokio::test]
async fn permitted_screen_is_served_after_route_generation() {
    let base_url = spawn_stub_api(vec!["order:view"]).await;
    let app = frontend(&base_url);
    let cookie = login_and_get_cookie(&app).await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/orders")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let html = String::from_utf8(body.to_vec()).unwrap();
    assert!(html.contains("Orders"));
}

#[tokio::test]
async fn unpermitted_screen_redirects_to_the_error_page() {
    let base_url = spawn_stub_api(vec!["order:view"]).await;
    let app = frontend(&base_url);
    let cookie = login_and_get_cookie(&app).await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/audit-logs")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/403");
}

#[tokio::test]
async fn expired_session_is_terminated_and_redirected_once() {
    let base_url = spawn_expired_api().await;
    let app = frontend(&base_url);
    let cookie = login_and_get_cookie(&app).await;

    // First navigation discovers the expired token while generating routes.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/orders")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login?error=session_expired");

    // The session is gone: the next navigation is plain unauthenticated.
    let response = app
        .oneshot(
            Request::builder()
                .uri("/orders")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login?redirect=/orders");
}
