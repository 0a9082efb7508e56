// tests/review_api_http.rs
//
// ReviewClient against an in-process axum server playing the review API.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Query, State};
use axum::http::{header::AUTHORIZATION, HeaderMap, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use homework_status_bot::{PollError, ReviewClient, StatusSource};

type Requests = Arc<Mutex<Vec<(Option<String>, Option<String>)>>>;

async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    format!("http://{addr}")
}

/// Replies with a fixed status/body and records (from_date, Authorization) per request.
fn recording_app(seen: Requests, status: StatusCode, body: Value) -> Router {
    Router::new()
        .route(
            "/statuses",
            get(
                move |State(seen): State<Requests>,
                      Query(q): Query<HashMap<String, String>>,
                      headers: HeaderMap| async move {
                    let auth = headers
                        .get(AUTHORIZATION)
                        .and_then(|v| v.to_str().ok())
                        .map(str::to_string);
                    seen.lock()
                        .unwrap()
                        .push((q.get("from_date").cloned(), auth));
                    (status, Json(body))
                },
            ),
        )
        .with_state(seen)
}

#[tokio::test]
async fn sends_cursor_and_oauth_header_and_parses_reply() {
    let seen = Requests::default();
    let body = json!({
        "homeworks": [{"homework_name": "Task1", "status": "approved"}],
        "current_date": 1000
    });
    let base = spawn(recording_app(seen.clone(), StatusCode::OK, body)).await;
    let client = ReviewClient::new(format!("{base}/statuses"), "secret-token");

    let rsp = client.fetch(123).await.expect("fetch ok");

    assert_eq!(rsp.homeworks.len(), 1);
    assert_eq!(rsp.homeworks[0].homework_name, "Task1");
    assert_eq!(rsp.current_date, Some(1000));

    let reqs = seen.lock().unwrap();
    assert_eq!(reqs.len(), 1);
    assert_eq!(reqs[0].0.as_deref(), Some("123"));
    assert_eq!(reqs[0].1.as_deref(), Some("OAuth secret-token"));
}

#[tokio::test]
async fn error_shape_is_api_payload_with_server_message() {
    let body = json!({
        "code": "not_authenticated",
        "message": "Credentials were not provided."
    });
    let base = spawn(recording_app(
        Requests::default(),
        StatusCode::UNAUTHORIZED,
        body,
    ))
    .await;
    let client = ReviewClient::new(format!("{base}/statuses"), "secret-token");

    let err = client.fetch(0).await.unwrap_err();

    match &err {
        PollError::ApiPayload { value, message, .. } => {
            assert_eq!(value, "not_authenticated");
            assert_eq!(message, "Credentials were not provided.");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!err.to_string().contains("secret-token"));
}

#[tokio::test]
async fn non_json_body_is_api_payload() {
    let app = Router::new().route(
        "/statuses",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>") }),
    );
    let base = spawn(app).await;
    let client = ReviewClient::new(format!("{base}/statuses"), "t");

    let err = client.fetch(5).await.unwrap_err();

    assert_eq!(err.kind(), "api_payload");
}

#[tokio::test]
async fn connection_refused_is_transport_with_context() {
    // Grab a free port, then close it so nothing listens there.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let url = format!("http://{addr}/statuses");
    let client = ReviewClient::new(url.clone(), "secret-token");

    let err = client.fetch(77).await.unwrap_err();

    match &err {
        PollError::Transport {
            url: u, from_date, ..
        } => {
            assert_eq!(u, &url);
            assert_eq!(*from_date, 77);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!err.to_string().contains("secret-token"));
}

#[tokio::test]
async fn slow_server_hits_request_timeout() {
    let app = Router::new().route(
        "/statuses",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Json(json!({"homeworks": []}))
        }),
    );
    let base = spawn(app).await;
    let client =
        ReviewClient::new(format!("{base}/statuses"), "t").with_timeout(Duration::from_millis(200));

    let err = client.fetch(0).await.unwrap_err();

    assert_eq!(err.kind(), "transport");
}
