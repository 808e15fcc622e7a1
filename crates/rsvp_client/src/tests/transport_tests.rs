use super::*;
use std::{sync::Arc, time::Duration};

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use chrono::{TimeZone, Utc};
use serde_json::{json, Value};
use shared::protocol::GuestContact;
use tokio::{
    net::TcpListener,
    sync::{oneshot, Mutex},
};

type Received = (Option<String>, Value);

#[derive(Clone)]
struct IntakeState {
    tx: Arc<Mutex<Option<oneshot::Sender<Received>>>>,
    status: StatusCode,
}

async fn handle_intake(
    State(state): State<IntakeState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> StatusCode {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    if let Some(tx) = state.tx.lock().await.take() {
        let _ = tx.send((content_type, body));
    }
    state.status
}

async fn spawn_intake_server(status: StatusCode) -> Result<(String, oneshot::Receiver<Received>)> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let (tx, rx) = oneshot::channel();
    let state = IntakeState {
        tx: Arc::new(Mutex::new(Some(tx))),
        status,
    };
    let app = Router::new()
        .route("/exec", post(handle_intake))
        .with_state(state);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok((format!("http://{addr}/exec"), rx))
}

fn sample_payload() -> SubmissionPayload {
    SubmissionPayload::declined(
        GuestContact {
            guest_name: "Alex Smith".to_string(),
            email: "alex@example.com".to_string(),
            phone: String::new(),
        },
        Utc.with_ymd_and_hms(2026, 6, 1, 9, 0, 0).unwrap(),
    )
}

#[tokio::test]
async fn posts_payload_as_json() {
    let (endpoint, received) = spawn_intake_server(StatusCode::OK)
        .await
        .expect("spawn server");

    HttpIntakePort::new()
        .submit(&endpoint, &sample_payload())
        .await
        .expect("submit");

    let (content_type, body) = received.await.expect("payload");
    assert_eq!(content_type.as_deref(), Some("application/json"));
    assert_eq!(
        body,
        json!({
            "timestamp": "2026-06-01T09:00:00.000Z",
            "guestName": "Alex Smith",
            "email": "alex@example.com",
            "phone": "",
            "attending": "no",
            "guestCount": 0,
            "guestNames": "",
            "mealPreferences": "Not attending",
            "dietaryRestrictions": "",
            "specialRequests": "",
        })
    );
    let decoded: SubmissionPayload = serde_json::from_value(body).expect("decode");
    assert_eq!(decoded, sample_payload());
}

#[tokio::test]
async fn error_status_is_not_observed() {
    let (endpoint, received) = spawn_intake_server(StatusCode::INTERNAL_SERVER_ERROR)
        .await
        .expect("spawn server");

    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(5))
        .build()
        .expect("client");
    HttpIntakePort::with_client(http)
        .submit(&endpoint, &sample_payload())
        .await
        .expect("opaque response counts as delivered");

    received.await.expect("payload");
}

#[tokio::test]
async fn unreachable_endpoint_is_an_error() {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let err = HttpIntakePort::new()
        .submit(&format!("http://{addr}/exec"), &sample_payload())
        .await
        .expect_err("nobody listening");
    assert!(
        err.to_string().contains("failed to reach intake endpoint"),
        "unexpected error: {err}"
    );
}
