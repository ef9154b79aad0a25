//! Local stand-in for the scoring service

#![allow(dead_code)]

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};

use scam_radar::RadarConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedField {
    pub name: String,
    pub file_name: Option<String>,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Recorded {
    Upload(Vec<RecordedField>),
    Payload(Value),
}

pub type Recorder = Arc<Mutex<Vec<Recorded>>>;

pub fn high_risk_body() -> Value {
    json!({
        "verdict": {
            "address": "0xabc",
            "label": "phishing",
            "risk_level": "high",
            "score": 0.92,
            "summary": "Ví có rủi ro phishing rất cao (điểm 92.0%).",
            "key_signals": [
                {"feature": "f1", "description": "Approve-all call", "contribution": 0.41}
            ],
            "feature_snapshot": {"tx_count": 12.0}
        }
    })
}

async fn upload(State(recorder): State<Recorder>, mut multipart: Multipart) -> Json<Value> {
    let mut fields = Vec::new();
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let data = field.bytes().await.unwrap().to_vec();
        fields.push(RecordedField { name, file_name, data });
    }
    recorder.lock().unwrap().push(Recorded::Upload(fields));
    Json(high_risk_body())
}

async fn address(State(recorder): State<Recorder>, Json(payload): Json<Value>) -> (StatusCode, Json<Value>) {
    recorder.lock().unwrap().push(Recorded::Payload(payload.clone()));

    let empty = payload
        .get("transactions")
        .and_then(|t| t.as_array())
        .map(|t| t.is_empty())
        .unwrap_or(true);
    if empty {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"detail": "Danh sách giao dịch trống."})),
        );
    }

    (StatusCode::OK, Json(high_risk_body()))
}

async fn health() -> Json<Value> {
    Json(json!({"status": "ok"}))
}

/// The happy-path service: records every analyze call it receives
pub fn scoring_service(recorder: Recorder) -> Router {
    Router::new()
        .route("/api/analyze/upload", post(upload))
        .route("/api/analyze/address", post(address))
        .route("/api/health", get(health))
        .with_state(recorder)
}

/// Serve `app` on an ephemeral port and return a config pointing at it
pub fn spawn(app: Router) -> RadarConfig {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::Server::from_tcp(listener)
            .unwrap()
            .serve(app.into_make_service())
            .await
            .unwrap();
    });

    RadarConfig::new(&format!("http://{}", addr)).unwrap()
}

/// A port nothing is listening on
pub fn dead_config() -> RadarConfig {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    RadarConfig::new(&format!("http://{}", addr)).unwrap()
}

pub fn ten_row_csv() -> Vec<u8> {
    let mut csv = String::from("from_address,to_address,value,token_value,function_call,timestamp\n");
    for i in 0..10 {
        csv.push_str(&format!(
            "0xabc,0x{:040x},0,1,['setApprovalForAll'],2023-01-0{} 00:00:00\n",
            i,
            (i % 9) + 1
        ));
    }
    csv.into_bytes()
}
