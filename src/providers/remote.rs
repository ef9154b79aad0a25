use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::core::VerdictProvider;
use crate::models::{AnalysisRequest, AnalyzeResponse, ErrorBody, Verdict};
use crate::utils::{RadarConfig, RadarError, Result};

pub const UPLOAD_PATH: &str = "/api/analyze/upload";
pub const ADDRESS_PATH: &str = "/api/analyze/address";
pub const HEALTH_PATH: &str = "/api/health";

pub const UPLOAD_FALLBACK: &str = "Không thể phân tích tệp CSV.";
pub const PAYLOAD_FALLBACK: &str = "Không thể phân tích dữ liệu JSON.";

#[derive(Debug, Deserialize)]
struct HealthBody {
    status: String,
}

/// Verdict provider backed by the scoring service's HTTP API
pub struct RemoteVerdictProvider {
    http: Client,
    config: RadarConfig,
}

impl RemoteVerdictProvider {
    pub fn new(config: RadarConfig) -> Result<Self> {
        let http = Client::builder().timeout(config.timeout).build()?;

        tracing::info!("Remote provider targeting {}", config.api_url);

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &RadarConfig {
        &self.config
    }

    /// Liveness probe; returns the service's status string
    pub async fn health(&self) -> Result<String> {
        let url = self.config.endpoint(HEALTH_PATH)?;
        let body: HealthBody = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(body.status)
    }

    async fn post(&self, request: &AnalysisRequest) -> Result<Verdict> {
        let (path, fallback) = match request {
            AnalysisRequest::Upload { .. } => (UPLOAD_PATH, UPLOAD_FALLBACK),
            AnalysisRequest::Payload(_) => (ADDRESS_PATH, PAYLOAD_FALLBACK),
        };
        let url = self.config.endpoint(path)?;

        let builder = match request {
            AnalysisRequest::Upload { address, file } => {
                let part = Part::bytes(file.bytes.clone())
                    .file_name(file.name.clone())
                    .mime_str("text/csv")?;
                let form = Form::new().text("address", address.clone()).part("file", part);
                self.http.post(url).multipart(form)
            }
            AnalysisRequest::Payload(value) => self.http.post(url).json(value),
        };

        tracing::debug!("POST {} ({})", path, request.kind());

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Transport failure on {}: {}", path, e);
                return Err(RadarError::Request(fallback.to_string()));
            }
        };

        let status = response.status();
        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("Failed to read response body from {}: {}", path, e);
                return Err(RadarError::Request(fallback.to_string()));
            }
        };

        if !status.is_success() {
            return Err(normalize_failure(status, &body, fallback));
        }

        parse_verdict(&body)
    }
}

#[async_trait]
impl VerdictProvider for RemoteVerdictProvider {
    fn name(&self) -> &'static str {
        "remote-http"
    }

    async fn submit(&self, request: &AnalysisRequest) -> Result<Verdict> {
        self.post(request).await
    }
}

/// Map a non-success response to the message shown to the user:
/// the body's `detail` string when there is one, else the fixed fallback.
pub fn normalize_failure(status: StatusCode, body: &[u8], fallback: &str) -> RadarError {
    let detail = serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message().map(str::to_string));

    tracing::warn!("Service answered {} (detail: {:?})", status, detail);

    RadarError::Request(detail.unwrap_or_else(|| fallback.to_string()))
}

/// Schema-checked decoding of a success body
pub fn parse_verdict(body: &[u8]) -> Result<Verdict> {
    let response: AnalyzeResponse = serde_json::from_slice(body).map_err(|e| {
        tracing::warn!("Verdict body rejected: {}", e);
        RadarError::MalformedResponse(e.to_string())
    })?;

    response
        .verdict
        .check_shape()
        .map_err(RadarError::MalformedResponse)?;

    Ok(response.verdict)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RiskLevel;

    #[test]
    fn test_failure_uses_detail() {
        let err = normalize_failure(
            StatusCode::BAD_REQUEST,
            "{\"detail\": \"Vui lòng tải lên tệp CSV hợp lệ.\"}".as_bytes(),
            UPLOAD_FALLBACK,
        );
        assert_eq!(err.to_string(), "Vui lòng tải lên tệp CSV hợp lệ.");
    }

    #[test]
    fn test_failure_falls_back() {
        let err = normalize_failure(StatusCode::BAD_GATEWAY, b"<html>bad gateway</html>", PAYLOAD_FALLBACK);
        assert_eq!(err.to_string(), PAYLOAD_FALLBACK);

        let err = normalize_failure(StatusCode::INTERNAL_SERVER_ERROR, b"{}", UPLOAD_FALLBACK);
        assert_eq!(err.to_string(), UPLOAD_FALLBACK);
    }

    #[test]
    fn test_parse_valid_verdict() {
        let body = br#"{"verdict": {"risk_level": "low", "score": 0.1, "summary": "ok",
            "key_signals": [], "feature_snapshot": {}}}"#;
        let verdict = parse_verdict(body).unwrap();
        assert_eq!(verdict.risk_level, RiskLevel::Low);
    }

    #[test]
    fn test_parse_rejects_missing_fields() {
        let body = br#"{"verdict": {"risk_level": "low", "score": 0.1}}"#;
        assert!(matches!(parse_verdict(body), Err(RadarError::MalformedResponse(_))));
    }

    #[test]
    fn test_parse_rejects_non_json() {
        assert!(matches!(parse_verdict(b"OK"), Err(RadarError::MalformedResponse(_))));
    }

    #[test]
    fn test_parse_rejects_bad_score() {
        let body = br#"{"verdict": {"risk_level": "high", "score": 92, "summary": "",
            "key_signals": [], "feature_snapshot": {}}}"#;
        assert!(matches!(parse_verdict(body), Err(RadarError::MalformedResponse(_))));
    }
}
