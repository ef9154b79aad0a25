use async_trait::async_trait;
use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::core::VerdictProvider;
use crate::models::*;
use crate::utils::{RadarConfig, RadarError, Result};

/// Feature names and the descriptions the scoring service attaches to them
const SIGNAL_CATALOG: &[(&str, &str)] = &[
    ("suspicious_density", "Tỉ lệ function đáng ngờ trên tổng số giao dịch"),
    ("approval_density", "Số giao dịch approve/permit bất thường"),
    ("gift_ratio", "Tần suất nhận/gửi NFT miễn phí"),
    ("nft_dump_ratio", "Mức độ xả NFT so với lượng nhận"),
    ("txn_velocity", "Tốc độ giao dịch trong khoảng thời gian hoạt động"),
    ("turnover_ratio", "Tỉ lệ giá trị chuyển ra so với nhận vào"),
    ("zero_value_ratio", "Tỉ lệ giao dịch 0 ETH nhưng có token đi kèm"),
    ("mint_intensity", "Số lần mint trực tiếp từ contract"),
    ("neighbor_spread", "Độ đa dạng địa chỉ đối tác giao dịch"),
    ("value_delta", "Chênh lệch giá floor trước và sau giao dịch"),
];

const MAX_SIGNALS: usize = 5;

/// Client-side stand-in for the scoring service.
///
/// Every number it produces is an independent random draw; the input only
/// decides which kind of record comes back. Seed it for reproducible tests.
pub struct SyntheticProvider {
    delay: Duration,
    rng: Mutex<StdRng>,
}

impl SyntheticProvider {
    pub fn new(delay: Duration, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            delay,
            rng: Mutex::new(rng),
        }
    }

    pub fn from_config(config: &RadarConfig) -> Self {
        Self::new(config.simulated_delay, config.seed)
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Mock-variant scan: wait out the simulated delay, then fabricate a result.
    /// Returns `Cancelled` if the token fires first.
    pub async fn simulate(&self, input: &ScanInput, cancel: &CancellationToken) -> Result<MockResult> {
        tracing::info!("Simulating {} scan for {}", input.kind, input.value);

        self.wait(cancel).await?;

        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());

        let risk_score: f64 = rng.gen_range(0.0..100.0);
        let features = MockFeatures {
            transaction_count: rng.gen_range(1..=500),
            unique_counterparties: rng.gen_range(1..=120),
            approval_calls: rng.gen_range(0..=40),
            nft_transfers: rng.gen_range(0..=200),
            zero_value_transfers: rng.gen_range(0..=80),
            contract_interactions: rng.gen_range(0..=150),
        };

        Ok(MockResult {
            input: input.value.clone(),
            kind: input.kind,
            risk_score,
            is_phishing: risk_score >= 50.0,
            confidence: rng.gen_range(60.0..99.0),
            mlp_prediction: rng.gen(),
            ft_transformer_prediction: rng.gen(),
            features,
            timestamp: Utc::now(),
        })
    }

    async fn wait(&self, cancel: &CancellationToken) -> Result<()> {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::debug!("Simulated delay cancelled");
                Err(RadarError::Cancelled)
            }
            _ = tokio::time::sleep(self.delay) => Ok(()),
        }
    }

    fn fabricate_verdict(&self, request: &AnalysisRequest) -> Verdict {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());

        let score: f64 = rng.gen();
        let risk_level = RiskLevel::from_score(score);
        let label = if score >= 0.5 {
            VerdictLabel::Phishing
        } else {
            VerdictLabel::Benign
        };

        let mut signals: Vec<KeySignal> = SIGNAL_CATALOG
            .iter()
            .map(|(feature, description)| KeySignal::new(*feature, *description, rng.gen_range(-0.5..1.5)))
            .collect();
        signals.sort_by(|a, b| b.contribution.abs().total_cmp(&a.contribution.abs()));
        signals.truncate(MAX_SIGNALS);

        let mut verdict = Verdict::new(risk_level.clone(), score, build_summary(label, &risk_level, score));
        verdict.label = Some(label);
        verdict.address = match request {
            AnalysisRequest::Upload { address, .. } => Some(address.to_lowercase()),
            AnalysisRequest::Payload(value) => value
                .get("address")
                .and_then(|a| a.as_str())
                .map(str::to_lowercase),
        };
        verdict.key_signals = signals;

        for name in ["total_txn", "out_neighbors", "in_neighbors", "approval_func_count"] {
            verdict
                .feature_snapshot
                .insert(name.to_string(), FeatureValue::Number(rng.gen_range(0..200) as f64));
        }
        for name in ["zero_value_ratio", "gift_in_ratio", "txn_velocity"] {
            verdict
                .feature_snapshot
                .insert(name.to_string(), FeatureValue::Number(rng.gen()));
        }

        verdict
    }
}

impl Default for SyntheticProvider {
    fn default() -> Self {
        Self::from_config(&RadarConfig::default())
    }
}

#[async_trait]
impl VerdictProvider for SyntheticProvider {
    fn name(&self) -> &'static str {
        "synthetic"
    }

    async fn submit(&self, request: &AnalysisRequest) -> Result<Verdict> {
        tokio::time::sleep(self.delay).await;
        let verdict = self.fabricate_verdict(request);
        tracing::info!("Synthetic verdict: {} ({:.3})", verdict.risk_level, verdict.score);
        Ok(verdict)
    }
}

/// Narrative in the same wording the scoring service uses
pub fn build_summary(label: VerdictLabel, risk_level: &RiskLevel, score: f64) -> String {
    let pct = (score * 10_000.0).round() / 100.0;
    match (label, risk_level) {
        (VerdictLabel::Phishing, RiskLevel::High) => format!(
            "Ví có rủi ro phishing rất cao (điểm {}%). Đề xuất khóa tương tác \
             và liên hệ đội an ninh để điều tra sâu hơn.",
            pct
        ),
        (VerdictLabel::Phishing, _) => format!(
            "Ví có dấu hiệu phishing (điểm {}%). Nên gắn cờ cảnh báo, kiểm tra thủ công \
             và giới hạn quyền truy cập.",
            pct
        ),
        (VerdictLabel::Benign, _) => format!(
            "Ví được đánh giá an toàn (điểm {}%). Tiếp tục giám sát giao dịch định kỳ \
             để phát hiện bất thường kịp thời.",
            pct
        ),
    }
}
