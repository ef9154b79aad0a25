use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What the simulated scan is looking at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    Address,
    Transaction,
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputKind::Address => f.write_str("address"),
            InputKind::Transaction => f.write_str("transaction"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanInput {
    pub kind: InputKind,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MockFeatures {
    pub transaction_count: u32,
    pub unique_counterparties: u32,
    pub approval_calls: u32,
    pub nft_transfers: u32,
    pub zero_value_transfers: u32,
    pub contract_interactions: u32,
}

/// Fabricated scan result. Nothing in it is derived from the input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MockResult {
    pub input: String,
    #[serde(rename = "type")]
    pub kind: InputKind,
    /// 0 - 100
    pub risk_score: f64,
    pub is_phishing: bool,
    /// 0 - 100
    pub confidence: f64,
    /// Probabilities (0 - 1) from the two simulated models
    pub mlp_prediction: f64,
    pub ft_transformer_prediction: f64,
    pub features: MockFeatures,
    pub timestamp: DateTime<Utc>,
}

/// One row of the static model-performance table
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ModelPerformance {
    pub model: &'static str,
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub roc_auc: f64,
}
