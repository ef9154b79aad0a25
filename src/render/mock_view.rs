use serde::Serialize;
use std::fmt;

use crate::models::{MockResult, ModelPerformance};

/// Three-way classification of a simulated 0-100 risk score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MockRisk {
    Danger,
    Warning,
    Safe,
}

impl MockRisk {
    pub fn from_score(score: f64) -> Self {
        if score >= 70.0 {
            MockRisk::Danger
        } else if score >= 40.0 {
            MockRisk::Warning
        } else {
            MockRisk::Safe
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            MockRisk::Danger => "red",
            MockRisk::Warning => "orange",
            MockRisk::Safe => "green",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MockRisk::Danger => "Nguy hiểm",
            MockRisk::Warning => "Cảnh báo",
            MockRisk::Safe => "An toàn",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            MockRisk::Danger => "🔴",
            MockRisk::Warning => "🟠",
            MockRisk::Safe => "🟢",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MockView {
    pub input: String,
    pub kind: String,
    pub risk: MockRisk,
    pub risk_score: String,
    pub is_phishing: bool,
    pub confidence: String,
    pub mlp_prediction: String,
    pub ft_transformer_prediction: String,
    pub features: Vec<(String, u32)>,
    pub timestamp: String,
}

impl From<&MockResult> for MockView {
    fn from(result: &MockResult) -> Self {
        let f = &result.features;
        let features = vec![
            ("transaction_count".to_string(), f.transaction_count),
            ("unique_counterparties".to_string(), f.unique_counterparties),
            ("approval_calls".to_string(), f.approval_calls),
            ("nft_transfers".to_string(), f.nft_transfers),
            ("zero_value_transfers".to_string(), f.zero_value_transfers),
            ("contract_interactions".to_string(), f.contract_interactions),
        ];

        Self {
            input: result.input.clone(),
            kind: result.kind.to_string(),
            risk: MockRisk::from_score(result.risk_score),
            risk_score: format!("{:.1}", result.risk_score),
            is_phishing: result.is_phishing,
            confidence: format!("{:.1}%", result.confidence),
            mlp_prediction: format!("{:.1}%", result.mlp_prediction * 100.0),
            ft_transformer_prediction: format!("{:.1}%", result.ft_transformer_prediction * 100.0),
            features,
            timestamp: result.timestamp.to_rfc3339(),
        }
    }
}

impl fmt::Display for MockView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "═══════════════════════════════════════════════════════════")?;
        writeln!(f, "              SIMULATED SCAN (NO REAL INFERENCE)")?;
        writeln!(f, "═══════════════════════════════════════════════════════════")?;
        writeln!(f)?;
        writeln!(f, "Input ({}): {}", self.kind, self.input)?;
        writeln!(f, "Time: {}", self.timestamp)?;
        writeln!(f)?;

        writeln!(f, "═══ VERDICT ═══")?;
        writeln!(f, "{} {} ({})", self.risk.emoji(), self.risk.label(), self.risk.color())?;
        writeln!(f, "Risk Score: {}/100", self.risk_score)?;
        writeln!(f, "Phishing: {}", if self.is_phishing { "YES" } else { "NO" })?;
        writeln!(f, "Confidence: {}", self.confidence)?;
        writeln!(f)?;

        writeln!(f, "═══ MODELS ═══")?;
        writeln!(f, "MLP: {}", self.mlp_prediction)?;
        writeln!(f, "FT-Transformer: {}", self.ft_transformer_prediction)?;
        writeln!(f)?;

        writeln!(f, "═══ FEATURES ═══")?;
        for (name, count) in &self.features {
            writeln!(f, "{}  {}", name, count)?;
        }

        writeln!(f)?;
        writeln!(f, "═══════════════════════════════════════════════════════════")?;
        Ok(())
    }
}

/// Text table of the static model metrics
pub struct PerformanceTable<'a>(pub &'a [ModelPerformance]);

impl fmt::Display for PerformanceTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<16} {:>9} {:>10} {:>7} {:>7} {:>8}",
            "Model", "Accuracy", "Precision", "Recall", "F1", "ROC-AUC"
        )?;
        for row in self.0 {
            writeln!(
                f,
                "{:<16} {:>9.3} {:>10.3} {:>7.3} {:>7.3} {:>8.3}",
                row.model, row.accuracy, row.precision, row.recall, row.f1, row.roc_auc
            )?;
        }
        Ok(())
    }
}
