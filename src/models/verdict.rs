use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Risk tier reported by the scoring service.
///
/// Any string deserializes; values outside the three known tiers are kept
/// verbatim so the renderer can say which tier it did not recognize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Unknown(String),
}

impl RiskLevel {
    pub fn as_str(&self) -> &str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::Unknown(raw) => raw,
        }
    }

    /// Backend thresholds on a probability score
    pub fn from_score(score: f64) -> Self {
        if score >= 0.75 {
            RiskLevel::High
        } else if score >= 0.5 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

impl From<String> for RiskLevel {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "low" => RiskLevel::Low,
            "medium" => RiskLevel::Medium,
            "high" => RiskLevel::High,
            _ => RiskLevel::Unknown(raw),
        }
    }
}

impl From<RiskLevel> for String {
    fn from(level: RiskLevel) -> Self {
        level.as_str().to_string()
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerdictLabel {
    Benign,
    Phishing,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeySignal {
    pub feature: String,
    pub description: String,
    pub contribution: f64,
}

impl KeySignal {
    pub fn new(feature: impl Into<String>, description: impl Into<String>, contribution: f64) -> Self {
        Self {
            feature: feature.into(),
            description: description.into(),
            contribution,
        }
    }
}

/// A snapshot value is usually numeric, but the service may send labels too
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Number(f64),
    Text(String),
}

impl From<f64> for FeatureValue {
    fn from(value: f64) -> Self {
        FeatureValue::Number(value)
    }
}

impl From<&str> for FeatureValue {
    fn from(value: &str) -> Self {
        FeatureValue::Text(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<VerdictLabel>,
    pub risk_level: RiskLevel,
    pub score: f64,
    pub summary: String,
    pub key_signals: Vec<KeySignal>,
    pub feature_snapshot: BTreeMap<String, FeatureValue>,
}

impl Verdict {
    pub fn new(risk_level: RiskLevel, score: f64, summary: impl Into<String>) -> Self {
        Self {
            address: None,
            label: None,
            risk_level,
            score,
            summary: summary.into(),
            key_signals: Vec::new(),
            feature_snapshot: BTreeMap::new(),
        }
    }

    pub fn with_signal(mut self, signal: KeySignal) -> Self {
        self.key_signals.push(signal);
        self
    }

    pub fn with_feature(mut self, name: impl Into<String>, value: impl Into<FeatureValue>) -> Self {
        self.feature_snapshot.insert(name.into(), value.into());
        self
    }

    /// Invariants serde cannot express. Returns the first violation found.
    pub fn check_shape(&self) -> std::result::Result<(), String> {
        if !self.score.is_finite() || !(0.0..=1.0).contains(&self.score) {
            return Err(format!("score {} is outside [0, 1]", self.score));
        }
        if let Some(signal) = self.key_signals.iter().find(|s| !s.contribution.is_finite()) {
            return Err(format!("contribution of '{}' is not a finite number", signal.feature));
        }
        Ok(())
    }
}

/// Body of a successful analyze call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub verdict: Verdict,
}

/// Body of a failed call, when the service sends one
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorBody {
    /// Only a non-empty string `detail` is shown to the user
    pub fn message(&self) -> Option<&str> {
        match &self.detail {
            Some(serde_json::Value::String(s)) if !s.trim().is_empty() => Some(s.as_str()),
            _ => None,
        }
    }
}
