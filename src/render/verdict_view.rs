use serde::Serialize;
use std::fmt;

use crate::models::{RiskLevel, Verdict};
use crate::render::format::{format_contribution, format_feature_value, format_percent};

/// Display text for a risk tier
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TierInfo {
    pub title: String,
    pub description: String,
    pub known: bool,
}

const TIERS: &[(&str, &str, &str)] = &[
    ("low", "Thấp", "Ví an toàn, chưa thấy dấu hiệu bất thường."),
    ("medium", "Trung bình", "Ví có tín hiệu đáng ngờ, nên kiểm tra kỹ hơn."),
    ("high", "Cao", "Ví có nguy cơ phishing mạnh, cần hành động ngay."),
];

impl TierInfo {
    pub fn from_level(level: &RiskLevel) -> Self {
        match TIERS.iter().find(|(key, _, _)| *key == level.as_str()) {
            Some((_, title, description)) if !matches!(level, RiskLevel::Unknown(_)) => Self {
                title: title.to_string(),
                description: description.to_string(),
                known: true,
            },
            _ => Self {
                title: "Không xác định".to_string(),
                description: format!("Mức rủi ro '{}' không có trong bảng phân loại.", level),
                known: false,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignalRow {
    pub feature: String,
    pub description: String,
    pub contribution: String,
}

impl fmt::Display for SignalRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}  {}", self.description, self.contribution)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureRow {
    pub key: String,
    pub value: String,
}

impl fmt::Display for FeatureRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}  {}", self.key, self.value)
    }
}

/// Presentation data for one verdict. Built by a pure mapping; holds only strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerdictView {
    pub address: Option<String>,
    pub risk_level: String,
    pub percent: String,
    pub tier: TierInfo,
    pub summary: String,
    pub signals: Vec<SignalRow>,
    pub features: Vec<FeatureRow>,
}

impl From<&Verdict> for VerdictView {
    fn from(verdict: &Verdict) -> Self {
        // Signal order is the service's ranking and must be kept as received
        let signals = verdict
            .key_signals
            .iter()
            .map(|s| SignalRow {
                feature: s.feature.clone(),
                description: s.description.clone(),
                contribution: format_contribution(s.contribution),
            })
            .collect();

        let features = verdict
            .feature_snapshot
            .iter()
            .map(|(key, value)| FeatureRow {
                key: key.clone(),
                value: format_feature_value(value),
            })
            .collect();

        Self {
            address: verdict.address.clone(),
            risk_level: verdict.risk_level.to_string(),
            percent: format_percent(verdict.score),
            tier: TierInfo::from_level(&verdict.risk_level),
            summary: verdict.summary.clone(),
            signals,
            features,
        }
    }
}

impl fmt::Display for VerdictView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "═══════════════════════════════════════════════════════════")?;
        writeln!(f, "              WEB3 SCAM RADAR REPORT")?;
        writeln!(f, "═══════════════════════════════════════════════════════════")?;
        writeln!(f)?;

        if let Some(address) = &self.address {
            writeln!(f, "Address: {}", address)?;
            writeln!(f)?;
        }

        writeln!(f, "═══ VERDICT ═══")?;
        let marker = match self.risk_level.as_str() {
            "high" => "🔴",
            "medium" => "🟠",
            "low" => "🟢",
            _ => "⚪",
        };
        writeln!(f, "{} {}  Mức rủi ro {}", marker, self.percent, self.tier.title)?;
        writeln!(f, "{}", self.tier.description)?;
        writeln!(f)?;

        writeln!(f, "═══ KẾT LUẬN ═══")?;
        writeln!(f, "{}", self.summary)?;

        if !self.signals.is_empty() {
            writeln!(f)?;
            writeln!(f, "═══ TÍN HIỆU NỔI BẬT ═══")?;
            for signal in &self.signals {
                writeln!(f, "{}", signal)?;
            }
        }

        if !self.features.is_empty() {
            writeln!(f)?;
            writeln!(f, "═══ DỮ LIỆU ĐẶC TRƯNG ═══")?;
            for feature in &self.features {
                writeln!(f, "{}", feature)?;
            }
        }

        writeln!(f)?;
        writeln!(f, "═══════════════════════════════════════════════════════════")?;

        Ok(())
    }
}
