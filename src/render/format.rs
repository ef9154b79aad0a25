use crate::models::FeatureValue;

/// `round(score * 1000) / 10` percent. Whole numbers print without a decimal.
pub fn format_percent(score: f64) -> String {
    // `+ 0.0` folds -0.0 into 0.0
    let pct = (score * 1000.0).round() / 10.0 + 0.0;
    if pct.fract() == 0.0 {
        format!("{:.0}%", pct)
    } else {
        format!("{:.1}%", pct)
    }
}

pub fn format_contribution(contribution: f64) -> String {
    to_fixed(contribution, 3)
}

/// Numbers get four decimals, anything else is shown as received
pub fn format_feature_value(value: &FeatureValue) -> String {
    match value {
        FeatureValue::Number(n) if n.is_finite() => to_fixed(*n, 4),
        FeatureValue::Number(n) => n.to_string(),
        FeatureValue::Text(s) => s.clone(),
    }
}

/// Fixed-point formatting where an exact midpoint rounds away from zero
/// (0.0625 -> "0.063"). Ties are found on the exact decimal expansion and
/// nudged one ulp outward, since `{:.N}` alone breaks them to even.
fn to_fixed(value: f64, digits: usize) -> String {
    let value = value + 0.0;
    // Any finite f64 has at most 1074 fractional digits
    let exact = format!("{:.1100}", value.abs());
    let fraction = exact.split('.').nth(1).unwrap_or("");
    let tail = fraction.get(digits..).unwrap_or("");
    let tie = tail.starts_with('5') && tail[1..].bytes().all(|b| b == b'0');

    let value = if tie {
        f64::from_bits(value.to_bits() + 1)
    } else {
        value
    };
    format!("{:.*}", digits, value)
}
