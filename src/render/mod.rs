//! Pure mappings from result records to presentation data

pub mod format;
pub mod verdict_view;
pub mod mock_view;

pub use format::{format_contribution, format_feature_value, format_percent};
pub use verdict_view::{FeatureRow, SignalRow, TierInfo, VerdictView};
pub use mock_view::{MockRisk, MockView, PerformanceTable};
