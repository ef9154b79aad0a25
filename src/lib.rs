pub mod core;
pub mod models;
pub mod input;
pub mod providers;
pub mod render;
pub mod utils;

pub use core::{AnalysisSession, RenderedResult, VerdictProvider};
pub use models::{AnalysisRequest, CsvFile, InputKind, MockResult, RiskLevel, Verdict};
pub use input::SubmissionForm;
pub use providers::{RemoteVerdictProvider, SyntheticProvider};
pub use render::{MockView, VerdictView};
pub use utils::{RadarConfig, RadarError, Result, ValidationError};
