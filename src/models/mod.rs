pub mod verdict;
pub mod request;
pub mod mock;

pub use verdict::{AnalyzeResponse, ErrorBody, FeatureValue, KeySignal, RiskLevel, Verdict, VerdictLabel};
pub use request::{AnalysisRequest, CsvFile};
pub use mock::{InputKind, MockFeatures, MockResult, ModelPerformance, ScanInput};
