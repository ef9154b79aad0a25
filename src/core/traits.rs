use async_trait::async_trait;
use crate::models::{AnalysisRequest, Verdict};
use crate::utils::Result;

/// Core abstraction: anything that turns a validated request into a verdict
#[async_trait]
pub trait VerdictProvider: Send + Sync {
    /// Unique identifier for this provider
    fn name(&self) -> &'static str;

    /// Submit one request and return the verdict, or a user-facing error
    async fn submit(&self, request: &AnalysisRequest) -> Result<Verdict>;
}
