use std::fmt;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::core::VerdictProvider;
use crate::input::{SubmissionForm, ValidatedInput};
use crate::models::{MockResult, Verdict};
use crate::providers::SyntheticProvider;
use crate::render::{MockView, VerdictView};
use crate::utils::{RadarError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Upload,
    Manual,
    ScanAddress,
    ScanTransaction,
}

/// A finished submission: the record as received plus its presentation
#[derive(Debug, Clone, PartialEq)]
pub enum RenderedResult {
    Verdict { record: Verdict, view: VerdictView },
    Mock { record: MockResult, view: MockView },
}

impl RenderedResult {
    pub fn from_verdict(record: Verdict) -> Self {
        let view = VerdictView::from(&record);
        RenderedResult::Verdict { record, view }
    }

    pub fn from_mock(record: MockResult) -> Self {
        let view = MockView::from(&record);
        RenderedResult::Mock { record, view }
    }

    pub fn record_json(&self) -> Result<String> {
        let json = match self {
            RenderedResult::Verdict { record, .. } => serde_json::to_string_pretty(record)?,
            RenderedResult::Mock { record, .. } => serde_json::to_string_pretty(record)?,
        };
        Ok(json)
    }
}

impl fmt::Display for RenderedResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderedResult::Verdict { view, .. } => fmt::Display::fmt(view, f),
            RenderedResult::Mock { view, .. } => fmt::Display::fmt(view, f),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    Idle,
    Submitting { ticket: u64 },
    ShowingResult(RenderedResult),
    ShowingError(String),
}

/// View state. Only the transition methods below change it.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    tab: Tab,
    phase: Phase,
}

impl ViewState {
    pub fn new(tab: Tab) -> Self {
        Self {
            tab,
            phase: Phase::Idle,
        }
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Submitting { .. })
    }

    pub fn result(&self) -> Option<&RenderedResult> {
        match &self.phase {
            Phase::ShowingResult(result) => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            Phase::ShowingError(message) => Some(message),
            _ => None,
        }
    }

    pub fn submit_start(&mut self, ticket: u64) {
        self.phase = Phase::Submitting { ticket };
    }

    pub fn submit_success(&mut self, result: RenderedResult) {
        self.phase = Phase::ShowingResult(result);
    }

    pub fn submit_failure(&mut self, message: impl Into<String>) {
        self.phase = Phase::ShowingError(message.into());
    }

    /// Leaving a tab abandons whatever it was loading; results and errors stay visible
    pub fn switch_tab(&mut self, tab: Tab) {
        let changed = tab != self.tab;
        self.tab = tab;
        if changed && self.is_loading() {
            self.phase = Phase::Idle;
        }
    }

    pub fn dismiss_error(&mut self) {
        if matches!(self.phase, Phase::ShowingError(_)) {
            self.phase = Phase::Idle;
        }
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(Tab::Upload)
    }
}

/// Identifies one submission. Only the newest ticket may update the view.
#[derive(Debug, Clone)]
pub struct Ticket {
    id: u64,
    cancel: CancellationToken,
}

impl Ticket {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn cancel_token(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

/// Drives Collect → Validate → Request → Normalize-or-Error → Render for one front end
pub struct AnalysisSession {
    provider: Arc<dyn VerdictProvider>,
    simulator: Arc<SyntheticProvider>,
    state: ViewState,
    next_ticket: u64,
    current: Option<Ticket>,
}

impl AnalysisSession {
    pub fn new(provider: Arc<dyn VerdictProvider>) -> Self {
        Self {
            provider,
            simulator: Arc::new(SyntheticProvider::default()),
            state: ViewState::default(),
            next_ticket: 0,
            current: None,
        }
    }

    pub fn with_simulator(mut self, simulator: Arc<SyntheticProvider>) -> Self {
        self.simulator = simulator;
        self
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn provider(&self) -> Arc<dyn VerdictProvider> {
        self.provider.clone()
    }

    pub fn simulator(&self) -> Arc<SyntheticProvider> {
        self.simulator.clone()
    }

    /// Start a submission. Any earlier ticket is cancelled and can no longer complete.
    pub fn begin(&mut self) -> Ticket {
        self.invalidate_current();

        self.next_ticket += 1;
        let ticket = Ticket {
            id: self.next_ticket,
            cancel: CancellationToken::new(),
        };

        tracing::debug!("Submission #{} started", ticket.id);

        self.state.submit_start(ticket.id);
        self.current = Some(ticket.clone());
        ticket
    }

    /// Apply an outcome if `ticket` is still the current one. Returns whether it applied.
    pub fn complete(&mut self, ticket: &Ticket, outcome: Result<RenderedResult>) -> bool {
        let is_current = self.current.as_ref().map(|t| t.id) == Some(ticket.id);
        if !is_current {
            tracing::debug!("Discarding stale completion of submission #{}", ticket.id);
            return false;
        }
        self.current = None;

        match outcome {
            Ok(result) => {
                tracing::info!("Submission #{} succeeded", ticket.id);
                self.state.submit_success(result);
            }
            Err(e) => {
                tracing::warn!("Submission #{} failed: {}", ticket.id, e);
                self.state.submit_failure(e.to_string());
            }
        }
        true
    }

    /// Validate and run one submission to completion
    pub async fn submit(&mut self, form: &SubmissionForm) -> &ViewState {
        let input = match form.validate() {
            Ok(input) => input,
            Err(e) => {
                tracing::info!("Submission rejected: {}", e);
                self.invalidate_current();
                self.state.submit_failure(RadarError::from(e).to_string());
                return &self.state;
            }
        };

        let ticket = self.begin();
        let outcome = execute(
            self.provider.as_ref(),
            self.simulator.as_ref(),
            input,
            ticket.cancel_token(),
        )
        .await;
        self.complete(&ticket, outcome);

        &self.state
    }

    pub fn switch_tab(&mut self, tab: Tab) {
        if tab != self.state.tab() {
            self.invalidate_current();
        }
        self.state.switch_tab(tab);
    }

    pub fn dismiss_error(&mut self) {
        self.state.dismiss_error();
    }

    fn invalidate_current(&mut self) {
        if let Some(previous) = self.current.take() {
            tracing::debug!("Cancelling submission #{}", previous.id);
            previous.cancel.cancel();
        }
    }
}

/// Run a validated input against the right provider, honouring cancellation
pub async fn execute(
    provider: &dyn VerdictProvider,
    simulator: &SyntheticProvider,
    input: ValidatedInput,
    cancel: &CancellationToken,
) -> Result<RenderedResult> {
    match input {
        ValidatedInput::Remote(request) => {
            tracing::info!("Submitting {} request via {}", request.kind(), provider.name());
            let verdict = tokio::select! {
                _ = cancel.cancelled() => return Err(RadarError::Cancelled),
                verdict = provider.submit(&request) => verdict?,
            };
            Ok(RenderedResult::from_verdict(verdict))
        }
        ValidatedInput::Scan(scan) => {
            let result = simulator.simulate(&scan, cancel).await?;
            Ok(RenderedResult::from_mock(result))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AnalysisRequest, InputKind, KeySignal, RiskLevel};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct FixedProvider {
        verdict: Verdict,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl VerdictProvider for FixedProvider {
        fn name(&self) -> &'static str {
            "fixed"
        }

        async fn submit(&self, _request: &AnalysisRequest) -> Result<Verdict> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.verdict.clone())
        }
    }

    struct FailingProvider;

    #[async_trait]
    impl VerdictProvider for FailingProvider {
        fn name(&self) -> &'static str {
            "failing"
        }

        async fn submit(&self, _request: &AnalysisRequest) -> Result<Verdict> {
            Err(RadarError::Request("Không thể phân tích dữ liệu JSON.".into()))
        }
    }

    fn fixed() -> Arc<FixedProvider> {
        Arc::new(FixedProvider {
            verdict: Verdict::new(RiskLevel::Low, 0.1, "ok")
                .with_signal(KeySignal::new("gift_ratio", "Gift", 0.2)),
            calls: AtomicUsize::new(0),
        })
    }

    fn instant_simulator() -> Arc<SyntheticProvider> {
        Arc::new(SyntheticProvider::new(Duration::ZERO, Some(9)))
    }

    #[tokio::test]
    async fn test_successful_submission() {
        let provider = fixed();
        let mut session = AnalysisSession::new(provider.clone());

        let state = session.submit(&SubmissionForm::Payload { text: "{}".into() }).await;

        match state.result() {
            Some(RenderedResult::Verdict { view, .. }) => assert_eq!(view.percent, "10%"),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_invalid_json_never_reaches_provider() {
        let provider = fixed();
        let mut session = AnalysisSession::new(provider.clone());

        let state = session.submit(&SubmissionForm::Payload { text: "{bad".into() }).await;

        assert_eq!(state.error(), Some("Dữ liệu JSON không hợp lệ. Kiểm tra lại định dạng."));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_provider_failure_shown_as_error() {
        let mut session = AnalysisSession::new(Arc::new(FailingProvider));

        let state = session.submit(&SubmissionForm::Payload { text: "{}".into() }).await;
        assert_eq!(state.error(), Some("Không thể phân tích dữ liệu JSON."));

        session.dismiss_error();
        assert_eq!(session.state().phase(), &Phase::Idle);
    }

    #[test]
    fn test_stale_ticket_is_ignored() {
        let mut session = AnalysisSession::new(fixed());

        let first = session.begin();
        let second = session.begin();
        assert!(first.is_cancelled());
        assert!(!second.is_cancelled());

        let late = RenderedResult::from_verdict(Verdict::new(RiskLevel::High, 0.9, "old"));
        assert!(!session.complete(&first, Ok(late)));
        assert_eq!(session.state().phase(), &Phase::Submitting { ticket: second.id() });

        let fresh = RenderedResult::from_verdict(Verdict::new(RiskLevel::Low, 0.2, "new"));
        assert!(session.complete(&second, Ok(fresh)));
        match session.state().result() {
            Some(RenderedResult::Verdict { record, .. }) => assert_eq!(record.summary, "new"),
            other => panic!("unexpected {:?}", other),
        }

        // Completing twice is a no-op
        assert!(!session.complete(&second, Err(RadarError::Cancelled)));
    }

    #[test]
    fn test_tab_switch_cancels_in_flight() {
        let mut session = AnalysisSession::new(fixed());
        let ticket = session.begin();

        session.switch_tab(Tab::ScanAddress);

        assert!(ticket.is_cancelled());
        assert_eq!(session.state().tab(), Tab::ScanAddress);
        assert_eq!(session.state().phase(), &Phase::Idle);
        assert!(!session.complete(&ticket, Err(RadarError::Cancelled)));
    }

    #[tokio::test]
    async fn test_scan_uses_simulator() {
        let provider = fixed();
        let mut session = AnalysisSession::new(provider.clone()).with_simulator(instant_simulator());

        let form = SubmissionForm::Scan {
            kind: InputKind::Address,
            text: format!("0x{}", "f".repeat(40)),
        };
        let state = session.submit(&form).await;

        assert!(matches!(state.result(), Some(RenderedResult::Mock { .. })));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_validation_error_replaces_result() {
        let mut session = AnalysisSession::new(fixed());
        session.submit(&SubmissionForm::Payload { text: "{}".into() }).await;

        let state = session
            .submit(&SubmissionForm::Upload { address: "".into(), file: None })
            .await;

        assert_eq!(state.error(), Some("Vui lòng nhập địa chỉ ví cần phân tích."));
        assert!(!state.is_loading());
    }
}
