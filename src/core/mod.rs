pub mod traits;
pub mod session;

pub use traits::VerdictProvider;
pub use session::{AnalysisSession, Phase, RenderedResult, Tab, Ticket, ViewState, execute};
