pub mod remote;
pub mod synthetic;
pub mod performance;

pub use remote::RemoteVerdictProvider;
pub use synthetic::SyntheticProvider;
pub use performance::MODEL_PERFORMANCE;
