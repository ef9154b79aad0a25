pub mod errors;
pub mod config;

pub use errors::{RadarError, ValidationError, Result};
pub use config::RadarConfig;
