use std::env;
use std::time::Duration;
use url::Url;

use crate::utils::{RadarError, Result};

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_SIM_DELAY_MS: u64 = 2000;

/// Runtime settings shared by the providers and the CLI
#[derive(Debug, Clone)]
pub struct RadarConfig {
    pub api_url: Url,
    pub timeout: Duration,
    pub simulated_delay: Duration,
    pub seed: Option<u64>,
}

impl RadarConfig {
    pub fn new(api_url: &str) -> Result<Self> {
        Ok(Self {
            api_url: parse_base_url(api_url)?,
            ..Self::default()
        })
    }

    /// Read `SCAM_RADAR_*` variables, after loading `.env` if one exists
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();

        let mut config = Self::default();

        if let Ok(url) = env::var("SCAM_RADAR_API_URL") {
            config.api_url = parse_base_url(&url)?;
        }
        if let Ok(secs) = env::var("SCAM_RADAR_TIMEOUT_SECS") {
            config.timeout = Duration::from_secs(parse_number("SCAM_RADAR_TIMEOUT_SECS", &secs)?);
        }
        if let Ok(ms) = env::var("SCAM_RADAR_SIM_DELAY_MS") {
            config.simulated_delay =
                Duration::from_millis(parse_number("SCAM_RADAR_SIM_DELAY_MS", &ms)?);
        }
        if let Ok(seed) = env::var("SCAM_RADAR_SEED") {
            config.seed = Some(parse_number("SCAM_RADAR_SEED", &seed)?);
        }

        tracing::debug!("Loaded config: {:?}", config);
        Ok(config)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_simulated_delay(mut self, delay: Duration) -> Self {
        self.simulated_delay = delay;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Resolve an API path against the base URL
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        self.api_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| RadarError::Config(format!("Invalid endpoint {}: {}", path, e)))
    }
}

impl Default for RadarConfig {
    fn default() -> Self {
        Self {
            // constant literal, always parses
            api_url: Url::parse(DEFAULT_API_URL).expect("default API URL"),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            simulated_delay: Duration::from_millis(DEFAULT_SIM_DELAY_MS),
            seed: None,
        }
    }
}

/// Base URLs always end with `/` so `join` keeps any path prefix
fn parse_base_url(raw: &str) -> Result<Url> {
    let mut raw = raw.trim().to_string();
    if !raw.ends_with('/') {
        raw.push('/');
    }
    Url::parse(&raw).map_err(|e| RadarError::Config(format!("Invalid API URL '{}': {}", raw, e)))
}

fn parse_number(name: &str, value: &str) -> Result<u64> {
    value
        .trim()
        .parse()
        .map_err(|_| RadarError::Config(format!("{} must be a number, got '{}'", name, value)))
}
