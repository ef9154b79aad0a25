use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use scam_radar::core::{AnalysisSession, RenderedResult, Tab};
use scam_radar::providers::MODEL_PERFORMANCE;
use scam_radar::render::PerformanceTable;
use scam_radar::{CsvFile, InputKind, RadarConfig, RemoteVerdictProvider, SubmissionForm, SyntheticProvider};

/// Web3 Scam Radar - phishing-risk verdicts for NFT/Web3 wallets
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Base URL of the scoring service
    #[arg(long, global = true, env = "SCAM_RADAR_API_URL")]
    api_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "SCAM_RADAR_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,

    /// Print the raw record as JSON instead of the report
    #[arg(long, global = true)]
    json: bool,

    /// Show verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze a wallet from a CSV export of its transactions
    Upload {
        /// Wallet address (0x...)
        #[arg(short, long, default_value = "")]
        address: String,

        /// Transaction CSV (from_address, to_address, value, token_value, function_call, timestamp...)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Send a JSON payload {address, transactions: [...]} as-is
    Payload {
        /// Read the payload from a file
        #[arg(short, long, conflicts_with = "text")]
        file: Option<PathBuf>,

        /// Payload text; stdin is read when neither --file nor --text is given
        #[arg(short, long)]
        text: Option<String>,
    },

    /// Simulated scan with fabricated results (no real inference)
    Simulate {
        /// What the input is
        #[arg(short, long, value_enum, default_value_t = KindArg::Address)]
        kind: KindArg,

        /// Address (0x + 40 hex) or transaction hash (0x + 64 hex)
        #[arg(value_name = "INPUT", default_value = "")]
        input: String,

        /// Seed for reproducible output
        #[arg(long, env = "SCAM_RADAR_SEED")]
        seed: Option<u64>,

        /// Simulated processing delay in milliseconds
        #[arg(long, env = "SCAM_RADAR_SIM_DELAY_MS")]
        delay_ms: Option<u64>,
    },

    /// Check that the scoring service is up
    Health,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum KindArg {
    Address,
    Transaction,
}

impl From<KindArg> for InputKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Address => InputKind::Address,
            KindArg::Transaction => InputKind::Transaction,
        }
    }
}

// Exit codes: 0 = verdict shown, 1 = input rejected, 2 = request failed,
// 3 = local failure (unreadable file, bad configuration)
const EXIT_OK: i32 = 0;
const EXIT_INVALID_INPUT: i32 = 1;
const EXIT_REQUEST_FAILED: i32 = 2;
const EXIT_LOCAL_FAILURE: i32 = 3;

#[tokio::main]
async fn main() {
    // Before clap, so `.env` values can fill `env = ...` arguments
    dotenv::dotenv().ok();
    let args = Args::parse();

    let filter = if args.verbose {
        "scam_radar=debug"
    } else {
        "scam_radar=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let outcome = run(args).await;
    if let Err(e) = &outcome {
        eprintln!("❌ {:#}", e);
    }
    std::process::exit(exit_code(&outcome));
}

fn exit_code(outcome: &Result<i32>) -> i32 {
    match outcome {
        Ok(code) => *code,
        Err(_) => EXIT_LOCAL_FAILURE,
    }
}

async fn run(args: Args) -> Result<i32> {
    let mut config = RadarConfig::from_env()?;
    if let Some(url) = &args.api_url {
        let base = RadarConfig::new(url)?;
        config.api_url = base.api_url;
    }
    if let Some(secs) = args.timeout_secs {
        config = config.with_timeout(Duration::from_secs(secs));
    }

    let (tab, form) = match args.command {
        Command::Health => return health(config).await,
        Command::Upload { address, file } => {
            let file = match file {
                Some(path) => Some(
                    CsvFile::from_path(&path).with_context(|| format!("Cannot read {}", path.display()))?,
                ),
                None => None,
            };
            (Tab::Upload, SubmissionForm::Upload { address, file })
        }
        Command::Payload { file, text } => {
            let text = match (file, text) {
                (Some(path), _) => std::fs::read_to_string(&path)
                    .with_context(|| format!("Cannot read {}", path.display()))?,
                (None, Some(text)) => text,
                (None, None) => {
                    let mut buf = String::new();
                    std::io::stdin().read_to_string(&mut buf)?;
                    buf
                }
            };
            (Tab::Manual, SubmissionForm::Payload { text })
        }
        Command::Simulate { kind, input, seed, delay_ms } => {
            if let Some(seed) = seed {
                config = config.with_seed(seed);
            }
            if let Some(ms) = delay_ms {
                config = config.with_simulated_delay(Duration::from_millis(ms));
            }
            let tab = match kind {
                KindArg::Address => Tab::ScanAddress,
                KindArg::Transaction => Tab::ScanTransaction,
            };
            (
                tab,
                SubmissionForm::Scan {
                    kind: kind.into(),
                    text: input,
                },
            )
        }
    };

    let rejected = form.validate().is_err();

    let provider = Arc::new(RemoteVerdictProvider::new(config.clone())?);
    let simulator = Arc::new(SyntheticProvider::from_config(&config));
    let mut session = AnalysisSession::new(provider).with_simulator(simulator);
    session.switch_tab(tab);

    if !rejected && matches!(tab, Tab::ScanAddress | Tab::ScanTransaction) {
        eprintln!("⏳ Simulating analysis...");
    }

    let state = session.submit(&form).await;

    if let Some(message) = state.error() {
        eprintln!("❌ {}", message);
        return Ok(if rejected { EXIT_INVALID_INPUT } else { EXIT_REQUEST_FAILED });
    }

    if let Some(result) = state.result() {
        if args.json {
            println!("{}", result.record_json()?);
        } else {
            println!("{}", result);
            if let RenderedResult::Mock { .. } = result {
                println!("═══ MODEL PERFORMANCE (static) ═══");
                print!("{}", PerformanceTable(MODEL_PERFORMANCE));
            }
        }
    }

    Ok(EXIT_OK)
}

async fn health(config: RadarConfig) -> Result<i32> {
    let provider = RemoteVerdictProvider::new(config)?;
    match provider.health().await {
        Ok(status) => {
            println!("✅ {} is {}", provider.config().api_url, status);
            Ok(EXIT_OK)
        }
        Err(e) => {
            eprintln!("❌ {} unreachable: {}", provider.config().api_url, e);
            Ok(EXIT_REQUEST_FAILED)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unreadable_upload_file_is_a_local_failure() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.csv");
        let args = Args::parse_from([
            "scam-radar",
            "upload",
            "--address",
            "0xabc",
            "--file",
            missing.to_str().unwrap(),
        ]);

        let outcome = run(args).await;
        assert!(outcome.is_err());
        assert_eq!(exit_code(&outcome), EXIT_LOCAL_FAILURE);
    }

    #[tokio::test]
    async fn test_unreadable_payload_file_is_a_local_failure() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        let args = Args::parse_from(["scam-radar", "payload", "--file", missing.to_str().unwrap()]);

        assert_eq!(exit_code(&run(args).await), EXIT_LOCAL_FAILURE);
    }

    #[tokio::test]
    async fn test_rejected_input_keeps_validation_code() {
        let args = Args::parse_from(["scam-radar", "payload", "--text", "{bad"]);

        let outcome = run(args).await;
        assert_eq!(exit_code(&outcome), EXIT_INVALID_INPUT);
    }

    #[tokio::test]
    async fn test_simulated_scan_exits_ok() {
        let args = Args::parse_from([
            "scam-radar",
            "simulate",
            "--kind",
            "address",
            "--seed",
            "7",
            "--delay-ms",
            "0",
            &format!("0x{}", "a".repeat(40)),
        ]);

        assert_eq!(exit_code(&run(args).await), EXIT_OK);
    }
}
