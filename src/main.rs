use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tokio::task::JoinSet;
use tracing::{error, info, warn};

use crpt_gateway::app::{ApiEndpoint, SubmitUseCase};
use crpt_gateway::config::Config;
use crpt_gateway::constants::DEFAULT_CONFIG_PATH;
use crpt_gateway::domain::Document;
use crpt_gateway::infra::ReqwestHttp;
use crpt_gateway::observability::{self, metrics};
use crpt_gateway::pipeline::{document_format, ApiResponse, CommissioningRules, DocumentValidator, RateGate, ResponseBody};

#[derive(Parser)]
#[command(name = "crpt_gateway")]
#[command(about = "Rate-limited submission of goods-commissioning documents to the CRPT API")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit documents through the shared rate gate
    Submit {
        /// Document JSON files (repeatable); submitted concurrently
        #[arg(long = "document", required = true)]
        documents: Vec<PathBuf>,
        /// File holding the detached signature, sent byte-for-byte (trailing newline included)
        #[arg(long)]
        signature: PathBuf,
        /// Configuration file
        #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,
    },
    /// Check documents against the commissioning rules without sending them
    Validate {
        #[arg(long = "document", required = true)]
        documents: Vec<PathBuf>,
    },
    /// Print the effective configuration
    ShowConfig {
        #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,
    },
}

fn read_document(path: &Path) -> Result<Document> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read document '{}'", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Invalid document JSON in '{}'", path.display()))
}

/// Parses every file up front so a bad one aborts the run before anything is sent
fn read_documents(paths: Vec<PathBuf>) -> Result<Vec<(PathBuf, Document)>> {
    paths
        .into_iter()
        .map(|path| read_document(&path).map(|document| (path, document)))
        .collect()
}

fn build_use_case(config: &Config) -> Result<SubmitUseCase> {
    let gate = RateGate::new(config.rate_limit.time_unit, config.rate_limit.request_limit)?;
    let http = ReqwestHttp::new(config.api.timeout())?;
    Ok(SubmitUseCase::with_default_validator(
        Arc::new(gate),
        Box::new(http),
        ApiEndpoint::from_config(&config.api),
    ))
}

async fn run_submit(documents: Vec<PathBuf>, signature: PathBuf, config: Config) -> Result<()> {
    if let Some(listen) = config.metrics.listen {
        if let Err(e) = metrics::init(listen) {
            warn!("Metrics disabled: {}", e);
        }
    }

    let signature = std::fs::read_to_string(&signature)
        .with_context(|| format!("Failed to read signature '{}'", signature.display()))?;
    let signature = Arc::new(signature);

    let documents = read_documents(documents)?;

    let use_case = Arc::new(build_use_case(&config)?);

    // Ctrl-C stops the run: the in-flight request finishes, everything queued is refused
    {
        let use_case = use_case.clone();
        tokio::spawn(async move {
            while tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupt received, refusing queued submissions");
                use_case.gate().interrupt();
            }
        });
    }

    let mut tasks = JoinSet::new();
    for (path, document) in documents {
        let use_case = use_case.clone();
        let signature = signature.clone();
        tasks.spawn(async move {
            let result = use_case.submit(&document, &signature).await;
            (path, result)
        });
    }

    let total = tasks.len();
    let mut failed = 0;
    while let Some(joined) = tasks.join_next().await {
        let (path, result) = joined.context("Submission task panicked")?;
        match result {
            Ok(ApiResponse::Success(ResponseBody::Text(body))) => {
                println!("✅ {}: {}", path.display(), body);
            }
            Ok(ApiResponse::Success(ResponseBody::Empty)) => {
                println!("✅ {}: (no body)", path.display());
            }
            Ok(ApiResponse::Failure(payload)) => {
                failed += 1;
                println!("❌ {} (HTTP {}):\n{}", path.display(), payload.status, payload.to_pretty_json());
            }
            Err(e) => {
                failed += 1;
                error!(document = %path.display(), "Submission failed: {}", e);
                println!("❌ {}: {}", path.display(), e);
            }
        }
    }

    let snapshot = use_case.gate().snapshot().await;
    info!(
        used = snapshot.request_count,
        remaining = snapshot.remaining(),
        "Request quota after run"
    );

    if failed > 0 {
        bail!("{} of {} submissions failed", failed, total);
    }
    Ok(())
}

fn run_validate(documents: Vec<PathBuf>) -> Result<()> {
    let rules = CommissioningRules::new();
    let mut invalid = 0;

    for path in &documents {
        let checked = read_document(path).and_then(|document| {
            rules.validate(&document)?;
            Ok(document_format(&document)?)
        });
        match checked {
            Ok(format) => println!("✅ {}: valid ({})", path.display(), format),
            Err(e) => {
                invalid += 1;
                println!("❌ {}: {:#}", path.display(), e);
            }
        }
    }

    if invalid > 0 {
        bail!("{} of {} documents are invalid", invalid, documents.len());
    }
    Ok(())
}

fn load_config(path: &Path) -> Result<Config> {
    Config::load(path).with_context(|| format!("Failed to load configuration from '{}'", path.display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let _log_guard = observability::init_logging();

    let cli = Cli::parse();

    match cli.command {
        Commands::Submit { documents, signature, config } => {
            let config = load_config(&config)?;
            run_submit(documents, signature, config).await?;
        }
        Commands::Validate { documents } => {
            run_validate(documents)?;
        }
        Commands::ShowConfig { config } => {
            let config = load_config(&config)?;
            println!("api.url             = {}", config.api.url);
            println!("api.token           = {}", config.api.masked_token());
            println!("api.timeout_seconds = {}", config.api.timeout_seconds);
            println!("rate_limit          = {} per {:?}", config.rate_limit.request_limit, config.rate_limit.time_unit);
            match config.metrics.listen {
                Some(addr) => println!("metrics.listen      = {}", addr),
                None => println!("metrics.listen      = (disabled)"),
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_DOCUMENT: &str = include_str!("../samples/commissioning_document.json");

    #[test]
    fn test_read_documents_keeps_order() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first.json");
        let second = dir.path().join("second.json");
        std::fs::write(&first, SAMPLE_DOCUMENT).unwrap();
        std::fs::write(&second, SAMPLE_DOCUMENT).unwrap();

        let documents = read_documents(vec![first.clone(), second.clone()]).unwrap();
        let paths: Vec<&PathBuf> = documents.iter().map(|(path, _)| path).collect();
        assert_eq!(paths, vec![&first, &second]);
    }

    #[test]
    fn test_bad_document_fails_the_whole_batch() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.json");
        let broken = dir.path().join("broken.json");
        std::fs::write(&good, SAMPLE_DOCUMENT).unwrap();
        std::fs::write(&broken, "{ not json").unwrap();

        let err = read_documents(vec![good, broken, dir.path().join("missing.json")]).unwrap_err();
        assert!(format!("{:#}", err).contains("broken.json"));
    }
}
