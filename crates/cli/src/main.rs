//! # cloudmap
//!
//! Resolve domains through a pool of nameservers and flag the addresses that
//! sit inside a cloud provider's published ranges.

mod bootstrap;
mod output;

use anyhow::bail;
use clap::Parser;
use cloudmap_application::services::CloudClassifier;
use cloudmap_application::use_cases::ClassifyDomainsUseCase;
use cloudmap_domain::CliOverrides;
use cloudmap_infrastructure::dns::NameserverResolver;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "cloudmap")]
#[command(version)]
#[command(about = "Resolve domains and spot the ones hosted in cloud provider ranges")]
struct Cli {
    /// File containing domains to look up, one per line
    #[arg(long = "df", visible_alias = "domains", value_name = "FILE")]
    domains: Option<PathBuf>,

    /// File containing nameservers to use for lookups
    #[arg(
        long = "nf",
        visible_alias = "nameservers",
        value_name = "FILE",
        default_value = "nameservers.txt"
    )]
    nameservers: PathBuf,

    /// Output file (JSON)
    #[arg(short = 'o', long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Download the provider IP ranges and rewrite the cache file
    #[arg(short = 'u', long)]
    update: bool,

    /// Path to configuration file
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Per-lookup timeout in milliseconds
    #[arg(long, value_name = "MS")]
    timeout: Option<u64>,

    /// Maximum lookups in flight (0 = unbounded)
    #[arg(long, value_name = "N")]
    concurrency: Option<usize>,

    /// Provider range cache file
    #[arg(long, value_name = "FILE")]
    cache_file: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            query_timeout: self.timeout,
            max_concurrent_lookups: self.concurrency,
            cache_file: self.cache_file.clone(),
            log_level: self.log_level.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = bootstrap::load_config(cli.config.as_deref(), cli.overrides())?;
    bootstrap::init_logging(&config);
    bootstrap::log_config_summary(&config, cli.config.as_deref());

    if cli.domains.is_none() && !cli.update {
        bail!("nothing to do: pass --df <FILE> with domains to look up, or --update");
    }

    let table = bootstrap::load_provider_table(&config, cli.update).await?;

    let Some(domains_path) = cli.domains else {
        info!("Provider ranges updated, no domains to look up");
        return Ok(());
    };

    let nameservers = bootstrap::read_list(&cli.nameservers)?;
    let domains = bootstrap::read_list(&domains_path)?;

    let cancellation = CancellationToken::new();
    let on_signal = cancellation.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling outstanding lookups");
            on_signal.cancel();
        }
    });

    let resolver = Arc::new(NameserverResolver::from_config(&config.dns));
    let classifier = Arc::new(CloudClassifier::new(Arc::new(table)));
    let use_case = ClassifyDomainsUseCase::new(resolver, classifier)
        .with_concurrency_limit(config.dns.max_concurrent_lookups)
        .with_cancellation(cancellation);

    let (tx, rx) = mpsc::channel(256);
    let printer = tokio::spawn(output::drain(rx, cli.output.is_some()));

    let summary = use_case.execute(domains, &nameservers, tx).await?;
    let records = printer.await?;

    if let Some(path) = &cli.output {
        output::json::write_records(path, &records)?;
        info!(path = %path.display(), records = records.len(), "Results written");
    }

    info!(
        domains = summary.domains,
        resolved = summary.resolved,
        failed = summary.failed,
        cloud_addresses = summary.cloud_addresses,
        elapsed_ms = summary.elapsed_ms,
        "Done"
    );

    Ok(())
}
