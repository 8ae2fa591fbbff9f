// # porkbun-ddns - Porkbun dynamic DNS updater
//
// This binary is a THIN integration layer: flags, configuration file,
// logging and exit codes. The update logic lives in ddns-core.
//
// ## Configuration
//
// Credentials and the domain are read from a flat JSON file, by default
// `$HOME/.porkbungo`:
//
// ```json
// { "domain": "example.com", "apikey": "pk1_...", "secretapikey": "sk1_..." }
// ```
//
// ## Example
//
// ```bash
// # List A and CNAME records
// porkbun-ddns --print A,CNAME
//
// # Point home.example.com at this host, unless https://home.example.com answers
// porkbun-ddns --dyndns --subdomain home --check-url https://home.example.com/
// ```

mod duration;

use anyhow::{Context, Result};
use clap::Parser;
use ddns_check_http::HttpProbe;
use ddns_core::{
    ClientConfig, DynDnsConfig, DynDnsUpdater, RecordFilter, RecordListing, SystemResolver,
    list_records_within,
};
use ddns_provider_porkbun::{ApiEndpoint, PorkbunClient};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

/// Exit codes for different termination scenarios
///
/// - 0: Success
/// - 1: Configuration or startup error
/// - 2: Runtime error (a fatal condition of the run)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DdnsExitCode {
    /// Run completed
    Success = 0,
    /// Configuration error or startup failure
    ConfigError = 1,
    /// Runtime error
    RuntimeError = 2,
}

impl From<DdnsExitCode> for ExitCode {
    fn from(code: DdnsExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Keep a Porkbun A record pointed at this host's public IP
#[derive(Debug, Parser)]
#[command(name = "porkbun-ddns", version, about)]
struct Cli {
    /// Comma-separated list of DNS record types (A, AAAA, CNAME, TXT, ...) to
    /// print. Set to "all" to print all records.
    #[arg(long, value_name = "TYPES")]
    print: Option<String>,

    /// Obtain the current public IP of this host and set it as the A record
    /// of the configured domain
    #[arg(long)]
    dyndns: bool,

    /// The subdomain to update in --dyndns mode. Leave empty to update the
    /// root domain.
    #[arg(long, default_value = "")]
    subdomain: String,

    /// Optional URL used by --dyndns to decide whether any update is needed.
    /// If a GET request to it returns any HTTP status, no records are updated.
    #[arg(long, value_name = "URL")]
    check_url: Option<String>,

    /// Timeout for all Porkbun requests combined (e.g. 60s, 1m30s, 500ms)
    #[arg(long, default_value = "60s", value_parser = duration::parse)]
    timeout: Duration,

    /// Configuration file [default: $HOME/.porkbungo]
    #[arg(long, env = "PORKBUN_CONFIG", value_name = "PATH")]
    config: Option<PathBuf>,

    /// Use the dual-stack API endpoint instead of the IPv4-only one
    #[arg(long)]
    dual_stack: bool,

    /// Log level: trace, debug, info, warn, error
    #[arg(long, env = "PORKBUN_LOG_LEVEL", default_value = "info", value_parser = parse_level)]
    log_level: Level,
}

impl Cli {
    /// Resolve the configuration file path
    fn config_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.config {
            return Ok(path.clone());
        }
        let home = std::env::var_os("HOME").context("HOME is not set; pass --config")?;
        Ok(PathBuf::from(home).join(".porkbungo"))
    }

    /// Settings for the update procedure
    fn dyndns_config(&self, domain: &str) -> DynDnsConfig {
        DynDnsConfig::new(domain)
            .with_subdomain(self.subdomain.clone())
            .with_check_url(self.check_url.clone())
            .with_timeout(self.timeout)
    }

    fn endpoint(&self) -> ApiEndpoint {
        if self.dual_stack {
            ApiEndpoint::DualStack
        } else {
            ApiEndpoint::Ipv4
        }
    }
}

fn parse_level(s: &str) -> std::result::Result<Level, String> {
    match s.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(format!(
            "'{}' is not valid. Valid levels: trace, debug, info, warn, error",
            s
        )),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.log_level)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return DdnsExitCode::ConfigError.into();
    }

    let config = match cli.config_path().and_then(|path| {
        let config = ClientConfig::load(&path)?;
        info!(
            "Read config from {}. Running for domain {:?}.",
            path.display(),
            config.domain
        );
        Ok(config)
    }) {
        Ok(config) => config,
        Err(e) => {
            error!("Cannot read config: {:#}", e);
            return DdnsExitCode::ConfigError.into();
        }
    };

    let client = match PorkbunClient::from_config(&config, cli.endpoint()) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            error!("Cannot create Porkbun client: {}", e);
            return DdnsExitCode::ConfigError.into();
        }
    };

    // One request at a time, so a single-threaded runtime is enough
    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return DdnsExitCode::RuntimeError.into();
        }
    };

    let result = rt.block_on(run(&cli, &config, client));
    match result {
        Ok(()) => DdnsExitCode::Success.into(),
        Err(e) => {
            error!("{:#}", e);
            DdnsExitCode::RuntimeError.into()
        }
    }
}

/// Dispatch the requested modes
async fn run(cli: &Cli, config: &ClientConfig, client: Arc<PorkbunClient>) -> Result<()> {
    let mut known_records = None;

    if let Some(types) = &cli.print {
        let listing = print_records(&client, &config.domain, types, cli.timeout).await?;
        known_records = Some(listing.records);
    }

    if cli.dyndns {
        let mut updater = DynDnsUpdater::new(
            client,
            Arc::new(SystemResolver::new()),
            cli.dyndns_config(&config.domain),
        );
        if updater.config().check_url.is_some() {
            updater = updater.with_probe(Arc::new(HttpProbe::new()?));
        }

        let outcome = updater
            .run(known_records.as_deref())
            .await
            .context("dyndns update failed")?;
        info!("dyndns finished: {:?}", outcome);
    }

    Ok(())
}

/// Retrieve, filter and print the records of `domain`
async fn print_records(
    client: &PorkbunClient,
    domain: &str,
    types: &str,
    timeout: Duration,
) -> Result<RecordListing> {
    let filter = RecordFilter::parse(types);

    let listing = list_records_within(client, domain, &filter, timeout)
        .await
        .context("RetrieveAll failed")?;

    info!("Your records:\n{}", listing.lines.join("\n"));
    Ok(listing)
}
