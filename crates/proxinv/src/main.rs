//! proxinv
//!
//! Ansible dynamic inventory for Proxmox VE clusters

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::{Arc, LazyLock};

use clap::Parser;
use eyre::WrapErr;
use proxinv_client::ProxmoxClient;
use proxinv_inventory::{InventoryAssembler, InventoryMeta, to_pretty_json};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

mod config;

use config::Config;

static LONG_VERSION: LazyLock<String> = LazyLock::new(|| {
    long_version(
        option_env!("PROXINV_GIT_SHA"),
        option_env!("PROXINV_BUILD_DATE"),
    )
});

/// Package version followed by the git revision and build date, when known
fn long_version(sha: Option<&str>, date: Option<&str>) -> String {
    let version = env!("CARGO_PKG_VERSION");
    match (sha, date) {
        (Some(sha), Some(date)) => format!("{version} ({sha} {date})"),
        (Some(extra), None) | (None, Some(extra)) => format!("{version} ({extra})"),
        (None, None) => version.to_string(),
    }
}

/// Ansible dynamic inventory for Proxmox VE
#[derive(Parser, Debug)]
#[command(name = "proxinv", version, long_version = LONG_VERSION.as_str(), about)]
struct Args {
    /// Print the whole inventory (always on)
    #[arg(long, default_value_t = true)]
    list: bool,

    /// Print the variables of a single host
    #[arg(long, value_name = "NAME")]
    host: Option<String>,

    /// Configuration file
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(err) = color_eyre::install() {
        eprintln!("{}", error_line(&err));
        return ExitCode::FAILURE;
    }

    let args = Args::parse();

    match run(args).await {
        Ok(document) => {
            print!("{document}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{}", error_line(&err));
            ExitCode::FAILURE
        }
    }
}

/// The report and its causes on a single line
fn error_line(err: &eyre::Report) -> String {
    format!("error: {err:#}")
}

async fn run(args: Args) -> eyre::Result<String> {
    let path = args.config.clone().or_else(config::locate);
    let config = match &path {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    init_tracing(log_level(args.verbose, &config.log_level));

    match &path {
        Some(path) => info!(path = %path.display(), "loaded configuration"),
        None => warn!("no configuration file found"),
    }
    debug!(list = args.list, host = ?args.host, "parsed arguments");

    config.proxmox.validate()?;

    if let Some(host) = &args.host {
        let vars = InventoryMeta::default().host_vars(host);
        return to_pretty_json(&vars).wrap_err("failed to serialize host variables");
    }

    let client = ProxmoxClient::new(&config.proxmox.api)?;
    let assembler = InventoryAssembler::new(Arc::new(client), config.proxmox.exclusions());

    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupted, cancelling requests");
            on_signal.cancel();
        }
    });

    let inventory = assembler.assemble(&cancel).await?;
    Ok(inventory.to_json_pretty()?)
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    // A subscriber may already be installed when run more than once per process
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Log level from the `-v` count, falling back to the configured one
fn log_level(verbose: u8, configured: &str) -> &str {
    match verbose {
        0 => configured,
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
