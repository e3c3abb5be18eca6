//! Admin CLI for tenant CDN provisioning.
//!
//! Provisions, invalidates and tears down per-tenant CloudFront distributions
//! against the AWS account in the environment, and dry-runs the edge router.
//! Records are kept in a local `SQLite` database.

mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "tenant-cdn", version)]
#[command(about = "Provision and manage per-tenant CDN distributions", long_about = None)]
struct Cli {
    /// JSON settings file; `TENANT_CDN_*` environment variables are used when omitted
    #[arg(short, long, env = "TENANT_CDN_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Record database path
    #[arg(long, env = "TENANT_CDN_DB", global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Get or create the tenant's distribution
    Provision {
        tenant_id: String,
        /// Wait up to this many seconds for the alias record to propagate
        #[arg(long, value_name = "SECS")]
        wait_dns: Option<u64>,
    },
    /// Invalidate the tenant's cached deployment
    Invalidate {
        tenant_id: String,
        /// Only invalidate this build and the current alias
        #[arg(long)]
        build: Option<String>,
    },
    /// Remove the alias record and disable the tenant's distribution
    Teardown { tenant_id: String },
    /// Show one tenant (refreshed from the control plane) or list all records
    Status { tenant_id: Option<String> },
    /// Check DNS automation settings and probe the hosted zone
    DnsCheck,
    /// Show how the edge router maps a request
    Route {
        host: String,
        #[arg(default_value = "/")]
        uri: String,
        /// Overrides the configured base domain
        #[arg(long)]
        base_domain: Option<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr, stdout carries JSON output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time()
                .with_ansi(false),
        )
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let cli = Cli::parse();

    match commands::run(cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
