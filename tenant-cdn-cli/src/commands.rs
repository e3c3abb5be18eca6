//! 子命令实现

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use serde::Serialize;
use tenant_cdn_app::adapters::SqliteStore;
use tenant_cdn_app::{AppState, AppStateBuilder};
use tenant_cdn_core::CdnSettings;
use tenant_cdn_edge::RouterConfig;
use tenant_cdn_provider::create_aws_providers;

use crate::{Cli, Commands};

const DB_FILE_NAME: &str = "records.db";

pub async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let settings = load_settings(cli.config.as_deref())?;

    // 路由预览不需要控制面
    if let Commands::Route {
        host,
        uri,
        base_domain,
    } = &cli.command
    {
        return route(&settings, host, uri, base_domain.as_deref());
    }

    let state = build_state(settings, cli.db).await?;

    match cli.command {
        Commands::Provision {
            tenant_id,
            wait_dns,
        } => provision(&state, &tenant_id, wait_dns).await,
        Commands::Invalidate { tenant_id, build } => {
            match state
                .provisioner
                .invalidate_cache(&tenant_id, build.as_deref())
                .await
            {
                Some(id) => {
                    print_json(&serde_json::json!({ "tenantId": tenant_id, "invalidationId": id }))?;
                    Ok(ExitCode::SUCCESS)
                }
                None => {
                    tracing::warn!("No invalidation created for tenant {tenant_id}");
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        Commands::Teardown { tenant_id } => {
            let disabled = state.provisioner.delete(&tenant_id).await;
            print_json(&serde_json::json!({ "tenantId": tenant_id, "disabled": disabled }))?;
            Ok(exit_code(disabled))
        }
        Commands::Status { tenant_id: Some(tenant_id) } => {
            let result = state
                .provisioner
                .refresh_status(&tenant_id)
                .await
                .with_context(|| format!("failed to refresh tenant {tenant_id}"))?;
            match result {
                Some(result) => {
                    print_json(&result)?;
                    Ok(ExitCode::SUCCESS)
                }
                None => {
                    tracing::warn!("Tenant {tenant_id} has no distribution");
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        Commands::Status { tenant_id: None } => {
            let records = state.list_records().await.context("failed to list records")?;
            print_json(&records)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::DnsCheck => {
            let report = state.check_configuration().await;
            print_json(&report)?;
            Ok(exit_code(report.errors.is_empty()))
        }
        Commands::Route { .. } => Ok(ExitCode::SUCCESS),
    }
}

fn load_settings(path: Option<&Path>) -> anyhow::Result<CdnSettings> {
    match path {
        Some(path) => CdnSettings::from_json_file(path)
            .with_context(|| format!("failed to load settings from {}", path.display())),
        None => Ok(CdnSettings::from_env()),
    }
}

async fn build_state(settings: CdnSettings, db: Option<PathBuf>) -> anyhow::Result<AppState> {
    let db_path = db.unwrap_or_else(default_db_path);
    let store = SqliteStore::new(&db_path)
        .await
        .with_context(|| format!("failed to open record store {}", db_path.display()))?;
    tracing::info!("Record store: {}", db_path.display());

    let providers = create_aws_providers(settings.region.clone()).await;

    AppStateBuilder::new()
        .cdn_provider(providers.cdn)
        .dns_provider(providers.dns)
        .distribution_repository(Arc::new(store))
        .settings(settings)
        .build()
        .context("failed to build application state")
}

fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("tenant-cdn"))
        .unwrap_or_default()
        .join(DB_FILE_NAME)
}

async fn provision(
    state: &AppState,
    tenant_id: &str,
    wait_dns: Option<u64>,
) -> anyhow::Result<ExitCode> {
    let result = state
        .provisioner
        .get_or_create(tenant_id)
        .await
        .with_context(|| format!("failed to provision tenant {tenant_id}"))?;
    print_json(&result)?;

    let Some(secs) = wait_dns else {
        return Ok(ExitCode::SUCCESS);
    };

    let change_ref = state
        .ctx
        .distribution_repository
        .find_by_tenant(&tenant_id.trim().to_ascii_lowercase())
        .await
        .context("failed to read tenant record")?
        .and_then(|record| record.dns_change_ref);

    match change_ref {
        Some(change_ref) => {
            let in_sync = state
                .provisioner
                .dns()
                .wait_for_propagation(&change_ref, Duration::from_secs(secs))
                .await;
            if in_sync {
                tracing::info!("DNS change {change_ref} is in sync");
            } else {
                tracing::warn!("DNS change {change_ref} did not propagate within {secs}s");
            }
            Ok(exit_code(in_sync))
        }
        None => {
            tracing::info!("No DNS change to wait for");
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn route(
    settings: &CdnSettings,
    host: &str,
    uri: &str,
    base_domain: Option<&str>,
) -> anyhow::Result<ExitCode> {
    let config = RouterConfig {
        default_base_domain: settings.base_domain(),
        ..RouterConfig::default()
    };
    let decision = tenant_cdn_edge::route(host, uri, base_domain, &config);
    print_json(&decision)?;
    Ok(exit_code(decision.tenant_id.is_some()))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to encode output")?;
    println!("{json}");
    Ok(())
}

fn exit_code(ok: bool) -> ExitCode {
    if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}
