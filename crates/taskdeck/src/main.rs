/*
[INPUT]:  CLI arguments, environment, optional YAML configuration file
[OUTPUT]: Terminal task list bound to one owner, or the missing-owner screen
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags, startup flow, or logging setup
*/

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::MakeWriterExt;

use taskdeck::tui::{self, LOG_BUFFER_CAPACITY, LogBuffer, LogBufferHandle, LogWriterFactory};
use taskdeck::{AppConfig, ConfigOverrides, StoreConfig, TaskStore};
use taskdeck_adapter::{TaskApi, TodoClient};

#[derive(Parser, Debug)]
#[command(name = "taskdeck", version, about = "Terminal todo list backed by a REST collection")]
struct Cli {
    #[arg(long = "config", value_name = "PATH")]
    config_path: Option<PathBuf>,
    #[arg(long = "owner-id", value_name = "ID", env = "TASKDECK_OWNER_ID")]
    owner_id: Option<u64>,
    #[arg(long = "api-url", value_name = "URL", env = "TASKDECK_API_URL")]
    api_url: Option<String>,
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info")]
    log_level: String,
    #[arg(long = "log-file", value_name = "PATH")]
    log_file: Option<PathBuf>,
    #[arg(long = "dry-run")]
    dry_run: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Cli::parse();

    if args.dry_run {
        init_stderr_tracing(&args.log_level)?;
        let config = load_config(&args)?;
        info!(
            owner_id = ?config.owner(),
            base_url = %config.api.base_url,
            "dry-run requested; configuration validated"
        );
        return Ok(());
    }

    let log_buffer: LogBufferHandle = Arc::new(Mutex::new(LogBuffer::new(LOG_BUFFER_CAPACITY)));
    let _file_guard = init_tui_tracing(&args.log_level, args.log_file.as_ref(), log_buffer.clone())?;

    let config = load_config(&args)?;
    let Some(owner_id) = config.owner() else {
        warn!("no owner id configured; showing warning screen");
        return tui::run_missing_owner().await;
    };

    let client = TodoClient::with_config_and_base_url(config.client_config(), &config.api.base_url)
        .context("create todo client")?;
    info!(base_url = %client.base_url(), owner_id = owner_id.get(), "starting taskdeck");

    let api: Arc<dyn TaskApi> = Arc::new(client);
    let store = TaskStore::new(
        api,
        StoreConfig {
            owner_id,
            error_dismiss: config.error_dismiss(),
        },
    );

    tui::run_tui(store, log_buffer).await
}

fn load_config(args: &Cli) -> Result<AppConfig> {
    let mut config = match args.config_path.as_ref() {
        Some(path) => AppConfig::from_file(path).context("load config")?,
        None => AppConfig::default(),
    };
    config.apply_overrides(&ConfigOverrides {
        owner_id: args.owner_id,
        api_url: args.api_url.clone(),
    });
    config.validate().context("validate config")?;
    Ok(config)
}

fn init_stderr_tracing(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(())
}

/// Logs go to the in-app panel, and to a file when one is given.
///
/// The returned guard flushes the file writer and must outlive the TUI.
fn init_tui_tracing(
    log_level: &str,
    log_file: Option<&PathBuf>,
    log_buffer: LogBufferHandle,
) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;
    let panel = LogWriterFactory::new(log_buffer);

    let Some(path) = log_file else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(panel)
            .try_init()
            .map_err(|err| anyhow!(err))
            .context("initialize tracing subscriber")?;
        return Ok(None);
    };

    let directory = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    let file_name = path
        .file_name()
        .context("log file path must name a file")?;
    let (file_writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(directory, file_name));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(panel.and(file_writer))
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(Some(guard))
}
