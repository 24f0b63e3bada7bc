#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod cli;
mod dial_in;
mod error_fmt;
mod output;
mod records;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use barista_config::{Config, Logging};
use barista_core::{BrewDefaults, RetentionCfg};
use barista_store::{FileStore, Repository, StoreError};
use barista_traits::KeyValueStore;
use clap::Parser;
use eyre::WrapErr;
use serde_json::json;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Commands, FILE_GUARD, JSON_MODE, json_mode};
use crate::dial_in::{DialInArgs, SmartArgs, run_dial_in, run_smart};
use crate::error_fmt::{exit_code_for_error, format_error_json, humanize};
use crate::output::{emit, timestamp_ms};

const DEFAULT_DATA_DIR: &str = "barista-data";
const HEALTH_PROBE_KEY: &str = "barista-health-probe";

fn main() {
    let cli = Cli::parse();
    let _ = JSON_MODE.set(cli.json);
    let verbose = matches!(cli.log_level.as_str(), "debug" | "trace");
    if !cli.json {
        let _ = color_eyre::install();
    }

    if let Err(e) = run(cli) {
        let code = exit_code_for_error(&e);
        tracing::debug!(error = %e, code, "command failed");
        if json_mode() {
            eprintln!("{}", format_error_json(&e));
        } else {
            eprintln!("{}", humanize(&e));
            if verbose {
                eprintln!("{e:?}");
            }
        }
        std::process::exit(code);
    }
}

/// Missing file means defaults; a present file must parse and validate.
fn load_config(path: &Path) -> eyre::Result<(Config, bool)> {
    if !path.exists() {
        return Ok((Config::default(), false));
    }
    let text = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("read config {}", path.display()))?;
    let cfg = barista_config::load_toml(&text)
        .wrap_err_with(|| format!("parse config {}", path.display()))?;
    cfg.validate().wrap_err("invalid configuration")?;
    Ok((cfg, true))
}

fn console_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

fn init_tracing(json: bool, level: &str, logging: &Logging) -> eyre::Result<()> {
    let console_json = json.then(|| {
        fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_filter(console_filter(level))
    });
    let console_pretty = (!json).then(|| {
        fmt::layer()
            .compact()
            .with_target(false)
            .with_writer(std::io::stderr)
            .with_filter(console_filter(level))
    });

    let file_layer = match logging.file.as_deref() {
        Some(file) => {
            let path = Path::new(file);
            let dir = path
                .parent()
                .filter(|d| !d.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let name = path
                .file_name()
                .ok_or_else(|| eyre::eyre!("logging.file {file:?} has no file name"))?;
            let appender = match logging.rotation.as_deref() {
                Some("daily") => tracing_appender::rolling::daily(dir, name),
                Some("hourly") => tracing_appender::rolling::hourly(dir, name),
                _ => tracing_appender::rolling::never(dir, name),
            };
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let _ = FILE_GUARD.set(guard);
            let file_level = logging.level.as_deref().unwrap_or("info");
            Some(
                fmt::layer()
                    .json()
                    .with_writer(writer)
                    .with_filter(EnvFilter::new(file_level)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(console_json)
        .with(console_pretty)
        .with(file_layer)
        .try_init()
        .wrap_err("install tracing subscriber")?;
    Ok(())
}

fn run(cli: Cli) -> eyre::Result<()> {
    let (cfg, config_found) = load_config(&cli.config)?;
    init_tracing(cli.json, &cli.log_level, &cfg.logging)?;
    if !config_found {
        tracing::info!(path = %cli.config.display(), "config not found; using defaults");
    }

    let defaults = BrewDefaults::try_from(&cfg)?;
    let retention = RetentionCfg::from(&cfg);
    let data_dir: PathBuf = cli
        .data_dir
        .clone()
        .or_else(|| cfg.storage.data_dir.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
    tracing::debug!(data_dir = %data_dir.display(), "storage ready");
    let mut repo = Repository::new(FileStore::new(&data_dir)).with_retention(retention);

    match cli.cmd {
        Commands::DialIn {
            dose,
            yield_g,
            time,
            roast,
            category,
            min,
            max,
            no_save,
        } => run_dial_in(
            &mut repo,
            &defaults,
            DialInArgs {
                dose,
                yield_g,
                time,
                roast,
                category,
                min,
                max,
                no_save,
            },
        ),
        Commands::Smart { drink, roast, time } => {
            let shutdown = Arc::new(AtomicBool::new(false));
            if time.is_none() {
                let flag = shutdown.clone();
                ctrlc::set_handler(move || flag.store(true, Ordering::Relaxed))
                    .wrap_err("install Ctrl-C handler")?;
            }
            let args = SmartArgs {
                drink: drink.map(Into::into),
                roast,
                time,
            };
            run_smart(&repo, &defaults, args, shutdown)
        }
        Commands::History { limit, clear } => records::run_history(&mut repo, limit, clear),
        Commands::Beans(cmd) => records::run_beans(&mut repo, cmd),
        Commands::People(cmd) => records::run_people(&mut repo, cmd),
        Commands::Recipes(cmd) => records::run_recipes(&mut repo, cmd),
        Commands::Maintenance(cmd) => records::run_maintenance(&mut repo, cmd),
        Commands::Settings(cmd) => records::run_settings(&mut repo, &defaults, cmd),
        Commands::Roasteries(cmd) => records::run_roasteries(&mut repo, cmd),
        Commands::Health => run_health(&cli.config, config_found, &data_dir, &repo),
    }
}

/// Config parsed, data directory writable, stored documents readable.
fn run_health(
    config: &Path,
    config_found: bool,
    data_dir: &Path,
    repo: &Repository<FileStore>,
) -> eyre::Result<()> {
    let mut probe = FileStore::new(data_dir);
    probe
        .set(HEALTH_PROBE_KEY, "{}")
        .and_then(|()| probe.remove(HEALTH_PROBE_KEY))
        .map_err(StoreError::from)?;

    let history = repo.history()?.len();
    let beans = repo.beans()?.len();
    let filter_overdue = repo.is_filter_overdue()?;
    emit(
        json!({
            "timestamp": timestamp_ms(),
            "status": "ok",
            "config": config.display().to_string(),
            "config_found": config_found,
            "data_dir": data_dir.display().to_string(),
            "history_records": history,
            "saved_beans": beans,
            "filter_overdue": filter_overdue,
        }),
        || {
            println!("ok");
            println!(
                "config: {} ({})",
                config.display(),
                if config_found { "loaded" } else { "defaults" }
            );
            println!("data dir: {} (writable)", data_dir.display());
            println!("history: {history} records, beans: {beans}");
            if filter_overdue {
                println!("water filter overdue");
            }
        },
    );
    Ok(())
}
