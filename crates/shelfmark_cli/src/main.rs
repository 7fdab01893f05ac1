//! Interactive catalog front-end.
//!
//! # Responsibility
//! - Resolve configuration from the environment.
//! - Wire logging, database, repository and service together, in that order.
//! - Hand control to the menu loop and exit with a meaningful status code.

mod menu;

use log::{error, info};
use shelfmark_core::{
    core_version, default_log_level, flush_logs, init_logging, open_db, CatalogService,
    SqliteBookRepository,
};
use std::path::PathBuf;
use std::process::ExitCode;

const DEFAULT_DB_PATH: &str = "shelfmark/catalog.db";
const DEFAULT_LOG_DIR: &str = "shelfmark/logs";

struct Config {
    db_path: PathBuf,
    log_level: String,
    log_dir: PathBuf,
}

fn config_from_env() -> Config {
    Config {
        db_path: PathBuf::from(env_or("SHELFMARK_DB", DEFAULT_DB_PATH)),
        log_level: env_or("SHELFMARK_LOG", default_log_level()),
        log_dir: PathBuf::from(env_or("SHELFMARK_LOG_DIR", DEFAULT_LOG_DIR)),
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn main() -> ExitCode {
    let config = config_from_env();

    if let Err(message) = init_logging(&config.log_level, &config.log_dir) {
        eprintln!("failed to initialize logging: {message}");
        return ExitCode::FAILURE;
    }

    println!(
        "shelfmark {} (catalog: {})",
        core_version(),
        config.db_path.display()
    );

    if let Some(parent) = config.db_path.parent() {
        if !parent.as_os_str().is_empty() {
            if let Err(err) = std::fs::create_dir_all(parent) {
                error!("event=cli_start module=cli status=error error_code=db_dir error={err}");
                eprintln!(
                    "failed to create database directory `{}`: {err}",
                    parent.display()
                );
                flush_logs();
                return ExitCode::FAILURE;
            }
        }
    }

    let conn = match open_db(&config.db_path) {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!(
                "failed to open catalog database `{}`: {err}",
                config.db_path.display()
            );
            flush_logs();
            return ExitCode::FAILURE;
        }
    };

    let repo = match SqliteBookRepository::try_new(&conn) {
        Ok(repo) => repo,
        Err(err) => {
            error!("event=cli_start module=cli status=error error_code=storage_unusable error={err}");
            eprintln!("catalog storage is not usable: {err}");
            flush_logs();
            return ExitCode::FAILURE;
        }
    };

    let service = CatalogService::new(repo);
    info!(
        "event=cli_start module=cli status=ok db={}",
        config.db_path.display()
    );

    menu::run(&service);

    info!("event=cli_exit module=cli status=ok");
    println!("goodbye.");
    flush_logs();
    ExitCode::SUCCESS
}
