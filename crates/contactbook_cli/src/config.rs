//! Startup configuration.
//!
//! # Responsibility
//! - Parse command-line flags with environment fallbacks.
//! - Resolve default database and log locations per platform.
//!
//! # Invariants
//! - Resolved paths are absolute.

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use contactbook_core::default_log_level;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

const DB_FILE_NAME: &str = "contactbook.sqlite3";
const LOG_DIR_NAME: &str = "logs";

/// Interactive contact book with upcoming-birthday reminders.
#[derive(Debug, Parser)]
#[command(name = "contactbook", version, about)]
pub struct Cli {
    /// SQLite file holding the address book snapshot.
    #[arg(long, env = "CONTACTBOOK_DB")]
    pub db: Option<PathBuf>,

    /// Directory for rolling log files.
    #[arg(long, env = "CONTACTBOOK_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Log level: trace|debug|info|warn|error.
    #[arg(long, env = "CONTACTBOOK_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Disable file logging.
    #[arg(long)]
    pub no_log: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub level: String,
    pub dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub logging: Option<LogConfig>,
}

impl AppConfig {
    /// Fills unset flags from platform defaults.
    pub fn resolve(cli: Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to read current directory")?;
        let data_dir = || -> Result<PathBuf> {
            ProjectDirs::from("", "", "contactbook")
                .map(|dirs| dirs.data_local_dir().to_path_buf())
                .ok_or_else(|| anyhow!("failed to determine a data directory; pass --db"))
        };

        let db_path = match cli.db {
            Some(path) => absolutize(&cwd, path),
            None => data_dir()?.join(DB_FILE_NAME),
        };

        let logging = if cli.no_log {
            None
        } else {
            let dir = match cli.log_dir {
                Some(path) => absolutize(&cwd, path),
                None => data_dir()?.join(LOG_DIR_NAME),
            };
            Some(LogConfig {
                level: cli
                    .log_level
                    .unwrap_or_else(|| default_log_level().to_string()),
                dir,
            })
        };

        Ok(Self { db_path, logging })
    }
}

fn absolutize(cwd: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        cwd.join(path)
    }
}
