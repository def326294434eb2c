//! Contact book CLI entry point.
//!
//! # Responsibility
//! - Resolve configuration, start logging and open the snapshot database.
//! - Hand stdin/stdout to the interactive session.

mod commands;
mod config;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use config::{AppConfig, Cli};
use contactbook_core::db::open_db;
use contactbook_core::{core_version, init_logging, ContactService, SqliteAddressBookRepository};
use log::info;

fn main() -> Result<()> {
    let config = AppConfig::resolve(Cli::parse())?;

    if let Some(logging) = &config.logging {
        init_logging(&logging.level, &logging.dir)
            .map_err(|err| anyhow!("failed to initialize logging: {err}"))?;
    }

    if let Some(parent) = config.db_path.parent() {
        std::fs::create_dir_all(parent).with_context(|| {
            format!("failed to create data directory `{}`", parent.display())
        })?;
    }
    let conn = open_db(&config.db_path)
        .with_context(|| format!("failed to open `{}`", config.db_path.display()))?;
    let mut service = ContactService::open(SqliteAddressBookRepository::new(&conn))
        .context("failed to load address book")?;

    info!(
        "event=session_start module=cli status=ok contacts={}",
        service.book().len()
    );
    println!("Welcome to the contact book v{}!", core_version());

    let stdin = std::io::stdin();
    commands::run_session(&mut service, stdin.lock(), std::io::stdout(), || {
        chrono::Local::now().date_naive()
    })
}
