//! Drop and recreate the blog tables. Destroys all accounts and posts.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;
use std::io::{self, Write};
use std::path::PathBuf;

use blog::outbound::persistence::{Database, init_schema};
use blog::server::BlogSettings;
use clap::Parser;
use color_eyre::eyre::{Result, WrapErr, eyre};
use ortho_config::OrthoConfig;
use tokio::runtime::Builder;

/// `init-db` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "init-db",
    about = "Clear the existing data and create new tables",
    version
)]
struct CliArgs {
    /// SQLite file to reset. Falls back to `BLOG_DATABASE_PATH`, then
    /// `instance/blog.sqlite`.
    #[arg(long = "database", value_name = "path")]
    database: Option<PathBuf>,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = CliArgs::parse();

    let path = match args.database {
        Some(path) => path,
        None => BlogSettings::load_from_iter([OsString::from("init-db")])
            .map_err(|error| eyre!("load settings: {error}"))?
            .database_path(),
    };
    let database = Database::new(path);
    database
        .ensure_parent_dir()
        .wrap_err("create database directory")?;

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("create Tokio runtime")?;
    runtime
        .block_on(init_schema(&database))
        .wrap_err_with(|| format!("initialise {}", database.path().display()))?;

    writeln!(io::stdout(), "Initialized the database.").wrap_err("write to stdout")?;
    Ok(())
}
