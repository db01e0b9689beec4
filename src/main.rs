//! Interactive command interpreter with a ten-entry persistent history.
//!
//! Ctrl-C lists the history and, answered with `r`, re-runs the newest entry.

mod config;
mod error;
mod history;
mod interrupt;
mod launcher;
mod parser;
mod reader;
mod repl;
mod signals;
mod util;

use anyhow::{Context, Result};

use config::Config;
use launcher::ForkLauncher;
use reader::EditorSource;
use repl::Shell;

/// Exit status for fatal errors, seen as 255 by the parent.
const FATAL_STATUS: i32 = -1;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let code = match start() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{:#}", e);
            FATAL_STATUS
        }
    };
    std::process::exit(code);
}

fn start() -> Result<i32> {
    let config = Config::from_env();
    log::info!("history file: {}", config.history_path.display());

    signals::install().context("cannot install SIGINT handler")?;
    let source = EditorSource::new().context("cannot read from terminal")?;
    let mut shell = Shell::new(config, source, ForkLauncher, std::io::stdout());
    if !shell.history().is_empty() {
        log::debug!("restored {} history entries", shell.history().len());
    }

    let code = shell.run()?;
    Ok(code)
}
