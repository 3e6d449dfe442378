//! Interactive shell for Butler.
//!
//! # Responsibility
//! - Resolve configuration and start logging.
//! - Feed stdin lines to the core dispatcher and print each response.

use anyhow::Result;
use butler_core::{init_logging, Butler, ButlerConfig, FileStorage, TaskStore, WELCOME_MESSAGE};
use clap::Parser;
use log::{info, warn};
use std::borrow::Cow;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "butler", version, about = "A personal task tracker")]
struct Cli {
    /// JSON config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override for the task data file
    #[arg(long)]
    data_file: Option<PathBuf>,

    /// Log level (off|error|warn|info|debug|trace)
    #[arg(long)]
    log_level: Option<String>,

    /// Directory for rolling log files; logging is off when unset
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = resolve_config(cli)?;

    if let Err(err) = init_logging(&config) {
        eprintln!("logging disabled: {err}");
    }

    let mut butler = Butler::new(FileStorage::new(&config.data_file));
    info!(
        "event=session_start module=cli status=ok tasks={} data_file={}",
        butler.tasks().size(),
        butler.store().path().display()
    );

    run_session(&mut butler, io::stdin().lock(), io::stdout().lock())?;

    info!("event=session_end module=cli status=ok");
    Ok(())
}

/// Feeds input lines to `butler` until `bye` or end of input.
///
/// Undecodable bytes are replaced rather than ending the session. A read
/// error ends the session like end of input.
fn run_session<S, R, W>(butler: &mut Butler<S>, mut input: R, mut output: W) -> io::Result<()>
where
    S: TaskStore,
    R: BufRead,
    W: Write,
{
    writeln!(output, "{WELCOME_MESSAGE}")?;

    let mut buf = Vec::new();
    loop {
        buf.clear();
        match input.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {}
            Err(err) => {
                warn!(
                    "event=input_read module=cli status=error kind={:?}",
                    err.kind()
                );
                break;
            }
        }

        let line = String::from_utf8_lossy(&buf);
        if matches!(line, Cow::Owned(_)) {
            warn!("event=input_decode module=cli status=ok reason=invalid_utf8");
        }
        let response = butler.respond(line.trim_end_matches(['\n', '\r']));
        if !response.text.is_empty() {
            writeln!(output, "{}", response.text)?;
        }
        if response.is_exit {
            break;
        }
    }
    output.flush()
}

/// Defaults, then config file, then environment, then flags.
fn resolve_config(cli: Cli) -> Result<ButlerConfig> {
    let base = match &cli.config {
        Some(path) => ButlerConfig::from_file(path)?,
        None => ButlerConfig::default(),
    };
    let mut config = base.with_env_overrides();

    if let Some(data_file) = cli.data_file {
        config.data_file = data_file;
    }
    if let Some(log_level) = cli.log_level {
        config.log_level = log_level;
    }
    if let Some(log_dir) = cli.log_dir {
        config.log_dir = Some(log_dir);
    }
    Ok(config)
}
