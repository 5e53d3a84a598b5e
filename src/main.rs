//! Blockpad - a terminal rich-text editor with block autoformatting.
//!
//! # Usage
//!
//! ```bash
//! blockpad
//! blockpad --slot notes
//! blockpad --fixed-spans --log-file blockpad.log
//! ```

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use blockpad::app::App;
use blockpad::config::{
    ConfigFlags, clear_config_flags, global_config_path, load_config_flags, local_override_path,
    save_config_flags,
};
use blockpad::storage::SlotStore;

/// A terminal rich-text editor with block autoformatting
#[derive(Parser, Debug)]
#[command(name = "blockpad", version, about, long_about = None)]
struct Cli {
    /// Storage file holding the document slots
    #[arg(long, value_name = "PATH")]
    storage: Option<PathBuf>,

    /// Storage slot to load and save
    #[arg(long, value_name = "KEY")]
    slot: Option<String>,

    /// Remove triggers by fixed offsets instead of the matched prefix length
    #[arg(long)]
    fixed_spans: bool,

    /// Write debug logs to a file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

impl Cli {
    fn flags(&self) -> ConfigFlags {
        ConfigFlags {
            storage: self.storage.clone(),
            slot: self.slot.clone(),
            fixed_spans: self.fixed_spans,
            log_file: self.log_file.clone(),
        }
    }
}

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let Some(path) = log_file else {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()),
            )
            .with_writer(std::io::stderr)
            .init();
        return Ok(());
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("blockpad=debug")),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = cli.flags();

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    let log_path = effective
        .log_file
        .clone()
        .or_else(|| std::env::var_os("BLOCKPAD_LOG_FILE").map(PathBuf::from));
    init_logging(log_path.as_deref())?;
    tracing::debug!(?effective, "effective flags");

    let mut app = App::new(SlotStore::new(effective.storage_path()))
        .with_slot(effective.slot_name())
        .with_span_policy(effective.span_policy());

    app.run().context("Application error")
}
