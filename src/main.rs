//! Unison - Voice Command Dispatcher
//!
//! Listens for the activation keyword and routes commands to modules.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, reload, EnvFilter, Registry};
use unison::brain::Brain;
use unison::config::Settings;
use unison::feedback::Feedback;
use unison::switch::Switch;
use unison::{listen, modules, playback};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Settings file (defaults to the user config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the activation keyword
    #[arg(short, long)]
    keyword: Option<String>,

    /// Speech source: stdin or speechd
    #[arg(long)]
    listener: Option<String>,

    /// Cue player: system, rodio or none
    #[arg(long)]
    player: Option<String>,

    /// Write the default settings file and exit
    #[arg(long)]
    init: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let runtime = tokio::runtime::Runtime::new()?;
    let result = runtime.block_on(run(args));
    // A pending stdin read would otherwise keep the runtime alive
    runtime.shutdown_background();
    result
}

/// Install the subscriber before anything can log.
///
/// Returns a handle for applying the settings' `log_level` later, or `None`
/// when RUST_LOG or --verbose already decided the filter.
fn init_logging(verbose: bool) -> Option<reload::Handle<EnvFilter, Registry>> {
    let from_env = EnvFilter::try_from_default_env().ok();
    let pinned = from_env.is_some() || verbose;
    let default_level = if verbose { "debug" } else { "info" };
    let initial = from_env.unwrap_or_else(|| level_filter(default_level));

    let (filter, handle) = reload::Layer::new(initial);
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .init();

    (!pinned).then_some(handle)
}

fn level_filter(level: &str) -> EnvFilter {
    EnvFilter::new(format!("unison={}", level))
}

async fn run(args: Args) -> Result<()> {
    // RUST_LOG wins over --verbose, which wins over the settings file
    let log_handle = init_logging(args.verbose);

    let mut settings = Settings::load(args.config.as_deref())?;
    if let Some(handle) = log_handle {
        if let Err(e) = handle.reload(level_filter(&settings.log_level)) {
            warn!("Could not apply log level '{}': {}", settings.log_level, e);
        }
    }

    if args.init {
        settings.save(args.config.as_deref())?;
        info!("📄 Settings written");
        return Ok(());
    }

    info!("🔔 Unison v{} starting...", env!("CARGO_PKG_VERSION"));

    if let Some(keyword) = args.keyword.as_deref() {
        settings = settings.with_keyword(keyword);
    }
    if let Some(listener) = args.listener {
        settings.listener = listener;
    }
    if let Some(player) = args.player {
        settings.player = player;
    }
    let settings = Arc::new(settings);

    let switch = Switch::with_modules(settings.clone(), modules::default_modules())
        .context("Module registration failed")?;
    let listener = listen::create_listener(&settings).await;
    let feedback = Feedback::new(playback::create_player(&settings)?);

    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("🛑 Interrupted, shutting down");
                on_signal.cancel();
            }
            Err(e) => warn!("Could not listen for Ctrl+C: {}", e),
        }
    });

    let mut brain = Brain::new(settings, listener, feedback, switch);
    brain.run(cancel).await?;

    Ok(())
}
