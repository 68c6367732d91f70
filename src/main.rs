//! slirc-enforcer - dry-run driver for the channel enforcer.
//!
//! Usage: `slirc-enforcer [config.toml] [events.jsonl]`
//!
//! Reads JSON-lines events from the file (or stdin), runs them through an
//! enforcer built from the config, and prints every outbound command as a
//! wire line on stdout. Logs go to stderr.

use anyhow::Context;
use slirc_enforcer::config::{Config, validate};
use slirc_enforcer::policy::{CapabilityStore, StaticCapabilityStore};
use slirc_enforcer::state::Roster;
use slirc_enforcer::{Enforcer, EnforcerActor, metrics, replay};
use slirc_proto::Command;
use std::sync::Arc;
use tokio::io::BufReader;
use tokio::sync::mpsc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let config_path = args.next().unwrap_or_else(|| "enforcer.toml".to_string());
    let events_path = args.next();

    let config = Config::load(&config_path).map_err(|e| {
        error!(path = %config_path, error = %e, "Failed to load config");
        e
    })?;

    if let Err(errors) = validate(&config) {
        for e in &errors {
            error!(error = %e, "Invalid configuration");
        }
        anyhow::bail!("{} configuration error(s) in {}", errors.len(), config_path);
    }

    info!(
        bot = %config.enforcer.bot_nick,
        users = config.users.len(),
        channels = config.channels.len(),
        "Starting slirc-enforcer"
    );

    metrics::init();

    let store: Arc<dyn CapabilityStore> = Arc::new(StaticCapabilityStore::from_config(&config));
    let roster = Arc::new(Roster::new());
    let enforcer = Enforcer::from_config(&config, store, roster.clone());

    let (tx, mut rx) = mpsc::channel::<Command>(config.runtime.queue_depth);
    let printer = tokio::spawn(async move {
        while let Some(command) = rx.recv().await {
            println!("{}", command);
        }
    });

    let handle = EnforcerActor::spawn(enforcer, Arc::new(tx), config.runtime.queue_depth);

    let summary = match events_path {
        Some(path) => {
            let file = tokio::fs::File::open(&path)
                .await
                .with_context(|| format!("failed to open {}", path))?;
            replay::run(BufReader::new(file), &handle, &roster).await?
        }
        None => replay::run(BufReader::new(tokio::io::stdin()), &handle, &roster).await?,
    };

    info!(
        lines = summary.lines,
        events = summary.events,
        actions = summary.actions,
        errors = summary.errors,
        skipped = summary.skipped,
        "Replay finished"
    );

    // Dropping the last handle stops the actor, which closes the command queue.
    drop(handle);
    printer.await?;

    if std::env::var_os("SLIRC_ENFORCER_METRICS").is_some() {
        eprint!("{}", metrics::gather_metrics());
    }

    Ok(())
}
