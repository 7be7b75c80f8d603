//! Watch command - poll saved locations until interrupted.

use std::io::{Write, stdout};
use std::sync::Arc;

use anyhow::{Result, bail};
use custard_core::LocationKey;
use custard_store::{Config, FlavorStore, UpdateCoordinator};
use futures::future::join_all;
use tracing::{info, warn};

use super::Host;
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// One coordinator per saved location, all on the host's client, with the
/// display name of each.
pub fn build_coordinators(
    config: &Config,
    host: &Host,
    store: &Arc<FlavorStore>,
) -> Result<Vec<(UpdateCoordinator, String)>> {
    config
        .locations
        .iter()
        .map(|entry| {
            let provider = host.provider(entry.provider, &entry.options)?;
            let coordinator = UpdateCoordinator::new(
                provider,
                &entry.store_id,
                entry.update_interval(&config.general),
                Arc::clone(store),
            );
            Ok((coordinator, entry.display_name()))
        })
        .collect()
}

/// Runs the watch command.
pub async fn run(cli: &Cli, host: &Host) -> Result<()> {
    let config = Config::load_from(&cli.config_path()).await?;
    if config.locations.is_empty() {
        bail!("No saved locations. Add one with `custard add`.");
    }

    let cancel = host.cancellation().clone();
    let store = Arc::new(FlavorStore::new());

    let (coordinators, names): (Vec<_>, Vec<_>) = build_coordinators(&config, host, &store)?
        .into_iter()
        .map(|(coordinator, name)| {
            let key = coordinator.key().clone();
            (coordinator, (key, name))
        })
        .unzip();
    info!(locations = coordinators.len(), "Starting watch mode");

    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if let Err(error) = tokio::signal::ctrl_c().await {
                warn!(error = %error, "Failed to listen for Ctrl+C");
                return;
            }
            info!("Interrupted, stopping");
            cancel.cancel();
        }
    });

    let render = async {
        let mut changes = store.subscribe();
        loop {
            render_statuses(&store, &names, cli).await?;
            tokio::select! {
                () = cancel.cancelled() => break,
                changed = changes.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
            }
        }
        Ok::<(), anyhow::Error>(())
    };
    let polls = join_all(coordinators.iter().map(|c| c.run(cancel.clone())));

    let (_, rendered) = tokio::join!(polls, render);
    rendered
}

async fn render_statuses(
    store: &FlavorStore,
    names: &[(LocationKey, String)],
    cli: &Cli,
) -> Result<()> {
    let statuses = store.all().await;

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);

            // Clear screen
            print!("\x1b[2J\x1b[H");
            println!(
                "{}",
                formatter.bold(&format!(
                    "Custard Watch - {}",
                    chrono::Local::now().format("%H:%M:%S")
                ))
            );
            println!("{}", "─".repeat(60));
            for (key, name) in names {
                if let Some(status) = statuses.get(key) {
                    println!("{}", formatter.format_status(name, key, status));
                }
            }
            println!();
            println!("{}", formatter.dim("Press Ctrl+C to exit"));
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(false);
            for (key, _) in names {
                if let Some(status) = statuses.get(key) {
                    println!("{}", formatter.format_status(key, status)?);
                }
            }
        }
    }

    stdout().flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use custard_core::ProviderKind;
    use custard_store::LocationEntry;
    use std::time::Duration;

    #[test]
    fn test_one_coordinator_per_location() {
        let mut config = Config::default();
        config
            .add_location(LocationEntry::new(ProviderKind::Kopps, "kopps-glendale").with_name("Kopp's"))
            .unwrap();
        config
            .add_location(LocationEntry::new(ProviderKind::Oscars, "oscars-franklin").with_interval(60))
            .unwrap();

        let host = Host::with_client(reqwest::Client::new());
        let store = Arc::new(FlavorStore::new());
        let built = build_coordinators(&config, &host, &store).unwrap();

        assert_eq!(built.len(), 2);
        assert_eq!(built[0].0.key().unique_id(), "kopps_kopps-glendale");
        assert_eq!(built[0].1, "Kopp's");
        assert_eq!(built[0].0.interval(), Duration::from_secs(30 * 60));
        assert_eq!(built[1].0.interval(), Duration::from_secs(3600));
    }
}
