//! Config commands - manage saved locations.

use anyhow::{Result, bail};
use clap::Args;
use custard_store::{Config, LocationEntry, UPDATE_INTERVAL_RANGE};
use tracing::info;

use super::{Host, parse_kind, provider_options};
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the add command.
#[derive(Args)]
pub struct AddArgs {
    /// Vendor id (culvers, kopps, oscars, goodberrys, leducs).
    pub provider: String,

    /// Vendor-scoped store id, as shown by `custard search`.
    pub store_id: String,

    /// Display name (defaults to the store name).
    #[arg(long)]
    pub name: Option<String>,

    /// Poll interval in minutes.
    #[arg(long, value_parser = clap::value_parser!(u64).range(UPDATE_INTERVAL_RANGE))]
    pub interval: Option<u64>,

    /// Zip code for vendors that use one.
    #[arg(long)]
    pub zip: Option<String>,

    /// Save even if today's flavor cannot be read.
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the remove command.
#[derive(Args)]
pub struct RemoveArgs {
    /// Unique id, `{provider}_{store_id}`, as shown by `custard list`.
    pub unique_id: String,
}

/// Confirms a location and saves it.
pub async fn add(args: &AddArgs, cli: &Cli, host: &Host) -> Result<()> {
    let kind = parse_kind(&args.provider)?;
    let path = cli.config_path();
    let mut config = Config::load_from(&path).await?;

    let options = provider_options(args.zip.as_deref());
    let confirmed = host
        .discovery(options.clone())
        .confirm(kind, &args.store_id)
        .await?;

    if !confirmed.flavor_ok && !args.force {
        bail!(
            "Could not read today's flavor at {} (use --force to save it anyway)",
            confirmed.key()
        );
    }

    let mut entry = LocationEntry::new(kind, &confirmed.location.store_id)
        .with_name(
            args.name
                .clone()
                .unwrap_or_else(|| confirmed.location.name.clone()),
        )
        .with_options(options);
    if let Some(minutes) = args.interval {
        entry = entry.with_interval(minutes);
    }

    let unique_id = entry.key().unique_id();
    config.add_location(entry)?;
    config.save_to(&path).await?;
    info!(location = %unique_id, path = %path.display(), "Location saved");

    if !cli.quiet {
        println!("Added {unique_id}");
    }
    Ok(())
}

/// Removes a saved location.
pub async fn remove(args: &RemoveArgs, cli: &Cli) -> Result<()> {
    let path = cli.config_path();
    let mut config = Config::load_from(&path).await?;

    let removed = config.remove_location(&args.unique_id)?;
    config.save_to(&path).await?;

    if !cli.quiet {
        println!("Removed {}", removed.display_name());
    }
    Ok(())
}

/// Lists saved locations.
pub async fn list(cli: &Cli) -> Result<()> {
    let path = cli.config_path();
    let config = Config::load_from(&path).await?;

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            if config.locations.is_empty() {
                println!("No saved locations. Add one with `custard add`.");
            }
            for entry in &config.locations {
                println!("{}", formatter.format_entry_line(entry));
            }
            println!();
            println!(
                "{}",
                formatter.dim(&format!(
                    "Config: {} (every {}m)",
                    path.display(),
                    config.general.update_interval_minutes
                ))
            );
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format_entries(&config.locations)?);
        }
    }

    Ok(())
}
