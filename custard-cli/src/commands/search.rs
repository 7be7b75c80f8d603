//! Search command - find a vendor's locations.

use anyhow::Result;
use clap::Args;
use tracing::info;

use super::{Host, parse_kind, provider_options};
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the search command.
#[derive(Args)]
pub struct SearchArgs {
    /// Vendor id (culvers, kopps, oscars, goodberrys, leducs).
    pub provider: String,

    /// City, zip code, or store name. Vendors with a fixed store list
    /// accept an empty term.
    #[arg(default_value = "")]
    pub term: String,

    /// Keep only locations in this state (name or two-letter code).
    #[arg(long)]
    pub state: Option<String>,

    /// Zip code for vendors that use one.
    #[arg(long)]
    pub zip: Option<String>,
}

/// Runs the search command.
pub async fn run(args: &SearchArgs, cli: &Cli, host: &Host) -> Result<()> {
    let kind = parse_kind(&args.provider)?;
    info!(provider = kind.provider_id(), term = %args.term, "Searching locations");

    let locations = host
        .discovery(provider_options(args.zip.as_deref()))
        .search(kind, &args.term, args.state.as_deref())
        .await?;

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            if locations.is_empty() {
                println!("No {} locations found", kind.display_name());
            }
            for location in &locations {
                println!("{}", formatter.format_location_line(location));
            }
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&locations)?);
        }
    }

    Ok(())
}
