//! Location command - show one store.

use anyhow::Result;
use clap::Args;

use super::{Host, parse_kind, provider_options};
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// A store at a vendor.
#[derive(Args)]
pub struct LocationArgs {
    /// Vendor id (culvers, kopps, oscars, goodberrys, leducs).
    pub provider: String,

    /// Vendor-scoped store id, as shown by `custard search`.
    pub store_id: String,

    /// Zip code for vendors that use one.
    #[arg(long)]
    pub zip: Option<String>,
}

/// Runs the location command.
pub async fn run(args: &LocationArgs, cli: &Cli, host: &Host) -> Result<()> {
    let kind = parse_kind(&args.provider)?;
    let provider = host.provider(kind, &provider_options(args.zip.as_deref()))?;

    let location = provider.get_location_by_id(&args.store_id).await?;

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_location(&location));
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&location)?);
        }
    }

    Ok(())
}
