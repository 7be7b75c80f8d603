//! Flavor command - today's flavor at one store.

use anyhow::Result;
use custard_core::LocationKey;
use custard_store::attributes;
use tracing::info;

use super::location::LocationArgs;
use super::{Host, parse_kind, provider_options};
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Runs the flavor command.
pub async fn run(args: &LocationArgs, cli: &Cli, host: &Host) -> Result<()> {
    let kind = parse_kind(&args.provider)?;
    let provider = host.provider(kind, &provider_options(args.zip.as_deref()))?;
    let key = LocationKey::new(kind, &args.store_id);

    info!(location = %key, "Fetching today's flavor");
    let flavor = provider.get_current_flavor(&args.store_id).await?;

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            let heading = format!("{} {}", provider.provider_name(), args.store_id);
            println!("{}", formatter.format_flavor(&flavor, &heading));
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            let attrs = attributes(Some(&flavor), provider.provider_name(), &args.store_id);
            println!("{}", formatter.format_flavor(&key, Some(&flavor), attrs)?);
        }
    }

    Ok(())
}
