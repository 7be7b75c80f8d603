//! Providers command - list supported vendors.

use anyhow::Result;
use custard_providers::ProviderRegistry;
use tracing::info;

use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Runs the providers command.
pub fn run(cli: &Cli) -> Result<()> {
    info!("Listing providers");

    let providers = ProviderRegistry::all();

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);

            println!("{}", formatter.format_providers_header());
            println!("{}", "─".repeat(64));

            for desc in providers {
                println!("{}", formatter.format_provider_line(desc));
            }

            println!();
            println!(
                "Total: {} vendors ({} with upcoming flavors)",
                providers.len(),
                providers
                    .iter()
                    .filter(|d| d.metadata.supports_upcoming)
                    .count()
            );
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format_providers(providers)?);
        }
    }

    Ok(())
}
