//! Check command - can today's flavor be read?

use anyhow::Result;
use custard_core::LocationKey;

use super::location::LocationArgs;
use super::{Host, parse_kind, provider_options};
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Runs the check command. Returns whether the flavor was read.
pub async fn run(args: &LocationArgs, cli: &Cli, host: &Host) -> Result<bool> {
    let kind = parse_kind(&args.provider)?;
    let provider = host.provider(kind, &provider_options(args.zip.as_deref()))?;
    let key = LocationKey::new(kind, &args.store_id);

    let ok = provider.test_connection(&args.store_id).await;

    match cli.format {
        OutputFormat::Text => {
            if !cli.quiet {
                println!("{}", TextFormatter::new(!cli.no_color).format_check(&key, ok));
            }
        }
        OutputFormat::Json => {
            println!("{}", JsonFormatter::new(cli.pretty).format_check(&key, ok)?);
        }
    }

    Ok(ok)
}
