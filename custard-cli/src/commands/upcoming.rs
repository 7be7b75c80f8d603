//! Upcoming command - a store's forward schedule.

use anyhow::Result;
use clap::Args;
use custard_core::DEFAULT_UPCOMING_DAYS;

use super::location::LocationArgs;
use super::{Host, parse_kind, provider_options};
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the upcoming command.
#[derive(Args)]
pub struct UpcomingArgs {
    #[command(flatten)]
    pub location: LocationArgs,

    /// Days to look ahead, starting today.
    #[arg(long, short, default_value_t = DEFAULT_UPCOMING_DAYS)]
    pub days: usize,
}

/// Runs the upcoming command.
pub async fn run(args: &UpcomingArgs, cli: &Cli, host: &Host) -> Result<()> {
    let kind = parse_kind(&args.location.provider)?;
    let provider = host.provider(kind, &provider_options(args.location.zip.as_deref()))?;

    let schedule = provider
        .get_upcoming_flavors(&args.location.store_id, args.days)
        .await;

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            let heading = format!(
                "{} {} - next {} days",
                provider.provider_name(),
                args.location.store_id,
                args.days
            );
            println!("{}", formatter.format_upcoming(&heading, &schedule));
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format_upcoming(&schedule)?);
        }
    }

    Ok(())
}
