//! Command line entry point. No metrics recorder is installed here, so the
//! `LinkMetrics` counters are no-ops unless an embedding program sets one.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing::{error, info, warn};

use shift_calendar::app::{LinkUseCase, PageReport};
use shift_calendar::calendar::CalendarUrlBuilder;
use shift_calendar::config::Config;
use shift_calendar::error::ShiftError;
use shift_calendar::infra::PortalClient;
use shift_calendar::logging;
use shift_calendar::pages::PageContext;
use shift_calendar::types::ShiftLink;

#[derive(Parser)]
#[command(name = "shift_calendar")]
#[command(about = "Google Calendar links for Park Slope Food Coop shifts")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Link every shift on a portal page, read from a file or fetched
    Link {
        /// Saved HTML of the page
        #[arg(long, requires = "path", conflicts_with = "url")]
        file: Option<PathBuf>,
        /// Navigation path the saved page was served at, e.g. /services/home/
        #[arg(long)]
        path: Option<String>,
        /// Fetch the page from the portal instead
        #[arg(long)]
        url: Option<String>,
        /// Print one JSON object per link instead of bare URLs
        #[arg(long)]
        json: bool,
        /// Link a detail page even when not scheduled for it
        #[arg(long)]
        ignore_schedule: bool,
    },
    /// Fetch one shift by id and link it
    Shift {
        id: String,
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    logging::init_logging();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref()).context("loading config")?;

    let client = Arc::new(PortalClient::new(&config.portal)?);
    let builder = CalendarUrlBuilder::new(&config.calendar, &config.portal);
    let use_case = LinkUseCase::new(client.clone(), builder)
        .with_max_concurrent_fetches(config.portal.max_concurrent_fetches);

    match cli.command {
        Commands::Link {
            file,
            path,
            url,
            json,
            ignore_schedule,
        } => {
            let (html, path) = match (file, url) {
                (Some(file), None) => {
                    let html = std::fs::read_to_string(&file)
                        .with_context(|| format!("reading {}", file.display()))?;
                    (html, path.unwrap_or_default())
                }
                (None, Some(url)) => {
                    let parsed = url::Url::parse(&url).with_context(|| format!("bad url {url}"))?;
                    let html = match client.get_page(&url).await {
                        Ok(html) => html,
                        Err(e) => return fail(e),
                    };
                    (html, path.unwrap_or_else(|| parsed.path().to_string()))
                }
                _ => bail!("pass either --file with --path, or --url"),
            };

            let use_case =
                use_case.with_require_scheduled(config.claim.require_scheduled && !ignore_schedule);
            match use_case.link_page(&html, &PageContext::now(path)).await {
                Ok(report) => print_report(&report, json)?,
                Err(e) => return fail(e),
            }
        }
        Commands::Shift { id, json } => match use_case.link_shift(&id).await {
            Ok(link) => print_link(&link, json)?,
            Err(e) => return fail(e),
        },
    }
    Ok(())
}

/// Only configuration and IO failures end the process with an error.
fn fail(e: ShiftError) -> anyhow::Result<()> {
    match e {
        ShiftError::Io(_) | ShiftError::Config(_) | ShiftError::Toml(_) => Err(e.into()),
        other => {
            error!(kind = other.kind(), error = %other, "No calendar link produced");
            Ok(())
        }
    }
}

fn print_report(report: &PageReport, json: bool) -> anyhow::Result<()> {
    for link in &report.links {
        print_link(link, json)?;
    }
    for skipped in &report.skipped {
        warn!(shift_id = ?skipped.shift_id, reason = %skipped.reason, "Skipped shift");
    }
    info!(
        variant = ?report.variant,
        links = report.links.len(),
        skipped = report.skipped.len(),
        "Done"
    );
    Ok(())
}

fn print_link(link: &ShiftLink, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string(link)?);
    } else {
        println!("{}", link.url);
    }
    Ok(())
}
