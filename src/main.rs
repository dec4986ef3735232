use anyhow::{anyhow, Result};
use dotenvy::dotenv;
use std::env;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use tiertrack::api::{BackendClient, TierListApi};
use tiertrack::export::csv_export;
use tiertrack::filter::{apply_filters, FilterCriteria};
use tiertrack::models::ListKind;

const USAGE: &str = "Usage: tiertrack <media-type> [collection|to-do] [--csv]";

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    match dotenv() {
        Ok(path) => info!("Loaded environment from {:?}", path),
        Err(e) => warn!("No .env file loaded ({}) - relying on environment", e),
    }

    let mut args = env::args().skip(1);
    let media_type = args.next().ok_or_else(|| anyhow!(USAGE))?;
    let mut list = ListKind::Collection;
    let mut csv = false;
    for arg in args {
        match arg.as_str() {
            "--csv" => csv = true,
            other => list = other.parse().map_err(|_| anyhow!(USAGE))?,
        }
    }

    let client = BackendClient::from_env()?;
    let payload = client.fetch_media(&media_type, list).await?;
    info!(
        "Fetched {} items and {} known tags for {} ({})",
        payload.media.len(),
        payload.unique_tags.len(),
        media_type,
        list.label()
    );

    let outcome = apply_filters(payload.media, &FilterCriteria::default(), &payload.unique_tags);
    if csv {
        print!("{}", csv_export(&outcome.buckets));
    } else {
        for (tier, items) in outcome.buckets.iter() {
            println!("{} ({})", tier, items.len());
            for item in items {
                println!("  {}", item.title);
            }
        }
    }
    Ok(())
}
