use anyhow::Context;
use bazaar_scout::{ClientConfig, FetchOptions, TibiaClient};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let client = TibiaClient::new(ClientConfig::default()).context("Failed to create Tibia.com client")?;

    // An auction id fetches that auction, otherwise the first page of current auctions
    let auction_id = std::env::args().nth(1);
    let (json, filename) = match auction_id {
        Some(id) => {
            let auction_id: u32 = id.parse().with_context(|| format!("Invalid auction id: {id}"))?;
            info!("Fetching auction {auction_id} with all its collections...");
            let auction = client
                .fetch_auction(auction_id, FetchOptions::all())
                .await
                .with_context(|| format!("Failed to fetch auction {auction_id}"))?;
            match auction {
                Some(auction) => {
                    info!(
                        "{} (level {}) on {}",
                        auction.entry.name,
                        auction.entry.level.unwrap_or_default(),
                        auction.entry.world.as_deref().unwrap_or("unknown world")
                    );
                    (serde_json::to_string_pretty(&auction)?, format!("auction_{auction_id}.json"))
                }
                None => {
                    info!("Auction {auction_id} does not exist");
                    return Ok(());
                }
            }
        }
        None => {
            info!("Fetching current auctions...");
            let bazaar = client
                .fetch_current_auctions(1, None)
                .await
                .context("Failed to fetch current auctions")?;
            info!(
                "Page {}/{}, {} auctions in total",
                bazaar.page, bazaar.total_pages, bazaar.results_count
            );
            for entry in &bazaar.entries {
                println!(
                    "{} - {} (level {}) bid {}",
                    entry.auction_id,
                    entry.name,
                    entry.level.unwrap_or_default(),
                    entry.bid.unwrap_or_default()
                );
            }
            (serde_json::to_string_pretty(&bazaar)?, "current_auctions.json".to_string())
        }
    };

    tokio::fs::write(&filename, json).await?;
    info!("Saved to {filename}");

    Ok(())
}
