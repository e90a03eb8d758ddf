mod http;
mod traits;
mod types;

pub use http::HttpTransport;
pub use traits::Transport;
pub use types::{ClientConfig, FetchOptions};

use crate::error::{Error, Result};
use crate::models::{Auction, AuctionDetails, AuctionFilters, BazaarType, CharacterBazaar, PageItems, SummaryKind};
use crate::parsers::{parse_auction, parse_character_bazaar, parse_page_items};
use crate::urls;
use futures::stream::{self, StreamExt, TryStreamExt};
use serde::Deserialize;
use tracing::{debug, info};

const AJAX_HEADERS: &[(&str, &str)] = &[("x-requested-with", "XMLHttpRequest")];

/// Envelope of the continuation pages: `{"AjaxObjects": [{"Data": "<html>"}]}`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AjaxResponse {
    ajax_objects: Vec<AjaxObject>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AjaxObject {
    data: String,
}

/// The HTML carried by a continuation page response, if it could be read.
fn ajax_content(body: &str) -> Option<String> {
    let response: AjaxResponse = serde_json::from_str(&body.replace('\n', " ")).ok()?;
    response.ajax_objects.into_iter().next().map(|object| object.data)
}

/// Fetches and parses the character bazaar.
pub struct TibiaClient<T = HttpTransport> {
    transport: T,
    config: ClientConfig,
}

impl TibiaClient<HttpTransport> {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self::with_transport(transport, config))
    }
}

impl<T: Transport> TibiaClient<T> {
    pub fn with_transport(transport: T, config: ClientConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn resolve(&self, url: String) -> String {
        if self.config.test_site {
            urls::to_test_site(&url)
        } else {
            url
        }
    }

    /// Fetch a page of the auctions currently in progress.
    pub async fn fetch_current_auctions(
        &self,
        page: u32,
        filters: Option<&AuctionFilters>,
    ) -> Result<CharacterBazaar> {
        self.fetch_bazaar(BazaarType::Current, page, filters).await
    }

    /// Fetch a page of the finished auctions.
    pub async fn fetch_auction_history(
        &self,
        page: u32,
        filters: Option<&AuctionFilters>,
    ) -> Result<CharacterBazaar> {
        self.fetch_bazaar(BazaarType::History, page, filters).await
    }

    async fn fetch_bazaar(
        &self,
        bazaar_type: BazaarType,
        page: u32,
        filters: Option<&AuctionFilters>,
    ) -> Result<CharacterBazaar> {
        let url = self.resolve(urls::bazaar_url(bazaar_type, page, filters)?);
        let content = self.transport.get(&url, &[]).await?;
        parse_character_bazaar(&content)
    }

    /// Fetch an auction's detail page, completing the collections requested in `options`.
    ///
    /// Returns `None` if the auction does not exist.
    pub async fn fetch_auction(&self, auction_id: u32, options: FetchOptions) -> Result<Option<Auction>> {
        if auction_id == 0 {
            return Err(Error::invalid_argument("auction_id must be 1 or greater"));
        }
        let url = self.resolve(urls::auction_url(auction_id));
        let content = self.transport.get(&url, &[]).await?;
        let Some(mut auction) = parse_auction(&content, auction_id, options.skip_details)? else {
            info!(auction_id, "Auction not found");
            return Ok(None);
        };

        if let Some(details) = auction.details.as_mut() {
            for kind in options.kinds() {
                self.fetch_all_pages(auction_id, kind, details).await?;
            }
        }
        info!(auction_id, name = %auction.entry.name, "Fetched auction");
        Ok(Some(auction))
    }

    /// Fetch the remaining pages of one of an auction's collections and merge them in.
    ///
    /// Pages are requested concurrently, up to `max_concurrent_pages` at a time, and merged in
    /// page order. The collection is marked fully fetched once every page was merged.
    pub async fn fetch_all_pages(
        &self,
        auction_id: u32,
        kind: SummaryKind,
        details: &mut AuctionDetails,
    ) -> Result<()> {
        if auction_id == 0 {
            return Err(Error::invalid_argument("auction_id must be 1 or greater"));
        }
        let pages: Vec<u32> = details.remaining_pages(kind).collect();
        debug!(auction_id, ?kind, remaining = pages.len(), "Fetching collection pages");

        let items: Vec<PageItems> = stream::iter(pages)
            .map(|page| self.fetch_page_items(auction_id, kind, page))
            .buffered(self.config.max_concurrent_pages.max(1))
            .try_collect()
            .await?;
        details.merge_pages(kind, items)
    }

    async fn fetch_page_items(&self, auction_id: u32, kind: SummaryKind, page: u32) -> Result<PageItems> {
        let url = self.resolve(urls::auction_page_url(auction_id, kind, page)?);
        let body = self.transport.get(&url, AJAX_HEADERS).await?;
        let content = ajax_content(&body).unwrap_or_else(|| {
            debug!(auction_id, ?kind, page, "Continuation page had no content");
            String::new()
        });
        Ok(parse_page_items(&content, kind))
    }
}
