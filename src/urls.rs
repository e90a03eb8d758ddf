//! Builders for Tibia.com URLs.

use crate::error::{Error, Result};
use crate::models::{AuctionFilters, BazaarType, SummaryKind};
use url::form_urlencoded;

const TIBIA_HOST: &str = "www.tibia.com";
const TEST_HOST: &str = "www.test.tibia.com";
const STATIC_URL: &str = "https://static.tibia.com";

/// Build a URL to a Tibia.com section.
///
/// Parameters with a `None` value are left out. Keys may repeat, each pair is kept in order.
pub fn tibia_url(section: &str, subtopic: Option<&str>, params: &[(&str, Option<String>)]) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    if let Some(subtopic) = subtopic {
        query.append_pair("subtopic", subtopic);
    }
    for (key, value) in params {
        if let Some(value) = value {
            query.append_pair(key, value);
        }
    }
    format!("https://{TIBIA_HOST}/{section}/?{}", query.finish())
}

/// Point a Tibia.com URL at the test website.
pub fn to_test_site(url: &str) -> String {
    url.replacen(TIBIA_HOST, TEST_HOST, 1)
}

pub fn static_file_url(path: &[&str]) -> String {
    format!("{STATIC_URL}/{}", path.join("/"))
}

/// Reject page numbers below 1.
pub fn validate_page(page: u32) -> Result<()> {
    if page < 1 {
        return Err(Error::invalid_argument("page must be 1 or greater"));
    }
    Ok(())
}

pub fn character_url(name: &str) -> String {
    tibia_url("community", Some("characters"), &[("name", Some(name.to_string()))])
}

pub fn auction_url(auction_id: u32) -> String {
    tibia_url(
        "charactertrade",
        Some(BazaarType::Current.subtopic()),
        &[
            ("page", Some("details".to_string())),
            ("auctionid", Some(auction_id.to_string())),
        ],
    )
}

/// The URL to a page of current auctions or of the auction history, with optional filters.
pub fn bazaar_url(bazaar_type: BazaarType, page: u32, filters: Option<&AuctionFilters>) -> Result<String> {
    validate_page(page)?;
    let mut params = vec![("currentpage", Some(page.to_string()))];
    if let Some(filters) = filters {
        params.extend(
            filters
                .query_params()
                .into_iter()
                .map(|(key, value)| (key, Some(value))),
        );
    }
    Ok(tibia_url("charactertrade", Some(bazaar_type.subtopic()), &params))
}

/// The URL serving a single page of one of an auction's paginated collections.
pub fn auction_page_url(auction_id: u32, kind: SummaryKind, page: u32) -> Result<String> {
    validate_page(page)?;
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("auctionid", &auction_id.to_string())
        .append_pair("type", &kind.value().to_string())
        .append_pair("currentpage", &page.to_string())
        .finish();
    Ok(format!(
        "https://{TIBIA_HOST}/websiteservices/handle_charactertrades.php?{query}"
    ))
}
