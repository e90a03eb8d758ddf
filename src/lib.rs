//! Scraper for the Tibia.com character bazaar.
//!
//! The parsers turn bazaar list pages and auction detail pages into typed records, and
//! [`TibiaClient`] fetches them, completing the paginated collections of an auction on request.

pub mod builders;
pub mod client;
pub mod error;
pub mod html;
pub mod models;
pub mod parsers;
pub mod urls;
pub mod utils;

pub use client::{ClientConfig, FetchOptions, HttpTransport, TibiaClient, Transport};
pub use error::{Error, Result};
pub use parsers::{parse_auction, parse_character_bazaar, parse_page_items};
