mod bazaar;
mod summary;
mod tables;

pub use bazaar::{parse_auction, parse_character_bazaar};
pub use summary::parse_page_items;
