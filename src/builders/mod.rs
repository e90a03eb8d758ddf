mod bazaar;

pub use bazaar::{AuctionBuilder, AuctionDetailsBuilder, CharacterBazaarBuilder};
