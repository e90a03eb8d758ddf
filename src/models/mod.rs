mod bazaar;
mod enums;
mod pagination;

pub use bazaar::*;
pub use enums::*;
pub use pagination::{Summary, SummaryEntry};

use crate::urls;

/// Records tied to a character, linking to its page on Tibia.com.
pub trait CharacterLink {
    fn character_name(&self) -> &str;

    fn character_url(&self) -> String {
        urls::character_url(self.character_name())
    }
}
