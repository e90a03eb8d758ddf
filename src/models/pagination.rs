use crate::html::Pagination;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// An entry of an auction's paginated collection.
pub trait SummaryEntry {
    fn name(&self) -> &str;

    /// The internal id of the item, mount, outfit or familiar.
    fn entry_id(&self) -> u32;
}

/// One of an auction's paginated collections (items, mounts, outfits or familiars).
///
/// The detail page only renders the first page. `fully_fetched` is set once every other page
/// has been retrieved and appended to `entries`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary<T> {
    pub page: u32,
    pub total_pages: u32,
    pub results_count: u32,
    pub entries: Vec<T>,
    pub fully_fetched: bool,
}

impl<T> Default for Summary<T> {
    fn default() -> Self {
        Self::from_pagination(Pagination::default())
    }
}

impl<T> Summary<T> {
    pub fn from_pagination(pagination: Pagination) -> Self {
        Self {
            page: pagination.page,
            total_pages: pagination.total_pages,
            results_count: pagination.results_count,
            entries: Vec::new(),
            fully_fetched: false,
        }
    }

    /// The pages that still have to be requested to complete the collection.
    ///
    /// Empty once the collection is fully fetched.
    pub fn remaining_pages(&self) -> RangeInclusive<u32> {
        let last = if self.fully_fetched { 1 } else { self.total_pages };
        2..=last
    }

    /// Append the entries of subsequent pages, which must be given in page order.
    ///
    /// Does nothing if the collection was already fully fetched.
    pub fn extend_pages<I>(&mut self, pages: I)
    where
        I: IntoIterator<Item = Vec<T>>,
    {
        if self.fully_fetched {
            return;
        }
        for entries in pages {
            self.entries.extend(entries);
        }
        self.fully_fetched = true;
    }
}

impl<T: SummaryEntry> Summary<T> {
    /// Find an entry by name, ignoring case.
    pub fn get_by_name(&self, name: &str) -> Option<&T> {
        let name = name.to_lowercase();
        self.entries.iter().find(|e| e.name().to_lowercase() == name)
    }

    pub fn get_by_id(&self, entry_id: u32) -> Option<&T> {
        self.entries.iter().find(|e| e.entry_id() == entry_id)
    }

    /// Entries whose name contains `value`, ignoring case.
    pub fn search(&self, value: &str) -> Vec<&T> {
        let value = value.to_lowercase();
        self.entries
            .iter()
            .filter(|e| e.name().to_lowercase().contains(&value))
            .collect()
    }
}
