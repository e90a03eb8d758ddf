use crate::models::SummaryKind;
use serde::{Deserialize, Serialize};

/// Settings for talking to Tibia.com.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Request timeout in seconds
    pub timeout_secs: u64,
    pub user_agent: String,
    /// Fetch from the test website instead of the live one
    pub test_site: bool,
    /// Continuation pages requested at the same time when completing a collection
    pub max_concurrent_pages: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
            test_site: false,
            max_concurrent_pages: 4,
        }
    }
}

impl ClientConfig {
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_test_site(mut self, test_site: bool) -> Self {
        self.test_site = test_site;
        self
    }

    pub fn with_max_concurrent_pages(mut self, max_concurrent_pages: usize) -> Self {
        self.max_concurrent_pages = max_concurrent_pages.max(1);
        self
    }
}

/// What to fetch along with an auction's detail page.
///
/// The detail page only shows the first page of each collection. Every flag set costs one
/// extra request per remaining page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchOptions {
    /// Complete the items and store items
    pub items: bool,
    /// Complete the mounts and store mounts
    pub mounts: bool,
    /// Complete the outfits and store outfits
    pub outfits: bool,
    pub familiars: bool,
    /// Only parse the information shown in the bazaar list
    pub skip_details: bool,
}

impl FetchOptions {
    /// Complete every collection.
    pub fn all() -> Self {
        Self {
            items: true,
            mounts: true,
            outfits: true,
            familiars: true,
            skip_details: false,
        }
    }

    /// The collections to complete.
    pub fn kinds(&self) -> Vec<SummaryKind> {
        let mut kinds = Vec::new();
        if self.items {
            kinds.extend([SummaryKind::Items, SummaryKind::StoreItems]);
        }
        if self.mounts {
            kinds.extend([SummaryKind::Mounts, SummaryKind::StoreMounts]);
        }
        if self.outfits {
            kinds.extend([SummaryKind::Outfits, SummaryKind::StoreOutfits]);
        }
        if self.familiars {
            kinds.push(SummaryKind::Familiars);
        }
        kinds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_options_kinds() {
        assert!(FetchOptions::default().kinds().is_empty());
        let options = FetchOptions {
            mounts: true,
            familiars: true,
            ..Default::default()
        };
        assert_eq!(
            options.kinds(),
            vec![SummaryKind::Mounts, SummaryKind::StoreMounts, SummaryKind::Familiars]
        );
        assert_eq!(FetchOptions::all().kinds(), SummaryKind::ALL.to_vec());
    }

    #[test]
    fn config_defaults() {
        let config = ClientConfig::default().with_max_concurrent_pages(0);
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.max_concurrent_pages, 1);
        assert!(!config.test_site);
    }
}
