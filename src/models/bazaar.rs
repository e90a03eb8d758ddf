use super::enums::{
    AuctionBattlEyeFilter, AuctionOrderBy, AuctionOrderDirection, AuctionSearchType,
    AuctionSkillFilter, AuctionStatus, AuctionVocationFilter, BazaarType, BidType, PvpTypeFilter,
    Sex, SummaryKind, Vocation,
};
use super::pagination::{Summary, SummaryEntry};
use super::CharacterLink;
use crate::error::{Error, Result};
use crate::urls;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::ops::RangeInclusive;

/// The bestiary step at which a creature is fully unlocked.
pub const MAX_BESTIARY_STEP: u8 = 4;

/// The filtering options of the bazaar.
///
/// Parsed from the filter form of the current auctions page, and used to build bazaar URLs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuctionFilters {
    pub world: Option<String>,
    pub pvp_type: Option<PvpTypeFilter>,
    pub battleye: Option<AuctionBattlEyeFilter>,
    pub vocation: Option<AuctionVocationFilter>,
    pub min_level: Option<u32>,
    pub max_level: Option<u32>,
    pub skill: Option<AuctionSkillFilter>,
    pub min_skill_level: Option<u32>,
    pub max_skill_level: Option<u32>,
    pub order_by: Option<AuctionOrderBy>,
    pub order: Option<AuctionOrderDirection>,
    pub search_string: Option<String>,
    pub search_type: Option<AuctionSearchType>,
    /// Worlds offered by the world selector.
    #[serde(default)]
    pub available_worlds: Vec<String>,
}

impl AuctionFilters {
    /// The query parameters representing the set filters, in the order Tibia.com uses.
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let params = [
            ("filter_profession", self.vocation.map(|v| v.value().to_string())),
            ("filter_levelrangefrom", self.min_level.map(|v| v.to_string())),
            ("filter_levelrangeto", self.max_level.map(|v| v.to_string())),
            ("filter_world", self.world.clone()),
            ("filter_worldpvptype", self.pvp_type.map(|v| v.value().to_string())),
            ("filter_worldbattleyestate", self.battleye.map(|v| v.value().to_string())),
            ("filter_skillid", self.skill.map(|v| v.value().to_string())),
            ("filter_skillrangefrom", self.min_skill_level.map(|v| v.to_string())),
            ("filter_skillrangeto", self.max_skill_level.map(|v| v.to_string())),
            ("order_column", self.order_by.map(|v| v.value().to_string())),
            ("order_direction", self.order.map(|v| v.value().to_string())),
            ("searchstring", self.search_string.clone()),
            ("searchtype", self.search_type.map(|v| v.value().to_string())),
        ];
        params
            .into_iter()
            .filter_map(|(key, value)| value.map(|value| (key, value)))
            .collect()
    }
}

/// The outfit the character is wearing in the auction thumbnail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutfitImage {
    pub image_url: String,
    pub outfit_id: u32,
    /// Bitmask of the displayed addons.
    pub addons: u8,
}

/// An item shown in an auction, either as a highlighted item or in the character's item lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemEntry {
    pub image_url: String,
    pub name: String,
    pub description: Option<String>,
    pub count: u32,
    /// The item's client id.
    pub item_id: u32,
    pub tier: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MountEntry {
    pub image_url: String,
    pub name: String,
    pub mount_id: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutfitEntry {
    pub image_url: String,
    pub name: String,
    pub outfit_id: u32,
    /// Bitmask of the unlocked addons.
    pub addons: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamiliarEntry {
    pub image_url: String,
    pub name: String,
    pub familiar_id: u32,
}

macro_rules! summary_entry {
    ($entry:ty, $id:ident) => {
        impl SummaryEntry for $entry {
            fn name(&self) -> &str {
                &self.name
            }

            fn entry_id(&self) -> u32 {
                self.$id
            }
        }
    };
}

summary_entry!(ItemEntry, item_id);
summary_entry!(MountEntry, mount_id);
summary_entry!(OutfitEntry, outfit_id);
summary_entry!(FamiliarEntry, familiar_id);

/// Items across the character's inventory, depot and stash.
pub type ItemSummary = Summary<ItemEntry>;
pub type Mounts = Summary<MountEntry>;
pub type Outfits = Summary<OutfitEntry>;
pub type Familiars = Summary<FamiliarEntry>;

/// The entries of a single continuation page, tagged with the kind of collection they belong to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageItems {
    Items(Vec<ItemEntry>),
    Mounts(Vec<MountEntry>),
    Outfits(Vec<OutfitEntry>),
    Familiars(Vec<FamiliarEntry>),
}

impl PageItems {
    pub fn len(&self) -> usize {
        match self {
            Self::Items(entries) => entries.len(),
            Self::Mounts(entries) => entries.len(),
            Self::Outfits(entries) => entries.len(),
            Self::Familiars(entries) => entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn page_entries<T>(
    pages: Vec<PageItems>,
    kind: SummaryKind,
    extract: fn(PageItems) -> Option<Vec<T>>,
) -> Result<Vec<Vec<T>>> {
    pages
        .into_iter()
        .map(|page| {
            extract(page)
                .ok_or_else(|| Error::invalid_argument(format!("page entries do not belong to {kind:?}")))
        })
        .collect()
}

/// A highlighted feature chosen by the seller for the auction listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesArgument {
    pub category_id: u32,
    pub category_image: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillEntry {
    pub name: String,
    pub level: u32,
    /// Percentage of progress towards the next level.
    pub progress: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlessingEntry {
    pub name: String,
    /// Charges of the blessing.
    pub amount: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharmEntry {
    pub name: String,
    /// Cost in charm points.
    pub cost: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementEntry {
    pub name: String,
    pub is_secret: bool,
}

/// Progress on a bestiary or bosstiary creature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BestiaryEntry {
    pub name: String,
    pub kills: u32,
    pub step: u8,
}

impl BestiaryEntry {
    pub fn is_completed(&self) -> bool {
        self.step == MAX_BESTIARY_STEP
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevealedGem {
    pub gem_type: String,
    pub mods: Vec<String>,
}

/// When the character may move to another world through a regular transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegularWorldTransfer {
    Immediate,
    After(DateTime<Utc>),
}

impl RegularWorldTransfer {
    pub fn is_available_at(self, now: DateTime<Utc>) -> bool {
        match self {
            Self::Immediate => true,
            Self::After(date) => now >= date,
        }
    }
}

/// Everything shown in an auction's detail page besides the listing header.
///
/// Stats are `None` when their table was missing from the page. Collections whose block was
/// missing are left empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuctionDetails {
    pub hit_points: Option<u32>,
    pub mana: Option<u32>,
    /// Capacity in ounces.
    pub capacity: Option<u32>,
    pub speed: Option<u32>,
    pub blessings_count: Option<u32>,
    pub mounts_count: Option<u32>,
    pub outfits_count: Option<u32>,
    pub titles_count: Option<u32>,
    pub skills: Vec<SkillEntry>,
    pub creation_date: Option<DateTime<Utc>>,
    pub experience: Option<u64>,
    pub gold: Option<u64>,
    pub achievement_points: Option<u32>,
    /// `None` when the transfer row was missing or its date could not be read.
    pub regular_world_transfer: Option<RegularWorldTransfer>,
    pub charm_expansion: Option<bool>,
    pub available_charm_points: Option<u32>,
    pub spent_charm_points: Option<u32>,
    pub prey_wildcards: Option<u32>,
    pub daily_reward_streak: Option<u32>,
    pub hunting_task_points: Option<u32>,
    pub permanent_hunting_task_slots: Option<u32>,
    pub permanent_prey_slots: Option<u32>,
    pub hirelings: Option<u32>,
    pub hireling_jobs: Option<u32>,
    pub hireling_outfits: Option<u32>,
    pub exalted_dust: Option<u32>,
    pub exalted_dust_limit: Option<u32>,
    pub boss_points: Option<u32>,
    pub bonus_promotion_points: Option<u32>,
    pub items: ItemSummary,
    pub store_items: ItemSummary,
    pub mounts: Mounts,
    pub store_mounts: Mounts,
    pub outfits: Outfits,
    pub store_outfits: Outfits,
    pub familiars: Familiars,
    pub blessings: Vec<BlessingEntry>,
    pub imbuements: Vec<String>,
    pub charms: Vec<CharmEntry>,
    pub completed_cyclopedia_map_areas: Vec<String>,
    pub completed_quest_lines: Vec<String>,
    pub titles: Vec<String>,
    pub achievements: Vec<AchievementEntry>,
    pub bestiary_progress: Vec<BestiaryEntry>,
    pub bosstiary_progress: Vec<BestiaryEntry>,
    pub revealed_gems: Vec<RevealedGem>,
}

impl AuctionDetails {
    pub fn completed_bestiary_entries(&self) -> Vec<&BestiaryEntry> {
        self.bestiary_progress
            .iter()
            .filter(|e| e.is_completed())
            .collect()
    }

    /// Whether a regular world transfer is possible now, if the page said when it would be.
    pub fn regular_world_transfer_available(&self) -> Option<bool> {
        self.regular_world_transfer
            .map(|transfer| transfer.is_available_at(Utc::now()))
    }

    pub fn skills_map(&self) -> HashMap<&str, &SkillEntry> {
        self.skills.iter().map(|s| (s.name.as_str(), s)).collect()
    }

    /// The continuation pages still missing from one of the paginated collections.
    pub fn remaining_pages(&self, kind: SummaryKind) -> RangeInclusive<u32> {
        match kind {
            SummaryKind::Items => self.items.remaining_pages(),
            SummaryKind::StoreItems => self.store_items.remaining_pages(),
            SummaryKind::Mounts => self.mounts.remaining_pages(),
            SummaryKind::StoreMounts => self.store_mounts.remaining_pages(),
            SummaryKind::Outfits => self.outfits.remaining_pages(),
            SummaryKind::StoreOutfits => self.store_outfits.remaining_pages(),
            SummaryKind::Familiars => self.familiars.remaining_pages(),
        }
    }

    /// Append continuation pages, in page order, to a collection and mark it fully fetched.
    ///
    /// Fails without modifying anything if a page holds entries of another kind of collection.
    /// Pages given for a collection that is already fully fetched are ignored.
    pub fn merge_pages(&mut self, kind: SummaryKind, pages: Vec<PageItems>) -> Result<()> {
        let items = |page: PageItems| match page {
            PageItems::Items(entries) => Some(entries),
            _ => None,
        };
        let mounts = |page: PageItems| match page {
            PageItems::Mounts(entries) => Some(entries),
            _ => None,
        };
        let outfits = |page: PageItems| match page {
            PageItems::Outfits(entries) => Some(entries),
            _ => None,
        };
        let familiars = |page: PageItems| match page {
            PageItems::Familiars(entries) => Some(entries),
            _ => None,
        };
        match kind {
            SummaryKind::Items => self.items.extend_pages(page_entries(pages, kind, items)?),
            SummaryKind::StoreItems => self.store_items.extend_pages(page_entries(pages, kind, items)?),
            SummaryKind::Mounts => self.mounts.extend_pages(page_entries(pages, kind, mounts)?),
            SummaryKind::StoreMounts => self.store_mounts.extend_pages(page_entries(pages, kind, mounts)?),
            SummaryKind::Outfits => self.outfits.extend_pages(page_entries(pages, kind, outfits)?),
            SummaryKind::StoreOutfits => self.store_outfits.extend_pages(page_entries(pages, kind, outfits)?),
            SummaryKind::Familiars => self.familiars.extend_pages(page_entries(pages, kind, familiars)?),
        }
        Ok(())
    }
}

/// An auction as shown in the bazaar list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuctionEntry {
    pub auction_id: u32,
    pub name: String,
    pub level: Option<u32>,
    pub world: Option<String>,
    pub vocation: Option<Vocation>,
    pub sex: Option<Sex>,
    pub outfit: Option<OutfitImage>,
    /// The items highlighted by the seller, not the full inventory.
    pub displayed_items: Vec<ItemEntry>,
    pub sales_arguments: Vec<SalesArgument>,
    pub auction_start: Option<DateTime<Utc>>,
    pub auction_end: Option<DateTime<Utc>>,
    /// The displayed bid in Tibia Coins.
    pub bid: Option<u64>,
    pub bid_type: Option<BidType>,
    pub status: AuctionStatus,
}

impl AuctionEntry {
    /// The URL to the auction's detail page.
    pub fn url(&self) -> String {
        urls::auction_url(self.auction_id)
    }
}

impl CharacterLink for AuctionEntry {
    fn character_name(&self) -> &str {
        &self.name
    }
}

/// An auction with its detail page information.
///
/// `details` is `None` when only the listing information was parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Auction {
    #[serde(flatten)]
    pub entry: AuctionEntry,
    pub details: Option<AuctionDetails>,
}

impl Auction {
    pub fn url(&self) -> String {
        self.entry.url()
    }
}

impl CharacterLink for Auction {
    fn character_name(&self) -> &str {
        &self.entry.name
    }
}

/// A page of the character bazaar, either current auctions or the auction history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterBazaar {
    pub page: u32,
    pub total_pages: u32,
    pub results_count: u32,
    pub entries: Vec<AuctionEntry>,
    #[serde(rename = "type")]
    pub bazaar_type: BazaarType,
    pub filters: Option<AuctionFilters>,
}

impl CharacterBazaar {
    pub fn url(&self) -> Result<String> {
        self.page_url(self.page)
    }

    /// The URL to another page of these results, keeping the same filters.
    pub fn page_url(&self, page: u32) -> Result<String> {
        urls::bazaar_url(self.bazaar_type, page, self.filters.as_ref())
    }

    pub fn next_page_url(&self) -> Option<String> {
        if self.page >= self.total_pages {
            return None;
        }
        self.page_url(self.page + 1).ok()
    }

    pub fn previous_page_url(&self) -> Option<String> {
        if self.page <= 1 {
            return None;
        }
        self.page_url(self.page - 1).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn mount(name: &str, mount_id: u32) -> MountEntry {
        MountEntry {
            image_url: format!("https://static.tibia.com/images/charactertrade/mounts/{mount_id}.gif"),
            name: name.to_string(),
            mount_id,
        }
    }

    #[test]
    fn query_params_skip_unset_filters() {
        let filters = AuctionFilters {
            vocation: Some(AuctionVocationFilter::Knight),
            min_level: Some(1),
            max_level: Some(1000),
            order: Some(AuctionOrderDirection::HighestLatest),
            ..Default::default()
        };
        assert_eq!(
            filters.query_params(),
            vec![
                ("filter_profession", "3".to_string()),
                ("filter_levelrangefrom", "1".to_string()),
                ("filter_levelrangeto", "1000".to_string()),
                ("order_direction", "0".to_string()),
            ]
        );
        assert!(AuctionFilters::default().query_params().is_empty());
    }

    #[test]
    fn summary_lookups() {
        let mounts = Mounts {
            entries: vec![mount("Donkey", 387), mount("Shadow Draptor", 427), mount("Dragonling", 506)],
            ..Default::default()
        };
        assert_eq!(mounts.get_by_name("donkey").map(|m| m.mount_id), Some(387));
        assert_eq!(mounts.get_by_id(427).map(|m| m.name.as_str()), Some("Shadow Draptor"));
        assert_eq!(mounts.search("DRA").len(), 2);
        assert!(mounts.get_by_id(1).is_none());
    }

    #[test]
    fn empty_summary_defaults() {
        let outfits = Outfits::default();
        assert_eq!((outfits.page, outfits.total_pages, outfits.results_count), (1, 1, 0));
        assert!(outfits.entries.is_empty());
        assert!(!outfits.fully_fetched);
        assert!(outfits.remaining_pages().is_empty());
    }

    #[test]
    fn extend_pages_marks_fully_fetched() {
        let mut mounts = Mounts {
            total_pages: 3,
            entries: vec![mount("Donkey", 387)],
            ..Default::default()
        };
        assert_eq!(mounts.remaining_pages().collect::<Vec<_>>(), vec![2, 3]);
        mounts.extend_pages(vec![vec![mount("Shadow Draptor", 427)], vec![mount("Dragonling", 506)]]);
        assert!(mounts.fully_fetched);
        let ids: Vec<u32> = mounts.entries.iter().map(|m| m.mount_id).collect();
        assert_eq!(ids, vec![387, 427, 506]);

        assert!(mounts.remaining_pages().is_empty());
        mounts.extend_pages(vec![vec![mount("Shadow Draptor", 427)]]);
        assert_eq!(mounts.entries.len(), 3);
    }

    #[test]
    fn details_helpers() {
        let details = AuctionDetails {
            skills: vec![SkillEntry {
                name: "Distance Fighting".into(),
                level: 21,
                progress: 16.37,
            }],
            bestiary_progress: vec![
                BestiaryEntry { name: "Dragon".into(), kills: 50, step: 4 },
                BestiaryEntry { name: "Rat".into(), kills: 3, step: 1 },
            ],
            ..Default::default()
        };
        assert_eq!(details.completed_bestiary_entries().len(), 1);
        assert_eq!(details.skills_map()["Distance Fighting"].level, 21);
        assert_eq!(details.regular_world_transfer_available(), None);
    }

    #[test]
    fn regular_world_transfer_states() {
        let date = Utc.with_ymd_and_hms(2023, 11, 25, 9, 0, 0).unwrap();
        let blocked = RegularWorldTransfer::After(date);
        assert!(!blocked.is_available_at(date - chrono::Duration::hours(1)));
        assert!(blocked.is_available_at(date));
        assert!(RegularWorldTransfer::Immediate.is_available_at(date));

        let details = AuctionDetails {
            regular_world_transfer: Some(RegularWorldTransfer::Immediate),
            ..Default::default()
        };
        assert_eq!(details.regular_world_transfer_available(), Some(true));
    }

    #[test]
    fn merge_pages_checks_kind() {
        let mut details = AuctionDetails::default();
        details.store_mounts.total_pages = 2;
        details.store_mounts.entries.push(mount("Donkey", 387));

        let wrong = vec![PageItems::Familiars(Vec::new())];
        assert!(matches!(
            details.merge_pages(SummaryKind::StoreMounts, wrong),
            Err(Error::InvalidArgument(_))
        ));
        assert!(!details.store_mounts.fully_fetched);

        details
            .merge_pages(SummaryKind::StoreMounts, vec![PageItems::Mounts(vec![mount("Dragonling", 506)])])
            .unwrap();
        assert!(details.store_mounts.fully_fetched);
        assert_eq!(details.store_mounts.entries.len(), 2);
        assert!(!details.mounts.fully_fetched);

        details
            .merge_pages(SummaryKind::StoreMounts, vec![PageItems::Mounts(vec![mount("Dragonling", 506)])])
            .unwrap();
        assert_eq!(details.store_mounts.entries.len(), 2);
        assert!(details.remaining_pages(SummaryKind::StoreMounts).is_empty());
    }

    #[test]
    fn bazaar_page_urls() {
        let bazaar = CharacterBazaar {
            page: 1,
            total_pages: 2,
            results_count: 27,
            entries: Vec::new(),
            bazaar_type: BazaarType::History,
            filters: None,
        };
        assert!(bazaar.previous_page_url().is_none());
        assert_eq!(
            bazaar.next_page_url().as_deref(),
            Some("https://www.tibia.com/charactertrade/?subtopic=pastcharactertrades&currentpage=2")
        );
        assert!(bazaar.page_url(0).is_err());
    }
}
