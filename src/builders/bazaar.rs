//! Builders accumulating values while a bazaar page is being parsed.
//!
//! The information of a single record is scattered across many unrelated fragments of the
//! page, so parsers feed whatever they find into a builder and build the record at the end.

use crate::error::{Error, Result};
use crate::html::Pagination;
use crate::models::{
    AchievementEntry, AuctionDetails, AuctionEntry, AuctionFilters, AuctionStatus, BazaarType,
    BestiaryEntry, BidType, BlessingEntry, CharacterBazaar, CharmEntry, Familiars, ItemEntry,
    ItemSummary, Mounts, OutfitImage, Outfits, RegularWorldTransfer, RevealedGem, SalesArgument,
    Sex, SkillEntry, Vocation,
};
use chrono::{DateTime, Utc};

/// Builds a page of the character bazaar.
#[derive(Debug, Clone)]
pub struct CharacterBazaarBuilder {
    bazaar_type: BazaarType,
    pagination: Pagination,
    entries: Vec<AuctionEntry>,
    filters: Option<AuctionFilters>,
}

impl CharacterBazaarBuilder {
    pub fn new(bazaar_type: BazaarType) -> Self {
        Self {
            bazaar_type,
            pagination: Pagination::default(),
            entries: Vec::new(),
            filters: None,
        }
    }

    pub fn pagination(&mut self, pagination: Pagination) -> &mut Self {
        self.pagination = pagination;
        self
    }

    pub fn filters(&mut self, filters: AuctionFilters) -> &mut Self {
        self.filters = Some(filters);
        self
    }

    pub fn add_entry(&mut self, entry: AuctionEntry) -> &mut Self {
        self.entries.push(entry);
        self
    }

    pub fn build(self) -> CharacterBazaar {
        CharacterBazaar {
            page: self.pagination.page,
            total_pages: self.pagination.total_pages,
            results_count: self.pagination.results_count,
            entries: self.entries,
            bazaar_type: self.bazaar_type,
            filters: self.filters,
        }
    }
}

/// Builds the listing information of an auction.
#[derive(Debug, Clone, Default)]
pub struct AuctionBuilder {
    auction_id: u32,
    name: Option<String>,
    level: Option<u32>,
    world: Option<String>,
    vocation: Option<Vocation>,
    sex: Option<Sex>,
    outfit: Option<OutfitImage>,
    displayed_items: Vec<ItemEntry>,
    sales_arguments: Vec<SalesArgument>,
    auction_start: Option<DateTime<Utc>>,
    auction_end: Option<DateTime<Utc>>,
    bid: Option<u64>,
    bid_type: Option<BidType>,
    status: AuctionStatus,
}

impl AuctionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn auction_id(&mut self, auction_id: u32) -> &mut Self {
        self.auction_id = auction_id;
        self
    }

    pub fn name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = Some(name.into());
        self
    }

    /// Level, vocation, sex and world come together from the auction header.
    pub fn character_info(
        &mut self,
        level: Option<u32>,
        vocation: Option<Vocation>,
        sex: Option<Sex>,
        world: Option<String>,
    ) -> &mut Self {
        self.level = level;
        self.vocation = vocation;
        self.sex = sex;
        self.world = world;
        self
    }

    pub fn outfit(&mut self, outfit: OutfitImage) -> &mut Self {
        self.outfit = Some(outfit);
        self
    }

    pub fn add_displayed_item(&mut self, item: ItemEntry) -> &mut Self {
        self.displayed_items.push(item);
        self
    }

    pub fn add_sales_argument(&mut self, argument: SalesArgument) -> &mut Self {
        self.sales_arguments.push(argument);
        self
    }

    pub fn auction_start(&mut self, auction_start: Option<DateTime<Utc>>) -> &mut Self {
        self.auction_start = auction_start;
        self
    }

    pub fn auction_end(&mut self, auction_end: Option<DateTime<Utc>>) -> &mut Self {
        self.auction_end = auction_end;
        self
    }

    pub fn bid(&mut self, bid: Option<u64>, bid_type: Option<BidType>) -> &mut Self {
        self.bid = bid;
        self.bid_type = bid_type;
        self
    }

    pub fn status(&mut self, status: AuctionStatus) -> &mut Self {
        self.status = status;
        self
    }

    /// Fails when no character name was found.
    pub fn build(self) -> Result<AuctionEntry> {
        let name = self
            .name
            .filter(|name| !name.is_empty())
            .ok_or_else(|| Error::invalid_content("auction has no character name"))?;
        Ok(AuctionEntry {
            auction_id: self.auction_id,
            name,
            level: self.level,
            world: self.world,
            vocation: self.vocation,
            sex: self.sex,
            outfit: self.outfit,
            displayed_items: self.displayed_items,
            sales_arguments: self.sales_arguments,
            auction_start: self.auction_start,
            auction_end: self.auction_end,
            bid: self.bid,
            bid_type: self.bid_type,
            status: self.status,
        })
    }
}

/// Generates setters for optional stats. A `None` leaves the stat unknown.
macro_rules! stat_setters {
    ($($field:ident: $ty:ty),+ $(,)?) => {
        $(
            pub fn $field(&mut self, value: Option<$ty>) -> &mut Self {
                self.details.$field = value;
                self
            }
        )+
    };
}

/// Generates setters for the collections of the detail page.
macro_rules! collection_setters {
    ($($field:ident: $ty:ty),+ $(,)?) => {
        $(
            pub fn $field(&mut self, value: $ty) -> &mut Self {
                self.details.$field = value;
                self
            }
        )+
    };
}

/// Builds the detail page information of an auction.
///
/// Setters are only called for blocks found in the page, everything else keeps its empty value.
#[derive(Debug, Clone, Default)]
pub struct AuctionDetailsBuilder {
    details: AuctionDetails,
}

impl AuctionDetailsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    stat_setters! {
        hit_points: u32,
        mana: u32,
        capacity: u32,
        speed: u32,
        blessings_count: u32,
        mounts_count: u32,
        outfits_count: u32,
        titles_count: u32,
        creation_date: DateTime<Utc>,
        experience: u64,
        gold: u64,
        achievement_points: u32,
        regular_world_transfer: RegularWorldTransfer,
        charm_expansion: bool,
        available_charm_points: u32,
        spent_charm_points: u32,
        prey_wildcards: u32,
        daily_reward_streak: u32,
        hunting_task_points: u32,
        permanent_hunting_task_slots: u32,
        permanent_prey_slots: u32,
        hirelings: u32,
        hireling_jobs: u32,
        hireling_outfits: u32,
        exalted_dust: u32,
        exalted_dust_limit: u32,
        boss_points: u32,
        bonus_promotion_points: u32,
    }

    collection_setters! {
        skills: Vec<SkillEntry>,
        items: ItemSummary,
        store_items: ItemSummary,
        mounts: Mounts,
        store_mounts: Mounts,
        outfits: Outfits,
        store_outfits: Outfits,
        familiars: Familiars,
        blessings: Vec<BlessingEntry>,
        imbuements: Vec<String>,
        charms: Vec<CharmEntry>,
        completed_cyclopedia_map_areas: Vec<String>,
        completed_quest_lines: Vec<String>,
        titles: Vec<String>,
        achievements: Vec<AchievementEntry>,
        bestiary_progress: Vec<BestiaryEntry>,
        bosstiary_progress: Vec<BestiaryEntry>,
        revealed_gems: Vec<RevealedGem>,
    }

    pub fn build(self) -> AuctionDetails {
        self.details
    }
}
