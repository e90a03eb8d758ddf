//! Parsers for the character bazaar list pages and auction detail pages.

use super::summary::{parse_item_box, parse_summary_block, IMAGE_ID, IMAGE_ID_ADDONS};
use super::tables;
use crate::builders::{AuctionBuilder, AuctionDetailsBuilder, CharacterBazaarBuilder};
use crate::error::{Error, Result};
use crate::html::{element_text, parse_form_data, parse_pagination, text_excluding, text_with_breaks};
use crate::models::{
    Auction, AuctionBattlEyeFilter, AuctionEntry, AuctionFilters, AuctionOrderBy,
    AuctionOrderDirection, AuctionSearchType, AuctionSkillFilter, AuctionStatus,
    AuctionVocationFilter, BazaarType, BidType, CharacterBazaar, OutfitImage, PvpTypeFilter,
    SalesArgument, Sex, SummaryKind, Vocation,
};
use crate::utils::{parse_integer, parse_tibia_datetime, query_param};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashMap;
use std::sync::LazyLock;
use tracing::{debug, info};

static BOX_CONTENT: LazyLock<Selector> = LazyLock::new(|| Selector::parse("div.BoxContent").unwrap());
static TABLE_CONTAINER: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.TableContainer").unwrap());
static FORM: LazyLock<Selector> = LazyLock::new(|| Selector::parse("form").unwrap());
static PAGE_NAVIGATION: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("td.PageNavigation").unwrap());
static AUCTION: LazyLock<Selector> = LazyLock::new(|| Selector::parse("div.Auction").unwrap());
static AUCTION_HEADER: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.AuctionHeader").unwrap());
static CHARACTER_NAME: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.AuctionCharacterName").unwrap());
static LINK: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a").unwrap());
static OUTFIT_IMAGE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("img.AuctionOutfitImage").unwrap());
static ICON_BOX: LazyLock<Selector> = LazyLock::new(|| Selector::parse("div.CVIcon").unwrap());
static SHORT_DATA: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.ShortAuctionData").unwrap());
static SHORT_DATA_VALUE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.ShortAuctionDataValue").unwrap());
static BID_ROW: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.ShortAuctionDataBidRow").unwrap());
static SHORT_DATA_LABEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.ShortAuctionDataLabel").unwrap());
static AUCTION_INFO: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.CurrentBid div.AuctionInfo").unwrap());
static SALES_ARGUMENT: LazyLock<Selector> = LazyLock::new(|| Selector::parse("div.Entry").unwrap());
static IMAGE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("img").unwrap());
static DETAILS_BLOCK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.CharacterDetailsBlock[id]").unwrap());

static CHARACTER_INFO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Level: (\d+) \| Vocation: ([\w\s]+)\| (\w+) \| World: (\w+)").unwrap()
});

/// Parse a page of the character bazaar, either current auctions or the auction history.
///
/// Both sections share their layout, but only current auctions show the filter form. A page
/// with no auctions is a valid, empty result.
pub fn parse_character_bazaar(content: &str) -> Result<CharacterBazaar> {
    let document = Html::parse_document(content);
    let content_box = document
        .select(&BOX_CONTENT)
        .next()
        .ok_or_else(|| Error::invalid_content("content does not belong to the bazaar at Tibia.com"))?;
    let tables: Vec<ElementRef<'_>> = content_box.select(&TABLE_CONTAINER).collect();
    if tables.is_empty() {
        return Err(Error::invalid_content("content does not belong to the bazaar at Tibia.com"));
    }

    let filter_table = tables
        .iter()
        .find(|table| table.select(&AUCTION).next().is_none() && table.select(&FORM).next().is_some());
    let bazaar_type = match filter_table {
        Some(_) => BazaarType::Current,
        None => BazaarType::History,
    };
    debug!(?bazaar_type, tables = tables.len(), "Resolved bazaar type");

    let mut builder = CharacterBazaarBuilder::new(bazaar_type);
    if let Some(table) = filter_table {
        builder.filters(parse_filters(*table));
    }
    if let Some(navigation) = document.select(&PAGE_NAVIGATION).next() {
        builder.pagination(parse_pagination(navigation));
    }
    for row in content_box.select(&AUCTION) {
        builder.add_entry(parse_auction_entry(row, 0)?);
    }

    let bazaar = builder.build();
    info!(
        page = bazaar.page,
        total_pages = bazaar.total_pages,
        entries = bazaar.entries.len(),
        "Parsed character bazaar"
    );
    Ok(bazaar)
}

/// Parse an auction's detail page.
///
/// The auction id is not shown in the page when the character no longer exists, so it must be
/// supplied by the caller. Returns `None` when Tibia.com reports the auction does not exist.
/// With `skip_details`, only the information shown in the bazaar list is parsed.
pub fn parse_auction(content: &str, auction_id: u32, skip_details: bool) -> Result<Option<Auction>> {
    let document = Html::parse_document(content);
    let Some(row) = document.select(&AUCTION).next() else {
        if content.to_lowercase().contains("internal error") {
            debug!(auction_id, "Auction not found");
            return Ok(None);
        }
        return Err(Error::invalid_content(
            "content does not belong to an auction details page in Tibia.com",
        ));
    };

    let entry = parse_auction_entry(row, auction_id)?;
    if skip_details {
        return Ok(Some(Auction { entry, details: None }));
    }

    let blocks: HashMap<&str, ElementRef<'_>> = document
        .select(&DETAILS_BLOCK)
        .filter_map(|block| block.value().attr("id").map(|id| (id, block)))
        .collect();
    debug!(auction_id = entry.auction_id, blocks = blocks.len(), "Found detail blocks");

    let mut builder = AuctionDetailsBuilder::new();
    if let Some(block) = blocks.get("General") {
        tables::parse_general(&mut builder, *block);
    }
    for kind in SummaryKind::ALL {
        if let Some(block) = blocks.get(kind.block_id()) {
            parse_summary_block(&mut builder, kind, *block);
        }
    }
    if let Some(block) = blocks.get("Blessings") {
        builder.blessings(tables::parse_blessings(*block));
    }
    if let Some(block) = blocks.get("Imbuements") {
        builder.imbuements(tables::parse_single_column(*block));
    }
    if let Some(block) = blocks.get("Charms") {
        builder.charms(tables::parse_charms(*block));
    }
    if let Some(block) = blocks.get("CompletedCyclopediaMapAreas") {
        builder.completed_cyclopedia_map_areas(tables::parse_single_column(*block));
    }
    if let Some(block) = blocks.get("CompletedQuestLines") {
        builder.completed_quest_lines(tables::parse_single_column(*block));
    }
    if let Some(block) = blocks.get("Titles") {
        builder.titles(tables::parse_single_column(*block));
    }
    if let Some(block) = blocks.get("Achievements") {
        builder.achievements(tables::parse_achievements(*block));
    }
    if let Some(block) = blocks.get("BestiaryProgress") {
        builder.bestiary_progress(tables::parse_bestiary(*block));
    }
    if let Some(block) = blocks.get("BosstiaryProgress") {
        builder.bosstiary_progress(tables::parse_bestiary(*block));
    }
    if let Some(block) = blocks.get("RevealedGems") {
        builder.revealed_gems(tables::parse_revealed_gems(*block));
    }

    Ok(Some(Auction {
        entry,
        details: Some(builder.build()),
    }))
}

/// Read the filter form of the current auctions page.
///
/// The table holds the filter form and, after it, the search form.
fn parse_filters(table: ElementRef<'_>) -> AuctionFilters {
    let mut forms = table.select(&FORM);
    let mut filters = AuctionFilters::default();
    let Some(form) = forms.next() else {
        return filters;
    };

    let data = parse_form_data(form);
    let number = |name: &str| data.value(name).and_then(parse_integer::<i32>);
    filters.world = data
        .value("filter_world")
        .filter(|world| !world.is_empty())
        .map(str::to_string);
    filters.available_worlds = data
        .options("filter_world")
        .iter()
        .filter(|(label, value)| !label.contains('(') && !value.is_empty())
        .map(|(label, _)| label.clone())
        .collect();
    filters.pvp_type = number("filter_worldpvptype").and_then(PvpTypeFilter::from_value);
    filters.battleye = number("filter_worldbattleyestate").and_then(AuctionBattlEyeFilter::from_value);
    filters.vocation = number("filter_profession").and_then(AuctionVocationFilter::from_value);
    filters.min_level = data.value("filter_levelrangefrom").and_then(parse_integer);
    filters.max_level = data.value("filter_levelrangeto").and_then(parse_integer);
    filters.skill = number("filter_skillid").and_then(AuctionSkillFilter::from_value);
    filters.min_skill_level = data.value("filter_skillrangefrom").and_then(parse_integer);
    filters.max_skill_level = data.value("filter_skillrangeto").and_then(parse_integer);
    filters.order_by = number("order_column").and_then(AuctionOrderBy::from_value);
    filters.order = number("order_direction").and_then(AuctionOrderDirection::from_value);

    if let Some(form) = forms.next() {
        let search = parse_form_data(form);
        filters.search_string = search
            .value("searchstring")
            .filter(|text| !text.is_empty())
            .map(str::to_string);
        filters.search_type = search
            .value("searchtype")
            .and_then(parse_integer::<i32>)
            .and_then(AuctionSearchType::from_value);
    }
    filters
}

/// Parse the listing information of an auction block, shared by list and detail pages.
///
/// `auction_id` is used when the block has no link to read the id from.
pub(crate) fn parse_auction_entry(row: ElementRef<'_>, auction_id: u32) -> Result<AuctionEntry> {
    let header = row
        .select(&AUCTION_HEADER)
        .next()
        .ok_or_else(|| Error::invalid_content("auction block has no header"))?;
    let name_container = header
        .select(&CHARACTER_NAME)
        .next()
        .ok_or_else(|| Error::invalid_content("auction block has no character name"))?;

    let mut builder = AuctionBuilder::new();
    builder.auction_id(auction_id);
    match name_container.select(&LINK).next() {
        Some(link) => {
            let linked_id = link
                .value()
                .attr("href")
                .and_then(|href| query_param(href, "auctionid"))
                .and_then(|id| id.parse().ok());
            if let Some(id) = linked_id {
                builder.auction_id(id);
            }
            builder.name(element_text(link));
        }
        None => {
            builder.name(element_text(name_container));
        }
    }

    let info = text_excluding(header, name_container);
    if let Some(c) = CHARACTER_INFO.captures(&info) {
        builder.character_info(
            c[1].parse().ok(),
            Vocation::from_text(&c[2]),
            Sex::from_text(&c[3]),
            Some(c[4].to_string()),
        );
    }

    if let Some(image_url) = row
        .select(&OUTFIT_IMAGE)
        .next()
        .and_then(|img| img.value().attr("src"))
    {
        if let Some(c) = IMAGE_ID_ADDONS.captures(image_url) {
            builder.outfit(OutfitImage {
                image_url: image_url.to_string(),
                outfit_id: c[1].parse().unwrap_or_default(),
                addons: c[2].parse().unwrap_or_default(),
            });
        }
    }

    for item in row.select(&ICON_BOX).filter_map(parse_item_box) {
        builder.add_displayed_item(item);
    }

    if let Some(short_data) = row.select(&SHORT_DATA).next() {
        let mut values = short_data.select(&SHORT_DATA_VALUE);
        builder.auction_start(values.next().and_then(|v| parse_tibia_datetime(&element_text(v))));
        builder.auction_end(values.next().and_then(|v| parse_tibia_datetime(&element_text(v))));
    }

    if let Some(bid_row) = row.select(&BID_ROW).next() {
        let bid_type = bid_row
            .select(&SHORT_DATA_LABEL)
            .next()
            .and_then(|label| BidType::from_label(&element_text(label)));
        let bid = bid_row
            .select(&SHORT_DATA_VALUE)
            .next()
            .and_then(|value| parse_integer(&element_text(value)));
        builder.bid(bid, bid_type);
    }

    let status = row
        .select(&AUCTION_INFO)
        .next()
        .and_then(|info| AuctionStatus::from_text(&text_with_breaks(info).replace('\n', " ")))
        .unwrap_or_default();
    builder.status(status);

    for argument in row.select(&SALES_ARGUMENT) {
        let Some(image_url) = argument
            .select(&IMAGE)
            .next()
            .and_then(|img| img.value().attr("src"))
        else {
            continue;
        };
        builder.add_sales_argument(SalesArgument {
            category_id: IMAGE_ID
                .captures(image_url)
                .and_then(|c| c[1].parse().ok())
                .unwrap_or_default(),
            category_image: image_url.to_string(),
            content: element_text(argument),
        });
    }

    builder.build()
}
