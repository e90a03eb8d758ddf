//! Parsers for the paginated collections of an auction (items, mounts, outfits and familiars).

use crate::builders::AuctionDetailsBuilder;
use crate::html::parse_pagination;
use crate::models::{
    FamiliarEntry, ItemEntry, MountEntry, OutfitEntry, PageItems, Summary, SummaryKind,
};
use crate::utils::parse_integer;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use tracing::debug;

static ICON_BOX: LazyLock<Selector> = LazyLock::new(|| Selector::parse("div.CVIcon").unwrap());
static IMAGE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("img").unwrap());
static PAGE_NAVIGATION: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.BlockPageNavigationRow").unwrap());

static AMOUNT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^([\d,]+)x").unwrap());
static TIER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(.*)\s\(tier (\d)\)").unwrap());
pub(crate) static IMAGE_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+).(?:gif|png)").unwrap());
pub(crate) static IMAGE_ID_ADDONS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)_(\d)\.gif").unwrap());

/// The title and image URL of an icon box. Boxes missing either are empty slots.
fn icon_parts(icon_box: ElementRef<'_>) -> Option<(&str, String)> {
    let title = icon_box.value().attr("title")?;
    let image_url = icon_box.select(&IMAGE).next()?.value().attr("src")?;
    Some((title, image_url.to_string()))
}

fn image_id(image_url: &str) -> u32 {
    IMAGE_ID
        .captures(image_url)
        .and_then(|c| c[1].parse().ok())
        .unwrap_or_default()
}

/// Parse an item icon.
///
/// The title reads like `2x boots of haste (tier 1)`, optionally followed by more description
/// lines. The count prefix and the tier are both optional.
pub(crate) fn parse_item_box(icon_box: ElementRef<'_>) -> Option<ItemEntry> {
    let (title, image_url) = icon_parts(icon_box)?;
    let mut title = title.trim();
    let mut count = 1;
    if let Some(m) = AMOUNT.captures(title) {
        count = parse_integer(&m[1]).unwrap_or(1);
        title = title[m[0].len()..].trim();
    }

    let mut lines = title.lines();
    let mut name = lines.next().unwrap_or_default().trim().to_string();
    let description = lines
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    let mut tier = 0;
    if let Some(m) = TIER.captures(&name) {
        tier = m[2].parse().unwrap_or_default();
        name = m[1].to_string();
    }

    Some(ItemEntry {
        item_id: image_id(&image_url),
        image_url,
        name,
        description: (!description.is_empty()).then_some(description),
        count,
        tier,
    })
}

fn parse_mount_box(icon_box: ElementRef<'_>) -> Option<MountEntry> {
    let (title, image_url) = icon_parts(icon_box)?;
    Some(MountEntry {
        mount_id: image_id(&image_url),
        image_url,
        name: title.trim().to_string(),
    })
}

/// Outfit titles carry the unlocked addons in parentheses, which are left out of the name.
fn parse_outfit_box(icon_box: ElementRef<'_>) -> Option<OutfitEntry> {
    let (title, image_url) = icon_parts(icon_box)?;
    let (outfit_id, addons): (u32, u8) = IMAGE_ID_ADDONS
        .captures(&image_url)
        .map(|c| (c[1].parse().unwrap_or_default(), c[2].parse().unwrap_or_default()))
        .unwrap_or_default();
    Some(OutfitEntry {
        image_url,
        name: strip_parenthesis(title),
        outfit_id,
        addons,
    })
}

fn parse_familiar_box(icon_box: ElementRef<'_>) -> Option<FamiliarEntry> {
    let (title, image_url) = icon_parts(icon_box)?;
    Some(FamiliarEntry {
        familiar_id: image_id(&image_url),
        image_url,
        name: strip_parenthesis(title),
    })
}

fn strip_parenthesis(title: &str) -> String {
    title.split('(').next().unwrap_or_default().trim().to_string()
}

fn parse_boxes<T>(container: ElementRef<'_>, parse_box: fn(ElementRef<'_>) -> Option<T>) -> Vec<T> {
    container.select(&ICON_BOX).filter_map(parse_box).collect()
}

/// Parse the first page of a collection as shown in the detail page.
///
/// A block with no page navigation means the character has none of these, so the summary is
/// left empty.
fn parse_summary<T>(block: ElementRef<'_>, parse_box: fn(ElementRef<'_>) -> Option<T>) -> Summary<T> {
    let Some(navigation) = block.select(&PAGE_NAVIGATION).next() else {
        return Summary::default();
    };
    let mut summary = Summary::from_pagination(parse_pagination(navigation));
    summary.entries = parse_boxes(block, parse_box);
    summary
}

/// Parse a collection block of the detail page into the builder.
pub(crate) fn parse_summary_block(
    builder: &mut AuctionDetailsBuilder,
    kind: SummaryKind,
    block: ElementRef<'_>,
) {
    match kind {
        SummaryKind::Items => builder.items(parse_summary(block, parse_item_box)),
        SummaryKind::StoreItems => builder.store_items(parse_summary(block, parse_item_box)),
        SummaryKind::Mounts => builder.mounts(parse_summary(block, parse_mount_box)),
        SummaryKind::StoreMounts => builder.store_mounts(parse_summary(block, parse_mount_box)),
        SummaryKind::Outfits => builder.outfits(parse_summary(block, parse_outfit_box)),
        SummaryKind::StoreOutfits => builder.store_outfits(parse_summary(block, parse_outfit_box)),
        SummaryKind::Familiars => builder.familiars(parse_summary(block, parse_familiar_box)),
    };
}

/// Parse the entries of a continuation page of one of an auction's collections.
///
/// `content` is the HTML served for a page other than the first. The entries are returned in
/// page order, without any pagination information.
pub fn parse_page_items(content: &str, kind: SummaryKind) -> PageItems {
    let document = Html::parse_document(content);
    let root = document.root_element();
    let items = match kind {
        SummaryKind::Items | SummaryKind::StoreItems => PageItems::Items(parse_boxes(root, parse_item_box)),
        SummaryKind::Mounts | SummaryKind::StoreMounts => {
            PageItems::Mounts(parse_boxes(root, parse_mount_box))
        }
        SummaryKind::Outfits | SummaryKind::StoreOutfits => {
            PageItems::Outfits(parse_boxes(root, parse_outfit_box))
        }
        SummaryKind::Familiars => PageItems::Familiars(parse_boxes(root, parse_familiar_box)),
    };
    debug!(?kind, entries = items.len(), "Parsed continuation page");
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    fn icon(document: &Html) -> ElementRef<'_> {
        document.select(&ICON_BOX).next().unwrap()
    }

    #[test]
    fn item_with_count() {
        let document = Html::parse_fragment(
            r#"<div class="CVIcon CVIconObject" title="2x boots of haste"><img src="https://static.tibia.com/images/charactertrade/objects/3079.gif"></div>"#,
        );
        let item = parse_item_box(icon(&document)).unwrap();
        assert_eq!(item.name, "boots of haste");
        assert_eq!(item.count, 2);
        assert_eq!(item.item_id, 3079);
        assert_eq!(item.tier, 0);
        assert!(item.description.is_none());
    }

    #[test]
    fn item_with_tier_and_description() {
        let document = Html::parse_fragment(
            "<div class=\"CVIcon\" title=\"1,250x soulcutter (tier 3)\nImbuements: Vampirism\nCharges: 2\"><img src=\"/objects/34082.gif\"></div>",
        );
        let item = parse_item_box(icon(&document)).unwrap();
        assert_eq!(item.name, "soulcutter");
        assert_eq!(item.count, 1250);
        assert_eq!(item.tier, 3);
        assert_eq!(item.description.as_deref(), Some("Imbuements: Vampirism Charges: 2"));
        assert_eq!(item.item_id, 34082);
    }

    #[test]
    fn empty_slot_is_skipped() {
        let document = Html::parse_fragment(r#"<div class="CVIcon CVIconObject NoItem" title="(no item for display selected)"></div>"#);
        assert!(parse_item_box(icon(&document)).is_none());
    }

    #[test]
    fn outfit_name_and_addons() {
        let document = Html::parse_fragment(
            r#"<div class="CVIcon" title="Warrior (Base &amp; Addon 1)"><img src="https://static.tibia.com/images/charactertrade/outfits/134_1.gif"></div>"#,
        );
        let outfit = parse_outfit_box(icon(&document)).unwrap();
        assert_eq!(outfit.name, "Warrior");
        assert_eq!(outfit.outfit_id, 134);
        assert_eq!(outfit.addons, 1);
    }

    #[test]
    fn summary_without_navigation_is_empty() {
        let document = Html::parse_fragment(
            r#"<div class="CharacterDetailsBlock" id="Mounts"><div class="CVIcon" title="Donkey"><img src="/mounts/387.gif"></div></div>"#,
        );
        let block = document.root_element();
        let mounts = parse_summary(block, parse_mount_box);
        assert_eq!(mounts, Summary::default());
    }

    #[test]
    fn page_items_follow_kind() {
        let content = r#"<div class="CVIcon" title="Emberwing"><img src="/familiars/1234.gif"></div>
            <div class="CVIcon" title="Skullfrost"><img src="/familiars/1235.gif"></div>"#;
        match parse_page_items(content, SummaryKind::Familiars) {
            PageItems::Familiars(familiars) => {
                let ids: Vec<u32> = familiars.iter().map(|f| f.familiar_id).collect();
                assert_eq!(ids, vec![1234, 1235]);
            }
            other => panic!("unexpected page items: {other:?}"),
        }
        assert!(matches!(parse_page_items(content, SummaryKind::StoreOutfits), PageItems::Outfits(_)));
    }
}
