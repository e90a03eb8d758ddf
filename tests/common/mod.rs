//! HTML fixtures shaped like Tibia.com's character bazaar pages.
#![allow(dead_code)]

pub const STATIC: &str = "https://static.tibia.com/images/charactertrade";

/// The page links and results count shared by list pages and detail blocks.
pub fn page_navigation(current: u32, total: u32, results: u32) -> String {
    let links: String = (1..=total)
        .map(|page| {
            if page == current {
                format!(r#"<span class="CurrentPageLink">{page}</span>"#)
            } else {
                format!(
                    r#"<span class="PageLink"><a href="https://www.tibia.com/charactertrade/?subtopic=currentcharactertrades&amp;currentpage={page}">{page}</a></span>"#
                )
            }
        })
        .collect();
    format!(r#"<small><div class="PageLinks"><b>Pages: {links}</b></div><div class="Results"><b>Results: {results}</b></div></small>"#)
}

pub struct AuctionFixture<'a> {
    pub auction_id: u32,
    pub name: &'a str,
    pub level: u32,
    pub vocation: &'a str,
    pub world: &'a str,
    pub bid_label: &'a str,
    pub bid: &'a str,
    pub status: Option<&'a str>,
    pub linked: bool,
}

impl Default for AuctionFixture<'_> {
    fn default() -> Self {
        Self {
            auction_id: 325058,
            name: "Knight Guy",
            level: 250,
            vocation: "Elite Knight",
            world: "Antica",
            bid_label: "Current Bid:",
            bid: "1,500",
            status: None,
            linked: true,
        }
    }
}

impl AuctionFixture<'_> {
    pub fn html(&self) -> String {
        let name = if self.linked {
            format!(
                r#"<a href="https://www.tibia.com/charactertrade/?subtopic=currentcharactertrades&amp;page=details&amp;auctionid={}&amp;source=overview">{}</a>"#,
                self.auction_id, self.name
            )
        } else {
            self.name.to_string()
        };
        let status = self
            .status
            .map(|status| format!(r#"<div class="AuctionInfo">{status}</div>"#))
            .unwrap_or_default();
        format!(
            r#"<div class="Auction">
  <div class="AuctionHeader"><div class="AuctionCharacterName">{name}</div>Level: {level} | Vocation: {vocation} | Male | World: {world}<br></div>
  <div class="AuctionBody">
    <div class="AuctionBodyBlock AuctionDisplay AuctionOutfit"><img class="AuctionOutfitImage" src="{STATIC}/outfits/131_3.gif"></div>
    <div class="AuctionBodyBlock AuctionDisplay AuctionItemsViewBox">
      <div class="CVIcon CVIconObject" title="2x boots of haste"><img src="{STATIC}/objects/3079.gif"></div>
      <div class="CVIcon CVIconObject" title="falcon longsword (tier 2)"><img src="{STATIC}/objects/28723.gif"></div>
      <div class="CVIcon CVIconObject NoItem" title="(no item for display selected)"></div>
    </div>
    <div class="ShortAuctionData">
      <div class="ShortAuctionDataLabel">Auction Start:</div><div class="ShortAuctionDataValue">Nov&#160;20&#160;2023,&#160;10:00&#160;CET</div>
      <div class="ShortAuctionDataLabel">Auction End:</div><div class="ShortAuctionDataValue">Nov&#160;25&#160;2023,&#160;18:00&#160;CET</div>
      <div class="ShortAuctionDataBidRow"><div class="ShortAuctionDataLabel">{bid_label}</div><div class="ShortAuctionDataValue"><b>{bid}</b></div></div>
    </div>
    <div class="AuctionBodyBlock CurrentBid"><div class="Container">{status}</div></div>
    <div class="AuctionBodyBlock SpecialCharacterFeatures">
      <div class="Entry"><img src="{STATIC}/usp-category-3.png">Level 250 Elite Knight with full imbuements</div>
      <div class="Entry"><img src="{STATIC}/usp-category-7.png">Access to Roshamuul</div>
    </div>
  </div>
</div>"#,
            level = self.level,
            vocation = self.vocation,
            world = self.world,
            bid_label = self.bid_label,
            bid = self.bid,
        )
    }
}

fn option(value: &str, label: &str, selected: &str) -> String {
    let mark = if value == selected && !value.is_empty() { " selected" } else { "" };
    format!(r#"<option value="{value}"{mark}>{label}</option>"#)
}

/// The filter and search forms of the current auctions page.
pub fn filter_forms(world: &str, pvp_type: &str, battleye: &str, min_level: u32, max_level: u32) -> String {
    let worlds: String = [("", "(all worlds)"), ("Antica", "Antica"), ("Belobra", "Belobra"), ("Celesta", "Celesta")]
        .iter()
        .map(|(value, label)| option(value, label, world))
        .collect();
    let pvp_types: String = [("", "(all PvP types)"), ("0", "Open PvP"), ("1", "Optional PvP"), ("2", "Hardcore PvP")]
        .iter()
        .map(|(value, label)| option(value, label, pvp_type))
        .collect();
    let battleye_types: String = [("", "(all BattlEye types)"), ("1", "Initially Protected"), ("2", "Protected"), ("3", "Unprotected")]
        .iter()
        .map(|(value, label)| option(value, label, battleye))
        .collect();
    format!(
        r#"<form action="https://www.tibia.com/charactertrade/" method="get">
  <input type="hidden" name="subtopic" value="currentcharactertrades">
  <select name="filter_world">{worlds}</select>
  <select name="filter_worldpvptype">{pvp_types}</select>
  <select name="filter_worldbattleyestate">{battleye_types}</select>
  <select name="filter_profession"><option value="">(all vocations)</option><option value="3">Knight</option></select>
  <input type="text" name="filter_levelrangefrom" value="{min_level}">
  <input type="text" name="filter_levelrangeto" value="{max_level}">
  <select name="order_column"><option value="101" selected>End Date</option><option value="100">Bid</option></select>
  <select name="order_direction"><option value="0">Highest / Latest</option><option value="1" selected>Lowest / Earliest</option></select>
</form>
<form action="https://www.tibia.com/charactertrade/" method="get">
  <input type="text" name="searchstring" value="">
  <input type="radio" name="searchtype" value="0" checked>Item Default
  <input type="radio" name="searchtype" value="2">Character Name
</form>"#
    )
}

/// A bazaar list page. The filter table is only rendered when `filters` is given.
pub fn bazaar_page(filters: Option<String>, auctions: &[String], navigation: Option<(u32, u32, u32)>) -> String {
    let filter_table = filters
        .map(|forms| {
            format!(r#"<div class="TableContainer"><div class="Text">Auction Filter</div><table><tr><td>{forms}</td></tr></table></div>"#)
        })
        .unwrap_or_default();
    let navigation = navigation
        .map(|(current, total, results)| {
            format!(
                r#"<table><tr><td class="PageNavigation">{}</td></tr></table>"#,
                page_navigation(current, total, results)
            )
        })
        .unwrap_or_default();
    format!(
        r#"<html><body><div id="currentcharactertrades" class="Box"><div class="BoxContent">
{filter_table}
<div class="TableContainer"><div class="Text">Auctions</div>{navigation}<div class="TableContentContainer">{}</div>{navigation}</div>
</div></div></body></html>"#,
        auctions.concat()
    )
}

pub fn detail_page(auction: &str, blocks: &[String]) -> String {
    format!(
        r#"<html><body><div class="BoxContent"><div class="TableContainer">{auction}</div>{}</div></body></html>"#,
        blocks.concat()
    )
}

pub fn details_block(id: &str, inner: &str) -> String {
    format!(r#"<div class="CharacterDetailsBlock" id="{id}"><div class="TableContainer">{inner}</div></div>"#)
}

pub fn content_table(rows: &[String]) -> String {
    format!(r#"<table class="TableContent">{}</table>"#, rows.concat())
}

pub fn row(cells: &[&str]) -> String {
    let cells: String = cells.iter().map(|cell| format!("<td>{cell}</td>")).collect();
    format!("<tr>{cells}</tr>")
}

pub fn data_row(label: &str, value: &str) -> String {
    format!(r#"<tr><td><span class="LabelV">{label}</span><div>{value}</div></td></tr>"#)
}

fn data_table(rows: &[(&str, &str)]) -> String {
    let rows: Vec<String> = rows.iter().map(|(label, value)| data_row(label, value)).collect();
    content_table(&rows)
}

/// A "General" block using the layout with all eleven tables.
pub fn general_block() -> String {
    let tables = [
        data_table(&[
            ("Hit Points:", "1,255"),
            ("Mana:", "830"),
            ("Capacity:", "2,990"),
            ("Speed:", "221"),
            ("Blessings:", "5/7"),
            ("Mounts:", "12"),
            ("Outfits:", "30"),
            ("Titles:", "4"),
        ]),
        content_table(&[
            row(&["Axe Fighting", "20", "12.34 %"]),
            row(&["Magic Level", "9", "50.00 %"]),
        ]),
        data_table(&[
            ("Creation Date:", "Jul&#160;23&#160;2015,&#160;19:45:10&#160;CEST"),
            ("Experience:", "1,234,567"),
            ("Gold:", "98,765"),
            ("Achievement Points:", "102"),
        ]),
        data_table(&[("Regular World Transfer:", "after Nov&#160;25&#160;2023,&#160;10:00:00&#160;CET")]),
        data_table(&[
            ("Charm Expansion:", "yes"),
            ("Available Charm Points:", "350"),
            ("Spent Charm Points:", "1,200"),
        ]),
        data_table(&[("Daily Reward Streak:", "7")]),
        data_table(&[
            ("Hunting Task Points:", "1,500"),
            ("Permanent Hunting Task Slots:", "1"),
            ("Permanent Prey Slots:", "2"),
            ("Prey Wildcards:", "45"),
        ]),
        data_table(&[("Hirelings:", "1"), ("Hireling Jobs:", "3"), ("Hireling Outfits:", "2")]),
        data_table(&[("Exalted Dust:", "35/100")]),
        data_table(&[("Boss Points:", "1,230")]),
        data_table(&[("Bonus Promotion Points:", "25")]),
    ];
    details_block("General", &tables.concat())
}

pub fn icon(title: &str, image_url: &str) -> String {
    format!(r#"<div class="CVIcon CVIconObject" title="{title}"><img src="{image_url}"></div>"#)
}

pub fn item_icon(title: &str, item_id: u32) -> String {
    icon(title, &format!("{STATIC}/objects/{item_id}.gif"))
}

pub fn mount_icon(name: &str, mount_id: u32) -> String {
    icon(name, &format!("{STATIC}/mounts/{mount_id}.gif"))
}

pub fn outfit_icon(title: &str, outfit_id: u32, addons: u8) -> String {
    icon(title, &format!("{STATIC}/outfits/{outfit_id}_{addons}.gif"))
}

/// A collection block. Without `navigation` the block is rendered the way Tibia.com shows an
/// empty collection.
pub fn summary_block(id: &str, icons: &[String], navigation: Option<(u32, u32, u32)>) -> String {
    let navigation = navigation
        .map(|(current, total, results)| {
            format!(
                r#"<div class="BlockPageNavigationRow">{}</div>"#,
                page_navigation(current, total, results)
            )
        })
        .unwrap_or_default();
    details_block(
        id,
        &format!(r#"{navigation}<div class="TableContentContainer">{}</div>"#, icons.concat()),
    )
}

/// The JSON envelope of a continuation page.
pub fn ajax_body(content: &str) -> String {
    serde_json::json!({
        "AjaxObjects": [{"Data": content, "DataType": "HTML", "Target": "#Mounts .TableContent"}]
    })
    .to_string()
}
