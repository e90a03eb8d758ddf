//! Parsers for the fixed-format tables of an auction's detail page.

use crate::builders::AuctionDetailsBuilder;
use crate::html::{cell_texts, element_text, get_rows};
use crate::models::{
    AchievementEntry, BestiaryEntry, BlessingEntry, CharmEntry, RegularWorldTransfer, RevealedGem,
    SkillEntry,
};
use crate::utils::{clean_text, parse_integer, parse_multiplier, parse_tibia_datetime};
use scraper::{ElementRef, Selector};
use std::sync::LazyLock;
use tracing::{debug, warn};

static TABLE_CONTENT: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("table.TableContent").unwrap());
static CELL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td").unwrap());
static LABEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("span").unwrap());
static VALUE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("div").unwrap());
static IMAGE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("img").unwrap());
static GEM: LazyLock<Selector> = LazyLock::new(|| Selector::parse("[title]").unwrap());
static GEM_MOD: LazyLock<Selector> = LazyLock::new(|| Selector::parse("div.ModEffectRow").unwrap());

const MORE_ENTRIES: &str = "more entries";

/// A table of `label: value` rows, in document order.
///
/// Labels are normalized into keys, so `Hit Points:` becomes `hit_points`.
#[derive(Debug, Default)]
struct DataTable(Vec<(String, String)>);

impl DataTable {
    fn parse(table: ElementRef<'_>) -> Self {
        let rows = get_rows(table)
            .into_iter()
            .filter_map(|row| {
                let label = element_text(row.select(&LABEL).next()?);
                let value = element_text(row.select(&VALUE).next()?);
                let key = label.to_lowercase().trim().replace(' ', "_").replace(':', "");
                Some((key, value))
            })
            .collect();
        Self(rows)
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn integer<T: std::str::FromStr>(&self, key: &str) -> Option<T> {
        self.get(key).and_then(parse_integer)
    }

    fn last_value(&self) -> Option<&str> {
        self.0.last().map(|(_, v)| v.as_str())
    }
}

/// Split a `current/maximum` value.
fn fraction(text: &str) -> (Option<u32>, Option<u32>) {
    let mut parts = text.split('/');
    let current = parts.next().and_then(parse_integer);
    let maximum = parts.next().and_then(parse_integer);
    (current, maximum)
}

/// The rows of the block's first content table, without its header row.
fn content_rows(block: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    block
        .select(&TABLE_CONTENT)
        .next()
        .map(|table| get_rows(table).into_iter().skip(1).collect())
        .unwrap_or_default()
}

/// Parse the "General" block.
///
/// The block holds a sequence of tables in a fixed order. Newer layouts append tables at the
/// end, so only the tables present are read.
pub(crate) fn parse_general(builder: &mut AuctionDetailsBuilder, block: ElementRef<'_>) {
    let mut tables = block.select(&TABLE_CONTENT);

    if let Some(table) = tables.next() {
        let stats = DataTable::parse(table);
        builder
            .hit_points(stats.integer("hit_points"))
            .mana(stats.integer("mana"))
            .capacity(stats.integer("capacity"))
            .speed(stats.integer("speed"))
            .blessings_count(stats.get("blessings").and_then(|v| fraction(v).0))
            .mounts_count(stats.integer("mounts"))
            .outfits_count(stats.integer("outfits"))
            .titles_count(stats.integer("titles"));
    }

    if let Some(table) = tables.next() {
        builder.skills(parse_skills(table));
    }

    if let Some(table) = tables.next() {
        let stats = DataTable::parse(table);
        builder
            .creation_date(stats.get("creation_date").and_then(parse_tibia_datetime))
            .experience(stats.integer("experience"))
            .gold(stats.integer("gold"))
            .achievement_points(stats.integer("achievement_points"));
    }

    if let Some(table) = tables.next() {
        let transfer = DataTable::parse(table);
        builder.regular_world_transfer(
            transfer
                .get("regular_world_transfer")
                .and_then(parse_world_transfer),
        );
    }

    if let Some(table) = tables.next() {
        let charms = DataTable::parse(table);
        builder
            .charm_expansion(
                charms
                    .get("charm_expansion")
                    .map(|v| v.to_lowercase().contains("yes")),
            )
            .available_charm_points(charms.integer("available_charm_points"))
            .spent_charm_points(charms.integer("spent_charm_points"));
    }

    if let Some(table) = tables.next() {
        let rewards = DataTable::parse(table);
        builder.daily_reward_streak(rewards.last_value().and_then(parse_integer));
    }

    if let Some(table) = tables.next() {
        let hunting = DataTable::parse(table);
        builder
            .hunting_task_points(hunting.integer("hunting_task_points"))
            .permanent_hunting_task_slots(hunting.integer("permanent_hunting_task_slots"))
            .permanent_prey_slots(hunting.integer("permanent_prey_slots"))
            .prey_wildcards(hunting.integer("prey_wildcards"));
    }

    if let Some(table) = tables.next() {
        let hirelings = DataTable::parse(table);
        builder
            .hirelings(hirelings.integer("hirelings"))
            .hireling_jobs(hirelings.integer("hireling_jobs"))
            .hireling_outfits(hirelings.integer("hireling_outfits"));
    }

    if let Some(table) = tables.next() {
        let dust = DataTable::parse(table);
        let (exalted_dust, limit) = dust.get("exalted_dust").map(fraction).unwrap_or_default();
        builder.exalted_dust(exalted_dust).exalted_dust_limit(limit);
    }

    if let Some(table) = tables.next() {
        builder.boss_points(DataTable::parse(table).integer("boss_points"));
    }

    if let Some(table) = tables.next() {
        builder.bonus_promotion_points(DataTable::parse(table).integer("bonus_promotion_points"));
    }
}

/// Reads `after <date>`. Any other text means the transfer is available right away.
fn parse_world_transfer(text: &str) -> Option<RegularWorldTransfer> {
    let Some((_, date)) = text.split_once("after ") else {
        return Some(RegularWorldTransfer::Immediate);
    };
    let date = parse_tibia_datetime(date);
    if date.is_none() {
        warn!(text, "Unreadable world transfer date");
    }
    date.map(RegularWorldTransfer::After)
}

/// Rows read `name | level | progress %`.
pub(crate) fn parse_skills(table: ElementRef<'_>) -> Vec<SkillEntry> {
    let mut skills = Vec::new();
    for row in get_rows(table) {
        let cells = cell_texts(row);
        let [name, level, progress] = cells.as_slice() else {
            continue;
        };
        let level = parse_integer(level);
        let progress = progress.replace('%', "").trim().parse::<f64>().ok();
        match (level, progress) {
            (Some(level), Some(progress)) => skills.push(SkillEntry {
                name: name.clone(),
                level,
                progress,
            }),
            _ => warn!(skill = %name, "Skipping malformed skill row"),
        }
    }
    skills
}

/// Rows read `amount x | name`.
pub(crate) fn parse_blessings(block: ElementRef<'_>) -> Vec<BlessingEntry> {
    content_rows(block)
        .into_iter()
        .filter_map(|row| {
            let cells = cell_texts(row);
            let [amount, name] = cells.as_slice() else {
                return None;
            };
            Some(BlessingEntry {
                name: name.clone(),
                amount: parse_multiplier(amount)?,
            })
        })
        .collect()
}

/// Rows read `cost x | name`. Other row shapes are skipped.
pub(crate) fn parse_charms(block: ElementRef<'_>) -> Vec<CharmEntry> {
    content_rows(block)
        .into_iter()
        .filter_map(|row| {
            let cells = cell_texts(row);
            let [cost, name] = cells.as_slice() else {
                return None;
            };
            Some(CharmEntry {
                name: name.clone(),
                cost: parse_multiplier(cost)?,
            })
        })
        .collect()
}

/// Secret achievements are marked with an icon next to their name.
pub(crate) fn parse_achievements(block: ElementRef<'_>) -> Vec<AchievementEntry> {
    content_rows(block)
        .into_iter()
        .filter_map(|row| {
            let cell = row.select(&CELL).next()?;
            let name = element_text(cell);
            if name.is_empty() || name.contains(MORE_ENTRIES) {
                return None;
            }
            Some(AchievementEntry {
                name,
                is_secret: cell.select(&IMAGE).next().is_some(),
            })
        })
        .collect()
}

/// Rows read `step | kills x | name`. Used for both the bestiary and the bosstiary.
pub(crate) fn parse_bestiary(block: ElementRef<'_>) -> Vec<BestiaryEntry> {
    content_rows(block)
        .into_iter()
        .filter_map(|row| {
            let cells = cell_texts(row);
            let [step, kills, name] = cells.as_slice() else {
                return None;
            };
            Some(BestiaryEntry {
                name: name.clone(),
                kills: parse_multiplier(kills)?,
                step: parse_integer(step)?,
            })
        })
        .collect()
}

/// Lists such as titles or imbuements.
///
/// These blocks may nest a label table before the list, so the last table is used.
pub(crate) fn parse_single_column(block: ElementRef<'_>) -> Vec<String> {
    let Some(table) = block.select(&TABLE_CONTENT).last() else {
        return Vec::new();
    };
    get_rows(table)
        .into_iter()
        .skip(1)
        .filter_map(|row| row.select(&CELL).next().map(element_text))
        .filter(|text| !text.is_empty() && !text.contains(MORE_ENTRIES))
        .collect()
}

/// Each row holds a gem, named by its icon's title, and the effects it grants.
pub(crate) fn parse_revealed_gems(block: ElementRef<'_>) -> Vec<RevealedGem> {
    let gems: Vec<RevealedGem> = block
        .select(&TABLE_CONTENT)
        .next()
        .map(get_rows)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|row| {
            let gem_type = clean_text(row.select(&GEM).next()?.value().attr("title")?);
            let mods = row
                .select(&GEM_MOD)
                .map(element_text)
                .filter(|text| !text.is_empty())
                .collect();
            Some(RevealedGem { gem_type, mods })
        })
        .collect();
    debug!(count = gems.len(), "Parsed revealed gems");
    gems
}
