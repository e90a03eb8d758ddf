//! Text and number normalization shared by every parser.

use crate::error::{Error, Result};
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;
use std::str::FromStr;
use std::sync::LazyLock;
use url::Url;

static TIBIA_CASH: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d*\.?\d*)\s?k*$").unwrap());

const TIBIA_BASE_URL: &str = "https://www.tibia.com/";

/// Replace non-breaking spaces and trim the text.
pub fn clean_text(text: &str) -> String {
    text.replace('\u{a0}', " ").trim().to_string()
}

/// Parse an integer, ignoring thousands separators (both `,` and `.`).
///
/// Returns `None` when the text is not numeric after removing the separators.
pub fn parse_integer<T: FromStr>(text: &str) -> Option<T> {
    let digits: String = clean_text(text)
        .chars()
        .filter(|c| *c != ',' && *c != '.')
        .collect();
    digits.parse().ok()
}

/// Parse an amount that may use `k` as a thousands suffix, e.g. `1.5kk` is 1,500,000.
pub fn parse_tibia_money(text: &str) -> Result<u64> {
    if let Ok(value) = text.trim().parse::<u64>() {
        return Ok(value);
    }
    let normalized = text.replace(',', "").trim().to_lowercase();
    let captures = TIBIA_CASH
        .captures(&normalized)
        .ok_or_else(|| Error::invalid_argument(format!("{text:?} is not a numeric value")))?;
    let number = captures.get(1).map(|m| m.as_str()).unwrap_or_default();
    let value: f64 = number
        .parse()
        .map_err(|_| Error::invalid_argument(format!("{text:?} is not a numeric value")))?;
    let thousands = normalized.matches('k').count() as i32;
    Ok((value * 1000f64.powi(thousands)) as u64)
}

/// Parse a date and time as displayed on Tibia.com, converting it to UTC.
///
/// Accepted formats are `Dec 10 2018, 21:53:37 CET` and `Dec 10 2018, 21:53 CET`.
/// Only the CET and CEST timezones are recognized; anything else yields `None`.
pub fn parse_tibia_datetime(text: &str) -> Option<DateTime<Utc>> {
    let text = clean_text(text).replace(',', "");
    let (datetime, timezone) = text.rsplit_once(' ')?;
    let offset = match timezone {
        "CET" => 1,
        "CEST" => 2,
        _ => return None,
    };
    let datetime = datetime.trim();
    let naive = NaiveDateTime::parse_from_str(datetime, "%b %d %Y %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(datetime, "%b %d %Y %H:%M"))
        .ok()?;
    Some((naive - Duration::hours(offset)).and_utc())
}

/// Parse a date as displayed on Tibia.com, e.g. `Jul 23 2015`.
pub fn parse_tibia_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&clean_text(text), "%b %d %Y").ok()
}

/// Get the first value of a query parameter in a link, resolving relative links against Tibia.com.
pub fn query_param(href: &str, key: &str) -> Option<String> {
    let url = Url::parse(href)
        .or_else(|_| Url::parse(TIBIA_BASE_URL).and_then(|base| base.join(href)))
        .ok()?;
    url.query_pairs()
        .find(|(name, _)| name == key)
        .map(|(_, value)| value.into_owned())
}

/// Strip a trailing `x` multiplier (e.g. `50x`) and parse the remaining integer.
pub fn parse_multiplier<T: FromStr>(text: &str) -> Option<T> {
    parse_integer(&text.replace('x', ""))
}
