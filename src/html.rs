//! Helpers to pull tables, forms and pagination out of Tibia.com markup.

use crate::utils::{clean_text, parse_integer};
use regex::Regex;
use scraper::{ElementRef, Node, Selector};
use std::collections::HashMap;
use std::sync::LazyLock;

static ROWS: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr").unwrap());
static CELLS: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td").unwrap());
static TEXT_INPUTS: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("input:not([type]), input[type=text], input[type=hidden]").unwrap()
});
static SELECTS: LazyLock<Selector> = LazyLock::new(|| Selector::parse("select").unwrap());
static OPTIONS: LazyLock<Selector> = LazyLock::new(|| Selector::parse("option").unwrap());
static RADIOS: LazyLock<Selector> = LazyLock::new(|| Selector::parse("input[type=radio]").unwrap());
static PAGE_SPANS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("span.PageLink, span.CurrentPageLink").unwrap());
static LINKS: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a[href]").unwrap());

static PAGE_PARAM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"page=(\d+)").unwrap());
static RESULTS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"Results: ([\d,.]+)").unwrap());

/// The element's text content, cleaned.
pub fn element_text(element: ElementRef<'_>) -> String {
    clean_text(&element.text().collect::<String>())
}

/// The element's text content with `<br>` tags turned into line breaks. Not trimmed.
pub fn text_with_breaks(element: ElementRef<'_>) -> String {
    let mut text = String::new();
    for node in element.descendants() {
        match node.value() {
            Node::Text(t) => text.push_str(t),
            Node::Element(e) if e.name() == "br" => text.push('\n'),
            _ => {}
        }
    }
    text.replace('\u{a0}', " ")
}

/// The element's text content, leaving out everything inside `excluded`.
pub fn text_excluding(element: ElementRef<'_>, excluded: ElementRef<'_>) -> String {
    let mut text = String::new();
    for node in element.descendants() {
        if let Node::Text(t) = node.value() {
            if node.ancestors().any(|ancestor| ancestor.id() == excluded.id()) {
                continue;
            }
            text.push_str(t);
        }
    }
    text.replace('\u{a0}', " ")
}

/// All the rows inside the container, nested tables included.
pub fn get_rows(container: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    container.select(&ROWS).collect()
}

/// The cleaned text of every cell in a row.
pub fn cell_texts(row: ElementRef<'_>) -> Vec<String> {
    row.select(&CELLS).map(element_text).collect()
}

/// The values and options of an HTML form, as it would be submitted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormData {
    /// Values of text fields, hidden fields, selects and radios.
    ///
    /// Selects with no selected option are absent.
    pub values: HashMap<String, String>,
    /// Available `(label, value)` pairs of selects and radios, in document order.
    pub available_options: HashMap<String, Vec<(String, String)>>,
}

impl FormData {
    pub fn value(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn options(&self, name: &str) -> &[(String, String)] {
        self.available_options
            .get(name)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

pub fn parse_form_data(form: ElementRef<'_>) -> FormData {
    let mut data = FormData::default();

    for field in form.select(&TEXT_INPUTS) {
        if let Some(name) = field.value().attr("name") {
            let value = field.value().attr("value").unwrap_or_default();
            data.values.insert(name.to_string(), value.to_string());
        }
    }

    for select in form.select(&SELECTS) {
        let Some(name) = select.value().attr("name") else {
            continue;
        };
        let options = data.available_options.entry(name.to_string()).or_default();
        for option in select.select(&OPTIONS) {
            let label = element_text(option);
            let value = option
                .value()
                .attr("value")
                .map(str::to_string)
                .unwrap_or_else(|| label.clone());
            if option.value().attr("selected").is_some() {
                data.values.insert(name.to_string(), value.clone());
            }
            options.push((label, value));
        }
    }

    for radio in form.select(&RADIOS) {
        let Some(name) = radio.value().attr("name") else {
            continue;
        };
        let value = radio.value().attr("value").unwrap_or("on").to_string();
        let label = radio
            .next_sibling()
            .map(|node| match node.value() {
                Node::Text(t) => clean_text(t),
                _ => ElementRef::wrap(node).map(element_text).unwrap_or_default(),
            })
            .unwrap_or_default();
        data.available_options
            .entry(name.to_string())
            .or_default()
            .push((label, value.clone()));
        if radio.value().attr("checked").is_some() {
            data.values.insert(name.to_string(), value);
        }
    }

    data
}

/// Position within a paginated result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub total_pages: u32,
    pub results_count: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            total_pages: 1,
            results_count: 0,
        }
    }
}

/// Read the page navigation block used across Tibia.com.
///
/// The total is the highest page number referenced by the block, either as link text or in a
/// link's `page` parameter. The current page falls back to 1, or to the last page when the
/// current marker reads "Last Page".
pub fn parse_pagination(block: ElementRef<'_>) -> Pagination {
    let mut total_pages = 1;
    let mut page = None;
    let mut on_last_page = false;

    for span in block.select(&PAGE_SPANS) {
        let text = element_text(span);
        let is_current = span.value().classes().any(|c| c == "CurrentPageLink");
        for link in span.select(&LINKS) {
            let href = link.value().attr("href").unwrap_or_default();
            if let Some(n) = PAGE_PARAM
                .captures(href)
                .and_then(|c| c[1].parse::<u32>().ok())
            {
                total_pages = total_pages.max(n);
            }
        }
        match parse_integer::<u32>(&text) {
            Some(n) => {
                total_pages = total_pages.max(n);
                if is_current {
                    page = Some(n);
                }
            }
            None if is_current => {
                if text.contains("First") {
                    page = Some(1);
                } else if text.contains("Last") {
                    on_last_page = true;
                }
            }
            None => {}
        }
    }

    let page = match page {
        Some(page) => page,
        None if on_last_page => total_pages,
        None => 1,
    };
    let text = block.text().collect::<String>().replace('\u{a0}', " ");
    let results_count = RESULTS
        .captures(&text)
        .and_then(|c| parse_integer(&c[1]))
        .unwrap_or_default();

    Pagination {
        page,
        total_pages,
        results_count,
    }
}
