//! Extraction of the portal's data table.
//!
//! Every portal page carries one `table.tb_base.tb_dados`. Its header and
//! footer rows are read as plain text; the body is read according to the
//! category's [`TableLayout`].

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use serde::Serialize;
use tracing::debug;

use crate::catalog::TableLayout;
use crate::error::Error;

const DATA_TABLE: &str = "table.tb_base.tb_dados";

struct Selectors {
    table: Selector,
    header_rows: Selector,
    header_cells: Selector,
    footer_rows: Selector,
    body_rows: Selector,
    cells: Selector,
    item_cells: Selector,
    sub_item_cells: Selector,
}

static SELECTORS: LazyLock<Selectors> = LazyLock::new(|| {
    let parse = |css: &str| {
        Selector::parse(css).unwrap_or_else(|e| panic!("bad selector `{css}`: {e}"))
    };
    Selectors {
        table: parse(DATA_TABLE),
        header_rows: parse("thead tr"),
        header_cells: parse("th"),
        footer_rows: parse("tfoot.tb_total tr"),
        body_rows: parse("tbody tr"),
        cells: parse("td"),
        item_cells: parse("td.tb_item"),
        sub_item_cells: parse("td.tb_subitem"),
    }
});

/// The data table of one portal page.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct TableContent {
    pub headers: Vec<String>,
    pub footers: Vec<String>,
    pub data: TableData,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TableData {
    Categorized(Vec<ProductGroup>),
    Trade(Vec<TradeRow>),
}

/// A product line and its breakdown, e.g. "VINHO DE MESA" and its varieties.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ProductGroup {
    pub item: String,
    pub quantity: String,
    pub sub_items: Vec<ProductLine>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ProductLine {
    pub item: String,
    pub quantity: String,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct TradeRow {
    pub country: String,
    pub quantity: String,
    pub value: String,
}

/// Extracts the data table from a portal page.
pub fn extract_table(html: &str, layout: TableLayout) -> Result<TableContent, Error> {
    let document = Html::parse_document(html);
    let table = document
        .select(&SELECTORS.table)
        .next()
        .ok_or(Error::MissingTable(DATA_TABLE))?;

    let data = match layout {
        TableLayout::Categorized => TableData::Categorized(categorized_rows(table)),
        TableLayout::Trade => TableData::Trade(trade_rows(table)),
    };

    Ok(TableContent {
        headers: first_row(table, &SELECTORS.header_rows, &SELECTORS.header_cells),
        footers: first_row(table, &SELECTORS.footer_rows, &SELECTORS.cells),
        data,
    })
}

fn categorized_rows(table: ElementRef<'_>) -> Vec<ProductGroup> {
    let mut groups: Vec<ProductGroup> = Vec::new();

    for row in table.select(&SELECTORS.body_rows) {
        if let [item, quantity, ..] = texts(row.select(&SELECTORS.item_cells)).as_slice() {
            groups.push(ProductGroup {
                item: item.clone(),
                quantity: quantity.clone(),
                sub_items: Vec::new(),
            });
        }

        if let [item, quantity, ..] = texts(row.select(&SELECTORS.sub_item_cells)).as_slice() {
            match groups.last_mut() {
                Some(group) => group.sub_items.push(ProductLine {
                    item: item.clone(),
                    quantity: quantity.clone(),
                }),
                None => debug!(item = %item, "sub-item row before any item row, skipped"),
            }
        }
    }

    groups
}

fn trade_rows(table: ElementRef<'_>) -> Vec<TradeRow> {
    table
        .select(&SELECTORS.body_rows)
        .filter_map(|row| match texts(row.select(&SELECTORS.cells)).as_slice() {
            [country, quantity, value, ..] => Some(TradeRow {
                country: country.clone(),
                quantity: quantity.clone(),
                value: value.clone(),
            }),
            _ => None,
        })
        .collect()
}

/// Cell texts of the first row matched by `rows`. Grouping rows the portal
/// sometimes stacks under it are ignored.
fn first_row(table: ElementRef<'_>, rows: &Selector, cells: &Selector) -> Vec<String> {
    table
        .select(rows)
        .next()
        .map(|row| texts(row.select(cells)))
        .unwrap_or_default()
}

fn texts<'a>(cells: impl Iterator<Item = ElementRef<'a>>) -> Vec<String> {
    cells.map(cell_text).collect()
}

/// Concatenates the element's text nodes, each trimmed.
fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text().map(str::trim).collect()
}
