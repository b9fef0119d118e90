//! Pure display models derived from dashboard state.
//!
//! Components render these; nothing here mutates state.

use crate::state::DashboardState;
use crate::types::{InfoRecord, MasterItem, OfferRecord, RecordId, Tab};

pub const MASTER_HEADERS: &[&str] = &["ID", "Name", "Category", "Image", "Aisle", "Size"];

pub const INFO_HEADERS: &[&str] = &[
    "ID",
    "Name",
    "Type",
    "Alcohol Content",
    "Country",
    "Flavor",
    "Age",
    "Best For",
];

pub const OFFER_HEADERS: &[&str] = &["ID", "Category", "Size", "Brand", "Flavors"];

/// One table cell.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Cell {
    Text(String),
    Image { src: String, alt: String },
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TableRow {
    /// Stable row key: the record id, or the row position when the backend sent none.
    pub key: String,
    pub cells: Vec<Cell>,
}

/// A read-only table of one collection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableView {
    pub headers: &'static [&'static str],
    pub rows: Vec<TableRow>,
}

fn row_key(id: Option<&RecordId>, index: usize) -> String {
    match id {
        Some(id) => id.to_string(),
        None => format!("row-{}", index),
    }
}

fn id_cell(id: Option<&RecordId>) -> Cell {
    Cell::Text(id.map(RecordId::to_string).unwrap_or_default())
}

fn text(value: &str) -> Cell {
    Cell::Text(value.to_string())
}

pub fn master_table(items: &[MasterItem]) -> TableView {
    let rows = items
        .iter()
        .enumerate()
        .map(|(index, item)| TableRow {
            key: row_key(item.id.as_ref(), index),
            cells: vec![
                id_cell(item.id.as_ref()),
                text(&item.name),
                text(&item.category),
                Cell::Image { src: item.image.clone(), alt: item.name.clone() },
                text(&item.aisle),
                text(&item.size),
            ],
        })
        .collect();

    TableView { headers: MASTER_HEADERS, rows }
}

pub fn info_table(records: &[InfoRecord]) -> TableView {
    let rows = records
        .iter()
        .enumerate()
        .map(|(index, record)| TableRow {
            key: row_key(record.id.as_ref(), index),
            cells: vec![
                id_cell(record.id.as_ref()),
                text(&record.name),
                text(&record.kind),
                text(&record.alcohol_content),
                text(&record.country),
                text(&record.flavor),
                text(&record.age),
                text(&record.best_for),
            ],
        })
        .collect();

    TableView { headers: INFO_HEADERS, rows }
}

pub fn offer_table(offers: &[OfferRecord]) -> TableView {
    let rows = offers
        .iter()
        .enumerate()
        .map(|(index, offer)| TableRow {
            key: row_key(offer.id.as_ref(), index),
            cells: vec![
                id_cell(offer.id.as_ref()),
                text(&offer.category),
                text(&offer.size),
                text(&offer.brand),
                text(&offer.flavors),
            ],
        })
        .collect();

    TableView { headers: OFFER_HEADERS, rows }
}

/// Table of the active tab's collection.
pub fn active_table<I>(state: &DashboardState<I>) -> TableView {
    match state.tab {
        Tab::Master => master_table(&state.master),
        Tab::Info => info_table(&state.info),
        Tab::Offers => offer_table(&state.offers),
    }
}

/// Page heading for a tab.
pub fn heading(tab: Tab) -> String {
    format!("{} Dashboard", tab.label())
}

/// CSS class of a tab button.
pub fn tab_class(tab: Tab, active: Tab) -> &'static str {
    if tab == active {
        "tab-button active-tab"
    } else {
        "tab-button"
    }
}
