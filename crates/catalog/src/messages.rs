//! Catalog texts and the formatters that use them.

use bookshelf_validator::form::{MessageProvider, ResourceBundle};
use chrono::{Datelike, NaiveDate};

const CATALOG_EN: &str = include_str!("../i18n/i18n_en.properties");

pub const GENRE_ALL: &str = "genreAll";
pub const PUBLISHED_PREFIX: &str = "publishedPrefix";
pub const CONFIRM_DIALOG_TITLE: &str = "confirmDialogTitle";
pub const CONFIRM_DIALOG_TEXT: &str = "confirmDialogText";
pub const BTN_YES: &str = "btnYes";
pub const BTN_NO: &str = "btnNo";
pub const MSG_CREATE_SUCCESS: &str = "msgCreateSuccess";
pub const MSG_CREATE_ERROR: &str = "msgCreateError";
pub const MSG_UPDATE_SUCCESS: &str = "msgUpdateSuccess";
pub const MSG_UPDATE_ERROR: &str = "msgUpdateError";
pub const MSG_DELETE_SUCCESS: &str = "msgDeleteSuccess";
pub const MSG_DELETE_ERROR: &str = "msgDeleteError";

/// English catalog texts layered over the validation messages.
pub fn english() -> ResourceBundle {
    ResourceBundle::from_properties(CATALOG_EN).with_fallback(ResourceBundle::english())
}

/// Column title key for a record key, e.g. `colName` for `Name`.
pub fn column_key(record_key: &str) -> String {
    format!("col{record_key}")
}

/// "Published in 2018" for a release day; empty when there is none.
pub fn published_year(date: Option<NaiveDate>, messages: &impl MessageProvider) -> String {
    match date {
        Some(day) => messages.text(PUBLISHED_PREFIX, &[&day.year().to_string()]),
        None => String::new(),
    }
}
