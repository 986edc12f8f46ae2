//! Entities a catalog can hold and edit through a dialog.

use bookshelf_validator::form::{FormLayout, Record, Value};
use chrono::NaiveDate;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{CatalogError, CatalogResult};

/// An item kind with a record form.
pub trait Entity: Clone + Serialize + DeserializeOwned {
    /// Human-readable kind, used in logs.
    const NAME: &'static str;

    /// Fields of the edit dialog, in display order.
    fn layout() -> FormLayout;

    /// Draft record for a new item.
    fn empty_record() -> Record;

    /// The item as a flat record.
    fn to_record(&self) -> Record;

    /// Builds an item from a validated record.
    fn from_record(record: &Record) -> CatalogResult<Self>;
}

/// Trimmed text of a field; missing fields are empty.
pub(crate) fn text(record: &Record, key: &str) -> String {
    record.text(key).trim().to_owned()
}

/// Optional text: blank becomes `None`.
pub(crate) fn optional_text(record: &Record, key: &str) -> Option<String> {
    let value = text(record, key);
    (!value.is_empty()).then_some(value)
}

/// Optional day: `Null` or blank becomes `None`.
pub(crate) fn date(record: &Record, key: &str) -> CatalogResult<Option<NaiveDate>> {
    match record.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) if value.is_blank() => Ok(None),
        Some(value) => value
            .as_date()
            .map(Some)
            .ok_or_else(|| CatalogError::invalid_field(key, format!("`{value}` is not a date"))),
    }
}

/// Optional number: `Null` or blank becomes `None`.
pub(crate) fn number(record: &Record, key: &str) -> CatalogResult<Option<f64>> {
    match record.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) if value.is_blank() => Ok(None),
        Some(value) => match value.as_number() {
            Some(n) if n.is_finite() => Ok(Some(n)),
            _ => Err(CatalogError::invalid_field(
                key,
                format!("`{value}` is not a number"),
            )),
        },
    }
}

/// Optional whole number in `0..=max`.
pub(crate) fn count(record: &Record, key: &str, max: u32) -> CatalogResult<Option<u32>> {
    let Some(n) = number(record, key)? else {
        return Ok(None);
    };
    if n.fract() != 0.0 || n < 0.0 || n > f64::from(max) {
        return Err(CatalogError::invalid_field(
            key,
            format!("`{n}` is not a whole number between 0 and {max}"),
        ));
    }
    Ok(Some(n as u32))
}
