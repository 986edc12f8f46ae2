//! Products: the records of the remote-data tabs.

use bookshelf_validator::form::{FieldSpec, FormLayout, Record, Value};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::entity::{self, Entity};
use crate::error::{CatalogError, CatalogResult};

/// One product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Product {
    /// Numeric key assigned by the store; new products have none.
    #[serde(rename = "ID", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    /// Product name.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// First sale day.
    pub release_date: Option<NaiveDate>,
    /// Last sale day, if discontinued.
    #[serde(default)]
    pub discontinued_date: Option<NaiveDate>,
    /// Rating from 0 to [`Product::MAX_RATING`].
    pub rating: u32,
    /// Unit price.
    pub price: f64,
}

impl Product {
    /// Highest rating.
    pub const MAX_RATING: u32 = 5;

    /// Creates a product without an id or discontinued date.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        release_date: Option<NaiveDate>,
        rating: u32,
        price: f64,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: description.into(),
            release_date,
            discontinued_date: None,
            rating,
            price,
        }
    }

    /// Sets the id, builder style.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_id(mut self, id: u32) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets the discontinued day, builder style.
    #[must_use = "builder methods must be chained or built"]
    pub fn discontinued(mut self, day: Option<NaiveDate>) -> Self {
        self.discontinued_date = day;
        self
    }

    /// The demo products of the remote-data service.
    pub fn samples() -> Vec<Self> {
        let day = |y, m, d| NaiveDate::from_ymd_opt(y, m, d);
        vec![
            Self::new("Bread", "Whole grain bread", day(1992, 1, 1), 4, 2.5).with_id(0),
            Self::new("Milk", "Low fat milk", day(1995, 10, 1), 3, 3.5).with_id(1),
            Self::new(
                "Vint soda",
                "Americana Variety - Mix of 6 flavors",
                day(2000, 10, 1),
                3,
                20.9,
            )
            .with_id(2),
            Self::new("Havina Cola", "The Original Key Lime Cola", day(2005, 10, 1), 3, 19.9)
                .with_id(3)
                .discontinued(day(2006, 10, 1)),
            Self::new(
                "Fruit Punch",
                "Mango flavor, 8.3 Ounce Cans (Pack of 24)",
                day(2003, 1, 5),
                3,
                22.99,
            )
            .with_id(4),
            Self::new(
                "Cranberry Juice",
                "16-Ounce Plastic Bottles (Pack of 12)",
                day(2006, 8, 4),
                3,
                22.8,
            )
            .with_id(5),
            Self::new("Pink Lemonade", "36 Ounce Cans (Pack of 3)", day(2006, 11, 5), 3, 18.8)
                .with_id(6),
            Self::new("DVD Player", "1080P Upconversion DVD Player", day(2006, 11, 15), 5, 35.88)
                .with_id(7),
            Self::new(
                "LCD HDTV",
                "42 inch 1080p LCD with Built-in Blu-ray Disc Player",
                day(2008, 5, 8),
                3,
                1088.8,
            )
            .with_id(8),
        ]
    }
}

impl Entity for Product {
    const NAME: &'static str = "product";

    fn layout() -> FormLayout {
        FormLayout::new()
            .field(FieldSpec::text("Name", "inpName").required())
            .field(FieldSpec::text("Description", "inpDescription").required())
            .field(FieldSpec::date("ReleaseDate", "dpReleaseDate").required())
            .field(FieldSpec::date("DiscontinuedDate", "dpDiscontinuedDate"))
            .field(FieldSpec::text("Rating", "inpRating").required())
            .field(FieldSpec::text("Price", "inpPrice").required())
    }

    fn empty_record() -> Record {
        [
            ("Name", Value::from("")),
            ("Description", Value::from("")),
            ("ReleaseDate", Value::Null),
            ("DiscontinuedDate", Value::Null),
            ("Rating", Value::from(0)),
            ("Price", Value::from(0)),
        ]
        .into_iter()
        .collect()
    }

    fn to_record(&self) -> Record {
        [
            ("ID", Value::from(self.id)),
            ("Name", Value::from(self.name.as_str())),
            ("Description", Value::from(self.description.as_str())),
            ("ReleaseDate", Value::from(self.release_date)),
            ("DiscontinuedDate", Value::from(self.discontinued_date)),
            ("Rating", Value::from(self.rating)),
            ("Price", Value::from(self.price)),
        ]
        .into_iter()
        .collect()
    }

    fn from_record(record: &Record) -> CatalogResult<Self> {
        let id = entity::count(record, "ID", u32::MAX)?;
        let rating = entity::count(record, "Rating", Self::MAX_RATING)?
            .ok_or_else(|| CatalogError::invalid_field("Rating", "missing"))?;
        let price = entity::number(record, "Price")?
            .ok_or_else(|| CatalogError::invalid_field("Price", "missing"))?;
        if price < 0.0 {
            return Err(CatalogError::invalid_field("Price", "must not be negative"));
        }

        Ok(Self {
            id,
            name: entity::text(record, "Name"),
            description: entity::text(record, "Description"),
            release_date: entity::date(record, "ReleaseDate")?,
            discontinued_date: entity::date(record, "DiscontinuedDate")?,
            rating,
            price,
        })
    }
}
