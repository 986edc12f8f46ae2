//! Books: the in-memory list of the JSON tab.

use bookshelf_validator::form::{FieldSpec, FormLayout, Record, Value};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::entity::{self, Entity};
use crate::error::{CatalogError, CatalogResult};
use crate::store::Catalog;

/// One book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Book {
    /// Catalog id such as `B001`; new books have none.
    #[serde(rename = "ID", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Title.
    pub name: String,
    /// Author.
    pub author: String,
    /// Genre.
    pub genre: String,
    /// First publication day.
    pub release_date: Option<NaiveDate>,
    /// Copies in stock.
    pub available_quantity: u32,
}

impl Book {
    /// Upper bound for [`Book::available_quantity`].
    pub const MAX_QUANTITY: u32 = 1_000_000;

    /// Creates a book without an id.
    pub fn new(
        name: impl Into<String>,
        author: impl Into<String>,
        genre: impl Into<String>,
        release_date: Option<NaiveDate>,
        available_quantity: u32,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            author: author.into(),
            genre: genre.into(),
            release_date,
            available_quantity,
        }
    }

    /// Sets the id, builder style.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// The seven books the catalog starts with.
    pub fn samples() -> Vec<Self> {
        let day = |y, m, d| NaiveDate::from_ymd_opt(y, m, d);
        vec![
            Self::new("The Silent Harbor", "Emily Stone", "Drama", day(2018, 5, 14), 12)
                .with_id("B001"),
            Self::new("Code of the North", "Liam Anders", "Technology", day(2021, 9, 1), 5)
                .with_id("B002"),
            Self::new("Tech Patterns", "Nina Petrova", "Technology", day(2020, 6, 10), 7)
                .with_id("B007"),
            Self::new("Midnight Letters", "Sofia Martinez", "Romance", day(2016, 2, 20), 0)
                .with_id("B003"),
            Self::new("Quantum Basics", "Dr. Alan Brooks", "Science", day(2019, 11, 11), 8)
                .with_id("B004"),
            Self::new("Ashes of Empire", "Victor Hale", "Fantasy", day(2014, 7, 30), 3)
                .with_id("B005"),
            Self::new("Thinking in Systems", "Laura Chen", "Non-fiction", day(2022, 3, 18), 15)
                .with_id("B006"),
        ]
    }
}

impl Entity for Book {
    const NAME: &'static str = "book";

    fn layout() -> FormLayout {
        FormLayout::new()
            .field(FieldSpec::text("Name", "inpName").required())
            .field(FieldSpec::text("Author", "inpAuthor").required())
            .field(FieldSpec::text("Genre", "inpGenre").required())
            .field(FieldSpec::date("ReleaseDate", "dpReleaseDate").required())
            .field(FieldSpec::text("AvailableQuantity", "inpQty").required())
    }

    fn empty_record() -> Record {
        [
            ("Name", Value::from("")),
            ("Author", Value::from("")),
            ("Genre", Value::from("")),
            ("ReleaseDate", Value::Null),
            ("AvailableQuantity", Value::from("")),
        ]
        .into_iter()
        .collect()
    }

    fn to_record(&self) -> Record {
        [
            ("ID", Value::from(self.id.clone())),
            ("Name", Value::from(self.name.as_str())),
            ("Author", Value::from(self.author.as_str())),
            ("Genre", Value::from(self.genre.as_str())),
            ("ReleaseDate", Value::from(self.release_date)),
            ("AvailableQuantity", Value::from(self.available_quantity)),
        ]
        .into_iter()
        .collect()
    }

    fn from_record(record: &Record) -> CatalogResult<Self> {
        let available_quantity = entity::count(record, "AvailableQuantity", Self::MAX_QUANTITY)?
            .ok_or_else(|| CatalogError::invalid_field("AvailableQuantity", "missing"))?;

        Ok(Self {
            id: entity::optional_text(record, "ID"),
            name: entity::text(record, "Name"),
            author: entity::text(record, "Author"),
            genre: entity::text(record, "Genre"),
            release_date: entity::date(record, "ReleaseDate")?,
            available_quantity,
        })
    }
}

/// One entry of the genre selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreOption {
    /// Filter value; empty selects every genre.
    pub key: String,
    /// Shown text.
    pub text: String,
}

impl Catalog<Book> {
    /// Genre selector entries: the "all" entry first, then each genre once
    /// in first-seen order.
    pub fn genre_options(&self, all_text: &str) -> Vec<GenreOption> {
        let mut options = vec![GenreOption {
            key: String::new(),
            text: all_text.to_owned(),
        }];
        for book in self.items() {
            if !book.genre.is_empty() && !options.iter().any(|o| o.key == book.genre) {
                options.push(GenreOption {
                    key: book.genre.clone(),
                    text: book.genre.clone(),
                });
            }
        }
        options
    }
}
