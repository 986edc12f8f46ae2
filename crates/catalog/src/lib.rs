//! # bookshelf-catalog
//!
//! The catalog the form validator serves: books and products kept in an
//! in-memory list, a filter/sort query over it, and per-operation dialogs
//! that validate a draft record before it is stored.
//!
//! ```rust,ignore
//! use bookshelf_catalog::{Book, Catalog, RecordDialog, SaveOutcome, messages};
//!
//! let mut books = Catalog::from_items(Book::samples());
//! let validator = FormValidator::new(messages::english(), SystemClock);
//!
//! let mut dialog = RecordDialog::<Book>::open_add();
//! dialog.set("Name", "Tech Patterns");
//! match dialog.save(&mut books, &validator)? {
//!     SaveOutcome::Saved { toast, .. } => println!("{}", toast.text),
//!     SaveOutcome::Rejected(outcome) => { /* controls show the errors */ }
//!     SaveOutcome::Failed { toast, .. } => eprintln!("{}", toast.text),
//! }
//! ```

pub mod book;
pub mod dialog;
pub mod entity;
pub mod error;
pub mod messages;
pub mod product;
pub mod query;
pub mod store;

pub use book::{Book, GenreOption};
pub use dialog::{DeleteConfirmation, DialogMode, RecordDialog, SaveOutcome, Toast};
pub use entity::Entity;
pub use error::{CatalogError, CatalogResult};
pub use product::Product;
pub use query::{Filter, FilterOperator, Query, Sorter};
pub use store::{Catalog, Row};
