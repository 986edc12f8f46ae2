//! Built-in field checks
//!
//! - [`NotBlank`]: the value's trimmed string form is not empty
//! - [`NotInFuture`]: a calendar day is not after a reference day
//!
//! # Examples
//!
//! ```rust,ignore
//! use bookshelf_validator::prelude::*;
//!
//! assert!(not_blank().validate(&Value::from("Drama")).is_ok());
//! assert!(not_blank().validate(&Value::from("   ")).is_err());
//!
//! let check = not_in_future(today);
//! assert!(check.validate(&today).is_ok());
//! ```

pub mod date;
pub mod required;

pub use date::{NotInFuture, not_in_future};
pub use required::{NotBlank, not_blank};
