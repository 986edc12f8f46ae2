//! # bookshelf-validator
//!
//! Validation for record-editing forms: a flat [`Record`](form::Record) is
//! checked against an ordered set of [`FieldRule`](form::FieldRule)s and the
//! result is written back onto the controls that display each field.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use bookshelf_validator::prelude::*;
//!
//! let layout = FormLayout::new()
//!     .field(FieldSpec::text("Name", "inpName").required())
//!     .field(FieldSpec::date("ReleaseDate", "dpReleaseDate").required());
//!
//! let mut controls = layout.input_controls();
//! let validator = FormValidator::new(ResourceBundle::english(), SystemClock);
//!
//! let mut rules = layout.bind(&mut controls)?;
//! if validator.validate(&record, &mut rules) {
//!     // save
//! }
//! ```
//!
//! ## Failure kinds
//!
//! A field fails for exactly one of two reasons, see
//! [`FailureKind`](form::FailureKind):
//!
//! - **RequiredMissing**: the field is required and its trimmed text is empty.
//! - **DateInFuture**: a date field's day is strictly after today.
//!
//! Failures are never returned as errors. They are written to the field's
//! control and folded into a single boolean.

#[macro_use]
mod macros;

pub mod form;
pub mod foundation;
pub mod prelude;
pub mod validators;
