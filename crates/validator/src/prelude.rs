//! Prelude module for convenient imports.
//!
//! Provides a single `use bookshelf_validator::prelude::*;` import that brings
//! in the form validator, its rule and control types, and the built-in checks.

// ============================================================================
// FOUNDATION: Core trait and error
// ============================================================================

pub use crate::foundation::{Validate, ValidationError};

// ============================================================================
// VALIDATORS: Built-in field checks
// ============================================================================

pub use crate::validators::{NotBlank, NotInFuture, not_blank, not_in_future};

// ============================================================================
// FORM: Records, rules, controls, messages
// ============================================================================

pub use crate::form::{
    Clock, ControlSet, DateSource, FailureKind, FieldControl, FieldFailure, FieldKind,
    FieldOutcome, FieldRule, FieldSpec, FieldStatus, FixedClock, FormLayout, FormOutcome,
    FormValidator, InputControl, MessageKey, MessageProvider, Record, ResourceBundle, RuleError,
    SystemClock, Value, ValueState, reset,
};
