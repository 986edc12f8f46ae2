//! Record-form validation.
//!
//! - [`Record`] / [`Value`]: the flat data being edited
//! - [`FormLayout`] / [`FieldSpec`] / [`FieldRule`]: what is checked
//! - [`FieldControl`] / [`ControlSet`]: where the result is shown
//! - [`MessageProvider`] / [`ResourceBundle`]: localized texts
//! - [`Clock`]: what "today" is
//! - [`FormValidator`]: the validation pass, and [`reset`] to clear it

mod clock;
mod control;
mod messages;
mod rule;
mod validator;
mod value;

pub use clock::{Clock, ConfiguredClock, FixedClock, SystemClock};
pub use control::{ControlKind, ControlSet, FieldControl, InputControl, ValueState, reset};
pub use messages::{MessageKey, MessageProvider, ResourceBundle};
pub use rule::{FieldKind, FieldRule, FieldSpec, FormLayout, RuleError};
pub use validator::{
    DateSource, FailureKind, FieldFailure, FieldOutcome, FieldStatus, FormOutcome, FormValidator,
};
pub use value::{Record, Value};
