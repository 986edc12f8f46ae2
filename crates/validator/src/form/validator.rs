//! The form validator.
//!
//! One pass over the rules, each rule judged independently:
//!
//! 1. Read `record[key]`; a missing key reads as empty.
//! 2. A required field whose trimmed text is empty fails with
//!    [`FailureKind::RequiredMissing`]; the date check is skipped.
//! 3. Otherwise a date field whose day is strictly after today fails with
//!    [`FailureKind::DateInFuture`].
//! 4. Every other field is valid.
//!
//! The verdict is written onto the rule's control (error state plus a
//! localized message, or cleared) and folded into one boolean.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::clock::Clock;
use super::messages::{MessageKey, MessageProvider};
use super::rule::{FieldKind, FieldRule};
use super::value::{Record, Value};
use crate::foundation::{Validate, ValidationError};
use crate::validators::{NotBlank, NotInFuture};

// ============================================================================
// OUTCOME TYPES
// ============================================================================

/// Why a field failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FailureKind {
    /// Required field with an empty or whitespace-only value.
    RequiredMissing,
    /// Date strictly after today.
    DateInFuture,
}

impl FailureKind {
    /// Message shown on the control.
    pub const fn message_key(self) -> MessageKey {
        match self {
            Self::RequiredMissing => MessageKey::Required,
            Self::DateInFuture => MessageKey::DateNotFuture,
        }
    }
}

/// Verdict for one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldStatus {
    /// No error; the control is cleared.
    Valid,
    /// The control shows an error for this reason.
    Invalid(FailureKind),
}

impl FieldStatus {
    /// Returns `true` for [`FieldStatus::Valid`].
    pub const fn is_valid(self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// Verdict for one field together with its key and shown message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOutcome {
    /// Record key of the field.
    pub key: String,
    /// The verdict.
    pub status: FieldStatus,
    /// Text written to the control; empty when valid.
    pub message: String,
    /// Error of the failing check, tagged with the field key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ValidationError>,
}

/// A failed rule: the kind shown on the control and the check's error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFailure {
    /// Why the field failed.
    pub kind: FailureKind,
    /// Error returned by the check, with `field` set to the record key.
    pub error: ValidationError,
}

impl FieldFailure {
    fn new(kind: FailureKind, error: ValidationError, key: &str) -> Self {
        Self {
            kind,
            error: error.with_field(key.to_owned()),
        }
    }
}

/// Verdicts of one validation call, in rule order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FormOutcome {
    fields: Vec<FieldOutcome>,
}

impl FormOutcome {
    /// Returns `true` iff every field is valid.
    pub fn is_valid(&self) -> bool {
        self.fields.iter().all(|f| f.status.is_valid())
    }

    /// All field verdicts in rule order.
    pub fn fields(&self) -> &[FieldOutcome] {
        &self.fields
    }

    /// Only the failing fields.
    pub fn failures(&self) -> impl Iterator<Item = &FieldOutcome> {
        self.fields.iter().filter(|f| !f.status.is_valid())
    }

    /// Verdict for `key`, if a rule checked it.
    pub fn status(&self, key: &str) -> Option<FieldStatus> {
        self.fields.iter().find(|f| f.key == key).map(|f| f.status)
    }
}

// ============================================================================
// DATE SOURCE
// ============================================================================

/// Where a date field's day is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateSource {
    /// The control's live selection.
    #[default]
    Control,
    /// The record value, as a date.
    Record,
}

// ============================================================================
// FORM VALIDATOR
// ============================================================================

/// Validates records against field rules and reports on their controls.
///
/// Holds no state between calls besides its configuration.
///
/// # Examples
///
/// ```rust,ignore
/// let validator = FormValidator::new(ResourceBundle::english(), SystemClock)
///     .with_date_source(DateSource::Record);
///
/// let mut rules = layout.bind(&mut controls)?;
/// let ok = validator.validate(&record, &mut rules);
/// ```
#[derive(Debug, Clone)]
pub struct FormValidator<M, K> {
    messages: M,
    clock: K,
    date_source: DateSource,
}

impl<M, K> FormValidator<M, K>
where
    M: MessageProvider,
    K: Clock,
{
    /// Creates a validator reading dates from the controls.
    pub fn new(messages: M, clock: K) -> Self {
        Self {
            messages,
            clock,
            date_source: DateSource::default(),
        }
    }

    /// Selects where date fields are read from.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_date_source(mut self, date_source: DateSource) -> Self {
        self.date_source = date_source;
        self
    }

    /// The configured date source.
    pub fn date_source(&self) -> DateSource {
        self.date_source
    }

    /// The message provider.
    pub fn messages(&self) -> &M {
        &self.messages
    }

    /// Validates `record` and writes each verdict onto its control.
    ///
    /// Returns `true` iff no rule failed.
    pub fn validate(&self, record: &Record, rules: &mut [FieldRule<'_>]) -> bool {
        self.evaluate(record, rules).is_valid()
    }

    /// Like [`validate`](Self::validate), also returning per-field verdicts.
    pub fn evaluate(&self, record: &Record, rules: &mut [FieldRule<'_>]) -> FormOutcome {
        let today = self.clock.today();
        let mut fields = Vec::with_capacity(rules.len());

        for rule in rules.iter_mut() {
            let outcome = match self.judge(record, rule, today) {
                Ok(()) => {
                    rule.control_mut().clear();
                    FieldOutcome {
                        key: rule.key().to_owned(),
                        status: FieldStatus::Valid,
                        message: String::new(),
                        error: None,
                    }
                }
                Err(FieldFailure { kind, error }) => {
                    let text = self.messages.text(kind.message_key().as_str(), &[]);
                    rule.control_mut().mark_invalid(&text);
                    tracing::debug!(code = %error.code, %error, "form field invalid");
                    FieldOutcome {
                        key: rule.key().to_owned(),
                        status: FieldStatus::Invalid(kind),
                        message: text,
                        error: Some(error),
                    }
                }
            };
            fields.push(outcome);
        }

        let outcome = FormOutcome { fields };
        tracing::debug!(
            fields = outcome.fields.len(),
            failures = outcome.failures().count(),
            %today,
            "form validated"
        );
        outcome
    }

    /// Judges one rule without touching its control.
    pub fn check(&self, record: &Record, rule: &FieldRule<'_>, today: NaiveDate) -> FieldStatus {
        match self.judge(record, rule, today) {
            Ok(()) => FieldStatus::Valid,
            Err(failure) => FieldStatus::Invalid(failure.kind),
        }
    }

    /// Runs the rule's checks and returns the first failure.
    pub fn judge(
        &self,
        record: &Record,
        rule: &FieldRule<'_>,
        today: NaiveDate,
    ) -> Result<(), FieldFailure> {
        let value = record.get(rule.key()).unwrap_or(&Value::Null);

        if rule.is_required() {
            NotBlank.validate(value).map_err(|error| {
                FieldFailure::new(FailureKind::RequiredMissing, error, rule.key())
            })?;
        }

        if rule.kind() == FieldKind::Date {
            let day = match self.date_source {
                DateSource::Control => rule.control().selected_date(),
                DateSource::Record => value.as_date(),
            };
            if let Some(day) = day {
                NotInFuture::new(today).validate(&day).map_err(|error| {
                    FieldFailure::new(FailureKind::DateInFuture, error, rule.key())
                })?;
            }
        }

        Ok(())
    }
}
