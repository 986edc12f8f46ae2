//! Field rules: which record key is checked, how, and where the result shows.
//!
//! A [`FormLayout`] is the declarative description of a dialog's fields.
//! Binding it to a [`ControlSet`] resolves every control id up front and
//! yields the [`FieldRule`]s for one validation call. A rule always holds its
//! control, so a rule whose control cannot be found never reaches the
//! validation loop.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

use super::control::{ControlKind, ControlSet, FieldControl, InputControl};

// ============================================================================
// FIELD KIND
// ============================================================================

/// What kind of value a field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Plain text or number.
    #[default]
    Text,
    /// Calendar day, additionally checked against today.
    Date,
}

// ============================================================================
// ERRORS
// ============================================================================

/// Configuration error raised while binding a layout to its controls.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleError {
    /// A field names a control id the dialog does not have.
    #[error("field `{key}` refers to unknown control `{control}`")]
    UnresolvedControl {
        /// Record key of the field.
        key: String,
        /// The missing control id.
        control: String,
    },

    /// Two fields name the same control.
    #[error("control `{control}` is bound to more than one field")]
    DuplicateControl {
        /// The shared control id.
        control: String,
    },

    /// A field has an empty record key.
    #[error("field bound to control `{control}` has an empty key")]
    EmptyKey {
        /// Control id of the offending field.
        control: String,
    },
}

// ============================================================================
// FIELD SPEC
// ============================================================================

/// Declarative rule naming its control by id.
///
/// # Examples
///
/// ```rust,ignore
/// let release = FieldSpec::date("ReleaseDate", "dpReleaseDate").required();
/// let discontinued = FieldSpec::date("DiscontinuedDate", "dpDiscontinuedDate");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Record key the field reads.
    pub key: String,
    /// Id of the control showing the field's state.
    pub control: String,
    /// Whether an empty value is an error.
    #[serde(default)]
    pub required: bool,
    /// Field kind.
    #[serde(default)]
    pub kind: FieldKind,
}

impl FieldSpec {
    /// Creates an optional field of the given kind.
    pub fn new(key: impl Into<String>, control: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            key: key.into(),
            control: control.into(),
            required: false,
            kind,
        }
    }

    /// Creates an optional text field.
    pub fn text(key: impl Into<String>, control: impl Into<String>) -> Self {
        Self::new(key, control, FieldKind::Text)
    }

    /// Creates an optional date field.
    pub fn date(key: impl Into<String>, control: impl Into<String>) -> Self {
        Self::new(key, control, FieldKind::Date)
    }

    /// Marks the field as required.
    #[must_use = "builder methods must be chained or built"]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

// ============================================================================
// FORM LAYOUT
// ============================================================================

/// Ordered field specs of one form.
///
/// Order reflects the visual order of the fields. It does not affect the
/// validation outcome.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormLayout {
    fields: Vec<FieldSpec>,
}

impl FormLayout {
    /// Creates an empty layout.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a field.
    #[must_use = "builder methods must be chained or built"]
    pub fn field(mut self, spec: FieldSpec) -> Self {
        self.fields.push(spec);
        self
    }

    /// Returns the field specs in order.
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Looks up the spec for a record key.
    pub fn spec(&self, key: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|spec| spec.key == key)
    }

    /// Returns the control ids in field order.
    pub fn control_ids(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|spec| spec.control.as_str())
    }

    /// Creates one in-memory control per field, shaped after its kind.
    pub fn input_controls(&self) -> ControlSet<InputControl> {
        self.fields
            .iter()
            .map(|spec| {
                (
                    spec.control.clone(),
                    InputControl::of_kind(ControlKind::from(spec.kind)),
                )
            })
            .collect()
    }

    /// Resolves every field's control and returns the rules for one
    /// validation call.
    ///
    /// Fails on the first field whose key is empty, whose control id is
    /// unknown, or whose control is already bound to an earlier field.
    pub fn bind<'c, C>(
        &self,
        controls: &'c mut ControlSet<C>,
    ) -> Result<Vec<FieldRule<'c>>, RuleError>
    where
        C: FieldControl + 'c,
    {
        let mut by_id: HashMap<&'c str, &'c mut C> = controls.iter_mut().collect();
        let known: HashSet<&'c str> = by_id.keys().copied().collect();

        let mut rules = Vec::with_capacity(self.fields.len());
        for spec in &self.fields {
            if spec.key.is_empty() {
                return Err(RuleError::EmptyKey {
                    control: spec.control.clone(),
                });
            }

            let Some(control) = by_id.remove(spec.control.as_str()) else {
                let err = if known.contains(spec.control.as_str()) {
                    RuleError::DuplicateControl {
                        control: spec.control.clone(),
                    }
                } else {
                    RuleError::UnresolvedControl {
                        key: spec.key.clone(),
                        control: spec.control.clone(),
                    }
                };
                tracing::warn!(key = %spec.key, control = %spec.control, error = %err, "cannot bind form field");
                return Err(err);
            };

            rules.push(FieldRule {
                key: spec.key.clone(),
                control,
                required: spec.required,
                kind: spec.kind,
            });
        }

        Ok(rules)
    }
}

// ============================================================================
// FIELD RULE
// ============================================================================

/// A record key bound to the control that shows its state.
///
/// Built immediately before a validation call and dropped after it.
pub struct FieldRule<'c> {
    key: String,
    control: &'c mut dyn FieldControl,
    required: bool,
    kind: FieldKind,
}

impl<'c> FieldRule<'c> {
    /// Creates an optional text rule for `key` shown on `control`.
    pub fn new(key: impl Into<String>, control: &'c mut dyn FieldControl) -> Self {
        Self {
            key: key.into(),
            control,
            required: false,
            kind: FieldKind::Text,
        }
    }

    /// Marks the rule as required.
    #[must_use = "builder methods must be chained or built"]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Makes the rule a date rule.
    #[must_use = "builder methods must be chained or built"]
    pub fn date(mut self) -> Self {
        self.kind = FieldKind::Date;
        self
    }

    /// Record key the rule reads.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Whether an empty value is an error.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Field kind.
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// The bound control.
    pub fn control(&self) -> &dyn FieldControl {
        self.control
    }

    /// The bound control, mutably.
    pub fn control_mut(&mut self) -> &mut dyn FieldControl {
        self.control
    }
}

impl fmt::Debug for FieldRule<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldRule")
            .field("key", &self.key)
            .field("required", &self.required)
            .field("kind", &self.kind)
            .field("control", &"<control>")
            .finish()
    }
}
