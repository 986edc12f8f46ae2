//! Controls that display a field's error state.
//!
//! The validator never owns a control. It borrows one per rule, writes the
//! error state onto it and, for date fields, reads the live selection.

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::rule::FieldKind;

// ============================================================================
// VALUE STATE
// ============================================================================

/// Visible error state of a control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ValueState {
    /// No error is shown.
    #[default]
    None,
    /// The control is marked invalid and shows its state text.
    Error,
}

// ============================================================================
// FIELD CONTROL TRAIT
// ============================================================================

/// A UI-bindable target that can show a field's error state.
pub trait FieldControl {
    /// Sets the visible state.
    fn set_value_state(&mut self, state: ValueState);

    /// Sets the message shown next to the state.
    fn set_value_state_text(&mut self, text: &str);

    /// Returns the current visible state.
    fn value_state(&self) -> ValueState;

    /// Returns the current state message.
    fn value_state_text(&self) -> &str;

    /// Returns the day currently selected in the control, for date pickers.
    ///
    /// Plain inputs have no selection.
    fn selected_date(&self) -> Option<NaiveDate> {
        None
    }

    /// Marks the control invalid with `text`.
    fn mark_invalid(&mut self, text: &str) {
        self.set_value_state(ValueState::Error);
        self.set_value_state_text(text);
    }

    /// Clears any error state and message.
    fn clear(&mut self) {
        self.set_value_state(ValueState::None);
        self.set_value_state_text("");
    }

    /// Returns `true` while the control shows an error.
    fn is_invalid(&self) -> bool {
        self.value_state() == ValueState::Error
    }
}

impl<C> FieldControl for Box<C>
where
    C: FieldControl + ?Sized,
{
    fn set_value_state(&mut self, state: ValueState) {
        (**self).set_value_state(state);
    }

    fn set_value_state_text(&mut self, text: &str) {
        (**self).set_value_state_text(text);
    }

    fn value_state(&self) -> ValueState {
        (**self).value_state()
    }

    fn value_state_text(&self) -> &str {
        (**self).value_state_text()
    }

    fn selected_date(&self) -> Option<NaiveDate> {
        (**self).selected_date()
    }
}

/// Clears the error state of every present control.
///
/// Absent entries are skipped. Never fails.
///
/// # Examples
///
/// ```rust,ignore
/// reset([Some(&mut name), None, Some(&mut release_date)]);
/// ```
pub fn reset<'a, C, I>(controls: I)
where
    C: FieldControl + ?Sized + 'a,
    I: IntoIterator<Item = Option<&'a mut C>>,
{
    for control in controls.into_iter().flatten() {
        control.clear();
    }
}

// ============================================================================
// IN-MEMORY CONTROL
// ============================================================================

/// The shape of an [`InputControl`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlKind {
    /// Single-line text input.
    #[default]
    Input,
    /// Date picker with a selected day.
    DatePicker,
}

impl From<FieldKind> for ControlKind {
    fn from(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Text => Self::Input,
            FieldKind::Date => Self::DatePicker,
        }
    }
}

/// In-memory control used by dialogs that are not rendered by a toolkit.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InputControl {
    kind: ControlKind,
    value_state: ValueState,
    value_state_text: String,
    date_value: Option<NaiveDate>,
}

impl InputControl {
    /// Creates a text input.
    #[must_use]
    pub fn input() -> Self {
        Self::default()
    }

    /// Creates a date picker with no selection.
    #[must_use]
    pub fn date_picker() -> Self {
        Self {
            kind: ControlKind::DatePicker,
            ..Self::default()
        }
    }

    /// Creates a control of the given kind.
    #[must_use]
    pub fn of_kind(kind: ControlKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// Returns the control kind.
    pub fn kind(&self) -> ControlKind {
        self.kind
    }

    /// Selects a day. Ignored by text inputs.
    pub fn set_date_value(&mut self, date: Option<NaiveDate>) {
        if self.kind == ControlKind::DatePicker {
            self.date_value = date;
        }
    }

    /// Sets the selected day, builder style.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_date_value(mut self, date: NaiveDate) -> Self {
        self.set_date_value(Some(date));
        self
    }
}

impl FieldControl for InputControl {
    fn set_value_state(&mut self, state: ValueState) {
        self.value_state = state;
    }

    fn set_value_state_text(&mut self, text: &str) {
        text.clone_into(&mut self.value_state_text);
    }

    fn value_state(&self) -> ValueState {
        self.value_state
    }

    fn value_state_text(&self) -> &str {
        &self.value_state_text
    }

    fn selected_date(&self) -> Option<NaiveDate> {
        self.date_value
    }
}

// ============================================================================
// CONTROL SET
// ============================================================================

/// Ordered `id → control` map owned by one dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlSet<C> {
    controls: IndexMap<String, C>,
}

impl<C> Default for ControlSet<C> {
    fn default() -> Self {
        Self {
            controls: IndexMap::new(),
        }
    }
}

impl<C> ControlSet<C> {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a control.
    pub fn insert(&mut self, id: impl Into<String>, control: C) -> Option<C> {
        self.controls.insert(id.into(), control)
    }

    /// Adds a control, builder style.
    #[must_use = "builder methods must be chained or built"]
    pub fn with(mut self, id: impl Into<String>, control: C) -> Self {
        self.insert(id, control);
        self
    }

    /// Looks up a control by id.
    pub fn get(&self, id: &str) -> Option<&C> {
        self.controls.get(id)
    }

    /// Looks up a control by id for mutation.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut C> {
        self.controls.get_mut(id)
    }

    /// Returns `true` if a control with this id exists.
    pub fn contains(&self, id: &str) -> bool {
        self.controls.contains_key(id)
    }

    /// Iterates over `(id, control)` in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &C)> {
        self.controls.iter().map(|(id, c)| (id.as_str(), c))
    }

    /// Iterates mutably over `(id, control)` in insertion order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut C)> {
        self.controls.iter_mut().map(|(id, c)| (id.as_str(), c))
    }

    /// Returns the number of controls.
    pub fn len(&self) -> usize {
        self.controls.len()
    }

    /// Returns `true` if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }
}

impl<C: FieldControl> ControlSet<C> {
    /// Clears the error state of every control in the set.
    pub fn reset_all(&mut self) {
        reset(self.controls.values_mut().map(Some));
    }

    /// Clears the listed controls. Unknown ids are skipped.
    pub fn reset_ids<'a>(&mut self, ids: impl IntoIterator<Item = &'a str>) {
        for id in ids {
            if let Some(control) = self.controls.get_mut(id) {
                control.clear();
            }
        }
    }

    /// Returns the ids of controls currently showing an error.
    pub fn invalid_ids(&self) -> Vec<&str> {
        self.iter()
            .filter(|(_, c)| c.is_invalid())
            .map(|(id, _)| id)
            .collect()
    }
}

impl<C, S> FromIterator<(S, C)> for ControlSet<C>
where
    S: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (S, C)>>(iter: I) -> Self {
        Self {
            controls: iter.into_iter().map(|(id, c)| (id.into(), c)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn invalid(kind: ControlKind) -> InputControl {
        let mut control = InputControl::of_kind(kind);
        control.mark_invalid("broken");
        control
    }

    #[test]
    fn mark_and_clear() {
        let mut control = InputControl::input();
        control.mark_invalid("Required");
        assert_eq!(control.value_state(), ValueState::Error);
        assert_eq!(control.value_state_text(), "Required");

        control.clear();
        assert_eq!(control.value_state(), ValueState::None);
        assert_eq!(control.value_state_text(), "");
    }

    #[test]
    fn text_input_ignores_date_selection() {
        let day = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let mut input = InputControl::input();
        input.set_date_value(Some(day));
        assert_eq!(input.selected_date(), None);

        let picker = InputControl::date_picker().with_date_value(day);
        assert_eq!(picker.selected_date(), Some(day));
    }

    #[test]
    fn reset_skips_absent_entries() {
        let mut a = invalid(ControlKind::Input);
        let mut b = invalid(ControlKind::DatePicker);

        reset([Some(&mut a), None, Some(&mut b)]);

        assert!(!a.is_invalid());
        assert!(!b.is_invalid());
        assert_eq!(b.value_state_text(), "");
    }

    #[test]
    fn reset_works_through_trait_objects() {
        let mut a = invalid(ControlKind::Input);
        let controls: Vec<Option<&mut dyn FieldControl>> = vec![None, Some(&mut a)];
        reset(controls);
        assert!(!a.is_invalid());
    }

    #[test]
    fn control_set_reset_ids_skips_unknown() {
        let mut set: ControlSet<InputControl> = [
            ("inpName", invalid(ControlKind::Input)),
            ("inpAuthor", invalid(ControlKind::Input)),
        ]
        .into_iter()
        .collect();

        set.reset_ids(["inpName", "inpMissing"]);
        assert_eq!(set.invalid_ids(), ["inpAuthor"]);

        set.reset_all();
        assert!(set.invalid_ids().is_empty());
    }
}
