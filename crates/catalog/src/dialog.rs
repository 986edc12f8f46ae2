//! Add/edit dialogs and the toasts shown after catalog changes.
//!
//! Each add or edit opens its own [`RecordDialog`]: a draft record plus the
//! controls that display its validation state. Nothing is shared between
//! two dialogs.

use std::marker::PhantomData;

use bookshelf_validator::form::{
    Clock, ControlSet, FieldKind, FormLayout, FormOutcome, FormValidator, InputControl,
    MessageProvider, Record, Value,
};
use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::error::{CatalogError, CatalogResult};
use crate::messages;
use crate::store::Catalog;

// ============================================================================
// TOASTS AND CONFIRMATION
// ============================================================================

/// A short message shown after an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    /// Message key.
    pub key: String,
    /// Localized text.
    pub text: String,
}

impl Toast {
    /// Looks up `key` with `args`.
    pub fn new(key: &str, args: &[&str], messages: &impl MessageProvider) -> Self {
        Self {
            key: key.to_owned(),
            text: messages.text(key, args),
        }
    }

    /// Result of deleting `removed` of `selected` rows.
    ///
    /// The error text counts the selection, since none of it was removed.
    pub fn deleted(removed: usize, selected: usize, messages: &impl MessageProvider) -> Self {
        if removed > 0 {
            Self::new(messages::MSG_DELETE_SUCCESS, &[&removed.to_string()], messages)
        } else {
            Self::new(messages::MSG_DELETE_ERROR, &[&selected.to_string()], messages)
        }
    }
}

/// Texts of the delete confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteConfirmation {
    /// Dialog title.
    pub title: String,
    /// Question.
    pub text: String,
    /// Confirm button.
    pub yes: String,
    /// Cancel button.
    pub no: String,
}

impl DeleteConfirmation {
    /// Resolves the confirmation texts.
    pub fn new(messages: &impl MessageProvider) -> Self {
        Self {
            title: messages.text(messages::CONFIRM_DIALOG_TITLE, &[]),
            text: messages.text(messages::CONFIRM_DIALOG_TEXT, &[]),
            yes: messages.text(messages::BTN_YES, &[]),
            no: messages.text(messages::BTN_NO, &[]),
        }
    }
}

// ============================================================================
// RECORD DIALOG
// ============================================================================

/// What a dialog saves into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DialogMode {
    /// A new row.
    Add,
    /// The row at this index.
    Edit(usize),
}

impl DialogMode {
    fn toast_keys(self) -> (&'static str, &'static str) {
        match self {
            Self::Add => (messages::MSG_CREATE_SUCCESS, messages::MSG_CREATE_ERROR),
            Self::Edit(_) => (messages::MSG_UPDATE_SUCCESS, messages::MSG_UPDATE_ERROR),
        }
    }
}

/// Result of [`RecordDialog::save`].
#[derive(Debug)]
pub enum SaveOutcome {
    /// The item was stored at `index`.
    Saved {
        /// Row index of the stored item.
        index: usize,
        /// Success message.
        toast: Toast,
    },
    /// Validation failed; the dialog's controls show why.
    Rejected(FormOutcome),
    /// The record passed validation but could not be stored.
    Failed {
        /// Error message.
        toast: Toast,
        /// Cause.
        error: CatalogError,
    },
}

impl SaveOutcome {
    /// Returns `true` for [`SaveOutcome::Saved`].
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved { .. })
    }
}

/// Per-operation dialog state for one entity kind.
#[derive(Debug, Clone)]
pub struct RecordDialog<E> {
    mode: DialogMode,
    layout: FormLayout,
    draft: Record,
    controls: ControlSet<InputControl>,
    _entity: PhantomData<E>,
}

impl<E: Entity> RecordDialog<E> {
    fn open(mode: DialogMode, draft: Record) -> Self {
        let layout = E::layout();
        let controls = layout.input_controls();
        let mut dialog = Self {
            mode,
            layout,
            draft: Record::new(),
            controls,
            _entity: PhantomData,
        };
        for (key, value) in draft.iter() {
            dialog.set(key, value.clone());
        }
        tracing::debug!(kind = E::NAME, ?mode, "dialog opened");
        dialog
    }

    /// Opens a dialog for a new item with an empty draft.
    pub fn open_add() -> Self {
        Self::open(DialogMode::Add, E::empty_record())
    }

    /// Opens a dialog editing a copy of the row at `index`.
    pub fn open_edit(catalog: &Catalog<E>, index: usize) -> CatalogResult<Self> {
        let item = catalog.get(index).ok_or(CatalogError::RowOutOfRange {
            index,
            len: catalog.len(),
        })?;
        Ok(Self::open(DialogMode::Edit(index), item.to_record()))
    }

    /// Add or edit.
    pub fn mode(&self) -> DialogMode {
        self.mode
    }

    /// The record being edited.
    pub fn draft(&self) -> &Record {
        &self.draft
    }

    /// The dialog's controls, by control id.
    pub fn controls(&self) -> &ControlSet<InputControl> {
        &self.controls
    }

    /// The control showing `key`.
    pub fn control(&self, key: &str) -> Option<&InputControl> {
        let spec = self.layout.spec(key)?;
        self.controls.get(&spec.control)
    }

    /// Sets a draft field.
    ///
    /// Date fields also move their picker's selection; text that reads as a
    /// day is stored as a date.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        let mut value = value.into();
        if let Some(spec) = self.layout.spec(key)
            && spec.kind == FieldKind::Date
        {
            let day = value.as_date();
            if let Some(day) = day {
                value = Value::Date(day);
            }
            if let Some(picker) = self.controls.get_mut(&spec.control) {
                picker.set_date_value(day);
            }
        }
        self.draft.insert(key, value);
    }

    /// Validates the draft and updates the controls.
    pub fn validate<M, K>(&mut self, validator: &FormValidator<M, K>) -> CatalogResult<FormOutcome>
    where
        M: MessageProvider,
        K: Clock,
    {
        let mut rules = self.layout.bind(&mut self.controls)?;
        Ok(validator.evaluate(&self.draft, &mut rules))
    }

    /// Validates the draft and, if it passes, stores it in `catalog`.
    ///
    /// A successful save closes the dialog.
    pub fn save<M, K>(
        &mut self,
        catalog: &mut Catalog<E>,
        validator: &FormValidator<M, K>,
    ) -> CatalogResult<SaveOutcome>
    where
        M: MessageProvider,
        K: Clock,
    {
        let outcome = self.validate(validator)?;
        if !outcome.is_valid() {
            tracing::debug!(kind = E::NAME, failures = outcome.failures().count(), "save rejected");
            return Ok(SaveOutcome::Rejected(outcome));
        }

        let (success_key, error_key) = self.mode.toast_keys();
        let messages = validator.messages();
        let stored = E::from_record(&self.draft).and_then(|item| match self.mode {
            DialogMode::Add => Ok(catalog.add(item)),
            DialogMode::Edit(index) => catalog.update(index, item).map(|()| index),
        });

        match stored {
            Ok(index) => {
                self.close();
                Ok(SaveOutcome::Saved {
                    index,
                    toast: Toast::new(success_key, &[], messages),
                })
            }
            Err(error) => {
                tracing::warn!(kind = E::NAME, %error, "save failed");
                Ok(SaveOutcome::Failed {
                    toast: Toast::new(error_key, &[], messages),
                    error,
                })
            }
        }
    }

    /// Clears every control's error state.
    pub fn close(&mut self) {
        self.controls.reset_all();
    }
}
