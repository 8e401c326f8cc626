use tracing::{debug, trace};

use crate::domain::{FieldFlag, View, template_view};

use super::{
    error::FormError,
    observer::{Change, Observers, SubscriptionId},
    path::{FieldPath, FieldValue, PathFilter},
    validation::{ValidationReport, validate_view},
};

/// Single owner of the live [`View`] document.
///
/// Every read and write from the general form and the field table goes
/// through here. The snapshot taken by [`FormState::load`] is what
/// [`FormState::reset`] restores; both are deep copies, so edits never leak
/// back into the caller's value or into the snapshot.
///
/// Dirty tracking is write-based: any successful [`FormState::set_value`]
/// marks the document dirty, even when the written value equals the old one.
#[derive(Debug)]
pub struct FormState {
    view: View,
    snapshot: View,
    dirty: bool,
    observers: Observers,
}

impl Default for FormState {
    fn default() -> Self {
        let view = template_view();
        Self {
            snapshot: view.clone(),
            view,
            dirty: false,
            observers: Observers::default(),
        }
    }
}

impl FormState {
    pub fn new(snapshot: &View) -> Result<Self, FormError> {
        let mut state = Self::default();
        state.load(snapshot)?;
        Ok(state)
    }

    /// Replace the live document and the reset snapshot with copies of `snapshot`.
    pub fn load(&mut self, snapshot: &View) -> Result<(), FormError> {
        if let Some(id) = snapshot.duplicate_field_id() {
            return Err(FormError::DuplicateFieldId(id));
        }
        self.snapshot = snapshot.clone();
        self.view = snapshot.clone();
        self.dirty = false;
        debug!(
            view = %self.view.name,
            fields = self.view.fields.len(),
            "loaded view"
        );
        self.observers.notify(&Change::Reloaded);
        Ok(())
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn snapshot(&self) -> &View {
        &self.snapshot
    }

    pub fn get_value(&self, path: &FieldPath) -> Option<FieldValue> {
        match path {
            FieldPath::Name => Some(FieldValue::Text(self.view.name.clone())),
            FieldPath::Label => Some(FieldValue::Text(self.view.label.clone())),
            FieldPath::FieldName(row) => self
                .view
                .field(*row)
                .map(|field| FieldValue::Text(field.name.clone())),
            FieldPath::Flag { row, flag } => self.flag(*row, *flag).map(FieldValue::Flag),
        }
    }

    /// Typed shortcut for flag paths.
    pub fn flag(&self, row: crate::domain::FieldId, flag: FieldFlag) -> Option<bool> {
        self.view.field(row).map(|field| flag.get(field))
    }

    pub fn set_value(
        &mut self,
        path: &FieldPath,
        value: impl Into<FieldValue>,
    ) -> Result<(), FormError> {
        let value = value.into();
        match (path, &value) {
            (FieldPath::Name, FieldValue::Text(text)) => self.view.name = text.clone(),
            (FieldPath::Label, FieldValue::Text(text)) => self.view.label = text.clone(),
            (FieldPath::FieldName(row), FieldValue::Text(text)) => {
                let field = self
                    .view
                    .field_mut(*row)
                    .ok_or(FormError::UnknownField(*row))?;
                field.name = text.clone();
            }
            (FieldPath::Flag { row, flag }, FieldValue::Flag(checked)) => {
                let field = self
                    .view
                    .field_mut(*row)
                    .ok_or(FormError::UnknownField(*row))?;
                flag.set(field, *checked);
            }
            _ => {
                return Err(FormError::TypeMismatch {
                    path: *path,
                    expected: if path.expects_flag() { "flag" } else { "text" },
                    actual: value.kind(),
                });
            }
        }
        self.dirty = true;
        trace!(%path, ?value, "field written");
        self.observers.notify(&Change::Written {
            path,
            value: &value,
        });
        Ok(())
    }

    /// Restore the last loaded snapshot.
    pub fn reset(&mut self) {
        self.view = self.snapshot.clone();
        self.dirty = false;
        debug!(view = %self.view.name, "reset view to snapshot");
        self.observers.notify(&Change::Reset);
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// The document to persist. Dirty state is left for the caller to clear.
    pub fn submit(&self) -> View {
        debug!(view = %self.view.name, dirty = self.dirty, "submitting view");
        self.view.clone()
    }

    /// Accept the live document as persisted: it becomes the reset snapshot and dirty clears.
    pub fn mark_clean(&mut self) {
        self.snapshot = self.view.clone();
        self.dirty = false;
    }

    pub fn validate(&self) -> ValidationReport {
        validate_view(&self.view)
    }

    pub fn subscribe(
        &mut self,
        filter: PathFilter,
        callback: impl FnMut(&Change<'_>) + 'static,
    ) -> SubscriptionId {
        self.observers.subscribe(filter, callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.observers.len()
    }
}
