//! Form elements that can be submitted.

use std::sync::RwLock;

use crate::form::payload::{FormField, FormPayload};

/// A form element as seen by a submission handler.
///
/// `snapshot` is called once per submit event and must reflect the field
/// values at that moment.
pub trait FormSource: Send + Sync {
    /// Element identifier (e.g. `form`, `form-documentos`).
    fn id(&self) -> &str;

    /// Capture the current field values.
    fn snapshot(&self) -> FormPayload;
}

/// An in-memory form whose fields can be edited between submissions.
#[derive(Debug)]
pub struct StaticForm {
    id: String,
    fields: RwLock<FormPayload>,
}

impl StaticForm {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: RwLock::new(FormPayload::new()),
        }
    }

    pub fn with_payload(id: impl Into<String>, payload: FormPayload) -> Self {
        Self {
            id: id.into(),
            fields: RwLock::new(payload),
        }
    }

    /// Set a text field, replacing any previous value under the same name.
    pub fn set_text(&self, name: &str, value: impl Into<String>) {
        let value = value.into();
        self.edit(|payload| {
            let mut next = FormPayload::new();
            let mut replaced = false;
            for (n, f) in payload.entries() {
                if n == name && matches!(f, FormField::Text(_)) {
                    if !replaced {
                        next.push(n.clone(), FormField::Text(value.clone()));
                        replaced = true;
                    }
                } else {
                    next.push(n.clone(), f.clone());
                }
            }
            if !replaced {
                next.push(name, FormField::Text(value));
            }
            *payload = next;
        });
    }

    /// Add a file to a (possibly multi-file) input.
    pub fn attach_file(&self, name: &str, file: FormField) {
        self.edit(|payload| payload.push(name, file));
    }

    /// Reset every field.
    pub fn clear(&self) {
        self.edit(|payload| *payload = FormPayload::new());
    }

    fn edit(&self, f: impl FnOnce(&mut FormPayload)) {
        // A poisoned lock still holds a consistent payload.
        let mut guard = self.fields.write().unwrap_or_else(|e| e.into_inner());
        f(&mut *guard);
    }
}

impl FormSource for StaticForm {
    fn id(&self) -> &str {
        &self.id
    }

    fn snapshot(&self) -> FormPayload {
        self.fields
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}
