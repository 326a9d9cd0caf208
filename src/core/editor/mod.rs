//! Multi-field editor form.
//!
//! The form has `N` fields followed by two actions, Save and Cancel, so focus
//! moves over `N + 2` positions and wraps in both directions. Exactly one
//! position is focused at any time. Every exit (Save, Cancel, Esc) produces an
//! [`EditorReport`] listing every field in declared order.

pub mod field;
pub mod input;

use serde::Serialize;
use std::fmt;

use crate::core::keys::Key;
use crate::domain::config::FieldConfig;
use crate::domain::error::{RowdeskError, RowdeskResult};

pub use field::Field;
pub use input::InputBuffer;

/// The focused element of the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Field(usize),
    Save,
    Cancel,
}

/// How an editor session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EditorOutcome {
    Saved,
    Discarded,
}

impl fmt::Display for EditorOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditorOutcome::Saved => write!(f, "saved"),
            EditorOutcome::Discarded => write!(f, "discarded"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldValue {
    pub label: String,
    pub value: String,
}

/// Field values at the moment the editor closed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditorReport {
    pub outcome: EditorOutcome,
    pub values: Vec<FieldValue>,
}

/// Result of feeding one key to the editor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorSignal {
    Continue,
    Exit(EditorReport),
}

#[derive(Debug, Clone)]
pub struct FieldEditor {
    fields: Vec<Field>,
    focus_index: usize,
}

impl FieldEditor {
    pub fn new(fields: Vec<Field>) -> RowdeskResult<Self> {
        if fields.is_empty() {
            return Err(RowdeskError::InvalidInput("Editor needs at least one field".to_string()));
        }
        let mut editor = Self {
            fields,
            focus_index: 0,
        };
        editor.apply_focus();
        Ok(editor)
    }

    pub fn from_config(fields: &[FieldConfig]) -> RowdeskResult<Self> {
        Self::new(fields.iter().map(Field::from_config).collect())
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Index in `[0, N + 1]`; `N` is Save, `N + 1` is Cancel
    pub fn focus_index(&self) -> usize {
        self.focus_index
    }

    pub fn focus(&self) -> Focus {
        let n = self.fields.len();
        match self.focus_index {
            i if i < n => Focus::Field(i),
            i if i == n => Focus::Save,
            _ => Focus::Cancel,
        }
    }

    fn positions(&self) -> usize {
        self.fields.len() + 2
    }

    pub fn advance(&mut self) {
        self.focus_index = (self.focus_index + 1) % self.positions();
        self.apply_focus();
    }

    pub fn retreat(&mut self) {
        self.focus_index = (self.focus_index + self.positions() - 1) % self.positions();
        self.apply_focus();
    }

    // Every field is touched so no two ever look focused at once.
    fn apply_focus(&mut self) {
        let focus_index = self.focus_index;
        for (i, field) in self.fields.iter_mut().enumerate() {
            if i == focus_index {
                field.focus();
            } else {
                field.blur();
            }
        }
    }

    pub fn handle_key(&mut self, key: Key) -> EditorSignal {
        match key {
            Key::Esc => return EditorSignal::Exit(self.abandon()),
            Key::Enter => match self.focus() {
                Focus::Save => return EditorSignal::Exit(self.report(EditorOutcome::Saved)),
                Focus::Cancel => return EditorSignal::Exit(self.report(EditorOutcome::Discarded)),
                Focus::Field(_) => self.advance(),
            },
            Key::Tab | Key::Down | Key::Right => self.advance(),
            Key::BackTab | Key::Up | Key::Left => self.retreat(),
            other => {
                if let Focus::Field(i) = self.focus() {
                    self.fields[i].handle_key(other);
                }
            }
        }
        EditorSignal::Continue
    }

    /// Blink tick for every field
    pub fn on_tick(&mut self) {
        for field in &mut self.fields {
            field.on_tick();
        }
    }

    /// Leave without saving, from any focus position
    pub fn abandon(&self) -> EditorReport {
        self.report(EditorOutcome::Discarded)
    }

    pub fn report(&self, outcome: EditorOutcome) -> EditorReport {
        EditorReport {
            outcome,
            values: self
                .fields
                .iter()
                .map(|f| FieldValue {
                    label: f.label().to_string(),
                    value: f.value().to_string(),
                })
                .collect(),
        }
    }

    /// Number of focused elements, counting the action buttons
    pub fn focused_count(&self) -> usize {
        let fields = self.fields.iter().filter(|f| f.is_focused()).count();
        let actions = usize::from(matches!(self.focus(), Focus::Save | Focus::Cancel));
        fields + actions
    }
}
