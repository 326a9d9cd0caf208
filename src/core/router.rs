//! Top-level mode dispatcher.
//!
//! Every input event passes through [`FocusRouter::handle`]. In table mode
//! keys drive the table model and the filter accumulator; in editor mode they
//! go to the field editor until it reports an exit.

use tracing::{debug, info, warn};

use crate::core::editor::{EditorReport, EditorSignal, FieldEditor};
use crate::core::filter::FilterAccumulator;
use crate::core::keys::{Key, KeyBindings};
use crate::core::table::TableModel;
use crate::domain::config::FieldConfig;
use crate::domain::error::RowdeskResult;

/// Which view owns input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Table,
    Editor,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Table => write!(f, "Table"),
            Mode::Editor => write!(f, "Editor"),
        }
    }
}

/// Everything the event queue can deliver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Key(Key),
    Resize { width: u16, height: u16 },
    /// Cursor blink
    Tick,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Sizes shared by the table and the status bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Geometry {
    pub table_width: u16,
    pub table_height: u16,
    pub status_width: u16,
    pub status_height: u16,
}

impl Geometry {
    pub fn for_terminal(width: u16, height: u16, status_height: u16) -> Self {
        Self {
            table_width: width,
            table_height: height.saturating_sub(status_height),
            status_width: width,
            status_height,
        }
    }
}

pub struct FocusRouter {
    mode: Mode,
    table: TableModel,
    filter: FilterAccumulator,
    editor: Option<FieldEditor>,
    // Cloned on every open so each session starts from defaults
    editor_template: FieldEditor,
    bindings: KeyBindings,
    geometry: Geometry,
    status: String,
    notice: Option<String>,
    last_report: Option<EditorReport>,
}

impl FocusRouter {
    pub fn new(
        table: TableModel,
        fields: &[FieldConfig],
        bindings: KeyBindings,
        status_height: u16,
    ) -> RowdeskResult<Self> {
        let editor_template = FieldEditor::from_config(fields)?;
        let mut router = Self {
            mode: Mode::Table,
            table,
            filter: FilterAccumulator::new(),
            editor: None,
            editor_template,
            bindings,
            geometry: Geometry::for_terminal(0, 0, status_height),
            status: String::new(),
            notice: None,
            last_report: None,
        };
        router.refresh_status();
        Ok(router)
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn table(&self) -> &TableModel {
        &self.table
    }

    pub fn editor(&self) -> Option<&FieldEditor> {
        self.editor.as_ref()
    }

    pub fn filter(&self) -> &FilterAccumulator {
        &self.filter
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn last_report(&self) -> Option<&EditorReport> {
        self.last_report.as_ref()
    }

    pub fn handle(&mut self, event: InputEvent) -> Flow {
        let flow = match event {
            InputEvent::Resize { width, height } => {
                self.resize(width, height);
                Flow::Continue
            }
            InputEvent::Tick => {
                if let Some(editor) = &mut self.editor {
                    editor.on_tick();
                }
                Flow::Continue
            }
            InputEvent::Key(key) => {
                self.notice = None;
                self.handle_key(key)
            }
        };
        self.refresh_status();
        flow
    }

    fn handle_key(&mut self, key: Key) -> Flow {
        if key == self.bindings.quit {
            info!("quit requested");
            return Flow::Quit;
        }
        match self.mode {
            Mode::Table => self.handle_table_key(key),
            Mode::Editor => self.handle_editor_key(key),
        }
        Flow::Continue
    }

    fn handle_table_key(&mut self, key: Key) {
        let bindings = &self.bindings;
        if key == bindings.toggle_editor {
            self.open_editor();
        } else if key == bindings.sort {
            let (column, _) = self.table.cursor_location();
            self.table.toggle_sort(column);
        } else if key == bindings.select {
            self.table.toggle_select();
            debug!(selected = self.table.selected_count(), "selection toggled");
        } else if key == bindings.select_all {
            if self.table.all_selected() {
                self.table.unselect_all();
            } else {
                self.table.select_all();
            }
            debug!(selected = self.table.selected_count(), "select all toggled");
        } else if key == bindings.refresh {
            warn!("refresh requested; records are a fixed snapshot");
            self.notice = Some("Refresh is not supported".to_string());
        } else {
            match key {
                Key::Up => self.table.cursor_up(),
                Key::Down => self.table.cursor_down(),
                Key::Left => self.table.cursor_left(),
                Key::Right => self.table.cursor_right(),
                Key::Esc => {
                    self.filter.clear();
                    self.apply_filter();
                }
                Key::Backspace => {
                    self.filter.backspace();
                    self.apply_filter();
                }
                // Reserved for a cell detail view
                Key::Enter => {}
                other => {
                    if let Some(c) = other.filter_char() {
                        let (column, _) = self.table.cursor_location();
                        self.filter.push(column, c);
                        self.apply_filter();
                    }
                }
            }
        }
    }

    fn handle_editor_key(&mut self, key: Key) {
        let signal = match &mut self.editor {
            Some(editor) if key == self.bindings.toggle_editor => EditorSignal::Exit(editor.abandon()),
            Some(editor) => editor.handle_key(key),
            None => {
                self.mode = Mode::Table;
                return;
            }
        };
        if let EditorSignal::Exit(report) = signal {
            self.close_editor(report);
        }
    }

    fn open_editor(&mut self) {
        self.editor = Some(self.editor_template.clone());
        self.mode = Mode::Editor;
        debug!(context_rows = self.table.selected_count(), "editor opened");
    }

    fn close_editor(&mut self, report: EditorReport) {
        for (index, field) in report.values.iter().enumerate() {
            info!(index, label = %field.label, value_len = field.value.chars().count(), "editor field");
        }
        info!(outcome = %report.outcome, "editor closed");

        self.notice = Some(format!("Editor {}", report.outcome));
        self.last_report = Some(report);
        self.editor = None;
        self.mode = Mode::Table;
    }

    fn apply_filter(&mut self) {
        self.table.set_filter(self.filter.current());
        debug!(visible = self.table.visible_count(), "filter applied");
    }

    fn resize(&mut self, width: u16, height: u16) {
        self.geometry = Geometry::for_terminal(width, height, self.geometry.status_height);
        self.table.set_size(self.geometry.table_width, self.geometry.table_height);
    }

    fn refresh_status(&mut self) {
        let mut status = format!("Selected: {}", self.table.selected_count());

        if let Some(filter) = self.filter.current() {
            let name = self.table.column_name(filter.column()).unwrap_or("?");
            status.push_str(&format!(" | Filter[{}]: {}", name, filter.text()));
        }
        if let Some(sort) = self.table.sort() {
            let name = self.table.column_name(sort.column).unwrap_or("?");
            status.push_str(&format!(" | Sort[{}] {}", name, sort.order));
        }
        if let Some(notice) = &self.notice {
            status.push_str(" | ");
            status.push_str(notice);
        }

        self.status = status;
    }
}
