use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::core::router::{FocusRouter, Mode};

use super::widgets::{
    editor::render_editor,
    status::render_status_bar,
    styles::Palette,
    table::render_table,
};

pub fn draw_ui(f: &mut Frame, router: &FocusRouter, palette: &Palette) {
    let size = f.size();

    match router.mode() {
        Mode::Table => {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Min(0),                                   // Table
                    Constraint::Length(router.geometry().status_height), // Status bar
                ])
                .split(size);

            render_table(f, chunks[0], router.table(), palette);
            render_status_bar(f, chunks[1], router.status(), palette);
        }
        Mode::Editor => {
            if let Some(editor) = router.editor() {
                let context = router.table().selected_rows();
                render_editor(f, size, editor, &context, palette);
            }
        }
    }
}
