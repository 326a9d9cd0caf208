use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::core::editor::{Field, FieldEditor, Focus};
use crate::core::table::Record;

use super::styles::Palette;

pub const SAVE_BUTTON: &str = "[ Save ]";
pub const CANCEL_BUTTON: &str = "[ Cancel ]";

pub fn render_editor(f: &mut Frame, area: Rect, editor: &FieldEditor, context: &[&Record], palette: &Palette) {
    let mut lines: Vec<Line> = Vec::new();

    for record in context {
        let text = record
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join("  ");
        lines.push(Line::from(Span::styled(text, palette.blurred)));
    }
    if !context.is_empty() {
        lines.push(Line::from(""));
    }

    for field in editor.fields() {
        lines.push(field_line(field, palette));
    }

    lines.push(Line::from(""));
    lines.push(button_row(editor.focus(), palette));

    let title = if context.is_empty() {
        "Editor".to_string()
    } else {
        format!("Editor ({} selected)", context.len())
    };
    let form = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(title));

    f.render_widget(form, area);
}

/// Prompt, then text or placeholder, with the cursor drawn in place
pub fn field_line<'a>(field: &Field, palette: &Palette) -> Line<'a> {
    let text_style = if field.is_focused() { palette.focused } else { palette.plain };
    let mut spans = vec![Span::styled(format!("{}: ", field.label()), text_style)];

    if field.value().is_empty() {
        let mut placeholder = field.placeholder().chars();
        if field.cursor_visible() {
            let first = placeholder.next().map(String::from).unwrap_or_else(|| " ".to_string());
            spans.push(Span::styled(first, palette.cursor));
        }
        spans.push(Span::styled(placeholder.collect::<String>(), palette.blurred));
        return Line::from(spans);
    }

    let shown: Vec<char> = field.display_text(palette.mask_char).chars().collect();
    let cursor = field.cursor_position().min(shown.len());

    if field.cursor_visible() {
        let before: String = shown[..cursor].iter().collect();
        let under = shown.get(cursor).map(|c| c.to_string()).unwrap_or_else(|| " ".to_string());
        let after: String = shown.get(cursor + 1..).map(|s| s.iter().collect()).unwrap_or_default();
        spans.push(Span::styled(before, text_style));
        spans.push(Span::styled(under, palette.cursor));
        spans.push(Span::styled(after, text_style));
    } else {
        spans.push(Span::styled(shown.into_iter().collect::<String>(), text_style));
    }

    Line::from(spans)
}

pub fn button_row<'a>(focus: Focus, palette: &Palette) -> Line<'a> {
    let save_style = if focus == Focus::Save { palette.focused } else { palette.blurred };
    let cancel_style = if focus == Focus::Cancel { palette.focused } else { palette.blurred };

    Line::from(vec![
        Span::raw("    "),
        Span::styled(SAVE_BUTTON, save_style),
        Span::raw("    "),
        Span::styled(CANCEL_BUTTON, cancel_style),
    ])
}
