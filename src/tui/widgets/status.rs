use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::styles::Palette;

pub fn render_status_bar(f: &mut Frame, area: Rect, message: &str, palette: &Palette) {
    let status = Paragraph::new(Line::from(vec![Span::raw(message.to_string())]))
        .style(palette.status);

    f.render_widget(status, area);
}
