use ratatui::style::{Color, Modifier, Style};

/// Every style the screen uses, passed explicitly into the render functions
#[derive(Debug, Clone)]
pub struct Palette {
    pub focused: Style,
    pub blurred: Style,
    pub plain: Style,
    pub cursor: Style,
    pub status: Style,
    pub header: Style,
    pub cursor_row: Style,
    pub cursor_cell: Style,
    pub selected_row: Style,
    pub mask_char: char,
}

impl Palette {
    pub fn new(mask_char: char) -> Self {
        let focused = Style::default().fg(Color::Indexed(205));
        Self {
            focused,
            blurred: Style::default().fg(Color::Indexed(240)),
            plain: Style::default(),
            cursor: focused.add_modifier(Modifier::REVERSED),
            status: Style::default()
                .bg(Color::Rgb(0x71, 0x58, 0xe2))
                .fg(Color::Rgb(0xff, 0xff, 0xff)),
            header: Style::default().add_modifier(Modifier::BOLD),
            cursor_row: Style::default().bg(Color::DarkGray),
            cursor_cell: Style::default().add_modifier(Modifier::REVERSED),
            selected_row: Style::default().fg(Color::Cyan),
            mask_char,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new('•')
    }
}
