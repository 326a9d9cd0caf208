use crate::core::keys::Key;
use crate::domain::config::FieldConfig;

use super::input::InputBuffer;

/// One labelled input of the editor form
#[derive(Debug, Clone)]
pub struct Field {
    label: String,
    placeholder: String,
    masked: bool,
    buffer: InputBuffer,
    focused: bool,
    blink_on: bool,
}

impl Field {
    pub fn new(label: impl Into<String>, placeholder: impl Into<String>, char_limit: usize, masked: bool) -> Self {
        Self {
            label: label.into(),
            placeholder: placeholder.into(),
            masked,
            buffer: InputBuffer::new(char_limit),
            focused: false,
            blink_on: true,
        }
    }

    pub fn from_config(config: &FieldConfig) -> Self {
        Self::new(&config.label, &config.placeholder, config.char_limit, config.masked)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// The literal text, unmasked
    pub fn value(&self) -> &str {
        self.buffer.content()
    }

    /// What the screen shows: one `mask` per character for masked fields
    pub fn display_text(&self, mask: char) -> String {
        if self.masked {
            std::iter::repeat(mask).take(self.buffer.len()).collect()
        } else {
            self.buffer.content().to_string()
        }
    }

    pub fn cursor_position(&self) -> usize {
        self.buffer.cursor_position()
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn focus(&mut self) {
        self.focused = true;
        self.blink_on = true;
    }

    pub fn blur(&mut self) {
        self.focused = false;
    }

    /// Only a focused field takes input
    pub fn handle_key(&mut self, key: Key) -> bool {
        if !self.focused {
            return false;
        }
        let handled = self.buffer.handle_key(key);
        if handled {
            self.blink_on = true;
        }
        handled
    }

    /// Blink tick; delivered to every field whether focused or not
    pub fn on_tick(&mut self) {
        self.blink_on = !self.blink_on;
    }

    pub fn cursor_visible(&self) -> bool {
        self.focused && self.blink_on
    }
}
