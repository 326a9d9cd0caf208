use crate::core::keys::Key;

/// Single-line text buffer with a character limit.
///
/// The cursor counts characters, not bytes.
#[derive(Debug, Clone)]
pub struct InputBuffer {
    content: String,
    cursor_position: usize,
    char_limit: usize,
}

impl InputBuffer {
    pub fn new(char_limit: usize) -> Self {
        Self {
            content: String::new(),
            cursor_position: 0,
            char_limit,
        }
    }

    /// Apply an editing key. Returns whether the key was an editing key,
    /// even when it changed nothing (e.g. typing past the limit).
    pub fn handle_key(&mut self, key: Key) -> bool {
        match key {
            Key::Char(c) => {
                self.insert_char(c);
                true
            }
            Key::Backspace => {
                self.delete_char();
                true
            }
            Key::Delete => {
                self.delete_char_forward();
                true
            }
            Key::Home => {
                self.move_to_start();
                true
            }
            Key::End => {
                self.move_to_end();
                true
            }
            _ => false,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn cursor_position(&self) -> usize {
        self.cursor_position
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn len(&self) -> usize {
        self.content.chars().count()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.content
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.content.len())
    }

    fn insert_char(&mut self, c: char) {
        if self.len() >= self.char_limit {
            return;
        }
        let at = self.byte_index(self.cursor_position);
        self.content.insert(at, c);
        self.cursor_position += 1;
    }

    fn delete_char(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
            let at = self.byte_index(self.cursor_position);
            self.content.remove(at);
        }
    }

    fn delete_char_forward(&mut self) {
        if self.cursor_position < self.len() {
            let at = self.byte_index(self.cursor_position);
            self.content.remove(at);
        }
    }

    fn move_to_start(&mut self) {
        self.cursor_position = 0;
    }

    fn move_to_end(&mut self) {
        self.cursor_position = self.len();
    }
}
