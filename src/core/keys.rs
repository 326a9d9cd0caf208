use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::error::RowdeskError;

/// A key press, reduced to the names the router understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Key {
    Tab,
    BackTab,
    Enter,
    Up,
    Down,
    Left,
    Right,
    Esc,
    Backspace,
    Delete,
    Home,
    End,
    /// Control chord; the letter is always lowercase
    Ctrl(char),
    /// Printable character, including space
    Char(char),
}

impl Key {
    /// Canonical name, e.g. `"shift+tab"`, `"ctrl+e"`, `"space"`, `"a"`
    pub fn name(&self) -> String {
        match self {
            Key::Tab => "tab".to_string(),
            Key::BackTab => "shift+tab".to_string(),
            Key::Enter => "enter".to_string(),
            Key::Up => "up".to_string(),
            Key::Down => "down".to_string(),
            Key::Left => "left".to_string(),
            Key::Right => "right".to_string(),
            Key::Esc => "esc".to_string(),
            Key::Backspace => "backspace".to_string(),
            Key::Delete => "delete".to_string(),
            Key::Home => "home".to_string(),
            Key::End => "end".to_string(),
            Key::Ctrl(c) => format!("ctrl+{}", c),
            Key::Char(' ') => "space".to_string(),
            Key::Char(c) => c.to_string(),
        }
    }

    pub fn parse(name: &str) -> Result<Self, RowdeskError> {
        // A lone space is a valid name and must not be trimmed away
        if name == " " {
            return Ok(Key::Char(' '));
        }

        let trimmed = name.trim();
        let mut chars = trimmed.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Ok(Key::Char(c));
        }

        let lowered = trimmed.to_lowercase();
        let key = match lowered.as_str() {
            "tab" => Key::Tab,
            "shift+tab" | "backtab" => Key::BackTab,
            "enter" => Key::Enter,
            "up" => Key::Up,
            "down" => Key::Down,
            "left" => Key::Left,
            "right" => Key::Right,
            "esc" | "escape" => Key::Esc,
            "backspace" => Key::Backspace,
            "delete" | "del" => Key::Delete,
            "home" => Key::Home,
            "end" => Key::End,
            "space" => Key::Char(' '),
            other => {
                let letter = other
                    .strip_prefix("ctrl+")
                    .and_then(|rest| {
                        let mut chars = rest.chars();
                        match (chars.next(), chars.next()) {
                            (Some(c), None) if c.is_ascii_alphanumeric() => Some(c),
                            _ => None,
                        }
                    })
                    .ok_or_else(|| RowdeskError::InvalidInput(format!("Unknown key name: '{}'", name)))?;
                Key::Ctrl(letter)
            }
        };

        Ok(key)
    }

    /// Letters and digits feed the filter; everything else does not
    pub fn filter_char(&self) -> Option<char> {
        match self {
            Key::Char(c) if c.is_alphanumeric() => Some(*c),
            _ => None,
        }
    }

    /// Keys that table mode or the form already act on: cursor and focus
    /// movement, Enter, Esc, Backspace and filter characters
    pub fn is_reserved(&self) -> bool {
        match self {
            Key::Tab
            | Key::BackTab
            | Key::Enter
            | Key::Up
            | Key::Down
            | Key::Left
            | Key::Right
            | Key::Esc
            | Key::Backspace => true,
            Key::Char(_) => self.filter_char().is_some(),
            _ => false,
        }
    }

    /// Keys a focused form field consumes as text editing
    pub fn edits_text(&self) -> bool {
        matches!(self, Key::Char(_) | Key::Backspace | Key::Delete | Key::Home | Key::End)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Key {
    type Err = RowdeskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Key::parse(s)
    }
}

impl TryFrom<String> for Key {
    type Error = RowdeskError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Key::parse(&value)
    }
}

impl From<Key> for String {
    fn from(key: Key) -> Self {
        key.name()
    }
}

/// Keys bound to the router's table-mode actions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub toggle_editor: Key,
    pub sort: Key,
    pub select: Key,
    pub select_all: Key,
    pub refresh: Key,
    pub quit: Key,
}

impl KeyBindings {
    /// Every binding paired with the action name used in diagnostics
    pub fn entries(&self) -> [(&'static str, Key); 6] {
        [
            ("toggle_editor", self.toggle_editor),
            ("sort", self.sort),
            ("select", self.select),
            ("select_all", self.select_all),
            ("refresh", self.refresh),
            ("quit", self.quit),
        ]
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            toggle_editor: Key::Ctrl('e'),
            sort: Key::Ctrl('s'),
            select: Key::Char(' '),
            select_all: Key::Ctrl('a'),
            refresh: Key::Ctrl('r'),
            quit: Key::Ctrl('c'),
        }
    }
}
