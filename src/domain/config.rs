use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;

use crate::core::keys::KeyBindings;
use crate::domain::error::{RowdeskError, RowdeskResult};

/// Rowdesk configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RowdeskConfig {
    /// Global configuration
    pub global: GlobalConfig,
    /// Record source and column declarations
    pub data: DataConfig,
    /// Screen settings
    pub ui: UiConfig,
    /// Table-mode key bindings
    pub keys: KeyBindings,
    /// Editor form
    pub editor: EditorConfig,
}

/// Global configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Default log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Directory for the interactive session's log files
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<PathBuf>,
    /// Daily log files kept before the oldest is deleted
    #[serde(default = "default_log_max_files")]
    pub log_max_files: usize,
}

/// Where records come from and how their columns are typed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// CSV file path
    #[serde(default = "default_data_path")]
    pub path: PathBuf,
    /// Field delimiter, a single ASCII character
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
    /// Column declarations, in display order
    #[serde(default = "default_columns")]
    pub columns: Vec<ColumnSpec>,
}

/// Declared type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Integer,
    Text,
}

/// Column declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    /// Header name in the CSV file
    pub name: String,
    /// Cell type
    pub kind: ColumnKind,
    /// Share of the table width
    #[serde(default = "default_ratio")]
    pub ratio: u16,
    /// Minimum width in cells
    #[serde(default = "default_min_width")]
    pub min_width: u16,
}

/// Screen settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Cursor blink period in milliseconds
    #[serde(default = "default_blink_interval")]
    pub blink_interval_ms: u64,
    /// Height of the status bar in lines
    #[serde(default = "default_status_height")]
    pub status_height: u16,
    /// Character echoed by masked fields
    #[serde(default = "default_mask_char")]
    pub mask_char: char,
}

/// Editor form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorConfig {
    #[serde(default = "default_fields")]
    pub fields: Vec<FieldConfig>,
}

/// One editor input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldConfig {
    pub label: String,
    #[serde(default)]
    pub placeholder: String,
    #[serde(default = "default_char_limit")]
    pub char_limit: usize,
    #[serde(default)]
    pub masked: bool,
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_max_files() -> usize {
    3
}

fn default_data_path() -> PathBuf {
    PathBuf::from("data/sample.csv")
}

fn default_delimiter() -> char {
    ','
}

fn default_ratio() -> u16 {
    1
}

fn default_min_width() -> u16 {
    5
}

fn default_blink_interval() -> u64 {
    530
}

fn default_status_height() -> u16 {
    1
}

fn default_mask_char() -> char {
    '•'
}

fn default_char_limit() -> usize {
    32
}

fn column(name: &str, kind: ColumnKind, ratio: u16, min_width: u16) -> ColumnSpec {
    ColumnSpec {
        name: name.to_string(),
        kind,
        ratio,
        min_width,
    }
}

fn default_columns() -> Vec<ColumnSpec> {
    vec![
        column("id", ColumnKind::Integer, 1, 5),
        column("First Name", ColumnKind::Text, 10, 5),
        column("Last Name", ColumnKind::Text, 10, 5),
        column("Age", ColumnKind::Integer, 5, 2),
        column("Occupation", ColumnKind::Text, 10, 5),
    ]
}

fn field(label: &str, placeholder: &str, char_limit: usize, masked: bool) -> FieldConfig {
    FieldConfig {
        label: label.to_string(),
        placeholder: placeholder.to_string(),
        char_limit,
        masked,
    }
}

fn default_fields() -> Vec<FieldConfig> {
    vec![
        field("Account", "Nickname", 32, false),
        field("Email", "Email", 64, false),
        field("Password", "Password", 32, true),
    ]
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_dir: None,
            log_max_files: default_log_max_files(),
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: default_data_path(),
            delimiter: default_delimiter(),
            columns: default_columns(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            blink_interval_ms: default_blink_interval(),
            status_height: default_status_height(),
            mask_char: default_mask_char(),
        }
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            fields: default_fields(),
        }
    }
}

impl DataConfig {
    /// Delimiter as the byte the CSV reader expects
    pub fn delimiter_byte(&self) -> RowdeskResult<u8> {
        if self.delimiter.is_ascii() {
            Ok(self.delimiter as u8)
        } else {
            Err(RowdeskError::config(format!(
                "Delimiter must be a single ASCII character, got '{}'",
                self.delimiter
            )))
        }
    }
}

impl RowdeskConfig {
    /// Reject configurations the interactive session cannot start with
    pub fn validate(&self) -> RowdeskResult<()> {
        if self.global.log_max_files == 0 {
            return Err(RowdeskError::config("log_max_files must be at least 1"));
        }

        let columns = &self.data.columns;
        if columns.is_empty() {
            return Err(RowdeskError::config("At least one column must be declared"));
        }

        let mut names = HashSet::new();
        for column in columns {
            if column.name.trim().is_empty() {
                return Err(RowdeskError::config("Column names must not be empty"));
            }
            if !names.insert(column.name.as_str()) {
                return Err(RowdeskError::config(format!("Duplicate column '{}'", column.name)));
            }
        }

        if columns.iter().all(|c| c.ratio == 0) {
            return Err(RowdeskError::config("At least one column needs a non-zero ratio"));
        }

        self.data.delimiter_byte()?;

        if self.editor.fields.is_empty() {
            return Err(RowdeskError::config("The editor needs at least one field"));
        }
        if let Some(field) = self.editor.fields.iter().find(|f| f.char_limit == 0) {
            return Err(RowdeskError::config(format!(
                "Field '{}' has a zero character limit",
                field.label
            )));
        }

        if self.ui.blink_interval_ms == 0 {
            return Err(RowdeskError::config("blink_interval_ms must be positive"));
        }
        if self.ui.status_height == 0 {
            return Err(RowdeskError::config("status_height must be at least 1"));
        }

        for (action, key) in self.keys.entries() {
            if key.is_reserved() {
                return Err(RowdeskError::config(format!(
                    "Key '{}' cannot be bound to {}: it moves the cursor, changes focus or types into the filter",
                    key, action
                )));
            }
        }
        // These two stay live while the editor form has focus
        for (action, key) in [("toggle_editor", self.keys.toggle_editor), ("quit", self.keys.quit)] {
            if key.edits_text() {
                return Err(RowdeskError::config(format!(
                    "Key '{}' cannot be bound to {}: editor fields need it for typing",
                    key, action
                )));
            }
        }

        let mut seen = HashSet::new();
        for (action, key) in self.keys.entries() {
            if !seen.insert(key) {
                return Err(RowdeskError::config(format!(
                    "Key '{}' is bound to more than one action (second: {})",
                    key, action
                )));
            }
        }

        Ok(())
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::keys::Key;

    #[test]
    fn test_config_serialization() {
        let config = RowdeskConfig::default();
        let toml_str = toml::to_string(&config).unwrap();
        let deserialized: RowdeskConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(deserialized.data.columns, config.data.columns);
        assert_eq!(deserialized.editor.fields, config.editor.fields);
        assert_eq!(deserialized.keys, config.keys);
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = RowdeskConfig::default();
        config.validate().unwrap();
        let names: Vec<&str> = config.data.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["id", "First Name", "Last Name", "Age", "Occupation"]);
        assert_eq!(config.global.log_max_files, 3);
        assert_eq!(config.editor.fields.len(), 3);
        assert_eq!(config.editor.fields[1].char_limit, 64);
        assert!(config.editor.fields[2].masked);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: RowdeskConfig = toml::from_str(
            r#"
            [data]
            path = "people.csv"

            [[data.columns]]
            name = "Name"
            kind = "text"
            "#,
        )
        .unwrap();

        assert_eq!(config.data.path, PathBuf::from("people.csv"));
        assert_eq!(config.data.columns.len(), 1);
        assert_eq!(config.data.columns[0].ratio, 1);
        assert_eq!(config.data.columns[0].min_width, 5);
        assert_eq!(config.ui.blink_interval_ms, 530);
        assert_eq!(config.keys.toggle_editor, Key::Ctrl('e'));
        config.validate().unwrap();
    }

    #[test]
    fn test_unknown_column_kind_is_rejected() {
        let parsed: Result<RowdeskConfig, _> = toml::from_str(
            r#"
            [[data.columns]]
            name = "When"
            kind = "date"
            "#,
        );
        assert!(parsed.is_err());
    }

    #[test]
    fn test_validate_rejects_bad_configs() {
        let mut config = RowdeskConfig::default();
        config.editor.fields.clear();
        assert!(config.validate().is_err());

        let mut config = RowdeskConfig::default();
        config.data.columns.push(config.data.columns[0].clone());
        assert!(config.validate().is_err());

        let mut config = RowdeskConfig::default();
        config.keys.sort = config.keys.quit;
        assert!(config.validate().is_err());

        let mut config = RowdeskConfig::default();
        config.data.delimiter = '；';
        assert!(config.validate().is_err());

        let mut config = RowdeskConfig::default();
        for column in &mut config.data.columns {
            column.ratio = 0;
        }
        assert!(config.validate().is_err());

        let mut config = RowdeskConfig::default();
        config.global.log_max_files = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_shadowing_bindings() {
        let shadowing = [
            ("quit", Key::Char('q')),
            ("toggle_editor", Key::Tab),
            ("select_all", Key::Char('a')),
            ("sort", Key::Left),
            ("refresh", Key::Esc),
            ("select", Key::Backspace),
            ("quit", Key::Char(' ')),
            ("toggle_editor", Key::Delete),
        ];

        for (action, key) in shadowing {
            let mut config = RowdeskConfig::default();
            match action {
                "quit" => config.keys.quit = key,
                "toggle_editor" => config.keys.toggle_editor = key,
                "select_all" => config.keys.select_all = key,
                "sort" => config.keys.sort = key,
                "refresh" => config.keys.refresh = key,
                _ => config.keys.select = key,
            }
            assert!(config.validate().is_err(), "{} = {} should be rejected", action, key);
        }
    }

    #[test]
    fn test_validate_accepts_other_bindings() {
        let mut config = RowdeskConfig::default();
        config.keys.quit = Key::Ctrl('q');
        config.keys.refresh = Key::Delete;
        config.keys.select = Key::Char('+');
        config.validate().unwrap();
    }
}
