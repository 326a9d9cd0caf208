use rowdesk::core::editor::FieldEditor;
use rowdesk::core::table::{TableModel, Value};
use rowdesk::domain::config::{ColumnKind, ColumnSpec, DataConfig};
use rowdesk::infrastructure::config::ConfigManager;
use rowdesk::infrastructure::records::{load_records, read_records};
use rowdesk::{RowdeskConfig, RowdeskError, RowdeskResult};
use std::error::Error;

/// Error handling tests
#[cfg(test)]
mod error_handling_tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let errors = vec![
            RowdeskError::config("bad key"),
            RowdeskError::data("bad row"),
            RowdeskError::Tui("no tty".to_string()),
            RowdeskError::InvalidInput("Unknown column 'x'".to_string()),
            RowdeskError::Output("closed pipe".to_string()),
        ];

        for error in errors {
            assert!(!error.to_string().is_empty());
        }

        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RowdeskError>();
    }

    #[test]
    fn test_io_error_conversion_keeps_source() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let error: RowdeskError = io_error.into();
        assert!(matches!(error, RowdeskError::Io(_)));
        assert!(error.to_string().contains("missing"));
        assert!(error.source().is_some());
    }

    #[test]
    fn test_result_alias() {
        fn parse(text: &str) -> RowdeskResult<i64> {
            text.parse().map_err(|_| RowdeskError::InvalidInput(text.to_string()))
        }
        assert_eq!(parse("7").unwrap(), 7);
        assert!(parse("seven").is_err());
    }

    #[test]
    fn test_missing_data_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = load_records(&dir.path().join("none.csv"), b',', &DataConfig::default().columns);
        assert!(matches!(result, Err(RowdeskError::Data { .. })));
    }

    #[test]
    fn test_bad_integer_names_line_and_column() {
        let csv = "id,First Name,Last Name,Age,Occupation\n1,Ada,Lovelace,old,Mathematician\n";
        let err = read_records(csv.as_bytes(), b',', &DataConfig::default().columns).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Line 2"), "{}", message);
        assert!(message.contains("Age"), "{}", message);
    }

    #[test]
    fn test_missing_header_column() {
        let csv = "id,First Name\n1,Ada\n";
        let err = read_records(csv.as_bytes(), b',', &DataConfig::default().columns).unwrap_err();
        assert!(matches!(err, RowdeskError::Data { .. }));
    }

    #[test]
    fn test_table_rejects_mistyped_rows() {
        let columns = vec![ColumnSpec {
            name: "id".into(),
            kind: ColumnKind::Integer,
            ratio: 1,
            min_width: 2,
        }];
        assert!(TableModel::new(columns.clone(), vec![vec![Value::Text("x".into())]]).is_err());
        assert!(TableModel::new(columns, vec![vec![]]).is_err());
    }

    #[test]
    fn test_editor_needs_fields() {
        assert!(FieldEditor::from_config(&[]).is_err());
    }

    #[test]
    fn test_invalid_config_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[data\npath = ").unwrap();

        let manager = ConfigManager::with_paths(dir.path().join("global.toml"), None);
        let result = manager.load_config_from_path(&path);
        assert!(matches!(result, Err(RowdeskError::Config { .. })));
    }

    #[test]
    fn test_conflicting_key_bindings() {
        let mut config = RowdeskConfig::default();
        config.keys.sort = config.keys.quit;
        assert!(config.validate().is_err());
    }
}
