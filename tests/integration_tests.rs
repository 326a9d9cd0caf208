use rowdesk::core::editor::{EditorOutcome, Focus};
use rowdesk::core::keys::{Key, KeyBindings};
use rowdesk::core::table::Value;
use rowdesk::domain::config::{DataConfig, EditorConfig};
use rowdesk::infrastructure::records::read_records;
use rowdesk::{Flow, FocusRouter, InputEvent, Mode, RowdeskConfig, TableModel};

const PEOPLE: &str = "\
id,First Name,Last Name,Age,Occupation
1,Ada,Lovelace,36,Mathematician
2,Alan,Turing,41,Cryptanalyst
3,Grace,Hopper,85,Rear Admiral
4,Linus,Torvalds,54,Engineer
";

/// End-to-end scenarios through the focus router
#[cfg(test)]
mod integration_tests {
    use super::*;

    fn router() -> FocusRouter {
        let columns = DataConfig::default().columns;
        let records = read_records(PEOPLE.as_bytes(), b',', &columns).expect("sample records");
        let table = TableModel::new(columns, records).expect("table");
        let mut router = FocusRouter::new(table, &EditorConfig::default().fields, KeyBindings::default(), 1)
            .expect("router");
        router.handle(InputEvent::Resize { width: 80, height: 24 });
        router
    }

    fn press(router: &mut FocusRouter, keys: &[Key]) {
        for key in keys {
            assert_eq!(router.handle(InputEvent::Key(*key)), Flow::Continue);
        }
    }

    fn focus(router: &FocusRouter) -> Focus {
        router.editor().expect("editor open").focus()
    }

    #[test]
    fn test_tab_cycles_through_fields_and_buttons() {
        let mut router = router();
        press(&mut router, &[Key::Ctrl('e')]);
        assert_eq!(router.mode(), Mode::Editor);
        assert_eq!(focus(&router), Focus::Field(0));

        press(&mut router, &[Key::Tab, Key::Tab, Key::Tab]);
        assert_eq!(focus(&router), Focus::Save);

        press(&mut router, &[Key::Tab]);
        assert_eq!(focus(&router), Focus::Cancel);

        press(&mut router, &[Key::Tab]);
        assert_eq!(focus(&router), Focus::Field(0));
    }

    #[test]
    fn test_filter_typing_and_backspace() {
        let mut router = router();
        press(&mut router, &[Key::Right, Key::Char('a'), Key::Char('l')]);

        let filter = router.filter().current().expect("filter active");
        assert_eq!(filter.column(), 1);
        assert_eq!(filter.text(), "al");
        assert_eq!(router.table().visible_count(), 1);
        assert!(router.status().contains("Filter[First Name]: al"));

        press(&mut router, &[Key::Backspace, Key::Backspace]);
        assert!(router.filter().current().is_none());
        assert_eq!(router.table().visible_count(), 4);
    }

    #[test]
    fn test_escape_clears_filter() {
        let mut router = router();
        press(&mut router, &[Key::Right, Key::Char('a'), Key::Char('l')]);
        assert_eq!(router.table().visible_count(), 1);

        press(&mut router, &[Key::Esc]);
        assert!(router.filter().current().is_none());
        assert!(router.table().filter().is_none());
        assert_eq!(router.table().visible_count(), 4);
        assert!(!router.status().contains("Filter["));
        assert_eq!(router.mode(), Mode::Table);
    }

    #[test]
    fn test_escape_without_filter_changes_nothing() {
        let mut router = router();
        press(&mut router, &[Key::Down, Key::Char(' ')]);
        let status = router.status().to_string();

        press(&mut router, &[Key::Esc]);
        assert!(router.filter().current().is_none());
        assert_eq!(router.table().visible_count(), 4);
        assert_eq!(router.table().cursor_location(), (0, 1));
        assert_eq!(router.table().selected_count(), 1);
        assert_eq!(router.status(), status);
        assert_eq!(router.mode(), Mode::Table);
    }

    #[test]
    fn test_filter_moves_to_new_column() {
        let mut router = router();
        press(&mut router, &[Key::Right, Key::Char('a'), Key::Right, Key::Char('t')]);

        let filter = router.filter().current().expect("filter active");
        assert_eq!(filter.column(), 2);
        assert_eq!(filter.text(), "t");
        // Lovelace has no 't'; Turing and Torvalds do
        assert_eq!(router.table().visible_count(), 2);
    }

    #[test]
    fn test_saved_form_reports_typed_values() {
        let mut router = router();
        press(&mut router, &[Key::Ctrl('e'), Key::Char('a'), Key::Char('d'), Key::Char('a'), Key::Tab]);
        press(&mut router, &[Key::Char('a'), Key::Char('@'), Key::Char('b'), Key::Tab]);
        press(&mut router, &[Key::Char('p'), Key::Char('w'), Key::Tab, Key::Enter]);

        assert_eq!(router.mode(), Mode::Table);
        let report = router.last_report().expect("report");
        assert_eq!(report.outcome, EditorOutcome::Saved);
        let values: Vec<&str> = report.values.iter().map(|v| v.value.as_str()).collect();
        assert_eq!(values, vec!["ada", "a@b", "pw"]);
        assert!(router.status().ends_with("Editor saved"));
    }

    #[test]
    fn test_editor_reopens_empty() {
        let mut router = router();
        press(&mut router, &[Key::Ctrl('e'), Key::Char('x'), Key::Esc]);
        assert_eq!(router.last_report().expect("report").outcome, EditorOutcome::Discarded);

        press(&mut router, &[Key::Ctrl('e')]);
        let editor = router.editor().expect("editor open");
        assert!(editor.fields().iter().all(|f| f.value().is_empty()));
        assert_eq!(editor.focus(), Focus::Field(0));
    }

    #[test]
    fn test_typing_in_editor_leaves_filter_alone() {
        let mut router = router();
        press(&mut router, &[Key::Ctrl('e'), Key::Char('q'), Key::Char('z')]);
        assert!(router.filter().current().is_none());
        assert_eq!(router.table().visible_count(), 4);
    }

    #[test]
    fn test_select_sort_and_status() {
        let mut router = router();
        press(&mut router, &[Key::Char(' '), Key::Down, Key::Char(' ')]);
        assert_eq!(router.table().selected_count(), 2);

        press(&mut router, &[Key::Right, Key::Right, Key::Right, Key::Ctrl('s'), Key::Ctrl('s')]);
        let first = router.table().visible_records().next().expect("rows");
        assert_eq!(first[3], Value::Int(85));
        assert_eq!(router.status(), "Selected: 2 | Sort[Age] desc");

        press(&mut router, &[Key::Ctrl('a')]);
        assert_eq!(router.table().selected_count(), 4);
        press(&mut router, &[Key::Ctrl('a')]);
        assert_eq!(router.table().selected_count(), 0);
    }

    #[test]
    fn test_ticks_only_blink() {
        let mut router = router();
        press(&mut router, &[Key::Ctrl('e')]);
        let before = router.editor().expect("editor").fields()[0].cursor_visible();

        router.handle(InputEvent::Tick);
        let editor = router.editor().expect("editor");
        assert_ne!(editor.fields()[0].cursor_visible(), before);
        assert_eq!(editor.focus(), Focus::Field(0));
        assert_eq!(router.mode(), Mode::Editor);
    }

    #[test]
    fn test_resize_splits_table_and_status() {
        let mut router = router();
        router.handle(InputEvent::Resize { width: 100, height: 30 });
        let geometry = router.geometry();
        assert_eq!(geometry.table_height, 29);
        assert_eq!(geometry.status_height, 1);
        assert_eq!(router.table().size(), (100, 29));
    }

    #[test]
    fn test_config_roundtrip_through_toml() {
        let config = RowdeskConfig::default();
        let text = toml::to_string(&config).expect("serialize");
        let parsed: RowdeskConfig = toml::from_str(&text).expect("deserialize");

        assert_eq!(parsed.data.columns, config.data.columns);
        assert_eq!(parsed.keys, config.keys);
        assert_eq!(parsed.editor.fields.len(), 3);
        assert!(parsed.validate().is_ok());
    }
}
