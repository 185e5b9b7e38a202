#[cfg(test)]
mod datatable_tests {
    use crate::datatable::{
        Action, Column, Filter, Focus, Model, Row, RowId, SearchMode, SortDirection,
    };
    use crate::error::Error;
    use crate::Component;
    use bubbletea_rs::{KeyMsg, Msg};
    use crossterm::event::{KeyCode, KeyModifiers};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn key(code: KeyCode) -> Msg {
        Box::new(KeyMsg {
            key: code,
            modifiers: KeyModifiers::NONE,
        }) as Msg
    }

    fn ch(c: char) -> Msg {
        key(KeyCode::Char(c))
    }

    fn strip(s: &str) -> String {
        lipgloss_extras::lipgloss::strip_ansi(s)
    }

    fn people() -> Vec<Row> {
        vec![
            Row::new().with("name", "Bob").with("age", 30),
            Row::new().with("name", "Ann").with("age", 25),
            Row::new().with("name", "Cid").with("age", 40),
        ]
    }

    fn people_table() -> Model {
        Model::new(vec![
            Column::new("name", "Name").sortable(),
            Column::new("age", "Age").sortable(),
        ])
        .with_rows(people())
        .with_filters(vec![Filter::new("age", "Any age")
            .with_option("25", "25")
            .with_option("30", "30")
            .with_option("40", "40")])
    }

    fn names(table: &Model) -> Vec<String> {
        table
            .page_rows()
            .iter()
            .map(|r| r.get("name").to_string())
            .collect()
    }

    fn users(n: usize) -> Vec<Row> {
        (0..n)
            .map(|i| {
                Row::new()
                    .with("id", i as i64)
                    .with("name", format!("user{:02}", i))
                    .with("status", if i % 2 == 0 { "active" } else { "suspended" })
            })
            .collect()
    }

    #[test]
    fn test_sort_paginate_and_select_page() {
        let mut table = people_table().with_page_size(2);
        table.sort_by("age").unwrap();

        assert_eq!(names(&table), vec!["Ann", "Bob"]);
        assert_eq!(table.total_pages(), 2);

        table.toggle_select_all();
        assert_eq!(table.selected_page_indices(), vec![0, 1]);
        assert_eq!(table.selected_count(), 2);

        table.next_page();
        assert_eq!(names(&table), vec!["Cid"]);
        assert!(table.selected_page_indices().is_empty());
    }

    #[test]
    fn test_search_matches_case_insensitively() {
        let mut table = people_table();
        table.set_search("an");
        assert_eq!(names(&table), vec!["Ann"]);
        table.set_search("AN");
        assert_eq!(names(&table), vec!["Ann"]);
    }

    #[test]
    fn test_filter_compares_string_form() {
        let mut table = people_table();
        table.set_filter("age", "30").unwrap();
        assert_eq!(names(&table), vec!["Bob"]);
        assert_eq!(table.filter_value("age"), Some("30"));

        table.set_filter("age", "").unwrap();
        assert_eq!(table.result_count(), 3);
        assert_eq!(table.filter_value("age"), None);
    }

    #[test]
    fn test_loading_renders_skeleton_and_ignores_input() {
        let mut table = people_table().with_loading(true);
        let view = strip(&table.view());
        assert!(!view.contains("Bob"));
        assert!(view.contains("░"));

        assert!(table.update(ch('/')).is_none());
        assert_eq!(table.focus_region(), Focus::Table);
        assert!(table.update(key(KeyCode::Char(' '))).is_none());
        assert_eq!(table.selected_count(), 0);

        table.set_loading(false);
        assert!(strip(&table.view()).contains("Bob"));
    }

    #[test]
    fn test_set_rows_while_loading_keeps_accessors_safe() {
        let mut table = Model::new(vec![Column::new("name", "Name").sortable()])
            .with_rows(users(5));
        table.set_loading(true);
        table.set_rows(users(1));

        assert!(table.page_rows().is_empty());
        assert!(table.cursor_row().is_none());
        assert_eq!(table.result_count(), 0);
        assert!(!table.is_selected(0));
        assert_eq!(table.toggle_row(0), Err(Error::RowOutOfRange(0)));
        assert!(table.sort_by("name").is_ok());
        assert!(strip(&table.view()).contains("░"));

        table.set_loading(false);
        assert_eq!(table.result_count(), 1);
        assert_eq!(names(&table), vec!["user00"]);
        assert!(table.toggle_row(0).is_ok());
        assert_eq!(table.selected_count(), 1);
    }

    #[test]
    fn test_sort_cycle() {
        let mut table = people_table();
        table.sort_by("name").unwrap();
        assert_eq!(names(&table), vec!["Ann", "Bob", "Cid"]);

        table.sort_by("name").unwrap();
        assert_eq!(table.sort_spec().unwrap().direction, SortDirection::Descending);
        assert_eq!(names(&table), vec!["Cid", "Bob", "Ann"]);

        table.sort_by("name").unwrap();
        assert!(table.sort_spec().is_none());
        assert_eq!(names(&table), vec!["Bob", "Ann", "Cid"]);

        table.sort_by("name").unwrap();
        table.sort_by("age").unwrap();
        let spec = table.sort_spec().unwrap();
        assert_eq!(spec.key, "age");
        assert_eq!(spec.direction, SortDirection::Ascending);
    }

    #[test]
    fn test_sort_errors() {
        let mut table = Model::new(vec![Column::new("name", "Name")]).with_rows(people());
        assert_eq!(
            table.sort_by("name"),
            Err(Error::NotSortable("name".to_string()))
        );
        assert_eq!(
            table.sort_by("nope"),
            Err(Error::UnknownColumn("nope".to_string()))
        );
        assert!(table.sort_spec().is_none());
    }

    #[test]
    fn test_filter_errors() {
        let mut table = people_table();
        assert_eq!(
            table.set_filter("role", "admin"),
            Err(Error::UnknownFilter("role".to_string()))
        );
        assert_eq!(
            table.set_filter("age", "99"),
            Err(Error::UnknownFilterOption {
                filter: "age".to_string(),
                value: "99".to_string()
            })
        );
        assert_eq!(table.result_count(), 3);
    }

    #[test]
    fn test_search_and_filter_reset_page() {
        let mut table = Model::new(vec![Column::new("name", "Name")])
            .with_rows(users(25))
            .with_filters(vec![Filter::new("status", "Status")
                .with_option("active", "Active")
                .with_option("suspended", "Suspended")])
            .with_page_size(5);
        table.last_page();
        assert_eq!(table.page(), 5);

        table.set_search("user");
        assert_eq!(table.page(), 1);

        table.go_to_page(3);
        table.set_filter("status", "active").unwrap();
        assert_eq!(table.page(), 1);
        assert_eq!(table.result_count(), 13);
    }

    #[test]
    fn test_page_clamped_after_rows_shrink() {
        let mut table = Model::new(vec![Column::new("name", "Name")])
            .with_rows(users(30))
            .with_page_size(10);
        table.last_page();
        assert_eq!(table.page(), 3);

        table.set_rows(users(12));
        assert_eq!(table.page(), 2);
        assert_eq!(table.page_rows().len(), 2);

        table.set_rows(Vec::new());
        assert_eq!(table.page(), 1);
        assert!(table.page_rows().is_empty());
    }

    fn active_users_by_name() -> Model {
        let mut table = Model::new(vec![Column::new("name", "Name").sortable()])
            .with_rows(users(23))
            .with_filters(vec![Filter::new("status", "Status")
                .with_option("active", "Active")
                .with_option("suspended", "Suspended")])
            .with_page_size(5);
        table.set_search("user");
        table.set_filter("status", "active").unwrap();
        table.sort_by("name").unwrap();
        table.sort_by("name").unwrap();
        table
    }

    #[test]
    fn test_refresh_is_idempotent() {
        let mut table = active_users_by_name();
        table.next_page();
        let before: Vec<Row> = table.visible_rows().into_iter().cloned().collect();
        let page = table.page();
        let on_page = names(&table);

        table.refresh();
        table.refresh();
        let after: Vec<Row> = table.visible_rows().into_iter().cloned().collect();
        assert_eq!(before, after);
        assert_eq!(table.page(), page);
        assert_eq!(names(&table), on_page);
    }

    #[test]
    fn test_pages_cover_visible_rows_exactly_once() {
        let mut table = active_users_by_name();
        assert_eq!(table.result_count(), 12);
        assert_eq!(table.total_pages(), 3);

        let expected: Vec<String> = table
            .visible_rows()
            .iter()
            .map(|r| r.get("name").to_string())
            .collect();
        assert_eq!(expected.first().map(String::as_str), Some("user22"));
        assert_eq!(expected.last().map(String::as_str), Some("user00"));

        table.first_page();
        let mut walked = Vec::new();
        let mut sizes = Vec::new();
        loop {
            sizes.push(table.page_rows().len());
            walked.extend(names(&table));
            if !table.can_go_next() {
                break;
            }
            table.next_page();
        }
        assert_eq!(table.page(), table.total_pages());
        assert_eq!(sizes, vec![5, 5, 2]);
        assert_eq!(walked, expected);
    }

    #[test]
    fn test_page_navigation_noop_at_bounds() {
        let mut table = people_table().with_page_size(2);
        assert!(!table.can_go_prev());
        table.prev_page();
        assert_eq!(table.page(), 1);

        table.next_page();
        assert!(!table.can_go_next());
        table.next_page();
        assert_eq!(table.page(), 2);

        table.first_page();
        assert_eq!(table.page(), 1);
    }

    #[test]
    fn test_page_size_clamped_to_one() {
        let table = people_table().with_page_size(0);
        assert_eq!(table.page_size(), 1);
        assert_eq!(table.total_pages(), 3);
    }

    #[test]
    fn test_select_all_toggles_off() {
        let mut table = people_table();
        table.toggle_select_all();
        assert!(table.all_on_page_selected());
        table.toggle_select_all();
        assert_eq!(table.selected_count(), 0);
    }

    #[test]
    fn test_select_all_replaces_partial_selection() {
        let mut table = people_table().with_page_size(2);
        table.next_page();
        table.toggle_row(0).unwrap();
        table.first_page();
        table.toggle_row(0).unwrap();

        table.toggle_select_all();
        assert_eq!(table.selected_ids(), vec![RowId::Position(0), RowId::Position(1)]);
    }

    #[test]
    fn test_select_all_on_empty_page() {
        let mut table = people_table();
        table.set_search("zzz");
        table.toggle_select_all();
        assert_eq!(table.selected_count(), 0);
        assert!(!table.all_on_page_selected());
    }

    #[test]
    fn test_toggle_row_out_of_range() {
        let mut table = people_table();
        assert_eq!(table.toggle_row(3), Err(Error::RowOutOfRange(3)));
        assert!(!table.is_selected(3));
    }

    #[test]
    fn test_selection_follows_rows_across_sort() {
        let mut table = people_table();
        table.toggle_row(0).unwrap(); // Bob
        table.sort_by("age").unwrap();
        assert_eq!(table.selected_page_indices(), vec![1]);
        assert_eq!(table.selected_rows()[0].get("name").to_string(), "Bob");
    }

    #[test]
    fn test_selection_survives_search() {
        let mut table = people_table();
        table.toggle_row(1).unwrap(); // Ann
        table.set_search("cid");
        assert_eq!(table.selected_count(), 1);
        assert!(table.selected_page_indices().is_empty());
        table.set_search("");
        assert_eq!(table.selected_page_indices(), vec![1]);
    }

    #[test]
    fn test_duplicate_row_keys_select_independently() {
        let rows = vec![
            Row::new().with("id", 1).with("name", "Ann"),
            Row::new().with("id", 1).with("name", "Bob"),
            Row::new().with("id", 2).with("name", "Cid"),
        ];
        let mut table = Model::new(vec![Column::new("name", "Name")])
            .with_row_key("id")
            .with_rows(rows);

        table.toggle_row(0).unwrap();
        assert!(table.is_selected(0));
        assert!(!table.is_selected(1));
        assert_eq!(table.selected_count(), 1);
        assert_eq!(table.selected_ids(), vec![RowId::Position(0)]);

        table.toggle_row(2).unwrap();
        assert!(table.selected_ids().contains(&RowId::Key("2".to_string())));
    }

    #[test]
    fn test_set_rows_prunes_missing_ids() {
        let mut table = Model::new(vec![Column::new("name", "Name")])
            .with_row_key("id")
            .with_rows(users(4));
        table.toggle_select_all();
        assert_eq!(table.selected_count(), 4);

        table.set_rows(users(4).into_iter().skip(2).collect());
        assert_eq!(
            table.selected_ids(),
            vec![RowId::Key("2".to_string()), RowId::Key("3".to_string())]
        );
    }

    #[test]
    fn test_action_visibility_and_overflow() {
        let actions = vec![
            Action::new("view", "View", |_| None),
            Action::new("edit", "Edit", |_| None),
            Action::new("suspend", "Suspend", |_| None)
                .with_show(|r| r.get("status").to_string() == "active"),
            Action::new("delete", "Delete", |_| None).danger(),
        ];
        let table = Model::new(vec![Column::new("name", "Name")])
            .with_rows(users(2))
            .with_actions(actions);

        let active = table.page_rows()[0];
        let ids = |v: Vec<&Action>| v.iter().map(|a| a.id.clone()).collect::<Vec<_>>();
        assert_eq!(ids(table.inline_actions(active)), vec!["view", "edit"]);
        assert_eq!(ids(table.overflow_actions(active)), vec!["suspend", "delete"]);

        let suspended = table.page_rows()[1];
        assert_eq!(ids(table.overflow_actions(suspended)), vec!["delete"]);
    }

    #[test]
    fn test_invoke_action() {
        let hits = Arc::new(AtomicUsize::new(0));
        let seen = hits.clone();
        let table = people_table().with_actions(vec![Action::new("ping", "Ping", move |row| {
            assert_eq!(row.get("name").to_string(), "Ann");
            seen.fetch_add(1, Ordering::SeqCst);
            None
        })]);

        assert!(table.invoke_action("ping", 1).unwrap().is_none());
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert!(matches!(
            table.invoke_action("nope", 1),
            Err(Error::UnknownAction(_))
        ));
        assert!(matches!(
            table.invoke_action("ping", 9),
            Err(Error::RowOutOfRange(9))
        ));
    }

    #[test]
    fn test_default_actions_when_none_configured() {
        let table = people_table().with_actions(Vec::new());
        let ids: Vec<&str> = table.actions().iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["view", "edit", "delete"]);

        let view = strip(&table.view());
        assert!(view.contains("View"));
        assert!(view.contains("⋮ +1"));
    }

    #[test]
    fn test_export_only_when_callback_present() {
        let table = people_table();
        assert!(!table.has_export());
        assert!(table.export().is_none());
        assert!(!strip(&table.view()).contains("Export"));

        let fired = Arc::new(AtomicUsize::new(0));
        let counter = fired.clone();
        let mut table = people_table().with_on_export(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            None
        });
        assert!(strip(&table.view()).contains("Export"));
        table.update(ch('e'));
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_view_lines() {
        let mut table = people_table().with_page_size(2);
        let view = strip(&table.view());
        assert!(view.contains("Showing 1 to 2 of 3 results"));
        assert!(view.contains("Page 1 of 2"));
        assert!(!view.contains("items selected"));

        table.toggle_row(0).unwrap();
        assert!(strip(&table.view()).contains("1 items selected"));

        table.set_search("zzz");
        let view = strip(&table.view());
        assert!(view.contains("0 results"));
        assert!(view.contains("Name"));
        assert!(!view.contains("Page "));
    }

    #[test]
    fn test_view_sort_marker() {
        let mut table = people_table();
        table.sort_by("age").unwrap();
        assert!(strip(&table.view()).contains("Age ↑"));
        table.sort_by("age").unwrap();
        assert!(strip(&table.view()).contains("Age ↓"));
    }

    #[test]
    fn test_view_truncates_wide_cells() {
        let table = Model::new(vec![Column::new("name", "Name")])
            .with_rows(vec![Row::new().with("name", "abcdefghijklmnop")])
            .with_max_column_width(6);
        let view = strip(&table.view());
        assert!(view.contains("abcde…"));
        assert!(!view.contains("abcdefg"));
    }

    #[test]
    fn test_custom_renderer_used_in_view() {
        let table = Model::new(vec![
            Column::new("age", "Age").with_render(|v, row| format!("{} ({})", v, row.get("name")))
        ])
        .with_rows(people());
        assert!(strip(&table.view()).contains("30 (Bob)"));
    }

    #[test]
    fn test_keyboard_search() {
        let mut table = people_table();
        table.update(ch('/'));
        assert_eq!(table.focus_region(), Focus::Search);
        table.update(ch('c'));
        table.update(ch('i'));
        assert_eq!(table.search(), "ci");
        assert_eq!(names(&table), vec!["Cid"]);

        table.update(key(KeyCode::Backspace));
        assert_eq!(table.search(), "c");
        table.update(key(KeyCode::Enter));
        assert_eq!(table.focus_region(), Focus::Table);
        assert_eq!(table.search(), "c");

        table.update(ch('/'));
        table.update(key(KeyCode::Esc));
        assert_eq!(table.search(), "");
        assert_eq!(table.result_count(), 3);
    }

    #[test]
    fn test_keyboard_search_backspace_is_grapheme_aware() {
        let mut table = people_table();
        table.set_search("e\u{301}");
        table.update(ch('/'));
        table.update(key(KeyCode::Backspace));
        assert_eq!(table.search(), "");
    }

    #[test]
    fn test_keyboard_sort_and_select() {
        let mut table = people_table();
        table.update(ch('l'));
        assert_eq!(table.column_cursor(), 1);
        table.update(ch('s'));
        assert_eq!(names(&table), vec!["Ann", "Bob", "Cid"]);

        table.update(ch('j'));
        table.update(ch(' '));
        assert_eq!(table.selected_page_indices(), vec![1]);

        table.update(ch('a'));
        assert!(table.all_on_page_selected());
        table.update(ch('a'));
        assert_eq!(table.selected_count(), 0);
    }

    #[test]
    fn test_keyboard_paging_and_cursor_spill() {
        let mut table = people_table().with_page_size(2);
        table.update(ch('n'));
        assert_eq!(table.page(), 2);
        table.update(ch('p'));
        assert_eq!(table.page(), 1);
        table.update(ch('G'));
        assert_eq!(table.page(), 2);
        table.update(key(KeyCode::Home));
        assert_eq!(table.page(), 1);

        table.update(ch('j'));
        table.update(ch('j'));
        assert_eq!(table.page(), 2);
        assert_eq!(table.cursor(), 0);
        table.update(ch('k'));
        assert_eq!(table.page(), 1);
        assert_eq!(table.cursor(), 1);
    }

    #[test]
    fn test_keyboard_filters() {
        let mut table = people_table();
        table.update(key(KeyCode::Tab));
        assert_eq!(table.focus_region(), Focus::Filter(0));

        table.update(key(KeyCode::Right));
        assert_eq!(table.filter_value("age"), Some("25"));
        assert_eq!(names(&table), vec!["Ann"]);

        table.update(key(KeyCode::Left));
        assert_eq!(table.filter_value("age"), None);
        table.update(key(KeyCode::Left));
        assert_eq!(table.filter_value("age"), Some("40"));

        table.update(key(KeyCode::Backspace));
        assert_eq!(table.filter_value("age"), None);
        table.update(key(KeyCode::Esc));
        assert_eq!(table.focus_region(), Focus::Table);
    }

    #[test]
    fn test_tab_without_filters_stays_on_table() {
        let mut table = Model::new(vec![Column::new("name", "Name")]).with_rows(people());
        table.update(key(KeyCode::Tab));
        assert_eq!(table.focus_region(), Focus::Table);
    }

    #[test]
    fn test_overflow_menu() {
        let hits = Arc::new(AtomicUsize::new(0));
        let seen = hits.clone();
        let mut table = people_table().with_actions(vec![
            Action::new("view", "View", |_| None),
            Action::new("edit", "Edit", |_| None),
            Action::new("archive", "Archive", |_| None),
            Action::new("delete", "Delete", move |_| {
                seen.fetch_add(1, Ordering::SeqCst);
                None
            })
            .danger(),
        ]);

        table.update(ch('.'));
        assert_eq!(table.focus_region(), Focus::Overflow);
        let view = strip(&table.view());
        assert!(view.contains("› Archive"));

        table.update(ch('j'));
        assert_eq!(table.menu_cursor(), 1);
        table.update(ch('j'));
        assert_eq!(table.menu_cursor(), 1);
        table.update(key(KeyCode::Enter));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(table.focus_region(), Focus::Table);

        table.update(ch('.'));
        table.update(key(KeyCode::Esc));
        assert_eq!(table.focus_region(), Focus::Table);
    }

    #[test]
    fn test_overflow_menu_needs_overflow_actions() {
        let mut table = people_table().with_actions(vec![Action::new("view", "View", |_| None)]);
        table.update(ch('.'));
        assert_eq!(table.focus_region(), Focus::Table);
    }

    #[test]
    fn test_enter_runs_first_inline_action() {
        let hits = Arc::new(AtomicUsize::new(0));
        let seen = hits.clone();
        let mut table = people_table().with_actions(vec![
            Action::new("hidden", "Hidden", |_| None).with_show(|_| false),
            Action::new("open", "Open", move |_| {
                seen.fetch_add(1, Ordering::SeqCst);
                None
            }),
        ]);
        table.update(key(KeyCode::Enter));
        table.update(ch('1'));
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_blurred_table_ignores_keys() {
        let mut table = people_table();
        table.blur();
        assert!(!table.focused());
        table.update(ch('/'));
        assert_eq!(table.focus_region(), Focus::Table);
        table.focus();
        table.update(ch('/'));
        assert_eq!(table.focus_region(), Focus::Search);
    }

    #[test]
    fn test_cursor_row_csv() {
        let table = Model::new(vec![Column::new("name", "Name"), Column::new("note", "Note")])
            .with_rows(vec![Row::new()
                .with("name", "Ann Lee")
                .with("note", "said \"hi\"")]);
        assert_eq!(
            table.cursor_row_csv().unwrap(),
            "\"Ann Lee\",\"said \"\"hi\"\"\""
        );
        assert!(Model::new(Vec::new()).cursor_row_csv().is_none());
    }

    #[test]
    fn test_fuzzy_search_mode() {
        let mut table = people_table().with_search_mode(SearchMode::Fuzzy);
        table.set_search("bb");
        assert_eq!(names(&table), vec!["Bob"]);
    }

    #[test]
    fn test_help_follows_focus() {
        let mut table = people_table();
        assert!(strip(&table.view()).contains("sort"));
        table.update(ch('/'));
        let view = strip(&table.view());
        assert!(view.contains("apply"));
        assert!(!view.contains("select page"));
    }

    #[test]
    fn test_page_always_in_bounds_after_changes() {
        let mut table = Model::new(vec![Column::new("name", "Name").sortable()])
            .with_rows(users(23))
            .with_filters(vec![Filter::new("status", "Status")
                .with_option("active", "Active")
                .with_option("suspended", "Suspended")])
            .with_page_size(4);

        let steps: Vec<Box<dyn Fn(&mut Model)>> = vec![
            Box::new(|t: &mut Model| t.last_page()),
            Box::new(|t: &mut Model| t.set_page_size(10)),
            Box::new(|t: &mut Model| t.last_page()),
            Box::new(|t: &mut Model| t.set_filter("status", "suspended").unwrap()),
            Box::new(|t: &mut Model| t.last_page()),
            Box::new(|t: &mut Model| t.set_rows(users(3))),
            Box::new(|t: &mut Model| t.sort_by("name").unwrap()),
            Box::new(|t: &mut Model| t.set_page_size(1)),
            Box::new(|t: &mut Model| t.set_search("nothing")),
        ];
        for step in steps {
            step(&mut table);
            assert!(table.page() >= 1);
            assert!(table.page() <= table.total_pages().max(1));
            assert!(table.page_rows().len() <= table.page_size());
        }
    }
}
