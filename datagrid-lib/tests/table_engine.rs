//! Integration tests for the table state engine.
//!
//! Exercises sorting, page-scoped selection and the render projection
//! through the public API only.

use std::sync::{Arc, Mutex};

use std::cmp::Ordering;

use datagrid_lib::table::{
    locale_compare, CheckState, Column, Direction, TableOptions, TableState, EMPTY_MESSAGE,
};
use datagrid_lib::{Record, RowId, TableRow, Value};

fn products() -> Vec<Record> {
    vec![
        Record::new().set("id", 1).set("name", "Widget").set("price", 9.5),
        Record::new().set("id", 2).set("name", "apple").set("price", 120),
        Record::new().set("id", 3).set("name", "Gadget").set("price", 30),
    ]
}

fn ids(table: &TableState<Record>) -> Vec<RowId> {
    table.current_items().iter().map(|r| r.row_id()).collect()
}

#[test]
fn test_sort_toggle_sequence() {
    let mut table = TableState::new(products(), TableOptions::default());

    table.handle_sort("price");
    assert_eq!(table.sort_direction(), Direction::Asc);
    table.handle_sort("price");
    assert_eq!(table.sort_direction(), Direction::Desc);
    assert_eq!(ids(&table), vec![RowId::Int(2), RowId::Int(3), RowId::Int(1)]);
    table.handle_sort("price");
    assert_eq!(table.sort_direction(), Direction::Asc);

    table.handle_sort("price");
    table.handle_sort("name");
    assert_eq!(table.sort_key(), Some("name"));
    assert_eq!(table.sort_direction(), Direction::Asc);
    assert_eq!(ids(&table), vec![RowId::Int(2), RowId::Int(3), RowId::Int(1)]);
}

#[test]
fn test_select_all_is_page_scoped() {
    let options = TableOptions::default().with_items_per_page(2).with_selection(true);
    let mut table = TableState::new(products(), options);

    table.select_all();
    let selected: Vec<RowId> = {
        let mut v: Vec<RowId> = table.selected_items().iter().cloned().collect();
        v.sort();
        v
    };
    assert_eq!(selected, vec![RowId::Int(1), RowId::Int(2)]);
    assert!(table.is_all_selected());

    // The next page shows row 3 only; nothing there is selected.
    table.next_page();
    assert!(!table.is_all_selected());
    assert!(!table.is_indeterminate());

    // Select-all on page 2 drops the page 1 selection.
    table.select_all();
    assert_eq!(table.selected_items().len(), 1);
    assert!(table.is_selected(&RowId::Int(3)));
}

#[test]
fn test_indeterminate_and_toggle_all() {
    let mut table = TableState::new(products(), TableOptions::default().with_selection(true));

    table.toggle_selection(1);
    assert!(table.is_indeterminate());
    assert!(!table.is_all_selected());

    table.toggle_all();
    assert!(table.is_all_selected());
    table.toggle_all();
    assert!(table.selected_items().is_empty());
}

#[test]
fn test_flags_false_on_empty_page() {
    let mut table = TableState::new(Vec::<Record>::new(), TableOptions::default().with_selection(true));
    table.select_all();
    assert!(!table.is_all_selected());
    assert!(!table.is_indeterminate());

    let view = table.view(&[Column::new("name", "Name")]);
    assert_eq!(view.empty_message, Some(EMPTY_MESSAGE));
    assert_eq!(view.select_all, Some(CheckState::Unchecked));
}

#[test]
fn test_numeric_strings_sort_as_text() {
    let rows = vec![
        Record::new().set("id", 1).set("code", "9"),
        Record::new().set("id", 2).set("code", "10"),
    ];
    let mut table = TableState::new(rows, TableOptions::default());
    table.handle_sort("code");
    let codes: Vec<String> = table
        .current_items()
        .iter()
        .map(|r| r.get("code").map(|v| v.display_string()).unwrap_or_default())
        .collect();
    assert_eq!(codes, vec!["10", "9"]);
}

#[test]
fn test_observer_sees_every_change() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();

    let mut table = TableState::new(products(), TableOptions::default().with_selection(true));
    table.on_selection_change(move |selected| sink.lock().unwrap().push(selected.len()));

    table.toggle_selection(2);
    table.select_all();
    table.select_all();
    table.clear_selection();

    assert_eq!(*seen.lock().unwrap(), vec![1, 3, 3, 0]);
}

#[test]
fn test_selection_disabled_is_noop() {
    let mut table = TableState::new(products(), TableOptions::default());
    table.toggle_selection(1);
    table.select_all();
    assert!(table.selected_items().is_empty());
    assert_eq!(table.view(&[]).select_all, None);
}

#[test]
fn test_view_pagination_labels() {
    let rows: Vec<Record> = (1..=25).map(|i| Record::new().set("id", i)).collect();
    let mut table = TableState::new(rows, TableOptions::default());
    table.go_to_page(3);

    let view = table.view(&[Column::new("id", "ID")]);
    assert_eq!(view.range_label.as_deref(), Some("21-25 of 25"));
    assert_eq!(view.page_buttons, vec![1, 2, 3]);
    assert!(view.can_go_prev);
    assert!(!view.can_go_next);
    assert_eq!(view.rows.len(), 5);
}

#[test]
fn test_set_data_keeps_sort() {
    let mut table = TableState::new(products(), TableOptions::default().with_default_sort("price", Direction::Desc));
    assert_eq!(ids(&table)[0], RowId::Int(2));

    let mut rows = products();
    rows.push(Record::new().set("id", 4).set("price", 500));
    table.set_data(rows);
    assert_eq!(ids(&table)[0], RowId::Int(4));
}

/// Rows whose `v` field cycles through ints, floats, strings and gaps.
fn mixed_rows(count: i64) -> Vec<Record> {
    let mut seed: u64 = 0x2545_f491;
    (0..count)
        .map(|id| {
            seed = seed.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1_442_695_040_888_963_407);
            let r = (seed >> 33) as i64 % 1000;
            let row = Record::new().set("id", id);
            match seed % 5 {
                0 => row.set("v", Value::Int(r)),
                1 => row.set("v", Value::Float(r as f64 + 0.5)),
                2 => row.set("v", Value::String(r.to_string())),
                3 => row.set("v", Value::Null),
                _ => row,
            }
        })
        .collect()
}

fn sort_text(row: &Record) -> String {
    row.field("v").map_or_else(|| "undefined".to_string(), |v| v.coerce_string())
}

#[test]
fn test_sort_mixed_column_both_directions() {
    let options = TableOptions::default().with_items_per_page(2000);
    let mut table = TableState::new(mixed_rows(2000), options);

    table.handle_sort("v");
    assert_eq!(table.sort_direction(), Direction::Asc);
    let asc: Vec<String> = table.sorted_items().map(sort_text).collect();
    assert_eq!(asc.len(), 2000);
    assert!(asc.windows(2).all(|w| locale_compare(&w[0], &w[1]) != Ordering::Greater));

    table.handle_sort("v");
    assert_eq!(table.sort_direction(), Direction::Desc);
    let desc: Vec<String> = table.sorted_items().map(sort_text).collect();
    assert!(desc.windows(2).all(|w| locale_compare(&w[0], &w[1]) != Ordering::Less));
    assert_eq!(table.current_items().len(), 2000);
}

#[test]
fn test_sort_numeric_column_with_gaps() {
    let rows = vec![
        Record::new().set("id", 1).set("v", 10),
        Record::new().set("id", 2),
        Record::new().set("id", 3).set("v", 9.5),
        Record::new().set("id", 4).set("v", Value::Null),
        Record::new().set("id", 5).set("v", -2),
    ];
    let mut table = TableState::new(rows, TableOptions::default());

    table.handle_sort("v");
    let order: Vec<RowId> = table.sorted_items().map(|r| r.row_id()).collect();
    assert_eq!(order, vec![RowId::Int(5), RowId::Int(3), RowId::Int(1), RowId::Int(4), RowId::Int(2)]);

    table.handle_sort("v");
    let order: Vec<RowId> = table.sorted_items().map(|r| r.row_id()).collect();
    assert_eq!(order, vec![RowId::Int(2), RowId::Int(4), RowId::Int(1), RowId::Int(3), RowId::Int(5)]);
}
