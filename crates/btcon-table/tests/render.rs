//! End-to-end rendering tests.

use btcon_markup::{destyle, parse, set_styling_enabled, Styling};
use btcon_table::{display_width, Align, Table, TableOptions};
use proptest::prelude::*;
use serde_json::{json, Value};
use serial_test::serial;

fn people() -> Table {
    let mut table = Table::with_headers(["Name", "Age"]);
    table.add_row([json!("Bob"), json!(42)]);
    table.add_row([json!("Alexandra"), Value::Null]);
    table
}

#[test]
fn plain_render() {
    let out = people().render_with(Styling::disabled());
    assert_eq!(
        out,
        concat!(
            "------------------------\n",
            "|   Name    |   Age    |\n",
            "========================\n",
            "| Bob       | 42       |\n",
            "------------------------\n",
            "| Alexandra | < null > |\n",
            "------------------------\n",
        )
    );
}

#[test]
fn every_line_has_the_same_visible_width() {
    let out = people().render_with(Styling::enabled());
    let widths: Vec<usize> = out.lines().map(display_width).collect();
    assert!(widths.iter().all(|w| *w == widths[0]), "{widths:?}");
}

#[test]
fn styling_never_changes_visible_output() {
    let table = people();
    let styled = table.render_with(Styling::enabled());
    let plain = table.render_with(Styling::disabled());
    assert_ne!(styled, plain);
    assert_eq!(destyle(&styled), plain);
}

#[test]
fn styled_output_is_well_formed_markup() {
    let out = people().render_with(Styling::enabled());
    assert!(parse(&out).is_ok());
}

#[test]
fn default_styles_are_applied() {
    let out = people().render_with(Styling::enabled());
    assert!(out.contains("<+bt default_text bold>Name<-bt>"));
    assert!(out.contains("<+bt default_text>Bob<-bt>"));
    assert!(out.starts_with("<+bt default_text>-----"));
}

#[test]
fn column_styles_override_defaults() {
    let mut table = Table::new();
    table
        .add_column("Status")
        .header_styles(["title"])
        .style_renderer(|v| match v.as_str() {
            Some("fail") => vec!["red".to_string()],
            _ => vec!["green".to_string()],
        });
    table.add_row(["ok"]).add_row(["fail"]);

    let out = table.render_with(Styling::enabled());
    assert!(out.contains("<+bt title>Status<-bt>"));
    assert!(out.contains("<+bt green>ok<-bt>"));
    assert!(out.contains("<+bt red>fail<-bt>"));
}

#[test]
fn alignments() {
    let mut table = Table::new();
    table.add_column("Left");
    table.add_column("Right").value_align(Align::Right);
    table
        .add_column("Center")
        .header_align(Align::Center)
        .value_align(Align::Center);
    table.add_row(["a", "b", "c"]);

    let out = table.render_with(Styling::disabled());
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[1], "| Left | Right | Center |");
    assert_eq!(lines[3], "| a    |     b |   c    |");
}

#[test]
fn fixed_width_truncates() {
    let mut table = Table::new();
    table.add_column_with_width("Name", 10).unwrap();
    table.add_row(["abcdefghijklmnop"]);

    let out = table.render_with(Styling::disabled());
    assert!(out.contains("| abcde... |"));
}

#[test]
fn tiny_fixed_width_shows_ellipsis_only() {
    let mut table = Table::new();
    table.add_column_with_width("N", 5).unwrap();
    table.add_row(["abcdefgh"]);

    let layout = table.layout();
    assert_eq!(layout.widths(), [5]);
    assert!(layout.render(Styling::disabled()).contains("| ... |"));
}

#[test]
fn truncation_keeps_value_markup_balanced() {
    let mut table = Table::new();
    table.add_column_with_width("V", 8).unwrap();
    table.add_row(["<+bt bold>abcdefghij<-bt>"]);

    let out = table.render_with(Styling::enabled());
    assert!(parse(&out).is_ok());
    assert!(destyle(&out).contains("| abc... |"));
}

#[test]
fn multiline_rows() {
    let mut table = Table::with_headers(["Key", "Value"]);
    table.multiline(true);
    table.add_row([json!("a"), json!("one\ntwo")]);

    let out = table.render_with(Styling::disabled());
    assert_eq!(
        out,
        concat!(
            "---------------\n",
            "| Key | Value |\n",
            "===============\n",
            "| a   | one   |\n",
            "|     | two   |\n",
            "---------------\n",
        )
    );
}

#[test]
fn custom_separators() {
    let mut table = Table::with_headers(["A"]);
    table.column_separator("::").row_separator('.').header_separator('~');
    table.add_row(["x"]);

    let out = table.render_with(Styling::disabled());
    assert_eq!(
        out,
        concat!(
            ".......\n",
            ":: A ::\n",
            "~~~~~~~\n",
            ":: x ::\n",
            ".......\n",
        )
    );
}

#[test]
fn options_from_config() {
    let options: TableOptions =
        serde_json::from_str(r#"{ "separators": { "column": "!", "row": "_" } }"#).unwrap();
    let mut table = Table::with_options(options);
    table.add_column("A");
    let out = table.render_with(Styling::disabled());
    assert_eq!(out, "_____\n! A !\n=====\n");
}

#[test]
fn empty_table_has_header_only() {
    let table = Table::with_headers(["A", "B"]);
    let out = table.render_with(Styling::disabled());
    assert_eq!(out, "---------\n| A | B |\n=========\n");
}

#[test]
fn wide_characters_align() {
    let mut table = Table::with_headers(["Word"]);
    table.add_row(["日本語"]).add_row(["ab"]);
    let out = table.render_with(Styling::disabled());
    let widths: Vec<usize> = out.lines().map(display_width).collect();
    assert!(widths.iter().all(|w| *w == widths[0]), "{widths:?}");
}

#[test]
#[serial]
fn render_follows_global_styling() {
    let table = people();

    set_styling_enabled(false);
    assert_eq!(table.render(), table.render_with(Styling::disabled()));

    set_styling_enabled(true);
    assert_eq!(table.to_string(), table.render_with(Styling::enabled()));

    set_styling_enabled(false);
}

fn three_column_table(rows: &[Vec<String>], fixed: Option<usize>) -> Table {
    let mut table = Table::with_headers(["One", "Two"]);
    table.add_column("Three").set_width(fixed).unwrap();
    for row in rows {
        table.add_row(row.iter().map(String::as_str));
    }
    table
}

#[test]
fn fixed_column_may_overflow_by_two() {
    // "abcd" fits width 5 so it is kept, and padding adds two more columns.
    let mut table = Table::new();
    table.add_column_with_width("A", 5).unwrap();
    table.add_row(["abcd"]);

    let layout = table.layout();
    let widths: Vec<usize> = layout
        .render(Styling::disabled())
        .lines()
        .map(display_width)
        .collect();
    assert_eq!(layout.line_width(), 7);
    assert_eq!(widths, [7, 7, 7, 8, 7]);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn styling_does_not_change_visible_output(
        rows in prop::collection::vec(
            prop::collection::vec("[a-zA-Z0-9 ]{0,15}", 3),
            0..6,
        ),
        fixed in prop::option::of(1usize..12),
    ) {
        let table = three_column_table(&rows, fixed);
        let out = table.render_with(Styling::enabled());
        prop_assert_eq!(destyle(&out), table.render_with(Styling::disabled()));
        prop_assert!(parse(&out).is_ok());
    }

    #[test]
    fn lines_stay_within_overflow_bound(
        rows in prop::collection::vec(
            prop::collection::vec("[a-zA-Z0-9 ]{0,15}", 3),
            0..6,
        ),
        fixed in prop::option::of(1usize..12),
    ) {
        let table = three_column_table(&rows, fixed);
        let layout = table.layout();
        let expected = layout.line_width();
        // Only a fixed column can spill, and by at most two columns.
        let slack = if fixed.is_some() { 2 } else { 0 };
        for line in layout.render(Styling::enabled()).lines() {
            let width = display_width(line);
            prop_assert!(
                width >= expected && width <= expected + slack,
                "line {:?} has width {}, expected {}..={}",
                line,
                width,
                expected,
                expected + slack
            );
        }
    }
}
