use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::rows::{cell, tabulate, Rows};

/// Format output as tables: one Field/Value table for the scalar part of
/// the result, then one table per tabular section (schedule, chart, ...).
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => match map.get("result") {
            Some(Value::Object(result)) => print_envelope(result, map),
            _ => print_sections(map),
        },
        other => match tabulate(other) {
            Some(rows) => println!("{}", render(&rows)),
            None => println!("{}", cell(other)),
        },
    }
}

fn print_envelope(result: &Map<String, Value>, envelope: &Map<String, Value>) {
    print_sections(result);

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {}", w);
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn print_sections(map: &Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    let mut sections: Vec<(&str, Rows)> = Vec::new();

    for (key, val) in map {
        match tabulate(val) {
            Some(rows) => sections.push((key.as_str(), rows)),
            None => builder.push_record([key.as_str(), &field_value(val)]),
        }
    }
    println!("{}", Table::from(builder));

    for (name, rows) in sections {
        println!("\n{}:", name);
        println!("{}", render(&rows));
    }
}

fn render(rows: &Rows) -> Table {
    let mut builder = Builder::default();
    builder.push_record(rows.headers.clone());
    for row in &rows.rows {
        builder.push_record(row.clone());
    }
    Table::from(builder)
}

/// Flatten small nested values (`terms`, `points`) into `k: v` pairs.
fn field_value(value: &Value) -> String {
    match value {
        Value::Object(inner) => inner
            .iter()
            .map(|(k, v)| format!("{}: {}", k, cell(v)))
            .collect::<Vec<_>>()
            .join(", "),
        Value::Array(items) => items.iter().map(cell).collect::<Vec<_>>().join(", "),
        Value::Null => "-".to_string(),
        other => cell(other),
    }
}
