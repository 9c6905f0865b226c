use serde_json::Value;
use std::io;

use super::rows::{cell, tabulate};

/// Write output as CSV to stdout.
///
/// Results carrying a `schedule` are written as the schedule rows; any
/// other result as `field,value` pairs.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let tabular = result
        .get("schedule")
        .and_then(tabulate)
        .or_else(|| tabulate(result));

    match (tabular, result) {
        (Some(rows), _) => {
            let _ = wtr.write_record(&rows.headers);
            for row in &rows.rows {
                let _ = wtr.write_record(row);
            }
        }
        (None, Value::Object(map)) => {
            let _ = wtr.write_record(["field", "value"]);
            for (key, val) in map {
                let _ = wtr.write_record([key.as_str(), &cell(val)]);
            }
        }
        (None, other) => {
            let _ = wtr.write_record([&cell(other)]);
        }
    }

    let _ = wtr.flush();
}
