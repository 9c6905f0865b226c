use serde_json::Value;

use super::rows::cell;

/// Fields that carry the headline answer, most specific first.
const HEADLINE_KEYS: [&str; 7] = [
    "solved_value",
    "projected_score",
    "score",
    "maturity_value",
    "gst_amount",
    "emi",
    "lowest_total_interest",
];

/// Print just the headline answer of a calculation.
pub fn print_minimal(value: &Value) {
    println!("{}", headline(value));
}

/// The first non-null headline field of the result, else `key: value` of
/// its first field, else the value itself.
fn headline(value: &Value) -> String {
    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let Value::Object(map) = result else {
        return cell(result);
    };

    HEADLINE_KEYS
        .iter()
        .filter_map(|key| map.get(*key))
        .find(|v| !v.is_null())
        .map(cell)
        .or_else(|| map.iter().next().map(|(k, v)| format!("{}: {}", k, cell(v))))
        .unwrap_or_default()
}
