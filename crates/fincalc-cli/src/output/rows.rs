use serde_json::Value;

/// Header plus string rows for a tabular section of a result.
pub struct Rows {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Turn an array of objects into rows.
///
/// Chart points (`{label, series: [{name, value}]}`) are pivoted so every
/// series becomes its own column. A schedule page (`{entries: [...]}`) is
/// unwrapped to its entries. Anything else returns `None`.
pub fn tabulate(value: &Value) -> Option<Rows> {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(map) => match map.get("entries") {
            Some(Value::Array(items)) => items,
            _ => return None,
        },
        _ => return None,
    };
    let Some(Value::Object(first)) = items.first() else {
        return None;
    };

    if let Some(Value::Array(series)) = first.get("series") {
        let mut headers = vec!["label".to_string()];
        headers.extend(
            series
                .iter()
                .filter_map(|s| s.get("name").and_then(Value::as_str))
                .map(str::to_string),
        );
        let rows = items
            .iter()
            .map(|point| {
                let mut row = vec![point.get("label").map(cell).unwrap_or_default()];
                for name in &headers[1..] {
                    let v = point
                        .get("series")
                        .and_then(Value::as_array)
                        .and_then(|s| {
                            s.iter().find(|sv| {
                                sv.get("name").and_then(Value::as_str) == Some(name.as_str())
                            })
                        })
                        .and_then(|sv| sv.get("value"))
                        .map(cell)
                        .unwrap_or_default();
                    row.push(v);
                }
                row
            })
            .collect();
        return Some(Rows { headers, rows });
    }

    let headers: Vec<String> = first.keys().cloned().collect();
    let rows = items
        .iter()
        .filter_map(Value::as_object)
        .map(|map| {
            headers
                .iter()
                .map(|h| map.get(h).map(cell).unwrap_or_default())
                .collect()
        })
        .collect();
    Some(Rows { headers, rows })
}

/// Render a scalar for a table or CSV cell; nested values as compact JSON.
pub fn cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
