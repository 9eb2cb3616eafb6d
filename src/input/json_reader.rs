use std::collections::{BTreeMap, BTreeSet};

use serde_json::Value;
use serde_json::value::RawValue;

use crate::error::{PipelineError, Result};
use crate::input::date::parse_date;
use crate::input::{RawRow, check_standard_columns, group_rows};
use crate::numeric::{sanitize_json, sanitize_str};
use crate::series::SeriesMap;

type Record = BTreeMap<String, Box<RawValue>>;

/// Accepts either a top-level array of records or an object whose `data`
/// member is that array. Fields are kept as raw text until converted so an
/// out-of-range numeric literal nulls its cell instead of failing the upload.
pub fn read_json(content: &[u8]) -> Result<SeriesMap> {
    let doc: Box<RawValue> = serde_json::from_slice(content)
        .map_err(|e| PipelineError::InvalidInput(format!("malformed JSON: {}", e)))?;

    let items: Vec<Box<RawValue>> = match doc.get().trim_start().as_bytes().first() {
        Some(b'[') => serde_json::from_str(doc.get()).map_err(|_| invalid_structure())?,
        Some(b'{') => {
            let mut obj: Record =
                serde_json::from_str(doc.get()).map_err(|_| invalid_structure())?;
            let data = obj.remove("data").ok_or_else(invalid_structure)?;
            serde_json::from_str(data.get()).map_err(|_| invalid_structure())?
        }
        _ => return Err(invalid_structure()),
    };
    if items.is_empty() {
        return Ok(SeriesMap::new());
    }

    let mut records: Vec<Record> = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let record: Record = serde_json::from_str(item.get()).map_err(|_| {
            PipelineError::InvalidInput(format!("record {} is not an object", i))
        })?;
        records.push(record);
    }

    let columns: BTreeSet<String> = records.iter().flat_map(|r| r.keys().cloned()).collect();
    check_standard_columns(&columns.into_iter().collect::<Vec<_>>())?;

    let rows = records.iter().map(|record| RawRow {
        date: field(record, "date").as_ref().and_then(json_date),
        category: field(record, "category").as_ref().and_then(json_category),
        value: record.get("value").and_then(|raw| json_value(raw)),
    });
    Ok(group_rows(rows))
}

fn field(record: &Record, name: &str) -> Option<Value> {
    record
        .get(name)
        .and_then(|raw| serde_json::from_str(raw.get()).ok())
}

/// Numbers beyond the f64 range fail to convert to a `Value`; their text
/// parses to an infinity, which the sanitizer nulls.
fn json_value(raw: &RawValue) -> Option<f64> {
    match serde_json::from_str::<Value>(raw.get()) {
        Ok(value) => sanitize_json(&value),
        Err(_) => sanitize_str(raw.get()),
    }
}

fn invalid_structure() -> PipelineError {
    PipelineError::InvalidInput(
        "invalid JSON structure: expected a list of records or an object with a 'data' list"
            .to_string(),
    )
}

fn json_date(value: &Value) -> Option<chrono::NaiveDateTime> {
    match value {
        Value::String(s) => parse_date(s),
        _ => None,
    }
}

fn json_category(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
