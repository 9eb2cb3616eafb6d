use csv::{ReaderBuilder, Trim};

use crate::error::{PipelineError, Result};
use crate::input::date::parse_date;
use crate::input::{RawRow, check_standard_columns, group_rows};
use crate::numeric::sanitize_str;
use crate::series::SeriesMap;

pub fn read_csv(content: &[u8]) -> Result<SeriesMap> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(content);

    let headers: Vec<String> = rdr
        .headers()
        .map_err(|e| PipelineError::InvalidInput(format!("unreadable CSV header: {}", e)))?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();
    check_standard_columns(&headers)?;

    let date_idx = column_index(&headers, "date")?;
    let category_idx = column_index(&headers, "category")?;
    let value_idx = column_index(&headers, "value")?;

    let mut rows = Vec::new();
    for (line, record) in rdr.records().enumerate() {
        let record = record.map_err(|e| {
            PipelineError::InvalidInput(format!("CSV record {}: {}", line + 1, e))
        })?;
        let category = record
            .get(category_idx)
            .filter(|c| !c.is_empty())
            .map(|c| c.to_string());
        rows.push(RawRow {
            date: record.get(date_idx).and_then(parse_date),
            category,
            value: record.get(value_idx).and_then(sanitize_str),
        });
    }

    Ok(group_rows(rows))
}

fn column_index(headers: &[String], name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| PipelineError::InvalidInput(format!("missing column '{}'", name)))
}
