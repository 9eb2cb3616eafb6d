use anyhow::{Context, Result};

use crate::io::ExportView;
use crate::numeric::{display_or_na, format_float, format_percent, sanitize_opt};
use crate::series::{FeatureColumns, Series, format_ts, ma_column_name};

pub fn export_csv(view: &ExportView<'_>) -> Result<Vec<u8>> {
    let empty = FeatureColumns::default();
    let mut out: Vec<u8> = Vec::new();

    for (key, series) in view.series {
        let features = view.features.get(key).unwrap_or(&empty);
        if !out.is_empty() {
            out.push(b'\n');
        }
        out.extend_from_slice(format!("=== {} ===\n", key).as_bytes());
        write_series_table(&mut out, series, features)?;

        let Some(result) = view.analysis.get(key) else {
            continue;
        };
        out.extend_from_slice(b"\nAnalysis Results:\n");
        out.extend_from_slice(
            format!("Trend Direction: {}\n", result.trend_analysis.direction).as_bytes(),
        );
        let growth = format_percent(result.growth_metrics.total_growth)
            .unwrap_or_else(|| "N/A".to_string());
        out.extend_from_slice(format!("Growth Rate: {}\n", growth).as_bytes());

        if let Some(forecast) = &result.forecast {
            out.extend_from_slice(b"\nForecast:\n");
            let mut w = csv::Writer::from_writer(&mut out);
            w.write_record(["step", "predicted", "lower_bound", "upper_bound"])?;
            for (i, predicted) in forecast.predictions.iter().enumerate() {
                let lower = forecast.lower_bound.get(i).copied().flatten();
                let upper = forecast.upper_bound.get(i).copied().flatten();
                w.write_record([
                    (i + 1).to_string(),
                    display_or_na(*predicted),
                    display_or_na(lower),
                    display_or_na(upper),
                ])?;
            }
            w.flush()?;
        }
    }

    if let Some(charts) = view.visualizations.filter(|v| !v.is_empty()) {
        if !out.is_empty() {
            out.push(b'\n');
        }
        out.extend_from_slice(b"=== Visualization Configurations ===\n");
        for (key, chart) in charts {
            let rendered = serde_json::to_string_pretty(chart)
                .with_context(|| format!("failed to render visualization {}", key))?;
            out.extend_from_slice(format!("\n{}:\n{}\n", key, rendered).as_bytes());
        }
    }
    Ok(out)
}

/// Sanitized series rows. Null cells are written empty.
fn write_series_table(out: &mut Vec<u8>, series: &Series, features: &FeatureColumns) -> Result<()> {
    let mut header = vec![
        "date".to_string(),
        "category".to_string(),
        "value".to_string(),
    ];
    header.extend(features.moving_averages.iter().map(|(w, _)| ma_column_name(*w)));
    header.push("pct_change".to_string());

    let mut w = csv::Writer::from_writer(out);
    w.write_record(&header)?;
    for (i, p) in series.points.iter().enumerate() {
        let mut row = vec![format_ts(&p.ts), series.category.clone(), cell(p.value)];
        for (_, col) in &features.moving_averages {
            row.push(cell(col.get(i).copied().flatten()));
        }
        row.push(cell(features.pct_change.get(i).copied().flatten()));
        w.write_record(&row)?;
    }
    w.flush()?;
    Ok(())
}

fn cell(value: Option<f64>) -> String {
    sanitize_opt(value).map(format_float).unwrap_or_default()
}
