use crate::analysis::summary::{cleaning_summary, transformation_summary};
use crate::ctx::Ctx;
use crate::numeric::format_percent;

pub fn format_summary(ctx: &Ctx) -> String {
    let version = env!("CARGO_PKG_VERSION");
    let mut out = String::new();
    out.push_str(&format!("kira-trendqc v{}\n", version));
    out.push_str(&format!(
        "Input: {} series parsed, {} cleaned, {} analyzed\n",
        ctx.parsed_keys.len(),
        ctx.quality.len(),
        ctx.analysis.len()
    ));

    for (key, result) in &ctx.analysis {
        let growth = format_percent(result.growth_metrics.total_growth)
            .unwrap_or_else(|| "N/A".to_string());
        let quality = ctx
            .quality
            .get(key)
            .and_then(|q| q.quality_score())
            .map(|s| format!("{:.2}", s))
            .unwrap_or_else(|| "N/A".to_string());
        out.push_str(&format!(
            "{}: trend={} growth={} quality={}\n",
            key, result.trend_analysis.direction, growth, quality
        ));
        if let Some(m) = ctx.transform_metrics.get(key) {
            let t = transformation_summary(m);
            let mas: Vec<String> = t
                .moving_averages
                .iter()
                .map(|(w, v)| format!("ma_{}={}", w, v.as_deref().unwrap_or("N/A")))
                .collect();
            if !mas.is_empty() {
                out.push_str(&format!("  {}\n", mas.join(" ")));
            }
        }
    }

    if !ctx.visualizations.is_empty() {
        out.push_str(&format!("Visualizations: {}\n", ctx.visualizations.len()));
    }
    if let Some(path) = &ctx.output.export_path {
        out.push_str(&format!("Export: {}\n", path.display()));
    }
    out
}

pub fn format_validate_summary(ctx: &Ctx) -> String {
    let mut out = String::new();
    out.push_str("kira-trendqc validate ok\n");
    out.push_str(&format!(
        "series: {} parsed, {} cleaned\n",
        ctx.parsed_keys.len(),
        ctx.quality.len()
    ));
    for (key, metrics) in &ctx.quality {
        let s = cleaning_summary(metrics);
        let score = s
            .quality_score
            .map(|v| format!("{:.2}", v))
            .unwrap_or_else(|| "N/A".to_string());
        out.push_str(&format!(
            "{}\trecords={}/{}\tmissing={}\tduplicates={}\toutliers={}\tquality={}\n",
            key,
            s.records.cleaned,
            s.records.initial,
            s.issues_handled.missing_values,
            s.issues_handled.duplicates,
            s.issues_handled.outliers,
            score
        ));
    }
    out
}

pub fn format_warnings(warnings: &[String]) -> String {
    if warnings.is_empty() {
        return String::new();
    }
    let mut out = String::from("warnings:\n");
    for w in warnings {
        out.push_str(&format!("- {}\n", w));
    }
    out
}
