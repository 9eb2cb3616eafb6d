use anyhow::Result;
use tracing::info;

use crate::chart;
use crate::ctx::Ctx;
use crate::pipeline::Stage;

/// Chart payloads. Never fails the run: a chart that cannot be built is
/// dropped with a warning.
pub struct Stage6Visualize;

impl Stage6Visualize {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage6Visualize {
    fn name(&self) -> &'static str {
        "stage6_visualize"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        if !ctx.options.include_visualizations {
            return Ok(());
        }
        let (charts, warnings) =
            chart::build_visualizations(&ctx.series, &ctx.analysis, &ctx.config.chart);
        ctx.warnings.extend(warnings);
        info!(charts = charts.len(), "visualizations_ready");
        ctx.visualizations = charts;
        Ok(())
    }
}
