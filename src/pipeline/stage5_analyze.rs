use anyhow::Result;
use tracing::info;

use crate::analysis;
use crate::ctx::Ctx;
use crate::error::PipelineError;
use crate::pipeline::Stage;

pub struct Stage5Analyze {
    forecast: bool,
}

impl Stage5Analyze {
    /// Forecasts when the run options ask for it.
    pub fn new() -> Self {
        Self { forecast: true }
    }

    pub fn without_forecast() -> Self {
        Self { forecast: false }
    }
}

impl Stage for Stage5Analyze {
    fn name(&self) -> &'static str {
        "stage5_analyze"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let include_forecast = self.forecast && ctx.options.include_forecast;
        let outcome = analysis::analyze_all(
            &ctx.series,
            include_forecast,
            &ctx.config.analytics,
            ctx.threads,
        )?;
        ctx.warnings.extend(outcome.warnings);
        if outcome.results.is_empty() {
            return Err(PipelineError::NoValidData { stage: "analysis" }.into());
        }

        let forecasts = outcome
            .results
            .values()
            .filter(|r| r.forecast.is_some())
            .count();
        info!(
            series = outcome.results.len(),
            forecasts,
            "analysis_done"
        );
        ctx.analysis = outcome.results;
        Ok(())
    }
}
