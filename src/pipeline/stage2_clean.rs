use anyhow::Result;
use tracing::info;

use crate::clean;
use crate::ctx::Ctx;
use crate::error::PipelineError;
use crate::pipeline::Stage;

pub struct Stage2Clean;

impl Stage2Clean {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage2Clean {
    fn name(&self) -> &'static str {
        "stage2_clean"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let parsed = std::mem::take(&mut ctx.series);
        let outcome = clean::clean_all(parsed, &ctx.config.cleaner, ctx.threads)?;
        ctx.warnings.extend(outcome.warnings);
        if outcome.series.is_empty() {
            return Err(PipelineError::NoValidData { stage: "cleaning" }.into());
        }

        let outliers: usize = outcome.quality.values().map(|q| q.outlier_count).sum();
        info!(
            series = outcome.series.len(),
            outliers,
            "cleaning_done"
        );
        ctx.series = outcome.series;
        ctx.quality = outcome.quality;
        Ok(())
    }
}
