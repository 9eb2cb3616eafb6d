use anyhow::Result;
use tracing::info;

use crate::ctx::Ctx;
use crate::error::PipelineError;
use crate::pipeline::Stage;
use crate::transform;

pub struct Stage4Transform;

impl Stage4Transform {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage4Transform {
    fn name(&self) -> &'static str {
        "stage4_transform"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let cleaned = std::mem::take(&mut ctx.series);
        let outcome = transform::transform_all(cleaned, &ctx.config.transform, ctx.threads)?;
        ctx.warnings.extend(outcome.warnings);
        if outcome.series.is_empty() {
            return Err(PipelineError::NoValidData {
                stage: "transformation",
            }
            .into());
        }

        for (key, t) in outcome.series {
            ctx.features.insert(key.clone(), t.features);
            ctx.series.insert(key, t.series);
        }
        ctx.transform_metrics = outcome.metrics;
        info!(series = ctx.series.len(), "transformation_done");
        Ok(())
    }
}
