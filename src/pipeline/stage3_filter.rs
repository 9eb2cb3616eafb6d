use anyhow::Result;
use tracing::info;

use crate::ctx::Ctx;
use crate::error::PipelineError;
use crate::pipeline::Stage;
use crate::series::series_key;

/// Narrows the working set to one category when the caller asked for it.
pub struct Stage3Filter;

impl Stage3Filter {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage3Filter {
    fn name(&self) -> &'static str {
        "stage3_filter"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let Some(category) = ctx.options.category.clone() else {
            return Ok(());
        };
        let key = series_key(&category);
        let Some(series) = ctx.series.remove(&key) else {
            return Err(PipelineError::CategoryNotFound(category).into());
        };
        ctx.series.clear();
        ctx.series.insert(key.clone(), series);
        ctx.quality.retain(|k, _| *k == key);
        info!(key = %key, "category_selected");
        Ok(())
    }
}
