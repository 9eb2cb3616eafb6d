use anyhow::{Context, Result};
use tracing::info;

use crate::ctx::Ctx;
use crate::error::PipelineError;
use crate::input;
use crate::pipeline::Stage;

pub struct Stage1Input;

impl Stage1Input {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage1Input {
    fn name(&self) -> &'static str {
        "stage1_input"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let (content, format) = input::read_upload(&ctx.input, ctx.options.declared_format)
            .with_context(|| format!("failed to read {}", ctx.input.display()))?;
        info!(
            input = %ctx.input.display(),
            format = format.as_str(),
            bytes = content.len(),
            "input_loaded"
        );

        let series = input::parse(&content, format)?;
        if series.is_empty() {
            return Err(PipelineError::NoValidData { stage: "parsing" }.into());
        }

        ctx.parsed_keys = series.keys().cloned().collect();
        ctx.series = series;
        Ok(())
    }
}
