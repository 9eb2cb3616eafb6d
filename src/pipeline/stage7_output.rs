use anyhow::{Context, Result};
use tracing::info;

use crate::ctx::Ctx;
use crate::io::{self, json_writer};
use crate::pipeline::Stage;

pub struct Stage7Output;

impl Stage7Output {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage7Output {
    fn name(&self) -> &'static str {
        "stage7_output"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        ctx.report = json_writer::build_report(ctx);
        io::write_json(&ctx.output.json_path, &ctx.report)?;
        info!(path = %ctx.output.json_path.display(), "report_written");

        if let (Some(format), Some(path)) = (ctx.options.export, ctx.output.export_path.clone()) {
            let bytes = io::render_export(&ctx.export_view(), format, &ctx.timestamp())
                .with_context(|| format!("export to {} failed", format.extension()))?;
            io::write_bytes(&path, &bytes)?;
            info!(path = %path.display(), bytes = bytes.len(), "export_written");
        }
        Ok(())
    }
}
