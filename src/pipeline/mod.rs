use anyhow::{Context, Result};
use std::time::Instant;
use tracing::{info, warn};

use crate::ctx::Ctx;

pub mod stage0_scaffold;
pub mod stage1_input;
pub mod stage2_clean;
pub mod stage3_filter;
pub mod stage4_transform;
pub mod stage5_analyze;
pub mod stage6_visualize;
pub mod stage7_output;

pub trait Stage {
    fn name(&self) -> &'static str;
    fn run(&self, ctx: &mut Ctx) -> Result<()>;
}

pub struct Pipeline {
    stages: Vec<Box<dyn Stage>>,
}

impl Pipeline {
    pub fn new(stages: Vec<Box<dyn Stage>>) -> Self {
        Self { stages }
    }

    /// Full analysis: every stage, output files included.
    pub fn analyze() -> Self {
        Self::new(vec![
            Box::new(stage0_scaffold::Stage0Scaffold::new()),
            Box::new(stage1_input::Stage1Input::new()),
            Box::new(stage2_clean::Stage2Clean::new()),
            Box::new(stage3_filter::Stage3Filter::new()),
            Box::new(stage4_transform::Stage4Transform::new()),
            Box::new(stage5_analyze::Stage5Analyze::new()),
            Box::new(stage6_visualize::Stage6Visualize::new()),
            Box::new(stage7_output::Stage7Output::new()),
        ])
    }

    /// Cleaned series straight into analysis, no forecast and no files.
    pub fn quick() -> Self {
        Self::new(vec![
            Box::new(stage1_input::Stage1Input::new()),
            Box::new(stage2_clean::Stage2Clean::new()),
            Box::new(stage3_filter::Stage3Filter::new()),
            Box::new(stage5_analyze::Stage5Analyze::without_forecast()),
        ])
    }

    pub fn validate() -> Self {
        Self::new(vec![
            Box::new(stage1_input::Stage1Input::new()),
            Box::new(stage2_clean::Stage2Clean::new()),
        ])
    }

    pub fn run(&self, ctx: &mut Ctx) -> Result<()> {
        for stage in &self.stages {
            let start = Instant::now();
            info!(stage = stage.name(), "stage started");
            if let Err(err) = stage.run(ctx) {
                let elapsed_ms = start.elapsed().as_millis();
                warn!(
                    stage = stage.name(),
                    elapsed_ms = elapsed_ms as u64,
                    error = %err,
                    "stage failed"
                );
                return Err(err).with_context(|| format!("{} failed", stage.name()));
            }
            let elapsed_ms = start.elapsed().as_millis();
            info!(
                stage = stage.name(),
                elapsed_ms = elapsed_ms as u64,
                "stage finished"
            );
        }
        Ok(())
    }
}
