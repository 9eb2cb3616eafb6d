//! Per-category fan-out. Each series is an independent unit of work; failures
//! are logged and collected, successes are gathered into an ordered map.

use std::collections::BTreeMap;

use anyhow::Result;
use tracing::warn;

use crate::error::PipelineError;

#[cfg(feature = "mt")]
use rayon::prelude::*;

#[derive(Debug)]
pub struct BatchOutcome<U> {
    pub ok: BTreeMap<String, U>,
    pub failed: Vec<(String, String)>,
}

impl<U> BatchOutcome<U> {
    pub fn warnings(&self, stage: &str) -> Vec<String> {
        self.failed
            .iter()
            .map(|(key, reason)| format!("{}: {} dropped ({})", stage, key, reason))
            .collect()
    }
}

pub fn process_keyed<T, U, F>(
    stage: &'static str,
    items: BTreeMap<String, T>,
    threads: usize,
    f: F,
) -> Result<BatchOutcome<U>>
where
    T: Send,
    U: Send,
    F: Fn(&str, T) -> std::result::Result<U, PipelineError> + Sync,
{
    let inputs: Vec<(String, T)> = items.into_iter().collect();

    #[cfg(feature = "mt")]
    let results: Vec<(String, std::result::Result<U, PipelineError>)> =
        if threads == 1 || inputs.len() < 2 {
            run_sequential(inputs, &f)
        } else {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .map_err(|e| anyhow::anyhow!("failed to build thread pool: {}", e))?;
            pool.install(|| {
                inputs
                    .into_par_iter()
                    .map(|(key, item)| {
                        let result = f(&key, item);
                        (key, result)
                    })
                    .collect()
            })
        };

    #[cfg(not(feature = "mt"))]
    let results = {
        let _ = threads;
        run_sequential(inputs, &f)
    };

    let mut ok = BTreeMap::new();
    let mut failed = Vec::new();
    for (key, result) in results {
        match result {
            Ok(value) => {
                ok.insert(key, value);
            }
            Err(err) => {
                warn!(stage, key = %key, reason = %err, "series_dropped");
                failed.push((key, err.to_string()));
            }
        }
    }
    Ok(BatchOutcome { ok, failed })
}

fn run_sequential<T, U, F>(
    inputs: Vec<(String, T)>,
    f: &F,
) -> Vec<(String, std::result::Result<U, PipelineError>)>
where
    F: Fn(&str, T) -> std::result::Result<U, PipelineError>,
{
    inputs
        .into_iter()
        .map(|(key, item)| {
            let result = f(&key, item);
            (key, result)
        })
        .collect()
}
