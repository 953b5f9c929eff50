use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::collect::{self, RunOutcome};
use crate::config::RunConfig;
use crate::discovery;
use crate::dispatch;
use crate::error::Error;
use crate::shard;

pub struct RunEngine {
    config: RunConfig,
}

#[derive(Debug)]
pub struct RunReport {
    pub models_found: usize,
    pub models_assigned: Vec<usize>,
    pub copy_failures: usize,
    pub discovery_duration: Duration,
    pub shard_duration: Duration,
    pub worker_duration: Duration,
    pub logs_root: PathBuf,
    /// None when discovery came up empty and no workers were launched.
    pub outcome: Option<RunOutcome>,
}

impl RunEngine {
    pub fn new(config: RunConfig) -> Self {
        Self { config }
    }

    /// Run the full batch:
    /// 1. Discover model files under the input tree
    /// 2. Shard them round-robin, one shard per GPU
    /// 3. Fan out one worker process per shard
    /// 4. Fan in: wait for every worker and aggregate exit statuses
    pub fn run(&self) -> Result<RunReport, Error> {
        let cfg = &self.config;

        info!("Scanning {} for models...", cfg.input_dir.display());
        let discovery_start = Instant::now();
        let models = discovery::discover_models(&cfg.input_dir, &cfg.extensions, cfg.limit);
        let discovery_duration = discovery_start.elapsed();
        debug!(
            "Discovery completed in {:.2}s, {} model(s)",
            discovery_duration.as_secs_f64(),
            models.len(),
        );

        if models.is_empty() {
            info!("No models found under {}", cfg.input_dir.display());
            return Ok(RunReport {
                models_found: 0,
                models_assigned: Vec::new(),
                copy_failures: 0,
                discovery_duration,
                shard_duration: Duration::ZERO,
                worker_duration: Duration::ZERO,
                logs_root: cfg.logs_root(),
                outcome: None,
            });
        }

        info!(
            "Sharding {} model(s) across {} GPU(s)...",
            models.len(),
            cfg.gpus.len(),
        );
        let shard_start = Instant::now();
        let shard_set = shard::make_shards(&models, &cfg.shards_root, cfg.gpus.len())?;
        let shard_duration = shard_start.elapsed();
        debug!(
            "Sharding completed in {:.2}s, per-shard counts {:?}",
            shard_duration.as_secs_f64(),
            shard_set.assigned,
        );

        let copy_failures = shard_set.copy_errors.len();
        if copy_failures > 0 {
            warn!("{} file(s) failed to copy into shards", copy_failures);
            if cfg.strict_copy {
                return Err(Error::StrictCopy(copy_failures));
            }
        }

        let worker_start = Instant::now();
        let jobs = dispatch::launch_workers(&shard_set.dirs, cfg)?;
        let outcome = collect::collect(jobs)?;
        let worker_duration = worker_start.elapsed();
        debug!(
            "Workers completed in {:.2}s, {} failed",
            worker_duration.as_secs_f64(),
            outcome.failed_count(),
        );

        Ok(RunReport {
            models_found: models.len(),
            models_assigned: shard_set.assigned,
            copy_failures,
            discovery_duration,
            shard_duration,
            worker_duration,
            logs_root: cfg.logs_root(),
            outcome: Some(outcome),
        })
    }
}
