use std::fs::{self, File};
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use tracing::info;

use crate::config::RunConfig;
use crate::error::Error;

/// A launched worker process. The log file handle lives inside the child's
/// stdio and is released when the collector reaps the job.
pub struct WorkerJob {
    pub gpu: String,
    pub shard_dir: PathBuf,
    pub log_path: PathBuf,
    pub child: Child,
}

/// Launch one worker per (shard, GPU) pair, in increasing index order,
/// without waiting on any of them.
///
/// Each worker runs `<worker> --background --python <pipeline>` from the
/// output directory, inherits the orchestrator's full environment, and gets
/// explicit overrides on top: CUDA_VISIBLE_DEVICES pins it to its GPU,
/// INPUT_DIR points at its shard, OUTPUT_DIR and RESULTS_DIR at the shared
/// output locations, WORKER_PATH at its own executable. Ambient variables
/// (feature flags in particular) pass through untouched. Combined
/// stdout/stderr goes to `<logs_root>/gpu<id>.log`, truncated each run.
///
/// A spawn failure aborts the whole run; workers already launched are left
/// running to their own completion.
pub fn launch_workers(shards: &[PathBuf], cfg: &RunConfig) -> Result<Vec<WorkerJob>, Error> {
    if shards.len() != cfg.gpus.len() {
        return Err(Error::ShardMismatch {
            shards: shards.len(),
            gpus: cfg.gpus.len(),
        });
    }

    let logs_root = cfg.logs_root();
    fs::create_dir_all(&logs_root)?;
    fs::create_dir_all(&cfg.output_dir)?;
    fs::create_dir_all(cfg.results_dir())?;

    let mut jobs = Vec::with_capacity(shards.len());
    for (gpu, shard_dir) in cfg.gpus.iter().zip(shards) {
        let log_path = logs_root.join(format!("gpu{}.log", gpu));
        let log_file = File::create(&log_path)?;
        let log_file_err = log_file.try_clone()?;

        info!(
            "Launching: {} --background --python {} on GPU {} input: {}",
            cfg.worker.display(),
            cfg.pipeline.display(),
            gpu,
            shard_dir.display()
        );

        let child = Command::new(&cfg.worker)
            .arg("--background")
            .arg("--python")
            .arg(&cfg.pipeline)
            // run from a writable place
            .current_dir(&cfg.output_dir)
            .env("CUDA_VISIBLE_DEVICES", gpu)
            .env("INPUT_DIR", shard_dir)
            .env("OUTPUT_DIR", &cfg.output_dir)
            .env("RESULTS_DIR", cfg.results_dir())
            .env("WORKER_PATH", &cfg.worker)
            .stdout(Stdio::from(log_file))
            .stderr(Stdio::from(log_file_err))
            .spawn()
            .map_err(|source| Error::Spawn {
                gpu: gpu.clone(),
                source,
            })?;

        jobs.push(WorkerJob {
            gpu: gpu.clone(),
            shard_dir: shard_dir.clone(),
            log_path,
            child,
        });
    }

    Ok(jobs)
}
