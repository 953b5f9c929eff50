use std::path::PathBuf;
use tracing::info;

use crate::dispatch::WorkerJob;
use crate::error::Error;

/// Terminal status of one worker. `code` is None when the worker was killed
/// by a signal; that counts as a failure.
#[derive(Debug)]
pub struct JobStatus {
    pub gpu: String,
    pub log_path: PathBuf,
    pub code: Option<i32>,
    pub success: bool,
}

/// Exit statuses of every worker, in launch order.
#[derive(Debug)]
pub struct RunOutcome {
    pub statuses: Vec<JobStatus>,
}

impl RunOutcome {
    pub fn failed_count(&self) -> usize {
        self.statuses.iter().filter(|s| !s.success).count()
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed_count() == 0
    }
}

/// Block until every launched worker has terminated and record each exit
/// status. Waiting happens in launch order; the workers are all already
/// running, so the order is bookkeeping only and costs no wall-clock time.
/// No worker is ever signalled or cancelled, even after a sibling fails.
pub fn collect(jobs: Vec<WorkerJob>) -> Result<RunOutcome, Error> {
    let mut statuses = Vec::with_capacity(jobs.len());

    for mut job in jobs {
        let status = job.child.wait()?;
        match status.code() {
            Some(code) => info!("[GPU log] {} exit {}", job.log_path.display(), code),
            None => info!("[GPU log] {} killed by signal", job.log_path.display()),
        }

        statuses.push(JobStatus {
            gpu: job.gpu,
            log_path: job.log_path,
            code: status.code(),
            success: status.success(),
        });
    }

    Ok(RunOutcome { statuses })
}
