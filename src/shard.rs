use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::discovery::ModelFile;
use crate::error::Error;

/// One copy that did not make it into its shard. The run continues without
/// the file unless strict-copy mode promotes these to a fatal error.
#[derive(Debug)]
pub struct CopyError {
    pub source_path: PathBuf,
    pub target_path: PathBuf,
    pub error: std::io::Error,
}

/// Result of partitioning: shard directories index-aligned with shard
/// numbers 0..N-1, the count of files that landed in each, and any copies
/// that failed.
#[derive(Debug)]
pub struct ShardSet {
    pub dirs: Vec<PathBuf>,
    pub assigned: Vec<usize>,
    pub copy_errors: Vec<CopyError>,
}

pub fn shard_dir(shards_root: &Path, index: usize) -> PathBuf {
    shards_root.join(format!("shard_{}", index))
}

/// Split the model list into `num_shards` shards (one per GPU) and copy the
/// files into each so the worker can write cache/sidecar data beside them.
///
/// Shard folders left over from a previous run are removed wholesale before
/// assignment; a prior run with a different shard count or input set must
/// not leak stale files into this one. Assignment is round-robin on the
/// discovery order: file i goes to shard `i % num_shards`. A destination
/// base name already present is skipped, so when two source paths share a
/// base name only the first survives.
pub fn make_shards(
    models: &[ModelFile],
    shards_root: &Path,
    num_shards: usize,
) -> Result<ShardSet, Error> {
    fs::create_dir_all(shards_root)?;

    let mut dirs = Vec::with_capacity(num_shards);
    for i in 0..num_shards {
        let dir = shard_dir(shards_root, i);
        if dir.exists() {
            fs::remove_dir_all(&dir)?;
        }
        fs::create_dir(&dir)?;
        dirs.push(dir);
    }

    let mut assigned = vec![0usize; num_shards];
    let mut copy_errors = Vec::new();

    for (idx, model) in models.iter().enumerate() {
        let shard = idx % num_shards;
        let target = dirs[shard].join(&model.file_name);

        if target.exists() {
            warn!(
                "Skipping {}: '{}' already present in shard {}",
                model.path.display(),
                model.file_name,
                shard
            );
            continue;
        }

        match fs::copy(&model.path, &target) {
            Ok(_) => assigned[shard] += 1,
            Err(err) => {
                warn!(
                    "Could not copy {} to {}: {}",
                    model.path.display(),
                    target.display(),
                    err
                );
                copy_errors.push(CopyError {
                    source_path: model.path.clone(),
                    target_path: target,
                    error: err,
                });
            }
        }
    }

    Ok(ShardSet {
        dirs,
        assigned,
        copy_errors,
    })
}
