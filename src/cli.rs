use clap::Parser;
use std::path::PathBuf;

use shardman::config::{self, RunConfig};
use shardman::error::Error;

#[derive(Debug, Parser)]
#[command(name = "shardman")]
#[command(about = "Shard 3D model batches across GPU worker processes", long_about = None)]
pub struct Cli {
    /// Directory tree to scan for model files
    #[arg(long)]
    pub input_dir: PathBuf,

    /// Shared directory workers write their outputs into
    #[arg(long)]
    pub output_dir: PathBuf,

    /// Path to the worker executable (e.g. a Blender binary)
    #[arg(long)]
    pub worker: PathBuf,

    /// Pipeline script handed to the worker via --python
    #[arg(long)]
    pub pipeline: PathBuf,

    /// Comma-separated GPU ids, e.g. "0,1" or "0"
    #[arg(long)]
    pub gpus: String,

    /// Root directory for shard folders and worker logs
    #[arg(long)]
    pub shards_root: Option<PathBuf>,

    /// Cap the number of models processed this run
    #[arg(long)]
    pub limit: Option<usize>,

    /// Fail the run if any file cannot be copied into its shard
    #[arg(long)]
    pub strict_copy: bool,
}

impl Cli {
    /// Merge CLI flags with the optional `Shardman.toml`; flags win.
    pub fn into_run_config(self) -> Result<RunConfig, Error> {
        let file = config::load_file_config()?;

        let gpus = config::parse_gpu_list(&self.gpus)?;

        let extensions = config::normalize_extensions(
            &file.extensions.unwrap_or_else(|| {
                config::DEFAULT_EXTENSIONS
                    .iter()
                    .map(|ext| ext.to_string())
                    .collect()
            }),
        );

        let shards_root = self
            .shards_root
            .or(file.shards_root)
            .unwrap_or_else(config::default_shards_root);

        Ok(RunConfig {
            input_dir: self.input_dir,
            output_dir: self.output_dir,
            worker: self.worker,
            pipeline: self.pipeline,
            gpus,
            shards_root,
            limit: self.limit,
            strict_copy: self.strict_copy,
            extensions,
        })
    }
}
