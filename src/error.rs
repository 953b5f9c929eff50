use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("no GPU ids in list '{0}'")]
    EmptyGpuList(String),

    #[error("{shards} shard(s) for {gpus} GPU id(s); counts must match")]
    ShardMismatch { shards: usize, gpus: usize },

    #[error("failed to launch worker for GPU {gpu}: {source}")]
    Spawn {
        gpu: String,
        source: std::io::Error,
    },

    #[error("{0} file(s) failed to copy into shards")]
    StrictCopy(usize),
}
