pub mod collect;
pub mod config;
pub mod discovery;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod shard;

pub use config::RunConfig;
pub use engine::{RunEngine, RunReport};
pub use error::Error;
