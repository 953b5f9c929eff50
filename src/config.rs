use config::{Config, ConfigError, File as ConfigFile};
use directories::BaseDirs;
use serde::Deserialize;
use std::path::PathBuf;

use crate::error::Error;

/// Extensions accepted as model inputs when no override is configured.
pub const DEFAULT_EXTENSIONS: &[&str] = &["glb", "gltf", "fbx"];

/// Optional overrides read from `Shardman.toml`, if present.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileConfig {
    pub extensions: Option<Vec<String>>,
    pub shards_root: Option<PathBuf>,
}

/// Fully resolved settings for one run, merged from CLI flags and the
/// optional config file. CLI values win.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub worker: PathBuf,
    pub pipeline: PathBuf,
    pub gpus: Vec<String>,
    pub shards_root: PathBuf,
    pub limit: Option<usize>,
    pub strict_copy: bool,
    pub extensions: Vec<String>,
}

impl RunConfig {
    /// Directory that receives the per-worker `gpu<id>.log` captures.
    pub fn logs_root(&self) -> PathBuf {
        self.shards_root.join("logs")
    }

    /// Results hint handed to workers via RESULTS_DIR.
    pub fn results_dir(&self) -> PathBuf {
        self.output_dir.join("logs")
    }
}

pub fn load_file_config() -> Result<FileConfig, ConfigError> {
    let builder = Config::builder()
        .add_source(ConfigFile::with_name("Shardman").required(false))
        .build()?;
    builder.try_deserialize::<FileConfig>()
}

/// Parse a comma-separated GPU id list like "0,1". Blank items are dropped;
/// an empty result is a configuration error.
pub fn parse_gpu_list(raw: &str) -> Result<Vec<String>, Error> {
    let gpus: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .map(str::to_string)
        .collect();

    if gpus.is_empty() {
        return Err(Error::EmptyGpuList(raw.to_string()));
    }
    Ok(gpus)
}

/// Lower-case the allow-list and strip any leading dot, so both "GLB" and
/// ".glb" in a config file match `Path::extension` output.
pub fn normalize_extensions(extensions: &[String]) -> Vec<String> {
    extensions
        .iter()
        .map(|ext| ext.trim_start_matches('.').to_lowercase())
        .filter(|ext| !ext.is_empty())
        .collect()
}

pub fn default_shards_root() -> PathBuf {
    BaseDirs::new()
        .map(|dirs| dirs.cache_dir().join("shardman").join("shards"))
        .unwrap_or_else(|| PathBuf::from("shards"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_gpu_list_simple() {
        let gpus = parse_gpu_list("0,1").unwrap();
        assert_eq!(gpus, vec!["0".to_string(), "1".to_string()]);
    }

    #[test]
    fn test_parse_gpu_list_trims_and_drops_blanks() {
        let gpus = parse_gpu_list(" 0, ,1, ").unwrap();
        assert_eq!(gpus, vec!["0".to_string(), "1".to_string()]);
    }

    #[test]
    fn test_parse_gpu_list_single() {
        let gpus = parse_gpu_list("3").unwrap();
        assert_eq!(gpus, vec!["3".to_string()]);
    }

    #[test]
    fn test_parse_gpu_list_empty_is_error() {
        assert!(parse_gpu_list("").is_err());
        assert!(parse_gpu_list(" , ,").is_err());
    }

    #[test]
    fn test_normalize_extensions() {
        let exts = normalize_extensions(&[
            ".GLB".to_string(),
            "Fbx".to_string(),
            "gltf".to_string(),
            "".to_string(),
        ]);
        assert_eq!(
            exts,
            vec!["glb".to_string(), "fbx".to_string(), "gltf".to_string()]
        );
    }
}
