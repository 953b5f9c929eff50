use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

/// One discovered model input. Identity is the path; `file_name` is the
/// base name it keeps inside its shard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelFile {
    pub path: PathBuf,
    pub file_name: String,
}

/// Recursively collect every file under `root` whose extension (lower-cased)
/// is in the allow-list. The walk is sorted by file name at each level so
/// repeated runs against an unchanged tree yield the same order, which is
/// what keeps shard assignment stable across runs. `limit` takes a prefix
/// of that order after the full walk.
pub fn discover_models(
    root: &Path,
    extensions: &[String],
    limit: Option<usize>,
) -> Vec<ModelFile> {
    let walker = WalkDir::new(root).sort_by(|a, b| a.file_name().cmp(b.file_name()));

    let mut models = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!("Skipping unreadable entry under {}: {}", root.display(), err);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let matches = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
            .is_some_and(|ext| extensions.iter().any(|allowed| *allowed == ext));
        if !matches {
            continue;
        }

        let file_name = match path.file_name().and_then(|name| name.to_str()) {
            Some(name) => name.to_string(),
            None => {
                warn!("Skipping file with non-UTF-8 name: {}", path.display());
                continue;
            }
        };

        models.push(ModelFile {
            path: path.to_path_buf(),
            file_name,
        });
    }

    if let Some(cap) = limit {
        models.truncate(cap);
    }
    models
}
