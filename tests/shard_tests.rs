use std::fs;
use std::path::Path;

use shardman::discovery::ModelFile;
use shardman::shard::{make_shards, shard_dir};
use tempfile::TempDir;

fn make_model(dir: &Path, rel: &str, contents: &str) -> ModelFile {
    let path = dir.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, contents).unwrap();
    ModelFile {
        file_name: path.file_name().unwrap().to_str().unwrap().to_string(),
        path,
    }
}

fn shard_contents(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_str().unwrap().to_string())
        .collect();
    names.sort();
    names
}

#[test]
fn test_round_robin_balance_and_disjoint_cover() {
    let src = TempDir::new().unwrap();
    let root = TempDir::new().unwrap();

    let models: Vec<ModelFile> = (0..7)
        .map(|i| make_model(src.path(), &format!("m{}.glb", i), "data"))
        .collect();

    let set = make_shards(&models, root.path(), 3).unwrap();
    assert_eq!(set.dirs.len(), 3);
    assert_eq!(set.assigned, vec![3, 2, 2]);
    assert!(set.copy_errors.is_empty());

    // File i lands in shard i % 3, and nowhere else.
    let mut seen = Vec::new();
    for dir in &set.dirs {
        seen.extend(shard_contents(dir));
    }
    seen.sort();
    let mut expected: Vec<String> = models.iter().map(|m| m.file_name.clone()).collect();
    expected.sort();
    assert_eq!(seen, expected);

    assert_eq!(shard_contents(&set.dirs[0]), vec!["m0.glb", "m3.glb", "m6.glb"]);
    assert_eq!(shard_contents(&set.dirs[1]), vec!["m1.glb", "m4.glb"]);
    assert_eq!(shard_contents(&set.dirs[2]), vec!["m2.glb", "m5.glb"]);
}

#[test]
fn test_more_shards_than_models_leaves_empty_shards() {
    let src = TempDir::new().unwrap();
    let root = TempDir::new().unwrap();

    let models = vec![make_model(src.path(), "only.glb", "data")];
    let set = make_shards(&models, root.path(), 3).unwrap();

    assert_eq!(set.assigned, vec![1, 0, 0]);
    for dir in &set.dirs {
        assert!(dir.is_dir());
    }
    assert!(shard_contents(&set.dirs[1]).is_empty());
}

#[test]
fn test_repartitioning_is_idempotent() {
    let src = TempDir::new().unwrap();
    let root = TempDir::new().unwrap();

    let models: Vec<ModelFile> = (0..5)
        .map(|i| make_model(src.path(), &format!("m{}.gltf", i), &format!("body-{}", i)))
        .collect();

    let first = make_shards(&models, root.path(), 2).unwrap();
    let snapshot: Vec<(String, Vec<u8>)> = first
        .dirs
        .iter()
        .flat_map(|dir| {
            shard_contents(dir)
                .into_iter()
                .map(move |name| (name.clone(), fs::read(dir.join(&name)).unwrap()))
        })
        .collect();

    let second = make_shards(&models, root.path(), 2).unwrap();
    let replay: Vec<(String, Vec<u8>)> = second
        .dirs
        .iter()
        .flat_map(|dir| {
            shard_contents(dir)
                .into_iter()
                .map(move |name| (name.clone(), fs::read(dir.join(&name)).unwrap()))
        })
        .collect();

    assert_eq!(snapshot, replay);
}

#[test]
fn test_duplicate_base_name_keeps_first() {
    let src = TempDir::new().unwrap();
    let root = TempDir::new().unwrap();

    let models = vec![
        make_model(src.path(), "a/dup.glb", "first"),
        make_model(src.path(), "b/dup.glb", "second"),
    ];

    // One shard, so both copies target the same destination name.
    let set = make_shards(&models, root.path(), 1).unwrap();
    assert_eq!(set.assigned, vec![1]);
    assert!(set.copy_errors.is_empty());
    assert_eq!(shard_contents(&set.dirs[0]), vec!["dup.glb"]);
    assert_eq!(fs::read(set.dirs[0].join("dup.glb")).unwrap(), b"first");
}

#[test]
fn test_stale_shard_folders_are_removed() {
    let src = TempDir::new().unwrap();
    let root = TempDir::new().unwrap();

    let stale_dir = shard_dir(root.path(), 0);
    fs::create_dir_all(&stale_dir).unwrap();
    fs::write(stale_dir.join("stale.glb"), "old run").unwrap();

    let models = vec![make_model(src.path(), "fresh.glb", "new run")];
    let set = make_shards(&models, root.path(), 2).unwrap();

    assert_eq!(shard_contents(&set.dirs[0]), vec!["fresh.glb"]);
    assert!(!set.dirs[0].join("stale.glb").exists());
}

#[test]
fn test_copy_failure_is_accumulated_not_fatal() {
    let src = TempDir::new().unwrap();
    let root = TempDir::new().unwrap();

    let missing = ModelFile {
        path: src.path().join("vanished.glb"),
        file_name: "vanished.glb".to_string(),
    };
    let models = vec![make_model(src.path(), "ok.glb", "data"), missing];

    let set = make_shards(&models, root.path(), 1).unwrap();
    assert_eq!(set.assigned, vec![1]);
    assert_eq!(set.copy_errors.len(), 1);
    assert!(set.copy_errors[0]
        .source_path
        .ends_with("vanished.glb"));
}
