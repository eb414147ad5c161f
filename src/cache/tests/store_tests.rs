//! Tests for the disk artifact store

use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

use crate::cache::{ArtifactStore, DiskArtifactStore};
use crate::errors::{ClipError, ToolError};

#[test]
fn test_new_creates_directory_idempotently() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("clipped");

    let first = DiskArtifactStore::new(&root).unwrap();
    assert!(root.is_dir());
    let second = DiskArtifactStore::new(&root).unwrap();
    assert_eq!(first.root(), second.root());
}

#[test]
fn test_miss_then_hit() {
    let dir = tempfile::tempdir().unwrap();
    let store = DiskArtifactStore::new(dir.path()).unwrap();
    let mut calls = 0;

    let created = store.get_or_create("a.tif", &mut |path| {
        calls += 1;
        fs::write(path, b"raster")?;
        Ok(())
    }).unwrap();
    assert!(created.created);

    let hit = store.get_or_create("a.tif", &mut |_| {
        calls += 1;
        Ok(())
    }).unwrap();
    assert!(!hit.created);
    assert_eq!(hit.path, created.path);
    assert_eq!(calls, 1);
    assert_eq!(store.lookup("a.tif"), Some(dir.path().join("a.tif")));
}

#[test]
fn test_generator_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let store = DiskArtifactStore::new(dir.path()).unwrap();

    let result = store.get_or_create("nothing.tif", &mut |_| Ok(()));
    assert!(matches!(result, Err(ClipError::ExtractionFailed(ToolError::NoOutput(_)))));
    assert!(store.lookup("nothing.tif").is_none());
}

#[test]
fn test_lookup_rejects_paths() {
    let dir = tempfile::tempdir().unwrap();
    let store = DiskArtifactStore::new(dir.path().join("clipped")).unwrap();
    fs::write(dir.path().join("secret"), b"x").unwrap();

    assert!(store.lookup("../secret").is_none());
    assert!(matches!(
        store.get_or_create("../secret", &mut |_| Ok(())),
        Err(ClipError::InvalidClipFilename(_))
    ));
}

#[test]
fn test_concurrent_misses_generate_once() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(DiskArtifactStore::new(dir.path()).unwrap());
    let calls = Arc::new(AtomicUsize::new(0));
    let barrier = Arc::new(Barrier::new(4));

    let handles: Vec<_> = (0..4).map(|_| {
        let store = Arc::clone(&store);
        let calls = Arc::clone(&calls);
        let barrier = Arc::clone(&barrier);
        thread::spawn(move || {
            barrier.wait();
            store.get_or_create("shared.tif", &mut |path| {
                calls.fetch_add(1, Ordering::SeqCst);
                thread::sleep(Duration::from_millis(50));
                fs::write(path, b"raster")?;
                Ok(())
            }).unwrap()
        })
    }).collect();

    let created: usize = handles.into_iter()
        .map(|h| h.join().unwrap())
        .filter(|artifact| artifact.created)
        .count();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(created, 1);
}

#[test]
fn test_failed_generation_leaves_no_partial_output() {
    let dir = tempfile::tempdir().unwrap();
    let store = DiskArtifactStore::new(dir.path()).unwrap();

    let result = store.get_or_create("half.tif", &mut |path| {
        fs::write(path, b"trunc")?;
        Err(ClipError::ExtractionFailed(ToolError::Cancelled { program: "gdal_translate".to_string() }))
    });

    assert!(matches!(result, Err(ClipError::ExtractionFailed(ToolError::Cancelled { .. }))));
    assert!(store.lookup("half.tif").is_none());
}

#[test]
fn test_keys_with_spaces_and_accents() {
    let dir = tempfile::tempdir().unwrap();
    let store = DiskArtifactStore::new(dir.path()).unwrap();

    let artifact = store.get_or_create("haiti élévation.tif.0123.clip.tif", &mut |path| {
        fs::write(path, b"raster")?;
        Ok(())
    }).unwrap();

    assert!(artifact.created);
    assert_eq!(store.lookup("haiti élévation.tif.0123.clip.tif"), Some(artifact.path));
}
