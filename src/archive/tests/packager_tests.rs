//! Tests for archive packaging

use std::fs;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};

use zip::ZipArchive;

use crate::archive::{select_sidecars, sidecar_entry_name, ArchivePackager, ZIP_CONTENT_TYPE};
use crate::source::{ExtensionTag, RasterSource};

const TS: &str = "2024-03-09_07-05-01";

fn entry_names(bytes: &[u8]) -> Vec<String> {
    let archive = ZipArchive::new(Cursor::new(bytes.to_vec())).unwrap();
    let mut names: Vec<String> = archive.file_names().map(str::to_string).collect();
    names.sort();
    names
}

fn layer_with_sidecars(dir: &Path) -> RasterSource {
    let layer = dir.join("layer");
    fs::create_dir(&layer).unwrap();
    let mut files = Vec::new();
    for (name, body) in [
        ("meta.xml", "<metadata/>"),
        ("project.qgs", "<qgis/>"),
        ("raster.tif", "full raster"),
        ("style.sld", "<sld/>"),
    ] {
        let path = layer.join(name);
        fs::write(&path, body).unwrap();
        files.push(path);
    }

    RasterSource {
        layer_name: "dem".to_string(),
        raster_path: layer.join("raster.tif"),
        extension: ExtensionTag::Tif,
        sidecars: files,
    }
}

#[test]
fn test_sidecar_selection() {
    let sidecars: Vec<PathBuf> = ["style.sld", "meta.xml", "raster.tif", "project.qgs"]
        .iter()
        .map(|n| PathBuf::from("/data").join(n))
        .collect();

    let selected = select_sidecars(&sidecars, Some(".tif"));
    assert_eq!(selected, vec![PathBuf::from("/data/style.sld"), PathBuf::from("/data/meta.xml")]);

    let without_raster_ext = select_sidecars(&sidecars, None);
    assert_eq!(without_raster_ext.len(), 3);
}

#[test]
fn test_sidecar_entry_name() {
    assert_eq!(sidecar_entry_name(Path::new("/data/style.sld"), TS), "style.2024-03-09_07-05-01.sld");
}

#[test]
fn test_archive_contents() {
    let dir = tempfile::tempdir().unwrap();
    let source = layer_with_sidecars(dir.path());
    let output = dir.path().join("raster.tif.2024-03-09_07-05-00.clip.tif");
    fs::write(&output, "clipped raster").unwrap();

    let archive = ArchivePackager::new().package(&source, &output, TS).unwrap();

    assert_eq!(archive.file_name, "dem_clipped.zip");
    assert_eq!(archive.content_type, ZIP_CONTENT_TYPE);
    assert_eq!(archive.content_disposition(), "attachment; filename=dem_clipped.zip");
    assert_eq!(
        entry_names(&archive.bytes),
        vec![
            "dem_clipped/meta.2024-03-09_07-05-01.xml".to_string(),
            "dem_clipped/raster.tif.2024-03-09_07-05-00.clip.tif".to_string(),
            "dem_clipped/style.2024-03-09_07-05-01.sld".to_string(),
        ]
    );

    let mut zip = ZipArchive::new(Cursor::new(archive.bytes)).unwrap();
    let mut clip = String::new();
    zip.by_name("dem_clipped/raster.tif.2024-03-09_07-05-00.clip.tif")
        .unwrap()
        .read_to_string(&mut clip)
        .unwrap();
    assert_eq!(clip, "clipped raster");
}

#[test]
fn test_fallback_archive_has_only_the_clip() {
    let dir = tempfile::tempdir().unwrap();
    let source = RasterSource {
        layer_name: "flood".to_string(),
        raster_path: dir.path().join("flood.geotiff"),
        extension: ExtensionTag::GeoTiff,
        sidecars: Vec::new(),
    };
    let output = dir.path().join("flood.geotiff.abc.mask.geotiff");
    fs::write(&output, "masked").unwrap();

    let archive = ArchivePackager::new().package(&source, &output, TS).unwrap();
    assert_eq!(archive.file_name, "flood_clipped.zip");
    assert_eq!(entry_names(&archive.bytes), vec!["flood_clipped/flood.geotiff.abc.mask.geotiff".to_string()]);
}

#[test]
fn test_missing_sidecar_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut source = layer_with_sidecars(dir.path());
    source.sidecars.push(dir.path().join("layer").join("gone.prj"));
    let output = dir.path().join("out.tif");
    fs::write(&output, "x").unwrap();

    assert!(ArchivePackager::new().package(&source, &output, TS).is_err());
}
