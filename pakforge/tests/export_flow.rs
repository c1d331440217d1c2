//! Integration tests for the export flow.
//!
//! These drive the orchestrator through the real command-line build tool
//! seam, using an executable stub script standing in for the packaging
//! tool. Like the tool itself, the stubs assume a POSIX shell.
//!
//! Run with: `cargo test --test export_flow`

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::TempDir;

use pakforge::export::{CommandBuildTool, ExportError, ExportMode, Exporter, QUICK_EXPORT_VERSION};
use pakforge::store::PackageStore;
use pakforge::version::VersionSpec;

/// Write an executable stub build tool.
///
/// The output path is argument 4 for both invocation shapes
/// (`--headless --export-pack <project> <output>` and
/// `--headless --export-patch <project> <output> --patches <list>`).
fn write_stub_tool(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("stub-builder");
    fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).unwrap();
    path
}

fn exporter_with_stub(temp: &TempDir, body: &str) -> Exporter {
    let store = PackageStore::open_or_init(temp.path().join("store"), "content").unwrap();
    let tool = Arc::new(CommandBuildTool::new(write_stub_tool(temp.path(), body)));
    Exporter::new(store, tool, "Package")
}

#[test]
fn full_export_creates_root_package() {
    let temp = TempDir::new().unwrap();
    let exporter = exporter_with_stub(&temp, "printf pack > \"$4\"");

    let outcome = exporter
        .export(&VersionSpec::new(1, 0, 0), "win64", false)
        .unwrap();

    assert_eq!(outcome.mode, ExportMode::Full);
    assert_eq!(
        outcome.artifact,
        temp.path()
            .join("store")
            .join("pak-v1.0.0")
            .join("content-v1.0.0-win64.pak")
    );
    assert_eq!(fs::read(&outcome.artifact).unwrap(), b"pack");
}

#[test]
fn patch_chain_builds_bottom_up() {
    let temp = TempDir::new().unwrap();
    let exporter = exporter_with_stub(&temp, "printf pack > \"$4\"");

    // The caller is responsible for exporting lower-precision versions
    // first; build the chain bottom-up and then the leaf patch.
    exporter
        .export(&VersionSpec::new(1, 0, 0), "win64", false)
        .unwrap();
    exporter
        .export(&VersionSpec::new(1, 2, 0), "win64", false)
        .unwrap();
    let outcome = exporter
        .export(&VersionSpec::new(1, 2, 3), "win64", false)
        .unwrap();

    match outcome.mode {
        ExportMode::Patch(paths) => {
            assert_eq!(paths.len(), 2);
            assert!(paths[0].ends_with("pak-v1.0.0/content-v1.0.0-win64.pak"));
            assert!(paths[1].ends_with("pak-v1.2.0/content-v1.2.0-win64.pak"));
        }
        other => panic!("expected patch mode, got {:?}", other),
    }
}

#[test]
fn missing_basis_blocks_export_without_mutation() {
    let temp = TempDir::new().unwrap();
    let exporter = exporter_with_stub(&temp, "printf pack > \"$4\"");

    let err = exporter
        .export(&VersionSpec::new(1, 2, 3), "win64", false)
        .unwrap_err();

    match err {
        ExportError::MissingBasis { version, expected } => {
            assert_eq!(version, VersionSpec::new(1, 0, 0));
            assert!(expected.ends_with("content-v1.0.0-win64.pak"));
        }
        other => panic!("unexpected error: {:?}", other),
    }

    // Basis checks run before directory creation: the failed export left
    // no trace in the store.
    assert!(!temp.path().join("store").join("pak-v1.2.3").exists());
    assert!(exporter.store().list_versions().unwrap().is_empty());
}

#[test]
fn existing_artifact_requires_explicit_force() {
    let temp = TempDir::new().unwrap();
    let exporter = exporter_with_stub(&temp, "printf fresh > \"$4\"");
    let version = VersionSpec::new(1, 0, 0);

    exporter.export(&version, "win64", false).unwrap();
    let artifact = exporter.store().artifact_path(&version, "win64");
    fs::write(&artifact, b"precious").unwrap();

    let err = exporter.export(&version, "win64", false).unwrap_err();
    assert!(matches!(err, ExportError::AlreadyExists(_)));
    assert_eq!(fs::read(&artifact).unwrap(), b"precious");

    exporter.export(&version, "win64", true).unwrap();
    assert_eq!(fs::read(&artifact).unwrap(), b"fresh");
}

#[test]
fn artifacts_are_keyed_by_platform() {
    let temp = TempDir::new().unwrap();
    let exporter = exporter_with_stub(&temp, "printf pack > \"$4\"");
    let version = VersionSpec::new(1, 0, 0);

    exporter.export(&version, "win64", false).unwrap();
    // Same version, other platform: not an overwrite.
    exporter.export(&version, "android", false).unwrap();

    assert!(exporter.store().artifact_exists(&version, "win64"));
    assert!(exporter.store().artifact_exists(&version, "android"));
}

#[test]
fn listing_reflects_exported_versions() {
    let temp = TempDir::new().unwrap();
    let exporter = exporter_with_stub(&temp, "printf pack > \"$4\"");

    exporter
        .export(&VersionSpec::new(1, 0, 0), "win64", false)
        .unwrap();
    exporter
        .export(&VersionSpec::new_prerelease(2, 0, 0, "a", 5), "win64", false)
        .unwrap();

    let versions = exporter.store().list_versions().unwrap();
    assert_eq!(versions, vec!["v1.0.0", "v2.0.0-a05"]);
}

#[test]
fn quick_export_places_fixed_name_artifact() {
    let temp = TempDir::new().unwrap();
    let exporter = exporter_with_stub(&temp, "printf pack > \"$4\"");
    let target = temp.path().join("dev");
    fs::create_dir_all(&target).unwrap();

    let destination = exporter.quick_export("win64", &target).unwrap();

    assert_eq!(destination, target.join("content.pak"));
    assert_eq!(fs::read(&destination).unwrap(), b"pack");
    // The sentinel version's store directory remains after relocation.
    assert!(exporter.store().version_dir(&QUICK_EXPORT_VERSION).is_dir());
}

#[test]
fn tool_failure_leaves_partial_artifact_for_inspection() {
    let temp = TempDir::new().unwrap();
    // Tool writes part of the artifact, then dies.
    let exporter = exporter_with_stub(
        &temp,
        "printf partial > \"$4\"\necho ran out of disk >&2\nexit 2",
    );
    let version = VersionSpec::new(1, 0, 0);

    let err = exporter.export(&version, "win64", false).unwrap_err();
    match err {
        ExportError::BuildToolFailed { status, stderr } => {
            assert_eq!(status, Some(2));
            assert!(stderr.contains("ran out of disk"));
        }
        other => panic!("unexpected error: {:?}", other),
    }

    // The partial artifact is deliberately not cleaned up.
    let artifact = exporter.store().artifact_path(&version, "win64");
    assert_eq!(fs::read(&artifact).unwrap(), b"partial");
}

#[test]
fn missing_tool_fails_before_any_store_mutation() {
    let temp = TempDir::new().unwrap();
    let store = PackageStore::open_or_init(temp.path().join("store"), "content").unwrap();
    let tool = Arc::new(CommandBuildTool::new(temp.path().join("no-such-builder")));
    let exporter = Exporter::new(store, tool, "Package");

    let err = exporter
        .export(&VersionSpec::new(1, 0, 0), "win64", false)
        .unwrap_err();
    assert!(matches!(err, ExportError::ToolNotFound(_)));
    assert!(!temp.path().join("store").join("pak-v1.0.0").exists());
}
