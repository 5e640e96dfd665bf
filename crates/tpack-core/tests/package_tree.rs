//! # Package Tree Flattening Tests
//!
//! End-to-end checks of how a package tree turns into the list of
//! assemblies a runner loads, plus property tests over arbitrary path
//! lists and nesting.

use std::path::{Path, PathBuf};

use proptest::prelude::*;
use tpack_core::keys::{self, ProcessModel};
use tpack_core::{ManifestFormat, PackageError, TestPackage};

fn abs(rel: &str) -> String {
    std::env::current_dir()
        .unwrap()
        .join(rel)
        .to_str()
        .unwrap()
        .to_string()
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn test_from_paths_two_assemblies() {
    let pkg = TestPackage::from_paths(["a.dll", "b.dll"]).unwrap();
    assert_eq!(pkg.children().len(), 2);
    assert!(pkg.has_children());
    assert_eq!(pkg.name(), None);
    assert_eq!(
        pkg.assemblies(),
        vec![Some(abs("a.dll").as_str()), Some(abs("b.dll").as_str())]
    );
}

#[test]
fn test_incremental_add_matches_from_paths() {
    let mut pkg = TestPackage::new();
    pkg.add(TestPackage::from_path("a.dll").unwrap());
    pkg.add(TestPackage::from_path("b.dll").unwrap());
    assert_eq!(pkg, TestPackage::from_paths(["a.dll", "b.dll"]).unwrap());
}

#[test]
fn test_nested_container() {
    let mut pkg = TestPackage::new();
    pkg.add(TestPackage::from_path("a.dll").unwrap());
    pkg.add(TestPackage::from_paths(["b.dll", "c.dll"]).unwrap());
    assert_eq!(
        pkg.assembly_paths(),
        vec![abs("a.dll"), abs("b.dll"), abs("c.dll")]
    );
}

#[test]
fn test_depth_four_preorder() {
    // root
    //  ├── l1 ── l2 ── [d1.dll, d2.dll]
    //  │          └── e.dll
    //  └── f.dll
    let mut l2 = TestPackage::new();
    l2.add(TestPackage::from_paths(["d1.dll", "d2.dll"]).unwrap());
    l2.add_path("e.dll").unwrap();
    let mut l1 = TestPackage::new();
    l1.add(l2);
    let mut root = TestPackage::new();
    root.add(l1);
    root.add_path("f.dll").unwrap();

    assert_eq!(
        root.assembly_paths(),
        vec![abs("d1.dll"), abs("d2.dll"), abs("e.dll"), abs("f.dll")]
    );
    assert_eq!(root.leaves().count(), 4);
}

#[test]
fn test_settings_belong_to_their_node() {
    let mut pkg = TestPackage::from_paths(["a.dll"])
        .unwrap()
        .with_setting(keys::PROCESS_MODEL, ProcessModel::Separate);
    pkg.add_path("b.dll")
        .unwrap()
        .set_setting(keys::WORK_DIRECTORY, "/tmp/work");

    assert_eq!(
        pkg.get_setting(keys::PROCESS_MODEL, ProcessModel::Default).unwrap(),
        ProcessModel::Separate
    );
    assert_eq!(
        pkg.children()[0]
            .get_setting(keys::PROCESS_MODEL, ProcessModel::Default)
            .unwrap(),
        ProcessModel::Default
    );
    assert_eq!(
        pkg.children()[1]
            .get_setting(keys::WORK_DIRECTORY, String::new())
            .unwrap(),
        "/tmp/work"
    );
}

#[test]
fn test_enum_requested_as_string_is_mismatch() {
    let pkg = TestPackage::new().with_setting(keys::PROCESS_MODEL, ProcessModel::InProcess);
    let err = pkg
        .get_setting(keys::PROCESS_MODEL, String::from("Default"))
        .unwrap_err();
    assert!(matches!(
        err,
        PackageError::SettingTypeMismatch { expected: "string", actual: "enum", .. }
    ));
}

#[test]
fn test_manifest_handoff_keeps_assemblies() {
    let mut pkg = TestPackage::new().with_setting(keys::DEFAULT_TIMEOUT, 1_000i64);
    pkg.add(TestPackage::from_paths(["x.dll", "y.dll"]).unwrap());
    pkg.add_path("z.dll").unwrap();

    let text = pkg.to_manifest(ManifestFormat::Json).unwrap();
    let received: TestPackage = serde_json::from_str(&text).unwrap();

    assert_eq!(received.assemblies(), pkg.assemblies());
    assert_eq!(
        received.settings().keys().collect::<Vec<_>>(),
        pkg.settings().keys().collect::<Vec<_>>()
    );
}

#[test]
fn test_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<TestPackage>();
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

fn path_segment() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,8}(\\.dll|\\.exe|\\.csproj)?"
}

fn rel_path() -> impl Strategy<Value = String> {
    prop::collection::vec(path_segment(), 1..4).prop_map(|segs| segs.join("/"))
}

proptest! {
    #[test]
    fn prop_from_path_is_absolute_with_matching_name(rel in rel_path()) {
        let pkg = TestPackage::from_path(&rel).unwrap();
        let fp = pkg.file_path().unwrap();
        prop_assert!(Path::new(fp).is_absolute());
        prop_assert_eq!(pkg.name(), Path::new(fp).file_name().and_then(|n| n.to_str()));
        prop_assert_eq!(pkg.assemblies(), vec![Some(fp)]);
    }

    #[test]
    fn prop_from_paths_preserves_order(rels in prop::collection::vec(rel_path(), 0..8)) {
        let pkg = TestPackage::from_paths(&rels).unwrap();
        let expected: Vec<String> = rels.iter().map(|r| abs(r)).collect();
        prop_assert_eq!(pkg.assembly_paths(), expected);
    }

    #[test]
    fn prop_container_is_concat_of_children(
        groups in prop::collection::vec(prop::collection::vec(rel_path(), 1..4), 1..5)
    ) {
        let mut root = TestPackage::new();
        for group in &groups {
            root.add(TestPackage::from_paths(group).unwrap());
        }
        let concat: Vec<Option<&str>> = root
            .children()
            .iter()
            .flat_map(|c| c.assemblies())
            .collect();
        prop_assert_eq!(root.assemblies(), concat);

        let flat: Vec<PathBuf> = groups.iter().flatten().map(|r| PathBuf::from(abs(r))).collect();
        let got: Vec<PathBuf> = root.assembly_paths().into_iter().map(PathBuf::from).collect();
        prop_assert_eq!(got, flat);
    }

    #[test]
    fn prop_missing_setting_yields_default(key in "[A-Za-z]{1,12}", d in any::<i64>(), b in any::<bool>()) {
        let pkg = TestPackage::new();
        prop_assert_eq!(pkg.get_setting(&key, d).unwrap(), d);
        prop_assert_eq!(pkg.get_setting(&key, b).unwrap(), b);
    }
}
