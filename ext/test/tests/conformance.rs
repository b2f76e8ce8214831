//! Conformance tests that run YAML fixtures against the trail engine.
//!
//! Run with: cargo test -p trail-test --test conformance

#![cfg(feature = "fixtures")]

use std::fs;
use std::path::{Path, PathBuf};
use trail_test::fixture::Fixture;

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

/// Load and run all fixtures in a directory.
fn run_fixtures_in_dir(dir: &Path) {
    assert!(
        dir.exists(),
        "fixtures directory does not exist: {}",
        dir.display()
    );

    let mut ran = 0;
    for entry in fs::read_dir(dir).expect("read dir") {
        let path = entry.expect("dir entry").path();
        if path
            .extension()
            .is_some_and(|ext| ext == "yaml" || ext == "yml")
        {
            let yaml = fs::read_to_string(&path).expect("read yaml");
            let fixtures = Fixture::from_yaml_multi(&yaml)
                .unwrap_or_else(|err| panic!("failed to parse {}: {err}", path.display()));
            for fixture in fixtures {
                println!("running: {}", fixture.name);
                fixture.run_and_assert();
                ran += 1;
            }
        }
    }
    assert!(ran > 0, "no fixtures found in {}", dir.display());
}

#[test]
fn matching() {
    run_fixtures_in_dir(&fixtures_dir().join("01_matching"));
}

#[test]
fn building() {
    run_fixtures_in_dir(&fixtures_dir().join("02_building"));
}

#[test]
fn query() {
    run_fixtures_in_dir(&fixtures_dir().join("03_query"));
}
