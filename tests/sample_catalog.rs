//! ---
//! tc_section: "15-testing-qa-runbook"
//! tc_subsection: "integration-tests"
//! tc_type: "source"
//! tc_scope: "code"
//! tc_description: "Integration and validation tests for repository artifacts."
//! tc_version: "v0.0.0-prealpha"
//! tc_owner: "tbd"
//! ---
use std::fs;
use std::path::{Path, PathBuf};

use testcat_catalog::{Catalog, MANDATORY_FIELDS};

const SAMPLE: &str = "bin/get-tests/test.yaml";

fn repo_path(path: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join(path)
}

fn read(path: &str) -> String {
    let full = repo_path(path);
    fs::read_to_string(&full)
        .unwrap_or_else(|err| panic!("failed to read {}: {}", full.display(), err))
}

#[test]
fn sample_catalog_carries_frontmatter() {
    let content = read(SAMPLE);
    assert!(
        content.starts_with("# ---"),
        "{SAMPLE} must include frontmatter header"
    );
}

#[test]
fn sample_catalog_validates() {
    let catalog = Catalog::load(repo_path(SAMPLE)).expect("sample catalog is valid");
    assert!(!catalog.is_empty(), "sample catalog should define subsystems");
    for subsystem in catalog.iter() {
        assert!(
            !subsystem.maintainers.is_empty(),
            "{} should name a maintainer",
            subsystem.name
        );
        assert!(
            !subsystem.test.is_empty(),
            "{} should define at least one test",
            subsystem.name
        );
    }
}

#[test]
fn sample_catalog_renders_every_subsystem() {
    let catalog = Catalog::load(repo_path(SAMPLE)).expect("sample catalog is valid");
    for name in catalog.names() {
        let command = catalog.render(name).expect("listed name resolves");
        assert!(!command.is_empty(), "{name} renders an empty command");
    }
    assert_eq!(
        catalog.render("kselftest-net").as_deref(),
        Ok("cd /usr/libexec/kselftests && KSFT_TIMEOUT=600 ./run_kselftest.sh -c net")
    );
}

#[test]
fn sample_catalog_uses_every_mandatory_field() {
    let content = read(SAMPLE);
    for field in MANDATORY_FIELDS {
        assert!(
            content.contains(&format!("  {field}:")),
            "sample should demonstrate the {field} field"
        );
    }
}
