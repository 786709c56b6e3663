//! ---
//! tc_section: "02-catalog"
//! tc_subsection: "integration-tests"
//! tc_type: "source"
//! tc_scope: "code"
//! tc_description: "Loading catalogs from disk."
//! tc_version: "v0.0.0-prealpha"
//! tc_owner: "tbd"
//! ---
use std::fs;
use std::path::PathBuf;

use tempfile::{tempdir, TempDir};
use testcat_catalog::{Catalog, CatalogError, SchemaError, SectionError};

const CATALOG: &str = r#"
kselftest-net:
  maintainer:
    - name: Jane Doe
      email: jane@example.com
    - name: Sam Roe
      email: sam@example.com
  list: netdev@vger.kernel.org
  version: "1.2"
  dependency:
    - iproute2
    - ethtool
  test:
    - name: net
      url: https://example.com/net
      working_directory: /usr/libexec/kselftests
      env: "KSFT_TIMEOUT=300 "
      cmd: ./run_kselftest.sh
      param: " -c net"
storage:
  maintainer:
    - name: Sam Roe
      email: sam@example.com
  list: linux-block@vger.kernel.org
  dependency: fio
  hardware: nvme
  test:
    - name: blktests
      cmd: ./check
"#;

fn write_catalog(contents: &str) -> (TempDir, PathBuf) {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("test.yaml");
    fs::write(&path, contents).expect("write catalog");
    (dir, path)
}

#[test]
fn loads_catalog_from_disk() {
    let (_dir, path) = write_catalog(CATALOG);
    let catalog = Catalog::load(&path).expect("catalog loads");
    assert_eq!(catalog.len(), 2);
    assert_eq!(
        catalog.render("kselftest-net").expect("known subsystem"),
        "cd /usr/libexec/kselftests && KSFT_TIMEOUT=300 ./run_kselftest.sh -c net"
    );
    assert_eq!(catalog.render("storage").expect("known subsystem"), "./check");

    let net = catalog.get("kselftest-net").expect("net subsystem");
    assert_eq!(net.maintainers.len(), 2);
    assert!(net.hardware.is_none());
    assert!(catalog.get("storage").and_then(|s| s.hardware.as_ref()).is_some());
}

#[test]
fn loading_is_deterministic() {
    let (_dir, path) = write_catalog(CATALOG);
    let first = Catalog::load(&path).expect("first load");
    let second = Catalog::load(&path).expect("second load");
    assert_eq!(
        first.names().collect::<Vec<_>>(),
        second.names().collect::<Vec<_>>()
    );
    for name in first.names() {
        assert_eq!(first.render(name), second.render(name));
    }
    assert_eq!(first, second);
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("absent.yaml");
    let err = Catalog::load(&path).unwrap_err();
    match err {
        CatalogError::Io { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("expected io error, got {other:?}"),
    }
}

#[test]
fn malformed_yaml_is_a_parse_error() {
    let (_dir, path) = write_catalog("net: [unterminated\n");
    let err = Catalog::load(&path).unwrap_err();
    assert!(matches!(err, CatalogError::Parse { .. }), "{err:?}");
    assert!(err.to_string().contains("test.yaml"));
}

#[test]
fn empty_file_is_a_load_error() {
    let (_dir, path) = write_catalog("");
    let err = Catalog::load(&path).unwrap_err();
    match err {
        CatalogError::Empty { path: reported } => assert_eq!(reported, path),
        other => panic!("expected empty document error, got {other:?}"),
    }
}

#[test]
fn schema_errors_surface_through_load() {
    let broken = CATALOG.replace("  hardware: nvme\n", "  hardware: nvme\n  foo: bar\n");
    let (_dir, path) = write_catalog(&broken);
    let err = Catalog::load(&path).unwrap_err();
    match err {
        CatalogError::Schema(SchemaError::UnsupportedField { subsystem, field }) => {
            assert_eq!(subsystem, "storage");
            assert_eq!(field, "foo");
        }
        other => panic!("expected unsupported field, got {other:?}"),
    }
}

#[test]
fn duplicate_test_names_are_schema_errors() {
    let broken = CATALOG.replace(
        "      cmd: ./check\n",
        "      cmd: ./check\n    - name: blktests\n      cmd: ./again\n",
    );
    let (_dir, path) = write_catalog(&broken);
    let err = Catalog::load(&path).unwrap_err();
    match err {
        CatalogError::Schema(SchemaError::Section { subsystem, source }) => {
            assert_eq!(subsystem, "storage");
            assert_eq!(source, SectionError::DuplicateTest("blktests".to_owned()));
        }
        other => panic!("expected section error, got {other:?}"),
    }
}

#[test]
fn duplicate_subsystem_keys_are_rejected() {
    let doubled = format!(
        "{CATALOG}storage:\n  maintainer: []\n  list: l\n  dependency: d\n  test: [{{name: t, cmd: c}}]\n"
    );
    let (_dir, path) = write_catalog(&doubled);
    let err = Catalog::load(&path).unwrap_err();
    assert!(
        matches!(err, CatalogError::Schema(SchemaError::DuplicateSubsystem(ref name)) if name == "storage"),
        "{err:?}"
    );
    assert_eq!(err.to_string(), "Duplicate subsystem name detected: storage");
}
