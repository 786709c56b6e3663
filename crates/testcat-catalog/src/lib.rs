//! ---
//! tc_section: "02-catalog"
//! tc_subsection: "module"
//! tc_type: "source"
//! tc_scope: "code"
//! tc_description: "Catalog model, schema validation and command composition."
//! tc_version: "v0.0.0-prealpha"
//! tc_owner: "tbd"
//! ---
//! Per-subsystem test catalogs.
//!
//! A catalog document maps subsystem names to records holding maintainers,
//! a mailing list, a dependency descriptor and a list of tests. Loading
//! validates the whole document up front; afterwards the [`Catalog`] is
//! read-only and can compose the shell command for any subsystem.

pub mod catalog;
pub mod error;
pub mod maintainer;
pub mod plan;
pub mod subsystem;
pub mod value;

pub use catalog::{Catalog, RawDocument};
pub use error::{CatalogError, LookupError, SchemaError, SchemaResult, SectionError};
pub use maintainer::Maintainers;
pub use plan::{Test, TestPlan};
pub use subsystem::{Subsystem, MANDATORY_FIELDS, OPTIONAL_FIELDS};

/// File name looked up next to the executable when no catalog is given.
pub const DEFAULT_CATALOG_FILE: &str = "test.yaml";
