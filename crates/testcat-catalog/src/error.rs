//! ---
//! tc_section: "02-catalog"
//! tc_subsection: "module"
//! tc_type: "source"
//! tc_scope: "code"
//! tc_description: "Error types raised while loading and validating catalogs."
//! tc_version: "v0.0.0-prealpha"
//! tc_owner: "tbd"
//! ---
use std::path::PathBuf;

use thiserror::Error;

/// Shared result type for schema validation routines.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Failures inside a `test` or `maintainer` list of a subsystem record.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SectionError {
    #[error("Missing fields \"name\" or \"cmd\" in test section")]
    MissingTestFields,
    #[error("Duplicate test name ({0}) in test section")]
    DuplicateTest(String),
    #[error("Missing fields \"name\" or \"email\" in maintainer section")]
    MissingMaintainerFields,
    #[error("Duplicate maintainer name ({0}) in maintainer section")]
    DuplicateMaintainer(String),
    #[error("{section} section must be a list of records")]
    NotAList { section: &'static str },
    #[error("entry in {section} section must be a mapping of fields")]
    NotARecord { section: &'static str },
    #[error("field \"{field}\" in {section} section must be a string, number or boolean")]
    NotAScalar {
        section: &'static str,
        field: &'static str,
    },
}

/// Structural problems in the catalog document.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Missing mandatory field \"{field}\" in subsystem {subsystem}")]
    MissingField {
        subsystem: String,
        field: &'static str,
    },
    #[error("Unsupported field \"{field}\" in section {subsystem}")]
    UnsupportedField { subsystem: String, field: String },
    #[error("Section {subsystem}")]
    Section {
        subsystem: String,
        #[source]
        source: SectionError,
    },
    #[error("subsystem {subsystem} must be a mapping of fields")]
    NotARecord { subsystem: String },
    #[error("subsystem {subsystem}: field names must be strings")]
    InvalidFieldName { subsystem: String },
    #[error("subsystem name {0} must be a string, number or boolean")]
    InvalidSubsystemName(String),
    #[error("Duplicate subsystem name detected: {0}")]
    DuplicateSubsystem(String),
}

impl SchemaError {
    pub(crate) fn section(subsystem: &str, source: SectionError) -> Self {
        SchemaError::Section {
            subsystem: subsystem.to_owned(),
            source,
        }
    }
}

/// Errors raised while turning a file on disk into a [`crate::Catalog`].
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("unable to read catalog {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse catalog {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("catalog {} holds no document", .path.display())]
    Empty { path: PathBuf },
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Raised when a subsystem is requested that the catalog does not define.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("No subsystem: {name}")]
pub struct LookupError {
    /// The requested subsystem.
    pub name: String,
    /// Every subsystem the catalog defines, in document order.
    pub known: Vec<String>,
}
