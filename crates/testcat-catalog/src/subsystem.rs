//! ---
//! tc_section: "02-catalog"
//! tc_subsection: "module"
//! tc_type: "source"
//! tc_scope: "code"
//! tc_description: "Subsystem record validation."
//! tc_version: "v0.0.0-prealpha"
//! tc_owner: "tbd"
//! ---
use std::fmt;

use serde_yaml::{Mapping, Value};
use testcat_logging::{catalog_debug, LogContext};

use crate::error::{SchemaError, SchemaResult};
use crate::maintainer::Maintainers;
use crate::plan::TestPlan;
use crate::value::{render_optional, render_value};

/// Fields every subsystem must define, in validation order.
pub const MANDATORY_FIELDS: [&str; 4] = ["maintainer", "list", "dependency", "test"];

/// Fields a subsystem may define.
pub const OPTIONAL_FIELDS: [&str; 2] = ["version", "hardware"];

/// A validated subsystem entry of the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct Subsystem {
    pub name: String,
    pub maintainers: Maintainers,
    /// Mailing list identifier.
    pub list: Value,
    pub dependency: Value,
    pub test: TestPlan,
    pub version: Option<Value>,
    pub hardware: Option<Value>,
}

impl Subsystem {
    /// Validate a raw subsystem record.
    ///
    /// Mandatory fields are checked in [`MANDATORY_FIELDS`] order, then the
    /// record is scanned for fields outside both field sets.
    pub fn from_record(name: &str, record: &Value) -> SchemaResult<Self> {
        let record = record.as_mapping().ok_or_else(|| SchemaError::NotARecord {
            subsystem: name.to_owned(),
        })?;

        let maintainers = Maintainers::from_value(required(name, record, "maintainer")?)
            .map_err(|source| SchemaError::section(name, source))?;
        let list = required(name, record, "list")?.clone();
        let dependency = required(name, record, "dependency")?.clone();
        let test = TestPlan::from_value(required(name, record, "test")?)
            .map_err(|source| SchemaError::section(name, source))?;

        let version = optional(record, "version");
        let hardware = optional(record, "hardware");

        for key in record.keys() {
            let Some(field) = key.as_str() else {
                return Err(SchemaError::InvalidFieldName {
                    subsystem: name.to_owned(),
                });
            };
            if !MANDATORY_FIELDS.contains(&field) && !OPTIONAL_FIELDS.contains(&field) {
                return Err(SchemaError::UnsupportedField {
                    subsystem: name.to_owned(),
                    field: field.to_owned(),
                });
            }
        }

        catalog_debug!(
            context = LogContext::new().with_subsystem(name),
            "validated subsystem with {} maintainer(s) and {} test(s)",
            maintainers.len(),
            test.len()
        );

        Ok(Self {
            name: name.to_owned(),
            maintainers,
            list,
            dependency,
            test,
            version,
            hardware,
        })
    }

    /// Composed shell command for this subsystem's test plan.
    pub fn command(&self) -> String {
        self.test.print_cmd()
    }
}

fn required<'a>(
    subsystem: &str,
    record: &'a Mapping,
    field: &'static str,
) -> SchemaResult<&'a Value> {
    record.get(field).ok_or_else(|| SchemaError::MissingField {
        subsystem: subsystem.to_owned(),
        field,
    })
}

fn optional(record: &Mapping, field: &str) -> Option<Value> {
    record.get(field).filter(|value| !value.is_null()).cloned()
}

/// Human-readable multi-line dump used by `--info`.
impl fmt::Display for Subsystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Subsystem:    {}", self.name)?;
        writeln!(f, "Maintainer:")?;
        write!(f, "{}", self.maintainers)?;
        writeln!(f, "Mailing List: {}", render_value(&self.list))?;
        writeln!(f, "Version:      {}", render_optional(self.version.as_ref()))?;
        writeln!(f, "Dependency:   {}", render_value(&self.dependency))?;
        writeln!(f, "Test:")?;
        write!(f, "{}", self.test)?;
        write!(f, "Hardware:     {}", render_optional(self.hardware.as_ref()))
    }
}
