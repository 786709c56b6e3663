//! ---
//! tc_section: "02-catalog"
//! tc_subsection: "module"
//! tc_type: "source"
//! tc_scope: "code"
//! tc_description: "Maintainer registry for a subsystem record."
//! tc_version: "v0.0.0-prealpha"
//! tc_owner: "tbd"
//! ---
use std::fmt;

use indexmap::map::Entry;
use indexmap::IndexMap;
use serde_yaml::Value;

use crate::error::SectionError;
use crate::value::text_field;

const SECTION: &str = "maintainer";

/// Maintainer name to email address, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Maintainers {
    entries: IndexMap<String, String>,
}

impl Maintainers {
    /// Build the registry from the raw `maintainer` list.
    pub fn from_records(records: &[Value]) -> Result<Self, SectionError> {
        let mut entries = IndexMap::with_capacity(records.len());
        for record in records {
            let record = record
                .as_mapping()
                .ok_or(SectionError::NotARecord { section: SECTION })?;
            let name = text_field(record, SECTION, "name")?;
            let email = text_field(record, SECTION, "email")?;
            let (Some(name), Some(email)) = (name, email) else {
                return Err(SectionError::MissingMaintainerFields);
            };
            match entries.entry(name) {
                Entry::Occupied(slot) => {
                    return Err(SectionError::DuplicateMaintainer(slot.key().clone()));
                }
                Entry::Vacant(slot) => {
                    slot.insert(email);
                }
            }
        }
        Ok(Self { entries })
    }

    /// Parse the registry from an arbitrary YAML node; it must be a list.
    pub fn from_value(value: &Value) -> Result<Self, SectionError> {
        let records = value
            .as_sequence()
            .ok_or(SectionError::NotAList { section: SECTION })?;
        Self::from_records(records)
    }

    pub fn email(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, email)| (name.as_str(), email.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One indented `name <email>` line per maintainer.
impl fmt::Display for Maintainers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, email) in self.iter() {
            writeln!(f, "  {name} <{email}>")?;
        }
        Ok(())
    }
}
