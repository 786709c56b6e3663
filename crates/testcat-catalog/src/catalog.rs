//! ---
//! tc_section: "02-catalog"
//! tc_subsection: "module"
//! tc_type: "source"
//! tc_scope: "code"
//! tc_description: "Catalog loading, subsystem lookup and command composition."
//! tc_version: "v0.0.0-prealpha"
//! tc_owner: "tbd"
//! ---
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use indexmap::map::Entry;
use indexmap::IndexMap;
use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde_yaml::Value;
use tracing::debug;

use crate::error::{CatalogError, LookupError, SchemaError, SchemaResult};
use crate::subsystem::Subsystem;
use crate::value::{render_value, scalar_text};

/// Top-level entries of a catalog document in the order they appear.
///
/// Repeated keys are preserved so the catalog builder can report them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawDocument {
    entries: Vec<(Value, Value)>,
}

impl RawDocument {
    pub fn entries(&self) -> &[(Value, Value)] {
        &self.entries
    }
}

impl FromIterator<(Value, Value)> for RawDocument {
    fn from_iter<I: IntoIterator<Item = (Value, Value)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'de> Deserialize<'de> for RawDocument {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = RawDocument;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a mapping of subsystem names to subsystem records")
            }

            fn visit_map<A>(self, mut map: A) -> Result<RawDocument, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<Value, Value>()? {
                    entries.push(entry);
                }
                Ok(RawDocument { entries })
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

/// Validated subsystems keyed by name, in document order.
///
/// Built once per load and immutable afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    subsystems: IndexMap<String, Subsystem>,
}

impl Catalog {
    /// Validate every entry of a parsed document.
    pub fn from_document(document: &RawDocument) -> SchemaResult<Self> {
        let mut subsystems = IndexMap::with_capacity(document.entries.len());
        for (key, record) in &document.entries {
            let name = scalar_text(key)
                .ok_or_else(|| SchemaError::InvalidSubsystemName(render_value(key)))?;
            let subsystem = Subsystem::from_record(&name, record)?;
            match subsystems.entry(name) {
                Entry::Occupied(slot) => {
                    return Err(SchemaError::DuplicateSubsystem(slot.key().clone()));
                }
                Entry::Vacant(slot) => {
                    slot.insert(subsystem);
                }
            }
        }
        Ok(Self { subsystems })
    }

    /// Read, parse and validate a catalog file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        debug!(catalog_path = %path.display(), "loading catalog");
        let contents = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let document = parse_document(&contents, path)?;
        let catalog = Self::from_document(&document)?;
        debug!(
            catalog_path = %path.display(),
            subsystems = catalog.len(),
            "catalog validated"
        );
        Ok(catalog)
    }

    pub fn get(&self, name: &str) -> Option<&Subsystem> {
        self.subsystems.get(name)
    }

    /// Like [`Catalog::get`], but reports the known names on a miss.
    pub fn lookup(&self, name: &str) -> Result<&Subsystem, LookupError> {
        self.get(name).ok_or_else(|| LookupError {
            name: name.to_owned(),
            known: self.names().map(str::to_owned).collect(),
        })
    }

    /// Composed test command for the named subsystem.
    pub fn render(&self, name: &str) -> Result<String, LookupError> {
        self.lookup(name).map(Subsystem::command)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.subsystems.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Subsystem> {
        self.subsystems.values()
    }

    pub fn len(&self) -> usize {
        self.subsystems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subsystems.is_empty()
    }
}

impl FromStr for Catalog {
    type Err = CatalogError;

    /// Parse and validate an in-memory document. Parse errors report an empty path.
    fn from_str(content: &str) -> Result<Self, Self::Err> {
        let document = parse_document(content, Path::new(""))?;
        Ok(Self::from_document(&document)?)
    }
}

/// An empty or `~` document is a load error; `{}` is an empty catalog.
fn parse_document(content: &str, path: &Path) -> Result<RawDocument, CatalogError> {
    let document: Option<RawDocument> =
        serde_yaml::from_str(content).map_err(|source| CatalogError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    document.ok_or_else(|| CatalogError::Empty {
        path: path.to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO: &str = r#"
net:
  maintainer: [{name: Jane, email: jane@example.com}]
  list: netdev
  dependency: none
  test: [{name: smoke, cmd: pytest}]
storage:
  maintainer: [{name: Sam, email: sam@example.com}]
  list: linux-block
  dependency: none
  test:
    - {name: a, cmd: echo a}
    - {name: b, cmd: echo b}
"#;

    #[test]
    fn preserves_document_order() {
        let catalog: Catalog = TWO.parse().expect("valid catalog");
        assert_eq!(catalog.names().collect::<Vec<_>>(), ["net", "storage"]);
        assert_eq!(catalog.render("net").as_deref(), Ok("pytest"));
        assert_eq!(catalog.render("storage").as_deref(), Ok("echo aecho b"));
    }

    #[test]
    fn unknown_subsystem_lists_known_names() {
        let catalog: Catalog = TWO.parse().expect("valid catalog");
        let err = catalog.render("gpu").unwrap_err();
        assert_eq!(err.name, "gpu");
        assert_eq!(err.known, ["net", "storage"]);
        assert_eq!(err.to_string(), "No subsystem: gpu");
    }

    #[test]
    fn repeated_top_level_keys_reach_the_builder() {
        let text = format!("{TWO}net:\n  list: again\n");
        let document: RawDocument = serde_yaml::from_str(&text).expect("document parses");
        assert_eq!(document.entries().len(), 3);
    }

    #[test]
    fn duplicate_subsystem_is_rejected() {
        let record: Value = serde_yaml::from_str(
            "{maintainer: [], list: l, dependency: d, test: [{name: t, cmd: c}]}",
        )
        .expect("record");
        let document: RawDocument = [
            (Value::from("net"), record.clone()),
            (Value::from("net"), record),
        ]
        .into_iter()
        .collect();
        let err = Catalog::from_document(&document).unwrap_err();
        assert_eq!(err, SchemaError::DuplicateSubsystem("net".to_owned()));
        assert_eq!(err.to_string(), "Duplicate subsystem name detected: net");
    }

    #[test]
    fn non_mapping_document_fails_to_parse() {
        let err = "- a\n- b\n".parse::<Catalog>().unwrap_err();
        assert!(matches!(err, CatalogError::Parse { .. }));
    }

    #[test]
    fn null_document_is_not_a_catalog() {
        for text in ["", "~\n", "# only a comment\n"] {
            let err = text.parse::<Catalog>().unwrap_err();
            assert!(matches!(err, CatalogError::Empty { .. }), "{text:?}: {err:?}");
        }
    }

    #[test]
    fn empty_mapping_is_an_empty_catalog() {
        let catalog: Catalog = "{}".parse().expect("empty mapping");
        assert!(catalog.is_empty());
        assert_eq!(catalog.render("net").unwrap_err().known, Vec::<String>::new());
    }

    #[test]
    fn numeric_subsystem_names_are_text() {
        let catalog: Catalog =
            "42:\n  maintainer: []\n  list: l\n  dependency: d\n  test: [{name: t, cmd: c}]\n"
                .parse()
                .expect("valid catalog");
        assert!(catalog.get("42").is_some());
    }
}
