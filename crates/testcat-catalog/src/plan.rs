//! ---
//! tc_section: "02-catalog"
//! tc_subsection: "module"
//! tc_type: "source"
//! tc_scope: "code"
//! tc_description: "Test plan builder and command rendering."
//! tc_version: "v0.0.0-prealpha"
//! tc_owner: "tbd"
//! ---
use std::fmt;

use indexmap::map::Entry;
use indexmap::IndexMap;
use serde_yaml::Value;
use testcat_logging::{catalog_debug, LogContext};

use crate::error::SectionError;
use crate::value::{text_field, ABSENT};

const SECTION: &str = "test";

/// Keys understood inside a single test record.
pub const TEST_FIELDS: [&str; 6] = ["name", "cmd", "url", "param", "working_directory", "env"];

/// A single normalized test entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Test {
    pub name: String,
    pub cmd: String,
    pub url: Option<String>,
    pub working_directory: Option<String>,
    pub env: Option<String>,
    pub param: Option<String>,
}

impl Test {
    fn from_record(record: &Value) -> Result<Self, SectionError> {
        let record = record
            .as_mapping()
            .ok_or(SectionError::NotARecord { section: SECTION })?;
        let name = text_field(record, SECTION, "name")?;
        let cmd = text_field(record, SECTION, "cmd")?;
        let (Some(name), Some(cmd)) = (name, cmd) else {
            return Err(SectionError::MissingTestFields);
        };

        for key in record.keys() {
            let known = key
                .as_str()
                .is_some_and(|key| TEST_FIELDS.contains(&key));
            if !known {
                catalog_debug!(
                    context = LogContext::new().with_test(&name),
                    "ignoring unrecognised test field {:?}",
                    key
                );
            }
        }

        Ok(Self {
            url: text_field(record, SECTION, "url")?,
            working_directory: text_field(record, SECTION, "working_directory")?,
            env: text_field(record, SECTION, "env")?,
            param: text_field(record, SECTION, "param")?,
            name,
            cmd,
        })
    }

    /// Shell fragment for this test: `cd <dir> && ` when a working directory
    /// is set, then the env prefix, the command and the parameter string.
    /// Optional parts that are absent or empty contribute nothing.
    pub fn command_line(&self) -> String {
        let mut line = String::new();
        if let Some(dir) = present(&self.working_directory) {
            line.push_str("cd ");
            line.push_str(dir);
            line.push_str(" && ");
        }
        if let Some(env) = present(&self.env) {
            line.push_str(env);
        }
        line.push_str(&self.cmd);
        if let Some(param) = present(&self.param) {
            line.push_str(param);
        }
        line
    }
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|text| !text.is_empty())
}

/// Tests of one subsystem keyed by name, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestPlan {
    tests: IndexMap<String, Test>,
}

impl TestPlan {
    /// Build a plan from the raw `test` list, rejecting incomplete records
    /// and repeated names.
    pub fn from_records(records: &[Value]) -> Result<Self, SectionError> {
        let mut tests = IndexMap::with_capacity(records.len());
        for record in records {
            let test = Test::from_record(record)?;
            match tests.entry(test.name.clone()) {
                Entry::Occupied(slot) => {
                    return Err(SectionError::DuplicateTest(slot.key().clone()));
                }
                Entry::Vacant(slot) => {
                    slot.insert(test);
                }
            }
        }
        Ok(Self { tests })
    }

    /// Parse the plan from an arbitrary YAML node; it must be a list.
    pub fn from_value(value: &Value) -> Result<Self, SectionError> {
        let records = value
            .as_sequence()
            .ok_or(SectionError::NotAList { section: SECTION })?;
        Self::from_records(records)
    }

    /// Concatenate every test's command line in plan order.
    ///
    /// No separator is placed between tests, so a two-test plan of
    /// `echo a` and `echo b` renders as `echo aecho b`.
    pub fn print_cmd(&self) -> String {
        self.tests.values().map(Test::command_line).collect()
    }

    pub fn get(&self, name: &str) -> Option<&Test> {
        self.tests.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Test> {
        self.tests.values()
    }

    pub fn len(&self) -> usize {
        self.tests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }
}

impl fmt::Display for TestPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let or_absent = |field: &Option<String>| field.clone().unwrap_or_else(|| ABSENT.to_owned());
        for test in self.iter() {
            writeln!(f, "  {}:", test.name)?;
            writeln!(f, "    Url:               {}", or_absent(&test.url))?;
            writeln!(f, "    Working Directory: {}", or_absent(&test.working_directory))?;
            writeln!(f, "    Cmd:               {}", test.cmd)?;
            writeln!(f, "    Env:               {}", or_absent(&test.env))?;
            writeln!(f, "    Param:             {}", or_absent(&test.param))?;
        }
        Ok(())
    }
}
