//! ---
//! tc_section: "05-cli"
//! tc_subsection: "binary"
//! tc_type: "source"
//! tc_scope: "code"
//! tc_description: "Command line driver printing subsystem test commands."
//! tc_version: "v0.0.0-prealpha"
//! tc_owner: "tbd"
//! ---
use testcat_catalog::{Catalog, LookupError};

/// Text printed to stdout for the selected subsystem: the full record when
/// `info` is set, otherwise the composed test command.
pub(crate) fn render(catalog: &Catalog, subsystem: &str, info: bool) -> Result<String, LookupError> {
    if info {
        catalog.lookup(subsystem).map(ToString::to_string)
    } else {
        catalog.render(subsystem)
    }
}
