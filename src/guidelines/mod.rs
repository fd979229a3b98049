//! Guidelines composer
//!
//! Renders the Markdown guidelines document written for every agent: a
//! general section, a section for the detected Odoo series and the MCP tool
//! reference.

const CORE: &str = include_str!("templates/core.md");
const ODOO_17: &str = include_str!("templates/odoo17.md");
const ODOO_18: &str = include_str!("templates/odoo18.md");
const ODOO_19: &str = include_str!("templates/odoo19.md");
const GENERIC: &str = include_str!("templates/generic.md");
const MCP_TOOLS: &str = include_str!("templates/mcp_tools.md");

/// Shown in place of the version when none was detected
const UNKNOWN_VERSION: &str = "17.0+";

/// Major series of a version string: "18.0" and "18" both give "18"
fn major(version: &str) -> &str {
    version.split('.').next().unwrap_or(version).trim()
}

fn version_section(version: Option<&str>) -> &'static str {
    match version.map(major) {
        Some("17") => ODOO_17,
        Some("18") => ODOO_18,
        Some("19") => ODOO_19,
        _ => GENERIC,
    }
}

/// Build the guidelines Markdown for `odoo_version`
pub fn compose_guidelines(odoo_version: Option<&str>) -> String {
    let version = odoo_version
        .map(str::trim)
        .filter(|v| !v.is_empty());
    let display = version.unwrap_or(UNKNOWN_VERSION);

    [CORE, version_section(version), MCP_TOOLS]
        .iter()
        .map(|section| section.trim_end().replace("{{version}}", display))
        .collect::<Vec<_>>()
        .join("\n\n")
        + "\n"
}
