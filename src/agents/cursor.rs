//! Cursor: `.cursor/rules/odoo-boost.mdc` and `.cursor/mcp.json`

use std::path::PathBuf;

use super::{json_mcp_config, Agent, InstallContext};
use crate::core::BoostResult;
use crate::guidelines::compose_guidelines;

/// Front-matter Cursor needs to apply the rule to every request
const MDC_HEADER: &str = "---\n\
description: Odoo development guidelines from Odoo Boost\n\
globs:\n\
alwaysApply: true\n\
---\n\n";

pub struct CursorAgent {
    ctx: InstallContext,
}

impl CursorAgent {
    pub const ID: &'static str = "cursor";
    pub const DISPLAY_NAME: &'static str = "Cursor";

    pub fn new(ctx: InstallContext) -> Self {
        Self { ctx }
    }
}

impl Agent for CursorAgent {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn display_name(&self) -> &'static str {
        Self::DISPLAY_NAME
    }

    fn context(&self) -> &InstallContext {
        &self.ctx
    }

    fn guidelines_path(&self) -> PathBuf {
        self.ctx
            .project_path
            .join(".cursor")
            .join("rules")
            .join("odoo-boost.mdc")
    }

    fn mcp_config_path(&self) -> PathBuf {
        self.ctx.project_path.join(".cursor").join("mcp.json")
    }

    fn skills_dir(&self) -> PathBuf {
        self.ctx.project_path.join(".cursor").join("skills")
    }

    fn mcp_config_content(&self) -> BoostResult<String> {
        json_mcp_config("mcpServers", &self.ctx.launcher)
    }

    fn guidelines_content(&self) -> String {
        format!(
            "{}{}",
            MDC_HEADER,
            compose_guidelines(self.ctx.odoo_version.as_deref())
        )
    }
}
