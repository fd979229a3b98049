//! Junie: `.junie/guidelines.md` and `.junie/mcp/mcp.json`

use std::path::PathBuf;

use super::{json_mcp_config, Agent, InstallContext};
use crate::core::BoostResult;

pub struct JunieAgent {
    ctx: InstallContext,
}

impl JunieAgent {
    pub const ID: &'static str = "junie";
    pub const DISPLAY_NAME: &'static str = "Junie";

    pub fn new(ctx: InstallContext) -> Self {
        Self { ctx }
    }
}

impl Agent for JunieAgent {
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
        self.ctx.project_path.join(".junie").join("guidelines.md")
    }

    fn mcp_config_path(&self) -> PathBuf {
        self.ctx
            .project_path
            .join(".junie")
            .join("mcp")
            .join("mcp.json")
    }

    fn skills_dir(&self) -> PathBuf {
        self.ctx.project_path.join(".junie").join("skills")
    }

    fn mcp_config_content(&self) -> BoostResult<String> {
        json_mcp_config("mcpServers", &self.ctx.launcher)
    }
}
