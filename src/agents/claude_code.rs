//! Claude Code: `CLAUDE.md` and `.mcp.json`

use std::path::PathBuf;

use super::{json_mcp_config, Agent, InstallContext};
use crate::core::BoostResult;

pub struct ClaudeCodeAgent {
    ctx: InstallContext,
}

impl ClaudeCodeAgent {
    pub const ID: &'static str = "claude_code";
    pub const DISPLAY_NAME: &'static str = "Claude Code";

    pub fn new(ctx: InstallContext) -> Self {
        Self { ctx }
    }
}

impl Agent for ClaudeCodeAgent {
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
        self.ctx.project_path.join("CLAUDE.md")
    }

    fn mcp_config_path(&self) -> PathBuf {
        self.ctx.project_path.join(".mcp.json")
    }

    fn skills_dir(&self) -> PathBuf {
        self.ctx.project_path.join(".ai").join("skills")
    }

    fn mcp_config_content(&self) -> BoostResult<String> {
        json_mcp_config("mcpServers", &self.ctx.launcher)
    }
}
