//! Gemini CLI: `GEMINI.md` and `.gemini/settings.json`

use std::path::PathBuf;

use super::{json_mcp_config, Agent, InstallContext};
use crate::core::BoostResult;

pub struct GeminiCliAgent {
    ctx: InstallContext,
}

impl GeminiCliAgent {
    pub const ID: &'static str = "gemini_cli";
    pub const DISPLAY_NAME: &'static str = "Gemini CLI";

    pub fn new(ctx: InstallContext) -> Self {
        Self { ctx }
    }
}

impl Agent for GeminiCliAgent {
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
        self.ctx.project_path.join("GEMINI.md")
    }

    fn mcp_config_path(&self) -> PathBuf {
        self.ctx.project_path.join(".gemini").join("settings.json")
    }

    fn skills_dir(&self) -> PathBuf {
        self.ctx.project_path.join(".agents").join("skills")
    }

    fn mcp_config_content(&self) -> BoostResult<String> {
        json_mcp_config("mcpServers", &self.ctx.launcher)
    }
}
