//! GitHub Copilot: `.github/copilot-instructions.md` and `.vscode/mcp.json`

use std::path::PathBuf;

use super::{json_mcp_config, Agent, InstallContext};
use crate::core::BoostResult;

pub struct CopilotAgent {
    ctx: InstallContext,
}

impl CopilotAgent {
    pub const ID: &'static str = "copilot";
    pub const DISPLAY_NAME: &'static str = "GitHub Copilot";

    pub fn new(ctx: InstallContext) -> Self {
        Self { ctx }
    }
}

impl Agent for CopilotAgent {
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
            .join(".github")
            .join("copilot-instructions.md")
    }

    fn mcp_config_path(&self) -> PathBuf {
        self.ctx.project_path.join(".vscode").join("mcp.json")
    }

    fn skills_dir(&self) -> PathBuf {
        self.ctx.project_path.join(".github").join("skills")
    }

    // VS Code keys its MCP entries under "servers"
    fn mcp_config_content(&self) -> BoostResult<String> {
        json_mcp_config("servers", &self.ctx.launcher)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::test_support::context;
    use serde_json::Value;
    use tempfile::TempDir;

    #[test]
    fn test_paths() {
        let temp = TempDir::new().unwrap();
        let agent = CopilotAgent::new(context(temp.path()));
        let root = &agent.context().project_path;
        assert_eq!(
            agent.guidelines_path(),
            root.join(".github/copilot-instructions.md")
        );
        assert_eq!(agent.mcp_config_path(), root.join(".vscode/mcp.json"));
        assert_eq!(agent.skills_dir(), root.join(".github/skills"));
    }

    #[test]
    fn test_mcp_config_uses_servers_key() {
        let temp = TempDir::new().unwrap();
        let agent = CopilotAgent::new(context(temp.path()));
        let config: Value = serde_json::from_str(&agent.mcp_config_content().unwrap()).unwrap();
        assert!(config.get("mcpServers").is_none());
        assert_eq!(config["servers"]["odoo-boost"]["args"][0], "mcp");
    }
}
