//! AI coding agent integrations
//!
//! Every agent knows where its three artifacts live inside a project:
//!
//! 1. Guidelines file (Markdown development instructions)
//! 2. MCP tool-config file (so the agent can start `odoo-boost mcp`)
//! 3. Skills directory (step-by-step guides for common tasks)
//!
//! `install` and `uninstall` are shared by all variants.

mod claude_code;
mod codex;
mod copilot;
mod cursor;
mod gemini_cli;
mod junie;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::BoostConfig;
use crate::core::BoostResult;
use crate::guidelines::compose_guidelines;
use crate::skills::install_skills;

pub use claude_code::ClaudeCodeAgent;
pub use codex::CodexAgent;
pub use copilot::CopilotAgent;
pub use cursor::CursorAgent;
pub use gemini_cli::GeminiCliAgent;
pub use junie::JunieAgent;

/// Name of the server entry written into every tool-config file
pub const MCP_SERVER_NAME: &str = "odoo-boost";

/// All supported agent ids, in the order they are offered
pub const AGENT_IDS: &[&str] = &[
    "claude_code",
    "cursor",
    "copilot",
    "codex",
    "gemini_cli",
    "junie",
];

/// The command an agent runtime uses to start the MCP server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct McpLauncher {
    pub program: String,
    pub args: Vec<String>,
}

impl McpLauncher {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: vec!["mcp".to_string()],
        }
    }

    /// Launch the running executable, so agents start this exact binary
    /// regardless of `PATH`
    pub fn current() -> Self {
        let program = std::env::current_exe()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_else(|e| {
                tracing::warn!("[Agent] Cannot resolve current executable: {}", e);
                "odoo-boost".to_string()
            });
        Self::new(program)
    }
}

/// Everything an agent needs to generate its files
#[derive(Debug, Clone)]
pub struct InstallContext {
    /// Absolute project root
    pub project_path: PathBuf,
    pub odoo_version: Option<String>,
    pub generate_mcp: bool,
    pub generate_ai_files: bool,
    pub launcher: McpLauncher,
}

impl InstallContext {
    pub fn new(project_path: &Path, launcher: McpLauncher) -> Self {
        let project_path =
            std::path::absolute(project_path).unwrap_or_else(|_| project_path.to_path_buf());
        Self {
            project_path,
            odoo_version: None,
            generate_mcp: true,
            generate_ai_files: true,
            launcher,
        }
    }

    /// Context for `config`, rooted at `project_path`
    pub fn from_config(config: &BoostConfig, project_path: &Path, launcher: McpLauncher) -> Self {
        let mut ctx = Self::new(project_path, launcher);
        ctx.odoo_version = config.odoo_version.clone();
        ctx.generate_mcp = config.generate_mcp;
        ctx.generate_ai_files = config.generate_ai_files;
        ctx
    }

    pub fn with_odoo_version(mut self, version: impl Into<String>) -> Self {
        self.odoo_version = Some(version.into());
        self
    }

    pub fn with_generation(mut self, generate_mcp: bool, generate_ai_files: bool) -> Self {
        self.generate_mcp = generate_mcp;
        self.generate_ai_files = generate_ai_files;
        self
    }
}

/// One AI coding agent integration
pub trait Agent: Send + Sync {
    /// Stable identifier stored in `odoo-boost.json`
    fn id(&self) -> &'static str;

    /// Human-readable name
    fn display_name(&self) -> &'static str;

    fn context(&self) -> &InstallContext;

    /// Absolute path of the guidelines file
    fn guidelines_path(&self) -> PathBuf;

    /// Absolute path of the MCP tool-config file
    fn mcp_config_path(&self) -> PathBuf;

    /// Absolute path of the skills directory
    fn skills_dir(&self) -> PathBuf;

    /// Content of the MCP tool-config file
    fn mcp_config_content(&self) -> BoostResult<String>;

    /// Content of the guidelines file
    fn guidelines_content(&self) -> String {
        compose_guidelines(self.context().odoo_version.as_deref())
    }

    /// Generate all enabled files, overwriting in place
    ///
    /// Returns the paths written, skill files included.
    fn install(&self) -> BoostResult<Vec<PathBuf>> {
        let ctx = self.context();
        let mut created = Vec::new();

        if ctx.generate_ai_files {
            let path = self.guidelines_path();
            write_file(&path, &self.guidelines_content())?;
            created.push(path);
            created.extend(install_skills(&self.skills_dir())?);
        }

        if ctx.generate_mcp {
            let path = self.mcp_config_path();
            write_file(&path, &self.mcp_config_content()?)?;
            created.push(path);
        }

        tracing::info!(
            "[Agent] {} installed {} files under {}",
            self.id(),
            created.len(),
            ctx.project_path.display()
        );
        Ok(created)
    }

    /// Remove generated files, skipping anything already gone
    ///
    /// Failures are logged and do not stop the remaining removals. Returns the
    /// paths that were removed.
    fn uninstall(&self) -> Vec<PathBuf> {
        let mut removed = Vec::new();

        for path in [self.guidelines_path(), self.mcp_config_path()] {
            if path.is_file() {
                match fs::remove_file(&path) {
                    Ok(()) => removed.push(path),
                    Err(e) => tracing::warn!("[Agent] Failed to remove {}: {}", path.display(), e),
                }
            }
        }

        let skills = self.skills_dir();
        if skills.is_dir() {
            match fs::remove_dir_all(&skills) {
                Ok(()) => removed.push(skills),
                Err(e) => tracing::warn!("[Agent] Failed to remove {}: {}", skills.display(), e),
            }
        }

        tracing::info!("[Agent] {} removed {} paths", self.id(), removed.len());
        removed
    }
}

/// Create the agent registered under `id`
pub fn create_agent(id: &str, ctx: InstallContext) -> Option<Box<dyn Agent>> {
    let agent: Box<dyn Agent> = match id {
        "claude_code" => Box::new(ClaudeCodeAgent::new(ctx)),
        "cursor" => Box::new(CursorAgent::new(ctx)),
        "copilot" => Box::new(CopilotAgent::new(ctx)),
        "codex" => Box::new(CodexAgent::new(ctx)),
        "gemini_cli" => Box::new(GeminiCliAgent::new(ctx)),
        "junie" => Box::new(JunieAgent::new(ctx)),
        _ => return None,
    };
    Some(agent)
}

/// Display name for a known agent id
pub fn display_name(id: &str) -> Option<&'static str> {
    match id {
        "claude_code" => Some(ClaudeCodeAgent::DISPLAY_NAME),
        "cursor" => Some(CursorAgent::DISPLAY_NAME),
        "copilot" => Some(CopilotAgent::DISPLAY_NAME),
        "codex" => Some(CodexAgent::DISPLAY_NAME),
        "gemini_cli" => Some(GeminiCliAgent::DISPLAY_NAME),
        "junie" => Some(JunieAgent::DISPLAY_NAME),
        _ => None,
    }
}

fn write_file(path: &Path, content: &str) -> BoostResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}

#[derive(Serialize)]
struct ServerEntry<'a> {
    command: &'a str,
    args: &'a [String],
}

/// JSON tool-config of the shape `{root_key: {"odoo-boost": {command, args}}}`
pub(crate) fn json_mcp_config(root_key: &str, launcher: &McpLauncher) -> BoostResult<String> {
    let entry = ServerEntry {
        command: &launcher.program,
        args: &launcher.args,
    };
    let servers = BTreeMap::from([(MCP_SERVER_NAME, entry)]);
    let document = BTreeMap::from([(root_key, servers)]);

    let mut text = serde_json::to_string_pretty(&document)?;
    text.push('\n');
    Ok(text)
}
