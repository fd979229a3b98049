//! OpenAI Codex: `AGENTS.md` and `.codex/config.toml`

use std::path::PathBuf;

use super::{Agent, InstallContext, MCP_SERVER_NAME};
use crate::core::BoostResult;

pub struct CodexAgent {
    ctx: InstallContext,
}

impl CodexAgent {
    pub const ID: &'static str = "codex";
    pub const DISPLAY_NAME: &'static str = "OpenAI Codex";

    pub fn new(ctx: InstallContext) -> Self {
        Self { ctx }
    }
}

/// Quote `value` as a TOML basic string
fn toml_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0c}' => out.push_str("\\f"),
            c if c.is_control() => out.push_str(&format!("\\u{:04X}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

impl Agent for CodexAgent {
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
        self.ctx.project_path.join("AGENTS.md")
    }

    fn mcp_config_path(&self) -> PathBuf {
        self.ctx.project_path.join(".codex").join("config.toml")
    }

    fn skills_dir(&self) -> PathBuf {
        self.ctx.project_path.join(".agents").join("skills")
    }

    fn mcp_config_content(&self) -> BoostResult<String> {
        let launcher = &self.ctx.launcher;
        let args = launcher
            .args
            .iter()
            .map(|a| toml_string(a))
            .collect::<Vec<_>>()
            .join(", ");

        Ok(format!(
            "# Odoo Boost MCP configuration for Codex\n\
             [mcp_servers.{}]\n\
             command = {}\n\
             args = [{}]\n",
            MCP_SERVER_NAME,
            toml_string(&launcher.program),
            args
        ))
    }
}
