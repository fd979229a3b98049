//! Command-line interface
//!
//! - `Cli` / `Command` - clap argument definitions
//! - `Console` - colored terminal output and prompts
//! - `commands` - the `install`, `update`, `check`, `uninstall` and `mcp` commands

mod commands;
mod console;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

pub use commands::{parse_agent_selection, remove_agents, run, sync_agents, AgentReport};
pub use console::{format_table, parse_confirm, Console};

/// AI coding agents with deep introspection into running Odoo instances
#[derive(Debug, Parser)]
#[command(name = "odoo-boost", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure the connection, detect the version, select agents and generate files
    Install(InstallArgs),
    /// Re-generate agent files from an existing odoo-boost.json
    Update(ConfigArgs),
    /// Test the connection to an Odoo instance
    Check(CheckArgs),
    /// Remove the files generated for the configured agents
    Uninstall(ConfigArgs),
    /// Start the MCP server (stdio transport)
    Mcp(McpArgs),
}

/// Location of odoo-boost.json
#[derive(Debug, Clone, Default, Args)]
pub struct ConfigArgs {
    /// Path to odoo-boost.json (searched upward from the working directory by default)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Connection details given on the command line
#[derive(Debug, Clone, Default, Args)]
pub struct ConnectionArgs {
    /// Odoo server URL
    #[arg(long)]
    pub url: Option<String>,
    /// Database name
    #[arg(long)]
    pub database: Option<String>,
    /// Username
    #[arg(long)]
    pub username: Option<String>,
    /// Password or API key
    #[arg(long)]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct InstallArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Agents to configure: 'all', ids ('claude_code,cursor') or numbers ('1,3')
    #[arg(long)]
    pub agents: Option<String>,

    /// Do not generate MCP config files
    #[arg(long)]
    pub no_mcp: bool,

    /// Do not generate guidelines and skill files
    #[arg(long)]
    pub no_ai_files: bool,

    /// Accept defaults instead of prompting
    #[arg(short, long)]
    pub yes: bool,

    /// Project root (defaults to the working directory)
    #[arg(long)]
    pub project: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(flatten)]
    pub config: ConfigArgs,
}

#[derive(Debug, Clone, Default, Args)]
pub struct McpArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Default log level when `RUST_LOG` is unset
    pub fn default_log_level(&self) -> &'static str {
        match self.command {
            Command::Mcp(_) => "info",
            _ => "warn",
        }
    }

    pub fn log_file(&self) -> Option<&std::path::Path> {
        match &self.command {
            Command::Mcp(args) => args.log_file.as_deref(),
            _ => None,
        }
    }
}
