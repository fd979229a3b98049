//! Command implementations

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use serde_json::Value;

use super::{CheckArgs, Cli, Command, ConfigArgs, ConnectionArgs, Console, InstallArgs, McpArgs};
use crate::agents::{self, create_agent, InstallContext, McpLauncher, AGENT_IDS};
use crate::config::{
    load_config, resolve_project_path, save_config, BoostConfig, ConnectionConfig, CONFIG_FILENAME,
};
use crate::connection::{create_connection, Domain};

const DEFAULT_URL: &str = "http://localhost:8069";
const DEFAULT_LOGIN: &str = "admin";

/// Outcome of installing or removing files for a list of agents
#[derive(Debug, Default)]
pub struct AgentReport {
    /// Paths written or removed, in agent order
    pub paths: Vec<PathBuf>,
    /// Configured ids with no matching agent
    pub skipped: Vec<String>,
}

/// Run the parsed command
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let console = Console::new();
    match cli.command {
        Command::Install(args) => install(&console, args).await,
        Command::Update(args) => update(&console, &args),
        Command::Check(args) => check(&console, args).await,
        Command::Uninstall(args) => uninstall(&console, &args),
        Command::Mcp(args) => mcp(args).await,
    }
}

/// Resolve an agent selection: "all", agent ids or 1-based numbers,
/// comma-separated; unknown entries are dropped
pub fn parse_agent_selection(selection: &str) -> Vec<String> {
    let selection = selection.trim();
    if selection.eq_ignore_ascii_case("all") {
        return AGENT_IDS.iter().map(|id| id.to_string()).collect();
    }

    selection
        .split(',')
        .map(str::trim)
        .filter_map(|part| match part.parse::<usize>() {
            Ok(n) => n.checked_sub(1).and_then(|i| AGENT_IDS.get(i)).copied(),
            Err(_) => AGENT_IDS.iter().find(|id| **id == part).copied(),
        })
        .map(str::to_string)
        .collect()
}

/// Run `install()` for every configured agent
pub fn sync_agents(
    config: &BoostConfig,
    project_path: &Path,
    launcher: &McpLauncher,
) -> anyhow::Result<AgentReport> {
    let mut report = AgentReport::default();
    for id in &config.agents {
        let ctx = InstallContext::from_config(config, project_path, launcher.clone());
        let Some(agent) = create_agent(id, ctx) else {
            tracing::warn!("[Cli] Unknown agent '{}', skipping", id);
            report.skipped.push(id.clone());
            continue;
        };
        let written = agent
            .install()
            .with_context(|| format!("Failed to generate files for {}", agent.display_name()))?;
        report.paths.extend(written);
    }
    Ok(report)
}

/// Run `uninstall()` for every configured agent
pub fn remove_agents(config: &BoostConfig, project_path: &Path) -> AgentReport {
    let mut report = AgentReport::default();
    for id in &config.agents {
        let ctx = InstallContext::from_config(config, project_path, McpLauncher::current());
        match create_agent(id, ctx) {
            Some(agent) => report.paths.extend(agent.uninstall()),
            None => {
                tracing::warn!("[Cli] Unknown agent '{}', skipping", id);
                report.skipped.push(id.clone());
            }
        }
    }
    report
}

fn relative<'a>(path: &'a Path, base: &Path) -> &'a Path {
    path.strip_prefix(base).unwrap_or(path)
}

fn text_field(info: &serde_json::Map<String, Value>, key: &str) -> Option<String> {
    info.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Take a flag value, or prompt for it unless prompting is disabled
fn value_or_prompt(
    console: &Console,
    value: Option<String>,
    label: &str,
    default: Option<&str>,
    interactive: bool,
) -> anyhow::Result<String> {
    if let Some(v) = value {
        return Ok(v);
    }
    if interactive {
        return Ok(console.prompt(label, default)?);
    }
    Ok(default.unwrap_or_default().to_string())
}

async fn install(console: &Console, args: InstallArgs) -> anyhow::Result<()> {
    let interactive = !args.yes;
    console.print_banner(
        "Odoo Boost - Install Wizard",
        "Set up your Odoo project with AI coding agent support.",
    );

    console.print_step(1, "Odoo connection details");
    let ConnectionArgs {
        url,
        database,
        username,
        password,
    } = args.connection;
    let url = value_or_prompt(console, url, "Odoo URL", Some(DEFAULT_URL), interactive)?;
    let database = value_or_prompt(console, database, "Database name", None, interactive)?;
    if database.trim().is_empty() {
        bail!("A database name is required (pass --database)");
    }
    let username = value_or_prompt(console, username, "Username", Some(DEFAULT_LOGIN), interactive)?;
    let password = match password {
        Some(p) => p,
        None if interactive => console.prompt_secret("Password / API key", Some(DEFAULT_LOGIN))?,
        None => DEFAULT_LOGIN.to_string(),
    };
    let connection = ConnectionConfig::new(url, database).with_credentials(username, password);

    console.print_step(2, "Testing connection");
    let conn = create_connection(&connection)?;
    let version_info = conn
        .get_version()
        .await
        .context("Failed to reach server")?;
    let server_version =
        text_field(&version_info, "server_version").unwrap_or_else(|| "unknown".to_string());
    console.print_field("Server version", &server_version);

    let uid = conn.authenticate().await.context("Authentication failed")?;
    console.print_field("Authenticated as UID", &uid.to_string());

    let odoo_version = text_field(&version_info, "server_serie").unwrap_or_else(|| {
        server_version
            .split('-')
            .next()
            .unwrap_or_default()
            .to_string()
    });
    console.print_field("Detected Odoo version", &odoo_version);

    console.print_step(3, "Select AI agents to configure");
    let selection = match args.agents {
        Some(selection) => selection,
        None if interactive => {
            for (i, id) in AGENT_IDS.iter().enumerate() {
                let name = agents::display_name(id).unwrap_or(*id);
                console.print_choice(i + 1, &format!("{} ({})", name, id));
            }
            println!();
            console.prompt("Enter agent numbers (comma-separated) or 'all'", Some("all"))?
        }
        None => "all".to_string(),
    };
    let selected = parse_agent_selection(&selection);
    if selected.is_empty() {
        bail!("No agents selected. Aborting.");
    }
    console.print_field("Selected", &selected.join(", "));

    console.print_step(4, "Generation options");
    let generate_mcp = !args.no_mcp
        && (!interactive || console.confirm("Generate MCP config files?", true)?);
    let generate_ai_files = !args.no_ai_files
        && (!interactive || console.confirm("Generate AI guidelines and skill files?", true)?);
    if !generate_mcp && !generate_ai_files {
        console.print_note("Both disabled, only odoo-boost.json will be created.");
    }

    console.print_step(5, "Generating files");
    let project_path = match args.project {
        Some(path) => std::path::absolute(&path)
            .with_context(|| format!("Invalid project path {}", path.display()))?,
        None => std::env::current_dir().context("Cannot determine working directory")?,
    };

    let config = BoostConfig::new(connection)
        .with_odoo_version(odoo_version)
        .with_agents(selected)
        .with_project_path(project_path.to_string_lossy())
        .with_generation(generate_mcp, generate_ai_files);

    let config_path = save_config(&config, Some(&project_path.join(CONFIG_FILENAME)))?;
    console.print_file_action("Created", relative(&config_path, &project_path));

    let report = sync_agents(&config, &project_path, &McpLauncher::current())?;
    for path in &report.paths {
        console.print_file_action("Created", relative(path, &project_path));
    }

    println!();
    console.print_separator();
    console.print_success("Installation complete!");
    println!("Next steps:");
    println!("  1. Start coding with your AI agent");
    println!("  2. The MCP server will auto-start when your agent needs it");
    println!("  3. Run 'odoo-boost check' to verify the connection anytime");
    println!("  4. Run 'odoo-boost update' to re-sync generated files");
    console.print_separator();
    Ok(())
}

fn update(console: &Console, args: &ConfigArgs) -> anyhow::Result<()> {
    let (config, config_path) = load_config(args.config.as_deref())?;
    let project_path = resolve_project_path(&config, &config_path);

    console.print_heading("Updating Odoo Boost files...");
    if !config.generate_mcp {
        console.print_note("MCP config generation disabled");
    }
    if !config.generate_ai_files {
        console.print_note("AI file generation disabled");
    }

    let report = sync_agents(&config, &project_path, &McpLauncher::current())?;
    for id in &report.skipped {
        console.print_warning(&format!("Unknown agent '{}', skipping.", id));
    }
    for path in &report.paths {
        console.print_file_action("Updated", relative(path, &project_path));
    }

    println!();
    console.print_success("Update complete!");
    Ok(())
}

fn uninstall(console: &Console, args: &ConfigArgs) -> anyhow::Result<()> {
    let (config, config_path) = load_config(args.config.as_deref())?;
    let project_path = resolve_project_path(&config, &config_path);

    console.print_heading("Removing Odoo Boost files...");
    let report = remove_agents(&config, &project_path);
    for id in &report.skipped {
        console.print_warning(&format!("Unknown agent '{}', skipping.", id));
    }
    for path in &report.paths {
        console.print_file_action("Removed", relative(path, &project_path));
    }
    if report.paths.is_empty() {
        console.print_note("Nothing to remove.");
    }

    println!();
    console.print_success("Uninstall complete!");
    console.print_note(&format!(
        "{} was kept; delete it to forget the connection.",
        relative(&config_path, &project_path).display()
    ));
    Ok(())
}

async fn check(console: &Console, args: CheckArgs) -> anyhow::Result<()> {
    let connection = match args.connection {
        ConnectionArgs {
            url: Some(url),
            database: Some(database),
            username,
            password,
        } => ConnectionConfig::new(url, database).with_credentials(
            username.unwrap_or_else(|| DEFAULT_LOGIN.to_string()),
            password.unwrap_or_else(|| DEFAULT_LOGIN.to_string()),
        ),
        _ => {
            let (config, _) = load_config(args.config.config.as_deref()).context(
                "No connection details provided. Pass --url and --database, or run 'odoo-boost install' first",
            )?;
            config.connection
        }
    };

    let conn = create_connection(&connection)?;

    console.print_heading("Checking Odoo connection...");
    let version_info = conn
        .get_version()
        .await
        .context("Failed to reach server")?;
    let server_version =
        text_field(&version_info, "server_version").unwrap_or_else(|| "unknown".to_string());
    console.print_field("Server version", &server_version);

    let uid = conn.authenticate().await.context("Authentication failed")?;
    console.print_field("Authenticated as UID", &uid.to_string());

    match conn
        .search_count("ir.module.module", &Domain::new().with("state", "=", "installed"))
        .await
    {
        Ok(count) => console.print_field("Installed modules", &count.to_string()),
        Err(e) => {
            tracing::warn!("[Cli] Module count failed: {}", e);
            console.print_warning("Could not count installed modules");
        }
    }

    console.print_table(
        "Connection Summary",
        &[
            ("URL", connection.url.clone()),
            ("Database", connection.database.clone()),
            ("Username", connection.username.clone()),
            ("Server Version", server_version),
            ("Protocol", connection.protocol.to_string()),
        ],
    );
    println!();
    console.print_success("Connection successful!");
    Ok(())
}

async fn mcp(args: McpArgs) -> anyhow::Result<()> {
    let (config, config_path) = load_config(args.config.config.as_deref())?;
    tracing::info!("[Cli] Starting MCP server with {}", config_path.display());
    crate::mcp::serve_stdio(config).await
}
