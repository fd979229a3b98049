//! Configuration model persisted in `odoo-boost.json`

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::{BoostError, BoostResult};

/// Wire protocol used to reach the Odoo server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    /// XML-RPC over HTTP (`/xmlrpc/2/common` and `/xmlrpc/2/object`)
    #[default]
    Xmlrpc,

    /// Any tag this build does not know; kept verbatim so it can be reported
    #[serde(untagged)]
    Unsupported(String),
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Protocol::Xmlrpc => f.write_str("xmlrpc"),
            Protocol::Unsupported(tag) => f.write_str(tag),
        }
    }
}

/// Odoo server connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Odoo server URL, e.g. http://localhost:8069
    pub url: String,

    /// Database name
    pub database: String,

    /// Login username
    #[serde(default = "default_credential")]
    pub username: String,

    /// Login password or API key
    #[serde(default = "default_credential")]
    pub password: String,

    /// Connection protocol
    #[serde(default)]
    pub protocol: Protocol,
}

fn default_credential() -> String {
    "admin".to_string()
}

impl ConnectionConfig {
    /// Create connection settings with the default `admin`/`admin` credentials
    pub fn new(url: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            database: database.into(),
            username: default_credential(),
            password: default_credential(),
            protocol: Protocol::Xmlrpc,
        }
    }

    /// Set the login credentials
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = username.into();
        self.password = password.into();
        self
    }

    /// Set the protocol
    pub fn with_protocol(mut self, protocol: Protocol) -> Self {
        self.protocol = protocol;
        self
    }

    /// Check the invariants that deserialization alone cannot express
    pub fn validate(&self) -> BoostResult<()> {
        if self.url.trim().is_empty() {
            return Err(BoostError::config("connection url must not be empty"));
        }
        if self.database.trim().is_empty() {
            return Err(BoostError::config("connection database must not be empty"));
        }
        Ok(())
    }
}

/// Root configuration stored in `odoo-boost.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoostConfig {
    /// Odoo server connection
    pub connection: ConnectionConfig,

    /// Detected Odoo version series (e.g. "17.0", "18.0", "19.0")
    #[serde(default)]
    pub odoo_version: Option<String>,

    /// Enabled agent identifiers, in the order they were selected
    #[serde(default)]
    pub agents: Vec<String>,

    /// Path to the Odoo project root
    #[serde(default = "default_project_path")]
    pub project_path: String,

    /// Whether to write MCP tool-config files
    #[serde(default = "default_enabled")]
    pub generate_mcp: bool,

    /// Whether to write guidelines and skill files
    #[serde(default = "default_enabled")]
    pub generate_ai_files: bool,
}

fn default_project_path() -> String {
    ".".to_string()
}

fn default_enabled() -> bool {
    true
}

impl BoostConfig {
    /// Create a configuration with defaults for everything but the connection
    pub fn new(connection: ConnectionConfig) -> Self {
        Self {
            connection,
            odoo_version: None,
            agents: Vec::new(),
            project_path: default_project_path(),
            generate_mcp: true,
            generate_ai_files: true,
        }
    }

    /// Set the detected Odoo version
    pub fn with_odoo_version(mut self, version: impl Into<String>) -> Self {
        self.odoo_version = Some(version.into());
        self
    }

    /// Set the enabled agents
    pub fn with_agents<I, S>(mut self, agents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.agents = agents.into_iter().map(Into::into).collect();
        self
    }

    /// Set the project path
    pub fn with_project_path(mut self, path: impl Into<String>) -> Self {
        self.project_path = path.into();
        self
    }

    /// Set both generation toggles
    pub fn with_generation(mut self, generate_mcp: bool, generate_ai_files: bool) -> Self {
        self.generate_mcp = generate_mcp;
        self.generate_ai_files = generate_ai_files;
        self
    }

    /// Validate the nested connection settings
    pub fn validate(&self) -> BoostResult<()> {
        self.connection.validate()
    }
}
