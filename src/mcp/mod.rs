//! MCP (Model Context Protocol) server
//!
//! Serves the Odoo tools to AI agents over stdio.
//!
//! # Architecture
//!
//! - `ServerContext`: authenticated connection plus project config, created once
//! - `OdooBoostServer`: rmcp `ServerHandler` routing calls into the `ToolRegistry`
//!
//! stdout carries the protocol, so all logging must go to stderr or a file.

mod context;
mod server;

use std::sync::Arc;

use anyhow::Context as _;
use rmcp::ServiceExt;

use crate::config::BoostConfig;
use crate::connection::create_connection;
use crate::tools::default_registry;

pub use context::ServerContext;
pub use server::OdooBoostServer;

/// Connect to Odoo and build the server for `config`
pub async fn build_server(config: BoostConfig) -> anyhow::Result<OdooBoostServer> {
    let connection = create_connection(&config.connection)?;
    let uid = connection
        .authenticate()
        .await
        .with_context(|| format!("Cannot log in to {}", config.connection.url))?;
    tracing::info!(
        "[McpServer] Authenticated on {} (db {}) as uid {}",
        config.connection.url,
        config.connection.database,
        uid
    );

    let ctx = ServerContext::new(Arc::from(connection), config);
    Ok(OdooBoostServer::new(ctx, default_registry()))
}

/// Serve the tools over stdio until the client disconnects
pub async fn serve_stdio(config: BoostConfig) -> anyhow::Result<()> {
    let server = build_server(config).await?;

    let service = server
        .serve(rmcp::transport::stdio())
        .await
        .inspect_err(|e| {
            tracing::error!("[McpServer] Failed to start MCP service: {}", e);
        })?;

    tracing::info!("[McpServer] Odoo Boost MCP server running");
    service.waiting().await?;
    tracing::info!("[McpServer] Odoo Boost MCP server shutting down");

    Ok(())
}
