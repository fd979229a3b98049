//! Tool system for the MCP server
//!
//! This module provides:
//! - `Tool` trait - Interface implemented by every tool
//! - `ToolRegistry` - Registry of the tools served to clients
//! - `odoo` - The Odoo introspection tools

mod registry;
pub mod tool;

/// Odoo introspection tools
pub mod odoo;

pub use registry::ToolRegistry;
pub use tool::{parse_params, schema_of, Tool, ToolDefinition};

/// Registry holding every Odoo tool, in the order they are advertised
pub fn default_registry() -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(odoo::ApplicationInfo);
    registry.register(odoo::DatabaseSchema);
    registry.register(odoo::DatabaseQuery);
    registry.register(odoo::ListModels);
    registry.register(odoo::ListViews);
    registry.register(odoo::ListMenus);
    registry.register(odoo::ListRoutes);
    registry.register(odoo::ListAccessRights);
    registry.register(odoo::GetConfig);
    registry.register(odoo::GetModuleInfo);
    registry.register(odoo::SearchRecords);
    registry.register(odoo::ExecuteMethod);
    registry.register(odoo::ReadLogEntries);
    registry.register(odoo::SearchDocs);
    registry.register(odoo::ListWorkflows);
    registry
}
