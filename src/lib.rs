pub mod config;
pub mod connection;
pub mod core;

// Project file generation
pub mod agents;
pub mod guidelines;
pub mod skills;

// MCP server and the tools it serves
pub mod mcp;
pub mod tools;

pub mod cli;
pub mod logging;

pub use crate::core::{BoostError, BoostResult};
