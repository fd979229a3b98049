//! Configuration for odoo-boost
//!
//! - `BoostConfig` / `ConnectionConfig` - the persisted model
//! - `find_config_path` / `load_config` / `save_config` - file discovery and I/O

mod schema;
mod settings;

pub use schema::{BoostConfig, ConnectionConfig, Protocol};
pub use settings::{
    find_config_path, load_config, resolve_project_path, save_config, CONFIG_FILENAME,
};
