use crate::config::{ConnectionConfig, Protocol};
use crate::core::{BoostError, BoostResult};

use super::{OdooConnection, XmlRpcConnection};

/// Create an Odoo connection for the configured protocol
pub fn create_connection(config: &ConnectionConfig) -> BoostResult<Box<dyn OdooConnection>> {
    match &config.protocol {
        Protocol::Xmlrpc => Ok(Box::new(XmlRpcConnection::new(
            config.url.clone(),
            config.database.clone(),
            config.username.clone(),
            config.password.clone(),
        ))),
        Protocol::Unsupported(tag) => Err(BoostError::config(format!(
            "Unsupported protocol: {}",
            tag
        ))),
    }
}
