use anyhow::{anyhow, Result};
use std::env;

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0";
const DEFAULT_HTTP_PORT: &str = "8000";

/// Server settings read from the environment
#[derive(Debug, Clone)]
pub struct Config {
    /// Interface to listen on
    pub bind_address: String,
    /// TCP port to listen on
    pub http_port: u16,
}

impl Config {
    /// Reads `BIND_ADDRESS` and `HTTP_PORT`, falling back to defaults.
    pub fn from_env() -> Result<Self> {
        let bind_address = env::var("BIND_ADDRESS")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDRESS.to_string());
        let bind_address = if bind_address.trim().is_empty() {
            DEFAULT_BIND_ADDRESS.to_string()
        } else {
            bind_address.trim().to_string()
        };

        let port_str = env::var("HTTP_PORT")
            .unwrap_or_else(|_| DEFAULT_HTTP_PORT.to_string());
        let http_port = port_str.trim()
            .parse()
            .map_err(|_| anyhow!("Invalid HTTP_PORT"))?;

        Ok(Config {
            bind_address,
            http_port,
        })
    }

    /// `address:port` string for binding the listener
    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.bind_address, self.http_port)
    }
}
