//! Server configuration module.
//!
//! This module provides configuration loading for the car sales server from
//! environment variables.
//!
//! # Environment Variables
//!
//! - `CAR_SALES_DATA_FILE`: CSV snapshot of the sale index (default: `./data/car_sales.csv`)
//! - `CAR_SALES_LISTEN_ADDRESS`: IP address to bind (default: `127.0.0.1`)
//! - `CAR_SALES_LISTEN_PORT`: Port to listen on (default: `3000`)
//!
//! # Invariants
//!
//! - `data_file` is always a non-empty path (it may not exist yet)
//! - `listen_port` is always a valid port number

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

/// Server configuration.
///
/// Contains all configuration parameters needed to run the server and the
/// seeding tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// CSV file holding the snapshot of the sale index.
    pub data_file: PathBuf,
    /// Address to bind the HTTP listener to.
    pub listen_address: IpAddr,
    /// Port to listen on for HTTP requests.
    pub listen_port: u16,
}

/// Error returned when loading configuration fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable is missing.
    MissingEnvVar(String),
    /// An environment variable has an invalid value.
    InvalidValue { name: String, message: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingEnvVar(name) => {
                write!(f, "missing required environment variable: {name}")
            }
            Self::InvalidValue { name, message } => {
                write!(f, "invalid value for {name}: {message}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

const DATA_FILE_VAR: &str = "CAR_SALES_DATA_FILE";
const LISTEN_ADDRESS_VAR: &str = "CAR_SALES_LISTEN_ADDRESS";
const LISTEN_PORT_VAR: &str = "CAR_SALES_LISTEN_PORT";

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(Self::DEFAULT_DATA_FILE),
            listen_address: Self::DEFAULT_ADDRESS,
            listen_port: Self::DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    /// Default port for the server.
    pub const DEFAULT_PORT: u16 = 3000;
    /// Default bind address.
    pub const DEFAULT_ADDRESS: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);
    /// Default snapshot file.
    pub const DEFAULT_DATA_FILE: &'static str = "./data/car_sales.csv";

    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `CAR_SALES_DATA_FILE` is set but empty
    /// - `CAR_SALES_LISTEN_ADDRESS` is set but not an IP address
    /// - `CAR_SALES_LISTEN_PORT` is set but not a valid port number
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    ///
    /// `lookup` returns `None` for unset variables.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            data_file: Self::load_data_file(&lookup)?,
            listen_address: Self::load_listen_address(&lookup)?,
            listen_port: Self::load_listen_port(&lookup)?,
        })
    }

    /// The socket address to bind.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.listen_address, self.listen_port)
    }

    /// Load the snapshot path.
    ///
    /// Returns the default if not set.
    fn load_data_file(lookup: &impl Fn(&str) -> Option<String>) -> Result<PathBuf, ConfigError> {
        match lookup(DATA_FILE_VAR) {
            Some(value) if value.is_empty() => Err(ConfigError::InvalidValue {
                name: DATA_FILE_VAR.to_string(),
                message: "must not be empty".to_string(),
            }),
            Some(value) => Ok(PathBuf::from(value)),
            None => Ok(PathBuf::from(Self::DEFAULT_DATA_FILE)),
        }
    }

    /// Load the bind address.
    ///
    /// Returns the default if not set.
    fn load_listen_address(
        lookup: &impl Fn(&str) -> Option<String>,
    ) -> Result<IpAddr, ConfigError> {
        match lookup(LISTEN_ADDRESS_VAR) {
            Some(value) => value.parse::<IpAddr>().map_err(|_| ConfigError::InvalidValue {
                name: LISTEN_ADDRESS_VAR.to_string(),
                message: format!("'{value}' is not a valid IP address"),
            }),
            None => Ok(Self::DEFAULT_ADDRESS),
        }
    }

    /// Load the listen port.
    ///
    /// Returns the default if not set.
    fn load_listen_port(lookup: &impl Fn(&str) -> Option<String>) -> Result<u16, ConfigError> {
        match lookup(LISTEN_PORT_VAR) {
            Some(value) => value.parse::<u16>().map_err(|_| ConfigError::InvalidValue {
                name: LISTEN_PORT_VAR.to_string(),
                message: format!("'{value}' is not a valid port number (must be 0-65535)"),
            }),
            None => Ok(Self::DEFAULT_PORT),
        }
    }
}
