// Error types for default gateway discovery

use thiserror::Error;

/// Main error type for gateway discovery
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Default gateway not found")]
    NotFound,

    #[error("Malformed gateway address: {0:?}")]
    MalformedAddress(String),

    #[error("Malformed route entry on line {line}: {reason}")]
    MalformedRouteEntry { line: usize, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to execute command: {0}")]
    CommandExecution(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias using GatewayError
pub type GatewayResult<T> = Result<T, GatewayError>;

impl GatewayError {
    /// Convert error to user-friendly message
    pub fn user_message(&self) -> String {
        match self {
            GatewayError::NotFound => {
                "No default route found. Check that the machine has network connectivity.".to_string()
            }
            GatewayError::MalformedAddress(addr) => {
                format!("The routing table lists an unreadable gateway ({}). Only IPv4 gateways are supported.", addr)
            }
            GatewayError::MalformedRouteEntry { line, .. } => {
                format!("Routing table entry on line {} could not be decoded.", line)
            }
            GatewayError::Io(_) => {
                "Failed to read routing table. Please ensure you have proper permissions.".to_string()
            }
            GatewayError::CommandExecution(detail) => {
                format!(
                    "Failed to run the routing table command ({}). Check that netstat is installed or set --netstat-cmd.",
                    detail
                )
            }
            GatewayError::Config(_) => {
                "Configuration error. Check your config file or command-line arguments.".to_string()
            }
            GatewayError::Serialization(_) => {
                "Data format error. This might be a bug, please report it.".to_string()
            }
        }
    }
}
