use thiserror::Error;

/// Startup errors for GraphLink.
///
/// Anything surfaced here is fatal: the process exits before serving.
#[derive(Error, Debug)]
pub enum GraphLinkError {
    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, GraphLinkError>;
