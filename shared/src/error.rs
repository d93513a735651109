use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse drag config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("candidate selector must not be empty")]
    EmptySelector,
    #[error("invalid active class name {0:?}")]
    InvalidClassName(String),
}

/// Failures reported by a [`crate::PointerSource`] implementation
#[derive(Debug, Error)]
pub enum HostError {
    #[error("no document is available")]
    NoDocument,
    #[error("invalid candidate selector {selector:?}: {reason}")]
    InvalidSelector { selector: String, reason: String },
    #[error("failed to register {event} listener: {reason}")]
    Listener { event: String, reason: String },
}

#[derive(Debug, Error)]
pub enum BindError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Host(#[from] HostError),
}
