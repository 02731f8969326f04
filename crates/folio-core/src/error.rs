use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Content error: {0}")]
    Content(String),

    #[error("Missing message: {0}")]
    MissingMessage(String),

    #[error("Reveal target '{key}' must be a plain string, found {found}")]
    RevealTarget { key: String, found: &'static str },

    #[error("Invalid scroll window: {0}")]
    InvalidWindow(String),
}

pub type Result<T> = std::result::Result<T, Error>;
