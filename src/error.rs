use thiserror::Error;

#[derive(Error, Debug)]
pub enum CheckerError {
    #[error("AUR request failed: {0}")]
    AurRequest(String),

    #[error("Package not found: {0}")]
    PackageNotFound(String),

    #[error("Failed to download package: {0}")]
    DownloadFailed(String),

    #[error("Invalid package name: {0:?}")]
    InvalidPackageName(String),

    #[error("{0}")]
    InvalidCliOption(String),

    #[error("Pacman command failed: {0}")]
    PacmanFailed(String),

    #[error("vercmp failed: {0}")]
    VercmpFailed(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, CheckerError>;
