use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to read config {path}: {1}", path = .0.display())]
    ConfigRead(PathBuf, #[source] io::Error),

    #[error("failed to parse config {path}: {1}", path = .0.display())]
    ConfigParse(PathBuf, #[source] toml::de::Error),

    #[error("failed to write export {path}: {1}", path = .0.display())]
    Export(PathBuf, #[source] io::Error),

    #[error("failed to start {0} thread: {1}")]
    Spawn(&'static str, #[source] io::Error),

    #[error("terminal I/O failed: {0}")]
    Terminal(#[from] io::Error),
}
