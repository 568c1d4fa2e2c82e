use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum StopwatchError {
    /// The request is not valid in the current run state. No state changed.
    #[error("invalid state: {0}")]
    InvalidState(&'static str),
}
