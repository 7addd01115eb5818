use thiserror::Error;

/// Contract violations surfaced by the furnace core.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FurnaceError {
    /// Wide enough to report any signed or unsigned raw action verbatim.
    #[error("invalid action {0}: expected 0 (heat) or 1 (cool)")]
    InvalidAction(i128),

    #[error("episode already ended after {max_steps} steps, reset before stepping again")]
    EpisodeEnded { max_steps: u64 },

    #[error("invalid furnace configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to read or write network weights: {0}")]
    Weights(String),
}

pub type Result<T> = std::result::Result<T, FurnaceError>;
