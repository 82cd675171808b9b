//! Error types for the evaluation scheduler

use thiserror::Error;

/// Configuration errors, raised at hook construction
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("start_interval must be positive")]
    ZeroStartInterval,

    #[error("dynamic interval at milestone {0} must be positive")]
    ZeroInterval(u64),

    #[error("milestones must be strictly increasing: {prev} followed by {next}")]
    NonIncreasingMilestones { prev: u64, next: u64 },

    #[error("milestone 0 would shadow the start interval")]
    ZeroMilestone,

    #[error("start must be positive when set")]
    ZeroStart,
}

/// Collective-communication errors; fatal, never retried
#[derive(Debug, Error)]
pub enum CollectiveError {
    #[error("source rank {rank} out of range for world size {world_size}")]
    RankOutOfRange { rank: usize, world_size: usize },

    #[error("broadcast failed: {0}")]
    Broadcast(String),
}

/// Errors surfaced by the evaluation hook
#[derive(Debug, Error)]
pub enum EvalHookError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Collective(#[from] CollectiveError),

    #[error("distributed test run failed: {0}")]
    Runner(String),

    #[error("checkpoint save failed: {0}")]
    Checkpoint(String),
}

/// Result type for hook operations
pub type Result<T> = std::result::Result<T, EvalHookError>;
