//! Evaluation hook configuration

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Configuration for the adaptive evaluation hook
///
/// `dynamic_intervals` is an ordered list of `(milestone, interval)` pairs;
/// once training progress reaches a milestone, evaluation runs every
/// `interval` epochs (or iterations in iteration mode) until the next
/// milestone. Absent, the cadence stays at `start_interval` throughout.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalHookConfig {
    /// Evaluation interval before the first milestone
    pub start_interval: u64,
    /// Optional `(milestone, interval)` schedule, milestones strictly increasing
    pub dynamic_intervals: Option<Vec<(u64, u64)>>,
    /// First progress point eligible for evaluation (None = from the beginning)
    pub start: Option<u64>,
    /// Count progress in epochs rather than iterations
    pub by_epoch: bool,
    /// Broadcast rank-0 normalization statistics before evaluating
    pub broadcast_bn_buffer: bool,
    /// Save a checkpoint when the key metric is the best seen
    pub save_best: bool,
    /// Scratch directory for result collection (default: `<work_dir>/.eval_hook`)
    pub tmpdir: Option<PathBuf>,
    /// Gather results on the accelerator instead of through the filesystem
    pub gpu_collect: bool,
}

impl Default for EvalHookConfig {
    fn default() -> Self {
        Self {
            start_interval: 1,
            dynamic_intervals: None,
            start: None,
            by_epoch: true,
            broadcast_bn_buffer: true,
            save_best: false,
            tmpdir: None,
            gpu_collect: false,
        }
    }
}

impl EvalHookConfig {
    /// Create a config with the given base interval
    pub fn new(start_interval: u64) -> Self {
        Self { start_interval, ..Default::default() }
    }

    /// Set the dynamic `(milestone, interval)` schedule
    pub fn dynamic_intervals(mut self, intervals: Vec<(u64, u64)>) -> Self {
        self.dynamic_intervals = Some(intervals);
        self
    }

    /// Set the first progress point eligible for evaluation
    pub fn start(mut self, start: u64) -> Self {
        self.start = Some(start);
        self
    }

    /// Count progress in epochs (true) or iterations (false)
    pub fn by_epoch(mut self, by_epoch: bool) -> Self {
        self.by_epoch = by_epoch;
        self
    }

    /// Enable or disable rank-0 normalization-statistic broadcast
    pub fn broadcast_bn_buffer(mut self, broadcast: bool) -> Self {
        self.broadcast_bn_buffer = broadcast;
        self
    }

    /// Enable best-checkpoint saving
    pub fn save_best(mut self, save: bool) -> Self {
        self.save_best = save;
        self
    }

    /// Override the scratch directory for result collection
    pub fn tmpdir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.tmpdir = Some(dir.into());
        self
    }

    /// Gather results on the accelerator
    pub fn gpu_collect(mut self, gpu: bool) -> Self {
        self.gpu_collect = gpu;
        self
    }

    /// Fail fast on malformed configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.start_interval == 0 {
            return Err(ConfigError::ZeroStartInterval);
        }
        if self.start == Some(0) {
            return Err(ConfigError::ZeroStart);
        }
        if let Some(intervals) = &self.dynamic_intervals {
            let mut prev: Option<u64> = None;
            for &(milestone, interval) in intervals {
                if milestone == 0 {
                    return Err(ConfigError::ZeroMilestone);
                }
                if interval == 0 {
                    return Err(ConfigError::ZeroInterval(milestone));
                }
                if let Some(p) = prev {
                    if milestone <= p {
                        return Err(ConfigError::NonIncreasingMilestones {
                            prev: p,
                            next: milestone,
                        });
                    }
                }
                prev = Some(milestone);
            }
        }
        Ok(())
    }
}
