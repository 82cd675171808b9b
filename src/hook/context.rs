//! Per-call context handed to the hook by the training loop

use std::path::Path;

use super::traits::{CheckpointSink, DistRunner, MetricEvaluator};
use crate::dist::Collective;

/// Borrowed view of the training loop's state and collaborators
///
/// The hook reads everything it needs from here and holds nothing between
/// calls; the loop rebuilds the context (cheaply, all borrows) at every
/// decision point.
pub struct RunnerContext<'a, M: ?Sized, R> {
    /// Current progress counter: epoch index in epoch mode, else iteration
    pub progress: u64,
    /// Total planned progress in the same unit
    pub max_progress: u64,
    /// Training work directory, parent of the default eval scratch dir
    pub work_dir: &'a Path,
    /// The model being trained
    pub primary: &'a mut M,
    /// Exponential-moving-average shadow of the primary; this is what gets
    /// evaluated
    pub shadow: &'a mut M,
    /// Distributed test runner
    pub runner: &'a mut dyn DistRunner<M, R>,
    /// Key-score computation over gathered results
    pub metrics: &'a mut dyn MetricEvaluator<R>,
    /// Best-checkpoint writer
    pub checkpoints: &'a mut dyn CheckpointSink,
    /// Distributed runtime handle
    pub collective: &'a dyn Collective,
}
