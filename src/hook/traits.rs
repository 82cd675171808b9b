//! Collaborator interfaces the hook delegates to
//!
//! The heavy machinery — the distributed forward pass, metric computation,
//! checkpoint writing — belongs to the host training stack. The hook only
//! decides when to call it and with which model.

use std::path::Path;

use crate::error::EvalHookError;

/// Distributed test runner: forward pass over the eval set, results gathered
/// in sample order across ranks
pub trait DistRunner<M: ?Sized, R> {
    /// Run evaluation with `model`, collecting results through `tmpdir`
    /// unless `gpu_collect` gathers them on-device
    fn run(&mut self, model: &mut M, tmpdir: &Path, gpu_collect: bool)
        -> Result<Vec<R>, EvalHookError>;
}

/// Computes the scalar key score from gathered results
///
/// `None` means no score this round; not an error, checkpoint saving is
/// simply skipped.
pub trait MetricEvaluator<R> {
    fn evaluate(&mut self, results: &[R]) -> Option<f64>;
}

/// Saves a best-so-far checkpoint keyed by the metric score
pub trait CheckpointSink {
    fn save_best(&mut self, key_score: f64) -> Result<(), EvalHookError>;
}
