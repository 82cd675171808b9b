//! Distributed-runtime plumbing
//!
//! The hook participates in multi-process training without owning it: it
//! reads its rank and world size from a `Collective` and issues a handful
//! of broadcasts to line up normalization statistics before evaluating.

use crate::error::CollectiveError;
use crate::model::EvalModel;

/// Rank of the coordinating process (logging, checkpointing)
pub const COORDINATOR_RANK: usize = 0;

/// Collective-communication primitive provided by the distributed runtime
pub trait Collective {
    /// This process's rank
    fn rank(&self) -> usize;

    /// Number of participating processes
    fn world_size(&self) -> usize;

    /// Broadcast `buffer` from `source_rank` to every process
    ///
    /// Failures are fatal to the caller; the hook performs no retry.
    fn broadcast(&self, buffer: &mut [f32], source_rank: usize) -> Result<(), CollectiveError>;

    /// Whether this process does logging and checkpointing
    fn is_coordinator(&self) -> bool {
        self.rank() == COORDINATOR_RANK
    }
}

/// Trivial collective for non-distributed runs and tests
#[derive(Clone, Copy, Debug, Default)]
pub struct SingleProcess;

impl Collective for SingleProcess {
    fn rank(&self) -> usize {
        0
    }

    fn world_size(&self) -> usize {
        1
    }

    fn broadcast(&self, _buffer: &mut [f32], source_rank: usize) -> Result<(), CollectiveError> {
        if source_rank != 0 {
            return Err(CollectiveError::RankOutOfRange { rank: source_rank, world_size: 1 });
        }
        Ok(())
    }
}

/// Broadcast rank-0's running mean/var of every tracking normalization layer
///
/// Data-distributed training keeps per-rank running statistics; left alone
/// they drift apart and skew evaluation. A no-op in single-process runs.
pub fn broadcast_norm_buffers<M>(
    model: &mut M,
    collective: &dyn Collective,
) -> Result<(), CollectiveError>
where
    M: EvalModel + ?Sized,
{
    if collective.world_size() <= 1 {
        return Ok(());
    }
    for buffers in model.norm_buffers_mut() {
        for array in [buffers.running_mean, buffers.running_var] {
            let slice = array.as_slice_mut().ok_or_else(|| {
                CollectiveError::Broadcast("running-stat buffer is not contiguous".to_string())
            })?;
            collective.broadcast(slice, COORDINATOR_RANK)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NormBuffers;
    use ndarray::ArrayD;
    use std::cell::RefCell;

    struct NormModel {
        mean: ArrayD<f32>,
        var: ArrayD<f32>,
    }

    impl NormModel {
        fn new() -> Self {
            Self {
                mean: ArrayD::from_elem(ndarray::IxDyn(&[4]), 0.5),
                var: ArrayD::from_elem(ndarray::IxDyn(&[4]), 1.0),
            }
        }
    }

    impl EvalModel for NormModel {
        fn norm_buffers_mut(&mut self) -> Vec<NormBuffers<'_>> {
            vec![NormBuffers { running_mean: &mut self.mean, running_var: &mut self.var }]
        }
    }

    /// Records broadcast calls and overwrites buffers with a marker value
    struct RecordingCollective {
        rank: usize,
        world_size: usize,
        calls: RefCell<Vec<usize>>,
    }

    impl Collective for RecordingCollective {
        fn rank(&self) -> usize {
            self.rank
        }

        fn world_size(&self) -> usize {
            self.world_size
        }

        fn broadcast(&self, buffer: &mut [f32], source_rank: usize) -> Result<(), CollectiveError> {
            self.calls.borrow_mut().push(source_rank);
            buffer.fill(9.0);
            Ok(())
        }
    }

    #[test]
    fn test_single_process_broadcast_is_a_no_op() {
        let collective = SingleProcess;
        assert!(collective.is_coordinator());
        assert_eq!(collective.world_size(), 1);

        let mut buffer = [1.0, 2.0];
        collective.broadcast(&mut buffer, 0).unwrap();
        assert_eq!(buffer, [1.0, 2.0]);
    }

    #[test]
    fn test_single_process_rejects_foreign_source_rank() {
        let err = SingleProcess.broadcast(&mut [0.0], 1).unwrap_err();
        assert!(matches!(err, CollectiveError::RankOutOfRange { rank: 1, world_size: 1 }));
    }

    #[test]
    fn test_broadcast_norm_buffers_covers_mean_and_var() {
        let mut model = NormModel::new();
        let collective =
            RecordingCollective { rank: 1, world_size: 2, calls: RefCell::new(Vec::new()) };

        broadcast_norm_buffers(&mut model, &collective).unwrap();

        assert_eq!(*collective.calls.borrow(), vec![COORDINATOR_RANK, COORDINATOR_RANK]);
        assert!(model.mean.iter().all(|&v| v == 9.0));
        assert!(model.var.iter().all(|&v| v == 9.0));
    }

    #[test]
    fn test_broadcast_skipped_in_single_process_world() {
        let mut model = NormModel::new();
        let collective =
            RecordingCollective { rank: 0, world_size: 1, calls: RefCell::new(Vec::new()) };

        broadcast_norm_buffers(&mut model, &collective).unwrap();

        assert!(collective.calls.borrow().is_empty());
        assert!(model.mean.iter().all(|&v| v == 0.5));
    }
}
