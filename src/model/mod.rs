//! Model-side abstractions consumed by the evaluation hook
//!
//! The hook never inspects concrete model types. It works through:
//! - `EvalModel` - what any evaluated model must expose
//! - `RecurrentState` - capability of temporal heads carrying history buffers
//! - `HistoryGuard` - scoped save/clear/restore around an evaluation
//! - `DataParallel` - one-level distribution wrapper with an explicit base accessor

mod guard;
mod history;
mod parallel;

use ndarray::ArrayD;

pub use guard::HistoryGuard;
pub use history::{HistoryBuffers, HistorySnapshot, RecurrentState};
pub use parallel::DataParallel;

/// Mutable view of one normalization layer's running statistics
pub struct NormBuffers<'a> {
    pub running_mean: &'a mut ArrayD<f32>,
    pub running_var: &'a mut ArrayD<f32>,
}

/// Interface the evaluation hook requires from a model
pub trait EvalModel {
    /// Recurrent-history capability, `None` when the model is not a
    /// temporal variant or history tracking is disabled
    fn recurrent_state_mut(&mut self) -> Option<&mut dyn RecurrentState> {
        None
    }

    /// Running statistics of every normalization layer that tracks them
    fn norm_buffers_mut(&mut self) -> Vec<NormBuffers<'_>> {
        Vec::new()
    }
}
