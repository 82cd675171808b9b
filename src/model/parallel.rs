//! One-level distribution wrapper

use super::history::RecurrentState;
use super::{EvalModel, NormBuffers};

/// Wrapper a data-distributed runtime puts around the real module
///
/// The hook never reaches through wrapper internals; the wrapper exposes an
/// explicit base-module accessor and forwards the `EvalModel` interface, so
/// wrapped and bare models behave identically at evaluation time.
#[derive(Clone, Debug)]
pub struct DataParallel<M> {
    module: M,
}

impl<M> DataParallel<M> {
    /// Wrap a module
    pub fn new(module: M) -> Self {
        Self { module }
    }

    /// The underlying module
    pub fn base(&self) -> &M {
        &self.module
    }

    /// The underlying module, mutably
    pub fn base_mut(&mut self) -> &mut M {
        &mut self.module
    }

    /// Unwrap, consuming the wrapper
    pub fn into_inner(self) -> M {
        self.module
    }
}

impl<M: EvalModel> EvalModel for DataParallel<M> {
    fn recurrent_state_mut(&mut self) -> Option<&mut dyn RecurrentState> {
        self.module.recurrent_state_mut()
    }

    fn norm_buffers_mut(&mut self) -> Vec<NormBuffers<'_>> {
        self.module.norm_buffers_mut()
    }
}
