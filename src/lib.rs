//! evaluar - adaptive evaluation scheduling for distributed training loops
//!
//! Decides at each epoch or iteration boundary whether a costly distributed
//! evaluation pass should run, adapting the cadence through a milestone
//! schedule, and isolates the model's recurrent history buffers around each
//! pass so evaluation neither corrupts nor is corrupted by training-time
//! temporal state.
//!
//! The training loop drives the hook synchronously and passes everything it
//! needs per call:
//!
//! ```ignore
//! use evaluar::{EvalHook, EvalHookConfig, RunnerContext};
//!
//! let config = EvalHookConfig::new(5)
//!     .dynamic_intervals(vec![(10, 2), (20, 1)])
//!     .save_best(true);
//! let mut hook = EvalHook::new(config)?;
//!
//! for epoch in 0..max_epochs {
//!     hook.before_epoch(epoch);
//!     train_one_epoch(&mut model);
//!     let mut ctx = RunnerContext { /* models, runner, collaborators */ };
//!     if let Some(results) = hook.maybe_evaluate(&mut ctx)? {
//!         println!("evaluated {} samples", results.len());
//!     }
//! }
//! ```
//!
//! The distributed forward pass, metric computation, and checkpoint writing
//! stay with the host stack behind the `DistRunner`, `MetricEvaluator`, and
//! `CheckpointSink` traits; evaluation always runs the EMA shadow model,
//! never the raw training weights.

pub mod config;
pub mod dist;
pub mod error;
pub mod hook;
pub mod model;
pub mod schedule;

pub use config::EvalHookConfig;
pub use dist::{broadcast_norm_buffers, Collective, SingleProcess, COORDINATOR_RANK};
pub use error::{CollectiveError, ConfigError, EvalHookError, Result};
pub use hook::{CheckpointSink, DistRunner, EvalHook, MetricEvaluator, RunnerContext};
pub use model::{
    DataParallel, EvalModel, HistoryBuffers, HistoryGuard, HistorySnapshot, NormBuffers,
    RecurrentState,
};
pub use schedule::{EvalTrigger, MilestoneTable};
