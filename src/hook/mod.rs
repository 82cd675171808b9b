//! Adaptive evaluation hook
//!
//! Driven synchronously by the training loop: `before_epoch` /
//! `before_iter` refresh the evaluation interval from the milestone table,
//! `maybe_evaluate` applies the trigger rule and, when it fires, runs the
//! full evaluation round — normalization-statistic sync, history isolation,
//! distributed forward pass on the EMA shadow, and rank-0 metric/checkpoint
//! handling.

mod context;
mod traits;

pub use context::RunnerContext;
pub use traits::{CheckpointSink, DistRunner, MetricEvaluator};

use crate::config::EvalHookConfig;
use crate::dist::broadcast_norm_buffers;
use crate::error::{ConfigError, EvalHookError};
use crate::model::{EvalModel, HistoryGuard};
use crate::schedule::{EvalTrigger, MilestoneTable};

/// Default eval scratch directory under the training work dir
const EVAL_TMPDIR: &str = ".eval_hook";

/// Adaptive evaluation scheduler
///
/// Owns the cadence state (milestone table, current interval) and the most
/// recent results; everything else arrives by reference in a
/// [`RunnerContext`] per call.
pub struct EvalHook<R> {
    config: EvalHookConfig,
    milestones: Option<MilestoneTable>,
    trigger: EvalTrigger,
    latest_results: Option<Vec<R>>,
}

impl<R> EvalHook<R> {
    /// Build the hook, validating the configuration up front
    pub fn new(config: EvalHookConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let milestones = match &config.dynamic_intervals {
            Some(list) => Some(MilestoneTable::new(config.start_interval, list)?),
            None => None,
        };
        let trigger = EvalTrigger::new(config.start, config.start_interval);
        Ok(Self { config, milestones, trigger, latest_results: None })
    }

    /// Interval currently in effect
    pub fn interval(&self) -> u64 {
        self.trigger.interval()
    }

    /// Results of the most recent evaluation round, if any
    pub fn latest_results(&self) -> Option<&[R]> {
        self.latest_results.as_deref()
    }

    /// Refresh the interval before an epoch (epoch mode only)
    pub fn before_epoch(&mut self, epoch: u64) {
        if self.config.by_epoch {
            self.refresh_interval(epoch);
        }
    }

    /// Refresh the interval before an iteration (iteration mode only)
    pub fn before_iter(&mut self, iter: u64) {
        if !self.config.by_epoch {
            self.refresh_interval(iter);
        }
    }

    fn refresh_interval(&mut self, progress: u64) {
        if let Some(table) = &self.milestones {
            self.trigger.set_interval(table.resolve(progress));
        }
    }

    /// Run an evaluation round if the trigger fires
    ///
    /// Returns `Ok(None)` when this decision point is skipped. Runner and
    /// checkpoint failures propagate, but the primary model's history is
    /// restored on every exit path.
    pub fn maybe_evaluate<M>(
        &mut self,
        ctx: &mut RunnerContext<'_, M, R>,
    ) -> Result<Option<&[R]>, EvalHookError>
    where
        M: EvalModel + ?Sized,
    {
        if self.config.broadcast_bn_buffer {
            broadcast_norm_buffers(ctx.primary, ctx.collective)?;
        }

        if !self.trigger.should_evaluate(ctx.progress, ctx.max_progress) {
            return Ok(None);
        }

        let tmpdir = self
            .config
            .tmpdir
            .clone()
            .unwrap_or_else(|| ctx.work_dir.join(EVAL_TMPDIR));

        // The shadow carries the smoothed weights; evaluate those, never
        // the raw training weights.
        let results = {
            let _guard = HistoryGuard::isolate(ctx.primary, ctx.shadow);
            ctx.runner.run(ctx.shadow, &tmpdir, self.config.gpu_collect)?
        };

        if ctx.collective.is_coordinator() {
            println!("Evaluated {} samples", results.len());
            let key_score = ctx.metrics.evaluate(&results);
            if self.config.save_best {
                if let Some(score) = key_score {
                    ctx.checkpoints.save_best(score)?;
                    println!("Saved best checkpoint (key score {score:.4})");
                }
            }
        }

        self.latest_results = Some(results);
        Ok(self.latest_results.as_deref())
    }
}
