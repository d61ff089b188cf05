// checkout_flow/src/orchestrator/hooks.rs

//! Observers notified after every requirement check the orchestrator performs.
//! Typical use is collecting the steps reported as `Fulfilled::Always` so a progress
//! indicator can hide them, without the orchestrator knowing about rendering.

use crate::core::fulfillment::RequirementResult;
use crate::error::CheckoutError;
use crate::orchestrator::definition::CheckoutOrchestrator;
use std::sync::Arc;
use tracing::{event, Level};

/// What a hook sees after one successful check.
#[derive(Debug, Clone, Copy)]
pub struct EvaluationEvent<'a> {
  pub requirement: &'a str,
  pub order: i32,
  /// Whether the check received a submitted model (i.e. came from `resolve_one`).
  pub with_model: bool,
  pub result: &'a RequirementResult,
}

/// Hooks are synchronous and must not block.
pub type EvaluationHook = Arc<dyn Fn(&EvaluationEvent<'_>) + Send + Sync>;

impl<TCart, Err> CheckoutOrchestrator<TCart, Err>
where
  TCart: 'static + Send + Sync,
  Err: std::error::Error + From<CheckoutError> + Send + Sync + 'static,
{
  /// Registers a hook run after each requirement check, in registration order.
  /// Faulted checks do not reach hooks.
  pub fn on_evaluated(&mut self, hook: impl Fn(&EvaluationEvent<'_>) + Send + Sync + 'static) {
    self.hooks.push(Arc::new(hook));
    event!(Level::DEBUG, hooks = self.hooks.len(), "Evaluation hook registered.");
  }

  pub(crate) fn notify_evaluated(&self, event: &EvaluationEvent<'_>) {
    for hook in &self.hooks {
      hook(event);
    }
  }
}
