// checkout_flow/src/core/outcome.rs

//! Defines `WorkflowOutcome`, the single next-action decision produced by the orchestrator.

use crate::config::CheckoutConfig;
use crate::core::fulfillment::{RequirementResult, WorkflowError};
use crate::core::requirement::{ActionDescriptor, RequirementRef};
use crate::error::CheckoutError;
use std::fmt;

/// Outcome of resolving a checkout action against the registered requirements.
pub enum WorkflowOutcome<TCart, Err = CheckoutError>
where
  TCart: 'static + Send + Sync,
  Err: std::error::Error + From<CheckoutError> + Send + Sync + 'static,
{
  /// Every applicable requirement is fulfilled; confirmation is reachable.
  /// `advisories` holds the non-blocking errors reported alongside `Yes`/`Always`,
  /// in evaluation order.
  Proceed { advisories: Vec<WorkflowError> },
  /// The first requirement that returned `Fulfilled::No`, with its result.
  RedirectTo {
    requirement: RequirementRef<TCart, Err>,
    result: RequirementResult,
  },
}

impl<TCart, Err> WorkflowOutcome<TCart, Err>
where
  TCart: 'static + Send + Sync,
  Err: std::error::Error + From<CheckoutError> + Send + Sync + 'static,
{
  pub fn proceed() -> Self {
    WorkflowOutcome::Proceed { advisories: Vec::new() }
  }

  pub fn is_proceed(&self) -> bool {
    matches!(self, WorkflowOutcome::Proceed { .. })
  }

  /// The blocking requirement, if any.
  pub fn redirect_target(&self) -> Option<&RequirementRef<TCart, Err>> {
    match self {
      WorkflowOutcome::Proceed { .. } => None,
      WorkflowOutcome::RedirectTo { requirement, .. } => Some(requirement),
    }
  }

  /// Errors to show the customer: the blocking requirement's errors on redirect,
  /// the aggregated advisories otherwise.
  pub fn errors(&self) -> &[WorkflowError] {
    match self {
      WorkflowOutcome::Proceed { advisories } => advisories,
      WorkflowOutcome::RedirectTo { result, .. } => result.errors(),
    }
  }

  /// The one descriptor the HTTP layer should act on next.
  pub fn next_action(&self, config: &CheckoutConfig) -> ActionDescriptor {
    match self {
      WorkflowOutcome::Proceed { .. } => config.confirm_descriptor(),
      WorkflowOutcome::RedirectTo { requirement, .. } => requirement.fulfill_action(),
    }
  }
}

impl<TCart, Err> fmt::Debug for WorkflowOutcome<TCart, Err>
where
  TCart: 'static + Send + Sync,
  Err: std::error::Error + From<CheckoutError> + Send + Sync + 'static,
{
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      WorkflowOutcome::Proceed { advisories } => f.debug_struct("Proceed").field("advisories", advisories).finish(),
      WorkflowOutcome::RedirectTo { requirement, result } => f
        .debug_struct("RedirectTo")
        .field("requirement", &requirement.name())
        .field("order", &requirement.order())
        .field("result", result)
        .finish(),
    }
  }
}

/// Result of a step submission: what the posted step reported for the submitted
/// model, and where the customer goes next.
///
/// `outcome` always comes from a full resolve, so it names the first unfulfilled
/// requirement even when that is an earlier step than the one posted.
pub struct StepSubmission<TCart, Err = CheckoutError>
where
  TCart: 'static + Send + Sync,
  Err: std::error::Error + From<CheckoutError> + Send + Sync + 'static,
{
  pub step: RequirementResult,
  pub outcome: WorkflowOutcome<TCart, Err>,
}

impl<TCart, Err> StepSubmission<TCart, Err>
where
  TCart: 'static + Send + Sync,
  Err: std::error::Error + From<CheckoutError> + Send + Sync + 'static,
{
  /// Errors the posted form produced, to render next to its fields when the
  /// outcome sends the customer back to that same step.
  pub fn step_errors(&self) -> &[WorkflowError] {
    self.step.errors()
  }

  pub fn into_outcome(self) -> WorkflowOutcome<TCart, Err> {
    self.outcome
  }
}

impl<TCart, Err> fmt::Debug for StepSubmission<TCart, Err>
where
  TCart: 'static + Send + Sync,
  Err: std::error::Error + From<CheckoutError> + Send + Sync + 'static,
{
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("StepSubmission")
      .field("step", &self.step)
      .field("outcome", &self.outcome)
      .finish()
  }
}
