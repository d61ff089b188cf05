// checkout_flow/src/orchestrator/execution.rs

//! Contains the resolve algorithm: `resolve`, `resolve_one` and the step-submission
//! flow built on top of them.

use crate::core::cart::SharedCart;
use crate::core::fulfillment::{Fulfilled, RequirementResult};
use crate::core::model::RequirementModel;
use crate::core::outcome::{StepSubmission, WorkflowOutcome};
use crate::core::requirement::Requirement;
use crate::error::CheckoutError;
use crate::orchestrator::definition::CheckoutOrchestrator;
use crate::orchestrator::hooks::EvaluationEvent;
use tracing::{event, instrument, span, Instrument, Level};

impl<TCart, Err> CheckoutOrchestrator<TCart, Err>
where
  TCart: 'static + Send + Sync,
  Err: std::error::Error + From<CheckoutError> + Send + Sync + 'static,
{
  /// Resolves the next step for `action` on `controller`.
  ///
  /// Applicable requirements are checked one at a time, ascending by order, each
  /// awaited before the next starts because a check may change cart state a later
  /// one depends on. The first `Fulfilled::No` stops the evaluation and becomes
  /// `RedirectTo`; later requirements are not checked in this call. If none
  /// applies, or all are `Yes`/`Always`, the outcome is `Proceed`.
  ///
  /// A fault returned by a check is passed through unchanged.
  #[instrument(
        name = "CheckoutOrchestrator::resolve",
        skip_all,
        fields(action = %action, controller = %controller),
        err(Display)
    )]
  pub async fn resolve(
    &self,
    action: &str,
    controller: &str,
    cart: SharedCart<TCart>,
  ) -> Result<WorkflowOutcome<TCart, Err>, Err> {
    let requirements = self.registry.get_applicable(action, controller);
    if requirements.is_empty() {
      event!(Level::DEBUG, "No applicable requirements, proceeding.");
      return Ok(WorkflowOutcome::proceed());
    }

    event!(Level::DEBUG, applicable = requirements.len(), "Resolving checkout requirements.");
    let mut advisories = Vec::new();

    for requirement in requirements {
      let result = self.check_requirement(requirement.as_ref(), cart.clone(), None).await?;

      match result.fulfilled() {
        Fulfilled::No => {
          event!(
            Level::INFO,
            requirement = requirement.name(),
            errors = result.errors().len(),
            "Requirement not fulfilled, redirecting to its step."
          );
          return Ok(WorkflowOutcome::RedirectTo { requirement, result });
        }
        Fulfilled::Yes | Fulfilled::Always => {
          if !result.errors().is_empty() {
            event!(
              Level::WARN,
              requirement = requirement.name(),
              advisories = result.errors().len(),
              "Requirement fulfilled with advisories."
            );
            advisories.extend(result.into_errors());
          }
        }
      }
    }

    event!(Level::DEBUG, "All applicable requirements fulfilled.");
    Ok(WorkflowOutcome::Proceed { advisories })
  }

  /// `resolve` with the configured default controller.
  pub async fn resolve_action(&self, action: &str, cart: SharedCart<TCart>) -> Result<WorkflowOutcome<TCart, Err>, Err> {
    let controller = self.config.default_controller.clone();
    self.resolve(action, &controller, cart).await
  }

  /// Checks a single requirement with the model the customer submitted for it,
  /// bypassing the registry. Used by the step-submission handler to validate and
  /// apply one step's input before resolving again.
  #[instrument(
        name = "CheckoutOrchestrator::resolve_one",
        skip_all,
        fields(requirement = requirement.name(), model_type = model.type_name()),
        err(Display)
    )]
  pub async fn resolve_one(
    &self,
    requirement: &dyn Requirement<TCart, Err>,
    cart: SharedCart<TCart>,
    model: RequirementModel,
  ) -> Result<RequirementResult, Err> {
    self.check_requirement(requirement, cart, Some(&model)).await
  }

  /// `resolve_one` for a registered requirement looked up by name.
  pub async fn resolve_one_by_name(
    &self,
    requirement_name: &str,
    cart: SharedCart<TCart>,
    model: RequirementModel,
  ) -> Result<RequirementResult, Err> {
    let requirement = self.find_requirement(requirement_name)?;
    self.resolve_one(requirement.as_ref(), cart, model).await
  }

  /// Handles a step submission: applies `model` to the named requirement, then
  /// resolves `action` to find the next step.
  ///
  /// The returned outcome always comes from the full resolve, so an earlier
  /// unfulfilled step wins over the one just posted. The posted step's own result
  /// is returned alongside it.
  #[instrument(
        name = "CheckoutOrchestrator::submit",
        skip_all,
        fields(requirement = %requirement_name, action = %action, controller = %controller),
        err(Display)
    )]
  pub async fn submit(
    &self,
    requirement_name: &str,
    action: &str,
    controller: &str,
    cart: SharedCart<TCart>,
    model: RequirementModel,
  ) -> Result<StepSubmission<TCart, Err>, Err> {
    let requirement = self.find_requirement(requirement_name)?;
    let step = self.resolve_one(requirement.as_ref(), cart.clone(), model).await?;

    if !step.is_fulfilled() {
      event!(Level::INFO, errors = step.errors().len(), "Submitted step still not fulfilled.");
    }

    let outcome = self.resolve(action, controller, cart).await?;
    Ok(StepSubmission { step, outcome })
  }

  async fn check_requirement(
    &self,
    requirement: &dyn Requirement<TCart, Err>,
    cart: SharedCart<TCart>,
    model: Option<&RequirementModel>,
  ) -> Result<RequirementResult, Err> {
    let check_span = span!(
      Level::INFO,
      "requirement_check",
      requirement = requirement.name(),
      order = requirement.order(),
      with_model = model.is_some()
    );

    async move {
      event!(Level::TRACE, "Checking requirement.");
      match requirement.check(cart, model).await {
        Ok(result) => {
          event!(
            Level::DEBUG,
            fulfilled = ?result.fulfilled(),
            errors = result.errors().len(),
            "Requirement checked."
          );
          self.notify_evaluated(&EvaluationEvent {
            requirement: requirement.name(),
            order: requirement.order(),
            with_model: model.is_some(),
            result: &result,
          });
          Ok(result)
        }
        Err(e) => {
          event!(Level::ERROR, error = %e, "Requirement check failed.");
          Err(e)
        }
      }
    }
    .instrument(check_span)
    .await
  }
}
