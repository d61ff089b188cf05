// checkout_flow/src/lib.rs

//! checkout_flow: deterministic, pluggable checkout requirement orchestration.
//!
//! A checkout is guarded by an ordered set of requirements (address selected,
//! shipping method chosen, payment method chosen, terms accepted, ...). For a
//! given checkout action and cart, the orchestrator:
//!  - Selects the requirements that apply to the action, ordered by `Requirement::order`
//!    (ties keep registration order).
//!  - Checks them one at a time. Each check may fulfill itself automatically as a
//!    side effect, e.g. by selecting the only available shipping method.
//!  - Stops at the first requirement that is not fulfilled and redirects to its step,
//!    with that requirement's errors.
//!  - Otherwise lets the customer proceed to confirmation.
//!
//! Results are tri-state (`Fulfilled::{No, Yes, Always}`); `Always` marks a step with
//! nothing to choose, which progress indicators hide.

pub mod config;
pub mod core;
pub mod error;
pub mod orchestrator;
pub mod registry;

// --- Re-exports for the Public API ---

pub use crate::core::cart::SharedCart;
pub use crate::core::fulfillment::{Fulfilled, RequirementResult, WorkflowError};
pub use crate::core::model::RequirementModel;
pub use crate::core::outcome::{StepSubmission, WorkflowOutcome};
pub use crate::core::requirement::{ActionDescriptor, Requirement, RequirementRef, DEFAULT_CONTROLLER};

pub use crate::orchestrator::{CheckoutOrchestrator, EvaluationEvent, EvaluationHook};
pub use crate::registry::RequirementRegistry;

pub use crate::config::CheckoutConfig;
pub use crate::error::{CheckoutError, CheckoutResult};

// Requirements are written with `#[async_trait]`; re-export it so implementors
// use the same version.
pub use async_trait::async_trait;

/*
    Typical wiring:
    1. Define the cart type `MyCart` and one struct per checkout requirement.
    2. Implement `Requirement<MyCart>` for each (order, applies_to, check, fulfill_action).
    3. At startup, register them in a `RequirementRegistry<MyCart>` and wrap it in an Arc.
    4. Build a `CheckoutOrchestrator` (optionally with `CheckoutConfig::from_env()`).
    5. On every checkout-step GET: `orchestrator.resolve(action, controller, cart).await`
       and act on `outcome.next_action(orchestrator.config())`.
    6. On every step POST: `orchestrator.submit(name, action, controller, cart, model).await`,
       act on `submission.outcome` and show `submission.step_errors()` on the posted form.
*/
