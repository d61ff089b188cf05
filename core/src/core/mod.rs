pub mod cart;
pub mod fulfillment;
pub mod model;
pub mod outcome;
pub mod requirement;

// Re-export key types for easier access from other modules (and lib.rs)
pub use cart::SharedCart;
pub use fulfillment::{Fulfilled, RequirementResult, WorkflowError};
pub use model::RequirementModel;
pub use outcome::{StepSubmission, WorkflowOutcome};
pub use requirement::{ActionDescriptor, Requirement, RequirementRef, DEFAULT_CONTROLLER};
