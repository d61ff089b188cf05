// checkout_flow/src/orchestrator/mod.rs

//! Defines the `CheckoutOrchestrator`, its construction, evaluation hooks and the
//! resolve algorithm.

pub mod definition;
pub mod execution;
pub mod hooks;

// Re-export the main orchestrator struct
pub use definition::CheckoutOrchestrator;
pub use hooks::{EvaluationEvent, EvaluationHook};
