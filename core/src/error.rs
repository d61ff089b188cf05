// checkout_flow/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

/// Framework-level errors raised by the registry, the orchestrator, or by
/// requirements narrowing their submitted model.
///
/// Ordinary validation failures are never expressed through this type; they are
/// a `RequirementResult` with `Fulfilled::No`.
#[derive(Debug, Error)]
pub enum CheckoutError {
  #[error("Requirement not found: {name}")]
  RequirementNotFound { name: String },

  #[error("A requirement named '{name}' is already registered")]
  DuplicateRequirement { name: String },

  #[error("Model type mismatch for requirement '{requirement}' (expected {expected_type}, got {actual_type})")]
  ModelTypeMismatch {
    requirement: String,
    expected_type: String,
    actual_type: String,
  },

  #[error("Configuration error for '{key}': {message}")]
  Configuration { key: String, message: String },

  /// A fault outside the validation contract, e.g. the cart store being unavailable.
  #[error("Infrastructure fault during requirement check. Source: {source}")]
  Infrastructure {
    #[source]
    source: AnyhowError,
  },
}

impl From<AnyhowError> for CheckoutError {
  fn from(err: AnyhowError) -> Self {
    // Unwrap a CheckoutError that was passed through anyhow instead of nesting it.
    match err.downcast::<CheckoutError>() {
      Ok(checkout_err) => checkout_err,
      Err(source) => CheckoutError::Infrastructure { source },
    }
  }
}

pub type CheckoutResult<T, E = CheckoutError> = std::result::Result<T, E>;
