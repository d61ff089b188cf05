// checkout_flow/src/core/model.rs

//! Defines `RequirementModel`, the type-erased payload a customer submits to fulfill
//! one requirement (e.g. a selected address id). Only the receiving requirement
//! knows its concrete type and narrows it with `downcast_ref`.

use crate::error::{CheckoutError, CheckoutResult};
use std::any::Any;
use std::fmt;

pub struct RequirementModel {
  payload: Box<dyn Any + Send + Sync>,
  type_name: &'static str,
}

impl RequirementModel {
  pub fn new<M: Any + Send + Sync>(payload: M) -> Self {
    Self {
      payload: Box::new(payload),
      type_name: std::any::type_name::<M>(),
    }
  }

  /// Returns true if the payload is of type `M`.
  pub fn is<M: Any>(&self) -> bool {
    self.payload.is::<M>()
  }

  /// Narrows the payload to `M`.
  ///
  /// `requirement` names the receiver and is only used for the error message
  /// when the payload has another type.
  pub fn downcast_ref<M: Any>(&self, requirement: &str) -> CheckoutResult<&M> {
    self
      .payload
      .downcast_ref::<M>()
      .ok_or_else(|| CheckoutError::ModelTypeMismatch {
        requirement: requirement.to_string(),
        expected_type: std::any::type_name::<M>().to_string(),
        actual_type: self.type_name.to_string(),
      })
  }

  pub fn type_name(&self) -> &'static str {
    self.type_name
  }
}

impl fmt::Debug for RequirementModel {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("RequirementModel")
      .field("type_name", &self.type_name)
      .finish_non_exhaustive()
  }
}
