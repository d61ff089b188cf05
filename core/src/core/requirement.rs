// checkout_flow/src/core/requirement.rs

//! Defines the `Requirement` trait implemented by every checkout step, and the
//! `ActionDescriptor` a requirement points the customer to when it is not fulfilled.

use crate::core::cart::SharedCart;
use crate::core::fulfillment::RequirementResult;
use crate::core::model::RequirementModel;
use crate::error::CheckoutError;
use async_trait::async_trait;
use std::sync::Arc;

/// Controller assumed when a caller does not name one.
pub const DEFAULT_CONTROLLER: &str = "Checkout";

/// Shared, type-erased requirement as stored by the registry.
pub type RequirementRef<TCart, Err = CheckoutError> = Arc<dyn Requirement<TCart, Err>>;

/// One precondition of checkout, e.g. "a shipping address is selected".
///
/// Requirements are created once at startup and never mutated; only the cart they
/// operate on varies per call. The customer reaches the confirmation page when every
/// applicable requirement is fulfilled.
///
/// `TCart` is the cart/session aggregate held in `SharedCart<TCart>`.
/// `Err` is the application error a failing check returns. It must be constructible
/// from `CheckoutError` so that a requirement can use `?` on framework helpers such as
/// `RequirementModel::downcast_ref`.
#[async_trait]
pub trait Requirement<TCart, Err = CheckoutError>: Send + Sync
where
  TCart: 'static + Send + Sync,
  Err: std::error::Error + From<CheckoutError> + Send + Sync + 'static,
{
  /// Identifier used for logging and registry lookups. Must be unique per registry.
  fn name(&self) -> &str {
    std::any::type_name::<Self>()
  }

  /// Position in which requirements are checked, and so in which the associated
  /// checkout steps are completed. Lower runs first; equal values keep registration order.
  fn order(&self) -> i32;

  /// Whether this requirement guards the given checkout action. Must be side-effect free.
  fn applies_to(&self, action: &str, controller: &str) -> bool;

  /// `applies_to` with the default `"Checkout"` controller.
  fn applies_to_action(&self, action: &str) -> bool {
    self.applies_to(action, DEFAULT_CONTROLLER)
  }

  /// Checks whether the requirement is fulfilled, attempting to fulfill it
  /// automatically first where possible (e.g. selecting the only shipping method).
  ///
  /// `model` is the data the customer submitted for this step, if any.
  /// Validation failure is `Ok` with `Fulfilled::No`; `Err` is reserved for faults
  /// such as the cart store being unavailable. Must be safe to call repeatedly and
  /// must not assume it is the last requirement checked.
  async fn check(&self, cart: SharedCart<TCart>, model: Option<&RequirementModel>) -> Result<RequirementResult, Err>;

  /// Where the customer is sent when this requirement is not fulfilled.
  fn fulfill_action(&self) -> ActionDescriptor;
}

/// An opaque "show this checkout step" pointer handed back to the HTTP layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionDescriptor {
  pub action: String,
  pub controller: String,
  pub route_values: Vec<(String, String)>,
}

impl ActionDescriptor {
  /// An action on the default `"Checkout"` controller.
  pub fn new(action: impl Into<String>) -> Self {
    Self::with_controller(action, DEFAULT_CONTROLLER)
  }

  pub fn with_controller(action: impl Into<String>, controller: impl Into<String>) -> Self {
    Self {
      action: action.into(),
      controller: controller.into(),
      route_values: Vec::new(),
    }
  }

  pub fn route_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
    self.route_values.push((key.into(), value.into()));
    self
  }
}
