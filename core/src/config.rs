// checkout_flow/src/config.rs

use crate::core::requirement::{ActionDescriptor, DEFAULT_CONTROLLER};
use crate::error::{CheckoutError, CheckoutResult};
use dotenvy::dotenv;
use std::env;

pub const ENV_DEFAULT_CONTROLLER: &str = "CHECKOUT_DEFAULT_CONTROLLER";
pub const ENV_CONFIRM_ACTION: &str = "CHECKOUT_CONFIRM_ACTION";
pub const ENV_CONFIRM_CONTROLLER: &str = "CHECKOUT_CONFIRM_CONTROLLER";

/// Orchestrator settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutConfig {
  /// Controller assumed by `CheckoutOrchestrator::resolve_action`.
  pub default_controller: String,
  /// Where a `Proceed` outcome sends the customer.
  pub confirm_action: String,
  pub confirm_controller: String,
}

impl Default for CheckoutConfig {
  fn default() -> Self {
    Self {
      default_controller: DEFAULT_CONTROLLER.to_string(),
      confirm_action: "Confirm".to_string(),
      confirm_controller: DEFAULT_CONTROLLER.to_string(),
    }
  }
}

impl CheckoutConfig {
  /// Loads `.env` if present, then overrides the defaults with any of
  /// `CHECKOUT_DEFAULT_CONTROLLER`, `CHECKOUT_CONFIRM_ACTION` and
  /// `CHECKOUT_CONFIRM_CONTROLLER` that are set. A set but blank value is an error.
  pub fn from_env() -> CheckoutResult<Self> {
    dotenv().ok();

    let defaults = Self::default();
    let get_env = |var_name: &str, fallback: String| -> CheckoutResult<String> {
      match env::var(var_name) {
        Ok(value) if value.trim().is_empty() => Err(CheckoutError::Configuration {
          key: var_name.to_string(),
          message: "value must not be blank".to_string(),
        }),
        Ok(value) => Ok(value.trim().to_string()),
        Err(env::VarError::NotPresent) => Ok(fallback),
        Err(e) => Err(CheckoutError::Configuration {
          key: var_name.to_string(),
          message: e.to_string(),
        }),
      }
    };

    let config = Self {
      default_controller: get_env(ENV_DEFAULT_CONTROLLER, defaults.default_controller)?,
      confirm_action: get_env(ENV_CONFIRM_ACTION, defaults.confirm_action)?,
      confirm_controller: get_env(ENV_CONFIRM_CONTROLLER, defaults.confirm_controller)?,
    };

    tracing::debug!(config = ?config, "Checkout configuration loaded.");
    Ok(config)
  }

  /// The descriptor a `Proceed` outcome maps to.
  pub fn confirm_descriptor(&self) -> ActionDescriptor {
    ActionDescriptor::with_controller(self.confirm_action.clone(), self.confirm_controller.clone())
  }
}
