// checkout_flow/src/orchestrator/definition.rs

//! Contains the `CheckoutOrchestrator<TCart, Err>` struct definition and its construction.

use crate::config::CheckoutConfig;
use crate::core::requirement::RequirementRef;
use crate::error::CheckoutError;
use crate::orchestrator::hooks::EvaluationHook;
use crate::registry::RequirementRegistry;
use std::sync::Arc;

/// Decides, for one checkout action and cart, whether checkout may proceed or which
/// requirement the customer must fulfill first.
///
/// The orchestrator knows nothing about how a requirement fulfills itself; it only
/// consumes the tri-state result. It holds no per-customer state and can be shared
/// across requests.
pub struct CheckoutOrchestrator<TCart, Err = CheckoutError>
where
  TCart: 'static + Send + Sync,
  Err: std::error::Error + From<CheckoutError> + Send + Sync + 'static,
{
  pub(crate) registry: Arc<RequirementRegistry<TCart, Err>>,
  pub(crate) config: CheckoutConfig,
  pub(crate) hooks: Vec<EvaluationHook>,
}

impl<TCart, Err> CheckoutOrchestrator<TCart, Err>
where
  TCart: 'static + Send + Sync,
  Err: std::error::Error + From<CheckoutError> + Send + Sync + 'static,
{
  /// Creates an orchestrator over `registry` with the default configuration.
  pub fn new(registry: Arc<RequirementRegistry<TCart, Err>>) -> Self {
    Self::with_config(registry, CheckoutConfig::default())
  }

  pub fn with_config(registry: Arc<RequirementRegistry<TCart, Err>>, config: CheckoutConfig) -> Self {
    Self {
      registry,
      config,
      hooks: Vec::new(),
    }
  }

  pub fn registry(&self) -> &Arc<RequirementRegistry<TCart, Err>> {
    &self.registry
  }

  pub fn config(&self) -> &CheckoutConfig {
    &self.config
  }

  /// Looks up a registered requirement by name.
  pub(crate) fn find_requirement(&self, name: &str) -> Result<RequirementRef<TCart, Err>, Err> {
    self.registry.find(name).ok_or_else(|| {
      Err::from(CheckoutError::RequirementNotFound {
        name: name.to_string(),
      })
    })
  }
}
