// checkout_flow/src/registry.rs

//! Defines `RequirementRegistry`, the explicit, startup-built set of checkout
//! requirements, exposed in deterministic order.

use crate::core::requirement::{Requirement, RequirementRef};
use crate::error::CheckoutError;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{event, Level};

/// Holds every registered requirement in registration order.
///
/// The registry never reorders its storage; ordering by `Requirement::order` is
/// applied to a copy on every query with a stable sort, so equal orders keep
/// first-registered-first.
pub struct RequirementRegistry<TCart, Err = CheckoutError>
where
  TCart: 'static + Send + Sync,
  Err: std::error::Error + From<CheckoutError> + Send + Sync + 'static,
{
  requirements: RwLock<Vec<RequirementRef<TCart, Err>>>,
}

impl<TCart, Err> RequirementRegistry<TCart, Err>
where
  TCart: 'static + Send + Sync,
  Err: std::error::Error + From<CheckoutError> + Send + Sync + 'static,
{
  /// Creates a new, empty registry.
  pub fn new() -> Self {
    Self {
      requirements: RwLock::new(Vec::new()),
    }
  }

  /// Registers a requirement. Names must be unique.
  pub fn register<R>(&self, requirement: R) -> Result<(), Err>
  where
    R: Requirement<TCart, Err> + 'static,
  {
    self.register_shared(Arc::new(requirement))
  }

  /// Registers an already shared requirement.
  pub fn register_shared(&self, requirement: RequirementRef<TCart, Err>) -> Result<(), Err> {
    let mut requirements = self.requirements.write();
    if requirements.iter().any(|r| r.name() == requirement.name()) {
      event!(Level::ERROR, requirement = requirement.name(), "Duplicate requirement registration.");
      return Err(Err::from(CheckoutError::DuplicateRequirement {
        name: requirement.name().to_string(),
      }));
    }
    event!(
      Level::DEBUG,
      requirement = requirement.name(),
      order = requirement.order(),
      "Registering requirement."
    );
    requirements.push(requirement);
    Ok(())
  }

  /// Requirements guarding `action` on `controller`, ascending by order.
  ///
  /// Filtering is purely by applicability. An empty result means there is nothing to
  /// check and the caller should proceed.
  pub fn get_applicable(&self, action: &str, controller: &str) -> Vec<RequirementRef<TCart, Err>> {
    // `applies_to` is caller code; it runs after the read guard is released.
    let registered = self.requirements.read().clone();
    let mut applicable: Vec<_> = registered
      .into_iter()
      .filter(|r| r.applies_to(action, controller))
      .collect();
    applicable.sort_by_key(|r| r.order());
    event!(
      Level::TRACE,
      %action,
      %controller,
      applicable = applicable.len(),
      "Selected applicable requirements."
    );
    applicable
  }

  /// All requirements, ascending by order.
  pub fn all(&self) -> Vec<RequirementRef<TCart, Err>> {
    let mut all = self.requirements.read().clone();
    all.sort_by_key(|r| r.order());
    all
  }

  pub fn find(&self, name: &str) -> Option<RequirementRef<TCart, Err>> {
    self.requirements.read().iter().find(|r| r.name() == name).cloned()
  }

  pub fn len(&self) -> usize {
    self.requirements.read().len()
  }

  pub fn is_empty(&self) -> bool {
    self.requirements.read().is_empty()
  }
}

impl<TCart, Err> Default for RequirementRegistry<TCart, Err>
where
  TCart: 'static + Send + Sync,
  Err: std::error::Error + From<CheckoutError> + Send + Sync + 'static,
{
  fn default() -> Self {
    Self::new()
  }
}
