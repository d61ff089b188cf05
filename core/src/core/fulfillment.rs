// checkout_flow/src/core/fulfillment.rs

//! The tri-state outcome of a single requirement check and the diagnostics it carries.

use std::fmt;

/// Whether a requirement is fulfilled for the current cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fulfilled {
  /// The requirement is not fulfilled. The customer must act on its checkout step.
  No,
  /// The requirement is fulfilled. Its step may still be shown as an editable step.
  Yes,
  /// The requirement is always fulfilled for this cart and there is nothing for the
  /// customer to do on its step, so the step must never be displayed.
  /// Example: the store offers exactly one shipping method.
  Always,
}

impl Fulfilled {
  /// `Yes` or `Always`.
  pub fn is_fulfilled(self) -> bool {
    !matches!(self, Fulfilled::No)
  }

  /// Only `Always`: the associated step is hidden from step indicators.
  pub fn is_hidden(self) -> bool {
    matches!(self, Fulfilled::Always)
  }
}

impl From<bool> for Fulfilled {
  fn from(is_fulfilled: bool) -> Self {
    if is_fulfilled {
      Fulfilled::Yes
    } else {
      Fulfilled::No
    }
  }
}

/// A user-facing checkout diagnostic. Forwarded verbatim; the orchestrator never inspects it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowError {
  /// Form field the message refers to, if any.
  pub property_name: Option<String>,
  pub message: String,
}

impl WorkflowError {
  pub fn new(message: impl Into<String>) -> Self {
    Self {
      property_name: None,
      message: message.into(),
    }
  }

  pub fn for_property(property_name: impl Into<String>, message: impl Into<String>) -> Self {
    Self {
      property_name: Some(property_name.into()),
      message: message.into(),
    }
  }
}

impl fmt::Display for WorkflowError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &self.property_name {
      Some(property) => write!(f, "{}: {}", property, self.message),
      None => f.write_str(&self.message),
    }
  }
}

/// Outcome of one `Requirement::check` call.
///
/// `errors` is always present. With `Fulfilled::No` it explains why the step is
/// shown; alongside `Yes`/`Always` it holds non-blocking warnings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequirementResult {
  fulfilled: Fulfilled,
  errors: Vec<WorkflowError>,
}

impl RequirementResult {
  pub fn new(fulfilled: Fulfilled, errors: impl IntoIterator<Item = WorkflowError>) -> Self {
    Self {
      fulfilled,
      errors: errors.into_iter().collect(),
    }
  }

  /// Boolean convenience form: `true` maps to `Yes`, `false` to `No`.
  pub fn from_bool(is_fulfilled: bool, errors: impl IntoIterator<Item = WorkflowError>) -> Self {
    Self::new(Fulfilled::from(is_fulfilled), errors)
  }

  pub fn yes() -> Self {
    Self::new(Fulfilled::Yes, [])
  }

  pub fn always() -> Self {
    Self::new(Fulfilled::Always, [])
  }

  pub fn no(errors: impl IntoIterator<Item = WorkflowError>) -> Self {
    Self::new(Fulfilled::No, errors)
  }

  pub fn fulfilled(&self) -> Fulfilled {
    self.fulfilled
  }

  pub fn errors(&self) -> &[WorkflowError] {
    &self.errors
  }

  pub fn is_fulfilled(&self) -> bool {
    self.fulfilled.is_fulfilled()
  }

  pub fn into_errors(self) -> Vec<WorkflowError> {
    self.errors
  }
}

impl From<Fulfilled> for RequirementResult {
  fn from(fulfilled: Fulfilled) -> Self {
    Self::new(fulfilled, [])
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn errors_default_to_empty() {
    assert!(RequirementResult::yes().errors().is_empty());
    assert!(RequirementResult::always().errors().is_empty());
    assert!(RequirementResult::from(Fulfilled::No).errors().is_empty());
    assert!(RequirementResult::from_bool(false, []).errors().is_empty());
  }

  #[test]
  fn boolean_form_never_produces_always() {
    assert_eq!(RequirementResult::from_bool(true, []).fulfilled(), Fulfilled::Yes);
    assert_eq!(RequirementResult::from_bool(false, []).fulfilled(), Fulfilled::No);
    assert_eq!(Fulfilled::from(true), Fulfilled::Yes);
    assert_eq!(Fulfilled::from(false), Fulfilled::No);
  }

  #[test]
  fn results_state_their_fulfillment_explicitly() {
    assert_eq!(RequirementResult::no([]).fulfilled(), Fulfilled::No);
    assert_eq!(RequirementResult::yes().fulfilled(), Fulfilled::Yes);
    assert_eq!(RequirementResult::always().fulfilled(), Fulfilled::Always);
  }

  #[test]
  fn only_always_is_hidden() {
    assert!(Fulfilled::Always.is_hidden());
    assert!(!Fulfilled::Yes.is_hidden());
    assert!(!Fulfilled::No.is_hidden());
    assert!(Fulfilled::Yes.is_fulfilled() && Fulfilled::Always.is_fulfilled());
    assert!(!Fulfilled::No.is_fulfilled());
  }

  #[test]
  fn errors_keep_their_order() {
    let result = RequirementResult::no([
      WorkflowError::for_property("Street", "Street is required."),
      WorkflowError::new("Address could not be validated."),
    ]);
    let messages: Vec<String> = result.errors().iter().map(ToString::to_string).collect();
    assert_eq!(messages, vec!["Street: Street is required.", "Address could not be validated."]);
  }
}
