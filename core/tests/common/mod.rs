// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use checkout_flow::{
  async_trait, ActionDescriptor, CheckoutError, Fulfilled, Requirement, RequirementModel, RequirementRegistry,
  RequirementResult, SharedCart, WorkflowError,
};
use std::sync::Arc;
use tracing::Level;

// --- Common Cart ---
#[derive(Clone, Debug, Default)]
pub struct TestCart {
  pub address_id: Option<u32>,
  pub available_shipping_methods: Vec<u32>,
  pub shipping_method: Option<u32>,
  pub available_payment_methods: Vec<u32>,
  pub payment_method: Option<u32>,
  /// Names of the requirements checked, in call order.
  pub checked: Vec<String>,
}

impl TestCart {
  pub fn checked(&self) -> Vec<&str> {
    self.checked.iter().map(String::as_str).collect()
  }
}

// --- Submitted models ---
#[derive(Clone, Debug)]
pub struct SelectedAddress {
  pub address_id: u32,
}

#[derive(Clone, Debug)]
pub struct SelectedShippingMethod {
  pub method_id: u32,
}

#[derive(Clone, Debug)]
pub struct SelectedPaymentMethod {
  pub method_id: u32,
}

// --- Common Error Type for Tests ---
#[derive(Debug, thiserror::Error)]
pub enum TestError {
  #[error("Checkout framework error: {0}")]
  Checkout(#[from] CheckoutError),

  #[error("Cart store unavailable: {0}")]
  CartStore(String),
}

// --- Checkout requirements ---

pub struct AddressRequirement;

#[async_trait]
impl Requirement<TestCart> for AddressRequirement {
  fn name(&self) -> &str {
    "address"
  }

  fn order(&self) -> i32 {
    1
  }

  fn applies_to(&self, _action: &str, controller: &str) -> bool {
    controller == "Checkout"
  }

  async fn check(
    &self,
    cart: SharedCart<TestCart>,
    model: Option<&RequirementModel>,
  ) -> Result<RequirementResult, CheckoutError> {
    let submitted = model
      .map(|m| m.downcast_ref::<SelectedAddress>(self.name()))
      .transpose()?;

    let mut guard = cart.write();
    guard.checked.push(self.name().to_string());
    if let Some(selected) = submitted {
      guard.address_id = Some(selected.address_id);
    }
    let errors = if guard.address_id.is_none() {
      vec![WorkflowError::for_property("AddressId", "Please select a billing address.")]
    } else {
      Vec::new()
    };
    Ok(RequirementResult::from_bool(guard.address_id.is_some(), errors))
  }

  fn fulfill_action(&self) -> ActionDescriptor {
    ActionDescriptor::new("BillingAddress")
  }
}

pub struct ShippingRequirement;

#[async_trait]
impl Requirement<TestCart> for ShippingRequirement {
  fn name(&self) -> &str {
    "shipping"
  }

  fn order(&self) -> i32 {
    2
  }

  fn applies_to(&self, _action: &str, controller: &str) -> bool {
    controller == "Checkout"
  }

  async fn check(
    &self,
    cart: SharedCart<TestCart>,
    model: Option<&RequirementModel>,
  ) -> Result<RequirementResult, CheckoutError> {
    let submitted = model
      .map(|m| m.downcast_ref::<SelectedShippingMethod>(self.name()))
      .transpose()?;

    let mut guard = cart.write();
    guard.checked.push(self.name().to_string());

    if let Some(selected) = submitted {
      if !guard.available_shipping_methods.contains(&selected.method_id) {
        return Ok(RequirementResult::no([WorkflowError::for_property(
          "ShippingMethodId",
          "The selected shipping method is not available.",
        )]));
      }
      guard.shipping_method = Some(selected.method_id);
    }

    if guard.available_shipping_methods.len() == 1 {
      // Nothing to choose: select the only method.
      guard.shipping_method = guard.available_shipping_methods.first().copied();
      return Ok(RequirementResult::always());
    }

    match guard.shipping_method {
      Some(_) => Ok(RequirementResult::yes()),
      None => Ok(RequirementResult::no([WorkflowError::new("Please select a shipping method.")])),
    }
  }

  fn fulfill_action(&self) -> ActionDescriptor {
    ActionDescriptor::new("ShippingMethod")
  }
}

pub struct PaymentRequirement;

#[async_trait]
impl Requirement<TestCart> for PaymentRequirement {
  fn name(&self) -> &str {
    "payment"
  }

  fn order(&self) -> i32 {
    3
  }

  fn applies_to(&self, _action: &str, controller: &str) -> bool {
    controller == "Checkout"
  }

  async fn check(
    &self,
    cart: SharedCart<TestCart>,
    model: Option<&RequirementModel>,
  ) -> Result<RequirementResult, CheckoutError> {
    let submitted = model
      .map(|m| m.downcast_ref::<SelectedPaymentMethod>(self.name()))
      .transpose()?;

    let mut guard = cart.write();
    guard.checked.push(self.name().to_string());

    if let Some(selected) = submitted {
      if !guard.available_payment_methods.contains(&selected.method_id) {
        return Ok(RequirementResult::no([WorkflowError::for_property(
          "PaymentMethodId",
          "The selected payment method is not available.",
        )]));
      }
      guard.payment_method = Some(selected.method_id);
    }

    Ok(RequirementResult::from_bool(
      guard.payment_method.is_some(),
      guard
        .payment_method
        .is_none()
        .then(|| WorkflowError::new("Please select a payment method.")),
    ))
  }

  fn fulfill_action(&self) -> ActionDescriptor {
    ActionDescriptor::new("PaymentMethod")
  }
}

/// Returns a fixed result and records each call in the cart.
pub struct ScriptedRequirement {
  pub name: &'static str,
  pub order: i32,
  pub fulfilled: Fulfilled,
  pub errors: Vec<WorkflowError>,
  /// Actions this requirement guards; empty means every action.
  pub actions: Vec<&'static str>,
}

impl ScriptedRequirement {
  pub fn new(name: &'static str, order: i32, fulfilled: Fulfilled) -> Self {
    Self {
      name,
      order,
      fulfilled,
      errors: Vec::new(),
      actions: Vec::new(),
    }
  }

  pub fn with_errors(mut self, errors: Vec<WorkflowError>) -> Self {
    self.errors = errors;
    self
  }

  pub fn for_actions(mut self, actions: Vec<&'static str>) -> Self {
    self.actions = actions;
    self
  }
}

#[async_trait]
impl<Err> Requirement<TestCart, Err> for ScriptedRequirement
where
  Err: std::error::Error + From<CheckoutError> + Send + Sync + 'static,
{
  fn name(&self) -> &str {
    self.name
  }

  fn order(&self) -> i32 {
    self.order
  }

  fn applies_to(&self, action: &str, _controller: &str) -> bool {
    self.actions.is_empty() || self.actions.contains(&action)
  }

  async fn check(&self, cart: SharedCart<TestCart>, _model: Option<&RequirementModel>) -> Result<RequirementResult, Err> {
    cart.write().checked.push(self.name.to_string());
    Ok(RequirementResult::new(self.fulfilled, self.errors.clone()))
  }

  fn fulfill_action(&self) -> ActionDescriptor {
    ActionDescriptor::new(self.name)
  }
}

/// Faults with the application's own error type, as a requirement talking to an
/// unavailable cart store would.
pub struct OfflineStoreRequirement {
  pub order: i32,
}

#[async_trait]
impl Requirement<TestCart, TestError> for OfflineStoreRequirement {
  fn name(&self) -> &str {
    "offline_store"
  }

  fn order(&self) -> i32 {
    self.order
  }

  fn applies_to(&self, _action: &str, _controller: &str) -> bool {
    true
  }

  async fn check(&self, cart: SharedCart<TestCart>, _model: Option<&RequirementModel>) -> Result<RequirementResult, TestError> {
    cart.write().checked.push("offline_store".to_string());
    tokio::task::yield_now().await;
    Err(TestError::CartStore("connection refused".to_string()))
  }

  fn fulfill_action(&self) -> ActionDescriptor {
    ActionDescriptor::new("Index")
  }
}

// --- Common registries and carts ---

/// Address (1), shipping (2), payment (3).
pub fn checkout_registry() -> Arc<RequirementRegistry<TestCart>> {
  let registry = RequirementRegistry::<TestCart>::new();
  // Registered out of order on purpose; order() decides evaluation order.
  registry.register(PaymentRequirement).unwrap();
  registry.register(AddressRequirement).unwrap();
  registry.register(ShippingRequirement).unwrap();
  Arc::new(registry)
}

pub fn cart_with(f: impl FnOnce(&mut TestCart)) -> SharedCart<TestCart> {
  let mut cart = TestCart {
    available_shipping_methods: vec![1, 2],
    available_payment_methods: vec![7, 8],
    ..Default::default()
  };
  f(&mut cart);
  SharedCart::new(cart)
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
