// checkout_flow/examples/step_checkout.rs

use checkout_flow::{
  async_trait, ActionDescriptor, CheckoutConfig, CheckoutError, CheckoutOrchestrator, Requirement, RequirementModel,
  RequirementRegistry, RequirementResult, SharedCart, StepSubmission, WorkflowError, WorkflowOutcome,
};
use std::sync::{Arc, Mutex};
use tracing::info;

// 1. The cart the requirements read and write.
#[derive(Debug, Default)]
struct Cart {
  address_id: Option<u32>,
  shipping_methods: Vec<&'static str>,
  shipping_method: Option<&'static str>,
  payment_method: Option<u32>,
  terms_accepted: bool,
}

// 2. One struct per checkout step.
struct BillingAddress;
struct ShippingMethod;
struct PaymentMethod;
struct AcceptTerms;

struct AddressId(u32);
struct PaymentMethodId(u32);

#[async_trait]
impl Requirement<Cart> for BillingAddress {
  fn name(&self) -> &str {
    "BillingAddress"
  }
  fn order(&self) -> i32 {
    10
  }
  fn applies_to(&self, _action: &str, controller: &str) -> bool {
    controller == "Checkout"
  }
  async fn check(&self, cart: SharedCart<Cart>, model: Option<&RequirementModel>) -> Result<RequirementResult, CheckoutError> {
    if let Some(model) = model {
      let AddressId(id) = model.downcast_ref::<AddressId>(self.name())?;
      cart.update(|c| c.address_id = Some(*id));
    }
    let has_address = cart.read().address_id.is_some();
    Ok(RequirementResult::from_bool(
      has_address,
      (!has_address).then(|| WorkflowError::for_property("AddressId", "Please select a billing address.")),
    ))
  }
  fn fulfill_action(&self) -> ActionDescriptor {
    ActionDescriptor::new("BillingAddress")
  }
}

#[async_trait]
impl Requirement<Cart> for ShippingMethod {
  fn name(&self) -> &str {
    "ShippingMethod"
  }
  fn order(&self) -> i32 {
    20
  }
  fn applies_to(&self, _action: &str, controller: &str) -> bool {
    controller == "Checkout"
  }
  async fn check(&self, cart: SharedCart<Cart>, _model: Option<&RequirementModel>) -> Result<RequirementResult, CheckoutError> {
    let mut guard = cart.write();
    if guard.shipping_methods.len() == 1 {
      guard.shipping_method = Some(guard.shipping_methods[0]);
      return Ok(RequirementResult::always());
    }
    Ok(RequirementResult::from_bool(guard.shipping_method.is_some(), []))
  }
  fn fulfill_action(&self) -> ActionDescriptor {
    ActionDescriptor::new("ShippingMethod")
  }
}

#[async_trait]
impl Requirement<Cart> for PaymentMethod {
  fn name(&self) -> &str {
    "PaymentMethod"
  }
  fn order(&self) -> i32 {
    30
  }
  fn applies_to(&self, _action: &str, controller: &str) -> bool {
    controller == "Checkout"
  }
  async fn check(&self, cart: SharedCart<Cart>, model: Option<&RequirementModel>) -> Result<RequirementResult, CheckoutError> {
    if let Some(model) = model {
      let PaymentMethodId(id) = model.downcast_ref::<PaymentMethodId>(self.name())?;
      cart.update(|c| c.payment_method = Some(*id));
    }
    Ok(RequirementResult::from_bool(cart.read().payment_method.is_some(), []))
  }
  fn fulfill_action(&self) -> ActionDescriptor {
    ActionDescriptor::new("PaymentMethod")
  }
}

#[async_trait]
impl Requirement<Cart> for AcceptTerms {
  fn name(&self) -> &str {
    "AcceptTerms"
  }
  fn order(&self) -> i32 {
    40
  }
  // Terms are only enforced when placing the order.
  fn applies_to(&self, action: &str, controller: &str) -> bool {
    controller == "Checkout" && action == "Confirm"
  }
  async fn check(&self, cart: SharedCart<Cart>, model: Option<&RequirementModel>) -> Result<RequirementResult, CheckoutError> {
    if let Some(model) = model {
      let accepted = model.downcast_ref::<bool>(self.name())?;
      cart.update(|c| c.terms_accepted = *accepted);
    }
    Ok(RequirementResult::from_bool(cart.read().terms_accepted, []))
  }
  fn fulfill_action(&self) -> ActionDescriptor {
    ActionDescriptor::new("Confirm")
  }
}

fn describe(outcome: &WorkflowOutcome<Cart>, config: &CheckoutConfig) -> String {
  let next = outcome.next_action(config);
  format!("{}/{} (errors: {:?})", next.controller, next.action, outcome.errors())
}

fn describe_submission(submission: &StepSubmission<Cart>, config: &CheckoutConfig) -> String {
  format!(
    "{} (posted step: {:?}, {:?})",
    describe(&submission.outcome, config),
    submission.step.fulfilled(),
    submission.step_errors()
  )
}

#[tokio::main]
async fn main() -> Result<(), CheckoutError> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  info!("--- Step Checkout Example ---");

  // 3. Register the requirements once at startup.
  let registry = RequirementRegistry::<Cart>::new();
  registry.register(PaymentMethod)?;
  registry.register(BillingAddress)?;
  registry.register(AcceptTerms)?;
  registry.register(ShippingMethod)?;

  let mut orchestrator = CheckoutOrchestrator::with_config(Arc::new(registry), CheckoutConfig::from_env()?);

  // 4. Collect steps that have nothing to choose, so a progress bar can hide them.
  let hidden_steps = Arc::new(Mutex::new(Vec::<String>::new()));
  let hidden_hook = hidden_steps.clone();
  orchestrator.on_evaluated(move |event| {
    if event.result.fulfilled().is_hidden() {
      if let Ok(mut hidden) = hidden_hook.lock() {
        if !hidden.iter().any(|s| s == event.requirement) {
          hidden.push(event.requirement.to_string());
        }
      }
    }
  });

  let cart = SharedCart::new(Cart {
    shipping_methods: vec!["Ground"],
    ..Default::default()
  });

  // 5. A customer opens the confirm page with an empty cart selection.
  let outcome = orchestrator.resolve("Confirm", "Checkout", cart.clone()).await?;
  info!("GET Confirm -> {}", describe(&outcome, orchestrator.config()));

  // 6. They post each step in turn.
  let submission = orchestrator
    .submit("BillingAddress", "Confirm", "Checkout", cart.clone(), RequirementModel::new(AddressId(42)))
    .await?;
  info!("POST BillingAddress -> {}", describe_submission(&submission, orchestrator.config()));

  let submission = orchestrator
    .submit("PaymentMethod", "Confirm", "Checkout", cart.clone(), RequirementModel::new(PaymentMethodId(7)))
    .await?;
  info!("POST PaymentMethod -> {}", describe_submission(&submission, orchestrator.config()));

  let submission = orchestrator
    .submit("AcceptTerms", "Confirm", "Checkout", cart.clone(), RequirementModel::new(true))
    .await?;
  info!("POST AcceptTerms -> {}", describe_submission(&submission, orchestrator.config()));

  info!("Final cart: {:?}", *cart.read());
  if let Ok(hidden) = hidden_steps.lock() {
    info!("Steps hidden from the progress indicator: {:?}", *hidden);
  }
  Ok(())
}
