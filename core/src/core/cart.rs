// checkout_flow/src/core/cart.rs
use parking_lot::{MappedRwLockReadGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::sync::Arc;

/// Shared handle to the current customer's cart (or session aggregate) `T`.
///
/// Requirements receive a clone of this handle in `check` and may read pricing
/// and selection state from it or write defaults into it (auto-fulfillment).
/// Cloning shares the same underlying cart.
///
/// IMPORTANT: Guards obtained from this struct are blocking and MUST be dropped
/// before any `.await` suspension point inside a requirement.
#[derive(Debug)]
pub struct SharedCart<T: Send + Sync + 'static>(Arc<RwLock<T>>);

impl<T: Send + Sync + 'static> SharedCart<T> {
  pub fn new(cart: T) -> Self {
    SharedCart(Arc::new(RwLock::new(cart)))
  }

  /// Acquires a read lock. Drop the guard before awaiting.
  pub fn read(&self) -> RwLockReadGuard<'_, T> {
    self.0.read()
  }

  /// Acquires a write lock. Drop the guard before awaiting.
  pub fn write(&self) -> RwLockWriteGuard<'_, T> {
    self.0.write()
  }

  /// Read guard narrowed to one part of the cart,
  /// e.g. `cart.map_read(|c| &c.shipping_method)`.
  pub fn map_read<F, U: ?Sized>(&self, f: F) -> MappedRwLockReadGuard<'_, U>
  where
    F: FnOnce(&T) -> &U,
  {
    RwLockReadGuard::map(self.read(), f)
  }

  /// Runs `f` under a write lock and returns its result, releasing the lock
  /// before returning. Convenient for short auto-fulfill mutations.
  pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
    let mut guard = self.write();
    f(&mut guard)
  }

  /// Returns true when both handles point at the same cart.
  pub fn same_cart(&self, other: &SharedCart<T>) -> bool {
    Arc::ptr_eq(&self.0, &other.0)
  }
}

impl<T: Send + Sync + 'static> Clone for SharedCart<T> {
  fn clone(&self) -> Self {
    SharedCart(Arc::clone(&self.0))
  }
}

impl<T: Send + Sync + 'static + Default> Default for SharedCart<T> {
  fn default() -> Self {
    Self::new(Default::default())
  }
}
