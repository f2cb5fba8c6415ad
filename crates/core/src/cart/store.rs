//! The cart store: owned cart state plus its persistence.

use tracing::{debug, warn};

use super::{CartLine, CartPersistence, CartState, ShippingProgress, StorageError};
use crate::types::{Price, ProductId, Size};

/// The shopper's cart.
///
/// Owns the in-memory [`CartState`] and the [`CartPersistence`] it was loaded
/// from. Every mutation writes the full state back before returning; if the
/// write fails, the mutation is rolled back so memory never runs ahead of
/// storage.
///
/// # Example
///
/// ```rust
/// use silver_saints_core::{CartStore, LocalCartStorage, MemoryStore, Price, ProductId, Size};
///
/// let mut cart = CartStore::initialize(LocalCartStorage::new(MemoryStore::new()));
/// cart.add_line(ProductId::new("halo-tee"), "HALO TEE", Price::new(40), Size::new("M"))?;
/// cart.add_line(ProductId::new("halo-tee"), "HALO TEE", Price::new(40), Size::new("M"))?;
///
/// assert_eq!(cart.lines().len(), 1);
/// assert_eq!(cart.count(), 2);
/// assert_eq!(cart.total(), Price::new(80));
/// # Ok::<(), silver_saints_core::StorageError>(())
/// ```
#[derive(Debug)]
pub struct CartStore<P> {
    state: CartState,
    persistence: P,
}

impl<P: CartPersistence> CartStore<P> {
    /// Load the cart from `persistence`.
    ///
    /// Never fails: missing data is an empty cart, and unreadable or
    /// malformed data is logged and discarded. Data that decodes but breaks
    /// the one-line-per-key invariant is repaired and written back; if that
    /// write is rejected, the repaired state is still used and the next
    /// mutation persists it.
    pub fn initialize(mut persistence: P) -> Self {
        let state = match persistence.load() {
            Ok(mut state) => {
                if state.normalize() {
                    warn!("repaired persisted cart with duplicate or empty lines");
                    if let Err(e) = persistence.save(&state) {
                        warn!(error = %e, "failed to write back repaired cart");
                    }
                }
                state
            }
            Err(e) => {
                warn!(error = %e, "discarding unreadable persisted cart");
                CartState::new()
            }
        };

        debug!(lines = state.lines().len(), "cart initialized");
        Self { state, persistence }
    }

    /// Add one unit of `(product_id, size)`.
    ///
    /// An existing line for the pair has its quantity incremented; otherwise
    /// a new line with quantity 1 is appended. `name` and `unit_price` are
    /// only used when a new line is created.
    ///
    /// Callers must only invoke this once the shopper has picked a size.
    ///
    /// # Errors
    ///
    /// Returns the backend error if the state could not be persisted; the
    /// cart is left as it was.
    pub fn add_line(
        &mut self,
        product_id: ProductId,
        name: impl Into<String>,
        unit_price: Price,
        size: Size,
    ) -> Result<(), StorageError> {
        let previous = self.state.clone();

        match self.state.find_mut(&product_id, &size) {
            Some(line) => line.quantity = line.quantity.saturating_add(1),
            None => {
                self.state
                    .push(CartLine::new(product_id, name.into(), unit_price, size));
            }
        }

        self.commit(previous)
    }

    /// Remove the line for `(product_id, size)`. Removing a line that is not
    /// in the cart leaves the state unchanged.
    ///
    /// # Errors
    ///
    /// Returns the backend error if the state could not be persisted; the
    /// cart is left as it was.
    pub fn remove_line(&mut self, product_id: &ProductId, size: &Size) -> Result<(), StorageError> {
        let previous = self.state.clone();
        if !self.state.remove(product_id, size) {
            debug!(%product_id, %size, "remove for line not in cart");
        }
        self.commit(previous)
    }

    /// Change the quantity of `(product_id, size)` by `delta`.
    ///
    /// A line whose quantity drops to zero or below is removed. Adjusting a
    /// line that is not in the cart does nothing and writes nothing.
    ///
    /// # Errors
    ///
    /// Returns the backend error if the state could not be persisted; the
    /// cart is left as it was.
    pub fn adjust_quantity(
        &mut self,
        product_id: &ProductId,
        size: &Size,
        delta: i64,
    ) -> Result<(), StorageError> {
        let Some(line) = self.state.find(product_id, size) else {
            return Ok(());
        };

        let adjusted = i64::from(line.quantity).saturating_add(delta);
        if adjusted <= 0 {
            return self.remove_line(product_id, size);
        }

        let previous = self.state.clone();
        if let Some(line) = self.state.find_mut(product_id, size) {
            line.quantity = u32::try_from(adjusted).unwrap_or(u32::MAX);
        }
        self.commit(previous)
    }

    /// Sum of `unit_price * quantity` over all lines.
    #[must_use]
    pub fn total(&self) -> Price {
        self.state.total()
    }

    /// Sum of quantities over all lines, for the count badge.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.state.count()
    }

    /// The lines in display order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        self.state.lines()
    }

    /// Returns `true` if the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &CartState {
        &self.state
    }

    /// Progress of the current total toward a free-shipping `threshold`.
    #[must_use]
    pub fn shipping_progress(&self, threshold: Price) -> ShippingProgress {
        ShippingProgress::measure(self.total(), threshold)
    }

    /// Get a reference to the persistence backend.
    #[must_use]
    pub const fn persistence(&self) -> &P {
        &self.persistence
    }

    /// Consume the store and return the persistence backend.
    #[must_use]
    pub fn into_persistence(self) -> P {
        self.persistence
    }

    /// Persist the current state, restoring `previous` if the write fails.
    fn commit(&mut self, previous: CartState) -> Result<(), StorageError> {
        if let Err(e) = self.persistence.save(&self.state) {
            warn!(error = %e, "failed to persist cart, rolling back");
            self.state = previous;
            return Err(e);
        }

        debug!(
            lines = self.state.lines().len(),
            count = self.state.count(),
            total = %self.state.total(),
            "cart saved"
        );
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::cart::{CART_STORAGE_KEY, KeyValueStore, LocalCartStorage, MemoryStore};

    fn empty_cart() -> CartStore<LocalCartStorage<MemoryStore>> {
        CartStore::initialize(LocalCartStorage::new(MemoryStore::new()))
    }

    fn tee() -> (ProductId, Size) {
        (ProductId::new("A"), Size::new("M"))
    }

    /// Backend whose writes can be switched off.
    #[derive(Default)]
    struct FlakyStore {
        inner: MemoryStore,
        fail_writes: bool,
    }

    impl KeyValueStore for FlakyStore {
        fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.inner.get_item(key)
        }

        fn set_item(&mut self, key: &str, value: String) -> Result<(), StorageError> {
            if self.fail_writes {
                return Err(std::io::Error::other("quota exceeded").into());
            }
            self.inner.set_item(key, value)
        }

        fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
            self.inner.remove_item(key)
        }
    }

    #[test]
    fn test_add_then_readd_increments() {
        let mut cart = empty_cart();
        let (id, size) = tee();

        cart.add_line(id.clone(), "Tee", Price::new(40), size.clone())
            .unwrap();
        assert_eq!(cart.count(), 1);
        assert_eq!(cart.total(), Price::new(40));

        cart.add_line(id.clone(), "Tee", Price::new(40), size.clone())
            .unwrap();
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 2);
        assert_eq!(cart.total(), Price::new(80));

        cart.adjust_quantity(&id, &size, -2).unwrap();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Price::ZERO);
    }

    #[test]
    fn test_repeated_adds_make_one_line() {
        let mut cart = empty_cart();
        let (id, size) = tee();
        for _ in 0..7 {
            cart.add_line(id.clone(), "Tee", Price::new(40), size.clone())
                .unwrap();
        }
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.count(), 7);
    }

    #[test]
    fn test_same_product_different_size_is_separate_line() {
        let mut cart = empty_cart();
        cart.add_line(ProductId::new("A"), "Tee", Price::new(40), Size::new("M"))
            .unwrap();
        cart.add_line(ProductId::new("A"), "Tee", Price::new(40), Size::new("L"))
            .unwrap();
        assert_eq!(cart.lines().len(), 2);
        assert_eq!(cart.lines()[0].size.as_str(), "M");
        assert_eq!(cart.lines()[1].size.as_str(), "L");
    }

    #[test]
    fn test_readd_keeps_original_name_and_price() {
        let mut cart = empty_cart();
        let (id, size) = tee();
        cart.add_line(id.clone(), "Tee", Price::new(40), size.clone())
            .unwrap();
        cart.add_line(id, "Renamed", Price::new(99), size).unwrap();
        assert_eq!(cart.lines()[0].name, "Tee");
        assert_eq!(cart.lines()[0].unit_price, Price::new(40));
    }

    #[test]
    fn test_remove_missing_line_is_noop() {
        let mut cart = empty_cart();
        let (id, size) = tee();
        cart.add_line(id.clone(), "Tee", Price::new(40), size)
            .unwrap();
        let before = cart.state().clone();

        cart.remove_line(&id, &Size::new("XL")).unwrap();
        assert_eq!(cart.state(), &before);
    }

    #[test]
    fn test_adjust_missing_line_writes_nothing() {
        let mut cart = empty_cart();
        let (id, size) = tee();
        cart.adjust_quantity(&id, &size, 3).unwrap();
        assert!(cart.is_empty());
        assert!(
            cart.persistence()
                .backend()
                .get_item(CART_STORAGE_KEY)
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn test_adjust_up_and_below_zero() {
        let mut cart = empty_cart();
        let (id, size) = tee();
        cart.add_line(id.clone(), "Tee", Price::new(40), size.clone())
            .unwrap();

        cart.adjust_quantity(&id, &size, 4).unwrap();
        assert_eq!(cart.count(), 5);

        cart.adjust_quantity(&id, &size, -50).unwrap();
        assert!(cart.is_empty());
        assert_eq!(cart.count(), 0);
    }

    #[test]
    fn test_every_mutation_is_persisted() {
        let mut cart = empty_cart();
        let (id, size) = tee();
        cart.add_line(id.clone(), "Tee", Price::new(40), size.clone())
            .unwrap();
        cart.add_line(ProductId::new("B"), "Hoodie", Price::new(120), Size::new("L"))
            .unwrap();
        cart.adjust_quantity(&id, &size, 2).unwrap();

        let reloaded = CartStore::initialize(cart.into_persistence());
        assert_eq!(reloaded.lines().len(), 2);
        assert_eq!(reloaded.lines()[0].quantity, 3);
        assert_eq!(reloaded.lines()[1].product_id.as_str(), "B");
        assert_eq!(reloaded.total(), Price::new(240));
    }

    #[test]
    fn test_initialize_discards_malformed_data() {
        let mut backend = MemoryStore::new();
        backend
            .set_item(CART_STORAGE_KEY, "[{\"id\":1}]".to_string())
            .unwrap();
        let cart = CartStore::initialize(LocalCartStorage::new(backend));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_initialize_repairs_duplicate_lines() {
        let mut backend = MemoryStore::new();
        backend
            .set_item(
                CART_STORAGE_KEY,
                r#"[{"id":"A","name":"Tee","price":40,"size":"M","quantity":1},
                    {"id":"A","name":"Tee","price":40,"size":"M","quantity":2},
                    {"id":"B","name":"Cap","price":25,"size":"OS","quantity":0}]"#
                    .to_string(),
            )
            .unwrap();
        let cart = CartStore::initialize(LocalCartStorage::new(backend));
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.count(), 3);

        let raw = cart
            .persistence()
            .backend()
            .get_item(CART_STORAGE_KEY)
            .unwrap()
            .unwrap();
        assert_eq!(
            raw,
            r#"[{"id":"A","name":"Tee","price":40,"size":"M","quantity":3}]"#
        );
    }

    #[test]
    fn test_initialize_leaves_valid_storage_untouched() {
        let mut backend = MemoryStore::new();
        let raw = r#"[ {"id":"A","name":"Tee","price":40,"size":"M","quantity":1} ]"#;
        backend
            .set_item(CART_STORAGE_KEY, raw.to_string())
            .unwrap();
        let cart = CartStore::initialize(LocalCartStorage::new(backend));
        assert_eq!(
            cart.persistence()
                .backend()
                .get_item(CART_STORAGE_KEY)
                .unwrap()
                .as_deref(),
            Some(raw)
        );
    }

    #[test]
    fn test_quantity_and_total_saturate() {
        let mut cart = empty_cart();
        let (id, size) = tee();
        cart.add_line(id.clone(), "Tee", Price::new(u64::MAX), size.clone())
            .unwrap();

        cart.adjust_quantity(&id, &size, i64::MAX).unwrap();
        assert_eq!(cart.lines()[0].quantity, u32::MAX);
        assert_eq!(cart.total(), Price::new(u64::MAX));

        cart.add_line(id.clone(), "Tee", Price::new(u64::MAX), size.clone())
            .unwrap();
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, u32::MAX);
        assert!(cart.shipping_progress(Price::new(200)).is_qualified());

        cart.adjust_quantity(&id, &size, i64::MIN).unwrap();
        assert!(cart.is_empty());
        assert_eq!(
            cart.persistence()
                .backend()
                .get_item(CART_STORAGE_KEY)
                .unwrap()
                .as_deref(),
            Some("[]")
        );
    }

    #[test]
    fn test_failed_write_rolls_back() {
        let mut cart = CartStore::initialize(LocalCartStorage::new(FlakyStore::default()));
        let (id, size) = tee();
        cart.add_line(id.clone(), "Tee", Price::new(40), size.clone())
            .unwrap();

        let mut persistence = cart.into_persistence();
        persistence.backend_mut().fail_writes = true;
        let mut cart = CartStore::initialize(persistence);

        let result = cart.add_line(id.clone(), "Tee", Price::new(40), size.clone());
        assert!(matches!(result, Err(StorageError::Io(_))));
        assert_eq!(cart.count(), 1);

        assert!(cart.adjust_quantity(&id, &size, -1).is_err());
        assert_eq!(cart.count(), 1);
    }

    #[test]
    fn test_shipping_progress_tracks_total() {
        let mut cart = empty_cart();
        cart.add_line(ProductId::new("A"), "Tee", Price::new(120), Size::new("M"))
            .unwrap();
        let progress = cart.shipping_progress(Price::new(200));
        assert_eq!(progress.remaining, Price::new(80));

        cart.add_line(ProductId::new("B"), "Cap", Price::new(130), Size::new("OS"))
            .unwrap();
        assert!(cart.shipping_progress(Price::new(200)).is_qualified());
    }
}
