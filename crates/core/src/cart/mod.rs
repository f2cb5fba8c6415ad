//! The shopper's cart.
//!
//! # Lifecycle
//!
//! 1. [`CartStore::initialize`] loads the persisted [`CartState`] through a
//!    [`CartPersistence`] port (empty on missing or malformed data).
//! 2. The UI layer calls [`CartStore::add_line`], [`CartStore::remove_line`],
//!    and [`CartStore::adjust_quantity`]; each writes the full state back.
//! 3. After every mutation the UI redraws from the query methods or a
//!    [`CartView`] snapshot.
//!
//! A cart line is identified by `(product_id, size)`; the state never holds
//! two lines for the same pair and never holds a line with quantity zero.

mod line;
mod shipping;
mod state;
mod storage;
mod store;
mod view;

pub use line::CartLine;
pub use shipping::{DEFAULT_FREE_SHIPPING_THRESHOLD, ShippingProgress};
pub use state::CartState;
pub use storage::{
    CART_STORAGE_KEY, CartPersistence, KeyValueStore, LocalCartStorage, MemoryStore, StorageError,
};
pub use store::CartStore;
pub use view::{
    CartItemView, CartView, EMPTY_CART_MESSAGE, FREE_SHIPPING_UNLOCKED_MESSAGE, ShippingView,
};
