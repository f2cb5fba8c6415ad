//! Silver Saints Core - Cart state and shared types.
//!
//! This crate provides the shopper's cart and the types it is built from:
//! - `storefront` - Static site server for the drop pages
//! - `cli` - Command-line cart panel backed by a local storage file
//!
//! # Architecture
//!
//! The core crate performs no I/O of its own. Persistence goes through the
//! [`cart::KeyValueStore`] port, which callers implement for whatever backs
//! their origin storage. An in-memory implementation is provided for tests
//! and embedding.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product IDs, sizes, and prices
//! - [`cart`] - Cart store, persistence port, shipping progress, render view

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod types;

pub use cart::{
    CART_STORAGE_KEY, CartLine, CartPersistence, CartState, CartStore, CartView,
    DEFAULT_FREE_SHIPPING_THRESHOLD, KeyValueStore, LocalCartStorage, MemoryStore,
    ShippingProgress, StorageError,
};
pub use types::*;
