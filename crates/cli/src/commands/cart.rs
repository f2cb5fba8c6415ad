//! Cart commands.
//!
//! Each command opens the storage file, initializes the cart from it, applies
//! at most one mutation, and returns the redrawn panel.
//!
//! # Usage
//!
//! ```bash
//! ss-cli cart add --id halo-tee --name "HALO TEE" --price 40 --size M
//! ss-cli cart adjust --id halo-tee --size M --delta -1
//! ss-cli cart remove --id halo-tee --size M
//! ss-cli cart show
//! ss-cli cart clear
//! ```

use std::path::{Path, PathBuf};

use silver_saints_core::{
    CART_STORAGE_KEY, CartStore, CartView, KeyError, KeyValueStore, LocalCartStorage, Price,
    ProductId, Size, StorageError,
};
use thiserror::Error;
use tracing::info;

use crate::panel;
use crate::storage::JsonFileStore;

/// Errors that can occur while running a cart command.
#[derive(Debug, Error)]
pub enum CartCommandError {
    /// The storage file could not be read or written.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// A product ID or size argument was empty.
    #[error("Invalid argument: {0}")]
    InvalidKey(#[from] KeyError),

    /// `add` was called without choosing a size.
    #[error("Select a size before adding to cart")]
    SizeNotSelected,
}

/// Where the cart lives and how its panel is drawn.
#[derive(Debug, Clone)]
pub struct CartContext {
    /// Local storage file.
    pub storage: PathBuf,
    /// Cart total at which shipping is free.
    pub free_shipping_threshold: Price,
}

type FileCart = CartStore<LocalCartStorage<JsonFileStore>>;

fn open_cart(path: &Path) -> Result<FileCart, CartCommandError> {
    let backend = JsonFileStore::open(path)?;
    Ok(CartStore::initialize(LocalCartStorage::new(backend)))
}

fn redraw(ctx: &CartContext, cart: &FileCart) -> String {
    panel::render(&CartView::build(cart, ctx.free_shipping_threshold))
}

/// Draw the cart panel without changing anything.
///
/// # Errors
///
/// Returns an error if the storage file cannot be opened.
pub fn show(ctx: &CartContext) -> Result<String, CartCommandError> {
    let cart = open_cart(&ctx.storage)?;
    Ok(redraw(ctx, &cart))
}

/// Add one unit of a product in the selected size.
///
/// A missing or blank `size` is refused before the cart is touched.
///
/// # Errors
///
/// Returns [`CartCommandError::SizeNotSelected`] without a size, or an error
/// if the product ID is blank or storage fails.
pub fn add(
    ctx: &CartContext,
    id: &str,
    name: &str,
    price: u64,
    size: Option<&str>,
) -> Result<String, CartCommandError> {
    let size = size
        .and_then(|s| Size::parse(s).ok())
        .ok_or(CartCommandError::SizeNotSelected)?;
    let product_id = ProductId::parse(id)?;

    let mut cart = open_cart(&ctx.storage)?;
    cart.add_line(product_id.clone(), name, Price::new(price), size.clone())?;
    info!(%product_id, %size, "added to cart");

    Ok(redraw(ctx, &cart))
}

/// Remove a product/size line.
///
/// # Errors
///
/// Returns an error if an argument is blank or storage fails.
pub fn remove(ctx: &CartContext, id: &str, size: &str) -> Result<String, CartCommandError> {
    let product_id = ProductId::parse(id)?;
    let size = Size::parse(size)?;

    let mut cart = open_cart(&ctx.storage)?;
    cart.remove_line(&product_id, &size)?;
    info!(%product_id, %size, "removed from cart");

    Ok(redraw(ctx, &cart))
}

/// Change a line's quantity by `delta`; the line goes away at zero.
///
/// # Errors
///
/// Returns an error if an argument is blank or storage fails.
pub fn adjust(
    ctx: &CartContext,
    id: &str,
    size: &str,
    delta: i64,
) -> Result<String, CartCommandError> {
    let product_id = ProductId::parse(id)?;
    let size = Size::parse(size)?;

    let mut cart = open_cart(&ctx.storage)?;
    cart.adjust_quantity(&product_id, &size, delta)?;
    info!(%product_id, %size, delta, "adjusted quantity");

    Ok(redraw(ctx, &cart))
}

/// Drop the cart from storage entirely. Other keys are left alone.
///
/// # Errors
///
/// Returns an error if storage fails.
pub fn clear(ctx: &CartContext) -> Result<String, CartCommandError> {
    let mut backend = JsonFileStore::open(&ctx.storage)?;
    backend.remove_item(CART_STORAGE_KEY)?;
    info!(path = %backend.path().display(), "cleared cart");

    let cart = CartStore::initialize(LocalCartStorage::new(backend));
    Ok(redraw(ctx, &cart))
}
