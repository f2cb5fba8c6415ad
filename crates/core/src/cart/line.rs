//! A single product + size entry in the cart.

use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId, Size};

/// One entry in the cart.
///
/// Identity is the `(product_id, size)` pair; the cart holds at most one line
/// per pair. The serialized field names (`id`, `price`) match the layout the
/// storefront writes to local storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Catalog identifier of the product.
    #[serde(rename = "id")]
    pub product_id: ProductId,
    /// Display name, copied when the line was added.
    pub name: String,
    /// Price of a single unit.
    #[serde(rename = "price")]
    pub unit_price: Price,
    /// Variant chosen by the shopper.
    pub size: Size,
    /// Number of units; always at least 1 while the line is in the cart.
    pub quantity: u32,
}

impl CartLine {
    /// Create a line holding a single unit.
    #[must_use]
    pub fn new(product_id: ProductId, name: String, unit_price: Price, size: Size) -> Self {
        Self {
            product_id,
            name,
            unit_price,
            size,
            quantity: 1,
        }
    }

    /// Returns `true` if this line is keyed by `(product_id, size)`.
    #[must_use]
    pub fn matches(&self, product_id: &ProductId, size: &Size) -> bool {
        self.product_id == *product_id && self.size == *size
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price.times(self.quantity)
    }
}
