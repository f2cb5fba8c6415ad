//! Render-ready snapshot of the cart panel.
//!
//! The store exposes only queries; whatever draws the panel (a page script,
//! the CLI) builds a [`CartView`] after each mutation and renders that.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use super::{CartLine, CartPersistence, CartStore, ShippingProgress};
use crate::types::Price;

/// Placeholder shown in place of the line list when the cart is empty.
pub const EMPTY_CART_MESSAGE: &str = "YOUR CART IS EMPTY";

/// Message shown once the cart qualifies for free shipping.
pub const FREE_SHIPPING_UNLOCKED_MESSAGE: &str = "YOU'VE UNLOCKED FREE SHIPPING";

/// One line of the cart panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemView {
    pub product_id: String,
    pub name: String,
    pub size: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
}

/// Shipping progress indicator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShippingView {
    pub qualified: bool,
    /// Width of the progress bar, whole percent in `0..=100`.
    pub percent: u8,
    pub message: String,
}

/// Cart panel display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub item_count: u64,
    pub shipping: ShippingView,
}

impl CartView {
    /// Snapshot `store`, measuring shipping against `threshold`.
    #[must_use]
    pub fn build<P: CartPersistence>(store: &CartStore<P>, threshold: Price) -> Self {
        Self {
            items: store.lines().iter().map(CartItemView::from).collect(),
            subtotal: store.total().to_string(),
            item_count: store.count(),
            shipping: ShippingView::from(store.shipping_progress(threshold)),
        }
    }

    /// Returns `true` if the panel should show [`EMPTY_CART_MESSAGE`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns `true` if the count badge should be shown.
    #[must_use]
    pub const fn show_badge(&self) -> bool {
        self.item_count > 0
    }
}

impl From<&CartLine> for CartItemView {
    fn from(line: &CartLine) -> Self {
        Self {
            product_id: line.product_id.to_string(),
            name: line.name.clone(),
            size: line.size.to_string(),
            quantity: line.quantity,
            price: line.unit_price.to_string(),
            line_price: line.line_total().to_string(),
        }
    }
}

impl From<ShippingProgress> for ShippingView {
    fn from(progress: ShippingProgress) -> Self {
        let qualified = progress.is_qualified();
        let message = if qualified {
            FREE_SHIPPING_UNLOCKED_MESSAGE.to_string()
        } else {
            format!("{} AWAY FROM FREE SHIPPING", progress.remaining)
        };

        Self {
            qualified,
            percent: whole_percent(progress.percent),
            message,
        }
    }
}

/// Round a `0..=100` decimal percentage down to a whole number.
fn whole_percent(percent: Decimal) -> u8 {
    percent.floor().to_u8().unwrap_or(100).min(100)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::cart::{LocalCartStorage, MemoryStore};
    use crate::types::{ProductId, Size};

    fn cart() -> CartStore<LocalCartStorage<MemoryStore>> {
        CartStore::initialize(LocalCartStorage::new(MemoryStore::new()))
    }

    #[test]
    fn test_empty_cart_view() {
        let view = CartView::build(&cart(), Price::new(200));
        assert!(view.is_empty());
        assert!(!view.show_badge());
        assert_eq!(view.subtotal, "$0");
        assert_eq!(view.shipping.percent, 0);
        assert_eq!(view.shipping.message, "$200 AWAY FROM FREE SHIPPING");
    }

    #[test]
    fn test_line_prices_are_formatted() {
        let mut store = cart();
        for _ in 0..3 {
            store
                .add_line(ProductId::new("A"), "HALO TEE", Price::new(40), Size::new("M"))
                .unwrap();
        }
        let view = CartView::build(&store, Price::new(200));

        assert_eq!(view.item_count, 3);
        assert_eq!(view.subtotal, "$120");
        let item = &view.items[0];
        assert_eq!(item.name, "HALO TEE");
        assert_eq!(item.size, "M");
        assert_eq!(item.price, "$40");
        assert_eq!(item.line_price, "$120");
        assert_eq!(view.shipping.percent, 60);
        assert_eq!(view.shipping.message, "$80 AWAY FROM FREE SHIPPING");
    }

    #[test]
    fn test_qualified_shipping_message() {
        let mut store = cart();
        store
            .add_line(ProductId::new("B"), "RELIC HOODIE", Price::new(250), Size::new("L"))
            .unwrap();
        let view = CartView::build(&store, Price::new(200));
        assert!(view.shipping.qualified);
        assert_eq!(view.shipping.percent, 100);
        assert_eq!(view.shipping.message, FREE_SHIPPING_UNLOCKED_MESSAGE);
    }

    #[test]
    fn test_fractional_percent_rounds_down() {
        assert_eq!(whole_percent(Decimal::new(6666, 2)), 66);
    }
}
