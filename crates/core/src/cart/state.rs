//! The ordered sequence of cart lines.

use serde::{Deserialize, Serialize};

use super::CartLine;
use crate::types::{Price, ProductId, Size};

/// Ordered sequence of [`CartLine`]s. Insertion order is display order.
///
/// Serializes as a bare JSON array, which is the layout kept under
/// [`CART_STORAGE_KEY`](super::CART_STORAGE_KEY).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartState {
    lines: Vec<CartLine>,
}

impl CartState {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Build a state from already-ordered lines, repairing any invariant
    /// violations (see [`normalize`](Self::normalize)).
    #[must_use]
    pub fn from_lines(lines: Vec<CartLine>) -> Self {
        let mut state = Self { lines };
        state.normalize();
        state
    }

    /// The lines in display order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Returns `true` if the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Index of the line keyed by `(product_id, size)`, if present.
    #[must_use]
    pub fn position(&self, product_id: &ProductId, size: &Size) -> Option<usize> {
        self.lines
            .iter()
            .position(|line| line.matches(product_id, size))
    }

    /// The line keyed by `(product_id, size)`, if present.
    #[must_use]
    pub fn find(&self, product_id: &ProductId, size: &Size) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.matches(product_id, size))
    }

    pub(crate) fn find_mut(&mut self, product_id: &ProductId, size: &Size) -> Option<&mut CartLine> {
        self.lines
            .iter_mut()
            .find(|line| line.matches(product_id, size))
    }

    pub(crate) fn push(&mut self, line: CartLine) {
        self.lines.push(line);
    }

    /// Drop the line keyed by `(product_id, size)`. Returns whether a line
    /// was removed.
    pub(crate) fn remove(&mut self, product_id: &ProductId, size: &Size) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| !line.matches(product_id, size));
        self.lines.len() != before
    }

    /// Sum of `unit_price * quantity` over all lines.
    #[must_use]
    pub fn total(&self) -> Price {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Sum of quantities over all lines.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Repair a state that parsed but breaks the cart invariants.
    ///
    /// Zero-quantity lines are dropped and duplicate `(product_id, size)`
    /// entries are folded into the first occurrence. Returns `true` if
    /// anything changed.
    pub fn normalize(&mut self) -> bool {
        let original_len = self.lines.len();
        let mut merged: Vec<CartLine> = Vec::with_capacity(original_len);

        for line in self.lines.drain(..) {
            if line.quantity == 0 {
                continue;
            }
            match merged
                .iter_mut()
                .find(|kept| kept.matches(&line.product_id, &line.size))
            {
                Some(kept) => kept.quantity = kept.quantity.saturating_add(line.quantity),
                None => merged.push(line),
            }
        }

        let changed = merged.len() != original_len;
        self.lines = merged;
        changed
    }
}

impl From<Vec<CartLine>> for CartState {
    fn from(lines: Vec<CartLine>) -> Self {
        Self::from_lines(lines)
    }
}
