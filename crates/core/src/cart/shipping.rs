//! Free-shipping progress.

use rust_decimal::Decimal;

use crate::types::Price;

/// Cart total at which shipping becomes free, unless configured otherwise.
pub const DEFAULT_FREE_SHIPPING_THRESHOLD: Price = Price::new(200);

/// How far a cart total is from the free-shipping threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShippingProgress {
    /// Threshold the progress was measured against.
    pub threshold: Price,
    /// Amount still needed; zero once qualified.
    pub remaining: Price,
    /// Progress toward the threshold in percent, clamped to `0..=100`.
    pub percent: Decimal,
}

impl ShippingProgress {
    /// Measure `total` against `threshold`.
    ///
    /// A zero threshold means every cart qualifies.
    #[must_use]
    pub fn measure(total: Price, threshold: Price) -> Self {
        let remaining = threshold.saturating_sub(total);
        let percent = if threshold.is_zero() {
            Decimal::ONE_HUNDRED
        } else {
            (total.as_decimal() * Decimal::ONE_HUNDRED / threshold.as_decimal())
                .min(Decimal::ONE_HUNDRED)
        };

        Self {
            threshold,
            remaining,
            percent,
        }
    }

    /// Returns `true` once the total has reached the threshold.
    #[must_use]
    pub const fn is_qualified(&self) -> bool {
        self.remaining.is_zero()
    }
}
