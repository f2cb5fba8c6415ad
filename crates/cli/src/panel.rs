//! Text rendering of the cart panel.

use silver_saints_core::cart::{CartItemView, CartView, EMPTY_CART_MESSAGE};

const PROGRESS_BAR_WIDTH: usize = 20;

/// Render `view` as the cart panel: header with count badge, line items (or
/// the empty placeholder), total, and shipping progress.
///
/// Every row, the last included, ends with a newline.
#[must_use]
pub fn render(view: &CartView) -> String {
    let mut rows = Vec::with_capacity(view.items.len() + 3);

    rows.push(if view.show_badge() {
        format!("CART ({})", view.item_count)
    } else {
        "CART".to_string()
    });

    if view.is_empty() {
        rows.push(format!("  {EMPTY_CART_MESSAGE}"));
    } else {
        let name_width = view
            .items
            .iter()
            .map(|item| item.name.chars().count())
            .max()
            .unwrap_or(0);

        rows.extend(view.items.iter().map(|item| item_row(item, name_width)));
        rows.push(format!("TOTAL {}", view.subtotal));
        rows.push(progress_row(view));
    }

    let mut out = rows.join("\n");
    out.push('\n');
    out
}

fn item_row(item: &CartItemView, name_width: usize) -> String {
    format!(
        "  {name:<name_width$}  SIZE: {size:<4} x{quantity:<3} {line_price:>8}",
        name = item.name,
        size = item.size,
        quantity = item.quantity,
        line_price = item.line_price,
    )
}

fn progress_row(view: &CartView) -> String {
    let filled = usize::from(view.shipping.percent).min(100) * PROGRESS_BAR_WIDTH / 100;
    format!(
        "[{}{}] {:>3}%  {}",
        "#".repeat(filled),
        "-".repeat(PROGRESS_BAR_WIDTH - filled),
        view.shipping.percent,
        view.shipping.message,
    )
}
