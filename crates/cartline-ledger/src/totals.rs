use serde::Serialize;

use cartline_types::Money;

use crate::item::LineItem;
use crate::pricing::PricingConfig;

/// Pricing aggregates derived from a cart state.
///
/// A plain value object: computing it never mutates the ledger and never
/// reaches any collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub subtotal: Money,
    pub shipping: Money,
    pub tax: Money,
    pub total: Money,
    /// Total units across all lines, not the number of lines.
    pub item_count: u64,
}

impl Totals {
    /// Deterministic projection of the pricing aggregates.
    ///
    /// - `subtotal`: Σ `unit_price × quantity`
    /// - `shipping`: waived only when the subtotal strictly exceeds the
    ///   threshold, so a subtotal of exactly 500.00 still pays the flat rate
    /// - `tax`: basis-point rate on the subtotal, rounded half-away-from-zero
    ///   to the nearest whole major unit
    /// - `total`: subtotal + shipping + tax
    ///
    /// The formulas apply uniformly to the empty cart; suppressing the
    /// summary when nothing is in the cart is a presentation concern.
    pub fn compute(items: &[LineItem], pricing: &PricingConfig) -> Totals {
        let subtotal: Money = items.iter().map(LineItem::line_total).sum();
        let shipping = if subtotal > pricing.free_shipping_over {
            Money::ZERO
        } else {
            pricing.flat_shipping
        };
        let tax = subtotal.scale_bps_to_major(pricing.tax_rate_bps);
        let item_count = items.iter().map(|item| u64::from(item.quantity)).sum();

        Totals {
            subtotal,
            shipping,
            tax,
            total: subtotal + shipping + tax,
            item_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use cartline_types::ProductId;

    use super::*;

    fn line(id: &str, price_minor: i64, quantity: u32) -> LineItem {
        LineItem {
            id: ProductId::from(id),
            name: format!("Product {id}"),
            category: "Test".into(),
            unit_price: Money::from_minor(price_minor),
            original_unit_price: None,
            quantity,
            image_ref: String::new(),
        }
    }

    fn compute(items: &[LineItem]) -> Totals {
        Totals::compute(items, &PricingConfig::default())
    }

    #[test]
    fn worked_example_from_storefront() {
        // one line at 300.00 × 2: subtotal 600, free shipping, 8% tax = 48
        let totals = compute(&[line("a", 30_000, 2)]);
        assert_eq!(totals.subtotal, Money::from_major(600));
        assert_eq!(totals.shipping, Money::ZERO);
        assert_eq!(totals.tax, Money::from_major(48));
        assert_eq!(totals.total, Money::from_major(648));
        assert_eq!(totals.item_count, 2);
    }

    #[test]
    fn empty_ledger_pays_flat_shipping() {
        let totals = compute(&[]);
        assert_eq!(totals.subtotal, Money::ZERO);
        assert_eq!(totals.shipping, Money::from_major(25));
        assert_eq!(totals.tax, Money::ZERO);
        assert_eq!(totals.total, Money::from_major(25));
        assert_eq!(totals.item_count, 0);
    }

    #[test]
    fn shipping_threshold_is_strict() {
        let at_threshold = compute(&[line("a", 50_000, 1)]);
        assert_eq!(at_threshold.shipping, Money::from_major(25));

        let over_threshold = compute(&[line("a", 50_001, 1)]);
        assert_eq!(over_threshold.shipping, Money::ZERO);
    }

    #[test]
    fn tax_rounds_half_away_from_zero() {
        // 8% of 6.25 is 0.50 → rounds to 1.00
        let totals = compute(&[line("a", 625, 1)]);
        assert_eq!(totals.tax, Money::from_major(1));

        // 8% of 6.12 is 0.4896 → rounds to 0.00
        let totals = compute(&[line("a", 612, 1)]);
        assert_eq!(totals.tax, Money::ZERO);
    }

    #[test]
    fn subtotal_and_count_span_all_lines() {
        let totals = compute(&[line("a", 1_000, 3), line("b", 2_500, 2)]);
        assert_eq!(totals.subtotal, Money::from_minor(8_000));
        assert_eq!(totals.item_count, 5);
        // 80.00 subtotal: flat shipping, 8% tax = 6.40 → rounds to 6.00
        assert_eq!(totals.tax, Money::from_major(6));
        assert_eq!(totals.total, Money::from_minor(8_000 + 2_500 + 600));
    }
}
