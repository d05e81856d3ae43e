use serde::{Deserialize, Serialize};

use cartline_types::Money;

/// Pricing rules applied when deriving cart totals.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Tax rate in basis points (800 = 8%), applied to the subtotal and
    /// rounded to the nearest whole major unit.
    pub tax_rate_bps: u32,
    /// Shipping is waived when the subtotal strictly exceeds this amount.
    pub free_shipping_over: Money,
    /// Flat shipping charge below the waiver threshold.
    pub flat_shipping: Money,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            tax_rate_bps: 800,
            free_shipping_over: Money::from_major(500),
            flat_shipping: Money::from_major(25),
        }
    }
}
