//! Pure line-amount arithmetic.
//!
//! All monetary and measured values are `rust_decimal::Decimal`. Derived
//! amounts are computed at full precision; rounding to two decimal places
//! (half-up) happens only at presentation and persistence boundaries, so
//! rounding error never compounds across many lines.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Derived amounts for one line: base amount, GST portion, and their sum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LineAmounts {
    pub amount: Decimal,
    pub gst_amount: Decimal,
    pub total_amount: Decimal,
}

impl LineAmounts {
    /// Boundary form: every field rounded to two decimal places, half-up.
    pub fn rounded(&self) -> LineAmounts {
        LineAmounts {
            amount: round2(self.amount),
            gst_amount: round2(self.gst_amount),
            total_amount: round2(self.total_amount),
        }
    }
}

/// Round to two decimal places, half away from zero.
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Compute `amount = quantity × rate`, `gst_amount = amount × gst% / 100`,
/// `total_amount = amount + gst_amount`.
///
/// Out-of-domain inputs (negative quantity or rate, GST outside 0–100) yield
/// all-zero amounts instead of an error: a half-filled form row must remain
/// renderable, and submission validation is the gate that blocks bad input.
pub fn line_amounts(quantity: Decimal, rate_per_unit: Decimal, gst_percent: Decimal) -> LineAmounts {
    if quantity < Decimal::ZERO
        || rate_per_unit < Decimal::ZERO
        || gst_percent < Decimal::ZERO
        || gst_percent > Decimal::ONE_HUNDRED
    {
        return LineAmounts::default();
    }

    let amount = quantity * rate_per_unit;
    let gst_amount = amount * gst_percent / Decimal::ONE_HUNDRED;
    LineAmounts {
        amount,
        gst_amount,
        total_amount: amount + gst_amount,
    }
}
