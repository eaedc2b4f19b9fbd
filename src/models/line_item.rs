use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::money;

/// One fabric line on a purchase.
///
/// `amount`, `gst_amount`, and `total_amount` are derived: they are only ever
/// written by [`LineItem::recalculate`], which the ledger runs after every
/// edit. A line starts empty and lives only within one purchase-edit session.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Catalog id of the fabric; empty until the user picks one.
    pub fabric_ref: String,
    pub fabric_type: String,
    pub color: String,
    /// Fabric weight, free text (e.g. "120 gsm").
    pub gsm: String,
    pub width: String,
    pub hsn_code: String,
    pub description: String,
    /// Meters ordered.
    pub quantity: Decimal,
    /// Currency per meter.
    pub rate_per_unit: Decimal,
    /// 0–100.
    pub gst_percent: Decimal,
    pub amount: Decimal,
    pub gst_amount: Decimal,
    pub total_amount: Decimal,
}

impl LineItem {
    /// Refresh the derived amounts from quantity, rate, and GST percent.
    pub fn recalculate(&mut self) {
        let amounts = money::line_amounts(self.quantity, self.rate_per_unit, self.gst_percent);
        self.amount = amounts.amount;
        self.gst_amount = amounts.gst_amount;
        self.total_amount = amounts.total_amount;
    }

    /// Merge a partial edit into this line and refresh the derived amounts.
    pub fn apply(&mut self, patch: LineItemPatch) {
        if let Some(v) = patch.fabric_ref {
            self.fabric_ref = v;
        }
        if let Some(v) = patch.fabric_type {
            self.fabric_type = v;
        }
        if let Some(v) = patch.color {
            self.color = v;
        }
        if let Some(v) = patch.gsm {
            self.gsm = v;
        }
        if let Some(v) = patch.width {
            self.width = v;
        }
        if let Some(v) = patch.hsn_code {
            self.hsn_code = v;
        }
        if let Some(v) = patch.description {
            self.description = v;
        }
        if let Some(v) = patch.quantity {
            self.quantity = v;
        }
        if let Some(v) = patch.rate_per_unit {
            self.rate_per_unit = v;
        }
        if let Some(v) = patch.gst_percent {
            self.gst_percent = v;
        }
        self.recalculate();
    }

    /// Submission-stage checks. Returns every problem, not just the first,
    /// so the caller can report the whole line at once.
    pub fn submission_problems(&self) -> Vec<&'static str> {
        let mut problems = Vec::new();
        if self.fabric_ref.trim().is_empty() {
            problems.push("fabric is required");
        }
        if self.quantity <= Decimal::ZERO {
            problems.push("quantity must be positive");
        }
        if self.rate_per_unit <= Decimal::ZERO {
            problems.push("rate must be positive");
        }
        problems
    }
}

/// Partial edit of a line; `None` fields are left untouched.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct LineItemPatch {
    pub fabric_ref: Option<String>,
    pub fabric_type: Option<String>,
    pub color: Option<String>,
    pub gsm: Option<String>,
    pub width: Option<String>,
    pub hsn_code: Option<String>,
    pub description: Option<String>,
    pub quantity: Option<Decimal>,
    pub rate_per_unit: Option<Decimal>,
    pub gst_percent: Option<Decimal>,
}

impl LineItemPatch {
    pub fn quantity(quantity: Decimal) -> Self {
        Self {
            quantity: Some(quantity),
            ..Default::default()
        }
    }

    pub fn pricing(quantity: Decimal, rate_per_unit: Decimal, gst_percent: Decimal) -> Self {
        Self {
            quantity: Some(quantity),
            rate_per_unit: Some(rate_per_unit),
            gst_percent: Some(gst_percent),
            ..Default::default()
        }
    }
}
