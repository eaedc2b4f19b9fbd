use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::money::round2;
use crate::services::line_items::LedgerTotals;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentType {
    Cash,
    Credit,
    Bank,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    Pending,
    Partial,
    Paid,
}

/// Which entry flow produced this purchase. Challan-only entry needs just the
/// challan fields; the invoice flow additionally requires the party invoice
/// number and date before the header may be saved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PurchaseFlow {
    Challan,
    Invoice,
}

/// Draft header of one purchase transaction. Built client-side; persisting it
/// is what yields the durable purchase id that line items and lots attach to.
#[derive(Clone, Debug, Default, Serialize, Deserialize, Validate)]
pub struct PurchaseHeader {
    pub vendor_ref: String,
    pub agent_ref: Option<String>,
    pub challan_number: String,
    pub challan_date: Option<NaiveDate>,
    pub invoice_number: String,
    pub invoice_date: Option<NaiveDate>,
    pub po_number: String,
    #[validate(length(max = 1000))]
    pub notes: String,
    pub payment_type: Option<PaymentType>,
    pub payment_status: Option<PaymentStatus>,
    pub discount_amount: Decimal,
}

/// Aggregates of a header over its line items.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HeaderTotals {
    pub subtotal: Decimal,
    pub gst_total: Decimal,
    pub grand_total: Decimal,
    pub discount_amount: Decimal,
    pub net_total: Decimal,
}

impl HeaderTotals {
    /// Derive header aggregates from the line-item totals and a discount.
    /// Rounded here because this is the persistence boundary.
    pub fn from_lines(totals: LedgerTotals, discount_amount: Decimal) -> Self {
        let subtotal = round2(totals.subtotal);
        let gst_total = round2(totals.gst_total);
        let grand_total = round2(totals.grand_total);
        Self {
            subtotal,
            gst_total,
            grand_total,
            discount_amount,
            net_total: grand_total - discount_amount,
        }
    }
}
