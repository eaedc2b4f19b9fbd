//! Wire shapes for the ERP backend. The backend wraps payloads in a
//! `{success, message, data}` envelope; amounts are serialized rounded to two
//! decimal places because this is a persistence boundary.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{HeaderTotals, LineItem, LookupEntry, Lot, PurchaseHeader};
use crate::money::round2;

fn default_success() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default = "default_success")]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
}

#[derive(Debug, Serialize)]
pub struct StoreHeaderRequest {
    pub supplier_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<String>,
    pub challan_no: String,
    pub challan_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub invoice_no: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub po_number: String,
    pub notes: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<String>,
    pub subtotal: Decimal,
    pub gst_total: Decimal,
    pub grand_total: Decimal,
    pub discount_amount: Decimal,
    pub net_total: Decimal,
}

impl StoreHeaderRequest {
    pub fn from_header(header: &PurchaseHeader, totals: &HeaderTotals) -> Self {
        Self {
            supplier_id: header.vendor_ref.clone(),
            agent_id: header.agent_ref.clone(),
            challan_no: header.challan_number.clone(),
            challan_date: header.challan_date,
            invoice_no: header.invoice_number.clone(),
            invoice_date: header.invoice_date,
            po_number: header.po_number.clone(),
            notes: header.notes.clone(),
            payment_type: header.payment_type.map(|p| format!("{:?}", p)),
            payment_status: header.payment_status.map(|p| format!("{:?}", p)),
            subtotal: round2(totals.subtotal),
            gst_total: round2(totals.gst_total),
            grand_total: round2(totals.grand_total),
            discount_amount: round2(totals.discount_amount),
            net_total: round2(totals.net_total),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreatedPurchaseData {
    #[serde(alias = "challan_id")]
    pub purchase_id: Option<Uuid>,
    #[serde(default)]
    pub lot_no: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LineItemDto {
    pub fabric_id: String,
    pub product_type: String,
    pub color: String,
    pub gsm: String,
    pub width: String,
    pub hsn_code: String,
    pub description: String,
    pub quantity_mtr: Decimal,
    pub rate_per_mtr: Decimal,
    pub gst_percent: Decimal,
    pub amount: Decimal,
    pub gst_amount: Decimal,
    pub total_amount: Decimal,
}

impl From<&LineItem> for LineItemDto {
    fn from(item: &LineItem) -> Self {
        Self {
            fabric_id: item.fabric_ref.clone(),
            product_type: item.fabric_type.clone(),
            color: item.color.clone(),
            gsm: item.gsm.clone(),
            width: item.width.clone(),
            hsn_code: item.hsn_code.clone(),
            description: item.description.clone(),
            quantity_mtr: item.quantity,
            rate_per_mtr: item.rate_per_unit,
            gst_percent: item.gst_percent,
            amount: round2(item.amount),
            gst_amount: round2(item.gst_amount),
            total_amount: round2(item.total_amount),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SubmitItemsRequest {
    pub purchase_id: Uuid,
    pub items: Vec<LineItemDto>,
}

#[derive(Debug, Serialize)]
pub struct LotDto {
    pub sr: usize,
    pub lot_no: String,
    pub meter: Decimal,
}

#[derive(Debug, Serialize)]
pub struct SubmitLotsRequest {
    pub purchase_id: Uuid,
    pub taka_details: Vec<LotDto>,
}

impl SubmitLotsRequest {
    pub fn from_lots(purchase_id: Uuid, lots: &[Lot]) -> Self {
        Self {
            purchase_id,
            taka_details: lots
                .iter()
                .enumerate()
                .map(|(i, lot)| LotDto {
                    sr: i + 1,
                    lot_no: lot.lot_number.clone(),
                    meter: round2(lot.meter),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AddLotRequest {
    pub lot_no: String,
    pub meter: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct SavedLotData {
    pub lot_id: Uuid,
    pub lot_no: String,
    pub meter: Decimal,
    pub purchase_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct UpdateMeterRequest {
    pub meter: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct LookupEntryDto {
    pub id: serde_json::Value,
    pub name: String,
}

impl From<LookupEntryDto> for LookupEntry {
    fn from(dto: LookupEntryDto) -> Self {
        // Backend ids arrive as numbers or strings depending on the table.
        let id = match dto.id {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        };
        LookupEntry { id, name: dto.name }
    }
}
