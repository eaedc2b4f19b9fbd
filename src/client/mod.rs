//! Abstraction over the ERP REST backend consumed by the ledger.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::LedgerError;
use crate::models::{HeaderTotals, LineItem, LookupEntry, Lot, PurchaseHeader};

pub mod dto;
pub mod http;

pub use http::HttpPurchaseApi;

/// Response of a successful header save. `purchase_id` stays an `Option`
/// here; the save-header command is the place that treats a missing id as
/// fatal for the submission.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreatedPurchase {
    pub purchase_id: Option<Uuid>,
    /// Server-assigned base lot code, when the backend generates one.
    pub lot_base_code: Option<String>,
}

/// The remote operations this module consumes. JSON over HTTP in production
/// ([`HttpPurchaseApi`]); tests substitute their own implementations.
#[async_trait]
pub trait PurchaseApi: Send + Sync {
    async fn create_purchase_header(
        &self,
        header: &PurchaseHeader,
        totals: &HeaderTotals,
    ) -> Result<CreatedPurchase, LedgerError>;

    async fn submit_line_items(
        &self,
        purchase_id: Uuid,
        items: &[LineItem],
    ) -> Result<(), LedgerError>;

    async fn submit_lots(&self, purchase_id: Uuid, lots: &[Lot]) -> Result<(), LedgerError>;

    async fn add_lot(
        &self,
        purchase_id: Uuid,
        lot_number: &str,
        meter: Decimal,
    ) -> Result<Lot, LedgerError>;

    async fn update_lot_meter(&self, lot_id: Uuid, meter: Decimal) -> Result<(), LedgerError>;

    async fn delete_lot(&self, lot_id: Uuid) -> Result<(), LedgerError>;

    // Read-only lookup collaborators, fetched once per session.
    async fn fetch_vendors(&self) -> Result<Vec<LookupEntry>, LedgerError>;
    async fn fetch_agents(&self) -> Result<Vec<LookupEntry>, LedgerError>;
    async fn fetch_fabrics(&self) -> Result<Vec<LookupEntry>, LedgerError>;
    async fn fetch_fabric_types(&self) -> Result<Vec<LookupEntry>, LedgerError>;
    async fn fetch_fabric_colors(&self) -> Result<Vec<LookupEntry>, LedgerError>;
}
