use lazy_static::lazy_static;
use prometheus::IntCounter;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, instrument};
use uuid::Uuid;
use validator::Validate;

use crate::{
    client::PurchaseApi,
    commands::Command,
    errors::LedgerError,
    events::{Event, EventSender},
    models::{HeaderTotals, PurchaseFlow, PurchaseHeader},
};

lazy_static! {
    static ref HEADER_SAVES: IntCounter = IntCounter::new(
        "purchase_header_saves_total",
        "Total number of purchase headers saved"
    )
    .expect("metric can be created");
    static ref HEADER_SAVE_FAILURES: IntCounter = IntCounter::new(
        "purchase_header_save_failures_total",
        "Total number of failed purchase header saves"
    )
    .expect("metric can be created");
}

/// Step 1 of the submission workflow: persist the purchase header and obtain
/// the durable purchase id that line items and lots attach to.
#[derive(Debug, Serialize, Deserialize)]
pub struct SaveHeaderCommand {
    pub header: PurchaseHeader,
    pub totals: HeaderTotals,
    pub flow: PurchaseFlow,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedHeader {
    pub purchase_id: Uuid,
    pub lot_base_code: Option<String>,
}

impl SaveHeaderCommand {
    /// Required-field checks, reported in form order: the first failing field
    /// aborts before any network call.
    fn validate(&self) -> Result<(), LedgerError> {
        if self.header.vendor_ref.trim().is_empty() {
            return Err(LedgerError::ValidationError("vendor is required".into()));
        }
        if self.header.challan_number.trim().is_empty() {
            return Err(LedgerError::ValidationError(
                "challan number is required".into(),
            ));
        }
        if self.header.challan_date.is_none() {
            return Err(LedgerError::ValidationError(
                "challan date is required".into(),
            ));
        }
        if self.flow == PurchaseFlow::Invoice {
            if self.header.invoice_number.trim().is_empty() {
                return Err(LedgerError::ValidationError(
                    "invoice number is required".into(),
                ));
            }
            if self.header.invoice_date.is_none() {
                return Err(LedgerError::ValidationError(
                    "invoice date is required".into(),
                ));
            }
        }
        self.header.validate()?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl Command for SaveHeaderCommand {
    type Result = SavedHeader;

    #[instrument(skip(self, api, event_sender), fields(challan_no = %self.header.challan_number))]
    async fn execute(
        &self,
        api: Arc<dyn PurchaseApi>,
        event_sender: Arc<EventSender>,
    ) -> Result<Self::Result, LedgerError> {
        self.validate().map_err(|e| {
            HEADER_SAVE_FAILURES.inc();
            error!("Invalid purchase header: {}", e);
            e
        })?;

        let created = api
            .create_purchase_header(&self.header, &self.totals)
            .await
            .map_err(|e| {
                HEADER_SAVE_FAILURES.inc();
                e
            })?;

        // Without an id the workflow cannot attach children; treat as fatal.
        let purchase_id = created.purchase_id.ok_or_else(|| {
            HEADER_SAVE_FAILURES.inc();
            error!("header save response carried no purchase id");
            LedgerError::MissingPurchaseId
        })?;

        info!(
            %purchase_id,
            vendor = %self.header.vendor_ref,
            "purchase header saved"
        );
        HEADER_SAVES.inc();

        event_sender
            .send(Event::PurchaseHeaderSaved(purchase_id))
            .await
            .map_err(LedgerError::EventError)?;

        Ok(SavedHeader {
            purchase_id,
            lot_base_code: created.lot_base_code,
        })
    }
}
