use lazy_static::lazy_static;
use prometheus::IntCounter;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, instrument};
use uuid::Uuid;

use crate::{
    client::PurchaseApi,
    commands::Command,
    errors::LedgerError,
    events::{Event, EventSender},
    models::Lot,
};

lazy_static! {
    static ref LOT_BATCH_SUBMITS: IntCounter = IntCounter::new(
        "purchase_lot_batches_total",
        "Total number of lot batches submitted"
    )
    .expect("metric can be created");
    static ref LOT_BATCH_FAILURES: IntCounter = IntCounter::new(
        "purchase_lot_batch_failures_total",
        "Total number of failed lot batch submissions"
    )
    .expect("metric can be created");
}

/// Step 3 of the submission workflow: persist the generated lots. Every lot
/// must carry a measured length before the batch may be sent.
#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitLotsCommand {
    pub purchase_id: Uuid,
    pub lots: Vec<Lot>,
}

impl SubmitLotsCommand {
    fn validate(&self) -> Result<(), LedgerError> {
        if self.lots.is_empty() {
            return Err(LedgerError::ValidationError(
                "at least one lot is required".into(),
            ));
        }
        let unmeasured: Vec<&str> = self
            .lots
            .iter()
            .filter(|lot| lot.meter <= rust_decimal::Decimal::ZERO)
            .map(|lot| lot.lot_number.as_str())
            .collect();
        if !unmeasured.is_empty() {
            return Err(LedgerError::ValidationError(format!(
                "meter value required for all lots ({})",
                unmeasured.join(", ")
            )));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl Command for SubmitLotsCommand {
    type Result = ();

    #[instrument(skip(self, api, event_sender), fields(purchase_id = %self.purchase_id, count = self.lots.len()))]
    async fn execute(
        &self,
        api: Arc<dyn PurchaseApi>,
        event_sender: Arc<EventSender>,
    ) -> Result<Self::Result, LedgerError> {
        self.validate().map_err(|e| {
            LOT_BATCH_FAILURES.inc();
            error!("Invalid lot batch: {}", e);
            e
        })?;

        api.submit_lots(self.purchase_id, &self.lots)
            .await
            .map_err(|e| {
                LOT_BATCH_FAILURES.inc();
                e
            })?;

        let total_meter = self.lots.iter().map(|lot| lot.meter).sum();
        info!(
            purchase_id = %self.purchase_id,
            count = self.lots.len(),
            %total_meter,
            "lots submitted"
        );
        LOT_BATCH_SUBMITS.inc();

        event_sender
            .send(Event::LotsSubmitted {
                purchase_id: self.purchase_id,
                count: self.lots.len(),
                total_meter,
            })
            .await
            .map_err(LedgerError::EventError)
    }
}
