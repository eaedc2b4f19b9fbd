use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    client::PurchaseApi,
    commands::Command,
    errors::LedgerError,
    events::{Event, EventSender},
    models::Lot,
    services::lots::LotTracker,
};

/// Append one lot to an already-persisted purchase. The new number is the
/// maximum sequence observed among the existing lots plus one, so a number
/// freed by an earlier delete is never reused.
#[derive(Debug, Serialize, Deserialize)]
pub struct AddLotCommand {
    pub purchase_id: Uuid,
    pub existing: Vec<Lot>,
    /// Base code to use when no lots exist yet.
    pub fallback_base_code: String,
}

#[async_trait::async_trait]
impl Command for AddLotCommand {
    type Result = Lot;

    #[instrument(skip(self, api, event_sender), fields(purchase_id = %self.purchase_id))]
    async fn execute(
        &self,
        api: Arc<dyn PurchaseApi>,
        event_sender: Arc<EventSender>,
    ) -> Result<Self::Result, LedgerError> {
        let tracker =
            LotTracker::from_existing(self.fallback_base_code.clone(), self.existing.clone());
        let lot_number = format!("{}-{}", tracker.base_code(), tracker.max_sequence() + 1);

        let saved = api
            .add_lot(self.purchase_id, &lot_number, rust_decimal::Decimal::ZERO)
            .await?;

        info!(purchase_id = %self.purchase_id, lot_number = %saved.lot_number, "lot added");
        event_sender
            .send(Event::LotAdded {
                purchase_id: self.purchase_id,
                lot_id: saved.id,
                lot_number: saved.lot_number.clone(),
            })
            .await
            .map_err(LedgerError::EventError)?;

        Ok(saved)
    }
}
