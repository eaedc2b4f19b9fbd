use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    client::PurchaseApi,
    commands::Command,
    errors::LedgerError,
    events::{Event, EventSender},
};

/// In-place edit of one persisted lot's measured length.
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateLotMeterCommand {
    pub lot_id: Uuid,
    pub meter: Decimal,
}

#[async_trait::async_trait]
impl Command for UpdateLotMeterCommand {
    type Result = ();

    #[instrument(skip(self, api, event_sender), fields(lot_id = %self.lot_id, meter = %self.meter))]
    async fn execute(
        &self,
        api: Arc<dyn PurchaseApi>,
        event_sender: Arc<EventSender>,
    ) -> Result<Self::Result, LedgerError> {
        if self.meter < Decimal::ZERO {
            return Err(LedgerError::InvalidLength(format!(
                "meter length must be non-negative, got {}",
                self.meter
            )));
        }

        api.update_lot_meter(self.lot_id, self.meter).await?;

        info!(lot_id = %self.lot_id, meter = %self.meter, "lot meter updated");
        event_sender
            .send(Event::LotMeterUpdated {
                lot_id: self.lot_id,
                meter: self.meter,
            })
            .await
            .map_err(LedgerError::EventError)
    }
}
