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

/// Delete one persisted lot. Surviving lots keep their numbers; any
/// confirmation prompt belongs to the presentation layer.
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteLotCommand {
    pub lot_id: Uuid,
}

#[async_trait::async_trait]
impl Command for DeleteLotCommand {
    type Result = ();

    #[instrument(skip(self, api, event_sender), fields(lot_id = %self.lot_id))]
    async fn execute(
        &self,
        api: Arc<dyn PurchaseApi>,
        event_sender: Arc<EventSender>,
    ) -> Result<Self::Result, LedgerError> {
        api.delete_lot(self.lot_id).await?;

        info!(lot_id = %self.lot_id, "lot deleted");
        event_sender
            .send(Event::LotDeleted(self.lot_id))
            .await
            .map_err(LedgerError::EventError)
    }
}
