use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::errors::SubmissionStep;

/// Events emitted by the ledger as the purchase workflow progresses.
///
/// The presentation layer subscribes to these to show per-step toasts and to
/// refresh lists after a mutation; nothing in this crate consumes them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    PurchaseHeaderSaved(Uuid),
    LineItemsSubmitted {
        purchase_id: Uuid,
        count: usize,
    },
    LotsSubmitted {
        purchase_id: Uuid,
        count: usize,
        total_meter: Decimal,
    },
    LotAdded {
        purchase_id: Uuid,
        lot_id: Uuid,
        lot_number: String,
    },
    LotMeterUpdated {
        lot_id: Uuid,
        meter: Decimal,
    },
    LotDeleted(Uuid),
    SubmissionStepFailed {
        step: SubmissionStep,
        message: String,
    },
}

#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Sends an event asynchronously.
    pub async fn send(&self, event: Event) -> Result<(), String> {
        self.sender
            .send(event)
            .await
            .map_err(|e| format!("Failed to send event: {}", e))
    }
}

/// Convenience constructor for a bounded event channel.
pub fn channel(buffer: usize) -> (EventSender, mpsc::Receiver<Event>) {
    let (tx, rx) = mpsc::channel(buffer);
    (EventSender::new(tx), rx)
}
