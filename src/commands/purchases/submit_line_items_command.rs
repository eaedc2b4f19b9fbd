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
    models::LineItem,
};

lazy_static! {
    static ref ITEM_BATCH_SUBMITS: IntCounter = IntCounter::new(
        "purchase_item_batches_total",
        "Total number of line item batches submitted"
    )
    .expect("metric can be created");
    static ref ITEM_BATCH_FAILURES: IntCounter = IntCounter::new(
        "purchase_item_batch_failures_total",
        "Total number of failed line item batch submissions"
    )
    .expect("metric can be created");
}

/// Step 2 of the submission workflow: one batch write of all line items tied
/// to an already-saved purchase id.
#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitLineItemsCommand {
    pub purchase_id: Uuid,
    pub items: Vec<LineItem>,
}

impl SubmitLineItemsCommand {
    /// All-or-nothing validation: every failing line is reported and nothing
    /// is sent while any line is invalid.
    fn validate(&self) -> Result<(), LedgerError> {
        if self.items.is_empty() {
            return Err(LedgerError::ValidationError(
                "at least one line item is required".into(),
            ));
        }
        let failures: Vec<String> = self
            .items
            .iter()
            .enumerate()
            .filter_map(|(i, item)| {
                let problems = item.submission_problems();
                if problems.is_empty() {
                    None
                } else {
                    Some(format!("line {}: {}", i + 1, problems.join(", ")))
                }
            })
            .collect();
        if !failures.is_empty() {
            return Err(LedgerError::ValidationError(failures.join("; ")));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl Command for SubmitLineItemsCommand {
    type Result = ();

    #[instrument(skip(self, api, event_sender), fields(purchase_id = %self.purchase_id, count = self.items.len()))]
    async fn execute(
        &self,
        api: Arc<dyn PurchaseApi>,
        event_sender: Arc<EventSender>,
    ) -> Result<Self::Result, LedgerError> {
        self.validate().map_err(|e| {
            ITEM_BATCH_FAILURES.inc();
            error!("Invalid line items: {}", e);
            e
        })?;

        api.submit_line_items(self.purchase_id, &self.items)
            .await
            .map_err(|e| {
                ITEM_BATCH_FAILURES.inc();
                e
            })?;

        info!(
            purchase_id = %self.purchase_id,
            count = self.items.len(),
            "line items submitted"
        );
        ITEM_BATCH_SUBMITS.inc();

        event_sender
            .send(Event::LineItemsSubmitted {
                purchase_id: self.purchase_id,
                count: self.items.len(),
            })
            .await
            .map_err(LedgerError::EventError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LineItemPatch;
    use rust_decimal_macros::dec;

    #[test]
    fn reports_every_failing_line_at_once() {
        let mut good = LineItem::default();
        good.apply(LineItemPatch {
            fabric_ref: Some("F1".into()),
            ..LineItemPatch::pricing(dec!(10), dec!(5), dec!(0))
        });
        let missing_fabric = {
            let mut item = LineItem::default();
            item.apply(LineItemPatch::pricing(dec!(10), dec!(5), dec!(0)));
            item
        };
        let zero_qty = {
            let mut item = LineItem::default();
            item.apply(LineItemPatch {
                fabric_ref: Some("F2".into()),
                ..LineItemPatch::pricing(dec!(0), dec!(5), dec!(0))
            });
            item
        };

        let cmd = SubmitLineItemsCommand {
            purchase_id: Uuid::new_v4(),
            items: vec![good, missing_fabric, zero_qty],
        };
        let err = cmd.validate().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("line 2"), "{}", msg);
        assert!(msg.contains("line 3"), "{}", msg);
        assert!(!msg.contains("line 1:"), "{}", msg);
    }

    #[test]
    fn empty_batch_is_rejected() {
        let cmd = SubmitLineItemsCommand {
            purchase_id: Uuid::new_v4(),
            items: vec![],
        };
        assert!(cmd.validate().is_err());
    }
}
