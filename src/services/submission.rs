//! The three-step purchase submission workflow.
//!
//! The backend requires a parent purchase id before children can be
//! attached, so the steps are strictly ordered: header, then line items,
//! then lots. A failed step never rolls back an earlier one; the workflow is
//! resumable instead — the obtained purchase id and per-step ledger are kept
//! so the caller may retry only what failed.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    client::PurchaseApi,
    commands::purchases::{SaveHeaderCommand, SubmitLineItemsCommand, SubmitLotsCommand},
    commands::Command,
    errors::{LedgerError, SubmissionStep},
    events::{Event, EventSender},
    models::{HeaderTotals, PurchaseFlow, PurchaseHeader, SessionContext},
    services::line_items::LineItemLedger,
    services::lots::LotTracker,
};

/// Everything one edit session accumulates before submission.
#[derive(Clone, Debug, Default)]
pub struct PurchaseDraft {
    pub header: PurchaseHeader,
    pub lines: LineItemLedger,
    /// Present when the flow declared a unit count and generated lots.
    pub lots: Option<LotTracker>,
}

impl PurchaseDraft {
    pub fn header_totals(&self) -> HeaderTotals {
        HeaderTotals::from_lines(self.lines.totals(), self.header.discount_amount)
    }

    /// Declare the unit count ("Taka No") and generate the lots for it.
    pub fn declare_units(
        &mut self,
        base_lot_code: impl Into<String>,
        count: u32,
    ) -> Result<&mut LotTracker, LedgerError> {
        let tracker = LotTracker::generate(base_lot_code, count)?;
        Ok(self.lots.insert(tracker))
    }
}

/// Which steps have completed, and under which purchase id.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SubmissionState {
    pub purchase_id: Option<Uuid>,
    pub lot_base_code: Option<String>,
    pub header_saved: bool,
    pub items_submitted: bool,
    pub lots_submitted: bool,
}

impl SubmissionState {
    pub fn is_complete(&self, expects_lots: bool) -> bool {
        self.header_saved && self.items_submitted && (self.lots_submitted || !expects_lots)
    }
}

/// Orchestrates the ordered remote writes for one purchase draft.
pub struct PurchaseSubmission {
    api: Arc<dyn PurchaseApi>,
    events: Arc<EventSender>,
    session: SessionContext,
    flow: PurchaseFlow,
    state: SubmissionState,
}

impl PurchaseSubmission {
    pub fn new(
        api: Arc<dyn PurchaseApi>,
        events: Arc<EventSender>,
        session: SessionContext,
        flow: PurchaseFlow,
    ) -> Self {
        Self {
            api,
            events,
            session,
            flow,
            state: SubmissionState::default(),
        }
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    /// Step 1. Idempotent across retries once it has succeeded.
    #[instrument(skip_all, fields(user = %self.session.display_name))]
    pub async fn save_header(
        &mut self,
        header: &PurchaseHeader,
        totals: HeaderTotals,
    ) -> Result<Uuid, LedgerError> {
        if let (true, Some(id)) = (self.state.header_saved, self.state.purchase_id) {
            return Ok(id);
        }
        let command = SaveHeaderCommand {
            header: header.clone(),
            totals,
            flow: self.flow,
        };
        let saved = match command.execute(self.api.clone(), self.events.clone()).await {
            Ok(saved) => saved,
            Err(e) => return Err(self.fail(SubmissionStep::Header, e).await),
        };
        self.state.purchase_id = Some(saved.purchase_id);
        self.state.lot_base_code = saved.lot_base_code;
        self.state.header_saved = true;
        Ok(saved.purchase_id)
    }

    /// Step 2. Refuses to run before step 1 has succeeded.
    #[instrument(skip_all)]
    pub async fn submit_items(&mut self, lines: &LineItemLedger) -> Result<(), LedgerError> {
        if self.state.items_submitted {
            return Ok(());
        }
        let purchase_id = self.require_purchase_id(SubmissionStep::Items)?;
        let command = SubmitLineItemsCommand {
            purchase_id,
            items: lines.items().to_vec(),
        };
        if let Err(e) = command.execute(self.api.clone(), self.events.clone()).await {
            return Err(self.fail(SubmissionStep::Items, e).await);
        }
        self.state.items_submitted = true;
        Ok(())
    }

    /// Step 3. Refuses to run before step 2 has succeeded.
    #[instrument(skip_all)]
    pub async fn submit_lots(&mut self, lots: &LotTracker) -> Result<Decimal, LedgerError> {
        if self.state.lots_submitted {
            return Ok(lots.total_meter());
        }
        if !self.state.items_submitted {
            let err = LedgerError::InvalidOperation(
                "line items must be submitted before lots".into(),
            );
            return Err(self.fail(SubmissionStep::Lots, err).await);
        }
        let purchase_id = self.require_purchase_id(SubmissionStep::Lots)?;
        let command = SubmitLotsCommand {
            purchase_id,
            lots: lots.lots().to_vec(),
        };
        if let Err(e) = command.execute(self.api.clone(), self.events.clone()).await {
            return Err(self.fail(SubmissionStep::Lots, e).await);
        }
        self.state.lots_submitted = true;
        Ok(lots.total_meter())
    }

    /// Run every remaining step of the draft in order, stopping at the first
    /// failure. Completed steps are skipped, so calling this again after a
    /// failure retries only what is still pending.
    #[instrument(skip_all, fields(user = %self.session.display_name))]
    pub async fn submit_all(&mut self, draft: &PurchaseDraft) -> Result<Uuid, LedgerError> {
        let totals = draft.header_totals();
        let purchase_id = self.save_header(&draft.header, totals).await?;
        self.submit_items(&draft.lines).await?;
        if let Some(lots) = &draft.lots {
            self.submit_lots(lots).await?;
        }
        info!(%purchase_id, "purchase submission complete");
        Ok(purchase_id)
    }

    fn require_purchase_id(&self, step: SubmissionStep) -> Result<Uuid, LedgerError> {
        self.state.purchase_id.ok_or_else(|| {
            LedgerError::InvalidOperation("header must be saved first".into()).in_step(step)
        })
    }

    /// Tag the error with its step, publish the failure event, and leave all
    /// completed-step state untouched (no rollback).
    async fn fail(&self, step: SubmissionStep, err: LedgerError) -> LedgerError {
        let err = err.in_step(step);
        warn!(%step, error = %err, "submission step failed");
        if let Err(send_err) = self
            .events
            .send(Event::SubmissionStepFailed {
                step,
                message: err.to_string(),
            })
            .await
        {
            warn!(error = %send_err, "could not publish step failure event");
        }
        err
    }
}
