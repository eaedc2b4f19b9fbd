#![allow(dead_code)]

//! Shared fixtures for the integration tests: a scripted in-memory backend
//! that records every call, plus draft and session builders.

use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use uuid::Uuid;

use textile_ledger::client::{CreatedPurchase, PurchaseApi};
use textile_ledger::errors::LedgerError;
use textile_ledger::events::{self, Event, EventSender};
use textile_ledger::models::{
    HeaderTotals, LineItem, LineItemPatch, LookupEntry, Lot, PurchaseHeader, SessionContext,
};
use textile_ledger::PurchaseDraft;

/// In-memory backend. Each step can be scripted to fail, and every call is
/// recorded in order so tests can assert exactly what went over the wire.
pub struct ScriptedApi {
    pub purchase_id: Uuid,
    pub lot_base_code: Option<String>,
    pub calls: Mutex<Vec<String>>,
    pub fail_header: AtomicBool,
    pub fail_items: AtomicBool,
    pub fail_lots: AtomicBool,
    pub omit_purchase_id: AtomicBool,
    pub conflict_message: Mutex<Option<String>>,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self {
            purchase_id: Uuid::new_v4(),
            lot_base_code: Some("LOT-C100".to_string()),
            calls: Mutex::new(Vec::new()),
            fail_header: AtomicBool::new(false),
            fail_items: AtomicBool::new(false),
            fail_lots: AtomicBool::new(false),
            omit_purchase_id: AtomicBool::new(false),
            conflict_message: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }
}

#[async_trait]
impl PurchaseApi for ScriptedApi {
    async fn create_purchase_header(
        &self,
        header: &PurchaseHeader,
        _totals: &HeaderTotals,
    ) -> Result<CreatedPurchase, LedgerError> {
        self.record(format!("create_header:{}", header.challan_number));
        if let Some(message) = self.conflict_message.lock().unwrap().clone() {
            return Err(LedgerError::Conflict(message));
        }
        if self.fail_header.load(Ordering::SeqCst) {
            return Err(LedgerError::ExternalApiError(
                "Error saving purchase header".into(),
            ));
        }
        let purchase_id = if self.omit_purchase_id.load(Ordering::SeqCst) {
            None
        } else {
            Some(self.purchase_id)
        };
        Ok(CreatedPurchase {
            purchase_id,
            lot_base_code: self.lot_base_code.clone(),
        })
    }

    async fn submit_line_items(
        &self,
        _purchase_id: Uuid,
        items: &[LineItem],
    ) -> Result<(), LedgerError> {
        self.record(format!("submit_items:{}", items.len()));
        if self.fail_items.load(Ordering::SeqCst) {
            return Err(LedgerError::ExternalApiError(
                "Error saving purchase items".into(),
            ));
        }
        Ok(())
    }

    async fn submit_lots(&self, _purchase_id: Uuid, lots: &[Lot]) -> Result<(), LedgerError> {
        self.record(format!("submit_lots:{}", lots.len()));
        if self.fail_lots.load(Ordering::SeqCst) {
            return Err(LedgerError::ExternalApiError(
                "Error saving lot details".into(),
            ));
        }
        Ok(())
    }

    async fn add_lot(
        &self,
        purchase_id: Uuid,
        lot_number: &str,
        meter: Decimal,
    ) -> Result<Lot, LedgerError> {
        self.record(format!("add_lot:{}", lot_number));
        Ok(Lot {
            id: Uuid::new_v4(),
            lot_number: lot_number.to_string(),
            meter,
            purchase_ref: Some(purchase_id),
        })
    }

    async fn update_lot_meter(&self, lot_id: Uuid, meter: Decimal) -> Result<(), LedgerError> {
        self.record(format!("update_meter:{}:{}", lot_id, meter));
        Ok(())
    }

    async fn delete_lot(&self, lot_id: Uuid) -> Result<(), LedgerError> {
        self.record(format!("delete_lot:{}", lot_id));
        Ok(())
    }

    async fn fetch_vendors(&self) -> Result<Vec<LookupEntry>, LedgerError> {
        Ok(vec![LookupEntry::new("1", "Acme Textiles")])
    }

    async fn fetch_agents(&self) -> Result<Vec<LookupEntry>, LedgerError> {
        Ok(vec![])
    }

    async fn fetch_fabrics(&self) -> Result<Vec<LookupEntry>, LedgerError> {
        Ok(vec![LookupEntry::new("f1", "Poplin")])
    }

    async fn fetch_fabric_types(&self) -> Result<Vec<LookupEntry>, LedgerError> {
        Ok(vec![])
    }

    async fn fetch_fabric_colors(&self) -> Result<Vec<LookupEntry>, LedgerError> {
        Ok(vec![])
    }
}

pub fn event_channel() -> (Arc<EventSender>, mpsc::Receiver<Event>) {
    let (sender, receiver) = events::channel(64);
    (Arc::new(sender), receiver)
}

pub fn session() -> SessionContext {
    SessionContext::new(Uuid::new_v4(), "entry clerk")
}

pub fn header(challan_number: &str) -> PurchaseHeader {
    PurchaseHeader {
        vendor_ref: "1".to_string(),
        challan_number: challan_number.to_string(),
        challan_date: chrono::NaiveDate::from_ymd_opt(2024, 4, 12),
        ..PurchaseHeader::default()
    }
}

pub fn priced_patch(quantity: Decimal, rate: Decimal, gst: Decimal) -> LineItemPatch {
    LineItemPatch {
        fabric_ref: Some("f1".to_string()),
        ..LineItemPatch::pricing(quantity, rate, gst)
    }
}

/// One-line purchase draft for the common happy-path scenario:
/// challan C100, 100 m at 50 with 5% GST, three declared lots.
pub fn draft_with_lots() -> PurchaseDraft {
    let mut draft = PurchaseDraft {
        header: header("C100"),
        ..PurchaseDraft::default()
    };
    let line = draft.lines.add_line();
    draft
        .lines
        .update_line(line, priced_patch(dec!(100), dec!(50), dec!(5)))
        .unwrap();
    let tracker = draft.declare_units("LOT-C100", 3).unwrap();
    let ids: Vec<Uuid> = tracker.lots().iter().map(|l| l.id).collect();
    tracker.update_meter(ids[0], dec!(10)).unwrap();
    tracker.update_meter(ids[1], dec!(20)).unwrap();
    tracker.update_meter(ids[2], dec!(15)).unwrap();
    draft
}

/// Drain whatever events have been published so far.
pub fn drain(receiver: &mut mpsc::Receiver<Event>) -> Vec<Event> {
    let mut events = Vec::new();
    while let Ok(event) = receiver.try_recv() {
        events.push(event);
    }
    events
}
