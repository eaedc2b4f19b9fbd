//! Standalone lot maintenance against an already-persisted purchase: the
//! add / edit-meter / delete operations used by the lot details modal.

mod common;

use assert_matches::assert_matches;
use rust_decimal_macros::dec;
use std::sync::Arc;
use uuid::Uuid;

use common::ScriptedApi;
use textile_ledger::commands::purchases::{
    AddLotCommand, DeleteLotCommand, UpdateLotMeterCommand,
};
use textile_ledger::commands::Command;
use textile_ledger::errors::LedgerError;
use textile_ledger::events::Event;
use textile_ledger::models::Lot;

#[tokio::test]
async fn add_lot_numbers_past_the_highest_survivor() {
    let api = Arc::new(ScriptedApi::new());
    let (events, mut receiver) = common::event_channel();
    // Lots 1, 2, and 5 survive an earlier delete of 3 and 4.
    let existing = vec![Lot::new("A-1"), Lot::new("A-2"), Lot::new("A-5")];

    let command = AddLotCommand {
        purchase_id: api.purchase_id,
        existing,
        fallback_base_code: "A".into(),
    };
    let added = command.execute(api.clone(), events).await.unwrap();

    assert_eq!(added.lot_number, "A-6");
    assert_eq!(added.meter, dec!(0));
    assert_eq!(api.calls(), vec!["add_lot:A-6"]);
    assert_matches!(
        common::drain(&mut receiver).as_slice(),
        [Event::LotAdded { lot_number, .. }] if lot_number.as_str() == "A-6"
    );
}

#[tokio::test]
async fn add_lot_on_an_empty_purchase_starts_from_the_fallback_code() {
    let api = Arc::new(ScriptedApi::new());
    let (events, _receiver) = common::event_channel();

    let command = AddLotCommand {
        purchase_id: api.purchase_id,
        existing: vec![],
        fallback_base_code: "LOT-C100".into(),
    };
    let added = command.execute(api.clone(), events).await.unwrap();

    assert_eq!(added.lot_number, "LOT-C100-1");
}

#[tokio::test]
async fn meter_update_writes_through_and_notifies() {
    let api = Arc::new(ScriptedApi::new());
    let (events, mut receiver) = common::event_channel();
    let lot_id = Uuid::new_v4();

    let command = UpdateLotMeterCommand {
        lot_id,
        meter: dec!(12.5),
    };
    command.execute(api.clone(), events).await.unwrap();

    assert_eq!(api.calls(), vec![format!("update_meter:{}:12.5", lot_id)]);
    assert_matches!(
        common::drain(&mut receiver).as_slice(),
        [Event::LotMeterUpdated { meter, .. }] if *meter == dec!(12.5)
    );
}

#[tokio::test]
async fn negative_meter_is_rejected_before_the_write() {
    let api = Arc::new(ScriptedApi::new());
    let (events, _receiver) = common::event_channel();

    let command = UpdateLotMeterCommand {
        lot_id: Uuid::new_v4(),
        meter: dec!(-1),
    };
    let err = command.execute(api.clone(), events).await.unwrap_err();

    assert_matches!(err, LedgerError::InvalidLength(_));
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn delete_removes_the_lot_and_notifies() {
    let api = Arc::new(ScriptedApi::new());
    let (events, mut receiver) = common::event_channel();
    let lot_id = Uuid::new_v4();

    DeleteLotCommand { lot_id }
        .execute(api.clone(), events)
        .await
        .unwrap();

    assert_eq!(api.calls(), vec![format!("delete_lot:{}", lot_id)]);
    assert_matches!(
        common::drain(&mut receiver).as_slice(),
        [Event::LotDeleted(id)] if *id == lot_id
    );
}
