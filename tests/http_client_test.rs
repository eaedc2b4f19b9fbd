//! HTTP client tests against a wiremock backend: envelope decoding, error
//! mapping, and the bare-array lookup endpoints.

mod common;

use assert_matches::assert_matches;
use rust_decimal_macros::dec;
use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use textile_ledger::client::{HttpPurchaseApi, PurchaseApi};
use textile_ledger::errors::LedgerError;
use textile_ledger::models::HeaderTotals;
use textile_ledger::LedgerConfig;

fn api_for(server: &MockServer) -> HttpPurchaseApi {
    HttpPurchaseApi::new(&LedgerConfig::new(server.uri(), "test")).unwrap()
}

#[tokio::test]
async fn header_save_unwraps_the_envelope() {
    let server = MockServer::start().await;
    let purchase_id = Uuid::new_v4();
    Mock::given(method("POST"))
        .and(path("/api/store-challan"))
        .and(body_partial_json(json!({"challan_no": "C100", "supplier_id": "1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "Challan saved",
            "data": {"challan_id": purchase_id, "lot_no": "LOT-C100"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let created = api_for(&server)
        .create_purchase_header(&common::header("C100"), &HeaderTotals::default())
        .await
        .unwrap();

    assert_eq!(created.purchase_id, Some(purchase_id));
    assert_eq!(created.lot_base_code.as_deref(), Some("LOT-C100"));
}

#[tokio::test]
async fn duplicate_challan_maps_to_conflict_with_the_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/store-challan"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "success": false,
            "message": "Challan number already exists for this supplier"
        })))
        .mount(&server)
        .await;

    let err = api_for(&server)
        .create_purchase_header(&common::header("C100"), &HeaderTotals::default())
        .await
        .unwrap_err();

    assert_matches!(
        err,
        LedgerError::Conflict(message)
            if message == "Challan number already exists for this supplier"
    );
}

#[tokio::test]
async fn success_false_in_a_200_body_is_an_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/challan/items"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "message": "Items rejected by stock ledger"
        })))
        .mount(&server)
        .await;

    let err = api_for(&server)
        .submit_line_items(Uuid::new_v4(), &[])
        .await
        .unwrap_err();

    assert_matches!(
        err,
        LedgerError::ExternalApiError(message) if message == "Items rejected by stock ledger"
    );
}

#[tokio::test]
async fn server_error_without_a_body_falls_back_to_the_operation_name() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/store-challan"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = api_for(&server)
        .create_purchase_header(&common::header("C100"), &HeaderTotals::default())
        .await
        .unwrap_err();

    assert_matches!(
        err,
        LedgerError::ExternalApiError(message)
            if message == "Error saving purchase header (HTTP 500)"
    );
}

#[tokio::test]
async fn missing_data_in_a_successful_header_save_is_fatal() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/store-challan"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "Saved"
        })))
        .mount(&server)
        .await;

    let err = api_for(&server)
        .create_purchase_header(&common::header("C100"), &HeaderTotals::default())
        .await
        .unwrap_err();

    assert_matches!(err, LedgerError::MissingPurchaseId);
}

#[tokio::test]
async fn lots_post_to_the_purchase_scoped_path_with_serial_numbers() {
    let server = MockServer::start().await;
    let purchase_id = Uuid::new_v4();
    let mut draft = common::draft_with_lots();
    let lots = draft.lots.take().unwrap();

    Mock::given(method("POST"))
        .and(path(format!("/api/purchase/{}/taka-details", purchase_id)))
        .and(body_partial_json(json!({
            "taka_details": [
                {"sr": 1, "lot_no": "LOT-C100-1", "meter": "10"},
                {"sr": 2, "lot_no": "LOT-C100-2", "meter": "20"},
                {"sr": 3, "lot_no": "LOT-C100-3", "meter": "15"}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    api_for(&server)
        .submit_lots(purchase_id, lots.lots())
        .await
        .unwrap();
}

#[tokio::test]
async fn update_and_delete_target_the_lot_path() {
    let server = MockServer::start().await;
    let lot_id = Uuid::new_v4();
    Mock::given(method("PUT"))
        .and(path(format!("/api/purchase/lot/{}", lot_id)))
        .and(body_partial_json(json!({"meter": "12.5"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(format!("/api/purchase/lot/{}", lot_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let api = api_for(&server);
    api.update_lot_meter(lot_id, dec!(12.5)).await.unwrap();
    api.delete_lot(lot_id).await.unwrap();
}

#[tokio::test]
async fn lookups_parse_bare_arrays_with_numeric_ids() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/get-supplier"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "name": "Acme Textiles"},
            {"id": "s2", "name": "Weave & Co"}
        ])))
        .mount(&server)
        .await;

    let vendors = api_for(&server).fetch_vendors().await.unwrap();

    assert_eq!(vendors.len(), 2);
    assert_eq!(vendors[0].id, "1");
    assert_eq!(vendors[1].name, "Weave & Co");
}

#[tokio::test]
async fn connection_refused_is_a_network_error() {
    // A pooled server (`MockServer::start`) keeps listening after drop; a
    // bare builder server actually releases the port, which this test needs.
    let server = MockServer::builder().start().await;
    let uri = server.uri();
    drop(server);

    let err = HttpPurchaseApi::new(&LedgerConfig::new(uri, "test"))
        .unwrap()
        .fetch_vendors()
        .await
        .unwrap_err();

    assert_matches!(err, LedgerError::NetworkError(_));
}
