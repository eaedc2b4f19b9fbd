//! reqwest implementation of [`PurchaseApi`].

use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{error, instrument};
use uuid::Uuid;

use crate::client::dto::{
    AddLotRequest, ApiEnvelope, CreatedPurchaseData, LookupEntryDto, SavedLotData,
    StoreHeaderRequest, SubmitItemsRequest, SubmitLotsRequest, UpdateMeterRequest,
};
use crate::client::{CreatedPurchase, PurchaseApi};
use crate::config::LedgerConfig;
use crate::errors::LedgerError;
use crate::models::{HeaderTotals, LineItem, LookupEntry, Lot, PurchaseHeader};
use crate::money::round2;

pub struct HttpPurchaseApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpPurchaseApi {
    pub fn new(config: &LedgerConfig) -> Result<Self, LedgerError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| LedgerError::ConfigurationError(e.to_string()))?;
        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request and unwrap the `{success, message, data}` envelope.
    ///
    /// The server-provided message is surfaced when present; otherwise
    /// `fallback` describes the failed operation. Duplicate/conflict
    /// responses map to [`LedgerError::Conflict`] so the caller can keep the
    /// draft intact for correction.
    async fn call<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        fallback: &str,
    ) -> Result<Option<T>, LedgerError> {
        let mut request = self.client.request(method, self.url(path));
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await.map_err(|e| {
            error!(path, error = %e, "backend request failed");
            LedgerError::NetworkError(e.to_string())
        })?;

        let status = response.status();
        let envelope: Option<ApiEnvelope<T>> = response.json().await.ok();

        let message = envelope.as_ref().and_then(|env| env.message.clone());
        if status == StatusCode::CONFLICT {
            return Err(LedgerError::Conflict(
                message.unwrap_or_else(|| fallback.to_string()),
            ));
        }
        if !status.is_success() {
            return Err(LedgerError::ExternalApiError(
                message.unwrap_or_else(|| format!("{} (HTTP {})", fallback, status.as_u16())),
            ));
        }
        match envelope {
            Some(env) if !env.success => Err(LedgerError::ExternalApiError(
                env.message.unwrap_or_else(|| fallback.to_string()),
            )),
            Some(env) => Ok(env.data),
            None => Err(LedgerError::ExternalApiError(format!(
                "{} (unreadable response body)",
                fallback
            ))),
        }
    }

    /// Lookup endpoints return a bare JSON array, not the envelope.
    async fn fetch_lookup(&self, path: &str, fallback: &str) -> Result<Vec<LookupEntry>, LedgerError> {
        let response = self.client.get(self.url(path)).send().await.map_err(|e| {
            error!(path, error = %e, "backend request failed");
            LedgerError::NetworkError(e.to_string())
        })?;
        let status = response.status();
        if !status.is_success() {
            return Err(LedgerError::ExternalApiError(format!(
                "{} (HTTP {})",
                fallback,
                status.as_u16()
            )));
        }
        let entries: Vec<LookupEntryDto> = response
            .json()
            .await
            .map_err(|e| LedgerError::ExternalApiError(format!("{}: {}", fallback, e)))?;
        Ok(entries.into_iter().map(LookupEntry::from).collect())
    }
}

#[async_trait]
impl PurchaseApi for HttpPurchaseApi {
    #[instrument(skip(self, header, totals), fields(challan_no = %header.challan_number))]
    async fn create_purchase_header(
        &self,
        header: &PurchaseHeader,
        totals: &HeaderTotals,
    ) -> Result<CreatedPurchase, LedgerError> {
        let request = StoreHeaderRequest::from_header(header, totals);
        let data: Option<CreatedPurchaseData> = self
            .call(
                Method::POST,
                "/api/store-challan",
                Some(&request),
                "Error saving purchase header",
            )
            .await?;
        let data = data.ok_or(LedgerError::MissingPurchaseId)?;
        Ok(CreatedPurchase {
            purchase_id: data.purchase_id,
            lot_base_code: data.lot_no,
        })
    }

    #[instrument(skip(self, items), fields(%purchase_id, count = items.len()))]
    async fn submit_line_items(
        &self,
        purchase_id: Uuid,
        items: &[LineItem],
    ) -> Result<(), LedgerError> {
        let request = SubmitItemsRequest {
            purchase_id,
            items: items.iter().map(Into::into).collect(),
        };
        self.call::<_, serde_json::Value>(
            Method::POST,
            "/api/challan/items",
            Some(&request),
            "Error saving purchase items",
        )
        .await?;
        Ok(())
    }

    #[instrument(skip(self, lots), fields(%purchase_id, count = lots.len()))]
    async fn submit_lots(&self, purchase_id: Uuid, lots: &[Lot]) -> Result<(), LedgerError> {
        let request = SubmitLotsRequest::from_lots(purchase_id, lots);
        let path = format!("/api/purchase/{}/taka-details", purchase_id);
        self.call::<_, serde_json::Value>(
            Method::POST,
            &path,
            Some(&request),
            "Error saving lot details",
        )
        .await?;
        Ok(())
    }

    #[instrument(skip(self), fields(%purchase_id, lot_number))]
    async fn add_lot(
        &self,
        purchase_id: Uuid,
        lot_number: &str,
        meter: Decimal,
    ) -> Result<Lot, LedgerError> {
        let request = AddLotRequest {
            lot_no: lot_number.to_string(),
            meter: round2(meter),
        };
        let path = format!("/api/purchase/{}/add-lot", purchase_id);
        let data: Option<SavedLotData> = self
            .call(Method::POST, &path, Some(&request), "Error adding lot")
            .await?;
        let saved = data.ok_or_else(|| {
            LedgerError::ExternalApiError("add-lot response did not include the saved lot".into())
        })?;
        Ok(Lot {
            id: saved.lot_id,
            lot_number: saved.lot_no,
            meter: saved.meter,
            purchase_ref: saved.purchase_id.or(Some(purchase_id)),
        })
    }

    #[instrument(skip(self), fields(%lot_id))]
    async fn update_lot_meter(&self, lot_id: Uuid, meter: Decimal) -> Result<(), LedgerError> {
        let request = UpdateMeterRequest {
            meter: round2(meter),
        };
        let path = format!("/api/purchase/lot/{}", lot_id);
        self.call::<_, serde_json::Value>(
            Method::PUT,
            &path,
            Some(&request),
            "Error updating meter",
        )
        .await?;
        Ok(())
    }

    #[instrument(skip(self), fields(%lot_id))]
    async fn delete_lot(&self, lot_id: Uuid) -> Result<(), LedgerError> {
        let path = format!("/api/purchase/lot/{}", lot_id);
        self.call::<(), serde_json::Value>(Method::DELETE, &path, None, "Error deleting lot")
            .await?;
        Ok(())
    }

    async fn fetch_vendors(&self) -> Result<Vec<LookupEntry>, LedgerError> {
        self.fetch_lookup("/api/get-supplier", "Error fetching vendors")
            .await
    }

    async fn fetch_agents(&self) -> Result<Vec<LookupEntry>, LedgerError> {
        self.fetch_lookup("/api/get-agent", "Error fetching agents")
            .await
    }

    async fn fetch_fabrics(&self) -> Result<Vec<LookupEntry>, LedgerError> {
        self.fetch_lookup("/api/get-fabric", "Error fetching fabrics")
            .await
    }

    async fn fetch_fabric_types(&self) -> Result<Vec<LookupEntry>, LedgerError> {
        self.fetch_lookup("/api/get-fabric-types", "Error fetching fabric types")
            .await
    }

    async fn fetch_fabric_colors(&self) -> Result<Vec<LookupEntry>, LedgerError> {
        self.fetch_lookup("/api/get-fabric-color", "Error fetching fabric colors")
            .await
    }
}
