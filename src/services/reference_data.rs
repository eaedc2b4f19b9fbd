//! Session-scoped cache for the dropdown lookup lists.
//!
//! All five lists are loaded on first access and then reused for the rest of
//! the session; the backend treats them as read-only so there is no
//! invalidation path.

use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{instrument, warn};

use crate::{
    client::PurchaseApi,
    errors::LedgerError,
    models::ReferenceData,
};

pub struct ReferenceDataService {
    api: Arc<dyn PurchaseApi>,
    cache: OnceCell<Arc<ReferenceData>>,
}

impl ReferenceDataService {
    pub fn new(api: Arc<dyn PurchaseApi>) -> Self {
        Self {
            api,
            cache: OnceCell::new(),
        }
    }

    /// Returns the cached lists, loading them on the first call. A failed
    /// load is not cached, so the next call retries.
    #[instrument(skip(self))]
    pub async fn get(&self) -> Result<Arc<ReferenceData>, LedgerError> {
        self.cache
            .get_or_try_init(|| async {
                let data = self.load().await?;
                Ok(Arc::new(data))
            })
            .await
            .cloned()
    }

    pub fn loaded(&self) -> bool {
        self.cache.initialized()
    }

    async fn load(&self) -> Result<ReferenceData, LedgerError> {
        let (vendors, agents, fabrics, fabric_colors) = futures::try_join!(
            self.api.fetch_vendors(),
            self.api.fetch_agents(),
            self.api.fetch_fabrics(),
            self.api.fetch_fabric_colors(),
        )?;

        // Product types fall back to the built-in set when the backend has
        // none configured or the endpoint is unavailable.
        let fabric_types = match self.api.fetch_fabric_types().await {
            Ok(types) if !types.is_empty() => types,
            Ok(_) => ReferenceData::default_fabric_types(),
            Err(err) => {
                warn!(error = %err, "fabric types unavailable, using defaults");
                ReferenceData::default_fabric_types()
            }
        };

        Ok(ReferenceData {
            vendors,
            agents,
            fabrics,
            fabric_types,
            fabric_colors,
        })
    }
}
