use crate::{client::PurchaseApi, errors::LedgerError, events::EventSender};
use async_trait::async_trait;
use std::sync::Arc;

/// Command trait for implementing the Command Pattern.
///
/// Each remote mutation of the purchase flow is encapsulated as a command
/// that validates its input, performs the backend call, and publishes an
/// event on success.
#[async_trait]
pub trait Command: Send + Sync {
    /// The return type of the command when executed successfully.
    type Result;

    async fn execute(
        &self,
        api: Arc<dyn PurchaseApi>,
        event_sender: Arc<EventSender>,
    ) -> Result<Self::Result, LedgerError>;
}

pub mod purchases;
