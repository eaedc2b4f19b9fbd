use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who is driving this edit session. Passed explicitly into the submission
/// workflow instead of being read from ambient/global state; the ledger only
/// uses it for structured logging.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionContext {
    pub user_id: Uuid,
    pub display_name: String,
}

impl SessionContext {
    pub fn new(user_id: Uuid, display_name: impl Into<String>) -> Self {
        Self {
            user_id,
            display_name: display_name.into(),
        }
    }
}
