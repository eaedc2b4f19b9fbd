use serde::{Deserialize, Serialize};

/// One entry of a lookup list (vendor, agent, fabric, type, color).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupEntry {
    pub id: String,
    pub name: String,
}

impl LookupEntry {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Read-only reference data for one edit session: fetched once, never
/// mutated by this crate.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ReferenceData {
    pub vendors: Vec<LookupEntry>,
    pub agents: Vec<LookupEntry>,
    pub fabrics: Vec<LookupEntry>,
    pub fabric_types: Vec<LookupEntry>,
    pub fabric_colors: Vec<LookupEntry>,
}

impl ReferenceData {
    /// Built-in product types used when the backend does not provide any.
    pub fn default_fabric_types() -> Vec<LookupEntry> {
        vec![
            LookupEntry::new("gray", "Gray"),
            LookupEntry::new("rfd", "RFD"),
            LookupEntry::new("coating", "Coating"),
        ]
    }
}
