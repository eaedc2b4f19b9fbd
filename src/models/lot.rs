use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One physically measured roll ("taka") of fabric received against a
/// purchase. Numbered `{base code}-{sequence}`; the sequence is unique and
/// monotonically increasing within one purchase and survivors are never
/// renumbered when a sibling is deleted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Lot {
    pub id: Uuid,
    pub lot_number: String,
    /// Measured length in meters, ≥ 0.
    pub meter: Decimal,
    /// Set once the owning purchase has been persisted.
    pub purchase_ref: Option<Uuid>,
}

impl Lot {
    pub fn new(lot_number: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            lot_number: lot_number.into(),
            meter: Decimal::ZERO,
            purchase_ref: None,
        }
    }

    /// The trailing sequence number, if the lot number has the expected
    /// `{base}-{n}` shape.
    pub fn sequence(&self) -> Option<u32> {
        self.lot_number.rsplit('-').next()?.parse().ok()
    }

    /// Everything before the trailing sequence segment.
    pub fn base_code(&self) -> &str {
        match self.lot_number.rfind('-') {
            Some(idx) => &self.lot_number[..idx],
            None => &self.lot_number,
        }
    }
}
