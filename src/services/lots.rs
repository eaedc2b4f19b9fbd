//! Lot ("taka") tracking: sequentially numbered fabric rolls with measured
//! lengths, generated against one purchase.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::errors::LedgerError;
use crate::models::Lot;

/// Tracks the lots of one purchase under a shared base lot code.
///
/// Numbering is gap-tolerant by design: removing a middle lot never renumbers
/// survivors, and [`LotTracker::add_lot`] numbers from the maximum observed
/// sequence rather than the count, so a freed number is never reused.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LotTracker {
    base_code: String,
    lots: Vec<Lot>,
}

impl LotTracker {
    /// Generate `count` lots numbered `{base}-1 .. {base}-count`, each with a
    /// zero meter length.
    pub fn generate(base_code: impl Into<String>, count: u32) -> Result<Self, LedgerError> {
        let base_code = base_code.into();
        if count == 0 {
            return Err(LedgerError::InvalidCount(
                "declared unit count must be a positive integer".into(),
            ));
        }
        let lots = (1..=count)
            .map(|seq| Lot::new(format!("{}-{}", base_code, seq)))
            .collect();
        debug!(%base_code, count, "lots generated");
        Ok(Self { base_code, lots })
    }

    /// Rebuild a tracker from lots already persisted on the backend. The base
    /// code is taken from the first lot; an empty list falls back to the
    /// given code.
    pub fn from_existing(fallback_base_code: impl Into<String>, lots: Vec<Lot>) -> Self {
        let base_code = lots
            .first()
            .map(|lot| lot.base_code().to_string())
            .unwrap_or_else(|| fallback_base_code.into());
        Self { base_code, lots }
    }

    pub fn base_code(&self) -> &str {
        &self.base_code
    }

    pub fn lots(&self) -> &[Lot] {
        &self.lots
    }

    pub fn len(&self) -> usize {
        self.lots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lots.is_empty()
    }

    /// Highest sequence number currently present, 0 when empty.
    pub fn max_sequence(&self) -> u32 {
        self.lots
            .iter()
            .filter_map(Lot::sequence)
            .max()
            .unwrap_or(0)
    }

    /// Append one lot numbered `(max observed sequence) + 1`.
    pub fn add_lot(&mut self) -> &Lot {
        let next = self.max_sequence() + 1;
        let lot = Lot::new(format!("{}-{}", self.base_code, next));
        self.lots.push(lot);
        self.lots.last().expect("lot just pushed")
    }

    /// Edit one lot's measured length in place.
    pub fn update_meter(&mut self, lot_id: Uuid, meter: Decimal) -> Result<(), LedgerError> {
        if meter < Decimal::ZERO {
            return Err(LedgerError::InvalidLength(format!(
                "meter length must be non-negative, got {}",
                meter
            )));
        }
        let lot = self
            .lots
            .iter_mut()
            .find(|lot| lot.id == lot_id)
            .ok_or_else(|| LedgerError::NotFound(format!("lot {} not found", lot_id)))?;
        lot.meter = meter;
        Ok(())
    }

    /// Delete one lot. Siblings keep their numbers.
    pub fn remove_lot(&mut self, lot_id: Uuid) -> Result<Lot, LedgerError> {
        let pos = self
            .lots
            .iter()
            .position(|lot| lot.id == lot_id)
            .ok_or_else(|| LedgerError::NotFound(format!("lot {} not found", lot_id)))?;
        Ok(self.lots.remove(pos))
    }

    /// Sum of measured lengths over the current lots.
    pub fn total_meter(&self) -> Decimal {
        self.lots.iter().map(|lot| lot.meter).sum()
    }

    /// Lots that still have a zero or missing measured length; submission
    /// requires this to be empty.
    pub fn unmeasured(&self) -> Vec<&Lot> {
        self.lots
            .iter()
            .filter(|lot| lot.meter <= Decimal::ZERO)
            .collect()
    }
}

/// Edit affordance for a single lot's meter cell.
///
/// `Display → Editing → Persisting → Display`; editing may only begin from
/// `Display`, and committing an empty draft reverts to `Display` with the
/// prior value intact.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum MeterEdit {
    #[default]
    Display,
    Editing {
        original: Decimal,
        draft: String,
    },
    Persisting {
        pending: Decimal,
    },
}

impl MeterEdit {
    /// Activate the cell for editing. Only legal from `Display`.
    pub fn begin(&mut self, current: Decimal) -> Result<(), LedgerError> {
        match self {
            MeterEdit::Display => {
                *self = MeterEdit::Editing {
                    original: current,
                    draft: current.to_string(),
                };
                Ok(())
            }
            _ => Err(LedgerError::InvalidOperation(
                "meter edit may only start from the display state".into(),
            )),
        }
    }

    pub fn set_draft(&mut self, text: impl Into<String>) -> Result<(), LedgerError> {
        match self {
            MeterEdit::Editing { draft, .. } => {
                *draft = text.into();
                Ok(())
            }
            _ => Err(LedgerError::InvalidOperation(
                "no meter edit in progress".into(),
            )),
        }
    }

    /// Commit on blur/Enter. An empty or unparsable draft rejects the commit
    /// and reverts to `Display` (prior value untouched, `None` returned); a
    /// valid draft moves to `Persisting` and returns the value to write.
    pub fn commit(&mut self) -> Result<Option<Decimal>, LedgerError> {
        match self {
            MeterEdit::Editing { draft, .. } => {
                let trimmed = draft.trim();
                if trimmed.is_empty() {
                    *self = MeterEdit::Display;
                    return Ok(None);
                }
                match trimmed.parse::<Decimal>() {
                    Ok(value) if value >= Decimal::ZERO => {
                        *self = MeterEdit::Persisting { pending: value };
                        Ok(Some(value))
                    }
                    _ => {
                        let trimmed = trimmed.to_string();
                        *self = MeterEdit::Display;
                        Err(LedgerError::InvalidLength(format!(
                            "'{}' is not a valid meter length",
                            trimmed
                        )))
                    }
                }
            }
            _ => Err(LedgerError::InvalidOperation(
                "no meter edit in progress".into(),
            )),
        }
    }

    /// The remote write finished (either way); back to `Display`.
    pub fn settle(&mut self) {
        *self = MeterEdit::Display;
    }
}
