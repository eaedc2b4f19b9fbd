//! Ordered collection of purchase line items with eagerly maintained totals.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::LedgerError;
use crate::models::{LineItem, LineItemPatch};

/// Aggregates over the current lines. Kept at full precision; callers round
/// at the display or persistence boundary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerTotals {
    pub subtotal: Decimal,
    pub gst_total: Decimal,
    pub grand_total: Decimal,
}

/// In-memory, single-writer collection of [`LineItem`]s.
///
/// Insertion order is meaningful: it drives display order and is preserved
/// across edits. Totals are recomputed after every mutation, so readers never
/// observe stale aggregates. Performs no I/O.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct LineItemLedger {
    items: Vec<LineItem>,
    totals: LedgerTotals,
}

impl LineItemLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an empty line and return its position.
    pub fn add_line(&mut self) -> usize {
        self.items.push(LineItem::default());
        self.recompute_totals();
        debug!(lines = self.items.len(), "line added");
        self.items.len() - 1
    }

    /// Remove the line at `index`. Surviving lines keep their relative order;
    /// no external identifiers are renumbered.
    pub fn remove_line(&mut self, index: usize) -> Result<LineItem, LedgerError> {
        if index >= self.items.len() {
            return Err(LedgerError::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        let removed = self.items.remove(index);
        self.recompute_totals();
        Ok(removed)
    }

    /// Merge `patch` into the line at `index`, rerunning the calculator on
    /// the merged result.
    pub fn update_line(
        &mut self,
        index: usize,
        patch: LineItemPatch,
    ) -> Result<&LineItem, LedgerError> {
        let len = self.items.len();
        let item = self
            .items
            .get_mut(index)
            .ok_or(LedgerError::IndexOutOfRange { index, len })?;
        item.apply(patch);
        self.recompute_totals();
        Ok(&self.items[index])
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Current aggregates. Idempotent: calling twice without a mutation in
    /// between yields identical results.
    pub fn totals(&self) -> LedgerTotals {
        self.totals
    }

    fn recompute_totals(&mut self) {
        let mut totals = LedgerTotals::default();
        for item in &self.items {
            totals.subtotal += item.amount;
            totals.gst_total += item.gst_amount;
            totals.grand_total += item.total_amount;
        }
        self.totals = totals;
    }
}
