//! Purchase line-item ledger and lot tracking for a textile manufacturing ERP.
//!
//! This crate is the client-side core of the purchase entry flow: it prices
//! fabric line items, maintains the ordered line collection with eagerly
//! recomputed totals, tracks physical fabric rolls ("lots"/"takas") with
//! measured lengths, and drives the three-step submission workflow
//! (header, then line items, then lots) against the ERP REST backend.
//!
//! The backend itself is abstracted behind [`client::PurchaseApi`]; a
//! reqwest-based implementation is provided in [`client::HttpPurchaseApi`].
//! All page scaffolding, rendering, and navigation live elsewhere — this
//! crate only owns the ledger arithmetic, the lot numbering rules, and the
//! ordered remote writes.

pub mod client;
pub mod commands;
pub mod config;
pub mod errors;
pub mod events;
pub mod models;
pub mod money;
pub mod services;
pub mod utils;

pub use config::{init_tracing, load_config, LedgerConfig};
pub use errors::{LedgerError, SubmissionStep};
pub use events::{Event, EventSender};
pub use money::{line_amounts, round2, LineAmounts};
pub use services::line_items::{LedgerTotals, LineItemLedger};
pub use services::lots::{LotTracker, MeterEdit};
pub use services::submission::{PurchaseDraft, PurchaseSubmission, SubmissionState};
