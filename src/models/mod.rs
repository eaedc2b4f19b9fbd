pub mod line_item;
pub mod lot;
pub mod purchase;
pub mod reference;
pub mod session;

pub use line_item::{LineItem, LineItemPatch};
pub use lot::Lot;
pub use purchase::{HeaderTotals, PaymentStatus, PaymentType, PurchaseFlow, PurchaseHeader};
pub use reference::{LookupEntry, ReferenceData};
pub use session::SessionContext;
