pub mod line_items;
pub mod lots;
pub mod reference_data;
pub mod submission;
