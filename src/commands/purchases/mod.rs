pub mod add_lot_command;
pub mod delete_lot_command;
pub mod save_header_command;
pub mod submit_line_items_command;
pub mod submit_lots_command;
pub mod update_lot_meter_command;

pub use add_lot_command::AddLotCommand;
pub use delete_lot_command::DeleteLotCommand;
pub use save_header_command::{SaveHeaderCommand, SavedHeader};
pub use submit_line_items_command::SubmitLineItemsCommand;
pub use submit_lots_command::SubmitLotsCommand;
pub use update_lot_meter_command::UpdateLotMeterCommand;
