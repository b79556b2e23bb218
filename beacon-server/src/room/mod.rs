mod room;
mod room_error;
mod room_table;

pub use room::*;
pub use room_error::*;
pub use room_table::*;
