mod disconnect_handler;
mod relay;
mod relay_command;
mod signaling_router;
mod ws_handler;

pub use relay::*;
pub use relay_command::*;
pub use signaling_router::*;
pub use ws_handler::*;
