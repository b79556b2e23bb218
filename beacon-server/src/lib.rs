mod app;
mod config;
mod connection;
mod room;
mod signaling;

pub use app::*;
pub use config::*;
pub use connection::*;
pub use room::*;
pub use signaling::*;
