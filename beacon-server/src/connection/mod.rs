mod connection_registry;
mod peer_sink;

pub use connection_registry::*;
pub use peer_sink::*;
