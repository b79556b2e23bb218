use clap::Parser;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::num::NonZeroUsize;

/// Signaling relay for one-to-many WebRTC sessions.
#[derive(Parser, Debug, Clone)]
#[command(name = "beacon", version, about, long_about = None)]
pub struct Config {
    /// Address to listen on.
    #[arg(long, env = "HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    /// Port to listen on.
    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Pending commands the relay buffers before transport tasks wait.
    #[arg(long, env = "BEACON_RELAY_CAPACITY", default_value = "256")]
    pub relay_capacity: NonZeroUsize,
}

impl Config {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 3000,
            relay_capacity: NonZeroUsize::new(256).unwrap_or(NonZeroUsize::MIN),
        }
    }
}
