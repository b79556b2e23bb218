
use tracing::Level;

use beacon_server::SignalingRouter;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_test_writer()
        .try_init();
}

pub fn create_test_router() -> SignalingRouter {
    init_tracing();
    SignalingRouter::new()
}
