use beacon_core::ServerMessage;
use beacon_server::{PeerSink, SendError};
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct MockSinkInner {
    messages: Mutex<Vec<ServerMessage>>,
    closed: AtomicBool,
    failing: AtomicBool,
}

/// PeerSink that records everything the router sends to it.
#[derive(Clone, Default)]
pub struct MockPeerSink {
    inner: Arc<MockSinkInner>,
}

impl MockPeerSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report the channel as closed from now on.
    pub fn close(&self) {
        self.inner.closed.store(true, Ordering::SeqCst);
    }

    /// Stay open but reject every send, like a channel that died mid fan-out.
    pub fn fail_sends(&self) {
        self.inner.failing.store(true, Ordering::SeqCst);
    }

    pub fn messages(&self) -> Vec<ServerMessage> {
        self.inner.messages.lock().unwrap().clone()
    }

    /// Drain what has been received so far.
    pub fn take(&self) -> Vec<ServerMessage> {
        std::mem::take(&mut *self.inner.messages.lock().unwrap())
    }

    pub fn is_empty(&self) -> bool {
        self.inner.messages.lock().unwrap().is_empty()
    }

    pub fn viewer_counts(&self) -> Vec<usize> {
        self.messages()
            .into_iter()
            .filter_map(|m| match m {
                ServerMessage::ViewerCount { count } => Some(count),
                _ => None,
            })
            .collect()
    }

    pub fn offers(&self) -> Vec<Value> {
        self.messages()
            .into_iter()
            .filter_map(|m| match m {
                ServerMessage::Offer { sdp, .. } => Some(sdp),
                _ => None,
            })
            .collect()
    }

    pub fn answers(&self) -> Vec<Value> {
        self.messages()
            .into_iter()
            .filter_map(|m| match m {
                ServerMessage::Answer { sdp, .. } => Some(sdp),
                _ => None,
            })
            .collect()
    }

    pub fn candidates(&self) -> Vec<Value> {
        self.messages()
            .into_iter()
            .filter_map(|m| match m {
                ServerMessage::IceCandidate { candidate, .. } => Some(candidate),
                _ => None,
            })
            .collect()
    }

    pub fn broadcaster_left_count(&self) -> usize {
        self.messages()
            .iter()
            .filter(|m| matches!(m, ServerMessage::BroadcasterLeft))
            .count()
    }
}

impl PeerSink for MockPeerSink {
    fn is_open(&self) -> bool {
        !self.inner.closed.load(Ordering::SeqCst)
    }

    fn send(&self, msg: ServerMessage) -> Result<(), SendError> {
        if self.inner.closed.load(Ordering::SeqCst) || self.inner.failing.load(Ordering::SeqCst) {
            return Err(SendError::Closed);
        }
        tracing::debug!("[MockSink] captured {:?}", msg);
        self.inner.messages.lock().unwrap().push(msg);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_sink_stops_after_close() {
        let sink = MockPeerSink::new();
        sink.send(ServerMessage::ViewerCount { count: 1 }).unwrap();
        sink.close();

        assert!(!sink.is_open());
        assert!(sink.send(ServerMessage::BroadcasterLeft).is_err());
        assert_eq!(sink.viewer_counts(), vec![1]);
    }
}
