use beacon_core::RoomId;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RoomError {
    #[error("room {0} not found")]
    RoomNotFound(RoomId),
}
