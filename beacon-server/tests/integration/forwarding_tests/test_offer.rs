use beacon_core::{RoomId, ServerMessage};
use serde_json::json;

use crate::integration::create_test_router;
use crate::utils::{TestPeer, setup_room};

#[test]
fn test_broadcaster_offer_reaches_every_viewer() {
    let mut router = create_test_router();
    let (b, vs) = setup_room(&mut router, "r1", 2);
    let outsider = TestPeer::connect(&mut router);

    b.offer(&mut router, "r1", "v=0 offer");

    let expected = ServerMessage::Offer {
        sdp: json!({"type": "offer", "sdp": "v=0 offer"}),
        room_id: RoomId::from("r1"),
    };
    for v in &vs {
        assert_eq!(v.sink.messages(), vec![expected.clone()]);
    }
    assert!(b.sink.is_empty());
    assert!(outsider.sink.is_empty());
}

#[test]
fn test_viewer_offer_goes_nowhere() {
    let mut router = create_test_router();
    let (b, vs) = setup_room(&mut router, "r1", 2);

    vs[0].offer(&mut router, "r1", "v=0 bogus");

    assert!(b.sink.is_empty());
    assert!(vs[0].sink.is_empty());
    assert!(vs[1].sink.is_empty());
}

#[test]
fn test_offer_to_missing_room_is_silent() {
    let mut router = create_test_router();
    let (b, vs) = setup_room(&mut router, "r1", 1);

    b.offer(&mut router, "r2", "v=0");

    assert!(b.sink.is_empty());
    assert!(vs[0].sink.is_empty());
}

#[test]
fn test_unassigned_offer_is_dropped() {
    let mut router = create_test_router();
    let (_b, vs) = setup_room(&mut router, "r1", 1);
    let stranger = TestPeer::connect(&mut router);

    stranger.offer(&mut router, "r1", "v=0");

    assert!(vs[0].sink.is_empty());
    assert!(stranger.sink.is_empty());
}
