use beacon_core::RoomId;

use crate::integration::create_test_router;
use crate::utils::setup_room;

#[test]
fn test_closed_viewer_does_not_block_fan_out() {
    let mut router = create_test_router();
    let (b, vs) = setup_room(&mut router, "r1", 3);
    vs[0].sink.close();

    b.offer(&mut router, "r1", "v=0");

    assert!(vs[0].sink.is_empty());
    assert_eq!(vs[1].sink.offers().len(), 1);
    assert_eq!(vs[2].sink.offers().len(), 1);
    // Skipped, not removed: only the close callback cleans up.
    assert_eq!(router.rooms().viewer_count(&RoomId::from("r1")), Some(3));
}

#[test]
fn test_failing_send_does_not_block_fan_out() {
    let mut router = create_test_router();
    let (b, vs) = setup_room(&mut router, "r1", 3);
    vs[1].sink.fail_sends();

    b.ice_candidate(&mut router, "r1", "candidate:1");

    assert_eq!(vs[0].sink.candidates().len(), 1);
    assert!(vs[1].sink.is_empty());
    assert_eq!(vs[2].sink.candidates().len(), 1);
}
