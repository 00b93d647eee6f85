use lottie_sequencer_core::{
    parse_catalog_json, KeyframeRange, RecordingHandle, Sequencer, SequencerConfig, INITIAL,
    LOADING,
};
use lottie_sequencer_test_fixtures::catalogs;

fn r(a: f32, b: f32) -> KeyframeRange {
    KeyframeRange::new(a, b)
}

#[test]
fn every_fixture_parses() {
    for key in catalogs::keys() {
        let json = catalogs::json(&key).unwrap();
        let cat = parse_catalog_json(&json).unwrap_or_else(|e| panic!("{key}: {e}"));
        assert!(cat.contains(INITIAL), "{key} missing initial");
    }
}

#[test]
fn shadowed_fixture_follows_merge_order() {
    let cat = parse_catalog_json(&catalogs::json("shadowed").unwrap()).unwrap();
    // in-animations shadow the dedicated loading clip, out-animations shadow in-animations.
    assert_eq!(cat.resolve(LOADING), Some(r(100.0, 120.0)));
    assert_eq!(cat.resolve("pulse"), Some(r(31.0, 40.0)));
    assert!(cat.is_out_animation("pulse"));
}

#[test]
fn shadowed_loader_is_what_loops() {
    let cat = parse_catalog_json(&catalogs::json("shadowed").unwrap()).unwrap();
    let mut seq = Sequencer::with_handle(cat, SequencerConfig::default(), RecordingHandle::new());
    seq.on_playback_finished();
    assert_eq!(seq.handle().unwrap().last(), Some(r(100.0, 120.0)));
}

#[test]
fn missing_loader_stops_after_initial() {
    let cat = parse_catalog_json(&catalogs::json("no-loader").unwrap()).unwrap();
    let mut seq = Sequencer::with_handle(cat, SequencerConfig::default(), RecordingHandle::new());
    seq.on_playback_finished();

    // Rule 1 still marks the loader active, but there is nothing to queue.
    assert_eq!(seq.active_animation(), Some(LOADING));
    assert_eq!(seq.queue_len(), 0);
    assert!(seq.is_complete());

    seq.show_loader();
    assert_eq!(seq.queue_len(), 0);
    assert_eq!(seq.handle().unwrap().plays, vec![r(0.0, 24.0)]);

    seq.enqueue("success_out");
    seq.on_playback_finished();
    assert_eq!(seq.queue_len(), 0);
    assert_eq!(seq.active_animation(), Some("success_out"));
}
