#![cfg(target_arch = "wasm32")]
use js_sys::{Array, Function, Object, Reflect};
use lottie_sequencer_wasm::{abi_version, LottieSequencer};
use serde::Serialize;
use serde_wasm_bindgen as swb;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

use serde_json::json;

wasm_bindgen_test_configure!(run_in_browser);

fn definition() -> JsValue {
    let def = json!({
        "initial": [0, 10],
        "loading": [11, 20],
        "inAnimations": { "hello": [21, 30] },
        "outAnimations": { "bye": [31, 40] }
    });
    def.serialize(&swb::Serializer::json_compatible()).unwrap()
}

/// A view object whose play(start, end) pushes [start, end] onto `calls`.
fn recording_view(calls: &Array) -> JsValue {
    let view = Object::new();
    let play = Function::new_with_args("start, end", "this.calls.push([start, end]);");
    Reflect::set(&view, &JsValue::from_str("calls"), calls).unwrap();
    Reflect::set(&view, &JsValue::from_str("play"), &play).unwrap();
    view.into()
}

#[wasm_bindgen_test]
fn abi_is_1() {
    assert_eq!(abi_version(), 1);
}

#[wasm_bindgen_test]
fn rejects_missing_definition() {
    assert!(LottieSequencer::new(JsValue::UNDEFINED, JsValue::UNDEFINED, None).is_err());
}

#[wasm_bindgen_test]
fn mount_starts_initial_and_finish_chains_loader() {
    let mut seq = LottieSequencer::new(definition(), JsValue::UNDEFINED, None).unwrap();
    assert_eq!(seq.queue_length(), 1);
    assert!(seq.is_complete());

    let calls = Array::new();
    seq.mount(recording_view(&calls)).unwrap();
    assert!(seq.is_mounted());
    assert_eq!(calls.length(), 1);
    assert!(!seq.is_complete());

    seq.on_playback_finished();
    assert_eq!(calls.length(), 2);
    assert_eq!(seq.active_animation().as_deref(), Some("loading"));
}

#[wasm_bindgen_test]
fn non_string_enqueue_is_ignored() {
    let mut seq = LottieSequencer::new(definition(), JsValue::UNDEFINED, None).unwrap();
    seq.enqueue(JsValue::from_f64(42.0));
    seq.enqueue(JsValue::UNDEFINED);
    assert_eq!(seq.queue_length(), 1);
    assert_eq!(seq.active_animation().as_deref(), Some("initial"));

    seq.enqueue(JsValue::from_str("hello"));
    assert_eq!(seq.queue_length(), 2);
}

#[wasm_bindgen_test]
fn android_defers_until_update() {
    let mut seq =
        LottieSequencer::new(definition(), JsValue::UNDEFINED, Some("android".into())).unwrap();
    let calls = Array::new();
    seq.mount(recording_view(&calls)).unwrap();
    assert_eq!(calls.length(), 0);
    seq.update(0.02);
    assert_eq!(calls.length(), 1);
}

#[wasm_bindgen_test]
fn mount_accepts_bare_function() {
    let mut seq = LottieSequencer::new(definition(), JsValue::UNDEFINED, None).unwrap();
    let f = Function::new_with_args("start, end", "");
    seq.mount(f.into()).unwrap();
    assert!(!seq.is_complete());
}

#[wasm_bindgen_test]
fn mount_rejects_object_without_play() {
    let mut seq = LottieSequencer::new(definition(), JsValue::UNDEFINED, None).unwrap();
    assert!(seq.mount(Object::new().into()).is_err());
    assert!(!seq.is_mounted());
}

#[wasm_bindgen_test]
fn state_and_events_are_plain_objects() {
    let mut seq = LottieSequencer::new(definition(), JsValue::UNDEFINED, None).unwrap();
    let state = seq.state().unwrap();
    let queue = Reflect::get(&state, &JsValue::from_str("queue")).unwrap();
    assert_eq!(Array::from(&queue).length(), 1);

    let events = seq.drain_events().unwrap();
    assert!(Array::is_array(&events));
    assert!(Array::from(&events).length() >= 1);
}
