use js_sys::{Function, Reflect};
use serde_json::Value as JsonValue;
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use lottie_sequencer_core::{
    CatalogDefinition, KeyframeRange, PlaybackHandle, Sequencer, SequencerConfig,
};

fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

/// A JS player: either an object with a `play(start, end)` method (e.g. a LottieView ref)
/// or a bare `(start, end) => void` function.
struct JsPlaybackHandle {
    this: JsValue,
    play: Function,
}

impl JsPlaybackHandle {
    fn from_view(view: JsValue) -> Result<Self, JsError> {
        if let Some(f) = view.dyn_ref::<Function>() {
            return Ok(Self {
                this: JsValue::UNDEFINED,
                play: f.clone(),
            });
        }
        let play = Reflect::get(&view, &JsValue::from_str("play"))
            .map_err(|e| JsError::new(&format!("mount: cannot read play: {e:?}")))?;
        let play = play
            .dyn_into::<Function>()
            .map_err(|_| JsError::new("mount: view has no play(start, end) method"))?;
        Ok(Self { this: view, play })
    }
}

impl PlaybackHandle for JsPlaybackHandle {
    fn play(&mut self, range: KeyframeRange) {
        let start = JsValue::from_f64(range.start() as f64);
        let end = JsValue::from_f64(range.end() as f64);
        if let Err(e) = self.play.call2(&self.this, &start, &end) {
            log::warn!("play({}, {}) threw: {e:?}", range.start(), range.end());
        }
    }
}

fn parse_config(config: JsValue, platform: Option<String>) -> Result<SequencerConfig, JsError> {
    if jsvalue_is_undefined_or_null(&config) {
        return Ok(platform
            .as_deref()
            .map(SequencerConfig::for_platform)
            .unwrap_or_default());
    }
    let raw: JsonValue =
        swb::from_value(config).map_err(|e| JsError::new(&format!("config error: {e}")))?;
    let has_dispatch = raw.get("dispatch").is_some();
    let mut cfg: SequencerConfig =
        serde_json::from_value(raw).map_err(|e| JsError::new(&format!("config error: {e}")))?;
    if let (false, Some(platform)) = (has_dispatch, platform.as_deref()) {
        cfg.dispatch = SequencerConfig::for_platform(platform).dispatch;
    }
    Ok(cfg)
}

#[wasm_bindgen]
pub struct LottieSequencer {
    core: Sequencer<JsPlaybackHandle>,
}

#[wasm_bindgen]
impl LottieSequencer {
    /// Create a sequencer from clip definitions.
    /// Example:
    ///   new LottieSequencer({ initial: [0, 10], loading: [11, 20], inAnimations: {}, outAnimations: {} },
    ///                       undefined, Platform.OS)
    /// `config` is optional SequencerConfig JSON; `platform` picks the dispatch policy when
    /// the config does not set one.
    #[wasm_bindgen(constructor)]
    pub fn new(
        definition: JsValue,
        config: JsValue,
        platform: Option<String>,
    ) -> Result<LottieSequencer, JsError> {
        console_error_panic_hook::set_once();

        if jsvalue_is_undefined_or_null(&definition) {
            return Err(JsError::new("definition is null/undefined"));
        }
        let def: CatalogDefinition = swb::from_value(definition)
            .map_err(|e| JsError::new(&format!("definition parse error: {e}")))?;
        let cfg = parse_config(config, platform)?;

        Ok(LottieSequencer {
            core: Sequencer::new(def, cfg),
        })
    }

    /// Attach the player. Starts the initial clip if it is still waiting.
    #[wasm_bindgen]
    pub fn mount(&mut self, view: JsValue) -> Result<(), JsError> {
        let handle = JsPlaybackHandle::from_view(view)?;
        self.core.mount_handle(handle);
        Ok(())
    }

    #[wasm_bindgen]
    pub fn unmount(&mut self) {
        self.core.unmount_handle();
    }

    #[wasm_bindgen(js_name = is_mounted)]
    pub fn is_mounted(&self) -> bool {
        self.core.handle().is_some()
    }

    /// Queue a clip by name. Non-string values and unknown names are ignored.
    #[wasm_bindgen]
    pub fn enqueue(&mut self, name: JsValue) {
        let value: JsonValue = swb::from_value(name).unwrap_or(JsonValue::Null);
        self.core.enqueue_value(&value);
    }

    #[wasm_bindgen(js_name = show_loader)]
    pub fn show_loader(&mut self) {
        self.core.show_loader();
    }

    #[wasm_bindgen(js_name = hide_loader)]
    pub fn hide_loader(&mut self) {
        self.core.hide_loader();
    }

    /// Wire this to the player's own "animation finished" callback.
    #[wasm_bindgen(js_name = on_playback_finished)]
    pub fn on_playback_finished(&mut self) {
        self.core.on_playback_finished();
    }

    /// Advance host time by dt seconds (drives deferred plays).
    #[wasm_bindgen]
    pub fn update(&mut self, dt: f32) {
        self.core.update(dt);
    }

    #[wasm_bindgen(js_name = queue_length)]
    pub fn queue_length(&self) -> usize {
        self.core.queue_len()
    }

    #[wasm_bindgen(js_name = is_complete)]
    pub fn is_complete(&self) -> bool {
        self.core.is_complete()
    }

    #[wasm_bindgen(js_name = active_animation)]
    pub fn active_animation(&self) -> Option<String> {
        self.core.active_animation().map(str::to_string)
    }

    /// Snapshot `{ queue, is_complete, active_animation, pending_play }`.
    #[wasm_bindgen]
    pub fn state(&self) -> Result<JsValue, JsError> {
        swb::to_value(&self.core.state()).map_err(|e| JsError::new(&format!("state error: {e}")))
    }

    /// Events recorded since the last drain, as an array of tagged objects.
    #[wasm_bindgen(js_name = drain_events)]
    pub fn drain_events(&mut self) -> Result<JsValue, JsError> {
        let events = self.core.drain_events();
        swb::to_value(&events).map_err(|e| JsError::new(&format!("events error: {e}")))
    }
}

/// Numeric ABI version for compatibility checks at init.
#[wasm_bindgen]
pub fn abi_version() -> u32 {
    1
}
