//! Sequencer configuration.

use serde::{Deserialize, Serialize};

/// How a start-of-playback instruction reaches the handle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum PlayDispatch {
    /// Call `play` synchronously from the start-of-playback check.
    #[default]
    Immediate,
    /// Hold the play for `delay_ms` of host time (see `Sequencer::update`).
    /// Works around players that drop a `play` issued during their own initialization.
    Deferred { delay_ms: u32 },
}

impl PlayDispatch {
    /// Deferral in seconds, `None` for immediate dispatch.
    pub fn delay_secs(&self) -> Option<f32> {
        match self {
            PlayDispatch::Immediate => None,
            PlayDispatch::Deferred { delay_ms } => Some(*delay_ms as f32 / 1000.0),
        }
    }
}

/// Platform classes whose player needs a deferred `play`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlatformDeferral {
    pub platforms: Vec<String>,
    pub delay_ms: u32,
}

impl Default for PlatformDeferral {
    fn default() -> Self {
        Self {
            platforms: vec!["android".to_string()],
            delay_ms: 10,
        }
    }
}

impl PlatformDeferral {
    pub fn dispatch_for(&self, platform: &str) -> PlayDispatch {
        if self
            .platforms
            .iter()
            .any(|p| p.eq_ignore_ascii_case(platform))
        {
            PlayDispatch::Deferred {
                delay_ms: self.delay_ms,
            }
        } else {
            PlayDispatch::Immediate
        }
    }
}

/// Configuration for a sequencer instance.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SequencerConfig {
    #[serde(default)]
    pub dispatch: PlayDispatch,
    /// Events buffered between drains; the oldest is dropped once full.
    #[serde(default = "default_max_events")]
    pub max_events: usize,
}

fn default_max_events() -> usize {
    1024
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            dispatch: PlayDispatch::Immediate,
            max_events: default_max_events(),
        }
    }
}

impl SequencerConfig {
    /// Default config with the dispatch policy chosen by [`PlatformDeferral::default`].
    pub fn for_platform(platform: &str) -> Self {
        Self::for_platform_with(platform, &PlatformDeferral::default())
    }

    pub fn for_platform_with(platform: &str, deferral: &PlatformDeferral) -> Self {
        Self {
            dispatch: deferral.dispatch_for(platform),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn android_is_deferred_by_default() {
        assert_eq!(
            SequencerConfig::for_platform("Android").dispatch,
            PlayDispatch::Deferred { delay_ms: 10 }
        );
        assert_eq!(
            SequencerConfig::for_platform("ios").dispatch,
            PlayDispatch::Immediate
        );
    }

    #[test]
    fn deferral_list_is_swappable() {
        let custom = PlatformDeferral {
            platforms: vec!["web".into(), "tvos".into()],
            delay_ms: 25,
        };
        assert_eq!(
            SequencerConfig::for_platform_with("web", &custom).dispatch,
            PlayDispatch::Deferred { delay_ms: 25 }
        );
        assert_eq!(
            SequencerConfig::for_platform_with("android", &custom).dispatch,
            PlayDispatch::Immediate
        );
    }

    #[test]
    fn config_json_defaults() {
        let cfg: SequencerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, SequencerConfig::default());
        let cfg: SequencerConfig =
            serde_json::from_str(r#"{"dispatch":{"mode":"deferred","delay_ms":40}}"#).unwrap();
        assert_eq!(cfg.dispatch.delay_secs(), Some(0.04));
    }
}
