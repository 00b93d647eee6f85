//! Keyframe ranges: the playable unit handed to the playback handle.

use serde::{Deserialize, Serialize};

/// A `[start, end]` segment of the underlying animation asset, in frames.
///
/// Serialized as a two-element array so definitions can be written the same way
/// hosts pass them to a Lottie player (`play(start, end)`).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 2]", into = "[f32; 2]")]
pub struct KeyframeRange {
    start: f32,
    end: f32,
}

impl KeyframeRange {
    pub const fn new(start: f32, end: f32) -> Self {
        Self { start, end }
    }

    #[inline]
    pub fn start(&self) -> f32 {
        self.start
    }

    #[inline]
    pub fn end(&self) -> f32 {
        self.end
    }

    /// Frame count covered by the segment (negative for reversed segments).
    #[inline]
    pub fn span(&self) -> f32 {
        self.end - self.start
    }

    #[inline]
    pub fn as_array(&self) -> [f32; 2] {
        [self.start, self.end]
    }
}

impl From<[f32; 2]> for KeyframeRange {
    fn from(v: [f32; 2]) -> Self {
        Self::new(v[0], v[1])
    }
}

impl From<KeyframeRange> for [f32; 2] {
    fn from(r: KeyframeRange) -> Self {
        r.as_array()
    }
}

impl From<(f32, f32)> for KeyframeRange {
    fn from((start, end): (f32, f32)) -> Self {
        Self::new(start, end)
    }
}
