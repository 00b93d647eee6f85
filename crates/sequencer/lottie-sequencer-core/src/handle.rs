//! Playback handle seam.

use crate::range::KeyframeRange;

/// The external player the sequencer drives. `play` is fire-and-forget: completion is
/// reported back by the host calling `Sequencer::on_playback_finished`.
pub trait PlaybackHandle {
    fn play(&mut self, range: KeyframeRange);
}

impl<F> PlaybackHandle for F
where
    F: FnMut(KeyframeRange),
{
    fn play(&mut self, range: KeyframeRange) {
        self(range)
    }
}

/// Handle that records every play instruction. Useful for tests and headless hosts.
#[derive(Debug, Default, Clone)]
pub struct RecordingHandle {
    pub plays: Vec<KeyframeRange>,
}

impl RecordingHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<KeyframeRange> {
        self.plays.last().copied()
    }
}

impl PlaybackHandle for RecordingHandle {
    fn play(&mut self, range: KeyframeRange) {
        self.plays.push(range);
    }
}
