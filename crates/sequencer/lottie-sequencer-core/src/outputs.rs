//! Output contracts: semantic events recorded by the sequencer and a serializable
//! state snapshot. Hosts drain events after each call (or each frame) and forward them.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::range::KeyframeRange;
use crate::rules::TransitionRule;

/// Discrete signals emitted while sequencing.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
#[non_exhaustive]
pub enum SequencerEvent {
    Enqueued {
        name: String,
        range: KeyframeRange,
        queue_len: usize,
    },
    /// A request was dropped (invalid or unknown name).
    RequestIgnored {
        name: Option<String>,
        reason: String,
    },
    /// A deferred play was scheduled.
    PlaybackScheduled {
        range: KeyframeRange,
        delay_ms: u32,
    },
    PlaybackStarted {
        range: KeyframeRange,
    },
    PlaybackFinished {
        range: Option<KeyframeRange>,
        queue_len: usize,
    },
    TransitionApplied {
        rule: TransitionRule,
        from: Option<String>,
    },
    LoaderShown,
    LoaderHidden,
    HandleUnavailable {
        range: KeyframeRange,
    },
}

/// Bounded FIFO of events.
#[derive(Debug)]
pub(crate) struct EventLog {
    events: VecDeque<SequencerEvent>,
    cap: usize,
    overflowed: bool,
}

impl EventLog {
    pub(crate) fn new(cap: usize) -> Self {
        Self {
            events: VecDeque::new(),
            cap,
            overflowed: false,
        }
    }

    pub(crate) fn push(&mut self, event: SequencerEvent) {
        if self.cap == 0 {
            return;
        }
        if self.events.len() == self.cap {
            self.events.pop_front();
            if !self.overflowed {
                log::warn!("sequencer event buffer full ({}); dropping oldest", self.cap);
                self.overflowed = true;
            }
        }
        self.events.push_back(event);
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &SequencerEvent> {
        self.events.iter()
    }

    pub(crate) fn drain(&mut self) -> Vec<SequencerEvent> {
        self.overflowed = false;
        self.events.drain(..).collect()
    }
}

/// Read-only view of the sequencer for hosts.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct SequencerState {
    pub queue: Vec<KeyframeRange>,
    pub is_complete: bool,
    pub active_animation: Option<String>,
    /// A deferred play is waiting for its delay to elapse.
    pub pending_play: bool,
}
