//! Sequencer: owns the clip queue and the single playback handle.
//!
//! Two reactive procedures drive everything:
//! - the start-of-playback check, run after any queue mutation (and on handle mount);
//! - the completion step, run when a finished signal flips playback back to idle-complete,
//!   which evaluates the transition rules.
//!
//! Mutations push a [`Reaction`] onto a FIFO that is drained before the public call returns,
//! so a completion's dequeue and rule evaluation always precede the next start check.

use std::collections::VecDeque;

use crate::catalog::{AnimationCatalog, CatalogDefinition, INITIAL, LOADING};
use crate::config::{PlayDispatch, SequencerConfig};
use crate::error::SequencerError;
use crate::handle::PlaybackHandle;
use crate::outputs::{EventLog, SequencerEvent, SequencerState};
use crate::range::KeyframeRange;
use crate::rules::matching_rules;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Reaction {
    QueueChanged,
    Completed,
}

/// A play held back by [`PlayDispatch::Deferred`].
#[derive(Clone, Copy, Debug)]
struct PendingPlay {
    range: KeyframeRange,
    /// Seconds of host time left before `play` is issued.
    remaining: f32,
}

#[derive(Debug)]
pub struct Sequencer<H> {
    catalog: AnimationCatalog,
    cfg: SequencerConfig,
    handle: Option<H>,

    queue: VecDeque<KeyframeRange>,
    is_complete: bool,
    /// Last requested name; drives transition rules only and may lag the queue head.
    active: Option<String>,
    pending: Option<PendingPlay>,

    reactions: VecDeque<Reaction>,
    draining: bool,
    events: EventLog,
}

impl<H: PlaybackHandle> Sequencer<H> {
    /// Create an unmounted sequencer. The initial clip is queued immediately and starts as
    /// soon as a handle is mounted.
    pub fn new(catalog: impl Into<AnimationCatalog>, cfg: SequencerConfig) -> Self {
        let mut seq = Self::empty(catalog.into(), cfg, None);
        seq.bootstrap();
        seq
    }

    /// Create a sequencer with its playback handle already mounted.
    pub fn with_handle(
        catalog: impl Into<AnimationCatalog>,
        cfg: SequencerConfig,
        handle: H,
    ) -> Self {
        let mut seq = Self::empty(catalog.into(), cfg, Some(handle));
        seq.bootstrap();
        seq
    }

    /// Convenience constructor from a raw definition with default config.
    pub fn from_definition(def: CatalogDefinition, handle: H) -> Self {
        Self::with_handle(def, SequencerConfig::default(), handle)
    }

    fn empty(catalog: AnimationCatalog, cfg: SequencerConfig, handle: Option<H>) -> Self {
        Self {
            events: EventLog::new(cfg.max_events),
            catalog,
            cfg,
            handle,
            queue: VecDeque::new(),
            is_complete: true,
            active: None,
            pending: None,
            reactions: VecDeque::new(),
            draining: false,
        }
    }

    /// Seeds the queue with the literal initial range, bypassing name lookup.
    fn bootstrap(&mut self) {
        self.active = Some(INITIAL.to_string());
        self.queue.push_back(self.catalog.initial());
        self.react(Reaction::QueueChanged);
    }

    /// Queue a clip by name. Invalid or unknown names are dropped silently (logged and
    /// recorded as [`SequencerEvent::RequestIgnored`]).
    pub fn enqueue(&mut self, name: &str) {
        if let Err(err) = self.try_enqueue(name) {
            self.ignore(Some(name), err);
        }
    }

    /// Like [`Sequencer::enqueue`] but reports why nothing was queued. Returns the queue
    /// length after the append.
    pub fn try_enqueue(&mut self, name: &str) -> Result<usize, SequencerError> {
        if name.trim().is_empty() {
            return Err(SequencerError::InvalidRequest(
                "animation name is empty".to_string(),
            ));
        }
        let range = self
            .catalog
            .resolve(name)
            .ok_or_else(|| SequencerError::UnknownAnimation(name.to_string()))?;

        self.queue.push_back(range);
        self.active = Some(name.to_string());
        let queue_len = self.queue.len();
        log::trace!("enqueued '{name}' {:?} (queue_len={queue_len})", range.as_array());
        self.events.push(SequencerEvent::Enqueued {
            name: name.to_string(),
            range,
            queue_len,
        });
        self.react(Reaction::QueueChanged);
        Ok(queue_len)
    }

    /// Dynamic entry point for host-provided values. Anything but a JSON string is ignored.
    pub fn enqueue_value(&mut self, value: &serde_json::Value) {
        match value.as_str() {
            Some(name) => self.enqueue(name),
            None => self.ignore(
                None,
                SequencerError::InvalidRequest(format!("expected a string name, got {value}")),
            ),
        }
    }

    /// Queue the loader and make it the active animation, so it keeps looping.
    pub fn show_loader(&mut self) {
        self.enqueue(LOADING);
        self.active = Some(LOADING.to_string());
        self.events.push(SequencerEvent::LoaderShown);
    }

    /// Stop the loader loop. Clips already queued (including a loader in flight) still play.
    pub fn hide_loader(&mut self) {
        self.active = None;
        self.events.push(SequencerEvent::LoaderHidden);
    }

    /// Completion signal from the playback handle. Drops exactly one clip from the head.
    pub fn on_playback_finished(&mut self) {
        if self.queue.is_empty() && self.is_complete {
            log::trace!("finished signal with an empty, idle queue; ignoring");
            return;
        }

        let finished = self.queue.pop_front();
        let was_playing = !self.is_complete;
        self.is_complete = true;
        if self.pending.take().is_some() {
            log::debug!("finished signal arrived before a deferred play was issued; dropping it");
        }

        self.events.push(SequencerEvent::PlaybackFinished {
            range: finished,
            queue_len: self.queue.len(),
        });

        if was_playing {
            self.reactions.push_back(Reaction::Completed);
        }
        self.react(Reaction::QueueChanged);
    }

    /// Advance host time by `dt` seconds. Only deferred plays depend on it.
    pub fn update(&mut self, dt: f32) {
        let Some(pending) = self.pending.as_mut() else {
            return;
        };
        pending.remaining -= dt;
        if pending.remaining > 0.0 {
            return;
        }
        let range = pending.range;
        self.pending = None;

        if let Some(handle) = self.handle.as_mut() {
            handle.play(range);
            log::trace!("deferred play {:?} issued", range.as_array());
            self.events.push(SequencerEvent::PlaybackStarted { range });
            return;
        }
        // Back to idle without a completion: transition rules must not run here.
        self.is_complete = true;
        self.handle_unavailable(range);
    }

    /// Install (or replace) the playback handle and retry a start that could not be issued.
    pub fn mount_handle(&mut self, handle: H) -> Option<H> {
        let previous = self.handle.replace(handle);
        self.react(Reaction::QueueChanged);
        previous
    }

    pub fn unmount_handle(&mut self) -> Option<H> {
        self.handle.take()
    }

    fn react(&mut self, reaction: Reaction) {
        self.reactions.push_back(reaction);
        if self.draining {
            return;
        }
        self.draining = true;
        while let Some(next) = self.reactions.pop_front() {
            match next {
                Reaction::Completed => self.apply_transition_rules(),
                Reaction::QueueChanged => self.start_if_idle(),
            }
        }
        self.draining = false;
    }

    fn apply_transition_rules(&mut self) {
        let snapshot = self.active.clone();
        for rule in matching_rules(snapshot.as_deref(), &self.catalog) {
            if rule.forces_loading_active() {
                self.active = Some(LOADING.to_string());
            }
            self.events.push(SequencerEvent::TransitionApplied {
                rule,
                from: snapshot.clone(),
            });
            self.enqueue(rule.follow_up());
        }
    }

    fn start_if_idle(&mut self) {
        if !self.is_complete {
            return;
        }
        let Some(&head) = self.queue.front() else {
            return;
        };

        match self.cfg.dispatch {
            PlayDispatch::Immediate => {
                if let Some(handle) = self.handle.as_mut() {
                    self.is_complete = false;
                    handle.play(head);
                    log::trace!("play {:?}", head.as_array());
                    self.events.push(SequencerEvent::PlaybackStarted { range: head });
                    return;
                }
                self.handle_unavailable(head);
            }
            PlayDispatch::Deferred { delay_ms } => {
                self.is_complete = false;
                self.pending = Some(PendingPlay {
                    range: head,
                    remaining: self.cfg.dispatch.delay_secs().unwrap_or(0.0),
                });
                self.events.push(SequencerEvent::PlaybackScheduled {
                    range: head,
                    delay_ms,
                });
            }
        }
    }

    fn handle_unavailable(&mut self, range: KeyframeRange) {
        log::debug!(
            "{}; skipping play {:?}",
            SequencerError::HandleUnavailable,
            range.as_array()
        );
        self.events.push(SequencerEvent::HandleUnavailable { range });
    }

    fn ignore(&mut self, name: Option<&str>, err: SequencerError) {
        log::debug!("ignoring animation request: {err}");
        self.events.push(SequencerEvent::RequestIgnored {
            name: name.map(str::to_string),
            reason: err.to_string(),
        });
    }

    pub fn queue(&self) -> impl Iterator<Item = &KeyframeRange> {
        self.queue.iter()
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Head of the queue: the clip playing (or about to).
    pub fn current(&self) -> Option<KeyframeRange> {
        self.queue.front().copied()
    }

    pub fn is_complete(&self) -> bool {
        self.is_complete
    }

    pub fn active_animation(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn has_pending_play(&self) -> bool {
        self.pending.is_some()
    }

    pub fn catalog(&self) -> &AnimationCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &SequencerConfig {
        &self.cfg
    }

    pub fn handle(&self) -> Option<&H> {
        self.handle.as_ref()
    }

    pub fn handle_mut(&mut self) -> Option<&mut H> {
        self.handle.as_mut()
    }

    pub fn events(&self) -> impl Iterator<Item = &SequencerEvent> {
        self.events.iter()
    }

    pub fn drain_events(&mut self) -> Vec<SequencerEvent> {
        self.events.drain()
    }

    pub fn state(&self) -> SequencerState {
        SequencerState {
            queue: self.queue.iter().copied().collect(),
            is_complete: self.is_complete,
            active_animation: self.active.clone(),
            pending_play: self.pending.is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handle::RecordingHandle;

    fn def() -> CatalogDefinition {
        CatalogDefinition::new(KeyframeRange::new(0.0, 10.0))
            .with_loading(KeyframeRange::new(11.0, 20.0))
    }

    #[test]
    fn rules_run_before_the_next_start_check() {
        let def = def().with_in("hi", KeyframeRange::new(30.0, 40.0));
        let mut seq = Sequencer::from_definition(def, RecordingHandle::new());
        seq.enqueue("hi");
        seq.drain_events();

        // initial finishes while "hi" is queued; "hi" is active so no rule fires.
        seq.on_playback_finished();
        let events = seq.drain_events();
        assert!(matches!(events[0], SequencerEvent::PlaybackFinished { .. }));
        assert_eq!(
            events[1],
            SequencerEvent::PlaybackStarted {
                range: KeyframeRange::new(30.0, 40.0)
            }
        );
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn reactions_do_not_nest() {
        let mut seq = Sequencer::from_definition(def(), RecordingHandle::new());
        seq.on_playback_finished();
        assert!(!seq.draining);
        assert!(seq.reactions.is_empty());
    }

    #[test]
    fn spurious_finish_while_idle_skips_rules() {
        let mut seq: Sequencer<RecordingHandle> =
            Sequencer::new(def(), SequencerConfig::default());
        // No handle: initial stays queued and idle-complete.
        assert!(seq.is_complete());
        seq.on_playback_finished();
        // Head popped, but the flag never flipped, so the loader rule did not run.
        assert_eq!(seq.queue_len(), 0);
        assert_eq!(seq.active_animation(), Some(INITIAL));
    }
}
