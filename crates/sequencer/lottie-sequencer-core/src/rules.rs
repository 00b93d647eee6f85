//! Transition rules evaluated each time playback becomes idle-complete.
//!
//! Both predicates are checked on every idle transition against the same snapshot of the
//! active animation; they are not a first-match chain.

use serde::{Deserialize, Serialize};

use crate::catalog::{AnimationCatalog, INITIAL, LOADING};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionRule {
    /// Active is `initial` or `loading`: mark `loading` active and queue another loader play.
    LoaderLoop,
    /// Active is an out-animation: queue the loader.
    OutToLoader,
}

impl TransitionRule {
    /// Name queued when the rule fires.
    pub fn follow_up(&self) -> &'static str {
        LOADING
    }

    /// Whether the rule also forces the active animation to `loading` before queuing.
    pub fn forces_loading_active(&self) -> bool {
        matches!(self, TransitionRule::LoaderLoop)
    }
}

/// Rules that fire for `active`, in evaluation order.
pub fn matching_rules(active: Option<&str>, catalog: &AnimationCatalog) -> Vec<TransitionRule> {
    let Some(active) = active else {
        return Vec::new();
    };
    let mut fired = Vec::with_capacity(2);
    if active == INITIAL || active == LOADING {
        fired.push(TransitionRule::LoaderLoop);
    }
    if catalog.is_out_animation(active) {
        fired.push(TransitionRule::OutToLoader);
    }
    fired
}
