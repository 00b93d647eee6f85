//! Lottie Sequencer Core (engine-agnostic)
//!
//! Drives one playback handle through a strictly ordered, non-overlapping sequence of named
//! clips. Requests made while a clip is in flight are queued; completion signals from the
//! handle advance the queue and apply the loader transition rules.
//!
//! Hosts (web, native UI) own the actual player: they implement [`PlaybackHandle`] and wire
//! the player's "finished" callback to [`Sequencer::on_playback_finished`].

pub mod catalog;
pub mod config;
pub mod error;
pub mod handle;
pub mod outputs;
pub mod range;
pub mod rules;
pub mod sequencer;

// Re-exports for consumers (adapters)
pub use catalog::{parse_catalog_json, AnimationCatalog, CatalogDefinition, INITIAL, LOADING};
pub use config::{PlatformDeferral, PlayDispatch, SequencerConfig};
pub use error::{CatalogError, SequencerError};
pub use handle::{PlaybackHandle, RecordingHandle};
pub use outputs::{SequencerEvent, SequencerState};
pub use range::KeyframeRange;
pub use rules::{matching_rules, TransitionRule};
pub use sequencer::Sequencer;
