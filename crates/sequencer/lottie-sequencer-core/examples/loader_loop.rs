//! Drive a sequencer with a printing handle: bootstrap, loader loop, then an in/out pair.
//!
//! cargo run -p lottie-sequencer-core --example loader_loop

use lottie_sequencer_core::{parse_catalog_json, KeyframeRange, Sequencer, SequencerConfig};

fn main() -> anyhow::Result<()> {
    let json = lottie_sequencer_test_fixtures::catalogs::json("onboarding")?;
    let catalog = parse_catalog_json(&json)?;

    let handle = |range: KeyframeRange| {
        println!("play [{}, {}]", range.start(), range.end());
    };
    let cfg = SequencerConfig::for_platform("android");
    let mut seq = Sequencer::with_handle(catalog, cfg, handle);

    // A 60 Hz host loop; each clip "finishes" after its frame span at 30 fps.
    let dt = 1.0 / 60.0;
    let mut clock = 0.0f32;
    let mut finish_at: Option<f32> = None;
    for frame in 0..600 {
        seq.update(dt);
        clock += dt;

        match (finish_at, seq.current()) {
            (None, Some(range)) if !seq.is_complete() && !seq.has_pending_play() => {
                finish_at = Some(clock + range.span().abs() / 30.0);
            }
            (Some(t), _) if clock >= t => {
                finish_at = None;
                seq.on_playback_finished();
            }
            _ => {}
        }

        match frame {
            120 => {
                seq.hide_loader();
                seq.enqueue("success_in");
                seq.enqueue("success_out");
            }
            400 => seq.hide_loader(),
            _ => {}
        }

        for event in seq.drain_events() {
            println!("{}", serde_json::to_string(&event)?);
        }
    }

    println!("final state: {}", serde_json::to_string_pretty(&seq.state())?);
    Ok(())
}
