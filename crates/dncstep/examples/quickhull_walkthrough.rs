//! Step a Quickhull run and print the hull as it grows, chain by chain.
//!
//! Usage:
//!   cargo run -p dncstep --example quickhull_walkthrough -- [seed] [count]

use anyhow::{Context, Result};
use dncstep::prelude::*;
use tracing_subscriber::fmt::SubscriberBuilder;

fn main() -> Result<()> {
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(tracing::Level::DEBUG)
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .map(|s| s.parse::<u64>())
        .transpose()
        .context("seed must be an unsigned integer")?
        .unwrap_or(7);
    let count = args
        .next()
        .map(|s| s.parse::<usize>())
        .transpose()
        .context("count must be an unsigned integer")?
        .unwrap_or(PointGenCfg::default().count);

    let cfg = PointGenCfg {
        count,
        ..PointGenCfg::default()
    };
    let mut s = Quickhull::new(random_points(cfg, ReplayToken::new(seed))?);
    let mut rec = Recorder::new();

    while let Some(action) = s.first_enabled() {
        s = s.step_observed(action, &mut rec);
        for event in rec.take() {
            match event {
                HullEvent::Baseline {
                    min, max, discarded, ..
                } => println!("baseline {min} -> {max}, {} on the line", discarded.len()),
                HullEvent::Pivoted { a, b, pivot, dist, .. } => {
                    println!("  pivot {pivot} for {a} -> {b} (distance {dist:.4})")
                }
                HullEvent::Split { triangle, discarded, .. } => println!(
                    "  triangle {:?}: {} interior",
                    triangle.map(|p| p.to_string()),
                    discarded.len()
                ),
                HullEvent::EdgeAdded { edge, duplicate, .. } => {
                    let note = if duplicate { " (already present)" } else { "" };
                    println!("  edge {} -> {}{note}", edge.a, edge.b)
                }
                HullEvent::ChainCompleted { chain } => println!("{chain:?} chain complete"),
                HullEvent::Finished => println!("done"),
            }
        }
    }

    println!(
        "{} hull edges, {} of {} points discarded",
        s.hull_edges().len(),
        s.discarded().len(),
        s.points().len()
    );
    Ok(())
}
