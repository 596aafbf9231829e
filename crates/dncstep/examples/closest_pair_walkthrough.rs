//! Step a closest-pair run by hand and print what each step did.
//!
//! Usage:
//!   cargo run -p dncstep --example closest_pair_walkthrough -- [seed] [count]
//!
//! Step logs go to stderr at debug level; the event trace goes to stdout.

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
        .unwrap_or(2025);
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
    let points = random_points(cfg, ReplayToken::new(seed))?;
    let mut s = ClosestPair::new(points);
    let mut rec = Recorder::new();
    let mut steps = 0usize;

    while let Some(action) = s.first_enabled() {
        s = s.step_observed(action, &mut rec);
        steps += 1;
        let active = s.active().map_or_else(|| "-".to_string(), |n| n.to_string());
        println!("#{steps:<3} {action:?} @ {active}");
        for event in rec.take() {
            match event {
                CpEvent::Compared { .. } => {}
                CpEvent::StripBuilt { strip, d2, .. } => {
                    println!("      strip of {} points, width {:.4}", strip.len(), 2.0 * d2.sqrt())
                }
                CpEvent::GlobalBestImproved { pair } => {
                    println!("      new best {}-{} at {:.5}", pair.a, pair.b, pair.distance())
                }
                other => println!("      {other:?}"),
            }
        }
    }

    match s.global_best() {
        Some(p) => println!("closest pair {}-{} distance {:.6} after {steps} steps", p.a, p.b, p.distance()),
        None => println!("fewer than two points"),
    }
    Ok(())
}
