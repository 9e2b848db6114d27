//! Pure interpolation between two tick states
//!
//! The simulation jumps a whole cell per tick; frames in between blend
//! each segment from where it was to where it is, so rendering can run at
//! a higher cadence than the tick without knowing anything about timers.

use crate::game::Cell;
use std::time::Duration;

/// Fraction of the current tick already elapsed, clamped to `[0, 1]`
pub fn progress(elapsed: Duration, tick_interval: Duration) -> f64 {
    if tick_interval.is_zero() {
        return 1.0;
    }
    (elapsed.as_secs_f64() / tick_interval.as_secs_f64()).clamp(0.0, 1.0)
}

fn blend(from: Cell, to: Cell, t: f64) -> (f64, f64) {
    let x = from.x as f64 + (to.x - from.x) as f64 * t;
    let y = from.y as f64 + (to.y - from.y) as f64 * t;
    (x, y)
}

/// Fractional board positions for every current segment.
///
/// Segment `i` slides from `previous[i]` to `current[i]`; after a normal
/// advance `current[i]` is the cell segment `i - 1` occupied, which gives
/// the follow-the-leader motion. A just-grown tail has no previous cell of
/// its own; it holds the old tail cell until the next tick. At progress
/// 1.0 the output is exactly `current`.
pub fn blend_segments(previous: &[Cell], current: &[Cell], t: f64) -> Vec<(f64, f64)> {
    current
        .iter()
        .enumerate()
        .map(|(i, &cell)| {
            let from = previous
                .get(i)
                .or_else(|| previous.last())
                .copied()
                .unwrap_or(cell);
            blend(from, cell, t)
        })
        .collect()
}
