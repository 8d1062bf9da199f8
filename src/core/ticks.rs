use ordered_float::OrderedFloat;

use super::guide::resolve_guide_value;

/// Candidate count used when a grid config does not set `grid_ticks`.
pub const DEFAULT_GRID_TICKS: usize = 5;

const MAX_GENERATED_TICKS: f64 = 10_000.0;

// Step-size thresholds for 10/5/2 "nice" increments.
const E10: f64 = 7.071_067_811_865_476;
const E5: f64 = 3.162_277_660_168_379_5;
const E2: f64 = std::f64::consts::SQRT_2;

/// Merges an optional guide value into tick candidates.
///
/// The result is ascending with duplicates removed (`-0.0` and `0.0` count as
/// one value); non-finite candidates are dropped.
#[must_use]
pub fn merge_guide_into_ticks(candidates: &[f64], guide: Option<f64>) -> Vec<f64> {
    let mut ticks: Vec<OrderedFloat<f64>> = candidates
        .iter()
        .copied()
        .chain(guide)
        .filter(|value| value.is_finite())
        .map(OrderedFloat)
        .collect();
    ticks.sort_unstable();
    ticks.dedup();
    ticks.into_iter().map(|value| value.0).collect()
}

/// Builds one axis's tick set from its candidates, its own domain and guide flag.
#[must_use]
pub fn resolve_tick_set(
    candidates: &[f64],
    domain: (f64, f64),
    show_guide: bool,
    guide_value: f64,
) -> Vec<f64> {
    merge_guide_into_ticks(
        candidates,
        resolve_guide_value(show_guide, guide_value, domain),
    )
}

/// Generates roughly `count` evenly spaced, human-friendly tick candidates
/// that lie inside `domain` (1, 2 or 5 times a power of ten apart).
///
/// The output follows the domain direction, so a reversed domain yields
/// descending candidates.
#[must_use]
pub fn linear_tick_candidates(domain: (f64, f64), count: usize) -> Vec<f64> {
    let (start, stop) = domain;
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }

    let reverse = stop < start;
    let (low, high) = if reverse { (stop, start) } else { (start, stop) };
    let Some((first, last, increment)) = tick_spec(low, high, count as f64) else {
        return Vec::new();
    };
    if last < first {
        return Vec::new();
    }

    let n = (last - first).min(MAX_GENERATED_TICKS) as usize;
    let mut ticks: Vec<f64> = (0..=n)
        .map(|index| {
            let step_index = first + index as f64;
            if increment < 0.0 {
                step_index / -increment
            } else {
                step_index * increment
            }
        })
        .collect();
    if reverse {
        ticks.reverse();
    }
    ticks
}

// Returns the first/last step indices and the increment. A negative increment
// means "divide by -increment", which keeps fractional steps exact.
fn tick_spec(start: f64, stop: f64, count: f64) -> Option<(f64, f64, f64)> {
    let step = (stop - start) / count.max(0.0);
    if !step.is_finite() || step <= 0.0 {
        return None;
    }
    let power = step.log10().floor();
    let error = step / 10_f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };

    let (mut first, mut last, increment) = if power < 0.0 {
        let increment = 10_f64.powf(-power) / factor;
        let mut first = (start * increment).round();
        let mut last = (stop * increment).round();
        if first / increment < start {
            first += 1.0;
        }
        if last / increment > stop {
            last -= 1.0;
        }
        (first, last, -increment)
    } else {
        let increment = 10_f64.powf(power) * factor;
        let mut first = (start / increment).round();
        let mut last = (stop / increment).round();
        if first * increment < start {
            first += 1.0;
        }
        if last * increment > stop {
            last -= 1.0;
        }
        (first, last, increment)
    };

    if last < first && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    if !first.is_finite() || !last.is_finite() {
        first = 0.0;
        last = -1.0;
    }
    Some((first, last, increment))
}
