//! Generic 1-D run scanner.
//!
//! The same two-state machine segments any scan line into mark runs,
//! independent of orientation: callers supply the position order (ascending
//! for a row sweep, descending for a bottom-to-top column sweep) and a
//! position→sample closure. Unit-square size is *discovered* from the run
//! widths (median), not assumed, which keeps the scan robust to per-render
//! sizing drift and to anti-aliasing noise.

use crate::intensity::IntensityLevels;

/// Half-open interval `[start, end)` along a scan axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    pub fn new(start: u32, end: u32) -> Self {
        debug_assert!(end > start, "span must be non-empty");
        Self { start, end }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.end - self.start
    }

    #[inline]
    pub fn midpoint(&self) -> u32 {
        (self.start + self.end) / 2
    }
}

/// Segment one scan line into mark runs.
///
/// Walks `positions` in the given order, sampling each through `sample`.
/// A run opens when a sample classifies as mark and closes on the first
/// sample that does not; a run still open when positions are exhausted is
/// closed at the final position. Each emitted span records the run's
/// position extent by absolute width, so descending scans report correct
/// widths too.
pub fn scan_runs<I, F>(positions: I, mut sample: F, levels: &IntensityLevels) -> Vec<Span>
where
    I: IntoIterator<Item = u32>,
    F: FnMut(u32) -> u8,
{
    let mut runs = Vec::new();
    let mut open: Option<u32> = None;
    let mut last: Option<u32> = None;

    for pos in positions {
        if levels.is_mark(sample(pos)) {
            if open.is_none() {
                open = Some(pos);
            }
        } else if let Some(start) = open.take() {
            let width = pos.abs_diff(start);
            if width > 0 {
                let lo = start.min(pos);
                runs.push(Span::new(lo, lo + width));
            }
        }
        last = Some(pos);
    }

    // Close a run cut off by the end of the line.
    if let (Some(start), Some(pos)) = (open, last) {
        let width = pos.abs_diff(start) + 1;
        let lo = start.min(pos);
        runs.push(Span::new(lo, lo + width));
    }

    runs
}

/// Upper median of a slice, `None` when empty.
pub fn median<T: Copy + PartialOrd>(values: &[T]) -> Option<T> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    Some(sorted[sorted.len() / 2])
}

/// Discover the unit-square size as the median run width.
///
/// Runs covering several squares packed without a gap are width outliers;
/// the median ignores them as long as single-square runs dominate.
pub fn unit_size(runs: &[Span]) -> Option<u32> {
    let widths: Vec<u32> = runs.iter().map(Span::width).collect();
    median(&widths).filter(|w| *w > 0)
}

/// Split each run into `round(width / unit)` consecutive unit-width spans.
///
/// Recovers individual squares from runs where adjacent equal marks touch.
/// Runs narrower than half a unit round to zero squares and are dropped as
/// noise.
pub fn normalize_runs(runs: &[Span], unit: u32) -> Vec<Span> {
    let mut squares = Vec::new();
    for run in runs {
        let n = packed_count(run.width(), unit);
        for k in 0..n {
            let start = run.start + k * unit;
            squares.push(Span::new(start, start + unit));
        }
    }
    squares
}

/// Total number of unit squares covered by the given runs.
pub fn count_units(runs: &[Span], unit: u32) -> u32 {
    runs.iter().map(|r| packed_count(r.width(), unit)).sum()
}

#[inline]
fn packed_count(width: u32, unit: u32) -> u32 {
    if unit == 0 {
        return 0;
    }
    (f64::from(width) / f64::from(unit)).round() as u32
}
