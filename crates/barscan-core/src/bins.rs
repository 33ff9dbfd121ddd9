//! Bins and the date/count merge.
//!
//! A bin is one calendar-day slot along the chart's horizontal axis. The
//! raster pipeline fills bins directly in slot order; the vector pipeline
//! produces two partial bin sets (date-known from axis labels, count-known
//! from bar geometry) and merges them by shared index.

use chrono::NaiveDate;
use thiserror::Error;

use crate::scan::Span;

/// One horizontal slot: its index, an optional date, and a case count.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bin {
    pub index: usize,
    pub date: Option<NaiveDate>,
    pub count: u32,
}

/// One day of the reconstructed series.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DatePoint {
    pub date: NaiveDate,
    pub cases: u32,
}

/// The final ordered (date, cases) series.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DateSeries {
    pub points: Vec<DatePoint>,
}

impl DateSeries {
    /// Build a series sorted ascending by date.
    pub fn new(mut points: Vec<DatePoint>) -> Self {
        points.sort_by_key(|p| p.date);
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[derive(Error, Debug)]
pub enum MergeError {
    /// A merged bin carries a count but no axis label assigned it a date.
    /// Emitting it would corrupt the CSV for downstream consumers, so the
    /// whole extraction fails instead.
    #[error("bin {index} has no date after merging label and geometry bins")]
    UndatedBin { index: usize },
}

/// Insert synthetic spans into every gap between detected squares.
///
/// Days with zero cases leave no visual mark, so the detected squares have
/// holes exactly one or more unit sizes wide. Gaps are whole multiples of
/// the unit by construction, hence the truncating division. The walk starts
/// at position 0 of the cropped plot, so a leading gap is filled too.
pub fn fill_gaps(spans: &[Span], unit: u32) -> Vec<Span> {
    let mut filled = Vec::with_capacity(spans.len());
    let mut cursor = 0u32;
    if unit == 0 {
        return spans.to_vec();
    }
    for span in spans {
        let missing = span.start.saturating_sub(cursor) / unit;
        for _ in 0..missing {
            filled.push(Span::new(cursor, cursor + unit));
            cursor += unit;
        }
        filled.push(*span);
        cursor = span.end;
    }
    filled
}

/// Merge date-labeled and geometry-derived bins by shared index.
///
/// Bins sharing an index reduce to one: the non-null date is kept and the
/// counts are summed. Every index must end up dated; an undated bin means
/// the label-derived and geometry-derived index domains disagree and the
/// extraction is unsound.
pub fn merge_bins(mut bins: Vec<Bin>) -> Result<DateSeries, MergeError> {
    bins.sort_by_key(|b| b.index);

    let mut points = Vec::new();
    let mut iter = bins.into_iter().peekable();
    while let Some(first) = iter.next() {
        let index = first.index;
        let mut date = first.date;
        let mut count = first.count;
        while let Some(next) = iter.next_if(|b| b.index == index) {
            if date.is_none() {
                date = next.date;
            }
            count += next.count;
        }
        let Some(date) = date else {
            return Err(MergeError::UndatedBin { index });
        };
        points.push(DatePoint { date, cases: count });
    }

    Ok(DateSeries::new(points))
}
