//! Axis-label partitioning, day grouping, and bin-size discovery.

use barscan_core::median;
use log::debug;

use crate::svgdoc::TextLabel;

/// A numeric day label with its horizontal anchor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DayLabel {
    pub day: u32,
    pub x: f64,
}

/// Split axis labels into day numbers and month labels.
///
/// Labels anchored at or above the top of the bars (`y <= min_bar_y`) are
/// chart furniture (titles, counts), not axis labels; labels containing the
/// footnote marker are source notes unrelated to dates. Both partitions are
/// returned sorted by x.
pub fn partition_labels(
    labels: &[TextLabel],
    footnote_marker: &str,
    min_bar_y: f64,
) -> (Vec<DayLabel>, Vec<TextLabel>) {
    let mut days = Vec::new();
    let mut months = Vec::new();

    for label in labels {
        if label.y <= min_bar_y {
            continue;
        }
        if !footnote_marker.is_empty() && label.text.contains(footnote_marker) {
            continue;
        }
        match label.text.parse::<u32>() {
            Ok(day) => days.push(DayLabel { day, x: label.x }),
            Err(_) => months.push(label.clone()),
        }
    }

    days.sort_by(|a, b| a.x.total_cmp(&b.x));
    months.sort_by(|a, b| a.x.total_cmp(&b.x));
    debug!("{} day labels, {} month labels", days.len(), months.len());
    (days, months)
}

/// Group consecutive day labels into per-month runs, splitting immediately
/// before every "1" (the first day of a new month). The chart's first month
/// may start mid-month, so the first group need not begin with 1.
pub fn group_days(days: &[DayLabel]) -> Vec<Vec<DayLabel>> {
    let mut groups: Vec<Vec<DayLabel>> = Vec::new();
    for day in days {
        if day.day == 1 || groups.is_empty() {
            groups.push(Vec::new());
        }
        if let Some(group) = groups.last_mut() {
            group.push(*day);
        }
    }
    groups
}

/// Discover the horizontal width of one calendar-day bin as the median of
/// consecutive day-label x deltas; the same robust-median strategy as the
/// raster unit size, for the same reason.
pub fn bin_size(days: &[DayLabel]) -> Option<f64> {
    if days.len() < 2 {
        return None;
    }
    let deltas: Vec<f64> = days.windows(2).map(|w| w[1].x - w[0].x).collect();
    median(&deltas).filter(|d| *d > 0.0)
}
