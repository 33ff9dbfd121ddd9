use barscan_core::{merge_bins, month_number_es, Bin, DateSeries};
use chrono::NaiveDate;
use log::{debug, info, warn};
use roxmltree::Document;

use crate::error::VectorError;
use crate::labels::{bin_size, group_days, partition_labels};
use crate::params::VectorParams;
use crate::svgdoc::{ancestor, bar_paths, parse_segments, text_labels, Segment};

/// Reconstruct the daily series from an SVG chart document.
pub fn extract_series(svg_text: &str, params: &VectorParams) -> Result<DateSeries, VectorError> {
    let doc = Document::parse(svg_text)?;

    let bars = bar_paths(&doc, &params.fill_token);
    let Some(first_bar) = bars.first().copied() else {
        return Err(VectorError::NoBars(params.fill_token.clone()));
    };
    let rects: Vec<Vec<Segment>> = bars
        .iter()
        .map(|bar| parse_segments(bar.attribute("d").unwrap_or_default()))
        .collect::<Result<_, _>>()?;

    // Axis labels render below every bar; the lowest segment y across all
    // bars (the top of the tallest) bounds the label band from above.
    let bar_top = rects
        .iter()
        .flatten()
        .map(Segment::min_y)
        .fold(f64::INFINITY, f64::min);

    let scope = ancestor(first_bar, params.label_ancestor_depth);
    let all_labels = text_labels(scope);
    let (days, month_texts) = partition_labels(&all_labels, &params.footnote_marker, bar_top);
    if days.is_empty() {
        return Err(VectorError::NoDayLabels);
    }
    let bin = bin_size(&days).ok_or(VectorError::NoDayLabels)?;
    debug!("bin size {bin:.2} from {} day labels", days.len());

    let mut bins = Vec::new();

    // Geometry bins: count known, date unknown.
    for segments in &rects {
        let (x0, width, height) = rect_geometry(segments)?;
        let count = (height / bin).round() as u32;
        let spanned = (width / bin).trunc() as usize;
        let first = (x0 / bin).trunc() as usize;
        // A rectangle wider than one bin is several equal-height days the
        // renderer merged into one path.
        for k in 0..spanned {
            bins.push(Bin {
                index: first + k,
                date: None,
                count,
            });
        }
    }

    // Date bins: date known, count zero.
    let groups = group_days(&days);
    if groups.len() != month_texts.len() {
        return Err(VectorError::MonthGroupMismatch {
            days: groups.len(),
            months: month_texts.len(),
        });
    }
    for (group, month_text) in groups.iter().zip(&month_texts) {
        let (month, year) = parse_month_label(&month_text.text)?;
        for day in group {
            match NaiveDate::from_ymd_opt(year, month, day.day) {
                Some(date) => bins.push(Bin {
                    index: (day.x / bin).trunc() as usize,
                    date: Some(date),
                    count: 0,
                }),
                // The source renders one trailing day number that does not
                // exist in its month; it has no bar and gets no bin.
                None => warn!("dropping day label {} in `{}`: no such day", day.day, month_text.text),
            }
        }
    }

    let series = merge_bins(bins)?;
    info!("reconstructed {} days", series.len());
    Ok(series)
}

/// Extract (x-start, width, height) from a bar rectangle: segment 0 must be
/// horizontal, segment 3 vertical.
fn rect_geometry(segments: &[Segment]) -> Result<(f64, f64, f64), VectorError> {
    if segments.len() < 4 {
        return Err(VectorError::BadBarGeometry);
    }
    let base = segments[0];
    let side = segments[3];
    if !base.is_horizontal() || !side.is_vertical() {
        return Err(VectorError::BadBarGeometry);
    }
    Ok((base.x_start(), base.dx(), side.dy()))
}

fn parse_month_label(text: &str) -> Result<(u32, i32), VectorError> {
    let mut parts = text.split_whitespace();
    let name = parts
        .next()
        .ok_or_else(|| VectorError::BadMonthLabel(text.to_owned()))?;
    let year: i32 = parts
        .next()
        .and_then(|y| y.parse().ok())
        .ok_or_else(|| VectorError::BadMonthLabel(text.to_owned()))?;
    let month =
        month_number_es(name).ok_or_else(|| VectorError::UnknownMonth(name.to_owned()))?;
    Ok((month, year))
}
