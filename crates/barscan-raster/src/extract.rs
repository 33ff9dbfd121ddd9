use barscan_core::{
    count_units, fill_gaps, normalize_runs, scan_runs, unit_size, DatePoint, DateSeries,
    GrayImageView, IntensityLevels, Span,
};
use log::{debug, info};
use thiserror::Error;

use crate::axis::{find_axis_row, find_plot_bounds};
use crate::params::RasterParams;

/// Errors returned by the raster pipeline. All are fatal: the input either
/// is not a chart of the expected shape or carries no data.
#[derive(Error, Debug)]
pub enum RasterError {
    #[error("no axis baseline row found in the image")]
    AxisNotFound,
    #[error("no mark pixels found above the axis to bound the plot")]
    PlotBoundsNotFound,
    #[error("no unit squares detected along the axis")]
    NoMarks,
}

/// Reconstruct the daily series from a grayscale chart bitmap.
pub fn extract_series(
    img: &GrayImageView<'_>,
    params: &RasterParams,
) -> Result<DateSeries, RasterError> {
    let axis = find_axis_row(img, &params.levels, params.probe_start, params.probe_end)?;
    let (left, right) = find_plot_bounds(img, axis, &params.levels)?;

    // Work on the plot region only; positions below are crop-local.
    let plot = img.crop(left, 0, right + 1, axis + 1);
    let view = plot.view();
    let line = view.height.checked_sub(2).ok_or(RasterError::NoMarks)?;

    let runs = scan_runs(
        0..view.width as u32,
        |x| view.get(x as usize, line),
        &params.levels,
    );
    let unit = unit_size(&runs).ok_or(RasterError::NoMarks)?;
    debug!("unit square size {unit} from {} runs", runs.len());

    let squares = normalize_runs(&runs, unit);
    let slots = fill_gaps(&squares, unit);
    info!("{} day slots across plot rows {left}..={right}", slots.len());

    let counts = count_columns(&view, &slots, line, unit, &params.levels);

    let mut points = Vec::with_capacity(counts.len());
    for (slot, count) in counts.into_iter().enumerate() {
        match params.calendar.date_for_slot(slot) {
            Some(date) => points.push(DatePoint { date, cases: count }),
            None => debug!("slot {slot} skipped: no such calendar day"),
        }
    }
    Ok(DateSeries::new(points))
}

/// Count stacked unit squares in each slot's column, bottom to top from the
/// row above the axis. Bars stack gap-free on the axis, so no vertical gap
/// fill is needed.
fn count_columns(
    view: &GrayImageView<'_>,
    slots: &[Span],
    line: usize,
    unit: u32,
    levels: &IntensityLevels,
) -> Vec<u32> {
    slots
        .iter()
        .map(|slot| {
            let column = slot.midpoint() as usize;
            let runs = scan_runs(
                (0..=line as u32).rev(),
                |y| view.get(column, y as usize),
                levels,
            );
            count_units(&runs, unit)
        })
        .collect()
}
