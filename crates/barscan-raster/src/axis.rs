use barscan_core::{GrayImageView, IntensityLevels};
use log::debug;

use crate::extract::RasterError;

/// Find the axis baseline: the lowest row whose probe window is entirely
/// at the axis (pure dark) level.
///
/// Scans bottom to top so gridlines above the baseline cannot shadow it.
pub fn find_axis_row(
    img: &GrayImageView<'_>,
    levels: &IntensityLevels,
    probe_start: usize,
    probe_end: usize,
) -> Result<usize, RasterError> {
    let probe_end = probe_end.min(img.width);
    if probe_start >= probe_end {
        return Err(RasterError::AxisNotFound);
    }

    for y in (0..img.height).rev() {
        let all_axis = (probe_start..probe_end).all(|x| levels.is_axis(img.get(x, y)));
        if all_axis {
            debug!("axis baseline at row {y}");
            return Ok(y);
        }
    }
    Err(RasterError::AxisNotFound)
}

/// Find the horizontal plot extent on the row directly above the axis.
///
/// The bounds are the first mark-classified pixels from the left and from
/// the right, each widened by one pixel outward to include the bar border.
pub fn find_plot_bounds(
    img: &GrayImageView<'_>,
    axis_row: usize,
    levels: &IntensityLevels,
) -> Result<(usize, usize), RasterError> {
    let row = axis_row.checked_sub(1).ok_or(RasterError::PlotBoundsNotFound)?;

    let is_bar = |x: usize| {
        let sample = img.get(x, row);
        levels.is_mark(sample) && !levels.is_axis(sample)
    };

    let left = (0..img.width)
        .find(|&x| is_bar(x))
        .ok_or(RasterError::PlotBoundsNotFound)?;
    let right = (0..img.width)
        .rev()
        .find(|&x| is_bar(x))
        .ok_or(RasterError::PlotBoundsNotFound)?;

    let left = left.saturating_sub(1);
    let right = (right + 1).min(img.width - 1);
    debug!("plot bounds [{left}, {right}] on row {row}");
    Ok((left, right))
}
