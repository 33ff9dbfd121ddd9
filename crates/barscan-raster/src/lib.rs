//! Raster pipeline: reconstruct a daily case-count series from a bar-chart
//! bitmap.
//!
//! The chart encodes one case as one mid-gray unit square stacked above a
//! black baseline. The pipeline:
//!
//! 1. locate the axis baseline row and the left/right plot bounds,
//! 2. scan the row above the axis to find unit squares (self-calibrating
//!    the unit size from the median run width),
//! 3. fill gaps with synthetic squares so zero-case days get a slot,
//! 4. count stacked squares in each slot's column,
//! 5. map slot indices to dates through the injected [`CalendarSpec`].
//!
//! [`CalendarSpec`]: barscan_core::CalendarSpec

mod axis;
mod extract;
mod params;

pub use axis::{find_axis_row, find_plot_bounds};
pub use extract::{extract_series, RasterError};
pub use params::RasterParams;
