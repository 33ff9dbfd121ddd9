use barscan_core::{CalendarSpec, IntensityLevels};
use serde::{Deserialize, Serialize};

/// Parameters for the raster pipeline.
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct RasterParams {
    /// Reference intensities for pixel classification.
    pub levels: IntensityLevels,

    /// Start of the horizontal probe window (inclusive) used to qualify a
    /// row as the axis baseline.
    pub probe_start: usize,

    /// End of the probe window (exclusive).
    pub probe_end: usize,

    /// Slot-to-date calibration for this chart.
    pub calendar: CalendarSpec,
}

impl Default for RasterParams {
    fn default() -> Self {
        Self {
            levels: IntensityLevels::default(),
            probe_start: 100,
            probe_end: 200,
            calendar: CalendarSpec::default(),
        }
    }
}
