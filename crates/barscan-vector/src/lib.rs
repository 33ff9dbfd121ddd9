//! Vector pipeline: reconstruct a daily case-count series from an SVG bar
//! chart.
//!
//! Unlike the raster pipeline, the vector chart carries its date axis as
//! positioned text, so dates are read rather than assumed:
//!
//! 1. select bar rectangles by their fill-style token,
//! 2. convert each rectangle into (bin index, count) pairs using a bin size
//!    discovered from the day-label spacing (median of consecutive deltas),
//! 3. extract day/month axis labels from their transform anchors,
//! 4. group day labels into per-month runs delimited by "1" markers,
//! 5. combine month labels (via the locale table) with day labels into
//!    dated zero-count bins,
//! 6. merge date bins with geometry bins by shared index.
//!
//! A bin that ends up with a count but no date aborts the extraction: the
//! source format's silent null rows are treated as a data-integrity error.

mod error;
mod extract;
mod labels;
mod params;
mod svgdoc;

pub use error::VectorError;
pub use extract::extract_series;
pub use labels::{bin_size, group_days, partition_labels, DayLabel};
pub use params::VectorParams;
pub use svgdoc::{parse_segments, Segment, TextLabel};
