//! Core types and scan primitives for bar-chart series reconstruction.
//!
//! This crate is intentionally small and purely geometric. It does *not*
//! depend on any concrete image decoder or document parser. Both extraction
//! pipelines (raster and vector) share:
//!
//! - a lightweight row-major grayscale view with a region-crop operation,
//! - intensity classification against explicit reference levels,
//! - a generic 1-D run scanner (the outside/inside-mark state machine),
//! - median-based unit-size discovery and gap filling,
//! - the `Bin` / `DateSeries` data model with the index merge,
//! - calendar-slot mapping and the month-name table,
//! - the CSV emitter.

mod bins;
mod calendar;
mod csv;
mod image;
mod intensity;
mod scan;

pub use bins::{fill_gaps, merge_bins, Bin, DatePoint, DateSeries, MergeError};
pub use calendar::{month_number_es, CalendarSpec};
pub use csv::write_csv;
pub use image::{GrayImage, GrayImageView};
pub use intensity::IntensityLevels;
pub use scan::{count_units, median, normalize_runs, scan_runs, unit_size, Span};
