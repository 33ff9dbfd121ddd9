use std::io::{self, Write};

use crate::bins::DateSeries;

/// Write the series as CSV: header `date,cases`, then one
/// `YYYY-MM-DD,<count>` line per day, newline-terminated.
pub fn write_csv<W: Write>(series: &DateSeries, mut out: W) -> io::Result<()> {
    writeln!(out, "date,cases")?;
    for point in &series.points {
        writeln!(out, "{},{}", point.date.format("%Y-%m-%d"), point.cases)?;
    }
    Ok(())
}
