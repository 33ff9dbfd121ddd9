use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

const UNIT: usize = 11;
const MARGIN: usize = 90;
const BACKGROUND: u8 = 255;
const MARK: u8 = 103;
const AXIS: u8 = 0;

fn barscan() -> Command {
    Command::cargo_bin("barscan").unwrap()
}

/// Render a synthetic onset chart as raw grayscale pixels: one stack of
/// gray unit squares per slot on a full-width black axis. The margin keeps
/// the default axis probe window inside the axis line.
fn chart_pixels(heights: &[u32]) -> (u32, u32, Vec<u8>) {
    let width = 2 * MARGIN + heights.len() * UNIT;
    let tallest = heights.iter().copied().max().unwrap_or(0) as usize;
    let axis_row = tallest * UNIT + 5;
    let height = axis_row + 4;
    let mut data = vec![BACKGROUND; width * height];
    for x in 0..width {
        data[axis_row * width + x] = AXIS;
    }
    for (slot, &h) in heights.iter().enumerate() {
        let x0 = MARGIN + slot * UNIT;
        for y in axis_row - h as usize * UNIT..axis_row {
            for x in x0..x0 + UNIT {
                data[y * width + x] = MARK;
            }
        }
    }
    (width as u32, height as u32, data)
}

fn write_chart_png(path: &std::path::Path, heights: &[u32]) {
    let (width, height, data) = chart_pixels(heights);
    image::GrayImage::from_raw(width, height, data)
        .unwrap()
        .save(path)
        .unwrap();
}

#[test]
fn raster_prints_csv_for_synthetic_chart() {
    let dir = tempfile::tempdir().unwrap();
    let png = dir.path().join("chart.png");
    write_chart_png(&png, &[1, 0, 2]);

    barscan()
        .arg("raster")
        .arg(&png)
        .assert()
        .success()
        .stdout("date,cases\n2022-04-26,1\n2022-04-27,0\n2022-04-28,2\n");
}

#[test]
fn raster_honors_calendar_override() {
    let dir = tempfile::tempdir().unwrap();
    let png = dir.path().join("chart.png");
    let spec = dir.path().join("calendar.json");
    write_chart_png(&png, &[2, 0, 1]);
    fs::write(&spec, r#"{"start":"2023-02-27","skip_slot":null}"#).unwrap();

    barscan()
        .arg("raster")
        .arg(&png)
        .arg("--calendar")
        .arg(&spec)
        .assert()
        .success()
        .stdout("date,cases\n2023-02-27,2\n2023-02-28,0\n2023-03-01,1\n");
}

const CHART_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg">
  <g id="chart">
    <text transform="matrix(1,0,0,1,40,8)">Casos confirmados</text>
    <text transform="matrix(1,0,0,1,40,235)">(*) fecha estimada</text>
    <g id="plot">
      <path style="fill:#808080;stroke:none" d="M 10,200 h 20 v -40 h -20 z"/>
      <path style="fill:#808080;stroke:none" d="M 70,200 h 40 v -20 h -40 z"/>
      <text transform="matrix(1,0,0,1,15,215)">29</text>
      <text transform="matrix(1,0,0,1,35,215)">30</text>
      <text transform="matrix(1,0,0,1,55,215)">31</text>
      <text transform="matrix(1,0,0,1,75,215)">1</text>
      <text transform="matrix(1,0,0,1,95,215)">2</text>
      <text transform="matrix(1,0,0,1,12,230)">Abril 2022</text>
      <text transform="matrix(1,0,0,1,72,230)">Mayo 2022</text>
    </g>
  </g>
</svg>"##;

#[test]
fn vector_prints_csv_for_svg_chart() {
    let dir = tempfile::tempdir().unwrap();
    let svg = dir.path().join("chart.svg");
    fs::write(&svg, CHART_SVG).unwrap();

    barscan()
        .arg("vector")
        .arg(&svg)
        .assert()
        .success()
        .stdout("date,cases\n2022-04-29,2\n2022-04-30,0\n2022-05-01,1\n2022-05-02,1\n");
}

#[test]
fn missing_subcommand_shows_usage() {
    barscan()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn missing_input_fails_with_diagnostic() {
    let dir = tempfile::tempdir().unwrap();
    barscan()
        .arg("raster")
        .arg(dir.path().join("no-such-chart.png"))
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("barscan:"));
}

#[test]
fn malformed_svg_fails_with_diagnostic() {
    let dir = tempfile::tempdir().unwrap();
    let svg = dir.path().join("chart.svg");
    fs::write(&svg, "not xml at all").unwrap();

    barscan()
        .arg("vector")
        .arg(&svg)
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("barscan:"));
}

#[test]
fn blank_image_reports_missing_axis() {
    let dir = tempfile::tempdir().unwrap();
    let png = dir.path().join("blank.png");
    image::GrayImage::from_raw(220, 40, vec![BACKGROUND; 220 * 40])
        .unwrap()
        .save(&png)
        .unwrap();

    barscan()
        .arg("raster")
        .arg(&png)
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("axis"));
}
