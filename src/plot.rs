//! Diagnostic rendering of an IPGP detection
//!
//! Kept behind the `plot` feature so the numeric core carries no rendering
//! dependency.

use crate::{DailySeries, Error, IpgpDetection, IPGP_SCAN_DAYS};
use plotters::prelude::*;

fn render_err<E: std::error::Error>(error: E) -> Error {
    Error::Render(error.to_string())
}

fn padded_range(values: &[f32]) -> (f32, f32) {
    let mut min = f32::INFINITY;
    let mut max = f32::NEG_INFINITY;
    for value in values {
        min = min.min(*value);
        max = max.max(*value);
    }
    let span = max - min;
    let pad = if span > 0. { span * 0.05 } else { 1. };
    (min - pad, max + pad)
}

/// Render the two-panel figure illustrating an IPGP detection to a PNG file.
///
/// The upper panel shows the fluorescence timeseries with a vertical marker
/// at the detected day; the lower panel shows the slope curve with the same
/// marker and a horizontal line at the median slope.
///
/// ## Errors
///
/// - the figure could not be drawn or written to `fig_name`
pub fn plot_detection(
    series: &DailySeries,
    detection: &IpgpDetection,
    fig_name: &str,
) -> Result<(), Error> {
    let shown = &series.values[..series.values.len().min(IPGP_SCAN_DAYS)];
    let detected = detection.day_index as f32;

    let root = BitMapBackend::new(fig_name, (1200, 600)).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;
    let (upper, lower) = root.split_vertically(300);

    let (fluoro_min, fluoro_max) = padded_range(shown);
    let mut fluoro_chart = ChartBuilder::on(&upper)
        .caption("IPGP detection", ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(60)
        .build_cartesian_2d(0f32..IPGP_SCAN_DAYS as f32, fluoro_min..fluoro_max)
        .map_err(render_err)?;
    fluoro_chart
        .configure_mesh()
        .y_desc("Chl-a fluorescence (FFU)")
        .draw()
        .map_err(render_err)?;
    fluoro_chart
        .draw_series(
            shown
                .iter()
                .enumerate()
                .map(|(i, value)| Circle::new((i as f32, *value), 2, GREEN.filled())),
        )
        .map_err(render_err)?;
    fluoro_chart
        .draw_series(LineSeries::new(
            vec![(detected, fluoro_min), (detected, fluoro_max)],
            &RED,
        ))
        .map_err(render_err)?;

    let (slope_min, slope_max) = padded_range(&detection.slopes);
    let mut slope_chart = ChartBuilder::on(&lower)
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(60)
        .build_cartesian_2d(0f32..IPGP_SCAN_DAYS as f32, slope_min..slope_max)
        .map_err(render_err)?;
    slope_chart
        .configure_mesh()
        .x_desc("Day of year")
        .y_desc("Slope values")
        .draw()
        .map_err(render_err)?;
    slope_chart
        .draw_series(
            detection
                .slopes
                .iter()
                .enumerate()
                .map(|(i, slope)| Circle::new((i as f32, *slope), 2, BLACK.filled())),
        )
        .map_err(render_err)?;
    slope_chart
        .draw_series(LineSeries::new(
            vec![(detected, slope_min), (detected, slope_max)],
            &RED,
        ))
        .map_err(render_err)?;
    slope_chart
        .draw_series(LineSeries::new(
            vec![
                (0f32, detection.median_slope),
                (IPGP_SCAN_DAYS as f32, detection.median_slope),
            ],
            &full_palette::GREY,
        ))
        .map_err(render_err)?;

    root.present().map_err(render_err)
}
