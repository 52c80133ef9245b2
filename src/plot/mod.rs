//! Preview plot of loudness, mask and selected intervals.
//!
//! Rendered to SVG in memory with plotters, then written next to where the
//! trimmed video would go.

use crate::constants::plot::{HEIGHT, LABEL_OFFSET, WIDTH};
use crate::error::{Error, Result};
use crate::selector::{ClipInterval, Parameters, Selection};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::fs;
use std::path::Path;
use tracing::info;

const MASK_COLOR: RGBColor = RGBColor(255, 140, 0);
const CLIP_COLOR: RGBColor = RGBColor(0, 150, 0);

/// Number of dashes drawn for the threshold line.
const THRESHOLD_DASHES: usize = 120;

/// Everything the preview draws.
#[derive(Debug, Clone, Copy)]
pub struct PlotData<'a> {
    /// RMS loudness per chunk.
    pub loudness: &'a [f32],
    /// Windowed maximum of the loudness.
    pub mask: &'a [f32],
    /// Loudness threshold, drawn as a dotted line.
    pub threshold: f32,
    /// Selected intervals, drawn as labelled markers.
    pub intervals: &'a [ClipInterval],
    /// Seconds per chunk, for the time axis.
    pub chunk_length: f64,
}

impl<'a> PlotData<'a> {
    /// Collect plot data from a selection and the parameters that produced it.
    #[must_use]
    pub fn new(selection: &'a Selection, params: &Parameters) -> Self {
        Self {
            loudness: &selection.loudness,
            mask: &selection.mask,
            threshold: params.threshold(),
            intervals: &selection.intervals,
            chunk_length: params.chunk_length(),
        }
    }

    fn max_loudness(&self) -> f64 {
        f64::from(self.loudness.iter().copied().fold(0.0, f32::max))
    }

    #[allow(clippy::cast_precision_loss)]
    fn time_span(&self) -> f64 {
        let last = self.loudness.len().saturating_sub(1) as f64 * self.chunk_length;
        last.max(self.chunk_length)
    }

    #[allow(clippy::cast_precision_loss)]
    fn series<'s>(&self, values: &'s [f32]) -> impl Iterator<Item = (f64, f64)> + 's {
        let chunk_length = self.chunk_length;
        values
            .iter()
            .enumerate()
            .map(move |(i, &v)| (i as f64 * chunk_length, f64::from(v)))
    }
}

fn plot_err<E: std::fmt::Display>(e: E) -> Error {
    Error::Plot {
        reason: e.to_string(),
    }
}

/// Render the preview as an SVG document.
///
/// # Errors
///
/// Returns [`Error::Plot`] if drawing fails.
#[allow(clippy::cast_precision_loss)]
pub fn render_svg(data: &PlotData<'_>) -> Result<String> {
    let max_loudness = data.max_loudness();
    let label_y = max_loudness * f64::from(LABEL_OFFSET);
    let y_top = [label_y, f64::from(data.threshold)]
        .into_iter()
        .fold(0.0, f64::max)
        * 1.08;
    let y_top = if y_top > 0.0 { y_top } else { 1.0 };
    let x_end = data.time_span();

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (WIDTH, HEIGHT)).into_drawing_area();
        root.fill(&WHITE).map_err(plot_err)?;

        let mut chart = ChartBuilder::on(&root)
            .margin(20)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(0.0..x_end, 0.0..y_top)
            .map_err(plot_err)?;

        chart
            .configure_mesh()
            .x_desc("Time")
            .y_desc("Loudness")
            .draw()
            .map_err(plot_err)?;

        chart
            .draw_series(LineSeries::new(data.series(data.loudness), &BLUE))
            .map_err(plot_err)?
            .label("actual sound")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &BLUE));

        chart
            .draw_series(LineSeries::new(data.series(data.mask), &MASK_COLOR))
            .map_err(plot_err)?
            .label("mask")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &MASK_COLOR));

        let threshold = f64::from(data.threshold);
        let dash = x_end / THRESHOLD_DASHES as f64;
        chart
            .draw_series((0..THRESHOLD_DASHES).map(|k| {
                let x0 = k as f64 * dash;
                PathElement::new(
                    vec![(x0, threshold), (x0 + dash * 0.5, threshold)],
                    CLIP_COLOR.stroke_width(1),
                )
            }))
            .map_err(plot_err)?;

        if !data.intervals.is_empty() {
            chart
                .draw_series(data.intervals.iter().map(|clip| {
                    PathElement::new(
                        vec![(clip.start, max_loudness), (clip.end, max_loudness)],
                        CLIP_COLOR.stroke_width(2),
                    )
                }))
                .map_err(plot_err)?
                .label("clips")
                .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &CLIP_COLOR));

            let label_style = TextStyle::from(("sans-serif", 12).into_font())
                .color(&CLIP_COLOR)
                .pos(Pos::new(HPos::Center, VPos::Bottom));
            chart
                .draw_series(data.intervals.iter().map(|clip| {
                    Text::new(
                        format!("{:.1}", clip.duration()),
                        (clip.midpoint(), label_y),
                        label_style.clone(),
                    )
                }))
                .map_err(plot_err)?;
        }

        chart
            .configure_series_labels()
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()
            .map_err(plot_err)?;

        root.present().map_err(plot_err)?;
    }

    Ok(svg)
}

/// Render the preview and write it to `path`.
///
/// # Errors
///
/// Returns [`Error::Plot`] if drawing fails or an I/O error if the file
/// cannot be written.
pub fn write_preview(path: &Path, data: &PlotData<'_>) -> Result<()> {
    let svg = render_svg(data)?;
    fs::write(path, svg)?;
    info!("Preview written to {}", path.display());
    Ok(())
}
