use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::Utc;
use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::debug;

use crate::models::ChartConfig;
use crate::page::{Frame, RenderingContext2d};
use crate::services::chart_library::ChartLibrary;
use crate::utils::errors::draw_error;
use crate::utils::{parse_css_color, spline_path, usd, ChartError};

/// Bézier samples per segment when the dataset has tension
const CURVE_SAMPLES: usize = 12;
const POINT_RADIUS: i32 = 3;
const MAX_X_LABELS: usize = 10;

static PNG_COUNTER: AtomicUsize = AtomicUsize::new(0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Svg,
    Png,
}

/// Native charting backend drawing line charts with plotters
#[derive(Debug, Clone)]
pub struct PlottersChart {
    format: ImageFormat,
}

impl PlottersChart {
    pub fn new(format: ImageFormat) -> Self {
        PlottersChart { format }
    }

    fn render_svg(&self, config: &ChartConfig, size: (u32, u32)) -> Result<Frame, ChartError> {
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, size).into_drawing_area();
            draw_chart(&root, config)?;
        }
        Ok(Frame::Svg(svg))
    }

    fn render_png(&self, config: &ChartConfig, size: (u32, u32)) -> Result<Frame, ChartError> {
        // BitMapBackend encodes PNG on present, so go through a temporary file
        let temp_file: PathBuf = std::env::temp_dir().join(format!(
            "stocktrak_chart_{}_{}_{}.png",
            std::process::id(),
            Utc::now().timestamp_millis(),
            PNG_COUNTER.fetch_add(1, Ordering::Relaxed)
        ));
        render_png_at(config, size, &temp_file)
    }
}

impl ChartLibrary for PlottersChart {
    fn name(&self) -> &str {
        match self.format {
            ImageFormat::Svg => "plotters-svg",
            ImageFormat::Png => "plotters-png",
        }
    }

    fn construct(&self, ctx: &mut RenderingContext2d, config: &ChartConfig) -> Result<(), ChartError> {
        let size = ctx.size();
        let frame = match self.format {
            ImageFormat::Svg => self.render_svg(config, size)?,
            ImageFormat::Png => self.render_png(config, size)?,
        };
        debug!("{} drew {} bytes into #{}", self.name(), frame.as_bytes().len(), ctx.element_id());
        ctx.present(frame);
        Ok(())
    }
}

/// Draw into `temp_file` and read it back; the file is removed either way
fn render_png_at(config: &ChartConfig, size: (u32, u32), temp_file: &Path) -> Result<Frame, ChartError> {
    let drawn = {
        let root = BitMapBackend::new(temp_file, size).into_drawing_area();
        draw_chart(&root, config)
    };
    let image_data = drawn.and_then(|_| fs::read(temp_file).map_err(ChartError::from));
    let _ = fs::remove_file(temp_file);

    Ok(Frame::Png(image_data?))
}

fn draw_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    config: &ChartConfig,
) -> Result<(), ChartError> {
    let labels = &config.data.labels;
    let dataset = config.primary_dataset();
    let data: &[f64] = dataset.map(|d| d.data.as_slice()).unwrap_or(&[]);

    let extent = x_extent(labels.len(), data.len());
    let visible = &data[..data.len().min(extent)];
    let x_max = extent.saturating_sub(1).max(1) as f64;
    let (y_min, y_max) = y_range(visible)?;

    root.fill(&WHITE).map_err(draw_error("Failed to fill canvas"))?;

    let mut chart = ChartBuilder::on(root)
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(80)
        .build_cartesian_2d(0f64..x_max, y_min..y_max)
        .map_err(draw_error("Failed to build chart"))?;

    let x_fmt = |x: &f64| label_at(labels, *x);
    let y_fmt = |y: &f64| usd(*y);
    let scales = &config.options.scales;
    {
        let mut mesh = chart.configure_mesh();
        mesh.x_labels(extent.clamp(1, MAX_X_LABELS))
            .x_label_formatter(&x_fmt)
            .y_label_formatter(&y_fmt);
        if scales.x.title.display {
            mesh.x_desc(scales.x.title.text.as_str());
        }
        if scales.y.title.display {
            mesh.y_desc(scales.y.title.text.as_str());
        }
        mesh.draw().map_err(draw_error("Failed to draw mesh"))?;
    }

    let Some(dataset) = dataset else {
        return root.present().map_err(draw_error("Failed to render chart"));
    };

    let line_color = parse_css_color(&dataset.border_color)?;
    let fill_color = parse_css_color(&dataset.background_color)?;
    let line_style = line_color.stroke_width(2);

    // The library fills to the zero line, or to the nearest edge when zero is off-scale
    let baseline = 0f64.clamp(y_min, y_max);
    let (width, height) = root.dim_in_pixel();
    let scale = (width as f64 / x_max, height as f64 / (y_max - y_min));

    let mut labelled = false;
    for segment in segments(visible) {
        let path = smooth(&segment, dataset.tension, scale, (y_min, y_max));

        if dataset.fill && path.len() > 1 {
            let mut area = path.clone();
            area.push((path[path.len() - 1].0, baseline));
            area.push((path[0].0, baseline));
            chart
                .draw_series(std::iter::once(Polygon::new(area, fill_color.filled())))
                .map_err(draw_error("Failed to draw fill"))?;
        }

        let series = chart
            .draw_series(LineSeries::new(path, line_style))
            .map_err(draw_error("Failed to draw line"))?;
        if !labelled {
            series
                .label(dataset.label.as_str())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_style));
            labelled = true;
        }

        chart
            .draw_series(
                segment
                    .iter()
                    .map(|&point| Circle::new(point, POINT_RADIUS, line_color.filled())),
            )
            .map_err(draw_error("Failed to draw points"))?;
    }

    if labelled {
        chart
            .configure_series_labels()
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()
            .map_err(draw_error("Failed to draw legend"))?;
    }

    root.present().map_err(draw_error("Failed to render chart"))
}

/// Number of category slots on the x axis.
/// Labels define the axis; without labels the data does.
fn x_extent(label_count: usize, data_count: usize) -> usize {
    if label_count > 0 {
        label_count
    } else {
        data_count
    }
}

/// Y axis bounds with 10% padding, kept at or above zero for non-negative data.
/// Fails when the bounds or their span overflow `f64`.
fn y_range(values: &[f64]) -> Result<(f64, f64), ChartError> {
    let finite = values.iter().copied().filter(|v| v.is_finite());
    let (min, max) = finite.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });

    if min > max {
        return Ok((0.0, 1.0));
    }

    let range = max - min;
    if !range.is_finite() {
        return Err(ChartError::Draw(format!(
            "price range {}..{} is too wide to plot",
            min, max
        )));
    }
    let padding = if range > f64::EPSILON {
        range * 0.1
    } else {
        (max.abs() * 0.1).max(1.0)
    };

    let mut y_min = min - padding;
    if min >= 0.0 {
        y_min = y_min.max(0.0);
    }
    let y_max = max + padding;

    if y_min.is_finite() && y_max.is_finite() && (y_max - y_min).is_finite() {
        Ok((y_min, y_max))
    } else if range > 0.0 {
        // No room left for padding
        Ok((min, max))
    } else {
        Err(ChartError::Draw(format!("price {} is too large to plot", max)))
    }
}

/// Runs of consecutive finite points; non-finite values leave a gap
fn segments(values: &[f64]) -> Vec<Vec<(f64, f64)>> {
    let mut out = Vec::new();
    let mut current = Vec::new();

    for (i, &v) in values.iter().enumerate() {
        if v.is_finite() {
            current.push((i as f64, v));
        } else if !current.is_empty() {
            out.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}

/// Spline in pixel space so tension behaves the same at any data scale
fn smooth(
    points: &[(f64, f64)],
    tension: f64,
    scale: (f64, f64),
    y_bounds: (f64, f64),
) -> Vec<(f64, f64)> {
    if !(scale.0.is_finite() && scale.1.is_finite()) || scale.0 <= 0.0 || scale.1 <= 0.0 {
        return points.to_vec();
    }

    let scaled: Vec<(f64, f64)> = points
        .iter()
        .map(|&(x, y)| (x * scale.0, y * scale.1))
        .collect();

    spline_path(&scaled, tension, CURVE_SAMPLES)
        .into_iter()
        .map(|(x, y)| (x / scale.0, (y / scale.1).clamp(y_bounds.0, y_bounds.1)))
        .collect()
}

fn label_at(labels: &[String], x: f64) -> String {
    let idx = x.round();
    if (x - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    labels.get(idx as usize).cloned().unwrap_or_default()
}
