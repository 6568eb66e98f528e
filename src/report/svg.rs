use std::error::Error;

use plotters::coord::ranged1d::SegmentValue;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use thiserror::Error;

use crate::chart::{polar, BarChart, Orientation, PieChart, WordCloud};
use crate::color::Rgb;

const WIDTH: u32 = 800;
const HEIGHT: u32 = 450;
const TITLE_HEIGHT: u32 = 45;
const MAX_LABEL_CHARS: usize = 40;
/// Largest angle between two polygon points on a pie arc.
const ARC_STEP: f64 = std::f64::consts::PI / 90.0;

type Area<'a> = DrawingArea<SVGBackend<'a>, Shift>;
type DrawResult = Result<(), Box<dyn Error>>;

/// A chart could not be drawn.
#[derive(Debug, Error)]
#[error("drawing chart {chart:?}: {message}")]
pub struct RenderError {
    pub chart: String,
    pub message: String,
}

// ---------------------------------------------------------------------------
// Drawing helpers
// ---------------------------------------------------------------------------

/// Draw onto an in-memory SVG document of the given size.
fn render(
    name: &str,
    size: (u32, u32),
    draw: impl FnOnce(&Area<'_>) -> DrawResult,
) -> Result<String, RenderError> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, size).into_drawing_area();
        paint(&root, draw).map_err(|e| RenderError {
            chart: name.to_string(),
            message: e.to_string(),
        })?;
    }
    Ok(svg)
}

fn paint(root: &Area<'_>, draw: impl FnOnce(&Area<'_>) -> DrawResult) -> DrawResult {
    root.fill(&WHITE)?;
    draw(root)?;
    root.present()?;
    Ok(())
}

fn font(size: f64) -> FontDesc<'static> {
    FontDesc::new(FontFamily::SansSerif, size, FontStyle::Normal)
}

fn title_font() -> FontDesc<'static> {
    FontDesc::new(FontFamily::SansSerif, 20.0, FontStyle::Bold)
}

fn label(size: f64, pos: Pos) -> TextStyle<'static> {
    font(size).color(&BLACK).pos(pos)
}

fn centered() -> Pos {
    Pos::new(HPos::Center, VPos::Center)
}

fn rgb(color: Rgb) -> RGBColor {
    RGBColor(color.red, color.green, color.blue)
}

fn pixel(x: f64, y: f64) -> (i32, i32) {
    (x.round() as i32, y.round() as i32)
}

fn count(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

/// Value axis end with a little headroom above the tallest bar.
fn axis_end(max: usize) -> u32 {
    let max = count(max);
    max.saturating_add((max / 10).max(1))
}

fn truncate(label: &str) -> String {
    if label.chars().count() <= MAX_LABEL_CHARS {
        label.to_string()
    } else {
        let head: String = label.chars().take(MAX_LABEL_CHARS - 1).collect();
        format!("{head}…")
    }
}

fn segment_label(labels: &[String], value: &SegmentValue<u32>) -> String {
    match value {
        SegmentValue::CenterOf(i) | SegmentValue::Exact(i) => {
            labels.get(*i as usize).cloned().unwrap_or_default()
        }
        SegmentValue::Last => String::new(),
    }
}

fn no_data(root: &Area<'_>, title: &str) -> DrawResult {
    let area = root.titled(title, title_font())?;
    let (w, h) = area.dim_in_pixel();
    area.draw(&Text::new(
        "No data",
        pixel(f64::from(w) / 2.0, f64::from(h) / 2.0),
        label(16.0, centered()),
    ))?;
    Ok(())
}

/// Chart with nothing to show.
pub fn placeholder(title: &str) -> Result<String, RenderError> {
    render(title, (WIDTH, HEIGHT), |root| no_data(root, title))
}

// ---------------------------------------------------------------------------
// Bar charts
// ---------------------------------------------------------------------------

pub fn render_bar_chart(chart: &BarChart) -> Result<String, RenderError> {
    if chart.is_empty() {
        return placeholder(&chart.title);
    }
    match chart.orientation {
        Orientation::Vertical => {
            render(&chart.title, (WIDTH, HEIGHT), |root| vertical_bars(root, chart))
        }
        Orientation::Horizontal => {
            let height = (90 + 30 * count(chart.bars.len())).max(200);
            render(&chart.title, (WIDTH, height), |root| horizontal_bars(root, chart))
        }
    }
}

fn vertical_bars(root: &Area<'_>, chart: &BarChart) -> DrawResult {
    let labels: Vec<String> = chart.bars.iter().map(|b| b.label.clone()).collect();
    let n = count(labels.len());

    let mut ctx = ChartBuilder::on(root)
        .caption(&chart.title, title_font())
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d((0u32..n).into_segmented(), 0u32..axis_end(chart.max_value()))?;

    let format_year = |v: &SegmentValue<u32>| segment_label(&labels, v);
    {
        let mut mesh = ctx.configure_mesh();
        mesh.disable_x_mesh()
            .x_labels(labels.len())
            .x_label_formatter(&format_year)
            .y_desc(chart.value_axis.as_str())
            .axis_desc_style(font(14.0));
        if let Some(axis) = &chart.category_axis {
            mesh.x_desc(axis.as_str());
        }
        mesh.draw()?;
    }

    ctx.draw_series(
        Histogram::vertical(&ctx)
            .style(rgb(chart.color).filled())
            .margin(6)
            .data(
                chart
                    .bars
                    .iter()
                    .enumerate()
                    .map(|(i, bar)| (count(i), count(bar.value))),
            ),
    )?;
    Ok(())
}

/// Largest bar on top.
fn horizontal_bars(root: &Area<'_>, chart: &BarChart) -> DrawResult {
    let labels: Vec<String> = chart.bars.iter().rev().map(|b| truncate(&b.label)).collect();
    let n = count(labels.len());

    let mut ctx = ChartBuilder::on(root)
        .caption(&chart.title, title_font())
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(260)
        .build_cartesian_2d(0u32..axis_end(chart.max_value()), (0u32..n).into_segmented())?;

    let format_journal = |v: &SegmentValue<u32>| segment_label(&labels, v);
    ctx.configure_mesh()
        .disable_y_mesh()
        .y_labels(labels.len())
        .y_label_formatter(&format_journal)
        .x_desc(chart.value_axis.as_str())
        .axis_desc_style(font(14.0))
        .draw()?;

    ctx.draw_series(
        Histogram::horizontal(&ctx)
            .style(rgb(chart.color).filled())
            .margin(4)
            .data(
                chart
                    .bars
                    .iter()
                    .rev()
                    .enumerate()
                    .map(|(i, bar)| (count(i), count(bar.value))),
            ),
    )?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Pie chart
// ---------------------------------------------------------------------------

pub fn render_pie_chart(chart: &PieChart) -> Result<String, RenderError> {
    if chart.is_empty() {
        return placeholder(&chart.title);
    }
    render(&chart.title, (WIDTH, HEIGHT), |root| pie(root, chart))
}

/// Closed polygon from the centre along the arc.
fn wedge(cx: f64, cy: f64, r: f64, start: f64, sweep: f64) -> Vec<(i32, i32)> {
    let steps = ((sweep / ARC_STEP).ceil() as usize).max(2);
    let mut points = Vec::with_capacity(steps + 2);
    points.push(pixel(cx, cy));
    points.extend((0..=steps).map(|i| {
        let (x, y) = polar(cx, cy, r, start + sweep * i as f64 / steps as f64);
        pixel(x, y)
    }));
    points
}

fn pie(root: &Area<'_>, chart: &PieChart) -> DrawResult {
    let area = root.titled(&chart.title, title_font())?;
    let (w, h) = area.dim_in_pixel();
    let (cx, cy) = (f64::from(w) * 0.4, f64::from(h) / 2.0);
    let r = f64::from(h) * 0.4;

    for slice in &chart.slices {
        let fill = rgb(slice.color).filled();
        if chart.slices.len() == 1 {
            area.draw(&Circle::new(pixel(cx, cy), r.round() as i32, fill))?;
        } else {
            area.draw(&Polygon::new(
                wedge(cx, cy, r, slice.start, slice.sweep),
                fill,
            ))?;
            let (ex, ey) = polar(cx, cy, r, slice.start);
            area.draw(&PathElement::new(
                vec![pixel(cx, cy), pixel(ex, ey)],
                WHITE.stroke_width(2),
            ))?;
        }
    }

    for slice in &chart.slices {
        let mid = slice.mid_angle();
        let (px, py) = polar(cx, cy, r * 0.6, mid);
        area.draw(&Text::new(
            slice.percent_label(),
            pixel(px, py),
            label(12.0, centered()),
        ))?;

        let (lx, ly) = polar(cx, cy, r * 1.12, mid);
        let side = if lx < cx { HPos::Right } else { HPos::Left };
        area.draw(&Text::new(
            truncate(&slice.label),
            pixel(lx, ly),
            label(12.0, Pos::new(side, VPos::Center)),
        ))?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Word cloud
// ---------------------------------------------------------------------------

pub fn render_word_cloud(title: &str, cloud: &WordCloud) -> Result<String, RenderError> {
    if cloud.is_empty() {
        return placeholder(title);
    }
    let size = (
        cloud.width.round() as u32,
        cloud.height.round() as u32 + TITLE_HEIGHT,
    );
    render(title, size, |root| words(root, title, cloud))
}

fn words(root: &Area<'_>, title: &str, cloud: &WordCloud) -> DrawResult {
    let (head, body) = root.split_vertically(TITLE_HEIGHT);
    let (w, h) = head.dim_in_pixel();
    head.draw(&Text::new(
        title,
        pixel(f64::from(w) / 2.0, f64::from(h) / 2.0),
        title_font().color(&BLACK).pos(centered()),
    ))?;

    for word in &cloud.words {
        body.draw(&Text::new(
            word.text.as_str(),
            pixel(word.x, word.y),
            font(word.font_size).color(&rgb(word.color)).pos(centered()),
        ))?;
    }
    Ok(())
}
