use std::f32::consts::FRAC_PI_4;
use std::ops::RangeInclusive;

use eframe::egui::{self, Align2, Color32, FontId, Pos2, ScrollArea, Sense, Shape, Stroke, Ui};
use egui_extras::{Column as TableColumn, TableBuilder};
use egui_plot::{Bar, BarChart as PlotBarChart, GridMark, Plot};

use cord_explorer::chart::{polar, BarChart, Orientation, PieChart, WordCloud};
use cord_explorer::state::DashboardState;

use super::to_color32;

const CHART_HEIGHT: f32 = 280.0;
const EMPTY_TEXT: &str = "No papers in the selected range";

// ---------------------------------------------------------------------------
// Central panel
// ---------------------------------------------------------------------------

/// Render the sample table and the four charts in the central panel.
pub fn dashboard(ui: &mut Ui, state: &DashboardState) {
    if state.table.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a cleaned table to explore papers  (File → Open…)");
        });
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            if state.show_table {
                ui.heading("Sample Papers");
                sample_table(ui, state);
                ui.separator();
            }

            ui.heading("Publications by Year");
            bar_plot(ui, "year_plot", &state.view.year_chart);
            ui.separator();

            ui.heading("Top Publishing Journals");
            bar_plot(ui, "journal_plot", &state.view.journal_chart);
            ui.separator();

            ui.heading("Word Cloud of Titles");
            word_cloud(ui, &state.view.cloud);
            ui.separator();

            ui.heading("Papers by Source");
            pie(ui, &state.view.source_chart);
        });
}

// ---------------------------------------------------------------------------
// Sample table
// ---------------------------------------------------------------------------

fn sample_table(ui: &mut Ui, state: &DashboardState) {
    let rows = state.sample();
    let headers = ["title", "authors", "journal", "year", state.source_header()];

    TableBuilder::new(ui)
        .striped(true)
        .vscroll(false)
        .column(TableColumn::initial(340.0).clip(true))
        .column(TableColumn::initial(180.0).clip(true))
        .column(TableColumn::initial(160.0).clip(true))
        .column(TableColumn::auto())
        .column(TableColumn::remainder())
        .header(20.0, |mut header| {
            for name in headers {
                header.col(|ui: &mut Ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|mut body| {
            for record in rows {
                body.row(18.0, |mut row| {
                    let year = record.year.map(|y| y.to_string()).unwrap_or_default();
                    let cells = [
                        record.title.as_deref().unwrap_or(""),
                        record.authors.as_deref().unwrap_or(""),
                        record.journal.as_deref().unwrap_or(""),
                        year.as_str(),
                        record.source.as_deref().unwrap_or(""),
                    ];
                    for cell in cells {
                        row.col(|ui: &mut Ui| {
                            ui.label(cell);
                        });
                    }
                });
            }
        });
}

// ---------------------------------------------------------------------------
// Bar charts
// ---------------------------------------------------------------------------

fn bar_plot(ui: &mut Ui, id: &str, chart: &BarChart) {
    if chart.is_empty() {
        placeholder(ui, CHART_HEIGHT);
        return;
    }

    let color = to_color32(chart.color);
    let n = chart.bars.len();
    let horizontal = chart.orientation == Orientation::Horizontal;

    // Horizontal charts list the largest value at the top.
    let position = move |i: usize| if horizontal { (n - 1 - i) as f64 } else { i as f64 };
    let mut labels = vec![String::new(); n];
    let bars: Vec<Bar> = chart
        .bars
        .iter()
        .enumerate()
        .map(|(i, b)| {
            labels[position(i) as usize] = b.label.clone();
            Bar::new(position(i), b.value as f64)
                .name(&b.label)
                .width(0.7)
                .fill(color)
        })
        .collect();

    let mut series = PlotBarChart::new(bars).name(&chart.title).color(color);
    if horizontal {
        series = series.horizontal();
    }

    let category_labels = move |mark: GridMark, _range: &RangeInclusive<f64>| {
        let v = mark.value;
        if (v - v.round()).abs() > 1e-6 || v < 0.0 {
            return String::new();
        }
        labels.get(v.round() as usize).cloned().unwrap_or_default()
    };

    let mut plot = Plot::new(id)
        .height(CHART_HEIGHT)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false);
    plot = if horizontal {
        plot.x_axis_label(chart.value_axis.clone())
            .y_axis_formatter(category_labels)
            .y_axis_min_width(200.0)
            .include_x(0.0)
    } else {
        let plot = plot
            .y_axis_label(chart.value_axis.clone())
            .x_axis_formatter(category_labels)
            .include_y(0.0);
        match &chart.category_axis {
            Some(axis) => plot.x_axis_label(axis.clone()),
            None => plot,
        }
    };

    plot.show(ui, |plot_ui| {
        plot_ui.bar_chart(series);
    });
}

// ---------------------------------------------------------------------------
// Word cloud
// ---------------------------------------------------------------------------

fn word_cloud(ui: &mut Ui, cloud: &WordCloud) {
    if cloud.is_empty() {
        placeholder(ui, CHART_HEIGHT);
        return;
    }

    let width = ui.available_width().min(cloud.width as f32 * 1.5);
    let scale = width / cloud.width as f32;
    let size = egui::vec2(width, cloud.height as f32 * scale);
    let (response, painter) = ui.allocate_painter(size, Sense::hover());
    let origin = response.rect.min;

    painter.rect_filled(response.rect, 4.0, Color32::WHITE);
    for word in &cloud.words {
        let pos = origin + egui::vec2(word.x as f32 * scale, word.y as f32 * scale);
        painter.text(
            pos,
            Align2::CENTER_CENTER,
            &word.text,
            FontId::proportional(word.font_size as f32 * scale),
            to_color32(word.color),
        );
    }
}

// ---------------------------------------------------------------------------
// Pie chart
// ---------------------------------------------------------------------------

fn pie(ui: &mut Ui, chart: &PieChart) {
    if chart.is_empty() {
        placeholder(ui, CHART_HEIGHT);
        return;
    }

    let size = egui::vec2(ui.available_width(), CHART_HEIGHT + 40.0);
    let (response, painter) = ui.allocate_painter(size, Sense::hover());
    let rect = response.rect;
    let radius = (CHART_HEIGHT / 2.0 - 10.0) as f64;
    let cx = (rect.left() + rect.width() / 3.0) as f64;
    let cy = rect.center().y as f64;
    let point = |r: f64, angle: f64| {
        let (x, y) = polar(cx, cy, r, angle);
        Pos2::new(x as f32, y as f32)
    };

    for slice in &chart.slices {
        let fill = to_color32(slice.color);
        // Split into convex fans no wider than a quarter turn.
        let pieces = (slice.sweep as f32 / FRAC_PI_4).ceil().max(1.0) as usize;
        for p in 0..pieces {
            let a0 = slice.start + slice.sweep * p as f64 / pieces as f64;
            let a1 = slice.start + slice.sweep * (p + 1) as f64 / pieces as f64;
            let mut points = vec![point(0.0, a0)];
            points.extend((0..=8).map(|k| point(radius, a0 + (a1 - a0) * k as f64 / 8.0)));
            painter.add(Shape::convex_polygon(points, fill, Stroke::NONE));
        }

        painter.text(
            point(radius * 0.6, slice.mid_angle()),
            Align2::CENTER_CENTER,
            slice.percent_label(),
            FontId::proportional(13.0),
            Color32::BLACK,
        );
        let label_pos = point(radius * 1.12, slice.mid_angle());
        let align = if (label_pos.x as f64) < cx {
            Align2::RIGHT_CENTER
        } else {
            Align2::LEFT_CENTER
        };
        painter.text(
            label_pos,
            align,
            &slice.label,
            FontId::proportional(13.0),
            ui.visuals().text_color(),
        );
    }
}

// ---------------------------------------------------------------------------
// Placeholder
// ---------------------------------------------------------------------------

fn placeholder(ui: &mut Ui, height: f32) {
    let (rect, _) = ui.allocate_exact_size(egui::vec2(ui.available_width(), height), Sense::hover());
    ui.painter().text(
        rect.center(),
        Align2::CENTER_CENTER,
        EMPTY_TEXT,
        FontId::proportional(16.0),
        ui.visuals().weak_text_color(),
    );
}
