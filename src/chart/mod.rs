/// Chart geometry, independent of where it is drawn.
///
/// ```text
///   Aggregates ──► BarChart / PieChart / WordCloud ──┬──► report::svg  (files)
///                                                    └──► ui::plot     (dashboard)
/// ```
pub mod wordcloud;

use std::f64::consts::TAU;

use crate::color::{bar_color, generate_palette, Rgb};
use crate::data::aggregate::{LabelCount, YearCount};

pub use wordcloud::{layout_word_cloud, PlacedWord, WordCloud};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Vertical,
    Horizontal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: usize,
}

/// A single-series bar chart.
#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    pub title: String,
    pub value_axis: String,
    pub category_axis: Option<String>,
    pub orientation: Orientation,
    pub color: Rgb,
    pub bars: Vec<Bar>,
}

impl BarChart {
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Largest bar value, at least 1 so scales never divide by zero.
    pub fn max_value(&self) -> usize {
        self.bars.iter().map(|b| b.value).max().unwrap_or(0).max(1)
    }
}

/// One wedge of a pie, angles in radians clockwise from 12 o'clock.
#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    pub label: String,
    pub value: usize,
    pub fraction: f64,
    pub start: f64,
    pub sweep: f64,
    pub color: Rgb,
}

impl Slice {
    /// `12.3%` style label.
    pub fn percent_label(&self) -> String {
        format!("{:.1}%", self.fraction * 100.0)
    }

    pub fn mid_angle(&self) -> f64 {
        self.start + self.sweep / 2.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieChart {
    pub title: String,
    pub slices: Vec<Slice>,
}

impl PieChart {
    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Builders from aggregation results
// ---------------------------------------------------------------------------

pub fn year_chart(title: &str, years: &[YearCount]) -> BarChart {
    BarChart {
        title: title.to_string(),
        value_axis: "Number of Papers".to_string(),
        category_axis: Some("Year".to_string()),
        orientation: Orientation::Vertical,
        color: bar_color(),
        bars: years
            .iter()
            .map(|y| Bar {
                label: y.year.to_string(),
                value: y.count,
            })
            .collect(),
    }
}

/// Horizontal bars, largest journal first.
pub fn journal_chart(title: &str, journals: &[LabelCount]) -> BarChart {
    BarChart {
        title: title.to_string(),
        value_axis: "Number of Papers".to_string(),
        category_axis: None,
        orientation: Orientation::Horizontal,
        color: bar_color(),
        bars: journals
            .iter()
            .map(|j| Bar {
                label: j.label.clone(),
                value: j.count,
            })
            .collect(),
    }
}

/// Proportions of each label; zero totals produce an empty pie.
pub fn pie_chart(title: &str, parts: &[LabelCount]) -> PieChart {
    let total: usize = parts.iter().map(|p| p.count).sum();
    if total == 0 {
        return PieChart {
            title: title.to_string(),
            slices: Vec::new(),
        };
    }

    let colors = generate_palette(parts.len());
    let mut start = 0.0;
    let slices = parts
        .iter()
        .zip(colors)
        .map(|(part, color)| {
            let fraction = part.count as f64 / total as f64;
            let sweep = fraction * TAU;
            let slice = Slice {
                label: part.label.clone(),
                value: part.count,
                fraction,
                start,
                sweep,
                color,
            };
            start += sweep;
            slice
        })
        .collect();

    PieChart {
        title: title.to_string(),
        slices,
    }
}

/// Point on a circle for an angle measured clockwise from 12 o'clock, in
/// screen coordinates (y grows downwards).
pub fn polar(cx: f64, cy: f64, radius: f64, angle: f64) -> (f64, f64) {
    (cx + radius * angle.sin(), cy - radius * angle.cos())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(label: &str, count: usize) -> LabelCount {
        LabelCount {
            label: label.to_string(),
            count,
        }
    }

    #[test]
    fn pie_fractions_cover_the_circle() {
        let pie = pie_chart("Sources", &[label("PMC", 3), label("WHO", 1)]);
        assert_eq!(pie.slices.len(), 2);
        assert_eq!(pie.slices[0].percent_label(), "75.0%");
        assert_eq!(pie.slices[1].percent_label(), "25.0%");
        let end = pie.slices[1].start + pie.slices[1].sweep;
        assert!((end - TAU).abs() < 1e-9);
    }

    #[test]
    fn empty_inputs_give_empty_charts() {
        assert!(pie_chart("Sources", &[]).is_empty());
        let bars = year_chart("Years", &[]);
        assert!(bars.is_empty());
        assert_eq!(bars.max_value(), 1);
    }

    #[test]
    fn year_bars_follow_histogram_order() {
        let chart = year_chart(
            "Years",
            &[
                YearCount { year: 2019, count: 2 },
                YearCount { year: 2020, count: 5 },
            ],
        );
        let labels: Vec<&str> = chart.bars.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["2019", "2020"]);
        assert_eq!(chart.max_value(), 5);
        assert_eq!(chart.orientation, Orientation::Vertical);
    }

    #[test]
    fn polar_starts_at_twelve_o_clock() {
        let (x, y) = polar(100.0, 100.0, 50.0, 0.0);
        assert!((x - 100.0).abs() < 1e-9 && (y - 50.0).abs() < 1e-9);
        let (x, y) = polar(100.0, 100.0, 50.0, TAU / 4.0);
        assert!((x - 150.0).abs() < 1e-9 && (y - 100.0).abs() < 1e-9);
    }
}
