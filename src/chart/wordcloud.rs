use crate::color::{generate_palette, Rgb};
use crate::data::aggregate::LabelCount;

pub const CLOUD_WIDTH: f64 = 800.0;
pub const CLOUD_HEIGHT: f64 = 400.0;

const MIN_FONT: f64 = 14.0;
const MAX_FONT: f64 = 72.0;
/// Average glyph advance as a fraction of the font size.
const GLYPH_WIDTH: f64 = 0.6;
const SPIRAL_STEP: f64 = 0.1;
const SPIRAL_GROWTH: f64 = 2.0;
const MAX_STEPS: usize = 4000;

/// A word positioned on the canvas. `x`/`y` is the centre of its box.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedWord {
    pub text: String,
    pub count: usize,
    pub font_size: f64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub color: Rgb,
}

impl PlacedWord {
    fn overlaps(&self, other: &PlacedWord) -> bool {
        (self.x - other.x).abs() * 2.0 < self.width + other.width
            && (self.y - other.y).abs() * 2.0 < self.height + other.height
    }

    fn inside(&self, width: f64, height: f64) -> bool {
        self.x - self.width / 2.0 >= 0.0
            && self.x + self.width / 2.0 <= width
            && self.y - self.height / 2.0 >= 0.0
            && self.y + self.height / 2.0 <= height
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WordCloud {
    pub width: f64,
    pub height: f64,
    pub words: Vec<PlacedWord>,
}

impl WordCloud {
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Place `words` (most frequent first) on a `width`×`height` canvas.
///
/// Font size grows linearly with the count. Each word walks an Archimedean
/// spiral out from the centre until its box fits without touching an
/// earlier word; words that never fit are left out.
pub fn layout_word_cloud(words: &[LabelCount], width: f64, height: f64) -> WordCloud {
    let min_count = words.iter().map(|w| w.count).min().unwrap_or(0);
    let max_count = words.iter().map(|w| w.count).max().unwrap_or(0);
    let colors = generate_palette(words.len());
    let aspect = width / height;

    let mut placed: Vec<PlacedWord> = Vec::with_capacity(words.len());

    for (word, color) in words.iter().zip(colors) {
        let mut font_size = font_size_for(word.count, min_count, max_count);
        let chars = word.label.chars().count().max(1) as f64;
        let usable = width * 0.95;
        if chars * font_size * GLYPH_WIDTH > usable {
            font_size = usable / (chars * GLYPH_WIDTH);
        }

        let mut candidate = PlacedWord {
            text: word.label.clone(),
            count: word.count,
            font_size,
            x: width / 2.0,
            y: height / 2.0,
            width: chars * font_size * GLYPH_WIDTH,
            height: font_size,
            color,
        };

        for step in 0..MAX_STEPS {
            let t = step as f64 * SPIRAL_STEP;
            let r = SPIRAL_GROWTH * t;
            candidate.x = width / 2.0 + r * aspect * t.cos();
            candidate.y = height / 2.0 + r * t.sin();
            if candidate.inside(width, height) && !placed.iter().any(|p| p.overlaps(&candidate)) {
                placed.push(candidate);
                break;
            }
        }
    }

    WordCloud {
        width,
        height,
        words: placed,
    }
}

fn font_size_for(count: usize, min_count: usize, max_count: usize) -> f64 {
    if max_count == min_count {
        return MAX_FONT;
    }
    let t = (count - min_count) as f64 / (max_count - min_count) as f64;
    MIN_FONT + (MAX_FONT - MIN_FONT) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(pairs: &[(&str, usize)]) -> Vec<LabelCount> {
        pairs
            .iter()
            .map(|(l, c)| LabelCount {
                label: l.to_string(),
                count: *c,
            })
            .collect()
    }

    #[test]
    fn placed_words_stay_inside_and_never_overlap() {
        let input: Vec<LabelCount> = (0..20)
            .map(|i| LabelCount {
                label: format!("word{i}"),
                count: 40 - i,
            })
            .collect();
        let cloud = layout_word_cloud(&input, CLOUD_WIDTH, CLOUD_HEIGHT);

        assert!(!cloud.is_empty());
        for (i, a) in cloud.words.iter().enumerate() {
            assert!(a.inside(CLOUD_WIDTH, CLOUD_HEIGHT), "{} escapes canvas", a.text);
            for b in &cloud.words[i + 1..] {
                assert!(!a.overlaps(b), "{} overlaps {}", a.text, b.text);
            }
        }
    }

    #[test]
    fn most_frequent_word_is_centred_and_largest() {
        let cloud = layout_word_cloud(
            &words(&[("covid", 10), ("virus", 5), ("care", 1)]),
            CLOUD_WIDTH,
            CLOUD_HEIGHT,
        );
        let first = &cloud.words[0];
        assert_eq!(first.text, "covid");
        assert_eq!((first.x, first.y), (CLOUD_WIDTH / 2.0, CLOUD_HEIGHT / 2.0));
        assert_eq!(first.font_size, MAX_FONT);
        assert!(cloud.words.windows(2).all(|w| w[0].font_size >= w[1].font_size));
        assert_eq!(cloud.words.last().map(|w| w.font_size), Some(MIN_FONT));
    }

    #[test]
    fn long_words_shrink_to_fit() {
        let long = "a".repeat(60);
        let cloud = layout_word_cloud(&words(&[(long.as_str(), 3)]), CLOUD_WIDTH, CLOUD_HEIGHT);
        assert_eq!(cloud.words.len(), 1);
        assert!(cloud.words[0].width <= CLOUD_WIDTH);
    }

    #[test]
    fn layout_is_deterministic() {
        let input = words(&[("alpha", 4), ("beta", 3), ("gamma", 3), ("delta", 1)]);
        assert_eq!(
            layout_word_cloud(&input, CLOUD_WIDTH, CLOUD_HEIGHT),
            layout_word_cloud(&input, CLOUD_WIDTH, CLOUD_HEIGHT)
        );
    }

    #[test]
    fn no_words_no_cloud() {
        assert!(layout_word_cloud(&[], CLOUD_WIDTH, CLOUD_HEIGHT).is_empty());
    }
}
