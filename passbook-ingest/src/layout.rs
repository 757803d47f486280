//! Turn positioned words into visual lines.
//!
//! Geometry-aware extractors hand back words with bounding boxes instead of
//! ready-made lines. Words whose bottom edges sit within a tolerance of each
//! other belong to the same printed line.

use passbook_core::{LinePosition, RawLine};
use serde::{Deserialize, Serialize};

pub const DEFAULT_Y_TOLERANCE: f32 = 3.0;

/// One extracted word. `top`/`bottom` grow downwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionedWord {
    pub x0: f32,
    pub top: f32,
    pub x1: f32,
    pub bottom: f32,
    pub text: String,
}

/// Group words into lines, top to bottom, each line left to right.
pub fn group_words(words: &[PositionedWord], page: u32, tolerance: f32) -> Vec<RawLine> {
    let tolerance = tolerance.abs();
    let mut sorted: Vec<&PositionedWord> = words
        .iter()
        .filter(|w| !w.text.trim().is_empty())
        .collect();
    sorted.sort_by(|a, b| a.bottom.total_cmp(&b.bottom).then(a.x0.total_cmp(&b.x0)));

    let mut bands: Vec<Vec<&PositionedWord>> = Vec::new();
    for word in sorted {
        match bands.last_mut() {
            // compare against the band's first word so a slow drift does not chain
            Some(band) if (word.bottom - band[0].bottom).abs() <= tolerance => band.push(word),
            _ => bands.push(vec![word]),
        }
    }

    bands
        .into_iter()
        .map(|mut band| {
            band.sort_by(|a, b| a.x0.total_cmp(&b.x0));
            let top = band.iter().map(|w| w.top).fold(f32::INFINITY, f32::min);
            let left = band[0].x0;
            let text = band
                .iter()
                .map(|w| w.text.trim())
                .collect::<Vec<_>>()
                .join(" ");
            RawLine::new(text, page).with_position(LinePosition { top, left })
        })
        .collect()
}
