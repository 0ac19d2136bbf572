use std::f32::consts::TAU;

use super::WordCloudOptions;

/// distance between two turns of the spiral
const SPIRAL_STEP: f32 = 16.0;
/// distance between two probes along the spiral
const ARC_STEP: f32 = 8.0;
/// minimum gap between two words
const PADDING: i32 = 4;
/// shrink factor when a word does not fit anywhere
const SHRINK: f32 = 0.9;

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedWord {
    pub word: String,
    pub font_size: f32,
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl PlacedWord {
    fn collides(&self, x: i32, y: i32, width: u32, height: u32) -> bool {
        x < self.x + self.width as i32 + PADDING
            && self.x < x + width as i32 + PADDING
            && y < self.y + self.height as i32 + PADDING
            && self.y < y + height as i32 + PADDING
    }
}

/// Place the most frequent words on the canvas, largest first.
///
/// `frequencies` must be sorted by count, descending. `measure` returns the
/// pixel size of a word at a font size. A word that fits nowhere is shrunk
/// until it does; once a word does not fit even at the minimum font size the
/// canvas is considered full.
pub fn layout<M>(
    frequencies: &[(String, usize)],
    options: &WordCloudOptions,
    measure: M,
) -> Vec<PlacedWord>
where
    M: Fn(&str, f32) -> (u32, u32),
{
    let max_count = match frequencies.first() {
        Some((_, count)) if *count > 0 => *count as f32,
        _ => return Vec::new(),
    };
    let min_size = options.min_font_size as f32;
    let max_size = options.max_font_size as f32;

    let mut placed: Vec<PlacedWord> = Vec::new();
    for (word, count) in frequencies.iter().take(options.max_words) {
        let mut size = min_size + (max_size - min_size) * (*count as f32 / max_count);
        loop {
            let (width, height) = measure(word, size);
            if let Some((x, y)) = find_spot(width, height, &placed, options) {
                placed.push(PlacedWord {
                    word: word.clone(),
                    font_size: size,
                    x,
                    y,
                    width,
                    height,
                });
                break;
            }
            if size <= min_size {
                log::debug!("canvas full after {} words", placed.len());
                return placed;
            }
            size = (size * SHRINK).max(min_size);
        }
    }
    placed
}

/// Walk an elliptic spiral out of the canvas centre until the box fits
fn find_spot(
    width: u32,
    height: u32,
    placed: &[PlacedWord],
    options: &WordCloudOptions,
) -> Option<(i32, i32)> {
    if width > options.width || height > options.height {
        return None;
    }
    let cx = options.width as f32 / 2.0;
    let cy = options.height as f32 / 2.0;
    let aspect = options.height as f32 / options.width as f32;
    let max_radius = cx.hypot(cy / aspect);
    let (w, h) = (width as i32, height as i32);

    let mut theta: f32 = 0.0;
    loop {
        let r = SPIRAL_STEP * theta / TAU;
        if r > max_radius {
            return None;
        }
        let x = (cx + r * theta.cos() - width as f32 / 2.0).round() as i32;
        let y = (cy + r * aspect * theta.sin() - height as f32 / 2.0).round() as i32;
        let inside = x >= 0
            && y >= 0
            && x + w <= options.width as i32
            && y + h <= options.height as i32;
        if inside && !placed.iter().any(|p| p.collides(x, y, width, height)) {
            return Some((x, y));
        }
        theta += (ARC_STEP / r.max(ARC_STEP)).min(0.5);
    }
}
