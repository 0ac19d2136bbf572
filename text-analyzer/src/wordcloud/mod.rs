mod colormap;
pub mod layout;

use std::path::{Path, PathBuf};

use ab_glyph::{FontVec, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_text_mut, text_size};
use serde::{Deserialize, Serialize};

use crate::api::CloudRenderer;
use crate::keywords::word_frequencies;
use crate::types::{Error, Result};
use colormap::viridis;
use layout::layout;

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct WordCloudOptions {
    /// TrueType/OpenType font or collection, must cover CJK glyphs
    pub font_path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub max_words: usize,
    pub min_font_size: u32,
    pub max_font_size: u32,
}

impl Default for WordCloudOptions {
    fn default() -> Self {
        Self {
            font_path: PathBuf::from("msyh.ttc"),
            width: 4096,
            height: 2160,
            max_words: 150,
            min_font_size: 30,
            max_font_size: 250,
        }
    }
}

/// Word cloud renderer writing `{title}_词云图.png` files
pub struct WordCloud {
    font: FontVec,
    options: WordCloudOptions,
    output_dir: PathBuf,
}

impl WordCloud {
    pub fn new(options: WordCloudOptions, output_dir: impl Into<PathBuf>) -> Result<Self> {
        let data = std::fs::read(&options.font_path)?;
        let font = FontVec::try_from_vec_and_index(data, 0)
            .map_err(|_| Error::Font(options.font_path.clone()))?;
        Ok(Self {
            font,
            options,
            output_dir: output_dir.into(),
        })
    }

    pub fn output_path(&self, title: &str) -> PathBuf {
        output_path(&self.output_dir, title)
    }

    pub fn draw(&self, text: &str) -> Result<RgbImage> {
        let frequencies = cloud_words(text)?;

        let placed = layout(&frequencies, &self.options, |word, size| {
            text_size(PxScale::from(size), &self.font, word)
        });
        log::debug!(
            "placed {} of {} distinct words",
            placed.len(),
            frequencies.len()
        );

        let mut image = blank_canvas(&self.options);
        let last = placed.len().saturating_sub(1).max(1) as f32;
        for (i, word) in placed.iter().enumerate() {
            draw_text_mut(
                &mut image,
                viridis(i as f32 / last),
                word.x,
                word.y,
                PxScale::from(word.font_size),
                &self.font,
                &word.word,
            );
        }
        Ok(image)
    }
}

/// Word counts of `text` with whitespace collapsed, `EmptyText` if none are left
fn cloud_words(text: &str) -> Result<Vec<(String, usize)>> {
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let frequencies = word_frequencies(&text);
    if frequencies.is_empty() {
        return Err(Error::EmptyText);
    }
    Ok(frequencies)
}

fn blank_canvas(options: &WordCloudOptions) -> RgbImage {
    RgbImage::from_pixel(options.width, options.height, Rgb([255, 255, 255]))
}

fn save(image: &RgbImage, path: &Path) -> Result<()> {
    image.save(path)?;
    Ok(())
}

pub fn output_path(dir: &Path, title: &str) -> PathBuf {
    dir.join(format!("{}_词云图.png", title))
}

impl CloudRenderer for WordCloud {
    fn render(&self, title: &str, text: &str) -> Result<PathBuf> {
        let image = self.draw(text)?;
        let path = self.output_path(title);
        save(&image, &path)?;
        log::info!("{} word cloud saved to {}", title, path.display());
        Ok(path)
    }
}
