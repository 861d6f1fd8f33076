//! Pixel measurement of the field's text
//!
//! The editing core works purely in character indices; the host supplies a
//! [`TextMeasure`] so pointer x-coordinates (relative to the text origin) can
//! be mapped to the nearest character boundary.

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use fontdue::{Font, FontSettings};

/// Width of rendered text prefixes
pub trait TextMeasure: std::fmt::Debug {
    /// Pixel width of the first `chars` characters of `text`.
    /// Must be monotonic in `chars`.
    fn prefix_width(&self, text: &str, chars: usize) -> f32;
}

/// Convert a pointer x-coordinate into the nearest character boundary.
///
/// Positions left of the text map to 0, positions right of it to `len`.
/// A boundary is chosen when `x` is closer to it than to its neighbours.
pub fn index_at_x(measure: &dyn TextMeasure, text: &str, x: f32) -> usize {
    let len = text.chars().count();
    if x <= 0.0 || len == 0 {
        return 0;
    }

    let mut previous = measure.prefix_width(text, 0);
    for index in 1..=len {
        let width = measure.prefix_width(text, index);
        let midpoint = (previous + width) / 2.0;
        if x < midpoint {
            return index - 1;
        }
        previous = width;
    }
    len
}

/// Pixel x-coordinate of the boundary before character `index`
pub fn x_for_index(measure: &dyn TextMeasure, text: &str, index: usize) -> f32 {
    let len = text.chars().count();
    measure.prefix_width(text, index.min(len))
}

/// Fixed-width cells (monospaced fonts, tests, headless replay)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMeasure {
    pub char_width: f32,
}

impl MonospaceMeasure {
    pub fn new(char_width: f32) -> Self {
        Self { char_width }
    }
}

impl Default for MonospaceMeasure {
    fn default() -> Self {
        Self::new(8.0)
    }
}

impl TextMeasure for MonospaceMeasure {
    fn prefix_width(&self, text: &str, chars: usize) -> f32 {
        text.chars().take(chars).count() as f32 * self.char_width
    }
}

/// Glyph advances from a TrueType/OpenType font at a fixed pixel size
pub struct FontMeasure {
    font: Font,
    px: f32,
}

impl std::fmt::Debug for FontMeasure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontMeasure")
            .field("name", &self.font.name())
            .field("px", &self.px)
            .finish()
    }
}

impl FontMeasure {
    /// Parse font bytes
    pub fn from_bytes(bytes: &[u8], px: f32) -> Result<Self> {
        let font = Font::from_bytes(bytes, FontSettings::default())
            .map_err(|e| anyhow!("failed to parse font: {}", e))?;
        Ok(Self { font, px })
    }

    /// Load a font file from disk
    pub fn load(path: &Path, px: f32) -> Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("failed to read font {}", path.display()))?;
        let measure = Self::from_bytes(&bytes, px)
            .with_context(|| format!("failed to load font {}", path.display()))?;
        tracing::info!("Loaded measurement font from {}", path.display());
        Ok(measure)
    }

    pub fn px(&self) -> f32 {
        self.px
    }
}

impl TextMeasure for FontMeasure {
    fn prefix_width(&self, text: &str, chars: usize) -> f32 {
        text.chars()
            .take(chars)
            .map(|ch| self.font.metrics(ch, self.px).advance_width)
            .sum()
    }
}
