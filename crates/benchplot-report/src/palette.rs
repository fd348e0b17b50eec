//! Colour palette for benchplot reports.
//!
//! Palettes are defined as TOML. The default palette is embedded in the
//! binary via [`include_str!`] so reports render without any files on disk.
//!
//! # Colour assignment for entities
//!
//! Entities take palette colours by their first-seen index, cycling when
//! there are more entities than colours. Legends are drawn in the same order,
//! so the first container always gets the first colour.

use config::{Config, File, FileFormat};
use serde::Deserialize;

const DEFAULT_PALETTE_SRC: &str = include_str!("palettes/default.toml");

// ---------------------------------------------------------------------------
// Raw (serde) types: mirror the TOML structure
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawRuns {
    baseline: String,
    candidate: String,
}

#[derive(Debug, Deserialize)]
struct RawPalette {
    series: Vec<String>,
    runs: RawRuns,
}

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// An sRGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// `#rrggbb`
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }

    /// CSS `rgba(r, g, b, a)`.
    pub fn rgba(&self, alpha: f32) -> String {
        format!("rgba({}, {}, {}, {})", self.0, self.1, self.2, alpha)
    }
}

/// Report colour palette.
#[derive(Debug, Clone)]
pub struct Palette {
    series: Vec<Rgb>,
    baseline: Rgb,
    candidate: Rgb,
}

impl Palette {
    /// Load and parse the embedded default palette.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed.
    pub fn load_default() -> Self {
        Self::from_toml_str(DEFAULT_PALETTE_SRC).expect("embedded default palette must be valid")
    }

    /// Parse a palette from a TOML string.
    ///
    /// Unparseable series colours are dropped; at least one must remain. Run
    /// colours must parse.
    pub fn from_toml_str(src: &str) -> anyhow::Result<Self> {
        let raw: RawPalette = Config::builder()
            .add_source(File::from_str(src, FileFormat::Toml))
            .build()?
            .try_deserialize()?;

        let series: Vec<Rgb> = raw.series.iter().filter_map(|s| parse_color(s)).collect();
        anyhow::ensure!(!series.is_empty(), "palette has no usable series colours");

        let run = |s: &str| {
            parse_color(s).ok_or_else(|| anyhow::anyhow!("invalid run colour {s:?}"))
        };

        Ok(Self {
            series,
            baseline: run(&raw.runs.baseline)?,
            candidate: run(&raw.runs.candidate)?,
        })
    }

    /// Colour for the entity at first-seen position `index`.
    pub fn series_color(&self, index: usize) -> Rgb {
        self.series[index % self.series.len()]
    }

    pub fn baseline(&self) -> Rgb {
        self.baseline
    }

    pub fn candidate(&self) -> Rgb {
        self.candidate
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::load_default()
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse `#rrggbb` (case-insensitive) into an [`Rgb`].
fn parse_color(s: &str) -> Option<Rgb> {
    let hex = s.trim().strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Rgb(r, g, b))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
