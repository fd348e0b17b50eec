//! Normalizer: turns sampler cell text into plain numbers.
//!
//! Two normalizers share the [`Normalizer`] contract: they never fail, and
//! anything they cannot read becomes `0.0`. A single bad cell must not cost
//! the whole chart.
//!
//! - [`SizeNormalizer`] reads memory sizes (`512MiB`, `1.2 GB`, `300kB`) and
//!   returns megabytes.
//! - [`PercentNormalizer`] reads percentages (`45.2%`) and returns the bare
//!   number, still on the 0–100 scale.

use std::collections::HashMap;

use phf::phf_map;

use crate::error::ConfigError;

/// Multipliers relative to one megabyte. Keys are lowercase; lookups are
/// case-insensitive.
static DEFAULT_UNITS: phf::Map<&'static str, f64> = phf_map! {
    "b" => 1.0 / 1_048_576.0,
    "kb" => 1.0 / 1024.0,
    "mb" => 1.0,
    "gb" => 1024.0,
    "tb" => 1_048_576.0,
    "kib" => 1.0 / 1024.0,
    "mib" => 1.0,
    "gib" => 1024.0,
};

/// Contract shared by every cell normalizer.
pub trait Normalizer {
    /// Parse `raw` into a number. Unreadable input yields `0.0`.
    fn normalize(&self, raw: &str) -> f64;
}

// ---------------------------------------------------------------------------
// Size lexing
// ---------------------------------------------------------------------------

/// A size string split into its numeric literal and unit token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeToken<'a> {
    pub literal: &'a str,
    pub unit: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Integer,
    Fraction,
    /// A second decimal point was seen. The scanner keeps consuming the
    /// literal so the parse step rejects it as a whole.
    Malformed,
}

impl<'a> SizeToken<'a> {
    /// Split `raw` into a leading literal of ASCII digits and decimal points
    /// and a trimmed unit remainder.
    pub fn scan(raw: &'a str) -> Self {
        let raw = raw.trim();
        let mut state = ScanState::Integer;
        let mut end = raw.len();

        for (i, c) in raw.char_indices() {
            state = match (state, c) {
                (_, '0'..='9') => state,
                (ScanState::Integer, '.') => ScanState::Fraction,
                (ScanState::Fraction | ScanState::Malformed, '.') => ScanState::Malformed,
                _ => {
                    end = i;
                    break;
                }
            };
        }

        let (literal, unit) = raw.split_at(end);
        Self {
            literal,
            unit: unit.trim(),
        }
    }
}

// ---------------------------------------------------------------------------
// Unit table
// ---------------------------------------------------------------------------

/// Unit → megabyte multiplier lookup.
///
/// The built-in table covers decimal (`KB`, `MB`, ...) and binary (`KiB`,
/// `MiB`, `GiB`) suffixes; overrides from configuration are consulted first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnitTable {
    overrides: HashMap<String, f64>,
}

impl UnitTable {
    /// Built-in units only.
    pub fn builtin() -> Self {
        Self::default()
    }

    /// Built-in units plus `overrides`. Every multiplier must be finite and
    /// strictly positive.
    pub fn with_overrides<I, K>(overrides: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: AsRef<str>,
    {
        let mut table = HashMap::new();
        for (unit, multiplier) in overrides {
            let unit = unit.as_ref().trim();
            if unit.is_empty() || !multiplier.is_finite() || multiplier <= 0.0 {
                return Err(ConfigError::InvalidUnit {
                    unit: unit.to_string(),
                    multiplier,
                });
            }
            table.insert(unit.to_ascii_lowercase(), multiplier);
        }
        Ok(Self { overrides: table })
    }

    /// Multiplier for `unit`, matched case-insensitively.
    pub fn multiplier(&self, unit: &str) -> Option<f64> {
        let key = unit.to_ascii_lowercase();
        self.overrides
            .get(&key)
            .copied()
            .or_else(|| DEFAULT_UNITS.get(key.as_str()).copied())
    }
}

// ---------------------------------------------------------------------------
// Normalizers
// ---------------------------------------------------------------------------

/// Memory-size normalizer. Output is always megabytes.
#[derive(Debug, Clone, Default)]
pub struct SizeNormalizer {
    units: UnitTable,
}

impl SizeNormalizer {
    pub fn new(units: UnitTable) -> Self {
        Self { units }
    }
}

impl Normalizer for SizeNormalizer {
    fn normalize(&self, raw: &str) -> f64 {
        let token = SizeToken::scan(raw);
        let Ok(value) = token.literal.parse::<f64>() else {
            return 0.0;
        };

        // A bare number is taken to be megabytes already.
        if token.unit.is_empty() {
            return finite_or_zero(value);
        }

        let multiplier = match self.units.multiplier(token.unit) {
            Some(m) => m,
            None => {
                tracing::trace!(unit = token.unit, raw, "unknown size unit, assuming MB");
                1.0
            }
        };
        finite_or_zero(value * multiplier)
    }
}

/// Percentage normalizer. `"45.2%"` becomes `45.2`, not `0.452`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PercentNormalizer;

impl Normalizer for PercentNormalizer {
    fn normalize(&self, raw: &str) -> f64 {
        let raw = raw.trim();
        let number = raw.strip_suffix('%').unwrap_or(raw).trim();
        number.parse::<f64>().map(finite_or_zero).unwrap_or(0.0)
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
