//! Utility functions for visualization: colors, locale mapping, tick label formatting.

use crate::error::DashboardError;
use num_format::{Locale, ToFormattedString};
use plotters::prelude::*;
use serde::{Deserialize, Serialize};

use super::scale::precision_for_step;

/// Plain 8-bit RGB triple; serializable so scenes can be dumped as JSON.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    /// Parse `#rrggbb` (leading `#` optional).
    pub fn from_hex(s: &str) -> Result<Self, DashboardError> {
        let bad = || DashboardError::InvalidColor(s.to_string());
        let h = s.trim().trim_start_matches('#');
        if h.len() != 6 || !h.is_ascii() {
            return Err(bad());
        }
        let channel = |i: usize| u8::from_str_radix(&h[i..i + 2], 16).map_err(|_| bad());
        Ok(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }

    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn to_plotters(self) -> RGBColor {
        RGBColor(self.r, self.g, self.b)
    }
}

/// Map a user-provided locale tag to a `num_format::Locale` and its decimal separator char.
///
/// Supported tags (case-insensitive): `en`, `us`, `en_US`, `de`, `de_DE`, `german`,
/// `fr`, `es`, `it`, `pt`, `nl`. Defaults to English.
pub fn map_locale(tag: &str) -> (&'static Locale, char) {
    match tag.to_lowercase().as_str() {
        "de" | "de_de" | "german" => (&Locale::de, ','),
        "fr" | "fr_fr" => (&Locale::fr, ','),
        "es" | "es_es" => (&Locale::es, ','),
        "it" | "it_it" => (&Locale::it, ','),
        "pt" | "pt_pt" | "pt_br" => (&Locale::pt, ','),
        "nl" | "nl_nl" => (&Locale::nl, ','),
        _ => (&Locale::en, '.'), // default
    }
}

/// Format a tick value with as many decimals as the tick `step` needs,
/// using the locale's grouping and decimal separator.
pub fn format_tick(v: f64, step: f64, locale_tag: &str) -> String {
    if !v.is_finite() {
        return String::new();
    }
    let (locale, dec_sep) = map_locale(locale_tag);
    let prec = precision_for_step(step);
    let plain = format!("{:.*}", prec, v.abs());
    let (int_part, frac_part) = match plain.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (plain.as_str(), None),
    };
    let grouped = int_part
        .parse::<u64>()
        .map(|n| n.to_formatted_string(locale))
        .unwrap_or_else(|_| int_part.to_string());

    let is_zero = plain.chars().all(|c| c == '0' || c == '.');
    let mut out = String::new();
    if v < 0.0 && !is_zero {
        out.push('-');
    }
    out.push_str(&grouped);
    if let Some(f) = frac_part {
        out.push(dec_sep);
        out.push_str(f);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trip_and_errors() {
        let c = Rgb8::from_hex("#1f77b4").unwrap();
        assert_eq!(c, Rgb8 { r: 0x1f, g: 0x77, b: 0xb4 });
        assert_eq!(c.hex(), "#1f77b4");
        assert!(Rgb8::from_hex("#12345").is_err());
        assert!(Rgb8::from_hex("#gg0000").is_err());
    }

    #[test]
    fn tick_labels_follow_step_and_locale() {
        assert_eq!(format_tick(40.0, 20.0, "en"), "40");
        assert_eq!(format_tick(0.5, 0.5, "en"), "0.5");
        assert_eq!(format_tick(1.0, 0.5, "de"), "1,0");
        assert_eq!(format_tick(1200.0, 200.0, "en"), "1,200");
        assert_eq!(format_tick(-0.0, 1.0, "en"), "0");
        assert_eq!(format_tick(-10.0, 5.0, "en"), "-10");
    }
}
