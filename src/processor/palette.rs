//! Categorical palette and per-label color assignment.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::processor::error::ProcessInferenceResultError;

/// Color format used when none is requested.
pub const DEFAULT_COLOR_FORMAT: &str = "hex";

/// RGB color with channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Channels scaled to 0-255 and rounded.
    pub fn to_rgb8(&self) -> [u8; 3] {
        [self.r, self.g, self.b].map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
    }
}

/// The qualitative "Set1" colormap, in order.
pub const SET1: [Color; 9] = [
    Color::from_rgb8(228, 26, 28),
    Color::from_rgb8(55, 126, 184),
    Color::from_rgb8(77, 175, 74),
    Color::from_rgb8(152, 78, 163),
    Color::from_rgb8(255, 127, 0),
    Color::from_rgb8(255, 255, 51),
    Color::from_rgb8(166, 86, 40),
    Color::from_rgb8(247, 129, 191),
    Color::from_rgb8(153, 153, 153),
];

/// `#rrggbb`, lower-case.
pub fn hex_format(color: &Color) -> String {
    let [r, g, b] = color.to_rgb8();
    format!("#{r:02x}{g:02x}{b:02x}")
}

/// `rgb(r,g,b)` with 0-255 integer channels.
pub fn rgb_format(color: &Color) -> String {
    let [r, g, b] = color.to_rgb8();
    format!("rgb({r},{g},{b})")
}

/// Textual encoding of assigned colors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorFormat {
    #[default]
    Hex,
    Rgb,
}

impl ColorFormat {
    pub fn format(&self, color: &Color) -> String {
        match self {
            ColorFormat::Hex => hex_format(color),
            ColorFormat::Rgb => rgb_format(color),
        }
    }
}

impl FromStr for ColorFormat {
    type Err = ProcessInferenceResultError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hex" => Ok(ColorFormat::Hex),
            "rgb" => Ok(ColorFormat::Rgb),
            other => Err(ProcessInferenceResultError::UnknownColorFormat(other.to_string())),
        }
    }
}

impl fmt::Display for ColorFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorFormat::Hex => write!(f, "hex"),
            ColorFormat::Rgb => write!(f, "rgb"),
        }
    }
}

/// Ordered label -> palette slot mapping, filled on first sight.
///
/// The k-th distinct label gets `SET1[k % 9]`.
#[derive(Debug, Clone, Default)]
pub struct LabelColors {
    labels: Vec<String>,
    slots: HashMap<String, usize>,
}

impl LabelColors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Color for `label`, registering it if unseen.
    pub fn color_for(&mut self, label: &str) -> Color {
        let slot = match self.slots.get(label) {
            Some(&slot) => slot,
            None => {
                let slot = self.labels.len();
                if slot == SET1.len() {
                    log::warn!(
                        "more than {} distinct labels, palette colors will repeat",
                        SET1.len()
                    );
                }
                self.labels.push(label.to_string());
                self.slots.insert(label.to_string(), slot);
                slot
            }
        };
        SET1[slot % SET1.len()]
    }

    /// Distinct labels in first-seen order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, "#e41a1c", "rgb(228,26,28)")]
    #[case(1, "#377eb8", "rgb(55,126,184)")]
    #[case(4, "#ff7f00", "rgb(255,127,0)")]
    #[case(8, "#999999", "rgb(153,153,153)")]
    fn test_palette_formats(#[case] idx: usize, #[case] hex: &str, #[case] rgb: &str) {
        assert_eq!(hex_format(&SET1[idx]), hex);
        assert_eq!(rgb_format(&SET1[idx]), rgb);
    }

    #[test]
    fn test_hex_and_rgb_agree_for_every_entry() {
        for color in &SET1 {
            let hex = hex_format(color);
            let rgb = rgb_format(color);
            let from_hex: Vec<u8> = (0..3)
                .map(|i| u8::from_str_radix(&hex[1 + 2 * i..3 + 2 * i], 16).unwrap())
                .collect();
            let from_rgb: Vec<u8> = rgb
                .trim_start_matches("rgb(")
                .trim_end_matches(')')
                .split(',')
                .map(|c| c.parse().unwrap())
                .collect();
            assert_eq!(from_hex, from_rgb);
        }
    }

    #[test]
    fn test_color_format_parse() {
        assert_eq!("hex".parse::<ColorFormat>(), Ok(ColorFormat::Hex));
        assert_eq!("rgb".parse::<ColorFormat>(), Ok(ColorFormat::Rgb));
        assert_eq!(
            "hsv".parse::<ColorFormat>(),
            Err(ProcessInferenceResultError::UnknownColorFormat("hsv".into()))
        );
        assert_eq!(DEFAULT_COLOR_FORMAT.parse::<ColorFormat>(), Ok(ColorFormat::default()));
        assert_eq!(ColorFormat::Rgb.to_string(), "rgb");
    }

    #[test]
    fn test_first_seen_order() {
        let mut colors = LabelColors::new();
        assert_eq!(colors.color_for("dog"), SET1[0]);
        assert_eq!(colors.color_for("cat"), SET1[1]);
        assert_eq!(colors.color_for("dog"), SET1[0]);
        assert_eq!(colors.color_for("bird"), SET1[2]);
        assert_eq!(colors.labels(), ["dog", "cat", "bird"]);
    }

    #[test]
    fn test_palette_wraps() {
        let mut colors = LabelColors::new();
        for i in 0..SET1.len() {
            colors.color_for(&format!("label{i}"));
        }
        assert_eq!(colors.color_for("overflow"), SET1[0]);
        assert_eq!(colors.color_for("overflow2"), SET1[1]);
        assert_eq!(colors.len(), SET1.len() + 2);
    }
}
