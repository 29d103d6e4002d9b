//! Color-name vocabulary and contrast computation.
//!
//! Every background color the engine works with resolves through this module.
//! Lookup is total: a label outside the vocabulary maps to [`NEUTRAL_GRAY`]
//! instead of failing, so callers never have to handle a missing color.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::textutil::normalize_label;

/// An sRGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` or `RRGGBB` (case-insensitive).
    pub fn parse_hex(input: &str) -> Result<Self, String> {
        let trimmed = input.trim();
        let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(format!("invalid hex color `{input}` (expected #RRGGBB)"));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| format!("invalid hex color `{input}`"))
        };
        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    /// Uppercase `RRGGBB` without a leading `#`.
    pub fn hex(self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Perceived luminance in `[0, 1]` (ITU-R BT.601 weights).
    pub fn luminance(self) -> f64 {
        let norm = |c: u8| f64::from(c) / 255.0;
        0.299 * norm(self.r) + 0.587 * norm(self.g) + 0.114 * norm(self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.hex())
    }
}

/// Foreground choice that stays readable over a given background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Foreground {
    Light,
    Dark,
}

impl Foreground {
    pub fn rgb(self) -> Rgb {
        match self {
            Self::Light => Rgb::new(0xFF, 0xFF, 0xFF),
            Self::Dark => Rgb::new(0x00, 0x00, 0x00),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

/// One vocabulary entry: every accepted label plus its canonical value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamedColor {
    /// Canonical (first) label, used for display.
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub rgb: Rgb,
}

/// Value used for any label outside the vocabulary.
pub const NEUTRAL_GRAY: Rgb = Rgb::new(0x80, 0x80, 0x80);

const VOCABULARY: &[NamedColor] = &[
    NamedColor {
        name: "розовый",
        aliases: &["pink"],
        rgb: Rgb::new(0xFF, 0xC0, 0xCB),
    },
    NamedColor {
        name: "чёрный",
        aliases: &["черный", "black"],
        rgb: Rgb::new(0x00, 0x00, 0x00),
    },
    NamedColor {
        name: "синий",
        aliases: &["blue"],
        rgb: Rgb::new(0x00, 0x00, 0xFF),
    },
    NamedColor {
        name: "зелёный",
        aliases: &["зеленый", "green"],
        rgb: Rgb::new(0x00, 0xFF, 0x00),
    },
    NamedColor {
        name: "красный",
        aliases: &["red"],
        rgb: Rgb::new(0xFF, 0x00, 0x00),
    },
    NamedColor {
        name: "белый",
        aliases: &["white"],
        rgb: Rgb::new(0xFF, 0xFF, 0xFF),
    },
    NamedColor {
        name: "жёлтый",
        aliases: &["желтый", "yellow"],
        rgb: Rgb::new(0xFF, 0xFF, 0x00),
    },
    NamedColor {
        name: "оранжевый",
        aliases: &["orange"],
        rgb: Rgb::new(0xFF, 0xA5, 0x00),
    },
    NamedColor {
        name: "фиолетовый",
        aliases: &["purple", "violet"],
        rgb: Rgb::new(0x93, 0x70, 0xDB),
    },
    NamedColor {
        name: "серый",
        aliases: &["gray", "grey"],
        rgb: NEUTRAL_GRAY,
    },
    NamedColor {
        name: "коричневый",
        aliases: &["brown"],
        rgb: Rgb::new(0x8B, 0x45, 0x13),
    },
];

/// Every vocabulary entry, in display order.
pub fn vocabulary() -> &'static [NamedColor] {
    VOCABULARY
}

/// Look up a label without falling back to the neutral default.
pub fn lookup(name: &str) -> Option<&'static NamedColor> {
    let key = normalize_label(name);
    VOCABULARY
        .iter()
        .find(|entry| entry.name == key || entry.aliases.contains(&key.as_str()))
}

/// Resolve a label to its canonical value. Unknown labels yield [`NEUTRAL_GRAY`].
pub fn resolve(name: &str) -> Rgb {
    lookup(name).map(|entry| entry.rgb).unwrap_or(NEUTRAL_GRAY)
}

/// True when `hex` (with or without `#`) is the value of some vocabulary entry.
pub fn is_vocabulary_hex(hex: &str) -> bool {
    Rgb::parse_hex(hex).is_ok_and(|rgb| VOCABULARY.iter().any(|entry| entry.rgb == rgb))
}

/// Pick a readable foreground for `background`.
pub fn contrast(background: Rgb) -> Foreground {
    if background.luminance() < 0.5 {
        Foreground::Light
    } else {
        Foreground::Dark
    }
}
