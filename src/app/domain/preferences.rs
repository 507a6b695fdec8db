use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Colour rendered as lowercase `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Palette {
    pub background: Color,
    pub primary: Color,
    pub text: Color,
}

impl Palette {
    pub const LIGHT: Palette = Palette {
        background: Color::rgb(0xfa, 0xfa, 0xfa),
        primary: Color::rgb(0x7d, 0x17, 0xff),
        text: Color::rgb(0x1a, 0x20, 0x2c),
    };

    pub const DARK: Palette = Palette {
        background: Color::rgb(0x14, 0x14, 0x14),
        primary: Color::rgb(0x7d, 0x17, 0xff),
        text: Color::rgb(0xff, 0xff, 0xff),
    };

    /// The palette entry for a theme flag.
    pub const fn for_mode(dark: bool) -> Palette {
        if dark { Self::DARK } else { Self::LIGHT }
    }
}

/// Theme flag together with the colours derived from it.
///
/// Only `Theme::new` builds a value, so the palette always matches `dark`.
/// Stored colours are ignored on load and re-derived from the flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Theme {
    dark: bool,
    #[serde(flatten)]
    palette: Palette,
}

#[derive(Deserialize)]
struct ThemeRecord {
    #[serde(default)]
    dark: bool,
}

impl<'de> Deserialize<'de> for Theme {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let record = ThemeRecord::deserialize(deserializer)?;
        Ok(Theme::new(record.dark))
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::new(false)
    }
}

impl Theme {
    pub const fn new(dark: bool) -> Self {
        Self {
            dark,
            palette: Palette::for_mode(dark),
        }
    }

    pub fn dark(&self) -> bool {
        self.dark
    }

    pub fn palette(&self) -> Palette {
        self.palette
    }

    pub fn toggled(&self) -> Self {
        Theme::new(!self.dark)
    }
}

pub const DEFAULT_LANGUAGE: &str = "en";

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

/// User preferences shared by every view of the builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceState {
    #[serde(default)]
    theme: Theme,

    #[serde(default = "default_language")]
    language: String,
}

impl Default for PreferenceState {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            language: default_language(),
        }
    }
}

impl PreferenceState {
    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn dark_mode(&self) -> bool {
        self.theme.dark
    }

    pub fn palette(&self) -> Palette {
        self.theme.palette
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Next state with the theme flipped; the language is carried over.
    pub fn with_theme_toggled(&self) -> Self {
        Self {
            theme: self.theme.toggled(),
            language: self.language.clone(),
        }
    }

    pub fn with_language(&self, language: impl Into<String>) -> Self {
        Self {
            theme: self.theme,
            language: language.into(),
        }
    }
}
