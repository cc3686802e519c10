//! Application theme: design tokens, presets and CSS variable generation.
//!
//! The theme styles the editor shell, not exported documents. Token groups
//! are ordered string maps so that variable output is stable and a stored
//! theme round-trips through JSON unchanged.

mod context;

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub use context::{THEME_STORAGE_KEY, ThemeContext, ThemePatch};

pub type TokenMap = BTreeMap<String, String>;

/// Font tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Typography {
    pub font_family: TokenMap,
    pub font_size: TokenMap,
    pub font_weight: TokenMap,
    pub line_height: TokenMap,
}

/// A complete set of design tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub colors: TokenMap,
    pub typography: Typography,
    pub spacing: TokenMap,
    pub breakpoints: TokenMap,
    pub border_radius: TokenMap,
    pub shadows: TokenMap,
    pub z_index: TokenMap,
}

impl Default for Theme {
    fn default() -> Self {
        default_theme()
    }
}

/// Named theme presets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ThemeVariant {
    #[default]
    Default,
    HighContrast,
    DarkHighContrast,
    Custom,
}

impl ThemeVariant {
    pub const ALL: [ThemeVariant; 4] = [
        ThemeVariant::Default,
        ThemeVariant::HighContrast,
        ThemeVariant::DarkHighContrast,
        ThemeVariant::Custom,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::HighContrast => "highContrast",
            Self::DarkHighContrast => "darkHighContrast",
            Self::Custom => "custom",
        }
    }

    /// The preset's tokens.
    pub fn theme(self) -> Theme {
        match self {
            Self::Default => default_theme(),
            Self::HighContrast => high_contrast_theme(),
            Self::DarkHighContrast => dark_high_contrast_theme(),
            Self::Custom => custom_theme(),
        }
    }

    /// Whether the preset is meant for a dark background.
    pub fn is_dark(self) -> bool {
        self == Self::DarkHighContrast
    }
}

impl fmt::Display for ThemeVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeVariant {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| Error::ThemeValueNotFound(format!("preset {s}")))
    }
}

/// Look up a preset theme by name.
pub fn preset(name: &str) -> Option<Theme> {
    name.parse::<ThemeVariant>().ok().map(ThemeVariant::theme)
}

fn tokens(pairs: &[(&str, &str)]) -> TokenMap {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn with_colors(mut theme: Theme, colors: &[(&str, &str)]) -> Theme {
    theme.colors.extend(tokens(colors));
    theme
}

pub fn default_theme() -> Theme {
    Theme {
        colors: tokens(&[
            ("primary", "#3B82F6"),
            ("secondary", "#6B7280"),
            ("accent", "#8B5CF6"),
            ("background", "#FFFFFF"),
            ("surface", "#F3F4F6"),
            ("text", "#111827"),
            ("textSecondary", "#4B5563"),
            ("border", "#E5E7EB"),
            ("error", "#EF4444"),
            ("success", "#10B981"),
            ("warning", "#F59E0B"),
        ]),
        typography: Typography {
            font_family: tokens(&[
                ("sans", "Inter, system-ui, sans-serif"),
                ("serif", "Merriweather, Georgia, serif"),
                ("mono", "'Fira Code', monospace"),
            ]),
            font_size: tokens(&[
                ("xs", "0.75rem"),
                ("sm", "0.875rem"),
                ("base", "1rem"),
                ("lg", "1.125rem"),
                ("xl", "1.25rem"),
                ("2xl", "1.5rem"),
                ("3xl", "1.875rem"),
            ]),
            font_weight: tokens(&[
                ("light", "300"),
                ("normal", "400"),
                ("medium", "500"),
                ("semibold", "600"),
                ("bold", "700"),
            ]),
            line_height: tokens(&[("tight", "1.25"), ("normal", "1.5"), ("relaxed", "1.75")]),
        },
        spacing: tokens(&[
            ("xs", "0.25rem"),
            ("sm", "0.5rem"),
            ("md", "1rem"),
            ("lg", "1.5rem"),
            ("xl", "2rem"),
            ("2xl", "3rem"),
        ]),
        breakpoints: tokens(&[
            ("sm", "640px"),
            ("md", "768px"),
            ("lg", "1024px"),
            ("xl", "1280px"),
        ]),
        border_radius: tokens(&[
            ("none", "0"),
            ("sm", "0.125rem"),
            ("md", "0.375rem"),
            ("lg", "0.5rem"),
            ("full", "9999px"),
        ]),
        shadows: tokens(&[
            ("sm", "0 1px 2px 0 rgba(0, 0, 0, 0.05)"),
            ("md", "0 4px 6px -1px rgba(0, 0, 0, 0.1)"),
            ("lg", "0 10px 15px -3px rgba(0, 0, 0, 0.1)"),
        ]),
        z_index: tokens(&[
            ("dropdown", "1000"),
            ("sticky", "1020"),
            ("modal", "1050"),
            ("tooltip", "1070"),
        ]),
    }
}

pub fn high_contrast_theme() -> Theme {
    with_colors(
        default_theme(),
        &[
            ("primary", "#0000EE"),
            ("secondary", "#000000"),
            ("accent", "#6B00B3"),
            ("background", "#FFFFFF"),
            ("surface", "#FFFFFF"),
            ("text", "#000000"),
            ("textSecondary", "#1A1A1A"),
            ("border", "#000000"),
            ("error", "#B00020"),
            ("success", "#006400"),
            ("warning", "#8A4B00"),
        ],
    )
}

pub fn dark_high_contrast_theme() -> Theme {
    with_colors(
        default_theme(),
        &[
            ("primary", "#FFD700"),
            ("secondary", "#FFFFFF"),
            ("accent", "#00FFFF"),
            ("background", "#000000"),
            ("surface", "#0A0A0A"),
            ("text", "#FFFFFF"),
            ("textSecondary", "#E5E5E5"),
            ("border", "#FFFFFF"),
            ("error", "#FF6B6B"),
            ("success", "#00FF7F"),
            ("warning", "#FFB000"),
        ],
    )
}

pub fn custom_theme() -> Theme {
    with_colors(
        default_theme(),
        &[
            ("primary", "#0D9488"),
            ("secondary", "#64748B"),
            ("accent", "#F43F5E"),
        ],
    )
}

/// CSS custom property declarations for every token, one per line.
pub fn generate_theme_variables(theme: &Theme) -> String {
    let groups: [(&str, &TokenMap); 10] = [
        ("color", &theme.colors),
        ("font", &theme.typography.font_family),
        ("font-size", &theme.typography.font_size),
        ("font-weight", &theme.typography.font_weight),
        ("line-height", &theme.typography.line_height),
        ("spacing", &theme.spacing),
        ("breakpoint", &theme.breakpoints),
        ("radius", &theme.border_radius),
        ("shadow", &theme.shadows),
        ("z", &theme.z_index),
    ];

    groups
        .iter()
        .flat_map(|(prefix, map)| {
            map.iter()
                .map(move |(key, value)| format!("--{prefix}-{key}: {value};"))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// A `:root` rule declaring all theme variables.
pub fn theme_stylesheet(theme: &Theme) -> String {
    format!(":root {{\n{}\n}}", generate_theme_variables(theme))
}

/// Look up a token by dotted path, e.g. `"typography.fontSize.base"`.
pub fn get_theme_value(path: &str, theme: &Theme) -> Result<String> {
    let not_found = || Error::ThemeValueNotFound(path.to_string());
    let mut value = serde_json::to_value(theme)?;

    for part in path.split('.') {
        value = match value {
            serde_json::Value::Object(mut map) => map.remove(part).ok_or_else(not_found)?,
            _ => return Err(not_found()),
        };
    }

    match value {
        serde_json::Value::String(s) => Ok(s),
        _ => Err(not_found()),
    }
}
