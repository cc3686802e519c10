//! Explicit theme state with load/save at the application boundary.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::session::Storage;
use crate::template::Color;

use super::{Theme, ThemeVariant, TokenMap, Typography, theme_stylesheet};

/// Storage key holding the serialised theme state.
pub const THEME_STORAGE_KEY: &str = "theme";

const DARK_COLORS: [(&str, &str); 5] = [
    ("background", "#111827"),
    ("surface", "#1F2937"),
    ("text", "#F9FAFB"),
    ("textSecondary", "#D1D5DB"),
    ("border", "#374151"),
];

const LIGHT_COLORS: [(&str, &str); 5] = [
    ("background", "#FFFFFF"),
    ("surface", "#F3F4F6"),
    ("text", "#111827"),
    ("textSecondary", "#4B5563"),
    ("border", "#E5E7EB"),
];

/// Partial theme update. Each present group replaces the whole group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ThemePatch {
    pub colors: Option<TokenMap>,
    pub typography: Option<Typography>,
    pub spacing: Option<TokenMap>,
    pub breakpoints: Option<TokenMap>,
    pub border_radius: Option<TokenMap>,
    pub shadows: Option<TokenMap>,
    pub z_index: Option<TokenMap>,
}

/// On-disk shape: the theme with its mode flags alongside.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredTheme {
    #[serde(flatten)]
    theme: Theme,
    #[serde(default)]
    is_dark: bool,
    #[serde(default)]
    variant: ThemeVariant,
}

/// Current theme, dark-mode flag and selected preset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemeContext {
    theme: Theme,
    is_dark: bool,
    variant: ThemeVariant,
}

impl ThemeContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn is_dark(&self) -> bool {
        self.is_dark
    }

    pub fn variant(&self) -> ThemeVariant {
        self.variant
    }

    /// Flip dark mode, swapping the surface colors.
    pub fn toggle_dark_mode(&mut self) {
        let colors = if self.is_dark { LIGHT_COLORS } else { DARK_COLORS };
        for (name, value) in colors {
            self.theme.colors.insert(name.to_string(), value.to_string());
        }
        self.is_dark = !self.is_dark;
        log::debug!("dark mode {}", if self.is_dark { "on" } else { "off" });
    }

    /// Merge a patch into the theme.
    ///
    /// Colors are validated first; on an invalid color nothing changes.
    pub fn update_theme(&mut self, patch: ThemePatch) -> Result<()> {
        if let Some(colors) = &patch.colors {
            for value in colors.values() {
                Color::from_hex(value)?;
            }
        }

        let ThemePatch {
            colors,
            typography,
            spacing,
            breakpoints,
            border_radius,
            shadows,
            z_index,
        } = patch;
        let theme = &mut self.theme;
        if let Some(v) = colors {
            theme.colors = v;
        }
        if let Some(v) = typography {
            theme.typography = v;
        }
        if let Some(v) = spacing {
            theme.spacing = v;
        }
        if let Some(v) = breakpoints {
            theme.breakpoints = v;
        }
        if let Some(v) = border_radius {
            theme.border_radius = v;
        }
        if let Some(v) = shadows {
            theme.shadows = v;
        }
        if let Some(v) = z_index {
            theme.z_index = v;
        }
        self.variant = ThemeVariant::Custom;
        Ok(())
    }

    /// Back to the default preset in light mode.
    pub fn reset_theme(&mut self) {
        *self = Self::default();
    }

    /// Switch to a named preset. Unknown names are ignored.
    pub fn apply_preset(&mut self, name: &str) -> bool {
        let Ok(variant) = name.parse::<ThemeVariant>() else {
            log::warn!("unknown theme preset {name:?}");
            return false;
        };
        self.theme = variant.theme();
        self.variant = variant;
        self.is_dark = variant.is_dark();
        true
    }

    /// The `:root` stylesheet for the current theme.
    pub fn stylesheet(&self) -> String {
        theme_stylesheet(&self.theme)
    }

    /// Load theme state, falling back to defaults when absent or malformed.
    pub fn load(storage: &dyn Storage) -> Self {
        let Some(raw) = storage.get(THEME_STORAGE_KEY) else {
            return Self::default();
        };
        match serde_json::from_str::<StoredTheme>(&raw) {
            Ok(stored) => Self {
                theme: stored.theme,
                is_dark: stored.is_dark,
                variant: stored.variant,
            },
            Err(e) => {
                log::warn!("ignoring stored theme: {e}");
                Self::default()
            }
        }
    }

    pub fn save(&self, storage: &mut dyn Storage) -> Result<()> {
        let stored = StoredTheme {
            theme: self.theme.clone(),
            is_dark: self.is_dark,
            variant: self.variant,
        };
        storage.set(THEME_STORAGE_KEY, serde_json::to_string(&stored)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::session::MemoryStorage;
    use crate::theme::default_theme;

    #[test]
    fn test_toggle_dark_mode_round_trip() {
        let mut ctx = ThemeContext::new();
        ctx.toggle_dark_mode();
        assert!(ctx.is_dark());
        assert_eq!(ctx.theme().colors["background"], "#111827");
        assert_eq!(ctx.theme().colors["textSecondary"], "#D1D5DB");
        // Non-surface colors are untouched.
        assert_eq!(ctx.theme().colors["primary"], "#3B82F6");

        ctx.toggle_dark_mode();
        assert!(!ctx.is_dark());
        assert_eq!(ctx.theme(), &default_theme());
    }

    #[test]
    fn test_update_theme_replaces_group() {
        let mut ctx = ThemeContext::new();
        let mut spacing = TokenMap::new();
        spacing.insert("md".to_string(), "12px".to_string());
        ctx.update_theme(ThemePatch {
            spacing: Some(spacing.clone()),
            ..ThemePatch::default()
        })
        .unwrap();
        assert_eq!(ctx.theme().spacing, spacing);
        assert_eq!(ctx.theme().colors, default_theme().colors);
        assert_eq!(ctx.variant(), ThemeVariant::Custom);
    }

    #[test]
    fn test_update_theme_rejects_bad_color() {
        let mut ctx = ThemeContext::new();
        for bad in ["blue-ish", "#+f+f+f"] {
            let mut colors = default_theme().colors;
            colors.insert("primary".to_string(), bad.to_string());
            let err = ctx
                .update_theme(ThemePatch {
                    colors: Some(colors),
                    ..ThemePatch::default()
                })
                .unwrap_err();
            assert!(matches!(err, Error::InvalidColor(_)), "{bad}");
            assert_eq!(ctx, ThemeContext::new());
        }
    }

    #[test]
    fn test_apply_preset() {
        let mut ctx = ThemeContext::new();
        assert!(ctx.apply_preset("darkHighContrast"));
        assert!(ctx.is_dark());
        assert_eq!(ctx.variant(), ThemeVariant::DarkHighContrast);

        assert!(!ctx.apply_preset("neon"));
        assert_eq!(ctx.variant(), ThemeVariant::DarkHighContrast);

        assert!(ctx.apply_preset("default"));
        assert!(!ctx.is_dark());

        ctx.apply_preset("custom");
        ctx.reset_theme();
        assert_eq!(ctx, ThemeContext::new());
    }

    #[test]
    fn test_save_and_load() {
        let mut storage = MemoryStorage::new();
        let mut ctx = ThemeContext::new();
        ctx.apply_preset("highContrast");
        ctx.toggle_dark_mode();
        ctx.save(&mut storage).unwrap();

        let raw = storage.get(THEME_STORAGE_KEY).unwrap();
        assert!(raw.contains("\"isDark\":true"));
        assert!(raw.contains("\"variant\":\"highContrast\""));
        assert!(raw.contains("\"colors\""));

        assert_eq!(ThemeContext::load(&storage), ctx);
    }

    #[test]
    fn test_load_falls_back_on_garbage() {
        let mut storage = MemoryStorage::new();
        assert_eq!(ThemeContext::load(&storage), ThemeContext::new());
        storage.set(THEME_STORAGE_KEY, "{not json".to_string());
        assert_eq!(ThemeContext::load(&storage), ThemeContext::new());
    }
}
