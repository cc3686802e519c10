//! Template registry and Style Resolver.
//!
//! Templates are a fixed set of visual presets. [`resolve`] maps a template
//! identifier to the [`StyleTokens`] both renderers consume; unknown
//! identifiers resolve to the first (default) template so a stale or
//! externally supplied id never fails an export.

mod color;

use std::collections::BTreeMap;

use crate::model::FontTier;

pub use color::Color;

/// Color set of a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub primary: Color,
    pub secondary: Color,
    pub heading: Color,
    pub text: Color,
}

/// A named visual preset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub id: &'static str,
    pub name: &'static str,
    /// CSS class applied to the preview container.
    pub class: &'static str,
    pub description: &'static str,
    pub features: &'static [&'static str],
    /// CSS font stack, e.g. `"Inter, sans-serif"`.
    pub font_family: &'static str,
    pub colors: Palette,
    /// Draw a rule under level-2 headings.
    pub underline_section_headers: bool,
}

/// The template registry. The first entry is the default.
pub static TEMPLATES: [Template; 3] = [
    Template {
        id: "modern",
        name: "Modern",
        class: "template-modern",
        description: "Clean and minimal design with a focus on readability.",
        features: &[
            "Clean, minimal design",
            "Optimized whitespace",
            "Modern typography",
            "Section separators",
        ],
        font_family: "Inter, sans-serif",
        colors: Palette {
            primary: Color::rgb(0x3b, 0x82, 0xf6),
            secondary: Color::rgb(0xf3, 0xf4, 0xf6),
            heading: Color::rgb(0x1f, 0x29, 0x37),
            text: Color::rgb(0x4b, 0x55, 0x63),
        },
        underline_section_headers: true,
    },
    Template {
        id: "classic",
        name: "Classic",
        class: "template-classic",
        description: "A traditional resume format that works well for established professionals.",
        features: &[
            "Traditional format",
            "Formal structure",
            "Serif typography",
            "Conservative spacing",
        ],
        font_family: "Georgia, serif",
        colors: Palette {
            primary: Color::rgb(0x7f, 0x1d, 0x1d),
            secondary: Color::rgb(0xfe, 0xf3, 0xc7),
            heading: Color::rgb(0x1e, 0x29, 0x3b),
            text: Color::rgb(0x33, 0x41, 0x55),
        },
        underline_section_headers: false,
    },
    Template {
        id: "professional",
        name: "Professional",
        class: "template-professional",
        description: "Elegant and structured layout for a professional appearance.",
        features: &[
            "Professional layout",
            "Balanced visual hierarchy",
            "Clear section division",
            "Prominent contact details",
        ],
        font_family: "Arial, sans-serif",
        colors: Palette {
            primary: Color::rgb(0x04, 0x78, 0x57),
            secondary: Color::rgb(0xec, 0xfd, 0xf5),
            heading: Color::rgb(0x06, 0x4e, 0x3b),
            text: Color::rgb(0x1f, 0x29, 0x37),
        },
        underline_section_headers: false,
    },
];

/// The default template (first registry entry).
pub fn default_template() -> &'static Template {
    &TEMPLATES[0]
}

/// Look up a template by id, falling back to the default.
pub fn template_by_id(id: &str) -> &'static Template {
    find_template(id).unwrap_or_else(|| {
        log::debug!("unknown template {id:?}, using {}", default_template().id);
        default_template()
    })
}

/// Look up a template by id without falling back.
pub fn find_template(id: &str) -> Option<&'static Template> {
    TEMPLATES.iter().find(|t| t.id == id)
}

/// Font sizes in points for each [`FontTier`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontTiers {
    pub title: f32,
    pub section: f32,
    pub subsection: f32,
    pub body: f32,
}

impl FontTiers {
    pub const STANDARD: FontTiers = FontTiers {
        title: 16.0,
        section: 13.0,
        subsection: 11.0,
        body: 10.0,
    };

    pub fn size(&self, tier: FontTier) -> f32 {
        match tier {
            FontTier::Title => self.title,
            FontTier::Section => self.section,
            FontTier::Subsection => self.subsection,
            FontTier::Body => self.body,
        }
    }
}

impl Default for FontTiers {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Resolved presentation variables for one template.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleTokens {
    pub template_id: &'static str,
    pub font_family: &'static str,
    pub primary: Color,
    pub secondary: Color,
    pub heading: Color,
    pub text: Color,
    pub underline_section_headers: bool,
    pub tiers: FontTiers,
}

impl StyleTokens {
    /// First family of the font stack with quotes stripped (`"Inter"`).
    pub fn primary_font(&self) -> String {
        self.font_family
            .split(',')
            .next()
            .unwrap_or_default()
            .trim()
            .trim_matches(|c| c == '"' || c == '\'')
            .to_string()
    }

    /// Font size in points for a tier.
    pub fn font_size(&self, tier: FontTier) -> f32 {
        self.tiers.size(tier)
    }

    /// The template's CSS custom properties, keyed by variable name.
    pub fn css_variables(&self) -> BTreeMap<&'static str, String> {
        BTreeMap::from([
            ("--primary-color", self.primary.to_hex()),
            ("--secondary-color", self.secondary.to_hex()),
            ("--heading-color", self.heading.to_hex()),
            ("--text-color", self.text.to_hex()),
            ("--font-family", self.font_family.to_string()),
        ])
    }
}

impl From<&Template> for StyleTokens {
    fn from(template: &Template) -> Self {
        Self {
            template_id: template.id,
            font_family: template.font_family,
            primary: template.colors.primary,
            secondary: template.colors.secondary,
            heading: template.colors.heading,
            text: template.colors.text,
            underline_section_headers: template.underline_section_headers,
            tiers: FontTiers::STANDARD,
        }
    }
}

/// Resolve a template id to its style tokens.
///
/// Pure: the same id always yields identical tokens.
pub fn resolve(template_id: &str) -> StyleTokens {
    StyleTokens::from(template_by_id(template_id))
}
