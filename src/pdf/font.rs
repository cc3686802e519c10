//! Base-14 font metrics and greedy line wrapping.
//!
//! Only the standard Type1 fonts every PDF viewer ships are used, so no font
//! program is embedded. Widths come from the Adobe AFM files, in 1/1000 em,
//! indexed by ASCII code minus 32.

use super::MM_PER_PT;

/// Base-14 font family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontFamily {
    Helvetica,
    Times,
    Courier,
}

impl FontFamily {
    /// Map a CSS font stack to the closest Base-14 family.
    ///
    /// Known web fonts are mapped by name; anything else goes by the stack's
    /// generic family (`serif`, `monospace`), defaulting to Helvetica.
    pub fn from_font_stack(stack: &str) -> Self {
        let families: Vec<String> = stack
            .split(',')
            .map(|f| f.trim().trim_matches(|c| c == '"' || c == '\'').to_ascii_lowercase())
            .collect();

        match families.first().map(String::as_str) {
            Some("inter" | "roboto" | "poppins" | "lato" | "helvetica" | "arial") => {
                return Self::Helvetica;
            }
            Some("merriweather" | "times" | "times new roman") => return Self::Times,
            Some("courier" | "courier new") => return Self::Courier,
            _ => {}
        }

        if families.iter().any(|f| f == "serif") {
            Self::Times
        } else if families.iter().any(|f| f == "monospace") {
            Self::Courier
        } else {
            Self::Helvetica
        }
    }
}

/// Weight/slant variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontStyle {
    Normal,
    Bold,
    Italic,
}

/// A concrete Base-14 face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BaseFont {
    pub family: FontFamily,
    pub style: FontStyle,
}

impl BaseFont {
    pub fn new(family: FontFamily, style: FontStyle) -> Self {
        Self { family, style }
    }

    /// PostScript name used as `/BaseFont` in the font dictionary.
    pub fn postscript_name(self) -> &'static str {
        use FontFamily::*;
        use FontStyle::*;
        match (self.family, self.style) {
            (Helvetica, Normal) => "Helvetica",
            (Helvetica, Bold) => "Helvetica-Bold",
            (Helvetica, Italic) => "Helvetica-Oblique",
            (Times, Normal) => "Times-Roman",
            (Times, Bold) => "Times-Bold",
            (Times, Italic) => "Times-Italic",
            (Courier, Normal) => "Courier",
            (Courier, Bold) => "Courier-Bold",
            (Courier, Italic) => "Courier-Oblique",
        }
    }

    /// Glyph advance in 1/1000 em.
    pub fn char_width(self, ch: char) -> u16 {
        let table = match (self.family, self.style) {
            (FontFamily::Courier, _) => return 600,
            (FontFamily::Helvetica, FontStyle::Bold) => &HELVETICA_BOLD,
            (FontFamily::Helvetica, _) => &HELVETICA,
            (FontFamily::Times, FontStyle::Normal) => &TIMES_ROMAN,
            (FontFamily::Times, FontStyle::Bold) => &TIMES_BOLD,
            (FontFamily::Times, FontStyle::Italic) => &TIMES_ITALIC,
        };
        match ch {
            ' '..='~' => table[ch as usize - 32],
            '\u{2022}' => 350,
            _ => match self.family {
                FontFamily::Helvetica => 556,
                _ => 500,
            },
        }
    }

    /// Width of `text` at `size_pt`, in millimetres.
    pub fn text_width_mm(self, text: &str, size_pt: f32) -> f32 {
        let units: u32 = text.chars().map(|c| u32::from(self.char_width(c))).sum();
        units as f32 * size_pt / 1000.0 * MM_PER_PT
    }
}

/// Break `text` into lines no wider than `max_width_mm`.
///
/// Greedy word wrap: words are added to the current line until the next one
/// would overflow. A single word wider than the line is broken by character.
/// Empty text yields one empty line, so a blank paragraph still takes up a
/// line of vertical space.
pub fn wrap_text(text: &str, font: BaseFont, size_pt: f32, max_width_mm: f32) -> Vec<String> {
    let space = font.text_width_mm(" ", size_pt);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0.0f32;

    for word in text.split_whitespace() {
        let word_width = font.text_width_mm(word, size_pt);

        if !current.is_empty() && current_width + space + word_width <= max_width_mm {
            current.push(' ');
            current.push_str(word);
            current_width += space + word_width;
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }

        if word_width <= max_width_mm {
            current.push_str(word);
            current_width = word_width;
            continue;
        }

        // Hard-break an over-long word.
        current_width = 0.0;
        for ch in word.chars() {
            let w = font.text_width_mm(ch.encode_utf8(&mut [0; 4]), size_pt);
            if !current.is_empty() && current_width + w > max_width_mm {
                lines.push(std::mem::take(&mut current));
                current_width = 0.0;
            }
            current.push(ch);
            current_width += w;
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

#[rustfmt::skip]
static HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
static HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

#[rustfmt::skip]
static TIMES_ROMAN: [u16; 95] = [
    250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 278, 278, 564, 564, 564, 444,
    921, 722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889, 722, 722,
    556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611, 333, 278, 333, 469, 500,
    333, 444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778, 500, 500,
    500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444, 480, 200, 480, 541,
];

#[rustfmt::skip]
static TIMES_BOLD: [u16; 95] = [
    250, 333, 555, 500, 500, 1000, 833, 278, 333, 333, 500, 570, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 333, 333, 570, 570, 570, 500,
    930, 722, 667, 722, 722, 667, 611, 778, 778, 389, 500, 778, 667, 944, 722, 778,
    611, 778, 722, 556, 667, 722, 722, 1000, 722, 722, 667, 333, 278, 333, 581, 500,
    333, 500, 556, 444, 556, 444, 333, 500, 556, 278, 333, 556, 278, 833, 556, 500,
    556, 556, 444, 389, 333, 556, 500, 722, 500, 500, 444, 394, 220, 394, 520,
];

#[rustfmt::skip]
static TIMES_ITALIC: [u16; 95] = [
    250, 333, 420, 500, 500, 833, 778, 214, 333, 333, 500, 675, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 333, 333, 675, 675, 675, 500,
    920, 611, 611, 667, 722, 611, 611, 722, 722, 333, 444, 667, 556, 833, 667, 722,
    611, 722, 611, 500, 556, 722, 611, 833, 611, 556, 556, 389, 278, 389, 422, 500,
    333, 500, 500, 444, 500, 444, 278, 500, 500, 278, 278, 444, 278, 722, 500, 500,
    500, 500, 389, 389, 278, 500, 444, 667, 444, 444, 389, 400, 275, 400, 541,
];

#[cfg(test)]
mod tests {
    use super::*;

    const HELV: BaseFont = BaseFont {
        family: FontFamily::Helvetica,
        style: FontStyle::Normal,
    };

    #[test]
    fn test_font_stack_mapping() {
        assert_eq!(FontFamily::from_font_stack("Inter, sans-serif"), FontFamily::Helvetica);
        assert_eq!(FontFamily::from_font_stack("'Merriweather', serif"), FontFamily::Times);
        assert_eq!(FontFamily::from_font_stack("Georgia, serif"), FontFamily::Times);
        assert_eq!(FontFamily::from_font_stack("Arial, sans-serif"), FontFamily::Helvetica);
        assert_eq!(FontFamily::from_font_stack("Fira Code, monospace"), FontFamily::Courier);
        assert_eq!(FontFamily::from_font_stack(""), FontFamily::Helvetica);
    }

    #[test]
    fn test_postscript_names() {
        assert_eq!(
            BaseFont::new(FontFamily::Times, FontStyle::Italic).postscript_name(),
            "Times-Italic"
        );
        assert_eq!(
            BaseFont::new(FontFamily::Helvetica, FontStyle::Bold).postscript_name(),
            "Helvetica-Bold"
        );
    }

    #[test]
    fn test_char_widths() {
        assert_eq!(HELV.char_width(' '), 278);
        assert_eq!(HELV.char_width('W'), 944);
        assert_eq!(HELV.char_width('~'), 584);
        assert_eq!(HELV.char_width('\u{2022}'), 350);
        let courier = BaseFont::new(FontFamily::Courier, FontStyle::Bold);
        assert_eq!(courier.char_width('i'), 600);
    }

    #[test]
    fn test_text_width_mm() {
        // 1000 units at 72pt is exactly one inch.
        let width = BaseFont::new(FontFamily::Courier, FontStyle::Normal)
            .text_width_mm("ab", 60.0);
        assert!((width - 25.4).abs() < 1e-3);
    }

    #[test]
    fn test_wrap_short_text_is_one_line() {
        assert_eq!(wrap_text("Engineer", HELV, 10.0, 180.0), vec!["Engineer"]);
    }

    #[test]
    fn test_wrap_empty_text() {
        assert_eq!(wrap_text("", HELV, 10.0, 180.0), vec![String::new()]);
    }

    #[test]
    fn test_wrap_long_text() {
        let text = "word ".repeat(100);
        let lines = wrap_text(&text, HELV, 10.0, 180.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(HELV.text_width_mm(line, 10.0) <= 180.0);
            assert!(!line.starts_with(' ') && !line.ends_with(' '));
        }
        let rejoined = lines.join(" ");
        assert_eq!(rejoined, text.trim_end());
    }

    #[test]
    fn test_wrap_breaks_overlong_word() {
        let word = "x".repeat(200);
        let lines = wrap_text(&word, HELV, 10.0, 20.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), word);
    }
}
