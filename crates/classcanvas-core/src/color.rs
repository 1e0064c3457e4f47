//! CSS colors for relationship strokes, entity accents and the canvas
//! background.

use std::{fmt, str::FromStr};

use color::DynamicColor;

/// A parsed CSS color.
///
/// Accepts anything the `color` crate understands: hex literals, `rgb()`
/// and named colors.
///
/// ```
/// use classcanvas_core::color::Color;
///
/// let composition = Color::new("#f87171").unwrap();
/// assert_eq!(composition.alpha(), 1.0);
/// assert!(Color::new("tealish").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color(DynamicColor);

impl Color {
    pub fn new(css: &str) -> Result<Self, String> {
        DynamicColor::from_str(css)
            .map(Self)
            .map_err(|err| format!("invalid color `{css}`: {err}"))
    }

    /// Built-in theme colors; an unparsable literal degrades to black.
    pub(crate) fn from_palette(css: &str) -> Self {
        Self::new(css).unwrap_or_default()
    }

    /// Color rendered as a fragment usable inside an SVG `id`.
    ///
    /// ```
    /// use classcanvas_core::color::Color;
    ///
    /// let id = Color::new("#ff8000").unwrap().to_id_safe_string();
    /// assert!(id.chars().all(|c| c.is_alphanumeric() || c == '_'));
    /// ```
    pub fn to_id_safe_string(self) -> String {
        let fragment: String = self
            .to_string()
            .replace('#', "hex")
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect();

        // ids must not start with a digit
        match fragment.chars().next() {
            Some(first) if first.is_ascii_digit() => format!("c_{fragment}"),
            _ => fragment,
        }
    }

    pub fn alpha(&self) -> f32 {
        self.0.components[3]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self(DynamicColor::from_alpha_color(color::palette::css::BLACK))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&Color> for svg::node::Value {
    fn from(color: &Color) -> Self {
        Self::from(color.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_theme_literals() {
        for css in ["#60a5fa", "rgb(52, 211, 153)", "slategray"] {
            assert!(Color::new(css).is_ok(), "{css} should parse");
        }
        let err = Color::new("not-a-color").unwrap_err();
        assert!(err.contains("not-a-color"));
    }

    #[test]
    fn test_default_is_opaque_black() {
        let black = Color::default();
        assert_eq!(black.alpha(), 1.0);
        assert_eq!(black.0.components[..3], [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_from_palette_falls_back_to_default() {
        assert_eq!(Color::from_palette("bogus"), Color::default());
        assert_ne!(Color::from_palette("#60a5fa"), Color::default());
    }

    #[test]
    fn test_id_safe_string_distinguishes_colors() {
        let blue = Color::new("#60a5fa").unwrap().to_id_safe_string();
        let red = Color::new("#f87171").unwrap().to_id_safe_string();
        assert_ne!(blue, red);
        for id in [blue, red] {
            assert!(id.chars().next().is_some_and(|c| c.is_ascii_alphabetic()));
            assert!(id.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'));
        }
    }
}
