//! Visual styling: [`Color`], [`AttrMask`], and [`Style`].

use std::ops::BitOr;

// ---------------------------------------------------------------------------
// Color
// ---------------------------------------------------------------------------

/// An RGB colour packed into a `u32` (0x00RRGGBB).
///
/// `Color::DEFAULT` (zero) means "whatever the back-end uses by default".
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color(pub u32);

impl Color {
    /// The default / unset colour (0).
    pub const DEFAULT: Self = Self(0);

    /// Construct from individual RGB components.
    #[inline]
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u32) << 16) | ((g as u32) << 8) | (b as u32))
    }

    /// Construct from a `0xRRGGBB` literal.
    #[inline]
    pub const fn from_hex(hex: u32) -> Self {
        Self(hex & 0x00FF_FFFF)
    }

    /// Red component.
    #[inline]
    pub const fn r(self) -> u8 {
        ((self.0 >> 16) & 0xFF) as u8
    }

    /// Green component.
    #[inline]
    pub const fn g(self) -> u8 {
        ((self.0 >> 8) & 0xFF) as u8
    }

    /// Blue component.
    #[inline]
    pub const fn b(self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    /// Paint `over` on top of `self` with the given opacity (0.0 ..= 1.0).
    pub fn blend(self, over: Color, alpha: f32) -> Color {
        let a = alpha.clamp(0.0, 1.0);
        let mix = |base: u8, top: u8| -> u8 {
            (base as f32 * (1.0 - a) + top as f32 * a).round() as u8
        };
        Color::from_rgb(
            mix(self.r(), over.r()),
            mix(self.g(), over.g()),
            mix(self.b(), over.b()),
        )
    }
}

// ---------------------------------------------------------------------------
// AttrMask
// ---------------------------------------------------------------------------

/// Bitmask of text attributes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttrMask(pub u32);

impl AttrMask {
    pub const NONE: Self = Self(0);
    pub const BOLD: Self = Self(1 << 0);
    pub const REVERSE: Self = Self(1 << 1);
    pub const DIM: Self = Self(1 << 2);

    /// Whether this mask contains all the bits from `other`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Whether the mask is empty.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for AttrMask {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

// ---------------------------------------------------------------------------
// Style
// ---------------------------------------------------------------------------

/// Complete visual style for one glyph on screen.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Style {
    pub fg: Color,
    pub bg: Color,
    pub attrs: AttrMask,
}

impl Style {
    /// Set the foreground colour (builder).
    #[inline]
    pub const fn with_fg(mut self, fg: Color) -> Self {
        self.fg = fg;
        self
    }

    /// Set the background colour (builder).
    #[inline]
    pub const fn with_bg(mut self, bg: Color) -> Self {
        self.bg = bg;
        self
    }

    /// Set the attribute mask (builder).
    #[inline]
    pub const fn with_attrs(mut self, attrs: AttrMask) -> Self {
        self.attrs = attrs;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_components() {
        let c = Color::from_rgb(0xAB, 0xCD, 0xEF);
        assert_eq!(c.r(), 0xAB);
        assert_eq!(c.g(), 0xCD);
        assert_eq!(c.b(), 0xEF);
        assert_eq!(Color::from_hex(0xABCDEF), c);
    }

    #[test]
    fn blend_extremes() {
        let white = Color::from_hex(0xffffff);
        let teal = Color::from_hex(0x0f766e);
        assert_eq!(white.blend(teal, 0.0), white);
        assert_eq!(white.blend(teal, 1.0), teal);
        // Out-of-range opacity is clamped.
        assert_eq!(white.blend(teal, 3.0), teal);
    }

    #[test]
    fn blend_partial() {
        let white = Color::from_hex(0xffffff);
        let teal = Color::from_hex(0x0f766e);
        let c = white.blend(teal, 0.3);
        // 255 * 0.7 + 15 * 0.3 = 183
        assert_eq!(c.r(), 183);
        // 255 * 0.7 + 118 * 0.3 = 213.9
        assert_eq!(c.g(), 214);
        // 255 * 0.7 + 110 * 0.3 sits right on a rounding boundary.
        assert!((211..=212).contains(&c.b()));
    }

    #[test]
    fn style_builder() {
        let s = Style::default()
            .with_fg(Color::from_rgb(255, 0, 0))
            .with_bg(Color::from_rgb(0, 0, 1))
            .with_attrs(AttrMask::BOLD | AttrMask::DIM);
        assert_eq!(s.fg.r(), 255);
        assert!(s.attrs.contains(AttrMask::BOLD));
        assert!(s.attrs.contains(AttrMask::DIM));
        assert!(!s.attrs.contains(AttrMask::REVERSE));
    }
}
