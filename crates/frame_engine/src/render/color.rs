//! Normalized RGBA color
//!
//! Every way of spelling a vertex color (named constant, float array, four
//! float scalars, byte channels) converts into [`Color4`] at the call site,
//! so the graphics context only ever sees four floats in [0, 1].

use serde::Deserialize;

/// RGBA color with normalized float channels
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(from = "[f32; 4]")]
pub struct Color4 {
    /// Red channel
    pub r: f32,
    /// Green channel
    pub g: f32,
    /// Blue channel
    pub b: f32,
    /// Alpha channel
    pub a: f32,
}

impl Color4 {
    /// Opaque black
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    /// Opaque white
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    /// Opaque red
    pub const RED: Self = Self::new(1.0, 0.0, 0.0, 1.0);
    /// Opaque full-intensity green
    pub const LIME: Self = Self::new(0.0, 1.0, 0.0, 1.0);
    /// Opaque blue
    pub const BLUE: Self = Self::new(0.0, 0.0, 1.0, 1.0);
    /// Fully transparent black
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Create a color from four float channels
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color from three float channels
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Create a color from byte channels, each mapped to `byte / 255`
    pub fn from_bytes(r: u8, g: u8, b: u8, a: u8) -> Self {
        let unit = |channel: u8| f32::from(channel) / 255.0;
        Self::new(unit(r), unit(g), unit(b), unit(a))
    }

    /// Copy with every channel clamped into [0, 1]
    #[must_use]
    pub fn clamped(self) -> Self {
        Self::new(
            self.r.clamp(0.0, 1.0),
            self.g.clamp(0.0, 1.0),
            self.b.clamp(0.0, 1.0),
            self.a.clamp(0.0, 1.0),
        )
    }

    /// Channels as an array
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color4 {
    fn default() -> Self {
        Self::WHITE
    }
}

impl From<[f32; 4]> for Color4 {
    fn from([r, g, b, a]: [f32; 4]) -> Self {
        Self::new(r, g, b, a)
    }
}

impl From<[f32; 3]> for Color4 {
    fn from([r, g, b]: [f32; 3]) -> Self {
        Self::rgb(r, g, b)
    }
}

impl From<(f32, f32, f32, f32)> for Color4 {
    fn from((r, g, b, a): (f32, f32, f32, f32)) -> Self {
        Self::new(r, g, b, a)
    }
}

impl From<[u8; 4]> for Color4 {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self::from_bytes(r, g, b, a)
    }
}

impl From<[u8; 3]> for Color4 {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::from_bytes(r, g, b, u8::MAX)
    }
}

impl From<(u8, u8, u8, u8)> for Color4 {
    fn from((r, g, b, a): (u8, u8, u8, u8)) -> Self {
        Self::from_bytes(r, g, b, a)
    }
}
