//! ARGB colors
//!
//! Colors are packed `0xAARRGGBB` values, the form the host hands over after
//! theme resolution.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Argb(pub u32);

impl Argb {
    pub const TRANSPARENT: Argb = Argb(0x0000_0000);
    pub const BLACK: Argb = Argb(0xFF00_0000);
    pub const WHITE: Argb = Argb(0xFFFF_FFFF);

    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Argb(((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn blue(self) -> u8 {
        self.0 as u8
    }

    /// Blend towards `to` by `fraction`, each channel independently.
    ///
    /// The fraction is clamped to `[0, 1]`. Each channel is
    /// `round(from * (1 - t) + to * t)`, so `0.0` and `1.0` return the
    /// endpoints exactly and `0.5` gives the rounded channel average.
    pub fn blend(self, to: Argb, fraction: f32) -> Argb {
        let t = fraction.clamp(0.0, 1.0);
        let mix = |from: u8, to: u8| -> u8 {
            let v = from as f32 * (1.0 - t) + to as f32 * t;
            v.round().clamp(0.0, 255.0) as u8
        };

        Argb::from_argb(
            mix(self.alpha(), to.alpha()),
            mix(self.red(), to.red()),
            mix(self.green(), to.green()),
            mix(self.blue(), to.blue()),
        )
    }
}

impl std::fmt::Display for Argb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:08X}", self.0)
    }
}

impl From<u32> for Argb {
    fn from(value: u32) -> Self {
        Argb(value)
    }
}

/// Free-function form of [`Argb::blend`].
pub fn blend(from: Argb, to: Argb, fraction: f32) -> Argb {
    from.blend(to, fraction)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channels() {
        let c = Argb(0x80FF_4020);
        assert_eq!(c.alpha(), 0x80);
        assert_eq!(c.red(), 0xFF);
        assert_eq!(c.green(), 0x40);
        assert_eq!(c.blue(), 0x20);
        assert_eq!(Argb::from_argb(0x80, 0xFF, 0x40, 0x20), c);
    }

    #[test]
    fn test_blend_endpoints() {
        let a = Argb(0xFF12_3456);
        let b = Argb(0x40AB_CDEF);
        assert_eq!(a.blend(b, 0.0), a);
        assert_eq!(a.blend(b, 1.0), b);
        // Out-of-range fractions clamp
        assert_eq!(a.blend(b, -2.0), a);
        assert_eq!(a.blend(b, 3.0), b);
    }

    #[test]
    fn test_blend_midpoint_table() {
        // opaque red -> opaque blue: channel midpoint, not a perceptual purple
        assert_eq!(
            blend(Argb(0xFFFF_0000), Argb(0xFF00_00FF), 0.5),
            Argb(0xFF80_0080)
        );
        // black -> white
        assert_eq!(
            blend(Argb::BLACK, Argb::WHITE, 0.5),
            Argb(0xFF80_8080)
        );
        // transparent -> opaque green: alpha blends too
        assert_eq!(
            blend(Argb(0x0000_0000), Argb(0xFF00_FF00), 0.5),
            Argb(0x8000_8000)
        );
        // even channel differences land exactly on the average
        assert_eq!(
            blend(Argb(0xFF10_2030), Argb(0xFF30_4050), 0.5),
            Argb(0xFF20_3040)
        );
    }

    #[test]
    fn test_blend_quarter() {
        // 0 -> 200 at 0.25 is 50, 100 -> 0 at 0.25 is 75
        let from = Argb::from_argb(255, 0, 100, 0);
        let to = Argb::from_argb(255, 200, 0, 0);
        assert_eq!(from.blend(to, 0.25), Argb::from_argb(255, 50, 75, 0));
    }

    #[test]
    fn test_display() {
        assert_eq!(Argb(0xFF00_AA11).to_string(), "#FF00AA11");
    }
}
