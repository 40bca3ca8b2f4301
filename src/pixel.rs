//! Packed 32-bit pixel representation and channel layouts.
//!
//! The engine operates on flat buffers of packed pixels, one `u32` per pixel
//! with four 8-bit channels. Two layouts are supported, differing in which
//! byte holds each channel. All channel access is explicit shift/mask
//! arithmetic; pixels are never reinterpreted as byte arrays.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Channel ordering of a packed 32-bit pixel.
///
/// The name reads from the most significant byte down: `Argb` stores alpha
/// in bits 24-31 and blue in bits 0-7.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ChannelLayout {
    /// Alpha 24-31, red 16-23, green 8-15, blue 0-7 (default).
    #[default]
    Argb,
    /// Red 24-31, green 16-23, blue 8-15, alpha 0-7.
    Rgba,
}

impl ChannelLayout {
    /// Bit position of the red channel.
    pub const fn red_shift(self) -> u32 {
        match self {
            ChannelLayout::Argb => 16,
            ChannelLayout::Rgba => 24,
        }
    }

    /// Bit position of the green channel.
    pub const fn green_shift(self) -> u32 {
        match self {
            ChannelLayout::Argb => 8,
            ChannelLayout::Rgba => 16,
        }
    }

    /// Bit position of the blue channel.
    pub const fn blue_shift(self) -> u32 {
        match self {
            ChannelLayout::Argb => 0,
            ChannelLayout::Rgba => 8,
        }
    }

    /// Bit position of the alpha channel.
    pub const fn alpha_shift(self) -> u32 {
        match self {
            ChannelLayout::Argb => 24,
            ChannelLayout::Rgba => 0,
        }
    }

    /// In-place mask of the red channel bits.
    pub const fn red_mask(self) -> u32 {
        0xff << self.red_shift()
    }

    /// In-place mask of the green channel bits.
    pub const fn green_mask(self) -> u32 {
        0xff << self.green_shift()
    }

    /// In-place mask of the blue channel bits.
    pub const fn blue_mask(self) -> u32 {
        0xff << self.blue_shift()
    }

    /// In-place mask of the alpha channel bits.
    pub const fn alpha_mask(self) -> u32 {
        0xff << self.alpha_shift()
    }

    /// Extract the red channel value (0-255).
    pub const fn red(self, pixel: u32) -> u8 {
        ((pixel >> self.red_shift()) & 0xff) as u8
    }

    /// Extract the green channel value (0-255).
    pub const fn green(self, pixel: u32) -> u8 {
        ((pixel >> self.green_shift()) & 0xff) as u8
    }

    /// Extract the blue channel value (0-255).
    pub const fn blue(self, pixel: u32) -> u8 {
        ((pixel >> self.blue_shift()) & 0xff) as u8
    }

    /// Extract the alpha channel value (0-255).
    pub const fn alpha(self, pixel: u32) -> u8 {
        ((pixel >> self.alpha_shift()) & 0xff) as u8
    }

    /// Compose a packed pixel from channel values.
    pub const fn pack(self, r: u8, g: u8, b: u8, a: u8) -> u32 {
        ((r as u32) << self.red_shift())
            | ((g as u32) << self.green_shift())
            | ((b as u32) << self.blue_shift())
            | ((a as u32) << self.alpha_shift())
    }
}

impl std::fmt::Display for ChannelLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChannelLayout::Argb => write!(f, "argb"),
            ChannelLayout::Rgba => write!(f, "rgba"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argb_masks_are_disjoint_and_cover() {
        let l = ChannelLayout::Argb;
        assert_eq!(l.red_mask() | l.green_mask() | l.blue_mask() | l.alpha_mask(), 0xffff_ffff);
        assert_eq!(l.red_mask() & l.green_mask(), 0);
        assert_eq!(l.red_mask(), 0x00ff_0000);
        assert_eq!(l.alpha_mask(), 0xff00_0000);
    }

    #[test]
    fn test_rgba_masks_are_disjoint_and_cover() {
        let l = ChannelLayout::Rgba;
        assert_eq!(l.red_mask() | l.green_mask() | l.blue_mask() | l.alpha_mask(), 0xffff_ffff);
        assert_eq!(l.red_mask(), 0xff00_0000);
        assert_eq!(l.alpha_mask(), 0x0000_00ff);
    }

    #[test]
    fn test_pack_unpack_roundtrip() {
        for layout in [ChannelLayout::Argb, ChannelLayout::Rgba] {
            let p = layout.pack(0x12, 0x34, 0x56, 0x78);
            assert_eq!(layout.red(p), 0x12);
            assert_eq!(layout.green(p), 0x34);
            assert_eq!(layout.blue(p), 0x56);
            assert_eq!(layout.alpha(p), 0x78);
        }
    }

    #[test]
    fn test_argb_packing_matches_reference_layout() {
        // 0xAARRGGBB
        let p = ChannelLayout::Argb.pack(0x11, 0x22, 0x33, 0xff);
        assert_eq!(p, 0xff11_2233);
    }

    #[test]
    fn test_layout_display() {
        assert_eq!(format!("{}", ChannelLayout::Argb), "argb");
        assert_eq!(format!("{}", ChannelLayout::Rgba), "rgba");
    }
}
