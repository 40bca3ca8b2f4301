//! Corner blend classification and per-pixel blend info.
//!
//! Every pixel has four corners, each shared with three neighbors. The
//! preprocessing pass classifies each corner as not blended, normally
//! blended, or dominantly blended. A pixel's four corner classifications
//! are assembled across two row passes, so they are packed two bits per
//! corner into a byte for the row carry buffer; everywhere else they travel
//! as an explicit struct of four named slots.

use crate::rotation::RotationDegree;

/// Blend strength of one corner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BlendType {
    /// No edge crosses this corner.
    #[default]
    None,
    /// An edge crosses this corner.
    Normal,
    /// An edge crosses this corner and its gradient direction is dominant.
    Dominant,
}

impl BlendType {
    fn from_bits(bits: u8) -> Self {
        match bits & 0x3 {
            1 => BlendType::Normal,
            2 => BlendType::Dominant,
            _ => BlendType::None,
        }
    }

    const fn to_bits(self) -> u8 {
        match self {
            BlendType::None => 0,
            BlendType::Normal => 1,
            BlendType::Dominant => 2,
        }
    }
}

/// Blend classification of the four corners of one pixel.
///
/// Slots are named in the pixel's own (possibly rotated) frame. Rotation is
/// a pure relabeling of the slots; it never touches pixel data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlendInfo {
    pub top_left: BlendType,
    pub top_right: BlendType,
    pub bottom_right: BlendType,
    pub bottom_left: BlendType,
}

impl BlendInfo {
    /// True if any corner carries a blend.
    pub fn any_set(&self) -> bool {
        *self != BlendInfo::default()
    }

    /// Relabel the corners as if the pixel were turned clockwise by the
    /// given rotation.
    ///
    /// One 90 degree turn moves the corner that was top-right into the
    /// bottom-right slot, so each rotation evaluates a different corner
    /// through the same bottom-right-centric decision procedure.
    pub fn rotate(self, deg: RotationDegree) -> Self {
        let mut rotated = self;
        for _ in 0..deg.turns() {
            rotated = Self {
                top_left: rotated.bottom_left,
                top_right: rotated.top_left,
                bottom_right: rotated.top_right,
                bottom_left: rotated.bottom_right,
            };
        }
        rotated
    }

    /// Pack into a carry-buffer byte, two bits per corner.
    ///
    /// Bit layout: top-left 0-1, top-right 2-3, bottom-right 4-5,
    /// bottom-left 6-7.
    pub fn pack(self) -> u8 {
        self.top_left.to_bits()
            | (self.top_right.to_bits() << 2)
            | (self.bottom_right.to_bits() << 4)
            | (self.bottom_left.to_bits() << 6)
    }

    /// Unpack a carry-buffer byte.
    pub fn unpack(byte: u8) -> Self {
        Self {
            top_left: BlendType::from_bits(byte),
            top_right: BlendType::from_bits(byte >> 2),
            bottom_right: BlendType::from_bits(byte >> 4),
            bottom_left: BlendType::from_bits(byte >> 6),
        }
    }

    pub fn with_top_left(self, ty: BlendType) -> Self {
        Self { top_left: ty, ..self }
    }

    pub fn with_top_right(self, ty: BlendType) -> Self {
        Self { top_right: ty, ..self }
    }

    pub fn with_bottom_right(self, ty: BlendType) -> Self {
        Self { bottom_right: ty, ..self }
    }

    pub fn with_bottom_left(self, ty: BlendType) -> Self {
        Self { bottom_left: ty, ..self }
    }
}

/// Result of classifying one corner point between four adjacent pixels.
///
/// Slot names refer to the 2x2 center of the 4x4 preprocessing kernel:
///
/// ```text
/// | F | G |
/// |---|---|
/// | J | K |
/// ```
///
/// `f` is the current pixel's bottom-right corner, `g`/`j`/`k` are the same
/// corner as seen by the right, lower and diagonal neighbors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CornerBlend {
    pub f: BlendType,
    pub g: BlendType,
    pub j: BlendType,
    pub k: BlendType,
}
