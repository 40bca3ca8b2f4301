//! Per-scale blend recipes.
//!
//! For every scale factor there is one fixed table of weighted-blend steps
//! per edge pattern. A step paints one cell of the output block: either a
//! weighted mix of the blend color into what the cell already holds, or a
//! full overwrite for interior cells completely covered by the line. Cells
//! are addressed in the unrotated local frame; the output matrix remaps
//! them for the active rotation.
//!
//! The weights are geometric constants describing how a line or rounded
//! corner covers the block's sub-pixels. They are part of the visual
//! contract and are transcribed exactly - e.g. the 2x corner weight 21/100
//! approximates 1 - pi/4 = 0.2146, the area of a square corner outside a
//! quarter circle.

use crate::matrix::OutputMatrix;
use crate::pixel::ChannelLayout;
use crate::rotation::RotationDegree;

/// Edge pattern selected by the per-rotation decision procedure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendPattern {
    /// Line rising less than 45 degrees in the rotated frame.
    Shallow,
    /// Line rising more than 45 degrees.
    Steep,
    /// Both directions at once (a thin wedge).
    SteepAndShallow,
    /// Plain 45 degree diagonal.
    Diagonal,
    /// Corner-only rounding, no line.
    Corner,
}

/// One weighted paint instruction: blend `num/den` of the source color into
/// block cell `(row, col)`. `num == den` overwrites the cell.
#[derive(Debug, Clone, Copy)]
pub struct BlendStep {
    pub num: u32,
    pub den: u32,
    pub row: u8,
    pub col: u8,
}

const fn mix(num: u32, den: u32, row: u8, col: u8) -> BlendStep {
    BlendStep { num, den, row, col }
}

/// Interior cell fully covered by the line.
const fn set(row: u8, col: u8) -> BlendStep {
    BlendStep { num: 1, den: 1, row, col }
}

/// The five pattern tables of one scale factor.
#[derive(Debug)]
pub struct ScaleRecipes {
    pub scale: usize,
    shallow: &'static [BlendStep],
    steep: &'static [BlendStep],
    steep_and_shallow: &'static [BlendStep],
    diagonal: &'static [BlendStep],
    corner: &'static [BlendStep],
}

impl ScaleRecipes {
    /// Recipe table for a scale factor, or `None` outside the supported
    /// closed set {2, 3, 4, 5}.
    pub fn for_factor(factor: usize) -> Option<&'static ScaleRecipes> {
        match factor {
            2 => Some(&SCALE_2X),
            3 => Some(&SCALE_3X),
            4 => Some(&SCALE_4X),
            5 => Some(&SCALE_5X),
            _ => None,
        }
    }

    /// Steps for one pattern.
    pub fn steps(&self, pattern: BlendPattern) -> &'static [BlendStep] {
        match pattern {
            BlendPattern::Shallow => self.shallow,
            BlendPattern::Steep => self.steep,
            BlendPattern::SteepAndShallow => self.steep_and_shallow,
            BlendPattern::Diagonal => self.diagonal,
            BlendPattern::Corner => self.corner,
        }
    }

    /// Paint one pattern into the block at `base` with the given blend
    /// color.
    pub fn apply(
        &self,
        pattern: BlendPattern,
        out: &mut OutputMatrix<'_>,
        deg: RotationDegree,
        base: usize,
        color: u32,
        layout: ChannelLayout,
    ) {
        for step in self.steps(pattern) {
            let cell = out.cell(deg, base, step.row as usize, step.col as usize);
            if step.num == step.den {
                *cell = color;
            } else {
                *cell = alpha_blend(*cell, color, step.num, step.den, layout);
            }
        }
    }
}

static SCALE_2X: ScaleRecipes = ScaleRecipes {
    scale: 2,
    shallow: &[mix(1, 4, 1, 0), mix(3, 4, 1, 1)],
    steep: &[mix(1, 4, 0, 1), mix(3, 4, 1, 1)],
    steep_and_shallow: &[mix(1, 4, 1, 0), mix(1, 4, 0, 1), mix(5, 6, 1, 1)],
    diagonal: &[mix(1, 2, 1, 1)],
    // Round corner: 21/100 approximates 1 - pi/4 = 0.2146018366.
    corner: &[mix(21, 100, 1, 1)],
};

static SCALE_3X: ScaleRecipes = ScaleRecipes {
    scale: 3,
    shallow: &[mix(1, 4, 2, 0), mix(1, 4, 1, 2), mix(3, 4, 2, 1), set(2, 2)],
    steep: &[mix(1, 4, 0, 2), mix(1, 4, 2, 1), mix(3, 4, 1, 2), set(2, 2)],
    steep_and_shallow: &[
        mix(1, 4, 2, 0),
        mix(1, 4, 0, 2),
        mix(3, 4, 2, 1),
        mix(3, 4, 1, 2),
        set(2, 2),
    ],
    diagonal: &[mix(1, 8, 1, 2), mix(1, 8, 2, 1), mix(7, 8, 2, 2)],
    // Round corner: 45/100 approximates 0.4545939598; the two flanking
    // cells (~0.014 each) are negligible and omitted.
    corner: &[mix(45, 100, 2, 2)],
};

static SCALE_4X: ScaleRecipes = ScaleRecipes {
    scale: 4,
    shallow: &[
        mix(1, 4, 3, 0),
        mix(1, 4, 2, 2),
        mix(3, 4, 3, 1),
        mix(3, 4, 2, 3),
        set(3, 2),
        set(3, 3),
    ],
    steep: &[
        mix(1, 4, 0, 3),
        mix(1, 4, 2, 2),
        mix(3, 4, 1, 3),
        mix(3, 4, 3, 2),
        set(2, 3),
        set(3, 3),
    ],
    steep_and_shallow: &[
        mix(3, 4, 3, 1),
        mix(3, 4, 1, 3),
        mix(1, 4, 3, 0),
        mix(1, 4, 0, 3),
        mix(1, 3, 2, 2),
        set(3, 3),
        set(3, 2),
        set(2, 3),
    ],
    diagonal: &[mix(1, 2, 3, 2), mix(1, 2, 2, 3), set(3, 3)],
    // Round corner: 68/100 approximates 0.6848532563, flanked by
    // 9/100 (0.08677704501) on either side.
    corner: &[mix(68, 100, 3, 3), mix(9, 100, 3, 2), mix(9, 100, 2, 3)],
};

static SCALE_5X: ScaleRecipes = ScaleRecipes {
    scale: 5,
    shallow: &[
        mix(1, 4, 4, 0),
        mix(1, 4, 3, 2),
        mix(1, 4, 2, 4),
        mix(3, 4, 4, 1),
        mix(3, 4, 3, 3),
        set(4, 2),
        set(4, 3),
        set(4, 4),
        set(3, 4),
    ],
    steep: &[
        mix(1, 4, 0, 4),
        mix(1, 4, 2, 3),
        mix(1, 4, 4, 2),
        mix(3, 4, 1, 4),
        mix(3, 4, 3, 3),
        set(2, 4),
        set(3, 4),
        set(4, 4),
        set(4, 3),
    ],
    steep_and_shallow: &[
        mix(1, 4, 0, 4),
        mix(1, 4, 2, 3),
        mix(3, 4, 1, 4),
        mix(1, 4, 4, 0),
        mix(1, 4, 3, 2),
        mix(3, 4, 4, 1),
        set(2, 4),
        set(3, 4),
        set(4, 2),
        set(4, 3),
        set(4, 4),
        mix(2, 3, 3, 3),
    ],
    diagonal: &[
        mix(1, 8, 4, 2),
        mix(1, 8, 3, 3),
        mix(1, 8, 2, 4),
        mix(7, 8, 4, 3),
        mix(7, 8, 3, 4),
        set(4, 4),
    ],
    // Round corner: 86/100 approximates 0.8631434088, flanked by
    // 23/100 (0.2306749731); the next pair out (~0.008) is negligible.
    corner: &[mix(86, 100, 4, 4), mix(23, 100, 4, 3), mix(23, 100, 3, 4)],
};

/// Weighted blend of `num/den` of `color` into `dest`, channel by channel.
///
/// Each color channel is mixed in place behind its mask with integer
/// arithmetic (`(color*n + dest*(m-n)) / m`, truncating); the alpha bits
/// pass through from the destination untouched.
fn alpha_blend(dest: u32, color: u32, num: u32, den: u32, layout: ChannelLayout) -> u32 {
    let blend_channel = |mask: u32| -> u32 {
        let dest_chan = u64::from(dest & mask);
        let color_chan = u64::from(color & mask);
        let mixed = (color_chan * u64::from(num) + dest_chan * u64::from(den - num))
            / u64::from(den);
        (mixed as u32) & mask
    };

    blend_channel(layout.red_mask())
        | blend_channel(layout.green_mask())
        | blend_channel(layout.blue_mask())
        | (dest & layout.alpha_mask())
}
