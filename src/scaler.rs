//! The scaling engine.
//!
//! One [`Scaler`] holds a validated scale factor and configuration and can
//! scale any number of images or row slices. Scaling walks the source once
//! per row range:
//!
//! 1. For every pixel, classify the corner below-right of it from a 4x4
//!    neighborhood (does an edge cross it, and how strongly).
//! 2. Assemble the pixel's four corner classifications; they become fully
//!    known one row late, so partially-known corners ride in a small
//!    per-column carry buffer.
//! 3. Fill the pixel's scale x scale output block with a flat copy, then -
//!    if any corner blends - refine the block once per rotation through the
//!    blend recipes.
//!
//! A `Scaler` is immutable and keeps no per-call state; disjoint row ranges
//! of the same image may be scaled concurrently, each call into its own
//! target slice.

use crate::blend::{BlendInfo, BlendType, CornerBlend};
use crate::color::ColorDistance;
use crate::config::ScalerConfig;
use crate::error::ScaleError;
use crate::kernel::{Kernel3x3, Kernel4x4};
use crate::matrix::OutputMatrix;
use crate::recipes::{BlendPattern, ScaleRecipes};
use crate::rotation::{tables, RotationDegree};

/// Weight of the direct pixel pair relative to the four supporting diagonal
/// pairs when measuring gradient strength across a corner.
const DIRECT_PAIR_WEIGHT: f64 = 4.0;

/// Rule-based pixel art upscaler for one fixed integer factor.
///
/// # Example
///
/// ```
/// use xbrz::{Scaler, ScalerConfig};
///
/// let scaler = Scaler::new(2, ScalerConfig::default()).unwrap();
/// let src = vec![0xff00_0000u32; 9]; // 3x3 opaque black
/// let mut dst = vec![0u32; 36];
/// scaler.scale_image(&src, 3, 3, &mut dst).unwrap();
/// assert!(dst.iter().all(|&p| p == 0xff00_0000));
/// ```
#[derive(Debug)]
pub struct Scaler {
    cfg: ScalerConfig,
    dist: ColorDistance,
    recipes: &'static ScaleRecipes,
}

impl Scaler {
    /// Create a scaler for `factor` in 2..=5.
    ///
    /// Fails fast on an unsupported factor, a non-positive threshold, or a
    /// platform whose integer byte order does not match the packed pixel
    /// layout (big-endian targets are rejected rather than risking silently
    /// corrupted output).
    pub fn new(factor: usize, cfg: ScalerConfig) -> Result<Self, ScaleError> {
        if cfg!(target_endian = "big") {
            return Err(ScaleError::UnsupportedPlatform);
        }
        cfg.validate()?;
        let recipes =
            ScaleRecipes::for_factor(factor).ok_or(ScaleError::InvalidScaleFactor(factor))?;
        Ok(Self { cfg, dist: ColorDistance::new(&cfg), recipes })
    }

    /// The scale factor this instance applies.
    pub fn factor(&self) -> usize {
        self.recipes.scale
    }

    /// Scale a whole image.
    ///
    /// `src` holds `width * height` packed pixels, row-major; `dst` must
    /// hold `factor^2 * width * height` pixels and is fully overwritten.
    pub fn scale_image(
        &self,
        src: &[u32],
        width: usize,
        height: usize,
        dst: &mut [u32],
    ) -> Result<(), ScaleError> {
        self.scale_rows(src, width, height, dst, 0, height)
    }

    /// Scale the source rows `[y_first, y_last)` only.
    ///
    /// The range is clamped to `[0, height]`; after clamping it must be
    /// non-empty. `dst` receives output rows `[factor * y_first,
    /// factor * y_last)` - it is the slice for exactly this range and must
    /// hold `factor^2 * width * (y_last - y_first)` pixels.
    ///
    /// Disjoint ranges of the same source may be scaled concurrently into
    /// disjoint target slices; each call keeps all mutable state (kernels,
    /// carry buffer) local. The first row of a range re-derives its top
    /// corners from the row above, so very thin slices do redundant work.
    pub fn scale_rows(
        &self,
        src: &[u32],
        width: usize,
        height: usize,
        dst: &mut [u32],
        y_first: usize,
        y_last: usize,
    ) -> Result<(), ScaleError> {
        if width == 0 || height == 0 {
            return Err(ScaleError::InvalidDimensions { width, height });
        }
        if src.len() < width * height {
            return Err(ScaleError::SourceBufferTooSmall {
                len: src.len(),
                required: width * height,
            });
        }

        let y_first = y_first.min(height);
        let y_last = y_last.min(height);
        if y_first >= y_last {
            return Err(ScaleError::EmptyRowRange { y_first, y_last });
        }

        let factor = self.factor();
        let trg_width = width * factor;
        let required = factor * factor * width * (y_last - y_first);
        if dst.len() < required {
            return Err(ScaleError::TargetBufferTooSmall { len: dst.len(), required });
        }

        // Partially-known blend corners, one packed byte per source column,
        // carried from each row to the next.
        let mut carry = vec![0u8; width];

        // A range not starting at the image top must re-derive the corners
        // its first row shares with the row above. The carry buffer cannot
        // be handed over from a neighboring range without racing it.
        if y_first > 0 {
            let y = y_first - 1;
            for x in 0..width {
                let ker4 = Kernel4x4::read(src, width, height, x, y);
                let res = self.preprocess_corners(&ker4);
                carry[x] = BlendInfo::unpack(carry[x]).with_top_right(res.j).pack();
                if x + 1 < width {
                    carry[x + 1] = BlendInfo::unpack(carry[x + 1]).with_top_left(res.k).pack();
                }
            }
        }

        let mut out = OutputMatrix::new(factor, dst, trg_width);

        for y in y_first..y_last {
            let mut trgi = factor * (y - y_first) * trg_width;
            // First known corner of the pixel below, built up as the row
            // advances.
            let mut blend_below = BlendInfo::default();

            for x in 0..width {
                // Evaluate the corner on the bottom-right of (x, y).
                let ker4 = Kernel4x4::read(src, width, height, x, y);
                let res = self.preprocess_corners(&ker4);

                // All four corners of (x, y) are known at this point due to
                // the processing sequence.
                let blend_xy = BlendInfo::unpack(carry[x]).with_bottom_right(res.f);

                // Second known corner for (x, y + 1); store on the current
                // buffer position for use on the next row.
                blend_below = blend_below.with_top_right(res.j);
                carry[x] = blend_below.pack();

                // First known corner for (x + 1, y + 1), buffered for the
                // next column.
                blend_below = BlendInfo::default().with_top_left(res.k);

                if x + 1 < width {
                    // Third known corner for (x + 1, y).
                    carry[x + 1] =
                        BlendInfo::unpack(carry[x + 1]).with_bottom_left(res.g).pack();
                }

                // Nearest-neighbor baseline; blending refines it below.
                out.fill_block(trgi, src[y * width + x]);

                if blend_xy.any_set() {
                    let ker3 = Kernel3x3::read(src, width, height, x, y);
                    for deg in RotationDegree::ALL {
                        self.scale_pixel(deg, &ker3, &mut out, trgi, blend_xy);
                    }
                }

                trgi += factor;
            }
        }

        Ok(())
    }

    /// Classify the corner between the center 2x2 block (F, G, J, K) of a
    /// 4x4 neighborhood.
    ///
    /// Measures edge strength along both diagonals of the corner; the
    /// weaker sum marks the pixel pair the edge runs along. Equal sums mean
    /// the direction is ambiguous and nothing blends.
    fn preprocess_corners(&self, ker: &Kernel4x4) -> CornerBlend {
        let mut result = CornerBlend::default();

        // Flat corner: either pixel pair equal along an axis.
        if (ker.f == ker.g && ker.j == ker.k) || (ker.f == ker.j && ker.g == ker.k) {
            return result;
        }

        let dist = &self.dist;
        let jg = dist.dist(ker.i, ker.f)
            + dist.dist(ker.f, ker.c)
            + dist.dist(ker.n, ker.k)
            + dist.dist(ker.k, ker.h)
            + DIRECT_PAIR_WEIGHT * dist.dist(ker.j, ker.g);
        let fk = dist.dist(ker.e, ker.j)
            + dist.dist(ker.j, ker.o)
            + dist.dist(ker.b, ker.g)
            + dist.dist(ker.g, ker.l)
            + DIRECT_PAIR_WEIGHT * dist.dist(ker.f, ker.k);

        if jg < fk {
            // The edge runs along F/K; F and K are the blend candidates.
            let dominant = self.cfg.dominant_direction_threshold * jg < fk;
            let ty = if dominant { BlendType::Dominant } else { BlendType::Normal };
            if ker.f != ker.g && ker.f != ker.j {
                result.f = ty;
            }
            if ker.k != ker.j && ker.k != ker.g {
                result.k = ty;
            }
        } else if fk < jg {
            let dominant = self.cfg.dominant_direction_threshold * fk < jg;
            let ty = if dominant { BlendType::Dominant } else { BlendType::Normal };
            if ker.j != ker.f && ker.j != ker.k {
                result.j = ty;
            }
            if ker.g != ker.f && ker.g != ker.k {
                result.g = ty;
            }
        }

        result
    }

    /// Run one rotation of the blend decision for the pixel at the center
    /// of `ker`, painting into the block at `base`.
    fn scale_pixel(
        &self,
        deg: RotationDegree,
        ker: &Kernel3x3,
        out: &mut OutputMatrix<'_>,
        base: usize,
        blend_info: BlendInfo,
    ) {
        let blend = blend_info.rotate(deg);
        if blend.bottom_right == BlendType::None {
            return;
        }

        // Read the kernel through the rotation relabeling. The rotated
        // top-left position (a) is never consulted by the decision below,
        // so only b..i are fetched.
        let rot = tables();
        let at = |pos: usize| ker.at(rot.kernel_index(pos, deg));
        let b = at(1);
        let c = at(2);
        let d = at(3);
        let e = at(4);
        let f = at(5);
        let g = at(6);
        let h = at(7);
        let i = at(8);

        let dist = &self.dist;
        let eq = |p1: u32, p2: u32| dist.is_equal(p1, p2);

        let do_line_blend = if blend.bottom_right >= BlendType::Dominant {
            true
        } else if blend.top_right != BlendType::None && !eq(e, g) {
            // An adjacent rotation also blends; a full line here would
            // double-blend insular pixels. Equal colors keep the line so
            // 90 degree corners still blend both ways.
            false
        } else if blend.bottom_left != BlendType::None && !eq(e, c) {
            false
        } else if eq(g, h) && eq(h, i) && eq(i, f) && eq(f, c) && !eq(e, i) {
            // L-shape around the corner with a differing center: an
            // isolated single-pixel feature, corner rounding only.
            false
        } else {
            true
        };

        // Blend with whichever direct neighbor is perceptually closer.
        let color = if dist.dist(e, f) <= dist.dist(e, h) { f } else { h };

        let layout = self.cfg.channel_layout;
        if !do_line_blend {
            self.recipes.apply(BlendPattern::Corner, out, deg, base, color, layout);
            return;
        }

        let fg = dist.dist(f, g);
        let hc = dist.dist(h, c);

        let steep_threshold = self.cfg.steep_direction_threshold;
        let have_shallow_line = steep_threshold * fg <= hc && e != g && d != g;
        let have_steep_line = steep_threshold * hc <= fg && e != c && b != c;

        let pattern = match (have_shallow_line, have_steep_line) {
            (true, true) => BlendPattern::SteepAndShallow,
            (true, false) => BlendPattern::Shallow,
            (false, true) => BlendPattern::Steep,
            (false, false) => BlendPattern::Diagonal,
        };
        self.recipes.apply(pattern, out, deg, base, color, layout);
    }
}
