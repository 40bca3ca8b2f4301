//! Perceptual color distance.
//!
//! Edge classification needs a notion of "how different do two colors look",
//! not raw RGB deltas. The metric here decomposes the per-channel
//! differences into an analog YCbCr triple using ITU-R BT.709 weights and
//! returns the squared vector length. Because YCbCr conversion is a linear
//! transform, the channel subtraction happens *before* the transform - one
//! matrix multiply on the differences instead of two on the colors.
//!
//! The square root is never taken: callers compare squared distances, and
//! the equality tolerance is squared once at construction to match.

use crate::config::ScalerConfig;
use crate::pixel::ChannelLayout;

// ITU-R BT.709 luma coefficients.
const K_B: f64 = 0.0722;
const K_R: f64 = 0.2126;
const K_G: f64 = 1.0 - K_B - K_R;

const SCALE_B: f64 = 0.5 / (1.0 - K_B);
const SCALE_R: f64 = 0.5 / (1.0 - K_R);

/// Perceptual distance between packed pixels.
///
/// Construction captures the luminance weight, squared equality tolerance
/// and channel layout from a [`ScalerConfig`]; the struct is then immutable
/// and cheap to share.
#[derive(Debug, Clone, Copy)]
pub struct ColorDistance {
    luminance_weight: f64,
    tolerance_squared: f64,
    layout: ChannelLayout,
}

impl ColorDistance {
    /// Capture the distance parameters from a config.
    pub fn new(cfg: &ScalerConfig) -> Self {
        Self {
            luminance_weight: cfg.luminance_weight,
            tolerance_squared: cfg.equal_color_tolerance * cfg.equal_color_tolerance,
            layout: cfg.channel_layout,
        }
    }

    /// Squared perceptual distance between two packed pixels.
    ///
    /// Zero for identical values, symmetric in its arguments, always
    /// non-negative. The division by 255 common to YCbCr formulations is
    /// skipped throughout; the equality tolerance is calibrated to the
    /// undivided scale.
    pub fn dist(&self, pix1: u32, pix2: u32) -> f64 {
        if pix1 == pix2 {
            return 0.0;
        }

        let l = self.layout;
        let r_diff = f64::from(l.red(pix1)) - f64::from(l.red(pix2));
        let g_diff = f64::from(l.green(pix1)) - f64::from(l.green(pix2));
        let b_diff = f64::from(l.blue(pix1)) - f64::from(l.blue(pix2));

        let y = K_R * r_diff + K_G * g_diff + K_B * b_diff;
        let c_b = SCALE_B * (b_diff - y);
        let c_r = SCALE_R * (r_diff - y);

        let y_weighted = self.luminance_weight * y;
        y_weighted * y_weighted + c_b * c_b + c_r * c_r
    }

    /// Whether two pixels are perceptually equal under the configured
    /// tolerance.
    pub fn is_equal(&self, pix1: u32, pix2: u32) -> bool {
        self.dist(pix1, pix2) < self.tolerance_squared
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dist_default() -> ColorDistance {
        ColorDistance::new(&ScalerConfig::default())
    }

    fn argb(r: u8, g: u8, b: u8) -> u32 {
        ChannelLayout::Argb.pack(r, g, b, 0xff)
    }

    #[test]
    fn test_distance_to_self_is_zero() {
        let d = dist_default();
        for p in [0u32, argb(255, 255, 255), argb(12, 200, 99), 0xdead_beef] {
            assert_eq!(d.dist(p, p), 0.0);
        }
    }

    #[test]
    fn test_distance_is_symmetric() {
        let d = dist_default();
        let pairs = [
            (argb(0, 0, 0), argb(255, 255, 255)),
            (argb(10, 20, 30), argb(30, 20, 10)),
            (argb(200, 0, 0), argb(0, 0, 200)),
        ];
        for (p1, p2) in pairs {
            assert_eq!(d.dist(p1, p2), d.dist(p2, p1));
        }
    }

    #[test]
    fn test_distance_is_non_negative() {
        let d = dist_default();
        let colors = [argb(0, 0, 0), argb(1, 2, 3), argb(128, 128, 128), argb(255, 0, 255)];
        for &p1 in &colors {
            for &p2 in &colors {
                assert!(d.dist(p1, p2) >= 0.0);
            }
        }
    }

    #[test]
    fn test_luma_difference_dominates_with_high_weight() {
        let base = ScalerConfig::default();
        let heavy = ScalerConfig { luminance_weight: 4.0, ..base };
        let d_base = ColorDistance::new(&base);
        let d_heavy = ColorDistance::new(&heavy);

        // Pure brightness step: weighting the luma must grow the distance.
        let dark = argb(50, 50, 50);
        let light = argb(80, 80, 80);
        assert!(d_heavy.dist(dark, light) > d_base.dist(dark, light));
    }

    #[test]
    fn test_equality_respects_tolerance() {
        let tight = ColorDistance::new(&ScalerConfig {
            equal_color_tolerance: 1.0,
            ..Default::default()
        });
        let loose = ColorDistance::new(&ScalerConfig {
            equal_color_tolerance: 100.0,
            ..Default::default()
        });

        let a = argb(100, 100, 100);
        let b = argb(110, 100, 95);
        assert!(!tight.is_equal(a, b));
        assert!(loose.is_equal(a, b));
    }

    #[test]
    fn test_black_white_far_apart() {
        let d = dist_default();
        assert!(!d.is_equal(argb(0, 0, 0), argb(255, 255, 255)));
        // Undivided luma scale: a full black-to-white step squares to 255^2.
        assert!(d.dist(argb(0, 0, 0), argb(255, 255, 255)) >= 255.0 * 255.0);
    }

    #[test]
    fn test_rgba_layout_reads_same_channels() {
        let cfg_argb = ScalerConfig::default();
        let cfg_rgba = ScalerConfig::with_layout(ChannelLayout::Rgba);
        let d_argb = ColorDistance::new(&cfg_argb);
        let d_rgba = ColorDistance::new(&cfg_rgba);

        let a = (12u8, 99u8, 200u8);
        let b = (80u8, 20u8, 140u8);
        let argb_pair = (
            ChannelLayout::Argb.pack(a.0, a.1, a.2, 0xff),
            ChannelLayout::Argb.pack(b.0, b.1, b.2, 0xff),
        );
        let rgba_pair = (
            ChannelLayout::Rgba.pack(a.0, a.1, a.2, 0xff),
            ChannelLayout::Rgba.pack(b.0, b.1, b.2, 0xff),
        );
        assert_eq!(d_argb.dist(argb_pair.0, argb_pair.1), d_rgba.dist(rgba_pair.0, rgba_pair.1));
    }
}
