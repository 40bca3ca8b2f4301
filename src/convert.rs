//! Conversions between `image` buffers and packed pixel buffers.
//!
//! The engine works on flat `u32` buffers in a configurable channel layout;
//! everything at the crate boundary speaks `image::RgbaImage`. Conversion
//! is explicit shift/mask packing per pixel - no byte-level
//! reinterpretation of the buffers.

use image::{Rgba, RgbaImage};

use crate::config::ScalerConfig;
use crate::error::ScaleError;
use crate::pixel::ChannelLayout;
use crate::scaler::Scaler;

/// Pack an RGBA image into a flat buffer of packed pixels.
pub fn pack_image(img: &RgbaImage, layout: ChannelLayout) -> Vec<u32> {
    img.pixels().map(|Rgba([r, g, b, a])| layout.pack(*r, *g, *b, *a)).collect()
}

/// Unpack a flat buffer of packed pixels into an RGBA image.
///
/// The buffer must hold exactly `width * height` pixels.
pub fn unpack_image(
    pixels: &[u32],
    width: u32,
    height: u32,
    layout: ChannelLayout,
) -> Result<RgbaImage, ScaleError> {
    let required = width as usize * height as usize;
    if pixels.len() < required {
        return Err(ScaleError::SourceBufferTooSmall { len: pixels.len(), required });
    }
    let mut img = RgbaImage::new(width, height);
    for (pixel, &packed) in img.pixels_mut().zip(pixels) {
        *pixel = Rgba([
            layout.red(packed),
            layout.green(packed),
            layout.blue(packed),
            layout.alpha(packed),
        ]);
    }
    Ok(img)
}

/// Scale an RGBA image: pack, run the engine, unpack.
///
/// # Example
///
/// ```
/// use image::RgbaImage;
/// use xbrz::{scale_image, ScalerConfig};
///
/// let img = RgbaImage::from_pixel(4, 4, image::Rgba([10, 20, 30, 255]));
/// let scaled = scale_image(&img, 3, &ScalerConfig::default()).unwrap();
/// assert_eq!(scaled.dimensions(), (12, 12));
/// ```
pub fn scale_image(
    img: &RgbaImage,
    factor: usize,
    cfg: &ScalerConfig,
) -> Result<RgbaImage, ScaleError> {
    let scaler = Scaler::new(factor, *cfg)?;
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return Err(ScaleError::InvalidDimensions {
            width: width as usize,
            height: height as usize,
        });
    }

    let src = pack_image(img, cfg.channel_layout);
    let mut dst = vec![0u32; src.len() * factor * factor];
    scaler.scale_image(&src, width as usize, height as usize, &mut dst)?;
    unpack_image(&dst, width * factor as u32, height * factor as u32, cfg.channel_layout)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_image() -> RgbaImage {
        let mut img = RgbaImage::new(3, 2);
        for (i, pixel) in img.pixels_mut().enumerate() {
            let v = (i * 40) as u8;
            *pixel = Rgba([v, v.wrapping_add(1), v.wrapping_add(2), 255 - v]);
        }
        img
    }

    #[test]
    fn test_pack_unpack_roundtrip_both_layouts() {
        let img = test_image();
        for layout in [ChannelLayout::Argb, ChannelLayout::Rgba] {
            let packed = pack_image(&img, layout);
            let back = unpack_image(&packed, 3, 2, layout).unwrap();
            assert_eq!(img, back);
        }
    }

    #[test]
    fn test_pack_argb_bit_positions() {
        let img = RgbaImage::from_pixel(1, 1, Rgba([0x11, 0x22, 0x33, 0x44]));
        let packed = pack_image(&img, ChannelLayout::Argb);
        assert_eq!(packed, vec![0x4411_2233]);
        let packed = pack_image(&img, ChannelLayout::Rgba);
        assert_eq!(packed, vec![0x1122_3344]);
    }

    #[test]
    fn test_unpack_rejects_short_buffer() {
        let pixels = vec![0u32; 5];
        assert!(matches!(
            unpack_image(&pixels, 3, 2, ChannelLayout::Argb),
            Err(ScaleError::SourceBufferTooSmall { len: 5, required: 6 })
        ));
    }

    #[test]
    fn test_scale_image_dimensions() {
        let img = test_image();
        for factor in 2..=5 {
            let scaled = scale_image(&img, factor, &ScalerConfig::default()).unwrap();
            assert_eq!(scaled.dimensions(), (3 * factor as u32, 2 * factor as u32));
        }
    }

    #[test]
    fn test_scale_image_rejects_bad_factor() {
        let img = test_image();
        assert!(matches!(
            scale_image(&img, 6, &ScalerConfig::default()),
            Err(ScaleError::InvalidScaleFactor(6))
        ));
    }

    #[test]
    fn test_scale_image_uniform_color_preserved() {
        let img = RgbaImage::from_pixel(5, 5, Rgba([90, 140, 20, 255]));
        let scaled = scale_image(&img, 4, &ScalerConfig::default()).unwrap();
        assert!(scaled.pixels().all(|&p| p == Rgba([90, 140, 20, 255])));
    }
}
