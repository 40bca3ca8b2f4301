//! Multi-threaded scaling over disjoint row bands.
//!
//! The engine's concurrency contract: disjoint `[y_first, y_last)` ranges
//! of the same source may be scaled at the same time, as long as every call
//! owns its own mutable state and target slice. This module packages that
//! contract with rayon - the target buffer is split into per-band slices
//! up front, so overlapping writes are impossible by construction, and each
//! band runs through the shared (immutable) [`Scaler`].

use rayon::prelude::*;

use crate::error::ScaleError;
use crate::scaler::Scaler;

/// Scale a whole image across the rayon thread pool.
///
/// Splits the source rows into one band per available thread (at least two
/// rows per band - thinner bands spend more time re-deriving shared corner
/// rows than scaling) and composes the result into `dst`. Produces output
/// identical to [`Scaler::scale_image`].
pub fn scale_parallel(
    scaler: &Scaler,
    src: &[u32],
    width: usize,
    height: usize,
    dst: &mut [u32],
) -> Result<(), ScaleError> {
    if width == 0 || height == 0 {
        return Err(ScaleError::InvalidDimensions { width, height });
    }
    if src.len() < width * height {
        return Err(ScaleError::SourceBufferTooSmall { len: src.len(), required: width * height });
    }
    let factor = scaler.factor();
    let required = factor * factor * width * height;
    if dst.len() < required {
        return Err(ScaleError::TargetBufferTooSmall { len: dst.len(), required });
    }

    let bands = rayon::current_num_threads().max(1);
    let rows_per_band = (height / bands).max(2);
    let band_len = rows_per_band * factor * width * factor;

    // Trailing pixels beyond `required` (if the caller over-allocated) must
    // not reach the last band's scale call.
    dst[..required]
        .par_chunks_mut(band_len)
        .enumerate()
        .try_for_each(|(index, band)| {
            let y_first = index * rows_per_band;
            let y_last = (y_first + rows_per_band).min(height);
            scaler.scale_rows(src, width, height, band, y_first, y_last)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScalerConfig;

    const BLACK: u32 = 0xff00_0000;
    const WHITE: u32 = 0xffff_ffff;

    fn checker_stairs(n: usize) -> Vec<u32> {
        let mut src = vec![BLACK; n * n];
        for y in 0..n {
            for x in 0..n {
                if (x * 2 + y) % 5 < 2 {
                    src[y * n + x] = WHITE;
                }
            }
        }
        src
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let n = 16;
        let src = checker_stairs(n);
        for factor in 2..=5 {
            let scaler = Scaler::new(factor, ScalerConfig::default()).unwrap();
            let mut sequential = vec![0u32; n * n * factor * factor];
            scaler.scale_image(&src, n, n, &mut sequential).unwrap();

            let mut parallel = vec![0u32; n * n * factor * factor];
            scale_parallel(&scaler, &src, n, n, &mut parallel).unwrap();

            assert_eq!(sequential, parallel, "parallel output must be identical at {}x", factor);
        }
    }

    #[test]
    fn test_parallel_small_image() {
        // Fewer rows than threads: bands degenerate gracefully.
        let src = vec![WHITE, BLACK, BLACK, WHITE];
        let scaler = Scaler::new(3, ScalerConfig::default()).unwrap();
        let mut sequential = vec![0u32; 4 * 9];
        scaler.scale_image(&src, 2, 2, &mut sequential).unwrap();
        let mut parallel = vec![0u32; 4 * 9];
        scale_parallel(&scaler, &src, 2, 2, &mut parallel).unwrap();
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_parallel_validates_target() {
        let src = vec![BLACK; 4];
        let scaler = Scaler::new(2, ScalerConfig::default()).unwrap();
        let mut dst = vec![0u32; 15];
        assert_eq!(
            scale_parallel(&scaler, &src, 2, 2, &mut dst).unwrap_err(),
            ScaleError::TargetBufferTooSmall { len: 15, required: 16 }
        );
    }
}
