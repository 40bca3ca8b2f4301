//! Output block addressing.
//!
//! Each source pixel maps to a scale x scale block in the target buffer.
//! Blend recipes address block cells in the unrotated local frame; the view
//! here remaps those coordinates through the rotation tables and resolves
//! them to a flat buffer index. Addressing state (rotation, block base) is
//! passed explicitly on every access - there is no movable cursor.

use crate::rotation::{tables, RotationDegree};

/// Mutable view of the target buffer, addressed block-by-block.
pub struct OutputMatrix<'a> {
    scale: usize,
    /// Target row pitch in pixels.
    width: usize,
    data: &'a mut [u32],
}

impl<'a> OutputMatrix<'a> {
    /// Wrap a target buffer with the given output row pitch.
    pub fn new(scale: usize, data: &'a mut [u32], width: usize) -> Self {
        Self { scale, width, data }
    }

    /// Mutable access to one block cell.
    ///
    /// `base` is the flat index of the block's top-left pixel; `(row, col)`
    /// address the cell in the unrotated frame and are remapped for `deg`.
    pub fn cell(&mut self, deg: RotationDegree, base: usize, row: usize, col: usize) -> &mut u32 {
        let (r, c) = tables().output_cell(self.scale, deg, row, col);
        &mut self.data[base + c + r * self.width]
    }

    /// Fill the whole block at `base` with one color (the nearest-neighbor
    /// baseline that blending later refines).
    pub fn fill_block(&mut self, base: usize, color: u32) {
        for row in 0..self.scale {
            let start = base + row * self.width;
            self.data[start..start + self.scale].fill(color);
        }
    }
}
