//! Precomputed rotation tables.
//!
//! The scaling decision procedure is written once, for the bottom-right
//! corner, and reused for all four edge orientations by relabeling the 3x3
//! kernel positions through a 90 degree rotation. Output cells are likewise
//! addressed in the unrotated local frame and remapped into the actual
//! target block. Both mappings are pure lookup data, built once on first
//! use and read-only afterward - safe for concurrent access without
//! synchronization.

use std::sync::OnceLock;

/// Number of 90 degree rotations.
pub const MAX_ROTATIONS: usize = 4;
/// Number of positions in a 3x3 kernel.
pub const MAX_POSITIONS: usize = 9;
/// Highest supported scale factor.
pub const MAX_SCALE: usize = 5;
const MAX_SCALE_SQUARED: usize = MAX_SCALE * MAX_SCALE;

/// One of the four 90 degree rotations, clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotationDegree {
    R0,
    R90,
    R180,
    R270,
}

impl RotationDegree {
    /// All rotations in the fixed processing order.
    pub const ALL: [RotationDegree; 4] =
        [RotationDegree::R0, RotationDegree::R90, RotationDegree::R180, RotationDegree::R270];

    /// Number of clockwise quarter turns.
    pub const fn turns(self) -> usize {
        match self {
            RotationDegree::R0 => 0,
            RotationDegree::R90 => 1,
            RotationDegree::R180 => 2,
            RotationDegree::R270 => 3,
        }
    }
}

/// Build-once lookup tables shared by every scaler instance.
#[derive(Debug)]
pub struct RotationTables {
    /// `kernel[pos * MAX_ROTATIONS + rot]` is the unrotated 3x3 index that
    /// the rotated frame reads at position `pos` (a=0 .. i=8, row-major).
    kernel: [usize; MAX_ROTATIONS * MAX_POSITIONS],
    /// `(row, col)` in the unrotated output block for every
    /// (scale, rotation, row, col) of the rotated frame; indexed as in
    /// [`RotationTables::output_cell`]. Cells beyond a given scale's block
    /// are present (the stride is the maximum scale) but never consulted.
    matrix: [(u8, u8); (MAX_SCALE - 1) * MAX_ROTATIONS * MAX_SCALE_SQUARED],
}

impl RotationTables {
    /// Unrotated 3x3 kernel index read at `pos` under `deg`.
    pub fn kernel_index(&self, pos: usize, deg: RotationDegree) -> usize {
        self.kernel[pos * MAX_ROTATIONS + deg.turns()]
    }

    /// Unrotated output-block cell for `(row, col)` of the rotated frame at
    /// the given scale.
    pub fn output_cell(&self, scale: usize, deg: RotationDegree, row: usize, col: usize) -> (usize, usize) {
        let base = (scale - 2) * MAX_ROTATIONS * MAX_SCALE_SQUARED + deg.turns() * MAX_SCALE_SQUARED;
        let (r, c) = self.matrix[base + row * MAX_SCALE + col];
        (r as usize, c as usize)
    }
}

/// The process-wide tables, built on first access.
pub fn tables() -> &'static RotationTables {
    static TABLES: OnceLock<RotationTables> = OnceLock::new();
    TABLES.get_or_init(build_tables)
}

fn build_tables() -> RotationTables {
    RotationTables { kernel: build_kernel_table(), matrix: build_matrix_table() }
}

/// Cache the four rotations of the 9 kernel positions:
///
/// ```text
/// a b c      0 1 2
/// d e f  ->  3 4 5
/// g h i      6 7 8
/// ```
fn build_kernel_table() -> [usize; MAX_ROTATIONS * MAX_POSITIONS] {
    let mut table = [0usize; MAX_ROTATIONS * MAX_POSITIONS];
    let mut rotation: [usize; MAX_POSITIONS] = [0, 1, 2, 3, 4, 5, 6, 7, 8];
    for rot in 0..MAX_ROTATIONS {
        for pos in 0..MAX_POSITIONS {
            table[pos * MAX_ROTATIONS + rot] = rotation[pos];
        }
        rotation = rotate_clockwise(rotation);
    }
    table
}

/// Rotate a 3x3 index grid one quarter turn clockwise.
fn rotate_clockwise(square: [usize; MAX_POSITIONS]) -> [usize; MAX_POSITIONS] {
    let size = 3;
    let mut result = [0usize; MAX_POSITIONS];
    for i in 0..size {
        for j in 0..size {
            result[i * size + j] = square[(size - j - 1) * size + i];
        }
    }
    result
}

fn build_matrix_table() -> [(u8, u8); (MAX_SCALE - 1) * MAX_ROTATIONS * MAX_SCALE_SQUARED] {
    let mut table = [(0u8, 0u8); (MAX_SCALE - 1) * MAX_ROTATIONS * MAX_SCALE_SQUARED];
    for scale in 2..=MAX_SCALE {
        for rot in 0..MAX_ROTATIONS {
            let base = (scale - 2) * MAX_ROTATIONS * MAX_SCALE_SQUARED + rot * MAX_SCALE_SQUARED;
            for row in 0..MAX_SCALE {
                for col in 0..MAX_SCALE {
                    table[base + row * MAX_SCALE + col] = unrotated_cell(rot, row, col, scale);
                }
            }
        }
    }
    table
}

/// Coordinates a rotated output cell had before rotation, by unwinding one
/// quarter turn at a time.
fn unrotated_cell(rot: usize, row: usize, col: usize, scale: usize) -> (u8, u8) {
    let (mut r, mut c) = (row, col);
    for _ in 0..rot {
        let (prev_r, prev_c) = (r, c);
        // Out-of-block cells (col >= scale) are never consulted; compute them
        // with wrapping so debug builds match release instead of panicking on
        // the underflow. Every consulted cell has prev_c < scale, so this is
        // identical to `scale - 1 - prev_c` for all values that are read.
        r = (scale - 1).wrapping_sub(prev_c);
        c = prev_r;
    }
    (r as u8, c as u8)
}
