//! xBRZ - "scale by rules" pixel art upscaling filter.
//!
//! Scales an image by an integer factor of 2 to 5, smoothing diagonal edges
//! through a rule-based analysis of each pixel's local neighborhood instead
//! of replicating or linearly interpolating pixels. Hand-drawn pixel art
//! geometry (emulators, retro-game rendering) survives the enlargement.
//!
//! # Module Structure
//!
//! - [`scaler`] - The engine: corner classification, rotation passes, row driver
//! - [`recipes`] - Per-scale weighted blend tables for each edge pattern
//! - [`rotation`] - Precomputed kernel/output-block rotation tables
//! - [`color`] - Perceptual (analog YCbCr) color distance
//! - [`blend`], [`kernel`], [`matrix`] - Blend info, neighborhoods, block addressing
//! - [`convert`] - `image::RgbaImage` interop for the packed pixel buffers
//! - [`parallel`] - Rayon-based scaling over disjoint row bands
//!
//! # Quick start
//!
//! ```
//! use image::RgbaImage;
//! use xbrz::{scale_image, ScalerConfig};
//!
//! let sprite = RgbaImage::from_pixel(8, 8, image::Rgba([200, 40, 40, 255]));
//! let scaled = scale_image(&sprite, 4, &ScalerConfig::default()).unwrap();
//! assert_eq!(scaled.dimensions(), (32, 32));
//! ```
//!
//! For packed buffers (`&[u32]`, one pixel per element) use [`Scaler`]
//! directly; for multi-core scaling see [`parallel::scale_parallel`].

pub mod blend;
pub mod cli;
pub mod color;
pub mod config;
pub mod convert;
pub mod error;
pub mod kernel;
pub mod matrix;
pub mod parallel;
pub mod pixel;
pub mod recipes;
pub mod rotation;
pub mod scaler;

pub use config::ScalerConfig;
pub use convert::scale_image;
pub use error::ScaleError;
pub use pixel::ChannelLayout;
pub use scaler::Scaler;
