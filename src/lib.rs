//! # qrcraft
//!
//! A Rust library for encoding text into QR code (model 2) module matrices with Reed-Solomon
//! error correction.
//!
//! ## Features
//!
//! - **Mode selection**: Numeric, Alphanumeric and Byte are picked automatically, Kanji on request
//! - **Version selection**: Smallest of the 40 versions that fits the payload at the requested
//!   error correction level
//! - **Reed-Solomon Error Correction**: Block splitting and interleaving for levels L, M, Q and H
//! - **Masking**: All eight mask patterns are scored and the lowest penalty wins
//!
//! ## Quick Start
//!
//! ```rust
//! use qrcraft::{encode, ECLevel};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let matrix = encode("HELLO WORLD", ECLevel::M, 4)?;
//! assert_eq!(matrix.size(), 29);
//!
//! for y in 0..matrix.size() {
//!     let line: String =
//!         (0..matrix.size()).map(|x| if matrix.dark_at(x, y) { '#' } else { ' ' }).collect();
//!     println!("{line}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ### Full Configuration
//!
//! ```rust
//! use qrcraft::{ECLevel, MaskPattern, Mode, QRBuilder, Version};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let matrix = QRBuilder::new("点茗")
//!     .version(Version::new(2)?)      // Smallest fitting version if not provided
//!     .ec_level(ECLevel::H)           // Defaults to ECLevel::M
//!     .mode(Mode::Kanji)              // Most compact of Numeric, Alphanumeric & Byte otherwise
//!     .mask(MaskPattern::new(3)?)     // Lowest penalty mask if not provided
//!     .margin(2)                      // Defaults to 4
//!     .build()?;
//!
//! assert_eq!(*matrix.version(), 2);
//! assert_eq!(*matrix.mask(), 3);
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Correction Levels
//! - **L (Low)**: ~7% error correction
//! - **M (Medium)**: ~15% error correction
//! - **Q (Quartile)**: ~25% error correction
//! - **H (High)**: ~30% error correction

#![allow(clippy::items_after_test_module)]

pub mod builder;
pub(crate) mod common;
mod matrix;

pub use builder::{error_correction_capacity, QRBuilder};
pub use common::codec::Mode;
pub use common::error::{QRError, QRResult};
pub use common::mask::MaskPattern;
pub use common::metadata::{ECLevel, Version};
pub use matrix::Matrix;

/// Encodes `content` at the given error correction level with automatic mode, version and
/// mask selection, surrounded by `margin` light modules on every side.
pub fn encode(content: &str, ec_level: ECLevel, margin: usize) -> QRResult<Matrix> {
    QRBuilder::new(content).ec_level(ec_level).margin(margin).build()
}
