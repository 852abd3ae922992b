//! # qrforge
//!
//! A Rust library for generating QR codes with Reed-Solomon error correction.
//! Encodes numeric, alphanumeric, byte and ECI segments, searches for the
//! smallest version that fits the data, and picks the mask with the lowest
//! penalty score.
//!
//! ## Features
//!
//! - **Segment encoding**: Numeric, alphanumeric, byte and ECI modes with automatic mode selection
//! - **Version search**: Finds the smallest version fitting the data within a configurable range
//! - **Error correction boosting**: Upgrades the EC level whenever the chosen version has slack
//! - **Reed-Solomon error correction**: Configurable levels (L, M, Q, H) with block interleaving
//! - **Masking**: All eight mask patterns scored by the four penalty rules
//! - **Rendering**: String, SVG and grayscale image output
//!
//! ## Quick Start
//!
//! ### Simple QR Code Generation
//!
//! ```rust
//! use qrforge::QRBuilder;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Simplest usage - provide only data, all other settings are automatically chosen
//! let qr = QRBuilder::new(b"Hello, World!").build()?;
//!
//! println!("{}", qr.to_str(1));
//! # Ok(())
//! # }
//! ```
//!
//! ### Full Configuration
//!
//! ```rust
//! use qrforge::{ECLevel, MaskPattern, QRBuilder, Version};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let data = "Hello, World!";
//! let qr = QRBuilder::new(data.as_bytes())
//!     .version(Version::new(2)?)  // If not provided, finds the smallest version to fit the data
//!     .ec_level(ECLevel::M)       // If not provided, defaults to ECLevel::M
//!     .mask(MaskPattern::new(3)?) // If not provided, finds the best mask based on penalty score
//!     .boost_ecl(false)           // If not provided, the EC level is upgraded when there is slack
//!     .build()?;
//!
//! let img = qr.to_image(4, 4);
//! assert_eq!(img.dimensions(), (132, 132));
//! # Ok(())
//! # }
//! ```
//!
//! ### Explicit Segments
//!
//! ```rust
//! use qrforge::{ECLevel, QRBuilder, Segment};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // An ECI header switches the decoder to Latin-1 before the byte segment
//! let segments = vec![Segment::eci(3)?, Segment::bytes(b"caf\xE9")];
//! let qr = QRBuilder::new(b"").segments(segments).ec_level(ECLevel::Q).build()?;
//! assert_eq!(*qr.version(), 1);
//! # Ok(())
//! # }
//! ```
//!
//! ## QR Code Components
//!
//! ### Versions
//! - Versions 1-40, with sizes from 21x21 to 177x177 modules
//!
//! ### Error Correction Levels
//! - **L (Low)**: ~7% error correction
//! - **M (Medium)**: ~15% error correction
//! - **Q (Quartile)**: ~25% error correction
//! - **H (High)**: ~30% error correction

#![allow(clippy::items_after_test_module)]

pub mod builder;
pub(crate) mod common;
mod render;

pub use builder::{Module, QRBuilder, QR};
pub use common::bit_utils::BitStream;
pub use common::codec::{Mode, Segment};
pub use common::error::{QRError, QRResult};
pub use common::mask::MaskPattern;
pub use common::metadata::{Color, ECLevel, Version};
