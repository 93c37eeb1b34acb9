//! Recover a transparency channel for images rendered without one.
//!
//! Two pixel-level methods are provided:
//!
//! - **Chroma keying** ([`chroma_key`]) makes pixels close to a solid
//!   background color transparent, with a linear falloff band for
//!   anti-aliased edges. The background can be given explicitly or estimated
//!   from the image corners.
//! - **Difference matting** ([`difference_matte`]) compares the same content
//!   rendered over pure white and pure black to recover both alpha and the
//!   un-premultiplied foreground color.
//!
//! Both are pure functions over whole in-memory [`RasterImage`] buffers and
//! always return a freshly allocated image.
//!
//! # Quick Start
//!
//! ```no_run
//! use alpha_matte::{chroma_key, codec, BackgroundSpec};
//!
//! let img = codec::decode("logo.png".as_ref()).expect("failed to load");
//! let spec: BackgroundSpec = "auto".parse().unwrap();
//! let keyed = chroma_key(&img, &spec, 30).unwrap();
//! codec::encode(&keyed, "logo_transparent.png".as_ref()).unwrap();
//! ```
//!
//! # Difference matting
//!
//! ```no_run
//! use alpha_matte::{codec, difference_matte};
//!
//! let white = codec::decode("on_white.png".as_ref()).unwrap();
//! let black = codec::decode("on_black.png".as_ref()).unwrap();
//! let matte = difference_matte(&white, &black).unwrap();
//! codec::encode(&matte, "recovered.png".as_ref()).unwrap();
//! ```

#![deny(missing_docs)]

pub mod background;
pub mod chroma_key;
pub mod codec;
pub mod color;
pub mod difference;
mod engine;
pub mod error;
pub mod raster;

pub use background::estimate_background_color;
pub use chroma_key::{chroma_key, chroma_key_with, ToleranceBand, DEFAULT_TOLERANCE};
pub use color::{BackgroundSpec, Color};
pub use difference::difference_matte;
pub use engine::{
    default_output_path, is_supported_image, process_chroma_key_file, process_difference_files,
    process_directory, ProcessOptions, ProcessResult,
};
pub use error::{Error, Result};
pub use raster::RasterImage;
