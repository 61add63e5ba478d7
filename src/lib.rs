//! Strip near-uniform image borders while preserving same-colored interiors.
//!
//! The edge color is estimated from four edge strips, every pixel within a
//! Euclidean RGB distance of it is marked background-like, and the
//! background-like components reachable from the image boundary are labeled
//! with a 4-connected flood fill. Only components whose bounding box is thin
//! in at least one axis are made transparent, so a white route line or sun
//! disc touching the border survives while a thin frame sliver does not.
//!
//! # Quick Start
//!
//! ```no_run
//! use borderless::{BorderEngine, BorderOptions};
//!
//! let engine = BorderEngine::new(BorderOptions::default()).expect("valid options");
//! let img = image::open("map.png").unwrap().to_rgba8();
//! let (out, report) = engine.process(img);
//! println!("cleared {} pixels", report.cleared_pixels);
//! out.save("map_clean.png").unwrap();
//! ```
//!
//! The crate also ships the two companion operations used around it: trimming
//! transparent margins with an aspect-preserving resize ([`fit`]) and
//! centering an icon on a solid square canvas ([`icon`]).

#![deny(missing_docs)]

pub mod background;
pub mod codec;
pub mod composite;
pub mod crop;
mod engine;
pub mod error;
pub mod fit;
pub mod icon;
#[cfg(feature = "cli")]
pub mod logging;
pub mod regions;

pub use crop::Bounds;
pub use engine::{BorderEngine, BorderOptions, RemovalReport};
pub use error::{Error, Result};
