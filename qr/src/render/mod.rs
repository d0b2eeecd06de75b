//! Renderers turning a [`Symbol`](crate::Symbol) into output formats.
//!
//! | Format | Function | Notes |
//! |--------|----------|-------|
//! | RGBA pixels | [`image::render`] | margin, scale/width, colors |
//! | PNG | `png::render` | `png` feature |
//! | SVG | [`svg::render`] | one path of horizontal runs |
//! | Terminal | [`text::to_utf8`], [`text::to_ascii`] | Unicode blocks |

pub mod image;
#[cfg(feature = "png")]
pub mod png;
pub mod svg;
pub mod text;
