//! QR image rendering.
//!
//! Symbol encoding is delegated to the `qrcode` crate and raster output to
//! the `image` crate. Rendering is a pure function of `(text, options)`: the
//! same input always yields the same bytes.

mod options;
mod renderer;

pub use options::{QrColor, QrFormat, QrOptions};
pub use renderer::{QrRenderError, QrRenderer, render};
