//! QR rendering on top of `qrcode` and `image`.

use base64::Engine as _;
use image::{ImageFormat, Rgba, RgbaImage, imageops};
use qrcode::QrCode;
use qrcode::render::svg;
use qrcode::types::QrError;
use std::io::Cursor;

use super::options::{QrColor, QrFormat, QrOptions};

/// Errors that can occur while rendering a QR code.
#[derive(Debug, thiserror::Error)]
pub enum QrRenderError {
    #[error("QR input must not be empty")]
    EmptyInput,

    #[error("Failed to encode QR symbol: {0}")]
    Encode(#[from] QrError),

    #[error("Failed to encode image: {0}")]
    Image(#[from] image::ImageError),

    #[error("Invalid colour '{0}', expected #RRGGBB or #RRGGBBAA")]
    InvalidColor(String),
}

/// Renders `text` as a QR image according to `options`.
///
/// # Raster formats
///
/// The module size is `width / (modules + 2 * margin)` pixels, at least 1.
/// The symbol is drawn without the library quiet zone and placed on a canvas
/// with exactly `margin` modules of light colour on each side. For
/// [`QrFormat::TransparentPng`] the light colour is fully transparent.
///
/// # Vector format
///
/// Uses the `qrcode` SVG renderer with the same module size. The library's
/// standard quiet zone is emitted when `margin > 0`.
///
/// # Errors
///
/// - [`QrRenderError::EmptyInput`] for empty text
/// - [`QrRenderError::Encode`] when the text does not fit in any QR version
/// - [`QrRenderError::Image`] when PNG encoding fails
pub fn render(text: &str, options: &QrOptions) -> Result<Vec<u8>, QrRenderError> {
    if text.is_empty() {
        return Err(QrRenderError::EmptyInput);
    }

    let code = QrCode::new(text.as_bytes())?;

    match options.format {
        QrFormat::Png => render_png(&code, options, options.light),
        QrFormat::TransparentPng => {
            let transparent = QrColor {
                a: 0,
                ..options.light
            };
            render_png(&code, options, transparent)
        }
        QrFormat::Svg => Ok(render_svg(&code, options).into_bytes()),
    }
}

/// Pixels per module so that the symbol plus margin fits in `options.width`.
fn module_size(code: &QrCode, options: &QrOptions) -> u32 {
    let modules = code.width() as u32 + 2 * options.margin;
    (options.width / modules).max(1)
}

fn render_png(code: &QrCode, options: &QrOptions, light: QrColor) -> Result<Vec<u8>, QrRenderError> {
    let px = module_size(code, options);
    let dark = Rgba(options.dark.to_rgba());
    let light = Rgba(light.to_rgba());

    let symbol = code
        .render::<Rgba<u8>>()
        .quiet_zone(false)
        .module_dimensions(px, px)
        .dark_color(dark)
        .light_color(light)
        .build();

    let offset = options.margin * px;
    let side = symbol.width() + 2 * offset;
    let mut canvas = RgbaImage::from_pixel(side, side, light);
    imageops::replace(&mut canvas, &symbol, i64::from(offset), i64::from(offset));

    let mut bytes = Vec::new();
    canvas.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

fn render_svg(code: &QrCode, options: &QrOptions) -> String {
    let px = module_size(code, options);
    let dark = options.dark.to_string();
    let light = options.light.to_string();

    code.render::<svg::Color<'_>>()
        .quiet_zone(options.margin > 0)
        .module_dimensions(px, px)
        .dark_color(svg::Color(&dark))
        .light_color(svg::Color(&light))
        .build()
}

/// Renders with a fixed set of default options.
///
/// Holds the service-wide size and colours; callers pick only the format.
#[derive(Debug, Clone, Default)]
pub struct QrRenderer {
    options: QrOptions,
}

impl QrRenderer {
    pub fn new(options: QrOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &QrOptions {
        &self.options
    }

    /// Renders `text` in `format` using the configured size and colours.
    pub fn render(&self, text: &str, format: QrFormat) -> Result<Vec<u8>, QrRenderError> {
        render(text, &self.options.with_format(format))
    }

    /// Renders a PNG with background and returns it as a `data:` URL.
    pub fn data_url(&self, text: &str) -> Result<String, QrRenderError> {
        let png = self.render(text, QrFormat::Png)?;
        Ok(format!(
            "data:image/png;base64,{}",
            base64::engine::general_purpose::STANDARD.encode(png)
        ))
    }
}
