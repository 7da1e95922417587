//! Rendering options for QR images.

use std::fmt;
use std::str::FromStr;

use super::renderer::QrRenderError;

/// Output format of a rendered QR code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QrFormat {
    /// PNG with the configured light colour as background.
    Png,
    /// PNG whose light modules and margin are fully transparent.
    TransparentPng,
    /// SVG document.
    Svg,
}

impl QrFormat {
    pub fn content_type(self) -> &'static str {
        match self {
            QrFormat::Png | QrFormat::TransparentPng => "image/png",
            QrFormat::Svg => "image/svg+xml",
        }
    }

    /// Suggested download file name.
    pub fn file_name(self) -> &'static str {
        match self {
            QrFormat::Png => "qr-code.png",
            QrFormat::TransparentPng => "qr-code-transparent.png",
            QrFormat::Svg => "qr-code.svg",
        }
    }

    /// Short label used in logs and metrics.
    pub fn as_str(self) -> &'static str {
        match self {
            QrFormat::Png => "png",
            QrFormat::TransparentPng => "transparent",
            QrFormat::Svg => "svg",
        }
    }
}

impl FromStr for QrFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(QrFormat::Png),
            "transparent" => Ok(QrFormat::TransparentPng),
            "svg" => Ok(QrFormat::Svg),
            other => Err(format!(
                "unknown QR format '{other}', expected png, transparent or svg"
            )),
        }
    }
}

/// An RGBA colour parsed from `#RRGGBB` or `#RRGGBBAA`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QrColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl QrColor {
    pub const BLACK: QrColor = QrColor::opaque(0x00, 0x00, 0x00);
    pub const WHITE: QrColor = QrColor::opaque(0xff, 0xff, 0xff);

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl fmt::Display for QrColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if self.a != 0xff {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

impl FromStr for QrColor {
    type Err = QrRenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || QrRenderError::InvalidColor(s.to_string());

        let hex = s.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !matches!(hex.len(), 6 | 8) || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());

        Ok(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
            a: if hex.len() == 8 { channel(6)? } else { 0xff },
        })
    }
}

/// Size, colours and format of a QR image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrOptions {
    /// Target edge length in pixels. The output never exceeds it unless a
    /// single pixel per module is already too large.
    pub width: u32,
    /// Quiet zone around the symbol, in modules.
    pub margin: u32,
    pub dark: QrColor,
    pub light: QrColor,
    pub format: QrFormat,
}

impl Default for QrOptions {
    fn default() -> Self {
        Self {
            width: 300,
            margin: 2,
            dark: QrColor::BLACK,
            light: QrColor::WHITE,
            format: QrFormat::Png,
        }
    }
}

impl QrOptions {
    /// Returns a copy of these options with a different output format.
    pub fn with_format(&self, format: QrFormat) -> Self {
        Self {
            format,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rgb_color() {
        let color: QrColor = "#1A2b3C".parse().unwrap();
        assert_eq!(color, QrColor::opaque(0x1a, 0x2b, 0x3c));
    }

    #[test]
    fn test_parse_rgba_color() {
        let color: QrColor = "#ffffff00".parse().unwrap();
        assert_eq!(color.to_rgba(), [0xff, 0xff, 0xff, 0x00]);
    }

    #[test]
    fn test_parse_invalid_colors() {
        for input in ["000000", "#fff", "#gggggg", "#1234567", ""] {
            assert!(
                input.parse::<QrColor>().is_err(),
                "'{input}' should be rejected"
            );
        }
    }

    #[test]
    fn test_color_display_round_trip() {
        assert_eq!(QrColor::BLACK.to_string(), "#000000");
        assert_eq!("#11223344".parse::<QrColor>().unwrap().to_string(), "#11223344");
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("SVG".parse::<QrFormat>().unwrap(), QrFormat::Svg);
        assert_eq!(
            "transparent".parse::<QrFormat>().unwrap(),
            QrFormat::TransparentPng
        );
        assert!("gif".parse::<QrFormat>().is_err());
    }

    #[test]
    fn test_default_options() {
        let options = QrOptions::default();
        assert_eq!(options.width, 300);
        assert_eq!(options.margin, 2);
        assert_eq!(options.format, QrFormat::Png);
        assert_eq!(options.with_format(QrFormat::Svg).format, QrFormat::Svg);
    }
}
