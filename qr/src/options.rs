//! Encoder and renderer options.
//!
//! Both option sets deserialize from camelCase JSON, with every field
//! optional:
//!
//! ```json
//! {
//!   "version": 7,
//!   "errorCorrectionLevel": "H",
//!   "maskPattern": 2,
//!   "margin": 2,
//!   "width": 300,
//!   "color": { "dark": "#112233", "light": "#fff0" }
//! }
//! ```

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::ec_level::ErrorCorrectionLevel;
use crate::error::{QrError, Result};
use crate::kanji::ShiftJis;
use crate::mask::MaskPattern;
use crate::version::Version;

/// Options for [`create`](crate::create).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QrOptions {
    /// Pinned version. Chosen automatically when absent.
    pub version: Option<Version>,
    /// Defaults to [`ErrorCorrectionLevel::M`].
    pub error_correction_level: Option<ErrorCorrectionLevel>,
    /// Pinned mask pattern. Chosen by penalty when absent.
    pub mask_pattern: Option<MaskPattern>,
    /// Shift JIS converter. Kanji mode is only used when one is set.
    #[serde(skip)]
    pub to_sjis: Option<Arc<dyn ShiftJis>>,
}

impl QrOptions {
    pub fn with_version(mut self, version: Version) -> Self {
        self.version = Some(version);
        self
    }

    pub fn with_error_correction_level(mut self, level: ErrorCorrectionLevel) -> Self {
        self.error_correction_level = Some(level);
        self
    }

    pub fn with_mask_pattern(mut self, mask: MaskPattern) -> Self {
        self.mask_pattern = Some(mask);
        self
    }

    pub fn with_sjis(mut self, sjis: impl ShiftJis + 'static) -> Self {
        self.to_sjis = Some(Arc::new(sjis));
        self
    }

    pub fn sjis(&self) -> Option<&dyn ShiftJis> {
        self.to_sjis.as_deref()
    }
}

/// An RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgba(0, 0, 0, 255);
    pub const WHITE: Color = Color::rgba(255, 255, 255, 255);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color { r, g, b, a }
    }

    /// Parse `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa`. The `#` is optional
    /// and a missing alpha means opaque.
    pub fn from_hex(value: &str) -> Result<Self> {
        let digits = value.strip_prefix('#').unwrap_or(value);
        let invalid = || QrError::InvalidColor(value.to_string());

        let expanded: String = match digits.len() {
            3 | 4 => digits.chars().flat_map(|c| [c, c]).collect(),
            6 | 8 => digits.to_string(),
            _ => return Err(invalid()),
        };

        let bytes = hex::decode(&expanded).map_err(|_| invalid())?;
        match bytes[..] {
            [r, g, b] => Ok(Color::rgba(r, g, b, 255)),
            [r, g, b, a] => Ok(Color::rgba(r, g, b, a)),
            _ => Err(invalid()),
        }
    }

    /// `#rrggbb`, alpha dropped.
    pub fn hex(&self) -> String {
        format!("#{}", hex::encode([self.r, self.g, self.b]))
    }

    /// `#rrggbbaa`.
    pub fn hex_with_alpha(&self) -> String {
        format!("#{}", hex::encode([self.r, self.g, self.b, self.a]))
    }

    pub fn is_opaque(&self) -> bool {
        self.a == 255
    }

    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }

    /// Alpha as a fraction of 1.
    pub fn opacity(&self) -> f64 {
        self.a as f64 / 255.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex_with_alpha())
    }
}

impl std::str::FromStr for Color {
    type Err = QrError;

    fn from_str(s: &str) -> Result<Self> {
        Color::from_hex(s)
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.hex_with_alpha())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct ColorVisitor;

        impl serde::de::Visitor<'_> for ColorVisitor {
            type Value = Color;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", QrError::ColorNotHex)
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> std::result::Result<Color, E> {
                Color::from_hex(v).map_err(E::custom)
            }

            // Bare digits, e.g. `111` for #111.
            fn visit_u64<E: serde::de::Error>(self, v: u64) -> std::result::Result<Color, E> {
                Color::from_hex(&v.to_string()).map_err(E::custom)
            }
        }

        deserializer.deserialize_any(ColorVisitor)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorOptions {
    pub dark: Color,
    pub light: Color,
}

impl Default for ColorOptions {
    fn default() -> Self {
        ColorOptions {
            dark: Color::BLACK,
            light: Color::WHITE,
        }
    }
}

/// Options shared by the renderers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RenderOptions {
    /// Quiet zone width in modules.
    pub margin: usize,
    /// Pixels per module.
    pub scale: f64,
    /// Image width in pixels. Overrides `scale` when it is large enough to
    /// give every module at least one pixel.
    pub width: Option<u32>,
    pub color: ColorOptions,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            margin: 4,
            scale: 4.0,
            width: None,
            color: ColorOptions::default(),
        }
    }
}

impl RenderOptions {
    /// Pixels per module for a symbol of `size` modules.
    ///
    /// A `scale` that is not a positive finite number falls back to 4.
    pub fn scale_for(&self, size: usize) -> f64 {
        let modules = (size + self.margin * 2) as f64;
        match self.width {
            Some(width) if width as f64 >= modules => width as f64 / modules,
            _ if self.scale.is_finite() && self.scale > 0.0 => self.scale,
            _ => 4.0,
        }
    }

    /// Image side in pixels for a symbol of `size` modules.
    pub fn image_width(&self, size: usize) -> usize {
        ((size + self.margin * 2) as f64 * self.scale_for(size)).floor() as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_colors() {
        assert_eq!(Color::from_hex("#000").unwrap(), Color::BLACK);
        assert_eq!(Color::from_hex("fff").unwrap(), Color::WHITE);
        assert_eq!(
            Color::from_hex("#1234").unwrap(),
            Color::rgba(0x11, 0x22, 0x33, 0x44)
        );
        assert_eq!(
            Color::from_hex("#a0b1c2").unwrap(),
            Color::rgba(0xa0, 0xb1, 0xc2, 0xff)
        );
        assert_eq!(
            Color::from_hex("#A0B1C280").unwrap(),
            Color::rgba(0xa0, 0xb1, 0xc2, 0x80)
        );
    }

    #[test]
    fn bad_hex_colors() {
        for bad in ["", "#", "#12", "#12345", "#1234567", "#123456789", "#ggg"] {
            assert_eq!(
                Color::from_hex(bad),
                Err(QrError::InvalidColor(bad.to_string())),
                "{bad}"
            );
        }
    }

    #[test]
    fn color_hex_output() {
        let c = Color::from_hex("#a0b1c280").unwrap();
        assert_eq!(c.hex(), "#a0b1c2");
        assert_eq!(c.to_string(), "#a0b1c280");
        assert!(!c.is_opaque());
        assert!(Color::from_hex("#0000").unwrap().is_transparent());
    }

    #[test]
    fn qr_options_from_json() {
        let options: QrOptions = serde_json::from_str(
            r#"{"version": 5, "errorCorrectionLevel": "quartile", "maskPattern": 3}"#,
        )
        .unwrap();
        assert_eq!(options.version, Version::new(5).ok());
        assert_eq!(options.error_correction_level, Some(ErrorCorrectionLevel::Q));
        assert_eq!(options.mask_pattern, MaskPattern::new(3).ok());
        assert!(options.sjis().is_none());

        let empty: QrOptions = serde_json::from_str("{}").unwrap();
        assert!(empty.version.is_none());
        assert!(empty.error_correction_level.is_none());
    }

    #[test]
    fn qr_options_reject_out_of_range() {
        assert!(serde_json::from_str::<QrOptions>(r#"{"version": 41}"#).is_err());
        assert!(serde_json::from_str::<QrOptions>(r#"{"maskPattern": 8}"#).is_err());
        assert!(serde_json::from_str::<QrOptions>(r#"{"errorCorrectionLevel": "X"}"#).is_err());
    }

    #[test]
    fn render_options_from_json() {
        let options: RenderOptions = serde_json::from_str(
            r##"{"margin": 1, "width": 200, "color": {"dark": "#ff0000", "light": 111}}"##,
        )
        .unwrap();
        assert_eq!(options.margin, 1);
        assert_eq!(options.scale, 4.0);
        assert_eq!(options.width, Some(200));
        assert_eq!(options.color.dark, Color::rgba(255, 0, 0, 255));
        assert_eq!(options.color.light, Color::rgba(0x11, 0x11, 0x11, 255));

        let err = serde_json::from_str::<RenderOptions>(r#"{"color": {"dark": true}}"#)
            .unwrap_err()
            .to_string();
        assert!(err.contains("Color should be defined as hex string"), "{err}");
    }

    #[test]
    fn scale_follows_width_when_it_fits() {
        let mut options = RenderOptions::default();
        // 21 modules + 2 * 4 margin = 29.
        assert_eq!(options.scale_for(21), 4.0);
        assert_eq!(options.image_width(21), 116);

        options.width = Some(290);
        assert_eq!(options.scale_for(21), 10.0);
        assert_eq!(options.image_width(21), 290);

        // Too narrow for one pixel per module.
        options.width = Some(20);
        assert_eq!(options.scale_for(21), 4.0);

        options.width = None;
        options.scale = 0.0;
        assert_eq!(options.scale_for(21), 4.0);
    }

    #[test]
    fn non_finite_scale_falls_back() {
        for scale in [f64::INFINITY, f64::NEG_INFINITY, f64::NAN] {
            let options = RenderOptions {
                scale,
                ..RenderOptions::default()
            };
            assert_eq!(options.scale_for(21), 4.0, "{scale}");
            assert_eq!(options.image_width(21), 116, "{scale}");
        }
    }
}
