//! JSON configuration file and command-line overrides.
//!
//! The file holds one flat object mixing encoder and renderer options, the
//! same keys [`QrOptions`] and [`RenderOptions`] accept:
//!
//! ```json
//! { "errorCorrectionLevel": "H", "margin": 2, "color": { "dark": "#333" } }
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use qrgen::{Color, ErrorCorrectionLevel, MaskPattern, QrOptions, RenderOptions, Version};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(flatten)]
    pub qr: QrOptions,
    #[serde(flatten)]
    pub render: RenderOptions,
}

impl Config {
    /// Read `path`, or use defaults when there is none.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Config::default());
        };

        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
        let config: Config = serde_json::from_str(&text)
            .with_context(|| format!("Invalid config file '{}'", path.display()))?;

        tracing::debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }
}

/// Encoder flags; set values replace the file's.
#[derive(Debug, Default)]
pub struct QrOverrides {
    pub ec_level: Option<ErrorCorrectionLevel>,
    pub version: Option<u8>,
    pub mask: Option<u8>,
}

impl QrOverrides {
    pub fn apply(&self, options: &mut QrOptions) -> Result<()> {
        if let Some(level) = self.ec_level {
            options.error_correction_level = Some(level);
        }
        if let Some(version) = self.version {
            options.version = Some(Version::new(version)?);
        }
        if let Some(mask) = self.mask {
            options.mask_pattern = Some(MaskPattern::new(mask)?);
        }
        Ok(())
    }
}

/// Renderer flags; set values replace the file's.
#[derive(Debug, Default)]
pub struct RenderOverrides {
    pub margin: Option<usize>,
    pub scale: Option<f64>,
    pub width: Option<u32>,
    pub dark: Option<String>,
    pub light: Option<String>,
}

impl RenderOverrides {
    pub fn apply(&self, options: &mut RenderOptions) -> Result<()> {
        if let Some(margin) = self.margin {
            options.margin = margin;
        }
        if let Some(scale) = self.scale {
            if !scale.is_finite() || scale <= 0.0 {
                bail!("Scale must be a positive number, got {scale}");
            }
            options.scale = scale;
        }
        if let Some(width) = self.width {
            options.width = Some(width);
        }
        if let Some(dark) = &self.dark {
            options.color.dark = Color::from_hex(dark)?;
        }
        if let Some(light) = &self.light {
            options.color.light = Color::from_hex(light)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_config_fills_both_option_sets() {
        let config: Config = serde_json::from_str(
            r##"{
                "errorCorrectionLevel": "H",
                "version": 4,
                "margin": 2,
                "scale": 8,
                "color": { "dark": "#336699" }
            }"##,
        )
        .unwrap();

        assert_eq!(config.qr.error_correction_level, Some(ErrorCorrectionLevel::H));
        assert_eq!(config.qr.version, Version::new(4).ok());
        assert_eq!(config.render.margin, 2);
        assert_eq!(config.render.scale, 8.0);
        assert_eq!(config.render.color.dark, Color::rgba(0x33, 0x66, 0x99, 0xff));
        assert_eq!(config.render.color.light, Color::WHITE);
    }

    #[test]
    fn missing_file_means_defaults() {
        let config = Config::load(None).unwrap();
        assert!(config.qr.version.is_none());
        assert_eq!(config.render, RenderOptions::default());
    }

    #[test]
    fn unreadable_file_is_reported() {
        let err = Config::load(Some(Path::new("/nonexistent/qrgen.json"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn flags_override_file() {
        let mut config: Config =
            serde_json::from_str(r#"{"errorCorrectionLevel": "L", "margin": 1}"#).unwrap();

        QrOverrides {
            ec_level: Some(ErrorCorrectionLevel::Q),
            mask: Some(6),
            ..QrOverrides::default()
        }
        .apply(&mut config.qr)
        .unwrap();
        RenderOverrides {
            width: Some(400),
            light: Some("#0000".into()),
            ..RenderOverrides::default()
        }
        .apply(&mut config.render)
        .unwrap();

        assert_eq!(config.qr.error_correction_level, Some(ErrorCorrectionLevel::Q));
        assert_eq!(config.qr.mask_pattern, MaskPattern::new(6).ok());
        assert_eq!(config.render.margin, 1);
        assert_eq!(config.render.width, Some(400));
        assert!(config.render.color.light.is_transparent());
    }

    #[test]
    fn invalid_flags_are_errors() {
        let mut options = QrOptions::default();
        let err = QrOverrides {
            version: Some(41),
            ..QrOverrides::default()
        }
        .apply(&mut options)
        .unwrap_err();
        assert_eq!(err.to_string(), "Invalid QR Code version: 41");

        let mut render = RenderOptions::default();
        assert!(
            RenderOverrides {
                dark: Some("#12".into()),
                ..RenderOverrides::default()
            }
            .apply(&mut render)
            .is_err()
        );
    }

    #[test]
    fn scale_must_be_positive_and_finite() {
        for scale in [f64::INFINITY, f64::NAN, 0.0, -2.0] {
            let mut render = RenderOptions::default();
            let err = RenderOverrides {
                scale: Some(scale),
                ..RenderOverrides::default()
            }
            .apply(&mut render)
            .unwrap_err();
            assert!(err.to_string().starts_with("Scale must be"), "{scale}");
            assert_eq!(render.scale, 4.0);
        }
    }
}
