//! Ready-made options for common emoji artwork hosts.
//!
//! - `twemoji` - Twitter Twemoji, SVG artwork
//! - `twemoji_png` - Twitter Twemoji, 72x72 PNG artwork
//! - `emojione` - EmojiOne 3.0, 64px PNG artwork
//! - `emojione_v4` - EmojiOne 4.0, 64px PNG artwork
//!
//! EmojiOne names its files without zero-width joiners and VS16, so its
//! presets strip those codepoints.
//!
//! # Example
//!
//! ```rust
//! use emoji_render::presets::from_preset;
//! use emoji_render::to_fragments;
//!
//! let options = from_preset("twemoji").unwrap();
//! let fragments = to_fragments("Hello :wave:", &options);
//! ```

use super::converter::ConverterError;
use super::options::{ConversionOptions, Size};

pub const TWEMOJI_SVG_BASE_URL: &str = "//twemoji.maxcdn.com/2/svg/";
pub const TWEMOJI_PNG_BASE_URL: &str = "//twemoji.maxcdn.com/2/72x72/";
pub const EMOJIONE_BASE_URL: &str = "//cdn.jsdelivr.net/emojione/assets/3.0/png/";
pub const EMOJIONE_V4_BASE_URL: &str = "//cdn.jsdelivr.net/emojione/assets/4.0/png/";

/// Supported artwork presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    /// Twemoji SVG
    Twemoji,
    /// Twemoji 72x72 PNG
    TwemojiPng,
    /// EmojiOne 3.0 PNG
    Emojione,
    /// EmojiOne 4.0 PNG
    EmojioneV4,
}

impl Preset {
    /// Parse preset name from string.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "twemoji" | "twemoji_svg" => Some(Self::Twemoji),
            "twemoji_png" | "twemoji-png" => Some(Self::TwemojiPng),
            "emojione" | "emojione_v3" => Some(Self::Emojione),
            "emojione_v4" | "emojione-v4" => Some(Self::EmojioneV4),
            _ => None,
        }
    }

    /// Get all supported preset names.
    pub fn supported_names() -> &'static [&'static str] {
        &[
            "twemoji",
            "twemoji_svg",
            "twemoji_png",
            "twemoji-png",
            "emojione",
            "emojione_v3",
            "emojione_v4",
            "emojione-v4",
        ]
    }
}

/// Get the conversion options for a preset name.
pub fn from_preset(name: &str) -> Result<ConversionOptions, ConverterError> {
    let preset = Preset::from_name(name).ok_or_else(|| {
        ConverterError::UnknownPreset(format!(
            "{}. Supported: {}",
            name,
            Preset::supported_names().join(", ")
        ))
    })?;

    Ok(options_for(preset))
}

/// Get the conversion options for a preset.
pub fn options_for(preset: Preset) -> ConversionOptions {
    let options = ConversionOptions::new().base_url(base_url(preset));

    match preset {
        Preset::Twemoji => options.ext("svg"),
        Preset::TwemojiPng => options.ext("png"),
        Preset::Emojione | Preset::EmojioneV4 => options
            .size(Size::Pixels(64))
            .ext("png")
            .strip_helper_codepoints(true),
    }
}

/// Get the artwork base URL for a preset.
pub fn base_url(preset: Preset) -> &'static str {
    match preset {
        Preset::Twemoji => TWEMOJI_SVG_BASE_URL,
        Preset::TwemojiPng => TWEMOJI_PNG_BASE_URL,
        Preset::Emojione => EMOJIONE_BASE_URL,
        Preset::EmojioneV4 => EMOJIONE_V4_BASE_URL,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_name_parses() {
        for name in Preset::supported_names() {
            assert!(Preset::from_name(name).is_some(), "{} should parse", name);
        }
    }

    #[test]
    fn test_unknown_preset() {
        let err = from_preset("noto").unwrap_err();
        assert!(matches!(err, ConverterError::UnknownPreset(_)));
        assert!(err.to_string().contains("twemoji"));
    }

    #[test]
    fn test_emojione_strips_helpers() {
        let options = options_for(Preset::Emojione);
        assert!(options.strip_helper_codepoints);
        assert_eq!(options.size, Some(Size::Pixels(64)));
        assert!(!options_for(Preset::Twemoji).strip_helper_codepoints);
    }
}
