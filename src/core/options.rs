//! Conversion options and image URL layout.
//!
//! When no base URL is configured emoji are emitted as glyph fragments. With
//! a base URL every emoji becomes an image whose source follows the layout
//! shared by CDN-style artwork hosts:
//!
//! ```text
//! {protocol}{base_url}{size}{"/" if size}{codepoints}.{ext}
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use super::codepoint::to_codepoints;

/// Protocol used when none is configured.
pub const DEFAULT_PROTOCOL: &str = "https:";

/// Image extension used when none is configured.
pub const DEFAULT_EXT: &str = "png";

/// Normalize a configured protocol.
///
/// - `None` falls back to [`DEFAULT_PROTOCOL`]
/// - An empty string stays empty, for relative or same-origin base URLs
/// - Anything else is lowercased and gets a trailing `:` unless it already
///   ends in `:` or `/` (`"HTTP"` → `"http:"`, `"https://"` unchanged)
pub fn normalize_protocol(protocol: Option<&str>) -> String {
    match protocol {
        None => DEFAULT_PROTOCOL.to_string(),
        Some(p) if p.is_empty() => String::new(),
        Some(p) => {
            let mut normalized = p.to_lowercase();
            if !normalized.ends_with(':') && !normalized.ends_with('/') {
                normalized.push(':');
            }
            normalized
        }
    }
}

/// Image size segment of the URL, either a pixel count or a free-form label
/// such as `72x72`.
///
/// Deserializes from any JSON number or string. Whole numbers become
/// [`Size::Pixels`]; other numbers (`1.5`, `-2`) keep their decimal form as a
/// [`Size::Label`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum Size {
    Pixels(u32),
    Label(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SizeRepr {
    Pixels(u32),
    Number(f64),
    Label(String),
}

impl<'de> Deserialize<'de> for Size {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match SizeRepr::deserialize(deserializer)? {
            SizeRepr::Pixels(px) => Size::Pixels(px),
            SizeRepr::Number(n) => Size::from(n),
            SizeRepr::Label(label) => Size::Label(label),
        })
    }
}

impl Size {
    /// Zero and the empty label count as unset.
    pub fn is_set(&self) -> bool {
        match self {
            Size::Pixels(px) => *px > 0,
            Size::Label(label) => !label.is_empty(),
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Size::Pixels(px) => write!(f, "{}", px),
            Size::Label(label) => f.write_str(label),
        }
    }
}

impl From<u32> for Size {
    fn from(px: u32) -> Self {
        Size::Pixels(px)
    }
}

impl From<f64> for Size {
    fn from(n: f64) -> Self {
        if n.fract() == 0.0 && n >= 0.0 && n <= u32::MAX as f64 {
            Size::Pixels(n as u32)
        } else {
            Size::Label(n.to_string())
        }
    }
}

impl From<&str> for Size {
    fn from(label: &str) -> Self {
        Size::Label(label.to_string())
    }
}

impl From<String> for Size {
    fn from(label: String) -> Self {
        Size::Label(label)
    }
}

/// Per-call conversion settings.
///
/// All fields have defaults, so options can be built from
/// `ConversionOptions::default()` with the builder methods or deserialized
/// from partial JSON (`{"baseUrl": "/emoji/", "size": 64}`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConversionOptions {
    /// Artwork base URL. Unset or empty produces glyph fragments.
    pub base_url: Option<String>,
    /// URL protocol, see [`normalize_protocol`].
    pub protocol: Option<String>,
    /// Size path segment inserted after the base URL.
    pub size: Option<Size>,
    /// Image file extension, without the dot.
    pub ext: String,
    /// Class attached to every glyph or image fragment.
    pub class_name: Option<String>,
    /// Extra attributes copied verbatim onto every image fragment.
    pub attributes: BTreeMap<String, String>,
    /// Leave zero-width joiners and VS16 out of image file names.
    #[serde(alias = "emojione", alias = "useEmojioneCodepoints")]
    pub strip_helper_codepoints: bool,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            base_url: None,
            protocol: None,
            size: None,
            ext: DEFAULT_EXT.to_string(),
            class_name: None,
            attributes: BTreeMap::new(),
            strip_helper_codepoints: false,
        }
    }
}

impl ConversionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load options from JSON; missing keys keep their defaults.
    pub fn from_json(data: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(data)
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = Some(protocol.into());
        self
    }

    pub fn size(mut self, size: impl Into<Size>) -> Self {
        self.size = Some(size.into());
        self
    }

    pub fn ext(mut self, ext: impl Into<String>) -> Self {
        self.ext = ext.into();
        self
    }

    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    /// Add one extra image attribute.
    pub fn attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn strip_helper_codepoints(mut self, strip: bool) -> Self {
        self.strip_helper_codepoints = strip;
        self
    }

    /// True when emoji should become image fragments.
    #[inline]
    pub fn renders_images(&self) -> bool {
        self.base_url.as_deref().is_some_and(|url| !url.is_empty())
    }

    /// Build the artwork URL for an emoji, or `None` in glyph mode.
    pub fn image_url(&self, emoji: &str) -> Option<String> {
        let base_url = self.base_url.as_deref().filter(|url| !url.is_empty())?;
        let protocol = normalize_protocol(self.protocol.as_deref());
        let codepoints = to_codepoints(emoji, self.strip_helper_codepoints);

        let (size, separator) = match &self.size {
            Some(size) if size.is_set() => (size.to_string(), "/"),
            _ => (String::new(), ""),
        };

        Some(format!(
            "{}{}{}{}{}.{}",
            protocol, base_url, size, separator, codepoints, self.ext
        ))
    }
}
