//! Output fragments and the emoji-only classifier.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::codepoint::VARIATION_SELECTOR_16;

/// Most fragments a text may produce and still count as emoji-only.
pub const MAX_ONLY_EMOJI_FRAGMENTS: usize = 3;

/// One renderable unit of converted text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Fragment {
    /// Literal text.
    Text { content: String },
    /// An emoji rendered as text, used when no artwork URL is configured.
    Glyph {
        content: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        class_name: Option<String>,
    },
    /// An emoji rendered as an image.
    Image {
        alt: String,
        src: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        class_name: Option<String>,
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        attributes: BTreeMap<String, String>,
    },
}

impl Fragment {
    pub fn text(content: impl Into<String>) -> Self {
        Fragment::Text {
            content: content.into(),
        }
    }

    #[inline]
    pub fn is_text(&self) -> bool {
        matches!(self, Fragment::Text { .. })
    }

    /// The source text this fragment stands for: the content of text and
    /// glyph fragments, the alt text of images.
    pub fn as_str(&self) -> &str {
        match self {
            Fragment::Text { content } | Fragment::Glyph { content, .. } => content,
            Fragment::Image { alt, .. } => alt,
        }
    }

    /// A text fragment made only of VS16, left behind when an emoji was split
    /// off from its trailing selector.
    pub fn is_stray_selector(&self) -> bool {
        match self {
            Fragment::Text { content } => {
                !content.is_empty() && content.chars().all(|c| c == VARIATION_SELECTOR_16)
            }
            _ => false,
        }
    }
}

/// True if the fragments are nothing but emoji: between one and
/// [`MAX_ONLY_EMOJI_FRAGMENTS`] fragments, none of them text.
pub fn is_only_emoji(fragments: &[Fragment]) -> bool {
    !fragments.is_empty()
        && fragments.len() <= MAX_ONLY_EMOJI_FRAGMENTS
        && fragments.iter().all(|f| !f.is_text())
}

/// Concatenate the source text of every fragment.
pub fn to_plain_text(fragments: &[Fragment]) -> String {
    fragments.iter().map(Fragment::as_str).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glyph(content: &str) -> Fragment {
        Fragment::Glyph {
            content: content.to_string(),
            class_name: None,
        }
    }

    #[test]
    fn test_only_emoji() {
        assert!(is_only_emoji(&[glyph("😀")]));
        assert!(is_only_emoji(&[glyph("😀"), glyph("😀"), glyph("😀")]));
    }

    #[test]
    fn test_too_many_emoji() {
        let fragments = vec![glyph("😀"); 4];
        assert!(!is_only_emoji(&fragments));
    }

    #[test]
    fn test_text_is_not_only_emoji() {
        assert!(!is_only_emoji(&[Fragment::text("hi "), glyph("😀")]));
        assert!(!is_only_emoji(&[Fragment::text("")]));
        assert!(!is_only_emoji(&[]));
    }

    #[test]
    fn test_images_count_as_emoji() {
        let image = Fragment::Image {
            alt: "😀".to_string(),
            src: "/e/1f600.png".to_string(),
            class_name: None,
            attributes: BTreeMap::new(),
        };
        assert!(is_only_emoji(&[image.clone(), glyph("😀")]));
        assert_eq!(image.as_str(), "😀");
    }

    #[test]
    fn test_stray_selector() {
        assert!(Fragment::text("\u{fe0f}").is_stray_selector());
        assert!(Fragment::text("\u{fe0f}\u{fe0f}").is_stray_selector());
        assert!(!Fragment::text("\u{fe0e}").is_stray_selector());
        assert!(!Fragment::text("\u{fe0f}a").is_stray_selector());
        assert!(!Fragment::text("").is_stray_selector());
        assert!(!glyph("\u{fe0f}").is_stray_selector());
    }

    #[test]
    fn test_to_plain_text() {
        let fragments = vec![Fragment::text("hi "), glyph("😀"), Fragment::text("!")];
        assert_eq!(to_plain_text(&fragments), "hi 😀!");
    }

    #[test]
    fn test_serialize_tagged() {
        let json = serde_json::to_string(&glyph("😀")).unwrap();
        assert_eq!(json, r#"{"kind":"glyph","content":"😀"}"#);
        let back: Fragment = serde_json::from_str(&json).unwrap();
        assert_eq!(back, glyph("😀"));
    }
}
