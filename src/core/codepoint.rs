//! Codepoint sequences for emoji artwork file names.
//!
//! Emoji artwork hosts (Twemoji, EmojiOne and friends) name every image after
//! the Unicode scalar values of the emoji it depicts, written in lowercase hex
//! and joined by hyphens:
//!
//! - `😄` → `1f604`
//! - `🇺🇸` → `1f1fa-1f1f8`
//! - `👩‍💻` → `1f469-200d-1f4bb`
//!
//! Some hosts (EmojiOne) drop the helper codepoints from their file names: the
//! zero-width joiner (`200d`) that glues ZWJ sequences together and
//! variation selector-16 (`fe0f`) that requests emoji presentation.
//!
//! # Example
//!
//! ```
//! use emoji_render::core::codepoint::to_codepoints;
//!
//! assert_eq!(to_codepoints("❤\u{fe0f}", false), "2764-fe0f");
//! assert_eq!(to_codepoints("❤\u{fe0f}", true), "2764");
//! ```

/// Zero-width joiner (U+200D), combines emoji into composite glyphs.
pub const ZERO_WIDTH_JOINER: char = '\u{200d}';

/// Variation selector-16 (U+FE0F), requests emoji presentation.
pub const VARIATION_SELECTOR_16: char = '\u{fe0f}';

/// Returns true for the codepoints stripped by [`to_codepoints`] when asked to.
#[inline]
pub fn is_helper_codepoint(c: char) -> bool {
    c == ZERO_WIDTH_JOINER || c == VARIATION_SELECTOR_16
}

/// Encode an emoji as its hyphen-joined lowercase hex codepoint sequence.
///
/// With `strip_helpers` set, zero-width joiners and variation selector-16
/// are left out of the result.
pub fn to_codepoints(emoji: &str, strip_helpers: bool) -> String {
    let mut out = String::with_capacity(emoji.len() * 3);

    for c in emoji
        .chars()
        .filter(|&c| !(strip_helpers && is_helper_codepoint(c)))
    {
        if !out.is_empty() {
            out.push('-');
        }
        out.push_str(&format!("{:x}", c as u32));
    }

    out
}

/// Decode a hyphen-joined hex codepoint sequence back into a string.
///
/// Returns `None` if any segment is not valid hex or not a Unicode scalar value.
pub fn from_codepoints(sequence: &str) -> Option<String> {
    if sequence.is_empty() {
        return Some(String::new());
    }

    sequence
        .split('-')
        .map(|hex| u32::from_str_radix(hex, 16).ok().and_then(char::from_u32))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_codepoint() {
        assert_eq!(to_codepoints("😄", false), "1f604");
        assert_eq!(to_codepoints("😄", true), "1f604");
    }

    #[test]
    fn test_flag_sequence() {
        assert_eq!(to_codepoints("🇺🇸", false), "1f1fa-1f1f8");
    }

    #[test]
    fn test_zwj_sequence_keeps_helpers() {
        // woman technologist
        let emoji = "\u{1f469}\u{200d}\u{1f4bb}";
        assert_eq!(to_codepoints(emoji, false), "1f469-200d-1f4bb");
    }

    #[test]
    fn test_zwj_sequence_strips_helpers() {
        // rainbow flag: white flag, VS16, ZWJ, rainbow
        let emoji = "\u{1f3f3}\u{fe0f}\u{200d}\u{1f308}";
        assert_eq!(to_codepoints(emoji, false), "1f3f3-fe0f-200d-1f308");
        assert_eq!(to_codepoints(emoji, true), "1f3f3-1f308");
    }

    #[test]
    fn test_leading_selector_is_stripped() {
        assert_eq!(to_codepoints("\u{fe0f}\u{1f604}", true), "1f604");
    }

    #[test]
    fn test_minimal_hex() {
        assert_eq!(to_codepoints("#\u{fe0f}\u{20e3}", false), "23-fe0f-20e3");
    }

    #[test]
    fn test_empty() {
        assert_eq!(to_codepoints("", false), "");
        assert_eq!(from_codepoints(""), Some(String::new()));
    }

    #[test]
    fn test_from_codepoints() {
        assert_eq!(from_codepoints("1f1fa-1f1f8").as_deref(), Some("🇺🇸"));
        assert_eq!(from_codepoints("1f604").as_deref(), Some("😄"));
        assert_eq!(from_codepoints("zz"), None);
        assert_eq!(from_codepoints("d800"), None);
    }

    #[test]
    fn test_helper_codepoints() {
        assert!(is_helper_codepoint('\u{200d}'));
        assert!(is_helper_codepoint('\u{fe0f}'));
        assert!(!is_helper_codepoint('\u{fe0e}'));
    }
}
