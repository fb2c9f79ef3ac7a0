//! Scanners for the three kinds of emoji notation.
//!
//! - [`AsciiMatcher`]: ASCII emoticons (`:)`, `<3`) from an [`AsciiAliasTable`]
//! - [`ShortcodeMatcher`]: colon-delimited shortcodes (`:smile:`)
//! - [`UnicodeEmojiMatcher`]: literal emoji grapheme clusters
//!
//! Every matcher walks the text left to right and yields non-overlapping
//! matches, earliest first. Iteration state lives in the returned iterator,
//! so a matcher can be shared freely between threads and calls.

use regex::Regex;
use unicode_segmentation::{GraphemeIndices, UnicodeSegmentation};

use super::aliases::AsciiAliasTable;
use super::codepoint::is_helper_codepoint;

/// Shortcode names: word characters, `+` and `-` between two colons.
pub const SHORTCODE_PATTERN: &str = r":([A-Za-z0-9_+\-]+):";

/// Characters that may directly follow an emoticon besides whitespace.
const EMOTICON_TERMINATORS: &str = "!,.?";

/// An emoticon found by [`AsciiMatcher`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AsciiMatch<'t> {
    /// Start of the match, including the edge character if any.
    pub start: usize,
    /// End of the emoticon.
    pub end: usize,
    /// Non-whitespace character glued to the front of the emoticon.
    pub edge: Option<char>,
    /// The emoticon variant itself.
    pub variant: &'t str,
}

impl AsciiMatch<'_> {
    #[inline]
    pub fn is_edge_case(&self) -> bool {
        self.edge.is_some()
    }
}

/// Finds ASCII emoticons listed in an [`AsciiAliasTable`].
///
/// An emoticon only matches when it is followed by whitespace, the end of
/// the text, or one of `! , . ?`. A non-whitespace character directly in
/// front of it is captured as the edge marker; the pipeline leaves such
/// matches alone so that `http://` or `word:)` are not rewritten. When an
/// emoticon can start right at the scan position it is preferred over one
/// that needs an edge character, which keeps `o:)` whole.
#[derive(Debug, Clone)]
pub struct AsciiMatcher {
    regex: Option<Regex>,
}

impl AsciiMatcher {
    pub fn new(table: &AsciiAliasTable) -> Result<Self, regex::Error> {
        let mut variants: Vec<&str> = table.all_variants().collect();
        if variants.is_empty() {
            return Ok(Self { regex: None });
        }

        // Longest first so that `>:(` wins over `:(`.
        variants.sort_unstable_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        let alternation = variants
            .iter()
            .map(|v| regex::escape(v))
            .collect::<Vec<_>>()
            .join("|");
        let terminators = regex::escape(EMOTICON_TERMINATORS);
        let pattern = format!(
            r"(?P<edge>[^\s])??(?P<variant>{})(?:[\s{}]|$)",
            alternation, terminators
        );

        log::debug!("compiled emoticon matcher over {} variants", variants.len());
        Ok(Self {
            regex: Some(Regex::new(&pattern)?),
        })
    }

    pub fn find_iter<'m, 't>(&'m self, text: &'t str) -> AsciiMatches<'m, 't> {
        AsciiMatches {
            regex: self.regex.as_ref(),
            text,
            pos: 0,
        }
    }
}

/// Iterator over [`AsciiMatch`]es, created by [`AsciiMatcher::find_iter`].
pub struct AsciiMatches<'m, 't> {
    regex: Option<&'m Regex>,
    text: &'t str,
    pos: usize,
}

impl<'t> Iterator for AsciiMatches<'_, 't> {
    type Item = AsciiMatch<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        let regex = self.regex?;
        if self.pos > self.text.len() {
            return None;
        }

        let caps = regex.captures_at(self.text, self.pos)?;
        let variant = caps.name("variant")?;
        let edge = caps.name("edge");

        // Resume right after the emoticon: the terminator it consumed may be
        // the edge or the start of the next one.
        self.pos = variant.end();

        Some(AsciiMatch {
            start: edge.map_or(variant.start(), |m| m.start()),
            end: variant.end(),
            edge: edge.and_then(|m| m.as_str().chars().next()),
            variant: variant.as_str(),
        })
    }
}

/// A `:name:` shortcode found by [`ShortcodeMatcher`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShortcodeMatch<'t> {
    pub start: usize,
    pub end: usize,
    /// The name between the colons.
    pub name: &'t str,
}

/// Finds `:name:` shortcodes, known or not.
#[derive(Debug, Clone)]
pub struct ShortcodeMatcher {
    regex: Regex,
}

impl ShortcodeMatcher {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            regex: Regex::new(SHORTCODE_PATTERN)?,
        })
    }

    pub fn find_iter<'a>(&'a self, text: &'a str) -> impl Iterator<Item = ShortcodeMatch<'a>> + 'a {
        self.regex.captures_iter(text).filter_map(|caps| {
            let whole = caps.get(0)?;
            let name = caps.get(1)?;
            Some(ShortcodeMatch {
                start: whole.start(),
                end: whole.end(),
                name: name.as_str(),
            })
        })
    }
}

/// A literal emoji found by [`UnicodeEmojiMatcher`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmojiMatch<'t> {
    pub start: usize,
    pub end: usize,
    pub emoji: &'t str,
}

/// Finds emoji grapheme clusters.
///
/// Text is split into extended grapheme clusters, so skin-tone modifiers,
/// flags, keycaps and ZWJ sequences stay in one piece. A cluster is an emoji
/// when the `emojis` database knows it in fully-qualified, minimally-qualified
/// or unqualified form. A cluster that is only recognised once trailing
/// zero-width joiners or VS16 are removed matches without them; those
/// codepoints are left in the surrounding text. VS15 (text presentation) is
/// never trimmed, so `☺\u{fe0e}` stays text.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeEmojiMatcher;

impl UnicodeEmojiMatcher {
    pub fn new() -> Self {
        Self
    }

    /// True if the whole string is a single known emoji.
    #[inline]
    pub fn is_emoji(cluster: &str) -> bool {
        emojis::get(cluster).is_some()
    }

    pub fn find_iter<'t>(&self, text: &'t str) -> EmojiMatches<'t> {
        EmojiMatches {
            graphemes: text.grapheme_indices(true),
        }
    }
}

/// Iterator over [`EmojiMatch`]es, created by [`UnicodeEmojiMatcher::find_iter`].
pub struct EmojiMatches<'t> {
    graphemes: GraphemeIndices<'t>,
}

impl<'t> Iterator for EmojiMatches<'t> {
    type Item = EmojiMatch<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        for (start, cluster) in self.graphemes.by_ref() {
            if let Some(emoji) = emoji_prefix(cluster) {
                return Some(EmojiMatch {
                    start,
                    end: start + emoji.len(),
                    emoji,
                });
            }
        }
        None
    }
}

/// The cluster itself if it is an emoji, else the longest emoji left after
/// popping trailing helper codepoints one at a time.
fn emoji_prefix(cluster: &str) -> Option<&str> {
    let mut candidate = cluster;
    loop {
        if UnicodeEmojiMatcher::is_emoji(candidate) {
            return Some(candidate);
        }
        let last = candidate.chars().next_back()?;
        if !is_helper_codepoint(last) {
            return None;
        }
        candidate = &candidate[..candidate.len() - last.len_utf8()];
    }
}
