use std::borrow::Cow;
use std::path::Path;
use std::sync::{Arc, LazyLock};

use rayon::prelude::*;
use thiserror::Error;

use super::aliases::{AliasTable, AsciiAliasTable, TableError};
use super::fragment::Fragment;
use super::matchers::{AsciiMatch, AsciiMatcher, ShortcodeMatcher, UnicodeEmojiMatcher};
use super::options::ConversionOptions;

#[derive(Error, Debug)]
pub enum ConverterError {
    #[error("Regex compilation error: {0}")]
    RegexError(#[from] regex::Error),
    #[error("Alias table error: {0}")]
    TableError(#[from] TableError),
    #[error("Unknown preset: {0}")]
    UnknownPreset(String),
}

/// Process-wide converter over the built-in tables, built on first use.
static DEFAULT_CONVERTER: LazyLock<Converter> =
    LazyLock::new(|| Converter::builtin().expect("built-in alias tables compile"));

/// The shared converter over the built-in tables.
pub fn default_converter() -> &'static Converter {
    &DEFAULT_CONVERTER
}

/// Convert text with the built-in tables.
///
/// Shorthand for `default_converter().convert(text, options)`.
pub fn to_fragments(text: &str, options: &ConversionOptions) -> Vec<Fragment> {
    DEFAULT_CONVERTER.convert(text, options)
}

/// Text-to-fragment converter.
///
/// Conversion runs four steps, each on the output of the one before:
///
/// 1. **Emoticons** ([`replace_ascii_aliases`]): `:)` → `:smiley:`, unless the
///    emoticon is glued to a preceding character or its colon-stripped text
///    is already a shortcode.
/// 2. **Shortcodes** ([`replace_shortcodes`]): `:smiley:` → `😃`; unknown
///    shortcodes stay as written.
/// 3. **Emoji** ([`split_unicode_emoji`]): the text is split around every
///    emoji cluster into text and glyph or image fragments.
/// 4. **Cleanup**: text fragments holding only a stray VS16 are dropped.
///
/// The converter holds only read-only state, so one instance can serve any
/// number of threads. Identical `(text, options)` always produce identical
/// fragments, see [`CachedConverter`](super::cache::CachedConverter) for
/// memoization on top.
///
/// [`replace_ascii_aliases`]: Converter::replace_ascii_aliases
/// [`replace_shortcodes`]: Converter::replace_shortcodes
/// [`split_unicode_emoji`]: Converter::split_unicode_emoji
#[derive(Debug, Clone)]
pub struct Converter {
    aliases: Arc<AliasTable>,
    ascii_aliases: Arc<AsciiAliasTable>,
    ascii_matcher: AsciiMatcher,
    shortcode_matcher: ShortcodeMatcher,
    emoji_matcher: UnicodeEmojiMatcher,
}

impl Converter {
    /// Create a converter over the given tables.
    pub fn new(
        aliases: AliasTable,
        ascii_aliases: AsciiAliasTable,
    ) -> Result<Self, ConverterError> {
        Self::from_shared(Arc::new(aliases), Arc::new(ascii_aliases))
    }

    /// Create a converter over tables shared with other converters.
    pub fn from_shared(
        aliases: Arc<AliasTable>,
        ascii_aliases: Arc<AsciiAliasTable>,
    ) -> Result<Self, ConverterError> {
        let ascii_matcher = AsciiMatcher::new(&ascii_aliases)?;
        let shortcode_matcher = ShortcodeMatcher::new()?;

        log::debug!(
            "converter ready: {} shortcodes, {} emoticon shortcodes",
            aliases.len(),
            ascii_aliases.len()
        );

        Ok(Self {
            aliases,
            ascii_aliases,
            ascii_matcher,
            shortcode_matcher,
            emoji_matcher: UnicodeEmojiMatcher::new(),
        })
    }

    /// Create a converter over the built-in GitHub shortcodes and emoticons.
    pub fn builtin() -> Result<Self, ConverterError> {
        Self::new(AliasTable::builtin(), AsciiAliasTable::builtin())
    }

    /// Create a converter from JSON alias data.
    pub fn from_json(aliases: &[u8], ascii_aliases: &[u8]) -> Result<Self, ConverterError> {
        Self::new(
            AliasTable::from_json(aliases)?,
            AsciiAliasTable::from_json(ascii_aliases)?,
        )
    }

    /// Create a converter from JSON alias files.
    pub fn from_json_files(
        aliases_path: impl AsRef<Path>,
        ascii_aliases_path: impl AsRef<Path>,
    ) -> Result<Self, ConverterError> {
        Self::new(
            AliasTable::from_json_file(aliases_path)?,
            AsciiAliasTable::from_json_file(ascii_aliases_path)?,
        )
    }

    /// Convert text into fragments.
    ///
    /// Never fails: unknown shortcodes and emoticons stay literal text. The
    /// empty string converts to a single empty text fragment.
    pub fn convert(&self, text: &str, options: &ConversionOptions) -> Vec<Fragment> {
        if text.is_empty() {
            return vec![Fragment::text("")];
        }

        let text = self.replace_ascii_aliases(text);
        let text = self.replace_shortcodes(&text);

        let mut fragments = self.split_unicode_emoji(&text, options);
        fragments.retain(|f| !f.is_stray_selector());
        fragments
    }

    /// Rewrite ASCII emoticons to their canonical `:shortcode:`.
    ///
    /// Returns the input unchanged (borrowed) when nothing was rewritten.
    pub fn replace_ascii_aliases<'t>(&self, text: &'t str) -> Cow<'t, str> {
        let mut result = String::new();
        let mut last_end = 0;

        for m in self.ascii_matcher.find_iter(text) {
            let Some(shortcode) = self.ascii_rewrite(&m) else {
                continue;
            };

            result.push_str(&text[last_end..m.end - m.variant.len()]);
            result.push(':');
            result.push_str(shortcode);
            result.push(':');
            last_end = m.end;
        }

        if last_end == 0 {
            return Cow::Borrowed(text);
        }
        result.push_str(&text[last_end..]);
        Cow::Owned(result)
    }

    /// The shortcode an emoticon match should become, if it should be
    /// rewritten at all.
    fn ascii_rewrite(&self, m: &AsciiMatch<'_>) -> Option<&str> {
        let shortcode = self.ascii_aliases.shortcode_for(m.variant)?;

        if m.is_edge_case() {
            return None;
        }

        // An emoticon spelled like an existing shortcode keeps that meaning.
        let name = m.variant.strip_prefix(':').unwrap_or(m.variant);
        let name = name.strip_suffix(':').unwrap_or(name);
        if self.aliases.contains(name) {
            return None;
        }

        Some(shortcode)
    }

    /// Replace every known `:shortcode:` with its emoji.
    ///
    /// Returns the input unchanged (borrowed) when nothing was replaced.
    pub fn replace_shortcodes<'t>(&self, text: &'t str) -> Cow<'t, str> {
        let mut result = String::new();
        let mut last_end = 0;

        for m in self.shortcode_matcher.find_iter(text) {
            let Some(emoji) = self.aliases.get(m.name) else {
                continue;
            };

            result.push_str(&text[last_end..m.start]);
            result.push_str(emoji);
            last_end = m.end;
        }

        if last_end == 0 {
            return Cow::Borrowed(text);
        }
        result.push_str(&text[last_end..]);
        Cow::Owned(result)
    }

    /// Split text around literal emoji.
    ///
    /// Runs of non-emoji text become [`Fragment::Text`]; each emoji becomes a
    /// [`Fragment::Glyph`] or, with a base URL configured, a
    /// [`Fragment::Image`]. Stray variation selectors are kept here; the
    /// cleanup step of [`convert`](Converter::convert) removes them.
    pub fn split_unicode_emoji(&self, text: &str, options: &ConversionOptions) -> Vec<Fragment> {
        let mut fragments = Vec::new();
        let mut last_end = 0;

        for m in self.emoji_matcher.find_iter(text) {
            if m.start > last_end {
                fragments.push(Fragment::text(&text[last_end..m.start]));
            }
            fragments.push(render_emoji(m.emoji, options));
            last_end = m.end;
        }

        if last_end < text.len() {
            fragments.push(Fragment::text(&text[last_end..]));
        }

        fragments
    }

    /// Batch convert multiple texts in parallel.
    pub fn convert_batch(
        &self,
        texts: &[String],
        options: &ConversionOptions,
    ) -> Vec<Vec<Fragment>> {
        texts
            .par_iter()
            .map(|text| self.convert(text, options))
            .collect()
    }

    /// Get the shortcode table.
    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    /// Get the emoticon table.
    pub fn ascii_aliases(&self) -> &AsciiAliasTable {
        &self.ascii_aliases
    }
}

/// Render one matched emoji according to the options.
fn render_emoji(emoji: &str, options: &ConversionOptions) -> Fragment {
    match options.image_url(emoji) {
        Some(src) => Fragment::Image {
            alt: emoji.to_string(),
            src,
            class_name: options.class_name.clone(),
            attributes: options.attributes.clone(),
        },
        None => Fragment::Glyph {
            content: emoji.to_string(),
            class_name: options.class_name.clone(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashMap;

    fn make_test_converter() -> Converter {
        let mut aliases = FxHashMap::default();
        aliases.insert("smile".to_string(), "😄".to_string());
        aliases.insert("smiley".to_string(), "😃".to_string());
        aliases.insert("wink".to_string(), "😉".to_string());

        let ascii = AsciiAliasTable::new([
            ("smiley", vec![":)", ":-)"]),
            ("wink", vec![";)"]),
            ("smile", vec![":D"]),
        ])
        .unwrap();

        Converter::new(AliasTable::new(aliases), ascii).unwrap()
    }

    fn glyph(content: &str) -> Fragment {
        Fragment::Glyph {
            content: content.to_string(),
            class_name: None,
        }
    }

    #[test]
    fn test_replace_ascii_aliases() {
        let converter = make_test_converter();
        assert_eq!(converter.replace_ascii_aliases("hi :) ;)"), "hi :smiley: :wink:");
        assert_eq!(converter.replace_ascii_aliases("x :D."), "x :smile:.");
    }

    #[test]
    fn test_replace_ascii_borrows_when_unchanged() {
        let converter = make_test_converter();
        assert!(matches!(
            converter.replace_ascii_aliases("nothing here"),
            Cow::Borrowed(_)
        ));
        assert!(matches!(
            converter.replace_ascii_aliases("word:)"),
            Cow::Borrowed(_)
        ));
    }

    #[test]
    fn test_replace_shortcodes() {
        let converter = make_test_converter();
        assert_eq!(converter.replace_shortcodes(":smile: :nope:"), "😄 :nope:");
        assert!(matches!(
            converter.replace_shortcodes(":nope:"),
            Cow::Borrowed(_)
        ));
    }

    #[test]
    fn test_split_unicode_emoji() {
        let converter = make_test_converter();
        let fragments = converter.split_unicode_emoji("a😄b", &ConversionOptions::default());
        assert_eq!(
            fragments,
            vec![Fragment::text("a"), glyph("😄"), Fragment::text("b")]
        );
    }

    #[test]
    fn test_convert_pipeline_order() {
        let converter = make_test_converter();
        let fragments = converter.convert(":) and :wink:", &ConversionOptions::default());
        assert_eq!(
            fragments,
            vec![glyph("😃"), Fragment::text(" and "), glyph("😉")]
        );
    }

    #[test]
    fn test_ascii_shadowed_by_shortcode() {
        let mut aliases = FxHashMap::default();
        aliases.insert(")".to_string(), "🌙".to_string());
        aliases.insert("smiley".to_string(), "😃".to_string());
        let ascii = AsciiAliasTable::new([("smiley", vec![":)"])]).unwrap();
        let converter = Converter::new(AliasTable::new(aliases), ascii).unwrap();

        let fragments = converter.convert(":)", &ConversionOptions::default());
        assert_eq!(fragments, vec![Fragment::text(":)")]);
    }

    #[test]
    fn test_empty_input() {
        let converter = make_test_converter();
        assert_eq!(
            converter.convert("", &ConversionOptions::default()),
            vec![Fragment::text("")]
        );
    }

    #[test]
    fn test_stray_selector_dropped() {
        let converter = make_test_converter();
        let fragments = converter.convert("\u{1f604}\u{fe0f}", &ConversionOptions::default());
        assert_eq!(fragments, vec![glyph("\u{1f604}")]);

        let only_selector = converter.convert("\u{fe0f}", &ConversionOptions::default());
        assert!(only_selector.is_empty());
    }

    #[test]
    fn test_image_fragment() {
        let converter = make_test_converter();
        let options = ConversionOptions::new()
            .base_url("/emoji/")
            .protocol("")
            .size(64)
            .class_name("emoji")
            .attribute("loading", "lazy");
        let fragments = converter.convert(":smile:", &options);
        assert_eq!(fragments.len(), 1);
        match &fragments[0] {
            Fragment::Image {
                alt,
                src,
                class_name,
                attributes,
            } => {
                assert_eq!(alt, "😄");
                assert_eq!(src, "/emoji/64/1f604.png");
                assert_eq!(class_name.as_deref(), Some("emoji"));
                assert_eq!(attributes.get("loading").map(String::as_str), Some("lazy"));
            }
            other => panic!("expected image, got {:?}", other),
        }
    }

    #[test]
    fn test_batch_convert() {
        let converter = make_test_converter();
        let texts = vec![":smile:".to_string(), "plain".to_string()];
        let batch = converter.convert_batch(&texts, &ConversionOptions::default());
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0], vec![glyph("😄")]);
        assert_eq!(batch[1], vec![Fragment::text("plain")]);
    }

    #[test]
    fn test_default_converter() {
        let fragments = to_fragments(":smile:", &ConversionOptions::default());
        assert_eq!(fragments, vec![glyph("😄")]);
        assert!(default_converter().aliases().contains("rocket"));
    }

    #[test]
    fn test_converter_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Converter>();
    }
}
