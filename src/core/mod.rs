//! Core conversion engine for emoji-render.
//!
//! This module turns text containing emoji shortcodes (`:smile:`), ASCII
//! emoticons (`:)`) and literal emoji into renderable fragments.
//!
//! # Architecture
//!
//! - [`Converter`]: the conversion pipeline, with per-pass entry points and
//!   Rayon batch conversion
//! - [`aliases`]: shortcode and emoticon tables, built-in or loaded from JSON
//! - [`matchers`]: emoticon, shortcode and emoji-cluster scanners
//! - [`codepoint`]: emoji → hex codepoint sequences for artwork file names
//! - [`ConversionOptions`]: glyph vs. image output and URL layout
//! - [`Fragment`] and [`is_only_emoji`]: output units and classification
//! - [`CachedConverter`]: LRU memoization in front of a converter
//! - [`presets`]: options for Twemoji and EmojiOne artwork

pub mod aliases;
mod cache;
pub mod codepoint;
mod converter;
mod fragment;
pub mod matchers;
mod options;
pub mod presets;

pub use aliases::{AliasTable, AsciiAliasTable, TableError};
pub use cache::{CachedConverter, DEFAULT_CACHE_SIZE};
pub use codepoint::{from_codepoints, to_codepoints};
pub use converter::{default_converter, to_fragments, Converter, ConverterError};
pub use fragment::{is_only_emoji, to_plain_text, Fragment, MAX_ONLY_EMOJI_FRAGMENTS};
pub use options::{normalize_protocol, ConversionOptions, Size, DEFAULT_EXT, DEFAULT_PROTOCOL};
pub use presets::{from_preset, Preset};
