pub mod core;
#[cfg(feature = "python")]
mod python;

pub use crate::core::{
    default_converter, from_preset, is_only_emoji, normalize_protocol, presets, to_codepoints,
    to_fragments, to_plain_text, AliasTable, AsciiAliasTable, CachedConverter, ConversionOptions,
    Converter, ConverterError, Fragment, Preset, Size, TableError,
};
