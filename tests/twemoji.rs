//! Integration tests for the Twemoji presets.
//!
//! These tests verify that emoji render as images whose URLs follow the
//! Twemoji CDN layout, for both the SVG and the 72x72 PNG artwork.

use std::sync::LazyLock;

use emoji_render::{default_converter, from_preset, ConversionOptions, Fragment};

/// Shared preset options.
static TWEMOJI: LazyLock<ConversionOptions> =
    LazyLock::new(|| from_preset("twemoji").expect("twemoji preset"));

fn image_sources(text: &str, options: &ConversionOptions) -> Vec<String> {
    default_converter()
        .convert(text, options)
        .into_iter()
        .filter_map(|fragment| match fragment {
            Fragment::Image { src, .. } => Some(src),
            _ => None,
        })
        .collect()
}

/// Verify the SVG URL for a shortcode.
#[test]
fn test_twemoji_svg_url() {
    assert_eq!(
        image_sources(":smile:", &TWEMOJI),
        vec!["https://twemoji.maxcdn.com/2/svg/1f604.svg"]
    );
}

/// Verify the PNG URL uses the 72x72 directory.
#[test]
fn test_twemoji_png_url() {
    let options = from_preset("twemoji_png").unwrap();
    assert_eq!(
        image_sources("🦀", &options),
        vec!["https://twemoji.maxcdn.com/2/72x72/1f980.png"]
    );
}

/// Twemoji keeps joiners in its file names.
#[test]
fn test_twemoji_keeps_joiners() {
    let family = "\u{1f468}\u{200d}\u{1f469}\u{200d}\u{1f467}";
    assert_eq!(
        image_sources(family, &TWEMOJI),
        vec!["https://twemoji.maxcdn.com/2/svg/1f468-200d-1f469-200d-1f467.svg"]
    );
}

/// An explicit protocol overrides the https default.
#[test]
fn test_twemoji_protocol_override() {
    let options = TWEMOJI.clone().protocol("http");
    assert_eq!(
        image_sources(":smile:", &options),
        vec!["http://twemoji.maxcdn.com/2/svg/1f604.svg"]
    );
}

/// Image fragments keep the emoji as alt text and carry class and attributes.
#[test]
fn test_twemoji_image_fragment() {
    let options = TWEMOJI
        .clone()
        .class_name("emoji")
        .attribute("draggable", "false");

    let fragments = default_converter().convert("hi :)", &options);
    assert_eq!(fragments.len(), 2);
    assert_eq!(fragments[0], Fragment::text("hi "));
    match &fragments[1] {
        Fragment::Image {
            alt,
            class_name,
            attributes,
            ..
        } => {
            assert_eq!(alt, "😃");
            assert_eq!(class_name.as_deref(), Some("emoji"));
            assert_eq!(attributes.get("draggable").map(String::as_str), Some("false"));
        }
        other => panic!("expected image, got {:?}", other),
    }
}
