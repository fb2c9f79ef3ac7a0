//! Python bindings for the emoji-render converter.
//!
//! This module provides PyO3 wrappers around the core Rust converter,
//! exposing a Python-friendly API.
//!
//! # Thread Safety
//!
//! The converter is immutable and can be shared across Python threads.
//! Batch conversion releases the GIL and uses Rayon for parallelism.
//!
//! # Example
//!
//! ```python
//! from emoji_render import Converter
//!
//! converter = Converter.from_preset("twemoji")
//! for fragment in converter.convert("Ship it :rocket:"):
//!     print(fragment.kind, fragment.content, fragment.src)
//! ```

use std::collections::HashMap;

use pyo3::exceptions::{PyIOError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::core::{
    from_preset, is_only_emoji, to_codepoints as encode_codepoints, ConversionOptions, Converter,
    ConverterError, Fragment, Size,
};

fn to_py_err(err: ConverterError) -> PyErr {
    match err {
        ConverterError::TableError(crate::core::TableError::IoError(e)) => {
            PyIOError::new_err(e.to_string())
        }
        other => PyValueError::new_err(other.to_string()),
    }
}

/// Python view of a [`Fragment`].
#[pyclass(name = "Fragment", get_all)]
#[derive(Clone)]
pub struct PyFragment {
    /// "text", "glyph" or "image"
    kind: String,
    /// Text or emoji; the alt text for images
    content: String,
    src: Option<String>,
    class_name: Option<String>,
    attributes: HashMap<String, String>,
}

#[pymethods]
impl PyFragment {
    fn __repr__(&self) -> String {
        match &self.src {
            Some(src) => format!("Fragment({}, {:?}, src={:?})", self.kind, self.content, src),
            None => format!("Fragment({}, {:?})", self.kind, self.content),
        }
    }
}

impl From<Fragment> for PyFragment {
    fn from(fragment: Fragment) -> Self {
        match fragment {
            Fragment::Text { content } => Self {
                kind: "text".to_string(),
                content,
                src: None,
                class_name: None,
                attributes: HashMap::new(),
            },
            Fragment::Glyph {
                content,
                class_name,
            } => Self {
                kind: "glyph".to_string(),
                content,
                src: None,
                class_name,
                attributes: HashMap::new(),
            },
            Fragment::Image {
                alt,
                src,
                class_name,
                attributes,
            } => Self {
                kind: "image".to_string(),
                content: alt,
                src: Some(src),
                class_name,
                attributes: attributes.into_iter().collect(),
            },
        }
    }
}

/// Python wrapper for the Rust Converter, bundled with its options.
#[pyclass(name = "Converter")]
pub struct PyConverter {
    inner: Converter,
    options: ConversionOptions,
}

#[pymethods]
impl PyConverter {
    /// Create a converter from JSON alias files.
    ///
    /// Args:
    ///     aliases_path: Path to a JSON object of shortcode -> emoji
    ///     ascii_aliases_path: Path to a JSON object of shortcode -> [emoticons]
    #[new]
    fn new(aliases_path: &str, ascii_aliases_path: &str) -> PyResult<Self> {
        let inner = Converter::from_json_files(aliases_path, ascii_aliases_path)
            .map_err(to_py_err)?;
        Ok(Self {
            inner,
            options: ConversionOptions::default(),
        })
    }

    /// Create a converter over the built-in GitHub shortcodes and emoticons.
    #[staticmethod]
    fn builtin() -> PyResult<Self> {
        let inner = Converter::builtin().map_err(to_py_err)?;
        Ok(Self {
            inner,
            options: ConversionOptions::default(),
        })
    }

    /// Create a built-in converter rendering images for a preset.
    ///
    /// Supported: "twemoji", "twemoji_png", "emojione", "emojione_v4"
    #[staticmethod]
    fn from_preset(name: &str) -> PyResult<Self> {
        let options = from_preset(name).map_err(to_py_err)?;
        let inner = Converter::builtin().map_err(to_py_err)?;
        Ok(Self { inner, options })
    }

    /// Return a copy of this converter with new options.
    ///
    /// Args:
    ///     base_url: Artwork base URL; None renders glyphs
    ///     protocol: URL protocol; None means "https:", "" means none
    ///     size: Pixel size (int or float) or size label (str)
    ///     ext: Image extension
    ///     class_name: Class for every emoji fragment
    ///     attributes: Extra image attributes
    ///     strip_helper_codepoints: Drop ZWJ and VS16 from file names
    #[pyo3(signature = (
        base_url=None,
        protocol=None,
        size=None,
        ext="png",
        class_name=None,
        attributes=None,
        strip_helper_codepoints=false
    ))]
    #[allow(clippy::too_many_arguments)]
    fn with_options(
        &self,
        base_url: Option<String>,
        protocol: Option<String>,
        size: Option<&Bound<'_, PyAny>>,
        ext: &str,
        class_name: Option<String>,
        attributes: Option<&Bound<'_, PyDict>>,
        strip_helper_codepoints: bool,
    ) -> PyResult<Self> {
        let size = match size {
            None => None,
            Some(value) => Some(if let Ok(px) = value.extract::<u32>() {
                Size::Pixels(px)
            } else if let Ok(n) = value.extract::<f64>() {
                Size::from(n)
            } else {
                Size::Label(value.extract::<String>()?)
            }),
        };
        let attributes = match attributes {
            Some(dict) => dict.extract()?,
            None => Default::default(),
        };

        let options = ConversionOptions {
            base_url,
            protocol,
            size,
            ext: ext.to_string(),
            class_name,
            attributes,
            strip_helper_codepoints,
        };

        Ok(Self {
            inner: self.inner.clone(),
            options,
        })
    }

    /// Convert text into a list of fragments.
    fn convert(&self, text: &str) -> Vec<PyFragment> {
        self.inner
            .convert(text, &self.options)
            .into_iter()
            .map(PyFragment::from)
            .collect()
    }

    /// Batch convert multiple texts in parallel.
    fn convert_batch(&self, py: Python<'_>, texts: Vec<String>) -> Vec<Vec<PyFragment>> {
        let batch = py.allow_threads(|| self.inner.convert_batch(&texts, &self.options));
        batch
            .into_iter()
            .map(|fragments| fragments.into_iter().map(PyFragment::from).collect())
            .collect()
    }

    /// True if the text converts to nothing but (at most three) emoji.
    fn is_only_emoji(&self, text: &str) -> bool {
        is_only_emoji(&self.inner.convert(text, &self.options))
    }

    /// Rewrite emoticons and shortcodes, returning the resulting text.
    fn replace_aliases(&self, text: &str) -> String {
        let text = self.inner.replace_ascii_aliases(text);
        self.inner.replace_shortcodes(&text).into_owned()
    }

    #[getter]
    fn base_url(&self) -> Option<String> {
        self.options.base_url.clone()
    }
}

/// Encode an emoji as its hyphen-joined hex codepoint sequence.
#[pyfunction]
#[pyo3(signature = (emoji, strip_helpers=false))]
pub fn to_codepoints(emoji: &str, strip_helpers: bool) -> String {
    encode_codepoints(emoji, strip_helpers)
}
