mod bindings;

use crate::core::presets::Preset;
pub use bindings::{to_codepoints, PyConverter, PyFragment};

use pyo3::prelude::*;

/// emoji-render - emoji shortcodes, emoticons and emoji to renderable fragments
///
/// - `:smile:` shortcodes (GitHub set) and `:)` emoticons
/// - Glyph or image output with Twemoji / EmojiOne URL layout
/// - Rayon parallelism for batch conversion
#[pymodule]
fn _core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyConverter>()?;
    m.add_class::<PyFragment>()?;
    m.add_function(wrap_pyfunction!(to_codepoints, m)?)?;
    m.add("PRESETS", Preset::supported_names().to_vec())?;
    Ok(())
}
