//! Font resources and text measurement using `ttf-parser`.
//!
//! The document body uses the PDF builtin Helvetica faces; the grand-total
//! cell needs the rupee sign (U+20B9), which no WinAnsi builtin can encode,
//! so a TTF carrying that glyph is loaded once up front. Registration is an
//! explicit initialization step returning a handle that is passed into the
//! renderer – there is no ambient global font state.

use std::path::Path;

use crate::error::InvoiceError;
use crate::layout::FontSel;

/// The glyph the embedded face must provide.
pub const RUPEE_SIGN: char = '\u{20B9}';

/// A loaded TTF face with the metrics needed for measurement.
#[derive(Clone)]
struct EmbeddedFace {
    /// Raw font bytes (kept alive for ttf-parser's zero-copy API and for
    /// embedding into the PDF).
    bytes: Vec<u8>,
    units_per_em: f32,
}

/// Font handle for one or more document generations. Cheap to share by
/// reference; generations on separate inputs may use the same store
/// concurrently.
#[derive(Clone, Default)]
pub struct FontStore {
    rupee: Option<EmbeddedFace>,
}

impl FontStore {
    /// Load the rupee-glyph TTF from disk. Fails fast: a missing file, an
    /// unparseable font, or a font without U+20B9 aborts initialization.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, InvoiceError> {
        let bytes = std::fs::read(path.as_ref())?;
        Self::from_bytes(bytes)
    }

    /// Build the store from raw TTF bytes, validating the rupee glyph.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, InvoiceError> {
        let face = ttf_parser::Face::parse(&bytes, 0)
            .map_err(|e| InvoiceError::missing_resource(format!("unparseable font: {e}")))?;
        if face.glyph_index(RUPEE_SIGN).is_none() {
            return Err(InvoiceError::missing_resource(format!(
                "font has no glyph for {RUPEE_SIGN:?} (U+20B9)"
            )));
        }
        let units_per_em = face.units_per_em() as f32;
        Ok(Self {
            rupee: Some(EmbeddedFace { bytes, units_per_em }),
        })
    }

    /// Whether the embedded rupee face is available. A store built via
    /// `Default` measures text but cannot render the grand-total cell.
    pub fn has_rupee_face(&self) -> bool {
        self.rupee.is_some()
    }

    /// Raw bytes of the embedded face for PDF embedding.
    pub fn rupee_font_bytes(&self) -> Option<&[u8]> {
        self.rupee.as_ref().map(|f| f.bytes.as_slice())
    }

    /// Measure the width of a single-line string at `size` points.
    ///
    /// The builtin faces use the Helvetica proportional-width heuristic
    /// (average char ≈ 0.5 × size, bold ~10% wider); the embedded face is
    /// measured from actual glyph advances.
    pub fn measure_text(&self, text: &str, size: f32, font: FontSel) -> f32 {
        match font {
            FontSel::Regular => text.chars().count() as f32 * size * 0.5,
            FontSel::Bold => text.chars().count() as f32 * size * 0.55,
            FontSel::Rupee => self.measure_embedded(text, size),
        }
    }

    fn measure_embedded(&self, text: &str, size: f32) -> f32 {
        let Some(face_data) = &self.rupee else {
            return text.chars().count() as f32 * size * 0.5;
        };
        let Ok(face) = ttf_parser::Face::parse(&face_data.bytes, 0) else {
            return text.chars().count() as f32 * size * 0.5;
        };
        let scale = size / face_data.units_per_em;
        text.chars()
            .map(|ch| match face.glyph_index(ch) {
                Some(gid) => face.glyph_hor_advance(gid).unwrap_or(0) as f32 * scale,
                None => size * 0.5,
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heuristic_width_for_builtin_faces() {
        let store = FontStore::default();
        let w = store.measure_text("Hello", 16.0, FontSel::Regular);
        // 5 chars × 16 × 0.5 = 40
        assert!((w - 40.0).abs() < 0.1);
        let bold = store.measure_text("Hello", 16.0, FontSel::Bold);
        assert!(bold > w);
    }

    #[test]
    fn default_store_has_no_rupee_face() {
        let store = FontStore::default();
        assert!(!store.has_rupee_face());
        assert!(store.rupee_font_bytes().is_none());
    }

    #[test]
    fn garbage_bytes_are_rejected_as_missing_resource() {
        let result = FontStore::from_bytes(vec![0u8; 64]);
        assert!(matches!(result, Err(InvoiceError::MissingResource(_))));
    }

    #[test]
    fn missing_file_surfaces_io_error() {
        let result = FontStore::load("/nonexistent/rupee.ttf");
        assert!(matches!(result, Err(InvoiceError::Io(_))));
    }

    #[test]
    fn embedded_measurement_falls_back_without_a_face() {
        let store = FontStore::default();
        let w = store.measure_text("\u{20B9} 10.00", 9.0, FontSel::Rupee);
        assert!(w > 0.0);
    }
}
