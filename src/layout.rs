//! Layout IR – the intermediate representation between document
//! composition and PDF rendering. This is the "frozen" structure that
//! encodes exactly what goes on each page.
//!
//! Coordinates are PDF points with the origin at the page top-left; text
//! `y` is the baseline. The renderer flips to the PDF bottom-left origin.

use serde::{Deserialize, Serialize};

/// A4 portrait, the only page size of the invoice template.
pub const A4_WIDTH_PT: f32 = 595.28;
pub const A4_HEIGHT_PT: f32 = 841.89;

/// One centimetre in PDF points. The page template is specified in cm.
pub const CM: f32 = 28.3465;

/// Font selection for a text run. `Rupee` is the embedded face carrying
/// the U+20B9 glyph; the builtin Helvetica faces cannot encode it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FontSel {
    Regular,
    Bold,
    Rupee,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// A drawing primitive on one page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Primitive {
    /// Stroked rectangle; `x`/`y` is the top-left corner.
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        line_width: f32,
    },
    /// Straight stroked line segment.
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        line_width: f32,
    },
    /// Single-line text run. `x` is the anchor the alignment resolves
    /// against; `y` is the baseline measured from the page top.
    Text {
        x: f32,
        y: f32,
        text: String,
        size: f32,
        font: FontSel,
        align: TextAlign,
        #[serde(default)]
        underline: bool,
    },
}

/// One page of primitives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageLayout {
    pub page_index: usize,
    pub prims: Vec<Primitive>,
}

impl PageLayout {
    pub fn new(page_index: usize) -> Self {
        Self {
            page_index,
            prims: Vec::new(),
        }
    }

    pub fn rect(&mut self, x: f32, y: f32, width: f32, height: f32, line_width: f32) {
        self.prims.push(Primitive::Rect {
            x,
            y,
            width,
            height,
            line_width,
        });
    }

    pub fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, line_width: f32) {
        self.prims.push(Primitive::Line {
            x1,
            y1,
            x2,
            y2,
            line_width,
        });
    }

    pub fn text(
        &mut self,
        x: f32,
        y: f32,
        text: impl Into<String>,
        size: f32,
        font: FontSel,
        align: TextAlign,
    ) {
        let text = text.into();
        if text.is_empty() {
            return;
        }
        self.prims.push(Primitive::Text {
            x,
            y,
            text,
            size,
            font,
            align,
            underline: false,
        });
    }

    /// All text runs on the page, for assertions and debugging.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.prims.iter().filter_map(|p| match p {
            Primitive::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().any(|t| t.contains(needle))
    }
}

/// A complete document layout ready for rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentLayout {
    /// Document title embedded in the PDF metadata.
    pub title: String,
    pub page_width_pt: f32,
    pub page_height_pt: f32,
    pub pages: Vec<PageLayout>,
}

impl DocumentLayout {
    pub fn a4(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            page_width_pt: A4_WIDTH_PT,
            page_height_pt: A4_HEIGHT_PT,
            pages: Vec::new(),
        }
    }

    /// Serialise to JSON.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Deserialise from JSON.
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| e.to_string())
    }
}
