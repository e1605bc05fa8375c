//! PDF renderer – takes a [`DocumentLayout`] and produces PDF bytes using
//! `printpdf` (v0.8 ops-based API).
//!
//! Body text uses the builtin Helvetica faces (WinAnsi-encoded); text runs
//! selecting [`FontSel::Rupee`] are written with the embedded face from the
//! [`FontStore`], which is registered once per document.

use printpdf::*;

use crate::error::InvoiceError;
use crate::fonts::FontStore;
use crate::layout::{DocumentLayout, FontSel, Primitive, TextAlign};

const BLACK: Color = Color::Rgb(Rgb {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    icc_profile: None,
});

/// Render a document layout into PDF bytes.
///
/// Fails with [`InvoiceError::MissingResource`] when the layout contains a
/// rupee-face text run and the store has no embedded face – the document
/// must never go out with a substituted currency glyph.
pub fn render_pdf(layout: &DocumentLayout, fonts: &FontStore) -> Result<Vec<u8>, InvoiceError> {
    let mut doc = PdfDocument::new(&layout.title);

    let needs_rupee = layout.pages.iter().any(|page| {
        page.prims
            .iter()
            .any(|p| matches!(p, Primitive::Text { font: FontSel::Rupee, .. }))
    });

    let rupee_font = if needs_rupee {
        let bytes = fonts.rupee_font_bytes().ok_or_else(|| {
            InvoiceError::missing_resource("no embedded font loaded for the currency glyph")
        })?;
        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        let parsed = ParsedFont::from_bytes(bytes, 0, &mut warnings).ok_or_else(|| {
            InvoiceError::missing_resource("embedded font rejected by the PDF backend")
        })?;
        Some(doc.add_font(&parsed))
    } else {
        None
    };

    let page_w = Mm(layout.page_width_pt * 0.352778); // pt → mm
    let page_h = Mm(layout.page_height_pt * 0.352778);

    let mut pages = Vec::new();
    for page_layout in &layout.pages {
        let mut ops = Vec::new();
        for prim in &page_layout.prims {
            render_primitive(&mut ops, prim, layout.page_height_pt, fonts, &rupee_font);
        }
        pages.push(PdfPage::new(page_w, page_h, ops));
    }

    // Ensure at least one page.
    if pages.is_empty() {
        pages.push(PdfPage::new(page_w, page_h, Vec::new()));
    }

    doc.with_pages(pages);
    Ok(doc.save(&PdfSaveOptions::default(), &mut Vec::new()))
}

fn render_primitive(
    ops: &mut Vec<Op>,
    prim: &Primitive,
    page_height: f32,
    fonts: &FontStore,
    rupee_font: &Option<FontId>,
) {
    match prim {
        Primitive::Rect {
            x,
            y,
            width,
            height,
            line_width,
        } => {
            // Layout origin is top-left; PDF origin is bottom-left.
            let top = page_height - y;
            let bottom = top - height;
            ops.push(Op::SetOutlineColor { col: BLACK });
            ops.push(Op::SetOutlineThickness {
                pt: Pt(*line_width),
            });
            ops.push(Op::DrawLine {
                line: Line {
                    points: corner_points(&[
                        (*x, top),
                        (x + width, top),
                        (x + width, bottom),
                        (*x, bottom),
                    ]),
                    is_closed: true,
                },
            });
        }
        Primitive::Line {
            x1,
            y1,
            x2,
            y2,
            line_width,
        } => {
            ops.push(Op::SetOutlineColor { col: BLACK });
            ops.push(Op::SetOutlineThickness {
                pt: Pt(*line_width),
            });
            ops.push(Op::DrawLine {
                line: Line {
                    points: corner_points(&[(*x1, page_height - y1), (*x2, page_height - y2)]),
                    is_closed: false,
                },
            });
        }
        Primitive::Text {
            x,
            y,
            text,
            size,
            font,
            align,
            underline,
        } => {
            let width = fonts.measure_text(text, *size, *font);
            let start_x = match align {
                TextAlign::Left => *x,
                TextAlign::Center => x - width / 2.0,
                TextAlign::Right => x - width,
            };
            let baseline_y = page_height - y;

            ops.push(Op::StartTextSection);
            ops.push(Op::SetTextCursor {
                pos: Point {
                    x: Pt(start_x),
                    y: Pt(baseline_y),
                },
            });
            ops.push(Op::SetFillColor { col: BLACK });
            match font {
                FontSel::Rupee => {
                    if let Some(font_id) = rupee_font {
                        ops.push(Op::SetFontSize {
                            size: Pt(*size),
                            font: font_id.clone(),
                        });
                        ops.push(Op::WriteText {
                            items: vec![TextItem::Text(text.clone())],
                            font: font_id.clone(),
                        });
                    } else {
                        // render_pdf refuses such layouts up front
                        log::warn!("rupee text run without an embedded face: {text:?}");
                    }
                }
                FontSel::Regular | FontSel::Bold => {
                    let builtin = if *font == FontSel::Bold {
                        BuiltinFont::HelveticaBold
                    } else {
                        BuiltinFont::Helvetica
                    };
                    ops.push(Op::SetFontSizeBuiltinFont {
                        size: Pt(*size),
                        font: builtin,
                    });
                    ops.push(Op::WriteTextBuiltinFont {
                        items: vec![TextItem::Text(to_winlatin(text))],
                        font: builtin,
                    });
                }
            }
            ops.push(Op::EndTextSection);

            if *underline {
                let underline_y = baseline_y - size * 0.1;
                ops.push(Op::SetOutlineColor { col: BLACK });
                ops.push(Op::SetOutlineThickness { pt: Pt(0.5) });
                ops.push(Op::DrawLine {
                    line: Line {
                        points: corner_points(&[
                            (start_x, underline_y),
                            (start_x + width, underline_y),
                        ]),
                        is_closed: false,
                    },
                });
            }
        }
    }
}

fn corner_points(points: &[(f32, f32)]) -> Vec<LinePoint> {
    points
        .iter()
        .map(|(x, y)| LinePoint {
            p: Point { x: Pt(*x), y: Pt(*y) },
            bezier: false,
        })
        .collect()
}

/// Convert a UTF-8 string to raw Windows-1252 bytes then wrap in a String
/// so printpdf writes the bytes unchanged into the PDF stream (builtin
/// fonts use WinAnsiEncoding, so each glyph is one byte 0x00–0xFF).
fn to_winlatin(s: &str) -> String {
    let bytes: Vec<u8> = s
        .chars()
        .map(|c| match c {
            '\u{2018}' => 0x91, // left single quote
            '\u{2019}' => 0x92, // right single quote
            '\u{201C}' => 0x93, // left double quote
            '\u{201D}' => 0x94, // right double quote
            '\u{2013}' => 0x96, // en-dash
            '\u{00A0}' => 0x20, // non-breaking space -> space
            c if (c as u32) < 256 => c as u8,
            _ => b'?',
        })
        .collect();
    // SAFETY: intentionally non-UTF-8 for the 0x80-0x9F range; printpdf
    // passes these bytes straight to the PDF stream, decoded by
    // WinAnsiEncoding.
    #[allow(unsafe_code)]
    unsafe {
        String::from_utf8_unchecked(bytes)
    }
}
