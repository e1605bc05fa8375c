//! Pipeline – ties together validation, tax aggregation, pagination, page
//! composition, and rendering into a single entry point.
//!
//! The pass is strictly sequential per document and shares no mutable
//! state across calls, so separate invoices may generate in parallel.

use crate::error::InvoiceError;
use crate::fonts::FontStore;
use crate::frame::{draw_blocks, page_frame};
use crate::invoice::{InvoiceHeader, InvoiceLineItem};
use crate::layout::{DocumentLayout, FontSel, PageLayout, TextAlign, A4_WIDTH_PT, CM};
use crate::pagination::{plan_pages, PageChunk};
use crate::render::render_pdf;
use crate::table::{item_table, tax_summary_table};
use crate::tax::HsnSummary;
use crate::words::tax_amount_sentence;

/// Left edge of the flowed content (the template's page margin).
const CONTENT_LEFT: f32 = 1.0 * CM;
/// Right edge of the flowed content.
const CONTENT_RIGHT: f32 = A4_WIDTH_PT - 1.0 * CM;
/// Top of the item table, below the header region of the frame.
const CONTENT_TOP: f32 = 9.7 * CM;

const BODY_SIZE: f32 = 9.0;
/// Baseline advance for a body text line.
const LINE_ADVANCE: f32 = 0.4 * CM;
/// Vertical gap between flowed sections.
const SECTION_GAP: f32 = 0.5 * CM;

/// Generate the complete invoice document.
///
/// Consumes an already-validated, already-persisted record and returns the
/// finished PDF; any failure aborts with no partial output.
pub fn generate_invoice_document(
    header: &InvoiceHeader,
    items: &[InvoiceLineItem],
    fonts: &FontStore,
) -> Result<Vec<u8>, InvoiceError> {
    let layout = compute_invoice_layout(header, items)?;
    render_pdf(&layout, fonts)
}

/// Compose the full page layout without touching the PDF backend – the
/// deterministic half of the pipeline, independently testable.
pub fn compute_invoice_layout(
    header: &InvoiceHeader,
    items: &[InvoiceLineItem],
) -> Result<DocumentLayout, InvoiceError> {
    header.validate()?;

    let summary = HsnSummary::aggregate(items, header.transaction_kind());
    let plan = plan_pages(items.len());

    let mut layout = DocumentLayout::a4(format!("Tax Invoice {}", header.invoice_number));
    for chunk in &plan.chunks {
        let mut page = PageLayout::new(chunk.index);
        draw_blocks(&mut page, &page_frame(header, chunk.index + 1));
        compose_page_content(&mut page, header, items, &summary, chunk);
        layout.pages.push(page);
    }

    log::debug!(
        "composed {} page(s) for invoice {}",
        layout.pages.len(),
        header.invoice_number
    );
    Ok(layout)
}

fn compose_page_content(
    page: &mut PageLayout,
    header: &InvoiceHeader,
    items: &[InvoiceLineItem],
    summary: &HsnSummary,
    chunk: &PageChunk,
) {
    let table = item_table(header, items, chunk);
    let table_bottom = table.emit(page, CONTENT_LEFT, CONTENT_TOP);

    if !chunk.is_final() {
        page.text(
            CONTENT_RIGHT,
            table_bottom + SECTION_GAP + BODY_SIZE,
            "continued ...",
            BODY_SIZE,
            FontSel::Regular,
            TextAlign::Right,
        );
        return;
    }

    let mut y = table_bottom + LINE_ADVANCE;
    page.text(
        CONTENT_RIGHT,
        y,
        "E. & O.E",
        BODY_SIZE,
        FontSel::Regular,
        TextAlign::Right,
    );

    y += SECTION_GAP + LINE_ADVANCE;
    page.text(
        CONTENT_LEFT,
        y,
        "Amount Chargeable (in words)",
        BODY_SIZE,
        FontSel::Bold,
        TextAlign::Left,
    );
    y += LINE_ADVANCE;
    page.text(
        CONTENT_LEFT,
        y,
        header.total_in_words.clone(),
        BODY_SIZE,
        FontSel::Regular,
        TextAlign::Left,
    );

    y += SECTION_GAP;
    let tax_table = tax_summary_table(summary);
    let tax_bottom = tax_table.emit(page, CONTENT_LEFT, y);

    // Sentence prefix in the regular face, the worded amount in bold; the
    // bold run starts where the measured prefix ends.
    let sentence = tax_amount_sentence(summary.total_tax());
    let (prefix, amount_words) = sentence.split_at("Tax Amount (in words): ".len());
    let measure = FontStore::default();
    let words_y = tax_bottom + SECTION_GAP + LINE_ADVANCE;
    page.text(
        CONTENT_LEFT,
        words_y,
        prefix,
        BODY_SIZE,
        FontSel::Regular,
        TextAlign::Left,
    );
    page.text(
        CONTENT_LEFT + measure.measure_text(prefix, BODY_SIZE, FontSel::Regular),
        words_y,
        amount_words,
        BODY_SIZE,
        FontSel::Bold,
        TextAlign::Left,
    );
}

/// Delivery filename convention: `invoice_<invoice_number>.pdf`. Owned by
/// the calling layer; the invoice number is used verbatim.
pub fn invoice_pdf_filename(header: &InvoiceHeader) -> String {
    format!("invoice_{}.pdf", header.invoice_number)
}
