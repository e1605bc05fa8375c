//! Table renderer – the paginated item table and the HSN-wise tax-summary
//! table, built as structured models and emitted as grid primitives.
//!
//! Grid lines derive from per-cell rectangles, so a header cell spanning
//! two sub-columns renders as one merged cell.

use rust_decimal::Decimal;

use crate::invoice::{
    format_currency, format_percent, InvoiceHeader, InvoiceLineItem, TransactionKind,
};
use crate::layout::{FontSel, PageLayout, TextAlign, CM};
use crate::pagination::PageChunk;
use crate::tax::HsnSummary;

/// Item-table column widths in cm: SI No., Description, HSN, Quantity,
/// Rate, per, Amount. Sums to the 19 cm content width.
pub const ITEM_COL_WIDTHS_CM: [f32; 7] = [1.5, 6.8, 2.0, 2.3, 2.1, 1.3, 3.0];

/// Tax-summary column widths per transaction type.
pub const INTRA_TAX_COL_WIDTHS_CM: [f32; 7] = [3.0, 3.0, 2.0, 2.5, 2.0, 2.5, 4.0];
pub const INTER_TAX_COL_WIDTHS_CM: [f32; 5] = [4.0, 4.0, 3.0, 4.0, 4.0];

/// Uniform row height of both tables.
pub const ROW_HEIGHT: f32 = 0.55 * CM;

/// Quantity unit label used throughout the document.
pub const UNIT_LABEL: &str = "Nos";

/// One body cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub text: String,
    pub align: TextAlign,
    pub font: FontSel,
}

impl Cell {
    pub fn empty() -> Self {
        Self::left("")
    }

    pub fn left(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            align: TextAlign::Left,
            font: FontSel::Regular,
        }
    }

    pub fn center(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            align: TextAlign::Center,
            font: FontSel::Regular,
        }
    }

    pub fn right(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            align: TextAlign::Right,
            font: FontSel::Regular,
        }
    }

    pub fn bold(mut self) -> Self {
        self.font = FontSel::Bold;
        self
    }

    fn rupee(mut self) -> Self {
        self.font = FontSel::Rupee;
        self
    }
}

/// A header cell occupying a rectangular span of the header grid.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderCell {
    pub col: usize,
    pub col_span: usize,
    pub row: usize,
    pub row_span: usize,
    pub text: String,
}

impl HeaderCell {
    fn new(col: usize, row: usize, text: &str) -> Self {
        Self {
            col,
            col_span: 1,
            row,
            row_span: 1,
            text: text.to_string(),
        }
    }

    fn col_span(mut self, span: usize) -> Self {
        self.col_span = span;
        self
    }

    fn row_span(mut self, span: usize) -> Self {
        self.row_span = span;
        self
    }
}

/// A complete table: column geometry, spanned header cells, and uniform
/// body rows.
#[derive(Debug, Clone, PartialEq)]
pub struct TableModel {
    pub col_widths: Vec<f32>,
    pub header_rows: usize,
    pub header: Vec<HeaderCell>,
    pub rows: Vec<Vec<Cell>>,
    pub font_size: f32,
}

impl TableModel {
    pub fn width(&self) -> f32 {
        self.col_widths.iter().sum()
    }

    pub fn height(&self) -> f32 {
        (self.header_rows + self.rows.len()) as f32 * ROW_HEIGHT
    }

    fn col_x(&self, col: usize) -> f32 {
        self.col_widths[..col].iter().sum()
    }

    fn span_width(&self, col: usize, span: usize) -> f32 {
        self.col_widths[col..col + span].iter().sum()
    }

    /// Emit the table at `(x, y_top)` and return the y just below it.
    pub fn emit(&self, page: &mut PageLayout, x: f32, y_top: f32) -> f32 {
        let pad = 3.0;
        let baseline = |top: f32, height: f32| top + height / 2.0 + self.font_size * 0.35;

        for cell in &self.header {
            let cx = x + self.col_x(cell.col);
            let cy = y_top + cell.row as f32 * ROW_HEIGHT;
            let cw = self.span_width(cell.col, cell.col_span);
            let ch = cell.row_span as f32 * ROW_HEIGHT;
            page.rect(cx, cy, cw, ch, 1.0);
            page.text(
                cx + cw / 2.0,
                baseline(cy, ch),
                cell.text.clone(),
                self.font_size,
                FontSel::Bold,
                TextAlign::Center,
            );
        }

        let body_top = y_top + self.header_rows as f32 * ROW_HEIGHT;
        for (r, row) in self.rows.iter().enumerate() {
            let ry = body_top + r as f32 * ROW_HEIGHT;
            for (c, cell) in row.iter().enumerate() {
                let cx = x + self.col_x(c);
                let cw = self.col_widths[c];
                page.rect(cx, ry, cw, ROW_HEIGHT, 1.0);
                let anchor = match cell.align {
                    TextAlign::Left => cx + pad,
                    TextAlign::Center => cx + cw / 2.0,
                    TextAlign::Right => cx + cw - pad,
                };
                page.text(
                    anchor,
                    baseline(ry, ROW_HEIGHT),
                    cell.text.clone(),
                    self.font_size,
                    cell.font,
                    cell.align,
                );
            }
        }

        body_top + self.rows.len() as f32 * ROW_HEIGHT
    }
}

fn cm_widths(widths: &[f32]) -> Vec<f32> {
    widths.iter().map(|w| w * CM).collect()
}

/// The item table for one page chunk. Serial numbers continue from the
/// chunk's position in the document; the final chunk carries the appended
/// subtotal/tax/round-off/grand-total rows.
pub fn item_table(
    header: &InvoiceHeader,
    items: &[InvoiceLineItem],
    chunk: &PageChunk,
) -> TableModel {
    let mut table = TableModel {
        col_widths: cm_widths(&ITEM_COL_WIDTHS_CM),
        header_rows: 1,
        header: ["SI No.", "Description", "HSN", "Quantity", "Rate", "per", "Amount"]
            .iter()
            .enumerate()
            .map(|(col, text)| HeaderCell::new(col, 0, text))
            .collect(),
        rows: Vec::new(),
        font_size: 9.0,
    };

    for (offset, item) in items[chunk.start..chunk.end].iter().enumerate() {
        table.rows.push(vec![
            Cell::center((chunk.serial_start() + offset).to_string()),
            Cell::left(item.description.clone()),
            Cell::center(item.hsn_code.clone()),
            Cell::right(item.quantity.to_string()),
            Cell::right(format_currency(item.rate)),
            Cell::center(UNIT_LABEL),
            Cell::right(format_currency(item.amount())),
        ]);
    }

    if chunk.is_final() {
        append_summary_rows(&mut table, header, items);
    }
    table
}

/// The subtotal, tax, round-off, and grand-total rows on the last page.
/// The printed tax rate is taken from the first invoice item, as in the
/// legacy document.
fn append_summary_rows(table: &mut TableModel, header: &InvoiceHeader, items: &[InvoiceLineItem]) {
    let summary_row = |label: Cell, rate: Cell, per: Cell, amount: Cell| {
        vec![Cell::empty(), label, Cell::empty(), Cell::empty(), rate, per, amount]
    };

    table.rows.push(summary_row(
        Cell::right("Sub Total").bold(),
        Cell::empty(),
        Cell::empty(),
        Cell::right(format_currency(header.subtotal)).bold(),
    ));

    let gst_rate = items.first().map(|i| i.gst_rate).unwrap_or(Decimal::ZERO);
    match header.transaction_kind() {
        TransactionKind::InterState => {
            table.rows.push(summary_row(
                Cell::right(format!("Output Tax IGST @ {}", format_percent(gst_rate))),
                Cell::right(format_percent(gst_rate)),
                Cell::center("%"),
                Cell::right(format_currency(header.igst_total)),
            ));
        }
        TransactionKind::IntraState => {
            let half_rate = gst_rate / Decimal::TWO;
            for (label, total) in [("CGST", header.cgst_total), ("SGST", header.sgst_total)] {
                table.rows.push(summary_row(
                    Cell::right(format!("Output Tax {label} @ {}", format_percent(half_rate))),
                    Cell::right(format_percent(half_rate)),
                    Cell::center("%"),
                    Cell::right(format_currency(total)),
                ));
            }
        }
    }

    if header.round_off != Decimal::ZERO {
        table.rows.push(summary_row(
            Cell::right("Round Off"),
            Cell::empty(),
            Cell::empty(),
            Cell::right(format_currency(header.round_off)),
        ));
    }

    let total_qty: Decimal = items.iter().map(|i| i.quantity).sum();
    table.rows.push(vec![
        Cell::empty(),
        Cell::right("TOTAL").bold(),
        Cell::empty(),
        Cell::right(format!("{total_qty} {UNIT_LABEL}")).bold(),
        Cell::empty(),
        Cell::empty(),
        Cell::right(format!("\u{20B9} {}", format_currency(header.grand_total))).rupee(),
    ]);
}

/// The HSN-wise tax-summary table. Column set depends on the transaction
/// type; the rate+amount pairs sit under merged group headers.
pub fn tax_summary_table(summary: &HsnSummary) -> TableModel {
    match summary.kind {
        TransactionKind::IntraState => intra_state_summary(summary),
        TransactionKind::InterState => inter_state_summary(summary),
    }
}

fn intra_state_summary(summary: &HsnSummary) -> TableModel {
    let header = vec![
        HeaderCell::new(0, 0, "HSN").row_span(2),
        HeaderCell::new(1, 0, "Taxable Value").row_span(2),
        HeaderCell::new(2, 0, "Central Tax (CGST)").col_span(2),
        HeaderCell::new(4, 0, "State Tax (SGST)").col_span(2),
        HeaderCell::new(6, 0, "Total Tax").row_span(2),
        HeaderCell::new(2, 1, "Rate"),
        HeaderCell::new(3, 1, "Amount"),
        HeaderCell::new(4, 1, "Rate"),
        HeaderCell::new(5, 1, "Amount"),
    ];

    let mut rows: Vec<Vec<Cell>> = summary
        .groups
        .iter()
        .map(|group| {
            let half_rate = group.gst_rate / Decimal::TWO;
            let cgst = group.cgst_amount();
            vec![
                Cell::center(group.hsn_code.clone()),
                Cell::right(format_currency(group.taxable_value)),
                Cell::center(format_percent(half_rate)),
                Cell::right(format_currency(cgst)),
                Cell::center(format_percent(half_rate)),
                Cell::right(format_currency(cgst)),
                Cell::right(format_currency(group.total_tax(TransactionKind::IntraState))),
            ]
        })
        .collect();

    rows.push(vec![
        Cell::left("Total").bold(),
        Cell::right(format_currency(summary.total_taxable_value())).bold(),
        Cell::empty(),
        Cell::right(format_currency(summary.total_cgst())).bold(),
        Cell::empty(),
        Cell::right(format_currency(summary.total_sgst())).bold(),
        Cell::right(format_currency(summary.total_tax())).bold(),
    ]);

    TableModel {
        col_widths: cm_widths(&INTRA_TAX_COL_WIDTHS_CM),
        header_rows: 2,
        header,
        rows,
        font_size: 9.0,
    }
}

fn inter_state_summary(summary: &HsnSummary) -> TableModel {
    let header = vec![
        HeaderCell::new(0, 0, "HSN").row_span(2),
        HeaderCell::new(1, 0, "Taxable Value").row_span(2),
        HeaderCell::new(2, 0, "Integrated Tax (IGST)").col_span(2),
        HeaderCell::new(4, 0, "Total Tax").row_span(2),
        HeaderCell::new(2, 1, "Rate"),
        HeaderCell::new(3, 1, "Amount"),
    ];

    let mut rows: Vec<Vec<Cell>> = summary
        .groups
        .iter()
        .map(|group| {
            let igst = group.igst_amount();
            vec![
                Cell::center(group.hsn_code.clone()),
                Cell::right(format_currency(group.taxable_value)),
                Cell::center(format_percent(group.gst_rate)),
                Cell::right(format_currency(igst)),
                Cell::right(format_currency(igst)),
            ]
        })
        .collect();

    rows.push(vec![
        Cell::left("Total").bold(),
        Cell::right(format_currency(summary.total_taxable_value())).bold(),
        Cell::empty(),
        Cell::right(format_currency(summary.total_igst())).bold(),
        Cell::right(format_currency(summary.total_tax())).bold(),
    ]);

    TableModel {
        col_widths: cm_widths(&INTER_TAX_COL_WIDTHS_CM),
        header_rows: 2,
        header,
        rows,
        font_size: 9.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invoice::{BuyerInfo, SellerInfo, TransportInfo};
    use crate::pagination::plan_pages;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn items(n: usize) -> Vec<InvoiceLineItem> {
        (0..n)
            .map(|i| InvoiceLineItem {
                description: format!("Cotton towel lot {}", i + 1),
                hsn_code: "6302".to_string(),
                quantity: dec!(10),
                rate: dec!(100.00),
                gst_rate: dec!(18),
            })
            .collect()
    }

    fn header(igst: Decimal) -> InvoiceHeader {
        let intra = igst == Decimal::ZERO;
        InvoiceHeader {
            invoice_number: "INV/2026-007".to_string(),
            invoice_date: NaiveDate::from_ymd_opt(2026, 8, 5).unwrap(),
            seller: SellerInfo::default(),
            buyer: BuyerInfo::default(),
            place_of_supply: "33".to_string(),
            payment_mode: String::new(),
            transport: TransportInfo::default(),
            total_bundles: 0,
            subtotal: dec!(1000.00),
            cgst_total: if intra { dec!(90.00) } else { Decimal::ZERO },
            sgst_total: if intra { dec!(90.00) } else { Decimal::ZERO },
            igst_total: igst,
            round_off: Decimal::ZERO,
            grand_total: dec!(1180.00),
            total_in_words: String::new(),
        }
    }

    fn cell_texts(table: &TableModel) -> Vec<String> {
        table
            .rows
            .iter()
            .flatten()
            .map(|c| c.text.clone())
            .collect()
    }

    #[test]
    fn item_rows_carry_continuing_serials() {
        let items = items(10);
        let header = header(Decimal::ZERO);
        let plan = plan_pages(items.len());

        let first = item_table(&header, &items, &plan.chunks[0]);
        assert_eq!(first.rows.len(), 8);
        assert_eq!(first.rows[0][0].text, "1");
        assert_eq!(first.rows[7][0].text, "8");

        let last = item_table(&header, &items, &plan.chunks[1]);
        assert_eq!(last.rows[0][0].text, "9");
        assert_eq!(last.rows[1][0].text, "10");
    }

    #[test]
    fn summary_rows_attach_to_final_chunk_only() {
        let items = items(10);
        let header = header(Decimal::ZERO);
        let plan = plan_pages(items.len());

        let first = item_table(&header, &items, &plan.chunks[0]);
        assert!(!cell_texts(&first).iter().any(|t| t == "Sub Total"));

        let last = item_table(&header, &items, &plan.chunks[1]);
        let texts = cell_texts(&last);
        assert!(texts.iter().any(|t| t == "Sub Total"));
        assert!(texts.iter().any(|t| t == "TOTAL"));
    }

    #[test]
    fn intra_state_invoice_gets_cgst_and_sgst_rows() {
        let items = items(2);
        let header = header(Decimal::ZERO);
        let plan = plan_pages(items.len());
        let table = item_table(&header, &items, &plan.chunks[0]);
        let texts = cell_texts(&table);

        assert!(texts.iter().any(|t| t == "Output Tax CGST @ 9.00%"));
        assert!(texts.iter().any(|t| t == "Output Tax SGST @ 9.00%"));
        assert!(!texts.iter().any(|t| t.contains("IGST")));
    }

    #[test]
    fn inter_state_invoice_gets_one_igst_row() {
        let items = items(2);
        let header = header(dec!(180.00));
        let plan = plan_pages(items.len());
        let table = item_table(&header, &items, &plan.chunks[0]);
        let texts = cell_texts(&table);

        assert!(texts.iter().any(|t| t == "Output Tax IGST @ 18.00%"));
        assert!(!texts.iter().any(|t| t.contains("CGST") || t.contains("SGST")));
        assert!(texts.iter().any(|t| t == "180.00"));
    }

    #[test]
    fn round_off_row_present_iff_nonzero() {
        let items = items(1);
        let plan = plan_pages(items.len());

        let without = item_table(&header(Decimal::ZERO), &items, &plan.chunks[0]);
        assert!(!cell_texts(&without).iter().any(|t| t == "Round Off"));

        let mut rounded = header(Decimal::ZERO);
        rounded.round_off = dec!(-0.40);
        rounded.grand_total = dec!(1179.60);
        let with = item_table(&rounded, &items, &plan.chunks[0]);
        let texts = cell_texts(&with);
        assert!(texts.iter().any(|t| t == "Round Off"));
        assert!(texts.iter().any(|t| t == "-0.40"));
    }

    #[test]
    fn grand_total_row_sums_quantity_and_prefixes_rupee() {
        let items = items(3);
        let header = header(Decimal::ZERO);
        let plan = plan_pages(items.len());
        let table = item_table(&header, &items, &plan.chunks[0]);
        let total_row = table.rows.last().unwrap();

        assert_eq!(total_row[3].text, "30 Nos");
        assert_eq!(total_row[6].text, "\u{20B9} 1180.00");
        assert_eq!(total_row[6].font, FontSel::Rupee);
    }

    #[test]
    fn empty_invoice_still_tables_the_summary() {
        let header = header(Decimal::ZERO);
        let plan = plan_pages(0);
        let table = item_table(&header, &[], &plan.chunks[0]);
        // no item rows, but subtotal/tax/total rows still attach
        let texts = cell_texts(&table);
        assert!(texts.iter().any(|t| t == "Sub Total"));
        assert!(texts.iter().any(|t| t == "Output Tax CGST @ 0.00%"));
    }

    #[test]
    fn intra_summary_has_merged_tax_headers() {
        let items = items(2);
        let summary = HsnSummary::aggregate(&items, TransactionKind::IntraState);
        let table = tax_summary_table(&summary);

        assert_eq!(table.header_rows, 2);
        let cgst = table
            .header
            .iter()
            .find(|h| h.text == "Central Tax (CGST)")
            .unwrap();
        assert_eq!(cgst.col_span, 2);
        let hsn = table.header.iter().find(|h| h.text == "HSN").unwrap();
        assert_eq!(hsn.row_span, 2);
        assert_eq!(table.col_widths.len(), 7);
    }

    #[test]
    fn inter_summary_drops_the_state_tax_columns() {
        let items = items(2);
        let summary = HsnSummary::aggregate(&items, TransactionKind::InterState);
        let table = tax_summary_table(&summary);

        assert_eq!(table.col_widths.len(), 5);
        assert!(table.header.iter().any(|h| h.text == "Integrated Tax (IGST)"));
        assert!(!table.header.iter().any(|h| h.text.contains("CGST")));

        // one group + total row
        assert_eq!(table.rows.len(), 2);
        let group_row = &table.rows[0];
        assert_eq!(group_row[2].text, "18.00%");
        assert_eq!(group_row[3].text, "360.00");
        assert_eq!(group_row[4].text, "360.00");
    }

    #[test]
    fn summary_total_row_sums_all_groups() {
        let mut all = items(1);
        all.push(InvoiceLineItem {
            description: "Bed sheets".to_string(),
            hsn_code: "5208".to_string(),
            quantity: dec!(5),
            rate: dec!(200.00),
            gst_rate: dec!(5),
        });
        let summary = HsnSummary::aggregate(&all, TransactionKind::IntraState);
        let table = tax_summary_table(&summary);

        assert_eq!(table.rows.len(), 3);
        let total = table.rows.last().unwrap();
        assert_eq!(total[0].text, "Total");
        assert_eq!(total[1].text, "2000.00");
        // 1000 @ 9% + 1000 @ 2.5% = 90.00 + 25.00
        assert_eq!(total[3].text, "115.00");
        assert_eq!(total[6].text, "230.00");
    }

    #[test]
    fn emission_produces_a_grid_per_cell() {
        let items = items(1);
        let header = header(Decimal::ZERO);
        let plan = plan_pages(items.len());
        let table = item_table(&header, &items, &plan.chunks[0]);

        let mut page = PageLayout::new(0);
        let bottom = table.emit(&mut page, 1.0 * CM, 100.0);
        assert!((bottom - (100.0 + table.height())).abs() < 0.01);

        let rects = page
            .prims
            .iter()
            .filter(|p| matches!(p, crate::layout::Primitive::Rect { .. }))
            .count();
        // 7 header cells + 7 cells per row × (1 item + 4 summary rows)
        assert_eq!(rects, 7 + 7 * 5);
    }
}
