//! Page composer – the repeating visual frame drawn behind every page.
//!
//! The frame is a declarative list of [`BlockSpec`] descriptors (position,
//! size, content) consumed by the generic [`draw_blocks`] routine. Every
//! coordinate is an absolute page position from the centimetre-specified
//! template, so the output is visually identical for the same input. This
//! is a fixed template, not a flow layout.

use crate::invoice::InvoiceHeader;
use crate::layout::{FontSel, PageLayout, TextAlign, A4_HEIGHT_PT, A4_WIDTH_PT, CM};

/// A divider line inside a block, relative to the block's top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

/// A text run inside a block. `dx`/`dy` locate the baseline relative to
/// the block's top-left corner; `align` resolves against that anchor.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockText {
    pub dx: f32,
    pub dy: f32,
    pub text: String,
    pub size: f32,
    pub font: FontSel,
    pub align: TextAlign,
    pub underline: bool,
}

impl BlockText {
    fn new(dx: f32, dy: f32, text: impl Into<String>, size: f32, font: FontSel) -> Self {
        Self {
            dx,
            dy,
            text: text.into(),
            size,
            font,
            align: TextAlign::Left,
            underline: false,
        }
    }

    fn align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    fn underlined(mut self) -> Self {
        self.underline = true;
        self
    }
}

/// One block of the page frame: a named region with an optional border,
/// divider rules, and text content bound from the invoice header.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockSpec {
    pub name: &'static str,
    /// Top-left corner of the block in page points.
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub bordered: bool,
    pub rules: Vec<Rule>,
    pub texts: Vec<BlockText>,
}

impl BlockSpec {
    fn region(name: &'static str, x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            name,
            x,
            y,
            width,
            height,
            bordered: false,
            rules: Vec::new(),
            texts: Vec::new(),
        }
    }

    fn bordered(mut self) -> Self {
        self.bordered = true;
        self
    }
}

/// Push a list of frame blocks onto a page as primitives.
pub fn draw_blocks(page: &mut PageLayout, blocks: &[BlockSpec]) {
    for block in blocks {
        if block.bordered {
            page.rect(block.x, block.y, block.width, block.height, 1.0);
        }
        for rule in &block.rules {
            page.line(
                block.x + rule.x1,
                block.y + rule.y1,
                block.x + rule.x2,
                block.y + rule.y2,
                1.0,
            );
        }
        for t in &block.texts {
            if t.text.is_empty() {
                continue;
            }
            page.prims.push(crate::layout::Primitive::Text {
                x: block.x + t.dx,
                y: block.y + t.dy,
                text: t.text.clone(),
                size: t.size,
                font: t.font,
                align: t.align,
                underline: t.underline,
            });
        }
    }
}

/// Baseline y measured from the page top for a position given in cm from
/// the page bottom, the way the template is specified.
fn from_bottom(cm: f32) -> f32 {
    A4_HEIGHT_PT - cm * CM
}

/// The full frame for one page. `page_number` is 1-based; from the second
/// page onward the title carries a page-number suffix.
pub fn page_frame(header: &InvoiceHeader, page_number: usize) -> Vec<BlockSpec> {
    vec![
        outer_border(),
        title(page_number),
        seller_block(header),
        metadata_box(header),
        party_panel(header),
        declaration_block(),
        signature_block(header),
        footer(),
    ]
}

fn outer_border() -> BlockSpec {
    BlockSpec::region(
        "outer-border",
        1.0 * CM,
        from_bottom(1.5) - 26.2 * CM,
        A4_WIDTH_PT - 2.0 * CM,
        26.2 * CM,
    )
    .bordered()
}

fn title(page_number: usize) -> BlockSpec {
    let text = if page_number > 1 {
        format!("Tax Invoice (Page {page_number})")
    } else {
        "Tax Invoice".to_string()
    };
    let mut block = BlockSpec::region("title", 10.5 * CM, from_bottom(28.0), 0.0, 0.0);
    block
        .texts
        .push(BlockText::new(0.0, 0.0, text, 16.0, FontSel::Bold).align(TextAlign::Center));
    block
}

fn seller_block(header: &InvoiceHeader) -> BlockSpec {
    let mut block = BlockSpec::region("seller", 1.2 * CM, from_bottom(27.0), 8.0 * CM, 0.0);
    block
        .texts
        .push(BlockText::new(0.0, 0.0, header.seller.name.clone(), 10.0, FontSel::Bold));

    let mut dy = 0.4 * CM;
    for line in header.seller.address_lines() {
        block
            .texts
            .push(BlockText::new(0.0, dy, line, 9.0, FontSel::Regular));
        dy += 0.4 * CM;
    }
    block.texts.push(BlockText::new(
        0.0,
        dy,
        format!("GSTIN/UIN: {}", header.seller.gstin),
        9.0,
        FontSel::Regular,
    ));
    dy += 0.4 * CM;
    block.texts.push(BlockText::new(
        0.0,
        dy,
        format!(
            "State Name: {}, Code: {}",
            header.seller.state, header.seller.state_code
        ),
        9.0,
        FontSel::Regular,
    ));
    block
}

/// The six-row invoice-metadata box. Most cells are static labels with
/// intentionally blank values; only number, date, and payment mode are
/// populated.
fn metadata_box(header: &InvoiceHeader) -> BlockSpec {
    let width = 10.0 * CM;
    let height = 4.8 * CM;
    let row_height = 0.8 * CM;
    let col_split = width / 2.0;
    // Cell text padding in points, unlike the cm-based box geometry.
    let pad_x = 4.0;
    let pad_y = 10.0;

    let mut block =
        BlockSpec::region("metadata-box", 10.0 * CM, from_bottom(27.7), width, height).bordered();

    for i in 1..6 {
        let y = i as f32 * row_height;
        block.rules.push(Rule {
            x1: 0.0,
            y1: y,
            x2: width,
            y2: y,
        });
    }
    block.rules.push(Rule {
        x1: col_split,
        y1: 0.0,
        x2: col_split,
        y2: height,
    });

    let rows: [(&str, String, &str, String); 6] = [
        (
            "Invoice No.",
            header.invoice_number.clone(),
            "Dated",
            header.formatted_date(),
        ),
        (
            "Delivery Note",
            String::new(),
            "Mode/Terms of Payment",
            header.payment_mode.clone(),
        ),
        ("Reference No. & Date.", String::new(), "Other References", String::new()),
        ("Buyer's Order No.", String::new(), "Dated", String::new()),
        ("Dispatch Doc No.", String::new(), "Delivery Note Date", String::new()),
        ("Dispatched through", String::new(), "Destination", String::new()),
    ];

    for (i, (label_left, value_left, label_right, value_right)) in rows.into_iter().enumerate() {
        let label_y = i as f32 * row_height + pad_y;
        let value_y = label_y + 9.0;
        block
            .texts
            .push(BlockText::new(pad_x, label_y, label_left, 8.0, FontSel::Regular));
        block
            .texts
            .push(BlockText::new(pad_x, value_y, value_left, 9.0, FontSel::Bold));
        block.texts.push(BlockText::new(
            col_split + pad_x,
            label_y,
            label_right,
            8.0,
            FontSel::Regular,
        ));
        block.texts.push(BlockText::new(
            col_split + pad_x,
            value_y,
            value_right,
            9.0,
            FontSel::Bold,
        ));
    }

    // Label hanging below the box.
    block.texts.push(BlockText::new(
        pad_x,
        height + 0.4 * CM,
        "Terms of Delivery",
        8.0,
        FontSel::Regular,
    ));
    block
}

/// Three-way consignee/buyer/transport panel: one bordered box split into
/// three equal-height sections by two divider rules.
fn party_panel(header: &InvoiceHeader) -> BlockSpec {
    let width = 9.0 * CM;
    let height = 4.5 * CM;
    let section = height / 3.0;
    let text_x = 0.2 * CM;
    let spacing = 0.32 * CM;
    let top_pad = 0.33 * CM;

    let mut block = BlockSpec::region(
        "party-panel",
        1.0 * CM,
        from_bottom(19.8) - height,
        width,
        height,
    )
    .bordered();

    for divider in [section, 2.0 * section] {
        block.rules.push(Rule {
            x1: 0.0,
            y1: divider,
            x2: width,
            y2: divider,
        });
    }

    let sections: [(&str, String, String, String); 3] = [
        (
            "Consignee (Ship to)",
            header.buyer.name.clone(),
            header.buyer.address.clone(),
            format!("GSTIN/UIN: {}", header.buyer.gstin),
        ),
        (
            "Buyer (Bill to)",
            header.buyer.name.clone(),
            header.buyer.address.clone(),
            format!("Place of Supply: {}", header.place_of_supply),
        ),
        (
            "Transport Details",
            header.transport.name.clone(),
            format!("GSTIN/UIN: {}", header.transport.gstin),
            format!("Address: {}", header.transport.address),
        ),
    ];

    for (i, (label, name, line2, line3)) in sections.into_iter().enumerate() {
        let mut dy = i as f32 * section + top_pad;
        block
            .texts
            .push(BlockText::new(text_x, dy, label, 9.0, FontSel::Regular));
        dy += spacing;
        block
            .texts
            .push(BlockText::new(text_x, dy, name, 10.0, FontSel::Bold));
        dy += spacing;
        block
            .texts
            .push(BlockText::new(text_x, dy, line2, 9.0, FontSel::Regular));
        dy += spacing;
        block
            .texts
            .push(BlockText::new(text_x, dy, line3, 9.0, FontSel::Regular));
    }
    block
}

fn declaration_block() -> BlockSpec {
    let mut block = BlockSpec::region(
        "declaration",
        1.2 * CM,
        from_bottom(1.5 + 1.6),
        8.0 * CM,
        1.6 * CM,
    );
    block.texts.push(
        BlockText::new(0.0, 0.0, "Declaration", 10.0, FontSel::Bold).underlined(),
    );

    let lines = [
        "We declare that this invoice shows the actual price of the",
        "goods described and that all particulars are true and",
        "correct.",
    ];
    // 12 pt leading, first baseline 0.4 cm below the title.
    let mut dy = 0.4 * CM;
    for line in lines {
        block
            .texts
            .push(BlockText::new(0.0, dy, line, 9.0, FontSel::Regular));
        dy += 12.0;
    }
    block
}

fn signature_block(header: &InvoiceHeader) -> BlockSpec {
    let width = 9.3 * CM;
    let height = 2.2 * CM;
    let mut block = BlockSpec::region(
        "signature",
        A4_WIDTH_PT - width - 1.0 * CM,
        from_bottom(1.5) - height,
        width,
        height,
    )
    .bordered();

    let right_x = width - 0.3 * CM;
    block.texts.push(
        BlockText::new(
            right_x,
            height - 1.7 * CM,
            format!("for {}", header.seller.name),
            10.0,
            FontSel::Bold,
        )
        .align(TextAlign::Right),
    );
    block.texts.push(
        BlockText::new(
            right_x,
            height - 0.4 * CM,
            "Authorised Signatory",
            9.0,
            FontSel::Regular,
        )
        .align(TextAlign::Right),
    );
    block
}

fn footer() -> BlockSpec {
    let mut block = BlockSpec::region("footer", 10.5 * CM, from_bottom(1.0), 0.0, 0.0);
    block.texts.push(
        BlockText::new(
            0.0,
            0.0,
            "This is a Computer Generated Invoice",
            9.0,
            FontSel::Regular,
        )
        .align(TextAlign::Center),
    );
    block
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invoice::{BuyerInfo, InvoiceHeader, SellerInfo, TransportInfo};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn header() -> InvoiceHeader {
        InvoiceHeader {
            invoice_number: "INV/2026-042".to_string(),
            invoice_date: NaiveDate::from_ymd_opt(2026, 8, 5).unwrap(),
            seller: SellerInfo::default(),
            buyer: BuyerInfo {
                name: "Sree Fabrics".to_string(),
                address: "12 Market Road, Salem".to_string(),
                gstin: "33AAACS1234A1Z5".to_string(),
            },
            place_of_supply: "33".to_string(),
            payment_mode: "NEFT".to_string(),
            transport: TransportInfo::default(),
            total_bundles: 4,
            subtotal: Decimal::ZERO,
            cgst_total: Decimal::ZERO,
            sgst_total: Decimal::ZERO,
            igst_total: Decimal::ZERO,
            round_off: Decimal::ZERO,
            grand_total: Decimal::ZERO,
            total_in_words: String::new(),
        }
    }

    fn find<'a>(blocks: &'a [BlockSpec], name: &str) -> &'a BlockSpec {
        blocks
            .iter()
            .find(|b| b.name == name)
            .unwrap_or_else(|| panic!("missing block {name}"))
    }

    #[test]
    fn frame_has_all_blocks_in_order() {
        let blocks = page_frame(&header(), 1);
        let names: Vec<&str> = blocks.iter().map(|b| b.name).collect();
        assert_eq!(
            names,
            [
                "outer-border",
                "title",
                "seller",
                "metadata-box",
                "party-panel",
                "declaration",
                "signature",
                "footer"
            ]
        );
    }

    #[test]
    fn geometry_matches_the_fixed_template() {
        let blocks = page_frame(&header(), 1);

        let border = find(&blocks, "outer-border");
        assert!(border.bordered);
        assert!((border.x - 1.0 * CM).abs() < 0.01);
        assert!((border.width - (A4_WIDTH_PT - 2.0 * CM)).abs() < 0.01);
        assert!((border.height - 26.2 * CM).abs() < 0.01);

        let meta = find(&blocks, "metadata-box");
        assert!((meta.x - 10.0 * CM).abs() < 0.01);
        assert!((meta.height - 4.8 * CM).abs() < 0.01);
        // 5 interior row dividers plus the centre column split
        assert_eq!(meta.rules.len(), 6);

        let panel = find(&blocks, "party-panel");
        assert_eq!(panel.rules.len(), 2);
        assert!((panel.height - 4.5 * CM).abs() < 0.01);
    }

    #[test]
    fn title_suffix_appears_from_second_page() {
        let first = page_frame(&header(), 1);
        assert_eq!(find(&first, "title").texts[0].text, "Tax Invoice");

        let third = page_frame(&header(), 3);
        assert_eq!(find(&third, "title").texts[0].text, "Tax Invoice (Page 3)");
    }

    #[test]
    fn seller_block_lists_address_then_gstin_then_state() {
        let blocks = page_frame(&header(), 1);
        let seller = find(&blocks, "seller");
        let texts: Vec<&str> = seller.texts.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts[0], "KAVIN TEX");
        assert!(texts.contains(&"Tharamangalam"));
        assert!(texts.iter().any(|t| t.starts_with("GSTIN/UIN: 33BUU")));
        assert_eq!(*texts.last().unwrap(), "State Name: Tamil Nadu, Code: 33");
    }

    #[test]
    fn metadata_box_populates_only_number_date_and_payment() {
        let blocks = page_frame(&header(), 1);
        let meta = find(&blocks, "metadata-box");
        let value_texts: Vec<&str> = meta
            .texts
            .iter()
            .filter(|t| t.font == FontSel::Bold && !t.text.is_empty())
            .map(|t| t.text.as_str())
            .collect();
        assert_eq!(value_texts, ["INV/2026-042", "05-Aug-2026", "NEFT"]);
    }

    #[test]
    fn party_panel_binds_buyer_twice_and_transport_once() {
        let blocks = page_frame(&header(), 1);
        let panel = find(&blocks, "party-panel");
        let texts: Vec<&str> = panel.texts.iter().map(|t| t.text.as_str()).collect();
        assert!(texts.contains(&"Consignee (Ship to)"));
        assert!(texts.contains(&"Buyer (Bill to)"));
        assert!(texts.contains(&"Transport Details"));
        assert_eq!(texts.iter().filter(|t| **t == "Sree Fabrics").count(), 2);
        assert!(texts.contains(&"Place of Supply: 33"));
    }

    #[test]
    fn declaration_title_is_underlined() {
        let blocks = page_frame(&header(), 1);
        let declaration = find(&blocks, "declaration");
        assert!(declaration.texts[0].underline);
        assert_eq!(declaration.texts.len(), 4);
    }

    #[test]
    fn signature_is_right_aligned_for_seller() {
        let blocks = page_frame(&header(), 1);
        let signature = find(&blocks, "signature");
        assert!(signature.bordered);
        assert_eq!(signature.texts[0].text, "for KAVIN TEX");
        assert_eq!(signature.texts[0].align, TextAlign::Right);
        assert_eq!(signature.texts[1].text, "Authorised Signatory");
    }

    #[test]
    fn drawing_blocks_emits_primitives() {
        let mut page = PageLayout::new(0);
        draw_blocks(&mut page, &page_frame(&header(), 1));
        assert!(page.contains_text("Tax Invoice"));
        assert!(page.contains_text("This is a Computer Generated Invoice"));
        let rects = page
            .prims
            .iter()
            .filter(|p| matches!(p, crate::layout::Primitive::Rect { .. }))
            .count();
        // outer border, metadata box, party panel, signature box
        assert_eq!(rects, 4);
    }
}
