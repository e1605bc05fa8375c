//! Ready-made sample invoices for tests and demonstration.
//!
//! Each sample exercises a different document shape: intra-state with a
//! round-off, inter-state, multi-page, and the degenerate zero-item
//! invoice. All totals reconcile, so every sample passes validation.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::invoice::{BuyerInfo, InvoiceHeader, InvoiceLineItem, SellerInfo, TransportInfo};

fn dec(value: &str) -> Decimal {
    value.parse().expect("sample decimal literal")
}

fn base_header() -> InvoiceHeader {
    InvoiceHeader {
        invoice_number: "INV/2026-001".to_string(),
        invoice_date: NaiveDate::from_ymd_opt(2026, 8, 5).expect("sample date"),
        seller: SellerInfo::default(),
        buyer: BuyerInfo {
            name: "Sree Fabrics".to_string(),
            address: "12 Market Road, Salem".to_string(),
            gstin: "33AAACS1234A1Z5".to_string(),
        },
        place_of_supply: "33".to_string(),
        payment_mode: "NEFT".to_string(),
        transport: TransportInfo {
            name: "KPN Parcel Service".to_string(),
            address: "Omalur Main Road, Salem".to_string(),
            gstin: "33AABCK7890C1Z2".to_string(),
        },
        total_bundles: 6,
        subtotal: Decimal::ZERO,
        cgst_total: Decimal::ZERO,
        sgst_total: Decimal::ZERO,
        igst_total: Decimal::ZERO,
        round_off: Decimal::ZERO,
        grand_total: Decimal::ZERO,
        total_in_words: String::new(),
    }
}

/// Intra-state invoice: three items over two HSN codes, CGST/SGST split,
/// and a negative round-off down to the whole rupee.
pub fn intra_state_invoice() -> (InvoiceHeader, Vec<InvoiceLineItem>) {
    let items = vec![
        InvoiceLineItem {
            description: "Cotton Bath Towel 30x60".to_string(),
            hsn_code: "6302".to_string(),
            quantity: dec("121"),
            rate: dec("85.40"),
            gst_rate: dec("5"),
        },
        InvoiceLineItem {
            description: "Cotton Hand Towel 15x25".to_string(),
            hsn_code: "6302".to_string(),
            quantity: dec("200"),
            rate: dec("32.50"),
            gst_rate: dec("5"),
        },
        InvoiceLineItem {
            description: "Printed Bed Sheet 90x108".to_string(),
            hsn_code: "6304".to_string(),
            quantity: dec("40"),
            rate: dec("210.00"),
            gst_rate: dec("12"),
        },
    ];

    let mut header = base_header();
    // 10333.40 + 6500.00 + 8400.00
    header.subtotal = dec("25233.40");
    // 16833.40 @ 2.5% = 420.84, 8400.00 @ 6% = 504.00
    header.cgst_total = dec("924.84");
    header.sgst_total = dec("924.84");
    header.round_off = dec("-0.08");
    header.grand_total = dec("27083.00");
    header.total_in_words = "Twenty-Seven Thousand And Eighty-Three Only".to_string();
    (header, items)
}

/// Inter-state invoice: IGST path, two HSN codes at different rates.
pub fn inter_state_invoice() -> (InvoiceHeader, Vec<InvoiceLineItem>) {
    let items = vec![
        InvoiceLineItem {
            description: "Polyester Saree".to_string(),
            hsn_code: "5407".to_string(),
            quantity: dec("60"),
            rate: dec("450.00"),
            gst_rate: dec("18"),
        },
        InvoiceLineItem {
            description: "Silk Blend Saree".to_string(),
            hsn_code: "5007".to_string(),
            quantity: dec("10"),
            rate: dec("1250.00"),
            gst_rate: dec("12"),
        },
    ];

    let mut header = base_header();
    header.invoice_number = "INV/2026-002".to_string();
    header.buyer = BuyerInfo {
        name: "Hyderabad Textile House".to_string(),
        address: "4-1-88 Abids Road, Hyderabad".to_string(),
        gstin: "36AAVFH2301Q1Z7".to_string(),
    };
    header.place_of_supply = "36".to_string();
    // 27000.00 + 12500.00
    header.subtotal = dec("39500.00");
    // 27000.00 @ 18% = 4860.00, 12500.00 @ 12% = 1500.00
    header.igst_total = dec("6360.00");
    header.grand_total = dec("45860.00");
    header.total_in_words = "Forty-Five Thousand Eight Hundred And Sixty Only".to_string();
    (header, items)
}

/// Twenty identical items – three pages of the paginated item table.
pub fn multi_page_invoice() -> (InvoiceHeader, Vec<InvoiceLineItem>) {
    let items: Vec<InvoiceLineItem> = (1..=20)
        .map(|i| InvoiceLineItem {
            description: format!("Cotton Towel Lot {i}"),
            hsn_code: "6302".to_string(),
            quantity: dec("10"),
            rate: dec("100.00"),
            gst_rate: dec("5"),
        })
        .collect();

    let mut header = base_header();
    header.invoice_number = "INV/2026-003".to_string();
    header.subtotal = dec("20000.00");
    header.cgst_total = dec("500.00");
    header.sgst_total = dec("500.00");
    header.grand_total = dec("21000.00");
    header.total_in_words = "Twenty-One Thousand Only".to_string();
    (header, items)
}

/// No items at all – a single page carrying only the summary rows.
pub fn empty_invoice() -> (InvoiceHeader, Vec<InvoiceLineItem>) {
    let mut header = base_header();
    header.invoice_number = "INV/2026-004".to_string();
    header.total_in_words = "Zero Only".to_string();
    (header, Vec::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_samples_pass_validation() {
        let samples = [
            intra_state_invoice(),
            inter_state_invoice(),
            multi_page_invoice(),
            empty_invoice(),
        ];
        for (header, items) in &samples {
            header
                .validate()
                .unwrap_or_else(|e| panic!("sample {} invalid: {e}", header.invoice_number));
            let computed: Decimal = items.iter().map(|i| i.amount()).sum();
            assert_eq!(computed, header.subtotal, "{}", header.invoice_number);
        }
    }

    #[test]
    fn sample_tax_totals_match_their_hsn_summaries() {
        use crate::tax::HsnSummary;

        let (header, items) = intra_state_invoice();
        let summary = HsnSummary::aggregate(&items, header.transaction_kind());
        assert_eq!(summary.total_cgst(), header.cgst_total);
        assert_eq!(summary.total_sgst(), header.sgst_total);

        let (header, items) = inter_state_invoice();
        let summary = HsnSummary::aggregate(&items, header.transaction_kind());
        assert_eq!(summary.total_igst(), header.igst_total);
    }
}
