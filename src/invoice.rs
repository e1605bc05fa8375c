//! Invoice domain model – the validated record consumed by the pipeline.
//!
//! The core borrows the header and items read-only for the duration of one
//! generation call; everything derived from them (page chunks, HSN summary,
//! rendered pages) is owned by the call and discarded on return.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::InvoiceError;

/// Tolerance for the grand-total reconciliation check.
const ROUNDING_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2); // 0.01

/// Seller identity block. Fields fall back to the business defaults when
/// absent from the stored record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SellerInfo {
    #[serde(default = "SellerInfo::default_name")]
    pub name: String,
    #[serde(default = "SellerInfo::default_address")]
    pub address: String,
    #[serde(default = "SellerInfo::default_gstin")]
    pub gstin: String,
    #[serde(default = "SellerInfo::default_state")]
    pub state: String,
    #[serde(default = "SellerInfo::default_state_code")]
    pub state_code: String,
}

impl SellerInfo {
    fn default_name() -> String {
        "KAVIN TEX".to_string()
    }
    fn default_address() -> String {
        "7-1/53, 22ND WARD, AMBETHKAR STREET, Tharamangalam".to_string()
    }
    fn default_gstin() -> String {
        "33BUUPR3263F2Z9".to_string()
    }
    fn default_state() -> String {
        "Tamil Nadu".to_string()
    }
    fn default_state_code() -> String {
        "33".to_string()
    }

    /// Address lines as printed in the frame: split on "," and trimmed.
    pub fn address_lines(&self) -> Vec<String> {
        self.address
            .split(',')
            .map(|line| line.trim().to_string())
            .collect()
    }
}

impl Default for SellerInfo {
    fn default() -> Self {
        Self {
            name: Self::default_name(),
            address: Self::default_address(),
            gstin: Self::default_gstin(),
            state: Self::default_state(),
            state_code: Self::default_state_code(),
        }
    }
}

/// Buyer identity block.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuyerInfo {
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub gstin: String,
}

/// Optional transporter block shown in the party panel.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransportInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub gstin: String,
}

/// Intra-state (CGST + SGST) vs inter-state (IGST) transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    IntraState,
    InterState,
}

/// The immutable invoice header. All monetary fields carry exactly two
/// fractional digits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceHeader {
    pub invoice_number: String,
    pub invoice_date: NaiveDate,
    #[serde(default)]
    pub seller: SellerInfo,
    pub buyer: BuyerInfo,
    pub place_of_supply: String,
    #[serde(default)]
    pub payment_mode: String,
    #[serde(default)]
    pub transport: TransportInfo,
    #[serde(default)]
    pub total_bundles: u32,
    pub subtotal: Decimal,
    #[serde(default)]
    pub cgst_total: Decimal,
    #[serde(default)]
    pub sgst_total: Decimal,
    #[serde(default)]
    pub igst_total: Decimal,
    #[serde(default)]
    pub round_off: Decimal,
    pub grand_total: Decimal,
    pub total_in_words: String,
}

impl InvoiceHeader {
    /// Classify the transaction from the stored totals. The legacy system
    /// branches on `igst_total > 0`, so an all-zero (zero-rated) invoice
    /// counts as intra-state.
    pub fn transaction_kind(&self) -> TransactionKind {
        if self.igst_total > Decimal::ZERO {
            TransactionKind::InterState
        } else {
            TransactionKind::IntraState
        }
    }

    /// Check the monetary invariants before any page is composed.
    ///
    /// `grand_total` must reconcile with the component totals within one
    /// paisa, and an invoice must not carry both IGST and CGST/SGST.
    pub fn validate(&self) -> Result<(), InvoiceError> {
        for (label, value) in [
            ("subtotal", self.subtotal),
            ("cgst_total", self.cgst_total),
            ("sgst_total", self.sgst_total),
            ("igst_total", self.igst_total),
            ("grand_total", self.grand_total),
        ] {
            if value < Decimal::ZERO {
                return Err(InvoiceError::invalid_amount(format!(
                    "{label} must not be negative, got {value}"
                )));
            }
            if value.scale() > 2 {
                return Err(InvoiceError::invalid_amount(format!(
                    "{label} carries more than 2 fractional digits: {value}"
                )));
            }
        }
        if self.round_off.scale() > 2 {
            return Err(InvoiceError::invalid_amount(format!(
                "round_off carries more than 2 fractional digits: {}",
                self.round_off
            )));
        }

        if self.igst_total > Decimal::ZERO
            && (self.cgst_total > Decimal::ZERO || self.sgst_total > Decimal::ZERO)
        {
            return Err(InvoiceError::invalid_amount(
                "invoice carries both IGST and CGST/SGST totals",
            ));
        }

        let expected = self.subtotal
            + self.cgst_total
            + self.sgst_total
            + self.igst_total
            + self.round_off;
        if (self.grand_total - expected).abs() > ROUNDING_TOLERANCE {
            return Err(InvoiceError::invalid_amount(format!(
                "grand_total {} does not reconcile with components {}",
                self.grand_total, expected
            )));
        }

        Ok(())
    }

    /// Invoice date as printed in the metadata box, e.g. `05-Aug-2026`.
    pub fn formatted_date(&self) -> String {
        self.invoice_date.format("%d-%b-%Y").to_string()
    }
}

/// One line of the invoice. Items belong to exactly one invoice; the
/// derived amount is computed at render time, never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceLineItem {
    pub description: String,
    #[serde(default)]
    pub hsn_code: String,
    pub quantity: Decimal,
    pub rate: Decimal,
    pub gst_rate: Decimal,
}

impl InvoiceLineItem {
    pub fn amount(&self) -> Decimal {
        self.quantity * self.rate
    }
}

/// Half-up rounding at two fractional digits – the currency rounding used
/// for every monetary field in the document.
pub fn round_currency(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Render a monetary value with exactly two fractional digits.
pub fn format_currency(value: Decimal) -> String {
    format!("{:.2}", round_currency(value))
}

/// Render a percentage with exactly two fractional digits and a `%` sign.
pub fn format_percent(value: Decimal) -> String {
    format!("{:.2}%", round_currency(value))
}
