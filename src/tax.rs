//! HSN-wise tax aggregation – groups line items by classification code and
//! derives the CGST/SGST or IGST amount per group.
//!
//! Grouping order is the discovery order of codes in the item list, and an
//! item without a code lands in the empty-code bucket rather than erroring.

use rust_decimal::Decimal;

use crate::invoice::{round_currency, InvoiceLineItem, TransactionKind};

/// One HSN group: accumulated taxable value plus the rate applicable to
/// the group. All items under one code are assumed to share one rate;
/// first-seen wins if they differ.
#[derive(Debug, Clone, PartialEq)]
pub struct HsnGroup {
    pub hsn_code: String,
    pub taxable_value: Decimal,
    pub gst_rate: Decimal,
}

impl HsnGroup {
    /// CGST amount for this group (intra-state): `taxable * rate/2 / 100`,
    /// half-up at two digits. SGST is identical by construction.
    pub fn cgst_amount(&self) -> Decimal {
        round_currency(self.taxable_value * (self.gst_rate / Decimal::TWO) / Decimal::ONE_HUNDRED)
    }

    /// IGST amount for this group (inter-state): `taxable * rate / 100`.
    pub fn igst_amount(&self) -> Decimal {
        round_currency(self.taxable_value * self.gst_rate / Decimal::ONE_HUNDRED)
    }

    /// Total tax for the group under the given transaction kind.
    pub fn total_tax(&self, kind: TransactionKind) -> Decimal {
        match kind {
            TransactionKind::IntraState => self.cgst_amount() * Decimal::TWO,
            TransactionKind::InterState => self.igst_amount(),
        }
    }
}

/// The HSN summary for one document generation. Built fresh on every
/// render pass; never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct HsnSummary {
    pub kind: TransactionKind,
    pub groups: Vec<HsnGroup>,
}

impl HsnSummary {
    /// Group the items by HSN code, accumulating taxable value per group.
    pub fn aggregate(items: &[InvoiceLineItem], kind: TransactionKind) -> Self {
        let mut groups: Vec<HsnGroup> = Vec::new();

        for item in items {
            let amount = item.amount();
            match groups.iter_mut().find(|g| g.hsn_code == item.hsn_code) {
                Some(group) => {
                    if group.gst_rate != item.gst_rate {
                        log::warn!(
                            "HSN {:?}: conflicting GST rates {} and {}, keeping first-seen {}",
                            group.hsn_code,
                            group.gst_rate,
                            item.gst_rate,
                            group.gst_rate
                        );
                    }
                    group.taxable_value += amount;
                }
                None => groups.push(HsnGroup {
                    hsn_code: item.hsn_code.clone(),
                    taxable_value: amount,
                    gst_rate: item.gst_rate,
                }),
            }
        }

        Self { kind, groups }
    }

    pub fn total_taxable_value(&self) -> Decimal {
        self.groups.iter().map(|g| g.taxable_value).sum()
    }

    /// Sum of the CGST column. Zero for inter-state summaries.
    pub fn total_cgst(&self) -> Decimal {
        match self.kind {
            TransactionKind::IntraState => self.groups.iter().map(|g| g.cgst_amount()).sum(),
            TransactionKind::InterState => Decimal::ZERO,
        }
    }

    /// Sum of the SGST column. Mirrors CGST exactly.
    pub fn total_sgst(&self) -> Decimal {
        self.total_cgst()
    }

    /// Sum of the IGST column. Zero for intra-state summaries.
    pub fn total_igst(&self) -> Decimal {
        match self.kind {
            TransactionKind::IntraState => Decimal::ZERO,
            TransactionKind::InterState => self.groups.iter().map(|g| g.igst_amount()).sum(),
        }
    }

    /// Grand total of the tax columns – the amount rendered in words under
    /// the summary table.
    pub fn total_tax(&self) -> Decimal {
        match self.kind {
            TransactionKind::IntraState => self.total_cgst() + self.total_sgst(),
            TransactionKind::InterState => self.total_igst(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn item(hsn: &str, qty: Decimal, rate: Decimal, gst: Decimal) -> InvoiceLineItem {
        InvoiceLineItem {
            description: format!("item {hsn}"),
            hsn_code: hsn.to_string(),
            quantity: qty,
            rate,
            gst_rate: gst,
        }
    }

    #[test]
    fn groups_follow_discovery_order() {
        let items = vec![
            item("6302", dec!(1), dec!(100), dec!(5)),
            item("5208", dec!(1), dec!(200), dec!(12)),
            item("6302", dec!(1), dec!(50), dec!(5)),
        ];
        let summary = HsnSummary::aggregate(&items, TransactionKind::IntraState);
        assert_eq!(summary.groups.len(), 2);
        assert_eq!(summary.groups[0].hsn_code, "6302");
        assert_eq!(summary.groups[0].taxable_value, dec!(150));
        assert_eq!(summary.groups[1].hsn_code, "5208");
    }

    #[test]
    fn missing_hsn_code_groups_under_empty_bucket() {
        let items = vec![
            item("", dec!(2), dec!(10), dec!(18)),
            item("", dec!(3), dec!(10), dec!(18)),
        ];
        let summary = HsnSummary::aggregate(&items, TransactionKind::IntraState);
        assert_eq!(summary.groups.len(), 1);
        assert_eq!(summary.groups[0].hsn_code, "");
        assert_eq!(summary.groups[0].taxable_value, dec!(50));
    }

    #[test]
    fn first_seen_rate_wins_on_conflict() {
        let items = vec![
            item("6302", dec!(1), dec!(100), dec!(5)),
            item("6302", dec!(1), dec!(100), dec!(12)),
        ];
        let summary = HsnSummary::aggregate(&items, TransactionKind::IntraState);
        assert_eq!(summary.groups[0].gst_rate, dec!(5));
        assert_eq!(summary.groups[0].taxable_value, dec!(200));
    }

    #[test]
    fn intra_state_splits_rate_in_half() {
        let items = vec![item("6302", dec!(1), dec!(1000.00), dec!(18))];
        let summary = HsnSummary::aggregate(&items, TransactionKind::IntraState);
        let group = &summary.groups[0];
        assert_eq!(group.cgst_amount(), dec!(90.00));
        assert_eq!(group.total_tax(TransactionKind::IntraState), dec!(180.00));
        assert_eq!(summary.total_cgst(), dec!(90.00));
        assert_eq!(summary.total_sgst(), dec!(90.00));
        assert_eq!(summary.total_igst(), Decimal::ZERO);
        assert_eq!(summary.total_tax(), dec!(180.00));
    }

    #[test]
    fn inter_state_taxes_full_rate() {
        let items = vec![item("6302", dec!(1), dec!(1000.00), dec!(18))];
        let summary = HsnSummary::aggregate(&items, TransactionKind::InterState);
        let group = &summary.groups[0];
        assert_eq!(group.igst_amount(), dec!(180.00));
        assert_eq!(summary.total_igst(), dec!(180.00));
        assert_eq!(summary.total_cgst(), Decimal::ZERO);
        assert_eq!(summary.total_tax(), dec!(180.00));
    }

    #[test]
    fn tax_rounding_is_half_up_per_group() {
        // 333.33 * 2.5% = 8.33325 -> 8.33; * 5% = 16.6665 -> 16.67
        let items = vec![item("5208", dec!(1), dec!(333.33), dec!(5))];
        let intra = HsnSummary::aggregate(&items, TransactionKind::IntraState);
        assert_eq!(intra.groups[0].cgst_amount(), dec!(8.33));
        let inter = HsnSummary::aggregate(&items, TransactionKind::InterState);
        assert_eq!(inter.groups[0].igst_amount(), dec!(16.67));
    }

    #[test]
    fn empty_item_list_yields_empty_summary() {
        let summary = HsnSummary::aggregate(&[], TransactionKind::IntraState);
        assert!(summary.groups.is_empty());
        assert_eq!(summary.total_taxable_value(), Decimal::ZERO);
        assert_eq!(summary.total_tax(), Decimal::ZERO);
    }
}
