//! Amount-in-words conversion using the Indian numbering convention
//! (lakh/crore grouping), title-cased, with rupee/paisa decomposition.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

const ONES: [&str; 20] = [
    "", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine", "Ten", "Eleven",
    "Twelve", "Thirteen", "Fourteen", "Fifteen", "Sixteen", "Seventeen", "Eighteen", "Nineteen",
];

const TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

/// 1..=99 as words, hyphenating compound tens ("Forty-Five").
fn below_hundred(n: u64) -> String {
    debug_assert!(n > 0 && n < 100);
    if n < 20 {
        ONES[n as usize].to_string()
    } else if n % 10 == 0 {
        TENS[(n / 10) as usize].to_string()
    } else {
        format!("{}-{}", TENS[(n / 10) as usize], ONES[(n % 10) as usize])
    }
}

/// A non-negative integer in Indian-English words: crore, lakh, thousand,
/// hundred, with "And" before the trailing tens-and-units.
pub fn integer_in_words(n: u64) -> String {
    if n == 0 {
        return "Zero".to_string();
    }

    let crore = n / 10_000_000;
    let lakh = (n / 100_000) % 100;
    let thousand = (n / 1_000) % 100;
    let hundred = (n / 100) % 10;
    let rest = n % 100;

    let mut parts: Vec<String> = Vec::new();
    if crore > 0 {
        parts.push(format!("{} Crore", integer_in_words(crore)));
    }
    if lakh > 0 {
        parts.push(format!("{} Lakh", below_hundred(lakh)));
    }
    if thousand > 0 {
        parts.push(format!("{} Thousand", below_hundred(thousand)));
    }
    if hundred > 0 {
        parts.push(format!("{} Hundred", ONES[hundred as usize]));
    }

    if rest > 0 {
        if parts.is_empty() {
            return below_hundred(rest);
        }
        return format!("{} And {}", parts.join(" "), below_hundred(rest));
    }
    parts.join(" ")
}

/// Convert a non-negative monetary total into the worded string printed on
/// the invoice: integer rupees in words, " and <paise> Paisa" when the
/// subunit part is non-zero, and a trailing " Only".
///
/// The subunit part is rounded to the nearest paisa; a carry past 99 paise
/// rolls into the rupee part.
pub fn amount_in_words(total: Decimal) -> String {
    let mut rupees = total.trunc().to_u64().unwrap_or(0);
    let mut paise = ((total - total.trunc()) * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u64()
        .unwrap_or(0);
    if paise >= 100 {
        rupees += paise / 100;
        paise %= 100;
    }

    let mut words = integer_in_words(rupees);
    if paise > 0 {
        words = format!("{} and {} Paisa", words, integer_in_words(paise));
    }
    words.push_str(" Only");
    words
}

/// The fixed sentence rendered under the tax-summary table.
pub fn tax_amount_sentence(total: Decimal) -> String {
    format!("Tax Amount (in words): INR {}", amount_in_words(total))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn units_and_teens() {
        assert_eq!(integer_in_words(0), "Zero");
        assert_eq!(integer_in_words(7), "Seven");
        assert_eq!(integer_in_words(14), "Fourteen");
        assert_eq!(integer_in_words(40), "Forty");
        assert_eq!(integer_in_words(45), "Forty-Five");
    }

    #[test]
    fn hundreds_take_an_and() {
        assert_eq!(integer_in_words(100), "One Hundred");
        assert_eq!(integer_in_words(801), "Eight Hundred And One");
        assert_eq!(integer_in_words(345), "Three Hundred And Forty-Five");
    }

    #[test]
    fn indian_grouping_uses_lakh_and_crore() {
        assert_eq!(integer_in_words(1801), "One Thousand Eight Hundred And One");
        assert_eq!(integer_in_words(1045), "One Thousand And Forty-Five");
        assert_eq!(integer_in_words(100_000), "One Lakh");
        assert_eq!(
            integer_in_words(12_34_567),
            "Twelve Lakh Thirty-Four Thousand Five Hundred And Sixty-Seven"
        );
        assert_eq!(
            integer_in_words(2_50_00_000),
            "Two Crore Fifty Lakh"
        );
    }

    #[test]
    fn whole_amount_omits_paisa_clause() {
        assert_eq!(
            amount_in_words(dec!(1801.00)),
            "One Thousand Eight Hundred And One Only"
        );
        assert_eq!(amount_in_words(dec!(0.00)), "Zero Only");
    }

    #[test]
    fn fractional_amount_appends_paisa() {
        assert_eq!(amount_in_words(dec!(180.50)), "One Hundred And Eighty and Fifty Paisa Only");
        assert_eq!(amount_in_words(dec!(0.05)), "Zero and Five Paisa Only");
    }

    #[test]
    fn paisa_rounds_half_up_and_carries() {
        // 0.005 rounds to one paisa
        assert_eq!(amount_in_words(dec!(12.005)), "Twelve and One Paisa Only");
        // 0.999 rounds to 100 paise and rolls into the rupee part
        assert_eq!(amount_in_words(dec!(1.999)), "Two Only");
    }

    #[test]
    fn conversion_is_idempotent_on_rounded_values() {
        let first = amount_in_words(dec!(1801.00));
        let second = amount_in_words(dec!(1801.00));
        assert_eq!(first, second);
    }

    #[test]
    fn sentence_template_is_fixed() {
        assert_eq!(
            tax_amount_sentence(dec!(180.00)),
            "Tax Amount (in words): INR One Hundred And Eighty Only"
        );
    }
}
