//! Mock quotation figures
//!
//! The console does no real pricing. These figures are the indicative
//! numbers shown on the review screen: a fixed current premium, an additional
//! premium per listed property, a flat admin fee and VAT on the lot.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::fmt::Write as _;

use core_kernel::{CoreError, Currency, Money, Rate};

const CURRENT_PREMIUM: Decimal = dec!(45000);
const ADDITIONAL_PREMIUM_PER_PROPERTY: Decimal = dec!(8500);
const ADMIN_FEES: Decimal = dec!(500);
const VAT_PERCENT: Decimal = dec!(15);

/// Closing sentence of every generated summary
pub const STANDARD_RISK_NOTE: &str =
    "Standard risk profile with moderate exposure based on property characteristics.";

/// Line items of an indicative quotation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotationFigures {
    pub current_premium: Money,
    pub additional_premium: Money,
    pub admin_fees: Money,
    pub vat_rate: Rate,
    pub vat: Money,
    pub total: Money,
}

impl QuotationFigures {
    /// Figures for a request listing `property_count` properties
    ///
    /// # Errors
    ///
    /// `CoreError::Validation` for a count of zero (a draft always lists at
    /// least one property).
    pub fn for_properties(property_count: usize) -> Result<Self, CoreError> {
        if property_count == 0 {
            return Err(CoreError::validation("a quotation needs at least one property"));
        }

        let currency = Currency::SAR;
        let current_premium = Money::new(CURRENT_PREMIUM, currency);
        let additional_premium =
            Money::new(ADDITIONAL_PREMIUM_PER_PROPERTY, currency).multiply(Decimal::from(property_count));
        let admin_fees = Money::new(ADMIN_FEES, currency);

        let subtotal = Money::sum(currency, [&current_premium, &additional_premium, &admin_fees]);
        let vat_rate = Rate::from_percentage(VAT_PERCENT);
        let vat = vat_rate.apply(&subtotal).round_to_currency();
        let total = subtotal + vat;

        Ok(Self {
            current_premium,
            additional_premium,
            admin_fees,
            vat_rate,
            vat,
            total,
        })
    }

    /// The single-property figures used when no generator answers
    pub fn standard() -> Self {
        Self {
            current_premium: Money::new(CURRENT_PREMIUM, Currency::SAR),
            additional_premium: Money::new(ADDITIONAL_PREMIUM_PER_PROPERTY, Currency::SAR),
            admin_fees: Money::new(ADMIN_FEES, Currency::SAR),
            vat_rate: Rate::from_percentage(VAT_PERCENT),
            vat: Money::new(dec!(8100), Currency::SAR),
            total: Money::new(dec!(62100), Currency::SAR),
        }
    }

    /// Renders the "Financial Summary" block followed by a risk note
    pub fn render(&self, risk_note: &str) -> String {
        let mut text = String::from("Financial Summary:\n");
        let _ = writeln!(text, "- Current Premium: {}", self.current_premium);
        let _ = writeln!(text, "- Endorsement Additional Premium: {}", self.additional_premium);
        let _ = writeln!(text, "- Admin Fees: {}", self.admin_fees);
        let _ = writeln!(text, "- VAT ({}): {}", self.vat_rate, self.vat);
        let _ = writeln!(text, "- Total Adjusted Premium: {}", self.total);
        let _ = write!(text, "\nRisk Assessment: {}", risk_note);
        text
    }
}
