//! List prices.

use discover_core::ValueObject;
use serde::{Deserialize, Serialize};

/// A list price in one currency.
///
/// `amount` is expressed in the currency's minor unit: cents for USD, whole
/// yen for JPY, fils for KWD. See [`Money::decimal_places`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    pub currency: String,
    pub amount: u64,
}

impl Money {
    pub fn new(currency: impl Into<String>, amount: u64) -> Self {
        Self {
            currency: currency.into(),
            amount,
        }
    }

    pub fn zero(currency: impl Into<String>) -> Self {
        Self::new(currency, 0)
    }

    /// Pick the entry for `currency` (case-insensitive ISO code match).
    pub fn find_in<'a>(prices: &'a [Money], currency: &str) -> Option<&'a Money> {
        prices
            .iter()
            .find(|m| m.currency.eq_ignore_ascii_case(currency))
    }

    /// ISO 4217 minor-unit exponent of the currency. Unlisted codes use 2.
    pub fn decimal_places(&self) -> u32 {
        match self.currency.to_ascii_uppercase().as_str() {
            "BIF" | "CLP" | "DJF" | "GNF" | "ISK" | "JPY" | "KMF" | "KRW" | "PYG" | "RWF"
            | "UGX" | "UYI" | "VND" | "VUV" | "XAF" | "XOF" | "XPF" => 0,
            "BHD" | "IQD" | "JOD" | "KWD" | "LYD" | "OMR" | "TND" => 3,
            _ => 2,
        }
    }
}

impl ValueObject for Money {}

/// Decimal rendering in the currency's minor unit, without the currency code.
impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let places = self.decimal_places();
        if places == 0 {
            return write!(f, "{}", self.amount);
        }
        let unit = 10u64.pow(places);
        write!(
            f,
            "{}.{:0width$}",
            self.amount / unit,
            self.amount % unit,
            width = places as usize
        )
    }
}
