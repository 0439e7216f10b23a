//! Money amounts held as integer cents.

use std::fmt;

use barterhub_core::AppError;
use serde::{Deserialize, Serialize};

/// Largest accepted amount in cents (one billion dollars).
const MAX_CENTS: i64 = 100_000_000_000;

/// A positive amount of money in cents.
///
/// Serialized as a decimal number of dollars (`50.25`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(into = "f64", try_from = "f64")]
#[sqlx(transparent)]
pub struct Money(i64);

impl Money {
    /// Build from a dollar amount; must be finite and at least one cent.
    pub fn from_amount(amount: f64) -> Result<Self, AppError> {
        if !amount.is_finite() {
            return Err(AppError::validation("Money amount must be a finite number"));
        }
        let cents = (amount * 100.0).round();
        if cents < 1.0 {
            return Err(AppError::validation("Money amount must be positive"));
        }
        if cents > MAX_CENTS as f64 {
            return Err(AppError::validation("Money amount is too large"));
        }
        Ok(Self(cents as i64))
    }

    /// Build from a cent count.
    pub fn from_cents(cents: i64) -> Result<Self, AppError> {
        if !(1..=MAX_CENTS).contains(&cents) {
            return Err(AppError::validation(format!(
                "Money amount of {cents} cents is out of range"
            )));
        }
        Ok(Self(cents))
    }

    /// Amount in cents.
    pub fn cents(&self) -> i64 {
        self.0
    }

    /// Amount in dollars.
    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

/// `50` for whole dollars, `50.25` otherwise.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dollars = self.0 / 100;
        let cents = self.0 % 100;
        if cents == 0 {
            write!(f, "{dollars}")
        } else {
            write!(f, "{dollars}.{cents:02}")
        }
    }
}

impl From<Money> for f64 {
    fn from(money: Money) -> f64 {
        money.as_f64()
    }
}

impl TryFrom<f64> for Money {
    type Error = AppError;

    fn try_from(amount: f64) -> Result<Self, Self::Error> {
        Self::from_amount(amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_amount_rounds_to_cents() {
        assert_eq!(Money::from_amount(50.0).unwrap().cents(), 5000);
        assert_eq!(Money::from_amount(19.999).unwrap().cents(), 2000);
        assert_eq!(Money::from_amount(0.01).unwrap().cents(), 1);
    }

    #[test]
    fn test_from_amount_rejects_non_positive_and_non_finite() {
        assert!(Money::from_amount(0.0).is_err());
        assert!(Money::from_amount(-5.0).is_err());
        assert!(Money::from_amount(0.004).is_err());
        assert!(Money::from_amount(f64::NAN).is_err());
        assert!(Money::from_amount(f64::INFINITY).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(5000).unwrap().to_string(), "50");
        assert_eq!(Money::from_cents(5025).unwrap().to_string(), "50.25");
        assert_eq!(Money::from_cents(5).unwrap().to_string(), "0.05");
    }

    #[test]
    fn test_serde_as_dollars() {
        let money = Money::from_cents(1250).unwrap();
        assert_eq!(serde_json::to_string(&money).unwrap(), "12.5");
        let back: Money = serde_json::from_str("12.5").unwrap();
        assert_eq!(back, money);
        assert!(serde_json::from_str::<Money>("-1").is_err());
    }
}
