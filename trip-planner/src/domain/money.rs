//! Currency amounts.

use std::fmt;
use std::ops::{Add, Mul};

/// An amount of money in the traveller's currency.
///
/// Budgets arrive as decimal strings and prices as JSON numbers, so the
/// amount is held as an `f64`. Construction through [`Money::parse`] never
/// yields NaN or infinity.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Money(f64);

impl Money {
    /// Zero.
    pub const ZERO: Money = Money(0.0);

    /// Wrap a raw amount.
    pub const fn new(amount: f64) -> Self {
        Money(amount)
    }

    /// Parse a decimal string such as `"800"` or `"149.50"`.
    ///
    /// Surrounding whitespace is ignored. Returns `None` for anything that
    /// is not a finite number.
    pub fn parse(s: &str) -> Option<Self> {
        let value: f64 = s.trim().parse().ok()?;
        value.is_finite().then_some(Money(value))
    }

    /// The underlying amount.
    pub fn amount(self) -> f64 {
        self.0
    }

    /// Plain decimal form used on the wire: `800`, `149.5`.
    pub fn to_plain_string(self) -> String {
        if self.0.fract() == 0.0 && self.0.abs() < 1e15 {
            format!("{}", self.0 as i64)
        } else {
            format!("{}", self.0)
        }
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl Mul<f64> for Money {
    type Output = Money;

    fn mul(self, rhs: f64) -> Money {
        Money(self.0 * rhs)
    }
}

impl fmt::Display for Money {
    /// Dollar form with thousands separators: `$3,880`, `-$1,250.5`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = (self.0 * 100.0).round() / 100.0;
        let sign = if rounded < 0.0 { "-" } else { "" };
        let abs = rounded.abs();
        let whole = abs.trunc() as u64;
        let cents = ((abs - abs.trunc()) * 100.0).round() as u64;

        let digits = whole.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        write!(f, "{sign}${grouped}")?;
        match cents {
            0 => Ok(()),
            c if c % 10 == 0 => write!(f, ".{}", c / 10),
            c => write!(f, ".{c:02}"),
        }
    }
}
