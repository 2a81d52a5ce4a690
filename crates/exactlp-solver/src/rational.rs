use std::fmt;
use std::str::FromStr;

use num_rational::Ratio;
use num_traits::{CheckedAdd, CheckedDiv, CheckedMul, CheckedSub};
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RationalError {
    #[error("Division by zero")]
    DivisionByZero,
    #[error("Arithmetic overflow")]
    ArithmeticOverflow,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseRationalError {
    #[error("Invalid rational literal: {0}")]
    Invalid(String),
    #[error(transparent)]
    Arithmetic(#[from] RationalError),
}

type Wide = Ratio<i128>;

/// An exact fraction over `i64`.
///
/// The inner [`Ratio`] is always reduced with a positive denominator, so
/// structural equality is value equality. Arithmetic runs on `Ratio<i128>`,
/// where no product of two `i64` parts can overflow, and is narrowed back
/// afterwards; results that do not fit report [`RationalError::ArithmeticOverflow`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rational(Ratio<i64>);

impl Rational {
    pub const ZERO: Rational = Rational::from_integer(0);
    pub const ONE: Rational = Rational::from_integer(1);
    /// Smallest representable value, used as the objective of an answer
    /// without a feasible basis.
    pub const MIN: Rational = Rational::from_integer(i64::MIN);

    /// Build `num / den` in lowest terms.
    pub fn new(num: i64, den: i64) -> Result<Self, RationalError> {
        if den == 0 {
            return Err(RationalError::DivisionByZero);
        }
        Self::narrow(Wide::new(num.into(), den.into()))
    }

    pub const fn from_integer(value: i64) -> Self {
        Self(Ratio::new_raw(value, 1))
    }

    fn widen(self) -> Wide {
        Wide::new_raw((*self.0.numer()).into(), (*self.0.denom()).into())
    }

    /// `value` must already be reduced.
    fn narrow(value: Wide) -> Result<Self, RationalError> {
        let num = i64::try_from(*value.numer()).map_err(|_| RationalError::ArithmeticOverflow)?;
        let den = i64::try_from(*value.denom()).map_err(|_| RationalError::ArithmeticOverflow)?;
        Ok(Self(Ratio::new_raw(num, den)))
    }

    fn combine(
        self,
        rhs: Self,
        op: impl FnOnce(&Wide, &Wide) -> Option<Wide>,
    ) -> Result<Self, RationalError> {
        let value = op(&self.widen(), &rhs.widen()).ok_or(RationalError::ArithmeticOverflow)?;
        Self::narrow(value)
    }

    pub fn numer(&self) -> i64 {
        *self.0.numer()
    }

    pub fn denom(&self) -> i64 {
        *self.0.denom()
    }

    pub fn is_zero(&self) -> bool {
        self.numer() == 0
    }

    pub fn is_positive(&self) -> bool {
        self.numer() > 0
    }

    pub fn is_negative(&self) -> bool {
        self.numer() < 0
    }

    pub fn is_integer(&self) -> bool {
        self.0.is_integer()
    }

    pub fn checked_add(self, rhs: Self) -> Result<Self, RationalError> {
        self.combine(rhs, <Wide as CheckedAdd>::checked_add)
    }

    pub fn checked_sub(self, rhs: Self) -> Result<Self, RationalError> {
        self.combine(rhs, <Wide as CheckedSub>::checked_sub)
    }

    pub fn checked_mul(self, rhs: Self) -> Result<Self, RationalError> {
        self.combine(rhs, <Wide as CheckedMul>::checked_mul)
    }

    pub fn checked_div(self, rhs: Self) -> Result<Self, RationalError> {
        if rhs.is_zero() {
            return Err(RationalError::DivisionByZero);
        }
        self.combine(rhs, <Wide as CheckedDiv>::checked_div)
    }

    pub fn checked_neg(self) -> Result<Self, RationalError> {
        let num = self.numer().checked_neg().ok_or(RationalError::ArithmeticOverflow)?;
        Ok(Self(Ratio::new_raw(num, self.denom())))
    }

    pub fn checked_abs(self) -> Result<Self, RationalError> {
        if self.is_negative() { self.checked_neg() } else { Ok(self) }
    }
}

impl Default for Rational {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<i64> for Rational {
    fn from(value: i64) -> Self {
        Self::from_integer(value)
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

fn is_integer_literal(text: &str, signed: bool) -> bool {
    let digits = match text.strip_prefix('-') {
        Some(rest) if signed => rest,
        _ => text,
    };
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

impl FromStr for Rational {
    type Err = ParseRationalError;

    /// Parses `num` or `num/den`, where `den` is a positive integer.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseRationalError::Invalid(s.to_string());
        let (num, den) = match s.split_once('/') {
            Some((num, den)) => (num, Some(den)),
            None => (s, None),
        };

        if !is_integer_literal(num, true) {
            return Err(invalid());
        }
        let num: i64 = num.parse().map_err(|_| invalid())?;

        match den {
            None => Ok(Self::from_integer(num)),
            Some(den) => {
                if !is_integer_literal(den, false) {
                    return Err(invalid());
                }
                let den: i64 = den.parse().map_err(|_| invalid())?;
                Ok(Self::new(num, den)?)
            }
        }
    }
}

impl TryFrom<String> for Rational {
    type Error = ParseRationalError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rational> for String {
    fn from(value: Rational) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use num_integer::Integer;
    use proptest::prelude::*;

    use super::*;

    fn r(num: i64, den: i64) -> Rational {
        Rational::new(num, den).unwrap()
    }

    #[test]
    fn test_normalization() {
        assert_eq!(r(6, 8), r(3, 4));
        assert_eq!(r(6, -8).numer(), -3);
        assert_eq!(r(6, -8).denom(), 4);
        assert_eq!(r(-6, -8), r(3, 4));
        assert_eq!(r(0, -5), Rational::ZERO);
        assert_eq!(r(0, -5).denom(), 1);
    }

    #[test]
    fn test_zero_denominator() {
        assert_eq!(Rational::new(1, 0), Err(RationalError::DivisionByZero));
        assert_eq!(
            Rational::ONE.checked_div(Rational::ZERO),
            Err(RationalError::DivisionByZero)
        );
    }

    #[test]
    fn test_overflow_is_reported() {
        let max = Rational::from_integer(i64::MAX);
        assert_eq!(max.checked_add(Rational::ONE), Err(RationalError::ArithmeticOverflow));
        assert_eq!(max.checked_mul(max), Err(RationalError::ArithmeticOverflow));
        assert_eq!(Rational::MIN.checked_neg(), Err(RationalError::ArithmeticOverflow));
        assert_eq!(Rational::MIN.checked_abs(), Err(RationalError::ArithmeticOverflow));
        assert_eq!(Rational::new(i64::MIN, -1), Err(RationalError::ArithmeticOverflow));
        assert_eq!(Rational::new(i64::MIN, 1), Ok(Rational::MIN));
    }

    #[test]
    fn test_wide_intermediates_narrow_back() {
        let big = r(i64::MAX, 2);
        assert_eq!(r(1, i64::MAX).checked_mul(r(i64::MAX, 3)).unwrap(), r(1, 3));
        assert_eq!(big.checked_sub(r(i64::MAX - 2, 2)).unwrap(), Rational::ONE);
        assert_eq!(big.checked_div(big).unwrap(), Rational::ONE);
        assert_eq!(
            r(1, i64::MAX).checked_add(r(1, i64::MAX - 1)),
            Err(RationalError::ArithmeticOverflow)
        );
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(r(1, 2).checked_add(r(1, 3)).unwrap(), r(5, 6));
        assert_eq!(r(1, 2).checked_sub(r(1, 3)).unwrap(), r(1, 6));
        assert_eq!(r(2, 3).checked_mul(r(3, 4)).unwrap(), r(1, 2));
        assert_eq!(r(2, 3).checked_div(r(-4, 9)).unwrap(), r(-3, 2));
        assert_eq!(r(-7, 3).checked_abs().unwrap(), r(7, 3));
        assert_eq!(r(7, 3).checked_neg().unwrap(), r(-7, 3));
    }

    #[test]
    fn test_ordering_large_values() {
        let a = r(i64::MAX, 3);
        let b = r(i64::MAX - 1, 3);
        assert!(a > b);
        assert!(Rational::MIN < b.checked_neg().unwrap());
    }

    #[test]
    fn test_display() {
        assert_eq!(r(4, 2).to_string(), "2");
        assert_eq!(r(-3, 6).to_string(), "-1/2");
        assert_eq!(Rational::ZERO.to_string(), "0");
    }

    #[test]
    fn test_parse() {
        assert_eq!("12".parse::<Rational>().unwrap(), Rational::from_integer(12));
        assert_eq!("-4/6".parse::<Rational>().unwrap(), r(-2, 3));
        assert_eq!(
            "1/0".parse::<Rational>(),
            Err(ParseRationalError::Arithmetic(RationalError::DivisionByZero))
        );
        for bad in ["", "-", "1/", "/2", "1/-2", "+3", "1.5", "1 / 2", "x"] {
            assert!(
                matches!(bad.parse::<Rational>(), Err(ParseRationalError::Invalid(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    fn rational() -> impl Strategy<Value = Rational> {
        (-1000i64..1000, 1i64..1000, any::<bool>())
            .prop_map(|(num, den, flip)| r(num, if flip { -den } else { den }))
    }

    proptest! {
        #[test]
        fn normalization_divides_by_gcd(p in -10_000i64..10_000, q in 1i64..10_000, flip in any::<bool>()) {
            let q = if flip { -q } else { q };
            let g = p.gcd(&q);
            let value = r(p, q);
            prop_assert!(value.denom() > 0);
            prop_assert_eq!(value.numer().gcd(&value.denom()), 1);
            prop_assert_eq!(value, r(p / g, q / g));
        }

        #[test]
        fn field_identities(a in rational(), b in rational()) {
            prop_assert_eq!(a.checked_add(b).unwrap(), b.checked_add(a).unwrap());
            prop_assert_eq!(a.checked_mul(b).unwrap(), b.checked_mul(a).unwrap());
            prop_assert_eq!(a.checked_sub(a).unwrap(), Rational::ZERO);
            if !a.is_zero() {
                prop_assert_eq!(a.checked_div(a).unwrap(), Rational::ONE);
            }
            prop_assert_eq!(a.checked_add(b).unwrap().checked_sub(b).unwrap(), a);
        }

        #[test]
        fn ordering_matches_cross_multiplication(a in rational(), b in rational()) {
            let expected = (i128::from(a.numer()) * i128::from(b.denom()))
                .cmp(&(i128::from(b.numer()) * i128::from(a.denom())));
            prop_assert_eq!(a.cmp(&b), expected);
            let holds = [a < b, a == b, a > b].iter().filter(|x| **x).count();
            prop_assert_eq!(holds, 1);
        }
    }
}
