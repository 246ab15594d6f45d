//! Numeric payload of [`Value::Number`](crate::Value::Number).
//!
//! A single type holds every 64-bit integer (signed or unsigned) and every
//! IEEE-754 double without loss. Equality is numeric across representations:
//! `Number::from(1) == Number::from(1.0)`.

use std::fmt;
use std::str::FromStr;

/// A JSON number.
#[derive(Clone, Copy, Debug)]
pub struct Number {
    n: N,
}

#[derive(Clone, Copy, Debug)]
enum N {
    /// Always `>= 0`.
    PosInt(u64),
    /// Always `< 0`.
    NegInt(i64),
    Float(f64),
}

impl Number {
    /// Wrap a double. Non-finite values are representable in the tree; the
    /// encoding engine refuses to produce them unless a strategy renders them.
    pub fn from_f64(f: f64) -> Self {
        Number { n: N::Float(f) }
    }

    #[inline]
    pub fn is_i64(&self) -> bool {
        match self.n {
            N::PosInt(u) => u <= i64::MAX as u64,
            N::NegInt(_) => true,
            N::Float(_) => false,
        }
    }

    #[inline]
    pub fn is_u64(&self) -> bool {
        matches!(self.n, N::PosInt(_))
    }

    #[inline]
    pub fn is_f64(&self) -> bool {
        matches!(self.n, N::Float(_))
    }

    pub fn is_finite(&self) -> bool {
        match self.n {
            N::Float(f) => f.is_finite(),
            _ => true,
        }
    }

    /// The value as `i64` if it is stored as an integer in range.
    pub fn as_i64(&self) -> Option<i64> {
        match self.n {
            N::PosInt(u) => i64::try_from(u).ok(),
            N::NegInt(i) => Some(i),
            N::Float(_) => None,
        }
    }

    /// The value as `u64` if it is stored as a non-negative integer.
    pub fn as_u64(&self) -> Option<u64> {
        match self.n {
            N::PosInt(u) => Some(u),
            _ => None,
        }
    }

    /// The value as `f64`; integers beyond 2^53 lose precision.
    pub fn as_f64(&self) -> f64 {
        match self.n {
            N::PosInt(u) => u as f64,
            N::NegInt(i) => i as f64,
            N::Float(f) => f,
        }
    }

    /// The exact integral value, if there is one. Integral floats qualify.
    pub(crate) fn as_i128_exact(&self) -> Option<i128> {
        match self.n {
            N::PosInt(u) => Some(i128::from(u)),
            N::NegInt(i) => Some(i128::from(i)),
            N::Float(f) => {
                if !f.is_finite() || f.fract() != 0.0 {
                    return None;
                }
                // 2^127 rounds back equal after saturating to i128::MAX, so
                // bound the float before converting.
                if !(-(2f64.powi(127))..2f64.powi(127)).contains(&f) {
                    return None;
                }
                Some(f as i128)
            }
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self.n, other.n) {
            (N::PosInt(a), N::PosInt(b)) => a == b,
            (N::NegInt(a), N::NegInt(b)) => a == b,
            (N::PosInt(_), N::NegInt(_)) | (N::NegInt(_), N::PosInt(_)) => false,
            (N::Float(a), N::Float(b)) => a == b || a.to_bits() == b.to_bits(),
            (N::Float(_), _) => other.eq_integral(self),
            (_, N::Float(_)) => self.eq_integral(other),
        }
    }
}

impl Number {
    fn eq_integral(&self, float: &Number) -> bool {
        match (self.as_i128_exact(), float.as_i128_exact()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.n {
            N::PosInt(u) => write!(f, "{u}"),
            N::NegInt(i) => write!(f, "{i}"),
            N::Float(x) => write!(f, "{x}"),
        }
    }
}

macro_rules! from_unsigned {
    ($($t:ty),*) => {$(
        impl From<$t> for Number {
            fn from(u: $t) -> Self {
                Number { n: N::PosInt(u as u64) }
            }
        }
    )*};
}

macro_rules! from_signed {
    ($($t:ty),*) => {$(
        impl From<$t> for Number {
            fn from(i: $t) -> Self {
                let n = if i < 0 { N::NegInt(i as i64) } else { N::PosInt(i as u64) };
                Number { n }
            }
        }
    )*};
}

from_unsigned!(u8, u16, u32, u64, usize);
from_signed!(i8, i16, i32, i64, isize);

impl From<f32> for Number {
    fn from(f: f32) -> Self {
        Number::from_f64(f64::from(f))
    }
}

impl From<f64> for Number {
    fn from(f: f64) -> Self {
        Number::from_f64(f)
    }
}

/// A native numeric type the engines can unbox into and box from.
///
/// Implemented for every integer width up to 64 bits, `f32` and `f64`.
pub trait NumberPrimitive: Copy + FromStr + fmt::Display + Into<Number> {
    /// Name used in diagnostics (`"i32"`, `"f64"`, ...).
    const NAME: &'static str;

    /// Convert if `number` is representable in `Self`.
    fn from_number(number: &Number) -> Option<Self>;

    /// Parse a decimal literal, rejecting values outside `Self`'s range.
    fn parse_literal(literal: &str) -> Option<Self> {
        literal.parse().ok()
    }
}

/// Float parsing rounds overflowing literals to infinity; only an explicit
/// infinity spelling may produce one.
fn is_infinity_literal(literal: &str) -> bool {
    let unsigned = literal.trim_start_matches(['+', '-']);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

macro_rules! integer_primitive {
    ($($t:ident),*) => {$(
        impl NumberPrimitive for $t {
            const NAME: &'static str = stringify!($t);

            fn from_number(number: &Number) -> Option<Self> {
                number.as_i128_exact().and_then(|i| $t::try_from(i).ok())
            }
        }
    )*};
}

integer_primitive!(i8, i16, i32, i64, u8, u16, u32, u64);

impl NumberPrimitive for f64 {
    const NAME: &'static str = "f64";

    fn from_number(number: &Number) -> Option<Self> {
        Some(number.as_f64())
    }

    fn parse_literal(literal: &str) -> Option<Self> {
        let f = literal.parse::<f64>().ok()?;
        (!f.is_infinite() || is_infinity_literal(literal)).then_some(f)
    }
}

impl NumberPrimitive for f32 {
    const NAME: &'static str = "f32";

    fn from_number(number: &Number) -> Option<Self> {
        let f = number.as_f64();
        if f.is_finite() && f.abs() > f64::from(f32::MAX) {
            return None;
        }
        Some(f as f32)
    }

    fn parse_literal(literal: &str) -> Option<Self> {
        let f = literal.parse::<f32>().ok()?;
        (!f.is_infinite() || is_infinity_literal(literal)).then_some(f)
    }
}
