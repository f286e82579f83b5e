//! Знаковое 128-битное целое в дополнительном коде.

use std::{
    cmp::Ordering,
    fmt,
    ops::{Add, Mul, Neg, Sub},
    str::FromStr,
};

use beson_error::{BesonError, BesonResult};

use super::{decimal, UInt128};

const SIGN_BIT: u64 = 0x8000_0000_0000_0000;

/// Знаковое 128-битное целое поверх того же двухсловного шаблона, что и
/// [`UInt128`]. Отрицательные значения хранятся в дополнительном коде.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Int128(UInt128);

impl Int128 {
    pub const ZERO: Self = Self(UInt128::ZERO);
    pub const ONE: Self = Self(UInt128::ONE);
    pub const MINUS_ONE: Self = Self(UInt128::MAX);
    pub const MIN: Self = Self(UInt128::new(SIGN_BIT, 0));
    pub const MAX: Self = Self(UInt128::new(!SIGN_BIT, u64::MAX));

    pub const fn new(
        high: u64,
        low: u64,
    ) -> Self {
        Self(UInt128::new(high, low))
    }

    pub const fn from_bits(bits: UInt128) -> Self {
        Self(bits)
    }

    pub const fn to_bits(self) -> UInt128 {
        self.0
    }

    pub const fn high(self) -> u64 {
        self.0.high()
    }

    pub const fn low(self) -> u64 {
        self.0.low()
    }

    pub fn from_le_bytes(bytes: [u8; 16]) -> Self {
        Self(UInt128::from_le_bytes(bytes))
    }

    pub fn to_le_bytes(self) -> [u8; 16] {
        self.0.to_le_bytes()
    }

    /// Установлен ли старший бит `high`.
    pub const fn is_negative(self) -> bool {
        self.0.high() & SIGN_BIT != 0
    }

    pub fn wrapping_neg(self) -> Self {
        Self(self.0.twos_complement())
    }

    /// Модуль как беззнаковое значение; для `MIN` это 2^127.
    pub fn unsigned_abs(self) -> UInt128 {
        if self.is_negative() {
            self.0.twos_complement()
        } else {
            self.0
        }
    }

    pub fn wrapping_add(
        self,
        rhs: Self,
    ) -> Self {
        Self(self.0.wrapping_add(rhs.0))
    }

    pub fn wrapping_sub(
        self,
        rhs: Self,
    ) -> Self {
        Self(self.0.wrapping_sub(rhs.0))
    }

    /// Младшие 128 бит произведения совпадают для знаковой и беззнаковой
    /// интерпретации.
    pub fn wrapping_mul(
        self,
        rhs: Self,
    ) -> Self {
        Self(self.0.wrapping_mul(rhs.0))
    }

    /// Знаковое деление с усечением к нулю; остаток имеет знак делимого.
    /// `MIN / -1` возвращает `MIN`.
    ///
    /// # Errors
    ///
    /// [`BesonError::DivisionByZero`], если делитель равен нулю.
    pub fn checked_div_rem(
        self,
        divisor: Self,
    ) -> BesonResult<(Self, Self)> {
        let (q, r) = self.unsigned_abs().div_rem(divisor.unsigned_abs())?;
        let q = if self.is_negative() != divisor.is_negative() {
            q.twos_complement()
        } else {
            q
        };
        let r = if self.is_negative() {
            r.twos_complement()
        } else {
            r
        };
        Ok((Self(q), Self(r)))
    }

    /// Знаковое сравнение: инверсия знакового бита сводит его к беззнаковому.
    pub fn compare(
        &self,
        other: &Self,
    ) -> Ordering {
        let flip = |v: &Self| UInt128::new(v.high() ^ SIGN_BIT, v.low());
        flip(self).compare(&flip(other))
    }

    /// Разбирает десятичный литерал с необязательным знаком.
    ///
    /// Сначала строится беззнаковая величина, для `-` к ней применяется
    /// отрицание в дополнительном коде.
    ///
    /// # Errors
    ///
    /// [`BesonError::InvalidDecimalString`] для пустой строки, посторонних
    /// символов и значений вне диапазона `[-2^127, 2^127 - 1]`.
    pub fn from_decimal_str(s: &str) -> BesonResult<Self> {
        if s.is_empty() {
            return Err(decimal::invalid(s, "empty string"));
        }
        let (negative, digits) = match s.as_bytes()[0] {
            b'+' => (false, &s[1..]),
            b'-' => (true, &s[1..]),
            _ => (false, s),
        };

        let magnitude = UInt128::parse_magnitude(s, digits)?;
        let limit = if negative {
            Self::MIN.0
        } else {
            Self::MAX.0
        };
        if magnitude > limit {
            return Err(decimal::invalid(s, "value out of signed 128-bit range"));
        }

        if negative {
            Ok(Self(magnitude.twos_complement()))
        } else {
            Ok(Self(magnitude))
        }
    }

    pub fn to_decimal_string(self) -> String {
        let magnitude = self.unsigned_abs().to_decimal_string();
        if self.is_negative() {
            format!("-{magnitude}")
        } else {
            magnitude
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Общие реализации трейтов для Int128
////////////////////////////////////////////////////////////////////////////////

impl Ord for Int128 {
    fn cmp(
        &self,
        other: &Self,
    ) -> Ordering {
        self.compare(other)
    }
}

impl PartialOrd for Int128 {
    fn partial_cmp(
        &self,
        other: &Self,
    ) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<i64> for Int128 {
    fn from(v: i64) -> Self {
        let high = if v < 0 { u64::MAX } else { 0 };
        Self::new(high, v as u64)
    }
}

impl From<i128> for Int128 {
    fn from(v: i128) -> Self {
        Self(UInt128::from(v as u128))
    }
}

impl From<Int128> for i128 {
    fn from(v: Int128) -> Self {
        u128::from(v.0) as i128
    }
}

impl FromStr for Int128 {
    type Err = BesonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_decimal_str(s)
    }
}

impl fmt::Display for Int128 {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.pad_integral(
            !self.is_negative(),
            "",
            &self.unsigned_abs().to_decimal_string(),
        )
    }
}

impl Add for Int128 {
    type Output = Int128;

    fn add(
        self,
        rhs: Int128,
    ) -> Int128 {
        self.wrapping_add(rhs)
    }
}

impl Sub for Int128 {
    type Output = Int128;

    fn sub(
        self,
        rhs: Int128,
    ) -> Int128 {
        self.wrapping_sub(rhs)
    }
}

impl Mul for Int128 {
    type Output = Int128;

    fn mul(
        self,
        rhs: Int128,
    ) -> Int128 {
        self.wrapping_mul(rhs)
    }
}

impl Neg for Int128 {
    type Output = Int128;

    fn neg(self) -> Int128 {
        self.wrapping_neg()
    }
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////
