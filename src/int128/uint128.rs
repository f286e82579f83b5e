//! Беззнаковое 128-битное целое из двух слов `u64`.
//!
//! Арифметика пословная. Перенос при сложении считается вручную, умножение
//! сделано сдвигом и сложением, деление выполняется двоичным столбиком.

use std::{
    cmp::Ordering,
    fmt,
    ops::{
        Add, AddAssign, BitAnd, BitOr, BitXor, Mul, MulAssign, Not, Shl, ShlAssign, Shr,
        ShrAssign, Sub, SubAssign,
    },
    str::FromStr,
};

use beson_error::{BesonError, BesonResult};
use byteorder::{ByteOrder, LittleEndian};

use super::decimal::{self, CHUNK_DIGITS, CHUNK_DIVISOR};

/// Беззнаковое 128-битное целое: `high * 2^64 + low`.
///
/// Допустимы все 2^128 комбинаций слов.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct UInt128 {
    high: u64,
    low: u64,
}

/// Маска из `bits` младших единичных битов.
fn gen_mask(bits: u32) -> u64 {
    if bits >= 64 {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}

impl UInt128 {
    pub const ZERO: Self = Self::new(0, 0);
    pub const ONE: Self = Self::new(0, 1);
    pub const MAX: Self = Self::new(u64::MAX, u64::MAX);
    pub const BITS: u32 = 128;

    /// Собирает значение из двух сырых слов.
    pub const fn new(
        high: u64,
        low: u64,
    ) -> Self {
        Self { high, low }
    }

    pub const fn high(self) -> u64 {
        self.high
    }

    pub const fn low(self) -> u64 {
        self.low
    }

    pub const fn is_zero(self) -> bool {
        self.high == 0 && self.low == 0
    }

    /// Читает 16 байт: младшее слово, затем старшее (оба little-endian).
    pub fn from_le_bytes(bytes: [u8; 16]) -> Self {
        Self {
            low: LittleEndian::read_u64(&bytes[..8]),
            high: LittleEndian::read_u64(&bytes[8..]),
        }
    }

    /// Обратная к [`UInt128::from_le_bytes`].
    pub fn to_le_bytes(self) -> [u8; 16] {
        let mut out = [0u8; 16];
        LittleEndian::write_u64(&mut out[..8], self.low);
        LittleEndian::write_u64(&mut out[8..], self.high);
        out
    }

    /// Беззнаковое сравнение: сначала старшие слова, затем младшие.
    pub fn compare(
        &self,
        other: &Self,
    ) -> Ordering {
        self.high
            .cmp(&other.high)
            .then_with(|| self.low.cmp(&other.low))
    }

    /// Количество значащих битов (0 для нуля).
    pub fn bit_length(self) -> u32 {
        Self::BITS - self.leading_zeros()
    }

    pub fn leading_zeros(self) -> u32 {
        if self.high == 0 {
            64 + self.low.leading_zeros()
        } else {
            self.high.leading_zeros()
        }
    }

    ////////////////////////////////////////////////////////////////////////////
    // Арифметика
    ////////////////////////////////////////////////////////////////////////////

    /// Сложение по модулю 2^128 с ручным переносом из младшего слова.
    pub fn wrapping_add(
        self,
        rhs: Self,
    ) -> Self {
        let carry = u64::from(self.low > u64::MAX - rhs.low);
        Self {
            low: self.low.wrapping_add(rhs.low),
            high: self.high.wrapping_add(rhs.high).wrapping_add(carry),
        }
    }

    /// Вычитание как `self + (-rhs)`.
    pub fn wrapping_sub(
        self,
        rhs: Self,
    ) -> Self {
        self.wrapping_add(rhs.twos_complement())
    }

    /// Отрицание в дополнительном коде: инверсия обоих слов плюс один.
    pub fn twos_complement(self) -> Self {
        self.bit_not().wrapping_add(Self::ONE)
    }

    /// Умножение сдвигом и сложением.
    ///
    /// Операнды копируются в собственные аккумуляторы, поэтому результат
    /// никогда не пересекается с входами.
    pub fn wrapping_mul(
        self,
        rhs: Self,
    ) -> Self {
        let mut acc = Self::ZERO;
        let mut a = self;
        let mut b = rhs;

        for _ in 0..rhs.bit_length() {
            if b.low & 1 == 1 {
                acc = acc.wrapping_add(a);
            }
            a = a.shift_left(1);
            b = b.shift_right(1);
        }

        acc
    }

    /// Восстанавливающее деление столбиком. Возвращает `(частное, остаток)`.
    ///
    /// # Errors
    ///
    /// [`BesonError::DivisionByZero`], если делитель равен нулю.
    pub fn div_rem(
        self,
        divisor: Self,
    ) -> BesonResult<(Self, Self)> {
        if divisor.is_zero() {
            return Err(BesonError::DivisionByZero);
        }
        if self.compare(&divisor) == Ordering::Less {
            return Ok((Self::ZERO, self));
        }

        // Выравниваем старший бит делителя по старшему биту делимого.
        let r_padding = self.leading_zeros();
        let d_padding = divisor.leading_zeros();
        let mut divider = divisor.shift_left(d_padding).shift_right(r_padding);

        let mut remainder = self;
        let mut quotient = Self::ZERO;
        let mut count = d_padding - r_padding + 1;

        while count > 0 {
            count -= 1;

            if remainder.compare(&divider) != Ordering::Less {
                remainder = remainder.wrapping_sub(divider);
                quotient.low |= 1;
            }
            if count > 0 {
                quotient = quotient.shift_left(1);
                divider = divider.shift_right(1);
            }
        }

        Ok((quotient, remainder))
    }

    /// Частное без остатка.
    pub fn checked_div(
        self,
        divisor: Self,
    ) -> BesonResult<Self> {
        self.div_rem(divisor).map(|(q, _)| q)
    }

    /// Остаток от деления.
    pub fn checked_rem(
        self,
        divisor: Self,
    ) -> BesonResult<Self> {
        self.div_rem(divisor).map(|(_, r)| r)
    }

    ////////////////////////////////////////////////////////////////////////////
    // Сдвиги и побитовые операции
    ////////////////////////////////////////////////////////////////////////////

    /// Сдвиг влево; `bits >= 128` даёт ноль.
    pub fn shift_left(
        self,
        bits: u32,
    ) -> Self {
        match bits {
            0 => self,
            1..=63 => {
                let shifted = (self.low & !gen_mask(64 - bits)) >> (64 - bits);
                Self {
                    low: self.low << bits,
                    high: (self.high << bits) | shifted,
                }
            }
            64..=127 => Self {
                high: self.low << (bits - 64),
                low: 0,
            },
            _ => Self::ZERO,
        }
    }

    /// Логический сдвиг вправо; `bits >= 128` даёт ноль.
    pub fn shift_right(
        self,
        bits: u32,
    ) -> Self {
        match bits {
            0 => self,
            1..=63 => {
                let shifted = self.high & gen_mask(bits);
                Self {
                    high: self.high >> bits,
                    low: (self.low >> bits) | (shifted << (64 - bits)),
                }
            }
            64..=127 => Self {
                low: self.high >> (bits - 64),
                high: 0,
            },
            _ => Self::ZERO,
        }
    }

    pub fn bit_and(
        self,
        rhs: Self,
    ) -> Self {
        Self::new(self.high & rhs.high, self.low & rhs.low)
    }

    pub fn bit_or(
        self,
        rhs: Self,
    ) -> Self {
        Self::new(self.high | rhs.high, self.low | rhs.low)
    }

    pub fn bit_xor(
        self,
        rhs: Self,
    ) -> Self {
        Self::new(self.high ^ rhs.high, self.low ^ rhs.low)
    }

    pub fn bit_not(self) -> Self {
        Self::new(!self.high, !self.low)
    }

    ////////////////////////////////////////////////////////////////////////////
    // Строковые представления
    ////////////////////////////////////////////////////////////////////////////

    /// Разбирает десятичный литерал с необязательным `+`.
    ///
    /// Значение строится побитно делением строки цифр на два.
    ///
    /// # Errors
    ///
    /// [`BesonError::InvalidDecimalString`] для пустой строки, знака `-`,
    /// посторонних символов и значений не меньше 2^128.
    pub fn from_decimal_str(s: &str) -> BesonResult<Self> {
        if s.is_empty() {
            return Err(decimal::invalid(s, "empty string"));
        }
        let digits = match s.as_bytes()[0] {
            b'+' => &s[1..],
            b'-' => return Err(decimal::invalid(s, "negative value for unsigned type")),
            _ => s,
        };
        Self::parse_magnitude(s, digits)
    }

    /// Строит беззнаковую величину из цифр `digits`; `input` нужен для
    /// сообщения об ошибке.
    pub(crate) fn parse_magnitude(
        input: &str,
        digits: &str,
    ) -> BesonResult<Self> {
        let mut digits = decimal::parse_digits(input, digits)?;
        let mut value = Self::ZERO;
        let mut bit = 0;

        while !digits.is_empty() {
            if bit >= Self::BITS {
                return Err(decimal::invalid(input, "value exceeds 128 bits"));
            }
            if decimal::is_odd(&digits) {
                value = value.bit_or(Self::ONE.shift_left(bit));
            }
            digits = decimal::divide_by_two(&digits);
            bit += 1;
        }

        Ok(value)
    }

    /// Десятичная запись: деление на 10^19 с дополнением блоков нулями.
    pub fn to_decimal_string(self) -> String {
        let divisor = Self::from(CHUNK_DIVISOR);
        let mut chunks = Vec::new();
        let mut rest = self;

        while !rest.is_zero() {
            // Делитель ненулевой, поэтому ошибки здесь быть не может.
            let Ok((q, r)) = rest.div_rem(divisor) else {
                break;
            };
            chunks.push(r.low);
            rest = q;
        }

        match chunks.split_last() {
            None => "0".to_string(),
            Some((head, tail)) => {
                let mut out = head.to_string();
                for chunk in tail.iter().rev() {
                    out.push_str(&decimal::pad_zeros(&chunk.to_string(), CHUNK_DIGITS));
                }
                out
            }
        }
    }

    /// Двоичная запись без ведущих нулей.
    pub fn to_binary_string(self) -> String {
        if self.high == 0 {
            return format!("{:b}", self.low);
        }
        format!("{:b}{}", self.high, decimal::pad_zeros(&format!("{:b}", self.low), 64))
    }

    /// Шестнадцатеричная запись (строчные буквы) без ведущих нулей.
    pub fn to_hex_string(self) -> String {
        if self.high == 0 {
            return format!("{:x}", self.low);
        }
        format!("{:x}{}", self.high, decimal::pad_zeros(&format!("{:x}", self.low), 16))
    }
}

////////////////////////////////////////////////////////////////////////////////
// Общие реализации трейтов для UInt128
////////////////////////////////////////////////////////////////////////////////

impl Ord for UInt128 {
    fn cmp(
        &self,
        other: &Self,
    ) -> Ordering {
        self.compare(other)
    }
}

impl PartialOrd for UInt128 {
    fn partial_cmp(
        &self,
        other: &Self,
    ) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<u64> for UInt128 {
    fn from(v: u64) -> Self {
        Self::new(0, v)
    }
}

impl From<u128> for UInt128 {
    fn from(v: u128) -> Self {
        Self::new((v >> 64) as u64, v as u64)
    }
}

impl From<UInt128> for u128 {
    fn from(v: UInt128) -> Self {
        (u128::from(v.high) << 64) | u128::from(v.low)
    }
}

impl FromStr for UInt128 {
    type Err = BesonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_decimal_str(s)
    }
}

impl fmt::Display for UInt128 {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.pad_integral(true, "", &self.to_decimal_string())
    }
}

impl fmt::LowerHex for UInt128 {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.pad_integral(true, "0x", &self.to_hex_string())
    }
}

impl fmt::Binary for UInt128 {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.pad_integral(true, "0b", &self.to_binary_string())
    }
}

macro_rules! forward_binop {
    ($Trait:ident, $method:ident, $AssignTrait:ident, $assign:ident, $inner:ident) => {
        impl $Trait for UInt128 {
            type Output = UInt128;

            fn $method(
                self,
                rhs: UInt128,
            ) -> UInt128 {
                self.$inner(rhs)
            }
        }

        impl $AssignTrait for UInt128 {
            fn $assign(
                &mut self,
                rhs: UInt128,
            ) {
                *self = self.$inner(rhs);
            }
        }
    };
}

forward_binop!(Add, add, AddAssign, add_assign, wrapping_add);
forward_binop!(Sub, sub, SubAssign, sub_assign, wrapping_sub);
forward_binop!(Mul, mul, MulAssign, mul_assign, wrapping_mul);

impl BitAnd for UInt128 {
    type Output = UInt128;

    fn bitand(
        self,
        rhs: UInt128,
    ) -> UInt128 {
        self.bit_and(rhs)
    }
}

impl BitOr for UInt128 {
    type Output = UInt128;

    fn bitor(
        self,
        rhs: UInt128,
    ) -> UInt128 {
        self.bit_or(rhs)
    }
}

impl BitXor for UInt128 {
    type Output = UInt128;

    fn bitxor(
        self,
        rhs: UInt128,
    ) -> UInt128 {
        self.bit_xor(rhs)
    }
}

impl Not for UInt128 {
    type Output = UInt128;

    fn not(self) -> UInt128 {
        self.bit_not()
    }
}

impl Shl<u32> for UInt128 {
    type Output = UInt128;

    fn shl(
        self,
        bits: u32,
    ) -> UInt128 {
        self.shift_left(bits)
    }
}

impl Shr<u32> for UInt128 {
    type Output = UInt128;

    fn shr(
        self,
        bits: u32,
    ) -> UInt128 {
        self.shift_right(bits)
    }
}

impl ShlAssign<u32> for UInt128 {
    fn shl_assign(
        &mut self,
        bits: u32,
    ) {
        *self = self.shift_left(bits);
    }
}

impl ShrAssign<u32> for UInt128 {
    fn shr_assign(
        &mut self,
        bits: u32,
    ) {
        *self = self.shift_right(bits);
    }
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////
