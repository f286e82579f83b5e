//! Операции над десятичными строками цифр.
//!
//! Используются при разборе литералов: значение строится побитно, младший
//! бит берётся из чётности последней цифры, после чего строка делится
//! пополам.

use beson_error::{BesonError, BesonResult};

/// Наибольшая степень десяти, помещающаяся в `u64`.
pub const CHUNK_DIVISOR: u64 = 10_000_000_000_000_000_000;
/// Количество десятичных цифр в одном блоке `CHUNK_DIVISOR`.
pub const CHUNK_DIGITS: usize = 19;

/// Проверяет строку и возвращает её цифры (значения 0..=9) без ведущих
/// нулей. Для нуля возвращает пустой вектор.
pub fn parse_digits(
    input: &str,
    digits: &str,
) -> BesonResult<Vec<u8>> {
    if digits.is_empty() {
        return Err(invalid(input, "no digits"));
    }
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid(input, "non-digit character"));
    }

    Ok(digits
        .bytes()
        .map(|b| b - b'0')
        .skip_while(|&d| d == 0)
        .collect())
}

/// Делит десятичное число (по цифрам, старшая первой) на два.
///
/// Результат не содержит ведущих нулей; ноль представлен пустым вектором.
pub fn divide_by_two(digits: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(digits.len());
    let mut carry = 0;

    for &d in digits {
        out.push(d / 2 + carry);
        carry = if d % 2 == 1 { 5 } else { 0 };
    }

    let leading = out.iter().take_while(|&&d| d == 0).count();
    out.drain(..leading);
    out
}

/// Чётность числа, заданного цифрами.
pub fn is_odd(digits: &[u8]) -> bool {
    digits.last().is_some_and(|d| d % 2 == 1)
}

/// Дополняет строку нулями слева до ширины `width`.
pub fn pad_zeros(
    s: &str,
    width: usize,
) -> String {
    format!("{s:0>width$}")
}

pub(crate) fn invalid(
    input: &str,
    reason: &'static str,
) -> BesonError {
    BesonError::InvalidDecimalString {
        input: input.to_string(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_divide_by_two() {
        assert_eq!(divide_by_two(&[1, 0]), vec![5]);
        assert_eq!(divide_by_two(&[1, 5]), vec![7]);
        assert_eq!(divide_by_two(&[1]), Vec::<u8>::new());
        assert_eq!(divide_by_two(&[1, 0, 0, 1]), vec![5, 0, 0]);
    }

    #[test]
    fn test_parse_digits_strips_leading_zeros() {
        assert_eq!(parse_digits("0042", "0042").unwrap(), vec![4, 2]);
        assert!(parse_digits("000", "000").unwrap().is_empty());
    }

    #[test]
    fn test_parse_digits_rejects_garbage() {
        assert!(matches!(
            parse_digits("", ""),
            Err(BesonError::InvalidDecimalString { .. })
        ));
        assert!(matches!(
            parse_digits("12a", "12a"),
            Err(BesonError::InvalidDecimalString { .. })
        ));
    }

    #[test]
    fn test_pad_zeros() {
        assert_eq!(pad_zeros("7", 3), "007");
        assert_eq!(pad_zeros("1234", 3), "1234");
    }

    #[test]
    fn test_chunk_constants() {
        assert_eq!(CHUNK_DIVISOR.to_string().len(), CHUNK_DIGITS + 1);
        assert!(CHUNK_DIVISOR.checked_mul(10).is_none());
    }
}
