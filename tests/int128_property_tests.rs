//! Property-based tests для 128-битной арифметики.
//!
//! Эталоном служат встроенные `u128`/`i128`.

use beson::{BesonError, Int128, UInt128};
use proptest::prelude::*;

use generators::*;

const PROPTEST_CASES: u32 = 2000;

fn nonzero_uint128() -> impl Strategy<Value = UInt128> {
    uint128_strategy().prop_filter("divisor must be non-zero", |v| !v.is_zero())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: PROPTEST_CASES,
        .. ProptestConfig::default()
    })]

    #[test]
    fn add_is_commutative(a in uint128_strategy(), b in uint128_strategy()) {
        prop_assert_eq!(a.wrapping_add(b), b.wrapping_add(a));
        prop_assert_eq!(u128::from(a + b), u128::from(a).wrapping_add(u128::from(b)));
    }

    #[test]
    fn sub_self_is_zero(a in uint128_strategy()) {
        prop_assert_eq!(a.wrapping_sub(a), UInt128::ZERO);
    }

    #[test]
    fn sub_matches_u128(a in uint128_strategy(), b in uint128_strategy()) {
        prop_assert_eq!(u128::from(a - b), u128::from(a).wrapping_sub(u128::from(b)));
    }

    #[test]
    fn twos_complement_is_involution(a in uint128_strategy()) {
        prop_assert_eq!(a.twos_complement().twos_complement(), a);
    }

    #[test]
    fn mul_by_zero(a in uint128_strategy()) {
        prop_assert_eq!(a.wrapping_mul(UInt128::ZERO), UInt128::ZERO);
        prop_assert_eq!(UInt128::ZERO.wrapping_mul(a), UInt128::ZERO);
    }

    #[test]
    fn mul_matches_u128(a in uint128_strategy(), b in uint128_strategy()) {
        prop_assert_eq!(u128::from(a * b), u128::from(a).wrapping_mul(u128::from(b)));
    }

    /// a == q * b + r и r < b
    #[test]
    fn division_identity(a in uint128_strategy(), b in nonzero_uint128()) {
        let (q, r) = a.div_rem(b).unwrap();
        prop_assert_eq!(q.wrapping_mul(b).wrapping_add(r), a);
        prop_assert!(r < b);
        prop_assert_eq!(u128::from(q), u128::from(a) / u128::from(b));
        prop_assert_eq!(u128::from(r), u128::from(a) % u128::from(b));
    }

    #[test]
    fn division_by_zero_fails(a in uint128_strategy()) {
        prop_assert_eq!(a.div_rem(UInt128::ZERO), Err(BesonError::DivisionByZero));
    }

    #[test]
    fn shift_by_128_or_more_is_zero(a in uint128_strategy(), extra in 0u32..=200) {
        prop_assert_eq!(a.shift_left(128 + extra), UInt128::ZERO);
        prop_assert_eq!(a.shift_right(128 + extra), UInt128::ZERO);
    }

    #[test]
    fn shifts_match_u128(a in uint128_strategy(), n in 0u32..128) {
        prop_assert_eq!(u128::from(a << n), u128::from(a) << n);
        prop_assert_eq!(u128::from(a >> n), u128::from(a) >> n);
    }

    #[test]
    fn compare_matches_u128(a in uint128_strategy(), b in uint128_strategy()) {
        prop_assert_eq!(a.cmp(&b), u128::from(a).cmp(&u128::from(b)));
    }

    #[test]
    fn bit_length_matches_u128(a in uint128_strategy()) {
        prop_assert_eq!(a.bit_length(), 128 - u128::from(a).leading_zeros());
    }

    #[test]
    fn decimal_string_roundtrip(a in uint128_strategy()) {
        let text = a.to_decimal_string();
        prop_assert_eq!(&text, &u128::from(a).to_string());
        prop_assert_eq!(UInt128::from_decimal_str(&text).unwrap(), a);
    }

    #[test]
    fn hex_and_binary_match_u128(a in uint128_strategy()) {
        let raw = u128::from(a);
        prop_assert_eq!(a.to_hex_string(), format!("{raw:x}"));
        prop_assert_eq!(a.to_binary_string(), format!("{raw:b}"));
    }

    #[test]
    fn signed_decimal_roundtrip(a in int128_strategy()) {
        let text = a.to_decimal_string();
        prop_assert_eq!(&text, &i128::from(a).to_string());
        prop_assert_eq!(Int128::from_decimal_str(&text).unwrap(), a);
    }

    #[test]
    fn signed_arithmetic_matches_i128(a in int128_strategy(), b in int128_strategy()) {
        let (x, y) = (i128::from(a), i128::from(b));
        prop_assert_eq!(i128::from(a + b), x.wrapping_add(y));
        prop_assert_eq!(i128::from(a - b), x.wrapping_sub(y));
        prop_assert_eq!(i128::from(a * b), x.wrapping_mul(y));
        prop_assert_eq!(a.cmp(&b), x.cmp(&y));
    }

    #[test]
    fn signed_division_matches_i128(a in int128_strategy(), b in int128_strategy()) {
        prop_assume!(b != Int128::ZERO);
        let (q, r) = a.checked_div_rem(b).unwrap();
        let (x, y) = (i128::from(a), i128::from(b));
        prop_assert_eq!(i128::from(q), x.wrapping_div(y));
        prop_assert_eq!(i128::from(r), x.wrapping_rem(y));
    }

    #[test]
    fn le_bytes_layout(a in uint128_strategy()) {
        let bytes = a.to_le_bytes();
        prop_assert_eq!(bytes, u128::from(a).to_le_bytes());
        prop_assert_eq!(UInt128::from_le_bytes(bytes), a);
    }
}
