#![no_main]

use arbitrary::Arbitrary;
use beson::{Int128, UInt128};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Operands {
    a: u128,
    b: u128,
    shift: u32,
}

fuzz_target!(|ops: Operands| {
    let (a, b) = (UInt128::from(ops.a), UInt128::from(ops.b));

    assert_eq!(u128::from(a + b), ops.a.wrapping_add(ops.b));
    assert_eq!(u128::from(a - b), ops.a.wrapping_sub(ops.b));
    assert_eq!(u128::from(a * b), ops.a.wrapping_mul(ops.b));
    assert_eq!(
        u128::from(a.shift_left(ops.shift)),
        ops.a.checked_shl(ops.shift).unwrap_or(0)
    );
    assert_eq!(
        u128::from(a.shift_right(ops.shift)),
        ops.a.checked_shr(ops.shift).unwrap_or(0)
    );

    match a.div_rem(b) {
        Ok((q, r)) => {
            assert_eq!(u128::from(q), ops.a / ops.b);
            assert_eq!(u128::from(r), ops.a % ops.b);
        }
        Err(_) => assert_eq!(ops.b, 0),
    }

    let text = a.to_decimal_string();
    assert_eq!(UInt128::from_decimal_str(&text).ok(), Some(a));

    let (sa, sb) = (ops.a as i128, ops.b as i128);
    if sb != 0 {
        let (q, r) = Int128::from(sa)
            .checked_div_rem(Int128::from(sb))
            .expect("non-zero divisor");
        assert_eq!(i128::from(q), sa.wrapping_div(sb));
        assert_eq!(i128::from(r), sa.wrapping_rem(sb));
    }
});
