#![no_main]

use arbitrary::{Arbitrary, Unstructured};
use beson::{decode_exact, encode, Int128, Map, UInt128, Value};
use libfuzzer_sys::fuzz_target;

/// Произвольное Value из `Unstructured` с ограничением глубины.
fn arb_value(
    u: &mut Unstructured<'_>,
    depth: usize,
) -> arbitrary::Result<Value> {
    let max_choice = if depth == 0 { 15 } else { 17 };
    let value = match u.int_in_range::<u8>(0..=max_choice)? {
        0 => Value::Null,
        1 => Value::Bool(u.arbitrary()?),
        2 => Value::Int8(u.arbitrary()?),
        3 => Value::Int16(u.arbitrary()?),
        4 => Value::Int32(u.arbitrary()?),
        5 => Value::Int64(u.arbitrary()?),
        6 => Value::Int128(Int128::from(u.arbitrary::<i128>()?)),
        7 => Value::UInt8(u.arbitrary()?),
        8 => Value::UInt16(u.arbitrary()?),
        9 => Value::UInt32(u.arbitrary()?),
        10 => Value::UInt64(u.arbitrary()?),
        11 => Value::UInt128(UInt128::from(u.arbitrary::<u128>()?)),
        12 => Value::Float32(u.arbitrary()?),
        13 => Value::Float64(u.arbitrary()?),
        14 => Value::String(u.arbitrary()?),
        15 => Value::Binary(u.arbitrary()?),
        16 => {
            let len = u.int_in_range::<u8>(0..=6)? as usize;
            let mut items = Vec::with_capacity(len);
            for _ in 0..len {
                items.push(arb_value(u, depth - 1)?);
            }
            Value::Array(items)
        }
        _ => {
            let len = u.int_in_range::<u8>(0..=6)? as usize;
            let mut map = Map::new();
            for _ in 0..len {
                let key: String = u.arbitrary()?;
                let item = arb_value(u, depth - 1)?;
                map.entry(key).or_insert(item);
            }
            Value::Map(map)
        }
    };
    Ok(value)
}

fuzz_target!(|data: &[u8]| {
    let mut u = Unstructured::new(data);

    // если построить value не получилось, пропускаем вход
    if let Ok(value) = arb_value(&mut u, 4) {
        let bytes = encode(&value).expect("well-formed value must encode");
        let decoded = decode_exact(&bytes).expect("encoded bytes must decode");

        // NaN != NaN, поэтому сравниваем через повторное кодирование.
        assert_eq!(encode(&decoded).expect("re-encode"), bytes);
    }
});
