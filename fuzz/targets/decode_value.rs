#![no_main]

use arbitrary::Arbitrary;
use beson::{decode, encode, CodecConfig, Decoder, StandardRegistry};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    data: Vec<u8>,
    offset: u8,
    max_depth: u8,
}

fuzz_target!(|input: FuzzInput| {
    let offset = usize::from(input.offset);

    // Декодер не должен паниковать ни на каких данных.
    let _ = decode(&input.data, offset);

    // Не глубже лимита кодировщика по умолчанию.
    let cfg = CodecConfig::default().with_max_depth(usize::from(input.max_depth % 64) + 1);
    let decoder = Decoder::new(&StandardRegistry, cfg);

    // Всё, что удалось декодировать, кодируется обратно в те же байты.
    if let Ok((end, value)) = decoder.decode(&input.data, offset) {
        let bytes = encode(&value).expect("decoded value must encode");
        assert_eq!(&bytes[..], &input.data[offset..end]);
    }
});
