//! Бинарный кодек BESON.
//!
//! Каждое значение на проводе имеет вид `[2-байтовый заголовок][нагрузка]`.
//! Заголовки берутся из [`TypeRegistry`], поэтому сам кодек не привязан к
//! конкретной таблице.
//!
//! Функции верхнего уровня ([`encode`], [`decode`], [`decode_exact`])
//! используют стандартный реестр и [`CodecConfig::default`]. Для других
//! лимитов или таблицы создайте [`Encoder`] и [`Decoder`] напрямую.

pub mod decode;
pub mod encode;
pub mod reader;
pub mod registry;

pub use decode::Decoder;
pub use encode::Encoder;
pub use reader::ByteReader;
pub use registry::{
    Header, StandardRegistry, TableRegistry, TypeRegistry, STANDARD, STANDARD_HEADERS,
};

use beson_error::BesonResult;

use crate::{CodecConfig, Value};

/// Кодирует значение стандартным кодировщиком.
pub fn encode(value: &Value) -> BesonResult<Vec<u8>> {
    Encoder::default().encode(value)
}

/// Дописывает кодировку значения в `buf`; при ошибке `buf` не меняется.
pub fn encode_into(
    buf: &mut Vec<u8>,
    value: &Value,
) -> BesonResult<()> {
    Encoder::default().encode_into(buf, value)
}

/// Декодирует одно значение с позиции `offset` и возвращает смещение за ним.
pub fn decode(
    buf: &[u8],
    offset: usize,
) -> BesonResult<(usize, Value)> {
    Decoder::default().decode(buf, offset)
}

/// Декодирует значение, занимающее весь буфер.
pub fn decode_exact(buf: &[u8]) -> BesonResult<Value> {
    Decoder::default().decode_exact(buf)
}

/// Пара кодировщик/декодировщик с общими реестром и лимитами.
#[derive(Debug, Clone, Copy)]
pub struct Codec<'r> {
    pub encoder: Encoder<'r>,
    pub decoder: Decoder<'r>,
}

impl<'r> Codec<'r> {
    pub fn new(
        registry: &'r dyn TypeRegistry,
        config: CodecConfig,
    ) -> Self {
        Self {
            encoder: Encoder::new(registry, config),
            decoder: Decoder::new(registry, config),
        }
    }

    pub fn encode(
        &self,
        value: &Value,
    ) -> BesonResult<Vec<u8>> {
        self.encoder.encode(value)
    }

    pub fn decode(
        &self,
        buf: &[u8],
        offset: usize,
    ) -> BesonResult<(usize, Value)> {
        self.decoder.decode(buf, offset)
    }

    pub fn decode_exact(
        &self,
        buf: &[u8],
    ) -> BesonResult<Value> {
        self.decoder.decode_exact(buf)
    }
}

impl Default for Codec<'static> {
    fn default() -> Self {
        Self::new(&STANDARD, CodecConfig::default())
    }
}
