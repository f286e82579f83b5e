//! Кодирование дерева [`Value`] в байтовый буфер.
//!
//! Каждое значение записывается как `[2-байтовый заголовок][полезная нагрузка]`.
//! Числа фиксированной ширины пишутся в little-endian, строки и бинарные
//! данные получают 4-байтовый префикс длины, элементы массивов и записи
//! словарей кодируются рекурсивно.

use beson_error::{BesonError, BesonResult};
use byteorder::{ByteOrder, LittleEndian};
use bytes::BufMut;
use tracing::{trace, warn};

use super::registry::{TypeRegistry, STANDARD};
use crate::{config::MAX_SHORT_STRING_LEN, CodecConfig, Value};

const LEN_PREFIX: usize = 4;

/// Кодировщик значений поверх реестра заголовков.
///
/// Не хранит состояния между вызовами; один экземпляр можно использовать
/// из нескольких потоков.
#[derive(Clone, Copy)]
pub struct Encoder<'r> {
    registry: &'r dyn TypeRegistry,
    config: CodecConfig,
}

impl<'r> Encoder<'r> {
    pub fn new(
        registry: &'r dyn TypeRegistry,
        config: CodecConfig,
    ) -> Self {
        Self { registry, config }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Кодирует значение в новый буфер.
    ///
    /// # Errors
    ///
    /// [`BesonError::KeyTooLong`] для слишком длинного ключа словаря,
    /// [`BesonError::DepthLimitExceeded`] для слишком глубокого дерева,
    /// [`BesonError::PayloadTooLarge`], если длина не помещается в 4 байта.
    pub fn encode(
        &self,
        value: &Value,
    ) -> BesonResult<Vec<u8>> {
        let mut buf = Vec::new();
        self.encode_into(&mut buf, value)?;
        Ok(buf)
    }

    /// Дописывает кодировку значения в конец `buf`.
    ///
    /// При ошибке буфер возвращается к исходной длине.
    pub fn encode_into(
        &self,
        buf: &mut Vec<u8>,
        value: &Value,
    ) -> BesonResult<()> {
        let start = buf.len();
        let result = self.write_value(buf, value, 0);
        if result.is_err() {
            buf.truncate(start);
        }
        result
    }

    fn write_value(
        &self,
        buf: &mut Vec<u8>,
        value: &Value,
        depth: usize,
    ) -> BesonResult<()> {
        buf.put_slice(&self.registry.header_for(value.tag()));
        self.write_payload(buf, value, depth)
    }

    fn write_payload(
        &self,
        buf: &mut Vec<u8>,
        value: &Value,
        depth: usize,
    ) -> BesonResult<()> {
        match value {
            Value::Null | Value::Bool(_) => {}
            Value::Int8(v) => buf.put_i8(*v),
            Value::Int16(v) => buf.put_i16_le(*v),
            Value::Int32(v) => buf.put_i32_le(*v),
            Value::Int64(v) => buf.put_i64_le(*v),
            Value::Int128(v) => buf.put_slice(&v.to_le_bytes()),
            Value::UInt8(v) => buf.put_u8(*v),
            Value::UInt16(v) => buf.put_u16_le(*v),
            Value::UInt32(v) => buf.put_u32_le(*v),
            Value::UInt64(v) => buf.put_u64_le(*v),
            Value::UInt128(v) => buf.put_slice(&v.to_le_bytes()),
            Value::Float32(v) => buf.put_f32_le(*v),
            Value::Float64(v) => buf.put_f64_le(*v),
            Value::String(s) => write_long_bytes(buf, "string", s.as_bytes())?,
            Value::Binary(b) => write_long_bytes(buf, "binary", b)?,
            Value::Array(items) => {
                let depth = self.enter(depth)?;
                let len_pos = begin_length(buf);
                for item in items {
                    self.write_value(buf, item, depth)?;
                }
                finish_length(buf, len_pos, "array")?;
                trace!(items = items.len(), depth, "encoded array");
            }
            Value::Map(map) => {
                let depth = self.enter(depth)?;
                let len_pos = begin_length(buf);
                for (key, item) in map {
                    buf.put_slice(&self.registry.header_for(item.tag()));
                    self.write_key(buf, key)?;
                    self.write_payload(buf, item, depth)?;
                }
                finish_length(buf, len_pos, "map")?;
                trace!(entries = map.len(), depth, "encoded map");
            }
        }
        Ok(())
    }

    /// Ключ словаря: короткая строка с 2-байтовым префиксом длины.
    fn write_key(
        &self,
        buf: &mut Vec<u8>,
        key: &str,
    ) -> BesonResult<()> {
        let limit = self.config.max_key_len.min(MAX_SHORT_STRING_LEN);
        let len = key.len();
        if len > limit {
            warn!(len, limit, "map key too long");
            return Err(BesonError::KeyTooLong { len, limit });
        }
        // limit <= u16::MAX
        buf.put_u16_le(len as u16);
        buf.put_slice(key.as_bytes());
        Ok(())
    }

    fn enter(
        &self,
        depth: usize,
    ) -> BesonResult<usize> {
        let next = depth + 1;
        let limit = self.config.effective_max_depth();
        if next > limit {
            warn!(depth = next, limit, "encode depth limit exceeded");
            return Err(BesonError::DepthLimitExceeded { depth: next, limit });
        }
        Ok(next)
    }
}

impl Default for Encoder<'static> {
    fn default() -> Self {
        Self::new(&STANDARD, CodecConfig::default())
    }
}

impl std::fmt::Debug for Encoder<'_> {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("Encoder")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn write_long_bytes(
    buf: &mut Vec<u8>,
    what: &'static str,
    bytes: &[u8],
) -> BesonResult<()> {
    let len = u32::try_from(bytes.len())
        .map_err(|_| BesonError::PayloadTooLarge { what, len: bytes.len() })?;
    buf.put_u32_le(len);
    buf.put_slice(bytes);
    Ok(())
}

/// Резервирует место под 4-байтовую длину и возвращает его позицию.
fn begin_length(buf: &mut Vec<u8>) -> usize {
    let pos = buf.len();
    buf.put_u32_le(0);
    pos
}

/// Записывает в зарезервированное место число байт после префикса.
fn finish_length(
    buf: &mut [u8],
    len_pos: usize,
    what: &'static str,
) -> BesonResult<()> {
    let body = buf.len() - len_pos - LEN_PREFIX;
    let len = u32::try_from(body).map_err(|_| BesonError::PayloadTooLarge { what, len: body })?;
    LittleEndian::write_u32(&mut buf[len_pos..len_pos + LEN_PREFIX], len);
    Ok(())
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////
