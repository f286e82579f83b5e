//! Декодирование [`Value`] из байтового буфера.
//!
//! Формат зеркален [`super::encode`]: заголовок, затем полезная нагрузка
//! той же ширины и порядка байт. Все чтения проверяются по границам буфера,
//! а составные значения обязаны занять ровно объявленное число байт.

use beson_error::{BesonError, BesonResult};
use tracing::{debug, error, trace};

use super::{
    reader::ByteReader,
    registry::{TypeRegistry, STANDARD},
};
use crate::{CodecConfig, Int128, Map, TypeTag, UInt128, Value};

/// Декодировщик значений поверх реестра заголовков.
#[derive(Clone, Copy)]
pub struct Decoder<'r> {
    registry: &'r dyn TypeRegistry,
    config: CodecConfig,
}

impl<'r> Decoder<'r> {
    pub fn new(
        registry: &'r dyn TypeRegistry,
        config: CodecConfig,
    ) -> Self {
        Self { registry, config }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Декодирует одно значение, начиная с `offset`.
    ///
    /// Возвращает смещение сразу за значением и само значение. При ошибке
    /// частично построенное дерево отбрасывается.
    pub fn decode(
        &self,
        buf: &[u8],
        offset: usize,
    ) -> BesonResult<(usize, Value)> {
        let mut reader = ByteReader::new(buf, offset);
        match self.read_value(&mut reader, 0) {
            Ok(value) => Ok((reader.position(), value)),
            Err(e) => {
                debug!(offset, error = %e, "decode failed");
                Err(e)
            }
        }
    }

    /// Декодирует значение, которое обязано занимать весь буфер.
    ///
    /// # Errors
    ///
    /// Помимо ошибок [`Decoder::decode`], [`BesonError::LengthMismatch`],
    /// если после значения остались байты.
    pub fn decode_exact(
        &self,
        buf: &[u8],
    ) -> BesonResult<Value> {
        let (end, value) = self.decode(buf, 0)?;
        if end != buf.len() {
            error!(consumed = end, len = buf.len(), "trailing bytes after value");
            return Err(BesonError::LengthMismatch {
                what: "buffer",
                declared: buf.len(),
                consumed: end,
                offset: 0,
            });
        }
        Ok(value)
    }

    fn read_tag(
        &self,
        r: &mut ByteReader<'_>,
    ) -> BesonResult<TypeTag> {
        let offset = r.position();
        let header = r.read_header()?;
        self.registry.tag_for(header).ok_or_else(|| {
            error!(?header, offset, "unknown type header");
            BesonError::UnknownTypeHeader { header, offset }
        })
    }

    fn read_value(
        &self,
        r: &mut ByteReader<'_>,
        depth: usize,
    ) -> BesonResult<Value> {
        let tag = self.read_tag(r)?;
        self.read_payload(r, tag, depth)
    }

    fn read_payload(
        &self,
        r: &mut ByteReader<'_>,
        tag: TypeTag,
        depth: usize,
    ) -> BesonResult<Value> {
        let value = match tag {
            TypeTag::Null => Value::Null,
            TypeTag::False => Value::Bool(false),
            TypeTag::True => Value::Bool(true),
            TypeTag::Int8 => Value::Int8(r.read_u8()? as i8),
            TypeTag::Int16 => Value::Int16(r.read_u16()? as i16),
            TypeTag::Int32 => Value::Int32(r.read_u32()? as i32),
            TypeTag::Int64 => Value::Int64(r.read_u64()? as i64),
            TypeTag::Int128 => Value::Int128(Int128::from_le_bytes(r.read_array()?)),
            TypeTag::UInt8 => Value::UInt8(r.read_u8()?),
            TypeTag::UInt16 => Value::UInt16(r.read_u16()?),
            TypeTag::UInt32 => Value::UInt32(r.read_u32()?),
            TypeTag::UInt64 => Value::UInt64(r.read_u64()?),
            TypeTag::UInt128 => Value::UInt128(UInt128::from_le_bytes(r.read_array()?)),
            TypeTag::Float32 => Value::Float32(f32::from_bits(r.read_u32()?)),
            TypeTag::Float64 => Value::Float64(f64::from_bits(r.read_u64()?)),
            TypeTag::String => {
                let len = r.read_u32()? as usize;
                let offset = r.position();
                let text = read_utf8(r, len, offset)?;
                Value::String(text.to_owned())
            }
            TypeTag::Binary => {
                let len = r.read_u32()? as usize;
                Value::Binary(r.take(len)?.to_vec())
            }
            TypeTag::Array => self.read_array(r, depth)?,
            TypeTag::Map => self.read_map(r, depth)?,
        };
        Ok(value)
    }

    fn read_array(
        &self,
        r: &mut ByteReader<'_>,
        depth: usize,
    ) -> BesonResult<Value> {
        let depth = self.enter(depth, r.position())?;
        let declared = r.read_u32()? as usize;
        let start = r.position();
        let end = start.saturating_add(declared);

        let mut items = Vec::new();
        while r.position() < end {
            items.push(self.read_value(r, depth)?);
        }
        check_consumed("array", r, start, declared)?;

        trace!(items = items.len(), depth, "decoded array");
        Ok(Value::Array(items))
    }

    fn read_map(
        &self,
        r: &mut ByteReader<'_>,
        depth: usize,
    ) -> BesonResult<Value> {
        let depth = self.enter(depth, r.position())?;
        let declared = r.read_u32()? as usize;
        let start = r.position();
        let end = start.saturating_add(declared);

        let mut map = Map::new();
        while r.position() < end {
            let entry_offset = r.position();
            let tag = self.read_tag(r)?;
            let key_len = r.read_u16()? as usize;
            let key_offset = r.position();
            let key = read_utf8(r, key_len, key_offset)?.to_owned();
            if map.contains_key(&key) {
                error!(key = %key, offset = entry_offset, "duplicate map key");
                return Err(BesonError::DuplicateMapKey {
                    key,
                    offset: entry_offset,
                });
            }
            let value = self.read_payload(r, tag, depth)?;
            map.insert(key, value);
        }
        check_consumed("map", r, start, declared)?;

        trace!(entries = map.len(), depth, "decoded map");
        Ok(Value::Map(map))
    }

    fn enter(
        &self,
        depth: usize,
        offset: usize,
    ) -> BesonResult<usize> {
        let next = depth + 1;
        let limit = self.config.effective_max_depth();
        if next > limit {
            error!(depth = next, limit, offset, "decode depth limit exceeded");
            return Err(BesonError::DepthLimitExceeded { depth: next, limit });
        }
        Ok(next)
    }
}

impl Default for Decoder<'static> {
    fn default() -> Self {
        Self::new(&STANDARD, CodecConfig::default())
    }
}

impl std::fmt::Debug for Decoder<'_> {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("Decoder")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn read_utf8<'a>(
    r: &mut ByteReader<'a>,
    len: usize,
    offset: usize,
) -> BesonResult<&'a str> {
    let bytes = r.take(len)?;
    std::str::from_utf8(bytes).map_err(|source| {
        error!(offset, valid_up_to = source.valid_up_to(), "invalid utf-8");
        BesonError::Utf8Decode { offset, source }
    })
}

/// Составное значение должно занять ровно объявленное число байт.
fn check_consumed(
    what: &'static str,
    r: &ByteReader<'_>,
    start: usize,
    declared: usize,
) -> BesonResult<()> {
    let consumed = r.position() - start;
    if consumed != declared {
        error!(what, declared, consumed, offset = start, "length mismatch");
        return Err(BesonError::LengthMismatch {
            what,
            declared,
            consumed,
            offset: start,
        });
    }
    Ok(())
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        codec::{encode::Encoder, registry::TableRegistry},
        config::MAX_DEPTH_CEILING,
    };

    fn dec(buf: &[u8]) -> BesonResult<Value> {
        Decoder::default().decode_exact(buf)
    }

    #[test]
    fn test_scalars() {
        assert_eq!(dec(&[0x00, 0x00]).unwrap(), Value::Null);
        assert_eq!(dec(&[0x01, 0x01]).unwrap(), Value::Bool(true));
        assert_eq!(dec(&[0x02, 0x00, 0xFF]).unwrap(), Value::Int8(-1));
        assert_eq!(
            dec(&[0x03, 0x03, 42, 0, 0, 0, 0, 0, 0, 0]).unwrap(),
            Value::UInt64(42)
        );
    }

    #[test]
    fn test_returns_next_offset() {
        let buf = [0xEE, 0x03, 0x00, 5, 0x00, 0x00];
        let decoder = Decoder::default();
        let (next, v) = decoder.decode(&buf, 1).unwrap();
        assert_eq!((next, v), (4, Value::UInt8(5)));
        let (next, v) = decoder.decode(&buf, next).unwrap();
        assert_eq!((next, v), (6, Value::Null));
    }

    #[test]
    fn test_truncated_uint32() {
        let err = dec(&[0x03, 0x02, 0x01, 0x02]).unwrap_err();
        assert_eq!(
            err,
            BesonError::BufferTruncated {
                offset: 2,
                needed: 4,
                available: 2,
            }
        );
    }

    #[test]
    fn test_truncated_header() {
        assert!(matches!(
            dec(&[0x03]),
            Err(BesonError::BufferTruncated { offset: 0, .. })
        ));
        assert!(matches!(
            dec(&[]),
            Err(BesonError::BufferTruncated { offset: 0, .. })
        ));
    }

    #[test]
    fn test_unknown_header() {
        assert_eq!(
            dec(&[0xFF, 0xFF]),
            Err(BesonError::UnknownTypeHeader {
                header: [0xFF, 0xFF],
                offset: 0,
            })
        );
    }

    #[test]
    fn test_string_length_past_end() {
        let err = dec(&[0x05, 0x00, 10, 0, 0, 0, b'a']).unwrap_err();
        assert!(matches!(err, BesonError::BufferTruncated { offset: 6, needed: 10, .. }));
    }

    #[test]
    fn test_invalid_utf8_is_rejected() {
        let err = dec(&[0x05, 0x00, 2, 0, 0, 0, 0xC3, 0x28]).unwrap_err();
        assert!(matches!(err, BesonError::Utf8Decode { offset: 6, .. }));
    }

    #[test]
    fn test_array_declared_too_short() {
        // Элемент UINT32 занимает 6 байт, объявлено 4.
        let buf = [0x06, 0x00, 4, 0, 0, 0, 0x03, 0x02, 1, 0, 0, 0];
        assert_eq!(
            dec(&buf),
            Err(BesonError::LengthMismatch {
                what: "array",
                declared: 4,
                consumed: 6,
                offset: 6,
            })
        );
    }

    #[test]
    fn test_array_declared_too_long() {
        // Объявлено 5 байт, но в буфере только один NULL.
        let buf = [0x06, 0x00, 5, 0, 0, 0, 0x00, 0x00];
        assert!(matches!(dec(&buf), Err(BesonError::BufferTruncated { .. })));
    }

    #[test]
    fn test_trailing_bytes() {
        assert_eq!(
            dec(&[0x00, 0x00, 0x00]),
            Err(BesonError::LengthMismatch {
                what: "buffer",
                declared: 3,
                consumed: 2,
                offset: 0,
            })
        );
    }

    #[test]
    fn test_map_entry() {
        let buf = [0x07, 0x00, 6, 0, 0, 0, 0x03, 0x00, 1, 0, b'k', 9];
        let v = dec(&buf).unwrap();
        assert_eq!(v.as_map().and_then(|m| m.get("k")), Some(&Value::UInt8(9)));
    }

    #[test]
    fn test_duplicate_map_key() {
        let buf = [
            0x07, 0x00, 10, 0, 0, 0, //
            0x00, 0x00, 1, 0, b'k', //
            0x00, 0x00, 1, 0, b'k',
        ];
        assert_eq!(
            dec(&buf),
            Err(BesonError::DuplicateMapKey {
                key: "k".to_string(),
                offset: 11,
            })
        );
    }

    #[test]
    fn test_depth_limit() {
        let nested = Value::Array(vec![Value::Array(vec![Value::Array(vec![])])]);
        let bytes = Encoder::default().encode(&nested).unwrap();

        let shallow = Decoder::new(&STANDARD, CodecConfig::default().with_max_depth(2));
        assert_eq!(
            shallow.decode_exact(&bytes),
            Err(BesonError::DepthLimitExceeded { depth: 3, limit: 2 })
        );
        assert_eq!(Decoder::default().decode_exact(&bytes).unwrap(), nested);
    }

    #[test]
    fn test_adversarial_nesting_does_not_overflow_stack() {
        // Миллион вложенных заголовков массива без тел.
        let mut buf = Vec::new();
        for _ in 0..1_000_000 {
            buf.extend_from_slice(&[0x06, 0x00, 0xFF, 0xFF, 0xFF, 0x7F]);
        }
        assert!(matches!(
            dec(&buf),
            Err(BesonError::DepthLimitExceeded { .. })
        ));
    }

    #[test]
    fn test_unbounded_config_still_stops_at_ceiling() {
        let mut buf = Vec::new();
        for _ in 0..1_000_000 {
            buf.extend_from_slice(&[0x06, 0x00, 0xFF, 0xFF, 0xFF, 0x7F]);
        }
        let decoder = Decoder::new(&STANDARD, CodecConfig::default().with_max_depth(usize::MAX));
        assert_eq!(
            decoder.decode(&buf, 0),
            Err(BesonError::DepthLimitExceeded {
                depth: MAX_DEPTH_CEILING + 1,
                limit: MAX_DEPTH_CEILING,
            })
        );
    }

    #[test]
    fn test_custom_registry() {
        let entries = crate::codec::registry::STANDARD_HEADERS.map(|(tag, header)| {
            if tag == TypeTag::Null {
                (tag, [0x0F, 0x0F])
            } else {
                (tag, header)
            }
        });
        let reg = TableRegistry::from_entries(entries).unwrap();
        let decoder = Decoder::new(&reg, CodecConfig::default());
        assert_eq!(decoder.decode_exact(&[0x0F, 0x0F]).unwrap(), Value::Null);
        assert!(decoder.decode_exact(&[0x00, 0x00]).is_err());
    }
}
