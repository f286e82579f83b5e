//! Курсор чтения по байтовому срезу с проверкой границ.

use beson_error::{BesonError, BesonResult};
use byteorder::{ByteOrder, LittleEndian};

use super::registry::Header;

/// Курсор по `&[u8]`. Любое чтение за концом буфера возвращает
/// [`BesonError::BufferTruncated`] и не сдвигает позицию.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(
        buf: &'a [u8],
        pos: usize,
    ) -> Self {
        Self { buf, pos }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.pos)
    }

    /// Возвращает следующие `n` байт и сдвигает курсор.
    pub fn take(
        &mut self,
        n: usize,
    ) -> BesonResult<&'a [u8]> {
        let available = self.remaining();
        if n > available {
            return Err(BesonError::BufferTruncated {
                offset: self.pos,
                needed: n,
                available,
            });
        }
        let bytes = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    pub fn read_array<const N: usize>(&mut self) -> BesonResult<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    pub fn read_header(&mut self) -> BesonResult<Header> {
        self.read_array::<2>()
    }

    pub fn read_u8(&mut self) -> BesonResult<u8> {
        Ok(self.take(1)?[0])
    }

    pub fn read_u16(&mut self) -> BesonResult<u16> {
        Ok(LittleEndian::read_u16(self.take(2)?))
    }

    pub fn read_u32(&mut self) -> BesonResult<u32> {
        Ok(LittleEndian::read_u32(self.take(4)?))
    }

    pub fn read_u64(&mut self) -> BesonResult<u64> {
        Ok(LittleEndian::read_u64(self.take(8)?))
    }
}
