//! Fixed-layout binary encoding of primitive values.
//!
//! Layout, independent of the host platform:
//! - `i32`: 4 bytes, little-endian two's complement
//! - `f64`: 8 bytes, little-endian IEEE-754
//! - `bool`: 1 byte, `0x00` or `0x01` (any non-zero byte reads as `true`)
//! - string: UTF-8 bytes preceded by their byte length as an unsigned LEB128
//!   integer (7 bits per byte, high bit set on all but the last byte), at most
//!   5 prefix bytes and at most `i32::MAX` bytes of payload

use std::io::{self, Read, Write};

const MAX_PREFIX_BYTES: usize = 5;
const MAX_STRING_LEN: u64 = i32::MAX as u64;

/// Encodes primitives onto any byte sink.
pub struct BinaryWriter<W: Write> {
    inner: W,
}

impl<W: Write> BinaryWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn write_i32(&mut self, value: i32) -> io::Result<()> {
        self.inner.write_all(&value.to_le_bytes())
    }

    pub fn write_f64(&mut self, value: f64) -> io::Result<()> {
        self.inner.write_all(&value.to_le_bytes())
    }

    pub fn write_bool(&mut self, value: bool) -> io::Result<()> {
        self.inner.write_all(&[u8::from(value)])
    }

    pub fn write_str(&mut self, value: &str) -> io::Result<()> {
        let len = value.len() as u64;
        if len > MAX_STRING_LEN {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("string of {len} bytes exceeds the encodable length"),
            ));
        }
        self.write_length(len as u32)?;
        self.inner.write_all(value.as_bytes())
    }

    fn write_length(&mut self, mut len: u32) -> io::Result<()> {
        let mut prefix = [0u8; MAX_PREFIX_BYTES];
        let mut used = 0;
        loop {
            let low = (len & 0x7F) as u8;
            len >>= 7;
            if len == 0 {
                prefix[used] = low;
                used += 1;
                break;
            }
            prefix[used] = low | 0x80;
            used += 1;
        }
        self.inner.write_all(&prefix[..used])
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

/// Decodes primitives written by [`BinaryWriter`].
pub struct BinaryReader<R: Read> {
    inner: R,
}

impl<R: Read> BinaryReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    pub fn read_i32(&mut self) -> io::Result<i32> {
        let mut buf = [0u8; 4];
        self.inner.read_exact(&mut buf)?;
        Ok(i32::from_le_bytes(buf))
    }

    pub fn read_f64(&mut self) -> io::Result<f64> {
        let mut buf = [0u8; 8];
        self.inner.read_exact(&mut buf)?;
        Ok(f64::from_le_bytes(buf))
    }

    pub fn read_bool(&mut self) -> io::Result<bool> {
        let mut buf = [0u8; 1];
        self.inner.read_exact(&mut buf)?;
        Ok(buf[0] != 0)
    }

    pub fn read_string(&mut self) -> io::Result<String> {
        let len = self.read_length()?;
        if u64::from(len) > MAX_STRING_LEN {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("string length {len} out of range"),
            ));
        }
        // Sized by the bytes present, not by the prefix.
        let mut bytes = Vec::new();
        let read = self.inner.by_ref().take(u64::from(len)).read_to_end(&mut bytes)?;
        if read != len as usize {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("string declared {len} bytes, found {read}"),
            ));
        }
        String::from_utf8(bytes)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
    }

    fn read_length(&mut self) -> io::Result<u32> {
        let mut value: u32 = 0;
        for index in 0..MAX_PREFIX_BYTES {
            let mut byte = [0u8; 1];
            self.inner.read_exact(&mut byte)?;
            let bits = u32::from(byte[0] & 0x7F);
            // The fifth byte may only carry the top 4 bits of a u32.
            if index == MAX_PREFIX_BYTES - 1 && bits > 0x0F {
                break;
            }
            value |= bits << (7 * index);
            if byte[0] & 0x80 == 0 {
                return Ok(value);
            }
        }
        Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "malformed string length prefix",
        ))
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}
