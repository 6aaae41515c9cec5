#[cfg(test)]
#[macro_use]
extern crate quickcheck;

use thiserror::Error;
use warn::Warn;

/// Widest field that can be written or read in one call.
pub const MAX_WIDTH: u32 = 32;

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Warning {
    NonZeroPadding,
}

#[derive(Clone, Copy, Debug, Eq, Error, Hash, Ord, PartialEq, PartialOrd)]
pub enum EncodingError {
    #[error("{value} does not fit into {width} unsigned bits")]
    UnsignedOutOfRange { value: u32, width: u32 },
    #[error("{value} does not fit into {width} signed bits")]
    SignedOutOfRange { value: i32, width: u32 },
    #[error("bit width {0} is wider than 32 bits")]
    InvalidWidth(u32),
}

#[derive(Clone, Copy, Debug, Eq, Error, Hash, Ord, PartialEq, PartialOrd)]
#[error("unexpected end of data")]
pub struct UnexpectedEnd;

/// Number of bits needed to store `value` as an unsigned field.
///
/// Zero needs zero bits.
pub fn unsigned_width(value: u32) -> u32 {
    MAX_WIDTH - value.leading_zeros()
}

/// Number of bits needed to store `value` as a two's complement field.
///
/// The result always includes the sign bit, so `0` and `-1` need one bit,
/// `63` and `-64` need seven bits, `64` needs eight.
pub fn signed_width(value: i32) -> u32 {
    let magnitude = if value < 0 { !value } else { value };
    MAX_WIDTH + 1 - magnitude.leading_zeros()
}

fn check_width(width: u32) -> Result<(), EncodingError> {
    if width > MAX_WIDTH {
        return Err(EncodingError::InvalidWidth(width));
    }
    Ok(())
}

fn mask(width: u32) -> u32 {
    if width >= MAX_WIDTH {
        !0
    } else {
        (1 << width) - 1
    }
}

/// Byte buffer that accepts fields of arbitrary bit width.
///
/// Bits are packed most significant bit first. Byte-sized writes
/// (`write_u8`, `write_u16`, ...) align to the next byte boundary first and
/// are little-endian.
#[derive(Clone, Debug, Default)]
pub struct BitWriter {
    bytes: Vec<u8>,
    current: u8,
    used: u32,
}

impl BitWriter {
    pub fn new() -> BitWriter {
        BitWriter::default()
    }
    fn push_bits(&mut self, value: u32, width: u32) {
        for i in (0..width).rev() {
            if (value >> i) & 1 != 0 {
                self.current |= 0x80 >> self.used;
            }
            self.used += 1;
            if self.used == 8 {
                self.bytes.push(self.current);
                self.current = 0;
                self.used = 0;
            }
        }
    }
    pub fn write_bit(&mut self, bit: bool) {
        self.push_bits(bit as u32, 1);
    }
    pub fn write_unsigned_bits(&mut self, value: u32, width: u32) -> Result<(), EncodingError> {
        check_width(width)?;
        if unsigned_width(value) > width {
            return Err(EncodingError::UnsignedOutOfRange {
                value: value,
                width: width,
            });
        }
        self.push_bits(value, width);
        Ok(())
    }
    pub fn write_signed_bits(&mut self, value: i32, width: u32) -> Result<(), EncodingError> {
        check_width(width)?;
        // A zero-width field can only hold zero.
        if (width == 0 && value != 0) || (width != 0 && signed_width(value) > width) {
            return Err(EncodingError::SignedOutOfRange {
                value: value,
                width: width,
            });
        }
        self.push_bits(value as u32 & mask(width), width);
        Ok(())
    }
    /// Pads the current byte with zero bits.
    pub fn align_to_byte(&mut self) {
        if self.used != 0 {
            self.bytes.push(self.current);
            self.current = 0;
            self.used = 0;
        }
    }
    pub fn is_aligned(&self) -> bool {
        self.used == 0
    }
    pub fn write_u8(&mut self, value: u8) {
        self.align_to_byte();
        self.bytes.push(value);
    }
    pub fn write_u16(&mut self, value: u16) {
        self.write_bytes(&value.to_le_bytes());
    }
    pub fn write_u32(&mut self, value: u32) {
        self.write_bytes(&value.to_le_bytes());
    }
    pub fn write_bytes(&mut self, data: &[u8]) {
        self.align_to_byte();
        self.bytes.extend_from_slice(data);
    }
    /// Number of bits written so far, including those of a partial byte.
    pub fn bit_len(&self) -> usize {
        self.bytes.len() * 8 + self.used as usize
    }
    /// Completed bytes. A partially filled byte only shows up after
    /// `align_to_byte`.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
    pub fn into_bytes(mut self) -> Vec<u8> {
        self.align_to_byte();
        self.bytes
    }
}

/// Reads back what a `BitWriter` produced.
pub struct BitReader<'a> {
    data: &'a [u8],
    // Position in bits.
    pos: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(data: &'a [u8]) -> BitReader<'a> {
        BitReader { data: data, pos: 0 }
    }
    fn remaining_bits(&self) -> usize {
        self.data.len() * 8 - self.pos
    }
    pub fn read_bit(&mut self) -> Result<bool, UnexpectedEnd> {
        Ok(self.read_unsigned_bits(1)? != 0)
    }
    pub fn read_unsigned_bits(&mut self, width: u32) -> Result<u32, UnexpectedEnd> {
        assert!(width <= MAX_WIDTH);
        if self.remaining_bits() < width as usize {
            self.pos = self.data.len() * 8;
            return Err(UnexpectedEnd);
        }
        let mut result = 0u32;
        for _ in 0..width {
            let byte = self.data[self.pos / 8];
            let bit = (byte >> (7 - self.pos % 8)) & 1;
            result = (result << 1) | bit as u32;
            self.pos += 1;
        }
        Ok(result)
    }
    pub fn read_signed_bits(&mut self, width: u32) -> Result<i32, UnexpectedEnd> {
        let raw = self.read_unsigned_bits(width)?;
        if width == 0 {
            return Ok(0);
        }
        let sign = 1 << (width - 1);
        if raw & sign != 0 {
            Ok((raw | !mask(width)) as i32)
        } else {
            Ok(raw as i32)
        }
    }
    /// Skips to the next byte boundary, warning if the skipped bits are not
    /// zero.
    pub fn align_to_byte<W: Warn<Warning>>(&mut self, warn: &mut W) {
        let skip = (8 - self.pos % 8) % 8;
        if skip != 0 {
            let byte = self.data[self.pos / 8];
            if byte & (0xff >> (8 - skip)) != 0 {
                warn.warn(Warning::NonZeroPadding);
            }
            self.pos += skip;
        }
    }
    pub fn is_aligned(&self) -> bool {
        self.pos % 8 == 0
    }
    pub fn read_u8(&mut self) -> Result<u8, UnexpectedEnd> {
        let b = self.read_bytes(1)?;
        Ok(b[0])
    }
    pub fn read_u16(&mut self) -> Result<u16, UnexpectedEnd> {
        let b = self.read_bytes(2)?;
        Ok(u16::from_le_bytes([b[0], b[1]]))
    }
    pub fn read_u32(&mut self) -> Result<u32, UnexpectedEnd> {
        let b = self.read_bytes(4)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }
    /// Reads `len` whole bytes. Must be called on a byte boundary.
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], UnexpectedEnd> {
        assert!(self.is_aligned(), "byte reads must start on a byte boundary");
        let start = self.pos / 8;
        if self.data.len() - start < len {
            self.pos = self.data.len() * 8;
            return Err(UnexpectedEnd);
        }
        self.pos += len * 8;
        Ok(&self.data[start..start + len])
    }
    /// Bytes not consumed yet, starting at the current byte.
    pub fn as_slice(&self) -> &'a [u8] {
        &self.data[self.pos / 8..]
    }
    pub fn is_empty(&self) -> bool {
        self.remaining_bits() == 0
    }
    pub fn num_bytes_read(&self) -> usize {
        (self.pos + 7) / 8
    }
}
