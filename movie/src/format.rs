use binrw::BinRead;
use binrw::BinWrite;
use libswf_bits::BitReader;
use libswf_bits::BitWriter;
use libswf_bits::UnexpectedEnd;
use thiserror::Error;
use warn::Warn;

pub const TAG_END: u16 = 0;
pub const TAG_SHOW_FRAME: u16 = 1;
pub const TAG_DEFINE_SHAPE: u16 = 2;
pub const TAG_PLACE_OBJECT: u16 = 4;
pub const TAG_SET_BACKGROUND_COLOR: u16 = 9;
pub const TAG_DEFINE_SHAPE2: u16 = 22;
pub const TAG_DEFINE_SHAPE3: u16 = 32;

/// Tag codes occupy the upper 10 bits of the tag header.
pub const MAX_TAG_CODE: u16 = 0x3ff;

pub const SIGNATURE: &[u8; 3] = b"FWS";
pub const SIGNATURE_ZLIB: &[u8; 3] = b"CWS";
pub const SIGNATURE_LZMA: &[u8; 3] = b"ZWS";
pub const DEFAULT_VERSION: u8 = 6;

/// Longest payload that still fits the 6-bit length of a short tag header.
pub const SHORT_TAG_MAX_LENGTH: u32 = 0x3e;
/// Length field value announcing a 32-bit length after the short header.
pub const LONG_TAG_MARKER: u16 = 0x3f;

/// Signature, version and file length.
pub const FILE_HEADER_LENGTH: usize = 8;

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Warning {
    /// Long tag header used for a payload that fits the short form.
    OverlongTagHeader,
    NonZeroPadding,
    ExcessTagData,
    MissingEndTag,
    DataAfterEndTag,
    FrameCountMismatch,
    FileLengthMismatch,
    Shape(libswf_shape::Warning),
}

impl From<libswf_bits::Warning> for Warning {
    fn from(w: libswf_bits::Warning) -> Warning {
        match w {
            libswf_bits::Warning::NonZeroPadding => Warning::NonZeroPadding,
        }
    }
}

impl From<libswf_shape::Warning> for Warning {
    fn from(w: libswf_shape::Warning) -> Warning {
        Warning::Shape(w)
    }
}

#[derive(BinRead, BinWrite, Debug)]
#[brw(little, magic = b"FWS")]
pub(crate) struct FileHeader {
    pub version: u8,
    /// Length of the whole file, this header included.
    pub file_length: u32,
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum TagError {
    #[error("tag code {0} does not fit into 10 bits")]
    InvalidCode(u16),
    #[error("tag payload of {0} bytes does not fit into a 32-bit length")]
    TooLong(usize),
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct TagHeader {
    pub code: u16,
    pub length: u32,
}

impl TagHeader {
    pub fn new(code: u16, length: u32) -> TagHeader {
        assert!(code <= MAX_TAG_CODE, "invalid tag code {}", code);
        TagHeader {
            code: code,
            length: length,
        }
    }
    /// Header for a payload of `payload_len` bytes.
    pub fn for_payload(code: u16, payload_len: usize) -> Result<TagHeader, TagError> {
        if code > MAX_TAG_CODE {
            return Err(TagError::InvalidCode(code));
        }
        let length = u32::try_from(payload_len).map_err(|_| TagError::TooLong(payload_len))?;
        Ok(TagHeader::new(code, length))
    }
    pub fn is_short(&self) -> bool {
        self.length <= SHORT_TAG_MAX_LENGTH
    }
    /// Number of bytes `write` produces.
    pub fn encoded_len(&self) -> usize {
        if self.is_short() {
            2
        } else {
            6
        }
    }
    pub fn write(&self, w: &mut BitWriter) {
        if self.is_short() {
            w.write_u16(self.code << 6 | self.length as u16);
        } else {
            w.write_u16(self.code << 6 | LONG_TAG_MARKER);
            w.write_u32(self.length);
        }
    }
    pub fn read<W: Warn<Warning>>(
        r: &mut BitReader,
        warn: &mut W,
    ) -> Result<TagHeader, UnexpectedEnd> {
        let code_and_length = r.read_u16()?;
        let code = code_and_length >> 6;
        let short_length = code_and_length & LONG_TAG_MARKER;
        if short_length != LONG_TAG_MARKER {
            return Ok(TagHeader::new(code, short_length.into()));
        }
        let length = r.read_u32()?;
        if length <= SHORT_TAG_MAX_LENGTH {
            warn.warn(Warning::OverlongTagHeader);
        }
        Ok(TagHeader::new(code, length))
    }
}

/// Prefixes `payload` with a tag header.
///
/// The short header form is used iff the payload is shorter than 63 bytes.
pub fn encode_tag(code: u16, payload: &[u8]) -> Result<Vec<u8>, TagError> {
    let header = TagHeader::for_payload(code, payload.len())?;
    let mut w = BitWriter::new();
    header.write(&mut w);
    w.write_bytes(payload);
    Ok(w.into_bytes())
}

/// Frame rate as 8.8 fixed point, `None` if it is not representable.
pub fn encode_frame_rate(rate: f32) -> Option<u16> {
    if !rate.is_finite() || rate < 0.0 {
        return None;
    }
    let fixed = (rate * 256.0).round();
    if fixed > f32::from(u16::MAX) {
        return None;
    }
    Some(fixed as u16)
}

pub fn decode_frame_rate(fixed: u16) -> f32 {
    f32::from(fixed) / 256.0
}
