use binrw::BinRead;
use libswf_bits::BitReader;
use libswf_bits::UnexpectedEnd;
use libswf_shape::Bounds;
use std::io;
use std::io::Read;
use thiserror::Error;
use warn::wrap;
use warn::Warn;

use crate::format;
use crate::format::FileHeader;
use crate::format::TagHeader;
use crate::format::Warning;
use crate::tag::Tag;

#[derive(Error, Debug)]
#[error(transparent)]
pub enum ReadError {
    Io(#[from] io::Error),
    Binrw(#[from] binrw::Error),
    Shape(#[from] libswf_shape::Error),
    #[error("Unexpected end of movie data")]
    UnexpectedEnd,
    #[error("File length field says {declared} bytes, but only {actual} are present")]
    LengthMismatch { declared: u32, actual: usize },
    #[error("Compressed movies are not supported")]
    Compressed,
}

impl From<UnexpectedEnd> for ReadError {
    fn from(_: UnexpectedEnd) -> ReadError {
        ReadError::UnexpectedEnd
    }
}

/// Reads an uncompressed movie.
///
/// The whole input is read on construction, tags are decoded one at a time
/// with `read_tag`.
pub struct Reader {
    version: u8,
    frame_size: Bounds,
    frame_rate: u16,
    frame_count: u16,
    data: Vec<u8>,
    // Offset of the next tag header in `data`.
    pos: usize,
    frames_seen: u32,
    finished: bool,
}

impl Reader {
    pub fn new<W, R>(mut input: R, warn: &mut W) -> Result<Reader, ReadError>
    where
        W: Warn<Warning>,
        R: io::Read,
    {
        let mut data = Vec::new();
        input.read_to_end(&mut data)?;
        if data.starts_with(format::SIGNATURE_ZLIB) || data.starts_with(format::SIGNATURE_LZMA) {
            return Err(ReadError::Compressed);
        }
        let header = FileHeader::read(&mut io::Cursor::new(&data))?;
        let declared = usize::try_from(header.file_length).unwrap_or(usize::MAX);
        if declared < format::FILE_HEADER_LENGTH || declared > data.len() {
            return Err(ReadError::LengthMismatch {
                declared: header.file_length,
                actual: data.len(),
            });
        }
        if declared < data.len() {
            warn.warn(Warning::FileLengthMismatch);
            data.truncate(declared);
        }

        let mut r = BitReader::new(&data[format::FILE_HEADER_LENGTH..]);
        let frame_size = Bounds::read(&mut r, wrap(warn))?;
        let frame_rate = r.read_u16()?;
        let frame_count = r.read_u16()?;
        let pos = format::FILE_HEADER_LENGTH + r.num_bytes_read();
        Ok(Reader {
            version: header.version,
            frame_size: frame_size,
            frame_rate: frame_rate,
            frame_count: frame_count,
            data: data,
            pos: pos,
            frames_seen: 0,
            finished: false,
        })
    }
    pub fn version(&self) -> u8 {
        self.version
    }
    pub fn frame_size(&self) -> Bounds {
        self.frame_size
    }
    pub fn frame_rate(&self) -> f32 {
        format::decode_frame_rate(self.frame_rate)
    }
    /// Frame count as stored in the header.
    pub fn frame_count(&self) -> u16 {
        self.frame_count
    }
    pub fn file_length(&self) -> usize {
        self.data.len()
    }
    /// Returns the next tag, `None` after the `End` tag or at the end of
    /// the data.
    pub fn read_tag<W: Warn<Warning>>(&mut self, warn: &mut W) -> Result<Option<Tag>, ReadError> {
        if self.finished {
            return Ok(None);
        }
        if self.pos == self.data.len() {
            warn.warn(Warning::MissingEndTag);
            self.finish(warn);
            return Ok(None);
        }
        let mut r = BitReader::new(&self.data[self.pos..]);
        let header = TagHeader::read(&mut r, warn)?;
        let start = self.pos + header.encoded_len();
        let length = usize::try_from(header.length).unwrap_or(usize::MAX);
        if length > self.data.len() - start {
            return Err(ReadError::UnexpectedEnd);
        }
        let end = start + length;
        let tag = Tag::decode(header.code, &self.data[start..end], warn)?;
        self.pos = end;
        match tag {
            Tag::ShowFrame => self.frames_seen += 1,
            Tag::End => {
                if self.pos != self.data.len() {
                    warn.warn(Warning::DataAfterEndTag);
                }
                self.finish(warn);
            }
            _ => {}
        }
        Ok(Some(tag))
    }
    /// Reads all remaining tags, the `End` tag included.
    pub fn read_tags<W: Warn<Warning>>(&mut self, warn: &mut W) -> Result<Vec<Tag>, ReadError> {
        let mut result = Vec::new();
        while let Some(tag) = self.read_tag(warn)? {
            result.push(tag);
        }
        Ok(result)
    }
    fn finish<W: Warn<Warning>>(&mut self, warn: &mut W) {
        self.finished = true;
        if self.frames_seen != u32::from(self.frame_count) {
            warn.warn(Warning::FrameCountMismatch);
        }
    }
}
