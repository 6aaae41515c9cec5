use binrw::BinWrite;
use libswf_bits::BitWriter;
use libswf_shape::Bounds;
use libswf_shape::Color;
use libswf_shape::Identifier;
use std::io;
use thiserror::Error;

use crate::format;
use crate::format::encode_frame_rate;
use crate::format::FileHeader;
use crate::format::FILE_HEADER_LENGTH;
use crate::tag::Tag;
use crate::WriteError;

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
#[error("the background color can only be set once")]
pub struct BackgroundColorAlreadySet;

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
#[error("all 65535 identifiers of the movie are in use")]
pub struct IdentifiersExhausted;

/// A movie under construction.
///
/// Tags are kept in the order they were added and encoded on `serialize`.
/// The background color, if any, is written before all of them.
#[derive(Clone, Debug)]
pub struct Movie {
    version: u8,
    frame_size: Bounds,
    frame_rate: f32,
    background_color: Option<Color>,
    tags: Vec<Tag>,
    next_id: u32,
}

impl Default for Movie {
    fn default() -> Movie {
        Movie {
            version: format::DEFAULT_VERSION,
            frame_size: Bounds::default(),
            frame_rate: 0.0,
            background_color: None,
            tags: Vec::new(),
            next_id: 1,
        }
    }
}

impl Movie {
    pub fn new() -> Movie {
        Movie::default()
    }
    /// Returns an identifier not handed out by this movie before.
    ///
    /// Identifiers start at 1 and count up. Separate movies allocate
    /// independently.
    pub fn new_identifier(&mut self) -> Result<Identifier, IdentifiersExhausted> {
        let id = u16::try_from(self.next_id).map_err(|_| IdentifiersExhausted)?;
        self.next_id += 1;
        Ok(Identifier(id))
    }
    pub fn set_version(&mut self, version: u8) {
        self.version = version;
    }
    pub fn set_frame_size(&mut self, frame_size: Bounds) {
        self.frame_size = frame_size;
    }
    /// Frames per second. Checked on serialization.
    pub fn set_frame_rate(&mut self, frame_rate: f32) {
        self.frame_rate = frame_rate;
    }
    pub fn set_background_color(&mut self, color: Color) -> Result<(), BackgroundColorAlreadySet> {
        if self.background_color.is_some() {
            return Err(BackgroundColorAlreadySet);
        }
        self.background_color = Some(color);
        Ok(())
    }
    /// Appends a tag. Identifiers referenced by the tag are not checked.
    ///
    /// A `SetBackgroundColor` tag goes through `set_background_color`. It is
    /// written before all other tags, and dropped if the background color is
    /// already set.
    pub fn add(&mut self, tag: Tag) {
        if let Tag::SetBackgroundColor(color) = tag {
            if self.set_background_color(color).is_err() {
                warn!("dropping second background color {:?}", color);
            }
            return;
        }
        self.tags.push(tag);
    }
    pub fn version(&self) -> u8 {
        self.version
    }
    pub fn frame_size(&self) -> Bounds {
        self.frame_size
    }
    pub fn frame_rate(&self) -> f32 {
        self.frame_rate
    }
    pub fn background_color(&self) -> Option<Color> {
        self.background_color
    }
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }
    /// Number of `ShowFrame` tags.
    pub fn frame_count(&self) -> usize {
        self.tags.iter().filter(|t| matches!(t, Tag::ShowFrame)).count()
    }

    /// Assembles the complete file in memory.
    pub fn serialize(&self) -> Result<Vec<u8>, WriteError> {
        let frame_rate =
            encode_frame_rate(self.frame_rate).ok_or(WriteError::FrameRate(self.frame_rate))?;
        let frame_count = self.frame_count();
        let frame_count_u16 =
            u16::try_from(frame_count).map_err(|_| WriteError::TooManyFrames(frame_count))?;

        let mut body = BitWriter::new();
        self.frame_size.write(&mut body)?;
        body.write_u16(frame_rate);
        body.write_u16(frame_count_u16);
        if let Some(color) = self.background_color {
            body.write_bytes(&Tag::SetBackgroundColor(color).encode()?);
        }
        for tag in &self.tags {
            body.write_bytes(&tag.encode()?);
        }
        body.write_bytes(&Tag::End.encode()?);
        let body = body.into_bytes();

        // The length field covers the header itself.
        let total = FILE_HEADER_LENGTH + body.len();
        let file_length = u32::try_from(total).map_err(|_| WriteError::FileTooLong(total))?;
        let mut result = io::Cursor::new(Vec::with_capacity(total));
        FileHeader {
            version: self.version,
            file_length: file_length,
        }
        .write(&mut result)?;
        let mut result = result.into_inner();
        result.extend_from_slice(&body);
        debug!(
            "serialized movie: version={} tags={} frames={} length={}",
            self.version,
            self.tags.len(),
            frame_count,
            result.len()
        );
        Ok(result)
    }
}
