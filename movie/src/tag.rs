use libswf_bits::signed_width;
use libswf_bits::BitReader;
use libswf_bits::BitWriter;
use libswf_bits::EncodingError;
use libswf_shape::Color;
use libswf_shape::DefineShape;
use libswf_shape::Identifier;
use libswf_shape::ShapeVersion;
use warn::wrap;
use warn::Warn;

use crate::format;
use crate::format::encode_tag;
use crate::format::Warning;
use crate::ReadError;
use crate::WriteError;

/// Places a defined character on the display list.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct PlaceObject {
    pub id: Identifier,
    /// Layer of the display list, higher depths are drawn on top.
    pub depth: u16,
    /// Translation in twips.
    pub x: i32,
    pub y: i32,
}

impl PlaceObject {
    pub fn new(id: Identifier, depth: u16, x: i32, y: i32) -> PlaceObject {
        PlaceObject {
            id: id,
            depth: depth,
            x: x,
            y: y,
        }
    }
    // Matrix: HasScale=0 HasRotate=0 NTranslateBits:5 TranslateX TranslateY
    fn write(&self, w: &mut BitWriter) -> Result<(), EncodingError> {
        w.write_u16(self.id.0);
        w.write_u16(self.depth);
        let bits = signed_width(self.x).max(signed_width(self.y));
        w.write_bit(false);
        w.write_bit(false);
        w.write_unsigned_bits(bits, 5)?;
        w.write_signed_bits(self.x, bits)?;
        w.write_signed_bits(self.y, bits)?;
        w.align_to_byte();
        Ok(())
    }
    fn read<W: Warn<Warning>>(r: &mut BitReader, warn: &mut W) -> Result<PlaceObject, ReadError> {
        let id = Identifier(r.read_u16()?);
        let depth = r.read_u16()?;
        let has_scale = r.read_bit()?;
        if has_scale {
            let bits = r.read_unsigned_bits(5)?;
            r.read_signed_bits(bits)?;
            r.read_signed_bits(bits)?;
        }
        let has_rotate = r.read_bit()?;
        if has_rotate {
            let bits = r.read_unsigned_bits(5)?;
            r.read_signed_bits(bits)?;
            r.read_signed_bits(bits)?;
        }
        let bits = r.read_unsigned_bits(5)?;
        let x = r.read_signed_bits(bits)?;
        let y = r.read_signed_bits(bits)?;
        r.align_to_byte(wrap(warn));
        // An optional color transform may follow, it is skipped.
        if has_scale || has_rotate {
            debug!("ignoring scale/rotation of placed character {}", id);
        }
        Ok(PlaceObject::new(id, depth, x, y))
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Tag {
    DefineShape(DefineShape),
    PlaceObject(PlaceObject),
    SetBackgroundColor(Color),
    ShowFrame,
    End,
    Unknown { code: u16, data: Vec<u8> },
}

impl Tag {
    pub fn code(&self) -> u16 {
        match *self {
            Tag::DefineShape(ref d) => d.version().tag_code(),
            Tag::PlaceObject(_) => format::TAG_PLACE_OBJECT,
            Tag::SetBackgroundColor(_) => format::TAG_SET_BACKGROUND_COLOR,
            Tag::ShowFrame => format::TAG_SHOW_FRAME,
            Tag::End => format::TAG_END,
            Tag::Unknown { code, .. } => code,
        }
    }
    pub fn payload(&self) -> Result<Vec<u8>, WriteError> {
        let mut w = BitWriter::new();
        match *self {
            Tag::DefineShape(ref d) => return Ok(d.payload()?),
            Tag::PlaceObject(ref p) => p.write(&mut w)?,
            Tag::SetBackgroundColor(color) => color.write_rgb(&mut w),
            Tag::ShowFrame | Tag::End => {}
            Tag::Unknown { ref data, .. } => return Ok(data.clone()),
        }
        Ok(w.into_bytes())
    }
    /// Header and payload.
    pub fn encode(&self) -> Result<Vec<u8>, WriteError> {
        Ok(encode_tag(self.code(), &self.payload()?)?)
    }
    pub fn decode<W: Warn<Warning>>(
        code: u16,
        data: &[u8],
        warn: &mut W,
    ) -> Result<Tag, ReadError> {
        if let Some(version) = ShapeVersion::from_tag_code(code) {
            return Ok(Tag::DefineShape(DefineShape::read(version, data, wrap(warn))?));
        }
        let mut r = BitReader::new(data);
        let result = match code {
            format::TAG_END => Tag::End,
            format::TAG_SHOW_FRAME => Tag::ShowFrame,
            format::TAG_PLACE_OBJECT => {
                return Ok(Tag::PlaceObject(PlaceObject::read(&mut r, warn)?));
            }
            format::TAG_SET_BACKGROUND_COLOR => Tag::SetBackgroundColor(Color::read_rgb(&mut r)?),
            _ => {
                return Ok(Tag::Unknown {
                    code: code,
                    data: data.to_vec(),
                })
            }
        };
        if !r.is_empty() {
            warn.warn(Warning::ExcessTagData);
        }
        Ok(result)
    }
}
