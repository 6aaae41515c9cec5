use libswf_bits::BitReader;
use libswf_bits::BitWriter;
use warn::Warn;

use crate::builder::Shape;
use crate::format::Bounds;
use crate::format::Identifier;
use crate::format::Warning;
use crate::format::STYLE_COUNT_EXTENDED;
use crate::record::ShapeRecord;
use crate::style::StyleKind;
use crate::style::StyleTable;
use crate::Error;

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum ShapeVersion {
    /// DefineShape: RGB colors, at most 254 styles per table.
    V1,
    /// DefineShape2: extended style counts.
    V2,
    /// DefineShape3: RGBA colors.
    V3,
}

impl ShapeVersion {
    pub fn tag_code(self) -> u16 {
        match self {
            ShapeVersion::V1 => 2,
            ShapeVersion::V2 => 22,
            ShapeVersion::V3 => 32,
        }
    }
    pub fn from_tag_code(code: u16) -> Option<ShapeVersion> {
        Some(match code {
            2 => ShapeVersion::V1,
            22 => ShapeVersion::V2,
            32 => ShapeVersion::V3,
            _ => return None,
        })
    }
    fn extended_counts(self) -> bool {
        self >= ShapeVersion::V2
    }
    fn alpha(self) -> bool {
        self >= ShapeVersion::V3
    }
}

/// Shape definition: the payload of a DefineShape tag.
///
/// Owns its style tables and records.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DefineShape {
    pub id: Identifier,
    pub bounds: Bounds,
    pub styles: StyleTable,
    pub shape: Shape,
}

impl DefineShape {
    pub fn new(id: Identifier, bounds: Bounds, styles: StyleTable, shape: Shape) -> DefineShape {
        DefineShape {
            id: id,
            bounds: bounds,
            styles: styles,
            shape: shape,
        }
    }
    /// Oldest tag version able to carry this definition.
    pub fn version(&self) -> ShapeVersion {
        if self.styles.has_alpha() {
            ShapeVersion::V3
        } else if self.styles.max_len() >= usize::from(STYLE_COUNT_EXTENDED) {
            ShapeVersion::V2
        } else {
            ShapeVersion::V1
        }
    }
    /// Checks that every style selected by the shape exists.
    pub fn check(&self) -> Result<(), Error> {
        for record in self.shape.records() {
            if let ShapeRecord::StyleChange(change) = record {
                if let Some(line) = change.line {
                    self.styles.check(StyleKind::Line, line)?;
                }
                for fill in [change.fill0, change.fill1].iter().flatten() {
                    self.styles.check(StyleKind::Fill, *fill)?;
                }
            }
        }
        Ok(())
    }
    pub fn payload(&self) -> Result<Vec<u8>, Error> {
        self.check()?;
        let version = self.version();
        let mut w = BitWriter::new();
        w.write_u16(self.id.0);
        self.bounds.write(&mut w)?;
        self.styles.write(&mut w, version.alpha());
        let fill_bits = self.styles.fill_bits();
        let line_bits = self.styles.line_bits();
        w.write_unsigned_bits(fill_bits, 4)?;
        w.write_unsigned_bits(line_bits, 4)?;
        self.shape.write(&mut w, fill_bits, line_bits)?;
        let result = w.into_bytes();
        debug!(
            "encoded shape id={} version={:?} records={} size={}",
            self.id,
            version,
            self.shape.records().len(),
            result.len()
        );
        Ok(result)
    }
    pub fn read<W: Warn<Warning>>(
        version: ShapeVersion,
        data: &[u8],
        warn: &mut W,
    ) -> Result<DefineShape, Error> {
        let mut r = BitReader::new(data);
        let id = Identifier(r.read_u16()?);
        let bounds = Bounds::read(&mut r, warn)?;
        let styles = StyleTable::read(&mut r, version.extended_counts(), version.alpha())?;
        let fill_bits = r.read_unsigned_bits(4)?;
        let line_bits = r.read_unsigned_bits(4)?;
        let shape = Shape::read(&mut r, fill_bits, line_bits, warn)?;
        if !r.is_empty() {
            warn.warn(Warning::ExcessData);
        }
        // Style indices are not checked against the tables here, see `check`.
        Ok(DefineShape::new(id, bounds, styles, shape))
    }
}
