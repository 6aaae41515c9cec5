use libswf_bits::BitReader;
use libswf_bits::BitWriter;
use libswf_bits::EncodingError;

use crate::format::MIN_EDGE_BITS;
use crate::style::StyleRef;
use crate::Error;

/// Selects styles and/or moves the pen.
///
/// Every field is optional; fields left at `None` keep their previous
/// value. A record with no field set is not encodable (it would read back
/// as the end-of-shape marker) and is skipped on encoding.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct StyleChange {
    /// Absolute pen position in the shape's coordinate space.
    pub move_to: Option<(i32, i32)>,
    pub fill0: Option<StyleRef>,
    pub fill1: Option<StyleRef>,
    pub line: Option<StyleRef>,
}

impl StyleChange {
    pub fn new() -> StyleChange {
        StyleChange::default()
    }
    pub fn with_move_to(mut self, x: i32, y: i32) -> StyleChange {
        self.move_to = Some((x, y));
        self
    }
    pub fn with_fill0(mut self, style: StyleRef) -> StyleChange {
        self.fill0 = Some(style);
        self
    }
    pub fn with_fill1(mut self, style: StyleRef) -> StyleChange {
        self.fill1 = Some(style);
        self
    }
    pub fn with_line(mut self, style: StyleRef) -> StyleChange {
        self.line = Some(style);
        self
    }
    pub fn is_empty(&self) -> bool {
        self.move_to.is_none() && self.fill0.is_none() && self.fill1.is_none() && self.line.is_none()
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ShapeRecord {
    StyleChange(StyleChange),
    /// Straight edge, relative to the current pen position.
    Line { dx: i32, dy: i32 },
    /// Quadratic curve; the anchor is relative to the control point.
    Curve {
        control_dx: i32,
        control_dy: i32,
        anchor_dx: i32,
        anchor_dy: i32,
    },
}

/// Field widths shared by all records of one shape.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Widths {
    pub fill: u32,
    pub line: u32,
    pub edge: u32,
    pub moves: u32,
}

// Record layout, most significant bit first:
//
// Style change: 0 N L F1 F0 M [MoveBits:5 X Y] [Fill0] [Fill1] [Line]
// End of shape: 0 00000
// Straight edge: 1 1 NumBits-2:4 G (G=1: DX DY | G=0: V (V=1: DY | V=0: DX))
// Curved edge: 1 0 NumBits-2:4 CX CY AX AY
//
// N - new style tables follow (not supported)

impl ShapeRecord {
    pub(crate) fn write(&self, w: &mut BitWriter, widths: &Widths) -> Result<(), EncodingError> {
        match *self {
            ShapeRecord::StyleChange(ref change) => {
                w.write_bit(false);
                w.write_bit(false);
                w.write_bit(change.line.is_some());
                w.write_bit(change.fill1.is_some());
                w.write_bit(change.fill0.is_some());
                w.write_bit(change.move_to.is_some());
                if let Some((x, y)) = change.move_to {
                    w.write_unsigned_bits(widths.moves, 5)?;
                    w.write_signed_bits(x, widths.moves)?;
                    w.write_signed_bits(y, widths.moves)?;
                }
                if let Some(fill0) = change.fill0 {
                    w.write_unsigned_bits(fill0.index().into(), widths.fill)?;
                }
                if let Some(fill1) = change.fill1 {
                    w.write_unsigned_bits(fill1.index().into(), widths.fill)?;
                }
                if let Some(line) = change.line {
                    w.write_unsigned_bits(line.index().into(), widths.line)?;
                }
            }
            ShapeRecord::Line { dx, dy } => {
                w.write_bit(true);
                w.write_bit(true);
                w.write_unsigned_bits(widths.edge - MIN_EDGE_BITS, 4)?;
                if dx != 0 && dy != 0 {
                    w.write_bit(true);
                    w.write_signed_bits(dx, widths.edge)?;
                    w.write_signed_bits(dy, widths.edge)?;
                } else if dx == 0 && dy != 0 {
                    w.write_bit(false);
                    w.write_bit(true);
                    w.write_signed_bits(dy, widths.edge)?;
                } else {
                    w.write_bit(false);
                    w.write_bit(false);
                    w.write_signed_bits(dx, widths.edge)?;
                }
            }
            ShapeRecord::Curve {
                control_dx,
                control_dy,
                anchor_dx,
                anchor_dy,
            } => {
                w.write_bit(true);
                w.write_bit(false);
                w.write_unsigned_bits(widths.edge - MIN_EDGE_BITS, 4)?;
                w.write_signed_bits(control_dx, widths.edge)?;
                w.write_signed_bits(control_dy, widths.edge)?;
                w.write_signed_bits(anchor_dx, widths.edge)?;
                w.write_signed_bits(anchor_dy, widths.edge)?;
            }
        }
        Ok(())
    }

    pub(crate) fn write_end(w: &mut BitWriter) {
        for _ in 0..6 {
            w.write_bit(false);
        }
    }

    /// Reads one record, `None` at the end-of-shape marker.
    ///
    /// Only `fill` and `line` of `widths` are used, edge and move widths are
    /// stored per record.
    pub(crate) fn read(r: &mut BitReader, widths: &Widths) -> Result<Option<ShapeRecord>, Error> {
        if r.read_bit()? {
            let straight = r.read_bit()?;
            let bits = r.read_unsigned_bits(4)? + MIN_EDGE_BITS;
            if straight {
                let general = r.read_bit()?;
                let (dx, dy) = if general {
                    (r.read_signed_bits(bits)?, r.read_signed_bits(bits)?)
                } else if r.read_bit()? {
                    (0, r.read_signed_bits(bits)?)
                } else {
                    (r.read_signed_bits(bits)?, 0)
                };
                return Ok(Some(ShapeRecord::Line { dx: dx, dy: dy }));
            }
            return Ok(Some(ShapeRecord::Curve {
                control_dx: r.read_signed_bits(bits)?,
                control_dy: r.read_signed_bits(bits)?,
                anchor_dx: r.read_signed_bits(bits)?,
                anchor_dy: r.read_signed_bits(bits)?,
            }));
        }
        let flags = r.read_unsigned_bits(5)?;
        if flags == 0 {
            return Ok(None);
        }
        if flags & 0b1_0000 != 0 {
            return Err(Error::NewStyles);
        }
        let mut change = StyleChange::new();
        if flags & 0b0_0001 != 0 {
            let bits = r.read_unsigned_bits(5)?;
            let x = r.read_signed_bits(bits)?;
            let y = r.read_signed_bits(bits)?;
            change.move_to = Some((x, y));
        }
        if flags & 0b0_0010 != 0 {
            change.fill0 = Some(read_style(r, widths.fill)?);
        }
        if flags & 0b0_0100 != 0 {
            change.fill1 = Some(read_style(r, widths.fill)?);
        }
        if flags & 0b0_1000 != 0 {
            change.line = Some(read_style(r, widths.line)?);
        }
        Ok(Some(ShapeRecord::StyleChange(change)))
    }
}

fn read_style(r: &mut BitReader, bits: u32) -> Result<StyleRef, Error> {
    // At most 16 bits, style tables hold at most 65535 entries.
    let index = r.read_unsigned_bits(bits)?;
    Ok(StyleRef::from_index(index as u16))
}
