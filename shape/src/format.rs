use libswf_bits::signed_width;
use libswf_bits::BitReader;
use libswf_bits::BitWriter;
use libswf_bits::EncodingError;
use libswf_bits::UnexpectedEnd;
use std::fmt;
use warn::wrap;
use warn::Warn;

/// Edge deltas are stored with `NumBits - 2` in a 4-bit field.
pub const MIN_EDGE_BITS: u32 = 2;
pub const MAX_EDGE_BITS: u32 = MIN_EDGE_BITS + 0b1111;
pub const MAX_MOVE_BITS: u32 = 0b1_1111;
pub const MAX_RECT_BITS: u32 = 0b1_1111;

/// Fails if `value` needs more than `max` bits as a signed field.
pub fn check_signed_width(value: i32, max: u32) -> Result<(), EncodingError> {
    if signed_width(value) > max {
        return Err(EncodingError::SignedOutOfRange {
            value: value,
            width: max,
        });
    }
    Ok(())
}

pub const FILL_STYLE_SOLID: u8 = 0x00;
/// Style count marker announcing a 16-bit count (DefineShape2 and later).
pub const STYLE_COUNT_EXTENDED: u8 = 0xff;

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Warning {
    NonZeroPadding,
    ExcessData,
    InvertedBounds,
    LeadingEdge,
}

impl From<libswf_bits::Warning> for Warning {
    fn from(w: libswf_bits::Warning) -> Warning {
        match w {
            libswf_bits::Warning::NonZeroPadding => Warning::NonZeroPadding,
        }
    }
}

/// Handle of a defined character, referenced when placing it.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Identifier(pub u16);

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
    pub const RED: Color = Color::rgb(0xff, 0x00, 0x00);
    pub const GREEN: Color = Color::rgb(0x00, 0xff, 0x00);
    pub const BLUE: Color = Color::rgb(0x00, 0x00, 0xff);
    pub const YELLOW: Color = Color::rgb(0xff, 0xff, 0x00);
    pub const GRAY: Color = Color::rgb(0x80, 0x80, 0x80);
    pub const LIGHTBLUE: Color = Color::rgb(0xad, 0xd8, 0xe6);

    pub const fn rgb(red: u8, green: u8, blue: u8) -> Color {
        Color::rgba(red, green, blue, 0xff)
    }
    pub const fn rgba(red: u8, green: u8, blue: u8, alpha: u8) -> Color {
        Color {
            red: red,
            green: green,
            blue: blue,
            alpha: alpha,
        }
    }
    pub fn is_opaque(self) -> bool {
        self.alpha == 0xff
    }
    pub fn write_rgb(self, w: &mut BitWriter) {
        w.write_bytes(&[self.red, self.green, self.blue]);
    }
    pub fn write_rgba(self, w: &mut BitWriter) {
        w.write_bytes(&[self.red, self.green, self.blue, self.alpha]);
    }
    pub fn read_rgb(r: &mut BitReader) -> Result<Color, UnexpectedEnd> {
        let b = r.read_bytes(3)?;
        Ok(Color::rgb(b[0], b[1], b[2]))
    }
    pub fn read_rgba(r: &mut BitReader) -> Result<Color, UnexpectedEnd> {
        let b = r.read_bytes(4)?;
        Ok(Color::rgba(b[0], b[1], b[2], b[3]))
    }
}

/// Rectangle in twips.
///
/// Encoded as `Nbits UB[5]`, then `x_min`, `x_max`, `y_min`, `y_max` as
/// `SB[Nbits]`, padded to a byte boundary.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Bounds {
    pub x_min: i32,
    pub y_min: i32,
    pub x_max: i32,
    pub y_max: i32,
}

impl Bounds {
    pub fn new(x_min: i32, y_min: i32, x_max: i32, y_max: i32) -> Bounds {
        assert!(x_min <= x_max, "x_min={} > x_max={}", x_min, x_max);
        assert!(y_min <= y_max, "y_min={} > y_max={}", y_min, y_max);
        Bounds {
            x_min: x_min,
            y_min: y_min,
            x_max: x_max,
            y_max: y_max,
        }
    }
    pub fn point(x: i32, y: i32) -> Bounds {
        Bounds::new(x, y, x, y)
    }
    pub fn width(&self) -> i64 {
        i64::from(self.x_max) - i64::from(self.x_min)
    }
    pub fn height(&self) -> i64 {
        i64::from(self.y_max) - i64::from(self.y_min)
    }
    /// Grows the rectangle to contain the point.
    pub fn include(&mut self, x: i32, y: i32) {
        self.x_min = self.x_min.min(x);
        self.y_min = self.y_min.min(y);
        self.x_max = self.x_max.max(x);
        self.y_max = self.y_max.max(y);
    }
    pub fn is_valid(&self) -> bool {
        self.x_min <= self.x_max && self.y_min <= self.y_max
    }
    fn field_width(&self) -> u32 {
        [self.x_min, self.x_max, self.y_min, self.y_max]
            .iter()
            .map(|&c| signed_width(c))
            .max()
            .unwrap_or(0)
    }
    pub fn write(&self, w: &mut BitWriter) -> Result<(), EncodingError> {
        for &c in &[self.x_min, self.x_max, self.y_min, self.y_max] {
            check_signed_width(c, MAX_RECT_BITS)?;
        }
        let width = self.field_width();
        w.write_unsigned_bits(width, 5)?;
        w.write_signed_bits(self.x_min, width)?;
        w.write_signed_bits(self.x_max, width)?;
        w.write_signed_bits(self.y_min, width)?;
        w.write_signed_bits(self.y_max, width)?;
        w.align_to_byte();
        Ok(())
    }
    pub fn read<W: Warn<Warning>>(
        r: &mut BitReader,
        warn: &mut W,
    ) -> Result<Bounds, UnexpectedEnd> {
        let width = r.read_unsigned_bits(5)?;
        let x_min = r.read_signed_bits(width)?;
        let x_max = r.read_signed_bits(width)?;
        let y_min = r.read_signed_bits(width)?;
        let y_max = r.read_signed_bits(width)?;
        r.align_to_byte(wrap(warn));
        let result = Bounds {
            x_min: x_min,
            y_min: y_min,
            x_max: x_max,
            y_max: y_max,
        };
        if !result.is_valid() {
            warn.warn(Warning::InvertedBounds);
        }
        Ok(result)
    }
}
