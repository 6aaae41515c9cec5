use libswf_bits::unsigned_width;
use libswf_bits::BitReader;
use libswf_bits::BitWriter;
use std::fmt;
use std::num::NonZeroU16;

use crate::format::Color;
use crate::format::FILL_STYLE_SOLID;
use crate::Error;

/// Selection of an entry in a style table.
///
/// Encoded as the 1-based index of the entry, `0` for `NoStyle`.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum StyleRef {
    #[default]
    NoStyle,
    Style(NonZeroU16),
}

impl StyleRef {
    pub fn from_index(index: u16) -> StyleRef {
        match NonZeroU16::new(index) {
            Some(i) => StyleRef::Style(i),
            None => StyleRef::NoStyle,
        }
    }
    pub fn index(self) -> u16 {
        match self {
            StyleRef::NoStyle => 0,
            StyleRef::Style(i) => i.get(),
        }
    }
    pub fn is_none(self) -> bool {
        self == StyleRef::NoStyle
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum StyleKind {
    Fill,
    Line,
}

impl fmt::Display for StyleKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match *self {
            StyleKind::Fill => "fill",
            StyleKind::Line => "line",
        })
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct LineStyle {
    /// Line width in twips.
    pub width: u16,
    pub color: Color,
}

impl LineStyle {
    pub fn new(width: u16, color: Color) -> LineStyle {
        LineStyle {
            width: width,
            color: color,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum FillStyle {
    Solid(Color),
}

impl FillStyle {
    pub fn color(&self) -> Color {
        match *self {
            FillStyle::Solid(c) => c,
        }
    }
}

/// Fill and line styles of one shape.
///
/// Entries are append-only; `add_*` return the 1-based reference of the new
/// entry and never `StyleRef::NoStyle`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct StyleTable {
    fill_styles: Vec<FillStyle>,
    line_styles: Vec<LineStyle>,
}

fn next_ref(len: usize) -> StyleRef {
    let index = u16::try_from(len + 1).expect("more than 65535 styles in one table");
    StyleRef::from_index(index)
}

impl StyleTable {
    pub fn new() -> StyleTable {
        StyleTable::default()
    }
    pub fn add_fill_style(&mut self, style: FillStyle) -> StyleRef {
        let result = next_ref(self.fill_styles.len());
        self.fill_styles.push(style);
        result
    }
    pub fn add_line_style(&mut self, style: LineStyle) -> StyleRef {
        let result = next_ref(self.line_styles.len());
        self.line_styles.push(style);
        result
    }
    pub fn fill_styles(&self) -> &[FillStyle] {
        &self.fill_styles
    }
    pub fn line_styles(&self) -> &[LineStyle] {
        &self.line_styles
    }
    pub fn fill_style(&self, style: StyleRef) -> Option<&FillStyle> {
        match style {
            StyleRef::NoStyle => None,
            StyleRef::Style(i) => self.fill_styles.get(usize::from(i.get()) - 1),
        }
    }
    pub fn line_style(&self, style: StyleRef) -> Option<&LineStyle> {
        match style {
            StyleRef::NoStyle => None,
            StyleRef::Style(i) => self.line_styles.get(usize::from(i.get()) - 1),
        }
    }
    /// Checks that `style` is either `NoStyle` or an existing entry.
    pub fn check(&self, kind: StyleKind, style: StyleRef) -> Result<(), Error> {
        let len = match kind {
            StyleKind::Fill => self.fill_styles.len(),
            StyleKind::Line => self.line_styles.len(),
        };
        if usize::from(style.index()) > len {
            return Err(Error::UnknownStyle {
                kind: kind,
                index: style.index(),
            });
        }
        Ok(())
    }
    /// Width of the fill style index fields in shape records.
    pub fn fill_bits(&self) -> u32 {
        unsigned_width(self.fill_styles.len() as u32)
    }
    /// Width of the line style index fields in shape records.
    pub fn line_bits(&self) -> u32 {
        unsigned_width(self.line_styles.len() as u32)
    }
    pub fn has_alpha(&self) -> bool {
        self.fill_styles.iter().any(|s| !s.color().is_opaque())
            || self.line_styles.iter().any(|s| !s.color.is_opaque())
    }
    pub fn max_len(&self) -> usize {
        self.fill_styles.len().max(self.line_styles.len())
    }

    pub(crate) fn write(&self, w: &mut BitWriter, alpha: bool) {
        write_count(w, self.fill_styles.len());
        for style in &self.fill_styles {
            match *style {
                FillStyle::Solid(color) => {
                    w.write_u8(FILL_STYLE_SOLID);
                    write_color(w, color, alpha);
                }
            }
        }
        write_count(w, self.line_styles.len());
        for style in &self.line_styles {
            w.write_u16(style.width);
            write_color(w, style.color, alpha);
        }
    }
    pub(crate) fn read(r: &mut BitReader, extended: bool, alpha: bool) -> Result<StyleTable, Error> {
        let mut result = StyleTable::new();
        for _ in 0..read_count(r, extended)? {
            let kind = r.read_u8()?;
            if kind != FILL_STYLE_SOLID {
                return Err(Error::UnsupportedFillStyle(kind));
            }
            result.fill_styles.push(FillStyle::Solid(read_color(r, alpha)?));
        }
        for _ in 0..read_count(r, extended)? {
            let width = r.read_u16()?;
            let color = read_color(r, alpha)?;
            result.line_styles.push(LineStyle::new(width, color));
        }
        Ok(result)
    }
}

fn write_color(w: &mut BitWriter, color: Color, alpha: bool) {
    if alpha {
        color.write_rgba(w);
    } else {
        color.write_rgb(w);
    }
}

fn read_color(r: &mut BitReader, alpha: bool) -> Result<Color, Error> {
    Ok(if alpha {
        Color::read_rgba(r)?
    } else {
        Color::read_rgb(r)?
    })
}

fn write_count(w: &mut BitWriter, len: usize) {
    use crate::format::STYLE_COUNT_EXTENDED;

    if len < usize::from(STYLE_COUNT_EXTENDED) {
        w.write_u8(len as u8);
    } else {
        w.write_u8(STYLE_COUNT_EXTENDED);
        w.write_u16(len as u16);
    }
}

fn read_count(r: &mut BitReader, extended: bool) -> Result<u16, Error> {
    use crate::format::STYLE_COUNT_EXTENDED;

    let count = r.read_u8()?;
    if extended && count == STYLE_COUNT_EXTENDED {
        return Ok(r.read_u16()?);
    }
    Ok(u16::from(count))
}

#[cfg(test)]
mod test {
    use super::FillStyle;
    use super::LineStyle;
    use super::StyleKind;
    use super::StyleRef;
    use super::StyleTable;
    use crate::format::Color;
    use crate::Error;

    #[test]
    fn indices_start_at_one() {
        let mut table = StyleTable::new();
        let l1 = table.add_line_style(LineStyle::new(20, Color::BLACK));
        let l2 = table.add_line_style(LineStyle::new(1, Color::BLACK));
        let f1 = table.add_fill_style(FillStyle::Solid(Color::RED));
        assert_eq!(l1.index(), 1);
        assert_eq!(l2.index(), 2);
        assert_eq!(f1.index(), 1);
        assert_eq!(table.line_style(l2), Some(&LineStyle::new(1, Color::BLACK)));
        assert_eq!(table.fill_style(StyleRef::NoStyle), None);
    }

    #[test]
    fn style_ref_zero() {
        assert_eq!(StyleRef::from_index(0), StyleRef::NoStyle);
        assert_eq!(StyleRef::NoStyle.index(), 0);
        assert!(StyleRef::default().is_none());
        assert_eq!(StyleRef::from_index(7).index(), 7);
    }

    #[test]
    fn bits() {
        let mut table = StyleTable::new();
        assert_eq!(table.fill_bits(), 0);
        table.add_fill_style(FillStyle::Solid(Color::RED));
        assert_eq!(table.fill_bits(), 1);
        table.add_fill_style(FillStyle::Solid(Color::RED));
        assert_eq!(table.fill_bits(), 2);
        table.add_line_style(LineStyle::new(20, Color::BLACK));
        assert_eq!(table.line_bits(), 1);
    }

    #[test]
    fn check() {
        let mut table = StyleTable::new();
        table.add_line_style(LineStyle::new(20, Color::BLACK));
        assert_eq!(table.check(StyleKind::Line, StyleRef::from_index(1)), Ok(()));
        assert_eq!(table.check(StyleKind::Fill, StyleRef::NoStyle), Ok(()));
        assert_eq!(
            table.check(StyleKind::Fill, StyleRef::from_index(1)),
            Err(Error::UnknownStyle {
                kind: StyleKind::Fill,
                index: 1
            })
        );
    }

    quickcheck! {
        fn indices_increase(lines: Vec<bool>) -> bool {
            let mut table = StyleTable::new();
            let mut last_line = 0;
            let mut last_fill = 0;
            for add_line in lines {
                if add_line {
                    let i = table.add_line_style(LineStyle::new(1, Color::BLACK)).index();
                    if i != last_line + 1 {
                        return false;
                    }
                    last_line = i;
                } else {
                    let i = table.add_fill_style(FillStyle::Solid(Color::WHITE)).index();
                    if i != last_fill + 1 {
                        return false;
                    }
                    last_fill = i;
                }
            }
            true
        }
    }
}
