use libswf_bits::signed_width;
use libswf_bits::BitReader;
use libswf_bits::BitWriter;
use libswf_bits::EncodingError;
use warn::wrap;
use warn::Warn;

use crate::format::check_signed_width;
use crate::format::Bounds;
use crate::format::Warning;
use crate::format::MAX_EDGE_BITS;
use crate::format::MAX_MOVE_BITS;
use crate::format::MIN_EDGE_BITS;
use crate::record::ShapeRecord;
use crate::record::StyleChange;
use crate::record::Widths;
use crate::style::StyleRef;
use crate::Error;

/// Outline of one shape: style changes and edges, in drawing order.
///
/// All edges of a shape share one field width, as do all moves. Both are the
/// smallest widths that fit every record (see `Shape::edge_bits`).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Shape {
    records: Vec<ShapeRecord>,
    edge_bits: u32,
    move_bits: u32,
}

impl Default for Shape {
    fn default() -> Shape {
        Shape::from_records_unchecked(Vec::new())
    }
}

impl Shape {
    fn from_records_unchecked(records: Vec<ShapeRecord>) -> Shape {
        let mut edge_bits = MIN_EDGE_BITS;
        let mut move_bits = 1;
        for record in &records {
            match *record {
                ShapeRecord::StyleChange(StyleChange {
                    move_to: Some((x, y)),
                    ..
                }) => {
                    move_bits = move_bits.max(signed_width(x)).max(signed_width(y));
                }
                ShapeRecord::StyleChange(_) => {}
                ShapeRecord::Line { dx, dy } => {
                    edge_bits = edge_bits.max(signed_width(dx)).max(signed_width(dy));
                }
                ShapeRecord::Curve {
                    control_dx,
                    control_dy,
                    anchor_dx,
                    anchor_dy,
                } => {
                    for d in [control_dx, control_dy, anchor_dx, anchor_dy] {
                        edge_bits = edge_bits.max(signed_width(d));
                    }
                }
            }
        }
        Shape {
            records: records,
            edge_bits: edge_bits,
            move_bits: move_bits,
        }
    }
    /// Builds a shape from already assembled records.
    ///
    /// Fails with `Error::Sequencing` if an edge comes before the first
    /// non-empty style change. Empty style changes are not encoded, so they
    /// don't count.
    pub fn from_records(records: Vec<ShapeRecord>) -> Result<Shape, Error> {
        let first = records.iter().find(|r| match r {
            ShapeRecord::StyleChange(change) => !change.is_empty(),
            _ => true,
        });
        if let Some(ShapeRecord::Line { .. }) | Some(ShapeRecord::Curve { .. }) = first {
            return Err(Error::Sequencing);
        }
        Ok(Shape::from_records_unchecked(records))
    }
    pub fn records(&self) -> &[ShapeRecord] {
        &self.records
    }
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
    /// Width of every edge delta field.
    ///
    /// The smallest two's complement width holding every delta of every
    /// edge, but at least 2. A delta of `2^(n-1)` needs `n + 1` bits while
    /// `-2^(n-1)` fits into `n`.
    pub fn edge_bits(&self) -> u32 {
        self.edge_bits
    }
    /// Width of every move coordinate field, chosen like `edge_bits` with a
    /// minimum of 1.
    pub fn move_bits(&self) -> u32 {
        self.move_bits
    }
    /// Pen position after each record, starting from the origin.
    pub fn positions(&self) -> Vec<(i32, i32)> {
        let mut x = 0i32;
        let mut y = 0i32;
        let mut result = Vec::with_capacity(self.records.len());
        for record in &self.records {
            match *record {
                ShapeRecord::StyleChange(change) => {
                    if let Some((mx, my)) = change.move_to {
                        x = mx;
                        y = my;
                    }
                }
                ShapeRecord::Line { dx, dy } => {
                    x = x.wrapping_add(dx);
                    y = y.wrapping_add(dy);
                }
                ShapeRecord::Curve {
                    control_dx,
                    control_dy,
                    anchor_dx,
                    anchor_dy,
                } => {
                    x = x.wrapping_add(control_dx).wrapping_add(anchor_dx);
                    y = y.wrapping_add(control_dy).wrapping_add(anchor_dy);
                }
            }
            result.push((x, y));
        }
        result
    }
    /// Bounding box of everything the edges touch, control points included.
    ///
    /// `None` if the shape has no edges. Line widths are not accounted for.
    pub fn extent(&self) -> Option<Bounds> {
        let mut result: Option<Bounds> = None;
        let mut include = |x: i32, y: i32| match result {
            Some(ref mut b) => b.include(x, y),
            None => result = Some(Bounds::point(x, y)),
        };
        let mut pos = (0, 0);
        for (record, &next) in self.records.iter().zip(self.positions().iter()) {
            match *record {
                ShapeRecord::StyleChange(_) => {}
                ShapeRecord::Line { .. } => {
                    include(pos.0, pos.1);
                    include(next.0, next.1);
                }
                ShapeRecord::Curve {
                    control_dx,
                    control_dy,
                    ..
                } => {
                    include(pos.0, pos.1);
                    include(pos.0.wrapping_add(control_dx), pos.1.wrapping_add(control_dy));
                    include(next.0, next.1);
                }
            }
            pos = next;
        }
        result
    }

    /// Writes the records followed by the end-of-shape marker, padded to a
    /// byte boundary.
    pub(crate) fn write(
        &self,
        w: &mut BitWriter,
        fill_bits: u32,
        line_bits: u32,
    ) -> Result<(), EncodingError> {
        let widths = Widths {
            fill: fill_bits,
            line: line_bits,
            edge: self.edge_bits,
            moves: self.move_bits,
        };
        if self.move_bits > MAX_MOVE_BITS {
            for record in &self.records {
                if let ShapeRecord::StyleChange(StyleChange {
                    move_to: Some((x, y)),
                    ..
                }) = *record
                {
                    check_signed_width(x, MAX_MOVE_BITS)?;
                    check_signed_width(y, MAX_MOVE_BITS)?;
                }
            }
        }
        for record in &self.records {
            if let ShapeRecord::StyleChange(change) = record {
                if change.is_empty() {
                    debug!("skipping empty style change record");
                    continue;
                }
            }
            record.write(w, &widths)?;
        }
        ShapeRecord::write_end(w);
        w.align_to_byte();
        Ok(())
    }
    pub(crate) fn read<W: Warn<Warning>>(
        r: &mut BitReader,
        fill_bits: u32,
        line_bits: u32,
        warn: &mut W,
    ) -> Result<Shape, Error> {
        let widths = Widths {
            fill: fill_bits,
            line: line_bits,
            edge: 0,
            moves: 0,
        };
        let mut records = Vec::new();
        while let Some(record) = ShapeRecord::read(r, &widths)? {
            records.push(record);
        }
        r.align_to_byte(wrap(warn));
        if let Some(ShapeRecord::Line { .. }) | Some(ShapeRecord::Curve { .. }) = records.first() {
            warn.warn(Warning::LeadingEdge);
        }
        Ok(Shape::from_records_unchecked(records))
    }
}

/// Accumulates the records of one shape.
///
/// Tracks the pen position and the selected styles. Edges are only accepted
/// after a first style change.
#[derive(Clone, Debug, Default)]
pub struct ShapeBuilder {
    records: Vec<ShapeRecord>,
    position: (i32, i32),
    line: StyleRef,
    fill0: StyleRef,
    fill1: StyleRef,
    started: bool,
}

fn check_edge_delta(d: i32) -> Result<(), Error> {
    Ok(check_signed_width(d, MAX_EDGE_BITS)?)
}

impl ShapeBuilder {
    pub fn new() -> ShapeBuilder {
        ShapeBuilder::default()
    }
    /// Selects the line style and fill style 0, optionally moving the pen to
    /// an absolute position.
    pub fn add_style_change(&mut self, line: StyleRef, fill: StyleRef, move_to: Option<(i32, i32)>) {
        let mut change = StyleChange::new().with_line(line).with_fill0(fill);
        change.move_to = move_to;
        self.add_style_change_record(change);
    }
    /// Moves the pen to an absolute position, keeping the selected styles.
    pub fn move_to(&mut self, x: i32, y: i32) {
        self.add_style_change_record(StyleChange::new().with_move_to(x, y));
    }
    /// Appends a style change.
    ///
    /// A change that neither selects a style nor moves the pen is dropped.
    /// It would read back as the end-of-shape marker, and it does not allow
    /// edges to follow.
    pub fn add_style_change_record(&mut self, change: StyleChange) {
        if change.is_empty() {
            debug!("dropping empty style change record");
            return;
        }
        if let Some(pos) = change.move_to {
            self.position = pos;
        }
        if let Some(line) = change.line {
            self.line = line;
        }
        if let Some(fill0) = change.fill0 {
            self.fill0 = fill0;
        }
        if let Some(fill1) = change.fill1 {
            self.fill1 = fill1;
        }
        self.started = true;
        self.records.push(ShapeRecord::StyleChange(change));
    }
    pub fn add_line(&mut self, dx: i32, dy: i32) -> Result<(), Error> {
        if !self.started {
            return Err(Error::Sequencing);
        }
        check_edge_delta(dx)?;
        check_edge_delta(dy)?;
        self.position.0 = self.position.0.wrapping_add(dx);
        self.position.1 = self.position.1.wrapping_add(dy);
        self.records.push(ShapeRecord::Line { dx: dx, dy: dy });
        Ok(())
    }
    pub fn add_curve(
        &mut self,
        control_dx: i32,
        control_dy: i32,
        anchor_dx: i32,
        anchor_dy: i32,
    ) -> Result<(), Error> {
        if !self.started {
            return Err(Error::Sequencing);
        }
        for d in [control_dx, control_dy, anchor_dx, anchor_dy] {
            check_edge_delta(d)?;
        }
        self.position.0 = self.position.0.wrapping_add(control_dx).wrapping_add(anchor_dx);
        self.position.1 = self.position.1.wrapping_add(control_dy).wrapping_add(anchor_dy);
        self.records.push(ShapeRecord::Curve {
            control_dx: control_dx,
            control_dy: control_dy,
            anchor_dx: anchor_dx,
            anchor_dy: anchor_dy,
        });
        Ok(())
    }
    pub fn position(&self) -> (i32, i32) {
        self.position
    }
    pub fn line_style(&self) -> StyleRef {
        self.line
    }
    pub fn fill_styles(&self) -> (StyleRef, StyleRef) {
        (self.fill0, self.fill1)
    }
    pub fn finish(self) -> Shape {
        Shape::from_records_unchecked(self.records)
    }
}

#[cfg(test)]
mod test {
    use super::Shape;
    use super::ShapeBuilder;
    use crate::format::Bounds;
    use crate::record::ShapeRecord;
    use crate::record::StyleChange;
    use crate::style::StyleRef;
    use crate::Error;
    use libswf_bits::BitReader;
    use libswf_bits::BitWriter;
    use libswf_bits::EncodingError;
    use quickcheck::TestResult;
    use warn::Panic;

    fn s(index: u16) -> StyleRef {
        StyleRef::from_index(index)
    }

    fn rectangle() -> Shape {
        let mut b = ShapeBuilder::new();
        b.add_style_change(s(1), s(1), Some((-300, -300)));
        b.add_line(540, 0).unwrap();
        b.add_line(0, 540).unwrap();
        b.add_line(-540, 0).unwrap();
        b.add_line(0, -540).unwrap();
        b.finish()
    }

    #[test]
    fn edge_before_style_change() {
        let mut b = ShapeBuilder::new();
        assert_eq!(b.add_line(10, 0), Err(Error::Sequencing));
        assert_eq!(b.add_curve(10, 0, 0, 10), Err(Error::Sequencing));
        assert!(b.finish().is_empty());
    }

    #[test]
    fn pure_move_starts_drawing() {
        let mut b = ShapeBuilder::new();
        b.move_to(-300, -100);
        b.add_line(60, 0).unwrap();
        assert_eq!(b.position(), (-240, -100));
    }

    #[test]
    fn pen_tracking() {
        let mut b = ShapeBuilder::new();
        b.add_style_change(s(2), s(1), Some((-300, -260)));
        assert_eq!(b.position(), (-300, -260));
        assert_eq!(b.line_style(), s(2));
        b.add_line(540, 0).unwrap();
        b.add_curve(10, 10, 10, -10).unwrap();
        assert_eq!(b.position(), (260, -260));
        // Style change without a move leaves the pen alone.
        b.add_style_change(StyleRef::NoStyle, StyleRef::NoStyle, None);
        assert_eq!(b.position(), (260, -260));
        assert_eq!(b.fill_styles(), (StyleRef::NoStyle, StyleRef::NoStyle));
    }

    #[test]
    fn widths() {
        let shape = rectangle();
        // 540 needs 11 bits, -300 needs 10.
        assert_eq!(shape.edge_bits(), 11);
        assert_eq!(shape.move_bits(), 10);
    }

    #[test]
    fn power_of_two_boundary() {
        let mut b = ShapeBuilder::new();
        b.move_to(0, 0);
        b.add_line(-64, 0).unwrap();
        assert_eq!(b.clone().finish().edge_bits(), 7);
        b.add_line(64, 0).unwrap();
        assert_eq!(b.finish().edge_bits(), 8);
    }

    #[test]
    fn minimum_widths() {
        let mut b = ShapeBuilder::new();
        b.move_to(0, 0);
        b.add_line(0, 0).unwrap();
        let shape = b.finish();
        assert_eq!(shape.edge_bits(), 2);
        assert_eq!(shape.move_bits(), 1);
    }

    #[test]
    fn delta_too_large() {
        let mut b = ShapeBuilder::new();
        b.move_to(0, 0);
        assert!(b.add_line(65535, 0).is_ok());
        assert!(matches!(b.add_line(65536, 0), Err(Error::Encoding(_))));
        assert!(matches!(b.add_curve(0, 0, -65537, 0), Err(Error::Encoding(_))));
    }

    #[test]
    fn rectangle_closes() {
        let shape = rectangle();
        assert_eq!(
            shape.positions(),
            [(-300, -300), (240, -300), (240, 240), (-300, 240), (-300, -300)]
        );
        assert_eq!(shape.extent(), Some(Bounds::new(-300, -300, 240, 240)));
    }

    #[test]
    fn extent_includes_control_points() {
        let mut b = ShapeBuilder::new();
        b.move_to(0, 0);
        b.add_curve(50, -100, 50, 100).unwrap();
        assert_eq!(b.finish().extent(), Some(Bounds::new(0, -100, 100, 0)));
    }

    #[test]
    fn extent_ignores_moves() {
        let mut b = ShapeBuilder::new();
        b.move_to(1000, 1000);
        b.move_to(0, 0);
        b.add_line(10, 10).unwrap();
        assert_eq!(b.finish().extent(), Some(Bounds::new(0, 0, 10, 10)));
        assert_eq!(Shape::default().extent(), None);
    }

    #[test]
    fn from_records() {
        assert_eq!(
            Shape::from_records(vec![ShapeRecord::Line { dx: 1, dy: 1 }]),
            Err(Error::Sequencing)
        );
        let shape = Shape::from_records(vec![
            ShapeRecord::StyleChange(StyleChange::new().with_move_to(5, 5)),
            ShapeRecord::Line { dx: 1, dy: 1 },
        ])
        .unwrap();
        assert_eq!(shape.positions(), [(5, 5), (6, 6)]);
    }

    fn encode(shape: &Shape) -> Vec<u8> {
        let mut w = BitWriter::new();
        shape.write(&mut w, 1, 1).unwrap();
        assert!(w.is_aligned());
        w.into_bytes()
    }

    #[test]
    fn roundtrip() {
        let shape = rectangle();
        let bytes = encode(&shape);
        let mut r = BitReader::new(&bytes);
        assert_eq!(Shape::read(&mut r, 1, 1, &mut Panic).unwrap(), shape);
        assert!(r.is_empty());
    }

    #[test]
    fn empty_style_change_does_not_start() {
        let mut b = ShapeBuilder::new();
        b.add_style_change_record(StyleChange::new());
        assert_eq!(b.add_line(10, 0), Err(Error::Sequencing));
        assert!(b.finish().is_empty());
    }

    #[test]
    fn empty_style_change_between_edges() {
        let mut b = ShapeBuilder::new();
        b.move_to(0, 0);
        b.add_line(10, 0).unwrap();
        b.add_style_change_record(StyleChange::new());
        b.add_line(0, 10).unwrap();
        let shape = b.finish();
        assert_eq!(shape.records().len(), 3);
        assert_eq!(shape.positions().last(), Some(&(10, 10)));
        let bytes = encode(&shape);
        let read = Shape::read(&mut BitReader::new(&bytes), 1, 1, &mut Panic).unwrap();
        assert_eq!(read, shape);
    }

    #[test]
    fn from_records_empty_first_change() {
        assert_eq!(
            Shape::from_records(vec![
                ShapeRecord::StyleChange(StyleChange::new()),
                ShapeRecord::Line { dx: 10, dy: 0 },
            ]),
            Err(Error::Sequencing)
        );
        let shape = Shape::from_records(vec![
            ShapeRecord::StyleChange(StyleChange::new()),
            ShapeRecord::StyleChange(StyleChange::new().with_line(s(1))),
            ShapeRecord::Line { dx: 10, dy: 0 },
        ])
        .unwrap();
        let bytes = encode(&shape);
        let read = Shape::read(&mut BitReader::new(&bytes), 1, 1, &mut Panic).unwrap();
        assert_eq!(read.records(), &shape.records()[1..]);
    }

    #[test]
    fn move_too_large() {
        let mut b = ShapeBuilder::new();
        b.move_to(i32::MIN, 0);
        let mut w = BitWriter::new();
        assert_eq!(
            b.finish().write(&mut w, 1, 1),
            Err(EncodingError::SignedOutOfRange {
                value: i32::MIN,
                width: 31,
            })
        );
    }

    #[test]
    fn empty_shape_is_end_marker() {
        assert_eq!(encode(&Shape::default()), [0]);
    }

    quickcheck! {
        fn closure(deltas: Vec<(i16, i16)>) -> TestResult {
            if deltas.is_empty() {
                return TestResult::discard();
            }
            let mut b = ShapeBuilder::new();
            b.add_style_change(s(1), s(1), Some((-300, -300)));
            let (mut sum_x, mut sum_y) = (0i32, 0i32);
            for &(dx, dy) in &deltas {
                b.add_line(dx.into(), dy.into()).unwrap();
                sum_x += i32::from(dx);
                sum_y += i32::from(dy);
            }
            if sum_x.abs() > 65535 || sum_y.abs() > 65535 {
                return TestResult::discard();
            }
            b.add_line(-sum_x, -sum_y).unwrap();
            let bytes = encode(&b.finish());
            let read = Shape::read(&mut BitReader::new(&bytes), 1, 1, &mut Panic).unwrap();
            TestResult::from_bool(read.positions().last() == Some(&(-300, -300)))
        }
    }
}
