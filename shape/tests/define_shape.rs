use libswf_shape::Bounds;
use libswf_shape::Color;
use libswf_shape::DefineShape;
use libswf_shape::Error;
use libswf_shape::FillStyle;
use libswf_shape::Identifier;
use libswf_shape::LineStyle;
use libswf_shape::ShapeBuilder;
use libswf_shape::ShapeRecord;
use libswf_shape::ShapeVersion;
use libswf_shape::StyleChange;
use libswf_shape::StyleRef;
use libswf_shape::StyleTable;
use libswf_shape::Warning;
use warn::Panic;

fn circle_ish() -> DefineShape {
    let mut styles = StyleTable::new();
    let line = styles.add_line_style(LineStyle::new(40, Color::BLUE));
    let fill = styles.add_fill_style(FillStyle::Solid(Color::YELLOW));
    let mut b = ShapeBuilder::new();
    b.add_style_change(line, fill, Some((0, -1000)));
    b.add_curve(1000, 0, 0, 1000).unwrap();
    b.add_curve(0, 1000, -1000, 0).unwrap();
    b.add_curve(-1000, 0, 0, -1000).unwrap();
    b.add_curve(0, -1000, 1000, 0).unwrap();
    let shape = b.finish();
    let bounds = shape.extent().unwrap();
    DefineShape::new(Identifier(3), bounds, styles, shape)
}

#[test]
fn curves_roundtrip() {
    let define = circle_ish();
    assert_eq!(define.bounds, Bounds::new(-1000, -1000, 1000, 1000));
    assert_eq!(define.shape.positions().last(), Some(&(0, -1000)));
    let payload = define.payload().unwrap();
    let read = DefineShape::read(ShapeVersion::V1, &payload, &mut Panic).unwrap();
    assert_eq!(read, define);
}

#[test]
fn alternate_fill() {
    let mut styles = StyleTable::new();
    let red = styles.add_fill_style(FillStyle::Solid(Color::RED));
    let green = styles.add_fill_style(FillStyle::Solid(Color::rgba(0, 255, 0, 128)));
    let mut b = ShapeBuilder::new();
    b.add_style_change_record(
        StyleChange::new()
            .with_fill0(red)
            .with_fill1(green)
            .with_move_to(-10, -10),
    );
    b.add_line(20, 20).unwrap();
    assert_eq!(b.fill_styles(), (red, green));
    assert_eq!(b.line_style(), StyleRef::NoStyle);
    let define = DefineShape::new(Identifier(1), Bounds::new(-10, -10, 10, 10), styles, b.finish());
    assert_eq!(define.version(), ShapeVersion::V3);
    let payload = define.payload().unwrap();
    let read = DefineShape::read(ShapeVersion::V3, &payload, &mut Panic).unwrap();
    assert_eq!(read.styles.fill_style(green), Some(&FillStyle::Solid(Color::rgba(0, 255, 0, 128))));
    assert_eq!(read.shape.records(), define.shape.records());
}

#[test]
fn unknown_fill() {
    let mut b = ShapeBuilder::new();
    b.add_style_change_record(StyleChange::new().with_fill1(StyleRef::from_index(1)));
    let define = DefineShape::new(Identifier(1), Bounds::default(), StyleTable::new(), b.finish());
    assert!(matches!(define.payload(), Err(Error::UnknownStyle { index: 1, .. })));
}

#[test]
fn leading_edge_warns() {
    // Id 1, empty rect, no styles, zero index widths, then a horizontal
    // line of width 2 (11 0000 0 0 00) and the end marker.
    let data = [
        0x01, 0x00, 0x08, 0x00, 0x00, 0x00, 0x00, 0b1100_0000, 0b0000_0000,
    ];
    let mut warnings = vec![];
    let read = DefineShape::read(ShapeVersion::V1, &data, &mut warnings).unwrap();
    assert_eq!(read.shape.records(), [ShapeRecord::Line { dx: 0, dy: 0 }]);
    assert_eq!(warnings, [Warning::LeadingEdge]);
}

#[test]
fn empty_shape() {
    let define = DefineShape::new(
        Identifier(9),
        Bounds::default(),
        StyleTable::new(),
        ShapeBuilder::new().finish(),
    );
    assert_eq!(
        define.payload().unwrap(),
        [0x09, 0x00, 0x08, 0x00, 0x00, 0x00, 0x00, 0x00]
    );
}

#[test]
fn empty_style_change_is_not_a_start() {
    let mut b = ShapeBuilder::new();
    b.add_style_change_record(StyleChange::new());
    assert_eq!(b.add_line(10, 0), Err(Error::Sequencing));
    b.move_to(0, 0);
    b.add_line(10, 0).unwrap();
    let define = DefineShape::new(Identifier(1), Bounds::new(0, 0, 10, 0), StyleTable::new(), b.finish());
    let payload = define.payload().unwrap();
    // Panics on a leading edge warning.
    let read = DefineShape::read(ShapeVersion::V1, &payload, &mut Panic).unwrap();
    assert_eq!(read, define);
}
