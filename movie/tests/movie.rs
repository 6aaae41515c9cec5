use libswf_movie::Movie;
use libswf_movie::PlaceObject;
use libswf_movie::Reader;
use libswf_movie::Tag;
use libswf_movie::WriteError;
use libswf_shape::Bounds;
use libswf_shape::Color;
use libswf_shape::DefineShape;
use libswf_shape::FillStyle;
use libswf_shape::LineStyle;
use libswf_shape::ShapeBuilder;
use libswf_shape::ShapeRecord;
use libswf_shape::StyleTable;
use std::collections::HashSet;
use std::fs;
use warn::Panic;

fn rectangle(movie: &mut Movie) -> DefineShape {
    let id = movie.new_identifier().unwrap();
    let mut styles = StyleTable::new();
    let line = styles.add_line_style(LineStyle::new(20, Color::BLACK));
    let fill = styles.add_fill_style(FillStyle::Solid(Color::RED));
    let mut shape = ShapeBuilder::new();
    shape.add_style_change(line, fill, Some((-300, -300)));
    shape.add_line(540, 0).unwrap();
    shape.add_line(0, 540).unwrap();
    shape.add_line(-540, 0).unwrap();
    shape.add_line(0, -540).unwrap();
    DefineShape::new(id, Bounds::new(-300, -300, 300, 300), styles, shape.finish())
}

#[test]
fn single_frame() {
    let mut movie = Movie::new();
    movie.set_frame_size(Bounds::new(-300, -300, 300, 300));
    movie.set_frame_rate(12.0);
    movie.add(Tag::ShowFrame);
    let data = movie.serialize().unwrap();

    assert_eq!(&data[..4], b"FWS\x06");
    let length = u32::from_le_bytes([data[4], data[5], data[6], data[7]]);
    assert_eq!(length as usize, data.len());

    let mut reader = Reader::new(&data[..], &mut Panic).unwrap();
    assert_eq!(reader.frame_count(), 1);
    assert_eq!(reader.frame_rate(), 12.0);
    assert_eq!(reader.frame_size(), Bounds::new(-300, -300, 300, 300));
    assert_eq!(reader.read_tags(&mut Panic).unwrap(), [Tag::ShowFrame, Tag::End]);
}

#[test]
fn rectangle_closes() {
    let mut movie = Movie::new();
    let define = rectangle(&mut movie);
    let id = define.id;
    movie.add(Tag::DefineShape(define.clone()));
    movie.add(Tag::PlaceObject(PlaceObject::new(id, 1, 0, 0)));
    movie.add(Tag::ShowFrame);
    let data = movie.serialize().unwrap();

    let mut reader = Reader::new(&data[..], &mut Panic).unwrap();
    let tags = reader.read_tags(&mut Panic).unwrap();
    let decoded = match &tags[0] {
        Tag::DefineShape(d) => d,
        other => panic!("unexpected tag {:?}", other),
    };
    assert_eq!(*decoded, define);
    assert_eq!(tags[1], Tag::PlaceObject(PlaceObject::new(id, 1, 0, 0)));

    // Replay the decoded edges from the starting move.
    let mut corners = vec![];
    let mut pos = (0, 0);
    for record in decoded.shape.records() {
        match *record {
            ShapeRecord::StyleChange(change) => {
                if let Some(to) = change.move_to {
                    pos = to;
                }
                corners.push(pos);
            }
            ShapeRecord::Line { dx, dy } => {
                pos = (pos.0 + dx, pos.1 + dy);
                corners.push(pos);
            }
            ShapeRecord::Curve { .. } => panic!("unexpected curve"),
        }
    }
    assert_eq!(
        corners,
        [(-300, -300), (240, -300), (240, 240), (-300, 240), (-300, -300)]
    );
}

#[test]
fn identifiers_unique_per_movie() {
    let mut first = Movie::new();
    let mut second = Movie::new();
    let mut seen = HashSet::new();
    for _ in 0..1000 {
        assert!(seen.insert(first.new_identifier().unwrap()));
    }
    assert!(seen.contains(&second.new_identifier().unwrap()));
}

#[test]
fn unwritable_destination() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("movie.swf");
    let mut movie = Movie::new();
    movie.add(Tag::ShowFrame);
    assert!(matches!(movie.write_to_path(&path), Err(WriteError::Io(_))));
    assert!(!path.exists());
    assert!(!dir.path().join("missing").exists());
}

#[test]
fn failed_serialization_leaves_no_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("movie.swf");
    let mut movie = Movie::new();
    movie.set_frame_rate(f32::NAN);
    assert!(matches!(movie.write_to_path(&path), Err(WriteError::FrameRate(_))));
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn write_and_read_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("movie.swf");
    let mut movie = Movie::new();
    movie.set_frame_size(Bounds::new(-4000, -4000, 4000, 4000));
    movie.set_frame_rate(1.0);
    movie.set_background_color(Color::LIGHTBLUE).unwrap();
    let define = rectangle(&mut movie);
    let id = define.id;
    movie.add(Tag::DefineShape(define));
    movie.add(Tag::PlaceObject(PlaceObject::new(id, 1, 0, 0)));
    movie.add(Tag::ShowFrame);
    movie.write_to_path(&path).unwrap();

    let data = fs::read(&path).unwrap();
    assert_eq!(data, movie.serialize().unwrap());
    // Only the movie itself, no temporary file left behind.
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);

    let mut reader = Reader::open(&path, &mut Panic).unwrap();
    let tags = reader.read_tags(&mut Panic).unwrap();
    assert_eq!(tags.len(), 5);
    assert_eq!(tags[0], Tag::SetBackgroundColor(Color::LIGHTBLUE));
    assert_eq!(tags[4], Tag::End);
}

#[test]
fn overwrite_existing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("movie.swf");
    fs::write(&path, b"old").unwrap();
    let movie = Movie::new();
    movie.write_to_path(&path).unwrap();
    assert_eq!(fs::read(&path).unwrap(), movie.serialize().unwrap());
}
