//! Small demonstration movies.

use libswf_movie::Movie;
use libswf_movie::PlaceObject;
use libswf_movie::Tag;
use libswf_shape::Bounds;
use libswf_shape::Color;
use libswf_shape::DefineShape;
use libswf_shape::FillStyle;
use libswf_shape::LineStyle;
use libswf_shape::ShapeBuilder;
use libswf_shape::StyleChange;
use libswf_shape::StyleRef;
use libswf_shape::StyleTable;
use std::error::Error;

pub struct Sample {
    pub name: &'static str,
    pub build: fn() -> Result<Movie, Box<dyn Error>>,
}

impl Sample {
    pub fn file_name(&self) -> String {
        format!("{}.swf", self.name)
    }
}

pub const SAMPLES: &[Sample] = &[
    Sample {
        name: "MovieBasics",
        build: movie_basics,
    },
    Sample {
        name: "LineStyles",
        build: line_styles,
    },
];

pub fn find(name: &str) -> Option<&'static Sample> {
    SAMPLES.iter().find(|s| s.name == name)
}

/// Selects all three styles at once.
fn select(line: StyleRef, fill: StyleRef, alt_fill: StyleRef) -> StyleChange {
    StyleChange::new()
        .with_line(line)
        .with_fill0(fill)
        .with_fill1(alt_fill)
}

/// A red square with a black outline, centered on a light blue stage.
pub fn movie_basics() -> Result<Movie, Box<dyn Error>> {
    let mut movie = Movie::new();
    // Coordinates range from -4000 to 4000 twips, (0, 0) is the center.
    movie.set_frame_size(Bounds::new(-4000, -4000, 4000, 4000));
    movie.set_frame_rate(1.0);
    movie.set_background_color(Color::LIGHTBLUE)?;

    let id = movie.new_identifier()?;
    let width = 4000;
    let height = 4000;

    let mut styles = StyleTable::new();
    let line = styles.add_line_style(LineStyle::new(20, Color::BLACK));
    let fill = styles.add_fill_style(FillStyle::Solid(Color::RED));

    let mut shape = ShapeBuilder::new();
    shape.add_style_change(line, fill, Some((-width / 2, -height / 2)));
    shape.add_line(width, 0)?;
    shape.add_line(0, height)?;
    shape.add_line(-width, 0)?;
    shape.add_line(0, -height)?;

    let bounds = Bounds::new(-2000, -2000, 2000, 2000);
    movie.add(Tag::DefineShape(DefineShape::new(
        id,
        bounds,
        styles,
        shape.finish(),
    )));
    movie.add(Tag::PlaceObject(PlaceObject::new(id, 1, 0, 0)));
    movie.add(Tag::ShowFrame);
    Ok(movie)
}

/// Line ends and joins, drawn once with a line style and once with thin
/// filled rectangles.
pub fn line_styles() -> Result<Movie, Box<dyn Error>> {
    let mut movie = Movie::new();
    let id = movie.new_identifier()?;
    let bounds = Bounds::new(-300, -300, 300, 300);

    let mut styles = StyleTable::new();
    // 20 twips are one pixel.
    let thick = styles.add_line_style(LineStyle::new(20, Color::BLACK));
    let thin = styles.add_line_style(LineStyle::new(1, Color::BLACK));
    let black = styles.add_fill_style(FillStyle::Solid(Color::BLACK));
    let none = StyleRef::NoStyle;

    let mut shape = ShapeBuilder::new();

    // A single line, then the same line as a rectangle.
    shape.add_style_change_record(select(thick, none, none).with_move_to(-300, -300));
    shape.add_line(540, 0)?;
    shape.add_style_change_record(select(thin, black, none).with_move_to(-300, -260));
    shape.add_line(540, 0)?;
    shape.add_line(0, 20)?;
    shape.add_line(-540, 0)?;
    shape.add_line(0, -20)?;

    // Dashed line, the gaps are drawn without a line style.
    shape.move_to(-300, -100);
    for _ in 0..5 {
        shape.add_style_change_record(select(thick, none, none));
        shape.add_line(60, 0)?;
        shape.add_style_change_record(select(none, none, none));
        shape.add_line(60, 0)?;
    }

    // Dashed line made of small rectangles.
    shape.move_to(-300, -60);
    for _ in 0..5 {
        shape.add_style_change_record(select(thin, black, none));
        shape.add_line(60, 0)?;
        shape.add_line(0, 20)?;
        shape.add_line(-60, 0)?;
        shape.add_line(0, -20)?;
        shape.add_style_change_record(select(none, none, none));
        shape.add_line(120, 0)?;
    }

    // Rounded join.
    shape.add_style_change_record(select(thick, none, none).with_move_to(-300, 240));
    shape.add_line(0, -140)?;
    shape.add_line(540, 0)?;

    // Mitred join.
    shape.add_style_change_record(select(thin, black, none).with_move_to(-260, 240));
    shape.add_line(0, -100)?;
    shape.add_line(20, 0)?;
    shape.add_line(0, 100)?;
    shape.add_line(-20, 0)?;
    shape.move_to(-240, 140);
    shape.add_line(480, 0)?;
    shape.add_line(0, 20)?;
    shape.add_line(-480, 0)?;
    shape.add_line(0, -20)?;

    // Bevelled join.
    shape.add_style_change_record(select(thin, black, none).with_move_to(-200, 240));
    shape.add_line(0, -30)?;
    shape.add_line(10, -10)?;
    shape.add_line(10, 0)?;
    shape.add_line(0, 40)?;
    shape.add_line(-20, 0)?;
    shape.move_to(-180, 200);
    shape.add_line(420, 0)?;
    shape.add_line(0, 20)?;
    shape.add_line(-420, 0)?;
    shape.add_line(0, -20)?;

    movie.set_frame_size(Bounds::new(-400, -400, 400, 400));
    movie.set_frame_rate(1.0);
    movie.set_background_color(Color::LIGHTBLUE)?;
    movie.add(Tag::DefineShape(DefineShape::new(
        id,
        bounds,
        styles,
        shape.finish(),
    )));
    movie.add(Tag::PlaceObject(PlaceObject::new(id, 1, 0, 0)));
    movie.add(Tag::ShowFrame);
    Ok(movie)
}
