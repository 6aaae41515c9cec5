#[macro_use]
extern crate log;

use clap::App;
use clap::Arg;
use hexdump::hexdump;
use libswf_movie::Reader;
use libswf_movie::Tag;
use libswf_tools::warn_stdout::Stdout;
use std::error::Error;
use std::process;

fn describe(tag: &Tag) -> String {
    match tag {
        Tag::DefineShape(d) => format!(
            "DefineShape id={} version={:?} bounds={:?} fill_styles={} line_styles={} records={}",
            d.id,
            d.version(),
            d.bounds,
            d.styles.fill_styles().len(),
            d.styles.line_styles().len(),
            d.shape.records().len(),
        ),
        Tag::PlaceObject(p) => format!(
            "PlaceObject id={} depth={} x={} y={}",
            p.id, p.depth, p.x, p.y
        ),
        Tag::SetBackgroundColor(c) => format!(
            "SetBackgroundColor #{:02x}{:02x}{:02x}",
            c.red, c.green, c.blue
        ),
        Tag::ShowFrame => "ShowFrame".to_owned(),
        Tag::End => "End".to_owned(),
        Tag::Unknown { code, data } => format!("Unknown code={} length={}", code, data.len()),
    }
}

fn info(path: &str, dump: bool) -> Result<(), Box<dyn Error>> {
    let mut warn = Stdout::new();
    let mut reader = Reader::open(path, &mut warn)?;
    println!("version: {}", reader.version());
    println!("file length: {}", reader.file_length());
    println!("frame size: {:?}", reader.frame_size());
    println!("frame rate: {}", reader.frame_rate());
    println!("frame count: {}", reader.frame_count());
    while let Some(tag) = reader.read_tag(&mut warn)? {
        println!("{}", describe(&tag));
        if dump {
            hexdump(&tag.payload()?);
        }
    }
    if warn.count() != 0 {
        println!("{} warnings", warn.count());
    }
    Ok(())
}

fn main() {
    libswf_logger::init();
    let matches = App::new("SWF info")
        .about("Prints the header and tags of an uncompressed SWF movie")
        .arg(
            Arg::with_name("FILE")
                .help("Sets the movie to read")
                .required(true),
        )
        .arg(
            Arg::with_name("HEXDUMP")
                .long("hexdump")
                .help("Dumps the payload of every tag"),
        )
        .get_matches();

    let path = matches.value_of("FILE").unwrap();
    if let Err(err) = info(path, matches.is_present("HEXDUMP")) {
        error!("{}: {}", path, err);
        process::exit(-1);
    }
}
