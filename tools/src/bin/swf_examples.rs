#[macro_use]
extern crate log;

use clap::App;
use clap::Arg;
use libswf_tools::samples;
use libswf_tools::samples::Sample;
use std::error::Error;
use std::fs;
use std::path::Path;
use std::process;

fn write_sample(sample: &Sample, result_dir: &Path) -> Result<(), Box<dyn Error>> {
    let movie = (sample.build)()?;
    movie.write_to_path(result_dir.join(sample.file_name()))?;
    Ok(())
}

fn main() {
    libswf_logger::init();
    let mut choices: Vec<&str> = samples::SAMPLES.iter().map(|s| s.name).collect();
    choices.push("all");
    let matches = App::new("SWF examples")
        .about("Writes the example movies")
        .arg(
            Arg::with_name("EXAMPLE")
                .long("example")
                .takes_value(true)
                .possible_values(&choices)
                .default_value("all")
                .help("Sets the example to write"),
        )
        .arg(
            Arg::with_name("RESULT_DIR")
                .long("result-dir")
                .takes_value(true)
                .default_value(".")
                .help("Sets the directory the movies are written to"),
        )
        .get_matches();

    let example = matches.value_of("EXAMPLE").unwrap();
    let result_dir = Path::new(matches.value_of("RESULT_DIR").unwrap());
    let selected: Vec<&Sample> = match samples::find(example) {
        Some(sample) => vec![sample],
        None => samples::SAMPLES.iter().collect(),
    };

    if let Err(err) = fs::create_dir_all(result_dir) {
        error!("{}: {}", result_dir.display(), err);
        process::exit(-1);
    }
    let mut failed = false;
    for sample in selected {
        if let Err(err) = write_sample(sample, result_dir) {
            error!("{}: {}", sample.name, err);
            failed = true;
        }
    }
    if failed {
        process::exit(-1);
    }
}
