use std::fmt;
use warn::Warn;

/// Prints warnings to stdout, keeping count.
#[derive(Debug, Default)]
pub struct Stdout {
    count: u64,
}

impl Stdout {
    pub fn new() -> Stdout {
        Stdout::default()
    }
    pub fn count(&self) -> u64 {
        self.count
    }
}

impl<W: fmt::Debug> Warn<W> for Stdout {
    fn warn(&mut self, warning: W) {
        self.count += 1;
        println!("WARN: {:?}", warning);
    }
}
