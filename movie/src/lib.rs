#[cfg(test)]
#[macro_use]
extern crate quickcheck;
#[macro_use]
extern crate log;

pub use self::format::Warning;
pub use self::movie::BackgroundColorAlreadySet;
pub use self::movie::IdentifiersExhausted;
pub use self::movie::Movie;
pub use self::reader::ReadError;
pub use self::reader::Reader;
pub use self::tag::PlaceObject;
pub use self::tag::Tag;

use libswf_bits::EncodingError;
use std::io;
use thiserror::Error;

pub mod format;

mod file;
mod movie;
mod reader;
mod tag;

#[derive(Error, Debug)]
#[error(transparent)]
pub enum WriteError {
    Io(#[from] io::Error),
    Binrw(#[from] binrw::Error),
    Encoding(#[from] EncodingError),
    Shape(#[from] libswf_shape::Error),
    Tag(#[from] format::TagError),
    #[error("Frame rate {0} is not representable as 8.8 fixed point")]
    FrameRate(f32),
    #[error("{0} frames do not fit into the frame count")]
    TooManyFrames(usize),
    #[error("File length of {0} bytes does not fit into the length field")]
    FileTooLong(usize),
}
