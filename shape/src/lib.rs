#[cfg(test)]
#[macro_use]
extern crate quickcheck;
#[macro_use]
extern crate log;

pub use self::builder::Shape;
pub use self::builder::ShapeBuilder;
pub use self::define::DefineShape;
pub use self::define::ShapeVersion;
pub use self::format::Bounds;
pub use self::format::Color;
pub use self::format::Identifier;
pub use self::format::Warning;
pub use self::record::ShapeRecord;
pub use self::record::StyleChange;
pub use self::style::FillStyle;
pub use self::style::LineStyle;
pub use self::style::StyleKind;
pub use self::style::StyleRef;
pub use self::style::StyleTable;

use libswf_bits::EncodingError;
use libswf_bits::UnexpectedEnd;
use thiserror::Error;

mod builder;
mod define;
pub mod format;
mod record;
mod style;

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum Error {
    #[error("edge record added before any style change")]
    Sequencing,
    #[error(transparent)]
    Encoding(#[from] EncodingError),
    #[error("{kind} style {index} is not defined")]
    UnknownStyle { kind: StyleKind, index: u16 },
    #[error("unexpected end of shape data")]
    UnexpectedEnd,
    #[error("unsupported fill style type {0:#04x}")]
    UnsupportedFillStyle(u8),
    #[error("style change records carrying new style tables are not supported")]
    NewStyles,
}

impl From<UnexpectedEnd> for Error {
    fn from(_: UnexpectedEnd) -> Error {
        Error::UnexpectedEnd
    }
}
