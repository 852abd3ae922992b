use std::fmt::{Debug, Display, Error, Formatter};

// Error
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum QRError {
    ValueOutOfRange,
    InvalidCharacterSet,
    DataTooLong { used: usize, capacity: usize },
    SegmentTooLong,
}

impl Display for QRError {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        match *self {
            Self::ValueOutOfRange => f.write_str("Value out of range"),
            Self::InvalidCharacterSet => {
                f.write_str("String contains characters unsupported by the encoding mode")
            }
            Self::DataTooLong { used, capacity } => {
                write!(f, "Data length = {used} bits, Max capacity = {capacity} bits")
            }
            Self::SegmentTooLong => f.write_str("Segment too long"),
        }
    }
}

impl std::error::Error for QRError {}

pub type QRResult<T> = Result<T, QRError>;
