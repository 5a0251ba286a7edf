use std::fmt::{Display, Error, Formatter};

// Error
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum GeomError {
    // Detector
    EmptyImage,

    // Geometry override
    NonSquareImage,
    InvalidModuleCount,
    InvalidQuietZone,
}

impl Display for GeomError {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        let msg = match *self {
            // Detector
            Self::EmptyImage => "Image has no dark content",

            // Geometry override
            Self::NonSquareImage => "Image must be square to apply explicit dimensions",
            Self::InvalidModuleCount => "Module count is not a standard QR size",
            Self::InvalidQuietZone => "Quiet zone leaves no room for the symbol",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for GeomError {}

pub type GeomResult<T> = Result<T, GeomError>;
