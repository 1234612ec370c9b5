use std::fmt;

#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    Xml(roxmltree::Error),
    Zip(zip::result::ZipError),
    Image(image::ImageError),
    InvalidDocx(String),
    /// A child kind, field or fragment the host element does not accept.
    Schema(String),
    /// Anchor-only operation on an inline drawing.
    NotAnchored,
    MalformedDrawing(&'static str),
    /// The picture's `r:embed` does not resolve to an image part.
    MissingImage(String),
    InvalidCropping(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "IO error: {e}"),
            Error::Xml(e) => write!(f, "XML error: {e}"),
            Error::Zip(e) => write!(f, "ZIP error: {e}"),
            Error::Image(e) => write!(f, "image error: {e}"),
            Error::InvalidDocx(msg) => write!(f, "invalid DOCX: {msg}"),
            Error::Schema(msg) => write!(f, "schema misuse: {msg}"),
            Error::NotAnchored => write!(f, "drawing is not anchored"),
            Error::MalformedDrawing(what) => write!(f, "malformed drawing: {what}"),
            Error::MissingImage(id) => write!(
                f,
                "couldn't fetch image data for relationship '{id}' (missing part or picture embed)"
            ),
            Error::InvalidCropping(msg) => write!(f, "invalid cropping: {msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Xml(e) => Some(e),
            Error::Zip(e) => Some(e),
            Error::Image(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<roxmltree::Error> for Error {
    fn from(e: roxmltree::Error) -> Self {
        Error::Xml(e)
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(e: zip::result::ZipError) -> Self {
        Error::Zip(e)
    }
}

impl From<image::ImageError> for Error {
    fn from(e: image::ImageError) -> Self {
        Error::Image(e)
    }
}
