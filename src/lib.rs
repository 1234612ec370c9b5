//! Building and editing `.docx` documents.
//!
//! A [`Document`] holds the main document part as a mutable tree. Handles
//! such as [`Paragraph`], [`Run`] and [`Drawing`] borrow it to read and write
//! optional properties; clearing a property never leaves an empty property
//! element behind.

mod docx;
mod drawing;
mod error;
pub mod props;
pub mod schema;
pub mod tree;
pub mod units;
pub mod values;
mod wml;

pub use docx::{Document, ImageRef, Media, pixel_size};
pub use drawing::{Cropping, Drawing, Placement, WRAP_POLYGON_SIZE, WrappingType};
pub use error::Error;
pub use image::ImageFormat;
pub use units::{ImageUnits, IndentationUnits, LineUnits, MeasuringUnits, TextUnits, Unit, WidthUnits};
pub use wml::{
    Body, Border, BorderEdge, Formatting, LinePosition, Margin, Paragraph, Run, Side, Table,
    TableCell, TableRow,
};
