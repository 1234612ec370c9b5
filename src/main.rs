use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use quickdocx::{Document, Drawing, Error, ImageUnits};

#[derive(Parser)]
#[command(about = "Inspect and edit images in DOCX files")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List drawings with their placement, sizes and cropping
    Inspect { input: PathBuf },
    /// Append a paragraph holding an inline picture
    AddImage {
        input: PathBuf,
        image: PathBuf,
        /// Displayed width in pixels (height follows the aspect ratio)
        #[arg(long)]
        width: Option<f64>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Set the displayed size of a drawing, in pixels
    Resize {
        input: PathBuf,
        #[arg(long)]
        index: usize,
        #[arg(long)]
        width: f64,
        /// Omit to keep the aspect ratio
        #[arg(long)]
        height: Option<f64>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Crop a drawing by fractions of its original bitmap
    Crop {
        input: PathBuf,
        #[arg(long)]
        index: usize,
        #[arg(long, default_value_t = 0.0)]
        left: f64,
        #[arg(long, default_value_t = 0.0)]
        top: f64,
        #[arg(long, default_value_t = 0.0)]
        right: f64,
        #[arg(long, default_value_t = 0.0)]
        bottom: f64,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Drop cropping, then restore the original bitmap size
    Reset {
        input: PathBuf,
        #[arg(long)]
        index: usize,
        /// Only remove the cropping
        #[arg(long)]
        cropping_only: bool,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Make a drawing float over the text
    Anchor {
        input: PathBuf,
        #[arg(long)]
        index: usize,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Put a floating drawing back in line with the text
    Inline {
        input: PathBuf,
        #[arg(long)]
        index: usize,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn nth_drawing(doc: &mut Document, index: usize) -> Result<Drawing<'_>, Error> {
    let count = doc.drawings().len();
    let id = doc
        .drawings()
        .get(index)
        .copied()
        .ok_or_else(|| Error::InvalidDocx(format!("no drawing {index} (document has {count})")))?;
    doc.drawing(id)
        .ok_or(Error::MalformedDrawing("neither inline nor anchored"))
}

fn inspect(doc: &mut Document) -> Result<(), Error> {
    let px = ImageUnits::Pixels;
    for index in 0..doc.drawings().len() {
        let drawing = nth_drawing(doc, index)?;
        let placement = if drawing.is_anchored() { "anchored" } else { "inline" };
        let original = match drawing.original_size(px) {
            Ok((w, h)) => format!("{w}x{h}"),
            Err(e) => format!("unknown ({e})"),
        };
        let crop = match drawing.cropping() {
            Some(c) => format!("l={} t={} r={} b={}", c.left, c.top, c.right, c.bottom),
            None => "none".to_string(),
        };
        println!(
            "{index}: {} {placement}, displayed {:.0}x{:.0}, uncropped {:.0}x{:.0}, original {original}, crop {crop}",
            drawing.name().unwrap_or_default(),
            drawing.width(px)?,
            drawing.height(px)?,
            drawing.uncropped_width(px)?,
            drawing.uncropped_height(px)?,
        );
    }
    Ok(())
}

fn edit(input: &Path, output: Option<PathBuf>, f: impl FnOnce(&mut Document) -> Result<(), Error>) -> Result<(), Error> {
    let mut doc = Document::open(input)?;
    f(&mut doc)?;
    let output = output.unwrap_or_else(|| input.to_path_buf());
    doc.save(&output)?;
    println!("Saved {}", output.display());
    Ok(())
}

fn run(command: Command) -> Result<(), Error> {
    let px = ImageUnits::Pixels;
    match command {
        Command::Inspect { input } => inspect(&mut Document::open(&input)?),
        Command::AddImage {
            input,
            image,
            width,
            output,
        } => edit(&input, output, |doc| {
            let image = doc.add_image_file(&image)?;
            let drawing = doc.body().add_paragraph().add_image(&image)?;
            if let Some(width) = width {
                drawing.set_width(width, px, true)?;
            }
            Ok(())
        }),
        Command::Resize {
            input,
            index,
            width,
            height,
            output,
        } => edit(&input, output, |doc| {
            let drawing = nth_drawing(doc, index)?;
            match height {
                Some(height) => drawing.resize(width, height, px)?,
                None => drawing.set_width(width, px, true)?,
            };
            Ok(())
        }),
        Command::Crop {
            input,
            index,
            left,
            top,
            right,
            bottom,
            output,
        } => edit(&input, output, |doc| {
            nth_drawing(doc, index)?.crop(left, top, right, bottom)?;
            Ok(())
        }),
        Command::Reset {
            input,
            index,
            cropping_only,
            output,
        } => edit(&input, output, |doc| {
            let drawing = nth_drawing(doc, index)?.reset_cropping()?;
            if !cropping_only {
                drawing.reset_size()?;
            }
            Ok(())
        }),
        Command::Anchor {
            input,
            index,
            output,
        } => edit(&input, output, |doc| {
            nth_drawing(doc, index)?.to_anchored()?;
            Ok(())
        }),
        Command::Inline {
            input,
            index,
            output,
        } => edit(&input, output, |doc| {
            nth_drawing(doc, index)?.to_inlined()?;
            Ok(())
        }),
    }
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    if let Err(e) = run(args.command) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
