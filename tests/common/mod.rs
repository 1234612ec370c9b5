#![allow(dead_code)]

use std::fs;
use std::io::Cursor;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use quickdocx::{Document, ImageFormat, ImageRef};
use quickdocx::tree::NodeId;

/// PNG bytes of a `width` x `height` gradient.
pub fn png(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    let mut data = Cursor::new(Vec::new());
    img.write_to(&mut data, image::ImageFormat::Png)
        .expect("PNG encoding failed");
    data.into_inner()
}

/// New document with one paragraph holding an inline `width` x `height`
/// picture. Returns the image and the `w:drawing` id.
pub fn doc_with_image(width: u32, height: u32) -> (Document, ImageRef, NodeId) {
    let mut doc = Document::new();
    let image = doc
        .add_image(png(width, height), ImageFormat::Png)
        .expect("add_image failed");
    let id = doc
        .body()
        .add_paragraph()
        .add_image(&image)
        .expect("add_image on paragraph failed")
        .id();
    (doc, image, id)
}

/// Output path: tests/output/<name>
pub fn output_path(name: &str) -> PathBuf {
    let dir = PathBuf::from("tests/output");
    fs::create_dir_all(&dir).ok();
    dir.join(name)
}

pub fn timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs()
}

/// Names of the element children of `id`.
pub fn child_names(doc: &Document, id: NodeId) -> Vec<String> {
    let tree = doc.tree();
    tree.child_elements(id)
        .filter_map(|c| tree.name(c))
        .map(str::to_string)
        .collect()
}
