mod common;

use std::io::{Cursor, Read, Write};

use quickdocx::{Document, Error, ImageFormat, ImageUnits};

fn zip_entry(data: &[u8], name: &str) -> Option<String> {
    let mut zip = zip::ZipArchive::new(Cursor::new(data)).ok()?;
    let mut content = String::new();
    zip.by_name(name).ok()?.read_to_string(&mut content).ok()?;
    Some(content)
}

#[test]
fn new_document_is_a_valid_package() {
    let _ = env_logger::try_init();
    let data = Document::new().to_bytes().unwrap();

    let content_types = zip_entry(&data, "[Content_Types].xml").unwrap();
    assert!(content_types.contains("/word/document.xml"));
    let package_rels = zip_entry(&data, "_rels/.rels").unwrap();
    assert!(package_rels.contains("word/document.xml"));

    let main = zip_entry(&data, "word/document.xml").unwrap();
    let xml = roxmltree::Document::parse(&main).unwrap();
    let body = xml
        .root_element()
        .children()
        .find(|n| n.tag_name().name() == "body")
        .unwrap();
    assert!(body.children().any(|n| n.tag_name().name() == "sectPr"));
}

#[test]
fn images_survive_a_round_trip() {
    let (mut doc, image, id) = common::doc_with_image(120, 80);
    doc.drawing(id)
        .unwrap()
        .crop(0.25, 0.0, 0.25, 0.0)
        .unwrap()
        .to_anchored()
        .unwrap();
    let path = common::output_path(&format!("round_trip_{}.docx", common::timestamp()));
    doc.save(&path).unwrap();

    let mut reopened = Document::open(&path).unwrap();
    let images = reopened.images();
    assert_eq!(images.len(), 1);
    assert_eq!(images[0].0, format!("word/media/{}", image.name));
    assert_eq!(images[0].1, common::png(120, 80).as_slice());

    let drawings = reopened.drawings();
    assert_eq!(drawings.len(), 1);
    let drawing = reopened.drawing(drawings[0]).unwrap();
    assert!(drawing.is_anchored());
    assert_eq!(drawing.width(ImageUnits::Pixels).unwrap(), 60.0);
    assert_eq!(drawing.uncropped_width(ImageUnits::Pixels).unwrap(), 120.0);
    assert_eq!(drawing.original_size(ImageUnits::Pixels).unwrap(), (120.0, 80.0));
    assert_eq!(drawing.name().as_deref(), Some(image.name.as_str()));
    std::fs::remove_file(&path).ok();
}

#[test]
fn added_images_get_fresh_names_and_ids() {
    let mut doc = Document::new();
    let first = doc.add_image(common::png(4, 4), ImageFormat::Png).unwrap();
    let second = doc.add_image(common::png(8, 8), ImageFormat::Png).unwrap();
    assert_ne!(first.rel_id, second.rel_id);
    assert_ne!(first.name, second.name);
    assert_eq!(second.pixel_size, (8, 8));

    doc.body().add_paragraph().add_image(&first).unwrap();
    doc.body()
        .add_paragraph()
        .add_run()
        .add_image_sized(&second, 16.0, 16.0)
        .unwrap();
    let ids: Vec<_> = doc
        .tree()
        .descendants_named(doc.tree().root(), "wp:docPr")
        .into_iter()
        .filter_map(|d| doc.tree().attribute(d, "id"))
        .collect();
    assert_eq!(ids, ["1", "2"]);
    assert_eq!(doc.images().len(), 2);

    let data = doc.to_bytes().unwrap();
    let content_types = zip_entry(&data, "[Content_Types].xml").unwrap();
    assert_eq!(content_types.matches("Extension=\"png\"").count(), 1);
}

#[test]
fn text_and_tables_persist() {
    let mut doc = Document::new();
    doc.body()
        .add_paragraph()
        .add_text("line one\nline two  ")
        .unwrap();
    doc.body()
        .add_table(2, 2)
        .row(1)
        .unwrap()
        .cell(0)
        .unwrap()
        .paragraph(0)
        .unwrap()
        .add_text("cell")
        .unwrap();

    let mut reopened = Document::from_bytes(&doc.to_bytes().unwrap()).unwrap();
    assert_eq!(reopened.body().text(), "line one\nline two  ");
    let cell_text = reopened
        .body()
        .table(0)
        .unwrap()
        .row(1)
        .unwrap()
        .cell(0)
        .unwrap()
        .text();
    assert_eq!(cell_text, "cell");
}

#[test]
fn unknown_parts_are_kept_verbatim() {
    let mut doc = Document::new();
    doc.body().add_paragraph().add_text("styled").unwrap();
    let data = doc.to_bytes().unwrap();

    // splice an extra part into the archive
    let mut source = zip::ZipArchive::new(Cursor::new(data.as_slice())).unwrap();
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default();
    for i in 0..source.len() {
        let mut entry = source.by_index(i).unwrap();
        let name = entry.name().to_string();
        let mut data = Vec::new();
        entry.read_to_end(&mut data).unwrap();
        writer.start_file(name, options).unwrap();
        writer.write_all(&data).unwrap();
    }
    writer.start_file("word/styles.xml", options).unwrap();
    writer.write_all(b"<w:styles/>").unwrap();
    let spliced = writer.finish().unwrap().into_inner();

    let reopened = Document::from_bytes(&spliced).unwrap();
    let saved = reopened.to_bytes().unwrap();
    assert_eq!(zip_entry(&saved, "word/styles.xml").as_deref(), Some("<w:styles/>"));
}

#[test]
fn rejects_non_docx_input() {
    assert!(matches!(
        Document::from_bytes(b"not a zip"),
        Err(Error::InvalidDocx(_))
    ));

    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    writer
        .start_file("hello.txt", zip::write::SimpleFileOptions::default())
        .unwrap();
    let empty_zip = writer.finish().unwrap().into_inner();
    assert!(matches!(
        Document::from_bytes(&empty_zip),
        Err(Error::InvalidDocx(_))
    ));
}
