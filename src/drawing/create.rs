use super::PICTURE_URI;
use super::convert::inline_shell;
use crate::docx::ImageRef;
use crate::tree::Element;
use crate::units;

/// `w:drawing` holding an inline picture of `image` at the given pixel size.
pub(crate) fn inline_picture(image: &ImageRef, width_px: f64, height_px: f64, doc_pr_id: u32) -> Element {
    let cx = units::emu_from_pixels(width_px);
    let cy = units::emu_from_pixels(height_px);

    let picture = Element::new("pic:pic")
        .child(
            Element::new("pic:nvPicPr")
                .child(
                    Element::new("pic:cNvPr")
                        .attr("id", 0)
                        .attr("name", &image.name),
                )
                .child(Element::new("pic:cNvPicPr")),
        )
        .child(
            Element::new("pic:blipFill")
                .child(Element::new("a:blip").attr("r:embed", &image.rel_id))
                .child(Element::new("a:stretch").child(Element::new("a:fillRect"))),
        )
        .child(
            Element::new("pic:spPr")
                .attr("bwMode", "auto")
                .child(
                    Element::new("a:xfrm")
                        .child(Element::new("a:off").attr("x", 0).attr("y", 0))
                        .child(Element::new("a:ext").attr("cx", cx).attr("cy", cy)),
                )
                .child(
                    Element::new("a:prstGeom")
                        .attr("prst", "rect")
                        .child(Element::new("a:avLst")),
                ),
        );

    let inline = inline_shell()
        .child(Element::new("wp:extent").attr("cx", cx).attr("cy", cy))
        .child(
            Element::new("wp:effectExtent")
                .attr("l", 0)
                .attr("t", 0)
                .attr("r", 0)
                .attr("b", 0),
        )
        .child(
            Element::new("wp:docPr")
                .attr("id", doc_pr_id)
                .attr("name", &image.name),
        )
        .child(
            Element::new("wp:cNvGraphicFramePr").child(
                Element::new("a:graphicFrameLocks").attr("noChangeAspect", 1),
            ),
        )
        .child(
            Element::new("a:graphic").child(
                Element::new("a:graphicData")
                    .attr("uri", PICTURE_URI)
                    .child(picture),
            ),
        );

    Element::new("w:drawing").child(inline)
}
