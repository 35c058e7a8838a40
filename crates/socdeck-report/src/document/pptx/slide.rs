//! `DrawingML` for individual slides.

use crate::document::model::{
    Align, Anchor, ImageSpec, ShapeKind, ShapeSpec, Slide, SlideElement, TableSpec, TextBox,
};
use crate::error::DocumentError;
use crate::layout::geometry::to_emu;
use crate::layout::{SURFACE_COLOR, TEXT_COLOR, WHITE};

use super::parts::group_properties;
use super::xml::{XmlBuilder, NS_A, NS_P, NS_R};

const LANG: &str = "en-US";

#[allow(clippy::cast_possible_truncation)]
fn font_size(points: f64) -> String {
    ((points * 100.0).round() as i64).clamp(100, 400_000).to_string()
}

/// Serialize one slide. `image_rels[i]` is the relationship id of the `i`-th
/// image element on the slide.
pub(super) fn slide_xml(slide: &Slide, image_rels: &[String]) -> Result<Vec<u8>, DocumentError> {
    let mut b = XmlBuilder::new()?;
    b.open(
        "p:sld",
        &[("xmlns:a", NS_A), ("xmlns:r", NS_R), ("xmlns:p", NS_P)],
    )?;
    b.open("p:cSld", &[("name", slide.title.as_str())])?;

    if let Some(color) = &slide.background {
        b.open("p:bg", &[])?;
        b.open("p:bgPr", &[])?;
        b.solid_fill(color)?;
        b.empty("a:effectLst", &[])?;
        b.close("p:bgPr")?;
        b.close("p:bg")?;
    }

    b.open("p:spTree", &[])?;
    b.open("p:nvGrpSpPr", &[])?;
    b.empty("p:cNvPr", &[("id", "1"), ("name", "")])?;
    b.empty("p:cNvGrpSpPr", &[])?;
    b.empty("p:nvPr", &[])?;
    b.close("p:nvGrpSpPr")?;
    group_properties(&mut b)?;

    let mut images = image_rels.iter();
    for (i, element) in slide.elements.iter().enumerate() {
        let shape_id = i + 2;
        match element {
            SlideElement::Text(text) => text_box(&mut b, shape_id, text)?,
            SlideElement::Shape(shape) => shape_xml(&mut b, shape_id, shape)?,
            SlideElement::Image(image) => {
                let rel = images.next().ok_or_else(|| {
                    DocumentError::InvalidElement(format!(
                        "no relationship for image '{}'",
                        image.description
                    ))
                })?;
                picture(&mut b, shape_id, image, rel)?;
            }
            SlideElement::Table(table) => table_xml(&mut b, shape_id, table)?,
        }
    }

    b.close("p:spTree")?;
    b.close("p:cSld")?;
    b.open("p:clrMapOvr", &[])?;
    b.empty("a:masterClrMapping", &[])?;
    b.close("p:clrMapOvr")?;
    b.close("p:sld")?;
    Ok(b.finish())
}

fn non_visual(
    b: &mut XmlBuilder,
    shape_id: usize,
    name: &str,
    text_box: bool,
) -> Result<(), DocumentError> {
    let id = shape_id.to_string();
    let name = format!("{name} {shape_id}");
    b.open("p:nvSpPr", &[])?;
    b.empty("p:cNvPr", &[("id", id.as_str()), ("name", name.as_str())])?;
    if text_box {
        b.empty("p:cNvSpPr", &[("txBox", "1")])?;
    } else {
        b.empty("p:cNvSpPr", &[])?;
    }
    b.empty("p:nvPr", &[])?;
    b.close("p:nvSpPr")
}

fn preset(b: &mut XmlBuilder, prst: &str) -> Result<(), DocumentError> {
    b.open("a:prstGeom", &[("prst", prst)])?;
    b.empty("a:avLst", &[])?;
    b.close("a:prstGeom")
}

fn run(
    b: &mut XmlBuilder,
    text: &str,
    size: &str,
    bold: bool,
    color: &str,
) -> Result<(), DocumentError> {
    b.open("a:r", &[])?;
    b.open(
        "a:rPr",
        &[
            ("lang", LANG),
            ("sz", size),
            ("b", if bold { "1" } else { "0" }),
            ("dirty", "0"),
        ],
    )?;
    b.solid_fill(color)?;
    b.close("a:rPr")?;
    b.leaf("a:t", &[], text)?;
    b.close("a:r")
}

fn text_box(b: &mut XmlBuilder, shape_id: usize, text: &TextBox) -> Result<(), DocumentError> {
    b.open("p:sp", &[])?;
    non_visual(b, shape_id, "TextBox", true)?;

    b.open("p:spPr", &[])?;
    b.xfrm("a:xfrm", &text.rect)?;
    preset(b, "rect")?;
    match &text.fill {
        Some(fill) => b.solid_fill(fill)?,
        None => b.empty("a:noFill", &[])?,
    }
    b.close("p:spPr")?;

    let anchor = match text.anchor {
        Anchor::Top => "t",
        Anchor::Middle => "ctr",
        Anchor::Bottom => "b",
    };
    let align = match text.align {
        Align::Left => "l",
        Align::Center => "ctr",
        Align::Right => "r",
    };
    let size = font_size(text.size);

    b.open("p:txBody", &[])?;
    b.empty(
        "a:bodyPr",
        &[
            ("wrap", "square"),
            ("lIns", "45720"),
            ("tIns", "22860"),
            ("rIns", "45720"),
            ("bIns", "22860"),
            ("anchor", anchor),
        ],
    )?;
    b.empty("a:lstStyle", &[])?;
    for line in text.text.split('\n') {
        b.open("a:p", &[])?;
        b.empty("a:pPr", &[("algn", align)])?;
        if line.is_empty() {
            b.empty("a:endParaRPr", &[("lang", LANG), ("sz", size.as_str())])?;
        } else {
            run(b, line, &size, text.bold, &text.color)?;
        }
        b.close("a:p")?;
    }
    b.close("p:txBody")?;
    b.close("p:sp")
}

fn shape_xml(b: &mut XmlBuilder, shape_id: usize, shape: &ShapeSpec) -> Result<(), DocumentError> {
    let prst = match shape.kind {
        ShapeKind::Rect => "rect",
        ShapeKind::RoundRect => "roundRect",
        ShapeKind::Ellipse => "ellipse",
    };
    b.open("p:sp", &[])?;
    non_visual(b, shape_id, "Shape", false)?;
    b.open("p:spPr", &[])?;
    b.xfrm("a:xfrm", &shape.rect)?;
    preset(b, prst)?;
    b.solid_fill(&shape.fill)?;
    match &shape.outline {
        Some(color) => {
            b.open("a:ln", &[("w", "9525")])?;
            b.solid_fill(color)?;
            b.close("a:ln")?;
        }
        None => {
            b.open("a:ln", &[])?;
            b.empty("a:noFill", &[])?;
            b.close("a:ln")?;
        }
    }
    b.close("p:spPr")?;
    b.close("p:sp")
}

fn picture(
    b: &mut XmlBuilder,
    shape_id: usize,
    image: &ImageSpec,
    rel: &str,
) -> Result<(), DocumentError> {
    let id = shape_id.to_string();
    let name = format!("Picture {shape_id}");
    b.open("p:pic", &[])?;
    b.open("p:nvPicPr", &[])?;
    b.empty(
        "p:cNvPr",
        &[
            ("id", id.as_str()),
            ("name", name.as_str()),
            ("descr", image.description.as_str()),
        ],
    )?;
    b.open("p:cNvPicPr", &[])?;
    b.empty("a:picLocks", &[("noChangeAspect", "1")])?;
    b.close("p:cNvPicPr")?;
    b.empty("p:nvPr", &[])?;
    b.close("p:nvPicPr")?;

    b.open("p:blipFill", &[])?;
    b.empty("a:blip", &[("r:embed", rel)])?;
    b.open("a:stretch", &[])?;
    b.empty("a:fillRect", &[])?;
    b.close("a:stretch")?;
    b.close("p:blipFill")?;

    b.open("p:spPr", &[])?;
    b.xfrm("a:xfrm", &image.rect)?;
    preset(b, "rect")?;
    b.close("p:spPr")?;
    b.close("p:pic")
}

fn table_cell(
    b: &mut XmlBuilder,
    text: &str,
    size: &str,
    bold: bool,
    color: &str,
    fill: &str,
) -> Result<(), DocumentError> {
    b.open("a:tc", &[])?;
    b.open("a:txBody", &[])?;
    b.empty("a:bodyPr", &[])?;
    b.empty("a:lstStyle", &[])?;
    b.open("a:p", &[])?;
    if text.is_empty() {
        b.empty("a:endParaRPr", &[("lang", LANG), ("sz", size)])?;
    } else {
        run(b, text, size, bold, color)?;
    }
    b.close("a:p")?;
    b.close("a:txBody")?;
    b.open(
        "a:tcPr",
        &[
            ("marL", "68580"),
            ("marR", "68580"),
            ("marT", "34290"),
            ("marB", "34290"),
            ("anchor", "ctr"),
        ],
    )?;
    b.solid_fill(fill)?;
    b.close("a:tcPr")?;
    b.close("a:tc")
}

fn table_xml(b: &mut XmlBuilder, shape_id: usize, table: &TableSpec) -> Result<(), DocumentError> {
    let id = shape_id.to_string();
    let name = format!("Table {shape_id}");
    let size = font_size(table.font_size);
    let row_height = to_emu(table.row_height()).to_string();

    b.open("p:graphicFrame", &[])?;
    b.open("p:nvGraphicFramePr", &[])?;
    b.empty("p:cNvPr", &[("id", id.as_str()), ("name", name.as_str())])?;
    b.open("p:cNvGraphicFramePr", &[])?;
    b.empty("a:graphicFrameLocks", &[("noGrp", "1")])?;
    b.close("p:cNvGraphicFramePr")?;
    b.empty("p:nvPr", &[])?;
    b.close("p:nvGraphicFramePr")?;
    b.xfrm("p:xfrm", &table.rect)?;

    b.open("a:graphic", &[])?;
    b.open(
        "a:graphicData",
        &[("uri", "http://schemas.openxmlformats.org/drawingml/2006/table")],
    )?;
    b.open("a:tbl", &[])?;
    b.empty("a:tblPr", &[("firstRow", "1"), ("bandRow", "1")])?;
    b.open("a:tblGrid", &[])?;
    for width in table.column_widths() {
        let w = to_emu(width).to_string();
        b.empty("a:gridCol", &[("w", w.as_str())])?;
    }
    b.close("a:tblGrid")?;

    b.open("a:tr", &[("h", row_height.as_str())])?;
    for cell in &table.header {
        table_cell(b, cell, &size, true, &table.header_color, &table.header_fill)?;
    }
    b.close("a:tr")?;

    for (i, row) in table.rows.iter().enumerate() {
        let fill = if i % 2 == 0 { WHITE } else { SURFACE_COLOR };
        b.open("a:tr", &[("h", row_height.as_str())])?;
        for cell in row {
            let color = cell.color.as_deref().unwrap_or(TEXT_COLOR);
            table_cell(b, &cell.text, &size, cell.bold, color, fill)?;
        }
        b.close("a:tr")?;
    }

    b.close("a:tbl")?;
    b.close("a:graphicData")?;
    b.close("a:graphic")?;
    b.close("p:graphicFrame")
}
