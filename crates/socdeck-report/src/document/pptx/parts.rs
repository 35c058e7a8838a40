//! Package-level parts of a `PresentationML` document.

use chrono::NaiveDate;

use crate::error::DocumentError;

use super::xml::{XmlBuilder, NS_A, NS_P, NS_R};

const REL_BASE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_RELS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const NS_TYPES: &str = "http://schemas.openxmlformats.org/package/2006/content-types";

const CT_PRESENTATION: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml";
const CT_SLIDE: &str = "application/vnd.openxmlformats-officedocument.presentationml.slide+xml";
const CT_MASTER: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml";
const CT_LAYOUT: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml";
const CT_THEME: &str = "application/vnd.openxmlformats-officedocument.theme+xml";
const CT_PRES_PROPS: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presProps+xml";
const CT_TABLE_STYLES: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.tableStyles+xml";
const CT_CORE: &str = "application/vnd.openxmlformats-package.core-properties+xml";
const CT_APP: &str = "application/vnd.openxmlformats-officedocument.extended-properties+xml";

/// Slide master id; layout ids must be larger.
const MASTER_ID: &str = "2147483648";
const LAYOUT_ID: &str = "2147483649";
const FIRST_SLIDE_ID: usize = 256;
/// Relationship ids in `presentation.xml.rels` before the first slide.
const FIXED_PRESENTATION_RELS: usize = 4;

/// A `Relationship` entry: (id, type suffix or full URI, target).
pub(super) struct Relationship {
    pub id: String,
    pub rel_type: String,
    pub target: String,
}

impl Relationship {
    pub(super) fn office(id: impl Into<String>, kind: &str, target: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            rel_type: format!("{REL_BASE}/{kind}"),
            target: target.into(),
        }
    }
}

pub(super) fn relationships(rels: &[Relationship]) -> Result<Vec<u8>, DocumentError> {
    let mut b = XmlBuilder::new()?;
    b.open("Relationships", &[("xmlns", NS_RELS)])?;
    for rel in rels {
        b.empty(
            "Relationship",
            &[
                ("Id", rel.id.as_str()),
                ("Type", rel.rel_type.as_str()),
                ("Target", rel.target.as_str()),
            ],
        )?;
    }
    b.close("Relationships")?;
    Ok(b.finish())
}

pub(super) fn root_relationships() -> Result<Vec<u8>, DocumentError> {
    relationships(&[
        Relationship::office("rId1", "officeDocument", "ppt/presentation.xml"),
        Relationship {
            id: "rId2".to_string(),
            rel_type:
                "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties"
                    .to_string(),
            target: "docProps/core.xml".to_string(),
        },
        Relationship::office("rId3", "extended-properties", "docProps/app.xml"),
    ])
}

/// `[Content_Types].xml` for `slide_count` slides and the given media extensions.
pub(super) fn content_types(
    slide_count: usize,
    media: &[(&'static str, &'static str)],
) -> Result<Vec<u8>, DocumentError> {
    let mut b = XmlBuilder::new()?;
    b.open("Types", &[("xmlns", NS_TYPES)])?;
    b.empty(
        "Default",
        &[
            ("Extension", "rels"),
            (
                "ContentType",
                "application/vnd.openxmlformats-package.relationships+xml",
            ),
        ],
    )?;
    b.empty(
        "Default",
        &[("Extension", "xml"), ("ContentType", "application/xml")],
    )?;
    for &(extension, content_type) in media {
        b.empty(
            "Default",
            &[("Extension", extension), ("ContentType", content_type)],
        )?;
    }

    let fixed = [
        ("/ppt/presentation.xml", CT_PRESENTATION),
        ("/ppt/slideMasters/slideMaster1.xml", CT_MASTER),
        ("/ppt/slideLayouts/slideLayout1.xml", CT_LAYOUT),
        ("/ppt/theme/theme1.xml", CT_THEME),
        ("/ppt/presProps.xml", CT_PRES_PROPS),
        ("/ppt/tableStyles.xml", CT_TABLE_STYLES),
        ("/docProps/core.xml", CT_CORE),
        ("/docProps/app.xml", CT_APP),
    ];
    for (part, content_type) in fixed {
        b.empty(
            "Override",
            &[("PartName", part), ("ContentType", content_type)],
        )?;
    }
    for n in 1..=slide_count {
        let part = format!("/ppt/slides/slide{n}.xml");
        b.empty("Override", &[("PartName", part.as_str()), ("ContentType", CT_SLIDE)])?;
    }
    b.close("Types")?;
    Ok(b.finish())
}

pub(super) fn presentation(slide_count: usize) -> Result<Vec<u8>, DocumentError> {
    let mut b = XmlBuilder::new()?;
    b.open(
        "p:presentation",
        &[
            ("xmlns:a", NS_A),
            ("xmlns:r", NS_R),
            ("xmlns:p", NS_P),
            ("saveSubsetFonts", "1"),
        ],
    )?;
    b.open("p:sldMasterIdLst", &[])?;
    b.empty("p:sldMasterId", &[("id", MASTER_ID), ("r:id", "rId1")])?;
    b.close("p:sldMasterIdLst")?;

    if slide_count > 0 {
        b.open("p:sldIdLst", &[])?;
        for i in 0..slide_count {
            let id = (FIRST_SLIDE_ID + i).to_string();
            let rid = presentation_slide_rel_id(i);
            b.empty("p:sldId", &[("id", id.as_str()), ("r:id", rid.as_str())])?;
        }
        b.close("p:sldIdLst")?;
    }

    b.empty("p:sldSz", &[("cx", "12192000"), ("cy", "6858000")])?;
    b.empty("p:notesSz", &[("cx", "6858000"), ("cy", "9144000")])?;
    b.close("p:presentation")?;
    Ok(b.finish())
}

fn presentation_slide_rel_id(index: usize) -> String {
    format!("rId{}", FIXED_PRESENTATION_RELS + 1 + index)
}

pub(super) fn presentation_relationships(slide_count: usize) -> Result<Vec<u8>, DocumentError> {
    let mut rels = vec![
        Relationship::office("rId1", "slideMaster", "slideMasters/slideMaster1.xml"),
        Relationship::office("rId2", "theme", "theme/theme1.xml"),
        Relationship::office("rId3", "presProps", "presProps.xml"),
        Relationship::office("rId4", "tableStyles", "tableStyles.xml"),
    ];
    for i in 0..slide_count {
        rels.push(Relationship::office(
            presentation_slide_rel_id(i),
            "slide",
            format!("slides/slide{}.xml", i + 1),
        ));
    }
    relationships(&rels)
}

pub(super) fn core_properties(title: &str, created: NaiveDate) -> Result<Vec<u8>, DocumentError> {
    let timestamp = format!("{}T00:00:00Z", created.format("%Y-%m-%d"));
    let mut b = XmlBuilder::new()?;
    b.open(
        "cp:coreProperties",
        &[
            (
                "xmlns:cp",
                "http://schemas.openxmlformats.org/package/2006/metadata/core-properties",
            ),
            ("xmlns:dc", "http://purl.org/dc/elements/1.1/"),
            ("xmlns:dcterms", "http://purl.org/dc/terms/"),
            ("xmlns:dcmitype", "http://purl.org/dc/dcmitype/"),
            ("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance"),
        ],
    )?;
    b.leaf("dc:title", &[], title)?;
    b.leaf("dc:creator", &[], "socdeck")?;
    b.leaf("cp:lastModifiedBy", &[], "socdeck")?;
    b.leaf(
        "dcterms:created",
        &[("xsi:type", "dcterms:W3CDTF")],
        &timestamp,
    )?;
    b.leaf(
        "dcterms:modified",
        &[("xsi:type", "dcterms:W3CDTF")],
        &timestamp,
    )?;
    b.close("cp:coreProperties")?;
    Ok(b.finish())
}

pub(super) fn app_properties(slide_count: usize, company: &str) -> Result<Vec<u8>, DocumentError> {
    let mut b = XmlBuilder::new()?;
    b.open(
        "Properties",
        &[
            (
                "xmlns",
                "http://schemas.openxmlformats.org/officeDocument/2006/extended-properties",
            ),
            (
                "xmlns:vt",
                "http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes",
            ),
        ],
    )?;
    b.leaf("Application", &[], "socdeck")?;
    b.leaf("Slides", &[], &slide_count.to_string())?;
    b.leaf("Company", &[], company)?;
    b.close("Properties")?;
    Ok(b.finish())
}

fn empty_group_shape(b: &mut XmlBuilder) -> Result<(), DocumentError> {
    b.open("p:spTree", &[])?;
    b.open("p:nvGrpSpPr", &[])?;
    b.empty("p:cNvPr", &[("id", "1"), ("name", "")])?;
    b.empty("p:cNvGrpSpPr", &[])?;
    b.empty("p:nvPr", &[])?;
    b.close("p:nvGrpSpPr")?;
    group_properties(b)?;
    b.close("p:spTree")
}

/// `<p:grpSpPr>` with an identity transform.
pub(super) fn group_properties(b: &mut XmlBuilder) -> Result<(), DocumentError> {
    b.open("p:grpSpPr", &[])?;
    b.open("a:xfrm", &[])?;
    b.empty("a:off", &[("x", "0"), ("y", "0")])?;
    b.empty("a:ext", &[("cx", "0"), ("cy", "0")])?;
    b.empty("a:chOff", &[("x", "0"), ("y", "0")])?;
    b.empty("a:chExt", &[("cx", "0"), ("cy", "0")])?;
    b.close("a:xfrm")?;
    b.close("p:grpSpPr")
}

pub(super) fn slide_master() -> Result<Vec<u8>, DocumentError> {
    let mut b = XmlBuilder::new()?;
    b.open(
        "p:sldMaster",
        &[("xmlns:a", NS_A), ("xmlns:r", NS_R), ("xmlns:p", NS_P)],
    )?;
    b.open("p:cSld", &[])?;
    b.open("p:bg", &[])?;
    b.open("p:bgRef", &[("idx", "1001")])?;
    b.empty("a:schemeClr", &[("val", "bg1")])?;
    b.close("p:bgRef")?;
    b.close("p:bg")?;
    empty_group_shape(&mut b)?;
    b.close("p:cSld")?;
    b.empty(
        "p:clrMap",
        &[
            ("bg1", "lt1"),
            ("tx1", "dk1"),
            ("bg2", "lt2"),
            ("tx2", "dk2"),
            ("accent1", "accent1"),
            ("accent2", "accent2"),
            ("accent3", "accent3"),
            ("accent4", "accent4"),
            ("accent5", "accent5"),
            ("accent6", "accent6"),
            ("hlink", "hlink"),
            ("folHlink", "folHlink"),
        ],
    )?;
    b.open("p:sldLayoutIdLst", &[])?;
    b.empty("p:sldLayoutId", &[("id", LAYOUT_ID), ("r:id", "rId1")])?;
    b.close("p:sldLayoutIdLst")?;
    b.open("p:txStyles", &[])?;
    for (style, size) in [
        ("p:titleStyle", "3200"),
        ("p:bodyStyle", "1800"),
        ("p:otherStyle", "1800"),
    ] {
        b.open(style, &[])?;
        b.open("a:lvl1pPr", &[])?;
        b.empty("a:defRPr", &[("sz", size)])?;
        b.close("a:lvl1pPr")?;
        b.close(style)?;
    }
    b.close("p:txStyles")?;
    b.close("p:sldMaster")?;
    Ok(b.finish())
}

pub(super) fn slide_master_relationships() -> Result<Vec<u8>, DocumentError> {
    relationships(&[
        Relationship::office("rId1", "slideLayout", "../slideLayouts/slideLayout1.xml"),
        Relationship::office("rId2", "theme", "../theme/theme1.xml"),
    ])
}

pub(super) fn slide_layout() -> Result<Vec<u8>, DocumentError> {
    let mut b = XmlBuilder::new()?;
    b.open(
        "p:sldLayout",
        &[
            ("xmlns:a", NS_A),
            ("xmlns:r", NS_R),
            ("xmlns:p", NS_P),
            ("type", "blank"),
            ("preserve", "1"),
        ],
    )?;
    b.open("p:cSld", &[("name", "Blank")])?;
    empty_group_shape(&mut b)?;
    b.close("p:cSld")?;
    b.open("p:clrMapOvr", &[])?;
    b.empty("a:masterClrMapping", &[])?;
    b.close("p:clrMapOvr")?;
    b.close("p:sldLayout")?;
    Ok(b.finish())
}

pub(super) fn slide_layout_relationships() -> Result<Vec<u8>, DocumentError> {
    relationships(&[Relationship::office(
        "rId1",
        "slideMaster",
        "../slideMasters/slideMaster1.xml",
    )])
}

/// Theme whose dark-2 and accent-1 colors are the customer's brand colors.
pub(super) fn theme(primary: &str, secondary: &str) -> Result<Vec<u8>, DocumentError> {
    let mut b = XmlBuilder::new()?;
    b.open("a:theme", &[("xmlns:a", NS_A), ("name", "socdeck")])?;
    b.open("a:themeElements", &[])?;

    b.open("a:clrScheme", &[("name", "socdeck")])?;
    for (slot, color) in [
        ("a:dk1", "1F2933"),
        ("a:lt1", "FFFFFF"),
        ("a:dk2", secondary),
        ("a:lt2", "F3F4F6"),
        ("a:accent1", primary),
        ("a:accent2", secondary),
        ("a:accent3", "2E7D32"),
        ("a:accent4", "C62828"),
        ("a:accent5", "757575"),
        ("a:accent6", "6B7280"),
        ("a:hlink", "0563C1"),
        ("a:folHlink", "954F72"),
    ] {
        b.open(slot, &[])?;
        b.empty("a:srgbClr", &[("val", color)])?;
        b.close(slot)?;
    }
    b.close("a:clrScheme")?;

    b.open("a:fontScheme", &[("name", "socdeck")])?;
    for font in ["a:majorFont", "a:minorFont"] {
        b.open(font, &[])?;
        b.empty("a:latin", &[("typeface", "Calibri")])?;
        b.empty("a:ea", &[("typeface", "")])?;
        b.empty("a:cs", &[("typeface", "")])?;
        b.close(font)?;
    }
    b.close("a:fontScheme")?;

    b.open("a:fmtScheme", &[("name", "socdeck")])?;
    b.open("a:fillStyleLst", &[])?;
    for _ in 0..3 {
        scheme_fill(&mut b)?;
    }
    b.close("a:fillStyleLst")?;
    b.open("a:lnStyleLst", &[])?;
    for width in ["6350", "12700", "19050"] {
        b.open("a:ln", &[("w", width)])?;
        scheme_fill(&mut b)?;
        b.close("a:ln")?;
    }
    b.close("a:lnStyleLst")?;
    b.open("a:effectStyleLst", &[])?;
    for _ in 0..3 {
        b.open("a:effectStyle", &[])?;
        b.empty("a:effectLst", &[])?;
        b.close("a:effectStyle")?;
    }
    b.close("a:effectStyleLst")?;
    b.open("a:bgFillStyleLst", &[])?;
    for _ in 0..3 {
        scheme_fill(&mut b)?;
    }
    b.close("a:bgFillStyleLst")?;
    b.close("a:fmtScheme")?;

    b.close("a:themeElements")?;
    b.empty("a:objectDefaults", &[])?;
    b.empty("a:extraClrSchemeLst", &[])?;
    b.close("a:theme")?;
    Ok(b.finish())
}

fn scheme_fill(b: &mut XmlBuilder) -> Result<(), DocumentError> {
    b.open("a:solidFill", &[])?;
    b.empty("a:schemeClr", &[("val", "phClr")])?;
    b.close("a:solidFill")
}

pub(super) fn presentation_properties() -> Result<Vec<u8>, DocumentError> {
    let mut b = XmlBuilder::new()?;
    b.empty(
        "p:presentationPr",
        &[("xmlns:a", NS_A), ("xmlns:r", NS_R), ("xmlns:p", NS_P)],
    )?;
    Ok(b.finish())
}

pub(super) fn table_styles() -> Result<Vec<u8>, DocumentError> {
    let mut b = XmlBuilder::new()?;
    b.empty(
        "a:tblStyleLst",
        &[
            ("xmlns:a", NS_A),
            ("def", "{5C22544A-7EE6-4342-B048-85BDC9FD1C3A}"),
        ],
    )?;
    Ok(b.finish())
}
