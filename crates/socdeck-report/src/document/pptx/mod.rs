//! Office Open XML presentation (`.pptx`) backend.
//!
//! Output is deterministic: parts are written in a fixed order, every zip
//! entry carries the same timestamp, and embedded media are named by first
//! appearance after deduplication by content hash.

mod parts;
mod slide;
mod xml;

use std::collections::HashMap;
use std::io::{Cursor, Write};

use sha2::{Digest, Sha256};
use socdeck_assets::ImageKind;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::DocumentError;

use super::backend::{DocumentBackend, DocumentMeta};
use super::model::SlideElement;
use super::sink::Deck;
use parts::Relationship;

pub const PPTX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation";

struct MediaFile<'a> {
    name: String,
    kind: ImageKind,
    bytes: &'a [u8],
}

/// Embedded images for a deck, deduplicated by SHA-256.
struct MediaTable<'a> {
    files: Vec<MediaFile<'a>>,
    by_hash: HashMap<String, usize>,
    /// Per slide, the media index of each image element in drawing order.
    per_slide: Vec<Vec<usize>>,
}

impl<'a> MediaTable<'a> {
    fn collect(deck: &'a Deck) -> Self {
        let mut table = Self {
            files: Vec::new(),
            by_hash: HashMap::new(),
            per_slide: Vec::with_capacity(deck.len()),
        };
        for slide in deck.slides() {
            let mut indices = Vec::new();
            for element in &slide.elements {
                if let SlideElement::Image(image) = element {
                    indices.push(table.intern(image.asset.kind, &image.asset.bytes));
                }
            }
            table.per_slide.push(indices);
        }
        table
    }

    fn intern(&mut self, kind: ImageKind, bytes: &'a [u8]) -> usize {
        let hash = format!("{:x}", Sha256::digest(bytes));
        if let Some(&index) = self.by_hash.get(&hash) {
            return index;
        }
        let index = self.files.len();
        self.files.push(MediaFile {
            name: format!("image{}.{}", index + 1, kind.extension()),
            kind,
            bytes,
        });
        self.by_hash.insert(hash, index);
        index
    }

    fn content_types(&self) -> Vec<(&'static str, &'static str)> {
        let mut kinds: Vec<(&'static str, &'static str)> = self
            .files
            .iter()
            .map(|f| (f.kind.extension(), f.kind.content_type()))
            .collect();
        kinds.sort_unstable();
        kinds.dedup();
        kinds
    }

    /// Relationships for one slide plus the relationship id of each image element.
    fn slide_relationships(&self, slide_index: usize) -> (Vec<Relationship>, Vec<String>) {
        let mut rels = vec![Relationship::office(
            "rId1",
            "slideLayout",
            "../slideLayouts/slideLayout1.xml",
        )];
        let mut rel_for_media: HashMap<usize, String> = HashMap::new();
        let mut image_rels = Vec::new();

        for &media in self.per_slide.get(slide_index).map_or(&[][..], Vec::as_slice) {
            let rel_id = rel_for_media
                .entry(media)
                .or_insert_with(|| {
                    let id = format!("rId{}", rels.len() + 1);
                    rels.push(Relationship::office(
                        id.clone(),
                        "image",
                        format!("../media/{}", self.files[media].name),
                    ));
                    id
                })
                .clone();
            image_rels.push(rel_id);
        }
        (rels, image_rels)
    }
}

/// Writes decks as `.pptx` packages.
#[derive(Debug, Clone, Copy, Default)]
pub struct PptxBackend;

impl PptxBackend {
    fn write_part<W: Write + std::io::Seek>(
        zip: &mut ZipWriter<W>,
        name: &str,
        bytes: &[u8],
    ) -> Result<(), DocumentError> {
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(zip::DateTime::default());
        zip.start_file(name, options)?;
        zip.write_all(bytes)?;
        Ok(())
    }
}

impl DocumentBackend for PptxBackend {
    fn content_type(&self) -> &'static str {
        PPTX_CONTENT_TYPE
    }

    fn extension(&self) -> &'static str {
        "pptx"
    }

    fn serialize(&self, deck: &Deck, meta: &DocumentMeta) -> Result<Vec<u8>, DocumentError> {
        let slide_count = deck.len();
        let media = MediaTable::collect(deck);
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

        Self::write_part(
            &mut zip,
            "[Content_Types].xml",
            &parts::content_types(slide_count, &media.content_types())?,
        )?;
        Self::write_part(&mut zip, "_rels/.rels", &parts::root_relationships()?)?;
        Self::write_part(
            &mut zip,
            "docProps/core.xml",
            &parts::core_properties(&meta.title, meta.created)?,
        )?;
        Self::write_part(
            &mut zip,
            "docProps/app.xml",
            &parts::app_properties(slide_count, &meta.company)?,
        )?;
        Self::write_part(
            &mut zip,
            "ppt/presentation.xml",
            &parts::presentation(slide_count)?,
        )?;
        Self::write_part(
            &mut zip,
            "ppt/_rels/presentation.xml.rels",
            &parts::presentation_relationships(slide_count)?,
        )?;
        Self::write_part(
            &mut zip,
            "ppt/presProps.xml",
            &parts::presentation_properties()?,
        )?;
        Self::write_part(&mut zip, "ppt/tableStyles.xml", &parts::table_styles()?)?;
        Self::write_part(
            &mut zip,
            "ppt/theme/theme1.xml",
            &parts::theme(&meta.primary_color, &meta.secondary_color)?,
        )?;
        Self::write_part(
            &mut zip,
            "ppt/slideMasters/slideMaster1.xml",
            &parts::slide_master()?,
        )?;
        Self::write_part(
            &mut zip,
            "ppt/slideMasters/_rels/slideMaster1.xml.rels",
            &parts::slide_master_relationships()?,
        )?;
        Self::write_part(
            &mut zip,
            "ppt/slideLayouts/slideLayout1.xml",
            &parts::slide_layout()?,
        )?;
        Self::write_part(
            &mut zip,
            "ppt/slideLayouts/_rels/slideLayout1.xml.rels",
            &parts::slide_layout_relationships()?,
        )?;

        for (i, slide) in deck.slides().iter().enumerate() {
            let (rels, image_rels) = media.slide_relationships(i);
            Self::write_part(
                &mut zip,
                &format!("ppt/slides/slide{}.xml", i + 1),
                &slide::slide_xml(slide, &image_rels)?,
            )?;
            Self::write_part(
                &mut zip,
                &format!("ppt/slides/_rels/slide{}.xml.rels", i + 1),
                &parts::relationships(&rels)?,
            )?;
        }

        for file in &media.files {
            Self::write_part(&mut zip, &format!("ppt/media/{}", file.name), file.bytes)?;
        }

        let cursor = zip.finish()?;
        tracing::debug!(
            slides = slide_count,
            media = media.files.len(),
            "presentation serialized"
        );
        Ok(cursor.into_inner())
    }
}
