//! PPTX reader producing a [`DeckOutline`].

use pitchkit_core::{DeckError, DeckOutline, ParagraphOutline, ShapeOutline, SlideOutline};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::HashMap;
use std::io::{Read, Seek};
use zip::ZipArchive;

use crate::Result;

const PRESENTATION_PATH: &str = "ppt/presentation.xml";
const PRESENTATION_RELS_PATH: &str = "ppt/_rels/presentation.xml.rels";

/// Reads slide text, levels, backgrounds and pictures back out of a deck.
pub struct DeckReader;

impl DeckReader {
    /// Create a new deck reader.
    pub fn new() -> Self {
        Self
    }

    /// Read a PPTX package.
    pub fn read<R: Read + Seek>(&self, reader: R) -> Result<DeckOutline> {
        let mut archive = ZipArchive::new(reader)
            .map_err(|e| DeckError::Zip(format!("Failed to open ZIP: {}", e)))?;

        let mut outline = DeckOutline::default();
        for (idx, slide_path) in self.slide_order(&mut archive)?.iter().enumerate() {
            let content = read_file_from_archive(&mut archive, slide_path)?;
            outline.slides.push(parse_slide(&content, idx + 1)?);
        }

        Ok(outline)
    }

    /// Slide part paths in presentation order, from `p:sldIdLst`.
    fn slide_order<R: Read + Seek>(&self, archive: &mut ZipArchive<R>) -> Result<Vec<String>> {
        let rels = read_file_from_archive(archive, PRESENTATION_RELS_PATH)?;
        let targets = slide_targets(&rels)?;

        let presentation = read_file_from_archive(archive, PRESENTATION_PATH)?;
        let mut reader = Reader::from_str(&presentation);
        let mut order = Vec::new();

        loop {
            match reader.read_event() {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                    if local_name(e.name().as_ref()) == b"sldId" =>
                {
                    let Some(rel_id) = attribute(e, b"r:id") else {
                        continue;
                    };
                    let target = targets.get(&rel_id).ok_or_else(|| {
                        DeckError::Package(format!("Slide relationship '{}' not found", rel_id))
                    })?;
                    order.push(target.clone());
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(DeckError::Xml(format!(
                        "Error parsing presentation: {}",
                        e
                    )));
                }
                _ => {}
            }
        }

        Ok(order)
    }
}

impl Default for DeckReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Map slide relationship ids to package paths.
fn slide_targets(rels: &str) -> Result<HashMap<String, String>> {
    let mut reader = Reader::from_str(rels);
    let mut targets = HashMap::new();

    loop {
        match reader.read_event() {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                if e.name().as_ref() == b"Relationship" =>
            {
                let rel_type = attribute(e, b"Type").unwrap_or_default();
                // slideLayout/slideMaster share the prefix
                if !rel_type.ends_with("/slide") {
                    continue;
                }
                let (Some(id), Some(target)) = (attribute(e, b"Id"), attribute(e, b"Target"))
                else {
                    continue;
                };
                let full_path = match target.strip_prefix('/') {
                    Some(absolute) => absolute.to_string(),
                    None => format!("ppt/{}", target),
                };
                targets.insert(id, full_path);
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(DeckError::Xml(format!(
                    "Error parsing relationships: {}",
                    e
                )));
            }
            _ => {}
        }
    }

    Ok(targets)
}

/// Parse one slide part.
fn parse_slide(xml_content: &str, number: usize) -> Result<SlideOutline> {
    let mut slide = SlideOutline::new(number);
    let mut reader = Reader::from_str(xml_content);

    let mut in_background = false;
    let mut current_shape: Option<ShapeOutline> = None;
    let mut current_paragraph: Option<ParagraphOutline> = None;
    let mut in_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => match local_name(e.name().as_ref()) {
                b"bg" => in_background = true,
                b"sp" => current_shape = Some(ShapeOutline::default()),
                b"pic" => slide.pictures += 1,
                b"p" if current_shape.is_some() => {
                    current_paragraph = Some(ParagraphOutline {
                        level: 0,
                        text: String::new(),
                    });
                }
                b"pPr" => set_level(&mut current_paragraph, e),
                b"t" => in_text = current_paragraph.is_some(),
                _ => {}
            },
            Ok(Event::Empty(ref e)) => match local_name(e.name().as_ref()) {
                b"srgbClr" if in_background => {
                    slide.background = attribute(e, b"val");
                }
                b"off" => {
                    // The first offset inside a shape is its own position.
                    if let Some(shape) = current_shape.as_mut() {
                        if shape.paragraphs.is_empty() && shape.x == 0 && shape.y == 0 {
                            shape.x = numeric_attribute(e, b"x");
                            shape.y = numeric_attribute(e, b"y");
                        }
                    }
                }
                b"pPr" => set_level(&mut current_paragraph, e),
                b"p" => {
                    if let Some(shape) = current_shape.as_mut() {
                        shape.paragraphs.push(ParagraphOutline {
                            level: 0,
                            text: String::new(),
                        });
                    }
                }
                _ => {}
            },
            Ok(Event::Text(ref e)) => {
                if in_text {
                    if let Some(paragraph) = current_paragraph.as_mut() {
                        let text = e.unescape().unwrap_or_default();
                        paragraph.text.push_str(&text);
                    }
                }
            }
            Ok(Event::End(ref e)) => match local_name(e.name().as_ref()) {
                b"bg" => in_background = false,
                b"t" => in_text = false,
                b"p" => {
                    if let (Some(shape), Some(paragraph)) =
                        (current_shape.as_mut(), current_paragraph.take())
                    {
                        shape.paragraphs.push(paragraph);
                    }
                }
                b"sp" => {
                    if let Some(shape) = current_shape.take() {
                        if !shape.paragraphs.is_empty() {
                            slide.shapes.push(shape);
                        }
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(DeckError::Xml(format!(
                    "Error parsing slide {}: {}",
                    number, e
                )));
            }
            _ => {}
        }
    }

    Ok(slide)
}

fn set_level(paragraph: &mut Option<ParagraphOutline>, e: &BytesStart<'_>) {
    if let Some(paragraph) = paragraph.as_mut() {
        paragraph.level = attribute(e, b"lvl")
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);
    }
}

fn attribute(e: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == key)
        .map(|attr| String::from_utf8_lossy(&attr.value).to_string())
}

fn numeric_attribute(e: &BytesStart<'_>, key: &[u8]) -> i64 {
    attribute(e, key).and_then(|v| v.parse().ok()).unwrap_or(0)
}

/// Read a file from the ZIP archive.
pub(crate) fn read_file_from_archive<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    path: &str,
) -> Result<String> {
    let mut file = archive
        .by_name(path)
        .map_err(|e| DeckError::Zip(format!("File not found in archive '{}': {}", path, e)))?;

    let mut content = String::new();
    file.read_to_string(&mut content)
        .map_err(|e| DeckError::Zip(format!("Failed to read '{}': {}", path, e)))?;

    Ok(content)
}

/// Extract the local name from a potentially namespaced XML element name.
pub(crate) fn local_name(name: &[u8]) -> &[u8] {
    if let Some(pos) = name.iter().position(|&b| b == b':') {
        &name[pos + 1..]
    } else {
        name
    }
}
