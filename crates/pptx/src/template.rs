//! Reuse of the theme and slide size of an existing deck.

use pitchkit_core::DeckError;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;
use zip::ZipArchive;

use crate::parts::THEME_PATH;
use crate::reader::{local_name, read_file_from_archive};
use crate::units::SlideSize;
use crate::Result;

/// Theme and geometry taken from a template deck such as
/// `custom_template.pptx`.
#[derive(Debug, Clone)]
pub struct DeckTemplate {
    /// Raw `theme1.xml` part.
    pub theme: Vec<u8>,
    pub slide_size: SlideSize,
}

impl DeckTemplate {
    /// Open a template deck from disk.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Read a template deck from any seekable source.
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        let mut archive = ZipArchive::new(reader)
            .map_err(|e| DeckError::Zip(format!("Failed to open ZIP: {}", e)))?;

        let theme = read_file_from_archive(&mut archive, THEME_PATH)?;
        if root_name(&theme)?.as_deref() != Some("theme") {
            return Err(DeckError::Package(format!(
                "{} is not a DrawingML theme",
                THEME_PATH
            )));
        }

        let presentation = read_file_from_archive(&mut archive, "ppt/presentation.xml")?;
        let slide_size = slide_size(&presentation)?.unwrap_or_default();

        Ok(Self {
            theme: theme.into_bytes(),
            slide_size,
        })
    }
}

/// Local name of the document element.
fn root_name(xml: &str) -> Result<Option<String>> {
    let mut reader = Reader::from_str(xml);
    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                let name = e.name();
                return Ok(Some(
                    String::from_utf8_lossy(local_name(name.as_ref())).to_string(),
                ));
            }
            Ok(Event::Eof) => return Ok(None),
            Err(e) => return Err(DeckError::Xml(format!("Error parsing theme: {}", e))),
            _ => {}
        }
    }
}

/// `p:sldSz` from `presentation.xml`, if present and valid.
fn slide_size(xml: &str) -> Result<Option<SlideSize>> {
    let mut reader = Reader::from_str(xml);
    loop {
        match reader.read_event() {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                if local_name(e.name().as_ref()) == b"sldSz" =>
            {
                let mut cx = None;
                let mut cy = None;
                for attr in e.attributes().flatten() {
                    let value = String::from_utf8_lossy(&attr.value).parse::<i64>().ok();
                    match attr.key.as_ref() {
                        b"cx" => cx = value,
                        b"cy" => cy = value,
                        _ => {}
                    }
                }
                return Ok(match (cx, cy) {
                    (Some(cx), Some(cy)) if cx > 0 && cy > 0 => Some(SlideSize { cx, cy }),
                    _ => None,
                });
            }
            Ok(Event::Eof) => return Ok(None),
            Err(e) => {
                return Err(DeckError::Xml(format!(
                    "Error parsing presentation: {}",
                    e
                )))
            }
            _ => {}
        }
    }
}
