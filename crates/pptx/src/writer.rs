//! PPTX deck builder.

use pitchkit_core::{DeckError, DeckStyle, DeckWarning, ImagePlacement, SlideSpec};
use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::image::ImageFormat;
use crate::parts::{self, CT_SLIDE, REL_IMAGE, REL_SLIDE_LAYOUT};
use crate::slide::{self, PlacedPicture};
use crate::template::DeckTemplate;
use crate::units::{inches, Frame, SlideSize};
use crate::xml::relationships;
use crate::Result;

/// A serialized deck and the non-fatal problems met while building it.
#[derive(Debug, Clone)]
pub struct BuiltDeck {
    /// The complete `.pptx` package.
    pub bytes: Vec<u8>,
    pub slide_count: usize,
    pub warnings: Vec<DeckWarning>,
}

/// Builds PPTX packages from slide specifications.
///
/// One builder serves every deck variant: the body of each [`SlideSpec`]
/// picks the layout and the [`DeckStyle`] applies to all slides.
#[derive(Debug, Clone)]
pub struct DeckBuilder {
    style: DeckStyle,
    title: String,
    asset_root: Option<PathBuf>,
    template: Option<PathBuf>,
}

/// One file inside the package.
struct Part {
    name: String,
    content_type: Option<&'static str>,
    data: Vec<u8>,
    method: CompressionMethod,
}

impl Part {
    fn xml(name: impl Into<String>, content_type: Option<&'static str>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content_type,
            data,
            method: CompressionMethod::Deflated,
        }
    }
}

impl DeckBuilder {
    /// Create a builder rendering with `style`.
    pub fn new(style: DeckStyle) -> Self {
        Self {
            style,
            title: "Presentation".to_string(),
            asset_root: None,
            template: None,
        }
    }

    /// Set the document title stored in the package properties.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Resolve relative image paths against `dir`.
    pub fn with_asset_root(mut self, dir: impl Into<PathBuf>) -> Self {
        self.asset_root = Some(dir.into());
        self
    }

    /// Take the theme and slide size from an existing deck.
    ///
    /// Relative paths are taken from the working directory, never from the
    /// asset root. A missing or unreadable template only produces a warning.
    pub fn with_template(mut self, path: impl Into<PathBuf>) -> Self {
        self.template = Some(path.into());
        self
    }

    pub fn style(&self) -> &DeckStyle {
        &self.style
    }

    /// Build the deck into an in-memory buffer.
    pub fn build(&self, slides: &[SlideSpec]) -> Result<BuiltDeck> {
        let mut warnings = Vec::new();
        let (theme, slide_size) = self.resolve_template(&mut warnings);

        let mut parts = Vec::new();
        let mut media_count = 0usize;

        for (idx, spec) in slides.iter().enumerate() {
            let number = idx + 1;
            let mut pictures = Vec::new();

            for placement in &spec.images {
                match self.load_image(placement, number) {
                    Ok((format, bytes)) => {
                        media_count += 1;
                        let media_name = format!("image{}.{}", media_count, format.extension());
                        let frame = picture_frame(placement, format.dimensions(&bytes));
                        parts.push(Part {
                            name: format!("ppt/media/{}", media_name),
                            content_type: None,
                            data: bytes,
                            method: CompressionMethod::Stored,
                        });
                        pictures.push(PlacedPicture {
                            // rId1 is the layout
                            rel_id: format!("rId{}", pictures.len() + 2),
                            target: format!("../media/{}", media_name),
                            description: placement
                                .path
                                .file_name()
                                .map(|n| n.to_string_lossy().to_string())
                                .unwrap_or_default(),
                            frame,
                        });
                    }
                    Err(warning) => {
                        log::warn!("{}", warning);
                        warnings.push(warning);
                    }
                }
            }

            log::debug!(
                "Rendering slide {} '{}' with {} picture(s)",
                number,
                spec.title,
                pictures.len()
            );
            parts.push(Part::xml(
                format!("ppt/slides/slide{}.xml", number),
                Some(CT_SLIDE),
                slide::render(spec, &self.style, &pictures)?,
            ));
            parts.push(Part::xml(
                format!("ppt/slides/_rels/slide{}.xml.rels", number),
                None,
                slide_rels(&pictures)?,
            ));
        }

        parts.extend(self.fixed_parts(slides.len(), slide_size, theme)?);
        let bytes = package(parts)?;

        Ok(BuiltDeck {
            bytes,
            slide_count: slides.len(),
            warnings,
        })
    }

    /// Build the deck and write it to `path`.
    pub fn write_to_file(&self, slides: &[SlideSpec], path: impl AsRef<Path>) -> Result<BuiltDeck> {
        let deck = self.build(slides)?;
        fs::write(path.as_ref(), &deck.bytes)?;
        log::info!(
            "Wrote {} slide(s) to {}",
            deck.slide_count,
            path.as_ref().display()
        );
        Ok(deck)
    }

    fn resolve_template(&self, warnings: &mut Vec<DeckWarning>) -> (Vec<u8>, SlideSize) {
        let default = (
            parts::DEFAULT_THEME.as_bytes().to_vec(),
            SlideSize::default(),
        );
        let Some(path) = &self.template else {
            return default;
        };

        match DeckTemplate::open(path) {
            Ok(template) => {
                log::debug!("Using theme from template {}", path.display());
                (template.theme, template.slide_size)
            }
            Err(e) => {
                let warning = DeckWarning::TemplateUnavailable {
                    path: path.clone(),
                    reason: e.to_string(),
                };
                log::warn!("{}", warning);
                warnings.push(warning);
                default
            }
        }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        match &self.asset_root {
            Some(root) if path.is_relative() => root.join(path),
            _ => path.to_path_buf(),
        }
    }

    fn load_image(
        &self,
        placement: &ImagePlacement,
        slide: usize,
    ) -> std::result::Result<(ImageFormat, Vec<u8>), DeckWarning> {
        let bytes = fs::read(self.resolve(&placement.path)).map_err(|e| {
            DeckWarning::ImageUnavailable {
                slide,
                path: placement.path.clone(),
                reason: e.to_string(),
            }
        })?;

        let format =
            ImageFormat::from_magic(&bytes).ok_or_else(|| DeckWarning::UnsupportedImage {
                slide,
                path: placement.path.clone(),
            })?;

        Ok((format, bytes))
    }

    fn fixed_parts(
        &self,
        slide_count: usize,
        slide_size: SlideSize,
        theme: Vec<u8>,
    ) -> Result<Vec<Part>> {
        Ok(vec![
            Part::xml("_rels/.rels", None, parts::package_rels()?),
            Part::xml(
                "docProps/core.xml",
                Some(parts::CT_CORE_PROPS),
                parts::core_properties(&self.title)?,
            ),
            Part::xml(
                "docProps/app.xml",
                Some(parts::CT_APP_PROPS),
                parts::app_properties(slide_count)?,
            ),
            Part::xml(
                "ppt/presentation.xml",
                Some(parts::CT_PRESENTATION),
                parts::presentation(slide_count, slide_size)?,
            ),
            Part::xml(
                "ppt/_rels/presentation.xml.rels",
                None,
                parts::presentation_rels(slide_count)?,
            ),
            Part::xml(
                "ppt/presProps.xml",
                Some(parts::CT_PRES_PROPS),
                parts::presentation_properties()?,
            ),
            Part::xml(
                "ppt/viewProps.xml",
                Some(parts::CT_VIEW_PROPS),
                parts::view_properties()?,
            ),
            Part::xml(
                "ppt/tableStyles.xml",
                Some(parts::CT_TABLE_STYLES),
                parts::table_styles()?,
            ),
            Part::xml(
                parts::MASTER_PATH,
                Some(parts::CT_SLIDE_MASTER),
                parts::slide_master()?,
            ),
            Part::xml(
                "ppt/slideMasters/_rels/slideMaster1.xml.rels",
                None,
                parts::master_rels()?,
            ),
            Part::xml(
                parts::LAYOUT_PATH,
                Some(parts::CT_SLIDE_LAYOUT),
                parts::blank_layout()?,
            ),
            Part::xml(
                "ppt/slideLayouts/_rels/slideLayout1.xml.rels",
                None,
                parts::layout_rels()?,
            ),
            Part::xml(parts::THEME_PATH, Some(parts::CT_THEME), theme),
        ])
    }
}

impl Default for DeckBuilder {
    fn default() -> Self {
        Self::new(DeckStyle::default())
    }
}

/// Position and size of a picture; height follows the aspect ratio unless
/// given, and falls back to a square when the size is unknown.
fn picture_frame(placement: &ImagePlacement, dimensions: Option<(u32, u32)>) -> Frame {
    let cx = inches(placement.width);
    let cy = match (placement.height, dimensions) {
        (Some(height), _) => inches(height),
        (None, Some((w, h))) => (cx as f64 * h as f64 / w as f64).round() as i64,
        (None, None) => cx,
    };
    Frame {
        x: inches(placement.left),
        y: inches(placement.top),
        cx,
        cy,
    }
}

fn slide_rels(pictures: &[PlacedPicture]) -> Result<Vec<u8>> {
    let mut rels = vec![(
        "rId1".to_string(),
        REL_SLIDE_LAYOUT,
        "../slideLayouts/slideLayout1.xml".to_string(),
    )];
    rels.extend(
        pictures
            .iter()
            .map(|p| (p.rel_id.clone(), REL_IMAGE, p.target.clone())),
    );
    relationships(&rels)
}

/// Zip all parts, content types first.
fn package(parts: Vec<Part>) -> Result<Vec<u8>> {
    let overrides: Vec<(String, &str)> = parts
        .iter()
        .filter_map(|p| p.content_type.map(|ct| (p.name.clone(), ct)))
        .collect();
    let content_types = parts::content_types(&overrides)?;

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let deflated = FileOptions::default().compression_method(CompressionMethod::Deflated);

    zip.start_file("[Content_Types].xml", deflated)
        .map_err(|e| DeckError::Zip(e.to_string()))?;
    zip.write_all(&content_types)?;

    for part in parts {
        let options = FileOptions::default().compression_method(part.method);
        zip.start_file(part.name, options)
            .map_err(|e| DeckError::Zip(e.to_string()))?;
        zip.write_all(&part.data)?;
    }

    let cursor = zip.finish().map_err(|e| DeckError::Zip(e.to_string()))?;
    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::tests::png_header;
    use crate::reader::DeckReader;
    use pitchkit_core::catalog::valuezen_deck;
    use pitchkit_core::{Column, Rgb};

    fn read_back(bytes: &[u8]) -> pitchkit_core::DeckOutline {
        DeckReader::new().read(Cursor::new(bytes)).unwrap()
    }

    #[test]
    fn test_slide_count_matches_specs() {
        let slides = vec![
            SlideSpec::bullets("One", ["a"]),
            SlideSpec::bullets("Two", ["b", "c"]),
        ];
        let deck = DeckBuilder::default().build(&slides).unwrap();

        assert_eq!(deck.slide_count, 2);
        assert!(deck.warnings.is_empty());
        let outline = read_back(&deck.bytes);
        assert_eq!(outline.slide_count(), 2);
        assert_eq!(outline.slides[1].shapes[0].text(), "Two\n• b\n• c");
    }

    #[test]
    fn test_empty_deck_is_valid() {
        let deck = DeckBuilder::default().build(&[]).unwrap();
        assert_eq!(read_back(&deck.bytes).slide_count(), 0);
    }

    #[test]
    fn test_missing_image_is_a_warning() {
        let dir = tempfile::tempdir().unwrap();
        let slides = vec![
            SlideSpec::bullets("With logo", ["x"])
                .with_image(ImagePlacement::new("logo.png", 8.0, 0.2, 1.5)),
            SlideSpec::bullets("Plain", ["y"]),
        ];

        let deck = DeckBuilder::default()
            .with_asset_root(dir.path())
            .build(&slides)
            .unwrap();

        assert_eq!(deck.warnings.len(), 1);
        assert!(matches!(
            &deck.warnings[0],
            DeckWarning::ImageUnavailable { slide: 1, path, .. } if path == Path::new("logo.png")
        ));
        let outline = read_back(&deck.bytes);
        assert_eq!(outline.slide_count(), 2);
        assert_eq!(outline.slides[0].pictures, 0);
        assert_eq!(outline.slides[0].shapes[0].text(), "With logo\n• x");
    }

    #[test]
    fn test_image_embedded_with_aspect_ratio() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("logo.png"), png_header(200, 100)).unwrap();
        let placement = ImagePlacement::new("logo.png", 8.0, 0.2, 1.5);
        let slides = vec![SlideSpec::bullets("Logo", ["x"]).with_image(placement.clone())];

        let deck = DeckBuilder::default()
            .with_asset_root(dir.path())
            .build(&slides)
            .unwrap();

        assert!(deck.warnings.is_empty());
        assert_eq!(read_back(&deck.bytes).slides[0].pictures, 1);

        let frame = picture_frame(&placement, Some((200, 100)));
        assert_eq!(frame.cx, inches(1.5));
        assert_eq!(frame.cy, inches(0.75));
    }

    #[test]
    fn test_unsupported_image_is_a_warning() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("notes.txt"), b"not an image").unwrap();
        let slides = vec![SlideSpec::bullets("Bad", ["x"])
            .with_image(ImagePlacement::new("notes.txt", 1.0, 1.0, 1.0))];

        let deck = DeckBuilder::default()
            .with_asset_root(dir.path())
            .build(&slides)
            .unwrap();

        assert!(matches!(
            deck.warnings[0],
            DeckWarning::UnsupportedImage { slide: 1, .. }
        ));
        assert_eq!(read_back(&deck.bytes).slide_count(), 1);
    }

    #[test]
    fn test_two_column_groups_preserve_order() {
        let slides = vec![SlideSpec::two_column(
            "Key Benefits",
            Column::new("Before:", ["l1", "l2", "l3"]),
            Column::new("After:", ["r1", "r2"]),
        )];
        let deck = DeckBuilder::default().build(&slides).unwrap();
        let slide = &read_back(&deck.bytes).slides[0];

        assert_eq!(slide.shapes.len(), 3);
        assert_eq!(slide.shapes[1].text(), "Before:\n• l1\n• l2\n• l3");
        assert_eq!(slide.shapes[2].text(), "After:\n• r1\n• r2");
        assert!(slide.shapes[1].x < slide.shapes[2].x);
    }

    #[test]
    fn test_long_form_levels_survive_round_trip() {
        let mut entries = Vec::new();
        for section in 0..3 {
            entries.push(format!("Section {}", section));
            for item in 0..3 {
                if section * 3 + item < 8 {
                    entries.push(format!("  • item {}", section * 3 + item));
                }
            }
        }
        entries.push(String::new());
        while entries.len() < 17 {
            entries.push(format!("Closing note {}", entries.len()));
        }
        assert_eq!(entries.len(), 17);

        let slides = vec![
            SlideSpec::bullets("A", ["1"]),
            SlideSpec::bullets("B", ["2"]),
            SlideSpec::bullets("C", ["3"]),
            SlideSpec::long_form("Plan", entries),
        ];
        let deck = DeckBuilder::default().build(&slides).unwrap();
        let outline = read_back(&deck.bytes);

        assert_eq!(outline.slide_count(), 4);
        let plan = &outline.slides[3];
        assert_eq!(plan.count_at_level(1), 8);
        // 9 headers and spacers plus the title
        assert_eq!(plan.count_at_level(0), 10);
    }

    #[test]
    fn test_valuezen_without_assets() {
        let dir = tempfile::tempdir().unwrap();
        let deck_file = valuezen_deck();

        let deck = DeckBuilder::new(deck_file.style.clone())
            .with_asset_root(dir.path())
            .build(&deck_file.slides)
            .unwrap();

        assert_eq!(deck.warnings.len(), 2);
        let outline = read_back(&deck.bytes);
        assert_eq!(outline.slide_count(), 4);
        assert!(outline
            .slides
            .iter()
            .all(|s| s.background.as_deref() == Some("FFA500")));
        assert_eq!(outline.slides[3].count_at_level(1), 11);
    }

    #[test]
    fn test_missing_template_falls_back() {
        let deck = DeckBuilder::default()
            .with_template("/nonexistent-dir/custom_template.pptx")
            .build(&[SlideSpec::bullets("T", ["x"])])
            .unwrap();

        assert!(matches!(
            deck.warnings[0],
            DeckWarning::TemplateUnavailable { .. }
        ));
        assert_eq!(read_back(&deck.bytes).slide_count(), 1);
    }

    #[test]
    fn test_template_theme_and_size_reused() {
        let dir = tempfile::tempdir().unwrap();
        let template_path = dir.path().join("custom_template.pptx");
        DeckBuilder::default()
            .write_to_file(&[], &template_path)
            .unwrap();

        let deck = DeckBuilder::new(DeckStyle::default().with_background(Rgb(0, 0, 0)))
            .with_template(&template_path)
            .build(&[SlideSpec::bullets("T", ["x"])])
            .unwrap();

        assert!(deck.warnings.is_empty());
        let template = DeckTemplate::from_reader(Cursor::new(deck.bytes)).unwrap();
        assert_eq!(template.slide_size, SlideSize::default());
        assert_eq!(template.theme, parts::DEFAULT_THEME.as_bytes());
    }

    #[test]
    fn test_relative_template_ignores_asset_root() {
        let assets = tempfile::tempdir().unwrap();
        let template = tempfile::Builder::new()
            .prefix("relative_template")
            .suffix(".pptx")
            .tempfile_in(".")
            .unwrap();
        DeckBuilder::default()
            .write_to_file(&[], template.path())
            .unwrap();
        let relative = PathBuf::from(template.path().file_name().unwrap());
        assert!(relative.is_relative());

        let deck = DeckBuilder::default()
            .with_asset_root(assets.path())
            .with_template(&relative)
            .build(&[SlideSpec::bullets("T", ["x"])])
            .unwrap();

        assert!(deck.warnings.is_empty(), "{:?}", deck.warnings);
    }

    #[test]
    fn test_write_to_file_matches_buffer() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deck.pptx");
        let slides = vec![SlideSpec::bullets("Saved", ["x"])];

        let deck = DeckBuilder::default().write_to_file(&slides, &path).unwrap();

        let on_disk = fs::read(&path).unwrap();
        assert_eq!(on_disk, deck.bytes);
        assert_eq!(read_back(&on_disk).slide_count(), 1);
    }
}
