//! Domain types for slide specifications, rendering styles, reports, and
//! read-back deck outlines.

use chrono::NaiveDate;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// MIME type of a generated deck.
pub const DECK_MIME: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation";

/// Smallest font size, in points, a run may carry.
pub const MIN_POINT_SIZE: f64 = 1.0;

/// Largest font size, in points, a run may carry.
pub const MAX_POINT_SIZE: f64 = 4000.0;

/// Characters that mark an entry as an indented bullet.
pub const BULLET_MARKERS: &[char] = &['•', '▪', '-', '–', '*'];

/// Returns true if the trimmed entry starts with a bullet marker.
pub fn is_bullet_entry(entry: &str) -> bool {
    entry.trim_start().starts_with(BULLET_MARKERS)
}

/// Paragraph text of a single fetched page.
///
/// Never empty: the fetcher reports an error instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedContent(String);

impl ExtractedContent {
    /// Wrap extracted text, returning `None` if it is blank.
    pub fn new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            None
        } else {
            Some(Self(text))
        }
    }

    /// The extracted text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A generated competitor analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    text: String,
}

impl Report {
    /// MIME type used when offering the report as a download.
    pub const MIME: &'static str = "text/plain";

    /// Create a report from already cleaned text.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// The report body (markdown-ish plain text).
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Download file name for a report generated on `date`.
    pub fn file_name(date: NaiveDate) -> String {
        format!("competitor_analysis_{}.txt", date.format("%Y%m%d"))
    }

    /// Download file name for a report generated today (local time).
    pub fn file_name_today() -> String {
        Self::file_name(chrono::Local::now().date_naive())
    }
}

/// An sRGB colour, written as `RRGGBB` in deck XML and spec files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// The orange used by the built-in decks.
    pub const ORANGE: Rgb = Rgb(255, 165, 0);
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

impl FromStr for Rgb {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let hex = input.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(format!("Invalid colour '{}': expected RRGGBB", input));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|e| e.to_string())
        };
        Ok(Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl TryFrom<String> for Rgb {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.to_string()
    }
}

/// Rendering configuration shared by every slide of a deck.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckStyle {
    /// Solid background fill; `None` keeps the theme background.
    pub background: Option<Rgb>,

    /// Latin font face for all text runs.
    pub font: Option<String>,

    /// Text colour for all runs.
    pub text_color: Option<Rgb>,

    /// Title size in points; `None` inherits the 18pt default.
    #[serde(deserialize_with = "point_size")]
    pub title_size: Option<f64>,

    /// Body size in points; `None` inherits the 18pt default.
    #[serde(deserialize_with = "point_size")]
    pub body_size: Option<f64>,

    /// Render titles and column headings bold.
    pub bold_titles: bool,

    /// Prefix added to bullets that do not already start with a marker.
    pub bullet_prefix: String,
}

/// Accept only sizes a slide run can carry.
fn point_size<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<f64>::deserialize(deserializer)? {
        Some(points) if !(MIN_POINT_SIZE..=MAX_POINT_SIZE).contains(&points) => {
            Err(D::Error::custom(format!(
                "font size {} is outside {}..={} points",
                points, MIN_POINT_SIZE, MAX_POINT_SIZE
            )))
        }
        size => Ok(size),
    }
}

impl Default for DeckStyle {
    fn default() -> Self {
        Self {
            background: None,
            font: None,
            text_color: None,
            title_size: None,
            body_size: None,
            bold_titles: false,
            bullet_prefix: "• ".to_string(),
        }
    }
}

impl DeckStyle {
    /// Set the background colour.
    pub fn with_background(mut self, color: Rgb) -> Self {
        self.background = Some(color);
        self
    }

    /// Set the font face.
    pub fn with_font(mut self, font: impl Into<String>) -> Self {
        self.font = Some(font.into());
        self
    }

    /// Bullet text as rendered, with the configured prefix when needed.
    pub fn bullet_text(&self, bullet: &str) -> String {
        if is_bullet_entry(bullet) || self.bullet_prefix.is_empty() {
            bullet.to_string()
        } else {
            format!("{}{}", self.bullet_prefix, bullet)
        }
    }
}

/// A picture to place on a slide. Measurements are in inches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImagePlacement {
    /// Image file, relative to the builder's asset root unless absolute.
    pub path: PathBuf,
    pub left: f64,
    pub top: f64,
    pub width: f64,
    /// Derived from the image's aspect ratio when omitted.
    #[serde(default)]
    pub height: Option<f64>,
}

impl ImagePlacement {
    /// Place `path` at (`left`, `top`) with the given width.
    pub fn new(path: impl Into<PathBuf>, left: f64, top: f64, width: f64) -> Self {
        Self {
            path: path.into(),
            left,
            top,
            width,
            height: None,
        }
    }
}

/// One column of a two-column slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub heading: String,
    pub bullets: Vec<String>,
}

impl Column {
    pub fn new<I, S>(heading: impl Into<String>, bullets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            heading: heading.into(),
            bullets: bullets.into_iter().map(Into::into).collect(),
        }
    }
}

/// The body of a slide below its title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "layout", rename_all = "snake_case")]
pub enum SlideBody {
    /// Bullets under the title at level 1, in the same text box.
    Bullets { bullets: Vec<String> },
    /// Two independent bullet columns under one heading.
    TwoColumn { left: Column, right: Column },
    /// Flat entries: bullet-marked entries at level 1, others are section
    /// headers at level 0.
    LongForm { entries: Vec<String> },
}

/// Content of a single slide, rendered in the order given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideSpec {
    pub title: String,
    #[serde(flatten)]
    pub body: SlideBody,
    #[serde(default)]
    pub images: Vec<ImagePlacement>,
}

impl SlideSpec {
    /// A title followed by level-1 bullets.
    pub fn bullets<I, S>(title: impl Into<String>, bullets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            title: title.into(),
            body: SlideBody::Bullets {
                bullets: bullets.into_iter().map(Into::into).collect(),
            },
            images: Vec::new(),
        }
    }

    /// A heading with two side-by-side bullet columns.
    pub fn two_column(title: impl Into<String>, left: Column, right: Column) -> Self {
        Self {
            title: title.into(),
            body: SlideBody::TwoColumn { left, right },
            images: Vec::new(),
        }
    }

    /// A title followed by a flat list of headers and bullets.
    pub fn long_form<I, S>(title: impl Into<String>, entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            title: title.into(),
            body: SlideBody::LongForm {
                entries: entries.into_iter().map(Into::into).collect(),
            },
            images: Vec::new(),
        }
    }

    /// Add a picture to this slide.
    pub fn with_image(mut self, image: ImagePlacement) -> Self {
        self.images.push(image);
        self
    }
}

/// A deck description as stored in a JSON spec file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeckFile {
    /// Output file name suggestion.
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub style: DeckStyle,
    pub slides: Vec<SlideSpec>,
}

/// Slides read back from a PPTX package.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeckOutline {
    /// Slides in presentation order.
    pub slides: Vec<SlideOutline>,
}

impl DeckOutline {
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }
}

/// A single slide read back from a package.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SlideOutline {
    /// 1-based slide number.
    pub number: usize,

    /// Solid background colour, if the slide sets one.
    pub background: Option<String>,

    /// Text shapes in document order.
    pub shapes: Vec<ShapeOutline>,

    /// Number of embedded pictures.
    pub pictures: usize,
}

impl SlideOutline {
    /// Create an empty slide outline with the given number.
    pub fn new(number: usize) -> Self {
        Self {
            number,
            ..Default::default()
        }
    }

    /// All paragraphs of all shapes, in document order.
    pub fn paragraphs(&self) -> impl Iterator<Item = &ParagraphOutline> {
        self.shapes.iter().flat_map(|s| s.paragraphs.iter())
    }

    /// Number of paragraphs at the given indentation level.
    pub fn count_at_level(&self, level: u8) -> usize {
        self.paragraphs().filter(|p| p.level == level).count()
    }
}

/// A text shape with its offset in EMU.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShapeOutline {
    pub x: i64,
    pub y: i64,
    pub paragraphs: Vec<ParagraphOutline>,
}

impl ShapeOutline {
    /// Paragraph texts joined with newlines.
    pub fn text(&self) -> String {
        self.paragraphs
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A paragraph with its indentation level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParagraphOutline {
    pub level: u8,
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_file_name() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        assert_eq!(Report::file_name(date), "competitor_analysis_20250307.txt");
    }

    #[test]
    fn test_extracted_content_rejects_blank() {
        assert!(ExtractedContent::new("  \n ").is_none());
        assert_eq!(ExtractedContent::new("A").unwrap().as_str(), "A");
    }

    #[test]
    fn test_rgb_parse_and_display() {
        assert_eq!("FFA500".parse::<Rgb>().unwrap(), Rgb::ORANGE);
        assert_eq!("#ffa500".parse::<Rgb>().unwrap(), Rgb::ORANGE);
        assert_eq!(Rgb(1, 2, 255).to_string(), "0102FF");
        assert!("FFA50".parse::<Rgb>().is_err());
        assert!("GGGGGG".parse::<Rgb>().is_err());
    }

    #[test]
    fn test_bullet_entry_detection() {
        assert!(is_bullet_entry("  • Plug-and-play"));
        assert!(is_bullet_entry("- item"));
        for marker in ["•", "-", "*", "▪", "–"] {
            assert!(is_bullet_entry(&format!("{} x", marker)), "{}", marker);
        }
        assert!(!is_bullet_entry("◦ hollow"));
        assert!(!is_bullet_entry("Target Mid-Market"));
        assert!(!is_bullet_entry(""));
    }

    #[test]
    fn test_bullet_prefix_applied_once() {
        let style = DeckStyle::default();
        assert_eq!(style.bullet_text("Fast"), "• Fast");
        assert_eq!(style.bullet_text("• Fast"), "• Fast");
    }

    #[test]
    fn test_deck_file_from_json() {
        let json = r#"{
            "style": { "background": "FFA500", "font": "Arial" },
            "slides": [
                { "title": "Intro", "layout": "bullets", "bullets": ["One", "Two"],
                  "images": [{ "path": "logo.png", "left": 8.0, "top": 0.2, "width": 1.5 }] },
                { "title": "Compare", "layout": "two_column",
                  "left": { "heading": "Before:", "bullets": ["Slow"] },
                  "right": { "heading": "After:", "bullets": ["Fast"] } },
                { "title": "Plan", "layout": "long_form", "entries": ["Header", "  • detail"] }
            ]
        }"#;

        let deck: DeckFile = serde_json::from_str(json).unwrap();

        assert_eq!(deck.style.background, Some(Rgb::ORANGE));
        assert_eq!(deck.style.bullet_prefix, "• ");
        assert_eq!(deck.slides.len(), 3);
        assert_eq!(deck.slides[0].images[0].height, None);
        assert!(matches!(deck.slides[1].body, SlideBody::TwoColumn { .. }));
        assert_eq!(
            deck.slides[2].body,
            SlideBody::LongForm {
                entries: vec!["Header".to_string(), "  • detail".to_string()]
            }
        );
    }

    #[test]
    fn test_style_rejects_invalid_font_sizes() {
        for size in ["0", "-12", "5000"] {
            let json = format!(r#"{{ "title_size": {} }}"#, size);
            assert!(serde_json::from_str::<DeckStyle>(&json).is_err(), "{}", size);
        }
        let json = r#"{ "body_size": -1.5 }"#;
        assert!(serde_json::from_str::<DeckStyle>(json).is_err());

        let style: DeckStyle =
            serde_json::from_str(r#"{ "title_size": 32, "body_size": null }"#).unwrap();
        assert_eq!(style.title_size, Some(32.0));
        assert_eq!(style.body_size, None);
    }
}
