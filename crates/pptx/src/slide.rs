//! Slide XML rendering.
//!
//! Every slide uses the blank layout; titles and bullets live in plain text
//! boxes positioned per body variant.

use pitchkit_core::types::is_bullet_entry;
use pitchkit_core::{Column, DeckStyle, Rgb, SlideBody, SlideSpec};

use crate::parts::group_shape_header;
use crate::units::{font_size, Frame};
use crate::xml::{XmlWriter, PML_NAMESPACES};
use crate::Result;

/// What a paragraph is, which decides its run formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Role {
    Title,
    Heading,
    Body,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Paragraph {
    pub level: u8,
    pub text: String,
    pub role: Role,
}

impl Paragraph {
    fn new(level: u8, text: impl Into<String>, role: Role) -> Self {
        Self {
            level,
            text: text.into(),
            role,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TextBox {
    pub frame: Frame,
    pub paragraphs: Vec<Paragraph>,
}

/// A picture already stored in the package.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PlacedPicture {
    pub rel_id: String,
    pub target: String,
    pub description: String,
    pub frame: Frame,
}

/// Lay out the text boxes of a slide.
pub(crate) fn layout(spec: &SlideSpec, style: &DeckStyle) -> Vec<TextBox> {
    match &spec.body {
        SlideBody::Bullets { bullets } => {
            let mut paragraphs = vec![Paragraph::new(0, spec.title.as_str(), Role::Title)];
            paragraphs.extend(
                bullets
                    .iter()
                    .map(|b| Paragraph::new(1, style.bullet_text(b), Role::Body)),
            );
            vec![TextBox {
                frame: Frame::from_inches(0.5, 0.7, 9.0, 1.5),
                paragraphs,
            }]
        }
        SlideBody::TwoColumn { left, right } => vec![
            TextBox {
                frame: Frame::from_inches(0.5, 0.5, 9.0, 1.2),
                paragraphs: vec![Paragraph::new(0, spec.title.as_str(), Role::Title)],
            },
            column_box(left, Frame::from_inches(0.5, 2.0, 4.0, 3.0), style),
            column_box(right, Frame::from_inches(5.0, 2.0, 4.0, 3.0), style),
        ],
        SlideBody::LongForm { entries } => {
            let mut paragraphs = vec![Paragraph::new(0, spec.title.as_str(), Role::Title)];
            paragraphs.extend(entries.iter().map(|entry| {
                if is_bullet_entry(entry) {
                    Paragraph::new(1, entry.as_str(), Role::Body)
                } else {
                    Paragraph::new(0, entry.as_str(), Role::Heading)
                }
            }));
            vec![TextBox {
                frame: Frame::from_inches(0.5, 0.5, 9.0, 5.0),
                paragraphs,
            }]
        }
    }
}

fn column_box(column: &Column, frame: Frame, style: &DeckStyle) -> TextBox {
    let mut paragraphs = vec![Paragraph::new(0, column.heading.as_str(), Role::Heading)];
    paragraphs.extend(
        column
            .bullets
            .iter()
            .map(|b| Paragraph::new(1, style.bullet_text(b), Role::Body)),
    );
    TextBox { frame, paragraphs }
}

/// Render `ppt/slides/slideN.xml`.
pub(crate) fn render(
    spec: &SlideSpec,
    style: &DeckStyle,
    pictures: &[PlacedPicture],
) -> Result<Vec<u8>> {
    let mut xml = XmlWriter::new()?;
    xml.start("p:sld", &PML_NAMESPACES)?;
    xml.start("p:cSld", &[])?;

    if let Some(color) = style.background {
        write_background(&mut xml, color)?;
    }

    xml.start("p:spTree", &[])?;
    group_shape_header(&mut xml)?;

    // Shape id 1 is the group itself.
    let mut shape_id = 2u32;
    for (index, text_box) in layout(spec, style).iter().enumerate() {
        let name = format!("TextBox {}", index + 1);
        write_text_box(&mut xml, shape_id, &name, text_box, style)?;
        shape_id += 1;
    }
    for (index, picture) in pictures.iter().enumerate() {
        let name = format!("Picture {}", index + 1);
        write_picture(&mut xml, shape_id, &name, picture)?;
        shape_id += 1;
    }

    xml.end("p:spTree")?;
    xml.end("p:cSld")?;
    xml.start("p:clrMapOvr", &[])?;
    xml.empty("a:masterClrMapping", &[])?;
    xml.end("p:clrMapOvr")?;
    xml.end("p:sld")?;
    Ok(xml.finish())
}

fn write_background(xml: &mut XmlWriter, color: Rgb) -> Result<()> {
    let val = color.to_string();
    xml.start("p:bg", &[])?;
    xml.start("p:bgPr", &[])?;
    xml.start("a:solidFill", &[])?;
    xml.empty("a:srgbClr", &[("val", val.as_str())])?;
    xml.end("a:solidFill")?;
    xml.empty("a:effectLst", &[])?;
    xml.end("p:bgPr")?;
    xml.end("p:bg")
}

fn write_frame(xml: &mut XmlWriter, frame: Frame) -> Result<()> {
    let (x, y) = (frame.x.to_string(), frame.y.to_string());
    let (cx, cy) = (frame.cx.to_string(), frame.cy.to_string());
    xml.start("a:xfrm", &[])?;
    xml.empty("a:off", &[("x", x.as_str()), ("y", y.as_str())])?;
    xml.empty("a:ext", &[("cx", cx.as_str()), ("cy", cy.as_str())])?;
    xml.end("a:xfrm")?;
    xml.start("a:prstGeom", &[("prst", "rect")])?;
    xml.empty("a:avLst", &[])?;
    xml.end("a:prstGeom")
}

fn write_text_box(
    xml: &mut XmlWriter,
    id: u32,
    name: &str,
    text_box: &TextBox,
    style: &DeckStyle,
) -> Result<()> {
    let id = id.to_string();
    xml.start("p:sp", &[])?;
    xml.start("p:nvSpPr", &[])?;
    xml.empty("p:cNvPr", &[("id", id.as_str()), ("name", name)])?;
    xml.empty("p:cNvSpPr", &[("txBox", "1")])?;
    xml.empty("p:nvPr", &[])?;
    xml.end("p:nvSpPr")?;

    xml.start("p:spPr", &[])?;
    write_frame(xml, text_box.frame)?;
    xml.empty("a:noFill", &[])?;
    xml.end("p:spPr")?;

    xml.start("p:txBody", &[])?;
    xml.start("a:bodyPr", &[("wrap", "square"), ("rtlCol", "0")])?;
    xml.empty("a:spAutoFit", &[])?;
    xml.end("a:bodyPr")?;
    xml.empty("a:lstStyle", &[])?;
    for paragraph in &text_box.paragraphs {
        write_paragraph(xml, paragraph, style)?;
    }
    xml.end("p:txBody")?;
    xml.end("p:sp")
}

fn write_paragraph(xml: &mut XmlWriter, paragraph: &Paragraph, style: &DeckStyle) -> Result<()> {
    xml.start("a:p", &[])?;
    if paragraph.level > 0 {
        let level = paragraph.level.to_string();
        xml.empty("a:pPr", &[("lvl", level.as_str())])?;
    }

    let points = match paragraph.role {
        Role::Title => style.title_size,
        Role::Heading | Role::Body => style.body_size,
    };
    let size = points.map(|p| font_size(p).to_string());
    let bold = style.bold_titles && paragraph.role != Role::Body;

    let mut attrs = vec![("lang", "en-US")];
    if let Some(size) = size.as_deref() {
        attrs.push(("sz", size));
    }
    if bold {
        attrs.push(("b", "1"));
    }
    attrs.push(("dirty", "0"));

    if paragraph.text.is_empty() {
        xml.empty("a:endParaRPr", &attrs)?;
        return xml.end("a:p");
    }

    xml.start("a:r", &[])?;
    let has_children = style.text_color.is_some() || style.font.is_some();
    if has_children {
        xml.start("a:rPr", &attrs)?;
        if let Some(color) = style.text_color {
            let val = color.to_string();
            xml.start("a:solidFill", &[])?;
            xml.empty("a:srgbClr", &[("val", val.as_str())])?;
            xml.end("a:solidFill")?;
        }
        if let Some(font) = style.font.as_deref() {
            xml.empty("a:latin", &[("typeface", font)])?;
        }
        xml.end("a:rPr")?;
    } else {
        xml.empty("a:rPr", &attrs)?;
    }
    xml.text_element("a:t", &[], &paragraph.text)?;
    xml.end("a:r")?;
    xml.end("a:p")
}

fn write_picture(xml: &mut XmlWriter, id: u32, name: &str, picture: &PlacedPicture) -> Result<()> {
    let id = id.to_string();
    xml.start("p:pic", &[])?;
    xml.start("p:nvPicPr", &[])?;
    xml.empty(
        "p:cNvPr",
        &[
            ("id", id.as_str()),
            ("name", name),
            ("descr", picture.description.as_str()),
        ],
    )?;
    xml.start("p:cNvPicPr", &[])?;
    xml.empty("a:picLocks", &[("noChangeAspect", "1")])?;
    xml.end("p:cNvPicPr")?;
    xml.empty("p:nvPr", &[])?;
    xml.end("p:nvPicPr")?;

    xml.start("p:blipFill", &[])?;
    xml.empty("a:blip", &[("r:embed", picture.rel_id.as_str())])?;
    xml.start("a:stretch", &[])?;
    xml.empty("a:fillRect", &[])?;
    xml.end("a:stretch")?;
    xml.end("p:blipFill")?;

    xml.start("p:spPr", &[])?;
    write_frame(xml, picture.frame)?;
    xml.end("p:spPr")?;
    xml.end("p:pic")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn levels(text_box: &TextBox) -> Vec<u8> {
        text_box.paragraphs.iter().map(|p| p.level).collect()
    }

    #[test]
    fn test_bullets_layout_single_box() {
        let spec = SlideSpec::bullets("Why", ["One", "• Two"]);
        let boxes = layout(&spec, &DeckStyle::default());

        assert_eq!(boxes.len(), 1);
        assert_eq!(levels(&boxes[0]), vec![0, 1, 1]);
        assert_eq!(boxes[0].paragraphs[1].text, "• One");
        assert_eq!(boxes[0].paragraphs[2].text, "• Two");
    }

    #[test]
    fn test_two_column_layout() {
        let spec = SlideSpec::two_column(
            "Compare",
            Column::new("Before:", ["a", "b"]),
            Column::new("After:", ["c"]),
        );
        let boxes = layout(&spec, &DeckStyle::default());

        assert_eq!(boxes.len(), 3);
        assert_eq!(levels(&boxes[1]), vec![0, 1, 1]);
        assert_eq!(levels(&boxes[2]), vec![0, 1]);
        assert!(boxes[1].frame.x < boxes[2].frame.x);
        assert_eq!(boxes[1].frame.y, boxes[2].frame.y);
    }

    #[test]
    fn test_long_form_levels() {
        let spec = SlideSpec::long_form("Plan", ["Header", "  • detail", "", "- dash"]);
        let boxes = layout(&spec, &DeckStyle::default());

        assert_eq!(levels(&boxes[0]), vec![0, 0, 1, 0, 1]);
        assert_eq!(boxes[0].paragraphs[1].role, Role::Heading);
    }

    #[test]
    fn test_render_background_and_font() {
        let spec = SlideSpec::bullets("R&D", ["Fast"]);
        let style = DeckStyle {
            title_size: Some(32.0),
            bold_titles: true,
            ..DeckStyle::default()
        }
        .with_background(Rgb::ORANGE)
        .with_font("Arial");

        let xml = String::from_utf8(render(&spec, &style, &[]).unwrap()).unwrap();

        assert!(xml.contains("<p:bg><p:bgPr><a:solidFill><a:srgbClr val=\"FFA500\"/>"));
        assert!(xml.contains("<a:t>R&amp;D</a:t>"));
        assert!(xml.contains("sz=\"3200\" b=\"1\""));
        assert!(xml.contains("<a:latin typeface=\"Arial\"/>"));
        assert!(xml.contains("<a:pPr lvl=\"1\"/>"));
    }

    #[test]
    fn test_render_without_background() {
        let spec = SlideSpec::bullets("Plain", Vec::<String>::new());
        let xml = String::from_utf8(render(&spec, &DeckStyle::default(), &[]).unwrap()).unwrap();
        assert!(!xml.contains("<p:bg>"));
    }
}
