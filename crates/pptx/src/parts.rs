//! Fixed and generated package parts other than slides.

use crate::units::SlideSize;
use crate::xml::{relationships, XmlWriter, NS_A, PML_NAMESPACES};
use crate::Result;

pub(crate) const REL_OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
pub(crate) const REL_CORE_PROPS: &str =
    "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
pub(crate) const REL_APP_PROPS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties";
pub(crate) const REL_SLIDE_MASTER: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster";
pub(crate) const REL_SLIDE_LAYOUT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout";
pub(crate) const REL_SLIDE: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";
pub(crate) const REL_THEME: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme";
pub(crate) const REL_IMAGE: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";
pub(crate) const REL_PRES_PROPS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/presProps";
pub(crate) const REL_VIEW_PROPS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/viewProps";
pub(crate) const REL_TABLE_STYLES: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/tableStyles";

pub(crate) const CT_PRESENTATION: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml";
pub(crate) const CT_SLIDE: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.slide+xml";
pub(crate) const CT_SLIDE_MASTER: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml";
pub(crate) const CT_SLIDE_LAYOUT: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml";
pub(crate) const CT_THEME: &str = "application/vnd.openxmlformats-officedocument.theme+xml";
pub(crate) const CT_PRES_PROPS: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presProps+xml";
pub(crate) const CT_VIEW_PROPS: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.viewProps+xml";
pub(crate) const CT_TABLE_STYLES: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.tableStyles+xml";
pub(crate) const CT_CORE_PROPS: &str = "application/vnd.openxmlformats-package.core-properties+xml";
pub(crate) const CT_APP_PROPS: &str =
    "application/vnd.openxmlformats-officedocument.extended-properties+xml";

pub(crate) const MASTER_PATH: &str = "ppt/slideMasters/slideMaster1.xml";
pub(crate) const LAYOUT_PATH: &str = "ppt/slideLayouts/slideLayout1.xml";
pub(crate) const THEME_PATH: &str = "ppt/theme/theme1.xml";

/// Relationship ids in `presentation.xml.rels` before the first slide.
const FIXED_PRESENTATION_RELS: usize = 5;

/// Relationship id of the n-th (0-based) slide in `presentation.xml.rels`.
pub(crate) fn slide_rel_id(index: usize) -> String {
    format!("rId{}", FIXED_PRESENTATION_RELS + 1 + index)
}

/// `[Content_Types].xml` for the given overrides.
pub(crate) fn content_types(overrides: &[(String, &str)]) -> Result<Vec<u8>> {
    let mut xml = XmlWriter::new()?;
    xml.start(
        "Types",
        &[(
            "xmlns",
            "http://schemas.openxmlformats.org/package/2006/content-types",
        )],
    )?;
    for (ext, content_type) in [
        ("rels", "application/vnd.openxmlformats-package.relationships+xml"),
        ("xml", "application/xml"),
        ("png", "image/png"),
        ("jpeg", "image/jpeg"),
        ("gif", "image/gif"),
    ] {
        xml.empty(
            "Default",
            &[("Extension", ext), ("ContentType", content_type)],
        )?;
    }
    for (part, content_type) in overrides {
        let part_name = format!("/{}", part);
        xml.empty(
            "Override",
            &[("PartName", part_name.as_str()), ("ContentType", *content_type)],
        )?;
    }
    xml.end("Types")?;
    Ok(xml.finish())
}

/// `_rels/.rels`.
pub(crate) fn package_rels() -> Result<Vec<u8>> {
    relationships(&[
        (
            "rId1".to_string(),
            REL_OFFICE_DOCUMENT,
            "ppt/presentation.xml".to_string(),
        ),
        (
            "rId2".to_string(),
            REL_CORE_PROPS,
            "docProps/core.xml".to_string(),
        ),
        (
            "rId3".to_string(),
            REL_APP_PROPS,
            "docProps/app.xml".to_string(),
        ),
    ])
}

/// `ppt/_rels/presentation.xml.rels`.
pub(crate) fn presentation_rels(slide_count: usize) -> Result<Vec<u8>> {
    let mut rels = vec![
        (
            "rId1".to_string(),
            REL_SLIDE_MASTER,
            "slideMasters/slideMaster1.xml".to_string(),
        ),
        ("rId2".to_string(), REL_PRES_PROPS, "presProps.xml".to_string()),
        ("rId3".to_string(), REL_VIEW_PROPS, "viewProps.xml".to_string()),
        ("rId4".to_string(), REL_THEME, "theme/theme1.xml".to_string()),
        (
            "rId5".to_string(),
            REL_TABLE_STYLES,
            "tableStyles.xml".to_string(),
        ),
    ];
    for index in 0..slide_count {
        rels.push((
            slide_rel_id(index),
            REL_SLIDE,
            format!("slides/slide{}.xml", index + 1),
        ));
    }
    relationships(&rels)
}

/// `ppt/presentation.xml`.
pub(crate) fn presentation(slide_count: usize, size: SlideSize) -> Result<Vec<u8>> {
    let mut xml = XmlWriter::new()?;
    let mut root = PML_NAMESPACES.to_vec();
    root.push(("saveSubsetFonts", "1"));
    xml.start("p:presentation", &root)?;

    xml.start("p:sldMasterIdLst", &[])?;
    xml.empty("p:sldMasterId", &[("id", "2147483648"), ("r:id", "rId1")])?;
    xml.end("p:sldMasterIdLst")?;

    if slide_count > 0 {
        xml.start("p:sldIdLst", &[])?;
        for index in 0..slide_count {
            let id = (256 + index).to_string();
            let rel_id = slide_rel_id(index);
            xml.empty("p:sldId", &[("id", id.as_str()), ("r:id", rel_id.as_str())])?;
        }
        xml.end("p:sldIdLst")?;
    }

    let (cx, cy) = (size.cx.to_string(), size.cy.to_string());
    if size.is_screen_4x3() {
        xml.empty(
            "p:sldSz",
            &[("cx", cx.as_str()), ("cy", cy.as_str()), ("type", "screen4x3")],
        )?;
    } else {
        xml.empty("p:sldSz", &[("cx", cx.as_str()), ("cy", cy.as_str())])?;
    }
    xml.empty("p:notesSz", &[("cx", "6858000"), ("cy", "9144000")])?;

    xml.start("p:defaultTextStyle", &[])?;
    xml.start("a:defPPr", &[])?;
    xml.empty("a:defRPr", &[("lang", "en-US")])?;
    xml.end("a:defPPr")?;
    for level in 0..3u32 {
        let name = format!("a:lvl{}pPr", level + 1);
        let margin = (level * 457_200).to_string();
        xml.start(
            &name,
            &[
                ("marL", margin.as_str()),
                ("algn", "l"),
                ("defTabSz", "914400"),
                ("rtl", "0"),
            ],
        )?;
        xml.start("a:defRPr", &[("sz", "1800"), ("kern", "1200")])?;
        xml.start("a:solidFill", &[])?;
        xml.empty("a:schemeClr", &[("val", "tx1")])?;
        xml.end("a:solidFill")?;
        xml.empty("a:latin", &[("typeface", "+mn-lt")])?;
        xml.empty("a:ea", &[("typeface", "+mn-ea")])?;
        xml.empty("a:cs", &[("typeface", "+mn-cs")])?;
        xml.end("a:defRPr")?;
        xml.end(&name)?;
    }
    xml.end("p:defaultTextStyle")?;

    xml.end("p:presentation")?;
    Ok(xml.finish())
}

/// `docProps/core.xml`.
pub(crate) fn core_properties(title: &str) -> Result<Vec<u8>> {
    let mut xml = XmlWriter::new()?;
    xml.start(
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
    xml.text_element("dc:title", &[], title)?;
    xml.text_element("dc:creator", &[], "pitchkit")?;
    xml.end("cp:coreProperties")?;
    Ok(xml.finish())
}

/// `docProps/app.xml`.
pub(crate) fn app_properties(slide_count: usize) -> Result<Vec<u8>> {
    let mut xml = XmlWriter::new()?;
    xml.start(
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
    xml.text_element("Application", &[], "pitchkit")?;
    xml.text_element("Slides", &[], &slide_count.to_string())?;
    xml.end("Properties")?;
    Ok(xml.finish())
}

/// `ppt/slideMasters/_rels/slideMaster1.xml.rels`.
pub(crate) fn master_rels() -> Result<Vec<u8>> {
    relationships(&[
        (
            "rId1".to_string(),
            REL_SLIDE_LAYOUT,
            "../slideLayouts/slideLayout1.xml".to_string(),
        ),
        (
            "rId2".to_string(),
            REL_THEME,
            "../theme/theme1.xml".to_string(),
        ),
    ])
}

/// `ppt/slideLayouts/_rels/slideLayout1.xml.rels`.
pub(crate) fn layout_rels() -> Result<Vec<u8>> {
    relationships(&[(
        "rId1".to_string(),
        REL_SLIDE_MASTER,
        "../slideMasters/slideMaster1.xml".to_string(),
    )])
}

/// Empty shape tree header shared by masters, layouts, and slides.
pub(crate) fn group_shape_header(xml: &mut XmlWriter) -> Result<()> {
    xml.start("p:nvGrpSpPr", &[])?;
    xml.empty("p:cNvPr", &[("id", "1"), ("name", "")])?;
    xml.empty("p:cNvGrpSpPr", &[])?;
    xml.empty("p:nvPr", &[])?;
    xml.end("p:nvGrpSpPr")?;
    xml.start("p:grpSpPr", &[])?;
    xml.start("a:xfrm", &[])?;
    xml.empty("a:off", &[("x", "0"), ("y", "0")])?;
    xml.empty("a:ext", &[("cx", "0"), ("cy", "0")])?;
    xml.empty("a:chOff", &[("x", "0"), ("y", "0")])?;
    xml.empty("a:chExt", &[("cx", "0"), ("cy", "0")])?;
    xml.end("a:xfrm")?;
    xml.end("p:grpSpPr")
}

/// `ppt/slideMasters/slideMaster1.xml`.
pub(crate) fn slide_master() -> Result<Vec<u8>> {
    let mut xml = XmlWriter::new()?;
    xml.start("p:sldMaster", &PML_NAMESPACES)?;
    xml.start("p:cSld", &[])?;
    xml.start("p:bg", &[])?;
    xml.start("p:bgRef", &[("idx", "1001")])?;
    xml.empty("a:schemeClr", &[("val", "bg1")])?;
    xml.end("p:bgRef")?;
    xml.end("p:bg")?;
    xml.start("p:spTree", &[])?;
    group_shape_header(&mut xml)?;
    xml.end("p:spTree")?;
    xml.end("p:cSld")?;
    xml.empty(
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
    xml.start("p:sldLayoutIdLst", &[])?;
    xml.empty("p:sldLayoutId", &[("id", "2147483649"), ("r:id", "rId1")])?;
    xml.end("p:sldLayoutIdLst")?;
    xml.end("p:sldMaster")?;
    Ok(xml.finish())
}

/// `ppt/slideLayouts/slideLayout1.xml`, the blank layout every slide uses.
pub(crate) fn blank_layout() -> Result<Vec<u8>> {
    let mut xml = XmlWriter::new()?;
    let mut root = PML_NAMESPACES.to_vec();
    root.extend([("type", "blank"), ("preserve", "1")]);
    xml.start("p:sldLayout", &root)?;
    xml.start("p:cSld", &[("name", "Blank")])?;
    xml.start("p:spTree", &[])?;
    group_shape_header(&mut xml)?;
    xml.end("p:spTree")?;
    xml.end("p:cSld")?;
    xml.start("p:clrMapOvr", &[])?;
    xml.empty("a:masterClrMapping", &[])?;
    xml.end("p:clrMapOvr")?;
    xml.end("p:sldLayout")?;
    Ok(xml.finish())
}

/// `ppt/presProps.xml`.
pub(crate) fn presentation_properties() -> Result<Vec<u8>> {
    let mut xml = XmlWriter::new()?;
    xml.empty("p:presentationPr", &PML_NAMESPACES)?;
    Ok(xml.finish())
}

/// `ppt/viewProps.xml`.
pub(crate) fn view_properties() -> Result<Vec<u8>> {
    let mut xml = XmlWriter::new()?;
    xml.empty("p:viewPr", &PML_NAMESPACES)?;
    Ok(xml.finish())
}

/// `ppt/tableStyles.xml`.
pub(crate) fn table_styles() -> Result<Vec<u8>> {
    let mut xml = XmlWriter::new()?;
    xml.empty(
        "a:tblStyleLst",
        &[
            ("xmlns:a", NS_A),
            ("def", "{5C22544A-7EE6-4342-B048-85BDC9FD1C3A}"),
        ],
    )?;
    Ok(xml.finish())
}

/// Built-in Office theme used when no template is supplied.
pub(crate) const DEFAULT_THEME: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" name="Office Theme"><a:themeElements><a:clrScheme name="Office"><a:dk1><a:sysClr val="windowText" lastClr="000000"/></a:dk1><a:lt1><a:sysClr val="window" lastClr="FFFFFF"/></a:lt1><a:dk2><a:srgbClr val="1F497D"/></a:dk2><a:lt2><a:srgbClr val="EEECE1"/></a:lt2><a:accent1><a:srgbClr val="4F81BD"/></a:accent1><a:accent2><a:srgbClr val="C0504D"/></a:accent2><a:accent3><a:srgbClr val="9BBB59"/></a:accent3><a:accent4><a:srgbClr val="8064A2"/></a:accent4><a:accent5><a:srgbClr val="4BACC6"/></a:accent5><a:accent6><a:srgbClr val="F79646"/></a:accent6><a:hlink><a:srgbClr val="0000FF"/></a:hlink><a:folHlink><a:srgbClr val="800080"/></a:folHlink></a:clrScheme><a:fontScheme name="Office"><a:majorFont><a:latin typeface="Calibri"/><a:ea typeface=""/><a:cs typeface=""/></a:majorFont><a:minorFont><a:latin typeface="Calibri"/><a:ea typeface=""/><a:cs typeface=""/></a:minorFont></a:fontScheme><a:fmtScheme name="Office"><a:fillStyleLst><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"><a:tint val="50000"/></a:schemeClr></a:solidFill><a:solidFill><a:schemeClr val="phClr"><a:shade val="80000"/></a:schemeClr></a:solidFill></a:fillStyleLst><a:lnStyleLst><a:ln w="9525"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:prstDash val="solid"/></a:ln><a:ln w="25400"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:prstDash val="solid"/></a:ln><a:ln w="38100"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:prstDash val="solid"/></a:ln></a:lnStyleLst><a:effectStyleLst><a:effectStyle><a:effectLst/></a:effectStyle><a:effectStyle><a:effectLst/></a:effectStyle><a:effectStyle><a:effectLst/></a:effectStyle></a:effectStyleLst><a:bgFillStyleLst><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"><a:tint val="95000"/></a:schemeClr></a:solidFill><a:solidFill><a:schemeClr val="phClr"><a:shade val="90000"/></a:schemeClr></a:solidFill></a:bgFillStyleLst></a:fmtScheme></a:themeElements><a:objectDefaults/><a:extraClrSchemeLst/></a:theme>"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slide_rel_ids_follow_fixed_parts() {
        assert_eq!(slide_rel_id(0), "rId6");
        assert_eq!(slide_rel_id(3), "rId9");
    }

    #[test]
    fn test_presentation_lists_slides_in_order() {
        let xml = String::from_utf8(presentation(2, SlideSize::default()).unwrap()).unwrap();

        let first = xml.find("<p:sldId id=\"256\" r:id=\"rId6\"/>").unwrap();
        let second = xml.find("<p:sldId id=\"257\" r:id=\"rId7\"/>").unwrap();
        assert!(first < second);
        assert!(xml.contains("type=\"screen4x3\""));
    }

    #[test]
    fn test_presentation_without_slides_omits_list() {
        let xml = String::from_utf8(presentation(0, SlideSize::default()).unwrap()).unwrap();
        assert!(!xml.contains("sldIdLst"));
    }

    #[test]
    fn test_content_types_overrides() {
        let xml = String::from_utf8(
            content_types(&[("ppt/slides/slide1.xml".to_string(), CT_SLIDE)]).unwrap(),
        )
        .unwrap();
        assert!(xml.contains("PartName=\"/ppt/slides/slide1.xml\""));
        assert!(xml.contains("Extension=\"png\""));
    }
}
