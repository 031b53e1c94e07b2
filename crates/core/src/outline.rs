//! Parsing of generated slide outlines and deck file naming.
//!
//! Generated outlines are loosely formatted markdown: headings start slides
//! and everything below a heading becomes a bullet.

use crate::types::{SlideBody, SlideSpec, BULLET_MARKERS};
use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

/// Markdown heading, capturing the heading text.
static HEADING_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#{1,6}\s*(.*?)\s*#*$").unwrap());

/// Leading "Slide 3:" / "Slide 3 -" labels models like to add to titles.
static SLIDE_LABEL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^slide\s*\d+\s*[:.\-–]\s*").unwrap());

/// Numbered list item prefix ("1." or "2)").
static NUMBERED_ITEM_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+[.)]\s+").unwrap());

/// Markdown emphasis markers wrapped around whole titles.
const EMPHASIS_CHARS: &[char] = &['*', '_', '`'];

/// Parse a generated outline into slides.
///
/// Text before the first heading is ignored. Slides with no bullets are
/// kept, since a title-only slide is still a slide.
pub fn parse_outline(markdown: &str) -> Vec<SlideSpec> {
    let mut slides: Vec<(String, Vec<String>)> = Vec::new();

    for raw in markdown.lines() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(caps) = HEADING_REGEX.captures(line) {
            let title = clean_title(caps.get(1).map_or("", |m| m.as_str()));
            if !title.is_empty() {
                slides.push((title, Vec::new()));
            }
            continue;
        }

        let Some((_, bullets)) = slides.last_mut() else {
            continue;
        };

        let item = strip_list_marker(line);
        if !item.is_empty() {
            bullets.push(item.to_string());
        }
    }

    slides
        .into_iter()
        .map(|(title, bullets)| SlideSpec {
            title,
            body: SlideBody::Bullets { bullets },
            images: Vec::new(),
        })
        .collect()
}

fn clean_title(title: &str) -> String {
    let title = SLIDE_LABEL_REGEX.replace(title.trim(), "");
    title.trim_matches(EMPHASIS_CHARS).trim().to_string()
}

fn strip_list_marker(line: &str) -> &str {
    if let Some(rest) = line.strip_prefix(BULLET_MARKERS) {
        return rest.trim();
    }
    match NUMBERED_ITEM_REGEX.find(line) {
        Some(m) => line[m.end()..].trim(),
        None => line,
    }
}

/// File name for a deck generated about `topic`.
///
/// Accents are folded to ASCII, other punctuation dropped, and whitespace
/// runs replaced with underscores.
pub fn deck_file_name(topic: &str) -> String {
    let folded: String = topic
        .nfkd()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace() || *c == '-')
        .collect();
    let slug = folded.split_whitespace().collect::<Vec<_>>().join("_");

    if slug.is_empty() {
        "presentation.pptx".to_string()
    } else {
        format!("{}_presentation.pptx", slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_headings_and_bullets() {
        let markdown = "\
Here is your outline:

## Slide 1: Introduction
- Who we are
- Why now

## **Market Analysis**
* Size
1. Growth
Plain sentence
";
        let slides = parse_outline(markdown);

        assert_eq!(slides.len(), 2);
        assert_eq!(slides[0].title, "Introduction");
        assert_eq!(
            slides[0].body,
            SlideBody::Bullets {
                bullets: vec!["Who we are".to_string(), "Why now".to_string()]
            }
        );
        assert_eq!(slides[1].title, "Market Analysis");
        assert_eq!(
            slides[1].body,
            SlideBody::Bullets {
                bullets: vec![
                    "Size".to_string(),
                    "Growth".to_string(),
                    "Plain sentence".to_string()
                ]
            }
        );
    }

    #[test]
    fn test_parse_without_headings_is_empty() {
        assert!(parse_outline("- a\n- b\n").is_empty());
        assert!(parse_outline("").is_empty());
    }

    #[test]
    fn test_title_only_slide_kept() {
        let slides = parse_outline("# Thanks\n");
        assert_eq!(slides.len(), 1);
        assert_eq!(slides[0].title, "Thanks");
    }

    #[test]
    fn test_deck_file_name() {
        assert_eq!(
            deck_file_name("Café  Growth Plan"),
            "Cafe_Growth_Plan_presentation.pptx"
        );
        assert_eq!(deck_file_name("AI/ML?"), "AIML_presentation.pptx");
        assert_eq!(deck_file_name("  "), "presentation.pptx");
    }
}
