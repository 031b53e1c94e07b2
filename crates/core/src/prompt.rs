//! Prompt templates for competitor reports and generated slide outlines.

use crate::types::ExtractedContent;

/// Sections the report is asked to cover, in order, with their hints.
pub const REPORT_SECTIONS: [(&str, &str); 4] = [
    ("CORE STRATEGIC ELEMENTS", "Key differentiators and innovations"),
    ("PROVEN VALUE LEVER IMPLEMENTATION", "Case studies and results"),
    ("KEY SUCCESS FACTORS", "Factors driving success"),
    ("MEASURABLE OUTCOMES", "Quantifiable impact"),
];

/// Build the competitor analysis prompt around the extracted page text.
pub fn report_prompt(content: &ExtractedContent) -> String {
    let mut prompt = String::from("\nCompetitor Website Analysis:\n");
    prompt.push_str(content.as_str());
    prompt.push_str("\n\nProvide insights including:\n");

    for (heading, hint) in REPORT_SECTIONS {
        prompt.push_str(&format!("\n{}:\n{}\n", heading, hint));
    }

    prompt
}

/// Remove every occurrence of `prompt` from generated text and trim it.
///
/// Local models echo the prompt before the continuation; remote completion
/// APIs usually do not, in which case only trimming applies.
pub fn strip_prompt(generated: &str, prompt: &str) -> String {
    if prompt.is_empty() {
        return generated.trim().to_string();
    }
    generated.replace(prompt, "").trim().to_string()
}

/// Build the prompt asking for a slide outline on `topic`.
pub fn slides_prompt(topic: &str, slide_count: usize) -> String {
    format!(
        "Create an outline for a presentation of {count} slides about: {topic}\n\n\
         Start every slide with a line of the form \"## <slide title>\".\n\
         Follow each title with 3 to 5 bullet lines starting with \"- \".\n\
         Do not add any text before the first slide.\n",
        count = slide_count.max(1),
        topic = topic.trim(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_prompt_contains_content_and_sections() {
        let content = ExtractedContent::new("We ship faster.").unwrap();
        let prompt = report_prompt(&content);

        assert!(prompt.contains("Competitor Website Analysis:\nWe ship faster."));
        let positions: Vec<usize> = REPORT_SECTIONS
            .iter()
            .map(|(heading, _)| prompt.find(heading).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_strip_prompt_removes_echo() {
        let content = ExtractedContent::new("A\nB").unwrap();
        let prompt = report_prompt(&content);
        let generated = format!("{}\n\n  The competitor leads on price. ", prompt);

        let report = strip_prompt(&generated, &prompt);

        assert_eq!(report, "The competitor leads on price.");
        assert!(!report.starts_with(prompt.trim()));
    }

    #[test]
    fn test_strip_prompt_without_echo() {
        assert_eq!(strip_prompt("  insights \n", "prompt"), "insights");
    }

    #[test]
    fn test_slides_prompt_mentions_topic_and_count() {
        let prompt = slides_prompt("  Cold chain logistics ", 5);
        assert!(prompt.contains("5 slides about: Cold chain logistics\n"));
        assert!(prompt.contains("## <slide title>"));
    }
}
