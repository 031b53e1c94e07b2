//! Competitor report and generated outline flows on top of a [`TextGenerator`].

use pitchkit_core::prompt::{report_prompt, slides_prompt, strip_prompt};
use pitchkit_core::{parse_outline, ExtractedContent, GenerationError, Report, SamplingParams, SlideSpec};

use crate::generate::TextGenerator;

/// Generate the strategic report for extracted page content.
pub fn generate_report(
    generator: &dyn TextGenerator,
    content: &ExtractedContent,
) -> Result<Report, GenerationError> {
    let prompt = report_prompt(content);
    let generated = generator.complete(&prompt, &SamplingParams::REPORT)?;

    let text = strip_prompt(&generated, &prompt);
    if text.is_empty() {
        return Err(GenerationError::EmptyOutput);
    }
    log::info!("Generated report of {} chars", text.len());
    Ok(Report::new(text))
}

/// Ask the generator for a slide outline on `topic` and parse it.
pub fn generate_outline(
    generator: &dyn TextGenerator,
    topic: &str,
    slide_count: usize,
) -> Result<Vec<SlideSpec>, GenerationError> {
    let prompt = slides_prompt(topic, slide_count);
    let generated = generator.complete(&prompt, &SamplingParams::OUTLINE)?;

    let slides = parse_outline(&strip_prompt(&generated, &prompt));
    if slides.is_empty() {
        return Err(GenerationError::UnparseableOutline);
    }
    log::debug!("Parsed {} slide(s) for '{}'", slides.len(), topic);
    Ok(slides)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Replays a fixed reply and records prompts.
    pub(crate) struct StubGenerator {
        reply: String,
        pub prompts: Mutex<Vec<(String, SamplingParams)>>,
    }

    impl StubGenerator {
        pub(crate) fn new(reply: impl Into<String>) -> Self {
            Self {
                reply: reply.into(),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    impl TextGenerator for StubGenerator {
        fn complete(
            &self,
            prompt: &str,
            params: &SamplingParams,
        ) -> Result<String, GenerationError> {
            self.prompts
                .lock()
                .unwrap()
                .push((prompt.to_string(), *params));
            Ok(self.reply.replace("{prompt}", prompt))
        }
    }

    struct FailingGenerator;

    impl TextGenerator for FailingGenerator {
        fn complete(&self, _: &str, _: &SamplingParams) -> Result<String, GenerationError> {
            Err(GenerationError::Api {
                status: 500,
                body: "boom".to_string(),
            })
        }
    }

    fn content() -> ExtractedContent {
        ExtractedContent::new("A\nB\nC").unwrap()
    }

    #[test]
    fn test_report_strips_echoed_prompt() {
        let generator = StubGenerator::new("{prompt}  CORE: lean pricing. \n");

        let report = generate_report(&generator, &content()).unwrap();

        assert_eq!(report.text(), "CORE: lean pricing.");
        let prompts = generator.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].0.contains("A\nB\nC"));
        assert_eq!(prompts[0].1, SamplingParams::REPORT);
    }

    #[test]
    fn test_report_without_echo() {
        let generator = StubGenerator::new("\nInsights only\n");
        let report = generate_report(&generator, &content()).unwrap();
        assert_eq!(report.text(), "Insights only");
    }

    #[test]
    fn test_prompt_only_output_is_empty() {
        let generator = StubGenerator::new("{prompt}\n  ");
        assert!(matches!(
            generate_report(&generator, &content()),
            Err(GenerationError::EmptyOutput)
        ));
    }

    #[test]
    fn test_generation_error_propagates() {
        assert!(matches!(
            generate_report(&FailingGenerator, &content()),
            Err(GenerationError::Api { status: 500, .. })
        ));
    }

    #[test]
    fn test_outline_parsed_into_slides() {
        let generator =
            StubGenerator::new("## Slide 1: Intro\n- Hello\n- Agenda\n\n## Results\n1. Faster\n");

        let slides = generate_outline(&generator, "Rust adoption", 2).unwrap();

        assert_eq!(slides.len(), 2);
        assert_eq!(slides[0].title, "Intro");
        assert_eq!(generator.prompts.lock().unwrap()[0].1, SamplingParams::OUTLINE);
    }

    #[test]
    fn test_outline_without_headings() {
        let generator = StubGenerator::new("Just some prose.");
        assert!(matches!(
            generate_outline(&generator, "x", 3),
            Err(GenerationError::UnparseableOutline)
        ));
    }
}
