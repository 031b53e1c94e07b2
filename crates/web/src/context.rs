//! The process-wide context: built once at startup, shared read-only after.

use pitchkit_core::{AppConfig, GenerationError, Report, SlideSpec};

use crate::fetch::Fetcher;
use crate::generate::{CompletionClient, TextGenerator};
use crate::report::{generate_outline, generate_report};

/// Fetcher and text generator shared by every request.
pub struct AppContext {
    fetcher: Fetcher,
    generator: Box<dyn TextGenerator>,
}

impl AppContext {
    /// Build the fetcher and the completion client from configuration.
    ///
    /// Fails when the completion credential is missing, before any page is
    /// fetched.
    pub fn initialize(config: AppConfig) -> pitchkit_core::Result<Self> {
        let generator = CompletionClient::new(&config.generator)?;
        log::info!(
            "Using completion model '{}' at {}",
            generator.model(),
            config.generator.api_base
        );
        let fetcher = Fetcher::new(config.fetch)?;
        Ok(Self::with_generator(fetcher, Box::new(generator)))
    }

    /// Assemble a context around any generator.
    pub fn with_generator(fetcher: Fetcher, generator: Box<dyn TextGenerator>) -> Self {
        Self { fetcher, generator }
    }

    pub fn generator(&self) -> &dyn TextGenerator {
        self.generator.as_ref()
    }

    /// Fetch a competitor page and write the strategic report for it.
    pub fn analyze_competitor(&self, url: &str) -> pitchkit_core::Result<Report> {
        let content = self.fetcher.fetch(url)?;
        Ok(generate_report(self.generator(), &content)?)
    }

    /// Generate the slides of a deck about `topic`.
    pub fn topic_deck(
        &self,
        topic: &str,
        slide_count: usize,
    ) -> Result<Vec<SlideSpec>, GenerationError> {
        generate_outline(self.generator(), topic, slide_count)
    }
}
