//! Error and warning types for the report and deck flows.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Any failure surfaced to the boundary layer.
#[derive(Error, Debug)]
pub enum Error {
    /// Fetching or extracting a web page failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Text generation failed.
    #[error(transparent)]
    Generation(#[from] GenerationError),

    /// Building or writing a deck failed.
    #[error(transparent)]
    Deck(#[from] DeckError),
}

/// Errors that can occur while fetching a competitor page.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The URL could not be parsed, even after adding a scheme.
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Connection, TLS or body read failure.
    #[error("Error fetching website content: {0}")]
    Transport(String),

    /// The request did not complete within the configured bound.
    #[error("Timed out fetching {0}")]
    Timeout(String),

    /// The server answered with a non-success status.
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// The page had no paragraph text to analyze.
    #[error("No paragraph text found at {0}")]
    EmptyContent(String),
}

/// Errors that can occur while generating text.
#[derive(Error, Debug)]
pub enum GenerationError {
    /// No API credential was configured for the completion backend.
    #[error("Missing API credential: set {0}")]
    MissingCredential(String),

    /// The request could not be sent or the response body not read.
    #[error("Completion request failed: {0}")]
    Request(String),

    /// The completion API answered with an error status.
    #[error("Completion API returned HTTP {status}: {body}")]
    Api { status: u16, body: String },

    /// The response did not have the expected shape.
    #[error("Malformed completion response: {0}")]
    MalformedResponse(String),

    /// Nothing was left after removing the prompt.
    #[error("The model returned no text")]
    EmptyOutput,

    /// Generated slide content had no recognizable slides.
    #[error("Generated outline contained no slides")]
    UnparseableOutline,
}

/// Errors that abort deck serialization.
#[derive(Error, Debug)]
pub enum DeckError {
    /// Reading a template or writing the output file failed.
    #[error("Deck I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP container error.
    #[error("ZIP error: {0}")]
    Zip(String),

    /// XML writing or reading error.
    #[error("XML error: {0}")]
    Xml(String),

    /// A template or existing deck could not be interpreted.
    #[error("Invalid deck package: {0}")]
    Package(String),
}

/// Non-fatal problems recorded while building a deck.
///
/// The affected asset is skipped and the deck is still produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeckWarning {
    /// An image file could not be read.
    #[error("Slide {slide}: image '{}' not found ({reason})", .path.display())]
    ImageUnavailable {
        slide: usize,
        path: PathBuf,
        reason: String,
    },

    /// An image file has a format the deck cannot embed.
    #[error("Slide {slide}: image '{}' has an unsupported format", .path.display())]
    UnsupportedImage { slide: usize, path: PathBuf },

    /// The template deck could not be used; the built-in theme was kept.
    #[error("Template '{}' unavailable ({reason}); using the default theme", .path.display())]
    TemplateUnavailable { path: PathBuf, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_umbrella_error_is_transparent() {
        let err: Error = FetchError::EmptyContent("https://example.com/".to_string()).into();
        assert_eq!(
            err.to_string(),
            "No paragraph text found at https://example.com/"
        );
    }

    #[test]
    fn test_io_error_message_is_neutral() {
        let err: DeckError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "custom_template.pptx").into();
        assert_eq!(err.to_string(), "Deck I/O error: custom_template.pptx");
    }

    #[test]
    fn test_warning_mentions_path() {
        let warning = DeckWarning::ImageUnavailable {
            slide: 2,
            path: PathBuf::from("solution_image.png"),
            reason: "No such file or directory".to_string(),
        };
        let text = warning.to_string();
        assert!(text.starts_with("Slide 2"));
        assert!(text.contains("solution_image.png"));
    }
}
