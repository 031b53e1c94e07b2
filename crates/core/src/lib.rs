//! Core domain types, prompts, outline parsing, and typed errors for
//! competitor reports and slide decks.

pub mod catalog;
pub mod config;
pub mod error;
pub mod outline;
pub mod prompt;
pub mod types;

pub use config::{AppConfig, FetchConfig, GeneratorConfig, SamplingParams};
pub use error::{DeckError, DeckWarning, Error, FetchError, GenerationError, Result};
pub use outline::{deck_file_name, parse_outline};
pub use types::{
    Column, DeckFile, DeckOutline, DeckStyle, ExtractedContent, ImagePlacement, ParagraphOutline,
    Report, Rgb, ShapeOutline, SlideBody, SlideOutline, SlideSpec, DECK_MIME,
};
