//! PPTX (Office Open XML) deck builder.
//!
//! Writes .pptx files, which are ZIP archives of XML parts, from
//! [`SlideSpec`](pitchkit_core::SlideSpec) lists, and reads built decks
//! back into outlines for inspection.

mod image;
mod parts;
pub mod reader;
mod slide;
pub mod template;
pub mod units;
pub mod writer;
mod xml;

pub use image::ImageFormat;
pub use reader::DeckReader;
pub use template::DeckTemplate;
pub use units::SlideSize;
pub use writer::{BuiltDeck, DeckBuilder};

/// Result type for deck operations.
pub type Result<T> = std::result::Result<T, pitchkit_core::DeckError>;
