//! Web side of pitchkit: competitor page fetching, text generation, and the
//! shared application context.

pub mod context;
pub mod fetch;
pub mod generate;
pub mod report;

pub use context::AppContext;
pub use fetch::{extract_paragraph_text, normalize_url, Fetcher};
pub use generate::{CompletionClient, TextGenerator};
pub use report::{generate_outline, generate_report};
