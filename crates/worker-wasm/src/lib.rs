//! WASM-compatible wrapper for in-memory deck building.
//!
//! Exposes deck building and download metadata to JavaScript for use in
//! Cloudflare Workers and browsers. Nothing touches a filesystem: images
//! referenced by a deck spec cannot be loaded and are reported as warnings.

use chrono::NaiveDate;
use pitchkit_core::{DeckFile, Report, DECK_MIME};
use pitchkit_pptx::{BuiltDeck, DeckBuilder};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    // Set up better panic messages in the console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Metadata about a deck built from a spec.
#[derive(Debug, Serialize, Deserialize)]
pub struct DeckSummary {
    /// Suggested download name.
    pub file_name: String,
    pub slide_count: usize,
    /// Non-fatal problems, one message each.
    pub warnings: Vec<String>,
}

/// Build a `.pptx` from a JSON deck description.
///
/// # Arguments
/// * `spec` - A `DeckFile` object: `{ file_name?, style?, slides }`
///
/// # Returns
/// The package bytes as a `Uint8Array`, or throws on error.
#[wasm_bindgen]
pub fn build_deck(spec: JsValue) -> Result<Vec<u8>, JsValue> {
    let deck_file = parse_spec(spec)?;
    let (deck, _) = build_deck_impl(&deck_file).map_err(|e| JsValue::from_str(&e))?;
    Ok(deck.bytes)
}

/// File name, slide count and warnings for a deck description.
#[wasm_bindgen]
pub fn summarize_deck(spec: JsValue) -> Result<JsValue, JsValue> {
    let deck_file = parse_spec(spec)?;
    let (deck, file_name) = build_deck_impl(&deck_file).map_err(|e| JsValue::from_str(&e))?;

    let summary = DeckSummary {
        file_name,
        slide_count: deck.slide_count,
        warnings: deck.warnings.iter().map(ToString::to_string).collect(),
    };
    serde_wasm_bindgen::to_value(&summary)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Download name for a report generated on `yyyymmdd`.
#[wasm_bindgen]
pub fn report_file_name(yyyymmdd: &str) -> Result<String, JsValue> {
    report_file_name_impl(yyyymmdd).map_err(|e| JsValue::from_str(&e))
}

/// MIME type of built decks.
#[wasm_bindgen]
pub fn deck_mime() -> String {
    DECK_MIME.to_string()
}

/// MIME type of reports.
#[wasm_bindgen]
pub fn report_mime() -> String {
    Report::MIME.to_string()
}

fn parse_spec(spec: JsValue) -> Result<DeckFile, JsValue> {
    serde_wasm_bindgen::from_value(spec)
        .map_err(|e| JsValue::from_str(&format!("Invalid deck spec: {}", e)))
}

fn build_deck_impl(deck_file: &DeckFile) -> Result<(BuiltDeck, String), String> {
    if deck_file.slides.is_empty() {
        return Err("Deck spec has no slides".to_string());
    }

    let title = deck_file
        .slides
        .first()
        .map(|s| s.title.clone())
        .unwrap_or_default();
    let deck = DeckBuilder::new(deck_file.style.clone())
        .with_title(title)
        .build(&deck_file.slides)
        .map_err(|e| format!("Deck build error: {}", e))?;

    let file_name = deck_file
        .file_name
        .clone()
        .unwrap_or_else(|| "presentation.pptx".to_string());
    Ok((deck, file_name))
}

fn report_file_name_impl(yyyymmdd: &str) -> Result<String, String> {
    let date = NaiveDate::parse_from_str(yyyymmdd.trim(), "%Y%m%d")
        .map_err(|e| format!("Invalid date '{}': {}", yyyymmdd, e))?;
    Ok(Report::file_name(date))
}
