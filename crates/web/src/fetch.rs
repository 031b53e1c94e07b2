//! Competitor page fetching and paragraph extraction.

use pitchkit_core::{ExtractedContent, FetchConfig, FetchError};
use reqwest::blocking::Client;
use scraper::{ElementRef, Html, Node, Selector};
use std::sync::LazyLock;
use url::Url;

/// Elements whose text never counts as page content.
const SKIPPED_ELEMENTS: &[&str] = &["script", "style", "meta", "link", "noscript"];

static PARAGRAPH_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("p").unwrap());

/// Parse user input into an absolute URL, assuming `https://` when no scheme
/// is given.
pub fn normalize_url(input: &str) -> Result<Url, FetchError> {
    let trimmed = input.trim();
    let invalid = |reason: String| FetchError::InvalidUrl {
        url: trimmed.to_string(),
        reason,
    };

    if trimmed.is_empty() {
        return Err(invalid("URL is empty".to_string()));
    }

    let lower = trimmed.to_ascii_lowercase();
    let candidate = if lower.starts_with("http://") || lower.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };

    let url = Url::parse(&candidate).map_err(|e| invalid(e.to_string()))?;
    if url.host_str().map_or(true, str::is_empty) {
        return Err(invalid("URL has no host".to_string()));
    }
    Ok(url)
}

/// Visible text of every `<p>` in document order, one paragraph per line.
///
/// Returns `None` when the page has no non-blank paragraph text.
pub fn extract_paragraph_text(html: &str) -> Option<String> {
    let document = Html::parse_document(html);

    let paragraphs: Vec<String> = document
        .select(&PARAGRAPH_SELECTOR)
        .filter(|p| !has_skipped_ancestor(p))
        .map(|p| visible_text(&p).trim().to_string())
        .filter(|text| !text.is_empty())
        .collect();

    if paragraphs.is_empty() {
        None
    } else {
        Some(paragraphs.join("\n"))
    }
}

fn is_skipped(node: &Node) -> bool {
    node.as_element()
        .is_some_and(|e| SKIPPED_ELEMENTS.contains(&e.name()))
}

fn has_skipped_ancestor(element: &ElementRef<'_>) -> bool {
    element.ancestors().any(|a| is_skipped(a.value()))
}

/// Text nodes below `paragraph`, leaving out anything inside skipped elements.
fn visible_text(paragraph: &ElementRef<'_>) -> String {
    let mut text = String::new();
    for node in paragraph.descendants() {
        let Node::Text(fragment) = node.value() else {
            continue;
        };
        let hidden = node
            .ancestors()
            .take_while(|a| a.id() != paragraph.id())
            .any(|a| is_skipped(a.value()));
        if !hidden {
            text.push_str(fragment);
        }
    }
    text
}

/// Fetches competitor pages with one shared HTTP client.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    /// Build the HTTP client. Fails only if the TLS backend cannot start.
    pub fn new(config: FetchConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(config.user_agent)
            .timeout(config.timeout)
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        Ok(Self { client })
    }

    /// Download `url` and extract its paragraph text. One attempt, no retries.
    pub fn fetch(&self, url: &str) -> Result<ExtractedContent, FetchError> {
        let url = normalize_url(url)?;
        log::info!("Fetching {}", url);

        let response = self
            .client
            .get(url.as_str())
            .send()
            .map_err(|e| transport_error(&url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let html = response.text().map_err(|e| transport_error(&url, e))?;
        log::debug!("Received {} bytes from {}", html.len(), url);

        extract_paragraph_text(&html)
            .and_then(ExtractedContent::new)
            .ok_or_else(|| FetchError::EmptyContent(url.to_string()))
    }
}

fn transport_error(url: &Url, e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout(url.to_string())
    } else {
        FetchError::Transport(e.to_string())
    }
}
