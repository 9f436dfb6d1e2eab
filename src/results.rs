//! Normalized crawl results

/// Separator placed between per-URL contents in the joined output
pub const RESULT_SEPARATOR: &str = "\n\n---\n\n";

/// Extracted content for a single crawled page.
///
/// Both upstream protocols normalize into this shape. Either field may be
/// absent; missing markdown degrades to a placeholder for that item only,
/// never failing the batch.
#[derive(Debug, Clone, Default)]
pub struct PageContent {
    /// URL the content came from, when the service reports it
    pub url: Option<String>,

    /// Extracted markdown, when available
    pub markdown: Option<String>,
}

impl PageContent {
    /// Render the item's text, or the unavailable-content placeholder
    pub fn render(&self) -> String {
        match &self.markdown {
            Some(markdown) => markdown.clone(),
            None => format!(
                "Error: No markdown content available for URL {}",
                self.url.as_deref().unwrap_or("unknown")
            ),
        }
    }
}

/// Join a batch of page contents into the tool's final text.
///
/// Items keep the order the service returned them in, and every item
/// renders. Batch size in equals batch size out.
pub fn render_batch(items: &[PageContent]) -> String {
    items
        .iter()
        .map(PageContent::render)
        .collect::<Vec<_>>()
        .join(RESULT_SEPARATOR)
}
