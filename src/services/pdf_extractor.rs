use lopdf::Document;

/// Separator placed between consecutive pages of extracted text.
pub const PAGE_SEPARATOR: &str = "\n";

/// Extract the text of every page, in page order, joined by [`PAGE_SEPARATOR`].
///
/// A page that fails to extract contributes an empty string. A document that
/// cannot be loaded at all yields an empty string; callers decide whether
/// empty content is an error.
pub fn extract_text(bytes: &[u8]) -> String {
    let doc = match Document::load_mem(bytes) {
        Ok(doc) => doc,
        Err(e) => {
            log::warn!("Error reading PDF ({} bytes): {}", bytes.len(), e);
            return String::new();
        }
    };

    // get_pages is keyed by page number, so iteration is already in page order.
    let pages: Vec<String> = doc
        .get_pages()
        .keys()
        .map(|&page_number| {
            doc.extract_text(&[page_number]).unwrap_or_else(|e| {
                log::warn!("Could not extract text from page {}: {}", page_number, e);
                String::new()
            })
        })
        .collect();

    log::info!("Extracted text from {} PDF page(s)", pages.len());
    pages.join(PAGE_SEPARATOR)
}
