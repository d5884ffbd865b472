use super::types::PdfTextExtractor;
use super::ExtractionError;

/// Flatten page texts into one ordered line sequence.
///
/// Each page is terminated by a line break before splitting, so the last
/// line of a page never merges with the first line of the next one.
pub fn split_pages_into_lines<S: AsRef<str>>(pages: &[S]) -> Vec<String> {
    let mut all_text = String::new();
    for page in pages {
        let text = page.as_ref();
        if text.is_empty() {
            continue;
        }
        all_text.push_str(text);
        all_text.push('\n');
    }

    all_text.lines().map(str::to_string).collect()
}

/// Run the upstream extractor and hand back the document's raw lines.
pub fn extract_lines(
    extractor: &dyn PdfTextExtractor,
    pdf_bytes: &[u8],
) -> Result<Vec<String>, ExtractionError> {
    if pdf_bytes.is_empty() {
        return Err(ExtractionError::EmptyDocument);
    }

    let pages = extractor.extract_pages(pdf_bytes)?;
    let lines = split_pages_into_lines(&pages);

    tracing::debug!(pages = pages.len(), lines = lines.len(), "PDF text handed off");

    Ok(lines)
}
