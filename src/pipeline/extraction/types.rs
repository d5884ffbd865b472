use crate::models::RowLayout;

/// A lab row matched by the parser, still in text form.
///
/// Numeric fields already use `.` as decimal separator and carry no
/// grouping characters. Lives for one pipeline pass only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCandidate {
    pub test: String,
    pub value: String,
    pub unit: String,
    pub ref_low: String,
    pub ref_high: String,
    /// Layout pattern that matched (diagnostics only).
    pub layout: RowLayout,
}

/// Upstream PDF text extraction (the engine itself lives outside this crate).
///
/// Returns the text of each page in reading order. Allows mocking in tests.
pub trait PdfTextExtractor {
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<String>, super::ExtractionError>;
}
