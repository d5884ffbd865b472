pub mod types;
pub mod sanitize;
pub mod table_detect;
pub mod numeric;
pub mod parser;
pub mod builder;
pub mod pdf;
pub mod orchestrator;

pub use types::*;
pub use sanitize::*;
pub use table_detect::*;
pub use parser::*;
pub use builder::*;
pub use pdf::*;
pub use orchestrator::*;

use thiserror::Error;

use crate::config::ConfigError;

#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("No lab results could be extracted ({lines_scanned} lines scanned)")]
    NoDataExtracted { lines_scanned: usize },

    #[error("PDF parsing failed: {0}")]
    PdfParsing(String),

    #[error("Document is empty")]
    EmptyDocument,

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}
