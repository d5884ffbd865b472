pub mod config;
pub mod models;
pub mod pipeline;

pub use config::{ConfigError, ExtractionConfig};
pub use models::{LabMeasurement, LabResult, LabStatus, RowLayout, Summary};
pub use pipeline::extraction::{ExtractionError, LabReportExtractor, PdfTextExtractor};
pub use pipeline::report::{render_results_text, AnalysisResponse, LabReport};

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// Honors `RUST_LOG`, falling back to `config::default_log_filter()`. Safe to
/// call more than once; only the first call installs anything.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .try_init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);
}
