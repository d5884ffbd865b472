use chrono::NaiveDate;
use uuid::Uuid;

use super::builder::build_measurement;
use super::parser::parse_rows;
use super::pdf::extract_lines;
use super::sanitize::normalize_line;
use super::table_detect::delimit_table_cells;
use super::types::{ParsedCandidate, PdfTextExtractor};
use super::ExtractionError;
use crate::config::ExtractionConfig;
use crate::models::LabMeasurement;
use crate::pipeline::analysis::classify_all;
use crate::pipeline::report::{AnalysisResponse, LabReport};

/// Runs raw lines through normalize → parse → build → classify → summarize.
///
/// Holds only its read-only config, so one instance can serve any number of
/// concurrent documents.
#[derive(Debug, Clone, Default)]
pub struct LabReportExtractor {
    config: ExtractionConfig,
}

impl LabReportExtractor {
    pub fn new(config: ExtractionConfig) -> Self {
        Self { config }
    }

    /// Build with config read from the environment.
    pub fn from_env() -> Result<Self, ExtractionError> {
        Ok(Self::new(ExtractionConfig::from_env()?))
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Extract typed, unclassified measurements in source-line order.
    pub fn extract_measurements<S: AsRef<str>>(&self, lines: &[S]) -> Vec<LabMeasurement> {
        let normalized: Vec<String> = lines
            .iter()
            .map(|l| normalize_line(&delimit_table_cells(l.as_ref())))
            .filter(|l| !l.is_empty())
            .collect();
        let parsed: Vec<Vec<ParsedCandidate>> = normalized.iter().map(|l| parse_rows(l)).collect();

        let mut measurements = Vec::new();
        let mut i = 0;
        while i < normalized.len() {
            if !parsed[i].is_empty() {
                measurements.extend(parsed[i].iter().cloned().filter_map(build_measurement));
                i += 1;
                continue;
            }

            if self.config.rejoin_split_rows() {
                let rejoined = self.rejoin(&normalized, &parsed, i);
                if !rejoined.is_empty() {
                    measurements.extend(rejoined);
                    i += 2;
                    continue;
                }
            }

            i += 1;
        }

        measurements
    }

    /// A row split across two lines: neither half matches on its own, the
    /// join does and builds.
    fn rejoin(
        &self,
        normalized: &[String],
        parsed: &[Vec<ParsedCandidate>],
        i: usize,
    ) -> Vec<LabMeasurement> {
        let Some(next) = normalized.get(i + 1) else {
            return Vec::new();
        };
        if !parsed[i + 1].is_empty() {
            return Vec::new();
        }

        let joined = format!("{} {}", normalized[i], next);
        let measurements: Vec<LabMeasurement> = parse_rows(&joined)
            .into_iter()
            .filter_map(build_measurement)
            .collect();
        if !measurements.is_empty() {
            tracing::debug!(rows = measurements.len(), "Rejoined row split across two lines");
        }
        measurements
    }

    /// Full pipeline over one document's lines.
    ///
    /// Zero extracted results is reported as `ExtractionError::NoDataExtracted`
    /// rather than an empty success.
    pub fn analyze_lines<S: AsRef<str>>(&self, lines: &[S]) -> Result<LabReport, ExtractionError> {
        let measurements = self.extract_measurements(lines);
        if measurements.is_empty() {
            tracing::warn!(lines = lines.len(), "No lab results extracted");
            return Err(ExtractionError::NoDataExtracted {
                lines_scanned: lines.len(),
            });
        }

        let report = LabReport::new(classify_all(measurements, &self.config));

        tracing::info!(
            lines = lines.len(),
            results = report.summary.total,
            normal = report.summary.normal,
            near = report.summary.near,
            abnormal = report.summary.abnormal,
            "Lab results extracted"
        );

        Ok(report)
    }

    /// Upstream PDF text hand-off followed by the full pipeline.
    pub fn analyze_document(
        &self,
        document_id: Uuid,
        extractor: &dyn PdfTextExtractor,
        pdf_bytes: &[u8],
        report_date: NaiveDate,
    ) -> Result<AnalysisResponse, ExtractionError> {
        tracing::info!(
            document_id = %document_id,
            bytes = pdf_bytes.len(),
            "Starting lab report analysis"
        );

        let lines = extract_lines(extractor, pdf_bytes)?;
        let report = self.analyze_lines(&lines).inspect_err(|e| {
            tracing::warn!(document_id = %document_id, error = %e, "Lab report analysis failed");
        })?;

        Ok(AnalysisResponse::new(document_id, report, report_date))
    }
}
