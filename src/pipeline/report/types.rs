use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{LabResult, Summary};
use crate::pipeline::analysis::summarize;

/// Classified results of one document together with their status counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabReport {
    pub results: Vec<LabResult>,
    pub summary: Summary,
}

impl LabReport {
    /// Build a report, deriving the summary from `results`.
    pub fn new(results: Vec<LabResult>) -> Self {
        let summary = summarize(&results);
        Self { results, summary }
    }
}

/// Envelope handed to the presentation layer after a successful upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub success: bool,
    pub document_id: Uuid,
    pub results: Vec<LabResult>,
    pub summary: Summary,
    pub report_date: NaiveDate,
}

impl AnalysisResponse {
    pub fn new(document_id: Uuid, report: LabReport, report_date: NaiveDate) -> Self {
        Self {
            success: true,
            document_id,
            results: report.results,
            summary: report.summary,
            report_date,
        }
    }
}
