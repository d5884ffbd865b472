use crate::models::{LabResult, LabStatus, Summary};

/// Count classified results by status in a single pass.
///
/// `Low` and `High` collapse into `abnormal`. The empty slice yields an
/// all-zero summary.
pub fn summarize(results: &[LabResult]) -> Summary {
    results.iter().fold(Summary::default(), |mut summary, result| {
        match result.status {
            LabStatus::Normal => summary.normal += 1,
            LabStatus::Near => summary.near += 1,
            LabStatus::Low | LabStatus::High => summary.abnormal += 1,
        }
        summary.total += 1;
        summary
    })
}
