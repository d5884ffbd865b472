use serde::{Deserialize, Serialize};

use super::enums::LabStatus;

/// A typed lab row produced by the record builder, before classification.
///
/// Holds `ref_low <= ref_high`, finite numbers and a non-empty test name.
#[derive(Debug, Clone, PartialEq)]
pub struct LabMeasurement {
    pub test: String,
    pub value: f64,
    pub unit: String,
    pub ref_low: f64,
    pub ref_high: f64,
}

/// One classified lab result: the unit of output of the pipeline.
///
/// Field names are the interchange contract with the presentation layer
/// (`test`, `value`, `unit`, `refLow`, `refHigh`, `status`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabResult {
    pub test: String,
    pub value: f64,
    pub unit: String,
    pub ref_low: f64,
    pub ref_high: f64,
    pub status: LabStatus,
}

impl LabResult {
    pub fn from_measurement(measurement: LabMeasurement, status: LabStatus) -> Self {
        Self {
            test: measurement.test,
            value: measurement.value,
            unit: measurement.unit,
            ref_low: measurement.ref_low,
            ref_high: measurement.ref_high,
            status,
        }
    }
}
