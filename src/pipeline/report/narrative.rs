use crate::models::LabResult;

/// Heading placed above the rendered result lines.
pub const RESULTS_HEADING: &str = "Here are the patient's laboratory results:";

/// Render results as the plain-text block consumed by the external
/// narrative generator, one sentence per result in pipeline order.
pub fn render_results_text(results: &[LabResult]) -> String {
    let lines: Vec<String> = results.iter().map(render_result_line).collect();
    format!("{RESULTS_HEADING}\n\n{}", lines.join("\n"))
}

/// "Glucose: 95 mg/dL (reference range 70–100). Status: Normal."
pub fn render_result_line(result: &LabResult) -> String {
    let measured = if result.unit.is_empty() {
        format!("{}", result.value)
    } else {
        format!("{} {}", result.value, result.unit)
    };
    format!(
        "{}: {measured} (reference range {}\u{2013}{}). Status: {}.",
        result.test, result.ref_low, result.ref_high, result.status
    )
}
