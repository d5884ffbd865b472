use super::types::ParsedCandidate;
use crate::models::LabMeasurement;

/// Leading characters that OCR and list layouts put in front of test names.
const NAME_BULLETS: &[char] = &['-', '*', '•', '·', '>', '#'];

/// Promote a parsed candidate to a typed measurement.
///
/// Returns `None` for malformed rows: a non-numeric or non-finite value or
/// bound, or a test name without any letter. Reversed bounds are swapped.
/// Status is assigned later by the classifier.
pub fn build_measurement(candidate: ParsedCandidate) -> Option<LabMeasurement> {
    let Some(test) = clean_test_name(&candidate.test) else {
        tracing::trace!(raw = %candidate.test, "Candidate dropped: unusable test name");
        return None;
    };

    let (Some(value), Some(low), Some(high)) = (
        parse_finite(&candidate.value),
        parse_finite(&candidate.ref_low),
        parse_finite(&candidate.ref_high),
    ) else {
        tracing::trace!(test = %test, "Candidate dropped: non-numeric value or bound");
        return None;
    };

    // Reversed bounds are a common transcription quirk; swap, never reject
    let (ref_low, ref_high) = if low > high {
        tracing::debug!(test = %test, low, high, "Swapping reversed reference bounds");
        (high, low)
    } else {
        (low, high)
    };

    Some(LabMeasurement {
        test,
        value,
        unit: candidate.unit.trim().to_string(),
        ref_low,
        ref_high,
    })
}

fn parse_finite(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Trim bullets, trailing separators and whitespace; require a letter.
fn clean_test_name(raw: &str) -> Option<String> {
    let name = raw
        .trim()
        .trim_start_matches(|c: char| NAME_BULLETS.contains(&c) || c.is_whitespace())
        .trim_end_matches(|c: char| matches!(c, ':' | '.' | ',' | ';') || c.is_whitespace());

    if name.chars().any(char::is_alphabetic) {
        Some(name.to_string())
    } else {
        None
    }
}
