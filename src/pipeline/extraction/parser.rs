use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::numeric::{normalize_row_numbers, NUMBER, RANGE_SEPARATOR};
use super::types::ParsedCandidate;
use crate::models::RowLayout;

/// Layouts tried against every line, most constrained first. The first
/// layout that matches wins, so this order decides overlapping lines.
pub const LAYOUT_PRIORITY: [RowLayout; 4] = [
    RowLayout::TableCells,
    RowLayout::ParenthesizedRange,
    RowLayout::InlineRange,
    RowLayout::SplitBounds,
];

/// Units: "mg/dL", "%", "µg/L", "x10^3/µL", "10³/µL".
const UNIT: &str = r"(?:[x×*]?10(?:\^\d+|[²³⁶⁹])/[^\s()\[\]|]+|[A-Za-zµμ%°/][^\s()\[\]|]*)";

/// Optional wording in front of a reference range.
const REF_PREFIX: &str = r"(?:(?i:reference(?:\s+range)?|ref|normal(?:\s+range)?|range|vr)\s*[:.]?\s*)?";

/// Abnormal flags printed by labs. Status is derived, so these are skipped.
const FLAG: &str = r"(?i:HH|LL|H|L|N|A|\*+|high|low|normal|abnormal)";

/// Test name followed by `:` or whitespace. Pipes belong to table rows.
const NAME: &str = r"(?P<name>[^|]+?)(?::\s*|\s+)";

// A flag may sit between the value and the unit ("110 H mg/dL"). It is
// matched lazily so that units starting with a flag letter ("hpf") stay units.

static PARENTHESIZED_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    compile(&format!(
        r"^{NAME}(?P<value>{NUMBER})(?:\s*{FLAG})??\s*(?P<unit>{UNIT})?\s*[(\[]\s*{REF_PREFIX}(?P<low>{NUMBER})\s*{RANGE_SEPARATOR}\s*(?P<high>{NUMBER})(?:\s*(?P<unit2>{UNIT}))?\s*[)\]](?:\s+{FLAG})?$"
    ))
});

static INLINE_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    compile(&format!(
        r"^{NAME}(?P<value>{NUMBER})(?:\s*{FLAG})??(?:\s*(?P<unit>{UNIT}))?\s+{REF_PREFIX}(?P<low>{NUMBER})\s*{RANGE_SEPARATOR}\s*(?P<high>{NUMBER})(?:\s+{FLAG}|\s*(?P<unit2>{UNIT})(?:\s+{FLAG})?)?$"
    ))
});

static SPLIT_BOUNDS: LazyLock<Regex> = LazyLock::new(|| {
    compile(&format!(
        r"^{NAME}(?P<value>{NUMBER})(?:\s*{FLAG})??\s*(?P<unit>{UNIT})\s+(?P<low>{NUMBER})\s+(?P<high>{NUMBER})(?:\s+{FLAG})?$"
    ))
});

static VALUE_CELL: LazyLock<Regex> = LazyLock::new(|| {
    compile(&format!(
        r"^(?P<value>{NUMBER})(?:\s*{FLAG})??(?:\s*(?P<unit>{UNIT}))?$"
    ))
});

static RANGE_CELL: LazyLock<Regex> = LazyLock::new(|| {
    compile(&format!(
        r"^[(\[]?\s*{REF_PREFIX}(?P<low>{NUMBER})\s*{RANGE_SEPARATOR}\s*(?P<high>{NUMBER})(?:\s*(?P<unit>{UNIT}))?\s*[)\]]?$"
    ))
});

static NUMBER_CELL: LazyLock<Regex> = LazyLock::new(|| compile(&format!(r"^{NUMBER}$")));

static UNIT_CELL: LazyLock<Regex> = LazyLock::new(|| compile(&format!(r"^{UNIT}$")));

static FLAG_CELL: LazyLock<Regex> = LazyLock::new(|| compile(&format!(r"^{FLAG}$")));

/// A reference range anywhere in a text ("70-100", "0,4 to 4,0").
static RANGE_SPAN: LazyLock<Regex> = LazyLock::new(|| {
    compile(&format!(r"{NUMBER}\s*{RANGE_SEPARATOR}\s*{NUMBER}"))
});

/// The patterns are compile-time constants; a failure here is a bug caught by tests.
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap()
}

/// Match a normalized line against the layout patterns in priority order.
///
/// Returns `None` for lines that are not lab rows (headers, footers, prose).
/// Never fails.
pub fn parse_line(line: &str) -> Option<ParsedCandidate> {
    let line = line.trim();
    if line.is_empty() || !line.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }

    let candidate = LAYOUT_PRIORITY
        .iter()
        .find_map(|layout| match_layout(*layout, line));

    if let Some(ref c) = candidate {
        tracing::trace!(layout = c.layout.as_str(), test = %c.test, "Line matched");
    }

    candidate
}

/// Parse a line that may hold several rows placed side by side by layout
/// reconstruction ("Glucose 95 mg/dL 70-100 LDL 128 mg/dL 0-130").
///
/// A single-row match whose test name swallowed a complete earlier row is
/// split after that row. Names that merely contain a range ("CA 19-9") stay
/// whole when no complete row precedes it. Returns rows in reading order.
pub fn parse_rows(line: &str) -> Vec<ParsedCandidate> {
    let line = line.trim();
    let Some(candidate) = parse_line(line) else {
        return Vec::new();
    };

    if candidate.layout != RowLayout::TableCells && RANGE_SPAN.is_match(&candidate.test) {
        if let Some(rows) = split_rows(line) {
            tracing::debug!(rows = rows.len(), "Line split into several rows");
            return rows;
        }
    }

    vec![candidate]
}

/// Try every word boundary after the first range, longest leading row
/// first; both sides must parse.
fn split_rows(line: &str) -> Option<Vec<ParsedCandidate>> {
    let first_range_end = RANGE_SPAN.find(line)?.end();

    line.char_indices()
        .filter(|&(i, c)| i >= first_range_end && c.is_whitespace())
        .map(|(i, _)| i)
        .rev()
        .find_map(|i| {
            let (head, tail) = line.split_at(i);
            parse_line(head)?;
            let tail_rows = parse_rows(tail);
            if tail_rows.is_empty() {
                return None;
            }
            let mut rows = parse_rows(head);
            rows.extend(tail_rows);
            Some(rows)
        })
}

/// Try a single layout against a normalized line.
pub fn match_layout(layout: RowLayout, line: &str) -> Option<ParsedCandidate> {
    match layout {
        RowLayout::TableCells => match_table_cells(line),
        RowLayout::ParenthesizedRange => match_regex(&PARENTHESIZED_RANGE, layout, line),
        RowLayout::InlineRange => match_regex(&INLINE_RANGE, layout, line),
        RowLayout::SplitBounds => match_regex(&SPLIT_BOUNDS, layout, line),
    }
}

fn match_regex(re: &Regex, layout: RowLayout, line: &str) -> Option<ParsedCandidate> {
    let caps = re.captures(line)?;
    let unit = unit_group(&caps, "unit").or_else(|| unit_group(&caps, "unit2"));

    // Bare number runs ("Date 2024 01 15") are only rows with a real unit
    if layout == RowLayout::SplitBounds && unit.is_none() {
        return None;
    }

    Some(candidate(
        group(&caps, "name")?,
        [group(&caps, "value")?, group(&caps, "low")?, group(&caps, "high")?],
        unit.unwrap_or_default(),
        layout,
    ))
}

fn candidate(test: &str, numbers: [&str; 3], unit: &str, layout: RowLayout) -> ParsedCandidate {
    let [value, ref_low, ref_high] = normalize_row_numbers(numbers);
    ParsedCandidate {
        test: test.to_string(),
        value,
        unit: unit.to_string(),
        ref_low,
        ref_high,
        layout,
    }
}

fn group<'t>(caps: &Captures<'t>, name: &str) -> Option<&'t str> {
    caps.name(name)
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
}

/// A unit capture that is really an abnormal flag ("5.3 H") is no unit.
fn unit_group<'t>(caps: &Captures<'t>, name: &str) -> Option<&'t str> {
    group(caps, name).filter(|u| !is_flag(u))
}

fn is_flag(text: &str) -> bool {
    FLAG_CELL.is_match(text)
}

/// Pipe-delimited row: `name | value [unit] | [unit |] range` or
/// `name | value [unit] | [unit |] low | high`, optionally followed by a
/// flag cell.
fn match_table_cells(line: &str) -> Option<ParsedCandidate> {
    if !line.contains('|') {
        return None;
    }

    let cells: Vec<&str> = line
        .split('|')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .collect();
    if cells.len() < 3 {
        return None;
    }

    let name = cells[0];
    let value_caps = VALUE_CELL.captures(cells[1])?;
    let value = group(&value_caps, "value")?;
    let value_unit = unit_group(&value_caps, "unit");

    let mut rest = &cells[2..];
    if rest.len() > 1 && rest.last().is_some_and(|c| is_flag(c)) {
        rest = &rest[..rest.len() - 1];
    }

    let (unit_cell, low, high, range_unit) = match rest {
        [range] => {
            let (low, high, unit) = range_cell(range)?;
            (None, low, high, unit)
        }
        [unit, range] if UNIT_CELL.is_match(unit) => {
            let (low, high, unit2) = range_cell(range)?;
            (Some(*unit), low, high, unit2)
        }
        [low, high] if NUMBER_CELL.is_match(low) && NUMBER_CELL.is_match(high) => {
            (None, *low, *high, None)
        }
        [unit, low, high]
            if UNIT_CELL.is_match(unit)
                && NUMBER_CELL.is_match(low)
                && NUMBER_CELL.is_match(high) =>
        {
            (Some(*unit), *low, *high, None)
        }
        _ => return None,
    };

    let unit_cell = unit_cell.filter(|u| !is_flag(u));
    let unit = value_unit.or(unit_cell).or(range_unit).unwrap_or_default();

    Some(candidate(name, [value, low, high], unit, RowLayout::TableCells))
}

fn range_cell(cell: &str) -> Option<(&str, &str, Option<&str>)> {
    let caps = RANGE_CELL.captures(cell)?;
    Some((
        group(&caps, "low")?,
        group(&caps, "high")?,
        unit_group(&caps, "unit"),
    ))
}
