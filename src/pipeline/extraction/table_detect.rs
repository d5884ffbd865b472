use std::borrow::Cow;

/// Cell delimiter written between detected table columns.
pub const CELL_DELIMITER: &str = " | ";

/// Minimum run of spaces treated as a column gap.
const MIN_GAP_SPACES: usize = 3;

/// Minimum number of column gaps for a line to count as a table row.
const MIN_COLUMN_GAPS: usize = 2;

/// Replace column gaps in a tabular raw line with explicit cell delimiters.
///
/// Runs before whitespace collapsing so that column boundaries survive
/// normalization. Lines that do not look tabular are returned untouched.
pub fn delimit_table_cells(raw: &str) -> Cow<'_, str> {
    if !is_tabular_line(raw) {
        return Cow::Borrowed(raw);
    }

    let trimmed = raw.trim();
    let mut out = String::with_capacity(trimmed.len() + 8);
    let mut spaces = 0usize;

    for ch in trimmed.chars() {
        match ch {
            '\t' => spaces = MIN_GAP_SPACES,
            ' ' => spaces += 1,
            _ => {
                flush_gap(&mut out, spaces);
                spaces = 0;
                out.push(ch);
            }
        }
    }

    Cow::Owned(out)
}

fn flush_gap(out: &mut String, spaces: usize) {
    if spaces >= MIN_GAP_SPACES {
        out.push_str(CELL_DELIMITER);
    } else if spaces > 0 {
        out.push(' ');
    }
}

/// Heuristic: a line looks tabular if it has multiple columns separated by
/// tabs or consistent multi-space gaps.
///
/// - Tab-separated: "Potassium\t4.2\tmmol/L"
/// - Multi-space aligned: "Potassium    4.2    mmol/L"
pub fn is_tabular_line(line: &str) -> bool {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.len() < 5 {
        return false;
    }

    count_column_gaps(trimmed) >= MIN_COLUMN_GAPS
}

/// Count tab runs and runs of 3+ consecutive spaces that separate
/// non-empty text segments. Mixed tab/space runs count once.
fn count_column_gaps(text: &str) -> usize {
    let mut count = 0;
    let mut in_gap = false;
    let mut gap_len = 0;

    for ch in text.chars() {
        match ch {
            '\t' | ' ' => {
                gap_len += if ch == '\t' { MIN_GAP_SPACES } else { 1 };
                if gap_len >= MIN_GAP_SPACES && !in_gap {
                    in_gap = true;
                    count += 1;
                }
            }
            _ => {
                in_gap = false;
                gap_len = 0;
            }
        }
    }

    count
}
