use unicode_normalization::UnicodeNormalization;

/// Normalize one raw extracted line before pattern matching.
///
/// NFC-composes the text and drops invisible characters. Hyphen and minus
/// variants become `-`. Any other character outside the allowlist becomes a
/// space, so neighbouring tokens never fuse. Whitespace runs (including
/// non-breaking spaces and tabs) collapse to one space and both ends are
/// trimmed. Never fails; blank input yields an empty string.
pub fn normalize_line(raw: &str) -> String {
    raw.nfc()
        .filter(|c| !is_invisible(*c))
        .map(|c| {
            if is_hyphen_variant(c) {
                '-'
            } else if c.is_whitespace() || is_kept_char(c) {
                c
            } else {
                ' '
            }
        })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalize a sequence of lines, dropping the ones that end up empty.
/// Relative order is preserved.
pub fn normalize_lines<I, S>(lines: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .map(|l| normalize_line(l.as_ref()))
        .filter(|l| !l.is_empty())
        .collect()
}

/// Zero-width and soft-hyphen characters that PDF text layers insert inside words.
fn is_invisible(c: char) -> bool {
    matches!(
        c,
        '\u{00AD}' | '\u{200B}' | '\u{200C}' | '\u{200D}' | '\u{2060}' | '\u{FEFF}'
    )
}

/// Hyphen, non-breaking hyphen, figure dash and minus signs.
fn is_hyphen_variant(c: char) -> bool {
    matches!(
        c,
        '\u{2010}' | '\u{2011}' | '\u{2012}' | '\u{2212}' | '\u{FE63}' | '\u{FF0D}'
    )
}

/// Characters that survive normalization besides whitespace.
/// Alphanumerics plus the punctuation lab reports actually use.
fn is_kept_char(c: char) -> bool {
    c.is_alphanumeric()
        || matches!(
            c,
            '.' | ','
                | ';'
                | ':'
                | '-'
                | '/'
                | '('
                | ')'
                | '['
                | ']'
                | '+'
                | '='
                | '%'
                | '#'
                | '@'
                | '&'
                | '\''
                | '"'
                | '!'
                | '?'
                | '<'
                | '>'
                | '*'
                | '_'
                | '|'
                | '^'
                | '~'
                | '°'
                | '²'
                | '³'
                | 'µ'
                | '×'
                | '±'
                | '≤'
                | '≥'
                | '\u{2013}' // En-dash –
                | '\u{2014}' // Em-dash —
                | '\u{2019}' // Right single quotation mark '
                | '\u{2018}' // Left single quotation mark '
                | '\u{201C}' // Left double quotation mark "
                | '\u{201D}' // Right double quotation mark "
        )
}
