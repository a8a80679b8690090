//! Text clean-up helpers for civic CSV exports.
//!
//! Some exports were written as UTF-8, read back as Latin-1 and written out
//! as UTF-8 again, which turns `ü` into `Ã¼`. [`repair_mojibake`] reverses
//! that. [`normalize_for_match`] prepares free text for keyword matching.

/// Markers that only appear in double-encoded Latin-1 text
const MOJIBAKE_MARKERS: [char; 2] = ['Ã', 'Â'];

/// Trim a value and undo Latin-1-in-UTF-8 double encoding.
///
/// Values without the `Ã`/`Â` markers are returned trimmed and otherwise
/// unchanged. Marked values are re-decoded byte-wise: each char is truncated
/// to its low byte and the bytes are decoded as UTF-8, lossily.
pub fn repair_mojibake(value: &str) -> String {
    let trimmed = value.trim();
    if !trimmed.contains(MOJIBAKE_MARKERS) {
        return trimmed.to_string();
    }

    let bytes: Vec<u8> = trimmed.chars().map(|c| (c as u32 & 0xff) as u8).collect();
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Lowercase, fold accents, replace punctuation with spaces, collapse
/// whitespace.
pub fn normalize_for_match(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.to_lowercase().chars() {
        let c = fold_accent(c);
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            out.push(c);
        } else {
            out.push(' ');
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split normalized text into words.
pub fn tokenize(value: &str) -> Vec<String> {
    normalize_for_match(value)
        .split(' ')
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

fn fold_accent(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'ç' => 'c',
        'è' | 'é' | 'ê' | 'ë' => 'e',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'ñ' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' => 'o',
        'ù' | 'ú' | 'û' | 'ü' => 'u',
        'ý' | 'ÿ' => 'y',
        other => other,
    }
}
