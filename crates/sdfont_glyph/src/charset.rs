//! Character-set handling
//!
//! The compiler operates on a closed, ordered set of Unicode code points.
//! The built-in default covers printable ASCII plus the Latin-1 supplement.

use rustc_hash::FxHashSet;

/// Build the default character set
///
/// Printable ASCII `!`..=`~`, then space, then the Latin-1 supplement
/// `¡`..=`ÿ` (soft hyphen included), in that order.
pub fn default_charset() -> String {
    let mut out = String::new();
    for c in '!'..='~' {
        out.push(c);
    }
    out.push(' ');
    for c in '\u{A1}'..='\u{FF}' {
        out.push(c);
    }
    out
}

/// Extract the ordered code-point set from a charset string
///
/// Iteration order is first-occurrence order; duplicate code points are
/// dropped so each glyph appears exactly once in the output assets.
pub fn code_points(charset: &str) -> Vec<char> {
    let mut seen = FxHashSet::default();
    charset.chars().filter(|c| seen.insert(*c)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_charset_contents() {
        let set = default_charset();
        let chars: Vec<char> = set.chars().collect();
        // 94 printable ASCII + space + 95 Latin-1 supplement
        assert_eq!(chars.len(), 190);
        assert_eq!(chars[0], '!');
        assert_eq!(chars[93], '~');
        assert_eq!(chars[94], ' ');
        assert_eq!(chars[95], '\u{A1}');
        assert_eq!(*chars.last().unwrap(), '\u{FF}');
    }

    #[test]
    fn test_code_points_preserve_order() {
        let points = code_points("BAC");
        assert_eq!(points, vec!['B', 'A', 'C']);
    }

    #[test]
    fn test_code_points_dedup_keeps_first() {
        let points = code_points("ABAB");
        assert_eq!(points, vec!['A', 'B']);
    }

    #[test]
    fn test_code_points_multibyte() {
        let points = code_points("é漢");
        assert_eq!(points, vec!['é', '漢']);
    }
}
