//! Raw line extraction from uploaded text
//!
//! Uploaded statements are either one description per line or a loosely
//! structured CSV whose column layout is unknown. Rather than asking for a
//! column mapping, each row contributes its longest comma-separated field,
//! on the assumption that the free-text description is the widest column.
//!
//! This is deliberately not an RFC-4180 parser: quoted fields containing
//! commas are split like any other, and records never span lines.

/// Words that mark the first line as a header row
const HEADER_MARKERS: [&str; 3] = ["raw", "description", "transaction"];

/// Extract candidate transaction descriptions from file text
///
/// Lines are split on `\n` / `\r\n`, trimmed and blank ones dropped. A first
/// line mentioning a header marker is skipped. Each remaining line yields
/// its longest field with one pair of surrounding quotes removed; empty
/// results are discarded and order is preserved.
pub fn extract_lines(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }

    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let Some(first) = lines.first() else {
        return Vec::new();
    };

    let data_lines = if is_header(first) {
        &lines[1..]
    } else {
        &lines[..]
    };

    data_lines
        .iter()
        .map(|line| clean_field(longest_field(line)))
        .filter(|candidate| !candidate.is_empty())
        .collect()
}

/// Does this line look like a column header?
pub fn is_header(line: &str) -> bool {
    let lowered = line.to_lowercase();
    HEADER_MARKERS
        .iter()
        .any(|marker| lowered.contains(marker))
}

/// The longest comma-separated field of a line, first one wins on ties
pub fn longest_field(line: &str) -> &str {
    let mut best = "";
    let mut best_len = 0;
    for (i, field) in line.split(',').enumerate() {
        let len = field.chars().count();
        if i == 0 || len > best_len {
            best = field;
            best_len = len;
        }
    }
    best
}

/// Strip one leading and one trailing `"`, then trim
fn clean_field(field: &str) -> String {
    let field = field.strip_prefix('"').unwrap_or(field);
    let field = field.strip_suffix('"').unwrap_or(field);
    field.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert!(extract_lines("").is_empty());
        assert!(extract_lines("\n\r\n   \n").is_empty());
    }

    #[test]
    fn test_plain_lines_keep_order() {
        let text = "  STARBUCKS #1  \nUBER TRIP\r\n\n\"SHELL OIL\"\n";
        assert_eq!(
            extract_lines(text),
            vec!["STARBUCKS #1", "UBER TRIP", "SHELL OIL"]
        );
    }

    #[test]
    fn test_header_is_dropped_case_insensitively() {
        for header in ["Raw", "DESCRIPTION", "Transaction Text", "date,Description,amount"] {
            let text = format!("{}\nAMAZON MKTPLACE\n", header);
            assert_eq!(extract_lines(&text), vec!["AMAZON MKTPLACE"], "{}", header);
        }
    }

    #[test]
    fn test_header_only_input() {
        assert!(extract_lines("raw\n").is_empty());
        assert!(extract_lines("date,description,amount\r\n\r\n").is_empty());
    }

    #[test]
    fn test_only_first_line_can_be_header() {
        let text = "AMAZON\nTRANSACTION FEE\n";
        assert_eq!(extract_lines(text), vec!["AMAZON", "TRANSACTION FEE"]);
    }

    #[test]
    fn test_longest_field_is_chosen() {
        let text = "2024-01-05,WALMART SUPERCENTER #42,-32.00\n";
        assert_eq!(extract_lines(text), vec!["WALMART SUPERCENTER #42"]);
    }

    #[test]
    fn test_longest_field_tie_goes_to_first() {
        assert_eq!(longest_field("abcd,wxyz"), "abcd");
        assert_eq!(longest_field("ab,abcd,wxyz,x"), "abcd");
        assert_eq!(extract_lines("AAAA,BBBB\n"), vec!["AAAA"]);
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // "₹₹₹" is 3 characters but 9 bytes
        assert_eq!(longest_field("₹₹₹,abcd"), "abcd");
    }

    #[test]
    fn test_commas_only_line_is_dropped() {
        assert!(extract_lines(",,,\n").is_empty());
        assert_eq!(extract_lines(",,,\nUBER\n"), vec!["UBER"]);
    }

    #[test]
    fn test_quotes_are_stripped_once() {
        assert_eq!(extract_lines("\"\"quoted\"\"\n"), vec!["\"quoted\""]);
        assert_eq!(extract_lines("\"\n"), Vec::<String>::new());
    }

    #[test]
    fn test_quoted_commas_are_not_reconstructed() {
        // The quoted field is split at its inner comma; the longer half wins.
        let text = "1,\"COFFEE, TEA AND MORE\",5\n";
        assert_eq!(extract_lines(text), vec!["TEA AND MORE"]);
    }

    #[test]
    fn test_padded_leading_quote_survives() {
        // Quote stripping happens before trimming, so a quote behind a space stays.
        assert_eq!(extract_lines("1, \"UBER EATS\"\n"), vec!["\"UBER EATS"]);
    }
}
