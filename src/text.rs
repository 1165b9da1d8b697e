//! Small text helpers shared by rendering, copy serialization and search.

// ============================================================================
// Text Escaping
// ============================================================================

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

// ============================================================================
// Whitespace
// ============================================================================

/// Collapse every whitespace run to a single space and trim the ends.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// The value a placeholder group should display for raw user input:
/// the trimmed input, or the placeholder itself when nothing is left.
pub fn normalize_field_value<'a>(raw: &'a str, default_text: &'a str) -> &'a str {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        default_text
    } else {
        trimmed
    }
}

/// Upper-case the first character, e.g. `opening` -> `Opening`.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  a \n\t b   c  "), "a b c");
        assert_eq!(collapse_whitespace("   "), "");
    }

    #[test]
    fn test_normalize_field_value() {
        assert_eq!(normalize_field_value("  Alice ", "[Cx Name]"), "Alice");
        assert_eq!(normalize_field_value("   ", "[Cx Name]"), "[Cx Name]");
        assert_eq!(normalize_field_value("", "[Cx Name]"), "[Cx Name]");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("opening"), "Opening");
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("élan"), "Élan");
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("<a href='x'>&</a>"), "&lt;a href=&#39;x&#39;&gt;&amp;&lt;/a&gt;");
    }
}
