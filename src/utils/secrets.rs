fn is_quote_char(c: char) -> bool {
    matches!(c, '"' | '\'' | '“' | '”' | '‘' | '’')
}

/// Clean up an API key pasted into a config or env var: surrounding
/// whitespace and ASCII/typographic quotes are dropped.
pub fn normalize_api_key(raw: &str) -> String {
    raw.trim().trim_matches(is_quote_char).trim().to_string()
}
