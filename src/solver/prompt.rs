/// The four things every solution is asked to include.
pub const DIRECTIVES: [&str; 4] = [
    "Time and space complexity analysis",
    "Clear code comments",
    "Example test cases",
    "Edge case handling",
];

/// Build the one-turn prompt for `problem` in `language`.
pub fn build_prompt(problem: &str, language: &str) -> String {
    let language = display_name(language);
    let mut prompt = String::new();
    prompt.push_str("Given this programming problem:\n");
    prompt.push_str(problem);
    prompt.push_str("\n\n");
    prompt.push_str(&format!("Please provide an optimized {} solution with:\n", language));
    for (i, directive) in DIRECTIVES.iter().enumerate() {
        prompt.push_str(&format!("{}. {}\n", i + 1, directive));
    }
    prompt.push_str(&format!("\nFormat the solution in {} code.", language));
    prompt
}

fn display_name(language: &str) -> String {
    let language = language.trim();
    match language.to_ascii_lowercase().as_str() {
        "" | "py" | "python" | "python3" => "Python".to_string(),
        "cpp" | "c++" => "C++".to_string(),
        "js" | "javascript" => "JavaScript".to_string(),
        "ts" | "typescript" => "TypeScript".to_string(),
        _ => {
            let mut chars = language.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_known_languages() {
        assert_eq!(display_name("py"), "Python");
        assert_eq!(display_name("c++"), "C++");
        assert_eq!(display_name("rust"), "Rust");
    }

    #[test]
    fn numbers_directives_in_order() {
        let prompt = build_prompt("two sum", "python");
        let first = prompt.find("1. Time and space complexity analysis").unwrap();
        let last = prompt.find("4. Edge case handling").unwrap();
        assert!(first < last);
        assert!(prompt.ends_with("Format the solution in Python code."));
    }
}
