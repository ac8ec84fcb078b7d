use once_cell::sync::Lazy;
use regex::Regex;

// Either an info line ending in a newline followed by a body, or a block
// opened and closed on the same line. (?s) lets the body cross newlines.
static FENCED_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)```(?:([^\n`]*)\n(.*?)|([^\n`]*))```").expect("valid regex")
});

#[derive(Debug, Clone)]
pub struct CodeBlock {
    pub language: Option<String>,
    pub filename: Option<String>,
    pub content: String,
}

/// How a solution was pulled out of a model reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// First block tagged with the target language.
    Tagged(String),
    /// No tagged block; the best other fenced block was used.
    Untagged(String),
    /// No fenced block at all; the whole reply, trimmed.
    Raw(String),
}

impl Extraction {
    pub fn code(&self) -> &str {
        match self {
            Self::Tagged(s) | Self::Untagged(s) | Self::Raw(s) => s,
        }
    }

    pub fn into_code(self) -> String {
        match self {
            Self::Tagged(s) | Self::Untagged(s) | Self::Raw(s) => s,
        }
    }
}

/// Extract triple-backtick fenced code blocks, in order.
/// Supports forms like:
/// ```lang\n...```
/// ```lang {attrs}\n...```
/// ```filename.ext\n...```
/// ```lang inline code```
///
/// Only the first word of the info line is the tag; attributes after it are
/// dropped. A closing fence is never reused as an opening one.
pub fn extract_code_blocks(text: &str) -> Vec<CodeBlock> {
    let mut results = Vec::new();
    for caps in FENCED_BLOCK.captures_iter(text) {
        let (info, body) = match (caps.get(1), caps.get(2), caps.get(3)) {
            (Some(info), Some(body), _) => (info.as_str().trim(), body.as_str()),
            (_, _, Some(line)) => {
                let line = line.as_str().trim();
                match line.split_once(char::is_whitespace) {
                    Some((tag, code)) => (tag, code),
                    None => (line, ""),
                }
            }
            _ => continue,
        };
        let tag = info.split_whitespace().next().unwrap_or("");
        let (language, filename) = if tag.contains('.') {
            (None, Some(tag.to_string()))
        } else if tag.is_empty() {
            (None, None)
        } else {
            (Some(tag.to_string()), None)
        };
        results.push(CodeBlock {
            language,
            filename,
            content: body.to_string(),
        });
    }
    results
}

pub fn choose_best_block<'a>(blocks: &'a [CodeBlock], preferred_langs: &[&str]) -> Option<&'a CodeBlock> {
    if blocks.is_empty() { return None; }
    // exact language match first
    for &lang in preferred_langs {
        if let Some(b) = blocks.iter().find(|b| b.language.as_deref().map(|s| s.eq_ignore_ascii_case(lang)).unwrap_or(false)) {
            return Some(b);
        }
    }
    // filename extension match
    for &lang in preferred_langs {
        let ext = guess_ext_from_lang(lang);
        if let Some(b) = blocks.iter().find(|b| b.filename.as_deref().map(|f| f.ends_with(&format!(".{}", ext))).unwrap_or(false)) {
            return Some(b);
        }
    }
    // otherwise, first block
    blocks.first()
}

pub fn guess_ext_from_lang(lang: &str) -> &str {
    match lang.to_ascii_lowercase().as_str() {
        "cpp" | "c++" => "cpp",
        "c" => "c",
        "rust" | "rs" => "rs",
        "python" | "py" => "py",
        "typescript" | "ts" => "ts",
        "javascript" | "js" => "js",
        "go" => "go",
        "java" => "java",
        _ => "txt",
    }
}

/// Fence tags accepted for a language. Unknown languages only match themselves.
pub fn language_tags(lang: &str) -> Vec<String> {
    let lang = lang.trim().to_ascii_lowercase();
    let aliases: &[&str] = match lang.as_str() {
        "python" | "py" | "python3" => &["python", "python3", "py"],
        "rust" | "rs" => &["rust", "rs"],
        "cpp" | "c++" => &["cpp", "c++", "cxx"],
        "javascript" | "js" => &["javascript", "js"],
        "typescript" | "ts" => &["typescript", "ts"],
        "go" | "golang" => &["go", "golang"],
        _ => &[],
    };
    if aliases.is_empty() {
        vec![lang]
    } else {
        aliases.iter().map(|s| s.to_string()).collect()
    }
}

fn find_tagged<'a>(blocks: &'a [CodeBlock], tags: &[String]) -> Option<&'a CodeBlock> {
    blocks.iter().find(|b| {
        b.language
            .as_deref()
            .map(|l| tags.iter().any(|t| t.eq_ignore_ascii_case(l)))
            .unwrap_or(false)
    })
}

/// Interior of the first block whose fence is tagged with `lang`, trimmed.
pub fn extract_tagged_block(text: &str, lang: &str) -> Option<String> {
    let blocks = extract_code_blocks(text);
    find_tagged(&blocks, &language_tags(lang)).map(|b| b.content.trim().to_string())
}

/// Pull the solution code for `lang` out of a free-text model reply.
///
/// Prefers the first block tagged with `lang`, then the best other fenced
/// block, and finally falls back to the whole trimmed reply.
pub fn extract_solution(text: &str, lang: &str) -> Extraction {
    let blocks = extract_code_blocks(text);
    let tags = language_tags(lang);
    if let Some(block) = find_tagged(&blocks, &tags) {
        return Extraction::Tagged(block.content.trim().to_string());
    }
    let preferred = tags.iter().map(String::as_str).collect::<Vec<_>>();
    match choose_best_block(&blocks, &preferred) {
        Some(block) => Extraction::Untagged(block.content.trim().to_string()),
        None => Extraction::Raw(text.trim().to_string()),
    }
}
