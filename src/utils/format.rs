use console::style;

use crate::session::history::{Message, Role};
use crate::solver::SolutionStats;

pub fn success(msg: &str) -> String { style(msg).green().to_string() }
pub fn warn(msg: &str) -> String { style(msg).yellow().to_string() }
pub fn error(msg: &str) -> String { style(msg).red().to_string() }

/// Header line plus body, the way a chat bubble reads in a terminal.
pub fn message(msg: &Message) -> String {
    let who = match msg.role() {
        Role::User => style("you").cyan().bold(),
        Role::Assistant => style("assistant").magenta().bold(),
    };
    let body = match msg.role() {
        Role::User => msg.content().to_string(),
        Role::Assistant => code(msg.content()),
    };
    format!("{} {}\n{}", style(msg.timestamp()).dim(), who, body)
}

/// Assistant solutions are always shown as code.
pub fn code(src: &str) -> String {
    src.lines()
        .map(|line| format!("  {}", style(line).green()))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn stats(stats: &SolutionStats) -> String {
    format!(
        "{} {}   {} {}",
        style("Lines of Code:").bold(),
        stats.lines,
        style("Characters:").bold(),
        stats.characters
    )
}
