/// Size of a solution as shown next to the transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolutionStats {
    pub lines: usize,
    pub characters: usize,
}

impl SolutionStats {
    pub fn of(code: &str) -> Self {
        Self {
            lines: code.split('\n').count(),
            characters: code.chars().count(),
        }
    }
}
