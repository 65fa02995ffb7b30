//! Quiz generation
//!
//! Turns extracted text into true/false items. Every sufficiently long line
//! is taken verbatim from the notes, so the expected answer is always true.

mod types;

pub use types::{QuizItem, QuizItemType, QuizRequest, QuizResult, DEFAULT_MAX_ITEMS};

/// Lines shorter than this (in characters, after trimming) are skipped
pub const MIN_SENTENCE_CHARS: usize = 30;

/// Line boundaries: `\n`, `\r`, vertical tab, form feed, the file/group/record
/// separators, NEL, and the Unicode line and paragraph separators
const LINE_BREAKS: [char; 10] = [
    '\n', '\r', '\x0b', '\x0c', '\x1c', '\x1d', '\x1e', '\u{85}', '\u{2028}', '\u{2029}',
];

const QUESTION_PREFIX: &str = "참/거짓?";
const EXPLANATION: &str = "노트 원문을 그대로 사용한 문장이라 참(true)로 둔 MVP 문제.";

/// Build up to `max_items` true/false items from the lines of `text`
pub fn generate_quiz(text: &str, max_items: usize) -> QuizResult {
    let items = text
        .split(LINE_BREAKS)
        .map(str::trim)
        .filter(|line| line.chars().count() >= MIN_SENTENCE_CHARS)
        .take(max_items)
        .map(|line| QuizItem {
            kind: QuizItemType::Tf,
            question: format!("{} {}", QUESTION_PREFIX, line),
            choices: None,
            answer: "true".to_string(),
            explanation: EXPLANATION.to_string(),
            evidence: vec![line.to_string()],
        })
        .collect();

    QuizResult { items }
}
