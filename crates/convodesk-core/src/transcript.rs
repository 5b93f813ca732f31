//! The two-line transcript format shared by both stores.
//!
//! Format contract: `User: {question}` on the first line, the labeled answer
//! on the rest. Parsing splits at the first line boundary only, so a question
//! containing a line break corrupts the reconstruction on reload. Downstream
//! consumers depend on the exact shape; do not tighten it here.

/// Label prefixing the question line.
pub const USER_LABEL: &str = "User: ";
/// Label prefixing the answer line.
pub const ASSISTANT_LABEL: &str = "Assistant: ";

/// Render a question/answer pair into the two-line transcript.
pub fn render(question: &str, answer: &str) -> String {
    format!("{}{}\n{}{}", USER_LABEL, question, ASSISTANT_LABEL, answer)
}

/// Split a transcript back into `(question, answer)`.
///
/// Returns `None` when the text has no line boundary to split on.
pub fn parse(text: &str) -> Option<(String, String)> {
    let (first, rest) = text.split_once('\n')?;
    let question = first.strip_prefix(USER_LABEL).unwrap_or(first);
    let answer = rest.strip_prefix(ASSISTANT_LABEL).unwrap_or(rest);
    Some((question.to_string(), answer.to_string()))
}
