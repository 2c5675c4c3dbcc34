//! Prompt construction for AI-generated commit messages.

use super::context::ProjectContext;

/// Fixed directive opening every prompt.
const DIRECTIVE: &str = "Generate a concise and descriptive git commit message based on the following changes. \
Follow the conventional commit format (e.g., feat:, fix:, docs:, style:, refactor:, test:, chore:). \
Only respond with the commit message, nothing else.";

const DETAILED_SUFFIX: &str =
    "Please provide a more detailed commit message with additional context and explanations.";

const SUMMARIZE_PREFIX: &str = "Please summarize this commit message in 50 characters or less:";

/// How the payload of a prompt is shaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction<'a> {
    /// Describe the diff.
    Standard,
    /// Describe the diff with additional context and explanation.
    Detailed,
    /// Compress a previously generated message. The diff is not sent.
    Summarize { previous: &'a str },
    /// Describe the diff while honoring user feedback.
    FeedbackGuided { feedback: &'a str },
}

impl Instruction<'_> {
    pub fn name(&self) -> &'static str {
        match self {
            Instruction::Standard => "standard",
            Instruction::Detailed => "detailed",
            Instruction::Summarize { .. } => "summarize",
            Instruction::FeedbackGuided { .. } => "feedback",
        }
    }
}

/// Build the single instruction blob sent to the completion endpoint.
///
/// Pure: identical inputs always produce the identical string. The payload
/// comes first, then the changed-file list, then the project sentence; the
/// last two are omitted when empty.
pub fn compose(
    instruction: &Instruction<'_>,
    diff: &str,
    context: &ProjectContext,
    changed_files: &[String],
) -> String {
    let payload = match instruction {
        Instruction::Standard => diff.to_string(),
        Instruction::Detailed => format!("{diff}\n\n{DETAILED_SUFFIX}"),
        Instruction::Summarize { previous } => format!("{SUMMARIZE_PREFIX}\n\n{previous}"),
        Instruction::FeedbackGuided { feedback } => format!(
            "Based on this diff:\n\n{diff}\n\nAnd considering this feedback: {feedback}\n\n\
             Generate an appropriate commit message."
        ),
    };

    let mut prompt = format!("{DIRECTIVE}\n\nChanges:\n{payload}");

    if !changed_files.is_empty() {
        prompt.push_str("\n\nChanged files: ");
        prompt.push_str(&changed_files.join(", "));
    }

    if !context.is_empty() {
        prompt.push_str("\n\nProject information: ");
        prompt.push_str(&context.sentence());
    }

    prompt
}
