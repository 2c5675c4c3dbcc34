//! Interactive refinement of a generated commit message.
//!
//! The session performs one Standard generation up front, then loops on
//! user commands until the message is committed or the user cancels. Every
//! regeneration issues exactly one completion call; the current message is
//! only replaced once that call succeeds.

use tracing::debug;

use crate::error::SessionError;
use crate::git::{CommitExecutor, DiffSnapshot};
use crate::llm::CompletionClient;

use super::command::{InputSource, SessionCommand};
use super::context::ProjectContext;
use super::display;
use super::prompt::{Instruction, compose};

/// Mutable state owned by a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub current_message: String,
    pub diff: DiffSnapshot,
    pub model: String,
}

/// How a session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    Committed { message: String },
    Canceled,
}

/// Options for [`run`].
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub model: String,
    /// Commit the first generated message without asking.
    pub auto_commit: bool,
}

/// Generate a message for `diff` and drive it to a commit or cancellation.
///
/// In auto-commit mode `input` is never read.
pub async fn run<C, X, I>(
    client: &C,
    committer: &X,
    diff: DiffSnapshot,
    context: ProjectContext,
    options: SessionOptions,
    input: &mut I,
) -> Result<SessionOutcome, SessionError>
where
    C: CompletionClient + ?Sized,
    X: CommitExecutor + ?Sized,
    I: InputSource + ?Sized,
{
    let session = RefinementSession::start(client, committer, diff, context, options.model).await?;

    if options.auto_commit {
        session.run_auto()
    } else {
        session.run_interactive(input).await
    }
}

/// The refinement state machine.
pub struct RefinementSession<'a, C: ?Sized, X: ?Sized> {
    client: &'a C,
    committer: &'a X,
    context: ProjectContext,
    state: SessionState,
}

impl<'a, C, X> RefinementSession<'a, C, X>
where
    C: CompletionClient + ?Sized,
    X: CommitExecutor + ?Sized,
{
    /// Perform the initial Standard generation.
    pub async fn start(
        client: &'a C,
        committer: &'a X,
        diff: DiffSnapshot,
        context: ProjectContext,
        model: impl Into<String>,
    ) -> Result<Self, SessionError> {
        let mut session = Self::resume(
            client,
            committer,
            context,
            SessionState {
                current_message: String::new(),
                diff,
                model: model.into(),
            },
        );

        display::print_progress("Generating commit message...");
        let message = session.generate(&Instruction::Standard).await?;
        session.replace_message(message, "GENERATED COMMIT MESSAGE");

        Ok(session)
    }

    /// Continue from an existing state without generating.
    pub fn resume(client: &'a C, committer: &'a X, context: ProjectContext, state: SessionState) -> Self {
        Self {
            client,
            committer,
            context,
            state,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn current_message(&self) -> &str {
        &self.state.current_message
    }

    /// Commit the current message without offering refinement.
    pub fn run_auto(self) -> Result<SessionOutcome, SessionError> {
        self.commit_current()
    }

    /// Read commands until the message is committed or the user cancels.
    pub async fn run_interactive<I: InputSource + ?Sized>(
        mut self,
        input: &mut I,
    ) -> Result<SessionOutcome, SessionError> {
        display::print_options();

        loop {
            let raw = input.read_command().map_err(SessionError::Input)?;
            let command = SessionCommand::parse(&raw);
            debug!("Session command: {:?}", command);

            if let Some(outcome) = self.apply(command, input).await? {
                return Ok(outcome);
            }
        }
    }

    /// Apply one command. `None` means the loop continues.
    async fn apply<I: InputSource + ?Sized>(
        &mut self,
        command: SessionCommand,
        input: &mut I,
    ) -> Result<Option<SessionOutcome>, SessionError> {
        match command {
            SessionCommand::Accept => self.commit_current().map(Some),
            SessionCommand::Cancel => Ok(Some(SessionOutcome::Canceled)),
            SessionCommand::Detailed => {
                display::print_progress("🔍 Generating a more detailed commit message...");
                let message = self.generate(&Instruction::Detailed).await?;
                self.replace_message(message, "GENERATED DETAILED COMMIT MESSAGE");
                Ok(None)
            }
            SessionCommand::Retry => {
                display::print_progress("🔄 Retrying with a new generation...");
                let message = self.generate(&Instruction::Standard).await?;
                self.replace_message(message, "REGENERATED COMMIT MESSAGE");
                Ok(None)
            }
            SessionCommand::Summarize => {
                display::print_progress("📝 Summarizing the commit message...");
                let message = self
                    .generate(&Instruction::Summarize {
                        previous: &self.state.current_message,
                    })
                    .await?;
                self.replace_message(message, "SUMMARIZED COMMIT MESSAGE");
                Ok(None)
            }
            SessionCommand::Feedback => {
                display::print_progress("🔍 Enter your feedback for the commit message:");
                let feedback = input.read_feedback().map_err(SessionError::Input)?;

                display::print_progress("🎯 Generating commit message based on your feedback...");
                let message = self
                    .generate(&Instruction::FeedbackGuided {
                        feedback: &feedback,
                    })
                    .await?;
                self.replace_message(message, "FEEDBACK-BASED COMMIT MESSAGE");
                Ok(None)
            }
            SessionCommand::Invalid(_) => {
                display::print_invalid_option();
                Ok(None)
            }
        }
    }

    async fn generate(&self, instruction: &Instruction<'_>) -> Result<String, SessionError> {
        let prompt = compose(
            instruction,
            &self.state.diff.raw_text,
            &self.context,
            &self.state.diff.changed_files,
        );
        debug!(
            "Requesting {} generation ({} chars)",
            instruction.name(),
            prompt.len()
        );

        let result = self.client.complete(&self.state.model, &prompt).await?;
        Ok(result.text)
    }

    fn replace_message(&mut self, message: String, title: &str) {
        self.state.current_message = message;
        display::print_message(title, &self.state.current_message);
    }

    fn commit_current(&self) -> Result<SessionOutcome, SessionError> {
        self.committer.commit(&self.state.current_message)?;
        Ok(SessionOutcome::Committed {
            message: self.state.current_message.clone(),
        })
    }
}
