//! Commands accepted by the refinement loop and where they are read from.

use std::io::{BufRead, IsTerminal, Write};

use dialoguer::Input;

/// A parsed line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    /// `y`, `yes` or an empty line.
    Accept,
    /// `n` or `no`.
    Cancel,
    /// `g`: regenerate with more detail.
    Detailed,
    /// `r`: regenerate from scratch.
    Retry,
    /// `s`: shorten the current message.
    Summarize,
    /// `p`: regenerate with free-text feedback.
    Feedback,
    /// Anything else, normalized.
    Invalid(String),
}

impl SessionCommand {
    /// Parse a raw line: trimmed, lower-cased, empty means accept.
    pub fn parse(raw: &str) -> Self {
        let normalized = raw.trim().to_lowercase();
        match normalized.as_str() {
            "" | "y" | "yes" => SessionCommand::Accept,
            "n" | "no" => SessionCommand::Cancel,
            "g" => SessionCommand::Detailed,
            "r" => SessionCommand::Retry,
            "s" => SessionCommand::Summarize,
            "p" => SessionCommand::Feedback,
            _ => SessionCommand::Invalid(normalized),
        }
    }
}

/// Where the refinement loop reads user input from.
pub trait InputSource {
    /// Read one raw command line.
    fn read_command(&mut self) -> std::io::Result<String>;

    /// Read one line of free-text feedback.
    fn read_feedback(&mut self) -> std::io::Result<String>;
}

/// Reads from the terminal with dialoguer, or line by line when stdin is piped.
#[derive(Debug, Default)]
pub struct TerminalInput;

impl TerminalInput {
    fn read_line(&self, prompt: &str) -> std::io::Result<String> {
        if std::io::stdin().is_terminal() {
            return Input::<String>::new()
                .with_prompt(prompt)
                .allow_empty(true)
                .interact_text()
                .map_err(|e| std::io::Error::other(e.to_string()));
        }

        print!("{prompt} ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        let read = std::io::stdin().lock().read_line(&mut line)?;
        if read == 0 {
            return Err(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "standard input closed",
            ));
        }
        Ok(line)
    }
}

impl InputSource for TerminalInput {
    fn read_command(&mut self) -> std::io::Result<String> {
        self.read_line(&super::display::yellow(
            "Create commit with this message? [y/n/g/r/s/p]",
        ))
    }

    fn read_feedback(&mut self) -> std::io::Result<String> {
        self.read_line(">")
            .map(|feedback| feedback.trim().to_string())
    }
}
