//! Commit message generation and the interactive refinement loop.

pub mod command;
pub mod context;
pub mod display;
pub mod prompt;
pub mod session;

pub use command::{InputSource, SessionCommand, TerminalInput};
pub use context::{ProjectContext, describe};
pub use prompt::{Instruction, compose};
pub use session::{RefinementSession, SessionOptions, SessionOutcome, SessionState, run};
