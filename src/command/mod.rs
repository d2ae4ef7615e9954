//! Line-oriented command layer
//!
//! Text line → `Command` (parser) → `CommandRouter` → `Outcome` (text or JSON).
//! Every failure is reported as an `Outcome::Failed` and processing moves on
//! to the next line.

pub mod outcome;
pub mod parser;
pub mod router;

pub use outcome::{Failure, FailureKind, Outcome};
pub use parser::{Command, CommandKind};
pub use router::CommandRouter;
