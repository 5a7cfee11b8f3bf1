//! Commit message generation from staged changes.

pub mod message;

pub use message::{COMMIT_MESSAGE_HEADER, generate_commit_message, spinner_label};
