//! Git operations via the system `git` binary.

pub mod staged;

pub use staged::{check_inside_work_tree, staged_diff};
