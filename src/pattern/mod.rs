//! Prompt-aware pattern matching for expect operations
//!
//! Every matcher in this crate is a combination of a body pattern and a
//! prompt pattern, compiled into a single expression of the shape
//! `(body)(^prompt$)`. Three inline flags shape the evaluation:
//!
//! - `s`: `.` matches newlines, so a body can span lines
//! - `m`: `^`/`$` anchor at line boundaries, pinning the prompt to a line
//! - `U`: quantifiers are non-greedy, so the body stops right before the
//!   first line the prompt can claim
//!
//! Matchers are evaluated against a full snapshot of accumulated output,
//! never line by line. A matcher captures the prompt pattern's value at
//! construction time; later prompt changes do not update it.

mod matcher;

pub use matcher::{Match, Matcher};

/// Body pattern used by `retrieve`: one or more characters. A block can
/// never be blank, at minimum it is the newline preceding the prompt.
pub(crate) const RETRIEVE_BODY: &str = ".+";

/// Prompt used until the caller configures one: one or more characters that
/// are not a newline, i.e. any non-empty final line.
pub(crate) const DEFAULT_PROMPT: &str = "[^\n]+";
