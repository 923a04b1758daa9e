//! cliexpect: Expect-style matching for prompt-delimited command interfaces
//!
//! cliexpect automates line-based interactive programs whose output is
//! delimited by a recognizable prompt: device consoles, remote shells,
//! serial terminals. A session attaches to any pair of blocking
//! `Read`/`Write` objects, drains the read side continuously in the
//! background, and lets the caller block (with a timeout budget) until a
//! configured pattern appears in the accumulated output.
//!
//! # Features
//!
//! - **Transport-agnostic**: works with anything implementing
//!   `std::io::Read` + `std::io::Write` (PTY, SSH channel, serial port)
//! - **Async/await**: built on tokio; blocking transport I/O runs on the
//!   blocking thread pool
//! - **Prompt-aware matching**: every matcher combines a body pattern with
//!   the session's prompt regex, so each call consumes exactly one block of
//!   output up to the next prompt
//! - **Fail-fast expectations**: `expect_regex`/`expect_str` resolve the
//!   prompt boundary first, then test the user pattern against text that
//!   has fully arrived, so a mismatch reports immediately instead of
//!   waiting out the timeout
//! - **Leftover carry-over**: output past a match is retained for the next
//!   call, byte for byte
//!
//! # Quick Start
//!
//! ```
//! use cliexpect::Session;
//! use std::io::Cursor;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), cliexpect::ExpectError> {
//!     // Console output ending in a `router#`-style prompt
//!     let output = Cursor::new(b"test\nrouter#".to_vec());
//!
//!     let mut session = Session::builder()
//!         .prompt(r"[^\n]+#")
//!         .connect(Box::new(Vec::<u8>::new()), Box::new(output))?;
//!
//!     let reply = session.retrieve().await?;
//!     assert_eq!(reply.matched, "test\nrouter#");
//!     assert_eq!(reply.groups, vec!["test\n", "router#"]);
//!     Ok(())
//! }
//! ```
//!
//! # Driving a command interface
//!
//! The usual rhythm is send-then-expect: write a command, then consume the
//! response up to the next prompt.
//!
//! ```no_run
//! use cliexpect::Session;
//! use std::time::Duration;
//!
//! # async fn example(
//! #     writer: Box<dyn std::io::Write + Send>,
//! #     reader: Box<dyn std::io::Read + Send>,
//! # ) -> Result<(), cliexpect::ExpectError> {
//! let mut session = Session::builder()
//!     .timeout(Duration::from_secs(30))
//!     .connect(writer, reader)?;
//!
//! // Learn the exact prompt from the banner, then pin it
//! let banner = session.retrieve().await?;
//! session.set_prompt(&banner.groups[1])?;
//!
//! session.send_line("show version").await?;
//! let reply = session.expect_regex(r".*Version.*").await?;
//! println!("{}", reply.matched);
//! # Ok(())
//! # }
//! ```
//!
//! # Matching model
//!
//! A [`Matcher`] is a compiled expression of the shape `(body)(^prompt$)`,
//! evaluated with `.` matching newlines, `^`/`$` anchoring at line
//! boundaries, and non-greedy quantifiers, so the body stops right before
//! the next prompt line. The prompt pattern is captured at matcher construction
//! time: changing the prompt afterwards does not affect matchers already
//! built.
//!
//! Successful results list the whole match first, then every capture group
//! in declaration order; the prompt's own sub-captures come last.

#![warn(missing_docs)]

mod buffer;
mod pattern;
mod result;
mod session;

// Public API exports
pub use pattern::{Match, Matcher};
pub use result::{ExpectError, MatchResult};
pub use session::{Session, SessionBuilder};
