//! Error types for expect operations

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during session operations.
///
/// # Examples
///
/// ```no_run
/// use cliexpect::{ExpectError, Session};
/// use std::time::Duration;
///
/// # async fn example(
/// #     writer: Box<dyn std::io::Write + Send>,
/// #     reader: Box<dyn std::io::Read + Send>,
/// # ) -> Result<(), Box<dyn std::error::Error>> {
/// let mut session = Session::builder()
///     .timeout(Duration::from_secs(5))
///     .connect(writer, reader)?;
///
/// match session.expect_str("login: ").await {
///     Ok(reply) => println!("Matched: {}", reply.matched),
///     Err(ExpectError::NoMatches) => {
///         eprintln!("Output block arrived but did not contain the text");
///     }
///     Err(ExpectError::Timeout { duration }) => {
///         eprintln!("No prompt within {:?}", duration);
///     }
///     Err(e) => return Err(e.into()),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Error, Debug)]
pub enum ExpectError {
    /// The pattern never appeared in data that has already terminated.
    ///
    /// Returned when the stream ended (or the retrieved block was fully
    /// inspected) without the expected pattern ever matching. This is the
    /// normal outcome for a mismatched expectation, not a transport fault.
    #[error("no matches")]
    NoMatches,

    /// The cumulative wait budget for one call ran out.
    ///
    /// The budget spans all wait iterations of a single `expect` call; it
    /// is never reset mid-call and never reported as anything else.
    #[error("read timed out (after {duration:?})")]
    Timeout {
        /// The configured timeout that was exhausted.
        duration: Duration,
    },

    /// A body or prompt pattern failed to compile.
    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// The transport failed.
    ///
    /// Any read or write error other than plain end-of-stream, surfaced
    /// verbatim on the call that observed it. The engine never retries;
    /// reconnection is the caller's concern.
    #[error("transport error: {0}")]
    Io(#[from] std::io::Error),
}
