//! Result types for expect operations

mod error;

pub use error::ExpectError;

/// Output of a successful expect operation.
///
/// `matched` is the entire matched text; `groups` holds every capture group
/// in declaration order. For `retrieve` (and the combined matchers built by
/// the session factories) the leading groups are always the body text and
/// the prompt text, followed by any sub-captures the prompt pattern itself
/// declares.
///
/// # Examples
///
/// ```
/// use cliexpect::Session;
/// use std::io::Cursor;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), cliexpect::ExpectError> {
/// let output = Cursor::new(b"uptime 3 days\nhost> ".to_vec());
/// let mut session = Session::builder()
///     .prompt(r"\w+> ")
///     .connect(Box::new(Vec::<u8>::new()), Box::new(output))?;
///
/// let reply = session.retrieve().await?;
/// assert_eq!(reply.groups[0], "uptime 3 days\n"); // body
/// assert_eq!(reply.groups[1], "host> ");          // prompt
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    /// The whole matched text.
    pub matched: String,

    /// Capture groups in declaration order.
    ///
    /// An optional group that did not participate in the match yields an
    /// empty string.
    pub groups: Vec<String>,
}
