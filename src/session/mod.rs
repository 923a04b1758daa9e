//! Session management and the expectation engine

mod builder;
mod reader;

pub use builder::SessionBuilder;

use crate::buffer::OutputBuffer;
use crate::pattern::{Matcher, RETRIEVE_BODY};
use crate::result::{ExpectError, MatchResult};
use reader::ReadEvent;
use std::io::{Read, Write};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;
use tokio::sync::Mutex;

/// A session over one prompt-delimited command interface.
///
/// A `Session` owns the transport's write sink and read source. A
/// background task drains the read source into a shared buffer for the
/// session's whole lifetime; expect operations consume that buffer one
/// prompt-terminated block at a time. There is no explicit close: drop the
/// session when done, and the background task stops at the next transport
/// event. Once the transport reports end-of-stream or an error, the read
/// path is permanently exhausted.
///
/// Expect operations take `&mut self`: one expectation is in flight at a
/// time, which matches interactive usage (send a command, then wait for
/// its output). Send operations are independent pass-throughs and may
/// interleave freely.
///
/// # Examples
///
/// ```no_run
/// use cliexpect::Session;
///
/// # async fn example(
/// #     writer: Box<dyn std::io::Write + Send>,
/// #     reader: Box<dyn std::io::Read + Send>,
/// # ) -> Result<(), cliexpect::ExpectError> {
/// let mut session = Session::connect(writer, reader)?;
/// session.set_prompt_regex(r"\S+[#>]")?;
///
/// session.send_line("show interfaces").await?;
/// let reply = session.retrieve().await?;
/// println!("{}", reply.groups[0]); // everything before the next prompt
/// # Ok(())
/// # }
/// ```
pub struct Session {
    writer: Arc<Mutex<Box<dyn Write + Send>>>,
    buffer: Arc<Mutex<OutputBuffer>>,
    events: mpsc::Receiver<ReadEvent>,
    prompt: String,
    timeout: Duration,
    retrieve: Matcher,
    /// Transport error outlived by a winning match, held for the next call.
    terminated: Option<std::io::Error>,
}

impl Session {
    /// Create a new session builder.
    pub fn builder() -> SessionBuilder {
        SessionBuilder::new()
    }

    /// Attach to a transport with default parameters.
    ///
    /// Shorthand for `Session::builder().connect(input, output)`. Must be
    /// called within a tokio runtime.
    pub fn connect(
        input: Box<dyn Write + Send>,
        output: Box<dyn Read + Send>,
    ) -> Result<Self, ExpectError> {
        SessionBuilder::new().connect(input, output)
    }

    /// Send raw bytes to the interface.
    ///
    /// A direct pass-through to the write sink, flushed immediately. No
    /// locking relationship with the output buffer: sending and expecting
    /// may interleave.
    pub async fn send_bytes(&self, raw: &[u8]) -> Result<(), ExpectError> {
        let writer = Arc::clone(&self.writer);
        let data = raw.to_vec();

        tokio::task::spawn_blocking(move || {
            let mut writer = writer.blocking_lock();
            writer.write_all(&data)?;
            writer.flush()
        })
        .await
        .map_err(|e| ExpectError::Io(std::io::Error::other(e)))??;

        Ok(())
    }

    /// Send a string to the interface.
    pub async fn send(&self, text: &str) -> Result<(), ExpectError> {
        self.send_bytes(text.as_bytes()).await
    }

    /// Send a string followed by a newline.
    pub async fn send_line(&self, text: &str) -> Result<(), ExpectError> {
        self.send_bytes(format!("{text}\n").as_bytes()).await
    }

    /// Set the prompt to a literal string.
    ///
    /// Regex metacharacters in `literal` are neutralized; the prompt will
    /// match that exact text as a full line. Only matchers constructed
    /// after this call observe the new prompt.
    pub fn set_prompt(&mut self, literal: &str) -> Result<(), ExpectError> {
        self.set_prompt_regex(&regex::escape(literal))
    }

    /// Set the prompt to a regular expression.
    ///
    /// The pattern is validated by recompiling the retrieve matcher. Any
    /// sub-captures it declares are appended to every result's group list.
    /// Only matchers constructed after this call observe the new prompt.
    pub fn set_prompt_regex(&mut self, pattern: &str) -> Result<(), ExpectError> {
        self.retrieve = Matcher::compile(RETRIEVE_BODY, pattern)?;
        self.prompt = pattern.to_string();
        Ok(())
    }

    /// Build a matcher from a body regex and the current prompt.
    ///
    /// The matcher captures the prompt's value now; changing the prompt
    /// later does not update it.
    pub fn regex_matcher(&self, body: &str) -> Result<Matcher, ExpectError> {
        Ok(Matcher::compile(body, &self.prompt)?)
    }

    /// Build a matcher from a literal body and the current prompt.
    ///
    /// The body matches verbatim; the prompt portion stays a live regex.
    pub fn str_matcher(&self, literal: &str) -> Result<Matcher, ExpectError> {
        self.regex_matcher(&regex::escape(literal))
    }

    /// Wait until `matcher` matches the accumulated output, then consume
    /// the matched prefix.
    ///
    /// The engine alternates between inspecting a snapshot of the buffer
    /// and waiting on the read-event queue, under a cumulative timeout
    /// budget. On success the matched prefix is consumed and any text past
    /// the match end is retained for the next call; the result lists the
    /// whole match and every capture group in declaration order.
    ///
    /// A fully-arrived match always wins, even when the stream ended in the
    /// same batch of events. A transport error observed alongside a winning
    /// match is not lost: the next call reports it verbatim.
    ///
    /// # Errors
    ///
    /// - [`ExpectError::NoMatches`] if the stream terminated cleanly
    ///   without the pattern appearing
    /// - [`ExpectError::Timeout`] if the wait budget ran out
    /// - [`ExpectError::Io`] for any transport failure, verbatim
    pub async fn expect(&mut self, matcher: &Matcher) -> Result<MatchResult, ExpectError> {
        let mut spent = Duration::ZERO;
        // Start from any failure a previous call's match outran
        let mut observed: Option<ReadEvent> = self.terminated.take().map(ReadEvent::Failed);

        let (snapshot, found) = loop {
            self.drain_events(&mut observed);
            let snapshot = self.buffer.lock().await.snapshot();

            if let Some(m) = matcher.find(&snapshot) {
                break (snapshot, Some(m));
            }
            if observed.is_some() {
                break (snapshot, None);
            }

            let remaining = self.timeout.saturating_sub(spent);
            if remaining.is_zero() {
                return Err(ExpectError::Timeout {
                    duration: self.timeout,
                });
            }

            // The buffer lock is not held here: this wait is exactly when
            // the background reader needs to append.
            let started = Instant::now();
            match tokio::time::timeout(remaining, self.events.recv()).await {
                Ok(Some(event)) => {
                    spent += started.elapsed();
                    note_event(event, &mut observed);
                }
                Ok(None) => {
                    // Queue closed: the terminal event was consumed by an
                    // earlier call and the read path is exhausted.
                    spent += started.elapsed();
                    observed.get_or_insert(ReadEvent::Eof);
                }
                Err(_) => {
                    return Err(ExpectError::Timeout {
                        duration: self.timeout,
                    });
                }
            }
        };

        let Some(m) = found else {
            return Err(match observed {
                Some(ReadEvent::Failed(e)) => ExpectError::Io(e),
                // Clean end-of-stream without a match is the ordinary
                // "pattern never appeared" outcome.
                _ => ExpectError::NoMatches,
            });
        };

        // The match wins over a failure seen in the same batch, but the
        // failure still has to reach the caller: hold it for the next call.
        if let Some(ReadEvent::Failed(e)) = observed {
            self.terminated = Some(e);
        }

        // Prepare for the next operation: drop the consumed prefix, keep
        // the unconsumed suffix.
        {
            let mut buffer = self.buffer.lock().await;
            buffer.reset();
            if m.end < snapshot.len() {
                buffer.reseed(&snapshot[m.end..]);
            }
        }

        let groups = m.groups(&snapshot);
        Ok(MatchResult {
            matched: groups[0].to_string(),
            groups: groups[1..].iter().map(|g| g.to_string()).collect(),
        })
    }

    /// Return all text up to and including the next prompt.
    ///
    /// Uses the always-installed retrieve matcher (body `.+` plus the
    /// current prompt). On success the result carries at least two groups:
    /// the body text preceding the prompt and the prompt text itself,
    /// followed by any sub-captures the prompt pattern declares.
    pub async fn retrieve(&mut self) -> Result<MatchResult, ExpectError> {
        let matcher = self.retrieve.clone();
        self.expect(&matcher).await
    }

    /// Wait for the next prompt, then match a regex against the retrieved
    /// block.
    ///
    /// Two phases, fail-fast: first `retrieve` resolves the prompt
    /// boundary (its error propagates untouched if the prompt never
    /// arrives); only then is `pattern` compiled and applied to the
    /// already-retrieved block text. Because that text is fixed and fully
    /// arrived, a mismatch reports [`ExpectError::NoMatches`] immediately
    /// instead of waiting out the timeout on data that will never come. A
    /// malformed `pattern` goes unnoticed if the prompt never resolves.
    ///
    /// On success the groups are the user pattern's captures followed by
    /// the prompt text and the prompt's own sub-captures.
    pub async fn expect_regex(&mut self, pattern: &str) -> Result<MatchResult, ExpectError> {
        self.expect_retrieved(pattern).await
    }

    /// Wait for the next prompt, then match a literal string against the
    /// retrieved block.
    ///
    /// Identical to [`expect_regex`](Self::expect_regex) with the literal's
    /// metacharacters neutralized.
    pub async fn expect_str(&mut self, literal: &str) -> Result<MatchResult, ExpectError> {
        self.expect_retrieved(&regex::escape(literal)).await
    }

    /// Second phase of the two-phase operations: once `retrieve` has
    /// consumed a block, compile the combined matcher and apply it there.
    async fn expect_retrieved(&mut self, body: &str) -> Result<MatchResult, ExpectError> {
        let block = self.retrieve().await?;

        let matcher = self.regex_matcher(body)?;
        let m = matcher.find(&block.matched).ok_or(ExpectError::NoMatches)?;
        let groups = m.groups(&block.matched);
        Ok(MatchResult {
            matched: groups[0].to_string(),
            groups: groups[1..].iter().map(|g| g.to_string()).collect(),
        })
    }

    /// Drain queued read events without blocking, recording the most
    /// recent terminal event.
    fn drain_events(&mut self, observed: &mut Option<ReadEvent>) {
        loop {
            match self.events.try_recv() {
                Ok(event) => note_event(event, observed),
                Err(TryRecvError::Empty) => return,
                Err(TryRecvError::Disconnected) => {
                    observed.get_or_insert(ReadEvent::Eof);
                    return;
                }
            }
        }
    }
}

/// Record a terminal event; plain data completions carry no error value.
fn note_event(event: ReadEvent, observed: &mut Option<ReadEvent>) {
    match event {
        ReadEvent::Data => {}
        terminal => *observed = Some(terminal),
    }
}
