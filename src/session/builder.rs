//! Session builder for configuration

use crate::buffer::OutputBuffer;
use crate::pattern::{Matcher, DEFAULT_PROMPT, RETRIEVE_BODY};
use crate::result::ExpectError;
use crate::session::reader::{spawn_reader, READ_CHUNK_SIZE};
use crate::session::Session;
use std::io::{Read, Write};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Mutex};

/// Default timeout for expect operations
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Minimum buffer capacity; smaller requested sizes are raised to this
const MIN_BUFFER_SIZE: usize = 16 * 1024;

/// Builder for configuring and attaching sessions.
///
/// All parameters are optional and default to: timeout 10 seconds, buffer
/// size 16 KiB, prompt `[^\n]+` (one or more non-newline characters, i.e.
/// any non-empty final line).
///
/// # Examples
///
/// ```no_run
/// use cliexpect::Session;
/// use std::time::Duration;
///
/// # fn example(
/// #     writer: Box<dyn std::io::Write + Send>,
/// #     reader: Box<dyn std::io::Read + Send>,
/// # ) -> Result<(), cliexpect::ExpectError> {
/// let session = Session::builder()
///     .timeout(Duration::from_secs(60))
///     .buffer_size(64 * 1024)
///     .prompt(r"\S+[#>]")
///     .connect(writer, reader)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SessionBuilder {
    timeout: Duration,
    buffer_size: usize,
    prompt: String,
}

impl Default for SessionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionBuilder {
    /// Create a builder with default configuration.
    pub fn new() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            buffer_size: MIN_BUFFER_SIZE,
            prompt: DEFAULT_PROMPT.to_string(),
        }
    }

    /// Set the cumulative wait budget for each expect operation.
    ///
    /// The budget covers all wait iterations of a single call; time spent
    /// matching is not charged against it.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the buffer capacity floor in bytes.
    ///
    /// Values below 16 KiB are raised to 16 KiB. The floor also sizes the
    /// read-event queue (floor divided by the per-read chunk size), so the
    /// background reader can post several notifications ahead of a slow
    /// consumer without blocking.
    pub fn buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }

    /// Set the initial prompt pattern as a regular expression.
    ///
    /// The prompt describes the line that ends one block of output. It is
    /// validated when `connect` compiles the retrieve matcher.
    pub fn prompt(mut self, pattern: &str) -> Self {
        self.prompt = pattern.to_string();
        self
    }

    /// Attach to a transport and start the background reader.
    ///
    /// `input` is the write sink commands are sent to; `output` is the read
    /// source drained by the background task. Must be called within a tokio
    /// runtime.
    ///
    /// # Errors
    ///
    /// Returns `ExpectError::Pattern` if the prompt pattern does not
    /// compile.
    pub fn connect(
        self,
        input: Box<dyn Write + Send>,
        output: Box<dyn Read + Send>,
    ) -> Result<Session, ExpectError> {
        let buffer_size = self.buffer_size.max(MIN_BUFFER_SIZE);
        let timeout = if self.timeout.is_zero() {
            DEFAULT_TIMEOUT
        } else {
            self.timeout
        };

        let retrieve = Matcher::compile(RETRIEVE_BODY, &self.prompt)?;

        let buffer = Arc::new(Mutex::new(OutputBuffer::new(buffer_size)));
        // Sized for the expected number of chunks it takes to fill the buffer
        let (tx, rx) = mpsc::channel(buffer_size / READ_CHUNK_SIZE);
        spawn_reader(output, Arc::clone(&buffer), tx);

        Ok(Session {
            writer: Arc::new(Mutex::new(input)),
            buffer,
            events: rx,
            prompt: self.prompt,
            timeout,
            retrieve,
            terminated: None,
        })
    }
}
