//! Background reader task

use crate::buffer::OutputBuffer;
use std::io::Read;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};

/// Bytes requested per blocking read. Event-queue capacity is derived from
/// the buffer floor divided by this, so it must not exceed the floor.
pub(crate) const READ_CHUNK_SIZE: usize = 16 * 1024;

/// Outcome of one read attempt, posted to the event queue after every
/// attempt so waiters can tell "no new data" from silence.
#[derive(Debug)]
pub(crate) enum ReadEvent {
    /// The read completed and any received bytes were appended.
    Data,
    /// The transport reported end-of-stream. Terminal.
    Eof,
    /// The transport failed. Terminal.
    Failed(std::io::Error),
}

/// Spawn the reader loop on the blocking pool.
///
/// Runs once per session for its whole lifetime: read a chunk, append it to
/// the shared buffer under lock, post exactly one event. A terminal event
/// (EOF or error) is posted once and the loop exits for good; resuming a
/// failed transport is the caller's responsibility. The loop also exits
/// when the session side of the queue is gone.
pub(crate) fn spawn_reader(
    mut source: Box<dyn Read + Send>,
    buffer: Arc<Mutex<OutputBuffer>>,
    events: mpsc::Sender<ReadEvent>,
) {
    tokio::task::spawn_blocking(move || {
        let mut chunk = vec![0u8; READ_CHUNK_SIZE];
        loop {
            match source.read(&mut chunk) {
                Ok(0) => {
                    let _ = events.blocking_send(ReadEvent::Eof);
                    return;
                }
                Ok(n) => {
                    buffer.blocking_lock().append(&chunk[..n]);
                    if events.blocking_send(ReadEvent::Data).is_err() {
                        return;
                    }
                }
                Err(e) => {
                    let _ = events.blocking_send(ReadEvent::Failed(e));
                    return;
                }
            }
        }
    });
}
