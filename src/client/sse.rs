//! Server-Sent Events (SSE) handling for streamed task responses.
//!
//! A streamed call returns an HTTP body that is decoded in three layers:
//!
//! 1. [`Utf8Decoder`] turns byte chunks into text, holding back multi-byte
//!    sequences that are split across chunk boundaries;
//! 2. [`SseParser`] accumulates lines into [`SseFrame`]s (a blank line ends a
//!    frame);
//! 3. [`TaskEventStream`] parses each frame's `data` as a JSON-RPC response
//!    and yields its `result` as a [`TaskEvent`].
//!
//! The stream is driven entirely by the consumer: a chunk is only read from
//! the body when the consumer asks for the next event and no complete frame
//! is buffered. Dropping the stream drops the body, which releases the
//! underlying connection.

use std::collections::VecDeque;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use futures::stream::{Stream, StreamExt};

use crate::error::{A2AError, A2AResult};
use crate::types::{JsonRpcError, TaskEvent};

/// A boxed stream of raw body chunks.
pub type ByteStream = Pin<Box<dyn Stream<Item = A2AResult<Bytes>> + Send>>;

// ============================================================================
// UTF-8 decoding
// ============================================================================

/// Incremental UTF-8 decoder.
///
/// Incomplete trailing sequences are carried over to the next chunk; invalid
/// sequences are replaced with U+FFFD rather than failing the stream.
#[derive(Debug, Default)]
pub struct Utf8Decoder {
    pending: Vec<u8>,
}

impl Utf8Decoder {
    /// Create an empty decoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a chunk, returning all text that is complete so far.
    pub fn decode(&mut self, chunk: &[u8]) -> String {
        self.pending.extend_from_slice(chunk);
        let mut out = String::with_capacity(self.pending.len());

        loop {
            match std::str::from_utf8(&self.pending) {
                Ok(text) => {
                    out.push_str(text);
                    self.pending.clear();
                    break;
                }
                Err(e) => {
                    let valid = e.valid_up_to();
                    out.push_str(&String::from_utf8_lossy(&self.pending[..valid]));
                    match e.error_len() {
                        Some(len) => {
                            out.push(char::REPLACEMENT_CHARACTER);
                            self.pending.drain(..valid + len);
                        }
                        None => {
                            // Incomplete sequence at the end; wait for more bytes.
                            self.pending.drain(..valid);
                            break;
                        }
                    }
                }
            }
        }

        out
    }

    /// Flush whatever is left once the body has ended.
    pub fn finish(&mut self) -> String {
        if self.pending.is_empty() {
            return String::new();
        }
        let text = String::from_utf8_lossy(&self.pending).into_owned();
        self.pending.clear();
        text
    }
}

// ============================================================================
// SSE framing
// ============================================================================

/// A dispatched SSE frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseFrame {
    /// The `event:` field of the frame, if any.
    pub event: Option<String>,
    /// The `data:` lines of the frame, joined with `\n`. Never empty.
    pub data: String,
    /// The last `id:` seen on the stream so far.
    pub id: Option<String>,
}

/// Line-oriented SSE parser.
///
/// Lines may end in `\n`, `\r\n` or `\r`, and a line ending may be split
/// across two calls to [`feed`](Self::feed). A single byte order mark at the
/// start of the stream is dropped. Comment lines (leading `:`) are ignored;
/// `retry:` and unknown fields are ignored. Only frames with a non-empty
/// `data` field are emitted.
#[derive(Debug, Default)]
pub struct SseParser {
    started: bool,
    line: String,
    skip_lf: bool,
    event: Option<String>,
    data: String,
    has_data: bool,
    last_id: Option<String>,
}

impl SseParser {
    /// Create an empty parser.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed decoded text, returning every frame completed by it.
    pub fn feed(&mut self, text: &str) -> Vec<SseFrame> {
        let mut frames = Vec::new();
        for ch in text.chars() {
            if !self.started {
                self.started = true;
                if ch == '\u{FEFF}' {
                    continue;
                }
            }
            if self.skip_lf {
                self.skip_lf = false;
                if ch == '\n' {
                    continue;
                }
            }
            match ch {
                '\r' => {
                    self.skip_lf = true;
                    self.end_line(&mut frames);
                }
                '\n' => self.end_line(&mut frames),
                c => self.line.push(c),
            }
        }
        frames
    }

    /// Flush a trailing frame that was not terminated by a blank line.
    pub fn finish(&mut self) -> Option<SseFrame> {
        self.skip_lf = false;
        if !self.line.is_empty() {
            let line = std::mem::take(&mut self.line);
            self.process_line(&line);
        }
        self.dispatch()
    }

    fn end_line(&mut self, frames: &mut Vec<SseFrame>) {
        let line = std::mem::take(&mut self.line);
        if line.is_empty() {
            if let Some(frame) = self.dispatch() {
                frames.push(frame);
            }
        } else {
            self.process_line(&line);
        }
    }

    fn process_line(&mut self, line: &str) {
        if line.starts_with(':') {
            return;
        }

        let (field, value) = match line.find(':') {
            Some(idx) => {
                let value = &line[idx + 1..];
                (&line[..idx], value.strip_prefix(' ').unwrap_or(value))
            }
            None => (line, ""),
        };

        match field {
            "data" => {
                if self.has_data {
                    self.data.push('\n');
                }
                self.data.push_str(value);
                self.has_data = true;
            }
            "event" => self.event = Some(value.to_string()),
            "id" if !value.contains('\0') => self.last_id = Some(value.to_string()),
            _ => {}
        }
    }

    fn dispatch(&mut self) -> Option<SseFrame> {
        let data = std::mem::take(&mut self.data);
        let event = self.event.take();
        self.has_data = false;

        if data.is_empty() {
            return None;
        }
        Some(SseFrame {
            event,
            data,
            id: self.last_id.clone(),
        })
    }
}

// ============================================================================
// Task event stream
// ============================================================================

/// Lifecycle of a [`TaskEventStream`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamState {
    /// The body is open and events may still arrive.
    Streaming,
    /// The body ended normally.
    Closed,
    /// A network or parse error ended the stream.
    Failed,
    /// The consumer canceled the stream before the body ended.
    Canceled,
}

/// A lazy, forward-only stream of [`TaskEvent`]s from one streamed call.
///
/// Ends when the HTTP body ends, which is not necessarily right after a
/// `final` status event; check [`TaskEvent::is_final`] to detect completion.
/// An error is yielded at most once and is always the last item.
///
/// Frames are read as JSON-RPC responses. A `result` becomes an event and
/// frames with neither field are skipped. A frame carrying a non-null
/// `error` is not skipped: it is yielded as [`A2AError::Protocol`] and ends
/// the stream.
///
/// # Example
///
/// ```no_run
/// # async fn example(mut stream: a2a_task_client::client::TaskEventStream) {
/// while let Some(event) = stream.next().await {
///     match event {
///         Ok(event) if event.is_final() => break,
///         Ok(event) => println!("event for task {}", event.task_id()),
///         Err(e) => eprintln!("stream error: {}", e),
///     }
/// }
/// # }
/// ```
pub struct TaskEventStream {
    body: Option<ByteStream>,
    decoder: Utf8Decoder,
    parser: SseParser,
    pending: VecDeque<SseFrame>,
    state: StreamState,
}

impl std::fmt::Debug for TaskEventStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskEventStream")
            .field("state", &self.state)
            .field("pending_frames", &self.pending.len())
            .finish_non_exhaustive()
    }
}

impl TaskEventStream {
    /// Wrap a stream of raw SSE body chunks.
    pub fn from_byte_stream<S>(body: S) -> Self
    where
        S: Stream<Item = A2AResult<Bytes>> + Send + 'static,
    {
        Self {
            body: Some(Box::pin(body)),
            decoder: Utf8Decoder::new(),
            parser: SseParser::new(),
            pending: VecDeque::new(),
            state: StreamState::Streaming,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> StreamState {
        self.state
    }

    /// Get the next event from the stream.
    ///
    /// Returns `None` once the stream has ended, failed or been canceled.
    pub async fn next(&mut self) -> Option<A2AResult<TaskEvent>> {
        StreamExt::next(self).await
    }

    /// Stop consuming and release the HTTP body immediately.
    pub fn cancel(&mut self) {
        if self.state == StreamState::Streaming {
            tracing::debug!("task event stream canceled by consumer");
            self.terminate(StreamState::Canceled);
        }
    }

    fn terminate(&mut self, state: StreamState) {
        self.state = state;
        self.body = None;
        self.pending.clear();
    }

    fn fail(&mut self, err: A2AError) -> Poll<Option<A2AResult<TaskEvent>>> {
        tracing::debug!(error = %err, "task event stream failed");
        self.terminate(StreamState::Failed);
        Poll::Ready(Some(Err(err)))
    }
}

impl Stream for TaskEventStream {
    type Item = A2AResult<TaskEvent>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        loop {
            if matches!(this.state, StreamState::Failed | StreamState::Canceled) {
                return Poll::Ready(None);
            }

            while let Some(frame) = this.pending.pop_front() {
                match decode_frame(&frame) {
                    Ok(Some(event)) => return Poll::Ready(Some(Ok(event))),
                    Ok(None) => continue,
                    Err(e) => return this.fail(e),
                }
            }

            let Some(body) = this.body.as_mut() else {
                // Body exhausted and every buffered frame delivered.
                return Poll::Ready(None);
            };

            match body.as_mut().poll_next(cx) {
                Poll::Pending => return Poll::Pending,
                Poll::Ready(Some(Ok(chunk))) => {
                    let text = this.decoder.decode(&chunk);
                    this.pending.extend(this.parser.feed(&text));
                }
                Poll::Ready(Some(Err(e))) => return this.fail(e),
                Poll::Ready(None) => {
                    let text = this.decoder.finish();
                    this.pending.extend(this.parser.feed(&text));
                    this.pending.extend(this.parser.finish());
                    this.body = None;
                    this.state = StreamState::Closed;
                    tracing::debug!("task event stream closed by server");
                }
            }
        }
    }
}

impl Drop for TaskEventStream {
    fn drop(&mut self) {
        if self.body.is_some() {
            tracing::debug!("task event stream dropped before end, releasing body");
        }
    }
}

/// Interpret one frame as a JSON-RPC response carrying a task event.
///
/// Returns `Ok(None)` for frames that are valid JSON but carry neither a
/// `result` nor an `error` (acknowledgements, heartbeats).
fn decode_frame(frame: &SseFrame) -> A2AResult<Option<TaskEvent>> {
    let value: serde_json::Value = serde_json::from_str(&frame.data).map_err(|e| {
        A2AError::JsonParse(format!(
            "failed to parse SSE event data: {e} (data: {})",
            frame.data
        ))
    })?;

    if let Some(error) = value.get("error").filter(|e| !e.is_null()) {
        let error: JsonRpcError = serde_json::from_value(error.clone()).map_err(|e| {
            A2AError::JsonParse(format!("malformed JSON-RPC error in SSE event: {e}"))
        })?;
        return Err(error.into());
    }

    match value.get("result").filter(|r| !r.is_null()) {
        Some(result) => {
            let event = serde_json::from_value(result.clone()).map_err(|e| {
                A2AError::JsonParse(format!("SSE result is not a task event: {e}"))
            })?;
            Ok(Some(event))
        }
        None => {
            tracing::trace!(event = ?frame.event, "skipping SSE frame without result");
            Ok(None)
        }
    }
}
