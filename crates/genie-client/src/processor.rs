//! Streaming response processor.
//!
//! [`StreamProcessor`] is a pure state object: feed it raw body chunks and it
//! returns [`ProcessorEvent`]s. [`event_stream`] and [`process_stream`] bind it
//! to any async byte source.

use std::collections::VecDeque;
use std::fmt;
use std::pin::Pin;

use futures::{Stream, StreamExt as _, stream};
use serde_json::Value;
use tracing::{debug, warn};

use crate::errors::StreamFailure;
use crate::framing::{Frame, LineBuffer, classify_line};
use crate::protocol::{Envelope, NO_RESPONSE_CONTENT, decode_envelope, extract_text};

/// Events produced while draining one exchange.
#[derive(Clone, Debug, PartialEq)]
pub enum ProcessorEvent {
    /// Non-terminal narration of agent activity.
    Progress(String),
    /// Terminal success with the answer text.
    Complete(String),
    /// Terminal failure.
    Failed(StreamFailure),
}

impl ProcessorEvent {
    /// Returns `true` for `Complete` and `Failed`.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ProcessorEvent::Complete(_) | ProcessorEvent::Failed(_))
    }
}

/// Per-exchange decoding state.
///
/// Once a terminal event has been returned every further call is a no-op, so
/// a terminal event is always the last one.
#[derive(Default, Debug)]
pub struct StreamProcessor {
    lines: LineBuffer,
    final_received: bool,
    terminated: bool,
    latest_text: Option<String>,
    request_id: Option<String>,
}

impl StreamProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a processor that logs envelopes whose `id` does not echo
    /// `request_id`. Mismatches are not rejected.
    pub fn for_request(request_id: impl Into<String>) -> Self {
        Self {
            request_id: Some(request_id.into()),
            ..Self::default()
        }
    }

    /// Whether a final status update or an artifact has been seen.
    pub fn final_received(&self) -> bool {
        self.final_received
    }

    /// Whether a terminal event has already been returned.
    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    /// Feeds one chunk of the response body.
    pub fn push_chunk(&mut self, chunk: &[u8]) -> Vec<ProcessorEvent> {
        let mut events = Vec::new();
        if self.terminated {
            return events;
        }
        for line in self.lines.push(chunk) {
            self.process_line(&line, &mut events);
            if self.terminated {
                break;
            }
        }
        events
    }

    /// Signals end of stream and returns the closing events.
    ///
    /// An unterminated trailing line is processed first. Without a final
    /// status or artifact the exchange fails with
    /// [`StreamFailure::Incomplete`]; with only a final status it completes
    /// with the latest narration.
    pub fn finish(&mut self) -> Vec<ProcessorEvent> {
        let mut events = Vec::new();
        if self.terminated {
            return events;
        }
        if let Some(rest) = self.lines.finish() {
            self.process_line(&rest, &mut events);
            if self.terminated {
                return events;
            }
        }

        self.terminated = true;
        if self.final_received {
            let text = self
                .latest_text
                .take()
                .unwrap_or_else(|| NO_RESPONSE_CONTENT.to_string());
            events.push(ProcessorEvent::Complete(text));
        } else {
            warn!("stream ended without a final status or artifact");
            events.push(ProcessorEvent::Failed(StreamFailure::Incomplete));
        }
        events
    }

    /// Terminates the exchange because the byte source faulted.
    pub fn fail(&mut self, failure: StreamFailure) -> Option<ProcessorEvent> {
        if self.terminated {
            return None;
        }
        self.terminated = true;
        Some(ProcessorEvent::Failed(failure))
    }

    fn process_line(&mut self, line: &str, events: &mut Vec<ProcessorEvent>) {
        match classify_line(line) {
            Frame::Blank | Frame::Comment => {}
            Frame::Event(name) => debug!(event = name, "stream event line"),
            Frame::Unrecognized => {
                warn!(line = line.trim(), "ignoring unrecognized stream line")
            }
            Frame::Data(payload) => match serde_json::from_str::<Value>(payload) {
                Ok(value) => self.handle_value(&value, events),
                Err(e) => warn!(error = %e, "skipping malformed data frame"),
            },
        }
    }

    fn handle_value(&mut self, value: &Value, events: &mut Vec<ProcessorEvent>) {
        if let Some(expected) = self.request_id.as_deref() {
            let id = value.get("id").and_then(Value::as_str);
            if id != Some(expected) {
                debug!(expected, received = ?id, "response id does not echo request id");
            }
        }

        match decode_envelope(value) {
            Envelope::Error { message } => {
                self.terminated = true;
                events.push(ProcessorEvent::Failed(StreamFailure::Agent { message }));
            }
            Envelope::StatusUpdate { parts, is_final } => {
                if let Some(parts) = parts {
                    let text = extract_text(Some(&parts));
                    self.latest_text = Some(text.clone());
                    events.push(ProcessorEvent::Progress(text));
                }
                if is_final {
                    self.final_received = true;
                }
            }
            Envelope::ArtifactUpdate { parts } => {
                self.final_received = true;
                if let Some(parts) = parts {
                    self.terminated = true;
                    events.push(ProcessorEvent::Complete(extract_text(Some(&parts))));
                }
            }
            Envelope::Other { kind } => debug!(kind = ?kind, "ignoring result kind"),
        }
    }
}

/// Consumer of processor events, one callback per event kind.
///
/// Callbacks run on the draining task; blocking inside one stalls the drain.
pub trait StreamHandler {
    fn on_progress(&mut self, text: &str);
    fn on_complete(&mut self, text: &str);
    fn on_error(&mut self, error: &StreamFailure);
}

/// [`StreamHandler`] built from three closures.
pub struct Callbacks<P, C, E> {
    on_progress: P,
    on_complete: C,
    on_error: E,
}

/// Bundles three closures into a [`StreamHandler`].
pub fn callbacks<P, C, E>(on_progress: P, on_complete: C, on_error: E) -> Callbacks<P, C, E>
where
    P: FnMut(&str),
    C: FnMut(&str),
    E: FnMut(&StreamFailure),
{
    Callbacks {
        on_progress,
        on_complete,
        on_error,
    }
}

impl<P, C, E> StreamHandler for Callbacks<P, C, E>
where
    P: FnMut(&str),
    C: FnMut(&str),
    E: FnMut(&StreamFailure),
{
    fn on_progress(&mut self, text: &str) {
        (self.on_progress)(text)
    }

    fn on_complete(&mut self, text: &str) {
        (self.on_complete)(text)
    }

    fn on_error(&mut self, error: &StreamFailure) {
        (self.on_error)(error)
    }
}

/// Turns a byte source into a stream of [`ProcessorEvent`]s that ends right
/// after the terminal event.
///
/// The source is dropped as soon as the terminal event is yielded, so nothing
/// after an agent error or an artifact is read. A read error becomes
/// [`StreamFailure::Transport`].
pub fn event_stream<S, B, E>(
    source: S,
    processor: StreamProcessor,
) -> impl Stream<Item = ProcessorEvent>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
    E: fmt::Display,
{
    struct State<S> {
        source: Option<Pin<Box<S>>>,
        processor: StreamProcessor,
        pending: VecDeque<ProcessorEvent>,
    }

    stream::unfold(
        State {
            source: Some(Box::pin(source)),
            processor,
            pending: VecDeque::new(),
        },
        |mut state| async move {
            loop {
                if let Some(event) = state.pending.pop_front() {
                    if event.is_terminal() {
                        state.source = None;
                        state.pending.clear();
                        debug!("released response byte source");
                    }
                    return Some((event, state));
                }

                let Some(source) = state.source.as_mut() else {
                    return None;
                };
                let events = match source.next().await {
                    Some(Ok(chunk)) => state.processor.push_chunk(chunk.as_ref()),
                    Some(Err(e)) => state
                        .processor
                        .fail(StreamFailure::transport(e.to_string()))
                        .into_iter()
                        .collect(),
                    None => state.processor.finish(),
                };
                state.pending.extend(events);
            }
        },
    )
}

/// Drains `source`, invoking exactly one of `on_complete`/`on_error` last.
///
/// Returns the same terminal outcome the handler saw. The source is owned by
/// the drain and released on every exit path.
pub async fn process_stream<S, B, E, H>(
    source: S,
    handler: &mut H,
) -> Result<String, StreamFailure>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
    E: fmt::Display,
    H: StreamHandler + ?Sized,
{
    deliver(event_stream(source, StreamProcessor::new()), handler).await
}

/// Forwards processor events to `handler` until the terminal one.
pub(crate) async fn deliver<S, H>(events: S, handler: &mut H) -> Result<String, StreamFailure>
where
    S: Stream<Item = ProcessorEvent>,
    H: StreamHandler + ?Sized,
{
    let mut events = std::pin::pin!(events);
    while let Some(event) = events.next().await {
        match event {
            ProcessorEvent::Progress(text) => handler.on_progress(&text),
            ProcessorEvent::Complete(text) => {
                handler.on_complete(&text);
                return Ok(text);
            }
            ProcessorEvent::Failed(failure) => {
                handler.on_error(&failure);
                return Err(failure);
            }
        }
    }
    // Only reachable for event streams that were already drained.
    let failure = StreamFailure::Incomplete;
    handler.on_error(&failure);
    Err(failure)
}
