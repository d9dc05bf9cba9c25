//! Streaming client for an A2A-style agent.
//!
//! A question is wrapped in a JSON-RPC `message/stream` envelope, POSTed to
//! the agent, and the Server-Sent-Events body is drained by a
//! [`StreamProcessor`] into progress, completion, and failure events.
//!
//! # Usage
//!
//! ```no_run
//! use genie_client::prelude::*;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), ClientError> {
//! let client = GenieClient::new(ClientConfig::new("http://localhost:8000"))?;
//!
//! let mut handler = callbacks(
//!     |progress: &str| eprintln!("... {progress}"),
//!     |answer: &str| println!("{answer}"),
//!     |error: &StreamFailure| eprintln!("failed: {error}"),
//! );
//! client
//!     .ask("Repository: https://github.com/pydantic/pydantic-ai - how do tools work?", &mut handler)
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! The processor itself does no I/O and can be fed any chunk source:
//!
//! ```
//! use genie_client::{ProcessorEvent, StreamProcessor};
//!
//! let mut processor = StreamProcessor::new();
//! let body = br#"data: {"jsonrpc":"2.0","id":"1","result":{"kind":"artifact-update","artifact":{"parts":[{"kind":"text","text":"Done."}]}}}
//! "#;
//! let mut events = Vec::new();
//! for chunk in body.chunks(5) {
//!     events.extend(processor.push_chunk(chunk));
//! }
//! events.extend(processor.finish());
//! assert_eq!(events, vec![ProcessorEvent::Complete("Done.".into())]);
//! ```

/// Agent capability document and its well-known path.
pub mod card;
/// HTTP transport for streaming exchanges.
pub mod client;
/// Client configuration.
pub mod config;
/// Public error types.
pub mod errors;
/// Line framing and SSE line classification.
pub mod framing;
/// Logging bootstrap.
pub mod observability;
/// Common imports for typical usage.
pub mod prelude;
/// Streaming response processor and callback plumbing.
pub mod processor;
/// Decoding of JSON-RPC response envelopes and text extraction.
pub mod protocol;
/// Request envelope construction.
pub mod request;

pub use card::{AGENT_CARD_PATH, AgentCapabilities, AgentCard, AgentSkill};
pub use client::{GenieClient, MessageStream};
pub use config::ClientConfig;
pub use errors::{ClientError, StreamFailure};
pub use framing::{Frame, LineBuffer, classify_line};
pub use observability::init_observability;
pub use processor::{
    Callbacks, ProcessorEvent, StreamHandler, StreamProcessor, callbacks, event_stream,
    process_stream,
};
pub use protocol::{Envelope, NO_RESPONSE_CONTENT, NO_TEXT_RESPONSE, decode_envelope, extract_text};
pub use request::{Message, MessageStreamRequest, Part, Role, build_request};
