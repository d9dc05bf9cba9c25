/// Terminal failure of a single exchange, delivered through
/// `ProcessorEvent::Failed` and `StreamHandler::on_error`.
///
/// Malformed frames never show up here; they are skipped while draining.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, serde::Serialize, serde::Deserialize)]
pub enum StreamFailure {
    /// The agent answered with a JSON-RPC `error` envelope.
    #[error("agent error: {message}")]
    Agent { message: String },
    /// The byte source ended before a final status or an artifact arrived.
    #[error("stream completed but no final result received")]
    Incomplete,
    /// Reading from the byte source failed mid-stream.
    #[error("transport failure: {message}")]
    Transport { message: String },
}

impl StreamFailure {
    /// Creates an agent-reported failure.
    pub fn agent(message: impl Into<String>) -> Self {
        Self::Agent {
            message: message.into(),
        }
    }

    /// Creates a transport failure.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }
}

/// Top-level error type for the client API.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    /// Invalid client configuration.
    #[error("config error: {0}")]
    Config(String),
    /// Invalid caller input (for example an empty message).
    #[error("validation error: {0}")]
    Validation(String),
    /// The agent endpoint answered with a non-success HTTP status.
    #[error("agent returned HTTP {status}: {body}")]
    Http { status: u16, body: String },
    /// The request could not be sent or the response could not be read.
    #[error("transport error: {0}")]
    Transport(String),
    /// The exchange started but ended in a terminal failure.
    #[error(transparent)]
    Stream(StreamFailure),
}

impl From<StreamFailure> for ClientError {
    fn from(value: StreamFailure) -> Self {
        ClientError::Stream(value)
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(value: reqwest::Error) -> Self {
        ClientError::Transport(value.to_string())
    }
}
