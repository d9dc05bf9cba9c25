/// JSON-RPC method used for streaming message exchanges.
pub const MESSAGE_STREAM_METHOD: &str = "message/stream";

const JSONRPC_VERSION: &str = "2.0";

/// Sender role of a message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Message authored by the end user.
    User,
    /// Message authored by the remote agent.
    Agent,
}

/// One content part of a message.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
#[non_exhaustive]
pub enum Part {
    /// Plain text content.
    Text { text: String },
}

/// User message embedded in a request envelope.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Unique per message, independent of the request id.
    pub message_id: String,
    pub role: Role,
    pub parts: Vec<Part>,
    /// Always `"message"`.
    pub kind: String,
}

impl Message {
    /// Creates a user message with a single text part and a fresh message id.
    pub fn user_text(text: impl Into<String>) -> Self {
        Self {
            message_id: new_id(),
            role: Role::User,
            parts: vec![Part::Text { text: text.into() }],
            kind: "message".to_string(),
        }
    }
}

/// `params` object of a `message/stream` call.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MessageSendParams {
    pub message: Message,
}

/// Request envelope for one exchange. Created per send and discarded after
/// the HTTP request is written.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MessageStreamRequest {
    pub jsonrpc: String,
    /// Correlation id echoed back in every response envelope.
    pub id: String,
    pub method: String,
    pub params: MessageSendParams,
}

impl MessageStreamRequest {
    /// Builds an envelope around a plain text message.
    ///
    /// Both the correlation id and the message id are generated fresh on
    /// every call. Emptiness is not checked here.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id: new_id(),
            method: MESSAGE_STREAM_METHOD.to_string(),
            params: MessageSendParams {
                message: Message::user_text(text),
            },
        }
    }
}

/// Shorthand for [`MessageStreamRequest::new`].
pub fn build_request(text: impl Into<String>) -> MessageStreamRequest {
    MessageStreamRequest::new(text)
}

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
