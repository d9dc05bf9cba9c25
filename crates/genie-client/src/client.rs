use std::pin::Pin;

use futures::Stream;
use reqwest::header::{ACCEPT, HeaderValue};
use tracing::{debug, info};

use crate::card::AgentCard;
use crate::config::ClientConfig;
use crate::errors::{ClientError, StreamFailure};
use crate::processor::{
    ProcessorEvent, StreamHandler, StreamProcessor, callbacks, deliver, event_stream,
};
use crate::request::MessageStreamRequest;

/// Stream of events for one exchange; ends right after the terminal event.
pub type MessageStream = Pin<Box<dyn Stream<Item = ProcessorEvent> + Send + 'static>>;

/// HTTP client for a single streaming agent endpoint.
///
/// Every call is an independent exchange with its own request envelope and
/// processor state.
#[derive(Clone, Debug)]
pub struct GenieClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl GenieClient {
    /// Creates a client from explicit configuration.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        config.validate()?;
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ClientError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { http, config })
    }

    /// Creates a client from `GENIE_AGENT_URL` / `GENIE_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::new(ClientConfig::from_env()?)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Fetches the agent capability document from the well-known path.
    pub async fn fetch_agent_card(&self) -> Result<AgentCard, ClientError> {
        let url = self.config.agent_card_url();
        debug!(%url, "fetching agent card");
        let response = self.http.get(&url).send().await?;
        let response = ensure_success(response).await?;
        let card: AgentCard = response
            .json()
            .await
            .map_err(|e| ClientError::Transport(format!("invalid agent card: {e}")))?;
        info!(name = %card.name, version = %card.version, "resolved agent card");
        Ok(card)
    }

    /// Sends `text` as a new exchange and returns its event stream.
    ///
    /// Blank messages are rejected before anything is sent.
    pub async fn send_message(&self, text: &str) -> Result<MessageStream, ClientError> {
        if text.trim().is_empty() {
            return Err(ClientError::Validation("message must not be empty".into()));
        }

        let request = MessageStreamRequest::new(text);
        let url = self.config.rpc_url();
        info!(
            request_id = %request.id,
            message_id = %request.params.message.message_id,
            %url,
            "sending message to agent"
        );

        let response = self
            .http
            .post(&url)
            .header(ACCEPT, HeaderValue::from_static("text/event-stream"))
            .json(&request)
            .send()
            .await?;
        let response = ensure_success(response).await?;

        let processor = StreamProcessor::for_request(request.id);
        Ok(Box::pin(event_stream(response.bytes_stream(), processor)))
    }

    /// Sends `text` and drives `handler` until the exchange ends.
    pub async fn ask<H>(&self, text: &str, handler: &mut H) -> Result<String, ClientError>
    where
        H: StreamHandler + ?Sized,
    {
        let events = self.send_message(text).await?;
        let answer = deliver(events, handler).await?;
        Ok(answer)
    }

    /// Sends `text` and returns only the final answer.
    pub async fn ask_text(&self, text: &str) -> Result<String, ClientError> {
        let mut handler = callbacks(
            |progress: &str| debug!(progress, "agent progress"),
            |_: &str| {},
            |_: &StreamFailure| {},
        );
        self.ask(text, &mut handler).await
    }
}

async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "<unreadable body>".to_string());
    Err(ClientError::Http {
        status: status.as_u16(),
        body,
    })
}
