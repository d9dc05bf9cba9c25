//! Terminal chat client: ask a streaming agent one question, or chat
//! interactively when no question is given.

mod render;

use std::io::Write as _;
use std::time::Duration;

use anyhow::Context as _;
use clap::Parser;
use genie_client::observability::init_observability_with_default;
use genie_client::{ClientConfig, GenieClient};
use tokio::io::{AsyncBufReadExt as _, BufReader};
use tracing::{info, warn};

use crate::render::{TerminalHandler, format_card};

#[derive(Parser, Debug)]
#[command(
    name = "genie-chat",
    version,
    about = "Ask a streaming A2A agent about code repositories"
)]
struct Cli {
    /// Agent base URL (overrides GENIE_AGENT_URL).
    #[arg(long)]
    url: Option<String>,
    /// Request timeout in seconds (overrides GENIE_TIMEOUT_SECS).
    #[arg(long)]
    timeout: Option<u64>,
    /// Print the agent card and exit.
    #[arg(long)]
    card: bool,
    /// Hide progress narration.
    #[arg(long, short)]
    quiet: bool,
    /// Question to ask. Starts an interactive session when omitted.
    message: Vec<String>,
}

impl Cli {
    fn config(&self) -> anyhow::Result<ClientConfig> {
        let mut config = ClientConfig::from_env().context("reading client configuration")?;
        if let Some(url) = &self.url {
            config = config.base_url(url.clone());
        }
        if let Some(secs) = self.timeout {
            config = config.timeout(Duration::from_secs(secs));
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    init_observability_with_default("warn");

    let cli = Cli::parse();
    let client = GenieClient::new(cli.config()?)?;

    if cli.card {
        let card = client
            .fetch_agent_card()
            .await
            .with_context(|| format!("fetching agent card from {}", client.config().base_url))?;
        print!("{}", format_card(&card));
        return Ok(());
    }

    let message = cli.message.join(" ");
    if message.trim().is_empty() {
        return chat(&client, cli.quiet).await;
    }

    let mut handler = TerminalHandler::stdio(cli.quiet);
    client
        .ask(&message, &mut handler)
        .await
        .context("exchange with agent failed")?;
    Ok(())
}

async fn chat(client: &GenieClient, quiet: bool) -> anyhow::Result<()> {
    info!(url = %client.config().base_url, "starting interactive session");
    eprintln!("Connected to {}. Type `exit` to quit.", client.config().base_url);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("you> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let question = line.trim();
        if question.is_empty() {
            continue;
        }
        if matches!(question, "exit" | "quit") {
            break;
        }

        let mut handler = TerminalHandler::stdio(quiet);
        if let Err(err) = client.ask(question, &mut handler).await {
            warn!(error = %err, "exchange failed");
        }
    }
    Ok(())
}
