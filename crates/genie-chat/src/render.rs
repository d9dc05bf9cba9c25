use std::io::{self, Write};

use genie_client::{AgentCard, StreamFailure, StreamHandler};
use tracing::warn;

/// Shown in place of an answer whenever an exchange fails.
pub const GENERIC_FAILURE: &str = "Sorry, the agent could not answer that. Please try again.";

/// Writes progress narration to `err` and the final answer to `out`.
pub struct TerminalHandler<O, E> {
    out: O,
    err: E,
    quiet: bool,
}

impl TerminalHandler<io::Stdout, io::Stderr> {
    pub fn stdio(quiet: bool) -> Self {
        Self::new(io::stdout(), io::stderr(), quiet)
    }
}

impl<O: Write, E: Write> TerminalHandler<O, E> {
    pub fn new(out: O, err: E, quiet: bool) -> Self {
        Self { out, err, quiet }
    }
}

impl<O: Write, E: Write> StreamHandler for TerminalHandler<O, E> {
    fn on_progress(&mut self, text: &str) {
        if self.quiet {
            return;
        }
        let _ = writeln!(self.err, "  ... {text}");
    }

    fn on_complete(&mut self, text: &str) {
        let _ = writeln!(self.out, "{text}");
        let _ = self.out.flush();
    }

    fn on_error(&mut self, error: &StreamFailure) {
        warn!(%error, "agent exchange failed");
        let _ = writeln!(self.err, "{GENERIC_FAILURE}");
    }
}

/// Human-readable summary of an agent card.
pub fn format_card(card: &AgentCard) -> String {
    let mut out = format!("{} v{}\n", card.name, card.version);
    if let Some(description) = card.description.as_deref() {
        out.push_str(description);
        out.push('\n');
    }
    out.push_str(&format!(
        "streaming: {}\n",
        if card.capabilities.streaming { "yes" } else { "no" }
    ));
    for skill in &card.skills {
        out.push_str(&format!("- {} ({})\n", skill.name, skill.id));
        for example in &skill.examples {
            out.push_str(&format!("    e.g. {example}\n"));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use genie_client::AgentSkill;

    fn handler(quiet: bool) -> TerminalHandler<Vec<u8>, Vec<u8>> {
        TerminalHandler::new(Vec::new(), Vec::new(), quiet)
    }

    fn text(buf: &[u8]) -> String {
        String::from_utf8_lossy(buf).into_owned()
    }

    #[test]
    fn progress_goes_to_stderr_and_answer_to_stdout() {
        let mut h = handler(false);
        h.on_progress("Cloning...");
        h.on_complete("Done.");
        assert_eq!(text(&h.out), "Done.\n");
        assert_eq!(text(&h.err), "  ... Cloning...\n");
    }

    #[test]
    fn quiet_hides_progress() {
        let mut h = handler(true);
        h.on_progress("Cloning...");
        assert!(h.err.is_empty());
    }

    #[test]
    fn errors_show_the_generic_failure_message() {
        let mut h = handler(false);
        h.on_error(&StreamFailure::Incomplete);
        assert!(h.out.is_empty());
        assert_eq!(text(&h.err), format!("{GENERIC_FAILURE}\n"));
    }

    #[test]
    fn card_summary_lists_skills_and_examples() {
        let card = AgentCard {
            name: "GitHub Genie".into(),
            version: "1.0.0".into(),
            description: Some("A code analysis agent".into()),
            skills: vec![AgentSkill {
                id: "search_code".into(),
                name: "Search Code Patterns".into(),
                examples: vec!["Find all API endpoints".into()],
                ..AgentSkill::default()
            }],
            ..AgentCard::default()
        };
        let summary = format_card(&card);
        assert!(summary.starts_with("GitHub Genie v1.0.0\nA code analysis agent\n"));
        assert!(summary.contains("streaming: no"));
        assert!(summary.contains("- Search Code Patterns (search_code)\n    e.g. Find all API endpoints"));
    }
}
