/// Well-known path of the agent capability document, relative to the base URL.
pub const AGENT_CARD_PATH: &str = "/.well-known/agent.json";

/// Agent capability document served at [`AGENT_CARD_PATH`].
///
/// Only the fields a chat client displays are modelled; everything else in
/// the document is ignored.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AgentCard {
    pub name: String,
    pub description: Option<String>,
    pub url: String,
    pub version: String,
    pub capabilities: AgentCapabilities,
    pub default_input_modes: Vec<String>,
    pub default_output_modes: Vec<String>,
    pub skills: Vec<AgentSkill>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AgentCapabilities {
    pub streaming: bool,
}

/// One advertised skill.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AgentSkill {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub examples: Vec<String>,
}

impl AgentCard {
    /// Skill names joined for a one-line summary.
    pub fn skill_summary(&self) -> String {
        self.skills
            .iter()
            .map(|s| s.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_card_and_ignores_unknown_fields() {
        let card: AgentCard = serde_json::from_value(serde_json::json!({
            "name": "GitHub Genie",
            "description": "A code analysis agent",
            "url": "http://0.0.0.0:8000/",
            "version": "1.0.0",
            "defaultInputModes": ["text/plain"],
            "defaultOutputModes": ["text/plain"],
            "capabilities": {"streaming": true, "pushNotifications": false},
            "supportsAuthenticatedExtendedCard": false,
            "skills": [
                {"id": "analyze_repository", "name": "Analyze GitHub Repository", "tags": ["github"]},
                {"id": "search_code", "name": "Search Code Patterns", "examples": ["Find all API endpoints"]}
            ]
        }))
        .expect("card");

        assert_eq!(card.name, "GitHub Genie");
        assert!(card.capabilities.streaming);
        assert_eq!(card.default_input_modes, vec!["text/plain"]);
        assert_eq!(card.skills[1].examples, vec!["Find all API endpoints"]);
        assert_eq!(
            card.skill_summary(),
            "Analyze GitHub Repository, Search Code Patterns"
        );
    }

    #[test]
    fn missing_fields_default() {
        let card: AgentCard = serde_json::from_str(r#"{"name":"bare"}"#).expect("card");
        assert!(card.skills.is_empty());
        assert!(!card.capabilities.streaming);
        assert_eq!(card.skill_summary(), "");
    }
}
