use serde_json::Value;

/// Returned by [`extract_text`] when the parts value is absent or not a list.
pub const NO_RESPONSE_CONTENT: &str = "No response content";
/// Returned by [`extract_text`] when the list holds no text parts.
pub const NO_TEXT_RESPONSE: &str = "No text response";

const STATUS_UPDATE_KIND: &str = "status-update";
const ARTIFACT_UPDATE_KIND: &str = "artifact-update";
const UNKNOWN_AGENT_ERROR: &str = "agent reported an error without a message";

/// Classified content of one decoded `data:` frame.
#[derive(Clone, Debug, PartialEq)]
pub enum Envelope {
    /// JSON-RPC `error` member. Terminal for the exchange.
    Error { message: String },
    /// Progress narration. `parts` is the raw `status.message.parts` value
    /// when the agent sent one.
    StatusUpdate { parts: Option<Value>, is_final: bool },
    /// Finished answer. `parts` is the raw `artifact.parts` value.
    ArtifactUpdate { parts: Option<Value> },
    /// A `result` of any other kind, or a response with neither member.
    Other { kind: Option<String> },
}

impl Envelope {
    /// Returns `true` for a JSON-RPC `error` envelope.
    pub fn is_error(&self) -> bool {
        matches!(self, Envelope::Error { .. })
    }
}

/// Classifies a decoded JSON-RPC response. `error` wins over `result`.
pub fn decode_envelope(value: &Value) -> Envelope {
    if let Some(error) = value.get("error").filter(|e| !e.is_null()) {
        let message = error
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or(UNKNOWN_AGENT_ERROR);
        return Envelope::Error {
            message: message.to_string(),
        };
    }

    let Some(result) = value.get("result") else {
        return Envelope::Other { kind: None };
    };
    let kind = result.get("kind").and_then(Value::as_str);
    match kind {
        Some(STATUS_UPDATE_KIND) => Envelope::StatusUpdate {
            parts: present(
                result
                    .get("status")
                    .and_then(|s| s.get("message"))
                    .and_then(|m| m.get("parts")),
            ),
            is_final: result.get("final").and_then(Value::as_bool) == Some(true),
        },
        Some(ARTIFACT_UPDATE_KIND) => Envelope::ArtifactUpdate {
            parts: present(result.get("artifact").and_then(|a| a.get("parts"))),
        },
        other => Envelope::Other {
            kind: other.map(ToOwned::to_owned),
        },
    }
}

fn present(value: Option<&Value>) -> Option<Value> {
    value.filter(|v| !v.is_null()).cloned()
}

/// Joins the `text` of every `kind == "text"` part with single spaces.
///
/// Absent or non-list input yields [`NO_RESPONSE_CONTENT`]; a list without
/// usable text parts yields [`NO_TEXT_RESPONSE`].
pub fn extract_text(parts: Option<&Value>) -> String {
    let Some(items) = parts.and_then(Value::as_array) else {
        return NO_RESPONSE_CONTENT.to_string();
    };
    let texts: Vec<&str> = items
        .iter()
        .filter(|part| part.get("kind").and_then(Value::as_str) == Some("text"))
        .filter_map(|part| part.get("text").and_then(Value::as_str))
        .collect();
    if texts.is_empty() {
        return NO_TEXT_RESPONSE.to_string();
    }
    texts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extract_text_joins_text_parts_with_spaces() {
        let parts = json!([{"kind":"text","text":"a"},{"kind":"text","text":"b"}]);
        assert_eq!(extract_text(Some(&parts)), "a b");
    }

    #[test]
    fn extract_text_sentinels_are_distinct() {
        assert_eq!(extract_text(Some(&json!([]))), NO_TEXT_RESPONSE);
        assert_eq!(extract_text(None), NO_RESPONSE_CONTENT);
        assert_eq!(extract_text(Some(&json!("not a list"))), NO_RESPONSE_CONTENT);
        assert_ne!(NO_TEXT_RESPONSE, NO_RESPONSE_CONTENT);
    }

    #[test]
    fn extract_text_skips_non_text_and_malformed_parts() {
        let parts = json!([
            {"kind":"data","data":{"a":1}},
            {"kind":"text","text":"kept"},
            42,
            {"kind":"text"},
            {"kind":"text","text":7},
            {"kind":"text","text":"also kept"}
        ]);
        assert_eq!(extract_text(Some(&parts)), "kept also kept");

        let only_files = json!([{"kind":"file","file":{"uri":"x"}}]);
        assert_eq!(extract_text(Some(&only_files)), NO_TEXT_RESPONSE);
    }

    #[test]
    fn decodes_status_update_with_final_flag() {
        let value = json!({
            "jsonrpc":"2.0","id":"1",
            "result":{
                "kind":"status-update",
                "status":{"state":"working","message":{"parts":[{"kind":"text","text":"Cloning..."}]}},
                "final":false
            }
        });
        let envelope = decode_envelope(&value);
        assert_eq!(
            envelope,
            Envelope::StatusUpdate {
                parts: Some(json!([{"kind":"text","text":"Cloning..."}])),
                is_final: false,
            }
        );

        let completed = json!({
            "jsonrpc":"2.0","id":"1",
            "result":{"kind":"status-update","status":{"state":"completed"},"final":true}
        });
        assert_eq!(
            decode_envelope(&completed),
            Envelope::StatusUpdate {
                parts: None,
                is_final: true
            }
        );
    }

    #[test]
    fn non_boolean_final_is_not_final() {
        let value = json!({"result":{"kind":"status-update","final":"true"}});
        assert!(matches!(
            decode_envelope(&value),
            Envelope::StatusUpdate {
                is_final: false,
                ..
            }
        ));
    }

    #[test]
    fn decodes_artifact_update() {
        let value = json!({
            "jsonrpc":"2.0","id":"1",
            "result":{"kind":"artifact-update","artifact":{"name":"analysis","parts":[{"kind":"text","text":"Done."}]}}
        });
        assert_eq!(
            decode_envelope(&value),
            Envelope::ArtifactUpdate {
                parts: Some(json!([{"kind":"text","text":"Done."}]))
            }
        );
    }

    #[test]
    fn error_takes_precedence_and_defaults_its_message() {
        let value = json!({"jsonrpc":"2.0","id":"1","error":{"message":"boom"},"result":{"kind":"artifact-update"}});
        assert_eq!(
            decode_envelope(&value),
            Envelope::Error {
                message: "boom".into()
            }
        );

        let bare = json!({"jsonrpc":"2.0","id":"1","error":{"code":-32603}});
        assert!(decode_envelope(&bare).is_error());
    }

    #[test]
    fn unknown_kinds_are_classified_as_other() {
        let task = json!({"jsonrpc":"2.0","id":"1","result":{"kind":"task","id":"t"}});
        assert_eq!(
            decode_envelope(&task),
            Envelope::Other {
                kind: Some("task".into())
            }
        );
        assert_eq!(
            decode_envelope(&json!({"jsonrpc":"2.0"})),
            Envelope::Other { kind: None }
        );
    }
}
