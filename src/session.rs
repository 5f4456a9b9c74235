// Per-session assistant state and chat transcripts

use crate::briefs;
use crate::client::{ClientError, RelayClient};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Model,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: TurnRole,
    pub text: String,
    pub at: DateTime<Utc>,
}

/// One assistant's conversation history.
///
/// Unbounded on purpose: the transcript lives only as long as the session and
/// is dropped wholesale on reset, so there is no cap or eviction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatTranscript {
    turns: Vec<ChatTurn>,
}

impl ChatTranscript {
    pub fn push_user(&mut self, text: impl Into<String>) {
        self.turns.push(ChatTurn {
            role: TurnRole::User,
            text: text.into(),
            at: Utc::now(),
        });
    }

    pub fn push_model(&mut self, text: impl Into<String>) {
        self.turns.push(ChatTurn {
            role: TurnRole::Model,
            text: text.into(),
            at: Utc::now(),
        });
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn reset(&mut self) {
        self.turns.clear();
    }
}

/// State behind one assistant pane: the latest analysis plus its chat.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssistantPane {
    pub analysis: Option<Value>,
    pub chat: ChatTranscript,
}

impl AssistantPane {
    /// A new analysis starts a fresh conversation.
    pub fn set_analysis(&mut self, analysis: Value) {
        self.analysis = Some(analysis);
        self.chat.reset();
    }
}

/// All per-session assistant state, passed explicitly to callers instead of
/// living in ambient globals.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionState {
    pub lighting: AssistantPane,
    pub editing: AssistantPane,
}

impl SessionState {
    /// Ask a follow-up about the current lighting setup. The user turn is
    /// recorded before the call, so a failed request still shows in the
    /// transcript.
    pub async fn lighting_chat(
        &mut self,
        client: &RelayClient,
        question: &str,
    ) -> Result<String, ClientError> {
        self.lighting.chat.push_user(question);

        let context = self
            .lighting
            .analysis
            .as_ref()
            .and_then(|a| a.get("lighting_style_identification"))
            .and_then(|v| v.as_str())
            .map(|style| format!("Current Setup: {}", style));

        let prompt = briefs::lighting_chat_prompt(question, context.as_deref());
        let reply = client.generate(&prompt).await?;
        self.lighting.chat.push_model(&reply);
        Ok(reply)
    }

    pub async fn editing_chat(
        &mut self,
        client: &RelayClient,
        question: &str,
    ) -> Result<String, ClientError> {
        self.editing.chat.push_user(question);

        let prompt = briefs::editing_chat_prompt(question);
        let reply = client.generate(&prompt).await?;
        self.editing.chat.push_model(&reply);
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_transcript_records_turns_in_order() {
        let mut transcript = ChatTranscript::default();
        transcript.push_user("how do I soften shadows?");
        transcript.push_model("Move the key light closer.");

        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript.turns()[0].role, TurnRole::User);
        assert_eq!(transcript.turns()[1].role, TurnRole::Model);
        assert_eq!(transcript.turns()[1].text, "Move the key light closer.");
    }

    #[test]
    fn test_transcript_is_unbounded() {
        let mut transcript = ChatTranscript::default();
        for i in 0..500 {
            transcript.push_user(format!("question {}", i));
        }
        assert_eq!(transcript.len(), 500);
    }

    #[test]
    fn test_reset_clears_turns() {
        let mut transcript = ChatTranscript::default();
        transcript.push_user("hello");
        transcript.reset();
        assert!(transcript.is_empty());
    }

    #[test]
    fn test_new_analysis_resets_chat() {
        let mut pane = AssistantPane::default();
        pane.chat.push_user("old question");
        pane.set_analysis(json!({ "lighting_style_identification": "Butterfly" }));

        assert!(pane.chat.is_empty());
        assert_eq!(
            pane.analysis.as_ref().unwrap()["lighting_style_identification"],
            "Butterfly"
        );
    }
}
