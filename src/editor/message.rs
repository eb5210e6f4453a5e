use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Who authored a transcript entry. The bot's memory format knows exactly
/// these three; anything else in a stored transcript is a data error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One entry of a conversation transcript, in the bot's stored wire shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    /// Assigned on creation (server- or client-side); opaque afterwards.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>, timestamp: Option<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp,
        }
    }
}

/// Current UTC time in the `YYYY-MM-DD HH:MM:SS` format the bot stores.
pub fn now_stamp() -> String {
    chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// The seed transcript for a newly created conversation, stamped with the
/// current time.
pub fn default_template() -> Vec<ChatMessage> {
    let stamp = now_stamp();
    vec![
        ChatMessage::new(Role::System, "You are ZUZU Bot.", Some(stamp.clone())),
        ChatMessage::new(Role::User, "Hello!", Some(stamp.clone())),
        ChatMessage::new(Role::Assistant, "Hi there! How can I help?", Some(stamp)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::System).unwrap(), "\"system\"");
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
        assert_eq!(
            serde_json::to_string(&Role::Assistant).unwrap(),
            "\"assistant\""
        );
    }

    #[test]
    fn unknown_role_is_rejected() {
        let raw = r#"{"role": "moderator", "content": "hi"}"#;
        assert!(serde_json::from_str::<ChatMessage>(raw).is_err());
    }

    #[test]
    fn missing_timestamp_deserializes_to_none() {
        let raw = r#"{"role": "user", "content": "hi"}"#;
        let msg: ChatMessage = serde_json::from_str(raw).unwrap();
        assert_eq!(msg.timestamp, None);
        // And it round-trips without inventing a timestamp field.
        assert_eq!(serde_json::to_string(&msg).unwrap(), raw.replace(": ", ":"));
    }

    #[test]
    fn template_has_one_message_per_role() {
        let template = default_template();
        assert_eq!(template.len(), 3);
        assert_eq!(template[0].role, Role::System);
        assert_eq!(template[1].role, Role::User);
        assert_eq!(template[2].role, Role::Assistant);
        assert!(template.iter().all(|m| m.timestamp.is_some()));
    }
}
