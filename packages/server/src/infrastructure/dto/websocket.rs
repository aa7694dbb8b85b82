//! WebSocket frame DTOs.

use serde::{Deserialize, Serialize};

/// Frame sent by a client.
///
/// Any JSON object decodes; absent fields take their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundMessage {
    #[serde(default)]
    pub content: String,
    /// Attachment reference. Accepted but not forwarded or stored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

/// Frame fanned out to room members
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundMessage {
    pub room_id: String,
    pub sender: String,
    pub content: String,
    /// RFC 3339, assigned by the server
    pub time: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inbound_with_content_only() {
        // when:
        let msg: InboundMessage = serde_json::from_str(r#"{"content":"hi"}"#).unwrap();

        // then:
        assert_eq!(msg.content, "hi");
        assert_eq!(msg.file, None);
    }

    #[test]
    fn test_inbound_with_attachment() {
        // when:
        let msg: InboundMessage =
            serde_json::from_str(r#"{"content":"look","file":"img/123.png"}"#).unwrap();

        // then:
        assert_eq!(msg.file.as_deref(), Some("img/123.png"));
    }

    #[test]
    fn test_inbound_empty_object_decodes_to_defaults() {
        let msg: InboundMessage = serde_json::from_str("{}").unwrap();
        assert_eq!(msg, InboundMessage::default());
    }

    #[test]
    fn test_inbound_rejects_non_objects() {
        assert!(serde_json::from_str::<InboundMessage>("hello").is_err());
        assert!(serde_json::from_str::<InboundMessage>(r#""hello""#).is_err());
        assert!(serde_json::from_str::<InboundMessage>(r#"{"content":42}"#).is_err());
    }

    #[test]
    fn test_outbound_field_names() {
        // given:
        let msg = OutboundMessage {
            room_id: "42".to_string(),
            sender: "alice".to_string(),
            content: "hi".to_string(),
            time: "2024-01-01T00:00:00Z".to_string(),
        };

        // when:
        let value = serde_json::to_value(&msg).unwrap();

        // then:
        assert_eq!(
            value,
            serde_json::json!({
                "room_id": "42",
                "sender": "alice",
                "content": "hi",
                "time": "2024-01-01T00:00:00Z"
            })
        );
    }
}
