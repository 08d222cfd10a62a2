//! ワイヤーレベルのエンベロープ定義
//!
//! クライアントに送信する自己記述的な JSON ユニットです。エンベロープは
//! 配信のたびに生成される一時的なもので、保存されません。

use serde::{Deserialize, Serialize};

/// Reserved wire type. No encoder or decoder in this engine uses it, but
/// the constant is part of the protocol clients are written against.
pub const TYPE_TYPING: &str = "typing";

/// The wire-level envelope union, tagged by a `type` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Envelope {
    /// A chat message (text or image payload)
    Message(MessagePayload),
    /// Presence for one user
    Status { user: String },
    /// Instruction to reset the client's presence list before a fresh
    /// `status` sequence
    Clear,
}

/// Payload of a `message` envelope. Exactly one of `text`/`image` is
/// populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessagePayload {
    /// Whether the receiving connection belongs to the author; computed
    /// per recipient at encode time
    #[serde(rename = "isSender")]
    pub is_sender: bool,
    pub user: String,
    /// Display-formatted creation time, computed at encode time
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Envelope {
    /// Serialize to one wire frame.
    pub fn to_wire(&self) -> String {
        // Serialization of our own DTOs cannot fail.
        serde_json::to_string(self).unwrap()
    }

    /// Parse one wire frame.
    pub fn from_wire(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_envelope_wire_shape() {
        // テスト項目: clear エンベロープの JSON 形式がプロトコルどおりになる
        // given (前提条件):
        let envelope = Envelope::Clear;

        // when (操作):
        let wire = envelope.to_wire();

        // then (期待する結果):
        assert_eq!(wire, r#"{"type":"clear"}"#);
    }

    #[test]
    fn test_status_envelope_wire_shape() {
        // テスト項目: status エンベロープの JSON 形式がプロトコルどおりになる
        // given (前提条件):
        let envelope = Envelope::Status {
            user: "alice".to_string(),
        };

        // when (操作):
        let wire = envelope.to_wire();

        // then (期待する結果):
        assert_eq!(wire, r#"{"type":"status","user":"alice"}"#);
    }

    #[test]
    fn test_text_message_envelope_wire_shape() {
        // テスト項目: テキストメッセージのエンベロープに image キーが含まれない
        // given (前提条件):
        let envelope = Envelope::Message(MessagePayload {
            is_sender: true,
            user: "alice".to_string(),
            date: "09:05 AM".to_string(),
            text: Some("hello".to_string()),
            image: None,
        });

        // when (操作):
        let wire = envelope.to_wire();

        // then (期待する結果):
        assert_eq!(
            wire,
            r#"{"type":"message","isSender":true,"user":"alice","date":"09:05 AM","text":"hello"}"#
        );
    }

    #[test]
    fn test_image_message_envelope_wire_shape() {
        // テスト項目: 画像メッセージのエンベロープに text キーが含まれない
        // given (前提条件):
        let envelope = Envelope::Message(MessagePayload {
            is_sender: false,
            user: "bob".to_string(),
            date: "18/03/19 at 09:29 AM".to_string(),
            text: None,
            image: Some("images/user_18_3_2019_9_29_29_299".to_string()),
        });

        // when (操作):
        let wire = envelope.to_wire();

        // then (期待する結果):
        assert_eq!(
            wire,
            r#"{"type":"message","isSender":false,"user":"bob","date":"18/03/19 at 09:29 AM","image":"images/user_18_3_2019_9_29_29_299"}"#
        );
    }

    #[test]
    fn test_message_envelope_round_trip() {
        // テスト項目: encode → decode で (type, user, date, content) が復元される
        // given (前提条件):
        let envelope = Envelope::Message(MessagePayload {
            is_sender: true,
            user: "alice".to_string(),
            date: "11:45 PM".to_string(),
            text: Some("round trip".to_string()),
            image: None,
        });

        // when (操作):
        let decoded = Envelope::from_wire(&envelope.to_wire()).unwrap();

        // then (期待する結果):
        assert_eq!(decoded, envelope);
    }

    #[test]
    fn test_unknown_type_fails_to_decode() {
        // テスト項目: 未知の type を持つフレームはデコードに失敗する
        // given (前提条件):
        let raw = r#"{"type":"nonsense"}"#;

        // when (操作):
        let result = Envelope::from_wire(raw);

        // then (期待する結果):
        assert!(result.is_err());
    }
}
