//! Telegram Bot API payloads
//!
//! Only the fields the bot reads are modelled; serde skips the rest.

use crate::transport::{ChatId, TransportError};
use serde::{Deserialize, Serialize};

/// Envelope around every Bot API response
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    pub description: Option<String>,
    pub error_code: Option<i64>,
}

impl<T> ApiResponse<T> {
    pub fn into_result(self) -> Result<T, TransportError> {
        if !self.ok {
            return Err(TransportError::Api {
                code: self.error_code,
                description: self
                    .description
                    .unwrap_or_else(|| "no description".to_string()),
            });
        }
        self.result
            .ok_or_else(|| TransportError::InvalidResponse("ok response without result".to_string()))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub is_bot: bool,
    pub first_name: String,
    pub username: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: ChatId,
    #[serde(rename = "type")]
    pub kind: String,
    pub title: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub chat: Chat,
    pub from: Option<User>,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
}

#[derive(Debug, Serialize)]
pub struct GetUpdatesParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    pub timeout: u64,
    pub allowed_updates: &'static [&'static str],
}

#[derive(Debug, Serialize)]
pub struct SendMessageParams<'a> {
    pub chat_id: ChatId,
    pub text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<&'static str>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_update_with_text() {
        let json = r#"{
            "update_id": 1001,
            "message": {
                "message_id": 7,
                "date": 1700000000,
                "chat": {"id": -100200, "type": "supergroup", "title": "Coordinación"},
                "from": {"id": 5, "is_bot": false, "first_name": "Ana"},
                "text": "/asistencia 1 5"
            }
        }"#;
        let update: Update = serde_json::from_str(json).unwrap();
        let message = update.message.unwrap();
        assert_eq!(update.update_id, 1001);
        assert_eq!(message.chat.id, ChatId(-100200));
        assert_eq!(message.chat.kind, "supergroup");
        assert_eq!(message.text.as_deref(), Some("/asistencia 1 5"));
    }

    #[test]
    fn test_parse_update_without_message() {
        let update: Update =
            serde_json::from_str(r#"{"update_id": 3, "edited_message": {}}"#).unwrap();
        assert!(update.message.is_none());
    }

    #[test]
    fn test_error_envelope() {
        let response: ApiResponse<User> = serde_json::from_str(
            r#"{"ok": false, "error_code": 401, "description": "Unauthorized"}"#,
        )
        .unwrap();
        match response.into_result() {
            Err(TransportError::Api { code, description }) => {
                assert_eq!(code, Some(401));
                assert_eq!(description, "Unauthorized");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_send_message_params_skip_plain_parse_mode() {
        let params = SendMessageParams {
            chat_id: ChatId(9),
            text: "hola",
            parse_mode: None,
        };
        assert_eq!(
            serde_json::to_string(&params).unwrap(),
            r#"{"chat_id":9,"text":"hola"}"#
        );
    }
}
