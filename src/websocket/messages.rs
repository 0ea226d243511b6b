//! WebSocket Message Types
//!
//! Defines all message types for WebSocket communication between
//! dashboard clients and the Snow Atlas server.

use serde::{Deserialize, Serialize};

use crate::dataset::Flag;
use crate::views::{HoverData, InputEvent, NodeOutput};

/// Messages sent from client to server
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    SetPriceCeiling {
        value: f64,
    },
    SetNightSkiing {
        value: Flag,
    },
    SetSummerSkiing {
        value: Flag,
    },
    SetSnowpark {
        value: Flag,
    },
    SelectContinent {
        value: String,
    },
    /// `null` clears the country
    SelectCountry {
        #[serde(default)]
        value: Option<String>,
    },
    SelectMetric {
        value: String,
    },
    /// Chart hover payload
    Hover {
        payload: HoverData,
    },
    SelectResort {
        value: String,
    },
    /// Re-render every view from the current inputs
    Refresh,
    /// Ping for keepalive
    Ping,
}

impl ClientMessage {
    /// Dashboard event carried by this message, if it changes an input
    pub fn into_event(self) -> Option<InputEvent> {
        let event = match self {
            ClientMessage::SetPriceCeiling { value } => InputEvent::SetPriceCeiling(value),
            ClientMessage::SetNightSkiing { value } => InputEvent::SetNightSkiing(value),
            ClientMessage::SetSummerSkiing { value } => InputEvent::SetSummerSkiing(value),
            ClientMessage::SetSnowpark { value } => InputEvent::SetSnowpark(value),
            ClientMessage::SelectContinent { value } => InputEvent::SelectContinent(value),
            ClientMessage::SelectCountry { value } => InputEvent::SelectCountry(value),
            ClientMessage::SelectMetric { value } => InputEvent::SelectMetric(value),
            ClientMessage::Hover { payload } => InputEvent::Hover(payload),
            ClientMessage::SelectResort { value } => InputEvent::SelectResort(value),
            ClientMessage::Refresh | ClientMessage::Ping => return None,
        };
        Some(event)
    }
}

/// Messages sent from server to client
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Session established
    Connected {
        /// Unique session identifier
        session_id: String,
    },
    /// Re-evaluated view nodes
    Update {
        outputs: Vec<NodeOutput>,
    },
    /// Pong response to ping
    Pong,
    /// Error message
    Error {
        /// Error description
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_message_deserialize_price() {
        let json = r#"{"type": "set_price_ceiling", "value": 75}"#;
        let msg: ClientMessage = serde_json::from_str(json).unwrap();
        assert_eq!(msg.into_event(), Some(InputEvent::SetPriceCeiling(75.0)));
    }

    #[test]
    fn test_client_message_deserialize_flags() {
        let json = r#"{"type": "set_snowpark", "value": "Yes"}"#;
        let msg: ClientMessage = serde_json::from_str(json).unwrap();
        assert_eq!(msg.into_event(), Some(InputEvent::SetSnowpark(Flag::Yes)));

        let json = r#"{"type": "set_snowpark", "value": "Sometimes"}"#;
        assert!(serde_json::from_str::<ClientMessage>(json).is_err());
    }

    #[test]
    fn test_client_message_select_country_null() {
        let json = r#"{"type": "select_country", "value": null}"#;
        let msg: ClientMessage = serde_json::from_str(json).unwrap();
        assert_eq!(msg.into_event(), Some(InputEvent::SelectCountry(None)));

        let json = r#"{"type": "select_country", "value": "Japan"}"#;
        let msg: ClientMessage = serde_json::from_str(json).unwrap();
        assert_eq!(
            msg.into_event(),
            Some(InputEvent::SelectCountry(Some("Japan".to_string())))
        );
    }

    #[test]
    fn test_client_message_hover() {
        let json = r#"{"type": "hover", "payload": {"points": [{"customdata": ["Verbier"]}]}}"#;
        let msg: ClientMessage = serde_json::from_str(json).unwrap();
        assert_eq!(
            msg.into_event(),
            Some(InputEvent::Hover(HoverData::for_resort("Verbier")))
        );
    }

    #[test]
    fn test_client_message_deserialize_ping() {
        let json = r#"{"type": "ping"}"#;
        let msg: ClientMessage = serde_json::from_str(json).unwrap();
        assert!(matches!(msg, ClientMessage::Ping));
        assert!(msg.into_event().is_none());

        let msg: ClientMessage = serde_json::from_str(r#"{"type": "refresh"}"#).unwrap();
        assert!(msg.into_event().is_none());
    }

    #[test]
    fn test_server_message_serialize() {
        let msg = ServerMessage::Connected {
            session_id: "abc".to_string(),
        };
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"type\":\"connected\""));
        assert!(json.contains("\"session_id\":\"abc\""));

        let json = serde_json::to_string(&ServerMessage::Update { outputs: vec![] }).unwrap();
        assert_eq!(json, r#"{"type":"update","outputs":[]}"#);

        let json = serde_json::to_string(&ServerMessage::Pong).unwrap();
        assert_eq!(json, r#"{"type":"pong"}"#);
    }
}
