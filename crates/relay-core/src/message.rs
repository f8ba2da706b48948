//! Wire format for queue entries.
//!
//! Each entry is a JSON object with two keys:
//! - `PAYLOAD`: arbitrary value, re-serialized and forwarded verbatim
//! - `CHANNEL`: string, appended as a path segment to the publish URL

use crate::error::DecodeError;

/// A validated, publishable message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedMessage {
    /// Payload re-serialized to a JSON string, forwarded verbatim.
    pub payload: String,

    /// Publish destination.
    pub channel: String,
}

impl DecodedMessage {
    /// Decode a raw queue entry.
    ///
    /// A message is processable only if the raw string parses as a JSON
    /// object and both `PAYLOAD` and `CHANNEL` keys are present (with
    /// `CHANNEL` a string). Anything else is permanently malformed.
    ///
    /// Presence is about the key, not the value: an explicit
    /// `"PAYLOAD": null` is well-formed and forwards the string `null`.
    pub fn decode(raw: &str) -> Result<Self, DecodeError> {
        let value: serde_json::Value = serde_json::from_str(raw)?;
        let object = value.as_object().ok_or(DecodeError::NotAnObject)?;

        let payload = object.get("PAYLOAD").ok_or(DecodeError::MissingPayload)?;
        let channel = match object.get("CHANNEL") {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(_) => return Err(DecodeError::ChannelNotString),
            None => return Err(DecodeError::MissingChannel),
        };

        Ok(Self {
            payload: payload.to_string(),
            channel,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_well_formed_message() {
        let msg = DecodedMessage::decode(r#"{"PAYLOAD":{"a":1},"CHANNEL":"orders"}"#).unwrap();
        assert_eq!(msg.payload, r#"{"a":1}"#);
        assert_eq!(msg.channel, "orders");
    }

    #[test]
    fn payload_is_forwarded_verbatim() {
        // A string payload stays a JSON string, quotes included.
        let msg = DecodedMessage::decode(r#"{"PAYLOAD":"hello","CHANNEL":"c"}"#).unwrap();
        assert_eq!(msg.payload, r#""hello""#);

        let msg = DecodedMessage::decode(r#"{"PAYLOAD":[1,2,3],"CHANNEL":"c"}"#).unwrap();
        assert_eq!(msg.payload, "[1,2,3]");
    }

    #[test]
    fn explicit_null_payload_is_forwarded() {
        // The key is present, so the message is well-formed; the payload is
        // the serialized value, here the string "null".
        let msg = DecodedMessage::decode(r#"{"PAYLOAD":null,"CHANNEL":"orders"}"#).unwrap();
        assert_eq!(msg.payload, "null");
        assert_eq!(msg.channel, "orders");
    }

    #[test]
    fn extra_keys_are_ignored() {
        let msg =
            DecodedMessage::decode(r#"{"PAYLOAD":1,"CHANNEL":"c","TRACE_ID":"abc"}"#).unwrap();
        assert_eq!(msg.payload, "1");
    }

    #[test]
    fn missing_payload_is_malformed() {
        let err = DecodedMessage::decode(r#"{"CHANNEL":"orders"}"#).unwrap_err();
        assert!(matches!(err, DecodeError::MissingPayload));
    }

    #[test]
    fn missing_channel_is_malformed() {
        let err = DecodedMessage::decode(r#"{"PAYLOAD":{"a":1}}"#).unwrap_err();
        assert!(matches!(err, DecodeError::MissingChannel));
    }

    #[test]
    fn non_string_channel_is_malformed() {
        let err = DecodedMessage::decode(r#"{"PAYLOAD":1,"CHANNEL":42}"#).unwrap_err();
        assert!(matches!(err, DecodeError::ChannelNotString));

        let err = DecodedMessage::decode(r#"{"PAYLOAD":1,"CHANNEL":null}"#).unwrap_err();
        assert!(matches!(err, DecodeError::ChannelNotString));
    }

    #[test]
    fn non_object_entry_is_malformed() {
        let err = DecodedMessage::decode("[1,2,3]").unwrap_err();
        assert!(matches!(err, DecodeError::NotAnObject));
    }

    #[test]
    fn invalid_json_is_malformed() {
        let err = DecodedMessage::decode("not json at all").unwrap_err();
        assert!(matches!(err, DecodeError::Json(_)));
    }
}
