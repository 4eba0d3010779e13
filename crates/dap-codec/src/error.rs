//! Error types for DAP wire decoding

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A wire string did not match any variant of a closed enumeration
    ///
    /// Covers the `type`/`command`/`event` discriminants as well as every
    /// enum-valued payload field. Strict decode: there is no passthrough
    /// variant, so the whole message must be rejected.
    #[error("Unknown {table} value: {value:?}")]
    UnknownEnumerant { table: &'static str, value: String },

    /// A required field was absent from the wire object
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// A field was present but carried the wrong JSON type
    #[error("Type mismatch in {context}: {detail}")]
    TypeMismatch {
        context: &'static str,
        detail: String,
    },

    /// The input was not a well-formed protocol message at all
    ///
    /// Use for: non-JSON input, non-object payloads, serde failures that do
    /// not fit the more specific variants above.
    #[error("Invalid message format: {0}")]
    InvalidMessage(String),
}

impl Error {
    /// Classifies a serde failure raised while decoding the payload named by
    /// `context` into the taxonomy above.
    ///
    /// serde_json reports all payload-shape problems through one opaque
    /// error type; its message prefixes are the only discriminator
    /// available, so this is the single place that inspects them.
    pub(crate) fn classify(context: &'static str, err: serde_json::Error) -> Self {
        let msg = err.to_string();
        if let Some(rest) = msg.strip_prefix("missing field ") {
            return Error::MissingField(unquote(rest));
        }
        if let Some(rest) = msg.strip_prefix("unknown variant ") {
            return Error::UnknownEnumerant {
                table: context,
                value: unquote(rest),
            };
        }
        if msg.starts_with("invalid type") || msg.starts_with("invalid value") {
            return Error::TypeMismatch {
                context,
                detail: msg,
            };
        }
        Error::InvalidMessage(format!("{context}: {msg}"))
    }
}

/// Extracts the backtick-quoted token serde_json puts at the front of its
/// "missing field"/"unknown variant" messages.
fn unquote(msg: &str) -> String {
    let inner = msg.trim_start_matches('`');
    match inner.find('`') {
        Some(end) => inner[..end].to_string(),
        None => msg.to_string(),
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::InvalidMessage(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Probe {
        #[allow(dead_code)]
        line: i64,
    }

    #[test]
    fn test_error_display() {
        let err = Error::UnknownEnumerant {
            table: "SteppingGranularity",
            value: "word".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Unknown SteppingGranularity value: \"word\""
        );
    }

    #[test]
    fn test_classify_missing_field() {
        let raw = serde_json::json!({});
        let err = serde_json::from_value::<Probe>(raw).unwrap_err();
        let err = Error::classify("Probe", err);
        assert_eq!(err, Error::MissingField("line".to_string()));
    }

    #[test]
    fn test_classify_type_mismatch() {
        let raw = serde_json::json!({ "line": "three" });
        let err = serde_json::from_value::<Probe>(raw).unwrap_err();
        match Error::classify("Probe", err) {
            Error::TypeMismatch { context, .. } => assert_eq!(context, "Probe"),
            other => panic!("Expected TypeMismatch, got {other:?}"),
        }
    }
}
