use crate::error::Rejection;
use crate::limits::{MAX_ALG_LENGTH, MAX_KID_LENGTH};
use miniserde::Deserialize;
use miniserde::json::{Object, Value};

/// JOSE header fields read during verification
///
/// Any other header members are ignored.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TokenHeader {
    /// Algorithm used for signing
    #[serde(rename = "alg")]
    pub algorithm: String,

    /// Key ID, handed to a key provider
    #[serde(rename = "kid")]
    pub key_id: Option<String>,

    /// Media type, informational only and never enforced
    #[serde(rename = "typ")]
    pub token_type: Option<Value>,
}

impl TokenHeader {
    pub(crate) fn parse(json: &str) -> Result<Self, Rejection> {
        let header: TokenHeader = miniserde::json::from_str(json).map_err(|e| {
            if miniserde::json::from_str::<Object>(json).is_ok() {
                Rejection::HeaderInvalid("'alg' must be a string and 'kid' a string when present")
            } else {
                Rejection::SegmentJson {
                    segment: "header",
                    reason: e.to_string(),
                }
            }
        })?;

        // Validate header field sizes to prevent DoS
        validate_field_size("alg", &header.algorithm, MAX_ALG_LENGTH)?;
        if let Some(kid) = &header.key_id {
            validate_field_size("kid", kid, MAX_KID_LENGTH)?;
        }

        Ok(header)
    }

    /// `typ` when it is a JSON string
    pub(crate) fn token_type(&self) -> Option<&str> {
        match &self.token_type {
            Some(Value::String(typ)) => Some(typ),
            _ => None,
        }
    }
}

fn validate_field_size(field: &'static str, value: &str, max: usize) -> Result<(), Rejection> {
    if value.len() > max {
        return Err(Rejection::HeaderFieldTooLong {
            field,
            length: value.len(),
            max,
        });
    }
    Ok(())
}
