use std::collections::BTreeMap;

use sequor_core::types::AnyValue;

/// What the transport hands back: status, headers, raw body text.
///
/// The structured body is decoded on demand; extraction and assertion call
/// [`ResponseRecord::decode_body`] and an undecodable body is an explicit
/// error there, never an implicitly empty document.
#[derive(Debug, Clone)]
pub struct ResponseRecord {
    pub status: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl ResponseRecord {
    pub fn decode_body(&self) -> Result<AnyValue, DecodeError> {
        serde_json::from_str(&self.body).map_err(|e| DecodeError {
            message: e.to_string(),
        })
    }
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("response body is not valid JSON: {message}")]
pub struct DecodeError {
    message: String,
}
