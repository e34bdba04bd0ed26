use std::collections::BTreeMap;

use async_trait::async_trait;
use sequor_core::parser::{parse_str, DocumentFormat};
use sequor_core::types::AnyValue;
use sequor_core::ParseError;

use crate::executor::http::{HttpError, HttpTransport};
use crate::executor::request::RequestParts;
use crate::executor::response::ResponseRecord;

/// One canned response, matched by method plus url (full url or path).
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ReplayEntry {
    pub method: String,
    pub url: String,
    #[serde(default = "default_status")]
    pub status_code: u16,
    pub body: AnyValue,
}

fn default_status() -> u16 {
    200
}

/// Transport that answers from a canned response file instead of the
/// network, for offline runs and tests. Requests with no matching entry
/// fail the DISPATCH stage like any unreachable host would.
pub struct ReplayTransport {
    entries: Vec<ReplayEntry>,
}

impl ReplayTransport {
    pub fn new(entries: Vec<ReplayEntry>) -> Self {
        Self { entries }
    }

    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let (entries, _format) = parse_str::<Vec<ReplayEntry>>(input, DocumentFormat::Auto)?;
        Ok(Self::new(entries))
    }

    fn find(&self, method: &str, url: &url::Url) -> Option<&ReplayEntry> {
        self.entries.iter().find(|e| {
            e.method.eq_ignore_ascii_case(method)
                && (e.url == url.as_str() || e.url == url.path())
        })
    }
}

#[async_trait]
impl HttpTransport for ReplayTransport {
    async fn send(&self, req: RequestParts) -> Result<ResponseRecord, HttpError> {
        let entry = self.find(&req.method, &req.url).ok_or_else(|| {
            HttpError::Network(format!("no replay entry for {} {}", req.method, req.url))
        })?;

        let body = serde_json::to_string(&entry.body)
            .map_err(|e| HttpError::Other(e.to_string()))?;
        let mut headers = BTreeMap::new();
        headers.insert("content-type".to_string(), "application/json".to_string());

        Ok(ResponseRecord {
            status: entry.status_code,
            headers,
            body,
        })
    }
}
