use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::executor::request::RequestParts;
use crate::executor::response::ResponseRecord;

#[derive(Debug, Clone, thiserror::Error)]
pub enum HttpError {
    #[error("timeout")]
    Timeout,
    #[error("connect/dns/tls error: {0}")]
    Network(String),
    #[error("http error: {0}")]
    Other(String),
}

/// The narrow transport contract the engine depends on. Anything that can
/// turn request parts into a response record qualifies; the engine never
/// touches a network stack directly.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, req: RequestParts) -> Result<ResponseRecord, HttpError>;
}

/// reqwest-backed transport. Redirects stay disabled; following them is a
/// transport concern the engine deliberately does not model.
pub struct ReqwestTransport {
    verifying: reqwest::Client,
    insecure: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, HttpError> {
        let user_agent = concat!("sequor/", env!("CARGO_PKG_VERSION"));
        let verifying = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .user_agent(user_agent)
            .build()
            .map_err(|e| HttpError::Other(e.to_string()))?;
        let insecure = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .user_agent(user_agent)
            .danger_accept_invalid_certs(true)
            .build()
            .map_err(|e| HttpError::Other(e.to_string()))?;
        Ok(Self {
            verifying,
            insecure,
        })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, req: RequestParts) -> Result<ResponseRecord, HttpError> {
        let method: reqwest::Method = req
            .method
            .parse()
            .map_err(|e: <reqwest::Method as std::str::FromStr>::Err| {
                HttpError::Other(e.to_string())
            })?;

        let client = if req.verify {
            &self.verifying
        } else {
            &self.insecure
        };
        let mut rb = client.request(method, req.url).timeout(req.timeout);
        for (k, v) in req.headers {
            rb = rb.header(k, v);
        }
        if let Some(body) = req.body {
            rb = rb.body(body);
        }

        let resp = rb.send().await.map_err(map_reqwest_error)?;
        let status = resp.status().as_u16();

        let mut headers = BTreeMap::new();
        for (k, v) in resp.headers().iter() {
            if let Ok(s) = v.to_str() {
                headers.insert(k.to_string(), s.to_string());
            }
        }

        let body = resp.text().await.map_err(map_reqwest_error)?;

        Ok(ResponseRecord {
            status,
            headers,
            body,
        })
    }
}

fn map_reqwest_error(e: reqwest::Error) -> HttpError {
    if e.is_timeout() {
        return HttpError::Timeout;
    }
    if e.is_connect() || e.is_request() {
        return HttpError::Network(e.to_string());
    }
    HttpError::Other(e.to_string())
}
