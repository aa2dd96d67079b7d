use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use tracing::debug;

use crate::app::ports::{HttpClientPort, HttpRequest, HttpResponse};
use crate::error::{GatewayError, Result};

/// [`HttpClientPort`] backed by a shared `reqwest` client
pub struct ReqwestHttp {
    client: reqwest::Client,
}

impl ReqwestHttp {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::Config(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

fn header_map(headers: &[(String, String)]) -> std::result::Result<HeaderMap, String> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| e.to_string())?;
        let value = HeaderValue::from_str(value).map_err(|e| e.to_string())?;
        map.append(name, value);
    }
    Ok(map)
}

#[async_trait]
impl HttpClientPort for ReqwestHttp {
    async fn execute(&self, request: HttpRequest) -> std::result::Result<HttpResponse, String> {
        let method = Method::from_bytes(request.method.as_bytes()).map_err(|e| e.to_string())?;
        let headers = header_map(&request.headers)?;

        let resp = self
            .client
            .request(method, &request.url)
            .headers(headers)
            .body(request.body)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = resp.status().as_u16();
        // Reading the body consumes the response, so the connection is returned either way
        let text = resp.text().await.map_err(|e| e.to_string())?;
        debug!(status, body_bytes = text.len(), "Received API response");

        let body = if text.is_empty() { None } else { Some(text) };
        Ok(HttpResponse { status, body })
    }
}
