use std::sync::Arc;

use tokio::time::Instant;
use tracing::{info, warn};
use uuid::Uuid;

use crate::app::ports::{HttpClientPort, HttpRequest};
use crate::config::ApiConfig;
use crate::constants::{HEADER_AUTHORIZATION, HEADER_CONTENT_TYPE, HTTP_METHOD_POST, REQUEST_CONTENT_TYPE};
use crate::domain::Document;
use crate::error::{GatewayError, Result};
use crate::observability::metrics;
use crate::pipeline::encoder::{document_format, encode, EncodedRequest};
use crate::pipeline::rate_gate::RateGate;
use crate::pipeline::response::{interpret, ApiResponse};
use crate::pipeline::validation::{CommissioningRules, DocumentValidator};

/// The single endpoint and credential a use case submits with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiEndpoint {
    pub url: String,
    pub token: String,
}

impl ApiEndpoint {
    pub fn new(url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            token: token.into(),
        }
    }

    pub fn from_config(api: &ApiConfig) -> Self {
        Self::new(api.url.clone(), api.token.clone())
    }

    fn authorization(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

/// Validate, rate-limit, and send commissioning documents
pub struct SubmitUseCase {
    validator: Box<dyn DocumentValidator + Send + Sync>,
    gate: Arc<RateGate>,
    http: Box<dyn HttpClientPort>,
    endpoint: ApiEndpoint,
}

impl SubmitUseCase {
    pub fn new(
        validator: Box<dyn DocumentValidator + Send + Sync>,
        gate: Arc<RateGate>,
        http: Box<dyn HttpClientPort>,
        endpoint: ApiEndpoint,
    ) -> Self {
        Self {
            validator,
            gate,
            http,
            endpoint,
        }
    }

    /// Create a use case with the commissioning rules as validator
    pub fn with_default_validator(gate: Arc<RateGate>, http: Box<dyn HttpClientPort>, endpoint: ApiEndpoint) -> Self {
        Self::new(Box::new(CommissioningRules::new()), gate, http, endpoint)
    }

    /// Shared gate, e.g. to interrupt a caller waiting on it
    pub fn gate(&self) -> &Arc<RateGate> {
        &self.gate
    }

    pub fn endpoint(&self) -> &ApiEndpoint {
        &self.endpoint
    }

    /// Submit one document.
    ///
    /// Validation and format errors are returned before the gate is touched.
    /// Once the gate admits the call it is counted, including when the
    /// transport fails.
    #[tracing::instrument(
        name = "submit",
        skip_all,
        fields(submission_id = %Uuid::new_v4(), doc_id = %document.doc_id, doc_type = %document.doc_type)
    )]
    pub async fn submit(&self, document: &Document, signature: &str) -> Result<ApiResponse> {
        self.validator.validate(document).map_err(reject)?;
        let format = document_format(document).map_err(reject)?;
        let encoded = encode(document, signature, format)?;
        let request = self.build_request(&encoded)?;

        let permit = self.gate.acquire().await.map_err(reject)?;

        let started = Instant::now();
        let outcome = self.http.execute(request).await.map(interpret);
        let elapsed = started.elapsed();
        metrics::submission::request_duration(elapsed.as_secs_f64());

        // Records the attempt and releases the gate
        drop(permit);

        match outcome {
            Ok(response) => {
                match &response {
                    ApiResponse::Success(_) => {
                        info!(format = %format, elapsed_ms = elapsed.as_millis() as u64, "Document accepted by API");
                        metrics::submission::accepted();
                    }
                    ApiResponse::Failure(payload) => {
                        warn!(status = payload.status, "API rejected document");
                        metrics::submission::failed(payload.status);
                    }
                }
                Ok(response)
            }
            Err(reason) => {
                warn!(error = %reason, "HTTP request failed");
                metrics::submission::transport_error();
                Err(GatewayError::Transport(reason))
            }
        }
    }

    fn build_request(&self, encoded: &EncodedRequest) -> Result<HttpRequest> {
        Ok(HttpRequest {
            method: HTTP_METHOD_POST,
            url: self.endpoint.url.clone(),
            headers: vec![
                (HEADER_CONTENT_TYPE.to_string(), REQUEST_CONTENT_TYPE.to_string()),
                (HEADER_AUTHORIZATION.to_string(), self.endpoint.authorization()),
            ],
            body: encoded.to_form_body()?,
        })
    }
}

fn reject(err: GatewayError) -> GatewayError {
    warn!(reason = err.kind(), error = %err, "Submission refused before dispatch");
    metrics::submission::rejected(err.kind());
    err
}
