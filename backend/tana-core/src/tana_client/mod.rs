use crate::config::TanaConfig;
use crate::error::TanaClientError;
use crate::payload::{AddNodesRequest, Node, TargetLocation};
use crate::reporter::DispatchReporter;

use common::{BearerToken, HttpStatusCode};

use std::fmt::Display;
use std::sync::Arc;

use log::warn;
use reqwest::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde_json::Value;
use url::Url;

const JSON_CONTENT_TYPE: &str = "application/json";

/// What the service sent back for an accepted request.
///
/// The body is kept as text; the service does not promise a schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchResponse {
    pub status: HttpStatusCode,
    pub body: String,
}

impl DispatchResponse {
    /// Best-effort JSON view of the body.
    pub fn json(&self) -> Option<Value> {
        serde_json::from_str(&self.body).ok()
    }

    /// Body for console output: compact JSON when it parses, raw text otherwise.
    pub fn display_body(&self) -> String {
        match self.json() {
            Some(json) => json.to_string(),
            None => self.body.clone(),
        }
    }
}

/// Posts nodes to the Input API.
#[derive(Clone)]
pub struct TanaClient {
    endpoint: Url,
    client: Client,
    token: BearerToken,
    reporter: Arc<dyn DispatchReporter>,
}

impl TanaClient {
    pub fn new(
        config: &TanaConfig,
        reporter: Arc<dyn DispatchReporter>,
    ) -> Result<Self, TanaClientError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| TanaClientError::construction(e.to_string()))?;

        Ok(Self {
            endpoint: config.endpoint.clone(),
            client,
            token: config.token.clone(),
            reporter,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Create `nodes` at `target`.
    ///
    /// The outcome is handed to the reporter before it is returned. Nothing is
    /// retried.
    ///
    /// # Errors
    /// - [`TanaClientError::Rejected`] if the service answers with a non-2xx status
    /// - [`TanaClientError::Transport`] if no response arrives
    /// - [`TanaClientError::Construction`] if the request cannot be built
    pub async fn send_nodes(
        &self,
        nodes: Vec<Node>,
        target: TargetLocation,
    ) -> Result<DispatchResponse, TanaClientError> {
        let request = AddNodesRequest::new(nodes, target);

        self.reporter.on_send(target, &request);

        let result = self.post(&request).await;

        match &result {
            Ok(response) => self.reporter.on_success(target, response),
            Err(e) => self.reporter.on_failure(target, e),
        }

        result
    }

    /// Send the timestamped test node to the default location.
    pub async fn send_test_node(
        &self,
        timestamp: &str,
    ) -> Result<DispatchResponse, TanaClientError> {
        self.send_nodes(vec![Node::test_node(timestamp)], TargetLocation::Default)
            .await
    }

    /// Send the timestamped test node to the INBOX.
    pub async fn send_inbox_node(
        &self,
        timestamp: &str,
    ) -> Result<DispatchResponse, TanaClientError> {
        self.send_nodes(vec![Node::inbox_node(timestamp)], TargetLocation::Inbox)
            .await
    }

    async fn post(&self, request: &AddNodesRequest) -> Result<DispatchResponse, TanaClientError> {
        let body = serde_json::to_vec(request)?;
        let authorization = authorization_value(&self.token)?;
        let description = format!("POST {}", self.endpoint);

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(AUTHORIZATION, authorization)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .body(body)
            .send()
            .await
            .map_err(|e| TanaClientError::from_reqwest(&description, &e))?;

        let status = response.status();

        if !status.is_success() {
            let headers = collect_headers(response.headers());
            return Err(TanaClientError::rejected(
                status.as_u16(),
                rejected_body(response.text().await),
                headers,
            ));
        }

        let body = response
            .text()
            .await
            .map_err(|e| TanaClientError::from_reqwest(&description, &e))?;

        Ok(DispatchResponse {
            status: HttpStatusCode(status.as_u16()),
            body,
        })
    }
}

/// `Authorization: Bearer <token>`, marked sensitive so it stays out of
/// reqwest's debug output.
///
/// Built from bytes: non-ASCII tokens are legal header octets.
fn authorization_value(token: &BearerToken) -> Result<HeaderValue, TanaClientError> {
    let header = token.authorization_header();
    let mut value = HeaderValue::from_bytes(header.as_bytes())
        .map_err(|e| TanaClientError::construction(format!("Invalid Authorization header: {e}")))?;
    value.set_sensitive(true);
    Ok(value)
}

/// Body of a rejected response; a failed read is kept in the body text.
pub(crate) fn rejected_body<E: Display>(read: Result<String, E>) -> String {
    match read {
        Ok(body) => body,
        Err(e) => {
            warn!("Failed to read rejected response body: {e}");
            format!("<body unreadable: {e}>")
        }
    }
}

fn collect_headers(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect()
}
