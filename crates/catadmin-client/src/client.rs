//! HTTP client for the product catalog REST API.
//!
//! Every response is wrapped in a `{ success, message, data }` envelope. Reads
//! attach the session's bearer token when there is one; create, update and
//! delete refuse to run without it.

use std::time::Duration;

use catadmin_core::{AppConfig, ProductRecord, SubmissionPayload};
use reqwest::{Client, RequestBuilder, Response, Url};
use serde_json::Value;

use crate::error::ClientError;
use crate::multipart;
use crate::session::Session;
use crate::types::{Ack, ApiEnvelope};

const DEFAULT_USER_AGENT: &str = concat!("catadmin/", env!("CARGO_PKG_VERSION"));

/// Client for the product catalog API.
///
/// Use [`CatalogClient::new`] with loaded configuration, or
/// [`CatalogClient::with_base_url`] to point at a mock server in tests.
pub struct CatalogClient {
    client: Client,
    base_url: Url,
}

impl CatalogClient {
    /// Creates a client from application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`ClientError::InvalidBaseUrl`] for an unusable API base URL.
    pub fn new(config: &AppConfig) -> Result<Self, ClientError> {
        Self::build(
            config.request_timeout_secs,
            &config.user_agent,
            &config.api_base_url,
        )
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Same as [`CatalogClient::new`].
    pub fn with_base_url(timeout_secs: u64, base_url: &str) -> Result<Self, ClientError> {
        Self::build(timeout_secs, DEFAULT_USER_AGENT, base_url)
    }

    fn build(timeout_secs: u64, user_agent: &str, base_url: &str) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash so relative paths land beneath the API
        // root instead of replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| ClientError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: "URL cannot carry a path".to_string(),
            });
        }

        Ok(Self {
            client,
            base_url: parsed,
        })
    }

    /// Fetches every product.
    ///
    /// Entries that are not JSON objects are skipped with a warning.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Api`] if the service reports failure.
    /// - [`ClientError::Http`] on network failure.
    /// - [`ClientError::Deserialize`] if `data` is not a list.
    pub async fn list_products(&self, session: &Session) -> Result<Vec<ProductRecord>, ClientError> {
        let context = "GET products";
        let data = self.get_data(session, &["products"], context).await?;
        let rows: Vec<Value> =
            serde_json::from_value(data).map_err(|e| ClientError::Deserialize {
                context: context.to_string(),
                source: e,
            })?;

        let products = rows
            .into_iter()
            .filter_map(|row| match serde_json::from_value::<ProductRecord>(row) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!(error = %e, "skipping malformed product row");
                    None
                }
            })
            .collect::<Vec<_>>();
        tracing::debug!(count = products.len(), "fetched product list");
        Ok(products)
    }

    /// Fetches one product by id.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Api`] if the service reports failure.
    /// - [`ClientError::Http`] on network failure.
    /// - [`ClientError::Deserialize`] if `data` is not a product object.
    pub async fn get_product(&self, session: &Session, id: &str) -> Result<ProductRecord, ClientError> {
        let context = format!("GET products/{id}");
        let data = self.get_data(session, &["products", id], &context).await?;
        serde_json::from_value(data).map_err(|e| ClientError::Deserialize { context, source: e })
    }

    /// Creates a product from a multipart submission.
    ///
    /// # Errors
    ///
    /// - [`ClientError::MissingToken`] before any I/O for an anonymous session.
    /// - [`ClientError::Api`] unless the service answers 2xx with `success: true`.
    pub async fn create_product(
        &self,
        session: &Session,
        payload: &SubmissionPayload,
    ) -> Result<Ack, ClientError> {
        let token = session.require_token()?;
        let form = multipart::to_form(payload)?;
        let url = self.build_url(&["products", "add"]);
        let request = self.client.post(url).bearer_auth(token).multipart(form);
        self.send_mutation(request, "POST products/add").await
    }

    /// Replaces a stored product from a multipart submission.
    ///
    /// # Errors
    ///
    /// Same as [`CatalogClient::create_product`].
    pub async fn update_product(
        &self,
        session: &Session,
        id: &str,
        payload: &SubmissionPayload,
    ) -> Result<Ack, ClientError> {
        let token = session.require_token()?;
        let form = multipart::to_form(payload)?;
        let url = self.build_url(&["products", "edit", id]);
        let request = self.client.put(url).bearer_auth(token).multipart(form);
        self.send_mutation(request, &format!("PUT products/edit/{id}"))
            .await
    }

    /// Deletes a product.
    ///
    /// # Errors
    ///
    /// Same as [`CatalogClient::create_product`].
    pub async fn delete_product(&self, session: &Session, id: &str) -> Result<Ack, ClientError> {
        let token = session.require_token()?;
        let url = self.build_url(&["products", "delete", id]);
        let request = self.client.delete(url).bearer_auth(token);
        self.send_mutation(request, &format!("DELETE products/delete/{id}"))
            .await
    }

    /// Appends percent-encoded path segments to the API root.
    fn build_url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get_data(
        &self,
        session: &Session,
        segments: &[&str],
        context: &str,
    ) -> Result<Value, ClientError> {
        let mut request = self.client.get(self.build_url(segments));
        if let Some(token) = session.token() {
            request = request.bearer_auth(token);
        }
        let response = request.send().await?;
        let mut envelope = read_envelope(response, context).await?;
        if envelope.success == Some(false) {
            return Err(ClientError::Api(envelope.error_message()));
        }
        envelope
            .data
            .ok_or_else(|| ClientError::MissingData(context.to_string()))
    }

    async fn send_mutation(
        &self,
        request: RequestBuilder,
        context: &str,
    ) -> Result<Ack, ClientError> {
        let response = request.send().await?;
        let mut envelope = read_envelope(response, context).await?;
        if envelope.success != Some(true) {
            tracing::info!(context, "catalog rejected mutation");
            return Err(ClientError::Api(envelope.error_message()));
        }
        tracing::info!(context, message = ?envelope.message, "catalog mutation succeeded");
        Ok(Ack {
            message: envelope.message,
        })
    }
}

/// Reads the response envelope, turning a non-2xx status into an error.
///
/// # Errors
///
/// - [`ClientError::Api`] for a non-2xx status with a readable envelope.
/// - [`ClientError::UnexpectedStatus`] for a non-2xx status without one.
/// - [`ClientError::Deserialize`] for a 2xx status with an unreadable body.
async fn read_envelope(
    response: Response,
    context: &str,
) -> Result<ApiEnvelope<Value>, ClientError> {
    let status = response.status();
    let body = response.text().await?;
    match serde_json::from_str::<ApiEnvelope<Value>>(&body) {
        Ok(mut envelope) if !status.is_success() => {
            tracing::debug!(status = status.as_u16(), context, "catalog returned error status");
            Err(ClientError::Api(envelope.error_message()))
        }
        Ok(envelope) => Ok(envelope),
        Err(_) if !status.is_success() => Err(ClientError::UnexpectedStatus {
            status: status.as_u16(),
            context: context.to_string(),
        }),
        Err(e) => Err(ClientError::Deserialize {
            context: context.to_string(),
            source: e,
        }),
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
