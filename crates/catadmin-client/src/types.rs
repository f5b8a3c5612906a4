use serde::Deserialize;

/// Envelope wrapping every catalog API response.
///
/// ```json
/// { "success": true, "message": "Product added", "data": { ... } }
/// ```
#[derive(Debug, Deserialize)]
pub(crate) struct ApiEnvelope<T> {
    pub success: Option<bool>,
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    pub fn error_message(&mut self) -> String {
        self.message
            .take()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| "API error".to_string())
    }
}

/// Acknowledgement of a successful create, update, or delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ack {
    pub message: Option<String>,
}
