use crate::error::ClientError;

/// Credentials for one operator session, passed explicitly into every call.
///
/// Tokens are issued and stored elsewhere; this only carries one.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Session {
    token: Option<String>,
}

impl Session {
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self::from_optional(Some(token.into()))
    }

    /// Blank tokens count as no token.
    #[must_use]
    pub fn from_optional(token: Option<String>) -> Self {
        Self {
            token: token
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty()),
        }
    }

    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// # Errors
    ///
    /// Returns [`ClientError::MissingToken`] for an anonymous session.
    pub fn require_token(&self) -> Result<&str, ClientError> {
        self.token().ok_or(ClientError::MissingToken)
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("token", &self.token.as_ref().map(|_| "[redacted]"))
            .finish()
    }
}
