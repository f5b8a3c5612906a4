use catadmin_core::{FormMode, PreviewProvider, ProductForm};

use crate::client::CatalogClient;
use crate::error::ClientError;
use crate::session::Session;
use crate::types::Ack;

impl CatalogClient {
    /// Submits a product form, creating or updating by the form's mode.
    ///
    /// The draft is reset only after the service confirms success. On any
    /// failure it is left exactly as it was so the operator can fix and retry.
    ///
    /// # Errors
    ///
    /// - [`ClientError::MissingToken`] for an anonymous session, before any I/O.
    /// - [`ClientError::Form`] if a required field is empty.
    /// - Any error from [`CatalogClient::create_product`] or
    ///   [`CatalogClient::update_product`].
    pub async fn submit<P: PreviewProvider>(
        &self,
        session: &Session,
        form: &mut ProductForm<P>,
    ) -> Result<Ack, ClientError> {
        session.require_token()?;
        form.check_required()?;

        let payload = form.serialize_for_submission();
        let ack = match form.mode() {
            FormMode::Create => self.create_product(session, &payload).await?,
            FormMode::Edit { id } => self.update_product(session, id, &payload).await?,
        };

        if let Err(e) = form.reset_draft() {
            tracing::warn!(error = %e, "draft reset after submission left previews unreleased");
        }
        Ok(ack)
    }
}
