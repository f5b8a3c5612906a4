use catadmin_core::SubmissionPayload;
use reqwest::multipart::{Form, Part};

use crate::error::ClientError;

/// Builds the multipart body for a create or update call.
///
/// Text parts go first in payload order, then one file part per pending
/// image, all under the shared image part name.
pub(crate) fn to_form(payload: &SubmissionPayload) -> Result<Form, ClientError> {
    let mut form = Form::new();
    for (name, value) in &payload.fields {
        form = form.text(*name, value.clone());
    }
    for (name, file) in payload.file_parts() {
        let mut part = Part::bytes(file.bytes.clone()).file_name(file.file_name.clone());
        if let Some(content_type) = &file.content_type {
            part = part.mime_str(content_type)?;
        }
        form = form.part(name, part);
    }
    Ok(form)
}
