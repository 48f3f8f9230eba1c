// Abacus Engine — Invoice PDF Upload
//
// One-shot multipart POST of a picked file to the backend's attachment
// endpoint. The MIME precondition is enforced before any network I/O:
// anything other than `application/pdf` is rejected with the page's error
// string and no request leaves the machine.

use log::{info, warn};
use reqwest::multipart;
use serde_json::Value;

use crate::atoms::constants::{ERR_NOT_PDF, ERR_UPLOAD_FAILED, PDF_MIME};
use crate::atoms::error::{ClientError, ClientResult};

/// Client-side precondition: the file's MIME type must be exactly
/// `application/pdf`.
pub fn validate_mime(mime: &str) -> ClientResult<()> {
    if mime != PDF_MIME {
        return Err(ClientError::Upload(ERR_NOT_PDF.into()));
    }
    Ok(())
}

/// Upload one PDF. Success returns the backend's arbitrary JSON object
/// (the page renders it as a one-row table). A non-success status surfaces
/// the response's `detail` string; a network or decode failure surfaces
/// the generic upload error. No retry, no timeout.
pub async fn attach(
    client: &reqwest::Client,
    endpoint: &str,
    file_name: &str,
    mime: &str,
    data: Vec<u8>,
) -> ClientResult<Value> {
    validate_mime(mime)?;

    let part = multipart::Part::bytes(data)
        .file_name(file_name.to_string())
        .mime_str(PDF_MIME)?;
    let form = multipart::Form::new().part("file", part);

    let response = match client.post(endpoint).multipart(form).send().await {
        Ok(r) => r,
        Err(e) => {
            warn!("[invoice] upload to {} failed: {}", endpoint, e);
            return Err(ClientError::Upload(ERR_UPLOAD_FAILED.into()));
        }
    };

    let status = response.status();
    let body: Value = match response.json().await {
        Ok(v) => v,
        Err(e) => {
            warn!("[invoice] unreadable response body: {}", e);
            return Err(ClientError::Upload(ERR_UPLOAD_FAILED.into()));
        }
    };

    if !status.is_success() {
        let detail = body
            .get("detail")
            .and_then(Value::as_str)
            .unwrap_or(ERR_UPLOAD_FAILED);
        return Err(ClientError::Upload(detail.to_string()));
    }

    info!("[invoice] attached {} ({})", file_name, status);
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_pdf_mime_passes() {
        assert!(validate_mime("application/pdf").is_ok());
        for mime in ["application/x-pdf", "text/plain", "image/png", ""] {
            let err = validate_mime(mime).unwrap_err();
            assert_eq!(err.to_string(), "Only PDF files are allowed.");
        }
    }

    #[tokio::test]
    async fn non_pdf_upload_never_reaches_the_network() {
        // An unresolvable endpoint: if the precondition leaked past
        // validation this would fail with a network error instead.
        let client = reqwest::Client::new();
        let err = attach(&client, "http://invalid.invalid", "notes.txt", "text/plain", vec![1])
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Only PDF files are allowed.");
    }
}
