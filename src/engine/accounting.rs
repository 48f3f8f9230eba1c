// Abacus Engine — Predictive Accounting Request
//
// One-shot JSON POST of `{title, date}`. The backend's response is handed
// back verbatim for the page to pretty-print; any failure along the way
// degrades to the error-shaped object the page renders the same way.

use chrono::NaiveDate;
use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::atoms::constants::ERR_SUBMISSION_FAILED;
use crate::atoms::error::{ClientError, ClientResult};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PredictionRequest {
    pub title: String,
    pub date: String,
}

pub fn validate(request: &PredictionRequest) -> ClientResult<()> {
    if request.title.trim().is_empty() {
        return Err(ClientError::Validation("A title is required.".into()));
    }
    NaiveDate::parse_from_str(&request.date, DATE_FORMAT).map_err(|_| {
        ClientError::Validation(format!(
            "Date must be YYYY-MM-DD, got \"{}\"",
            request.date
        ))
    })?;
    Ok(())
}

/// Submit the prediction request. Never fails: a network or decode error
/// becomes `{"error": "Submission failed"}`, mirroring what the backend's
/// own error responses look like to the page.
pub async fn predict(
    client: &reqwest::Client,
    endpoint: &str,
    request: &PredictionRequest,
) -> Value {
    match submit(client, endpoint, request).await {
        Ok(body) => body,
        Err(e) => {
            warn!("[accounting] prediction request failed: {}", e);
            json!({"error": ERR_SUBMISSION_FAILED})
        }
    }
}

async fn submit(
    client: &reqwest::Client,
    endpoint: &str,
    request: &PredictionRequest,
) -> ClientResult<Value> {
    // The response body is rendered verbatim whatever the status — only a
    // transport or decode failure counts as an error here.
    let response = client.post(endpoint).json(request).send().await?;
    Ok(response.json().await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_well_formed_input() {
        let request = PredictionRequest {
            title: "Q3 forecast".into(),
            date: "2026-08-07".into(),
        };
        assert!(validate(&request).is_ok());
    }

    #[test]
    fn rejects_blank_title() {
        let request = PredictionRequest { title: "   ".into(), date: "2026-08-07".into() };
        assert!(matches!(validate(&request), Err(ClientError::Validation(_))));
    }

    #[test]
    fn rejects_malformed_dates() {
        for date in ["07-08-2026", "2026/08/07", "2026-13-01", "yesterday", ""] {
            let request = PredictionRequest { title: "t".into(), date: date.into() };
            assert!(validate(&request).is_err(), "date {:?} should be rejected", date);
        }
    }

    #[test]
    fn request_body_encoding() {
        let request = PredictionRequest { title: "Audit".into(), date: "2026-01-31".into() };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"title": "Audit", "date": "2026-01-31"})
        );
    }

    #[tokio::test]
    async fn failure_degrades_to_error_object() {
        let client = reqwest::Client::new();
        let request = PredictionRequest { title: "t".into(), date: "2026-08-07".into() };
        let body = predict(&client, "http://invalid.invalid", &request).await;
        assert_eq!(body, json!({"error": "Submission failed"}));
    }
}
