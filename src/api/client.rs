use std::time::Duration;

use reqwest::multipart;

use crate::error::{Error, Result};
use crate::types::AnalysisResult;

/// Client for the detection backend.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct PredictClient {
    http: reqwest::Client,
    base: String,
}

impl PredictClient {
    pub fn new(base: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Transport(e.to_string()))?;

        let base = base.into().trim_end_matches('/').to_string();
        Ok(Self { http, base })
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// Submit an image for prediction at the given confidence threshold.
    ///
    /// The threshold goes on the query string as a two-decimal value; the
    /// image travels as the multipart part named `file`.
    pub async fn predict(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
        confidence: f64,
    ) -> Result<AnalysisResult> {
        let url = format!("{}/predict?conf={:.2}", self.base, confidence);

        let part = multipart::Part::bytes(bytes).file_name(file_name.to_string());
        let form = multipart::Form::new().part("file", part);

        let response = self
            .http
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;

        // No structured error body is assumed; the status is the message.
        if !response.status().is_success() {
            return Err(Error::Transport(format!(
                "predict failed: {}",
                response.status()
            )));
        }

        response
            .json::<AnalysisResult>()
            .await
            .map_err(|e| Error::Decode(e.to_string()))
    }

    /// Probe the backend health endpoint.
    pub async fn health(&self) -> Result<()> {
        let url = format!("{}/health", self.base);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::Transport(format!(
                "health check failed: {}",
                response.status()
            )));
        }
        Ok(())
    }
}
