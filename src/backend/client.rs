use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error};

use crate::error::{ClientError, ClientResult};
use super::interface::TranslationBackend;
use super::types::{
    DocumentErrorBody, DocumentOutcome, DocumentUpload, TextTranslation, TranslateTextRequest,
    TranslateTextResponse,
};

const DEFAULT_DOCUMENT_TYPE: &str = "application/octet-stream";

/// HTTP client for the `/translate` and `/translate-document` endpoints.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("translator-desk/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl TranslationBackend for HttpBackend {
    async fn translate_text(&self, text: &str, target_lang: &str) -> ClientResult<TextTranslation> {
        let request = TranslateTextRequest {
            text: text.to_string(),
            target_lang: target_lang.to_string(),
        };

        debug!("POST /translate: {} chars -> {}", text.len(), target_lang);

        // The error shape arrives with a 400, so the body is read whatever the status.
        let response = self.client.post(self.url("/translate")).json(&request).send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        let result: TranslateTextResponse = serde_json::from_slice(&body).map_err(|e| {
            ClientError::InvalidResponse(format!("status {}: {}", status, e))
        })?;

        if result.success {
            Ok(TextTranslation {
                translated_text: result.translated_text.unwrap_or_default(),
                detected_language: result.detected_language.unwrap_or_else(|| "-".to_string()),
            })
        } else {
            let error_msg = result.error.unwrap_or_else(|| "Unknown error".to_string());
            error!("Text translation failed: {}", error_msg);
            Err(ClientError::Backend(error_msg))
        }
    }

    async fn translate_document(&self, upload: DocumentUpload) -> ClientResult<DocumentOutcome> {
        let DocumentUpload {
            file_name,
            content_type,
            bytes,
            target_lang,
        } = upload;

        debug!(
            "POST /translate-document: {} ({} bytes) -> {}",
            file_name,
            bytes.len(),
            target_lang
        );

        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(content_type.as_deref().unwrap_or(DEFAULT_DOCUMENT_TYPE))?;
        let form = Form::new().part("file", part).text("target_lang", target_lang);

        let response = self
            .client
            .post(self.url("/translate-document"))
            .multipart(form)
            .send()
            .await?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or(DEFAULT_DOCUMENT_TYPE)
            .to_string();
        let body = response.bytes().await?;

        if content_type.contains("application/json") {
            let parsed: DocumentErrorBody = serde_json::from_slice(&body)?;
            let error = parsed
                .error
                .unwrap_or_else(|| "Unexpected JSON response".to_string());
            return Ok(DocumentOutcome::Error { error });
        }

        Ok(DocumentOutcome::File {
            bytes: body.to_vec(),
            content_type,
        })
    }

    async fn health_check(&self) -> ClientResult<bool> {
        let response = self.client.get(self.url("/")).send().await?;
        Ok(response.status().is_success())
    }
}
