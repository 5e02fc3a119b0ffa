//! Bot API HTTP client shared by the transport and the poller.

use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

use crate::ports::TransportError;

use super::api::{ApiResponse, File, GetFile, GetUpdates, Message, Update};

/// Configuration for the Bot API client.
#[derive(Debug, Clone)]
pub struct BotApiConfig {
    bot_token: Secret<String>,
    /// API root (default: https://api.telegram.org).
    pub api_base_url: String,
    /// Long-poll wait passed to `getUpdates`.
    pub poll_timeout: Duration,
    /// Per-request timeout; must exceed `poll_timeout`.
    pub request_timeout: Duration,
}

impl BotApiConfig {
    pub fn new(bot_token: impl Into<String>) -> Self {
        Self {
            bot_token: Secret::new(bot_token.into()),
            api_base_url: "https://api.telegram.org".to_string(),
            poll_timeout: Duration::from_secs(30),
            request_timeout: Duration::from_secs(60),
        }
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    pub fn with_poll_timeout(mut self, timeout: Duration) -> Self {
        self.poll_timeout = timeout;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

/// Thin typed wrapper over the Bot API methods the bot uses.
#[derive(Clone)]
pub struct TelegramClient {
    config: BotApiConfig,
    client: Client,
}

impl TelegramClient {
    /// # Errors
    ///
    /// `Network` if the HTTP client cannot be built.
    pub fn new(config: BotApiConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| TransportError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    pub fn poll_timeout(&self) -> Duration {
        self.config.poll_timeout
    }

    fn root(&self) -> &str {
        self.config.api_base_url.trim_end_matches('/')
    }

    fn method_url(&self, method: &str) -> String {
        format!(
            "{}/bot{}/{}",
            self.root(),
            self.config.bot_token.expose_secret(),
            method
        )
    }

    fn file_url(&self, file_path: &str) -> String {
        format!(
            "{}/file/bot{}/{}",
            self.root(),
            self.config.bot_token.expose_secret(),
            file_path
        )
    }

    /// Calls a JSON method and unwraps the response envelope.
    pub async fn call<B, T>(&self, method: &str, body: &B) -> Result<T, TransportError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .client
            .post(self.method_url(method))
            .json(body)
            .send()
            .await
            .map_err(map_request_error)?;

        unwrap_envelope(response).await
    }

    pub async fn get_updates(&self, offset: Option<i64>) -> Result<Vec<Update>, TransportError> {
        let body = GetUpdates {
            offset,
            timeout: self.config.poll_timeout.as_secs(),
            allowed_updates: vec!["message", "callback_query"],
        };
        self.call("getUpdates", &body).await
    }

    /// Uploads a JPEG with a caption via multipart form.
    pub async fn send_photo(
        &self,
        chat_id: i64,
        photo: Vec<u8>,
        caption: &str,
    ) -> Result<Message, TransportError> {
        let part = Part::bytes(photo)
            .file_name("photo.jpg")
            .mime_str("image/jpeg")
            .map_err(|e| TransportError::InvalidResponse(e.to_string()))?;
        let form = Form::new()
            .text("chat_id", chat_id.to_string())
            .text("caption", caption.to_string())
            .part("photo", part);

        let response = self
            .client
            .post(self.method_url("sendPhoto"))
            .multipart(form)
            .send()
            .await
            .map_err(map_request_error)?;

        unwrap_envelope(response).await
    }

    /// Resolves a file id and downloads its content.
    pub async fn download_file(&self, file_id: &str) -> Result<Vec<u8>, TransportError> {
        let file: File = self.call("getFile", &GetFile { file_id }).await?;
        let file_path = file.file_path.ok_or_else(|| {
            TransportError::InvalidResponse(format!("File {} has no download path", file.file_id))
        })?;

        let response = self
            .client
            .get(self.file_url(&file_path))
            .send()
            .await
            .map_err(map_request_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Api {
                code: i64::from(status.as_u16()),
                description: format!("File download failed for {}", file_path),
            });
        }

        let bytes = response.bytes().await.map_err(map_request_error)?;
        Ok(bytes.to_vec())
    }
}

fn map_request_error(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout
    } else if e.is_connect() {
        TransportError::Network(format!("Connection failed: {}", e))
    } else {
        // Strip the URL: it embeds the bot token
        TransportError::Network(e.without_url().to_string())
    }
}

async fn unwrap_envelope<T: DeserializeOwned>(response: Response) -> Result<T, TransportError> {
    let status = response.status();
    let envelope: ApiResponse<T> = response.json().await.map_err(|e| {
        if e.is_timeout() {
            TransportError::Timeout
        } else {
            TransportError::InvalidResponse(format!("HTTP {}: {}", status, e.without_url()))
        }
    })?;

    if !envelope.ok {
        return Err(TransportError::Api {
            code: envelope.error_code.unwrap_or_else(|| i64::from(status.as_u16())),
            description: envelope.description.unwrap_or_default(),
        });
    }

    envelope
        .result
        .ok_or_else(|| TransportError::InvalidResponse("Missing result".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> TelegramClient {
        TelegramClient::new(BotApiConfig::new("123:abc").with_api_base_url("http://host/"))
            .unwrap()
    }

    #[test]
    fn method_url_embeds_token() {
        assert_eq!(client().method_url("sendMessage"), "http://host/bot123:abc/sendMessage");
    }

    #[test]
    fn file_url_uses_file_prefix() {
        assert_eq!(
            client().file_url("photos/file_1.jpg"),
            "http://host/file/bot123:abc/photos/file_1.jpg"
        );
    }

    #[test]
    fn config_debug_does_not_leak_token() {
        let config = BotApiConfig::new("123:very-secret");
        assert!(!format!("{:?}", config).contains("very-secret"));
    }
}
