use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use wordwise_types::{LookupResult, Translation};

use crate::wire::{LookupRequest, LookupResponse};
use crate::{ProviderMetadata, TranslateError, Translator};

/// Talks to the lookup service over `POST {base}/translate`
#[derive(Clone)]
pub struct HttpTranslator {
    client: reqwest::Client,
    api_url: String,
}

impl HttpTranslator {
    pub fn new(api_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url,
        }
    }

    pub fn with_timeout(api_url: String, timeout: Duration) -> Result<Self, TranslateError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, api_url })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}

#[async_trait]
impl Translator for HttpTranslator {
    async fn lookup(&self, request: &LookupRequest) -> Result<LookupResult, TranslateError> {
        tracing::debug!(url = %self.api_url, word = %request.word, "sending lookup");

        let response = self.client.post(&self.api_url).json(request).send().await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(TranslateError::RateLimitExceeded);
        }

        if !status.is_success() {
            return Err(TranslateError::Api(format!("HTTP {status}")));
        }

        let body = response.bytes().await?;
        let parsed: LookupResponse = serde_json::from_slice(&body)
            .map_err(|e| TranslateError::MalformedPayload(e.to_string()))?;

        Ok(parsed.into())
    }

    async fn translate(
        &self,
        text: &str,
        from: &str,
        to: &str,
    ) -> Result<Translation, TranslateError> {
        let request = LookupRequest {
            word: text.to_string(),
            target_language: to.to_string(),
        };
        let result = self.lookup(&request).await?;

        Ok(Translation {
            text: result.translation,
            from: from.to_string(),
            to: to.to_string(),
            provider: "wordwise-http".to_string(),
        })
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "WordWise HTTP".to_string(),
            requires_network: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    use super::*;

    /// Serve exactly one canned HTTP response and hand back the raw request.
    async fn serve_once(status_line: &'static str, body: &'static str) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                request.extend_from_slice(&buf[..n]);
                if n == 0 || request_complete(&request) {
                    break;
                }
            }

            let response = format!(
                "{status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            String::from_utf8_lossy(&request).into_owned()
        });

        (format!("http://{addr}/translate"), handle)
    }

    fn request_complete(raw: &[u8]) -> bool {
        let text = String::from_utf8_lossy(raw);
        let Some(split) = text.find("\r\n\r\n") else {
            return false;
        };
        let content_length = text[..split]
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                name.eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse::<usize>().ok())
                    .flatten()
            })
            .unwrap_or(0);
        raw.len() >= split + 4 + content_length
    }

    fn beautiful() -> LookupRequest {
        LookupRequest {
            word: "beautiful".to_string(),
            target_language: "Spanish".to_string(),
        }
    }

    #[tokio::test]
    async fn lookup_posts_json_and_parses_result() {
        let (url, server) = serve_once(
            "HTTP/1.1 200 OK",
            r#"{"english_word":"beautiful","translation":"hermoso","target_language":"Spanish","meaning":"pleasing the senses","examples":{"1":"The sunset was beautiful."}}"#,
        )
        .await;

        let translator = HttpTranslator::new(url);
        let result = translator.lookup(&beautiful()).await.unwrap();

        assert_eq!(result.translation, "hermoso");
        assert_eq!(result.meaning, "pleasing the senses");
        assert_eq!(result.examples[0].text, "The sunset was beautiful.");

        let raw = server.await.unwrap();
        assert!(raw.starts_with("POST /translate"));
        assert!(raw.contains(r#""english_word":"beautiful""#));
        assert!(raw.contains(r#""target_language":"Spanish""#));
    }

    #[tokio::test]
    async fn non_success_status_is_an_api_error() {
        let (url, _server) = serve_once("HTTP/1.1 500 Internal Server Error", "{}").await;
        let err = HttpTranslator::new(url).lookup(&beautiful()).await.unwrap_err();
        assert!(matches!(err, TranslateError::Api(msg) if msg.contains("500")));
    }

    #[tokio::test]
    async fn too_many_requests_is_rate_limited() {
        let (url, _server) = serve_once("HTTP/1.1 429 Too Many Requests", "{}").await;
        let err = HttpTranslator::new(url).lookup(&beautiful()).await.unwrap_err();
        assert!(matches!(err, TranslateError::RateLimitExceeded));
    }

    #[tokio::test]
    async fn malformed_body_is_a_payload_error() {
        let (url, _server) = serve_once("HTTP/1.1 200 OK", r#"{"translation": 5}"#).await;
        let err = HttpTranslator::new(url).lookup(&beautiful()).await.unwrap_err();
        assert!(matches!(err, TranslateError::MalformedPayload(_)));
    }

    #[tokio::test]
    async fn unreachable_backend_is_a_network_error() {
        // Bind then drop so the port is very likely closed.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let translator =
            HttpTranslator::with_timeout(format!("http://{addr}/translate"), Duration::from_secs(2))
                .unwrap();
        let err = translator.lookup(&beautiful()).await.unwrap_err();
        assert!(matches!(err, TranslateError::Network(_)));
    }
}
