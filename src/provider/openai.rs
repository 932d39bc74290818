use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::Config;
use crate::errors::RequestError;

/// OpenAI-compatible legacy completions endpoint (`/v1/completions`).
pub struct OpenAiCompletions {
    model: String,
    url: String,
    api_key: String,
    max_tokens: u32,
    client: Client,
}

impl OpenAiCompletions {
    pub fn new(cfg: &Config, api_key: String) -> Result<Self, RequestError> {
        let mut builder = Client::builder();
        if let Some(t) = cfg.timeout() {
            builder = builder.timeout(t);
        }
        Ok(Self {
            model: cfg.model.clone(),
            url: format!("{}/v1/completions", cfg.api_base.trim_end_matches('/')),
            api_key,
            max_tokens: cfg.max_tokens,
            client: builder.build()?,
        })
    }
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    #[serde(default)]
    text: Option<String>,
}

/// Takes the first choice's text; absent or blank text is an error.
pub(crate) fn first_choice_text(body: &str) -> Result<String, RequestError> {
    let parsed: CompletionResponse = serde_json::from_str(body)?;
    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.text)
        .filter(|t| !t.trim().is_empty())
        .ok_or(RequestError::EmptyResponse)
}

#[async_trait]
impl super::CompletionBackend for OpenAiCompletions {
    async fn complete(&self, prompt: &str) -> Result<String, RequestError> {
        let body = CompletionRequest {
            model: &self.model,
            prompt,
            max_tokens: self.max_tokens,
        };

        debug!(url = %self.url, model = %self.model, "POST completion");

        let resp = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;
        debug!(status = status.as_u16(), body = %text, "completion response");

        if !status.is_success() {
            return Err(RequestError::Status { status: status.as_u16(), body: text });
        }

        first_choice_text(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::CompletionBackend;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serves one request with a canned raw HTTP response, returns the base URL.
    async fn serve_once(response: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut sock, _) = listener.accept().await.unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 1024];
            loop {
                let n = sock.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
                if request_complete(&buf) {
                    break;
                }
            }
            sock.write_all(response.as_bytes()).await.unwrap();
            sock.shutdown().await.ok();
        });
        format!("http://{addr}")
    }

    fn request_complete(buf: &[u8]) -> bool {
        let text = String::from_utf8_lossy(buf);
        let Some(end) = text.find("\r\n\r\n") else { return false };
        let len = text[..end]
            .lines()
            .find_map(|l| {
                let (k, v) = l.split_once(':')?;
                k.eq_ignore_ascii_case("content-length").then(|| v.trim().parse::<usize>().ok())?
            })
            .unwrap_or(0);
        buf.len() >= end + 4 + len
    }

    fn backend_at(api_base: String) -> OpenAiCompletions {
        let cfg = Config { api_base, timeout_secs: Some(5), ..Config::default() };
        OpenAiCompletions::new(&cfg, "test-key".into()).unwrap()
    }

    #[tokio::test]
    async fn non_success_status_is_reported_with_body() {
        let base = serve_once(
            "HTTP/1.1 401 Unauthorized\r\ncontent-type: text/plain\r\ncontent-length: 3\r\nconnection: close\r\n\r\nbad",
        )
        .await;
        match backend_at(base).complete("plants?").await {
            Err(RequestError::Status { status, body }) => {
                assert_eq!(status, 401);
                assert_eq!(body, "bad");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn success_returns_first_choice_text() {
        let base = serve_once(
            "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: 40\r\nconnection: close\r\n\r\n{\"choices\":[{\"text\":\"Banksia, Acacia\"}]}",
        )
        .await;
        assert_eq!(backend_at(base).complete("plants?").await.unwrap(), "Banksia, Acacia");
    }

    #[tokio::test]
    async fn closed_port_is_a_transport_error() {
        let port = std::net::TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap().port();
        let err = backend_at(format!("http://127.0.0.1:{port}")).complete("plants?").await.unwrap_err();
        assert!(matches!(err, RequestError::Transport(_)), "{err:?}");
    }

    #[test]
    fn takes_first_choice() {
        let body = r#"{"choices":[{"text":"\n\nBanksia, Grevillea"},{"text":"Acacia"}]}"#;
        assert_eq!(first_choice_text(body).unwrap(), "\n\nBanksia, Grevillea");
    }

    #[test]
    fn missing_text_is_empty_response() {
        for body in [r#"{"choices":[{}]}"#, r#"{"choices":[]}"#, r#"{}"#, r#"{"choices":[{"text":"  "}]}"#] {
            assert!(matches!(first_choice_text(body), Err(RequestError::EmptyResponse)), "{body}");
        }
    }

    #[test]
    fn garbage_is_a_decode_error() {
        assert!(matches!(first_choice_text("<html>"), Err(RequestError::Decode(_))));
    }

    #[test]
    fn url_joins_api_base() {
        let cfg = Config { api_base: "http://localhost:8080/".into(), ..Config::default() };
        let p = OpenAiCompletions::new(&cfg, "k".into()).unwrap();
        assert_eq!(p.url, "http://localhost:8080/v1/completions");
    }
}
