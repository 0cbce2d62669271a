use crate::error::{Error, Result};
use reqwest::{Client, StatusCode, header};
use std::time::Duration;
use tracing::{debug, warn};

/// One-shot JSON client for the model provider. Failures are reported to the
/// caller as-is; nothing here retries.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| Error::http(e.to_string()))?;

        Ok(Self { client })
    }

    pub async fn post_json_raw(
        &self,
        url: &str,
        body: &str,
        headers: &[(&str, &str)],
    ) -> Result<String> {
        let mut req = self
            .client
            .post(url)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body.to_string());
        for (k, v) in headers {
            req = req.header(*k, *v);
        }

        debug!(host = %extract_domain(url), bytes = body.len(), "POST");
        let resp = req.send().await.map_err(|e| {
            if e.is_timeout() {
                warn!("request timed out");
            }
            Error::http(e.to_string())
        })?;
        handle_response(resp).await
    }
}

async fn handle_response(resp: reqwest::Response) -> Result<String> {
    let status = resp.status();
    let url = resp.url().to_string();

    match status {
        StatusCode::OK | StatusCode::CREATED | StatusCode::ACCEPTED => {
            resp.text().await.map_err(|e| Error::http(e.to_string()))
        }
        StatusCode::TOO_MANY_REQUESTS => {
            let retry_after = resp
                .headers()
                .get(header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok());
            Err(Error::RateLimit {
                platform: extract_domain(&url),
                retry_after_secs: retry_after,
            })
        }
        _ => {
            let body = resp.text().await.unwrap_or_default();
            Err(Error::api_with_status(
                extract_domain(&url),
                body,
                status.as_u16(),
            ))
        }
    }
}

fn extract_domain(url: &str) -> String {
    url.split("//")
        .nth(1)
        .and_then(|s| s.split('/').next())
        .unwrap_or("unknown")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_is_host_and_port() {
        assert_eq!(
            extract_domain("https://generativelanguage.googleapis.com/v1beta/models/x"),
            "generativelanguage.googleapis.com"
        );
        assert_eq!(extract_domain("http://127.0.0.1:9000/messages"), "127.0.0.1:9000");
        assert_eq!(extract_domain("not a url"), "unknown");
    }
}
