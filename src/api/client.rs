use super::AdminTransport;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

/// A settled admin call. Error statuses land here too; the caller reads
/// the code instead of matching on `Err`.
#[derive(Debug, Clone)]
pub struct ServerReply {
    pub status: u16,
    pub reason: String,
    pub body: String,
}

impl ServerReply {
    /// The `{status} {reason} - {body}` line the notification column
    /// shows for every settled call.
    pub fn toast_line(&self) -> String {
        format!("{} {} - {}", self.status, self.reason, self.body)
    }
}

/// JSON POST client for the admin server.
pub struct AdminClient {
    client: Client,
    base_url: String,
}

impl AdminClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl AdminTransport for AdminClient {
    async fn post_json(&self, path: &str, payload: Value) -> Result<ServerReply> {
        let url = format!("{}{}", self.base_url, path);

        let resp = self
            .client
            .post(&url)
            .header("cache-control", "no-cache")
            .json(&payload)
            .send()
            .await
            .with_context(|| format!("POST {} failed", url))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .with_context(|| format!("reading reply body from {} failed", url))?;

        Ok(ServerReply {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("").to_string(),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toast_line_format() {
        let reply = ServerReply {
            status: 200,
            reason: "OK".to_string(),
            body: "OK".to_string(),
        };
        assert_eq!(reply.toast_line(), "200 OK - OK");

        let reply = ServerReply {
            status: 403,
            reason: "Forbidden".to_string(),
            body: "forbidden".to_string(),
        };
        assert_eq!(reply.toast_line(), "403 Forbidden - forbidden");
    }

    #[test]
    fn test_toast_line_with_no_reason() {
        // Statuses outside the registry have no reason phrase
        let reply = ServerReply {
            status: 599,
            reason: String::new(),
            body: "nope".to_string(),
        };
        assert_eq!(reply.toast_line(), "599  - nope");
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = AdminClient::new("http://127.0.0.1:8080/");
        assert_eq!(client.base_url, "http://127.0.0.1:8080");
    }
}
