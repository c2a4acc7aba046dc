pub mod client;
pub mod types;

pub use client::{AdminClient, ServerReply};

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Transport to the admin server. One verb: POST a JSON body, hand back
/// whatever the server settled on.
#[async_trait]
pub trait AdminTransport: Send + Sync {
    /// POST `payload` to `path` under the configured base url.
    ///
    /// Any reply settles the call, error statuses included; only
    /// transport failures (refused connection, dropped socket) come
    /// back as `Err`.
    async fn post_json(&self, path: &str, payload: Value) -> Result<ServerReply>;
}
