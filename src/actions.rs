use crate::api::types::{MarkRequest, PinPostRequest, ScanLikesRequest, ScheduleRequest};
use crate::api::AdminTransport;
use crate::console::strip::{StripGroup, StripKey};
use crate::console::Surface;
use anyhow::{Context, Result};
use serde::Serialize;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Handle to one in-flight admin call. Resolves once the reply, or the
/// failure, has been dealt with.
pub type Submission = JoinHandle<Result<()>>;

/// The admin operations. Strip updates are applied up front and never
/// rolled back; the request itself settles in the background and raises
/// a notification either way.
pub struct Actions {
    surface: Arc<dyn Surface>,
    transport: Arc<dyn AdminTransport>,
}

impl Actions {
    pub fn new(surface: Arc<dyn Surface>, transport: Arc<dyn AdminTransport>) -> Self {
        Self { surface, transport }
    }

    /// Make `target` the lone selected cell of its strip.
    fn toggle_strip(&self, target: &StripKey) -> Result<()> {
        for key in target.group_keys() {
            self.surface.deselect(&key)?;
        }
        self.surface.select(target)
    }

    /// Fire the request and settle it off-task. The returned handle is
    /// the only way to observe the outcome.
    fn submit<T>(&self, path: &'static str, request: T) -> Submission
    where
        T: Serialize + Send + 'static,
    {
        let surface = self.surface.clone();
        let transport = self.transport.clone();
        tokio::spawn(async move {
            let payload = serde_json::to_value(&request)
                .with_context(|| format!("serializing body for {}", path))?;
            let reply = transport.post_json(path, payload).await?;
            surface.toast(reply.toast_line());
            Ok(())
        })
    }

    pub fn set_include_in_fox_feed(
        &self,
        handle: &str,
        did: &str,
        include: Option<bool>,
    ) -> Result<Submission> {
        let target = StripKey::new(handle, StripGroup::FoxFeed, include.into());
        self.toggle_strip(&target)?;
        Ok(self.submit("/admin/mark", MarkRequest::fox(did, include)))
    }

    pub fn set_include_in_vix_feed(
        &self,
        handle: &str,
        did: &str,
        include: Option<bool>,
    ) -> Result<Submission> {
        let target = StripKey::new(handle, StripGroup::VixFeed, include.into());
        self.toggle_strip(&target)?;
        Ok(self.submit("/admin/mark", MarkRequest::vix(did, include)))
    }

    pub fn scan_likes(&self, uri: &str) -> Submission {
        self.submit(
            "/admin/scan_likes",
            ScanLikesRequest {
                uri: uri.to_string(),
            },
        )
    }

    pub fn set_post_pinned(&self, uri: &str, pin: bool) -> Result<Submission> {
        let target = StripKey::new(uri, StripGroup::Pinned, pin.into());
        self.toggle_strip(&target)?;
        Ok(self.submit(
            "/admin/pin_post",
            PinPostRequest {
                uri: uri.to_string(),
                pin,
            },
        ))
    }

    pub fn cancel_post(&self, id: &str) -> Submission {
        self.submit(
            "/schedule/cancel",
            ScheduleRequest { id: id.to_string() },
        )
    }

    pub fn post_post_immediately(&self, id: &str) -> Submission {
        self.submit(
            "/schedule/post_immediately",
            ScheduleRequest { id: id.to_string() },
        )
    }

    /// The path really is spelled `rechedule` on the server.
    pub fn post_reschedule(&self, id: &str) -> Submission {
        self.submit(
            "/schedule/rechedule",
            ScheduleRequest { id: id.to_string() },
        )
    }
}
