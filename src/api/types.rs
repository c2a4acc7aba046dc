use serde::Serialize;

/// Body for `/admin/mark`. Exactly one feed flag is set per request; the
/// other is left off the wire entirely. The flags are doubly optional
/// since a cleared verdict is sent as an explicit JSON `null`.
#[derive(Debug, Clone, Serialize)]
pub struct MarkRequest {
    pub did: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_in_fox_feed: Option<Option<bool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_in_vix_feed: Option<Option<bool>>,
}

impl MarkRequest {
    pub fn fox(did: impl Into<String>, include: Option<bool>) -> Self {
        Self {
            did: did.into(),
            include_in_fox_feed: Some(include),
            include_in_vix_feed: None,
        }
    }

    pub fn vix(did: impl Into<String>, include: Option<bool>) -> Self {
        Self {
            did: did.into(),
            include_in_fox_feed: None,
            include_in_vix_feed: Some(include),
        }
    }
}

/// Body for `/admin/scan_likes`.
#[derive(Debug, Clone, Serialize)]
pub struct ScanLikesRequest {
    pub uri: String,
}

/// Body for `/admin/pin_post`.
#[derive(Debug, Clone, Serialize)]
pub struct PinPostRequest {
    pub uri: String,
    pub pin: bool,
}

/// Body for the `/schedule/*` endpoints. Ids travel as strings.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleRequest {
    pub id: String,
}
