use crate::model::channel::Channel;
use serde::{Deserialize, Serialize};

/// Body of a completed `POST /upload`.
///
/// `success` is false when at least one channel failed; the reports of the
/// other channels are still present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub message: String,
    pub success: bool,
    pub channels: Vec<ChannelReport>,
}

/// Outcome of syncing one channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelReport {
    pub channel: Channel,
    pub sheet: String,
    pub appended: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Body returned when an upload is rejected before any channel is synced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}
